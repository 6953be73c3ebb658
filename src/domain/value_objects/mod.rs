pub mod sale_price;
