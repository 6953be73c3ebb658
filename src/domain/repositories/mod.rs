pub mod channel_client;
