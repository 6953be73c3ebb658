use crate::domain::errors::CommissionError;

/// Sale price of a product. Non-negative and finite by construction, so the
/// commission formula can never silently produce a negative payout.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SalePrice(f64);

impl SalePrice {
    pub fn new(value: f64) -> Result<Self, CommissionError> {
        if !value.is_finite() {
            return Err(CommissionError::InvalidPrice(
                "Price must be finite".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(CommissionError::InvalidPrice(
                "Price must be non-negative".to_string(),
            ));
        }
        Ok(SalePrice(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
