use crate::domain::entities::message::MessageCategory;

/// Resolves the market category of a message. An extracted symbol containing
/// a known crypto or metal/oil ticker decides immediately; otherwise the raw
/// text is scanned for keywords, crypto before commodities, with forex as
/// the default.
pub struct CategoryResolver {
    pub crypto_tickers: Vec<&'static str>,
    pub commodity_tickers: Vec<&'static str>,
    pub crypto_keywords: Vec<&'static str>,
    pub commodity_keywords: Vec<&'static str>,
}

impl Default for CategoryResolver {
    fn default() -> Self {
        CategoryResolver {
            crypto_tickers: vec!["BTC", "ETH", "ADA", "DOT", "SOL"],
            commodity_tickers: vec!["XAU", "XAG", "OIL"],
            crypto_keywords: vec!["bitcoin", "ethereum", "crypto", "cripto", "altcoin"],
            commodity_keywords: vec!["ouro", "gold", "prata", "silver", "petróleo", "petroleo", "oil"],
        }
    }
}

impl CategoryResolver {
    pub fn resolve(&self, text: &str, symbol: Option<&str>) -> MessageCategory {
        if let Some(symbol) = symbol {
            if self.crypto_tickers.iter().any(|t| symbol.contains(t)) {
                return MessageCategory::Crypto;
            }
            if self.commodity_tickers.iter().any(|t| symbol.contains(t)) {
                return MessageCategory::Commodities;
            }
        }

        let lower = text.to_lowercase();
        if self.crypto_keywords.iter().any(|k| lower.contains(k)) {
            return MessageCategory::Crypto;
        }
        if self.commodity_keywords.iter().any(|k| lower.contains(k)) {
            return MessageCategory::Commodities;
        }

        MessageCategory::Forex
    }
}
