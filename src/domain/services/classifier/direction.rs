use crate::domain::entities::message::TradeDirection;

/// Extracts the trade direction from message text via case-insensitive
/// keyword search. The buy set is checked first, so a message containing
/// markers from both sets reads as a buy.
pub struct DirectionExtractor {
    pub buy_markers: Vec<&'static str>,
    pub sell_markers: Vec<&'static str>,
}

impl Default for DirectionExtractor {
    fn default() -> Self {
        DirectionExtractor {
            buy_markers: vec!["compra", "buy", "long", "📈", "🚀", "⬆️"],
            sell_markers: vec!["venda", "sell", "short", "📉", "⬇️"],
        }
    }
}

impl DirectionExtractor {
    pub fn extract(&self, text: &str) -> Option<TradeDirection> {
        let lower = text.to_lowercase();
        if self.buy_markers.iter().any(|m| lower.contains(m)) {
            Some(TradeDirection::Buy)
        } else if self.sell_markers.iter().any(|m| lower.contains(m)) {
            Some(TradeDirection::Sell)
        } else {
            None
        }
    }
}
