pub mod category;
pub mod direction;
pub mod message_type;
pub mod symbol;

pub use category::CategoryResolver;
pub use direction::DirectionExtractor;
pub use message_type::TypeResolver;
pub use symbol::SymbolExtractor;

use tracing::debug;

use crate::domain::entities::message::{ProcessedMessage, RawChannelMessage};

/// Turns a raw channel message into a `ProcessedMessage` by running the four
/// extraction rules. Classification is pure and deterministic: the same text
/// always yields the same fields.
pub struct MessageClassifier {
    symbols: SymbolExtractor,
    directions: DirectionExtractor,
    categories: CategoryResolver,
    types: TypeResolver,
}

impl Default for MessageClassifier {
    fn default() -> Self {
        MessageClassifier {
            symbols: SymbolExtractor,
            directions: DirectionExtractor::default(),
            categories: CategoryResolver::default(),
            types: TypeResolver::default(),
        }
    }
}

impl MessageClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify(&self, raw: &RawChannelMessage) -> ProcessedMessage {
        let symbol = self.symbols.extract(&raw.text);
        let direction = self.directions.extract(&raw.text);
        let category = self.categories.resolve(&raw.text, symbol.as_deref());
        let message_type = self.types.resolve(&raw.text);

        debug!(
            message_id = raw.id,
            symbol = ?symbol,
            direction = ?direction,
            category = %category,
            message_type = %message_type,
            "Classified channel message"
        );

        ProcessedMessage {
            id: raw.id.to_string(),
            content: raw.text.clone(),
            author: raw.author.clone(),
            timestamp: raw.timestamp,
            message_type,
            symbol,
            direction,
            category,
        }
    }
}
