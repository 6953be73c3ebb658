use crate::domain::entities::message::MessageType;

/// Resolves the content type of a message via ordered keyword-set checks:
/// signal terms, then analysis terms, then news terms, then an emoji-based
/// fallback, defaulting to a market update.
pub struct TypeResolver {
    pub signal_keywords: Vec<&'static str>,
    pub analysis_keywords: Vec<&'static str>,
    pub news_keywords: Vec<&'static str>,
    pub analysis_emojis: Vec<&'static str>,
    pub signal_emojis: Vec<&'static str>,
}

impl Default for TypeResolver {
    fn default() -> Self {
        TypeResolver {
            signal_keywords: vec![
                "sinal",
                "signal",
                "entrada",
                "entry",
                "take profit",
                "stop loss",
                "tp:",
                "sl:",
                "alvo",
            ],
            analysis_keywords: vec![
                "análise",
                "analise",
                "analysis",
                "técnica",
                "tecnica",
                "suporte",
                "support",
                "resistência",
                "resistencia",
                "resistance",
                "tendência",
                "tendencia",
            ],
            news_keywords: vec![
                "fed",
                "notícia",
                "noticia",
                "news",
                "market update",
                "payroll",
                "cpi",
            ],
            analysis_emojis: vec!["📊", "📈", "📉"],
            signal_emojis: vec!["💰", "🎯", "💵"],
        }
    }
}

impl TypeResolver {
    pub fn resolve(&self, text: &str) -> MessageType {
        let lower = text.to_lowercase();

        if self.signal_keywords.iter().any(|k| lower.contains(k)) {
            return MessageType::Signal;
        }
        if self.analysis_keywords.iter().any(|k| lower.contains(k)) {
            return MessageType::Analysis;
        }
        if self.news_keywords.iter().any(|k| lower.contains(k)) {
            return MessageType::MarketUpdate;
        }

        // No keyword hit; fall back on emoji conventions.
        if self.analysis_emojis.iter().any(|e| text.contains(e)) {
            return MessageType::Analysis;
        }
        if self.signal_emojis.iter().any(|e| text.contains(e)) {
            return MessageType::Signal;
        }

        MessageType::MarketUpdate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_keywords() {
        let resolver = TypeResolver::default();
        assert_eq!(
            resolver.resolve("Sinal de Compra XAUUSD, TP: 2410, SL: 2380"),
            MessageType::Signal
        );
        assert_eq!(
            resolver.resolve("Entrada agora com alvo em 1.0850"),
            MessageType::Signal
        );
    }

    #[test]
    fn test_analysis_keywords() {
        let resolver = TypeResolver::default();
        assert_eq!(
            resolver.resolve("EUR/USD - Análise Técnica da semana"),
            MessageType::Analysis
        );
        assert_eq!(
            resolver.resolve("Preço testou o suporte em 1.0700"),
            MessageType::Analysis
        );
    }

    #[test]
    fn test_signal_beats_analysis() {
        let resolver = TypeResolver::default();
        // Contains both "sinal" and "suporte"; signal keywords are checked first.
        assert_eq!(
            resolver.resolve("Sinal após confirmação no suporte"),
            MessageType::Signal
        );
    }

    #[test]
    fn test_news_keywords() {
        let resolver = TypeResolver::default();
        assert_eq!(
            resolver.resolve("Fed mantém juros inalterados"),
            MessageType::MarketUpdate
        );
        assert_eq!(
            resolver.resolve("CPI acima do esperado"),
            MessageType::MarketUpdate
        );
    }

    #[test]
    fn test_emoji_fallback() {
        let resolver = TypeResolver::default();
        assert_eq!(resolver.resolve("📊 GBPJPY"), MessageType::Analysis);
        assert_eq!(resolver.resolve("🎯 1.0900"), MessageType::Signal);
        // Keyword hit outranks the emoji fallback.
        assert_eq!(resolver.resolve("🎯 nova análise"), MessageType::Analysis);
    }

    #[test]
    fn test_default_is_market_update() {
        let resolver = TypeResolver::default();
        assert_eq!(resolver.resolve("Bom dia a todos"), MessageType::MarketUpdate);
        assert_eq!(resolver.resolve(""), MessageType::MarketUpdate);
    }
}
