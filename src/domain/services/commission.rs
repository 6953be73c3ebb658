use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

use crate::domain::entities::commission::CommissionRule;
use crate::domain::errors::CommissionError;
use crate::domain::value_objects::sale_price::SalePrice;

/// Affiliate tier ladder, ordered from entry level up to Presidential.
/// Membership is a case-sensitive exact match; plain members ("Membro",
/// "Membro VIP") are deliberately absent.
pub const AFFILIATE_TIERS: [&str; 11] = [
    "Distribuidor",
    "Distribuidor Qualificado",
    "Executivo",
    "Executivo Senior",
    "Bronze",
    "Prata",
    "Ouro",
    "Platina",
    "Diamante",
    "Diamante Azul",
    "Presidential",
];

/// Computes payable commission for a sale and gates eligibility by role.
///
/// Rules are configuration data: loaded once at construction, immutable for
/// the lifetime of the engine, exactly one rule per product id.
pub struct CommissionEngine {
    rules: HashMap<String, CommissionRule>,
}

impl CommissionEngine {
    pub fn new(rules: Vec<CommissionRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| (rule.product_id.clone(), rule))
            .collect();
        CommissionEngine { rules }
    }

    /// Engine preloaded with the platform's product catalog.
    pub fn with_default_rules() -> Self {
        Self::new(default_rules())
    }

    /// Whether `role` may earn commission at all. Unknown roles are simply
    /// not eligible; there is no error condition.
    pub fn is_eligible_affiliate(&self, role: &str) -> bool {
        AFFILIATE_TIERS.contains(&role)
    }

    pub fn rule(&self, product_id: &str) -> Option<&CommissionRule> {
        self.rules.get(product_id)
    }

    /// Commission amount for a sale, sentinel flavor: an unknown product
    /// yields `0.0` rather than an error, matching the platform's documented
    /// fallback behavior.
    pub fn calculate_commission(&self, product_id: &str, price: SalePrice) -> f64 {
        match self.rules.get(product_id) {
            Some(rule) => price.value() * rule.rate / 100.0,
            None => {
                debug!(
                    product_id = %product_id,
                    "No commission rule for product, returning 0"
                );
                0.0
            }
        }
    }

    /// Strict variant of [`calculate_commission`](Self::calculate_commission)
    /// for call sites that need to distinguish a missing rule from a
    /// zero-rate rule.
    pub fn commission_for(
        &self,
        product_id: &str,
        price: SalePrice,
    ) -> Result<f64, CommissionError> {
        let rule = self
            .rules
            .get(product_id)
            .ok_or_else(|| CommissionError::RuleNotFound(product_id.to_string()))?;
        Ok(price.value() * rule.rate / 100.0)
    }

    /// Generate a referral code for an affiliate: first 5 characters of the
    /// username uppercased plus 4 random digits. Codes are not guaranteed
    /// unique; collision handling is the caller's concern.
    pub fn generate_affiliate_code(username: &str) -> String {
        let mut rng = rand::thread_rng();
        Self::affiliate_code_with_suffix(username, rng.gen_range(0..10_000))
    }

    /// Deterministic core of code generation, split out so the random source
    /// can be replaced in tests.
    pub fn affiliate_code_with_suffix(username: &str, suffix: u32) -> String {
        let prefix: String = username.chars().take(5).collect::<String>().to_uppercase();
        format!("{}{:04}", prefix, suffix % 10_000)
    }
}

/// The platform's product catalog with commission rates.
fn default_rules() -> Vec<CommissionRule> {
    vec![
        CommissionRule {
            product_id: "mtm-scanner".to_string(),
            product_name: "MTM Scanner".to_string(),
            rate: 20.0,
            base_price: 250.0,
            minimum_role_required: "Distribuidor".to_string(),
            excluded_roles: vec!["Membro".to_string()],
        },
        CommissionRule {
            product_id: "sinais-premium".to_string(),
            product_name: "Sinais Premium".to_string(),
            rate: 30.0,
            base_price: 80.0,
            minimum_role_required: "Distribuidor".to_string(),
            excluded_roles: vec![],
        },
        CommissionRule {
            product_id: "bootcamp-trading".to_string(),
            product_name: "Bootcamp de Trading".to_string(),
            rate: 25.0,
            base_price: 450.0,
            minimum_role_required: "Executivo".to_string(),
            excluded_roles: vec![],
        },
        CommissionRule {
            product_id: "membro-vip-anual".to_string(),
            product_name: "Membro VIP Anual".to_string(),
            rate: 15.0,
            base_price: 120.0,
            minimum_role_required: "Distribuidor".to_string(),
            excluded_roles: vec!["Membro".to_string(), "Membro VIP".to_string()],
        },
    ]
}
