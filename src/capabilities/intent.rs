use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::models::Intent;

/// Interface for intent detection over a speaker's transcript.
#[async_trait]
pub trait IntentDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<Intent, CapabilityError>;
}

/// Keyword rules in priority order; the first matching rule wins.
const INTENT_RULES: &[(&[&str], Intent)] = &[
    (&["exchange", "refund", "return"], Intent::ExchangeRequest),
    (&["order", "delivery"], Intent::OrderStatus),
    (&["price", "cost"], Intent::ProductInquiry),
];

/// Keyword-membership intent classifier over lower-cased text.
///
/// Produces exactly one label; text matching no rule is classified as
/// general conversation.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordIntentClassifier;

impl KeywordIntentClassifier {
    pub fn classify(&self, text: &str) -> Intent {
        let lower = text.to_lowercase();
        for (keywords, intent) in INTENT_RULES {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                return *intent;
            }
        }
        Intent::GeneralConversation
    }
}

#[async_trait]
impl IntentDetector for KeywordIntentClassifier {
    async fn detect(&self, text: &str) -> Result<Intent, CapabilityError> {
        Ok(self.classify(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_keywords() {
        let classifier = KeywordIntentClassifier;
        assert_eq!(
            classifier.classify("I want a refund for this"),
            Intent::ExchangeRequest
        );
        assert_eq!(
            classifier.classify("can I RETURN it"),
            Intent::ExchangeRequest
        );
    }

    #[test]
    fn test_first_rule_wins_over_order() {
        // contains both "refund" and "order"; the exchange rule has priority
        let classifier = KeywordIntentClassifier;
        assert_eq!(
            classifier.classify("I'd like a refund on my order"),
            Intent::ExchangeRequest
        );
    }

    #[test]
    fn test_order_and_price_rules() {
        let classifier = KeywordIntentClassifier;
        assert_eq!(
            classifier.classify("where is my delivery"),
            Intent::OrderStatus
        );
        assert_eq!(
            classifier.classify("what does it cost"),
            Intent::ProductInquiry
        );
    }

    #[test]
    fn test_no_match_is_general_conversation() {
        let classifier = KeywordIntentClassifier;
        assert_eq!(
            classifier.classify("lovely weather today"),
            Intent::GeneralConversation
        );
    }
}
