//! Price calculation for document production.

use tracing::debug;

use paperwright_shared::{PriceQuote, PricingConfig, WorkKind};

/// Computes price quotes from an explicit pricing table.
///
/// Constructed per deployment from [`PricingConfig`]; holds no process-wide
/// state. Amounts are constant per kind — the page count is recorded on the
/// quote but does not scale it.
#[derive(Debug, Clone)]
pub struct PricingGate {
    config: PricingConfig,
}

impl PricingGate {
    /// Build a gate over the given pricing table.
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Quote the cost of producing `kind` at `page_count` pages.
    ///
    /// When `page_count` is `None`, the kind's customary length is recorded
    /// on the quote. No input is invalid: `WorkKind` is a closed enum and
    /// every kind has a configured amount.
    pub fn quote(&self, kind: WorkKind, page_count: Option<u32>) -> PriceQuote {
        let amount = self.config.amount_for(kind);
        let page_count = page_count.unwrap_or_else(|| customary_page_count(kind));

        debug!(%kind, page_count, amount, currency = %self.config.currency, "computed quote");

        PriceQuote {
            kind,
            page_count,
            amount,
            currency: self.config.currency.clone(),
        }
    }

    /// The currency every quote from this gate carries.
    pub fn currency(&self) -> &str {
        &self.config.currency
    }
}

/// Customary document length per kind, used when the caller does not ask
/// for a specific page count.
fn customary_page_count(kind: WorkKind) -> u32 {
    match kind {
        WorkKind::Coursework => 10,
        WorkKind::Report => 8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> PricingGate {
        PricingGate::new(PricingConfig::default())
    }

    #[test]
    fn default_amounts_per_kind() {
        let quote = gate().quote(WorkKind::Coursework, Some(40));
        assert_eq!(quote.amount, 500);
        assert_eq!(quote.currency, "RUB");

        let quote = gate().quote(WorkKind::Report, Some(2));
        assert_eq!(quote.amount, 300);
    }

    #[test]
    fn page_count_does_not_change_amount() {
        let short = gate().quote(WorkKind::Coursework, Some(1));
        let long = gate().quote(WorkKind::Coursework, Some(200));
        assert_eq!(short.amount, long.amount);
    }

    #[test]
    fn customary_page_counts() {
        assert_eq!(gate().quote(WorkKind::Coursework, None).page_count, 10);
        assert_eq!(gate().quote(WorkKind::Report, None).page_count, 8);
        assert_eq!(gate().quote(WorkKind::Report, Some(25)).page_count, 25);
    }

    #[test]
    fn custom_pricing_table() {
        let gate = PricingGate::new(PricingConfig {
            coursework: 750,
            report: 450,
            currency: "EUR".into(),
        });
        let quote = gate.quote(WorkKind::Report, None);
        assert_eq!(quote.amount, 450);
        assert_eq!(quote.currency, "EUR");
    }
}
