use shared_types::BlockContext;

/// External per-token pricing source (spec §2 diagram: "Pricing oracle
/// (external)"). `None` means no oracle value is available at all, which
/// falls back to [`crate::Params::legacy_fallback_price`]; `Some(0)` means
/// the oracle explicitly quoted zero — the grace-period case (spec §9,
/// open question 1).
pub trait PricingOracle {
    fn quote_per_token_price(&self, ctx: &BlockContext) -> Option<u64>;
}

/// A fixed-price oracle, useful for tests and for chains that have not wired
/// up a real pricing feed yet.
pub struct FixedPriceOracle(pub Option<u64>);

impl PricingOracle for FixedPriceOracle {
    fn quote_per_token_price(&self, _ctx: &BlockContext) -> Option<u64> {
        self.0
    }
}
