use solana_program::program_error::ProgramError;

/// One round of an external price feed. Only `price` and `updated_at`
/// are consumed; the remaining fields are carried for parity with the
/// aggregator interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRound {
    pub round_id: u64,
    /// Signed on the wire; non-positive values are rejected.
    pub price: i64,
    pub started_at: i64,
    pub updated_at: i64,
    pub answered_in_round: u64,
}

/// Narrow capability interface over an external price source. The
/// collection unit depends only on this, never on a concrete feed.
pub trait PriceFeed {
    fn latest_round(&self) -> Result<PriceRound, ProgramError>;
}
