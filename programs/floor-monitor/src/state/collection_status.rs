use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::config::HEALTH_SILENCE_WINDOW_SECS;

/// Per-collection mutable state. `Normal -> Emergency` happens through
/// response escalation; the reverse only through an owner override.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct CollectionStatus {
    pub is_initialized: bool,
    pub collection_id: Pubkey,
    pub emergency_mode: bool,
    pub last_crash_at: i64,
    pub last_crash_price: u64,
    pub crash_count: u64,
    pub bump: u8,
}

impl CollectionStatus {
    pub const SEED: &'static [u8] = b"collection_status";

    pub const LEN: usize = 1 + // is_initialized
        32 + // collection_id
        1 + // emergency_mode
        8 + // last_crash_at
        8 + // last_crash_price
        8 + // crash_count
        1 + // bump
        32; // padding for growth

    pub fn new(collection_id: Pubkey, bump: u8) -> Self {
        Self {
            is_initialized: true,
            collection_id,
            emergency_mode: false,
            last_crash_at: 0,
            last_crash_price: 0,
            crash_count: 0,
            bump,
        }
    }

    pub fn record_crash(&mut self, detected_at: i64, price: u64) {
        self.last_crash_at = detected_at;
        self.last_crash_price = price;
        self.crash_count = self.crash_count.saturating_add(1);
    }

    /// Health check: false while in emergency mode or within the
    /// silence window after the last accepted crash.
    pub fn is_healthy(&self, now: i64) -> bool {
        if self.emergency_mode {
            return false;
        }

        self.last_crash_at == 0 || now.saturating_sub(self.last_crash_at) > HEALTH_SILENCE_WINDOW_SECS
    }
}
