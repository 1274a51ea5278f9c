use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::config::{MAX_REPORTER_TAG_LEN, RECENT_HISTORY_LIMIT};
use crate::state::CrashKind;

/// On-chain record capacity. Sequence numbers keep the append-only
/// ordering even after the oldest entries roll off.
pub const MAX_RECORDS: usize = 64;

/// One accepted crash response. Never edited or removed.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct CrashRecord {
    pub sequence: u64,
    pub collection_id: Pubkey,
    pub detected_at: i64,
    pub current_price: u64,
    pub baseline_price: u64,
    pub crash_kind: CrashKind,
    pub severity_bps: u64,
    pub reporter_tag: String,
}

impl CrashRecord {
    pub const MAX_LEN: usize = 8 + // sequence
        32 + // collection_id
        8 + // detected_at
        8 + // current_price
        8 + // baseline_price
        1 + // crash_kind
        8 + // severity_bps
        4 + MAX_REPORTER_TAG_LEN; // reporter_tag
}

/// Append-only crash history for one collection.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct CrashHistory {
    pub is_initialized: bool,
    pub collection_id: Pubkey,
    pub next_sequence: u64,
    pub records: Vec<CrashRecord>,
    pub bump: u8,
}

impl CrashHistory {
    pub const SEED: &'static [u8] = b"crash_history";

    pub fn new(collection_id: Pubkey, bump: u8) -> Self {
        Self {
            is_initialized: true,
            collection_id,
            next_sequence: 0,
            records: Vec::with_capacity(MAX_RECORDS),
            bump,
        }
    }

    pub fn calculate_size() -> usize {
        1 + // is_initialized
        32 + // collection_id
        8 + // next_sequence
        4 + MAX_RECORDS * CrashRecord::MAX_LEN + // records vec
        1 + // bump
        128 // padding for growth
    }

    /// Append a record under the next sequence number, evicting the
    /// oldest entry once at capacity. Returns the assigned sequence.
    pub fn append(
        &mut self,
        collection_id: Pubkey,
        detected_at: i64,
        current_price: u64,
        baseline_price: u64,
        crash_kind: CrashKind,
        severity_bps: u64,
        reporter_tag: String,
    ) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);

        self.records.push(CrashRecord {
            sequence,
            collection_id,
            detected_at,
            current_price,
            baseline_price,
            crash_kind,
            severity_bps,
            reporter_tag,
        });

        if self.records.len() > MAX_RECORDS {
            self.records.remove(0);
        }

        sequence
    }

    /// Most recent records, newest first, capped at the query limit.
    pub fn recent(&self, limit: usize) -> Vec<&CrashRecord> {
        let limit = limit.min(RECENT_HISTORY_LIMIT);
        self.records.iter().rev().take(limit).collect()
    }
}
