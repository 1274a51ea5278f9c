use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

/// A single validated floor-price observation. Immutable once produced;
/// the host network holds these in a rolling window and hands them back
/// to the classifier newest first.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub schema_version: u16,
    /// Floor price in the smallest price unit, strictly positive.
    pub price: u64,
    /// Unix timestamp of the observation, strictly positive.
    pub observed_at: i64,
    pub collection_id: Pubkey,
    /// Identifies the detector instance that produced this snapshot.
    pub reporter_tag: String,
}
