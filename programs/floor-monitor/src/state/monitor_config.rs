use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::error::FloorMonitorError;

/// Maximum detector identities the authorization set can hold.
pub const MAX_DETECTORS: usize = 16;

#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct DetectorEntry {
    pub detector: Pubkey,
    pub authorized: bool,
}

/// Root account for the monitor: owner identity, the detector
/// authorization set and global crash bookkeeping.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct MonitorConfig {
    pub is_initialized: bool,
    pub owner: Pubkey,
    pub detectors: Vec<DetectorEntry>,
    pub total_crashes: u64,
    pub bump: u8,
}

impl MonitorConfig {
    pub const SEED: &'static [u8] = b"monitor_config";

    pub const LEN: usize = 1 + // is_initialized
        32 + // owner
        4 + MAX_DETECTORS * (32 + 1) + // detectors vec
        8 + // total_crashes
        1 + // bump
        64; // padding for growth

    pub fn new(owner: Pubkey, bump: u8) -> Self {
        Self {
            is_initialized: true,
            owner,
            detectors: Vec::new(),
            total_crashes: 0,
            bump,
        }
    }

    pub fn is_authorized(&self, detector: &Pubkey) -> bool {
        self.detectors
            .iter()
            .any(|entry| entry.detector == *detector && entry.authorized)
    }

    /// Upsert a detector's authorization flag. Owner-only at the
    /// processor level.
    pub fn set_authorization(
        &mut self,
        detector: Pubkey,
        authorized: bool,
    ) -> Result<(), ProgramError> {
        if let Some(entry) = self.detectors.iter_mut().find(|e| e.detector == detector) {
            entry.authorized = authorized;
            return Ok(());
        }

        if self.detectors.len() >= MAX_DETECTORS {
            return Err(FloorMonitorError::TooManyDetectors.into());
        }

        self.detectors.push(DetectorEntry {
            detector,
            authorized,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_set_upsert() {
        let mut config = MonitorConfig::new(Pubkey::new_unique(), 255);
        let detector = Pubkey::new_unique();

        assert!(!config.is_authorized(&detector));

        config.set_authorization(detector, true).unwrap();
        assert!(config.is_authorized(&detector));

        // Flipping the flag off keeps the entry but revokes access
        config.set_authorization(detector, false).unwrap();
        assert!(!config.is_authorized(&detector));
        assert_eq!(config.detectors.len(), 1);
    }

    #[test]
    fn test_authorization_set_capacity() {
        let mut config = MonitorConfig::new(Pubkey::new_unique(), 255);
        for _ in 0..MAX_DETECTORS {
            config.set_authorization(Pubkey::new_unique(), true).unwrap();
        }

        let err = config
            .set_authorization(Pubkey::new_unique(), true)
            .unwrap_err();
        assert_eq!(err, FloorMonitorError::TooManyDetectors.into());
    }
}
