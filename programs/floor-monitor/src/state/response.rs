use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

use crate::config::{
    FLASH_ESCALATION_SEVERITY_BPS, GRADUAL_ESCALATION_DROP_BPS,
    VOLATILITY_ESCALATION_SEVERITY_BPS,
};
use crate::math::ratio_bps;

/// Crash pattern kinds. The u8 wire values (1..=4) are shared with the
/// response receiver; `None` is never submitted.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashKind {
    None,
    GradualDecline,
    FlashCrash,
    HighVolatility,
    /// Reserved for a future manipulation detector.
    Manipulation,
}

impl CrashKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::GradualDecline),
            2 => Some(Self::FlashCrash),
            3 => Some(Self::HighVolatility),
            4 => Some(Self::Manipulation),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Self::None => 0,
            Self::GradualDecline => 1,
            Self::FlashCrash => 2,
            Self::HighVolatility => 3,
            Self::Manipulation => 4,
        }
    }

    /// Whether an accepted crash response with these parameters forces
    /// emergency mode. Gradual declines are judged on the actual price
    /// drop, the others on reported severity; manipulation always
    /// escalates.
    pub fn escalates(self, current_price: u64, baseline_price: u64, severity_bps: u64) -> bool {
        match self {
            Self::GradualDecline => {
                let drop = baseline_price.saturating_sub(current_price);
                ratio_bps(drop, baseline_price) >= GRADUAL_ESCALATION_DROP_BPS
            }
            Self::FlashCrash => severity_bps >= FLASH_ESCALATION_SEVERITY_BPS,
            Self::HighVolatility => severity_bps >= VOLATILITY_ESCALATION_SEVERITY_BPS,
            Self::Manipulation => true,
            Self::None => false,
        }
    }
}

/// The seven-field response tuple, in the exact order and types the
/// response receiver expects. Serialized with borsh both when the
/// classifier emits it and when the `Respond` instruction consumes it.
#[derive(BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq)]
pub struct ResponsePayload {
    pub reporter_tag: String,
    pub collection_id: Pubkey,
    pub current_price: u64,
    pub baseline_price: u64,
    pub crash_kind: u8,
    pub detected_at: i64,
    pub severity_bps: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_values_round_trip() {
        for value in 0..=4u8 {
            let kind = CrashKind::from_u8(value).unwrap();
            assert_eq!(kind.as_u8(), value);
        }
        assert_eq!(CrashKind::from_u8(5), None);
    }

    #[test]
    fn test_flash_crash_escalation_threshold() {
        let kind = CrashKind::FlashCrash;
        assert!(kind.escalates(6, 10, 4_000));
        assert!(!kind.escalates(6, 10, 3_999));
        assert!(!kind.escalates(6, 10, 1_999));
    }

    #[test]
    fn test_gradual_decline_escalation_uses_prices() {
        let kind = CrashKind::GradualDecline;
        // 50% drop escalates regardless of reported severity
        assert!(kind.escalates(5_000, 10_000, 0));
        // 49.99% does not
        assert!(!kind.escalates(5_001, 10_000, 9_999));
    }

    #[test]
    fn test_volatility_and_manipulation_escalation() {
        assert!(CrashKind::HighVolatility.escalates(1, 1, 3_000));
        assert!(!CrashKind::HighVolatility.escalates(1, 1, 2_999));
        assert!(CrashKind::Manipulation.escalates(1, 1, 0));
    }
}
