use borsh::{BorshDeserialize, BorshSerialize};

use crate::classify::window::window_is_valid;
use crate::config::{
    FLASH_CRASH_DROP_BPS, GRADUAL_DECLINE_DROP_BPS, VOLATILITY_THRESHOLD_BPS,
};
use crate::math::{mean, ratio_bps, std_dev};
use crate::state::{CrashKind, ResponsePayload, Snapshot};

/// Output of one classification call. Produced and consumed within a
/// single invocation; the classifier keeps no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrashVerdict {
    pub kind: CrashKind,
    pub severity_bps: u64,
}

impl CrashVerdict {
    pub fn none() -> Self {
        Self {
            kind: CrashKind::None,
            severity_bps: 0,
        }
    }
}

/// Classify a snapshot window, newest first. Pure function of its
/// input; malformed windows yield `None` rather than an error because
/// the caller always needs a decision.
///
/// Detector priority is fixed: FlashCrash > GradualDecline >
/// HighVolatility > None. At most one verdict per call.
pub fn classify(window: &[Snapshot]) -> CrashVerdict {
    if !window_is_valid(window) {
        return CrashVerdict::none();
    }

    let prices: Vec<u64> = window.iter().map(|s| s.price).collect();

    // The newest observation is the candidate under test, so the
    // statistical baseline is the history it departs from: mean and
    // stddev over prices[1..]. The outlier floor saturates at zero
    // when 2*stddev exceeds the mean.
    let history_mean = mean(&prices[1..]);
    let history_std_dev = std_dev(&prices[1..], history_mean);
    let outlier_floor = history_mean.saturating_sub(history_std_dev.saturating_mul(2));

    if let Some(verdict) = detect_flash_crash(&prices, outlier_floor) {
        return verdict;
    }
    if let Some(verdict) = detect_gradual_decline(&prices, outlier_floor) {
        return verdict;
    }
    if let Some(verdict) = detect_high_volatility(&prices) {
        return verdict;
    }

    CrashVerdict::none()
}

/// Flash crash: scanning from the newest end, the first adjacent pair
/// whose drop is at least the threshold while the newer price sits
/// below the outlier floor wins.
fn detect_flash_crash(prices: &[u64], outlier_floor: u64) -> Option<CrashVerdict> {
    for pair in prices.windows(2) {
        let (newer, older) = (pair[0], pair[1]);
        if newer >= older {
            continue;
        }

        let drop_bps = ratio_bps(older - newer, older);
        if drop_bps >= FLASH_CRASH_DROP_BPS && newer < outlier_floor {
            return Some(CrashVerdict {
                kind: CrashKind::FlashCrash,
                severity_bps: drop_bps,
            });
        }
    }

    None
}

/// Gradual decline: every step must lose ground as time moves forward,
/// and the total drop from oldest to newest must clear the threshold
/// with the newest price below the outlier floor.
fn detect_gradual_decline(prices: &[u64], outlier_floor: u64) -> Option<CrashVerdict> {
    if !prices.windows(2).all(|pair| pair[0] < pair[1]) {
        return None;
    }

    let newest = prices[0];
    let oldest = prices[prices.len() - 1];
    let total_drop_bps = ratio_bps(oldest - newest, oldest);

    if total_drop_bps >= GRADUAL_DECLINE_DROP_BPS && newest < outlier_floor {
        return Some(CrashVerdict {
            kind: CrashKind::GradualDecline,
            severity_bps: total_drop_bps,
        });
    }

    None
}

/// High volatility: truncated average over adjacent pairs of
/// `|delta| * 10_000 / newer`.
fn detect_high_volatility(prices: &[u64]) -> Option<CrashVerdict> {
    let mut total = 0u128;
    for pair in prices.windows(2) {
        total += ratio_bps(pair[0].abs_diff(pair[1]), pair[0]) as u128;
    }

    let volatility_bps = (total / (prices.len() - 1) as u128) as u64;
    if volatility_bps >= VOLATILITY_THRESHOLD_BPS {
        return Some(CrashVerdict {
            kind: CrashKind::HighVolatility,
            severity_bps: volatility_bps,
        });
    }

    None
}

/// Host-network entry: classify the window and, when a crash pattern
/// fired, assemble the seven-field response payload. The current price
/// is the newest snapshot's, the baseline the oldest's.
pub fn should_respond(window: &[Snapshot], now: i64) -> Option<ResponsePayload> {
    let verdict = classify(window);
    if verdict.kind == CrashKind::None {
        return None;
    }

    let newest = &window[0];
    let oldest = &window[window.len() - 1];

    Some(ResponsePayload {
        reporter_tag: newest.reporter_tag.clone(),
        collection_id: newest.collection_id,
        current_price: newest.price,
        baseline_price: oldest.price,
        crash_kind: verdict.kind.as_u8(),
        detected_at: now,
        severity_bps: verdict.severity_bps,
    })
}

/// Serialized boundary for the host network's generic decoder: borsh
/// snapshots in, `(triggered, borsh payload)` out. Undecodable input
/// classifies as no-response, never as an error.
pub fn should_respond_serialized(snapshots: &[Vec<u8>], now: i64) -> (bool, Vec<u8>) {
    let mut window = Vec::with_capacity(snapshots.len());
    for bytes in snapshots {
        match Snapshot::try_from_slice(bytes) {
            Ok(snapshot) => window.push(snapshot),
            Err(_) => return (false, Vec::new()),
        }
    }

    match should_respond(&window, now) {
        Some(payload) => (true, payload.try_to_vec().unwrap_or_default()),
        None => (false, Vec::new()),
    }
}
