//! Fixed detection and response parameters. These are compile-time
//! constants: the host network redeploys to change them.

/// Snapshot schema version accepted by the classifier.
pub const SCHEMA_VERSION: u16 = 1;

/// Basis point denominator (1 bps = 0.01%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Single-pair drop that qualifies as a flash crash.
pub const FLASH_CRASH_DROP_BPS: u64 = 2_000;

/// Total drop over a monotone decline that qualifies as a gradual decline.
pub const GRADUAL_DECLINE_DROP_BPS: u64 = 3_000;

/// Average adjacent-pair move that qualifies as high volatility.
pub const VOLATILITY_THRESHOLD_BPS: u64 = 1_500;

/// Maximum tolerated disagreement between the two price feeds.
pub const MAX_FEED_DIVERGENCE_BPS: u64 = 100;

/// A feed older than this (or never updated) is stale.
pub const MAX_FEED_STALENESS_SECS: i64 = 3_600;

/// Minimum snapshots required for any classification attempt.
pub const MIN_WINDOW_LEN: usize = 3;

/// Minimum span between oldest and newest snapshot.
pub const MIN_WINDOW_SPAN_SECS: i64 = 60;

/// Upper bound on records returned by a recent-history query.
pub const RECENT_HISTORY_LIMIT: usize = 20;

/// A collection is unhealthy for this long after any accepted crash.
pub const HEALTH_SILENCE_WINDOW_SECS: i64 = 1_200;

/// Escalation: gradual decline flips emergency mode at this price drop.
pub const GRADUAL_ESCALATION_DROP_BPS: u64 = 5_000;

/// Escalation: flash crash flips emergency mode at this severity.
pub const FLASH_ESCALATION_SEVERITY_BPS: u64 = 4_000;

/// Escalation: high volatility flips emergency mode at this severity.
pub const VOLATILITY_ESCALATION_SEVERITY_BPS: u64 = 3_000;

/// Reporter tags are short identifiers; anything longer is rejected.
pub const MAX_REPORTER_TAG_LEN: usize = 32;
