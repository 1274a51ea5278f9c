use solana_program::{program_error::ProgramError, pubkey::Pubkey};

use crate::config::{MAX_FEED_DIVERGENCE_BPS, MAX_FEED_STALENESS_SECS, SCHEMA_VERSION};
use crate::error::FloorMonitorError;
use crate::math::ratio_bps;
use crate::oracle::feed::PriceFeed;
use crate::state::Snapshot;

/// Read both price feeds and produce one validated snapshot.
///
/// Fails fast, in order: non-positive price on either feed, stale or
/// never-set update time on either feed, then divergence beyond
/// tolerance. No retries here; the host network decides whether to try
/// again on its next scheduled round.
pub fn collect(
    primary: &dyn PriceFeed,
    secondary: &dyn PriceFeed,
    collection_id: Pubkey,
    reporter_tag: &str,
    now: i64,
) -> Result<Snapshot, ProgramError> {
    if reporter_tag.is_empty() {
        return Err(FloorMonitorError::InvalidInput.into());
    }

    let primary_round = primary.latest_round()?;
    let secondary_round = secondary.latest_round()?;

    if primary_round.price <= 0 || secondary_round.price <= 0 {
        return Err(FloorMonitorError::InvalidPrice.into());
    }

    for round in [&primary_round, &secondary_round] {
        if round.updated_at == 0 || now.saturating_sub(round.updated_at) > MAX_FEED_STALENESS_SECS {
            return Err(FloorMonitorError::StaleData.into());
        }
    }

    let primary_price = primary_round.price as u64;
    let secondary_price = secondary_round.price as u64;

    let (higher, lower) = if primary_price >= secondary_price {
        (primary_price, secondary_price)
    } else {
        (secondary_price, primary_price)
    };

    if ratio_bps(higher - lower, higher) > MAX_FEED_DIVERGENCE_BPS {
        return Err(FloorMonitorError::OracleDisagreement.into());
    }

    let price = ((primary_price as u128 + secondary_price as u128) / 2) as u64;

    Ok(Snapshot {
        schema_version: SCHEMA_VERSION,
        price,
        observed_at: now,
        collection_id,
        reporter_tag: reporter_tag.to_string(),
    })
}
