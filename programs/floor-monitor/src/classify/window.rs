use crate::config::{MIN_WINDOW_LEN, MIN_WINDOW_SPAN_SECS, SCHEMA_VERSION};
use crate::state::Snapshot;

/// Precondition checks for a classification window: newest first,
/// uniform schema and collection, non-empty tags, strictly decreasing
/// timestamps, minimum length and span. A window that fails any of
/// these is classified as `None`, never as an error.
pub fn window_is_valid(window: &[Snapshot]) -> bool {
    if window.len() < MIN_WINDOW_LEN {
        return false;
    }

    let collection_id = window[0].collection_id;
    for snapshot in window {
        if snapshot.schema_version != SCHEMA_VERSION
            || snapshot.reporter_tag.is_empty()
            || snapshot.collection_id != collection_id
            || snapshot.price == 0
            || snapshot.observed_at <= 0
        {
            return false;
        }
    }

    for pair in window.windows(2) {
        if pair[0].observed_at <= pair[1].observed_at {
            return false;
        }
    }

    let span = window[0].observed_at - window[window.len() - 1].observed_at;
    span >= MIN_WINDOW_SPAN_SECS
}
