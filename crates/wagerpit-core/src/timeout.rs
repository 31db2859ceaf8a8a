//! Session deadline predicate.

/// Check whether a session that started at `start_marker` with the
/// configured `session_length` has passed its deadline at `now`.
///
/// All three values are in the same opaque clock units (e.g. block
/// height). The deadline itself is still in time: expiry requires
/// strictly `now > start_marker + session_length`.
pub fn expired(start_marker: u64, session_length: u64, now: u64) -> bool {
    now > start_marker.saturating_add(session_length)
}
