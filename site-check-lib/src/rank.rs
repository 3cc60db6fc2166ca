//! Deterministic ordering of completed probe results.
//!
//! Results arrive in non-deterministic completion order; this module imposes
//! the final presentation order in one place so the collection phase never
//! has to care about it.

use crate::types::ProbeResult;

/// Sort results by the composite key `(!ok, latency_ms)` ascending.
///
/// Successful probes come first, fastest first; failed probes follow, again
/// fastest first. The sort is stable, so results with an equal key keep the
/// relative order in which they completed.
pub fn rank_results(mut results: Vec<ProbeResult>) -> Vec<ProbeResult> {
    results.sort_by_key(|r| (!r.ok, r.latency_ms));
    results
}
