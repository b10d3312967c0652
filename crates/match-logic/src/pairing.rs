//! Round-robin pairing for tournament games
//!
//! Every ordered pair of roster entries plays once, self-play included.
//! A-vs-B and B-vs-A are separate games since strategies are not assumed
//! to behave symmetrically.

/// Total number of games for a roster of `participant_count`
pub fn calculate_match_count(participant_count: usize) -> usize {
    participant_count * participant_count
}

/// All ordered (a, b) index pairs, row-major
pub fn round_robin_pairings(participant_count: usize) -> Vec<(usize, usize)> {
    (0..participant_count)
        .flat_map(|a| (0..participant_count).map(move |b| (a, b)))
        .collect()
}
