//! Component B: rate-interval generator (§4.B).
//!
//! Produces the ordered cover 𝒞 of the rate domain `[r_min, r_max]`. As with
//! the partition enumerator (§4.C), the sequence is small (`O(n)`) so it is
//! returned eagerly as a `Vec`, following `pricegraph::graph::path`'s
//! precedent of materializing small, bounded sequences while reserving
//! lazy `Iterator` adapters (see [`crate::partition`]) for the genuinely
//! unbounded-looking `O(n²)` candidate space that §5 and §9 require to
//! stream.

use crate::classify::Classification;
use crate::rational::Positive;
use std::cmp::Ordering;

/// A closed rate interval `[a, b]`, non-degenerate (`a < b`) by
/// construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub a: Positive,
    pub b: Positive,
}

/// Generates the sorted, non-degenerate interval cover of `[r_min, r_max]`.
///
/// Endpoints are the union of every buy order's limit price and every sell
/// order's inverse limit price that falls within `[r_min, r_max]`,
/// deduplicated and sorted ascending; consecutive endpoints form the
/// intervals. Degenerate (zero-width) consecutive pairs are skipped, but
/// per §4.B their shared endpoint remains a standalone rate candidate —
/// callers should still evaluate `r_min` and `r_max` themselves (the global
/// driver does this, see [`crate::solve`]).
pub fn generate(
    classification: &Classification,
    r_min: &Positive,
    r_max: &Positive,
) -> Vec<Interval> {
    let mut endpoints: Vec<Positive> = classification
        .buys
        .iter()
        .map(|o| o.limit_price.clone())
        .chain(classification.sells.iter().map(|o| o.limit_price.recip()))
        .filter(|rate| rate >= r_min && rate <= r_max)
        .collect();
    endpoints.push(r_min.clone());
    endpoints.push(r_max.clone());

    endpoints.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    endpoints.dedup();

    let intervals: Vec<Interval> = endpoints
        .windows(2)
        .filter(|pair| pair[0] != pair[1])
        .map(|pair| Interval {
            a: pair[0].clone(),
            b: pair[1].clone(),
        })
        .collect();

    log::debug!(
        "generated {} candidate intervals from {} endpoints",
        intervals.len(),
        endpoints.len(),
    );

    intervals
}
