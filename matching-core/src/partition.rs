//! Component C: partition enumerator (§4.C).
//!
//! For a fixed rate interval, enumerates the `O(n)` feasible ways to split
//! the executable orders `B'`/`S'` into {unfilled, partial, filled}, per the
//! execution-order and at-least-one-side-filled lemmas. Returned as a lazy
//! iterator chain rather than a materialized `Vec`, following §5's and §9's
//! requirement that the `O(n²)` (interval × partition) space never be held
//! in memory at once — each `Partition` here is `Copy`-sized index data, not
//! a cloned slice of orders.

use crate::classify::Classification;
use crate::intervals::Interval;

/// Which side is guaranteed to be fully filled in this partition, per the
/// three cases of §4.C.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Case {
    /// All of `B'` is filled; at most one order in `S'` is partial.
    BuyFilled,
    /// All of `S'` is filled; at most one order in `B'` is partial.
    SellFilled,
    /// Both `B'` and `S'` are fully filled; no partial order on either side.
    Both,
}

/// One candidate partition of the executable orders `B'`/`S'` at a given
/// interval, expressed purely as index counts into the (already sorted)
/// `buys`/`sells` slices so that it can be produced and discarded in O(1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    pub case: Case,
    /// Number of leading `buys` entries that are `Filled`.
    pub buy_filled: usize,
    /// Index of the partial buy order, if any (`Case::SellFilled` only).
    pub buy_partial: Option<usize>,
    /// Number of leading `sells` entries that are `Filled`.
    pub sell_filled: usize,
    /// Index of the partial sell order, if any (`Case::BuyFilled` only).
    pub sell_partial: Option<usize>,
}

/// The executable subsets `B'`, `S'` for a fixed interval, expressed as
/// prefix lengths into `classification.buys`/`classification.sells` (both
/// sorted descending by limit price, so `B'`/`S'` are always prefixes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Executable {
    pub buy_count: usize,
    pub sell_count: usize,
}

/// Determines `B' = {i ∈ B : b ≤ πᵢ}` and `S' = {j ∈ S : a ≥ 1/πⱼ}` for the
/// interval `[a, b]`, via binary search over the sorted sides.
pub fn executable(classification: &Classification, interval: &Interval) -> Executable {
    let buy_count = classification
        .buys
        .partition_point(|o| o.limit_price >= interval.b);
    let a_recip = interval.a.recip();
    let sell_count = classification
        .sells
        .partition_point(|o| o.limit_price >= a_recip);

    Executable {
        buy_count,
        sell_count,
    }
}

/// Enumerates every candidate partition for the executable subsets, in the
/// order Case::BuyFilled (by increasing partial-pointer), Case::SellFilled
/// (by increasing partial-pointer), then Case::Both.
pub fn enumerate(executable: Executable) -> impl Iterator<Item = Partition> {
    let Executable {
        buy_count,
        sell_count,
    } = executable;

    let buy_filled_cases = (0..sell_count).map(move |p| Partition {
        case: Case::BuyFilled,
        buy_filled: buy_count,
        buy_partial: None,
        sell_filled: p,
        sell_partial: Some(p),
    });
    let sell_filled_cases = (0..buy_count).map(move |p| Partition {
        case: Case::SellFilled,
        buy_filled: p,
        buy_partial: Some(p),
        sell_filled: sell_count,
        sell_partial: None,
    });
    let both_case = std::iter::once(Partition {
        case: Case::Both,
        buy_filled: buy_count,
        buy_partial: None,
        sell_filled: sell_count,
        sell_partial: None,
    });

    buy_filled_cases.chain(sell_filled_cases).chain(both_case)
}
