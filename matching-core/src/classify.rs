//! Component A: order model & classifier (§4.A).
//!
//! Validates each order at ingest (the one place §7's `InvalidOrder` is
//! raised) and partitions the batch into the `B` (buys τ₁) and `S` (sells
//! τ₁) side sequences, sorted by decreasing limit price as required by the
//! execution-order lemma of §4.C. This plays the role `Orderbook::from_elements`
//! plays in `pricegraph`, but returns a hard [`Error`] for malformed input
//! instead of silently filtering it, since §7 makes `InvalidOrder` fatal
//! rather than a best-effort filter.

use crate::error::Error;
use crate::order::{Order, OrderId, TokenId};
use crate::rational::Positive;
use num::BigRational;
use std::cmp::Ordering;

/// A single order as seen by one side of the book, with its fields already
/// validated and converted to the crate's exact-rational newtypes.
#[derive(Clone, Debug)]
pub struct SideOrder {
    pub id: OrderId,
    /// π: the limit price, sell-token units per buy-token unit.
    pub limit_price: Positive,
    /// ȳ: the maximum sell amount.
    pub max_sell: Positive,
}

/// The result of classifying a batch of orders for a fixed (τ₁, τ₂) pair.
///
/// `buys` and `sells` are both sorted by strictly decreasing `limit_price`,
/// matching the greedy execution order used by the partition enumerator
/// (§4.C) and the reconstructor (§4.E).
#[derive(Clone, Debug, Default)]
pub struct Classification {
    /// `B`: orders buying τ₁ (selling τ₂).
    pub buys: Vec<SideOrder>,
    /// `S`: orders selling τ₁ (buying τ₂).
    pub sells: Vec<SideOrder>,
}

impl Classification {
    /// `r_min = min_{j∈S} 1/πⱼ`. `None` if `S` is empty.
    pub fn r_min(&self) -> Option<Positive> {
        // `sells` is sorted descending by limit price, so the largest π is
        // first, which minimizes its reciprocal.
        self.sells.first().map(|s| s.limit_price.recip())
    }

    /// `r_max = max_{i∈B} πᵢ`. `None` if `B` is empty.
    pub fn r_max(&self) -> Option<Positive> {
        self.buys.first().map(|b| b.limit_price.clone())
    }
}

/// Classifies `orders` for the directed pair `(base, quote)`, where `base`
/// is τ₁ and `quote` is τ₂ (§6: "r is expressed in τ₂ units per τ₁ unit").
///
/// Returns [`Error`] if any order is malformed (non-positive amounts,
/// self-trade) or does not trade exclusively between `base` and `quote`.
pub fn classify(orders: &[Order], base: &TokenId, quote: &TokenId) -> Result<Classification, Error> {
    let mut buys = Vec::new();
    let mut sells = Vec::new();

    for order in orders {
        if order.buy_token == order.sell_token {
            return Err(Error::SelfTrade(order.id.clone()));
        }

        let max_sell = Positive::new(order.max_sell.clone())
            .ok_or_else(|| Error::NonPositiveMaxSell(order.id.clone()))?;
        let limit_price = Positive::new(order.limit_price.clone())
            .ok_or_else(|| Error::NonPositiveLimitPrice(order.id.clone()))?;

        let side_order = SideOrder {
            id: order.id.clone(),
            limit_price,
            max_sell,
        };

        if &order.buy_token == base && &order.sell_token == quote {
            buys.push(side_order);
        } else if &order.buy_token == quote && &order.sell_token == base {
            sells.push(side_order);
        } else {
            return Err(Error::ForeignTokenPair {
                order: order.id.clone(),
                base: base.clone(),
                quote: quote.clone(),
            });
        }
    }

    buys.sort_unstable_by(cmp_descending_price);
    sells.sort_unstable_by(cmp_descending_price);

    log::debug!(
        "classified batch into {} buy orders and {} sell orders",
        buys.len(),
        sells.len(),
    );

    Ok(Classification { buys, sells })
}

fn cmp_descending_price(a: &SideOrder, b: &SideOrder) -> Ordering {
    b.limit_price.cmp(&a.limit_price)
}

/// Computes the prefix sum of `max_sell` over a side's orders, in the same
/// (descending-price) order they are stored. `prefix_sums[i]` is the total
/// `max_sell` of the first `i` orders; `prefix_sums[0] == 0`.
///
/// This is the rolling-sum structure §9 calls for so that `a_cf`/`b_cf` can
/// be read off in O(1) once the filled-prefix length is known, instead of
/// resummed per candidate.
pub fn prefix_sums(side: &[SideOrder]) -> Vec<BigRational> {
    let mut sums = Vec::with_capacity(side.len() + 1);
    sums.push(BigRational::from_integer(0.into()));
    for order in side {
        let last = sums.last().expect("sums is never empty").clone();
        sums.push(last + order.max_sell.value());
    }
    sums
}
