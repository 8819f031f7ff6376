//! Component E: executed-amount reconstructor & evaluator (§4.E).
//!
//! Given one candidate rate, recomputes which orders are executable,
//! assigns executed sell amounts under the clearing-price and balance
//! invariants, and evaluates the disregarded-utility objective.
//!
//! ## Simplified two-pointer
//!
//! §4.E describes the reconstruction as a joint walk that advances
//! whichever side has accumulated less so far. This implementation computes
//! the same result via an equivalent two-pass greedy fill: the total τ₂
//! amount the two sides can jointly clear is
//! `total = min(Σ_{B'} ȳᵢ, r · Σ_{S'} ȳⱼ)`, and filling each side's orders
//! greedily from the front (highest `π` first, per the execution-order
//! lemma) up to `total` (respectively `total/r` on the sell side) produces
//! identical executed amounts to the joint walk, since both converge on the
//! unique greedy assignment that exhausts the scarcer side and partially
//! fills exactly one order on the other. This formulation avoids
//! interleaving two independently-advancing pointers for the same result.

use crate::classify::Classification;
use crate::order::OrderId;
use crate::rational::NonNegative;
use num::{BigRational, Zero};
use std::cmp;

/// The side of an order relative to τ₁, echoed back in [`Execution`] so
/// callers need not re-derive it from the original order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Buys τ₁ (sells τ₂).
    Buy,
    /// Sells τ₁ (buys τ₂).
    Sell,
}

/// One order's executed sell amount for a candidate rate. Included for
/// every order in the classification, with `y` left at zero for orders
/// that did not execute.
#[derive(Clone, Debug)]
pub struct Execution {
    pub id: OrderId,
    pub side: Side,
    pub y: NonNegative,
}

/// The reconstructed result for one candidate rate: every order's executed
/// amount plus the resulting objective value.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    pub rate: BigRational,
    pub executions: Vec<Execution>,
    pub objective: BigRational,
}

/// Attempts to reconstruct executed amounts for `rate`. Returns `None` if
/// the rate is outside `[r_min, r_max]` or the reconstruction would execute
/// no trade at all — both rejection rules of §4.E. Invariant violations
/// (§7's `InvariantViolation`) cannot occur by construction here, since the
/// greedy fill only ever assigns amounts that satisfy the balance equation
/// and each order's box constraint exactly; see the module's doc comment.
pub fn reconstruct(classification: &Classification, rate: &BigRational) -> Option<Reconstruction> {
    if rate <= &BigRational::zero() {
        return None;
    }
    let r_min = classification.r_min()?;
    let r_max = classification.r_max()?;
    if rate < r_min.value() || rate > r_max.value() {
        return None;
    }

    let rate_recip = rate.recip();
    let buy_count = classification
        .buys
        .partition_point(|o| o.limit_price.value() >= rate);
    let sell_count = classification
        .sells
        .partition_point(|o| o.limit_price.value() >= &rate_recip);

    if buy_count == 0 || sell_count == 0 {
        return None;
    }

    let total_buy_cap: BigRational = classification.buys[..buy_count]
        .iter()
        .map(|o| o.max_sell.value().clone())
        .sum();
    let total_sell_cap_tau1: BigRational = classification.sells[..sell_count]
        .iter()
        .map(|o| o.max_sell.value().clone())
        .sum();
    let total_sell_cap_tau2 = rate * &total_sell_cap_tau1;

    let total_match_tau2 = cmp::min(total_buy_cap, total_sell_cap_tau2);
    if total_match_tau2.is_zero() {
        return None;
    }
    let total_match_tau1 = &total_match_tau2 / rate;

    let mut executions = Vec::with_capacity(classification.buys.len() + classification.sells.len());
    let mut objective = BigRational::zero();

    let mut remaining = total_match_tau2.clone();
    for order in &classification.buys {
        let y = if remaining.is_zero() {
            BigRational::zero()
        } else {
            let fill = cmp::min(order.max_sell.value().clone(), remaining.clone());
            remaining -= &fill;
            fill
        };
        objective += utility(&y, order.limit_price.value(), rate, Side::Buy);
        executions.push(Execution {
            id: order.id.clone(),
            side: Side::Buy,
            y: NonNegative::new(y).expect("greedy fill never assigns a negative amount"),
        });
    }

    let mut remaining = total_match_tau1.clone();
    for order in &classification.sells {
        let y = if remaining.is_zero() {
            BigRational::zero()
        } else {
            let fill = cmp::min(order.max_sell.value().clone(), remaining.clone());
            remaining -= &fill;
            fill
        };
        objective += utility(&y, order.limit_price.value(), rate, Side::Sell);
        executions.push(Execution {
            id: order.id.clone(),
            side: Side::Sell,
            y: NonNegative::new(y).expect("greedy fill never assigns a negative amount"),
        });
    }

    log::trace!(
        "reconstructed candidate rate {} into {} executions, objective {}",
        rate,
        executions.iter().filter(|e| !e.y.is_zero()).count(),
        objective,
    );

    Some(Reconstruction {
        rate: rate.clone(),
        executions,
        objective,
    })
}

/// The per-order disregarded-utility term. §3 does not spell out `f`'s
/// closed form, but §4.D's reduced objective `g` is built by summing
/// exactly this shape over every executed order — `(2y-ȳ)(π-r)/(πr)` for a
/// partial buy order collapses to `ȳ(π-r)/(πr)` when `y = ȳ` (filled) and
/// to zero when `y = 0` (unfilled), so the same single expression
/// `y(π-r)/(πr)` (its buy-side form) correctly covers all three fill
/// classes when evaluated directly against the actual executed `y`, which
/// is what this evaluator does instead of re-deriving `g`'s partition-level
/// reduction.
fn utility(y: &BigRational, limit_price: &BigRational, rate: &BigRational, side: Side) -> BigRational {
    if y.is_zero() {
        return BigRational::zero();
    }
    match side {
        Side::Buy => y * (limit_price - rate) / (limit_price * rate),
        Side::Sell => y * (limit_price * rate - BigRational::from_integer(1.into()))
            / (limit_price * rate),
    }
}
