//! Component D: analytic root solver (§4.D).
//!
//! For one (interval, partition) pair, derives the closed-form local
//! optima of the reduced "disregarded utility" objective
//!
//! ```text
//! g(r, y_k, y_l) = (2y_k-ȳₖ)(πₖ-r)/(πₖr) + (2y_l-ȳₗ)(πₗr-1)/(πₗr) + c/r
//! ```
//!
//! subject to the balance equation `y_k + a_cf = r(y_l + b_cf)` and the
//! `y_k`/`y_l`/`r` box constraints.
//!
//! ## Deriving `c`
//!
//! §4.D leaves `c` as "the constant defined in the mathematical treatment"
//! without giving that treatment. Expanding the fully-filled orders' own
//! utility terms (which have the same `ȳᵢ(πᵢ-r)/(πᵢr)` / `ȳⱼ(πⱼr-1)/(πⱼr)`
//! shape as the partial terms, with `2y-ȳ` collapsing to `ȳ` when `y = ȳ`)
//! and regrouping by power of `r` isolates exactly one `r`-independent
//! additive constant (irrelevant to where the maximum sits, so dropped from
//! the reduced form) and one coefficient of `1/r`:
//!
//! ```text
//! c = a_cf − Σ_{j ∈ S'∩F} ȳⱼ/πⱼ
//! ```
//!
//! This is defined identically regardless of which side (if any) holds the
//! partial order, and is what the enumerator in §4.C always produces.
//!
//! ## Reducing roots 3 and 4
//!
//! §4.D's formulas for roots 3 and 4 are given in a form that still
//! contains the *other* side's free variable (`y_l` in root 3, `y_l`/`πₗ`
//! artifacts in root 4) — they are intentionally not fully reduced (§9,
//! "Ambiguity"). Rather than algebraically eliminate the missing side's
//! variable from that placeholder form (which turns out to be error-prone —
//! an earlier version of this module did exactly that and got both roots
//! wrong), each is instead rederived directly from the real per-order
//! `utility` terms §4.E's evaluator actually sums, substituting the balance
//! equation *before* differentiating rather than after:
//!
//! - **Root 3** (`Case::BuyFilled`, partial `l` only): the balance equation
//!   fixes `y_l = a_cf/r − b_cf`. Substituting into
//!   `Σ_{B'} utility_buy + Σ_{S'∩F} utility_sell + utility_sell(y_l, πₗ, r)`
//!   and collapsing each `utility_buy(y,π,r) = y/r − y/π`,
//!   `utility_sell(y,π,r) = y − y/(πr)` term leaves (after the constant,
//!   `r`-independent terms are dropped) `f(r) = D/r − E/r²` with
//!   `D = πₗ(a_cf+c) + b_cf` and `E = πₗ·a_cf`, whose stationary point
//!   (`r = 2E/D`) is `r = 2·a_cf / (πₗ·(a_cf+c) + b_cf)`.
//! - **Root 4** (`Case::SellFilled`, partial `k` only): symmetrically,
//!   `y_k = r·b_cf − a_cf`, and the same substitution leaves
//!   `f(r) = −(b_cf/πₖ)·r − S/r` (plus an `r`-independent constant), where
//!   `S = a_cf − c` is the filled-sell reciprocal sum already computed for
//!   `c`. Its stationary point is `r² = πₖ·S / b_cf`, i.e.
//!   `r = √(πₖ·(a_cf − c) / b_cf)`.
//!
//! Both derivations are cross-checked by [`tests::stationary_roots_are_local_optima`],
//! which compares each stationary candidate's reconstructed objective against
//! nearby feasible rates.

use crate::classify::{prefix_sums, Classification};
use crate::partition::{Case, Partition};
use num::{BigInt, BigRational, Signed, Zero};

/// Computes the non-negative exact square root of a non-negative rational,
/// when one exists (i.e. numerator × denominator is a perfect square).
/// Otherwise falls back to an `f64`-precision approximation (§9's
/// documented floating-point exception) re-expressed as an exact rational
/// at fixed precision via [`crate::approx::from_f64_approx`]; this
/// approximation is never trusted blindly — every candidate produced here
/// is re-validated against the full set of rational invariants during
/// reconstruction (§4.E), so an imprecise `sqrt` can only cause a spurious
/// rejection, never a silent invariant violation.
pub(crate) fn sqrt_ratio(value: &BigRational) -> Option<BigRational> {
    if value.is_negative() {
        return None;
    }
    if value.is_zero() {
        return Some(BigRational::zero());
    }

    let numer_times_denom = value.numer() * value.denom();
    let root = integer_sqrt(&numer_times_denom);
    if &root * &root == numer_times_denom {
        return Some(BigRational::new(root, value.denom().clone()));
    }

    let approx = crate::approx::to_f64(value)?.sqrt();
    crate::approx::from_f64_approx(approx)
}

/// Floor square root of a non-negative `BigInt` via Newton's method.
fn integer_sqrt(value: &BigInt) -> BigInt {
    if value.is_zero() {
        return BigInt::zero();
    }
    let mut x = value.clone();
    let mut y = (&x + BigInt::from(1)) / BigInt::from(2);
    while y < x {
        x = y.clone();
        y = (&x + value / &x) / BigInt::from(2);
    }
    x
}

/// Which of the five closed-form families (§4.D) produced a candidate rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootKind {
    /// Root 1: `r = πₖ`.
    BoundaryK,
    /// Root 2: `r = 1/πₗ`.
    BoundaryL,
    /// Root 3: all of `B'` filled, stationary point over the partial `l`.
    StationaryBuyFilled,
    /// Root 4: all of `S'` filled, stationary point over the partial `k`.
    StationarySellFilled,
    /// Root 5: both sides fully filled, no partial order.
    BothFilled,
}

/// A candidate clearing rate produced by the root solver, not yet checked
/// against the enclosing interval or reconstructed into executed amounts.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub rate: BigRational,
    pub kind: RootKind,
}

/// Precomputed rolling sums shared across every partition of one (τ₁, τ₂)
/// classification, so that `a_cf`, `b_cf`, and the reciprocal-weighted sell
/// sum are O(1) lookups per candidate (§9's streaming requirement).
pub struct PrefixSums {
    buy_amount: Vec<BigRational>,
    sell_amount: Vec<BigRational>,
    /// `sell_reciprocal[i] = Σ_{j<i} ȳⱼ/πⱼ` over `classification.sells`.
    sell_reciprocal: Vec<BigRational>,
}

impl PrefixSums {
    pub fn new(classification: &Classification) -> Self {
        let buy_amount = prefix_sums(&classification.buys);
        let sell_amount = prefix_sums(&classification.sells);

        let mut sell_reciprocal = Vec::with_capacity(classification.sells.len() + 1);
        sell_reciprocal.push(BigRational::zero());
        for order in &classification.sells {
            let last = sell_reciprocal.last().expect("never empty").clone();
            sell_reciprocal.push(last + order.max_sell.value() / order.limit_price.value());
        }

        PrefixSums {
            buy_amount,
            sell_amount,
            sell_reciprocal,
        }
    }
}

/// Computes every candidate rate implied by `partition`, discarding any
/// root whose denominator is zero or whose radicand is negative (§4.D).
/// Does **not** check interval membership or box constraints — that is the
/// caller's job (the global driver, [`crate::solve`]), since a root here
/// has no notion of "its" interval beyond the partition that produced it.
pub fn roots(
    classification: &Classification,
    sums: &PrefixSums,
    partition: &Partition,
) -> Vec<Candidate> {
    let a_cf = &sums.buy_amount[partition.buy_filled];
    let b_cf = &sums.sell_amount[partition.sell_filled];
    let c = a_cf - &sums.sell_reciprocal[partition.sell_filled];

    match partition.case {
        Case::BuyFilled => {
            let l = partition
                .sell_partial
                .expect("Case::BuyFilled always has a partial sell order");
            let partial = &classification.sells[l];
            let pi_l = partial.limit_price.value();

            let mut candidates = vec![Candidate {
                rate: pi_l.recip(),
                kind: RootKind::BoundaryL,
            }];

            let denominator = pi_l * (a_cf + &c) + b_cf;
            if !denominator.is_zero() {
                let rate = BigRational::from_integer(2.into()) * a_cf / denominator;
                candidates.push(Candidate {
                    rate,
                    kind: RootKind::StationaryBuyFilled,
                });
            }

            candidates
        }
        Case::SellFilled => {
            let k = partition
                .buy_partial
                .expect("Case::SellFilled always has a partial buy order");
            let partial = &classification.buys[k];
            let pi_k = partial.limit_price.value();

            let mut candidates = vec![Candidate {
                rate: pi_k.clone(),
                kind: RootKind::BoundaryK,
            }];

            if !b_cf.is_zero() {
                let radicand = pi_k * (a_cf - &c) / b_cf;
                if !radicand.is_negative() {
                    if let Some(rate) = sqrt_ratio(&radicand) {
                        candidates.push(Candidate {
                            rate,
                            kind: RootKind::StationarySellFilled,
                        });
                    }
                }
            }

            candidates
        }
        Case::Both => {
            if b_cf.is_zero() {
                vec![]
            } else {
                vec![Candidate {
                    rate: a_cf / b_cf,
                    kind: RootKind::BothFilled,
                }]
            }
        }
    }
}
