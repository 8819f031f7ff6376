//! Global driver & argmax selector (§6).
//!
//! Ties components A–E together: classifies the batch, generates the
//! interval cover, enumerates every partition within each interval, collects
//! every candidate rate the root solver produces (plus the domain's own
//! endpoints), reconstructs each one, and keeps the best by objective value
//! with the smallest-rate tie-break. Mirrors the shape of
//! `pricegraph::Pricegraph::new` as the crate's single point of entry: one
//! function that owns the whole pipeline and returns a plain value, no
//! builder or session state.

use crate::classify::classify;
use crate::config::Config;
use crate::error::Error;
use crate::intervals;
use crate::order::{Order, OrderId, TokenId};
use crate::partition::{enumerate, executable};
use crate::reconstruct::{self, Reconstruction, Side};
use crate::roots::{self, PrefixSums};
use num::{BigRational, Signed};

/// One order's executed trade in a [`Solution`].
#[derive(Clone, Debug, PartialEq)]
pub struct Trade {
    pub order: OrderId,
    pub side: Side,
    /// The amount of the order's own sell token it gave up (`y`).
    pub sell_amount: BigRational,
    /// The amount of the other token it received (`x`).
    pub buy_amount: BigRational,
}

/// A matched batch: the uniform clearing rate, the non-zero trades it
/// implies, and the objective value it attains.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub rate: BigRational,
    pub trades: Vec<Trade>,
    pub objective: BigRational,
}

/// The result of [`solve`]. A batch with no viable match is *not* an error
/// (§7) — it is `NoMatch`.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Matched(Solution),
    NoMatch,
}

/// Computes a uniform clearing rate and executed trades for `orders` over
/// the directed token pair `(base, quote)`.
///
/// Returns `Err` only for `InvalidOrder` failures (§7) surfaced during
/// classification; every other degenerate case — no orders on one side, an
/// empty or inverted domain, every candidate rejected at reconstruction —
/// resolves to `Ok(Outcome::NoMatch)`.
pub fn solve(
    orders: &[Order],
    base: &TokenId,
    quote: &TokenId,
    config: &Config,
) -> Result<Outcome, Error> {
    let classification = classify(orders, base, quote)?;

    let (r_min, r_max) = match (classification.r_min(), classification.r_max()) {
        (Some(r_min), Some(r_max)) if r_min.value() <= r_max.value() => (r_min, r_max),
        _ => {
            log::debug!("no overlap between buy and sell domains, no match");
            return Ok(Outcome::NoMatch);
        }
    };

    let sums = PrefixSums::new(&classification);
    let mut candidates: Vec<BigRational> = vec![r_min.value().clone(), r_max.value().clone()];

    for interval in intervals::generate(&classification, &r_min, &r_max) {
        let ex = executable(&classification, &interval);
        for partition in enumerate(ex) {
            for candidate in roots::roots(&classification, &sums, &partition) {
                if &candidate.rate >= r_min.value() && &candidate.rate <= r_max.value() {
                    candidates.push(candidate.rate);
                }
            }
        }
    }

    candidates.sort_unstable();
    candidates.dedup();
    log::debug!("evaluating {} candidate rates", candidates.len());

    let mut best: Option<Reconstruction> = None;
    for rate in &candidates {
        let attempt = match reconstruct::reconstruct(&classification, rate) {
            Some(attempt) => attempt,
            None => continue,
        };
        best = Some(match best {
            None => attempt,
            Some(current) => {
                if is_better(&current, &attempt, &config.tolerance) {
                    attempt
                } else {
                    current
                }
            }
        });
    }

    Ok(match best {
        Some(result) => {
            log::debug!("matched at rate {} with objective {}", result.rate, result.objective);
            Outcome::Matched(into_solution(result))
        }
        None => Outcome::NoMatch,
    })
}

/// True if `candidate` should replace `current` as the best-known solution:
/// a strictly better objective beyond `tolerance` always wins; within
/// `tolerance` the smaller rate wins (§4.E, §6).
fn is_better(current: &Reconstruction, candidate: &Reconstruction, tolerance: &BigRational) -> bool {
    let diff = &candidate.objective - &current.objective;
    if diff.abs() <= *tolerance {
        candidate.rate < current.rate
    } else {
        diff.is_positive()
    }
}

fn into_solution(result: Reconstruction) -> Solution {
    let Reconstruction {
        rate,
        executions,
        objective,
    } = result;

    let trades = executions
        .into_iter()
        .filter(|execution| !execution.y.is_zero())
        .map(|execution| {
            let sell_amount = execution.y.into_value();
            let buy_amount = match execution.side {
                Side::Buy => &sell_amount / &rate,
                Side::Sell => &sell_amount * &rate,
            };
            Trade {
                order: execution.id,
                side: execution.side,
                sell_amount,
                buy_amount,
            }
        })
        .collect();

    Solution {
        rate,
        trades,
        objective,
    }
}
