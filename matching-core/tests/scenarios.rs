//! End-to-end scenarios from the specification's testable-properties
//! section, driven entirely through the public `solve` entry point.

use matching_core::{solve, Config, Order, Outcome, Side, TokenId};
use num::{BigRational, Signed, ToPrimitive, Zero};

fn rat(n: i64, d: i64) -> BigRational {
    BigRational::new(n.into(), d.into())
}

/// Asserts `value` is within `1e-9` of `expected`, for pinning a rate or
/// objective whose exact closed form is irrational (e.g. a `sqrt_ratio`
/// stationary root).
fn assert_close(value: &BigRational, expected: f64, what: &str) {
    let actual = value.to_f64().expect("finite rational");
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected ~{expected}, got {actual}",
    );
}

fn pair() -> (TokenId, TokenId) {
    (TokenId::from("base"), TokenId::from("quote"))
}

fn matched(orders: &[Order]) -> matching_core::Solution {
    let (base, quote) = pair();
    match solve(orders, &base, &quote, &Config::default()).unwrap() {
        Outcome::Matched(solution) => solution,
        Outcome::NoMatch => panic!("expected a match"),
    }
}

#[test]
fn symmetric_trivial() {
    let orders = vec![
        Order::new("b1", "base", "quote", rat(10, 1), rat(2, 1)),
        Order::new("s1", "quote", "base", rat(10, 1), rat(2, 1)),
    ];
    let solution = matched(&orders);
    assert_eq!(solution.rate, rat(1, 1));
    assert!(solution.objective > BigRational::zero());
    for trade in &solution.trades {
        assert_eq!(trade.sell_amount, rat(10, 1));
    }
}

#[test]
fn no_overlap_degenerate_domain() {
    // r_min = r_max = 1: a single degenerate point, still evaluated as a
    // candidate rather than skipped (§4.B, resolved in DESIGN.md).
    let orders = vec![
        Order::new("b1", "base", "quote", rat(5, 1), rat(1, 1)),
        Order::new("s1", "quote", "base", rat(5, 1), rat(1, 1)),
    ];
    let solution = matched(&orders);
    assert_eq!(solution.rate, rat(1, 1));
}

#[test]
fn one_side_filled_other_partial() {
    let orders = vec![
        Order::new("b1", "base", "quote", rat(10, 1), rat(3, 1)),
        Order::new("s1", "quote", "base", rat(30, 1), rat(3, 1)),
    ];
    let solution = matched(&orders);
    assert!(solution.objective > BigRational::zero());
    let filled: Vec<_> = solution
        .trades
        .iter()
        .filter(|t| t.side == Side::Buy)
        .collect();
    assert_eq!(filled.len(), 1);
    assert_eq!(filled[0].sell_amount, rat(10, 1));
}

#[test]
fn two_buys_two_sells() {
    // The winning candidate here is `Case::SellFilled`'s stationary root
    // (§4.D root 4) on the governing interval [1/2, 1]: both sells fully
    // filled (a_cf=1, b_cf=4, partial buy k=b1 with πₖ=1, ȳₖ=2, and
    // c=a_cf-S=-2/3 where S=5/3 is the filled-sell reciprocal sum). Its
    // true stationary point solves r² = πₖ·S/b_cf = 5/12, i.e.
    // r = sqrt(15)/6 — irrational, so `sqrt_ratio` falls back to its
    // documented f64 approximation and this test pins the result to within
    // 1e-9 instead of asserting an exact rational. This beats every
    // rational candidate in the batch (e.g. the both-sides-filled ratio
    // 3/4, objective 109/36, and the boundary r=1, objective 25/12).
    let orders = vec![
        Order::new("b1", "base", "quote", rat(2, 1), rat(1, 1)),
        Order::new("b2", "base", "quote", rat(1, 1), rat(4, 3)),
        Order::new("s1", "quote", "base", rat(2, 1), rat(2, 1)),
        Order::new("s2", "quote", "base", rat(2, 1), rat(3, 1)),
    ];
    let solution = matched(&orders);

    let expected_rate = 15f64.sqrt() / 6.0;
    let expected_objective = 33.0 / 4.0 - 4.0 * 15f64.sqrt() / 3.0;
    assert_close(&solution.rate, expected_rate, "clearing rate");
    assert_close(&solution.objective, expected_objective, "objective");

    let trade = |id: &str| {
        solution
            .trades
            .iter()
            .find(|t| t.order == matching_core::OrderId::from(id))
            .unwrap_or_else(|| panic!("expected a trade for {id}"))
    };

    // b2 is fully filled; b1 is the sole partial order; both sells fill
    // in full — so only b1's amounts are irrational.
    let b1 = trade("b1");
    assert_eq!(b1.side, Side::Buy);
    assert_close(&b1.sell_amount, 4.0 * expected_rate - 1.0, "b1 sell_amount");
    assert_close(&b1.buy_amount, 4.0 - 1.0 / expected_rate, "b1 buy_amount");

    let b2 = trade("b2");
    assert_eq!(b2.side, Side::Buy);
    assert_eq!(b2.sell_amount, rat(1, 1));
    assert_close(&b2.buy_amount, 1.0 / expected_rate, "b2 buy_amount");

    let s1 = trade("s1");
    assert_eq!(s1.side, Side::Sell);
    assert_eq!(s1.sell_amount, rat(2, 1));
    assert_close(&s1.buy_amount, 2.0 * expected_rate, "s1 buy_amount");

    let s2 = trade("s2");
    assert_eq!(s2.side, Side::Sell);
    assert_eq!(s2.sell_amount, rat(2, 1));
    assert_close(&s2.buy_amount, 2.0 * expected_rate, "s2 buy_amount");
}

#[test]
fn swap_symmetry() {
    // Swapping which token is called `base` and which is `quote` flips every
    // order's side (a buy of base becomes a sell of base) without touching
    // the orders themselves, since `limit_price` is always expressed in the
    // order's own sell-per-buy units (§4.A), independent of which token the
    // caller names first. The resulting clearing rate must be the
    // reciprocal of the original, and every order's own executed amount
    // must carry over unchanged under the flipped side.
    let orders = vec![
        Order::new("b1", "base", "quote", rat(1, 1), rat(3, 4)),
        Order::new("b2", "base", "quote", rat(1, 1), rat(1, 2)),
        Order::new("s1", "quote", "base", rat(2, 1), rat(3, 1)),
        Order::new("s2", "quote", "base", rat(3, 1), rat(2, 1)),
    ];
    let (base, quote) = pair();

    let solution = match solve(&orders, &base, &quote, &Config::default()).unwrap() {
        Outcome::Matched(solution) => solution,
        Outcome::NoMatch => panic!("expected a match"),
    };
    let swapped = match solve(&orders, &quote, &base, &Config::default()).unwrap() {
        Outcome::Matched(solution) => solution,
        Outcome::NoMatch => panic!("expected a match"),
    };

    assert_eq!(solution.rate, rat(1, 2));
    assert_eq!(swapped.rate, solution.rate.recip());
    assert_eq!(solution.trades.len(), swapped.trades.len());

    for trade in &solution.trades {
        let mirrored = swapped
            .trades
            .iter()
            .find(|t| t.order == trade.order)
            .unwrap_or_else(|| panic!("expected a mirrored trade for {}", trade.order));
        assert_ne!(mirrored.side, trade.side);
        assert_eq!(mirrored.sell_amount, trade.sell_amount);
        assert_eq!(mirrored.buy_amount, trade.buy_amount);
    }
}

/// The objective a single buy/sell pair would attain on its own, executing
/// in isolation at `rate` with every other order left at zero. This is
/// always a feasible (if suboptimal) solution to the whole batch, so the
/// real solver's objective can never fall below it for any pair and any
/// rate at which both orders are willing to trade.
fn trivial_pair_objective(buy: &Order, sell: &Order, rate: &BigRational) -> BigRational {
    let zero = BigRational::zero();
    if rate <= &zero {
        return zero;
    }
    let buy_active = buy.limit_price >= *rate;
    let sell_active = sell.limit_price >= rate.recip();
    if !buy_active || !sell_active {
        return zero;
    }

    let total = std::cmp::min(buy.max_sell.clone(), rate * &sell.max_sell);
    if total.is_zero() {
        return zero;
    }
    let y_buy = total.clone();
    let y_sell = &total / rate;

    let buy_utility = &y_buy * (&buy.limit_price - rate) / (&buy.limit_price * rate);
    let sell_utility = &y_sell * (&sell.limit_price * rate - rat(1, 1)) / (&sell.limit_price * rate);
    buy_utility + sell_utility
}

#[test]
fn trivial_pair_objective_matches_two_order_reconstruction() {
    // `trivial_pair_objective` must agree with the solver itself on a batch
    // containing only the pair, since that is exactly the scenario it
    // models.
    let buy = Order::new("b1", "base", "quote", rat(10, 1), rat(3, 1));
    let sell = Order::new("s1", "quote", "base", rat(30, 1), rat(3, 1));
    let solution = matched(&[buy.clone(), sell.clone()]);
    assert_eq!(
        trivial_pair_objective(&buy, &sell, &solution.rate),
        solution.objective
    );
}

#[test]
fn monotone_improvability() {
    let orders = vec![
        Order::new("b1", "base", "quote", rat(10, 1), rat(25, 10)),
        Order::new("b2", "base", "quote", rat(7, 1), rat(2, 1)),
        Order::new("s1", "quote", "base", rat(4, 1), rat(1, 3)),
        Order::new("s2", "quote", "base", rat(9, 1), rat(1, 2)),
    ];
    let solution = matched(&orders);
    let buys = &orders[0..2];
    let sells = &orders[2..4];

    for buy in buys {
        for sell in sells {
            for rate in [buy.limit_price.clone(), sell.limit_price.recip()] {
                let trivial = trivial_pair_objective(buy, sell, &rate);
                assert!(
                    solution.objective >= trivial,
                    "batch objective {} fell below trivial pair ({}, {}) at rate {}: {}",
                    solution.objective,
                    buy.id,
                    sell.id,
                    rate,
                    trivial,
                );
            }
        }
    }
}

#[test]
fn scale_invariance() {
    let base_orders = vec![
        Order::new("b1", "base", "quote", rat(10, 1), rat(2, 1)),
        Order::new("s1", "quote", "base", rat(10, 1), rat(2, 1)),
    ];
    let scaled_orders = vec![
        Order::new("b1", "base", "quote", rat(10_000, 1), rat(2, 1)),
        Order::new("s1", "quote", "base", rat(10_000, 1), rat(2, 1)),
    ];

    let base_solution = matched(&base_orders);
    let scaled_solution = matched(&scaled_orders);

    assert_eq!(base_solution.rate, scaled_solution.rate);
    for (base_trade, scaled_trade) in base_solution.trades.iter().zip(&scaled_solution.trades) {
        assert_eq!(&scaled_trade.sell_amount, &(&base_trade.sell_amount * rat(1000, 1)));
    }
}

#[test]
fn dominant_limit_ties_break_to_the_smallest_rate() {
    let orders = vec![
        Order::new("b1", "base", "quote", rat(1, 1), rat(100, 1)),
        Order::new("s1", "quote", "base", rat(1, 1), rat(100, 1)),
    ];
    let solution = matched(&orders);
    assert_eq!(solution.rate, rat(1, 1));
}

#[test]
fn box_and_clearing_price_invariants_hold() {
    let orders = vec![
        Order::new("b1", "base", "quote", rat(10, 1), rat(25, 10)),
        Order::new("b2", "base", "quote", rat(7, 1), rat(2, 1)),
        Order::new("s1", "quote", "base", rat(4, 1), rat(1, 3)),
        Order::new("s2", "quote", "base", rat(9, 1), rat(1, 2)),
    ];
    let solution = matched(&orders);

    let mut buy_total = BigRational::zero();
    let mut sell_total = BigRational::zero();
    for trade in &solution.trades {
        assert!(!trade.sell_amount.is_negative());
        match trade.side {
            Side::Buy => buy_total += &trade.sell_amount,
            Side::Sell => sell_total += &trade.sell_amount,
        }
    }
    assert_eq!(buy_total, &solution.rate * &sell_total);
}

#[test]
fn non_overlapping_domains_report_no_match() {
    let orders = vec![
        Order::new("b1", "base", "quote", rat(10, 1), rat(1, 1)),
        Order::new("s1", "quote", "base", rat(10, 1), rat(1, 10)),
    ];
    let (base, quote) = pair();
    let outcome = solve(&orders, &base, &quote, &Config::default()).unwrap();
    assert_eq!(outcome, Outcome::NoMatch);
}

#[test]
fn self_trade_is_rejected_as_an_invalid_order() {
    let orders = vec![Order::new("x", "base", "base", rat(1, 1), rat(1, 1))];
    let (base, quote) = pair();
    let result = solve(&orders, &base, &quote, &Config::default());
    assert!(result.is_err());
}
