#![no_main]

use libfuzzer_sys::fuzz_target;
use matching_core::{solve, Config, Order, TokenId};

// Fuzz the full solve() pipeline: classification must never panic on
// malformed input, and a successful match must never panic while being
// reconstructed, regardless of how degenerate the batch is.

fuzz_target!(|orders: Vec<Order>| {
    let base = TokenId::from("base");
    let quote = TokenId::from("quote");
    let config = Config::default();
    let _ = solve(&orders, &base, &quote, &config);
});
