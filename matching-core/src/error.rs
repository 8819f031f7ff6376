//! Structured error taxonomy for the matching core.
//!
//! Follows the same `thiserror`-derived pattern as
//! `pricegraph::encoding::InvalidLength`, rather than the hand-rolled
//! `std::error::Error` impl of the older
//! `driver::price_finding::error::PriceFindingError` — §7 of the
//! specification calls only `InvalidOrder` a fatal, caller-visible error;
//! `NoOverlap`, `NumericDegeneracy`, and `InvariantViolation` are all
//! resolved internally into [`crate::Outcome::NoMatch`] or a discarded
//! candidate and never constructed as an [`Error`] value.

use crate::order::{OrderId, TokenId};
use thiserror::Error;

/// Ingest-time validation failure. The only error variant that escapes
/// [`crate::solve`] to the caller; everything else in §7's taxonomy is
/// absorbed internally.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum Error {
    /// An order's `max_sell` was not a strictly positive rational.
    #[error("order {0:?} has a non-positive max sell amount")]
    NonPositiveMaxSell(OrderId),

    /// An order's `limit_price` was not a strictly positive rational.
    #[error("order {0:?} has a non-positive limit price")]
    NonPositiveLimitPrice(OrderId),

    /// An order's buy and sell token were the same token.
    #[error("order {0:?} buys and sells the same token")]
    SelfTrade(OrderId),

    /// An order did not trade exclusively between the two tokens passed to
    /// [`crate::solve`].
    #[error("order {order:?} does not trade between {base:?} and {quote:?}")]
    ForeignTokenPair {
        order: OrderId,
        base: TokenId,
        quote: TokenId,
    },
}
