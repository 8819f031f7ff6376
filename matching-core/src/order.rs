//! Canonical order representation.
//!
//! Mirrors the field layout of `pricegraph::encoding::Element` /
//! `orderbook::order::Order`, generalized from that crate's fixed two-byte
//! `TokenId = u16` universe to an opaque, caller-provided identifier (§6:
//! "token symbols from a two-element universe" — the core itself never
//! interprets token identity beyond equality).

use std::fmt;

/// An opaque order identifier. The external interface allows either a
/// string or an integer id (§6); both are accepted here and stored as their
/// string form, which is the least common denominator a caller can always
/// produce.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OrderId(String);

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        OrderId(id)
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        OrderId(id.to_owned())
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        OrderId(id.to_string())
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque token identifier, drawn from the two-element universe {τ₁, τ₂}
/// that a single `solve` call operates over.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TokenId(String);

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        TokenId(id)
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        TokenId(id.to_owned())
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable limit order, as ingested from the external parser (out of
/// scope for this crate, per §1).
///
/// `max_sell` and `limit_price` are raw [`num::BigRational`] values here;
/// they are validated and converted into the crate's [`crate::rational`]
/// newtypes during classification (§4.A), the one place ingest validation
/// happens.
#[derive(Clone, Debug)]
pub struct Order {
    pub id: OrderId,
    pub buy_token: TokenId,
    pub sell_token: TokenId,
    pub max_sell: num::BigRational,
    pub limit_price: num::BigRational,
}

impl Order {
    /// Convenience constructor for callers that already have the four
    /// fields to hand; equivalent to constructing the struct literal
    /// directly.
    pub fn new(
        id: impl Into<OrderId>,
        buy_token: impl Into<TokenId>,
        sell_token: impl Into<TokenId>,
        max_sell: num::BigRational,
        limit_price: num::BigRational,
    ) -> Self {
        Order {
            id: id.into(),
            buy_token: buy_token.into(),
            sell_token: sell_token.into(),
            max_sell,
            limit_price,
        }
    }
}

#[cfg(feature = "arbitrary")]
mod arbitrary_impl {
    use super::*;
    use arbitrary::{Arbitrary, Result, Unstructured};
    use num::BigRational;

    // `Order` cannot derive `Arbitrary` directly since `num::BigRational`
    // does not implement it. As in `pricegraph::encoding`'s `Element`, we
    // generate an equivalent all-primitive struct and convert.
    #[derive(Arbitrary)]
    struct ArbitraryOrder {
        id: u16,
        buy_is_base: bool,
        max_sell_numer: u32,
        max_sell_denom: u32,
        limit_price_numer: u32,
        limit_price_denom: u32,
    }

    impl ArbitraryOrder {
        fn into_order(self) -> Order {
            let (buy_token, sell_token) = if self.buy_is_base {
                ("base", "quote")
            } else {
                ("quote", "base")
            };
            Order {
                id: self.id.to_string().into(),
                buy_token: buy_token.into(),
                sell_token: sell_token.into(),
                max_sell: BigRational::new(
                    (self.max_sell_numer as i64 + 1).into(),
                    (self.max_sell_denom as i64 + 1).into(),
                ),
                limit_price: BigRational::new(
                    (self.limit_price_numer as i64 + 1).into(),
                    (self.limit_price_denom as i64 + 1).into(),
                ),
            }
        }
    }

    impl Arbitrary for Order {
        fn arbitrary(u: &mut Unstructured<'_>) -> Result<Self> {
            Ok(ArbitraryOrder::arbitrary(u)?.into_order())
        }

        fn size_hint(depth: usize) -> (usize, Option<usize>) {
            ArbitraryOrder::size_hint(depth)
        }
    }
}
