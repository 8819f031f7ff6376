//! Component F: solver configuration.
//!
//! A single tunable knob today, following `pricegraph::Pricegraph`'s own
//! minimal, additive `Config`-style surface rather than a sprawling options
//! struct nobody ends up exercising.

use num::{BigRational, Zero};

/// Tunable parameters threaded through [`crate::solve`].
#[derive(Clone, Debug)]
pub struct Config {
    /// The maximum objective difference treated as a tie when comparing two
    /// candidate rates. Ties are broken by preferring the smaller rate
    /// (§4.E, §6). Defaults to exact zero, so only a strictly better
    /// objective displaces the current best candidate; nothing is left to
    /// floating-point slop since every quantity here is an exact rational.
    pub tolerance: BigRational,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tolerance: BigRational::zero(),
        }
    }
}
