//! Record filtering.

mod range;

pub use range::{between, Between, BetweenExt};
