//! series — validated price histories and log-return derivation.

pub mod core;
pub mod errors;

pub use self::core::{PriceSeries, ReturnSeries};
pub use self::errors::{DataError, DataResult};

pub mod prelude {
    pub use super::core::{PriceSeries, ReturnSeries};
    pub use super::errors::{DataError, DataResult};
}
