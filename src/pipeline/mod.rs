//! pipeline — configuration, batch driver, and reporting glue.
//!
//! The numerical core (garch, statistical_tests) never touches the
//! filesystem; everything that does lives here.

pub mod config;
pub mod correlation;
pub mod errors;
pub mod report;
pub mod runner;

pub use self::config::RunConfig;
pub use self::correlation::{CorrelationMatrix, DatedSeries, correlation_matrix, pearson};
pub use self::errors::{PipelineError, PipelineResult};
pub use self::runner::{BatchSummary, PriceSource, run_batch};

pub mod prelude {
    pub use super::config::RunConfig;
    pub use super::errors::{PipelineError, PipelineResult};
    pub use super::runner::{BatchSummary, PriceSource, run_batch};
}
