//! Errors raised while loading catalogue data.

use engine_core::ColorError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("could not parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("body {name:?} has non-positive period {period}")]
    NonPositivePeriod { name: String, period: f64 },
    #[error("body {name:?} has negative distance {distance}")]
    NegativeDistance { name: String, distance: f64 },
    #[error("duplicate body name {0:?}")]
    DuplicateName(String),
    #[error("body {name:?} has an invalid color")]
    BadColor {
        name: String,
        #[source]
        source: ColorError,
    },
    #[error("composition of {body:?} ({layer}) is out of range: {detail}")]
    PercentOutOfRange {
        body: String,
        layer: &'static str,
        detail: String,
    },
}
