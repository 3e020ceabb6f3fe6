//! Error types for chart generation and rewriting.
use crate::types::{ChartType, DataShape};
use thiserror::Error;

/// Result type for chart operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Error types for chart operations.
#[derive(Error, Debug)]
pub enum ChartError {
    /// Chart has no plots to render
    #[error("chart has no plots")]
    EmptyChart,

    /// Axis-bearing and axis-free plots mixed in one chart
    #[error("cannot mix plots with and without axes in one chart")]
    MixedAxisPresence,

    /// Series data shape does not match the plot's chart type
    #[error("chart type {chart_type:?} requires {expected:?} series data, got {got:?}")]
    DataShapeMismatch {
        chart_type: ChartType,
        expected: DataShape,
        got: DataShape,
    },

    /// Categories built from values of more than one kind
    #[error("categories must all be of the same kind (string, numeric, or date)")]
    MixedCategoryKinds,

    /// Multi-level category tuples of unequal depth
    #[error("multi-level categories must all have the same depth")]
    UnevenCategoryDepth,

    /// Replacement data shape does not match the existing chart's shape
    #[error("existing chart holds {found:?} series, replacement data is {expected:?}")]
    StructureMismatch {
        expected: DataShape,
        found: DataShape,
    },

    /// Plot has not been attached to a chart, so no axis ids exist for it
    #[error("plot has no axis ids assigned; add it to a chart first")]
    MissingAxisIds,

    /// A required element is absent from an existing chart document
    #[error("missing element: {0}")]
    MissingElement(&'static str),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for ChartError {
    fn from(err: quick_xml::Error) -> Self {
        ChartError::Xml(err.to_string())
    }
}
