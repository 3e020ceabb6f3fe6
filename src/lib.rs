//! Rambutan - chart XML for Office Open XML documents
//!
//! This library composes default DrawingML chart XML (`c:chartSpace`) for
//! the chart part of an OOXML package, and rewrites the data of existing
//! charts in place while preserving any formatting a user has applied.
//!
//! # Features
//!
//! - **Chart writer**: Generate complete, schema-correct chart XML for the
//!   supported chart types (area, bar/column, line, pie, doughnut, radar,
//!   scatter, bubble families)
//! - **Axis synthesis**: Category, date, and value axes with
//!   primary/secondary pairing and crossing rules
//! - **Series rewriter**: Replace an existing chart's categories and values
//!   without disturbing user formatting
//! - **Element tree**: Owned XML tree with structural escaping, parsed with
//!   `quick-xml` and serialized once at the boundary
//!
//! # Example - Creating a chart
//!
//! ```no_run
//! use rambutan::{Categories, CategoryChartData, Chart, ChartType, Plot};
//!
//! # fn main() -> rambutan::Result<()> {
//! let mut data = CategoryChartData::new(Categories::from_strings([
//!     "East", "West", "Midwest",
//! ]));
//! data.add_series("Series 1", vec![Some(19.2), Some(21.4), Some(16.7)]);
//!
//! let mut chart = Chart::new();
//! chart.add_plot(Plot::new(ChartType::ColumnClustered, data)?)?;
//!
//! // Bytes for the package's chart part.
//! let xml = chart.xml_bytes()?;
//! # let _ = xml;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Replacing the data of an existing chart
//!
//! ```no_run
//! use rambutan::{
//!     Categories, CategoryChartData, ChartType, XmlElement, replace_series_data,
//! };
//!
//! # fn main() -> rambutan::Result<()> {
//! # let part_xml = "<c:chartSpace/>";
//! let mut chart_space = XmlElement::parse_str(part_xml)?;
//!
//! let mut data = CategoryChartData::new(Categories::from_strings(["Q1", "Q2"]));
//! data.add_series("Revenue", vec![Some(12.5), Some(14.0)]);
//!
//! replace_series_data(ChartType::ColumnClustered, &mut chart_space, &data.into())?;
//! let updated = chart_space.to_xml();
//! # let _ = updated;
//! # Ok(())
//! # }
//! ```

pub mod chart;
pub mod data;
pub mod error;
pub mod rewriter;
pub mod types;
pub mod writer;
pub mod xml;

pub use chart::{AxisIds, Chart, Plot};
pub use data::{
    BubbleChartData, BubbleSeriesData, Categories, CategoryChartData, CategoryLabel,
    CategorySeriesData, ChartData, XyChartData, XySeriesData,
};
pub use error::{ChartError, Result};
pub use rewriter::{SeriesRewriter, replace_series_data};
pub use types::{ChartType, DataShape, PlotFamily};
pub use writer::chart_space_xml;
pub use xml::tree::{XmlElement, XmlNode};
