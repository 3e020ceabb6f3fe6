//! Chart and plot model.
//!
//! A [`Chart`] is an ordered sequence of [`Plot`]s rendered on one
//! coordinate space. Every plot in a chart must agree on whether axes exist
//! at all; axis-bearing plots share the chart's primary axis-id pair, or the
//! secondary pair when flagged, which is allocated lazily on the first
//! secondary plot and shared by every later one.

use crate::data::{Categories, ChartData};
use crate::error::{ChartError, Result};
use crate::types::ChartType;
use rand::RngExt;

/// A pair of cross-referencing axis identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisIds {
    /// Category (or x-value) axis id
    pub x: u32,
    /// Value axis id
    pub y: u32,
}

/// Draw a random 24-bit axis id distinct from every id already in use.
///
/// Uniqueness is checked only within the chart being built; ids elsewhere in
/// a document being edited are not consulted.
fn random_axis_id(used: &[u32]) -> u32 {
    let mut rng = rand::rng();
    loop {
        let id = rng.random_range(0..(1u32 << 24));
        if !used.contains(&id) {
            return id;
        }
    }
}

fn random_axis_id_pair(used: &[u32]) -> AxisIds {
    let x = random_axis_id(used);
    let mut used = used.to_vec();
    used.push(x);
    let y = random_axis_id(&used);
    AxisIds { x, y }
}

/// One chart-type-homogeneous grouping of series.
#[derive(Debug, Clone)]
pub struct Plot {
    chart_type: ChartType,
    data: ChartData,
    secondary_axis: bool,
    axis_ids: Option<AxisIds>,
}

impl Plot {
    /// Create a plot of `chart_type` over `data`.
    ///
    /// The data's shape must match the shape the chart type plots.
    pub fn new(chart_type: ChartType, data: impl Into<ChartData>) -> Result<Self> {
        let data = data.into();
        let expected = chart_type.data_shape();
        let got = data.data_shape();
        if got != expected {
            return Err(ChartError::DataShapeMismatch {
                chart_type,
                expected,
                got,
            });
        }
        Ok(Self {
            chart_type,
            data,
            secondary_axis: false,
            axis_ids: None,
        })
    }

    /// Place this plot on the chart's secondary axis pair.
    #[inline]
    pub fn on_secondary_axis(mut self) -> Self {
        self.secondary_axis = true;
        self
    }

    /// The plot's chart type.
    #[inline]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    /// The plot's data.
    #[inline]
    pub fn data(&self) -> &ChartData {
        &self.data
    }

    /// Whether this plot renders against axes.
    #[inline]
    pub fn has_axes(&self) -> bool {
        self.chart_type.has_axes()
    }

    /// Whether this plot uses the chart's secondary axis pair.
    #[inline]
    pub fn secondary_axis(&self) -> bool {
        self.secondary_axis
    }

    /// The axis-id pair assigned when the plot was added to a chart.
    #[inline]
    pub fn axis_ids(&self) -> Option<AxisIds> {
        self.axis_ids
    }
}

/// A chart: an ordered sequence of plots sharing one coordinate space.
#[derive(Debug, Clone)]
pub struct Chart {
    plots: Vec<Plot>,
    primary_axis_ids: AxisIds,
    secondary_axis_ids: Option<AxisIds>,
    /// Use the 1904 date system for date categories
    pub date_1904: bool,
    /// Round the chart frame corners
    pub rounded_corners: bool,
}

impl Chart {
    /// Create an empty chart with a freshly allocated primary axis pair.
    pub fn new() -> Self {
        Self {
            plots: Vec::new(),
            primary_axis_ids: random_axis_id_pair(&[]),
            secondary_axis_ids: None,
            date_1904: false,
            rounded_corners: false,
        }
    }

    /// Append a plot.
    ///
    /// Fails if the plot disagrees with the chart's existing plots on axis
    /// presence. Axis-bearing plots are assigned the primary pair, or the
    /// secondary pair (allocated once, on first use) when flagged.
    pub fn add_plot(&mut self, mut plot: Plot) -> Result<()> {
        if let Some(first) = self.plots.first()
            && first.has_axes() != plot.has_axes()
        {
            return Err(ChartError::MixedAxisPresence);
        }
        if plot.has_axes() {
            let ids = if plot.secondary_axis() {
                match self.secondary_axis_ids {
                    Some(ids) => ids,
                    None => {
                        let used = [self.primary_axis_ids.x, self.primary_axis_ids.y];
                        let ids = random_axis_id_pair(&used);
                        self.secondary_axis_ids = Some(ids);
                        ids
                    },
                }
            } else {
                self.primary_axis_ids
            };
            plot.axis_ids = Some(ids);
        }
        self.plots.push(plot);
        Ok(())
    }

    /// The plots in render order (earlier plots render behind later ones).
    #[inline]
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Whether the chart renders axes. An empty chart defaults to true.
    #[inline]
    pub fn has_axes(&self) -> bool {
        self.plots.first().is_none_or(Plot::has_axes)
    }

    /// The primary axis-id pair.
    #[inline]
    pub fn primary_axis_ids(&self) -> AxisIds {
        self.primary_axis_ids
    }

    /// The secondary axis-id pair, if any secondary plot has been added.
    #[inline]
    pub fn secondary_axis_ids(&self) -> Option<AxisIds> {
        self.secondary_axis_ids
    }

    /// The category sequence of the first category-shaped plot, if any.
    ///
    /// Axis synthesis keys off this: date categories select a date axis.
    pub fn categories(&self) -> Option<&Categories> {
        self.plots.iter().find_map(|plot| match plot.data() {
            ChartData::Category(data) => Some(&data.categories),
            _ => None,
        })
    }

    /// Render this chart as a complete chart-part XML document.
    pub fn xml_bytes(&self) -> Result<Vec<u8>> {
        let root = crate::writer::chart_space_xml(self)?;
        Ok(crate::xml::tree::serialize_document(&root))
    }
}

impl Default for Chart {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
