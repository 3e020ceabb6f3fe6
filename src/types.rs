//! Chart type catalog.
//!
//! This module defines the closed set of supported chart types together with
//! the static facts derived from each one: which writer family handles it,
//! what shape its series data takes, whether it renders against axes, and the
//! type-specific modifier values (grouping, bar direction, marker visibility,
//! radar and scatter styles).

/// Chart type enumeration.
///
/// The set is closed: every value maps to exactly one writer family and one
/// rewriter family through exhaustive matches, so a type added here without
/// updating the derived facts fails to compile rather than failing at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    /// Area chart
    Area,
    /// Stacked area chart
    AreaStacked,
    /// 100% stacked area chart
    AreaStacked100,
    /// Clustered bar chart (horizontal bars)
    BarClustered,
    /// Stacked bar chart
    BarStacked,
    /// 100% stacked bar chart
    BarStacked100,
    /// Bubble chart
    Bubble,
    /// Bubble chart with 3-D effect
    BubbleThreeDEffect,
    /// Clustered column chart (vertical bars)
    ColumnClustered,
    /// Stacked column chart
    ColumnStacked,
    /// 100% stacked column chart
    ColumnStacked100,
    /// Doughnut chart
    Doughnut,
    /// Exploded doughnut chart
    DoughnutExploded,
    /// Line chart without markers
    Line,
    /// Line chart with markers
    LineMarkers,
    /// Stacked line chart with markers
    LineMarkersStacked,
    /// 100% stacked line chart with markers
    LineMarkersStacked100,
    /// Stacked line chart without markers
    LineStacked,
    /// 100% stacked line chart without markers
    LineStacked100,
    /// Pie chart
    Pie,
    /// Exploded pie chart
    PieExploded,
    /// Radar chart without markers
    Radar,
    /// Filled radar chart
    RadarFilled,
    /// Radar chart with markers
    RadarMarkers,
    /// Scatter chart, markers only
    XyScatter,
    /// Scatter chart with straight lines and markers
    XyScatterLines,
    /// Scatter chart with straight lines, no markers
    XyScatterLinesNoMarkers,
    /// Scatter chart with smoothed lines and markers
    XyScatterSmooth,
    /// Scatter chart with smoothed lines, no markers
    XyScatterSmoothNoMarkers,
}

/// The shape of series data a chart type plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataShape {
    /// Values indexed by a shared category sequence
    Category,
    /// Paired x/y values per point
    Xy,
    /// Paired x/y values plus a bubble-size channel
    Bubble,
}

/// Writer family producing the plot-group element for a chart type.
///
/// Several chart types share one family and are differentiated only by the
/// modifier facts on [`ChartType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotFamily {
    /// `<c:areaChart>`
    Area,
    /// `<c:barChart>` (bars and columns)
    Bar,
    /// `<c:doughnutChart>`
    Doughnut,
    /// `<c:lineChart>`
    Line,
    /// `<c:pieChart>`
    Pie,
    /// `<c:radarChart>`
    Radar,
    /// `<c:scatterChart>`
    Xy,
    /// `<c:bubbleChart>`
    Bubble,
}

impl PlotFamily {
    /// Returns the XML element name for this family's plot group.
    #[inline]
    pub const fn xml_element_name(&self) -> &'static str {
        match self {
            Self::Area => "c:areaChart",
            Self::Bar => "c:barChart",
            Self::Doughnut => "c:doughnutChart",
            Self::Line => "c:lineChart",
            Self::Pie => "c:pieChart",
            Self::Radar => "c:radarChart",
            Self::Xy => "c:scatterChart",
            Self::Bubble => "c:bubbleChart",
        }
    }
}

/// Series grouping mode for area, bar/column, and line groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartGrouping {
    /// Standard grouping
    Standard,
    /// Clustered bars/columns
    Clustered,
    /// Stacked series
    Stacked,
    /// 100% stacked series
    PercentStacked,
}

impl ChartGrouping {
    /// Returns the XML value for this grouping.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Clustered => "clustered",
            Self::Stacked => "stacked",
            Self::PercentStacked => "percentStacked",
        }
    }
}

/// Bar/column direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarDirection {
    /// Horizontal bars
    Bar,
    /// Vertical bars (columns)
    Column,
}

impl BarDirection {
    /// Returns the XML value for this direction.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Column => "col",
        }
    }
}

/// Radar chart style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadarChartStyle {
    /// Marker radar
    Marker,
    /// Filled radar
    Filled,
}

impl RadarChartStyle {
    /// Returns the XML value for this radar style.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Filled => "filled",
        }
    }
}

/// Scatter chart style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterChartStyle {
    /// Straight line with markers
    LineMarker,
    /// Smoothed line with markers
    SmoothMarker,
}

impl ScatterChartStyle {
    /// Returns the XML value for this scatter style.
    #[inline]
    pub const fn xml_value(&self) -> &'static str {
        match self {
            Self::LineMarker => "lineMarker",
            Self::SmoothMarker => "smoothMarker",
        }
    }
}

impl ChartType {
    /// Every supported chart type, in declaration order.
    pub const ALL: [ChartType; 29] = [
        Self::Area,
        Self::AreaStacked,
        Self::AreaStacked100,
        Self::BarClustered,
        Self::BarStacked,
        Self::BarStacked100,
        Self::Bubble,
        Self::BubbleThreeDEffect,
        Self::ColumnClustered,
        Self::ColumnStacked,
        Self::ColumnStacked100,
        Self::Doughnut,
        Self::DoughnutExploded,
        Self::Line,
        Self::LineMarkers,
        Self::LineMarkersStacked,
        Self::LineMarkersStacked100,
        Self::LineStacked,
        Self::LineStacked100,
        Self::Pie,
        Self::PieExploded,
        Self::Radar,
        Self::RadarFilled,
        Self::RadarMarkers,
        Self::XyScatter,
        Self::XyScatterLines,
        Self::XyScatterLinesNoMarkers,
        Self::XyScatterSmooth,
        Self::XyScatterSmoothNoMarkers,
    ];

    /// Returns the writer family that emits this chart type's plot group.
    #[inline]
    pub const fn family(&self) -> PlotFamily {
        match self {
            Self::Area | Self::AreaStacked | Self::AreaStacked100 => PlotFamily::Area,
            Self::BarClustered
            | Self::BarStacked
            | Self::BarStacked100
            | Self::ColumnClustered
            | Self::ColumnStacked
            | Self::ColumnStacked100 => PlotFamily::Bar,
            Self::Bubble | Self::BubbleThreeDEffect => PlotFamily::Bubble,
            Self::Doughnut | Self::DoughnutExploded => PlotFamily::Doughnut,
            Self::Line
            | Self::LineMarkers
            | Self::LineMarkersStacked
            | Self::LineMarkersStacked100
            | Self::LineStacked
            | Self::LineStacked100 => PlotFamily::Line,
            Self::Pie | Self::PieExploded => PlotFamily::Pie,
            Self::Radar | Self::RadarFilled | Self::RadarMarkers => PlotFamily::Radar,
            Self::XyScatter
            | Self::XyScatterLines
            | Self::XyScatterLinesNoMarkers
            | Self::XyScatterSmooth
            | Self::XyScatterSmoothNoMarkers => PlotFamily::Xy,
        }
    }

    /// Returns the shape of series data this chart type plots.
    #[inline]
    pub const fn data_shape(&self) -> DataShape {
        match self.family() {
            PlotFamily::Bubble => DataShape::Bubble,
            PlotFamily::Xy => DataShape::Xy,
            _ => DataShape::Category,
        }
    }

    /// Returns true if this chart type renders against category/value axes.
    ///
    /// Pie, doughnut, and radar charts have no Cartesian axes; their plot
    /// groups carry no axis-id references and the chart document omits the
    /// axes block entirely.
    #[inline]
    pub const fn has_axes(&self) -> bool {
        !matches!(
            self.family(),
            PlotFamily::Pie | PlotFamily::Doughnut | PlotFamily::Radar
        )
    }

    /// Series grouping mode, for the families that carry one.
    #[inline]
    pub const fn grouping(&self) -> Option<ChartGrouping> {
        match self {
            Self::Area => Some(ChartGrouping::Standard),
            Self::AreaStacked => Some(ChartGrouping::Stacked),
            Self::AreaStacked100 => Some(ChartGrouping::PercentStacked),
            Self::BarClustered | Self::ColumnClustered => Some(ChartGrouping::Clustered),
            Self::BarStacked | Self::ColumnStacked => Some(ChartGrouping::Stacked),
            Self::BarStacked100 | Self::ColumnStacked100 => Some(ChartGrouping::PercentStacked),
            Self::Line | Self::LineMarkers => Some(ChartGrouping::Standard),
            Self::LineStacked | Self::LineMarkersStacked => Some(ChartGrouping::Stacked),
            Self::LineStacked100 | Self::LineMarkersStacked100 => {
                Some(ChartGrouping::PercentStacked)
            },
            _ => None,
        }
    }

    /// Bar direction, for the bar/column family.
    #[inline]
    pub const fn bar_direction(&self) -> Option<BarDirection> {
        match self {
            Self::BarClustered | Self::BarStacked | Self::BarStacked100 => {
                Some(BarDirection::Bar)
            },
            Self::ColumnClustered | Self::ColumnStacked | Self::ColumnStacked100 => {
                Some(BarDirection::Column)
            },
            _ => None,
        }
    }

    /// Overlap percentage, emitted only for stacked bar/column variants.
    #[inline]
    pub const fn overlap(&self) -> Option<i32> {
        match self {
            Self::BarStacked
            | Self::BarStacked100
            | Self::ColumnStacked
            | Self::ColumnStacked100 => Some(100),
            _ => None,
        }
    }

    /// Radar style, for the radar family.
    #[inline]
    pub const fn radar_style(&self) -> Option<RadarChartStyle> {
        match self {
            Self::Radar | Self::RadarMarkers => Some(RadarChartStyle::Marker),
            Self::RadarFilled => Some(RadarChartStyle::Filled),
            _ => None,
        }
    }

    /// Scatter style, for the XY family.
    #[inline]
    pub const fn scatter_style(&self) -> Option<ScatterChartStyle> {
        match self {
            Self::XyScatter | Self::XyScatterLines | Self::XyScatterLinesNoMarkers => {
                Some(ScatterChartStyle::LineMarker)
            },
            Self::XyScatterSmooth | Self::XyScatterSmoothNoMarkers => {
                Some(ScatterChartStyle::SmoothMarker)
            },
            _ => None,
        }
    }

    /// Returns true if series of this type suppress their markers.
    #[inline]
    pub const fn marker_hidden(&self) -> bool {
        matches!(
            self,
            Self::Line
                | Self::LineStacked
                | Self::LineStacked100
                | Self::Radar
                | Self::XyScatterLinesNoMarkers
                | Self::XyScatterSmoothNoMarkers
        )
    }

    /// Returns true for the exploded pie/doughnut variants.
    #[inline]
    pub const fn is_exploded(&self) -> bool {
        matches!(self, Self::PieExploded | Self::DoughnutExploded)
    }

    /// Returns true for the 3-D-effect bubble variant.
    #[inline]
    pub const fn bubble_3d(&self) -> bool {
        matches!(self, Self::BubbleThreeDEffect)
    }
}
