//! Chart XML writer.
//!
//! Composes default chart-part XML (`c:chartSpace`) for every supported
//! chart type: one plot-group element per plot, produced by the writer
//! family the chart type dispatches to, an axes block when the chart has
//! axes, and the fixed document boilerplate consuming readers expect.
//!
//! The series fragment builders (`c:tx`/`c:cat`/`c:val`/`c:xVal`/`c:yVal`/
//! `c:bubbleSize`) are shared with the series rewriter, which splices them
//! into existing documents.

use crate::chart::{AxisIds, Chart, Plot};
use crate::data::{
    BubbleSeriesData, Categories, CategoryChartData, CategorySeriesData, ChartData, XySeriesData,
    excel_date_number,
};
use crate::error::{ChartError, Result};
use crate::types::{ChartType, DataShape, PlotFamily};
use crate::xml::tree::XmlElement;

const NS_CHART: &str = "http://schemas.openxmlformats.org/drawingml/2006/chart";
const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[inline]
fn bool_val(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

pub(crate) fn uint_str(value: u64) -> String {
    itoa::Buffer::new().format(value).to_string()
}

fn int_str(value: i64) -> String {
    itoa::Buffer::new().format(value).to_string()
}

fn float_str(value: f64) -> String {
    ryu::Buffer::new().format(value).to_string()
}

/// `<name val="..."/>`, the workhorse shape of the chart vocabulary.
fn val_el(name: &'static str, value: impl Into<String>) -> XmlElement {
    XmlElement::new(name).attr("val", value)
}

/// Render a complete `c:chartSpace` document for `chart`.
///
/// Fails if the chart has no plots or its plots disagree on axis presence.
pub fn chart_space_xml(chart: &Chart) -> Result<XmlElement> {
    let Some(first) = chart.plots().first() else {
        return Err(ChartError::EmptyChart);
    };
    if chart
        .plots()
        .iter()
        .any(|plot| plot.has_axes() != first.has_axes())
    {
        return Err(ChartError::MixedAxisPresence);
    }

    let mut plot_area = XmlElement::new("c:plotArea").child(XmlElement::new("c:layout"));
    for plot in chart.plots() {
        plot_area.push_child(plot_group_xml(plot, chart.date_1904)?);
    }
    if chart.has_axes() {
        for axis in axes_xml(chart) {
            plot_area.push_child(axis);
        }
    }

    let chart_el = XmlElement::new("c:chart")
        .child(val_el("c:autoTitleDeleted", "1"))
        .child(plot_area)
        .child(
            XmlElement::new("c:legend")
                .child(val_el("c:legendPos", "r"))
                .child(XmlElement::new("c:layout"))
                .child(val_el("c:overlay", "0")),
        )
        .child(val_el("c:plotVisOnly", "1"))
        .child(val_el("c:dispBlanksAs", "gap"))
        .child(val_el("c:showDLblsOverMax", "0"));

    Ok(XmlElement::new("c:chartSpace")
        .attr("xmlns:c", NS_CHART)
        .attr("xmlns:a", NS_DRAWING)
        .attr("xmlns:r", NS_RELATIONSHIPS)
        .child(val_el("c:date1904", bool_val(chart.date_1904)))
        .child(val_el("c:roundedCorners", bool_val(chart.rounded_corners)))
        .child(chart_el)
        .child(
            XmlElement::new("c:spPr")
                .child(XmlElement::new("a:noFill"))
                .child(XmlElement::new("a:ln").child(XmlElement::new("a:noFill")))
                .child(XmlElement::new("a:effectLst")),
        )
        .child(
            XmlElement::new("c:txPr")
                .child(XmlElement::new("a:bodyPr"))
                .child(XmlElement::new("a:lstStyle"))
                .child(
                    XmlElement::new("a:p")
                        .child(XmlElement::new("a:pPr").child(XmlElement::new("a:defRPr")))
                        .child(XmlElement::new("a:endParaRPr").attr("lang", "en-US")),
                ),
        ))
}

/// Emit the plot-group element for `plot` via its chart type's writer
/// family. Dispatch is total over the [`ChartType`] enumeration.
pub fn plot_group_xml(plot: &Plot, date_1904: bool) -> Result<XmlElement> {
    match plot.chart_type().family() {
        PlotFamily::Area => area_group_xml(plot, date_1904),
        PlotFamily::Bar => bar_group_xml(plot, date_1904),
        PlotFamily::Doughnut => doughnut_group_xml(plot, date_1904),
        PlotFamily::Line => line_group_xml(plot, date_1904),
        PlotFamily::Pie => pie_group_xml(plot, date_1904),
        PlotFamily::Radar => radar_group_xml(plot, date_1904),
        PlotFamily::Xy => scatter_group_xml(plot),
        PlotFamily::Bubble => bubble_group_xml(plot),
    }
}

fn category_data(plot: &Plot) -> Result<&CategoryChartData> {
    match plot.data() {
        ChartData::Category(data) => Ok(data),
        other => Err(ChartError::DataShapeMismatch {
            chart_type: plot.chart_type(),
            expected: DataShape::Category,
            got: other.data_shape(),
        }),
    }
}

fn plot_axis_id_refs(plot: &Plot) -> Result<[XmlElement; 2]> {
    let ids = plot.axis_ids().ok_or(ChartError::MissingAxisIds)?;
    Ok(axis_id_refs(ids))
}

fn axis_id_refs(ids: AxisIds) -> [XmlElement; 2] {
    [
        val_el("c:axId", uint_str(ids.x as u64)),
        val_el("c:axId", uint_str(ids.y as u64)),
    ]
}

fn grouping_el(chart_type: ChartType) -> Option<XmlElement> {
    chart_type
        .grouping()
        .map(|grouping| val_el("c:grouping", grouping.xml_value()))
}

fn data_labels_xml(show_leader_lines: bool) -> XmlElement {
    let mut labels = XmlElement::new("c:dLbls")
        .child(val_el("c:showLegendKey", "0"))
        .child(val_el("c:showVal", "0"))
        .child(val_el("c:showCatName", "0"))
        .child(val_el("c:showSerName", "0"))
        .child(val_el("c:showPercent", "0"))
        .child(val_el("c:showBubbleSize", "0"));
    if show_leader_lines {
        labels.push_child(val_el("c:showLeaderLines", "1"));
    }
    labels
}

fn no_marker_xml() -> XmlElement {
    XmlElement::new("c:marker").child(val_el("c:symbol", "none"))
}

fn ser_head(series_index: u32) -> XmlElement {
    XmlElement::new("c:ser")
        .child(val_el("c:idx", uint_str(series_index as u64)))
        .child(val_el("c:order", uint_str(series_index as u64)))
}

fn area_group_xml(plot: &Plot, date_1904: bool) -> Result<XmlElement> {
    let data = category_data(plot)?;
    let mut group = XmlElement::new("c:areaChart");
    if let Some(grouping) = grouping_el(plot.chart_type()) {
        group.push_child(grouping);
    }
    group.push_child(val_el("c:varyColors", "0"));
    for series in data.series() {
        let writer = CategorySeriesXml::new(series, &data.categories, date_1904);
        group.push_child(
            ser_head(series.index)
                .child(writer.tx())
                .child(writer.cat())
                .child(writer.val()),
        );
    }
    group.push_child(data_labels_xml(false));
    for axis_id in plot_axis_id_refs(plot)? {
        group.push_child(axis_id);
    }
    Ok(group)
}

fn bar_group_xml(plot: &Plot, date_1904: bool) -> Result<XmlElement> {
    let chart_type = plot.chart_type();
    let data = category_data(plot)?;
    let mut group = XmlElement::new("c:barChart");
    if let Some(direction) = chart_type.bar_direction() {
        group.push_child(val_el("c:barDir", direction.xml_value()));
    }
    if let Some(grouping) = grouping_el(chart_type) {
        group.push_child(grouping);
    }
    for series in data.series() {
        let writer = CategorySeriesXml::new(series, &data.categories, date_1904);
        group.push_child(
            ser_head(series.index)
                .child(writer.tx())
                .child(writer.cat())
                .child(writer.val()),
        );
    }
    group.push_child(data_labels_xml(false));
    if let Some(overlap) = chart_type.overlap() {
        group.push_child(val_el("c:overlap", int_str(overlap as i64)));
    }
    for axis_id in plot_axis_id_refs(plot)? {
        group.push_child(axis_id);
    }
    Ok(group)
}

fn doughnut_group_xml(plot: &Plot, date_1904: bool) -> Result<XmlElement> {
    let data = category_data(plot)?;
    let mut group = XmlElement::new("c:doughnutChart").child(val_el("c:varyColors", "1"));
    for series in data.series() {
        let writer = CategorySeriesXml::new(series, &data.categories, date_1904);
        let mut ser = ser_head(series.index).child(writer.tx());
        if plot.chart_type().is_exploded() {
            ser.push_child(val_el("c:explosion", "25"));
        }
        group.push_child(ser.child(writer.cat()).child(writer.val()));
    }
    group.push_child(data_labels_xml(true));
    group.push_child(val_el("c:firstSliceAng", "0"));
    group.push_child(val_el("c:holeSize", "50"));
    Ok(group)
}

fn line_group_xml(plot: &Plot, date_1904: bool) -> Result<XmlElement> {
    let chart_type = plot.chart_type();
    let data = category_data(plot)?;
    let mut group = XmlElement::new("c:lineChart");
    if let Some(grouping) = grouping_el(chart_type) {
        group.push_child(grouping);
    }
    group.push_child(val_el("c:varyColors", "0"));
    for series in data.series() {
        let writer = CategorySeriesXml::new(series, &data.categories, date_1904);
        let mut ser = ser_head(series.index).child(writer.tx());
        if chart_type.marker_hidden() {
            ser.push_child(no_marker_xml());
        }
        group.push_child(
            ser.child(writer.cat())
                .child(writer.val())
                .child(val_el("c:smooth", "0")),
        );
    }
    group.push_child(data_labels_xml(false));
    group.push_child(val_el("c:marker", "1"));
    group.push_child(val_el("c:smooth", "0"));
    for axis_id in plot_axis_id_refs(plot)? {
        group.push_child(axis_id);
    }
    Ok(group)
}

fn pie_group_xml(plot: &Plot, date_1904: bool) -> Result<XmlElement> {
    let data = category_data(plot)?;
    let mut group = XmlElement::new("c:pieChart").child(val_el("c:varyColors", "1"));
    for series in data.series() {
        let writer = CategorySeriesXml::new(series, &data.categories, date_1904);
        let mut ser = ser_head(series.index).child(writer.tx());
        if plot.chart_type().is_exploded() {
            ser.push_child(val_el("c:explosion", "25"));
        }
        group.push_child(ser.child(writer.cat()).child(writer.val()));
    }
    Ok(group)
}

fn radar_group_xml(plot: &Plot, date_1904: bool) -> Result<XmlElement> {
    let chart_type = plot.chart_type();
    let data = category_data(plot)?;
    let mut group = XmlElement::new("c:radarChart");
    if let Some(style) = chart_type.radar_style() {
        group.push_child(val_el("c:radarStyle", style.xml_value()));
    }
    group.push_child(val_el("c:varyColors", "0"));
    for series in data.series() {
        let writer = CategorySeriesXml::new(series, &data.categories, date_1904);
        let mut ser = ser_head(series.index).child(writer.tx());
        if chart_type.marker_hidden() {
            ser.push_child(no_marker_xml());
        }
        group.push_child(
            ser.child(writer.cat())
                .child(writer.val())
                .child(val_el("c:smooth", "0")),
        );
    }
    Ok(group)
}

fn scatter_group_xml(plot: &Plot) -> Result<XmlElement> {
    let chart_type = plot.chart_type();
    let data = match plot.data() {
        ChartData::Xy(data) => data,
        other => {
            return Err(ChartError::DataShapeMismatch {
                chart_type,
                expected: DataShape::Xy,
                got: other.data_shape(),
            });
        },
    };
    let mut group = XmlElement::new("c:scatterChart");
    if let Some(style) = chart_type.scatter_style() {
        group.push_child(val_el("c:scatterStyle", style.xml_value()));
    }
    group.push_child(val_el("c:varyColors", "0"));
    for series in data.series() {
        let writer = XySeriesXml::new(series);
        let mut ser = ser_head(series.index).child(writer.tx());
        if chart_type == ChartType::XyScatter {
            // Markers only: suppress the connecting line.
            ser.push_child(
                XmlElement::new("c:spPr").child(
                    XmlElement::new("a:ln")
                        .attr("w", "47625")
                        .child(XmlElement::new("a:noFill")),
                ),
            );
        }
        if chart_type.marker_hidden() {
            ser.push_child(no_marker_xml());
        }
        group.push_child(
            ser.child(writer.x_val())
                .child(writer.y_val())
                .child(val_el("c:smooth", "0")),
        );
    }
    for axis_id in plot_axis_id_refs(plot)? {
        group.push_child(axis_id);
    }
    Ok(group)
}

fn bubble_group_xml(plot: &Plot) -> Result<XmlElement> {
    let chart_type = plot.chart_type();
    let data = match plot.data() {
        ChartData::Bubble(data) => data,
        other => {
            return Err(ChartError::DataShapeMismatch {
                chart_type,
                expected: DataShape::Bubble,
                got: other.data_shape(),
            });
        },
    };
    let mut group = XmlElement::new("c:bubbleChart").child(val_el("c:varyColors", "0"));
    for series in data.series() {
        let writer = BubbleSeriesXml::new(series);
        group.push_child(
            ser_head(series.index)
                .child(writer.tx())
                .child(val_el("c:invertIfNegative", "0"))
                .child(writer.x_val())
                .child(writer.y_val())
                .child(writer.bubble_size())
                .child(val_el("c:bubble3D", bool_val(chart_type.bubble_3d()))),
        );
    }
    group.push_child(data_labels_xml(false));
    group.push_child(val_el("c:bubbleScale", "100"));
    group.push_child(val_el("c:showNegBubbles", "0"));
    for axis_id in plot_axis_id_refs(plot)? {
        group.push_child(axis_id);
    }
    Ok(group)
}

/// `<c:pt idx="..."><c:v>...</c:v></c:pt>` entries for present values; the
/// index positions of `None` values are simply absent.
fn sparse_points(values: &[Option<f64>]) -> Vec<(usize, String)> {
    values
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.map(|v| (idx, float_str(v))))
        .collect()
}

fn pt_el(idx: usize, value: String) -> XmlElement {
    XmlElement::new("c:pt")
        .attr("idx", uint_str(idx as u64))
        .child(XmlElement::new("c:v").text(value))
}

/// `<c:strRef>` with its cache. `pt_count` counts positions, not emitted
/// points.
fn str_ref_xml(wksht_ref: &str, pt_count: usize, points: Vec<(usize, String)>) -> XmlElement {
    let mut cache =
        XmlElement::new("c:strCache").child(val_el("c:ptCount", uint_str(pt_count as u64)));
    for (idx, value) in points {
        cache.push_child(pt_el(idx, value));
    }
    XmlElement::new("c:strRef")
        .child(XmlElement::new("c:f").text(wksht_ref))
        .child(cache)
}

/// `<c:numRef>` with its cache. `pt_count` counts positions, not emitted
/// points.
fn num_ref_xml(
    wksht_ref: &str,
    number_format: &str,
    pt_count: usize,
    points: Vec<(usize, String)>,
) -> XmlElement {
    let mut cache = XmlElement::new("c:numCache")
        .child(XmlElement::new("c:formatCode").text(number_format))
        .child(val_el("c:ptCount", uint_str(pt_count as u64)));
    for (idx, value) in points {
        cache.push_child(pt_el(idx, value));
    }
    XmlElement::new("c:numRef")
        .child(XmlElement::new("c:f").text(wksht_ref))
        .child(cache)
}

/// `<c:tx>` carrying the series name and its worksheet reference.
fn tx_xml(name_ref: &str, name: &str) -> XmlElement {
    XmlElement::new("c:tx").child(str_ref_xml(name_ref, 1, vec![(0, name.to_string())]))
}

/// Produces the data fragments of a category-shaped series.
pub(crate) struct CategorySeriesXml<'a> {
    series: &'a CategorySeriesData,
    categories: &'a Categories,
    date_1904: bool,
}

impl<'a> CategorySeriesXml<'a> {
    pub(crate) fn new(
        series: &'a CategorySeriesData,
        categories: &'a Categories,
        date_1904: bool,
    ) -> Self {
        Self {
            series,
            categories,
            date_1904,
        }
    }

    /// The `<c:tx>` element containing the series name.
    pub(crate) fn tx(&self) -> XmlElement {
        tx_xml(&self.series.name_ref, &self.series.name)
    }

    /// The `<c:cat>` element: string, numeric, date, or multi-level cache
    /// depending on the category kind.
    pub(crate) fn cat(&self) -> XmlElement {
        let wksht_ref = self.series.categories_ref.as_str();
        let mut cat = XmlElement::new("c:cat");
        match self.categories {
            Categories::Strings(labels) => {
                let points = labels
                    .iter()
                    .enumerate()
                    .map(|(idx, label)| (idx, label.clone()))
                    .collect();
                cat.push_child(str_ref_xml(wksht_ref, labels.len(), points));
            },
            Categories::Numeric {
                values,
                number_format,
            } => {
                let points = values
                    .iter()
                    .enumerate()
                    .map(|(idx, value)| (idx, float_str(*value)))
                    .collect();
                cat.push_child(num_ref_xml(wksht_ref, number_format, values.len(), points));
            },
            Categories::Dates {
                values,
                number_format,
            } => {
                let points = values
                    .iter()
                    .enumerate()
                    .map(|(idx, date)| (idx, int_str(excel_date_number(*date, self.date_1904))))
                    .collect();
                cat.push_child(num_ref_xml(wksht_ref, number_format, values.len(), points));
            },
            Categories::MultiLevel { .. } => {
                let mut cache = XmlElement::new("c:multiLvlStrCache").child(val_el(
                    "c:ptCount",
                    uint_str(self.categories.leaf_count() as u64),
                ));
                for level in self.categories.levels() {
                    let mut lvl = XmlElement::new("c:lvl");
                    for (idx, label) in level {
                        lvl.push_child(pt_el(idx, label.to_string()));
                    }
                    cache.push_child(lvl);
                }
                cat.push_child(
                    XmlElement::new("c:multiLvlStrRef")
                        .child(XmlElement::new("c:f").text(wksht_ref))
                        .child(cache),
                );
            },
        }
        cat
    }

    /// The `<c:val>` element containing the series values.
    pub(crate) fn val(&self) -> XmlElement {
        XmlElement::new("c:val").child(num_ref_xml(
            &self.series.values_ref,
            &self.series.number_format,
            self.series.values.len(),
            sparse_points(&self.series.values),
        ))
    }
}

/// Produces the data fragments of an XY-shaped series.
pub(crate) struct XySeriesXml<'a> {
    series: &'a XySeriesData,
}

impl<'a> XySeriesXml<'a> {
    pub(crate) fn new(series: &'a XySeriesData) -> Self {
        Self { series }
    }

    /// The `<c:tx>` element containing the series name.
    pub(crate) fn tx(&self) -> XmlElement {
        tx_xml(&self.series.name_ref, &self.series.name)
    }

    /// The `<c:xVal>` element containing the x values.
    pub(crate) fn x_val(&self) -> XmlElement {
        XmlElement::new("c:xVal").child(num_ref_xml(
            &self.series.x_values_ref,
            &self.series.number_format,
            self.series.x_values.len(),
            sparse_points(&self.series.x_values),
        ))
    }

    /// The `<c:yVal>` element containing the y values.
    pub(crate) fn y_val(&self) -> XmlElement {
        XmlElement::new("c:yVal").child(num_ref_xml(
            &self.series.y_values_ref,
            &self.series.number_format,
            self.series.y_values.len(),
            sparse_points(&self.series.y_values),
        ))
    }
}

/// Produces the data fragments of a bubble-shaped series.
pub(crate) struct BubbleSeriesXml<'a> {
    series: &'a BubbleSeriesData,
}

impl<'a> BubbleSeriesXml<'a> {
    pub(crate) fn new(series: &'a BubbleSeriesData) -> Self {
        Self { series }
    }

    /// The `<c:tx>` element containing the series name.
    pub(crate) fn tx(&self) -> XmlElement {
        tx_xml(&self.series.name_ref, &self.series.name)
    }

    /// The `<c:xVal>` element containing the x values.
    pub(crate) fn x_val(&self) -> XmlElement {
        XmlElement::new("c:xVal").child(num_ref_xml(
            &self.series.x_values_ref,
            &self.series.number_format,
            self.series.x_values.len(),
            sparse_points(&self.series.x_values),
        ))
    }

    /// The `<c:yVal>` element containing the y values.
    pub(crate) fn y_val(&self) -> XmlElement {
        XmlElement::new("c:yVal").child(num_ref_xml(
            &self.series.y_values_ref,
            &self.series.number_format,
            self.series.y_values.len(),
            sparse_points(&self.series.y_values),
        ))
    }

    /// The `<c:bubbleSize>` element containing the bubble sizes.
    pub(crate) fn bubble_size(&self) -> XmlElement {
        XmlElement::new("c:bubbleSize").child(num_ref_xml(
            &self.series.bubble_sizes_ref,
            &self.series.number_format,
            self.series.bubble_sizes.len(),
            sparse_points(&self.series.bubble_sizes),
        ))
    }
}

/// Synthesize the axes block for `chart`: value axis before category/date
/// axis within each pair, primary pair before secondary.
fn axes_xml(chart: &Chart) -> Vec<XmlElement> {
    let primary = chart.primary_axis_ids();
    let categories = chart.categories();
    let mut axes = vec![
        value_axis_xml(primary.y, primary.x, false, categories.is_none()),
        x_axis_xml(categories, primary.x, primary.y, false),
    ];
    if let Some(secondary) = chart.secondary_axis_ids() {
        axes.push(value_axis_xml(secondary.y, secondary.x, true, categories.is_none()));
        axes.push(x_axis_xml(categories, secondary.x, secondary.y, true));
    }
    axes
}

/// The value axis of a pair: left edge crossing at auto-zero when primary,
/// right edge crossing at the category axis maximum when secondary.
/// Gridlines are emitted only for the primary value axis.
fn value_axis_xml(axis_id: u32, cross_ax_id: u32, secondary: bool, mid_cat: bool) -> XmlElement {
    let mut axis = XmlElement::new("c:valAx")
        .child(val_el("c:axId", uint_str(axis_id as u64)))
        .child(XmlElement::new("c:scaling").child(val_el("c:orientation", "minMax")))
        .child(val_el("c:delete", "0"))
        .child(val_el("c:axPos", if secondary { "r" } else { "l" }));
    if !secondary {
        axis.push_child(XmlElement::new("c:majorGridlines"));
    }
    axis.push_child(
        XmlElement::new("c:numFmt")
            .attr("formatCode", "General")
            .attr("sourceLinked", "1"),
    );
    axis.push_child(val_el("c:majorTickMark", "none"));
    axis.push_child(val_el("c:minorTickMark", "none"));
    axis.push_child(val_el("c:tickLblPos", "nextTo"));
    axis.push_child(val_el("c:crossAx", uint_str(cross_ax_id as u64)));
    axis.push_child(val_el(
        "c:crosses",
        if secondary { "max" } else { "autoZero" },
    ));
    axis.push_child(val_el(
        "c:crossBetween",
        if mid_cat { "midCat" } else { "between" },
    ));
    axis
}

/// The bottom axis of a pair: a category or date axis for category-shaped
/// charts, a value axis for XY/bubble charts (which have no categories).
/// Secondary bottom axes are hidden, as they duplicate the primary one.
fn x_axis_xml(
    categories: Option<&Categories>,
    axis_id: u32,
    cross_ax_id: u32,
    secondary: bool,
) -> XmlElement {
    let hidden = bool_val(secondary);
    match categories {
        None => {
            // XY/bubble: x values plot against a value axis.
            XmlElement::new("c:valAx")
                .child(val_el("c:axId", uint_str(axis_id as u64)))
                .child(XmlElement::new("c:scaling").child(val_el("c:orientation", "minMax")))
                .child(val_el("c:delete", hidden))
                .child(val_el("c:axPos", "b"))
                .child(
                    XmlElement::new("c:numFmt")
                        .attr("formatCode", "General")
                        .attr("sourceLinked", "1"),
                )
                .child(val_el("c:majorTickMark", "out"))
                .child(val_el("c:minorTickMark", "none"))
                .child(val_el("c:tickLblPos", "nextTo"))
                .child(val_el("c:crossAx", uint_str(cross_ax_id as u64)))
                .child(val_el("c:crosses", "autoZero"))
                .child(val_el("c:crossBetween", "midCat"))
        },
        Some(categories) if categories.are_dates() => XmlElement::new("c:dateAx")
            .child(val_el("c:axId", uint_str(axis_id as u64)))
            .child(XmlElement::new("c:scaling").child(val_el("c:orientation", "minMax")))
            .child(val_el("c:delete", hidden))
            .child(val_el("c:axPos", "b"))
            .child(
                XmlElement::new("c:numFmt")
                    .attr("formatCode", categories.number_format())
                    .attr("sourceLinked", "1"),
            )
            .child(val_el("c:majorTickMark", "out"))
            .child(val_el("c:minorTickMark", "none"))
            .child(val_el("c:tickLblPos", "nextTo"))
            .child(val_el("c:crossAx", uint_str(cross_ax_id as u64)))
            .child(val_el("c:auto", "1"))
            .child(val_el("c:lblOffset", "100"))
            .child(val_el("c:baseTimeUnit", "days")),
        Some(_) => XmlElement::new("c:catAx")
            .child(val_el("c:axId", uint_str(axis_id as u64)))
            .child(XmlElement::new("c:scaling").child(val_el("c:orientation", "minMax")))
            .child(val_el("c:delete", hidden))
            .child(val_el("c:axPos", "b"))
            .child(val_el("c:majorTickMark", "out"))
            .child(val_el("c:minorTickMark", "none"))
            .child(val_el("c:tickLblPos", "nextTo"))
            .child(val_el("c:crossAx", uint_str(cross_ax_id as u64)))
            .child(val_el("c:auto", "1"))
            .child(val_el("c:lblAlgn", "ctr"))
            .child(val_el("c:lblOffset", "100"))
            .child(val_el("c:noMultiLvlLbl", "0")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{BubbleChartData, XyChartData};
    use chrono::NaiveDate;

    fn column_chart(series: &[(&str, Vec<Option<f64>>)]) -> Chart {
        let mut data = CategoryChartData::new(Categories::from_strings(["East", "West", "Mid"]));
        for (name, values) in series {
            data.add_series(*name, values.clone());
        }
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::ColumnClustered, data).expect("category data"))
            .expect("axis plot");
        chart
    }

    fn render(chart: &Chart) -> String {
        String::from_utf8(chart.xml_bytes().expect("renders")).expect("utf-8")
    }

    #[test]
    fn empty_chart_rejected() {
        let chart = Chart::new();
        assert!(matches!(
            chart_space_xml(&chart),
            Err(ChartError::EmptyChart)
        ));
    }

    #[test]
    fn column_chart_document_structure() {
        let chart = column_chart(&[("Series 1", vec![Some(19.2), Some(21.4), Some(16.7)])]);
        let xml = render(&chart);
        assert!(xml.starts_with(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><c:chartSpace"#
        ));
        assert!(xml.contains(r#"<c:date1904 val="0"/>"#));
        assert!(xml.contains(r#"<c:roundedCorners val="0"/>"#));
        assert!(xml.contains(r#"<c:barDir val="col"/>"#));
        assert!(xml.contains(r#"<c:grouping val="clustered"/>"#));
        assert!(xml.contains(r#"<c:legendPos val="r"/>"#));
        assert!(xml.contains(r#"<c:dispBlanksAs val="gap"/>"#));
        assert!(xml.contains("<c:pt idx=\"0\"><c:v>19.2</c:v></c:pt>"));
        // Value axis precedes the category axis.
        let val_ax = xml.find("<c:valAx>").expect("value axis present");
        let cat_ax = xml.find("<c:catAx>").expect("category axis present");
        assert!(val_ax < cat_ax);
        assert_eq!(xml.matches("<c:majorGridlines/>").count(), 1);
    }

    #[test]
    fn axis_ids_cross_reference() {
        let chart = column_chart(&[("S", vec![Some(1.0), None, None])]);
        let ids = chart.primary_axis_ids();
        let xml = render(&chart);
        let x_ref = format!(r#"<c:axId val="{}"/>"#, ids.x);
        let y_ref = format!(r#"<c:axId val="{}"/>"#, ids.y);
        // Once in the plot group, once on the opposite axis as crossAx.
        assert_eq!(xml.matches(x_ref.as_str()).count(), 2);
        assert_eq!(xml.matches(y_ref.as_str()).count(), 2);
        assert!(xml.contains(&format!(r#"<c:crossAx val="{}"/>"#, ids.x)));
        assert!(xml.contains(&format!(r#"<c:crossAx val="{}"/>"#, ids.y)));
    }

    #[test]
    fn sparse_values_keep_position_count() {
        let chart = column_chart(&[("S", vec![Some(10.0), None, Some(30.0)])]);
        let xml = render(&chart);
        let val = xml.find("<c:val>").expect("val fragment");
        let val_xml = &xml[val..];
        assert!(val_xml.contains(r#"<c:ptCount val="3"/>"#));
        assert!(val_xml.contains(r#"<c:pt idx="0"><c:v>10.0</c:v></c:pt>"#));
        assert!(!val_xml.contains(r#"<c:pt idx="1">"#));
        assert!(val_xml.contains(r#"<c:pt idx="2"><c:v>30.0</c:v></c:pt>"#));
    }

    #[test]
    fn series_name_escaped() {
        let chart = column_chart(&[("P&L <net>", vec![Some(1.0), Some(2.0), Some(3.0)])]);
        let xml = render(&chart);
        assert!(xml.contains("<c:v>P&amp;L &lt;net&gt;</c:v>"));
    }

    #[test]
    fn stacked_bar_overlap() {
        let mut data = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        data.add_series("S", vec![Some(1.0), Some(2.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::BarStacked, data).expect("category data"))
            .expect("axis plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:barDir val="bar"/>"#));
        assert!(xml.contains(r#"<c:grouping val="stacked"/>"#));
        assert!(xml.contains(r#"<c:overlap val="100"/>"#));

        let clustered = column_chart(&[("S", vec![Some(1.0), None, None])]);
        assert!(!render(&clustered).contains("<c:overlap"));
    }

    #[test]
    fn pie_explosion_and_no_axes() {
        let mut data = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        data.add_series("S", vec![Some(1.0), Some(2.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::PieExploded, data).expect("category data"))
            .expect("pie plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:varyColors val="1"/>"#));
        assert!(xml.contains(r#"<c:explosion val="25"/>"#));
        assert!(!xml.contains("<c:valAx>"));
        assert!(!xml.contains("<c:axId"));
    }

    #[test]
    fn doughnut_modifiers() {
        let mut data = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        data.add_series("S", vec![Some(1.0), Some(2.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::Doughnut, data).expect("category data"))
            .expect("doughnut plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:firstSliceAng val="0"/>"#));
        assert!(xml.contains(r#"<c:holeSize val="50"/>"#));
        assert!(xml.contains(r#"<c:showLeaderLines val="1"/>"#));
        assert!(!xml.contains("<c:explosion"));
    }

    #[test]
    fn line_marker_suppression() {
        let mut data = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        data.add_series("S", vec![Some(1.0), Some(2.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::Line, data).expect("category data"))
            .expect("line plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:marker><c:symbol val="none"/></c:marker>"#));

        let mut data = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        data.add_series("S", vec![Some(1.0), Some(2.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::LineMarkers, data).expect("category data"))
            .expect("line plot");
        assert!(!render(&chart).contains(r#"<c:symbol val="none"/>"#));
    }

    #[test]
    fn radar_style_without_axis_ids() {
        let mut data = CategoryChartData::new(Categories::from_strings(["A", "B", "C"]));
        data.add_series("S", vec![Some(1.0), Some(2.0), Some(3.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::RadarFilled, data).expect("category data"))
            .expect("radar plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:radarStyle val="filled"/>"#));
        assert!(!xml.contains("<c:axId"));
    }

    #[test]
    fn scatter_chart_axes_are_value_axes() {
        let mut data = XyChartData::new();
        data.add_series("S", vec![Some(1.0), Some(2.0)], vec![Some(3.0), Some(4.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::XyScatterSmooth, data).expect("xy data"))
            .expect("scatter plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:scatterStyle val="smoothMarker"/>"#));
        assert!(xml.contains("<c:xVal>"));
        assert!(xml.contains("<c:yVal>"));
        assert_eq!(xml.matches("<c:valAx>").count(), 2);
        assert!(!xml.contains("<c:catAx>"));
        assert!(xml.contains(r#"<c:crossBetween val="midCat"/>"#));
    }

    #[test]
    fn plain_scatter_suppresses_line() {
        let mut data = XyChartData::new();
        data.add_series("S", vec![Some(1.0)], vec![Some(2.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::XyScatter, data).expect("xy data"))
            .expect("scatter plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<a:ln w="47625"><a:noFill/></a:ln>"#));
    }

    #[test]
    fn bubble_chart_modifiers() {
        let mut data = BubbleChartData::new();
        data.add_series(
            "S",
            vec![Some(1.0)],
            vec![Some(2.0)],
            vec![Some(3.0)],
        );
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::BubbleThreeDEffect, data).expect("bubble data"))
            .expect("bubble plot");
        let xml = render(&chart);
        assert!(xml.contains("<c:bubbleSize>"));
        assert!(xml.contains(r#"<c:bubble3D val="1"/>"#));
        assert!(xml.contains(r#"<c:bubbleScale val="100"/>"#));
        assert!(xml.contains(r#"<c:showNegBubbles val="0"/>"#));
        assert!(xml.contains(r#"<c:invertIfNegative val="0"/>"#));
    }

    #[test]
    fn date_categories_select_date_axis() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2016, 12, 27).expect("valid date"),
            NaiveDate::from_ymd_opt(2016, 12, 28).expect("valid date"),
        ];
        let mut data = CategoryChartData::new(Categories::from_dates(dates));
        data.add_series("S", vec![Some(1.0), Some(2.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::Line, data).expect("category data"))
            .expect("line plot");
        let xml = render(&chart);
        assert!(xml.contains("<c:dateAx>"));
        assert!(xml.contains(r#"<c:numFmt formatCode="yyyy\-mm\-dd" sourceLinked="1"/>"#));
        assert!(xml.contains(r#"<c:baseTimeUnit val="days"/>"#));
        // 2016-12-27 in the 1900 date system.
        assert!(xml.contains("<c:v>42731</c:v>"));
    }

    #[test]
    fn date_serials_use_1904_epoch_when_set() {
        let dates = vec![NaiveDate::from_ymd_opt(2016, 12, 27).expect("valid date")];
        let mut data = CategoryChartData::new(Categories::from_dates(dates));
        data.add_series("S", vec![Some(1.0)]);
        let mut chart = Chart::new();
        chart.date_1904 = true;
        chart
            .add_plot(Plot::new(ChartType::Line, data).expect("category data"))
            .expect("line plot");
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:date1904 val="1"/>"#));
        assert!(xml.contains("<c:v>41269</c:v>"));
    }

    #[test]
    fn multi_level_categories_cache() {
        let cats = Categories::multi_level(vec![
            vec!["Q1", "Jan"],
            vec!["Q1", "Feb"],
            vec!["Q2", "Mar"],
        ])
        .expect("even depth");
        let mut data = CategoryChartData::new(cats);
        data.add_series("S", vec![Some(1.0), Some(2.0), Some(3.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::ColumnClustered, data).expect("category data"))
            .expect("column plot");
        let xml = render(&chart);
        let cache = xml.find("<c:multiLvlStrCache>").expect("cache present");
        let cache_xml = &xml[cache..];
        assert!(cache_xml.starts_with(r#"<c:multiLvlStrCache><c:ptCount val="3"/>"#));
        assert_eq!(xml.matches("<c:lvl>").count(), 2);
        // The most significant level lists run starts only.
        assert!(xml.contains(r#"<c:lvl><c:pt idx="0"><c:v>Q1</c:v></c:pt><c:pt idx="2"><c:v>Q2</c:v></c:pt></c:lvl>"#));
    }

    #[test]
    fn secondary_axes_emitted_after_primary() {
        let mut data = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        data.add_series("Columns", vec![Some(1.0), Some(2.0)]);
        let mut line_data = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        line_data.add_series("Line", vec![Some(3.0), Some(4.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::ColumnClustered, data).expect("category data"))
            .expect("column plot");
        chart
            .add_plot(
                Plot::new(ChartType::Line, line_data)
                    .expect("category data")
                    .on_secondary_axis(),
            )
            .expect("line plot");
        let xml = render(&chart);
        assert_eq!(xml.matches("<c:valAx>").count(), 2);
        assert_eq!(xml.matches("<c:catAx>").count(), 2);
        assert!(xml.contains(r#"<c:crosses val="autoZero"/>"#));
        assert!(xml.contains(r#"<c:crosses val="max"/>"#));
        assert!(xml.contains(r#"<c:axPos val="r"/>"#));
        // The secondary category axis is hidden.
        assert!(xml.contains(r#"<c:delete val="1"/>"#));
        assert_eq!(xml.matches("<c:majorGridlines/>").count(), 1);
    }

    #[test]
    fn plots_render_in_insertion_order() {
        let mut bars = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        bars.add_series("Bars", vec![Some(1.0), Some(2.0)]);
        let mut line = CategoryChartData::new(Categories::from_strings(["A", "B"]));
        line.add_series("Line", vec![Some(3.0), Some(4.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::ColumnClustered, bars).expect("category data"))
            .expect("column plot");
        chart
            .add_plot(Plot::new(ChartType::Line, line).expect("category data"))
            .expect("line plot");
        let xml = render(&chart);
        let bar = xml.find("<c:barChart>").expect("bar group");
        let line = xml.find("<c:lineChart>").expect("line group");
        assert!(bar < line);
    }

    #[test]
    fn every_chart_type_renders() {
        for chart_type in ChartType::ALL {
            let data: ChartData = match chart_type.data_shape() {
                DataShape::Category => {
                    let mut data =
                        CategoryChartData::new(Categories::from_strings(["A", "B"]));
                    data.add_series("S", vec![Some(1.0), Some(2.0)]);
                    data.into()
                },
                DataShape::Xy => {
                    let mut data = XyChartData::new();
                    data.add_series("S", vec![Some(1.0)], vec![Some(2.0)]);
                    data.into()
                },
                DataShape::Bubble => {
                    let mut data = BubbleChartData::new();
                    data.add_series("S", vec![Some(1.0)], vec![Some(2.0)], vec![Some(3.0)]);
                    data.into()
                },
            };
            let mut chart = Chart::new();
            chart
                .add_plot(Plot::new(chart_type, data).expect("shape matches"))
                .expect("plot accepted");
            let xml = render(&chart);
            assert!(
                xml.contains(chart_type.family().xml_element_name()),
                "missing group element for {chart_type:?}"
            );
        }
    }
}
