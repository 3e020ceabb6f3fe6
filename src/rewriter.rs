//! In-place series data rewriting for existing charts.
//!
//! Replaces the data of a chart that already exists in a document — name,
//! category, and value fragments of every `c:ser` element — while leaving
//! all other series-level formatting (fills, lines, markers, data labels)
//! exactly as the user left it. When the new data has more series than the
//! chart, the last series element is deep-cloned so the additions inherit
//! its formatting; when it has fewer, trailing series elements are removed
//! along with any chart group left empty.
//!
//! The rewriter borrows the chart-space tree from the owning document layer
//! for the duration of one call and leaves it fully consistent on every
//! return path: all validation happens before the first mutation.

use crate::data::ChartData;
use crate::error::{ChartError, Result};
use crate::types::{ChartType, DataShape};
use crate::writer::{BubbleSeriesXml, CategorySeriesXml, XySeriesXml, uint_str};
use crate::xml::tree::{XmlElement, XmlNode};

/// Plot-group element names a `c:plotArea` may contain. Recognizing the
/// full vocabulary lets the rewriter walk charts this crate never wrote.
const CHART_GROUP_NAMES: &[&str] = &[
    "c:area3DChart",
    "c:areaChart",
    "c:bar3DChart",
    "c:barChart",
    "c:bubbleChart",
    "c:doughnutChart",
    "c:line3DChart",
    "c:lineChart",
    "c:ofPieChart",
    "c:pie3DChart",
    "c:pieChart",
    "c:radarChart",
    "c:scatterChart",
    "c:stockChart",
    "c:surface3DChart",
    "c:surfaceChart",
];

/// Schema order of `c:ser` children, merged across the per-family series
/// types. New data fragments are spliced in at the position this table
/// dictates so the patched element stays schema-valid.
const SER_CHILD_ORDER: &[&str] = &[
    "c:idx",
    "c:order",
    "c:tx",
    "c:spPr",
    "c:explosion",
    "c:invertIfNegative",
    "c:pictureOptions",
    "c:marker",
    "c:dPt",
    "c:dLbls",
    "c:trendline",
    "c:errBars",
    "c:cat",
    "c:val",
    "c:xVal",
    "c:yVal",
    "c:shape",
    "c:smooth",
    "c:bubbleSize",
    "c:bubble3D",
    "c:extLst",
];

fn is_chart_group(name: &str) -> bool {
    CHART_GROUP_NAMES.contains(&name)
}

fn child_rank(name: &str) -> usize {
    SER_CHILD_ORDER
        .iter()
        .position(|candidate| *candidate == name)
        .unwrap_or(usize::MAX)
}

/// Series rewriter family, selected by chart data shape.
///
/// Every chart type maps to exactly one family; the sub-variant (stacked,
/// exploded, smoothed, ...) is irrelevant to data replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesRewriter {
    /// Rewrites `c:tx`/`c:cat`/`c:val`
    Category,
    /// Rewrites `c:tx`/`c:xVal`/`c:yVal`
    Xy,
    /// Rewrites `c:tx`/`c:xVal`/`c:yVal`/`c:bubbleSize`
    Bubble,
}

impl SeriesRewriter {
    /// Select the rewriter family for `chart_type`.
    #[inline]
    pub const fn for_chart_type(chart_type: ChartType) -> Self {
        match chart_type.data_shape() {
            DataShape::Category => Self::Category,
            DataShape::Xy => Self::Xy,
            DataShape::Bubble => Self::Bubble,
        }
    }

    /// The data shape this family rewrites.
    #[inline]
    pub const fn data_shape(self) -> DataShape {
        match self {
            Self::Category => DataShape::Category,
            Self::Xy => DataShape::Xy,
            Self::Bubble => DataShape::Bubble,
        }
    }

    /// Rewrite the series under `chart_space` from `data`.
    ///
    /// Adjusts the series count (cloning from the last series, or trimming
    /// from the end together with emptied chart groups), then replaces each
    /// series' data fragments in chart-group order. Fails without touching
    /// the tree if the replacement data's shape does not match this family
    /// or the chart's existing plot groups.
    pub fn replace_series_data(self, chart_space: &mut XmlElement, data: &ChartData) -> Result<()> {
        if data.data_shape() != self.data_shape() {
            return Err(ChartError::StructureMismatch {
                expected: self.data_shape(),
                found: data.data_shape(),
            });
        }

        let date_1904 = match chart_space.find("c:date1904") {
            Some(el) => el
                .attr_value("val")
                .is_none_or(|v| v == "1" || v == "true"),
            None => false,
        };

        let plot_area = chart_space
            .find_mut("c:chart")
            .ok_or(ChartError::MissingElement("c:chart"))?
            .find_mut("c:plotArea")
            .ok_or(ChartError::MissingElement("c:plotArea"))?;

        let found = plot_area_shape(plot_area)?;
        if found != self.data_shape() {
            return Err(ChartError::StructureMismatch {
                expected: self.data_shape(),
                found,
            });
        }

        let existing = ser_positions(plot_area).len();
        if existing == 0 && data.series_count() > 0 {
            return Err(ChartError::MissingElement("c:ser"));
        }

        // Validation complete; everything below is infallible.
        if data.series_count() > existing {
            add_cloned_sers(plot_area, data.series_count() - existing);
        } else if data.series_count() < existing {
            trim_sers(plot_area, existing - data.series_count());
        }

        match data {
            ChartData::Category(data) => {
                let mut series = data.series().iter();
                for_each_ser_mut(plot_area, |ser| {
                    if let Some(series) = series.next() {
                        let writer = CategorySeriesXml::new(series, &data.categories, date_1904);
                        ser.remove_children("c:tx");
                        ser.remove_children("c:cat");
                        ser.remove_children("c:val");
                        insert_in_order(ser, writer.tx());
                        insert_in_order(ser, writer.cat());
                        insert_in_order(ser, writer.val());
                    }
                });
            },
            ChartData::Xy(data) => {
                let mut series = data.series().iter();
                for_each_ser_mut(plot_area, |ser| {
                    if let Some(series) = series.next() {
                        let writer = XySeriesXml::new(series);
                        ser.remove_children("c:tx");
                        ser.remove_children("c:xVal");
                        ser.remove_children("c:yVal");
                        insert_in_order(ser, writer.tx());
                        insert_in_order(ser, writer.x_val());
                        insert_in_order(ser, writer.y_val());
                    }
                });
            },
            ChartData::Bubble(data) => {
                let mut series = data.series().iter();
                for_each_ser_mut(plot_area, |ser| {
                    if let Some(series) = series.next() {
                        let writer = BubbleSeriesXml::new(series);
                        ser.remove_children("c:tx");
                        ser.remove_children("c:xVal");
                        ser.remove_children("c:yVal");
                        ser.remove_children("c:bubbleSize");
                        insert_in_order(ser, writer.tx());
                        insert_in_order(ser, writer.x_val());
                        insert_in_order(ser, writer.y_val());
                        insert_in_order(ser, writer.bubble_size());
                    }
                });
            },
        }

        Ok(())
    }
}

/// Rewrite the series data of an existing chart document.
///
/// Convenience wrapper over [`SeriesRewriter::for_chart_type`] followed by
/// [`SeriesRewriter::replace_series_data`].
pub fn replace_series_data(
    chart_type: ChartType,
    chart_space: &mut XmlElement,
    data: &ChartData,
) -> Result<()> {
    SeriesRewriter::for_chart_type(chart_type).replace_series_data(chart_space, data)
}

/// Data shape of the first recognized plot group under `plot_area`.
fn plot_area_shape(plot_area: &XmlElement) -> Result<DataShape> {
    for child in plot_area.elements() {
        match child.name.as_str() {
            "c:scatterChart" => return Ok(DataShape::Xy),
            "c:bubbleChart" => return Ok(DataShape::Bubble),
            name if is_chart_group(name) => return Ok(DataShape::Category),
            _ => {},
        }
    }
    Err(ChartError::MissingElement("chart group"))
}

/// `(plot-area child index, group child index)` of every `c:ser`, in
/// chart-group plus document order.
fn ser_positions(plot_area: &XmlElement) -> Vec<(usize, usize)> {
    let mut positions = Vec::new();
    for (group_idx, node) in plot_area.children.iter().enumerate() {
        if let XmlNode::Element(group) = node
            && is_chart_group(&group.name)
        {
            for (child_idx, child) in group.children.iter().enumerate() {
                if let XmlNode::Element(el) = child
                    && el.name == "c:ser"
                {
                    positions.push((group_idx, child_idx));
                }
            }
        }
    }
    positions
}

fn for_each_ser_mut(plot_area: &mut XmlElement, mut f: impl FnMut(&mut XmlElement)) {
    for node in &mut plot_area.children {
        if let XmlNode::Element(group) = node
            && is_chart_group(&group.name)
        {
            for child in &mut group.children {
                if let XmlNode::Element(el) = child
                    && el.name == "c:ser"
                {
                    f(el);
                }
            }
        }
    }
}

/// Next free `idx`/`order` values across every series under `plot_area`.
fn next_idx_order(plot_area: &XmlElement) -> (u32, u32) {
    let mut next_idx = 0;
    let mut next_order = 0;
    for node in &plot_area.children {
        if let XmlNode::Element(group) = node
            && is_chart_group(&group.name)
        {
            for ser in group.elements().filter(|el| el.name == "c:ser") {
                if let Some(idx) = val_attr_u32(ser, "c:idx") {
                    next_idx = next_idx.max(idx + 1);
                }
                if let Some(order) = val_attr_u32(ser, "c:order") {
                    next_order = next_order.max(order + 1);
                }
            }
        }
    }
    (next_idx, next_order)
}

fn val_attr_u32(ser: &XmlElement, child_name: &str) -> Option<u32> {
    ser.find(child_name)?.attr_value("val")?.parse().ok()
}

fn set_val_child(ser: &mut XmlElement, child_name: &'static str, value: u32) {
    match ser.find_mut(child_name) {
        Some(el) => el.set_attr("val", uint_str(value as u64)),
        None => insert_in_order(
            ser,
            XmlElement::new(child_name).attr("val", uint_str(value as u64)),
        ),
    }
}

/// Clone the last `c:ser` element `count` times, inserting each clone after
/// its source with `idx`/`order` bumped past the running maximum. Cloning
/// copies every child of the source, which is the point: the new series
/// inherit the last series' formatting.
fn add_cloned_sers(plot_area: &mut XmlElement, count: usize) {
    let (mut next_idx, mut next_order) = next_idx_order(plot_area);
    let Some(&(group_idx, child_idx)) = ser_positions(plot_area).last() else {
        return;
    };
    let Some(XmlNode::Element(group)) = plot_area.children.get_mut(group_idx) else {
        return;
    };
    let mut source_idx = child_idx;
    for _ in 0..count {
        let Some(XmlNode::Element(source)) = group.children.get(source_idx) else {
            return;
        };
        let mut clone = source.clone();
        set_val_child(&mut clone, "c:idx", next_idx);
        set_val_child(&mut clone, "c:order", next_order);
        group.children.insert(source_idx + 1, XmlNode::Element(clone));
        source_idx += 1;
        next_idx += 1;
        next_order += 1;
    }
}

/// Remove the last `count` series elements, then any chart group left with
/// no series at all.
fn trim_sers(plot_area: &mut XmlElement, count: usize) {
    let positions = ser_positions(plot_area);
    for &(group_idx, child_idx) in positions.iter().rev().take(count) {
        if let Some(XmlNode::Element(group)) = plot_area.children.get_mut(group_idx) {
            group.children.remove(child_idx);
        }
    }
    plot_area.children.retain(|node| match node {
        XmlNode::Element(el) if is_chart_group(&el.name) => {
            el.elements().any(|child| child.name == "c:ser")
        },
        _ => true,
    });
}

/// Insert `element` among `ser`'s children at the position the schema
/// dictates for its name: before the first sibling that sorts later.
fn insert_in_order(ser: &mut XmlElement, element: XmlElement) {
    let rank = child_rank(&element.name);
    let position = ser
        .children
        .iter()
        .position(|node| match node {
            XmlNode::Element(el) => child_rank(&el.name) > rank,
            XmlNode::Text(_) => false,
        })
        .unwrap_or(ser.children.len());
    ser.children.insert(position, XmlNode::Element(element));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{Chart, Plot};
    use crate::data::{BubbleChartData, Categories, CategoryChartData, XyChartData};

    fn category_data(series: &[(&str, Vec<Option<f64>>)]) -> CategoryChartData {
        let mut data = CategoryChartData::new(Categories::from_strings(["East", "West"]));
        for (name, values) in series {
            data.add_series(*name, values.clone());
        }
        data
    }

    fn rendered_tree(chart: &Chart) -> XmlElement {
        let bytes = chart.xml_bytes().expect("renders");
        let text = String::from_utf8(bytes).expect("utf-8");
        // Skip the XML declaration.
        let start = text.find("<c:chartSpace").expect("root present");
        XmlElement::parse_str(&text[start..]).expect("parses")
    }

    fn column_chart_tree(series: &[(&str, Vec<Option<f64>>)]) -> XmlElement {
        let mut chart = Chart::new();
        chart
            .add_plot(
                Plot::new(ChartType::ColumnClustered, category_data(series))
                    .expect("category data"),
            )
            .expect("column plot");
        rendered_tree(&chart)
    }

    fn sers(chart_space: &XmlElement) -> Vec<&XmlElement> {
        let plot_area = chart_space
            .find("c:chart")
            .and_then(|c| c.find("c:plotArea"))
            .expect("plot area");
        let mut out = Vec::new();
        for group in plot_area.elements().filter(|el| is_chart_group(&el.name)) {
            out.extend(group.elements().filter(|el| el.name == "c:ser"));
        }
        out
    }

    fn idx_of(ser: &XmlElement) -> u32 {
        val_attr_u32(ser, "c:idx").expect("idx present")
    }

    #[test]
    fn family_selection_is_total_and_shape_driven() {
        for chart_type in ChartType::ALL {
            let rewriter = SeriesRewriter::for_chart_type(chart_type);
            assert_eq!(rewriter.data_shape(), chart_type.data_shape());
        }
        assert_eq!(
            SeriesRewriter::for_chart_type(ChartType::ColumnStacked),
            SeriesRewriter::Category
        );
        assert_eq!(
            SeriesRewriter::for_chart_type(ChartType::XyScatterLines),
            SeriesRewriter::Xy
        );
        assert_eq!(
            SeriesRewriter::for_chart_type(ChartType::BubbleThreeDEffect),
            SeriesRewriter::Bubble
        );
    }

    #[test]
    fn rewrites_values_in_place() {
        let mut tree = column_chart_tree(&[("Old", vec![Some(1.0), Some(2.0)])]);
        let data = category_data(&[("New", vec![Some(10.0), Some(20.0)])]);
        replace_series_data(ChartType::ColumnClustered, &mut tree, &data.into())
            .expect("reconciles");
        let xml = tree.to_xml();
        assert!(xml.contains("<c:v>New</c:v>"));
        assert!(!xml.contains("<c:v>Old</c:v>"));
        assert!(xml.contains("<c:v>10.0</c:v>"));
        assert!(!xml.contains("<c:v>1.0</c:v>"));
        assert_eq!(sers(&tree).len(), 1);
    }

    #[test]
    fn growth_clones_formatting_from_last_series() {
        let mut tree = column_chart_tree(&[
            ("A", vec![Some(1.0), Some(2.0)]),
            ("B", vec![Some(3.0), Some(4.0)]),
        ]);
        // Tag each existing series with distinct formatting the writer does
        // not own.
        {
            let plot_area = tree
                .find_mut("c:chart")
                .and_then(|c| c.find_mut("c:plotArea"))
                .expect("plot area");
            let mut marker = ["fmtA", "fmtB"].into_iter();
            for_each_ser_mut(plot_area, |ser| {
                let tag = marker.next().expect("two series");
                insert_in_order(
                    ser,
                    XmlElement::new("c:spPr").child(XmlElement::new("a:solidFill").attr("id", tag)),
                );
            });
        }

        let data = category_data(&[
            ("A", vec![Some(1.0), Some(2.0)]),
            ("B", vec![Some(3.0), Some(4.0)]),
            ("C", vec![Some(5.0), Some(6.0)]),
            ("D", vec![Some(7.0), Some(8.0)]),
        ]);
        replace_series_data(ChartType::ColumnClustered, &mut tree, &data.into())
            .expect("reconciles");

        let series = sers(&tree);
        assert_eq!(series.len(), 4);
        assert_eq!(
            series.iter().map(|s| idx_of(s)).collect::<Vec<_>>(),
            vec![0, 1, 2, 3]
        );
        let fills: Vec<_> = series
            .iter()
            .map(|ser| {
                ser.find("c:spPr")
                    .and_then(|sp| sp.find("a:solidFill"))
                    .and_then(|fill| fill.attr_value("id"))
                    .expect("formatting retained")
            })
            .collect();
        // First two keep their own formatting; clones inherit the last.
        assert_eq!(fills, vec!["fmtA", "fmtB", "fmtB", "fmtB"]);
        let xml = tree.to_xml();
        assert!(xml.contains("<c:v>C</c:v>"));
        assert!(xml.contains("<c:v>7.0</c:v>"));
    }

    #[test]
    fn shrink_removes_trailing_series_and_empty_groups() {
        // Column plot with two series, line plot with one, sharing a plot
        // area.
        let mut chart = Chart::new();
        chart
            .add_plot(
                Plot::new(
                    ChartType::ColumnClustered,
                    category_data(&[
                        ("A", vec![Some(1.0), Some(2.0)]),
                        ("B", vec![Some(3.0), Some(4.0)]),
                    ]),
                )
                .expect("category data"),
            )
            .expect("column plot");
        chart
            .add_plot(
                Plot::new(
                    ChartType::Line,
                    category_data(&[("C", vec![Some(5.0), Some(6.0)])]),
                )
                .expect("category data"),
            )
            .expect("line plot");
        let mut tree = rendered_tree(&chart);
        assert_eq!(sers(&tree).len(), 3);

        let data = category_data(&[
            ("A", vec![Some(1.0), Some(2.0)]),
            ("B", vec![Some(3.0), Some(4.0)]),
        ]);
        replace_series_data(ChartType::ColumnClustered, &mut tree, &data.into())
            .expect("reconciles");

        assert_eq!(sers(&tree).len(), 2);
        let plot_area = tree
            .find("c:chart")
            .and_then(|c| c.find("c:plotArea"))
            .expect("plot area");
        assert!(plot_area.find("c:barChart").is_some());
        // The line group lost its only series and was removed entirely.
        assert!(plot_area.find("c:lineChart").is_none());
    }

    #[test]
    fn shape_mismatch_leaves_tree_untouched() {
        let mut tree = column_chart_tree(&[("A", vec![Some(1.0), Some(2.0)])]);
        let before = tree.clone();
        let mut xy = XyChartData::new();
        xy.add_series("S", vec![Some(1.0)], vec![Some(2.0)]);
        let result = replace_series_data(ChartType::XyScatter, &mut tree, &xy.into());
        assert!(matches!(
            result,
            Err(ChartError::StructureMismatch {
                expected: DataShape::Xy,
                found: DataShape::Category,
            })
        ));
        assert_eq!(tree, before);
    }

    #[test]
    fn rewriter_rejects_data_of_other_shape() {
        let mut tree = column_chart_tree(&[("A", vec![Some(1.0), Some(2.0)])]);
        let data = category_data(&[("A", vec![Some(1.0), Some(2.0)])]);
        // Category data handed to the bubble family.
        let result =
            SeriesRewriter::Bubble.replace_series_data(&mut tree, &ChartData::Category(data));
        assert!(matches!(result, Err(ChartError::StructureMismatch { .. })));
    }

    #[test]
    fn xy_fragments_replaced() {
        let mut data = XyChartData::new();
        data.add_series("Old", vec![Some(1.0), Some(2.0)], vec![Some(3.0), Some(4.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::XyScatter, data).expect("xy data"))
            .expect("scatter plot");
        let mut tree = rendered_tree(&chart);

        let mut new_data = XyChartData::new();
        new_data.add_series("New", vec![Some(9.0), None], vec![Some(8.0), Some(7.0)]);
        replace_series_data(ChartType::XyScatter, &mut tree, &new_data.into())
            .expect("reconciles");
        let xml = tree.to_xml();
        assert!(xml.contains("<c:v>New</c:v>"));
        assert!(xml.contains("<c:v>9.0</c:v>"));
        assert!(!xml.contains("<c:v>1.0</c:v>"));
        // The scatter series' own smooth flag survives the rewrite.
        assert!(xml.contains(r#"<c:smooth val="0"/>"#));
    }

    #[test]
    fn bubble_fragments_replaced() {
        let mut data = BubbleChartData::new();
        data.add_series("Old", vec![Some(1.0)], vec![Some(2.0)], vec![Some(3.0)]);
        let mut chart = Chart::new();
        chart
            .add_plot(Plot::new(ChartType::Bubble, data).expect("bubble data"))
            .expect("bubble plot");
        let mut tree = rendered_tree(&chart);

        let mut new_data = BubbleChartData::new();
        new_data.add_series("New", vec![Some(4.0)], vec![Some(5.0)], vec![Some(6.0)]);
        replace_series_data(ChartType::Bubble, &mut tree, &new_data.into())
            .expect("reconciles");
        let xml = tree.to_xml();
        assert!(xml.contains("<c:bubbleSize>"));
        assert!(xml.contains("<c:v>6.0</c:v>"));
        assert!(!xml.contains("<c:v>3.0</c:v>"));
        // bubble3D follows bubbleSize in schema order after the rewrite.
        let size = xml.find("<c:bubbleSize>").expect("bubbleSize present");
        let flag = xml.find("<c:bubble3D").expect("bubble3D present");
        assert!(size < flag);
    }

    #[test]
    fn fragments_inserted_at_schema_positions() {
        // A sparse hand-written series: only idx, order, and trailing smooth.
        let xml = concat!(
            r#"<c:chartSpace><c:chart><c:plotArea><c:lineChart>"#,
            r#"<c:ser><c:idx val="0"/><c:order val="0"/><c:smooth val="1"/></c:ser>"#,
            r#"</c:lineChart></c:plotArea></c:chart></c:chartSpace>"#,
        );
        let mut tree = XmlElement::parse_str(xml).expect("well-formed");
        let data = category_data(&[("S", vec![Some(1.0), Some(2.0)])]);
        replace_series_data(ChartType::Line, &mut tree, &data.into()).expect("reconciles");
        let out = tree.to_xml();
        let order = out.find("<c:order").expect("order");
        let tx = out.find("<c:tx>").expect("tx");
        let cat = out.find("<c:cat>").expect("cat");
        let val = out.find("<c:val>").expect("val");
        let smooth = out.find("<c:smooth").expect("smooth");
        assert!(order < tx && tx < cat && cat < val && val < smooth);
    }

    #[test]
    fn missing_plot_area_reported() {
        let mut tree = XmlElement::parse_str("<c:chartSpace><c:chart/></c:chartSpace>")
            .expect("well-formed");
        let data = category_data(&[("S", vec![Some(1.0)])]);
        let result = replace_series_data(ChartType::Line, &mut tree, &data.into());
        assert!(matches!(
            result,
            Err(ChartError::MissingElement("c:plotArea"))
        ));
    }

    #[test]
    fn date_1904_flag_respected_when_rewriting() {
        let date = chrono::NaiveDate::from_ymd_opt(2016, 12, 27).expect("valid date");
        let xml = concat!(
            r#"<c:chartSpace><c:date1904 val="1"/><c:chart><c:plotArea><c:lineChart>"#,
            r#"<c:ser><c:idx val="0"/><c:order val="0"/></c:ser>"#,
            r#"</c:lineChart></c:plotArea></c:chart></c:chartSpace>"#,
        );
        let mut tree = XmlElement::parse_str(xml).expect("well-formed");
        let mut data = CategoryChartData::new(Categories::from_dates(vec![date]));
        data.add_series("S", vec![Some(1.0)]);
        replace_series_data(ChartType::Line, &mut tree, &data.into()).expect("reconciles");
        // 1904-epoch serial, not the 1900-epoch 42731.
        assert!(tree.to_xml().contains("<c:v>41269</c:v>"));
    }
}
