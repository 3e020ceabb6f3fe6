//! Chart data model.
//!
//! This module contains the caller-facing description of what a chart plots:
//! category sequences (string, numeric, date, or multi-level), named series
//! with sparse numeric values, and the per-shape containers handed to plots.
//! Series carry the worksheet range references the emitted XML points at;
//! when the caller does not supply them, defaults are synthesized against
//! the conventional `Sheet1` layout (categories in the leading columns, one
//! or more value columns per series, data rows starting at row 2).

use crate::error::{ChartError, Result};
use crate::types::DataShape;
use chrono::NaiveDate;

/// Worksheet name used by synthesized range references.
const SHEET_NAME: &str = "Sheet1";

/// Default number format for date categories.
pub const DEFAULT_DATE_NUMBER_FORMAT: &str = "yyyy\\-mm\\-dd";

/// Default number format for numeric values.
pub const GENERAL_NUMBER_FORMAT: &str = "General";

/// One category label supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryLabel {
    /// Plain string label
    Str(String),
    /// Numeric label
    Number(f64),
    /// Date label
    Date(NaiveDate),
}

impl From<&str> for CategoryLabel {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for CategoryLabel {
    #[inline]
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<f64> for CategoryLabel {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<NaiveDate> for CategoryLabel {
    #[inline]
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// An ordered, kind-homogeneous sequence of category labels.
#[derive(Debug, Clone, PartialEq)]
pub enum Categories {
    /// Flat string labels
    Strings(Vec<String>),
    /// Numeric labels with a shared number format
    Numeric {
        /// Label values
        values: Vec<f64>,
        /// Number format code applied to the cached labels
        number_format: String,
    },
    /// Date labels with a shared number format
    Dates {
        /// Label values
        values: Vec<NaiveDate>,
        /// Number format code applied to the cached labels
        number_format: String,
    },
    /// Nested labels for a multi-level category axis.
    ///
    /// Each tuple holds one leaf category's labels from the most significant
    /// level down to the leaf; every tuple has the same `depth`.
    MultiLevel {
        /// One label tuple per leaf category
        tuples: Vec<Vec<String>>,
        /// Number of levels in every tuple (at least 2)
        depth: usize,
    },
}

impl Categories {
    /// Create flat string categories.
    #[inline]
    pub fn from_strings<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Strings(labels.into_iter().map(Into::into).collect())
    }

    /// Create numeric categories with the `General` number format.
    #[inline]
    pub fn from_numbers(values: Vec<f64>) -> Self {
        Self::Numeric {
            values,
            number_format: GENERAL_NUMBER_FORMAT.to_string(),
        }
    }

    /// Create date categories with the default date number format.
    #[inline]
    pub fn from_dates(values: Vec<NaiveDate>) -> Self {
        Self::Dates {
            values,
            number_format: DEFAULT_DATE_NUMBER_FORMAT.to_string(),
        }
    }

    /// Create categories from a sequence of labels of one kind.
    ///
    /// All labels must be the same kind; mixing strings with numbers or
    /// dates is a caller error.
    pub fn from_labels(labels: Vec<CategoryLabel>) -> Result<Self> {
        let Some(first) = labels.first() else {
            return Ok(Self::Strings(Vec::new()));
        };
        match first {
            CategoryLabel::Str(_) => {
                let mut values = Vec::with_capacity(labels.len());
                for label in labels {
                    match label {
                        CategoryLabel::Str(s) => values.push(s),
                        _ => return Err(ChartError::MixedCategoryKinds),
                    }
                }
                Ok(Self::Strings(values))
            },
            CategoryLabel::Number(_) => {
                let mut values = Vec::with_capacity(labels.len());
                for label in labels {
                    match label {
                        CategoryLabel::Number(n) => values.push(n),
                        _ => return Err(ChartError::MixedCategoryKinds),
                    }
                }
                Ok(Self::from_numbers(values))
            },
            CategoryLabel::Date(_) => {
                let mut values = Vec::with_capacity(labels.len());
                for label in labels {
                    match label {
                        CategoryLabel::Date(d) => values.push(d),
                        _ => return Err(ChartError::MixedCategoryKinds),
                    }
                }
                Ok(Self::from_dates(values))
            },
        }
    }

    /// Create multi-level categories from equal-depth label tuples.
    ///
    /// Tuples list labels from the most significant level to the leaf.
    /// Depth-1 tuples collapse to flat string categories.
    pub fn multi_level<I, T, S>(tuples: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tuples: Vec<Vec<String>> = tuples
            .into_iter()
            .map(|t| t.into_iter().map(Into::into).collect())
            .collect();
        let Some(first) = tuples.first() else {
            return Ok(Self::Strings(Vec::new()));
        };
        let depth = first.len();
        if depth == 0 || tuples.iter().any(|t| t.len() != depth) {
            return Err(ChartError::UnevenCategoryDepth);
        }
        if depth == 1 {
            return Ok(Self::Strings(
                tuples.into_iter().map(|mut t| t.remove(0)).collect(),
            ));
        }
        Ok(Self::MultiLevel { tuples, depth })
    }

    /// Replace the number format of numeric or date categories.
    ///
    /// Has no effect on string or multi-level categories, which carry no
    /// number format.
    pub fn with_number_format(mut self, format: impl Into<String>) -> Self {
        match &mut self {
            Self::Numeric { number_format, .. } | Self::Dates { number_format, .. } => {
                *number_format = format.into();
            },
            _ => {},
        }
        self
    }

    /// Number of leaf categories.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Strings(values) => values.len(),
            Self::Numeric { values, .. } => values.len(),
            Self::Dates { values, .. } => values.len(),
            Self::MultiLevel { tuples, .. } => tuples.len(),
        }
    }

    /// Number of levels (1 for every flat kind).
    #[inline]
    pub fn depth(&self) -> usize {
        match self {
            Self::MultiLevel { depth, .. } => *depth,
            _ => 1,
        }
    }

    /// Returns true if the labels are dates.
    #[inline]
    pub fn are_dates(&self) -> bool {
        matches!(self, Self::Dates { .. })
    }

    /// Returns true if the labels are cached as numbers (numeric or date).
    #[inline]
    pub fn are_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. } | Self::Dates { .. })
    }

    /// Number format code for the cached labels.
    #[inline]
    pub fn number_format(&self) -> &str {
        match self {
            Self::Numeric { number_format, .. } | Self::Dates { number_format, .. } => {
                number_format
            },
            _ => GENERAL_NUMBER_FORMAT,
        }
    }

    /// Per-level `(leaf index, label)` runs for multi-level categories,
    /// leaf level first, most significant level last.
    ///
    /// Upper levels list a label only at the leaf position where its run
    /// starts; the leaf level lists every position. Empty for flat kinds.
    pub fn levels(&self) -> Vec<Vec<(usize, &str)>> {
        let Self::MultiLevel { tuples, depth } = self else {
            return Vec::new();
        };
        let mut levels = Vec::with_capacity(*depth);
        for level in (0..*depth).rev() {
            let mut entries = Vec::new();
            for (idx, tuple) in tuples.iter().enumerate() {
                let leaf_level = level == *depth - 1;
                let run_start = idx == 0 || tuple[level] != tuples[idx - 1][level];
                if leaf_level || run_start {
                    entries.push((idx, tuple[level].as_str()));
                }
            }
            levels.push(entries);
        }
        levels
    }
}

/// Convert a date to its Excel serial day number.
///
/// The 1900 date system counts from 1899-12-31 and reproduces Excel's
/// phantom 1900-02-29 (serials past 59 are shifted by one); the 1904 system
/// counts from 1904-01-01.
pub fn excel_date_number(date: NaiveDate, date_1904: bool) -> i64 {
    let epoch = if date_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 31)
    }
    .expect("epoch date is valid");
    let mut days = (date - epoch).num_days();
    if !date_1904 && days > 59 {
        days += 1;
    }
    days
}

/// Convert a 0-based column index to its Excel letter name
/// (0=A, 1=B, ..., 25=Z, 26=AA).
pub(crate) fn column_letter(col: usize) -> String {
    let mut result = String::new();
    let mut n = col;
    loop {
        let remainder = n % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    result
}

fn cell_ref(col: usize, row: usize) -> String {
    format!("${}${}", column_letter(col), row)
}

fn name_ref(col: usize) -> String {
    format!("{}!{}", SHEET_NAME, cell_ref(col, 1))
}

fn values_ref(col: usize, count: usize) -> String {
    format!(
        "{}!{}:{}",
        SHEET_NAME,
        cell_ref(col, 2),
        cell_ref(col, count + 1)
    )
}

fn categories_ref(depth: usize, count: usize) -> String {
    format!(
        "{}!{}:{}",
        SHEET_NAME,
        cell_ref(0, 2),
        cell_ref(depth - 1, count + 1)
    )
}

/// One named series of a category-shaped plot.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeriesData {
    /// Display name
    pub name: String,
    /// Position within the plot, contiguous from 0
    pub index: u32,
    /// Values, one slot per category; `None` slots are omitted from the cache
    pub values: Vec<Option<f64>>,
    /// Number format code for the value cache
    pub number_format: String,
    /// Worksheet reference of the series name cell
    pub name_ref: String,
    /// Worksheet reference of the category range
    pub categories_ref: String,
    /// Worksheet reference of the value range
    pub values_ref: String,
}

/// Data for a category-shaped plot: a shared category sequence plus its
/// series.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryChartData {
    /// Category labels shared by every series
    pub categories: Categories,
    series: Vec<CategorySeriesData>,
}

impl CategoryChartData {
    /// Create chart data over the given categories.
    #[inline]
    pub fn new(categories: Categories) -> Self {
        Self {
            categories,
            series: Vec::new(),
        }
    }

    /// Append a series; its index and default worksheet references are
    /// derived from its position.
    pub fn add_series(
        &mut self,
        name: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> &mut CategorySeriesData {
        let index = self.series.len();
        let depth = self.categories.depth();
        let leaf_count = self.categories.leaf_count();
        let col = depth + index;
        self.series.push(CategorySeriesData {
            name: name.into(),
            index: index as u32,
            values,
            number_format: GENERAL_NUMBER_FORMAT.to_string(),
            name_ref: name_ref(col),
            categories_ref: categories_ref(depth, leaf_count),
            values_ref: values_ref(col, leaf_count),
        });
        // Just pushed, so the list is non-empty.
        self.series.last_mut().expect("series just added")
    }

    /// The series in plot order.
    #[inline]
    pub fn series(&self) -> &[CategorySeriesData] {
        &self.series
    }
}

/// One named series of an XY-shaped plot.
#[derive(Debug, Clone, PartialEq)]
pub struct XySeriesData {
    /// Display name
    pub name: String,
    /// Position within the plot, contiguous from 0
    pub index: u32,
    /// X values; `None` slots are omitted from the cache
    pub x_values: Vec<Option<f64>>,
    /// Y values; `None` slots are omitted from the cache
    pub y_values: Vec<Option<f64>>,
    /// Number format code for the value caches
    pub number_format: String,
    /// Worksheet reference of the series name cell
    pub name_ref: String,
    /// Worksheet reference of the X value range
    pub x_values_ref: String,
    /// Worksheet reference of the Y value range
    pub y_values_ref: String,
}

/// Data for an XY-shaped plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyChartData {
    series: Vec<XySeriesData>,
}

impl XyChartData {
    /// Create empty XY chart data.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a series; each series occupies a pair of worksheet columns
    /// (x, y) with the name over the y column.
    pub fn add_series(
        &mut self,
        name: impl Into<String>,
        x_values: Vec<Option<f64>>,
        y_values: Vec<Option<f64>>,
    ) -> &mut XySeriesData {
        let index = self.series.len();
        let x_col = index * 2;
        let y_col = x_col + 1;
        let count = x_values.len().max(y_values.len());
        self.series.push(XySeriesData {
            name: name.into(),
            index: index as u32,
            x_values,
            y_values,
            number_format: GENERAL_NUMBER_FORMAT.to_string(),
            name_ref: name_ref(y_col),
            x_values_ref: values_ref(x_col, count),
            y_values_ref: values_ref(y_col, count),
        });
        self.series.last_mut().expect("series just added")
    }

    /// The series in plot order.
    #[inline]
    pub fn series(&self) -> &[XySeriesData] {
        &self.series
    }
}

/// One named series of a bubble-shaped plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSeriesData {
    /// Display name
    pub name: String,
    /// Position within the plot, contiguous from 0
    pub index: u32,
    /// X values; `None` slots are omitted from the cache
    pub x_values: Vec<Option<f64>>,
    /// Y values; `None` slots are omitted from the cache
    pub y_values: Vec<Option<f64>>,
    /// Bubble sizes; `None` slots are omitted from the cache
    pub bubble_sizes: Vec<Option<f64>>,
    /// Number format code for the value caches
    pub number_format: String,
    /// Worksheet reference of the series name cell
    pub name_ref: String,
    /// Worksheet reference of the X value range
    pub x_values_ref: String,
    /// Worksheet reference of the Y value range
    pub y_values_ref: String,
    /// Worksheet reference of the bubble-size range
    pub bubble_sizes_ref: String,
}

/// Data for a bubble-shaped plot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BubbleChartData {
    series: Vec<BubbleSeriesData>,
}

impl BubbleChartData {
    /// Create empty bubble chart data.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a series; each series occupies a triple of worksheet columns
    /// (x, y, size) with the name over the y column.
    pub fn add_series(
        &mut self,
        name: impl Into<String>,
        x_values: Vec<Option<f64>>,
        y_values: Vec<Option<f64>>,
        bubble_sizes: Vec<Option<f64>>,
    ) -> &mut BubbleSeriesData {
        let index = self.series.len();
        let x_col = index * 3;
        let y_col = x_col + 1;
        let size_col = x_col + 2;
        let count = x_values.len().max(y_values.len()).max(bubble_sizes.len());
        self.series.push(BubbleSeriesData {
            name: name.into(),
            index: index as u32,
            x_values,
            y_values,
            bubble_sizes,
            number_format: GENERAL_NUMBER_FORMAT.to_string(),
            name_ref: name_ref(y_col),
            x_values_ref: values_ref(x_col, count),
            y_values_ref: values_ref(y_col, count),
            bubble_sizes_ref: values_ref(size_col, count),
        });
        self.series.last_mut().expect("series just added")
    }

    /// The series in plot order.
    #[inline]
    pub fn series(&self) -> &[BubbleSeriesData] {
        &self.series
    }
}

/// Chart data of any shape, as held by a plot.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Category-shaped data
    Category(CategoryChartData),
    /// XY-shaped data
    Xy(XyChartData),
    /// Bubble-shaped data
    Bubble(BubbleChartData),
}

impl ChartData {
    /// The shape of this data.
    #[inline]
    pub fn data_shape(&self) -> DataShape {
        match self {
            Self::Category(_) => DataShape::Category,
            Self::Xy(_) => DataShape::Xy,
            Self::Bubble(_) => DataShape::Bubble,
        }
    }

    /// Number of series.
    #[inline]
    pub fn series_count(&self) -> usize {
        match self {
            Self::Category(data) => data.series.len(),
            Self::Xy(data) => data.series.len(),
            Self::Bubble(data) => data.series.len(),
        }
    }
}

impl From<CategoryChartData> for ChartData {
    #[inline]
    fn from(data: CategoryChartData) -> Self {
        Self::Category(data)
    }
}

impl From<XyChartData> for ChartData {
    #[inline]
    fn from(data: XyChartData) -> Self {
        Self::Xy(data)
    }
}

impl From<BubbleChartData> for ChartData {
    #[inline]
    fn from(data: BubbleChartData) -> Self {
        Self::Bubble(data)
    }
}
