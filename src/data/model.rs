use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// OptionValue – a single typed value from the options header
// ---------------------------------------------------------------------------

/// A header value, typed by its spelling: quoted text, `true`/`false`, or a number.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// Numeric view used by options that expect a number.
    ///
    /// Booleans count as 1/0 and text is accepted when it spells a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            OptionValue::Number(v) => Some(*v),
            OptionValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            OptionValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    /// Boolean view used by the log-scale toggles.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Number(v) => Some(*v != 0.0),
            OptionValue::Text(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }

    /// Text shown on the chart (titles); unlike `Display`, never quoted.
    pub fn as_label(&self) -> String {
        match self {
            OptionValue::Text(s) => s.clone(),
            OptionValue::Bool(b) => b.to_string(),
            OptionValue::Number(v) => v.to_string(),
        }
    }
}

/// Header spelling of the value; parsing it back yields the same value.
impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{b}"),
            OptionValue::Number(v) => write!(f, "{v}"),
            OptionValue::Text(s) => write!(f, "\"{s}\""),
        }
    }
}

// ---------------------------------------------------------------------------
// Options – the parsed header mapping
// ---------------------------------------------------------------------------

/// Lower-cased option key → typed value. Ordered so serialization is stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: BTreeMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; the key is lower-cased. A repeated key overwrites.
    pub fn insert(&mut self, key: &str, value: OptionValue) -> Option<OptionValue> {
        self.entries.insert(key.to_lowercase(), value)
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize back to a header block, delimiter line included.
    pub fn to_header(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(&format!("{key}: {value}\n"));
        }
        out.push_str("===\n");
        out
    }
}

// ---------------------------------------------------------------------------
// Table – raw CSV body
// ---------------------------------------------------------------------------

/// The CSV body exactly as read: a header row plus data rows of text cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// `header[0]` labels the x axis, the rest name the series.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ---------------------------------------------------------------------------
// Series / Dataset – column-major view used by the renderers
// ---------------------------------------------------------------------------

/// One y column. `None` marks a cell that did not parse as a number.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// `(x index, value)` pairs with missing cells removed together with
    /// their x position, so the remaining points keep their alignment.
    pub fn present_points(&self) -> Vec<(usize, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|v| (i, v)))
            .collect()
    }
}

/// Categories on the x axis and every series measured against them.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub x_label: String,
    /// X categories, kept as display strings.
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl Dataset {
    /// Transpose the table columns into categories and series.
    pub fn from_table(table: &Table) -> Self {
        let x_label = table.header.first().cloned().unwrap_or_default();
        let categories: Vec<String> = table
            .rows
            .iter()
            .map(|row| row.first().cloned().unwrap_or_default())
            .collect();

        let series = table
            .header
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, name)| Series {
                name: name.clone(),
                values: table
                    .rows
                    .iter()
                    .map(|row| row.get(col).and_then(|cell| parse_cell(cell)))
                    .collect(),
            })
            .collect();

        Dataset {
            x_label,
            categories,
            series,
        }
    }

    /// Number of x positions.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Largest present value at x position `index` across all series.
    pub fn best_at(&self, index: usize) -> Option<f64> {
        self.series
            .iter()
            .filter_map(|s| s.values.get(index).copied().flatten())
            .fold(None, |best, v| match best {
                Some(b) if b >= v => Some(b),
                _ => Some(v),
            })
    }
}

/// Parse a data cell; anything that is not a number (or is NaN) is missing.
pub fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
