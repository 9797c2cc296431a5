use crate::constants::MISSING_VALUE;
use std::{collections::BTreeMap, fmt};

/// INFO column of one record, keyed by tag.
pub type InfoMap = BTreeMap<String, InfoValue>;

/// FORMAT values of one sample, keyed by tag.
pub type SampleCall = BTreeMap<String, FormatValue>;

/// A typed INFO value as declared in the header. Lists keep declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Flag,
    Integer(Vec<i64>),
    Float(Vec<f64>),
    String(Vec<String>),
    /// A value that was present but could not be parsed into the expected type.
    Missing,
}

impl InfoValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(vec![value.into()])
    }

    pub fn integer(value: i64) -> Self {
        Self::Integer(vec![value])
    }

    pub fn float(value: f64) -> Self {
        Self::Float(vec![value])
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Flag => 1,
            Self::Integer(values) => values.len(),
            Self::Float(values) => values.len(),
            Self::String(values) => values.len(),
            Self::Missing => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// First element as an integer. Floats truncate toward zero, strings must
    /// parse as base-10 integers.
    pub fn first_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(values) => values.first().copied(),
            Self::Float(values) => values
                .first()
                .filter(|value| value.is_finite())
                .map(|value| value.trunc() as i64),
            Self::String(values) => values.first()?.trim().parse::<i64>().ok(),
            Self::Flag | Self::Missing => None,
        }
    }

    pub fn first_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(values) => values.first().map(|value| *value as f64),
            Self::Float(values) => values.first().copied().filter(|value| !value.is_nan()),
            Self::String(values) => values
                .first()?
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| !value.is_nan()),
            Self::Flag | Self::Missing => None,
        }
    }

    pub fn first_str(&self) -> Option<String> {
        match self {
            Self::Integer(values) => values.first().map(i64::to_string),
            Self::Float(values) => values.first().map(f64::to_string),
            Self::String(values) => values.first().cloned(),
            Self::Flag | Self::Missing => None,
        }
    }

    /// All elements rendered as strings, in order.
    pub fn to_strings(&self) -> Vec<String> {
        match self {
            Self::Integer(values) => values.iter().map(i64::to_string).collect(),
            Self::Float(values) => values.iter().map(f64::to_string).collect(),
            Self::String(values) => values.clone(),
            Self::Flag | Self::Missing => Vec::new(),
        }
    }

    /// Non-empty string form of the whole value (list elements joined by `,`).
    pub fn joined(&self) -> Option<String> {
        let joined = self.to_strings().join(",");
        (!joined.is_empty()).then_some(joined)
    }
}

impl fmt::Display for InfoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "true"),
            Self::Missing => write!(f, "{MISSING_VALUE}"),
            _ => write!(f, "{}", self.to_strings().join(",")),
        }
    }
}

/// A typed FORMAT value for one sample. `GT` is carried as its rendered string.
/// Numeric lists keep missing elements in place as `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatValue {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    String(String),
    Missing,
}

impl FormatValue {
    /// String form for tabular output; `None` when the value is missing or a
    /// null sentinel. Missing list elements render as `.` so positions hold.
    pub fn render(&self) -> Option<String> {
        let rendered = match self {
            Self::Integer(values) => {
                join_elements(values.iter().map(|value| value.map(|v| v.to_string())))
            }
            Self::Float(values) => join_elements(
                values
                    .iter()
                    .map(|value| value.filter(|v| !v.is_nan()).map(|v| v.to_string())),
            ),
            Self::String(value) => value.clone(),
            Self::Missing => return None,
        };
        if rendered.is_empty() || crate::utils::util::is_null_sentinel(&rendered) {
            return None;
        }
        Some(rendered)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Empty when every element is missing.
fn join_elements(elements: impl Iterator<Item = Option<String>>) -> String {
    let elements = elements.collect::<Vec<_>>();
    if elements.iter().all(Option::is_none) {
        return String::new();
    }
    elements
        .into_iter()
        .map(|element| element.unwrap_or_else(|| MISSING_VALUE.to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// One data line of a VCF, decoded against its header.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub chrom: String,
    /// 1-based
    pub pos: i64,
    pub ids: Vec<String>,
    pub reference: String,
    pub alts: Vec<String>,
    pub qual: Option<f64>,
    pub filters: Vec<String>,
    pub info: InfoMap,
    /// FORMAT tags present on this record.
    pub format: Vec<String>,
    /// One call per declared sample, in header order.
    pub calls: Vec<SampleCall>,
}

impl RawRecord {
    pub fn first_id(&self) -> Option<&str> {
        self.ids.first().map(String::as_str)
    }

    pub fn info_value(&self, key: &str) -> Option<&InfoValue> {
        self.info.get(key)
    }
}
