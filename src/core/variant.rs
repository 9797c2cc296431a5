use super::record::InfoMap;
use crate::{error::VarifyError, utils::util::Result};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    str::FromStr,
};

/// Closed `[lower, upper]` uncertainty window around a breakpoint, in absolute
/// or offset coordinates depending on the caller's encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceInterval {
    pub lower: i64,
    pub upper: i64,
}

impl ConfidenceInterval {
    pub fn new(lower: i64, upper: i64) -> Self {
        Self { lower, upper }
    }

    /// Interval of `half_width` on both sides of `center`.
    pub fn centered(center: i64, half_width: i64) -> Self {
        Self::new(center - half_width, center + half_width)
    }

    pub fn as_array(&self) -> [i64; 2] {
        [self.lower, self.upper]
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}

/// Accepts `(a, b)`, `[a, b]` and bare `a,b`.
impl FromStr for ConfidenceInterval {
    type Err = VarifyError;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .trim()
            .trim_start_matches(['(', '['])
            .trim_end_matches([')', ']']);
        let mut bounds = inner.split(',').map(str::trim);
        let (Some(lower), Some(upper), None) = (bounds.next(), bounds.next(), bounds.next()) else {
            return Err(crate::varify_error!(
                "Confidence interval {s:?} must contain exactly two bounds"
            ));
        };
        Ok(Self::new(lower.parse()?, upper.parse()?))
    }
}

/// Per-record result of the normalization pipeline.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedVariant {
    pub unique_id: usize,
    pub chrom: String,
    pub position: i64,
    pub id: Option<String>,
    pub reference: String,
    pub alt: Option<String>,
    pub qual: Option<f64>,
    pub filter: Option<String>,

    pub svtype: Option<String>,
    pub svlen: Option<u64>,
    pub end: Option<i64>,
    pub imprecise: bool,
    pub precise: bool,
    pub chrom2: Option<String>,
    pub mate_id: Option<String>,
    pub homlen: Option<i64>,
    pub homseq: Option<String>,

    pub cipos: Option<ConfidenceInterval>,
    pub ciend: Option<ConfidenceInterval>,

    pub primary_caller: Option<String>,
    pub supp_callers: Option<String>,
    pub num_callers: Option<usize>,

    // SURVIVOR-only
    pub supp_vec: Option<String>,
    pub strands: Option<String>,
    pub svmethod: Option<String>,

    /// INFO after caller-specific parsing, including derived keys.
    pub info: InfoMap,
    /// Flattened FORMAT values, one string per FORMAT tag.
    pub sample_fields: BTreeMap<String, String>,
}

impl NormalizedVariant {
    /// Distinct, non-empty caller names in `SUPP_CALLERS`.
    pub fn supporting_callers(&self) -> Vec<&str> {
        let Some(supp_callers) = self.supp_callers.as_deref() else {
            return Vec::new();
        };
        let mut callers = supp_callers
            .split(',')
            .map(str::trim)
            .filter(|caller| !caller.is_empty())
            .collect::<Vec<_>>();
        callers.sort_unstable();
        callers.dedup();
        callers
    }
}

/// All retained variants of one input file.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentDataset {
    pub variants: Vec<NormalizedVariant>,
    /// INFO ids declared in the source header.
    pub info_columns: Vec<String>,
    pub samples: Vec<String>,
}

impl EnrichmentDataset {
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Position-keyed view used by the writer. Later rows overwrite earlier
    /// rows sharing a `(CHROM, POSITION)` key.
    pub fn lookup(&self) -> HashMap<(String, i64), &NormalizedVariant> {
        let mut lookup = HashMap::with_capacity(self.variants.len());
        for variant in &self.variants {
            lookup.insert((variant.chrom.clone(), variant.position), variant);
        }
        lookup
    }
}
