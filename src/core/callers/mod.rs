mod cutesv;
mod dysgu;
mod generic;
mod gridss;
mod sniffles;
mod tiddit;

use super::{
    general,
    record::{InfoMap, InfoValue, RawRecord},
    variant::ConfidenceInterval,
};

/// Per-caller normalization rules, selected per record from the caller name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallerStrategy {
    Generic,
    Sniffles,
    Tiddit,
    Dysgu,
    CuteSv,
    Gridss,
}

/// Matching order for caller names; the first substring hit wins.
const DISPATCH_ORDER: [(&str, CallerStrategy); 5] = [
    ("sniffles", CallerStrategy::Sniffles),
    ("tiddit", CallerStrategy::Tiddit),
    ("dysgu", CallerStrategy::Dysgu),
    ("cutesv", CallerStrategy::CuteSv),
    ("gridss", CallerStrategy::Gridss),
];

impl CallerStrategy {
    pub fn for_caller(caller: Option<&str>) -> Self {
        let Some(caller) = caller else {
            return Self::Generic;
        };
        let caller = caller.to_ascii_lowercase();
        DISPATCH_ORDER
            .iter()
            .find(|(needle, _)| caller.contains(needle))
            .map_or(Self::Generic, |(_, strategy)| *strategy)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Sniffles => "sniffles",
            Self::Tiddit => "TIDDIT",
            Self::Dysgu => "Dysgu",
            Self::CuteSv => "cuteSV",
            Self::Gridss => "gridss",
        }
    }

    /// Caller-specific typing of INFO. Unrecognized keys pass through as-is.
    pub fn parse_info_fields(&self, info: &InfoMap) -> InfoMap {
        match self {
            Self::Generic => generic::parse_info_fields(info),
            Self::Sniffles => sniffles::parse_info_fields(info),
            Self::Tiddit => tiddit::parse_info_fields(info),
            Self::Dysgu => dysgu::parse_info_fields(info),
            Self::CuteSv => cutesv::parse_info_fields(info),
            Self::Gridss => gridss::parse_info_fields(info),
        }
    }

    pub fn calculate_confidence_intervals(
        &self,
        info: &InfoMap,
        record: &RawRecord,
    ) -> (Option<ConfidenceInterval>, Option<ConfidenceInterval>) {
        match self {
            Self::Generic | Self::CuteSv | Self::Gridss => generic::confidence_intervals(info),
            Self::Sniffles => sniffles::confidence_intervals(info, record),
            Self::Tiddit => tiddit::confidence_intervals(info),
            Self::Dysgu => dysgu::confidence_intervals(info, record),
        }
    }

    pub fn normalize_svlen(&self, value: Option<&InfoValue>) -> Option<u64> {
        general::normalize_svlen(value)
    }

    pub fn extract_primary_caller(&self, info: &InfoMap, _id: Option<&str>) -> Option<String> {
        caller_from_info(info)
    }
}

/// First non-empty of `EUK_CALLER` and `CALLER`.
pub fn caller_from_info(info: &InfoMap) -> Option<String> {
    ["EUK_CALLER", "CALLER"]
        .iter()
        .filter_map(|key| info.get(*key).and_then(InfoValue::joined))
        .find(|caller| !caller.is_empty())
}

/// A two-element interval from a list-valued INFO tag. Anything shorter or
/// non-numeric yields `None`.
fn interval_from_list(value: Option<&InfoValue>) -> Option<ConfidenceInterval> {
    let bounds: Vec<i64> = match value? {
        InfoValue::Integer(values) => values.clone(),
        InfoValue::Float(values) => values
            .iter()
            .map(|value| value.is_finite().then(|| value.trunc() as i64))
            .collect::<Option<_>>()?,
        InfoValue::String(values) => values
            .iter()
            .map(|value| value.trim().parse::<i64>().ok())
            .collect::<Option<_>>()?,
        InfoValue::Flag | InfoValue::Missing => return None,
    };
    match bounds.as_slice() {
        [lower, upper, ..] => Some(ConfidenceInterval::new(*lower, *upper)),
        _ => None,
    }
}

/// Integer-typed copy of `key`, or `Missing` when it does not parse.
fn retype_integer(parsed: &mut InfoMap, info: &InfoMap, key: &str) {
    if let Some(value) = info.get(key) {
        let typed = value
            .first_i64()
            .map_or(InfoValue::Missing, InfoValue::integer);
        if typed.is_missing() {
            log::trace!("Could not parse {key}={value} as integer");
        }
        parsed.insert(key.to_string(), typed);
    }
}

fn retype_float(parsed: &mut InfoMap, info: &InfoMap, key: &str) {
    if let Some(value) = info.get(key) {
        let typed = value.first_f64().map_or(InfoValue::Missing, InfoValue::float);
        if typed.is_missing() {
            log::trace!("Could not parse {key}={value} as float");
        }
        parsed.insert(key.to_string(), typed);
    }
}

fn retype_string(parsed: &mut InfoMap, info: &InfoMap, key: &str) {
    if let Some(value) = info.get(key) {
        parsed.insert(
            key.to_string(),
            value.joined().map_or(InfoValue::Missing, InfoValue::string),
        );
    }
}

/// Read-name count from `RNAMES`, as a list or a comma-separated string.
fn insert_num_rnames(parsed: &mut InfoMap, info: &InfoMap) {
    let count = match info.get("RNAMES") {
        Some(InfoValue::String(names)) if names.len() == 1 => names[0].split(',').count(),
        Some(value) if !value.is_missing() => value.len(),
        _ => return,
    };
    parsed.insert("NUM_RNAMES".to_string(), InfoValue::integer(count as i64));
}
