//! Caller-agnostic field extraction shared by every input VCF.

use super::record::{InfoMap, InfoValue, RawRecord};

/// The eight mandatory VCF columns of one record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoreFields {
    pub chrom: String,
    pub position: i64,
    pub id: Option<String>,
    pub reference: String,
    pub alt: Option<String>,
    pub qual: Option<f64>,
    pub filter: Option<String>,
}

/// SV INFO fields common to nearly all callers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BasicInfoFields {
    pub svtype: Option<String>,
    pub svlen: Option<InfoValue>,
    pub end: Option<i64>,
    pub imprecise: bool,
    pub precise: bool,
    pub chrom2: Option<String>,
    pub mate_id: Option<String>,
    pub homlen: Option<i64>,
    pub homseq: Option<String>,
}

pub fn extract_core_fields(record: &RawRecord) -> CoreFields {
    CoreFields {
        chrom: record.chrom.clone(),
        position: record.pos,
        id: record.first_id().map(str::to_string),
        reference: record.reference.clone(),
        alt: (!record.alts.is_empty()).then(|| record.alts.join(",")),
        qual: record.qual,
        filter: (!record.filters.is_empty()).then(|| record.filters.join(";")),
    }
}

pub fn extract_basic_info_fields(info: &InfoMap) -> BasicInfoFields {
    let string_field = |key: &str| info.get(key).and_then(InfoValue::joined);
    let integer_field = |key: &str| info.get(key).and_then(InfoValue::first_i64);
    let flag_field = |key: &str| info.get(key).is_some_and(|value| !value.is_missing());

    BasicInfoFields {
        svtype: info.get("SVTYPE").and_then(InfoValue::first_str),
        svlen: info.get("SVLEN").cloned(),
        end: integer_field("END"),
        imprecise: flag_field("IMPRECISE"),
        precise: flag_field("PRECISE"),
        chrom2: string_field("CHR2"),
        mate_id: string_field("MATEID"),
        homlen: integer_field("HOMLEN"),
        homseq: string_field("HOMSEQ"),
    }
}

/// Absolute SVLEN. Accepts an integer, a list (first element), or a numeric
/// string; `None` for empty lists, non-numeric values, or no value at all.
pub fn normalize_svlen(value: Option<&InfoValue>) -> Option<u64> {
    value?.first_i64().map(i64::unsigned_abs)
}
