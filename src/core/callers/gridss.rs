use super::generic;
use crate::core::record::{InfoMap, InfoValue};

/// Singleton breakends carry neither `SVTYPE` nor `MATEID`.
pub(super) fn parse_info_fields(info: &InfoMap) -> InfoMap {
    let mut parsed = generic::parse_info_fields(info);
    let declared = |key: &str| parsed.get(key).is_some_and(|value| !value.is_missing());
    if !declared("SVTYPE") && !declared("MATEID") {
        parsed.insert("SVTYPE".to_string(), InfoValue::string("BND"));
    }
    parsed
}
