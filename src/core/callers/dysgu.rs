use super::{generic, retype_float, retype_integer};
use crate::core::{
    record::{InfoMap, InfoValue, RawRecord},
    variant::ConfidenceInterval,
};

pub(super) fn parse_info_fields(info: &InfoMap) -> InfoMap {
    let mut parsed = info.clone();
    retype_integer(&mut parsed, info, "NMP");
    retype_float(&mut parsed, info, "MAPQ");
    parsed
}

/// `CIPOS95`/`CIEND95` give the full width of the 95% window.
fn half_width_window(center: i64, width: &InfoValue) -> Option<ConfidenceInterval> {
    let half = width.first_i64()?.div_euclid(2);
    Some(ConfidenceInterval::centered(center, half))
}

pub(super) fn confidence_intervals(
    info: &InfoMap,
    record: &RawRecord,
) -> (Option<ConfidenceInterval>, Option<ConfidenceInterval>) {
    let (mut cipos, mut ciend) = generic::confidence_intervals(info);
    if let Some(width) = info.get("CIPOS95") {
        cipos = half_width_window(record.pos, width);
    }
    if let Some(width) = info.get("CIEND95") {
        // No END, no CIEND; nothing is centered on position 0.
        let end = info.get("END").and_then(InfoValue::first_i64);
        ciend = end.and_then(|end| half_width_window(end, width));
    }
    (cipos, ciend)
}
