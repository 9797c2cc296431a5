//! Sniffles reports breakpoint uncertainty as a standard deviation
//! (`CIPOS_STD`/`CIEND_STD`); the 95% window is two deviations either side.

use super::{generic, insert_num_rnames, retype_integer};
use crate::core::{
    record::{InfoMap, InfoValue, RawRecord},
    variant::ConfidenceInterval,
};

pub(super) fn parse_info_fields(info: &InfoMap) -> InfoMap {
    let mut parsed = info.clone();
    retype_integer(&mut parsed, info, "SUPPORT");
    insert_num_rnames(&mut parsed, info);
    parsed
}

fn two_sigma_window(center: f64, std: Option<&InfoValue>) -> Option<ConfidenceInterval> {
    let std = std?.first_f64()?;
    let lower = center - 2.0 * std;
    let upper = center + 2.0 * std;
    Some(ConfidenceInterval::new(lower as i64, upper as i64))
}

pub(super) fn confidence_intervals(
    info: &InfoMap,
    record: &RawRecord,
) -> (Option<ConfidenceInterval>, Option<ConfidenceInterval>) {
    let (mut cipos, mut ciend) = generic::confidence_intervals(info);

    if let Some(std) = info.get("CIPOS_STD") {
        cipos = two_sigma_window(record.pos as f64, Some(std));
    }
    if let Some(std) = info.get("CIEND_STD") {
        // Without END there is no breakpoint to center on; CIEND stays unset.
        let end = info.get("END").and_then(InfoValue::first_f64);
        ciend = end.and_then(|end| two_sigma_window(end, Some(std)));
    }
    (cipos, ciend)
}
