use super::interval_from_list;
use crate::core::{record::InfoMap, variant::ConfidenceInterval};

pub(super) fn parse_info_fields(info: &InfoMap) -> InfoMap {
    info.clone()
}

/// Direct `CIPOS`/`CIEND` two-element lists.
pub(super) fn confidence_intervals(
    info: &InfoMap,
) -> (Option<ConfidenceInterval>, Option<ConfidenceInterval>) {
    (
        interval_from_list(info.get("CIPOS")),
        interval_from_list(info.get("CIEND")),
    )
}
