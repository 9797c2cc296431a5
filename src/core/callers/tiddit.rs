use super::{generic, interval_from_list, retype_string};
use crate::core::{
    record::{InfoMap, InfoValue},
    variant::ConfidenceInterval,
};

pub(super) fn parse_info_fields(info: &InfoMap) -> InfoMap {
    let mut parsed = info.clone();
    match info.get("CILEN") {
        Some(cilen) if cilen.len() >= 2 => {
            let bounds = cilen.to_strings();
            for (key, bound) in [("CILEN_MIN", &bounds[0]), ("CILEN_MAX", &bounds[1])] {
                let typed = InfoValue::string(bound.as_str())
                    .first_i64()
                    .map_or(InfoValue::Missing, InfoValue::integer);
                parsed.insert(key.to_string(), typed);
            }
        }
        Some(cilen) => {
            let typed = cilen.first_i64().map_or(InfoValue::Missing, InfoValue::integer);
            parsed.insert("CILEN".to_string(), typed);
        }
        None => {}
    }
    retype_string(&mut parsed, info, "OA");
    parsed
}

/// `CIPOS_REG`/`CIEND_REG` hold the region itself, either as a two-element
/// list or as a single `start,end` string.
fn region(value: Option<&InfoValue>) -> Option<ConfidenceInterval> {
    match value? {
        InfoValue::String(values) if values.len() == 1 => values[0].parse().ok(),
        other => interval_from_list(Some(other)),
    }
}

pub(super) fn confidence_intervals(
    info: &InfoMap,
) -> (Option<ConfidenceInterval>, Option<ConfidenceInterval>) {
    let (mut cipos, mut ciend) = generic::confidence_intervals(info);
    if let Some(reg) = info.get("CIPOS_REG") {
        cipos = region(Some(reg));
    }
    if let Some(reg) = info.get("CIEND_REG") {
        ciend = region(Some(reg));
    }
    (cipos, ciend)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_accepts_string_and_list() {
        let info = InfoMap::from([
            ("CIPOS_REG".to_string(), InfoValue::string("950,1050")),
            ("CIEND_REG".to_string(), InfoValue::Integer(vec![1990, 2010])),
        ]);
        let (cipos, ciend) = confidence_intervals(&info);
        assert_eq!(cipos, Some(ConfidenceInterval::new(950, 1050)));
        assert_eq!(ciend, Some(ConfidenceInterval::new(1990, 2010)));
    }

    #[test]
    fn region_as_string_list_is_parsed() {
        let info = InfoMap::from([(
            "CIPOS_REG".to_string(),
            InfoValue::String(vec!["950".into(), "1050".into()]),
        )]);
        let (cipos, ciend) = confidence_intervals(&info);
        assert_eq!(cipos, Some(ConfidenceInterval::new(950, 1050)));
        assert_eq!(ciend, None);
    }

    #[test]
    fn malformed_region_yields_no_interval() {
        let info = InfoMap::from([
            ("CIPOS".to_string(), InfoValue::Integer(vec![-5, 5])),
            ("CIPOS_REG".to_string(), InfoValue::string("950")),
            ("CIEND_REG".to_string(), InfoValue::string("x,y")),
        ]);
        let (cipos, ciend) = confidence_intervals(&info);
        assert_eq!(cipos, None);
        assert_eq!(ciend, None);
    }

    #[test]
    fn cilen_pair_splits_into_bounds() {
        let info = InfoMap::from([
            ("CILEN".to_string(), InfoValue::Integer(vec![480, 520])),
            ("OA".to_string(), InfoValue::string("+-")),
        ]);
        let parsed = parse_info_fields(&info);
        assert_eq!(parsed["CILEN_MIN"], InfoValue::integer(480));
        assert_eq!(parsed["CILEN_MAX"], InfoValue::integer(520));
        assert_eq!(parsed["OA"], InfoValue::string("+-"));
    }

    #[test]
    fn scalar_cilen_stays_integer() {
        let info = InfoMap::from([("CILEN".to_string(), InfoValue::string("35"))]);
        assert_eq!(parse_info_fields(&info)["CILEN"], InfoValue::integer(35));
    }
}
