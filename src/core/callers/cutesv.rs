use super::{insert_num_rnames, retype_float, retype_integer, retype_string};
use crate::core::record::InfoMap;

pub(super) fn parse_info_fields(info: &InfoMap) -> InfoMap {
    let mut parsed = info.clone();
    retype_integer(&mut parsed, info, "RE");
    retype_string(&mut parsed, info, "STRAND");
    insert_num_rnames(&mut parsed, info);
    retype_float(&mut parsed, info, "AF");
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::InfoValue;
    use approx::assert_relative_eq;

    #[test]
    fn read_support_fields_are_typed() {
        let info = InfoMap::from([
            ("RE".to_string(), InfoValue::Float(vec![12.0])),
            ("STRAND".to_string(), InfoValue::string("+-")),
            ("RNAMES".to_string(), InfoValue::string("r1,r2")),
            ("AF".to_string(), InfoValue::string("0.375")),
        ]);
        let parsed = parse_info_fields(&info);
        assert_eq!(parsed["RE"], InfoValue::integer(12));
        assert_eq!(parsed["STRAND"], InfoValue::string("+-"));
        assert_eq!(parsed["NUM_RNAMES"], InfoValue::integer(2));
        assert_relative_eq!(parsed["AF"].first_f64().unwrap(), 0.375);
    }

    #[test]
    fn unparsable_re_is_missing() {
        let info = InfoMap::from([("RE".to_string(), InfoValue::string("n/a"))]);
        assert_eq!(parse_info_fields(&info)["RE"], InfoValue::Missing);
    }
}
