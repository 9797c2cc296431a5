use super::{
    callers::caller_from_info,
    record::{FormatValue, InfoMap, InfoValue, RawRecord},
};
use crate::{
    constants::{ABSENT_FORMAT_VALUE, MISSING_VALUE, REQUIRED_FORMAT_FIELDS, SAMPLE_SEPARATOR},
    error::VarifyError,
};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// How the callers' outputs were combined into the input file. Fixed for a
/// whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeConvention {
    /// One record per caller per variant (bcftools-style concatenation).
    Bcf,
    /// One consensus record per variant, one sample slot per caller.
    Survivor,
}

/// Fields only the SURVIVOR convention carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConventionFields {
    pub supp_vec: Option<String>,
    pub strands: Option<String>,
    pub svmethod: Option<String>,
    /// Overrides the INFO `SVTYPE` when set.
    pub svtype: Option<String>,
    pub supp_callers: Option<String>,
}

impl MergeConvention {
    pub fn extract_primary_caller(&self, info: &InfoMap, record: &RawRecord) -> Option<String> {
        match self {
            Self::Bcf => caller_from_info(info),
            Self::Survivor => record
                .first_id()
                .and_then(|id| id.split_once('_'))
                .map(|(caller, _)| caller.to_string()),
        }
    }

    pub fn extract_type_specific_fields(
        &self,
        info: &InfoMap,
        record: &RawRecord,
    ) -> ConventionFields {
        if *self == Self::Bcf {
            return ConventionFields::default();
        }

        let string_field = |key: &str| info.get(key).and_then(InfoValue::joined);
        let svtype = record
            .first_id()
            .filter(|id| id.contains('_'))
            .and_then(|id| id.split('_').nth(1))
            .filter(|svtype| !svtype.is_empty())
            .map(str::to_string);

        let mut callers = record
            .calls
            .iter()
            .filter_map(|call| call.get("ID")?.as_str())
            .filter_map(|id| id.split_once('_'))
            .map(|(caller, _)| caller)
            .collect::<Vec<_>>();
        callers.sort_unstable();
        callers.dedup();

        ConventionFields {
            supp_vec: string_field("SUPP_VEC"),
            strands: string_field("STRANDS"),
            svmethod: string_field("SVMETHOD"),
            svtype,
            supp_callers: (!callers.is_empty()).then(|| callers.join(",")),
        }
    }

    pub fn should_aggregate(&self) -> bool {
        match self {
            Self::Bcf => true,
            Self::Survivor => false,
        }
    }

    /// Flattens FORMAT values to one string per tag. `ID` is skipped because it
    /// clashes with the ID column.
    pub fn process_sample_fields(
        &self,
        record: &RawRecord,
        samples: &[String],
    ) -> BTreeMap<String, String> {
        let mut sample_data = BTreeMap::new();
        let tags = record.format.iter().filter(|tag| tag.as_str() != "ID");

        match self {
            Self::Bcf => {
                let n_calls = samples.len().min(record.calls.len());
                for tag in tags {
                    let values = record.calls[..n_calls]
                        .iter()
                        .map(|call| render_call_value(call.get(tag)))
                        .collect::<Vec<_>>();
                    let joined = if values.iter().all(|value| value == MISSING_VALUE) {
                        MISSING_VALUE.to_string()
                    } else {
                        values.join(SAMPLE_SEPARATOR)
                    };
                    sample_data.insert(tag.clone(), joined);
                }
            }
            Self::Survivor => {
                let supp_vec = record.info_value("SUPP_VEC").and_then(InfoValue::joined);
                let active = active_sample_index(supp_vec.as_deref());
                if let Some(call) = record.calls.get(active) {
                    for tag in tags {
                        sample_data.insert(tag.clone(), render_call_value(call.get(tag)));
                    }
                }
            }
        }

        for field in REQUIRED_FORMAT_FIELDS {
            sample_data
                .entry(field.to_string())
                .or_insert_with(|| ABSENT_FORMAT_VALUE.to_string());
        }
        sample_data
    }
}

fn render_call_value(value: Option<&FormatValue>) -> String {
    value
        .and_then(|value| value.render())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

/// Index of the first `1` in a support vector, or 0 when there is none.
pub fn active_sample_index(supp_vec: Option<&str>) -> usize {
    supp_vec
        .and_then(|bits| bits.chars().position(|bit| bit == '1'))
        .unwrap_or(0)
}

impl FromStr for MergeConvention {
    type Err = VarifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bcf" => Ok(Self::Bcf),
            "survivor" => Ok(Self::Survivor),
            _ => Err(VarifyError::InvalidConvention {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for MergeConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bcf => write!(f, "bcf"),
            Self::Survivor => write!(f, "survivor"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::SampleCall;

    fn call(fields: &[(&str, FormatValue)]) -> SampleCall {
        fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    fn samples(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("S{i}")).collect()
    }

    #[test]
    fn active_sample_is_first_set_bit() {
        assert_eq!(active_sample_index(Some("0100")), 1);
        assert_eq!(active_sample_index(Some("0011")), 2);
        assert_eq!(active_sample_index(Some("0000")), 0);
        assert_eq!(active_sample_index(None), 0);
    }

    #[test]
    fn survivor_primary_caller_and_svtype_come_from_id() {
        let record = RawRecord {
            ids: vec!["dysgu_DEL_12".into()],
            ..Default::default()
        };
        let info = InfoMap::from([("CALLER".to_string(), InfoValue::string("delly"))]);
        let convention = MergeConvention::Survivor;
        assert_eq!(
            convention.extract_primary_caller(&info, &record).as_deref(),
            Some("dysgu")
        );
        assert_eq!(
            convention
                .extract_type_specific_fields(&info, &record)
                .svtype
                .as_deref(),
            Some("DEL")
        );
        assert_eq!(
            MergeConvention::Bcf
                .extract_primary_caller(&info, &record)
                .as_deref(),
            Some("delly")
        );
    }

    #[test]
    fn survivor_id_without_underscore_has_no_caller() {
        let record = RawRecord {
            ids: vec!["sv42".into()],
            ..Default::default()
        };
        let convention = MergeConvention::Survivor;
        assert_eq!(convention.extract_primary_caller(&InfoMap::new(), &record), None);
        assert_eq!(
            convention
                .extract_type_specific_fields(&InfoMap::new(), &record)
                .svtype,
            None
        );
    }

    #[test]
    fn survivor_supp_callers_come_from_sample_ids() {
        let record = RawRecord {
            ids: vec!["sniffles_INS".into()],
            format: vec!["GT".into(), "ID".into()],
            calls: vec![
                call(&[("ID", FormatValue::String("sniffles_INS_1".into()))]),
                call(&[("ID", FormatValue::String("NaN".into()))]),
                call(&[("ID", FormatValue::String("cuteSV_INS_9".into()))]),
                call(&[("ID", FormatValue::String("sniffles_INS_2".into()))]),
            ],
            ..Default::default()
        };
        let info = InfoMap::from([
            ("SUPP_VEC".to_string(), InfoValue::string("1011")),
            ("STRANDS".to_string(), InfoValue::string("+-")),
            ("SVMETHOD".to_string(), InfoValue::string("SURVIVOR1.0.7")),
        ]);
        let fields = MergeConvention::Survivor.extract_type_specific_fields(&info, &record);
        assert_eq!(fields.supp_callers.as_deref(), Some("cuteSV,sniffles"));
        assert_eq!(fields.supp_vec.as_deref(), Some("1011"));
        assert_eq!(fields.strands.as_deref(), Some("+-"));
        assert_eq!(fields.svmethod.as_deref(), Some("SURVIVOR1.0.7"));
    }

    #[test]
    fn bcf_has_no_convention_fields() {
        let record = RawRecord {
            ids: vec!["dysgu_DEL".into()],
            ..Default::default()
        };
        assert_eq!(
            MergeConvention::Bcf.extract_type_specific_fields(&InfoMap::new(), &record),
            ConventionFields::default()
        );
    }

    #[test]
    fn bcf_joins_samples_and_collapses_all_missing() {
        let record = RawRecord {
            format: vec!["GT".into(), "DR".into(), "QV".into(), "ID".into()],
            calls: vec![
                call(&[
                    ("GT", FormatValue::String("0/1".into())),
                    ("DR", FormatValue::Integer(vec![Some(0), Some(3)])),
                    ("QV", FormatValue::String("NaN".into())),
                    ("ID", FormatValue::String("x".into())),
                ]),
                call(&[
                    ("GT", FormatValue::String("1/1".into())),
                    ("DR", FormatValue::Missing),
                    ("QV", FormatValue::Float(vec![Some(f64::NAN)])),
                ]),
            ],
            ..Default::default()
        };
        let fields = MergeConvention::Bcf.process_sample_fields(&record, &samples(2));
        assert_eq!(fields["GT"], "0/1 | 1/1");
        assert_eq!(fields["DR"], "0,3 | .");
        assert_eq!(fields["QV"], ".");
        assert!(!fields.contains_key("ID"));
        assert_eq!(fields["PR"], "-");
        assert_eq!(fields["SR"], "-");
        assert_eq!(fields["GQ"], "-");
    }

    #[test]
    fn survivor_flattens_active_sample_only() {
        let record = RawRecord {
            info: InfoMap::from([("SUPP_VEC".to_string(), InfoValue::string("0100"))]),
            format: vec!["GT".into(), "QV".into(), "PR".into()],
            calls: vec![
                call(&[
                    ("GT", FormatValue::String("./.".into())),
                    ("QV", FormatValue::String("NaN".into())),
                ]),
                call(&[
                    ("GT", FormatValue::String("0/1".into())),
                    ("QV", FormatValue::Integer(vec![Some(162)])),
                    ("PR", FormatValue::String("NULL".into())),
                ]),
                call(&[("GT", FormatValue::String("1/1".into()))]),
                call(&[]),
            ],
            ..Default::default()
        };
        let fields = MergeConvention::Survivor.process_sample_fields(&record, &samples(4));
        assert_eq!(fields["GT"], "0/1");
        assert_eq!(fields["QV"], "162");
        assert_eq!(fields["PR"], ".");
        assert_eq!(fields["SR"], "-");
        assert_eq!(fields["GQ"], "-");
    }

    #[test]
    fn aggregation_only_for_bcf() {
        assert!(MergeConvention::Bcf.should_aggregate());
        assert!(!MergeConvention::Survivor.should_aggregate());
    }

    #[test]
    fn convention_parses_case_insensitively() {
        assert_eq!(
            "BCF".parse::<MergeConvention>().unwrap(),
            MergeConvention::Bcf
        );
        assert_eq!(
            "Survivor".parse::<MergeConvention>().unwrap(),
            MergeConvention::Survivor
        );
        assert!("jasmine".parse::<MergeConvention>().is_err());
        assert_eq!(MergeConvention::Survivor.to_string(), "survivor");
    }
}
