use crate::error::VarifyResult;
use std::{
    fmt::{Binary, Display},
    sync::Once,
};

pub type Result<T> = VarifyResult<T>;

pub const MISSING_INTEGER: i32 = i32::MIN;
pub const VECTOR_END_INTEGER: i32 = i32::MIN + 1;
pub const MISSING_FLOAT: f32 = f32::from_bits(0x7F80_0001);
pub const VECTOR_END_FLOAT: f32 = f32::from_bits(0x7F80_0002);

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .try_init();
    });
}

pub fn handle_error_and_exit(err: impl Display) -> ! {
    log::error!("{err}");
    std::process::exit(1);
}

pub fn is_missing_float(value: f32) -> bool {
    value.to_bits() == MISSING_FLOAT.to_bits() || value.to_bits() == VECTOR_END_FLOAT.to_bits()
}

pub fn to_info_i32(value: i64, label: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        crate::varify_error!(
            "Cannot write {label}={value} to INFO as i32: value is outside supported range"
        )
    })
}

/// True for the textual null sentinels callers and merge tools emit.
pub fn is_null_sentinel(value: &str) -> bool {
    matches!(value.to_ascii_uppercase().as_str(), "NULL" | "NAN" | "NA")
}

pub fn format_number_with_commas<T>(n: T) -> String
where
    T: Display + Binary,
{
    let s = n.to_string();
    let (sign, digits) = s.strip_prefix('-').map_or(("", s.as_str()), |d| ("-", d));

    if let 0..=3 = digits.len() {
        return s;
    }

    let mut result = String::with_capacity(digits.len() + (digits.len() - 1) / 3 + sign.len());
    for (digit_count, c) in digits.chars().rev().enumerate() {
        if digit_count > 0 && digit_count % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result = result.chars().rev().collect();
    if !sign.is_empty() {
        result.insert_str(0, sign);
    }

    result
}
