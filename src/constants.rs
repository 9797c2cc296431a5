pub const DEFAULT_OUTPUT_DIR: &str = "out";
pub const DEFAULT_SUBDIR: &str = "genome_files";
pub const DEFAULT_PREFIX: &str = "enriched_";
pub const DEFAULT_COMPRESS: bool = true;
pub const DEFAULT_KEEP_UNCOMPRESSED: bool = true;

/// Joins one FORMAT field's values across samples in the BCF convention.
pub const SAMPLE_SEPARATOR: &str = " | ";
pub const MISSING_VALUE: &str = ".";
/// Placeholder for required FORMAT fields the file never declared.
pub const ABSENT_FORMAT_VALUE: &str = "-";

pub const REQUIRED_FORMAT_FIELDS: [&str; 4] = ["GT", "PR", "SR", "GQ"];

/// FORMAT fields the enriched writer rewrites on the active sample.
pub const WRITABLE_FORMAT_FIELDS: [&str; 20] = [
    "GT", "PSV", "LN", "DR", "ST", "QV", "TY", "RAL", "AAL", "CO", "PR", "SR", "GQ", "AF", "AD",
    "DP", "LO", "LR", "PE", "PL",
];

pub const SUPP_CALLERS_HEADER: &[u8] = br#"##INFO=<ID=SUPP_CALLERS,Number=.,Type=String,Description="Comma-separated list of supporting callers (computed)">"#;
pub const PRIMARY_CALLER_HEADER: &[u8] = br#"##INFO=<ID=PRIMARY_CALLER,Number=1,Type=String,Description="Primary variant caller (computed)">"#;
pub const NUM_CALLERS_HEADER: &[u8] = br#"##INFO=<ID=NUM_CALLERS,Number=1,Type=Integer,Description="Number of callers supporting this variant (computed)">"#;
pub const CIPOS_HEADER: &[u8] = br#"##INFO=<ID=CIPOS,Number=2,Type=Integer,Description="Confidence interval around POS (computed)">"#;
pub const CIEND_HEADER: &[u8] = br#"##INFO=<ID=CIEND,Number=2,Type=Integer,Description="Confidence interval around END (computed)">"#;
