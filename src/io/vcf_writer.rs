use crate::{
    constants::*,
    core::{
        convention::active_sample_index,
        variant::{EnrichmentDataset, NormalizedVariant},
    },
    io::output_sort::{finalize_output, FinalizeOutcome},
    utils::util::{
        is_null_sentinel, to_info_i32, Result, MISSING_FLOAT, MISSING_INTEGER, VECTOR_END_FLOAT,
        VECTOR_END_INTEGER,
    },
};
use rust_htslib::bcf::{
    self,
    header::{HeaderView, TagType},
    Read,
};
use std::{
    fs, iter,
    path::{Path, PathBuf},
};

/// Where enriched files land: `<output_dir>/<subdir>/<prefix><basename>`.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    /// Empty writes straight into `output_dir`.
    pub subdir: String,
    pub prefix: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            subdir: DEFAULT_SUBDIR.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl OutputOptions {
    pub fn output_dir(&self) -> PathBuf {
        if self.subdir.is_empty() {
            self.output_dir.clone()
        } else {
            self.output_dir.join(&self.subdir)
        }
    }

    /// Output file for `original`, with a trailing `.gz` dropped from its name.
    pub fn output_path(&self, original: &Path) -> PathBuf {
        let basename = original
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let basename = basename.strip_suffix(".gz").unwrap_or(&basename);
        self.output_dir().join(format!("{}{basename}", self.prefix))
    }
}

#[derive(Debug, Clone)]
pub struct WriteOutcome {
    pub records: usize,
    /// Compressed file when finalization succeeded, the plain VCF otherwise.
    pub path: PathBuf,
    pub finalize: Option<FinalizeOutcome>,
}

/// Re-serializes an input VCF with the computed fields of its dataset.
pub struct EnrichedVcfWriter {
    original: PathBuf,
    output_path: PathBuf,
}

enum InfoWrite {
    Integer(Vec<i64>),
    String(Vec<String>),
    Flag,
}

impl EnrichedVcfWriter {
    pub fn new(original: &Path, options: &OutputOptions) -> Result<Self> {
        let output_dir = options.output_dir();
        fs::create_dir_all(&output_dir).map_err(|e| {
            crate::varify_error!(
                "Failed to create output directory {}: {e}",
                output_dir.display()
            )
        })?;
        Ok(Self {
            original: original.to_path_buf(),
            output_path: options.output_path(original),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes every input record, in input order, and returns how many were
    /// written. Records without a dataset row pass through untouched.
    pub fn write(&self, dataset: Option<&EnrichmentDataset>) -> Result<usize> {
        let dataset = dataset.filter(|dataset| !dataset.is_empty());
        if dataset.is_none() {
            log::warn!(
                "No data to enrich; writing original records only to {}",
                self.output_path.display()
            );
        }
        let lookup = dataset.map(EnrichmentDataset::lookup).unwrap_or_default();

        let mut reader = bcf::Reader::from_path(&self.original).map_err(|e| {
            crate::varify_error!("Failed to reopen {}: {e}", self.original.display())
        })?;
        let header = enriched_header(reader.header());
        let mut writer =
            bcf::Writer::from_path(&self.output_path, &header, true, bcf::Format::Vcf).map_err(
                |e| {
                    crate::varify_error!(
                        "Failed to create writer for {}: {e}",
                        self.output_path.display()
                    )
                },
            )?;

        let mut n_records = 0;
        let mut record = reader.empty_record();
        while let Some(result) = reader.read(&mut record) {
            result.map_err(|e| {
                crate::varify_error!(
                    "Error reading record {n_records} from {}: {e}",
                    self.original.display()
                )
            })?;
            writer.translate(&mut record);

            let chrom = match record.rid() {
                Some(rid) => String::from_utf8_lossy(writer.header().rid2name(rid)?).into_owned(),
                None => String::new(),
            };
            if let Some(variant) = lookup.get(&(chrom, record.pos() + 1)) {
                update_info(&mut record, writer.header(), variant)?;
                update_format(&mut record, writer.header(), variant)?;
                normalize_format_ids(&mut record)?;
            }

            writer.write(&record)?;
            n_records += 1;
        }

        log::info!(
            "Wrote {n_records} enriched records to {}",
            self.output_path.display()
        );
        Ok(n_records)
    }

    /// `write` followed, when `compress` is set, by sort, bgzip and tabix.
    pub fn write_and_compress(
        &self,
        dataset: Option<&EnrichmentDataset>,
        compress: bool,
        keep_uncompressed: bool,
    ) -> Result<WriteOutcome> {
        let records = self.write(dataset)?;
        if !compress {
            return Ok(WriteOutcome {
                records,
                path: self.output_path.clone(),
                finalize: None,
            });
        }

        let outcome = finalize_output(&self.output_path, keep_uncompressed);
        let path = outcome
            .compressed_path
            .clone()
            .unwrap_or_else(|| self.output_path.clone());
        Ok(WriteOutcome {
            records,
            path,
            finalize: Some(outcome),
        })
    }
}

/// Template of the input header plus the computed INFO declarations it lacks.
fn enriched_header(template: &HeaderView) -> bcf::Header {
    let mut header = bcf::Header::from_template(template);
    for (tag, line) in [
        ("SUPP_CALLERS", SUPP_CALLERS_HEADER),
        ("PRIMARY_CALLER", PRIMARY_CALLER_HEADER),
        ("NUM_CALLERS", NUM_CALLERS_HEADER),
        ("CIPOS", CIPOS_HEADER),
        ("CIEND", CIEND_HEADER),
    ] {
        if template.info_type(tag.as_bytes()).is_err() {
            log::debug!("Declaring INFO/{tag} in enriched header");
            header.push_record(line);
        }
    }
    header
}

/// Pushes `value` under `tag`, converted to the type the header declares.
/// Undeclared tags and values that do not fit the declaration are skipped.
fn write_info(
    record: &mut bcf::Record,
    header: &HeaderView,
    tag: &str,
    value: InfoWrite,
) -> Result<()> {
    let Ok((tag_type, _)) = header.info_type(tag.as_bytes()) else {
        log::debug!("INFO/{tag} is not declared; leaving it unset");
        return Ok(());
    };
    let key = tag.as_bytes();
    match (tag_type, value) {
        (TagType::Flag, InfoWrite::Flag) => record.push_info_flag(key)?,
        (TagType::Integer, InfoWrite::Integer(values)) => {
            let values = values
                .into_iter()
                .map(|value| to_info_i32(value, tag))
                .collect::<Result<Vec<_>>>()?;
            record.push_info_integer(key, &values)?;
        }
        (TagType::Float, InfoWrite::Integer(values)) => {
            let values = values.into_iter().map(|v| v as f32).collect::<Vec<_>>();
            record.push_info_float(key, &values)?;
        }
        (TagType::String, InfoWrite::Integer(values)) => {
            let values = values.iter().map(i64::to_string).collect::<Vec<_>>();
            push_info_strings(record, key, &values)?;
        }
        (TagType::String, InfoWrite::String(values)) => push_info_strings(record, key, &values)?,
        (TagType::Integer, InfoWrite::String(values)) => {
            match values
                .iter()
                .map(|value| value.parse::<i32>())
                .collect::<std::result::Result<Vec<_>, _>>()
            {
                Ok(values) => record.push_info_integer(key, &values)?,
                Err(e) => log::debug!("INFO/{tag}={values:?} is not an integer: {e}"),
            }
        }
        (tag_type, _) => log::debug!("INFO/{tag} declared as {tag_type:?}; value not written"),
    }
    Ok(())
}

fn push_info_strings(record: &mut bcf::Record, key: &[u8], values: &[String]) -> Result<()> {
    let values = values.iter().map(String::as_bytes).collect::<Vec<_>>();
    record.push_info_string(key, &values)?;
    Ok(())
}

fn update_info(
    record: &mut bcf::Record,
    header: &HeaderView,
    variant: &NormalizedVariant,
) -> Result<()> {
    let strings = |value: &Option<String>| value.clone().map(|value| InfoWrite::String(vec![value]));
    let integer = |value: Option<i64>| value.map(|value| InfoWrite::Integer(vec![value]));

    let svlen = variant.svlen.map(i64::try_from).transpose()?;
    let writable = [
        ("SVTYPE", strings(&variant.svtype)),
        ("SVLEN", integer(svlen)),
        ("END", integer(variant.end)),
        ("CHR2", strings(&variant.chrom2)),
        ("MATEID", strings(&variant.mate_id)),
        ("HOMLEN", integer(variant.homlen)),
        ("HOMSEQ", strings(&variant.homseq)),
        ("IMPRECISE", variant.imprecise.then_some(InfoWrite::Flag)),
        ("PRECISE", variant.precise.then_some(InfoWrite::Flag)),
        (
            "CIPOS",
            variant
                .cipos
                .map(|ci| InfoWrite::Integer(ci.as_array().to_vec())),
        ),
        (
            "CIEND",
            variant
                .ciend
                .map(|ci| InfoWrite::Integer(ci.as_array().to_vec())),
        ),
        ("PRIMARY_CALLER", strings(&variant.primary_caller)),
    ];
    for (tag, value) in writable {
        if let Some(value) = value {
            write_info(record, header, tag, value)?;
        }
    }

    if let Some(supp_callers) = variant.supp_callers.as_deref() {
        let callers = supp_callers
            .split(',')
            .map(str::to_string)
            .collect::<Vec<_>>();
        let num_callers = callers
            .iter()
            .filter(|caller| !caller.trim().is_empty())
            .count();
        write_info(record, header, "SUPP_CALLERS", InfoWrite::String(callers))?;
        write_info(
            record,
            header,
            "NUM_CALLERS",
            InfoWrite::Integer(vec![num_callers as i64]),
        )?;
    }
    Ok(())
}

/// The one sample whose FORMAT values are rewritten: the first `1` in
/// `SUPP_VEC` for multi-sample records, sample 0 otherwise.
fn target_sample(record: &bcf::Record, variant: &NormalizedVariant) -> usize {
    if record.sample_count() > 1 {
        active_sample_index(variant.supp_vec.as_deref())
    } else {
        0
    }
}

fn update_format(
    record: &mut bcf::Record,
    header: &HeaderView,
    variant: &NormalizedVariant,
) -> Result<()> {
    let n_samples = record.sample_count() as usize;
    let target = target_sample(record, variant);
    if target >= n_samples {
        return Ok(());
    }

    for tag in WRITABLE_FORMAT_FIELDS {
        // GT is carried in its rendered form and left as encoded.
        if tag == "GT" {
            continue;
        }
        let Some(value) = variant.sample_fields.get(tag) else {
            continue;
        };
        let value = if is_null_sentinel(value) {
            MISSING_VALUE
        } else {
            value.as_str()
        };
        if value == ABSENT_FORMAT_VALUE || value.contains(SAMPLE_SEPARATOR) {
            continue;
        }
        let Ok((tag_type, _)) = header.format_type(tag.as_bytes()) else {
            continue;
        };
        rewrite_format_value(record, tag, tag_type, target, value)?;
    }
    Ok(())
}

/// Replaces one sample's value of a FORMAT tag already present on the record.
fn rewrite_format_value(
    record: &mut bcf::Record,
    tag: &str,
    tag_type: TagType,
    target: usize,
    value: &str,
) -> Result<()> {
    let key = tag.as_bytes();
    let tokens = if value == MISSING_VALUE {
        Vec::new()
    } else {
        value.split(',').collect::<Vec<_>>()
    };

    match tag_type {
        TagType::Integer => {
            let mut per_sample = match record.format(key).integer() {
                Ok(current) => current.iter().map(|v| v.to_vec()).collect::<Vec<_>>(),
                Err(_) => return Ok(()),
            };
            let Ok(parsed) = tokens
                .iter()
                .map(|token| match *token {
                    MISSING_VALUE => Ok(MISSING_INTEGER),
                    token => token.parse::<i32>(),
                })
                .collect::<std::result::Result<Vec<_>, _>>()
            else {
                log::debug!("FORMAT/{tag}={value} is not an integer list; left as is");
                return Ok(());
            };
            per_sample[target] = parsed;
            record.push_format_integer(key, &flatten_integer_values(&per_sample))?;
        }
        TagType::Float => {
            let mut per_sample = match record.format(key).float() {
                Ok(current) => current.iter().map(|v| v.to_vec()).collect::<Vec<_>>(),
                Err(_) => return Ok(()),
            };
            let Ok(parsed) = tokens
                .iter()
                .map(|token| match *token {
                    MISSING_VALUE => Ok(MISSING_FLOAT),
                    token => token.parse::<f32>(),
                })
                .collect::<std::result::Result<Vec<_>, _>>()
            else {
                log::debug!("FORMAT/{tag}={value} is not a float list; left as is");
                return Ok(());
            };
            per_sample[target] = parsed;
            record.push_format_float(key, &flatten_float_values(&per_sample))?;
        }
        TagType::String => {
            let mut per_sample = match record.format(key).string() {
                Ok(current) => current.iter().map(|v| v.to_vec()).collect::<Vec<_>>(),
                Err(_) => return Ok(()),
            };
            per_sample[target] = value.as_bytes().to_vec();
            record.push_format_string(key, &per_sample)?;
        }
        TagType::Flag => {}
    }
    Ok(())
}

/// FORMAT `ID` values of `NaN`/`NA` become `.` on every sample.
fn normalize_format_ids(record: &mut bcf::Record) -> Result<()> {
    let mut per_sample = match record.format(b"ID").string() {
        Ok(current) => current.iter().map(|v| v.to_vec()).collect::<Vec<_>>(),
        Err(_) => return Ok(()),
    };
    let mut changed = false;
    for value in &mut per_sample {
        let text = String::from_utf8_lossy(value);
        if matches!(text.trim_end_matches('\0').to_ascii_uppercase().as_str(), "NAN" | "NA") {
            *value = MISSING_VALUE.as_bytes().to_vec();
            changed = true;
        }
    }
    if changed {
        record.push_format_string(b"ID", &per_sample)?;
    }
    Ok(())
}

fn flatten_integer_values(values_per_sample: &[Vec<i32>]) -> Vec<i32> {
    let max_len = values_per_sample
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(1)
        .max(1);
    let mut flattened = Vec::with_capacity(values_per_sample.len() * max_len);
    for values in values_per_sample {
        if values.is_empty() {
            flattened.push(MISSING_INTEGER);
            flattened.extend(iter::repeat_n(VECTOR_END_INTEGER, max_len - 1));
            continue;
        }
        flattened.extend(values.iter().copied());
        flattened.extend(iter::repeat_n(VECTOR_END_INTEGER, max_len - values.len()));
    }
    flattened
}

fn flatten_float_values(values_per_sample: &[Vec<f32>]) -> Vec<f32> {
    let max_len = values_per_sample
        .iter()
        .map(Vec::len)
        .max()
        .unwrap_or(1)
        .max(1);
    let mut flattened = Vec::with_capacity(values_per_sample.len() * max_len);
    for values in values_per_sample {
        if values.is_empty() {
            flattened.push(MISSING_FLOAT);
            flattened.extend(iter::repeat_n(VECTOR_END_FLOAT, max_len - 1));
            continue;
        }
        flattened.extend(values.iter().copied());
        flattened.extend(iter::repeat_n(VECTOR_END_FLOAT, max_len - values.len()));
    }
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{convention::MergeConvention, pipeline::parse_vcf},
        utils::test_utils::{data_lines, header_lines, make_temp_vcf, sv_vcf},
    };
    use tempfile::TempDir;

    fn options(dir: &TempDir) -> OutputOptions {
        OutputOptions {
            output_dir: dir.path().join("out"),
            ..Default::default()
        }
    }

    fn enrich(dir: &TempDir, input: &Path, convention: MergeConvention) -> PathBuf {
        let (dataset, _) = parse_vcf(input, convention).unwrap();
        let writer = EnrichedVcfWriter::new(input, &options(dir)).unwrap();
        writer.write(Some(&dataset)).unwrap();
        writer.output_path().to_path_buf()
    }

    #[test]
    fn output_path_strips_gz_and_adds_prefix() {
        let options = OutputOptions {
            output_dir: PathBuf::from("/tmp/run"),
            ..Default::default()
        };
        assert_eq!(
            options.output_path(Path::new("/data/merged.vcf.gz")),
            PathBuf::from("/tmp/run/genome_files/enriched_merged.vcf")
        );
        let flat = OutputOptions {
            output_dir: PathBuf::from("/tmp/run"),
            subdir: String::new(),
            prefix: "x_".into(),
        };
        assert_eq!(
            flat.output_path(Path::new("merged.vcf")),
            PathBuf::from("/tmp/run/x_merged.vcf")
        );
    }

    #[test]
    fn writes_computed_fields_and_keeps_every_record() {
        let dir = TempDir::new().unwrap();
        let contents = sv_vcf(
            &["S1"],
            &[
                "chr1\t1000\tdelly_1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SVLEN=-300;END=1300;CALLER=delly\tGT:DR\t0/1:5",
                "chr1\t1000\tdysgu_1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SVLEN=-300;END=1300;CALLER=dysgu;CIPOS95=20\tGT:DR\t0/1:6",
                "chr1\t5000\tnolen\tN\t<DUP>\t.\tPASS\tSVTYPE=DUP;CALLER=delly\tGT:DR\t0/1:7",
            ],
        );
        let input = make_temp_vcf(&dir, "bcf.vcf", &contents);
        let output = enrich(&dir, &input, MergeConvention::Bcf);

        let lines = data_lines(&output);
        assert_eq!(lines.len(), 3);
        // Both rows share a key; the later (dysgu) row wins.
        for line in &lines[..2] {
            assert!(line.contains("SVLEN=300"), "{line}");
            assert!(line.contains("SUPP_CALLERS=delly,dysgu"), "{line}");
            assert!(line.contains("NUM_CALLERS=2"), "{line}");
            assert!(line.contains("PRIMARY_CALLER=dysgu"), "{line}");
            assert!(line.contains("CIPOS=990,1010"), "{line}");
        }
        assert!(lines[2].contains("SVTYPE=DUP;CALLER=delly"), "{}", lines[2]);
        assert!(!lines[2].contains("SUPP_CALLERS"), "{}", lines[2]);
    }

    #[test]
    fn header_enrichment_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let contents = sv_vcf(
            &["S1"],
            &["chr1\t1000\tdelly_1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SVLEN=-300;CALLER=delly\tGT\t0/1"],
        );
        let input = make_temp_vcf(&dir, "bcf.vcf", &contents);
        let first = enrich(&dir, &input, MergeConvention::Bcf);

        let rerun_input = make_temp_vcf(&dir, "again.vcf", &std::fs::read_to_string(&first).unwrap());
        let second = enrich(&dir, &rerun_input, MergeConvention::Bcf);

        let count = |lines: &[String], id: &str| {
            lines
                .iter()
                .filter(|line| line.starts_with(&format!("##INFO=<ID={id},")))
                .count()
        };
        let first_header = header_lines(&first);
        let second_header = header_lines(&second);
        for id in ["SUPP_CALLERS", "PRIMARY_CALLER", "NUM_CALLERS", "CIPOS"] {
            assert_eq!(count(&first_header, id), 1, "{id}");
            assert_eq!(count(&second_header, id), 1, "{id}");
        }
        assert_eq!(data_lines(&first), data_lines(&second));
    }

    #[test]
    fn empty_dataset_writes_original_records() {
        let dir = TempDir::new().unwrap();
        let contents = sv_vcf(
            &["S1"],
            &["chr1\t1000\tx\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;CALLER=delly\tGT\t0/1"],
        );
        let input = make_temp_vcf(&dir, "bcf.vcf", &contents);
        let writer = EnrichedVcfWriter::new(&input, &options(&dir)).unwrap();
        assert_eq!(writer.write(None).unwrap(), 1);
        let lines = data_lines(writer.output_path());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("SVTYPE=DEL;CALLER=delly"));
    }

    #[test]
    fn survivor_rewrites_active_sample_and_cleans_ids() {
        let dir = TempDir::new().unwrap();
        let contents = sv_vcf(
            &["delly", "dysgu", "manta"],
            &["chr1\t2000\tdysgu_DEL_1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SVLEN=-80;SUPP_VEC=011\tGT:ID:DR\t./.:NaN:.\t0/1:dysgu_DEL_1:9\t0/1:manta_DEL_3:4"],
        );
        let input = make_temp_vcf(&dir, "survivor.vcf", &contents);
        let output = enrich(&dir, &input, MergeConvention::Survivor);

        let lines = data_lines(&output);
        assert_eq!(lines.len(), 1);
        let columns = lines[0].split('\t').collect::<Vec<_>>();
        assert!(columns[7].contains("SUPP_CALLERS=dysgu,manta"), "{}", columns[7]);
        assert!(columns[7].contains("NUM_CALLERS=2"), "{}", columns[7]);
        assert!(columns[7].contains("PRIMARY_CALLER=dysgu"), "{}", columns[7]);
        assert_eq!(columns[9], "./.:.:.");
        assert_eq!(columns[10], "0/1:dysgu_DEL_1:9");
        assert_eq!(columns[11], "0/1:manta_DEL_3:4");
    }

    #[test]
    fn partially_missing_format_list_survives_rewrite() {
        let dir = TempDir::new().unwrap();
        let contents = sv_vcf(
            &["S1"],
            &["chr1\t1000\tdelly_1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SVLEN=-300;CALLER=delly\tGT:AD:DR\t0/1:.,5:3"],
        );
        let input = make_temp_vcf(&dir, "bcf.vcf", &contents);
        let output = enrich(&dir, &input, MergeConvention::Bcf);

        let lines = data_lines(&output);
        let columns = lines[0].split('\t').collect::<Vec<_>>();
        assert_eq!(columns[8], "GT:AD:DR");
        assert_eq!(columns[9], "0/1:.,5:3");
    }

    #[test]
    fn unmatched_record_is_written_unchanged() {
        let dir = TempDir::new().unwrap();
        let line = "chr1\t3000\tdelly_DEL_2\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;SUPP_VEC=10\tGT:ID\t0/1:delly_DEL_2\t./.:NaN";
        let contents = sv_vcf(&["delly", "dysgu"], &[line]);
        let input = make_temp_vcf(&dir, "survivor.vcf", &contents);
        let (dataset, stats) = parse_vcf(&input, MergeConvention::Survivor).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(stats.invalid, 1);

        let writer = EnrichedVcfWriter::new(&input, &options(&dir)).unwrap();
        writer.write(Some(&dataset)).unwrap();
        assert_eq!(data_lines(writer.output_path()), vec![line.to_string()]);
    }

    #[test]
    fn writes_back_breakend_and_flag_fields() {
        let dir = TempDir::new().unwrap();
        let contents = sv_vcf(
            &["S1"],
            &[
                "chr1\t1000\tsn_bnd1\tN\tN]chr2:500]\t.\tPASS\tSVTYPE=BND;SVLEN=0;END=2000;CHR2=chr2;MATEID=sn_bnd2;HOMLEN=3;HOMSEQ=ACG;IMPRECISE;CALLER=Sniffles2;CIEND_STD=5.0\tGT\t0/1",
                "chr2\t500\tsn_bnd2\tN\tN]chr1:1000]\t.\tPASS\tSVTYPE=BND;SVLEN=0;CHR2=chr1;MATEID=sn_bnd1;PRECISE;CALLER=Sniffles2\tGT\t0/1",
            ],
        );
        let input = make_temp_vcf(&dir, "bnd.vcf", &contents);
        let output = enrich(&dir, &input, MergeConvention::Bcf);

        let lines = data_lines(&output);
        assert_eq!(lines.len(), 2);
        let info = |line: &str| {
            line.split('\t').nth(7).unwrap().split(';').map(str::to_string).collect::<Vec<_>>()
        };

        let first = info(&lines[0]);
        for tag in [
            "SVTYPE=BND",
            "SVLEN=0",
            "END=2000",
            "CHR2=chr2",
            "MATEID=sn_bnd2",
            "HOMLEN=3",
            "HOMSEQ=ACG",
            "IMPRECISE",
            "CIEND=1990,2010",
            "PRIMARY_CALLER=Sniffles2",
        ] {
            assert!(first.iter().any(|field| field == tag), "{tag} in {first:?}");
        }
        assert!(!first.iter().any(|field| field == "PRECISE"), "{first:?}");

        let second = info(&lines[1]);
        for tag in ["CHR2=chr1", "MATEID=sn_bnd1", "PRECISE"] {
            assert!(second.iter().any(|field| field == tag), "{tag} in {second:?}");
        }
        assert!(!second.iter().any(|field| field == "IMPRECISE"), "{second:?}");
        assert!(!second.iter().any(|field| field.starts_with("CIEND=")), "{second:?}");
        assert!(!second.iter().any(|field| field.starts_with("HOMLEN=")), "{second:?}");
    }

    #[test]
    fn flatten_pads_short_samples_with_vector_end() {
        let flattened = flatten_integer_values(&[vec![1, 2], vec![], vec![3]]);
        assert_eq!(
            flattened,
            vec![
                1,
                2,
                MISSING_INTEGER,
                VECTOR_END_INTEGER,
                3,
                VECTOR_END_INTEGER
            ]
        );
    }
}
