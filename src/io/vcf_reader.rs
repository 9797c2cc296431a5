use crate::{
    core::record::{FormatValue, InfoMap, InfoValue, RawRecord, SampleCall},
    error::VarifyError,
    utils::util::{
        is_missing_float, Result, MISSING_INTEGER, VECTOR_END_FLOAT, VECTOR_END_INTEGER,
    },
};
use rust_htslib::bcf::{
    self,
    header::{HeaderRecord, HeaderView, TagType},
    Read,
};
use std::path::{Path, PathBuf};

/// Streams a (possibly bgzipped) VCF into `RawRecord`s, typing every INFO and
/// FORMAT value from its header declaration.
pub struct VcfReader {
    path: PathBuf,
    reader: Option<bcf::Reader>,
    pub samples: Vec<String>,
    /// Declared INFO ids, in header order.
    pub info_columns: Vec<String>,
    info_types: Vec<(String, TagType)>,
    format_types: Vec<(String, TagType)>,
    next_index: usize,
}

fn parse_header_tag_type(type_name: &str) -> Option<TagType> {
    match type_name {
        "Integer" => Some(TagType::Integer),
        "Float" => Some(TagType::Float),
        "String" | "Character" => Some(TagType::String),
        "Flag" => Some(TagType::Flag),
        _ => None,
    }
}

/// `(ID, Type)` of every INFO (or FORMAT) declaration. Declarations with an
/// unknown type are skipped.
fn declared_tags(header: &HeaderView, info: bool) -> Vec<(String, TagType)> {
    let mut tags = Vec::new();
    for record in header.header_records() {
        let values = match (record, info) {
            (HeaderRecord::Info { values, .. }, true) => values,
            (HeaderRecord::Format { values, .. }, false) => values,
            _ => continue,
        };
        let (Some(id), Some(type_name)) = (values.get("ID"), values.get("Type")) else {
            continue;
        };
        match parse_header_tag_type(type_name) {
            Some(tag_type) => tags.push((id.clone(), tag_type)),
            None => log::debug!("Skipping tag {id} with unsupported type {type_name}"),
        }
    }
    tags
}

fn utf8_lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches('\0')
        .to_string()
}

fn integer_values(values: &[i32]) -> Vec<i64> {
    values
        .iter()
        .take_while(|value| **value != VECTOR_END_INTEGER)
        .filter(|value| **value != MISSING_INTEGER)
        .map(|value| i64::from(*value))
        .collect()
}

fn float_values(values: &[f32]) -> Vec<f64> {
    values
        .iter()
        .filter(|value| !is_missing_float(**value))
        .map(|value| f64::from(*value))
        .collect()
}

/// Per-sample FORMAT vector up to the vector-end padding, with missing
/// elements kept in place. `None` when nothing is set.
fn format_integer_values(values: &[i32]) -> Option<Vec<Option<i64>>> {
    let values = values
        .iter()
        .take_while(|value| **value != VECTOR_END_INTEGER)
        .map(|value| (*value != MISSING_INTEGER).then(|| i64::from(*value)))
        .collect::<Vec<_>>();
    values.iter().any(Option::is_some).then_some(values)
}

fn format_float_values(values: &[f32]) -> Option<Vec<Option<f64>>> {
    let values = values
        .iter()
        .take_while(|value| value.to_bits() != VECTOR_END_FLOAT.to_bits())
        .map(|value| (!is_missing_float(*value)).then(|| f64::from(*value)))
        .collect::<Vec<_>>();
    values.iter().any(Option::is_some).then_some(values)
}

impl VcfReader {
    pub fn new(path: &Path) -> Result<Self> {
        log::trace!("Start loading VCF {:?}", path);
        let reader = bcf::Reader::from_path(path)
            .map_err(|e| VarifyError::format(path, format!("failed to open: {e}")))?;

        let header = reader.header();
        let samples = header
            .samples()
            .iter()
            .map(|sample| utf8_lossy(sample))
            .collect::<Vec<_>>();
        let info_types = declared_tags(header, true);
        let format_types = declared_tags(header, false);
        let info_columns = info_types.iter().map(|(id, _)| id.clone()).collect();

        log::debug!(
            "{}: {} samples, {} INFO and {} FORMAT declarations",
            path.display(),
            samples.len(),
            info_types.len(),
            format_types.len()
        );
        Ok(Self {
            path: path.to_path_buf(),
            reader: Some(reader),
            samples,
            info_columns,
            info_types,
            format_types,
            next_index: 0,
        })
    }

    pub fn declares_info(&self, tag: &str) -> bool {
        self.info_columns.iter().any(|column| column == tag)
    }

    /// Releases the file handle. Safe to call more than once.
    pub fn close(&mut self) {
        if self.reader.take().is_some() {
            log::trace!("Closed VCF {:?}", self.path);
        }
    }

    fn decode(&self, record: &bcf::Record) -> Result<RawRecord> {
        let header = record.header();
        let chrom = match record.rid() {
            Some(rid) => utf8_lossy(header.rid2name(rid)?),
            None => String::new(),
        };

        let id = record.id();
        let ids = if id.as_slice() == b"." {
            Vec::new()
        } else {
            utf8_lossy(&id).split(';').map(str::to_string).collect()
        };

        let alleles = record.alleles();
        let reference = alleles.first().map(|allele| utf8_lossy(allele)).unwrap_or_default();
        let alts = alleles
            .iter()
            .skip(1)
            .filter(|allele| **allele != b".")
            .map(|allele| utf8_lossy(allele))
            .collect();

        let qual = record.qual();
        let qual = (!is_missing_float(qual) && !qual.is_nan()).then_some(f64::from(qual));

        let filters = record
            .filters()
            .map(|filter| utf8_lossy(&header.id_to_name(filter)))
            .collect();

        let info = self.decode_info(record);
        let (format, calls) = self.decode_format(record);

        Ok(RawRecord {
            chrom,
            pos: record.pos() + 1,
            ids,
            reference,
            alts,
            qual,
            filters,
            info,
            format,
            calls,
        })
    }

    fn decode_info(&self, record: &bcf::Record) -> InfoMap {
        let mut info = InfoMap::new();
        for (tag, tag_type) in &self.info_types {
            let key = tag.as_bytes();
            let decoded = match tag_type {
                TagType::Flag => record
                    .info(key)
                    .flag()
                    .map(|set| set.then_some(InfoValue::Flag)),
                TagType::Integer => record.info(key).integer().map(|values| {
                    values
                        .map(|values| integer_values(&values))
                        .filter(|values| !values.is_empty())
                        .map(InfoValue::Integer)
                }),
                TagType::Float => record.info(key).float().map(|values| {
                    values
                        .map(|values| float_values(&values))
                        .filter(|values| !values.is_empty())
                        .map(InfoValue::Float)
                }),
                TagType::String => record.info(key).string().map(|values| {
                    values
                        .map(|values| {
                            values
                                .iter()
                                .map(|value| utf8_lossy(value))
                                .filter(|value| !value.is_empty() && value != ".")
                                .collect::<Vec<_>>()
                        })
                        .filter(|values| !values.is_empty())
                        .map(InfoValue::String)
                }),
            };
            match decoded {
                Ok(Some(value)) => {
                    info.insert(tag.clone(), value);
                }
                Ok(None) => {}
                Err(e) => {
                    log::trace!("Could not read INFO/{tag}: {e}");
                    info.insert(tag.clone(), InfoValue::Missing);
                }
            }
        }
        info
    }

    /// FORMAT tags present on the record (GT first, then header order) and one
    /// call per sample.
    fn decode_format(&self, record: &bcf::Record) -> (Vec<String>, Vec<SampleCall>) {
        let n_samples = record.sample_count() as usize;
        let mut calls = vec![SampleCall::new(); n_samples];
        let mut format = Vec::new();
        if n_samples == 0 {
            return (format, calls);
        }

        for (tag, tag_type) in &self.format_types {
            let key = tag.as_bytes();
            let per_sample: Option<Vec<FormatValue>> = if tag == "GT" {
                record.genotypes().ok().map(|genotypes| {
                    (0..n_samples)
                        .map(|i| FormatValue::String(genotypes.get(i).to_string()))
                        .collect()
                })
            } else {
                match tag_type {
                    TagType::Integer => record.format(key).integer().ok().map(|values| {
                        values
                            .iter()
                            .map(|sample| {
                                format_integer_values(sample)
                                    .map_or(FormatValue::Missing, FormatValue::Integer)
                            })
                            .collect()
                    }),
                    TagType::Float => record.format(key).float().ok().map(|values| {
                        values
                            .iter()
                            .map(|sample| {
                                format_float_values(sample)
                                    .map_or(FormatValue::Missing, FormatValue::Float)
                            })
                            .collect()
                    }),
                    TagType::String => record.format(key).string().ok().map(|values| {
                        values
                            .iter()
                            .map(|sample| match utf8_lossy(sample) {
                                value if value.is_empty() || value == "." => FormatValue::Missing,
                                value => FormatValue::String(value),
                            })
                            .collect()
                    }),
                    TagType::Flag => None,
                }
            };

            let Some(per_sample) = per_sample else {
                continue;
            };
            if tag == "GT" {
                format.insert(0, tag.clone());
            } else {
                format.push(tag.clone());
            }
            for (call, value) in calls.iter_mut().zip(per_sample) {
                call.insert(tag.clone(), value);
            }
        }
        (format, calls)
    }
}

impl Iterator for VcfReader {
    type Item = Result<(usize, RawRecord)>;

    /// Yields `(index, record)` in file order and closes the file once the last
    /// record has been read.
    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        let mut record = reader.empty_record();
        match reader.read(&mut record) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                self.close();
                return Some(Err(crate::varify_error!(
                    "Error reading record {} from {}: {e}",
                    self.next_index,
                    self.path.display()
                )));
            }
            None => {
                self.close();
                return None;
            }
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(self.decode(&record).map(|raw| (index, raw)))
    }
}
