use crate::{
    constants::MISSING_VALUE,
    core::{
        aggregator::RunStatistics,
        variant::{EnrichmentDataset, NormalizedVariant},
    },
    utils::util::Result,
};
use std::{collections::BTreeSet, path::Path};

/// Leading columns of the exported table; sample FORMAT columns follow in
/// sorted order.
pub const TABLE_COLUMNS: [&str; 24] = [
    "CHROM",
    "POSITION",
    "ID",
    "REF",
    "ALT",
    "QUAL",
    "FILTER",
    "SVTYPE",
    "SVLEN",
    "END",
    "IMPRECISE",
    "PRECISE",
    "CHROM2",
    "MATE_ID",
    "HOMLEN",
    "HOMSEQ",
    "PRIMARY_CALLER",
    "SUPP_CALLERS",
    "NUM_CALLERS",
    "CIPOS",
    "CIEND",
    "SUPP_VEC",
    "STRANDS",
    "SVMETHOD",
];

fn opt<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| MISSING_VALUE.to_string(), ToString::to_string)
}

fn row(variant: &NormalizedVariant, sample_columns: &[&str]) -> Vec<String> {
    let mut row = vec![
        variant.chrom.clone(),
        variant.position.to_string(),
        opt(&variant.id),
        variant.reference.clone(),
        opt(&variant.alt),
        opt(&variant.qual),
        opt(&variant.filter),
        opt(&variant.svtype),
        opt(&variant.svlen),
        opt(&variant.end),
        variant.imprecise.to_string(),
        variant.precise.to_string(),
        opt(&variant.chrom2),
        opt(&variant.mate_id),
        opt(&variant.homlen),
        opt(&variant.homseq),
        opt(&variant.primary_caller),
        opt(&variant.supp_callers),
        opt(&variant.num_callers),
        opt(&variant.cipos),
        opt(&variant.ciend),
        opt(&variant.supp_vec),
        opt(&variant.strands),
        opt(&variant.svmethod),
    ];
    row.extend(sample_columns.iter().map(|column| {
        variant
            .sample_fields
            .get(*column)
            .cloned()
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    }));
    row
}

/// Tab-separated export of the dataset, one row per retained variant.
pub fn write_dataset_table(dataset: &EnrichmentDataset, path: &Path) -> Result<()> {
    let sample_columns = dataset
        .variants
        .iter()
        .flat_map(|variant| variant.sample_fields.keys().map(String::as_str))
        .filter(|column| !TABLE_COLUMNS.contains(column))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;
    writer.write_record(TABLE_COLUMNS.iter().copied().chain(sample_columns.iter().copied()))?;
    for variant in &dataset.variants {
        writer.write_record(row(variant, &sample_columns))?;
    }
    writer.flush()?;
    log::debug!(
        "Wrote {} rows to {}",
        dataset.len(),
        path.display()
    );
    Ok(())
}

/// One-row TSV of run counters.
pub fn write_statistics(stats: &RunStatistics, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;
    writer.serialize(stats)?;
    writer.flush()?;
    Ok(())
}
