use super::{
    aggregator::{self, RunStatistics},
    callers::CallerStrategy,
    convention::MergeConvention,
    general,
    record::{InfoValue, RawRecord},
    variant::{EnrichmentDataset, NormalizedVariant},
};
use crate::{error::VarifyError, io::vcf_reader::VcfReader, utils::util::Result};
use std::path::Path;

/// Runs one record through the general processor, the caller strategy picked
/// for it, and the merge-convention handler.
pub fn normalize_record(
    unique_id: usize,
    record: &RawRecord,
    convention: MergeConvention,
    samples: &[String],
) -> NormalizedVariant {
    let core = general::extract_core_fields(record);
    let basic = general::extract_basic_info_fields(&record.info);
    let mut svlen = general::normalize_svlen(basic.svlen.as_ref());

    let handler_caller = convention.extract_primary_caller(&record.info, record);
    let strategy = CallerStrategy::for_caller(handler_caller.as_deref());
    log::trace!(
        "Record {unique_id} at {}:{} uses {} rules",
        core.chrom,
        core.position,
        strategy.name()
    );

    let info = strategy.parse_info_fields(&record.info);
    let svtype = info
        .get("SVTYPE")
        .and_then(InfoValue::first_str)
        .or(basic.svtype);
    let (cipos, ciend) = strategy.calculate_confidence_intervals(&info, record);
    if let Some(caller_svlen) = strategy.normalize_svlen(basic.svlen.as_ref()) {
        svlen = Some(caller_svlen);
    }
    // SURVIVOR IDs without a `<caller>_` prefix still name a caller when INFO does.
    let primary_caller =
        handler_caller.or_else(|| strategy.extract_primary_caller(&info, core.id.as_deref()));

    let fields = convention.extract_type_specific_fields(&info, record);
    let sample_fields = convention.process_sample_fields(record, samples);

    NormalizedVariant {
        unique_id,
        chrom: core.chrom,
        position: core.position,
        id: core.id,
        reference: core.reference,
        alt: core.alt,
        qual: core.qual,
        filter: core.filter,
        svtype: fields.svtype.or(svtype),
        svlen,
        end: basic.end,
        imprecise: basic.imprecise,
        precise: basic.precise,
        chrom2: basic.chrom2,
        mate_id: basic.mate_id,
        homlen: basic.homlen,
        homseq: basic.homseq,
        cipos,
        ciend,
        primary_caller,
        supp_callers: fields.supp_callers,
        num_callers: None,
        supp_vec: fields.supp_vec,
        strands: fields.strands,
        svmethod: fields.svmethod,
        info,
        sample_fields,
    }
}

/// Parses `path` under `convention` into a validated, aggregated dataset.
///
/// Fails before reading any record if the header does not declare `SVTYPE`.
/// Records without `SVTYPE` or `SVLEN` are dropped and counted, never fatal.
pub fn parse_vcf(
    path: &Path,
    convention: MergeConvention,
) -> Result<(EnrichmentDataset, RunStatistics)> {
    let mut reader = VcfReader::new(path)?;
    if !reader.declares_info("SVTYPE") {
        reader.close();
        return Err(VarifyError::format(
            path,
            "header declares no SVTYPE INFO field",
        ));
    }

    let samples = reader.samples.clone();
    let mut dataset = EnrichmentDataset {
        variants: Vec::new(),
        info_columns: reader.info_columns.clone(),
        samples: samples.clone(),
    };

    for item in reader.by_ref() {
        let (index, record) = item?;
        dataset
            .variants
            .push(normalize_record(index, &record, convention, &samples));
    }
    reader.close();

    let total = dataset.len();
    let (excluded, invalid) = aggregator::validate_and_filter(&mut dataset);
    if convention.should_aggregate() {
        aggregator::compute_supp_callers(&mut dataset);
    }
    aggregator::compute_num_callers(&mut dataset);

    let stats = RunStatistics {
        total,
        excluded,
        invalid,
        kept: dataset.len(),
        multi_caller_count: aggregator::multi_caller_count(&dataset),
    };
    log::debug!("Parsed {} ({convention}): {stats:?}", path.display());
    Ok((dataset, stats))
}
