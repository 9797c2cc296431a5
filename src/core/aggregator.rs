use super::variant::{EnrichmentDataset, NormalizedVariant};
use crate::utils::util::format_number_with_commas;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Counters surfaced at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunStatistics {
    pub total: usize,
    /// Dropped for a missing `SVTYPE`.
    pub excluded: usize,
    /// Dropped for a missing or unparsable `SVLEN`.
    pub invalid: usize,
    pub kept: usize,
    /// Retained variants supported by at least two callers.
    pub multi_caller_count: usize,
}

impl RunStatistics {
    pub fn log_summary(&self, label: &str) {
        log::info!("{label}: {} records read", format_number_with_commas(self.total));
        log::info!(
            "{label}: {} excluded (missing SVTYPE), {} invalid (missing SVLEN)",
            format_number_with_commas(self.excluded),
            format_number_with_commas(self.invalid)
        );
        log::info!(
            "{label}: {} kept, {} supported by >=2 callers",
            format_number_with_commas(self.kept),
            format_number_with_commas(self.multi_caller_count)
        );
    }
}

/// Drops rows without `SVTYPE` first, then rows without `SVLEN`. Returns the
/// two drop counts in that order.
pub fn validate_and_filter(dataset: &mut EnrichmentDataset) -> (usize, usize) {
    let initial = dataset.variants.len();
    dataset.variants.retain(|variant| variant.svtype.is_some());
    let excluded = initial - dataset.variants.len();

    let typed = dataset.variants.len();
    dataset.variants.retain(|variant| variant.svlen.is_some());
    let invalid = typed - dataset.variants.len();

    log::debug!("Filtered {excluded} records without SVTYPE and {invalid} without SVLEN");
    (excluded, invalid)
}

/// Sets `SUPP_CALLERS` on every row to the sorted set of `PRIMARY_CALLER`s
/// sharing its exact `(CHROM, POSITION, SVTYPE)`.
pub fn compute_supp_callers(dataset: &mut EnrichmentDataset) {
    let mut groups: HashMap<(&str, i64, Option<&str>), BTreeSet<&str>> = HashMap::new();
    for variant in &dataset.variants {
        let callers = groups.entry(group_key(variant)).or_default();
        if let Some(caller) = variant.primary_caller.as_deref() {
            callers.insert(caller);
        }
    }

    let supp_callers: HashMap<_, Option<String>> = groups
        .into_iter()
        .map(|(key, callers)| {
            let joined = (!callers.is_empty())
                .then(|| callers.into_iter().collect::<Vec<_>>().join(","));
            (
                (key.0.to_string(), key.1, key.2.map(str::to_string)),
                joined,
            )
        })
        .collect();

    for variant in &mut dataset.variants {
        let key = (
            variant.chrom.clone(),
            variant.position,
            variant.svtype.clone(),
        );
        variant.supp_callers = supp_callers.get(&key).cloned().flatten();
    }
}

fn group_key(variant: &NormalizedVariant) -> (&str, i64, Option<&str>) {
    (
        variant.chrom.as_str(),
        variant.position,
        variant.svtype.as_deref(),
    )
}

/// `NUM_CALLERS` is the number of distinct names in `SUPP_CALLERS`, 0 when unset.
pub fn compute_num_callers(dataset: &mut EnrichmentDataset) {
    for variant in &mut dataset.variants {
        variant.num_callers = Some(variant.supporting_callers().len());
    }
}

pub fn multi_caller_count(dataset: &EnrichmentDataset) -> usize {
    dataset
        .variants
        .iter()
        .filter(|variant| variant.supporting_callers().len() >= 2)
        .count()
}
