use crate::utils::util::Result;
use rust_htslib::{
    bcf::{self, Read},
    bgzf,
};
use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
};

/// What finalization managed to do. Each step may fail on its own; failures
/// are logged as warnings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FinalizeOutcome {
    pub sorted: bool,
    pub compressed_path: Option<PathBuf>,
    pub indexed: bool,
    pub removed_uncompressed: bool,
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Rewrites the plain VCF at `path` ordered by `(CHROM, POS)`. Records are
/// held in memory; the sorted copy replaces the original only on success.
pub fn sort_vcf_in_place(path: &Path) -> Result<usize> {
    let sorted_path = with_suffix(path, ".sorted");
    let result = write_sorted_copy(path, &sorted_path)
        .and_then(|n| fs::rename(&sorted_path, path).map(|_| n).map_err(Into::into));
    if result.is_err() && sorted_path.exists() {
        let _ = fs::remove_file(&sorted_path);
    }
    result
}

fn write_sorted_copy(path: &Path, sorted_path: &Path) -> Result<usize> {
    let mut reader = bcf::Reader::from_path(path)?;
    let header = bcf::Header::from_template(reader.header());

    let mut keyed = Vec::new();
    for record in reader.records() {
        let record = record?;
        let chrom = match record.rid() {
            Some(rid) => record.header().rid2name(rid)?.to_vec(),
            None => Vec::new(),
        };
        keyed.push((chrom, record.pos(), record));
    }
    keyed.sort_by(|a, b| (&a.0, a.1).cmp(&(&b.0, b.1)));
    log::debug!("Sorted {} records of {}", keyed.len(), path.display());

    let mut writer = bcf::Writer::from_path(sorted_path, &header, true, bcf::Format::Vcf)?;
    for (_, _, record) in keyed.iter_mut() {
        writer.translate(record);
        writer.write(record)?;
    }
    Ok(keyed.len())
}

/// Block-gzips `path` into `<path>.gz`.
pub fn bgzip(path: &Path) -> Result<PathBuf> {
    let compressed_path = with_suffix(path, ".gz");
    let mut input = File::open(path)?;
    let mut writer = bgzf::Writer::from_path(&compressed_path).map_err(|e| {
        crate::varify_error!(
            "Failed to open BGZF writer for {}: {e}",
            compressed_path.display()
        )
    })?;
    io::copy(&mut input, &mut writer)?;
    drop(writer);
    Ok(compressed_path)
}

pub fn tabix_index(compressed_path: &Path) -> Result<()> {
    bcf::index::build(compressed_path, None, 1, bcf::index::Type::Tbx).map_err(|error| {
        crate::varify_error!(
            "Failed to build tabix index for {}: {error}",
            compressed_path.display()
        )
    })
}

/// Sort, compress, and index `path`. The uncompressed file is removed only
/// when `keep_uncompressed` is false and compression succeeded.
pub fn finalize_output(path: &Path, keep_uncompressed: bool) -> FinalizeOutcome {
    let mut outcome = FinalizeOutcome::default();

    match sort_vcf_in_place(path) {
        Ok(_) => outcome.sorted = true,
        Err(e) => log::warn!("Could not sort {}: {e}", path.display()),
    }

    match bgzip(path) {
        Ok(compressed_path) => outcome.compressed_path = Some(compressed_path),
        Err(e) => {
            log::warn!("Could not compress {}: {e}", path.display());
            return outcome;
        }
    }

    if let Some(compressed_path) = &outcome.compressed_path {
        match tabix_index(compressed_path) {
            Ok(()) => outcome.indexed = true,
            Err(e) => log::warn!("{e}; the VCF may not be properly sorted"),
        }
        log::info!("Compressed enriched VCF: {}", compressed_path.display());
    }

    if keep_uncompressed {
        log::debug!("Kept uncompressed VCF {}", path.display());
    } else {
        match fs::remove_file(path) {
            Ok(()) => outcome.removed_uncompressed = true,
            Err(e) => log::warn!("Could not remove {}: {e}", path.display()),
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{data_lines, make_temp_vcf, sv_vcf};
    use tempfile::TempDir;

    fn unsorted_vcf(dir: &TempDir) -> PathBuf {
        let contents = sv_vcf(
            &[],
            &[
                "chr2\t50\tc\tN\t<DEL>\t.\t.\tSVTYPE=DEL;SVLEN=-5",
                "chr1\t900\tb\tN\t<DEL>\t.\t.\tSVTYPE=DEL;SVLEN=-5",
                "chr1\t100\ta\tN\t<DEL>\t.\t.\tSVTYPE=DEL;SVLEN=-5",
            ],
        );
        make_temp_vcf(dir, "unsorted.vcf", &contents)
    }

    fn ids(path: &Path) -> Vec<String> {
        data_lines(path)
            .iter()
            .map(|line| line.split('\t').nth(2).unwrap().to_string())
            .collect()
    }

    #[test]
    fn sort_orders_by_chrom_then_position() {
        let dir = TempDir::new().unwrap();
        let path = unsorted_vcf(&dir);
        assert_eq!(sort_vcf_in_place(&path).unwrap(), 3);
        assert_eq!(ids(&path), vec!["a", "b", "c"]);
        assert!(!with_suffix(&path, ".sorted").exists());
    }

    #[test]
    fn finalize_compresses_and_indexes() {
        let dir = TempDir::new().unwrap();
        let path = unsorted_vcf(&dir);
        let outcome = finalize_output(&path, true);
        assert!(outcome.sorted);
        assert!(outcome.indexed);
        let compressed = outcome.compressed_path.unwrap();
        assert_eq!(compressed, with_suffix(&path, ".gz"));
        assert!(with_suffix(&compressed, ".tbi").exists());
        assert!(path.exists());
        assert!(!outcome.removed_uncompressed);

        let mut reader = bcf::Reader::from_path(&compressed).unwrap();
        assert_eq!(reader.records().count(), 3);
    }

    #[test]
    fn finalize_can_drop_uncompressed_copy() {
        let dir = TempDir::new().unwrap();
        let path = unsorted_vcf(&dir);
        let outcome = finalize_output(&path, false);
        assert!(outcome.compressed_path.is_some());
        assert!(outcome.removed_uncompressed);
        assert!(!path.exists());
    }

    #[test]
    fn finalize_of_missing_file_only_warns() {
        let dir = TempDir::new().unwrap();
        let outcome = finalize_output(&dir.path().join("absent.vcf"), false);
        assert!(!outcome.sorted);
        assert_eq!(outcome.compressed_path, None);
        assert!(!outcome.indexed);
        assert!(!outcome.removed_uncompressed);
    }
}
