use crate::{
    cli::EnrichArgs,
    core::{aggregator::RunStatistics, convention::MergeConvention, pipeline::parse_vcf},
    io::{
        table_writer::{write_dataset_table, write_statistics},
        vcf_writer::{EnrichedVcfWriter, OutputOptions, WriteOutcome},
    },
    utils::util::Result,
};
use rayon::{prelude::*, ThreadPoolBuilder};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};


/// One input file and the convention it was merged under.
#[derive(Debug, Clone)]
pub struct EnrichJob {
    pub input: PathBuf,
    pub convention: MergeConvention,
}

/// Everything a finished job produced.
#[derive(Debug, Clone)]
pub struct EnrichReport {
    pub input: PathBuf,
    pub convention: MergeConvention,
    pub stats: RunStatistics,
    pub output: WriteOutcome,
    pub tables: Option<(PathBuf, PathBuf)>,
}

/// Settings shared by every job of a run.
#[derive(Debug, Clone)]
pub struct EnrichSettings {
    pub output: OutputOptions,
    pub compress: bool,
    pub keep_uncompressed: bool,
    pub table: bool,
}

impl From<&EnrichArgs> for EnrichSettings {
    fn from(args: &EnrichArgs) -> Self {
        Self {
            output: args.output_options(),
            compress: args.compress,
            keep_uncompressed: args.keep_uncompressed,
            table: args.table,
        }
    }
}

fn table_paths(options: &OutputOptions, input: &Path) -> (PathBuf, PathBuf) {
    let vcf_path = options.output_path(input);
    let stem = vcf_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = stem.strip_suffix(".vcf").unwrap_or(&stem);
    let dir = options.output_dir();
    (
        dir.join(format!("{stem}.tsv")),
        dir.join(format!("{stem}.stats.tsv")),
    )
}

/// Parse, enrich, and write a single input. Each job owns its dataset, so
/// jobs share nothing but the output directory.
pub fn run_job(job: &EnrichJob, settings: &EnrichSettings) -> Result<EnrichReport> {
    log::info!(
        "Processing {} ({} convention)",
        job.input.display(),
        job.convention
    );
    let (dataset, stats) = parse_vcf(&job.input, job.convention)?;
    stats.log_summary(&job.convention.to_string());

    let writer = EnrichedVcfWriter::new(&job.input, &settings.output)?;
    let output =
        writer.write_and_compress(Some(&dataset), settings.compress, settings.keep_uncompressed)?;
    if let Some(finalize) = &output.finalize {
        if !finalize.indexed {
            log::warn!(
                "{} was written but is not fully finalized: {finalize:?}",
                output.path.display()
            );
        }
    }

    let tables = if settings.table {
        let (table_path, stats_path) = table_paths(&settings.output, &job.input);
        write_dataset_table(&dataset, &table_path)?;
        write_statistics(&stats, &stats_path)?;
        log::info!("Wrote table {}", table_path.display());
        Some((table_path, stats_path))
    } else {
        None
    };

    Ok(EnrichReport {
        input: job.input.clone(),
        convention: job.convention,
        stats,
        output,
        tables,
    })
}

/// Fails when two inputs would be written to the same enriched VCF.
fn check_distinct_outputs(jobs: &[EnrichJob], options: &OutputOptions) -> Result<()> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::with_capacity(jobs.len());
    for job in jobs {
        let output_path = options.output_path(&job.input);
        if let Some(other) = seen.insert(output_path.clone(), &job.input) {
            return Err(crate::varify_error!(
                "{} and {} would both be written to {}; rename one input or change --prefix",
                other.display(),
                job.input.display(),
                output_path.display()
            ));
        }
    }
    Ok(())
}

/// Runs all jobs on a pool of `num_threads` workers. Reports come back in job
/// order; the first failing job's error is returned.
pub fn run_jobs(
    jobs: &[EnrichJob],
    settings: &EnrichSettings,
    num_threads: usize,
) -> Result<Vec<EnrichReport>> {
    check_distinct_outputs(jobs, &settings.output)?;

    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(|i| format!("varify-enrich-{i}"))
        .build()
        .map_err(|e| crate::varify_error!("Failed to initialize enrich thread pool: {e}"))?;

    pool.install(|| {
        jobs.par_iter()
            .map(|job| run_job(job, settings))
            .collect::<Vec<_>>()
    })
    .into_iter()
    .collect()
}

pub fn enrich(args: EnrichArgs) -> Result<Vec<EnrichReport>> {
    let jobs = args
        .inputs()
        .into_iter()
        .map(|(input, convention)| EnrichJob { input, convention })
        .collect::<Vec<_>>();
    let settings = EnrichSettings::from(&args);
    let reports = run_jobs(&jobs, &settings, args.num_threads)?;
    for report in &reports {
        log::info!(
            "{} -> {} ({} records)",
            report.input.display(),
            report.output.path.display(),
            report.output.records
        );
    }
    Ok(reports)
}
