use crate::{
    constants::*,
    core::convention::MergeConvention,
    io::vcf_writer::OutputOptions,
    utils::util::Result,
};
use chrono::Datelike;
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0` - when built outside a git checkout
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    match option_env!("VERGEN_GIT_DESCRIBE") {
        Some(git_describe) if !git_describe.is_empty() => {
            format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
        }
        _ => env!("CARGO_PKG_VERSION").to_string(),
    }
});

#[derive(Parser, Debug)]
#[command(name="varify",
          version=&**FULL_VERSION,
          about="Structural variant VCF normalization and enrichment",
          long_about = None,
          after_help = format!("Copyright (C) 2023-{}", chrono::Utc::now().year()),
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Enrich(EnrichArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Enrich(_) => "enrich",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .multiple(true)
        .args(["bcf_vcf", "survivor_vcf"]),
))]
#[command(arg_required_else_help(true))]
pub struct EnrichArgs {
    /// Merged VCF following the BCF convention (one column per sample)
    #[arg(
        long = "bcf-vcf",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub bcf_vcf: Option<PathBuf>,

    /// Merged VCF following the SURVIVOR convention (one column per caller)
    #[arg(
        long = "survivor-vcf",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub survivor_vcf: Option<PathBuf>,

    /// Directory for enriched output
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR
    )]
    pub output_dir: PathBuf,

    /// Subdirectory of the output directory; empty writes into it directly
    #[arg(long = "subdir", value_name = "NAME", default_value = DEFAULT_SUBDIR)]
    pub subdir: String,

    /// Prefix for output file names
    #[arg(long = "prefix", value_name = "PREFIX", default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// Number of threads to use
    #[arg(
        short = '@',
        value_name = "THREADS",
        default_value = "1",
        value_parser = threads_in_range
    )]
    pub num_threads: usize,

    /// Write plain VCF only, without sorting, compression, or indexing
    #[arg(
        long = "no-compress",
        action = ArgAction::SetFalse,
        default_value_t = DEFAULT_COMPRESS,
        help_heading = "Advanced"
    )]
    pub compress: bool,

    /// Remove the uncompressed VCF once compression succeeded
    #[arg(
        long = "remove-uncompressed",
        action = ArgAction::SetFalse,
        default_value_t = DEFAULT_KEEP_UNCOMPRESSED,
        help_heading = "Advanced"
    )]
    pub keep_uncompressed: bool,

    /// Also write the normalized records and run counters as TSV tables
    #[arg(long = "table", help_heading = "Advanced")]
    pub table: bool,
}

impl EnrichArgs {
    pub fn output_options(&self) -> OutputOptions {
        OutputOptions {
            output_dir: self.output_dir.clone(),
            subdir: self.subdir.clone(),
            prefix: self.prefix.clone(),
        }
    }

    /// Inputs paired with the convention each was merged under, BCF first.
    pub fn inputs(&self) -> Vec<(PathBuf, MergeConvention)> {
        [
            (self.bcf_vcf.as_ref(), MergeConvention::Bcf),
            (self.survivor_vcf.as_ref(), MergeConvention::Survivor),
        ]
        .into_iter()
        .filter_map(|(path, convention)| path.map(|path| (path.clone(), convention)))
        .collect()
    }
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// 0 occurrences of `-v` log at info, 1 at debug, anything more at trace.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn threads_in_range(s: &str) -> Result<usize> {
    let thread: usize = s
        .parse::<usize>()
        .map_err(|_| crate::varify_error!("`{}` is not a valid thread number", s))?;
    if thread == 0 {
        return Err(crate::varify_error!("Number of threads must be >= 1"));
    }
    Ok(thread)
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(crate::varify_error!(
            "File does not exist: {}",
            path.display()
        ));
    }
    Ok(path.to_path_buf())
}
