pub mod cli;
pub mod error;

pub mod commands {
    pub mod enrich;
}

pub mod core {
    pub mod aggregator;
    pub mod callers;
    pub mod convention;
    pub mod general;
    pub mod pipeline;
    pub mod record;
    pub mod variant;
}

pub mod io {
    pub mod output_sort;
    pub mod table_writer;
    pub mod vcf_reader;
    pub mod vcf_writer;
}

pub mod utils {
    #[cfg(test)]
    pub(crate) mod test_utils;
    pub mod util;
}

pub mod constants;

pub use constants::*;
