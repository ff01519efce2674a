use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "fuex-rs",
    about = "Extract gene-fusion calls from structural-variant VCF records",
    version
)]
pub struct Args {
    /// Input VCF/BCF with structural-variant records
    #[arg(short = 'i', long = "input", value_name = "VCF")]
    pub input: PathBuf,

    /// Output path for tab-separated fusion calls
    #[arg(short = 'o', long = "output", value_name = "TSV")]
    pub output: PathBuf,

    /// refGene transcript table (optionally gzipped)
    #[arg(short = 'a', long = "annotation", value_name = "REFGENE", default_value = "refGene.txt")]
    pub annotation: PathBuf,

    /// JSON object mapping gene symbol to preferred transcript id
    #[arg(short = 't', long = "targets", value_name = "JSON", default_value = "RXA_gene_trans.json")]
    pub targets: PathBuf,

    /// Number of threads (CPUs) to use
    #[arg(short = 'p', long = "threads", default_value_t = 1)]
    pub threads: u8,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
