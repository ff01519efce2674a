mod cli;
mod pipeline;
mod vcf_input;

use anyhow::Result;
use clap::Parser;
use cli::Args;
use fuex_rs::annotation::load_annotation;
use fuex_rs::targets::load_targets;
use fuex_rs::FusionDb;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let annotation = load_annotation(&args.annotation)?;
    let targets = load_targets(&args.targets)?;
    tracing::info!(
        transcripts = annotation.transcript_count(),
        genes = annotation.gene_count(),
        overrides = targets.len(),
        "reference data loaded"
    );
    let db = FusionDb::new(annotation, targets);

    let mut vcf = vcf_input::open_vcf(&args.input)?;
    let stats = pipeline::run(&args, &db, &mut vcf)?;
    tracing::info!(
        total_records = stats.total_records,
        secondary_records = stats.secondary_records,
        skipped_records = stats.skipped_records,
        hypotheses = stats.hypotheses,
        rejected_hypotheses = stats.rejected_hypotheses,
        fusions = stats.fusions,
        "fuex-rs: processing complete"
    );
    Ok(())
}
