//! fuex-rs: extract gene-fusion calls from structural-variant VCF records.
//!
//! Each record names two candidate genes in its `ANN` field. The breakpoints
//! are placed on a transcript of each gene, the junction orientation implied
//! by the SV type is corrected for transcript strand, and records whose
//! orientation can produce a sense-to-sense fusion are written out.
//!
//! # Library usage
//!
//! ```no_run
//! use fuex_rs::annotation::load_annotation;
//! use fuex_rs::targets::load_targets;
//! use fuex_rs::{resolve_record, FusionDb, SvRecord};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let annotation = load_annotation(Path::new("refGene.txt"))?;
//! let targets = load_targets(Path::new("RXA_gene_trans.json"))?;
//! let db = FusionDb::new(annotation, targets);
//!
//! let record = SvRecord::default();
//! if let Ok(outcomes) = resolve_record(&record, &db) {
//!     for call in outcomes.into_iter().filter_map(|o| o.result.ok()) {
//!         println!("{call}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Internal modules, reached through the re-exports below.
pub(crate) mod error;
pub(crate) mod fusion;
pub(crate) mod locate;
pub(crate) mod orientation;
pub(crate) mod reconcile;
pub(crate) mod resolve;

// Public modules.
pub mod annotation;
pub mod targets;
pub mod types;
pub mod variant;

pub use annotation::{Annotation, TranscriptModel};
pub use error::SkipReason;
pub use fusion::FusionCall;
pub use locate::{Breakpoint, Location};
pub use resolve::{resolve_record, FusionDb, HypothesisOutcome};
pub use targets::TargetTranscripts;
pub use variant::{InfoValue, SvRecord, SvType};
