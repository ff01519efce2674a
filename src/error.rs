use thiserror::Error;

/// Why a record, or one orientation hypothesis of a record, produced no
/// fusion call. None of these abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing SVTYPE")]
    MissingSvType,
    #[error("unsupported SVTYPE '{0}'")]
    UnsupportedSvType(String),
    #[error("missing END for intrachromosomal variant")]
    MissingEnd,
    #[error("malformed BND ALT allele '{0}'")]
    MalformedAlt(String),
    #[error("missing ANN annotation")]
    MissingAnnotation,
    #[error("ANN annotation has no gene field: '{0}'")]
    MalformedAnnotation(String),
    #[error("fusion within single gene {0}")]
    SingleGene(String),
    #[error("gene symbol {0} not in database")]
    UnknownGene(String),
    #[error("transcript {0} not in annotation")]
    UnknownTranscript(String),
    #[error("not a fusion")]
    NotAFusion,
}

impl SkipReason {
    /// Expected outcomes for most SV records; logged below warning level.
    pub fn is_routine(&self) -> bool {
        matches!(self, SkipReason::NotAFusion)
    }
}
