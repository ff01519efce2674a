use crate::annotation::{Annotation, TranscriptModel};
use crate::error::SkipReason;
use crate::fusion::{CallContext, FusionCall, Partner};
use crate::orientation::{hypotheses, Hypothesis};
use crate::reconcile::reconcile;
use crate::targets::TargetTranscripts;
use crate::variant::SvRecord;

/// Immutable reference data shared by every record.
#[derive(Debug, Clone, Default)]
pub struct FusionDb {
    pub annotation: Annotation,
    pub targets: TargetTranscripts,
}

impl FusionDb {
    pub fn new(annotation: Annotation, targets: TargetTranscripts) -> Self {
        Self { annotation, targets }
    }

    /// Transcript used for `gene`: the target override when present, else the
    /// first transcript annotated for the gene.
    pub fn transcript_for(&self, gene: &str) -> Result<&TranscriptModel, SkipReason> {
        let id = match self.targets.get(gene) {
            Some(id) => id,
            None => self
                .annotation
                .transcripts_for_gene(gene)
                .and_then(|ids| ids.first())
                .map(|id| id.as_str())
                .ok_or_else(|| SkipReason::UnknownGene(gene.to_string()))?,
        };
        self.annotation
            .transcript(id)
            .ok_or_else(|| SkipReason::UnknownTranscript(id.to_string()))
    }
}

/// Result of carrying one orientation hypothesis through to a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypothesisOutcome {
    pub label: &'static str,
    pub result: Result<FusionCall, SkipReason>,
}

#[derive(Clone, Copy)]
struct Candidate<'a> {
    gene: &'a str,
    model: &'a TranscriptModel,
}

/// Resolve every orientation hypothesis of `record`.
///
/// `Err` means the record as a whole is unusable. Otherwise there is one
/// outcome per hypothesis (two for inversions), each evaluated on its own.
/// Secondary records yield no outcomes.
pub fn resolve_record(
    record: &SvRecord,
    db: &FusionDb,
) -> Result<Vec<HypothesisOutcome>, SkipReason> {
    if record.secondary {
        return Ok(Vec::new());
    }

    let hyps = hypotheses(record)?;
    let (gene_a, gene_b) = record.gene_pair()?;
    let cand_a = Candidate { gene: &gene_a, model: db.transcript_for(&gene_a)? };
    let cand_b = Candidate { gene: &gene_b, model: db.transcript_for(&gene_b)? };
    let support = record.support();

    Ok(hyps
        .iter()
        .map(|h| HypothesisOutcome {
            label: h.label,
            result: resolve_hypothesis(h, record, cand_a, cand_b, &support),
        })
        .collect())
}

fn resolve_hypothesis<'a>(
    h: &Hypothesis,
    record: &SvRecord,
    cand_a: Candidate<'a>,
    cand_b: Candidate<'a>,
    support: &str,
) -> Result<FusionCall, SkipReason> {
    let placed = reconcile(&h.break_a, &h.break_b, cand_a.model, cand_b.model)?;
    let (cand_a, cand_b) = if placed.swapped { (cand_b, cand_a) } else { (cand_a, cand_b) };

    let orientation = h
        .orientation
        .strand_corrected(cand_a.model.strand, cand_b.model.strand);
    tracing::debug!(
        id = %record.id,
        hypothesis = h.label,
        raw = %h.orientation,
        corrected = %orientation,
        swapped = placed.swapped,
        "orientation"
    );
    if !orientation.is_consistent() {
        return Err(SkipReason::NotAFusion);
    }

    Ok(FusionCall::build(&CallContext {
        orientation,
        partner_a: Partner {
            gene: cand_a.gene,
            transcript: &cand_a.model.id,
            location: placed.loc_a,
        },
        partner_b: Partner {
            gene: cand_b.gene,
            transcript: &cand_b.model.id,
            location: placed.loc_b,
        },
        sv_type: h.sv_type,
        caller_id: &record.id,
        break_a: &h.break_a,
        break_b: &h.break_b,
        support: support.to_string(),
    }))
}
