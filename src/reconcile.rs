use crate::annotation::TranscriptModel;
use crate::error::SkipReason;
use crate::locate::{locate, Breakpoint, Location};

/// Placement of both breakpoints on the candidate transcripts.
///
/// `loc_a` is always the location of breakpoint A and `loc_b` that of
/// breakpoint B. When `swapped` is set, breakpoint A sits in the transcript
/// first annotated for gene B (and vice versa) and the caller must exchange
/// gene symbol, transcript and strand of the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub swapped: bool,
    pub loc_a: Location,
    pub loc_b: Location,
}

pub fn reconcile(
    break_a: &Breakpoint,
    break_b: &Breakpoint,
    tx_a: &TranscriptModel,
    tx_b: &TranscriptModel,
) -> Result<Reconciled, SkipReason> {
    let a_in_a = locate(break_a, tx_a);
    let b_in_b = locate(break_b, tx_b);
    if let (Some(loc_a), Some(loc_b)) = (a_in_a, b_in_b) {
        return Ok(Reconciled { swapped: false, loc_a, loc_b });
    }

    let a_in_b = locate(break_a, tx_b);
    let b_in_a = locate(break_b, tx_a);
    if let (Some(loc_a), Some(loc_b)) = (a_in_b, b_in_a) {
        return Ok(Reconciled { swapped: true, loc_a, loc_b });
    }

    Err(SkipReason::NotAFusion)
}
