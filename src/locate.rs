use crate::annotation::TranscriptModel;
use crate::types::Pos;
use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// One end of a structural variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Breakpoint {
    pub chrom: String,
    pub pos: Pos,
}

impl Breakpoint {
    pub fn new(chrom: impl Into<String>, pos: Pos) -> Self {
        Self { chrom: chrom.into(), pos }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chrom, self.pos)
    }
}

impl FromStr for Breakpoint {
    type Err = anyhow::Error;

    /// Parse `chrom:pos`. The last `:` separates the position so contig
    /// names containing colons survive.
    fn from_str(s: &str) -> Result<Self> {
        let (chrom, pos) = s
            .rsplit_once(':')
            .ok_or_else(|| anyhow!("breakpoint '{s}' is not chrom:pos"))?;
        if chrom.is_empty() {
            return Err(anyhow!("breakpoint '{s}' has an empty chromosome"));
        }
        let pos = pos
            .parse::<Pos>()
            .map_err(|e| anyhow!("breakpoint '{s}' has an invalid position: {e}"))?;
        Ok(Self::new(chrom, pos))
    }
}

/// Feature of a transcript that contains a breakpoint, 1-based in
/// transcription order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    Exon(usize),
    Intron(usize),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Exon(n) => write!(f, "Ex{n}"),
            Location::Intron(n) => write!(f, "In{n}"),
        }
    }
}

/// Find the exon or intron of `model` containing `bp`.
///
/// Exons are checked before introns. Transcripts carry tens of features at
/// most, so a linear scan is used.
pub fn locate(bp: &Breakpoint, model: &TranscriptModel) -> Option<Location> {
    if bp.chrom != model.chrom {
        return None;
    }
    if let Some(idx) = model.exons.iter().position(|e| e.span().contains(bp.pos)) {
        return Some(Location::Exon(idx + 1));
    }
    model
        .introns
        .iter()
        .position(|i| i.contains(bp.pos))
        .map(|idx| Location::Intron(idx + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{Exon, Span};
    use crate::types::Strand;

    fn model(strand: Strand) -> TranscriptModel {
        let exons = vec![
            Exon { start: 100, end: 200, frame: 0 },
            Exon { start: 300, end: 400, frame: 1 },
            Exon { start: 450, end: 500, frame: 2 },
        ];
        TranscriptModel::from_genomic_exons(
            "NM_1",
            "G",
            "chr1",
            strand,
            Span { start: 100, end: 500 },
            Span { start: 100, end: 500 },
            exons,
        )
        .unwrap()
    }

    #[test]
    fn plus_strand_numbering() {
        let tx = model(Strand::Plus);
        assert_eq!(locate(&Breakpoint::new("chr1", 100), &tx), Some(Location::Exon(1)));
        assert_eq!(locate(&Breakpoint::new("chr1", 199), &tx), Some(Location::Exon(1)));
        assert_eq!(locate(&Breakpoint::new("chr1", 200), &tx), Some(Location::Intron(1)));
        assert_eq!(locate(&Breakpoint::new("chr1", 420), &tx), Some(Location::Intron(2)));
        assert_eq!(locate(&Breakpoint::new("chr1", 450), &tx), Some(Location::Exon(3)));
    }

    #[test]
    fn minus_strand_numbering_follows_transcription() {
        let tx = model(Strand::Minus);
        assert_eq!(locate(&Breakpoint::new("chr1", 460), &tx), Some(Location::Exon(1)));
        assert_eq!(locate(&Breakpoint::new("chr1", 420), &tx), Some(Location::Intron(1)));
        assert_eq!(locate(&Breakpoint::new("chr1", 150), &tx), Some(Location::Exon(3)));
        assert_eq!(locate(&Breakpoint::new("chr1", 250), &tx), Some(Location::Intron(2)));
    }

    #[test]
    fn outside_transcript_or_other_chrom_is_none() {
        let tx = model(Strand::Plus);
        assert_eq!(locate(&Breakpoint::new("chr1", 99), &tx), None);
        assert_eq!(locate(&Breakpoint::new("chr1", 500), &tx), None);
        assert_eq!(locate(&Breakpoint::new("chr2", 150), &tx), None);
    }

    #[test]
    fn every_position_in_transcribed_region_is_located() {
        for strand in [Strand::Plus, Strand::Minus] {
            let tx = model(strand);
            for pos in tx.tx_region.start..tx.tx_region.end {
                assert!(
                    locate(&Breakpoint::new("chr1", pos), &tx).is_some(),
                    "{pos} not located on {strand}"
                );
            }
        }
    }

    #[test]
    fn breakpoint_parse_and_display() {
        let bp: Breakpoint = "chr5:550".parse().unwrap();
        assert_eq!(bp, Breakpoint::new("chr5", 550));
        assert_eq!(bp.to_string(), "chr5:550");
        assert!("chr5".parse::<Breakpoint>().is_err());
        assert!("chr5:x".parse::<Breakpoint>().is_err());
        assert!(":5".parse::<Breakpoint>().is_err());
        assert_eq!(Location::Intron(3).to_string(), "In3");
        assert_eq!(Location::Exon(4).to_string(), "Ex4");
    }
}
