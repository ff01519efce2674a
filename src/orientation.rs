//! Orientation hypotheses for a structural variant.
//!
//! An [`Orientation`] says how the two annotated genes are joined: each side
//! names a gene placeholder and the direction it is read in. Templates come
//! from fixed tables keyed on the SV geometry; they are strand-corrected once
//! the transcripts are known and the call is a fusion only if both sides end
//! up pointing the same way.

use crate::error::SkipReason;
use crate::locate::Breakpoint;
use crate::types::Strand;
use crate::variant::{parse_bnd_mate, SvRecord, SvType};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `>`
    Forward,
    /// `<`
    Reverse,
}

impl Direction {
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Forward => '>',
            Direction::Reverse => '<',
        }
    }
}

/// Placeholder for the gene owning breakpoint A or breakpoint B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeneSlot {
    A,
    B,
}

impl fmt::Display for GeneSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneSlot::A => f.write_str("GENE_A"),
            GeneSlot::B => f.write_str("GENE_B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Side {
    pub gene: GeneSlot,
    pub dir: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub first: Side,
    pub second: Side,
}

use Direction::{Forward as F, Reverse as R};
use GeneSlot::{A, B};

impl Orientation {
    pub const fn new(g1: GeneSlot, d1: Direction, g2: GeneSlot, d2: Direction) -> Self {
        Self {
            first: Side { gene: g1, dir: d1 },
            second: Side { gene: g2, dir: d2 },
        }
    }

    /// Flip the direction of every side whose gene lies on the `-` strand.
    ///
    /// Applying the same correction twice restores the template.
    pub fn strand_corrected(self, strand_a: Strand, strand_b: Strand) -> Self {
        let fix = |side: Side| {
            let strand = match side.gene {
                GeneSlot::A => strand_a,
                GeneSlot::B => strand_b,
            };
            match strand {
                Strand::Minus => Side { dir: side.dir.flipped(), ..side },
                Strand::Plus => side,
            }
        };
        Self { first: fix(self.first), second: fix(self.second) }
    }

    /// Both sides read in the same direction.
    pub fn is_consistent(&self) -> bool {
        self.first.dir == self.second.dir
    }

    /// Sides in fused 5' -> 3' order: as written for `>`, reversed for `<`.
    pub fn fused_order(&self) -> (Side, Side) {
        match self.first.dir {
            Direction::Forward => (self.first, self.second),
            Direction::Reverse => (self.second, self.first),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.first.gene,
            self.first.dir.symbol(),
            self.second.gene,
            self.second.dir.symbol()
        )
    }
}

/// Bracket form of a BND ALT allele.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BndForm {
    /// `[p[t`
    OpenLeading,
    /// `t[p[`
    OpenTrailing,
    /// `]p]t`
    CloseLeading,
    /// `t]p]`
    CloseTrailing,
}

impl BndForm {
    /// `[` takes precedence over `]`; "leading" means nothing precedes the
    /// first bracket.
    pub fn from_alt(alt: &str) -> Option<Self> {
        if alt.contains('[') {
            Some(if alt.starts_with('[') { BndForm::OpenLeading } else { BndForm::OpenTrailing })
        } else if alt.contains(']') {
            Some(if alt.starts_with(']') { BndForm::CloseLeading } else { BndForm::CloseTrailing })
        } else {
            None
        }
    }

    pub fn template(self) -> Orientation {
        match self {
            BndForm::OpenLeading => Orientation::new(B, R, A, F),
            BndForm::OpenTrailing => Orientation::new(A, F, B, F),
            BndForm::CloseLeading => Orientation::new(B, F, A, F),
            BndForm::CloseTrailing => Orientation::new(A, F, B, R),
        }
    }
}

/// Intrachromosomal hypothesis kinds. Inversions always contribute both
/// `Inv1` and `Inv2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntraKind {
    Del,
    Dup,
    Inv1,
    Inv2,
}

impl IntraKind {
    pub fn label(self) -> &'static str {
        match self {
            IntraKind::Del => "DEL",
            IntraKind::Dup => "DUP",
            IntraKind::Inv1 => "INV_1",
            IntraKind::Inv2 => "INV_2",
        }
    }

    pub fn template(self, start_after_end: bool) -> Orientation {
        match (self, start_after_end) {
            (IntraKind::Del, true) => Orientation::new(B, F, A, F),
            (IntraKind::Del, false) => Orientation::new(A, F, B, F),
            (IntraKind::Dup, true) => Orientation::new(A, F, B, F),
            (IntraKind::Dup, false) => Orientation::new(B, F, A, F),
            (IntraKind::Inv1, true) => Orientation::new(A, F, B, R),
            (IntraKind::Inv1, false) => Orientation::new(B, F, A, R),
            (IntraKind::Inv2, true) => Orientation::new(A, R, B, F),
            (IntraKind::Inv2, false) => Orientation::new(B, R, A, F),
        }
    }
}

/// One orientation hypothesis for a record, with its two breakpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hypothesis {
    /// `BND`, `DEL`, `DUP`, `INV_1` or `INV_2`; for logs only.
    pub label: &'static str,
    /// SV type written to the output line.
    pub sv_type: SvType,
    pub orientation: Orientation,
    pub break_a: Breakpoint,
    pub break_b: Breakpoint,
}

/// Derive the raw orientation hypotheses for `record`.
///
/// BND and DEL/DUP yield one hypothesis, INV yields two.
pub fn hypotheses(record: &SvRecord) -> Result<Vec<Hypothesis>, SkipReason> {
    let raw = record.sv_type.as_deref().ok_or(SkipReason::MissingSvType)?;
    let sv_type: SvType = raw
        .parse()
        .map_err(|_| SkipReason::UnsupportedSvType(raw.to_string()))?;
    let break_a = Breakpoint::new(record.chrom.clone(), record.pos);

    if sv_type == SvType::Bnd {
        let alt = record.alt.as_deref().unwrap_or_default();
        let malformed = || SkipReason::MalformedAlt(alt.to_string());
        let form = BndForm::from_alt(alt).ok_or_else(malformed)?;
        let break_b = parse_bnd_mate(alt).ok_or_else(malformed)?;
        return Ok(vec![Hypothesis {
            label: "BND",
            sv_type,
            orientation: form.template(),
            break_a,
            break_b,
        }]);
    }

    let end = record.end.ok_or(SkipReason::MissingEnd)?;
    let break_b = Breakpoint::new(record.chrom.clone(), end);
    let start_after_end = record.pos > end;
    let kinds: &[IntraKind] = match sv_type {
        SvType::Del => &[IntraKind::Del],
        SvType::Dup => &[IntraKind::Dup],
        SvType::Inv => &[IntraKind::Inv1, IntraKind::Inv2],
        SvType::Bnd => unreachable!("handled above"),
    };

    Ok(kinds
        .iter()
        .map(|&kind| Hypothesis {
            label: kind.label(),
            sv_type,
            orientation: kind.template(start_after_end),
            break_a: break_a.clone(),
            break_b: break_b.clone(),
        })
        .collect())
}
