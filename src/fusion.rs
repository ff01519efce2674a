use crate::locate::{Breakpoint, Location};
use crate::orientation::{Direction, GeneSlot, Orientation, Side};
use crate::variant::SvType;
use std::fmt;

/// Exon reported for one partner of a fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionExon {
    /// Breakpoint falls inside this exon; rendered with a trailing `*`.
    Exact(usize),
    /// Breakpoint falls in an intron and joins at this neighbouring exon.
    Inferred(usize),
}

impl FusionExon {
    /// Intron hits join at the next exon when read forward and keep the
    /// intron number when read in reverse.
    pub fn from_location(location: Location, dir: Direction) -> Self {
        match (location, dir) {
            (Location::Exon(n), _) => FusionExon::Exact(n),
            (Location::Intron(n), Direction::Forward) => FusionExon::Inferred(n + 1),
            (Location::Intron(n), Direction::Reverse) => FusionExon::Inferred(n),
        }
    }
}

impl fmt::Display for FusionExon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FusionExon::Exact(n) => write!(f, "Ex{n}*"),
            FusionExon::Inferred(n) => write!(f, "Ex{n}"),
        }
    }
}

/// Resolved gene on one side of the rearrangement, after any swap.
#[derive(Debug, Clone, Copy)]
pub struct Partner<'a> {
    pub gene: &'a str,
    pub transcript: &'a str,
    pub location: Location,
}

/// Everything a consistent hypothesis needs to be written out.
#[derive(Debug, Clone)]
pub struct CallContext<'a> {
    pub orientation: Orientation,
    pub partner_a: Partner<'a>,
    pub partner_b: Partner<'a>,
    pub sv_type: SvType,
    pub caller_id: &'a str,
    pub break_a: &'a Breakpoint,
    pub break_b: &'a Breakpoint,
    pub support: String,
}

/// One output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionCall {
    pub fused_name: String,
    pub detail: String,
    pub sv_type: SvType,
    pub caller_id: String,
    pub break_a: Breakpoint,
    pub break_b: Breakpoint,
    pub support: String,
}

impl FusionCall {
    /// Format a strand-corrected, consistent orientation.
    pub fn build(ctx: &CallContext<'_>) -> Self {
        let partner = |side: Side| match side.gene {
            GeneSlot::A => &ctx.partner_a,
            GeneSlot::B => &ctx.partner_b,
        };
        let describe = |side: Side| {
            let p = partner(side);
            let exon = FusionExon::from_location(p.location, side.dir);
            format!("{}:{}:{}", p.gene, p.transcript, exon)
        };

        let (head, tail) = ctx.orientation.fused_order();
        Self {
            fused_name: format!("{}-{}", partner(head).gene, partner(tail).gene),
            detail: format!("{}>{}", describe(head), describe(tail)),
            sv_type: ctx.sv_type,
            caller_id: ctx.caller_id.to_string(),
            break_a: ctx.break_a.clone(),
            break_b: ctx.break_b.clone(),
            support: ctx.support.clone(),
        }
    }
}

impl fmt::Display for FusionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.fused_name,
            self.detail,
            self.sv_type,
            self.caller_id,
            self.break_a,
            self.break_b,
            self.support
        )
    }
}
