use crate::error::SkipReason;
use crate::locate::Breakpoint;
use crate::types::Pos;
use std::fmt;
use std::str::FromStr;

/// INFO value that may hold one or several comma-separated entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoValue {
    Single(String),
    Multiple(Vec<String>),
}

impl InfoValue {
    pub fn from_values(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(InfoValue::Single),
            _ => Some(InfoValue::Multiple(values)),
        }
    }

    /// Only the first entry is used downstream.
    pub fn first(&self) -> Option<&str> {
        match self {
            InfoValue::Single(v) => Some(v.as_str()),
            InfoValue::Multiple(vs) => vs.first().map(|v| v.as_str()),
        }
    }
}

/// Structural-variant record, owned so it can cross thread boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvRecord {
    pub id: String,
    pub chrom: String,
    /// 1-based VCF POS.
    pub pos: Pos,
    /// INFO/END.
    pub end: Option<Pos>,
    /// First ALT allele.
    pub alt: Option<String>,
    /// Raw INFO/SVTYPE.
    pub sv_type: Option<String>,
    pub ann: Option<InfoValue>,
    pub secondary: bool,
    /// First-sample FORMAT/PE.
    pub pe: Option<String>,
    /// First-sample FORMAT/SR.
    pub sr: Option<String>,
}

impl SvRecord {
    /// `PE:SR`, with `.` for a missing value.
    pub fn support(&self) -> String {
        format!(
            "{}:{}",
            self.pe.as_deref().unwrap_or("."),
            self.sr.as_deref().unwrap_or(".")
        )
    }

    /// Gene pair from the first ANN entry: the 4th `|` field holds
    /// `GENE1&GENE2`.
    pub fn gene_pair(&self) -> Result<(String, String), SkipReason> {
        let ann = self
            .ann
            .as_ref()
            .and_then(|a| a.first())
            .ok_or(SkipReason::MissingAnnotation)?;
        let genes = ann
            .split('|')
            .nth(3)
            .ok_or_else(|| SkipReason::MalformedAnnotation(ann.to_string()))?;
        let mut parts = genes.split('&');
        match (parts.next(), parts.next()) {
            (Some(a), Some(b)) => Ok((a.to_string(), b.to_string())),
            _ => Err(SkipReason::SingleGene(genes.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SvType {
    Bnd,
    Del,
    Dup,
    Inv,
}

impl SvType {
    pub fn as_str(self) -> &'static str {
        match self {
            SvType::Bnd => "BND",
            SvType::Del => "DEL",
            SvType::Dup => "DUP",
            SvType::Inv => "INV",
        }
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SvType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BND" => Ok(SvType::Bnd),
            "DEL" => Ok(SvType::Del),
            "DUP" => Ok(SvType::Dup),
            "INV" => Ok(SvType::Inv),
            other => Err(format!("unsupported SV type '{other}'")),
        }
    }
}

/// Mate breakpoint between the brackets of a BND ALT allele, e.g.
/// `N[chr5:550[` -> `chr5:550`. Some callers upper-case the contig; a
/// leading `CHR` is folded back to `chr`.
pub fn parse_bnd_mate(alt: &str) -> Option<Breakpoint> {
    let open = alt.find(['[', ']'])?;
    let bracket = alt[open..].chars().next()?;
    let rest = &alt[open + 1..];
    let close = rest.find(bracket)?;
    let mate = &rest[..close];
    let mut bp: Breakpoint = mate.parse().ok()?;
    if let Some(stripped) = bp.chrom.strip_prefix("CHR") {
        bp.chrom = format!("chr{stripped}");
    }
    Some(bp)
}
