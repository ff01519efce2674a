use crate::types::{HashMap, Pos, Strand};
use anyhow::{anyhow, bail, Context, Result};
use flate2::read::GzDecoder;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

// refGene (genePredExt with leading bin) column layout.
const COL_NAME: usize = 1;
const COL_CHROM: usize = 2;
const COL_STRAND: usize = 3;
const COL_TX_START: usize = 4;
const COL_TX_END: usize = 5;
const COL_CDS_START: usize = 6;
const COL_CDS_END: usize = 7;
const COL_EXON_COUNT: usize = 8;
const COL_EXON_STARTS: usize = 9;
const COL_EXON_ENDS: usize = 10;
const COL_GENE: usize = 12;
const COL_EXON_FRAMES: usize = 15;
const MIN_COLUMNS: usize = COL_EXON_FRAMES + 1;

/// Half-open genomic interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: Pos,
    pub end: Pos,
}

impl Span {
    #[inline]
    pub fn contains(&self, pos: Pos) -> bool {
        self.start <= pos && pos < self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exon {
    pub start: Pos,
    pub end: Pos,
    /// Reading frame from the annotation (-1 for non-coding exons).
    pub frame: i8,
}

impl Exon {
    #[inline]
    pub fn span(&self) -> Span {
        Span { start: self.start, end: self.end }
    }
}

/// Exon/intron structure of one transcript.
///
/// `exons` and `introns` are stored in transcription order: index 0 is the
/// 5'-most feature whatever the genomic strand, and `introns[i]` lies between
/// `exons[i]` and `exons[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptModel {
    pub id: String,
    pub gene: String,
    pub chrom: String,
    pub strand: Strand,
    pub tx_region: Span,
    pub cds_region: Span,
    pub exons: Vec<Exon>,
    pub introns: Vec<Span>,
}

impl TranscriptModel {
    /// Build a model from exons given in ascending genomic order.
    ///
    /// Introns are derived from the gaps between consecutive exons, then both
    /// lists are reversed for `-` strand transcripts.
    pub fn from_genomic_exons(
        id: impl Into<String>,
        gene: impl Into<String>,
        chrom: impl Into<String>,
        strand: Strand,
        tx_region: Span,
        cds_region: Span,
        mut exons: Vec<Exon>,
    ) -> Result<Self> {
        let id = id.into();
        let mut introns = Vec::with_capacity(exons.len().saturating_sub(1));
        for w in exons.windows(2) {
            let (a, b) = (w[0], w[1]);
            if b.start < a.end {
                bail!("transcript {id}: exons [{}, {}) and [{}, {}) overlap or are unsorted",
                    a.start, a.end, b.start, b.end);
            }
            introns.push(Span { start: a.end, end: b.start });
        }

        if strand == Strand::Minus {
            exons.reverse();
            introns.reverse();
        }

        Ok(Self {
            id,
            gene: gene.into(),
            chrom: chrom.into(),
            strand,
            tx_region,
            cds_region,
            exons,
            introns,
        })
    }

    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }

    pub fn is_coding(&self) -> bool {
        !self.cds_region.is_empty()
    }
}

/// Transcript models keyed by transcript ID plus the gene -> transcripts index.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone, Default)]
pub struct Annotation {
    transcripts: HashMap<String, TranscriptModel>,
    genes: HashMap<String, Vec<String>>,
}

impl Annotation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transcript model.
    ///
    /// Transcript IDs accumulate per gene in insertion order. A repeated
    /// transcript ID replaces the earlier model and keeps its list position,
    /// unless the earlier model sits on a primary contig and the new one on
    /// an alt, random or unplaced contig.
    pub fn insert(&mut self, model: TranscriptModel) {
        let ids = self.genes.entry(model.gene.clone()).or_default();
        if !ids.iter().any(|id| *id == model.id) {
            ids.push(model.id.clone());
        }

        if let Some(old) = self.transcripts.get(&model.id) {
            if is_primary_contig(&old.chrom) && !is_primary_contig(&model.chrom) {
                tracing::debug!(
                    transcript = %model.id,
                    kept = %old.chrom,
                    dropped = %model.chrom,
                    "duplicate transcript id on secondary contig ignored"
                );
                return;
            }
            tracing::debug!(
                transcript = %model.id,
                kept = %model.chrom,
                dropped = %old.chrom,
                "duplicate transcript id replaced"
            );
        }
        self.transcripts.insert(model.id.clone(), model);
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut annotation = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("failed to read annotation line {}", idx + 1))?;
            let line = line.trim_end_matches(&['\n', '\r'][..]);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let model = parse_annotation_line(line)
                .with_context(|| format!("malformed annotation row at line {}", idx + 1))?;
            annotation.insert(model);
        }
        Ok(annotation)
    }

    pub fn transcript(&self, id: &str) -> Option<&TranscriptModel> {
        self.transcripts.get(id)
    }

    /// Transcript IDs annotated for `gene`, in file order.
    pub fn transcripts_for_gene(&self, gene: &str) -> Option<&[String]> {
        self.genes.get(gene).map(|ids| ids.as_slice())
    }

    pub fn transcript_count(&self) -> usize {
        self.transcripts.len()
    }

    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }
}

// UCSC names alt, random and unplaced contigs with an underscore,
// e.g. `chr6_GL000250v2_alt` or `chrUn_KI270302v1`.
fn is_primary_contig(chrom: &str) -> bool {
    !chrom.contains('_')
}

/// Load a refGene-style annotation table, gzipped when the path ends in `.gz`.
pub fn load_annotation(path: &Path) -> Result<Annotation> {
    let file = File::open(path)
        .with_context(|| format!("failed to open annotation {}", path.display()))?;
    let is_gz = path.extension().map(|e| e == "gz").unwrap_or(false);
    let annotation = if is_gz {
        Annotation::from_reader(BufReader::new(GzDecoder::new(file)))
    } else {
        Annotation::from_reader(BufReader::new(file))
    }
    .with_context(|| format!("failed to load annotation {}", path.display()))?;
    Ok(annotation)
}

/// Parse one tab-separated refGene row.
pub fn parse_annotation_line(line: &str) -> Result<TranscriptModel> {
    let cols: Vec<&str> = line.split('\t').collect();
    if cols.len() < MIN_COLUMNS {
        bail!("expected at least {MIN_COLUMNS} columns, found {}", cols.len());
    }

    let strand = Strand::from_symbol(cols[COL_STRAND])
        .ok_or_else(|| anyhow!("invalid strand '{}'", cols[COL_STRAND]))?;
    let tx_region = Span {
        start: parse_num(cols[COL_TX_START], "txStart")?,
        end: parse_num(cols[COL_TX_END], "txEnd")?,
    };
    let cds_region = Span {
        start: parse_num(cols[COL_CDS_START], "cdsStart")?,
        end: parse_num(cols[COL_CDS_END], "cdsEnd")?,
    };

    let exon_count: usize = parse_num(cols[COL_EXON_COUNT], "exonCount")?;
    let starts: Vec<Pos> = parse_list(cols[COL_EXON_STARTS], "exonStarts")?;
    let ends: Vec<Pos> = parse_list(cols[COL_EXON_ENDS], "exonEnds")?;
    let frames: Vec<i8> = parse_list(cols[COL_EXON_FRAMES], "exonFrames")?;
    if starts.len() != ends.len() || starts.len() != frames.len() {
        bail!(
            "exon list lengths differ: {} starts, {} ends, {} frames",
            starts.len(),
            ends.len(),
            frames.len()
        );
    }
    if starts.len() != exon_count {
        bail!("exonCount is {exon_count} but {} exons are listed", starts.len());
    }

    let exons = starts
        .iter()
        .zip(&ends)
        .zip(&frames)
        .map(|((&start, &end), &frame)| Exon { start, end, frame })
        .collect();

    TranscriptModel::from_genomic_exons(
        cols[COL_NAME],
        cols[COL_GENE],
        cols[COL_CHROM],
        strand,
        tx_region,
        cds_region,
        exons,
    )
}

fn parse_num<T>(field: &str, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    field
        .trim()
        .parse::<T>()
        .map_err(|e| anyhow!("invalid {what} value '{field}': {e}"))
}

// refGene lists carry a single trailing comma; any other empty entry is an error.
fn parse_list<T>(field: &str, what: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let field = field.trim();
    let body = field.strip_suffix(',').unwrap_or(field);
    if body.is_empty() {
        return Ok(Vec::new());
    }
    body.split(',').map(|t| parse_num(t, what)).collect()
}
