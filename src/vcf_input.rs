use anyhow::{anyhow, Context, Result};
use fuex_rs::{InfoValue, SvRecord};
use rust_htslib::bcf;
use rust_htslib::bcf::record::Numeric;
use rust_htslib::bcf::Read as BcfRead;
use std::path::Path;

pub struct VcfInput {
    pub reader: bcf::Reader,
}

/// Open a VCF or BCF file (plain or bgzipped).
pub fn open_vcf(path: &Path) -> Result<VcfInput> {
    let reader = bcf::Reader::from_path(path)
        .with_context(|| format!("failed to open variant file {}", path.display()))?;
    Ok(VcfInput { reader })
}

impl VcfInput {
    /// Owned records in file order. A record that cannot be read is fatal.
    pub fn records(&mut self) -> impl Iterator<Item = Result<SvRecord>> + '_ {
        self.reader.records().map(|result| {
            let record = result.context("failed to read variant record")?;
            sv_record_from_bcf(&record)
        })
    }
}

pub fn sv_record_from_bcf(record: &bcf::Record) -> Result<SvRecord> {
    let rid = record
        .rid()
        .ok_or_else(|| anyhow!("variant record without CHROM"))?;
    let chrom = String::from_utf8_lossy(record.header().rid2name(rid)?).into_owned();
    let pos = u64::try_from(record.pos() + 1)
        .map_err(|_| anyhow!("variant record on {chrom} has a negative position"))?;
    let alt = record
        .alleles()
        .get(1)
        .map(|a| String::from_utf8_lossy(a).into_owned());

    Ok(SvRecord {
        id: String::from_utf8_lossy(&record.id()).into_owned(),
        chrom,
        pos,
        end: info_integer(record, b"END").and_then(|v| u64::try_from(v).ok()),
        alt,
        sv_type: info_strings(record, b"SVTYPE").into_iter().next(),
        ann: InfoValue::from_values(info_strings(record, b"ANN")),
        // Undeclared in the header counts as unset.
        secondary: record.info(b"SECONDARY").flag().unwrap_or(false),
        pe: first_sample_value(record, b"PE"),
        sr: first_sample_value(record, b"SR"),
    })
}

fn info_integer(record: &bcf::Record, tag: &[u8]) -> Option<i64> {
    match record.info(tag).integer() {
        Ok(Some(values)) => values
            .first()
            .filter(|v| !v.is_missing())
            .map(|&v| i64::from(v)),
        _ => None,
    }
}

fn info_strings(record: &bcf::Record, tag: &[u8]) -> Vec<String> {
    match record.info(tag).string() {
        Ok(Some(values)) => values
            .iter()
            .map(|v| String::from_utf8_lossy(v).into_owned())
            .collect(),
        _ => Vec::new(),
    }
}

// Callers declare PE/SR as Integer or String; accept either.
fn first_sample_value(record: &bcf::Record, tag: &[u8]) -> Option<String> {
    if let Ok(values) = record.format(tag).integer() {
        let v = *values.first()?.first()?;
        return Some(if v.is_missing() { ".".to_string() } else { v.to_string() });
    }
    if let Ok(values) = record.format(tag).string() {
        let v = values.first()?;
        return Some(String::from_utf8_lossy(v).into_owned());
    }
    None
}
