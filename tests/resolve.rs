/// Record-level fusion resolution against a small hand-built refGene table.
///
/// Layout used throughout (0-based half-open exons):
///   X  chr1 +  [100,200) [300,400) [500,600)
///   X2 chr1 +  [50,80) [100,200) [300,400) [500,600)   (second transcript of X)
///   Y  chr5 -  [300,400) [500,600)                     (Ex1 = [500,600))
///   G1 chr2 +  [100,200) [300,400) [500,600) [700,800)
///   G2 chr2 +  [1000,1100) [1200,1300)
///   G3 chr2 -  [2000,2100) [2200,2300)                 (Ex1 = [2200,2300))
///   G4 chr2 +  [2000,2100) [2200,2300)
use fuex_rs::annotation::Annotation;
use fuex_rs::variant::InfoValue;
use fuex_rs::{resolve_record, FusionDb, SkipReason, SvRecord, TargetTranscripts};

const REFGENE: &str = "\
0\ttxX\tchr1\t+\t100\t600\t100\t600\t3\t100,300,500,\t200,400,600,\t0\tX\tcmpl\tcmpl\t0,1,2,
0\ttxX2\tchr1\t+\t50\t600\t100\t600\t4\t50,100,300,500,\t80,200,400,600,\t0\tX\tcmpl\tcmpl\t-1,0,1,2,
0\ttxY\tchr5\t-\t300\t600\t300\t600\t2\t300,500,\t400,600,\t0\tY\tcmpl\tcmpl\t0,0,
0\ttxG1\tchr2\t+\t100\t800\t100\t800\t4\t100,300,500,700,\t200,400,600,800,\t0\tG1\tcmpl\tcmpl\t0,1,2,0,
0\ttxG2\tchr2\t+\t1000\t1300\t1000\t1300\t2\t1000,1200,\t1100,1300,\t0\tG2\tcmpl\tcmpl\t0,1,
0\ttxG3\tchr2\t-\t2000\t2300\t2000\t2300\t2\t2000,2200,\t2100,2300,\t0\tG3\tcmpl\tcmpl\t0,0,
0\ttxG4\tchr2\t+\t2000\t2300\t2000\t2300\t2\t2000,2200,\t2100,2300,\t0\tG4\tcmpl\tcmpl\t0,0,
";

fn db_with(targets: TargetTranscripts) -> FusionDb {
    let annotation = Annotation::from_reader(REFGENE.as_bytes()).expect("parse refGene");
    FusionDb::new(annotation, targets)
}

fn db() -> FusionDb {
    db_with(TargetTranscripts::new())
}

fn ann(genes: &str) -> Option<InfoValue> {
    Some(InfoValue::Single(format!("N|transcript_ablation|HIGH|{genes}|gene|transcript")))
}

fn bnd(id: &str, alt: &str, genes: &str) -> SvRecord {
    SvRecord {
        id: id.into(),
        chrom: "chr1".into(),
        pos: 350,
        alt: Some(alt.into()),
        sv_type: Some("BND".into()),
        ann: ann(genes),
        pe: Some("12".into()),
        sr: Some("7".into()),
        ..SvRecord::default()
    }
}

fn intra(id: &str, sv_type: &str, pos: u64, end: u64, genes: &str) -> SvRecord {
    SvRecord {
        id: id.into(),
        chrom: "chr2".into(),
        pos,
        end: Some(end),
        sv_type: Some(sv_type.into()),
        ann: ann(genes),
        pe: Some("4".into()),
        ..SvRecord::default()
    }
}

fn lines(record: &SvRecord, db: &FusionDb) -> Vec<String> {
    resolve_record(record, db)
        .expect("record resolves")
        .into_iter()
        .filter_map(|o| o.result.ok())
        .map(|call| call.to_string())
        .collect()
}

#[test]
fn translocation_onto_minus_strand_gene() {
    let out = lines(&bnd("bnd1", "N]chr5:550]", "X&Y"), &db());
    assert_eq!(
        out,
        vec!["X-Y\tX:txX:Ex2*>Y:txY:Ex1*\tBND\tbnd1\tchr1:350\tchr5:550\t12:7"]
    );
}

#[test]
fn translocation_with_antisense_junction_is_rejected() {
    let outcomes = resolve_record(&bnd("bnd2", "N[chr5:550[", "X&Y"), &db()).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].label, "BND");
    assert_eq!(outcomes[0].result, Err(SkipReason::NotAFusion));
}

#[test]
fn gene_order_in_ann_does_not_matter() {
    let out = lines(&bnd("bnd3", "N]chr5:550]", "Y&X"), &db());
    assert_eq!(
        out,
        vec!["X-Y\tX:txX:Ex2*>Y:txY:Ex1*\tBND\tbnd3\tchr1:350\tchr5:550\t12:7"]
    );
}

#[test]
fn deletion_in_intron_joins_next_exon() {
    let out = lines(&intra("del1", "DEL", 650, 1050, "G1&G2"), &db());
    assert_eq!(
        out,
        vec!["G1-G2\tG1:txG1:Ex4>G2:txG2:Ex1*\tDEL\tdel1\tchr2:650\tchr2:1050\t4:."]
    );
}

#[test]
fn single_gene_annotation_is_skipped() {
    let err = resolve_record(&intra("del2", "DEL", 150, 350, "G1"), &db()).unwrap_err();
    assert_eq!(err, SkipReason::SingleGene("G1".into()));
    assert!(!err.is_routine());
}

#[test]
fn inversion_across_strands_yields_two_calls() {
    let outcomes = resolve_record(&intra("inv1", "INV", 150, 2250, "G1&G3"), &db()).unwrap();
    let labels: Vec<_> = outcomes.iter().map(|o| o.label).collect();
    assert_eq!(labels, vec!["INV_1", "INV_2"]);

    let calls: Vec<_> = outcomes.into_iter().map(|o| o.result.unwrap()).collect();
    assert_eq!(calls[0].fused_name, "G1-G3");
    assert_eq!(calls[0].detail, "G1:txG1:Ex1*>G3:txG3:Ex1*");
    assert_eq!(calls[1].fused_name, "G3-G1");
    assert_eq!(calls[1].detail, "G3:txG3:Ex1*>G1:txG1:Ex1*");
}

#[test]
fn inversion_on_same_strand_yields_nothing() {
    let outcomes = resolve_record(&intra("inv2", "INV", 150, 2250, "G1&G4"), &db()).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| o.result == Err(SkipReason::NotAFusion)));
}

#[test]
fn absent_gene_is_skipped() {
    let err = resolve_record(&bnd("bnd4", "N]chr5:550]", "X&NOPE"), &db()).unwrap_err();
    assert_eq!(err, SkipReason::UnknownGene("NOPE".into()));
}

#[test]
fn target_transcript_overrides_annotation_order() {
    let mut targets = TargetTranscripts::new();
    targets.insert("X", "txX2");
    let out = lines(&bnd("bnd5", "N]chr5:550]", "X&Y"), &db_with(targets));
    assert_eq!(
        out,
        vec!["X-Y\tX:txX2:Ex3*>Y:txY:Ex1*\tBND\tbnd5\tchr1:350\tchr5:550\t12:7"]
    );
}

#[test]
fn target_transcript_missing_from_annotation() {
    let mut targets = TargetTranscripts::new();
    targets.insert("X", "NM_GONE");
    let err = resolve_record(&bnd("bnd6", "N]chr5:550]", "X&Y"), &db_with(targets)).unwrap_err();
    assert_eq!(err, SkipReason::UnknownTranscript("NM_GONE".into()));
}

#[test]
fn breakpoints_outside_both_transcripts() {
    let outcomes = resolve_record(&intra("del3", "DEL", 5000, 6000, "G1&G2"), &db()).unwrap();
    assert_eq!(outcomes[0].result, Err(SkipReason::NotAFusion));
}

#[test]
fn secondary_record_yields_no_outcomes() {
    let mut record = bnd("bnd7", "N]chr5:550]", "X&Y");
    record.secondary = true;
    assert!(resolve_record(&record, &db()).unwrap().is_empty());
}

#[test]
fn unsupported_type_is_skipped() {
    let record = intra("ins1", "INS", 150, 150, "G1&G2");
    assert_eq!(
        resolve_record(&record, &db()).unwrap_err(),
        SkipReason::UnsupportedSvType("INS".into())
    );
}
