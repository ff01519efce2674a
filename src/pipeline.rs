use crate::cli::Args;
use crate::vcf_input::VcfInput;
use anyhow::{anyhow, Context, Result};
use crossfire::mpmc;
use fuex_rs::{resolve_record, FusionDb, HypothesisOutcome, SkipReason, SvRecord};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::thread;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_records: u64,
    pub secondary_records: u64,
    pub skipped_records: u64,
    pub hypotheses: u64,
    pub rejected_hypotheses: u64,
    pub fusions: u64,
}

#[derive(Debug)]
struct WorkItem {
    idx: usize,
    record: SvRecord,
}

#[derive(Debug)]
struct ResultItem {
    idx: usize,
    record: SvRecord,
    outcome: Result<Vec<HypothesisOutcome>, SkipReason>,
}

pub fn run(args: &Args, db: &FusionDb, input: &mut VcfInput) -> Result<Stats> {
    let out_file = File::create(&args.output)
        .with_context(|| format!("failed to create output {}", args.output.display()))?;
    let mut writer = BufWriter::new(out_file);
    let stats = process_records(input.records(), db, &mut writer, args.threads as usize)?;
    writer
        .flush()
        .with_context(|| format!("failed to write output {}", args.output.display()))?;
    Ok(stats)
}

/// Resolve `records` against `db` and write one line per fusion call.
///
/// With `threads > 1` records are resolved on a worker pool; lines are still
/// written in input order.
pub fn process_records<I, W>(
    records: I,
    db: &FusionDb,
    writer: &mut W,
    threads: usize,
) -> Result<Stats>
where
    I: Iterator<Item = Result<SvRecord>>,
    W: Write,
{
    let mut stats = Stats::default();

    if threads > 1 {
        crossfire::detect_backoff_cfg();
        let cap = threads.saturating_mul(4).max(8);
        let (tx_work, rx_work) = mpmc::bounded_blocking::<WorkItem>(cap);
        let (tx_res, rx_res) = mpmc::unbounded_blocking::<ResultItem>();

        thread::scope(|scope| -> Result<()> {
            for _ in 0..threads {
                let rx_work = rx_work.clone();
                let tx_res = tx_res.clone();
                scope.spawn(move || {
                    while let Ok(item) = rx_work.recv() {
                        let outcome = resolve_record(&item.record, db);
                        let _ = tx_res.send(ResultItem {
                            idx: item.idx,
                            record: item.record,
                            outcome,
                        });
                    }
                });
            }
            drop(tx_res);

            let mut total = 0usize;
            for result in records {
                let record = result?;
                tx_work.send(WorkItem { idx: total, record })?;
                total += 1;
            }
            drop(tx_work);

            let mut pending: BTreeMap<usize, ResultItem> = BTreeMap::new();
            let mut next_idx = 0usize;
            while next_idx < total {
                let res = rx_res
                    .recv()
                    .map_err(|_| anyhow!("worker result channel closed"))?;
                pending.insert(res.idx, res);
                while let Some(item) = pending.remove(&next_idx) {
                    emit(&item.record, item.outcome, writer, &mut stats)?;
                    next_idx += 1;
                }
            }

            Ok(())
        })?;

        return Ok(stats);
    }

    for result in records {
        let record = result?;
        let outcome = resolve_record(&record, db);
        emit(&record, outcome, writer, &mut stats)?;
    }

    Ok(stats)
}

fn emit<W: Write>(
    record: &SvRecord,
    outcome: Result<Vec<HypothesisOutcome>, SkipReason>,
    writer: &mut W,
    stats: &mut Stats,
) -> Result<()> {
    stats.total_records += 1;
    if record.secondary {
        stats.secondary_records += 1;
        return Ok(());
    }

    match outcome {
        Err(reason) => {
            stats.skipped_records += 1;
            log_skip(&record.id, None, &reason);
        }
        Ok(outcomes) => {
            for o in outcomes {
                stats.hypotheses += 1;
                match o.result {
                    Ok(call) => {
                        writeln!(writer, "{call}")?;
                        stats.fusions += 1;
                    }
                    Err(reason) => {
                        stats.rejected_hypotheses += 1;
                        log_skip(&record.id, Some(o.label), &reason);
                    }
                }
            }
        }
    }
    Ok(())
}

fn log_skip(caller_id: &str, hypothesis: Option<&str>, reason: &SkipReason) {
    if reason.is_routine() {
        tracing::debug!(caller_id, hypothesis, %reason, "record skipped");
    } else {
        tracing::warn!(caller_id, hypothesis, "{reason}, skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secondary(id: &str) -> SvRecord {
        SvRecord { id: id.into(), secondary: true, ..SvRecord::default() }
    }

    fn untyped(id: &str) -> SvRecord {
        SvRecord { id: id.into(), ..SvRecord::default() }
    }

    #[test]
    fn secondary_and_unusable_records_are_counted_not_written() {
        let records = vec![Ok(secondary("s1")), Ok(untyped("u1")), Ok(secondary("s2"))];
        let mut out = Vec::new();
        let stats = process_records(records.into_iter(), &FusionDb::default(), &mut out, 1).unwrap();
        assert!(out.is_empty());
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.secondary_records, 2);
        assert_eq!(stats.skipped_records, 1);
        assert_eq!(stats.fusions, 0);
    }

    #[test]
    fn read_error_aborts() {
        let records = vec![Ok(untyped("u1")), Err(anyhow!("truncated file"))];
        let mut out = Vec::new();
        let err = process_records(records.into_iter(), &FusionDb::default(), &mut out, 1).unwrap_err();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn read_error_aborts_threaded() {
        let records = vec![Ok(untyped("u1")), Err(anyhow!("truncated file")), Ok(untyped("u2"))];
        let mut out = Vec::new();
        assert!(process_records(records.into_iter(), &FusionDb::default(), &mut out, 3).is_err());
    }
}
