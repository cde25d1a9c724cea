//! CLI entrypoint for the rsprintf verification harness.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use rsprintf_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, StreamKind};
use rsprintf_harness::{builtin_deck, diff, FixtureSet, Oracle, VerificationReport, Verifier};

/// Verification tooling for the rsprintf formatting engine.
#[derive(Debug, Parser)]
#[command(name = "rsprintf-harness")]
#[command(about = "Capture, verify, and diff formatting fixtures")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Capture the case deck through an oracle as a fixture file.
    Capture {
        /// Output path for the fixture JSON file.
        #[arg(long)]
        output: PathBuf,
        /// Oracle to record: `engine` or `host`.
        #[arg(long, default_value = "engine")]
        oracle: String,
        /// Existing fixture file whose cases serve as the deck
        /// (expectations are re-rendered; default is the built-in deck).
        #[arg(long)]
        deck: Option<PathBuf>,
        /// Override every deck case's destination capacity.
        #[arg(long)]
        capacity: Option<usize>,
        /// Optional JSONL structured log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic fixture files.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Replay a captured fixture file through the engine and compare.
    Verify {
        /// Fixture JSON file to replay.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; a sibling `.json` is also written).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Optional JSONL structured log path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Optional fixed timestamp string for deterministic report generation.
        #[arg(long)]
        timestamp: Option<String>,
    },
    /// Diff two captured fixture files case by case.
    Diff {
        /// Left fixture file (typically the engine capture).
        #[arg(long)]
        left: PathBuf,
        /// Right fixture file (typically the host capture).
        #[arg(long)]
        right: PathBuf,
        /// Optional JSON output path (if omitted, prints human-readable text).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the demonstration sequence through the engine.
    Demo,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Capture {
            output,
            oracle,
            deck,
            capacity,
            log,
            timestamp,
        } => {
            let oracle: Oracle = oracle.parse()?;
            let captured_at =
                timestamp.unwrap_or_else(|| format!("{:?}", std::time::SystemTime::now()));
            eprintln!("Capturing deck through `{}` oracle", oracle.name());

            let mut emitter = match &log {
                Some(path) => Some(LogEmitter::to_file(path, "capture")?),
                None => None,
            };
            let (family, mut cases) = match deck {
                Some(deck_path) => {
                    let source = FixtureSet::from_file(&deck_path)?;
                    let cases = rsprintf_harness::capture::deck_from_fixture(&source);
                    (source.family, cases)
                }
                None => (
                    String::from(rsprintf_harness::capture::DECK_FAMILY),
                    builtin_deck(),
                ),
            };
            if let Some(cap) = capacity {
                for case in &mut cases {
                    case.capacity = cap;
                }
            }
            let outcome = rsprintf_harness::capture::capture_cases(
                oracle,
                &captured_at,
                &family,
                cases,
                emitter.as_mut(),
            )?;
            if let Some(em) = emitter.as_mut() {
                em.flush()?;
            }

            outcome.set.write_file(&output)?;
            eprintln!(
                "Captured {} cases to {} ({} skipped by the host bridge)",
                outcome.set.cases.len(),
                output.display(),
                outcome.skipped.len()
            );
            for id in &outcome.skipped {
                eprintln!("  skipped: {id}");
            }
        }
        Command::Verify {
            fixture,
            report,
            log,
            timestamp,
        } => {
            eprintln!("Verifying against {}", fixture.display());
            let set = FixtureSet::from_file(&fixture)?;
            let outcomes = Verifier::new("fixture-verify").run(&set);

            if let Some(path) = &log {
                let mut emitter = LogEmitter::to_file(path, "verify")?;
                for outcome in &outcomes {
                    let (level, result) = if outcome.passed {
                        (LogLevel::Info, Outcome::Pass)
                    } else {
                        (LogLevel::Error, Outcome::Fail)
                    };
                    let mut entry = LogEntry::new("", level, "case_verified")
                        .with_stream(StreamKind::Verify)
                        .with_oracle(&set.oracle)
                        .with_case(&outcome.case_id, &outcome.template)
                        .with_outcome(result)
                        .with_latency_ns(outcome.latency_ns);
                    if !outcome.passed {
                        entry = entry.with_comparison(&outcome.expected, &outcome.actual);
                    }
                    emitter.emit(entry)?;
                }
                emitter.flush()?;
            }

            let summary = rsprintf_harness::VerificationSummary::from_outcomes(outcomes);
            let report_doc = VerificationReport {
                title: String::from("rsprintf Verification Report"),
                family: set.family.clone(),
                oracle: set.oracle.clone(),
                timestamp: timestamp
                    .unwrap_or_else(|| format!("{:?}", std::time::SystemTime::now())),
                summary,
            };

            eprintln!(
                "Verification complete: total={}, passed={}, failed={}",
                report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
            );

            if let Some(report_path) = report {
                eprintln!("Writing report to {}", report_path.display());
                std::fs::write(&report_path, report_doc.to_markdown())?;
                let json_path = report_path.with_extension("json");
                std::fs::write(&json_path, report_doc.to_json())?;
            }

            if !report_doc.summary.all_passed() {
                return Err("Fixture verification failed".into());
            }
        }
        Command::Diff {
            left,
            right,
            output,
        } => {
            let left_set = FixtureSet::from_file(&left)?;
            let right_set = FixtureSet::from_file(&right)?;
            let divergences = diff::diff_sets(&left_set, &right_set);
            eprintln!(
                "{} vs {}: {} diverging case(s)",
                left_set.oracle,
                right_set.oracle,
                divergences.len()
            );

            if let Some(path) = output {
                let json = serde_json::to_string_pretty(&divergences)?;
                std::fs::write(&path, json)?;
                eprintln!("Wrote divergence list to {}", path.display());
            } else {
                for divergence in &divergences {
                    println!("== {}", divergence.case_id);
                    println!("{}", divergence.detail);
                    println!();
                }
            }
        }
        Command::Demo => {
            rsprintf_harness::demo::run()?;
        }
    }

    Ok(())
}
