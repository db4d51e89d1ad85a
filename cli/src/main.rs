//! Tribunal: adversarial courtroom trial simulation.
//!
//! Every case goes through a full trial (opening statements, witness
//! examination, closing statements, verdict) played by language-model
//! agents, and the judge's ruling is tabulated as GRANTED (1) or DENIED (0).
//!
//! Usage:
//!   tribunal run --input cases.csv --output submission.csv
//!   tribunal trial --text "The plaintiff alleges ..."
//!   tribunal trial --offline

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tribunal_batch::{io, BatchRunner, BatchSettings, CaseResult, Tally};
use tribunal_config::TribunalConfig;
use tribunal_contracts::{
    case::{CaseOutcome, CaseRecord, Verdict},
    error::{TribunalError, TribunalResult},
    trial::TranscriptEntry,
};
use tribunal_core::traits::CompletionProvider;
use tribunal_llm::{ChatCompletionProvider, ScriptedProvider};

const SAMPLE_CASE: &str = "\
The plaintiff alleges that the defendant, a former employee, violated a non-compete agreement \
by establishing a competing business within 6 months of employment termination. The agreement \
specified a 1-year restriction. The defendant claims the non-compete is overly broad and therefore \
unenforceable, covering an unreasonable geographic area. Evidence shows the defendant opened \
a similar business 8 miles from the plaintiff's location.";

// ── CLI definition ───────────────────────────────────────────────────────────

/// Tribunal: multi-agent courtroom simulation.
#[derive(Parser)]
#[command(
    name = "tribunal",
    about = "Adversarial courtroom trial simulation",
    long_about = "Runs legal cases through simulated trials between a judge, prosecution,\n\
                  defense and witnesses, and tabulates each ruling as GRANTED or DENIED."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Try every case in a CSV file and write an ID,VERDICT submission.
    Run {
        /// CSV with `id` and `text` columns.
        #[arg(long)]
        input: PathBuf,
        /// Where to write the submission CSV.
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        common: CommonArgs,
        /// Trials in flight at once (overrides the configuration).
        #[arg(long)]
        concurrency: Option<usize>,
        /// Write each trial's transcript to `<dir>/<case id>.json`.
        #[arg(long)]
        transcripts_dir: Option<PathBuf>,
    },
    /// Try a single case and show the proceedings.
    Trial {
        /// Case description. Defaults to a sample non-compete dispute.
        #[arg(long, conflicts_with = "case_file")]
        text: Option<String>,
        /// Read the case description from a file.
        #[arg(long)]
        case_file: Option<PathBuf>,
        #[arg(long, default_value = "trial-1")]
        case_id: String,
        #[command(flatten)]
        common: CommonArgs,
        /// Write the sealed transcript as JSON.
        #[arg(long)]
        transcript_out: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct CommonArgs {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Use canned courtroom dialogue instead of the completion API.
    #[arg(long)]
    offline: bool,
    /// The ruling the offline judge delivers. Ignored without --offline.
    #[arg(long, value_enum, default_value_t = Ruling::Denied)]
    offline_ruling: Ruling,
}

#[derive(Clone, Copy, ValueEnum)]
enum Ruling {
    Granted,
    Denied,
}

impl From<Ruling> for Verdict {
    fn from(ruling: Ruling) -> Self {
        match ruling {
            Ruling::Granted => Verdict::Granted,
            Ruling::Denied => Verdict::Denied,
        }
    }
}

// ── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // Set RUST_LOG=debug for per-call detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Run {
            input,
            output,
            common,
            concurrency,
            transcripts_dir,
        } => {
            run_batch(
                &input,
                &output,
                &common,
                concurrency,
                transcripts_dir.as_deref(),
            )
            .await
        }
        Command::Trial {
            text,
            case_file,
            case_id,
            common,
            transcript_out,
        } => {
            run_trial(
                text,
                case_file.as_deref(),
                case_id,
                &common,
                transcript_out.as_deref(),
            )
            .await
        }
    };

    if let Err(e) = result {
        eprintln!("tribunal: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ─────────────────────────────────────────────────────────────────

async fn run_batch(
    input: &Path,
    output: &Path,
    common: &CommonArgs,
    concurrency: Option<usize>,
    transcripts_dir: Option<&Path>,
) -> TribunalResult<()> {
    let config = TribunalConfig::load(common.config.as_deref())?;
    let provider = build_provider(&config, common)?;

    let mut settings = BatchSettings::from_config(&config);
    if let Some(n) = concurrency {
        if n == 0 {
            return Err(TribunalError::Config {
                reason: "--concurrency must be at least 1".to_string(),
            });
        }
        settings.concurrency = n;
    }
    settings.keep_transcripts = transcripts_dir.is_some();

    let cases = io::read_cases(input)?;
    let results = BatchRunner::new(provider, settings).run_batch(cases).await;

    io::write_verdicts(output, &results)?;
    if let Some(dir) = transcripts_dir {
        let written = io::write_transcripts(dir, &results)?;
        info!(dir = %dir.display(), transcripts = written.len(), "transcripts exported");
    }

    let tally = Tally::of(&results);
    println!(
        "{} cases: {} granted, {} denied, {} rejected, {} failed. Verdicts written to {}",
        tally.total(),
        tally.granted,
        tally.denied,
        tally.rejected,
        tally.failed,
        output.display()
    );
    Ok(())
}

async fn run_trial(
    text: Option<String>,
    case_file: Option<&Path>,
    case_id: String,
    common: &CommonArgs,
    transcript_out: Option<&Path>,
) -> TribunalResult<()> {
    let config = TribunalConfig::load(common.config.as_deref())?;
    let provider = build_provider(&config, common)?;

    let description = match (text, case_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| TribunalError::CaseIo {
            reason: format!("failed to read case file '{}': {}", path.display(), e),
        })?,
        (None, None) => SAMPLE_CASE.to_string(),
    };

    let settings = BatchSettings {
        keep_transcripts: true,
        ..BatchSettings::from_config(&config)
    };
    let runner = BatchRunner::new(provider, settings);
    let result = runner.run_case(CaseRecord::new(case_id, description)).await;

    if let Some(path) = transcript_out {
        write_transcript(path, &result)?;
    }
    print_result(&result);
    Ok(())
}

// ── Wiring ───────────────────────────────────────────────────────────────────

/// The offline script, or the chat API with the key from the configured
/// environment variable.
fn build_provider(
    config: &TribunalConfig,
    common: &CommonArgs,
) -> TribunalResult<Arc<dyn CompletionProvider>> {
    if common.offline {
        let provider: Arc<dyn CompletionProvider> =
            Arc::new(ScriptedProvider::offline(common.offline_ruling.into()));
        return Ok(provider);
    }

    let var = &config.provider.api_key_env;
    let api_key = std::env::var(var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| TribunalError::Config {
            reason: format!("environment variable {} is not set (or use --offline)", var),
        })?;

    let provider: Arc<dyn CompletionProvider> =
        Arc::new(ChatCompletionProvider::from_settings(&config.provider, api_key));
    Ok(provider)
}

fn write_transcript(path: &Path, result: &CaseResult) -> TribunalResult<()> {
    let Some(transcript) = &result.transcript else {
        return Err(TribunalError::CaseIo {
            reason: format!("case {} produced no transcript", result.case_id),
        });
    };
    let json = serde_json::to_vec_pretty(transcript).map_err(|e| TribunalError::CaseIo {
        reason: format!("failed to encode transcript: {}", e),
    })?;
    std::fs::write(path, json).map_err(|e| TribunalError::CaseIo {
        reason: format!("failed to write transcript '{}': {}", path.display(), e),
    })
}

/// One block per statement: the speaker's name in capitals, their role,
/// then what they said.
fn render_proceedings<'a>(entries: impl IntoIterator<Item = &'a TranscriptEntry>) -> String {
    entries
        .into_iter()
        .map(|entry| {
            format!(
                "{} ({}):\n{}\n\n",
                entry.speaker_name.to_uppercase(),
                entry.speaker_role,
                entry.content
            )
        })
        .collect()
}

fn print_result(result: &CaseResult) {
    if let Some(transcript) = &result.transcript {
        print!("{}", render_proceedings(transcript.entries()));
    }

    println!("Case {}", result.case_id);
    println!("==================");
    match &result.outcome {
        CaseOutcome::Decided { verdict } => println!("Final verdict: {}", verdict),
        CaseOutcome::Rejected { reason } => {
            println!("Not tried: {}", reason);
            println!("Final verdict: {}", result.verdict());
        }
        CaseOutcome::Failed { reason } => {
            println!("Trial failed: {}", reason);
            println!("Final verdict: {}", result.verdict());
        }
    }
    if let Some(transcript) = &result.transcript {
        println!("Statements on record: {}", transcript.events.len());
        if !transcript.terminal_hash.is_empty() {
            println!("Transcript hash: {}", transcript.terminal_hash);
        }
    }
}
