//! riskcheck command-line front-end.
//!
//! Usage:
//!   riskcheck lab <file.json|->
//!   riskcheck onboarding <file.json|->
//!   riskcheck self-check [--answers 0,1,2,...]
//!   riskcheck questions
//!   riskcheck history [--limit N] [--offset N]
//!
//! Verdicts are printed to stdout as JSON. Logs go to a file when attached to
//! a terminal and to stderr otherwise (see `RISKCHECK_LOG_MODE`).

use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use riskcheck::adapters::sanitize::{self, SanitizingMakeWriter};
use riskcheck::adapters::SqliteAssessmentStore;
use riskcheck::application::AssessmentService;
use riskcheck::config::{Settings, DB_PATH_ENV};
use riskcheck::domain::{
    Advance, LabMeasurements, QuestionBank, QuestionnaireProfile, SelfCheckError,
    SelfCheckSession,
};

#[derive(Parser)]
#[command(name = "riskcheck")]
#[command(version)]
#[command(about = "Rule-based diabetes and cholesterol risk scoring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// SQLite database for assessment history (in-memory if not set)
    #[arg(long, global = true, env = DB_PATH_ENV)]
    db: Option<PathBuf>,

    /// Print compact JSON instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a lab panel (JSON `LabMeasurements`)
    Lab {
        /// Input file, or '-' for stdin
        input: PathBuf,
    },

    /// Score an onboarding questionnaire (JSON `QuestionnaireProfile`)
    Onboarding {
        /// Input file, or '-' for stdin
        input: PathBuf,
    },

    /// Score the self-check questionnaire
    SelfCheck {
        /// Comma-separated option indices; prompts interactively if omitted
        #[arg(long, value_delimiter = ',')]
        answers: Option<Vec<usize>>,
    },

    /// Print the standard self-check questions
    Questions,

    /// List stored assessments, newest first
    History {
        /// Page size, at least 1
        #[arg(
            short,
            long,
            default_value_t = 10,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        limit: usize,

        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

fn init_logging(settings: &Settings) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    sanitize::configure_max_bytes(settings.sanitize_max_bytes);

    let interactive = io::stdout().is_terminal();
    let (writer, guard) = if settings.log_mode.use_file(interactive) {
        if let Some(parent) = settings.log_file.parent() {
            // Best-effort: a missing directory surfaces when opening the file.
            let _ = fs::create_dir_all(parent);
        }
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)
            .with_context(|| format!("opening log file {}", settings.log_file.display()))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    Ok(guard)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> Result<()> {
    let text = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{text}");
    Ok(())
}

/// Walk the bank on the terminal. Returns `None` if the user quits.
fn run_interactive(bank: QuestionBank) -> Result<Option<SelfCheckSession>> {
    let mut session = SelfCheckSession::new(bank);
    let total = session.bank().len();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("Jawab setiap pertanyaan dengan nomor pilihan. 'b' = kembali, 'q' = keluar.");

    loop {
        let Some(index) = session.current_index() else {
            return Ok(Some(session));
        };
        let Some(question) = session.current_question() else {
            bail!("question {index} missing from bank");
        };

        println!();
        println!("[{}/{}] {}", index + 1, total, question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            let marker = if session.current_answer() == Some(i) { "*" } else { " " };
            println!(" {marker}{}. {option}", i + 1);
        }
        let option_count = question.options.len();
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;

        match line.trim() {
            "q" => return Ok(None),
            "b" => {
                if let Err(e) = session.previous() {
                    println!("{e}");
                }
            }
            "" if session.current_answer().is_some() => {
                advance(&mut session);
            }
            choice => match choice.parse::<usize>() {
                Ok(n) if n >= 1 => match session.select(n - 1) {
                    Ok(()) => advance(&mut session),
                    Err(e) => println!("{e}"),
                },
                _ => println!("Masukkan nomor pilihan antara 1 dan {option_count}."),
            },
        }
    }
}

fn advance(session: &mut SelfCheckSession) {
    match session.next() {
        Ok(Advance::Question(_) | Advance::Completed(_)) => {}
        Err(SelfCheckError::Unanswered { .. }) => println!("Pilih salah satu jawaban terlebih dahulu."),
        Err(e) => println!("{e}"),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if cli.db.is_some() {
        settings.db_path = cli.db.clone();
    }

    let _guard = init_logging(&settings)?;

    let store = match &settings.db_path {
        Some(path) => SqliteAssessmentStore::new(path)
            .with_context(|| format!("opening database {}", path.display()))?,
        None => SqliteAssessmentStore::in_memory()?,
    };
    let service = AssessmentService::new(Arc::new(store));

    match cli.command {
        Commands::Lab { input } => {
            let lab: LabMeasurements = serde_json::from_str(&read_input(&input)?)
                .context("parsing lab measurements")?;
            let verdict = service.assess_lab(&lab)?;
            print_json(&verdict, cli.compact)?;
        }
        Commands::Onboarding { input } => {
            let profile: QuestionnaireProfile = serde_json::from_str(&read_input(&input)?)
                .context("parsing questionnaire profile")?;
            let assessment = service.assess_onboarding(&profile)?;
            print_json(&assessment, cli.compact)?;
        }
        Commands::SelfCheck { answers: Some(answers) } => {
            let result = service.assess_self_check(&QuestionBank::standard(), &answers)?;
            print_json(&result, cli.compact)?;
        }
        Commands::SelfCheck { answers: None } => {
            if !io::stdin().is_terminal() {
                bail!("--answers is required when stdin is not a terminal");
            }
            match run_interactive(QuestionBank::standard())? {
                Some(session) => {
                    let result = service.complete_session(&session)?;
                    println!();
                    println!(
                        "Skor: {} - risiko {} ({})",
                        result.score,
                        result.level.label(),
                        result.level.description()
                    );
                }
                None => tracing::info!("Self-check abandoned"),
            }
        }
        Commands::Questions => {
            print_json(&QuestionBank::standard(), cli.compact)?;
        }
        Commands::History { limit, offset } => {
            let page = service.page(offset, limit)?;
            print_json(&page.items, cli.compact)?;
            eprintln!("{} of {} shown", page.items.len(), page.total_count);
            if let Some(prev) = page.prev_offset() {
                eprintln!("previous page: --offset {prev}");
            }
            if let Some(next) = page.next_offset() {
                eprintln!("next page: --offset {next}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_history_rejects_zero_limit() {
        assert!(Cli::try_parse_from(["riskcheck", "history", "--limit", "0"]).is_err());

        let cli = Cli::try_parse_from(["riskcheck", "history", "--limit", "5", "--offset", "10"])
            .expect("Should parse");
        assert!(matches!(cli.command, Commands::History { limit: 5, offset: 10 }));
    }
}
