//! `chessdesk` - CLI for the chess club front desk
//!
//! This binary files member registrations and form records from the command
//! line, or walks through the desk screens interactively.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;

use chessdesk::cli::{Cli, Command, ConfigCommand, ListCommand, OutputFormat};
use chessdesk::record::{
    Account, CoachingRequest, GameResult, LessonApplication, PuzzleAttempt,
};
use chessdesk::session::{self, TerminalPrompt};
use chessdesk::{init_logging, Config, Desk, RecordKind, Submission};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration, then apply the command-line data directory
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(dir) = cli.data_dir.clone() {
        config.storage.data_dir = Some(dir);
    }

    let desk = Desk::from_config(&config);

    // Execute the command
    match cli.command {
        Command::Register(cmd) => report(&desk.submit_record(&Account::from(cmd))),
        Command::Login(cmd) => println!("{}", desk.login(&cmd.username, &cmd.password).message()),
        Command::Lesson(cmd) => report(&desk.submit_record(&LessonApplication::from(cmd))),
        Command::Puzzle(cmd) => report(&desk.submit_record(&PuzzleAttempt::from(cmd))),
        Command::Game(cmd) => report(&desk.submit_record(&GameResult::from(cmd))),
        Command::Coaching(cmd) => report(&desk.submit_record(&CoachingRequest::from(cmd))),
        Command::List(cmd) => handle_list(&desk, &cmd)?,
        Command::Status(cmd) => handle_status(&desk, cmd.json)?,
        Command::Interactive => {
            let mut prompt = TerminalPrompt::new()?;
            session::run(&desk, &mut prompt)?;
        }
        Command::Config(cmd) => handle_config(&config, cmd)?,
    }
    Ok(())
}

/// Print the dialog text for a submission.
///
/// Rejections and write failures are reported, not returned as errors.
fn report(submission: &Submission) {
    println!("{}", submission.message());
}

fn handle_list(desk: &Desk, cmd: &ListCommand) -> anyhow::Result<()> {
    let kind = RecordKind::from(cmd.kind);
    let file_name = desk.file_name(kind);

    match cmd.format {
        OutputFormat::Plain => {
            for line in desk.store().read_lines(file_name)? {
                println!("{line}");
            }
        }
        OutputFormat::Table => {
            for (i, record) in desk.list(kind)?.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                for (spec, value) in kind.fields().iter().zip(record) {
                    println!("{:<24} {value}", format!("{}:", spec.label));
                }
            }
        }
        OutputFormat::Json => {
            let records: Vec<serde_json::Map<String, serde_json::Value>> = desk
                .list(kind)?
                .into_iter()
                .map(|record| {
                    kind.fields()
                        .iter()
                        .zip(record)
                        .map(|(spec, value)| (spec.name.to_string(), value.into()))
                        .collect()
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }
    Ok(())
}

fn handle_status(desk: &Desk, json: bool) -> anyhow::Result<()> {
    let stats = desk.stats()?;

    if json {
        let status = serde_json::json!({
            "data_dir": desk.store().root(),
            "stores": stats
                .iter()
                .map(|(kind, s)| serde_json::json!({ "kind": kind, "stats": s }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("chessdesk status");
        println!("----------------");
        println!("Data directory: {}", desk.store().root().display());
        println!();
        for (kind, s) in &stats {
            let modified = s
                .modified
                .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
            println!(
                "  {:<10} {:<28} {:>6} records {:>8} bytes  {modified}",
                kind.to_string(),
                s.store_name,
                s.records,
                s.size_bytes
            );
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Data directory:     {}", config.data_dir().display());
                println!("  Create directory:   {}", config.storage.create_data_dir);
                println!();
                println!("[Files]");
                for kind in RecordKind::ALL {
                    println!(
                        "  {:<19} {}",
                        format!("{kind}:"),
                        config.store_path(kind).display()
                    );
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            let loaded = Config::load_from(Some(path.clone()))
                .with_context(|| format!("invalid configuration in {}", path.display()));
            match loaded {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e:#}"),
            }
        }
    }
    Ok(())
}
