//! Command-line interface for chessdesk.
//!
//! This module provides the CLI structure for the `chessdesk` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CoachingCommand, ConfigCommand, DifficultyArg, GameCommand, KindArg, LessonCommand,
    ListCommand, LoginCommand, OutputFormat, PuzzleCommand, RegisterCommand, ResultArg,
    StatusCommand,
};

/// chessdesk - Chess club front desk
///
/// Register members, sign in, and file lesson applications, puzzle
/// attempts, game results and coaching requests as plain text records.
#[derive(Debug, Parser)]
#[command(name = "chessdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the record files (overrides configuration)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new account
    Register(RegisterCommand),

    /// Sign in with a username and password
    Login(LoginCommand),

    /// Apply for lesson training
    Lesson(LessonCommand),

    /// Record a puzzle attempt
    Puzzle(PuzzleCommand),

    /// Record a played game
    Game(GameCommand),

    /// Offer to coach a student
    Coaching(CoachingCommand),

    /// List stored records
    List(ListCommand),

    /// Show record file statistics
    Status(StatusCommand),

    /// Walk through the desk screens interactively
    Interactive,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                2 => crate::logging::Verbosity::Debug,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            data_dir: None,
            verbose,
            quiet,
            command: Command::Status(StatusCommand { json: false }),
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "chessdesk");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Debug);
        assert_eq!(cli_with(5, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_register() {
        let args = vec!["chessdesk", "register", "alice", "a@x.com", "pw123", "1500"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Register(cmd) => {
                assert_eq!(cmd.username, "alice");
                assert_eq!(cmd.elo_rating, "1500");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_register_allows_empty_field() {
        // Blank values reach validation instead of being refused by clap.
        let args = vec!["chessdesk", "register", "alice", "a@x.com", "pw123", ""];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Register(_)));
    }

    #[test]
    fn test_parse_login() {
        let args = vec!["chessdesk", "login", "alice", "pw123"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Login(_)));
    }

    #[test]
    fn test_parse_puzzle() {
        let args = vec![
            "chessdesk",
            "puzzle",
            "--id",
            "7",
            "--username",
            "alice",
            "--difficulty",
            "extremely-hard",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Puzzle(cmd) => assert_eq!(cmd.difficulty, DifficultyArg::ExtremelyHard),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_puzzle_rejects_unknown_difficulty() {
        let args = vec![
            "chessdesk",
            "puzzle",
            "--id",
            "7",
            "--username",
            "alice",
            "--difficulty",
            "medium",
        ];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_game() {
        let args = vec![
            "chessdesk", "game", "--your-id", "3", "-w", "alice", "-b", "bob", "-r", "draw",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Game(_)));
    }

    #[test]
    fn test_parse_lesson_with_global_flags() {
        let args = vec![
            "chessdesk",
            "-c",
            "/custom/config.toml",
            "lesson",
            "--id",
            "1",
            "-u",
            "alice",
            "-f",
            "4100018",
            "--coach",
            "Bob",
            "--description",
            "Endgames",
            "-d",
            "/srv/club",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/club")));
        match cli.command {
            Command::Lesson(cmd) => {
                assert_eq!(cmd.coach, "Bob");
                assert_eq!(cmd.description, "Endgames");
                assert_eq!(cmd.fide_id, "4100018");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_puzzle_with_data_dir() {
        let args = vec![
            "chessdesk",
            "puzzle",
            "-d",
            "/srv/club",
            "--id",
            "7",
            "-u",
            "alice",
            "--difficulty",
            "easy",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/club")));
        match cli.command {
            Command::Puzzle(cmd) => assert_eq!(cmd.difficulty, DifficultyArg::Easy),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_coaching_with_global_flags() {
        let args = vec![
            "chessdesk",
            "-v",
            "coaching",
            "--id",
            "9",
            "-n",
            "Carol",
            "-b",
            "FM",
            "-s",
            "dave",
            "-c",
            "club.toml",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, Some(PathBuf::from("club.toml")));
        match cli.command {
            Command::Coaching(cmd) => {
                assert_eq!(cmd.name, "Carol");
                assert_eq!(cmd.bio, "FM");
                assert_eq!(cmd.student, "dave");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_list_json() {
        let args = vec!["chessdesk", "list", "games", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::List(cmd) => {
                assert_eq!(cmd.kind, KindArg::Games);
                assert_eq!(cmd.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_with_data_dir() {
        let args = vec!["chessdesk", "-d", "/srv/club", "status"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/club")));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["chessdesk", "-c", "/custom/config.toml", "interactive"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
        assert!(matches!(cli.command, Command::Interactive));
    }

    #[test]
    fn test_parse_config_validate() {
        let args = vec!["chessdesk", "config", "validate", "--file", "x.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigCommand::Validate { .. })
        ));
    }
}
