//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::record::{
    Account, CoachingRequest, Difficulty, GameOutcome, GameResult, LessonApplication,
    PuzzleAttempt, RecordKind,
};

/// Register a new account.
#[derive(Debug, Args)]
pub struct RegisterCommand {
    /// Login name
    pub username: String,
    /// Contact email
    pub email: String,
    /// Password (stored as entered)
    pub password: String,
    /// Elo rating (whole number)
    pub elo_rating: String,
}

impl From<RegisterCommand> for Account {
    fn from(cmd: RegisterCommand) -> Self {
        Self {
            username: cmd.username,
            email: cmd.email,
            password: cmd.password,
            elo_rating: cmd.elo_rating,
        }
    }
}

/// Check credentials and show the dashboard greeting.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Login name
    pub username: String,
    /// Password
    pub password: String,
}

/// Apply for lesson training.
#[derive(Debug, Args)]
pub struct LessonCommand {
    /// Application id
    #[arg(long)]
    pub id: String,
    /// Applicant's username
    #[arg(short, long)]
    pub username: String,
    /// Applicant's FIDE id
    #[arg(short, long)]
    pub fide_id: String,
    /// Requested coach
    #[arg(long)]
    pub coach: String,
    /// Application description
    #[arg(long)]
    pub description: String,
}

impl From<LessonCommand> for LessonApplication {
    fn from(cmd: LessonCommand) -> Self {
        Self {
            id: cmd.id,
            username: cmd.username,
            fide_id: cmd.fide_id,
            coach: cmd.coach,
            description: cmd.description,
        }
    }
}

/// Record a puzzle attempt.
#[derive(Debug, Args)]
pub struct PuzzleCommand {
    /// Attempt id
    #[arg(long)]
    pub id: String,
    /// Solver's username
    #[arg(short, long)]
    pub username: String,
    /// Puzzle difficulty
    #[arg(long, value_enum)]
    pub difficulty: DifficultyArg,
}

impl From<PuzzleCommand> for PuzzleAttempt {
    fn from(cmd: PuzzleCommand) -> Self {
        Self {
            id: cmd.id,
            username: cmd.username,
            difficulty: cmd.difficulty.into(),
        }
    }
}

/// Record a played game.
#[derive(Debug, Args)]
pub struct GameCommand {
    /// Your member id
    #[arg(long)]
    pub your_id: String,
    /// Username playing white
    #[arg(short, long)]
    pub white: String,
    /// Username playing black
    #[arg(short, long)]
    pub black: String,
    /// Game result
    #[arg(short, long, value_enum)]
    pub result: ResultArg,
}

impl From<GameCommand> for GameResult {
    fn from(cmd: GameCommand) -> Self {
        Self {
            your_id: cmd.your_id,
            white_player: cmd.white,
            black_player: cmd.black,
            result: cmd.result.into(),
        }
    }
}

/// Offer to coach a student.
#[derive(Debug, Args)]
pub struct CoachingCommand {
    /// Request id
    #[arg(long)]
    pub id: String,
    /// Coach's name
    #[arg(short, long)]
    pub name: String,
    /// Coach's biography
    #[arg(short, long)]
    pub bio: String,
    /// Student to coach
    #[arg(short, long)]
    pub student: String,
}

impl From<CoachingCommand> for CoachingRequest {
    fn from(cmd: CoachingCommand) -> Self {
        Self {
            id: cmd.id,
            name: cmd.name,
            bio: cmd.bio,
            student: cmd.student,
        }
    }
}

/// List stored records.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Which records to list
    #[arg(value_enum)]
    pub kind: KindArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Record kind argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// Registered accounts
    Accounts,
    /// Lesson applications
    Lessons,
    /// Puzzle attempts
    Puzzles,
    /// Game results
    Games,
    /// Coaching requests
    Coaching,
}

impl From<KindArg> for RecordKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Accounts => Self::Account,
            KindArg::Lessons => Self::LessonApplication,
            KindArg::Puzzles => Self::PuzzleAttempt,
            KindArg::Games => Self::GameResult,
            KindArg::Coaching => Self::CoachingRequest,
        }
    }
}

/// Puzzle difficulty argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    /// Easy
    Easy,
    /// Hard
    Hard,
    /// Extremely hard
    ExtremelyHard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Self::Easy,
            DifficultyArg::Hard => Self::Hard,
            DifficultyArg::ExtremelyHard => Self::ExtremelyHard,
        }
    }
}

/// Game result argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResultArg {
    /// White won
    White,
    /// Black won
    Black,
    /// Drawn game
    Draw,
}

impl From<ResultArg> for GameOutcome {
    fn from(arg: ResultArg) -> Self {
        match arg {
            ResultArg::White => Self::White,
            ResultArg::Black => Self::Black,
            ResultArg::Draw => Self::Draw,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Lines as stored
    #[default]
    Plain,
    /// One labeled block per record
    Table,
    /// JSON output
    Json,
}
