//! Record kinds and their field schemas.
//!
//! Every form in the desk writes one kind of record. A kind knows its field
//! layout, the file it is kept in and how a record is rendered as a line.
//! Accounts and lesson applications are stored as bare comma-separated
//! values; puzzle, game and coaching records are stored as labeled prose
//! (`ID: 7, Username: alice, Difficulty: Hard`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Field delimiter used by every record file.
pub const DELIMITER: &str = ",";

/// Separator placed between `Label: value` pairs in labeled lines.
const LABELED_SEPARATOR: &str = ", ";

/// The kind of record a form produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A registered user account.
    Account,
    /// An application for lesson training.
    LessonApplication,
    /// A puzzle attempt.
    PuzzleAttempt,
    /// The result of a played game.
    GameResult,
    /// A request to coach a student.
    CoachingRequest,
}

/// How a record kind is laid out on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormat {
    /// `a,b,c` with no labels.
    Delimited,
    /// `Label: a, Label: b, Label: c`.
    Labeled,
}

/// One field of a record kind's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Machine name of the field.
    pub name: &'static str,
    /// Human label, also used as the prefix in labeled lines.
    pub label: &'static str,
    /// Allowed values, for fields picked from a fixed list.
    pub choices: Option<&'static [&'static str]>,
    /// Input is masked while typed.
    pub secret: bool,
}

const fn text(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        choices: None,
        secret: false,
    }
}

const fn secret(name: &'static str, label: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        label,
        choices: None,
        secret: true,
    }
}

const fn choice(
    name: &'static str,
    label: &'static str,
    choices: &'static [&'static str],
) -> FieldSpec {
    FieldSpec {
        name,
        label,
        choices: Some(choices),
        secret: false,
    }
}

const ACCOUNT_FIELDS: &[FieldSpec] = &[
    text("username", "Username"),
    text("email", "Email"),
    secret("password", "Password"),
    text("elo_rating", "Elo Rating"),
];

const LESSON_FIELDS: &[FieldSpec] = &[
    text("id", "ID"),
    text("username", "Username"),
    text("fide_id", "FIDE ID"),
    text("coach", "Coach Trainer"),
    text("description", "Application Description"),
];

const PUZZLE_FIELDS: &[FieldSpec] = &[
    text("id", "ID"),
    text("username", "Username"),
    choice("difficulty", "Difficulty", Difficulty::LABELS),
];

const GAME_FIELDS: &[FieldSpec] = &[
    text("your_id", "Your ID"),
    text("white_player", "White Player"),
    text("black_player", "Black Player"),
    choice("result", "Result", GameOutcome::LABELS),
];

const COACHING_FIELDS: &[FieldSpec] = &[
    text("id", "ID"),
    text("name", "Name"),
    text("bio", "Coach Bio"),
    text("student", "Student"),
];

impl RecordKind {
    /// All record kinds, in dashboard order with accounts first.
    pub const ALL: [Self; 5] = [
        Self::Account,
        Self::LessonApplication,
        Self::PuzzleAttempt,
        Self::GameResult,
        Self::CoachingRequest,
    ];

    /// The file name this kind is stored in unless configured otherwise.
    #[must_use]
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Account => "users.txt",
            Self::LessonApplication => "lesson_credentials.txt",
            Self::PuzzleAttempt => "puzzle_credentials.txt",
            Self::GameResult => "game_credentials.txt",
            Self::CoachingRequest => "coaching_credentials.txt",
        }
    }

    /// Ordered field schema.
    #[must_use]
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            Self::Account => ACCOUNT_FIELDS,
            Self::LessonApplication => LESSON_FIELDS,
            Self::PuzzleAttempt => PUZZLE_FIELDS,
            Self::GameResult => GAME_FIELDS,
            Self::CoachingRequest => COACHING_FIELDS,
        }
    }

    /// Number of fields in a record of this kind.
    #[must_use]
    pub fn arity(self) -> usize {
        self.fields().len()
    }

    /// Line layout used in the record file.
    #[must_use]
    pub fn line_format(self) -> LineFormat {
        match self {
            Self::Account | Self::LessonApplication => LineFormat::Delimited,
            Self::PuzzleAttempt | Self::GameResult | Self::CoachingRequest => LineFormat::Labeled,
        }
    }

    /// Title of the screen that collects this kind.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Account => "User Registration",
            Self::LessonApplication => "Apply for Lesson Training",
            Self::PuzzleAttempt => "Try Puzzle",
            Self::GameResult => "Play Game",
            Self::CoachingRequest => "Coaching",
        }
    }

    /// Render a record's fields as one line, without the trailing newline.
    ///
    /// Values are written verbatim; a value containing the delimiter will
    /// shift the columns of the stored line.
    #[must_use]
    pub fn render<S: AsRef<str>>(self, fields: &[S]) -> String {
        match self.line_format() {
            LineFormat::Delimited => join_fields(fields),
            LineFormat::Labeled => self
                .fields()
                .iter()
                .zip(fields)
                .map(|(spec, value)| format!("{}: {}", spec.label, value.as_ref()))
                .collect::<Vec<String>>()
                .join(LABELED_SEPARATOR),
        }
    }

    /// Split a stored line back into field values.
    ///
    /// Labeled lines have their `Label: ` prefixes removed where they match
    /// the schema; segments that don't match are returned as-is.
    #[must_use]
    pub fn parse_line(self, line: &str) -> Vec<String> {
        match self.line_format() {
            LineFormat::Delimited => split_fields(line),
            LineFormat::Labeled => {
                let specs = self.fields();
                line.split(LABELED_SEPARATOR)
                    .enumerate()
                    .map(|(i, segment)| {
                        specs
                            .get(i)
                            .and_then(|spec| segment.strip_prefix(spec.label))
                            .and_then(|rest| rest.strip_prefix(": "))
                            .unwrap_or(segment)
                            .to_string()
                    })
                    .collect()
            }
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Account => write!(f, "account"),
            Self::LessonApplication => write!(f, "lesson"),
            Self::PuzzleAttempt => write!(f, "puzzle"),
            Self::GameResult => write!(f, "game"),
            Self::CoachingRequest => write!(f, "coaching"),
        }
    }
}

/// Join field values with the delimiter. No quoting or escaping applies.
#[must_use]
pub fn join_fields<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(DELIMITER)
}

/// Split a delimited line into its fields. No quoting or escaping applies.
#[must_use]
pub fn split_fields(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(str::to_string).collect()
}

/// Error returned when parsing a value outside a fixed choice list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{value}' is not one of: {}", .choices.join(", "))]
pub struct InvalidChoice {
    /// The rejected input.
    pub value: String,
    /// The accepted labels.
    pub choices: &'static [&'static str],
}

/// Puzzle difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    /// Easy.
    Easy,
    /// Hard.
    Hard,
    /// Extremely hard.
    ExtremelyHard,
}

impl Difficulty {
    /// Labels in selection order.
    pub const LABELS: &'static [&'static str] = &["Easy", "Hard", "Extremely Hard"];

    /// Stored label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Hard => "Hard",
            Self::ExtremelyHard => "Extremely Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "easy" => Ok(Self::Easy),
            "hard" => Ok(Self::Hard),
            "extremely hard" => Ok(Self::ExtremelyHard),
            _ => Err(InvalidChoice {
                value: s.to_string(),
                choices: Self::LABELS,
            }),
        }
    }
}

/// Outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// White won.
    White,
    /// Black won.
    Black,
    /// Drawn game.
    Draw,
}

impl GameOutcome {
    /// Labels in selection order.
    pub const LABELS: &'static [&'static str] = &["White", "Black", "Draw"];

    /// Stored label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Black => "Black",
            Self::Draw => "Draw",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GameOutcome {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(s).as_str() {
            "white" => Ok(Self::White),
            "black" => Ok(Self::Black),
            "draw" => Ok(Self::Draw),
            _ => Err(InvalidChoice {
                value: s.to_string(),
                choices: Self::LABELS,
            }),
        }
    }
}

/// Lowercase and treat `-`/`_` as spaces, so `extremely-hard` parses.
fn normalize_choice(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// A typed record submitted through one of the forms.
pub trait FormRecord {
    /// The kind of record this type represents.
    const KIND: RecordKind;

    /// Field values in schema order.
    fn fields(&self) -> Vec<String>;
}

/// A user account. The password is kept as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login name.
    pub username: String,
    /// Contact address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Elo rating as entered. It must parse as an integer and is stored as
    /// that integer.
    pub elo_rating: String,
}

impl Account {
    /// The elo rating as a number, if it parses.
    #[must_use]
    pub fn elo(&self) -> Option<i32> {
        self.elo_rating.trim().parse().ok()
    }
}

impl FormRecord for Account {
    const KIND: RecordKind = RecordKind::Account;

    fn fields(&self) -> Vec<String> {
        vec![
            self.username.clone(),
            self.email.clone(),
            self.password.clone(),
            self.elo_rating.clone(),
        ]
    }
}

/// An application for lesson training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonApplication {
    /// Application id.
    pub id: String,
    /// Applicant's username.
    pub username: String,
    /// Applicant's FIDE id.
    pub fide_id: String,
    /// Requested coach.
    pub coach: String,
    /// Free-text description of the application.
    pub description: String,
}

impl FormRecord for LessonApplication {
    const KIND: RecordKind = RecordKind::LessonApplication;

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.username.clone(),
            self.fide_id.clone(),
            self.coach.clone(),
            self.description.clone(),
        ]
    }
}

/// A puzzle attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleAttempt {
    /// Attempt id.
    pub id: String,
    /// Solver's username.
    pub username: String,
    /// Chosen difficulty.
    pub difficulty: Difficulty,
}

impl FormRecord for PuzzleAttempt {
    const KIND: RecordKind = RecordKind::PuzzleAttempt;

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.username.clone(),
            self.difficulty.to_string(),
        ]
    }
}

/// A recorded game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Id of the member recording the game.
    pub your_id: String,
    /// Username playing white.
    pub white_player: String,
    /// Username playing black.
    pub black_player: String,
    /// Who won, or a draw.
    pub result: GameOutcome,
}

impl FormRecord for GameResult {
    const KIND: RecordKind = RecordKind::GameResult;

    fn fields(&self) -> Vec<String> {
        vec![
            self.your_id.clone(),
            self.white_player.clone(),
            self.black_player.clone(),
            self.result.to_string(),
        ]
    }
}

/// A coach's request to take on a student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachingRequest {
    /// Request id.
    pub id: String,
    /// Coach's name.
    pub name: String,
    /// Coach's biography.
    pub bio: String,
    /// Student to coach.
    pub student: String,
}

impl FormRecord for CoachingRequest {
    const KIND: RecordKind = RecordKind::CoachingRequest;

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.bio.clone(),
            self.student.clone(),
        ]
    }
}
