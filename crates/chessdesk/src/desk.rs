//! Front-desk use cases: registering, logging in and submitting forms.
//!
//! Every form goes through the same steps: validate the raw values, render
//! the line for the record kind, append it to the kind's file. The outcome
//! carries the text shown to the user. I/O failures stop at this layer;
//! they are reported, never retried, and never abort the program.

use tracing::{info, warn};

use crate::config::{Config, FileNames};
use crate::error::{Error, Result};
use crate::record::{FormRecord, LineFormat, RecordKind};
use crate::store::{FlatRecordStore, StoreStats};
use crate::validate::{self, Rejection};

/// Shown when a login attempt matches no account.
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

/// Shown when the account file cannot be read during login.
pub const CREDENTIAL_CHECK_FAILED: &str = "Error occurred while checking credentials.";

/// Text shown after a record of `kind` is saved.
#[must_use]
pub fn success_message(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Account => "User registered successfully!",
        RecordKind::LessonApplication => "Credentials saved successfully!",
        RecordKind::PuzzleAttempt => "Puzzle credentials saved successfully!",
        RecordKind::GameResult => "Game credentials saved successfully!",
        RecordKind::CoachingRequest => "Coaching credentials saved successfully!",
    }
}

/// Text shown when a record of `kind` cannot be written.
#[must_use]
pub fn failure_message(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Account => "Error occurred while registering user.",
        RecordKind::LessonApplication => "Error occurred while saving credentials.",
        RecordKind::PuzzleAttempt => "Error occurred while saving puzzle credentials.",
        RecordKind::GameResult => "Error occurred while saving game credentials.",
        RecordKind::CoachingRequest => "Error occurred while saving coaching credentials.",
    }
}

/// Dashboard greeting for a signed-in user.
#[must_use]
pub fn greeting(username: &str) -> String {
    format!("Hey, Welcome {username}!")
}

/// What happened to a submitted form.
#[derive(Debug)]
pub enum Outcome {
    /// The record was appended.
    Saved,
    /// Validation failed; nothing was written.
    Rejected(Rejection),
    /// The record file could not be written.
    Failed(Error),
}

/// Result of submitting one form.
#[derive(Debug)]
pub struct Submission {
    /// Kind of record submitted.
    pub kind: RecordKind,
    /// What happened.
    pub outcome: Outcome,
}

impl Submission {
    /// Whether the record was written.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self.outcome, Outcome::Saved)
    }

    /// Text to show the user.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.outcome {
            Outcome::Saved => success_message(self.kind).to_string(),
            Outcome::Rejected(rejection) => rejection.to_string(),
            Outcome::Failed(_) => failure_message(self.kind).to_string(),
        }
    }
}

/// Result of a login attempt.
#[derive(Debug)]
pub enum Login {
    /// Credentials matched an account.
    Granted {
        /// The signed-in user.
        username: String,
    },
    /// No account matched.
    Denied,
    /// The account file could not be read.
    Failed(Error),
}

impl Login {
    /// Text to show the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Granted { username } => greeting(username),
            Self::Denied => INVALID_CREDENTIALS.to_string(),
            Self::Failed(_) => CREDENTIAL_CHECK_FAILED.to_string(),
        }
    }
}

/// The front desk: record stores plus the file layout from configuration.
#[derive(Debug, Clone)]
pub struct Desk {
    store: FlatRecordStore,
    files: FileNames,
}

impl Desk {
    /// Create a desk over `store` using `files` for the per-kind file names.
    #[must_use]
    pub fn new(store: FlatRecordStore, files: FileNames) -> Self {
        Self { store, files }
    }

    /// Create a desk from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let store = FlatRecordStore::open(config.data_dir())
            .with_create_root(config.storage.create_data_dir);
        Self::new(store, config.files.clone())
    }

    /// The underlying record store.
    #[must_use]
    pub fn store(&self) -> &FlatRecordStore {
        &self.store
    }

    /// File name holding records of `kind`.
    #[must_use]
    pub fn file_name(&self, kind: RecordKind) -> &str {
        self.files.for_kind(kind)
    }

    /// Validate and append raw form values for `kind`.
    pub fn submit<S: AsRef<str>>(&self, kind: RecordKind, fields: &[S]) -> Submission {
        let values = match validate::accept(kind, fields) {
            Ok(values) => values,
            Err(rejection) => {
                info!("Rejected {} submission: {:?}", kind, rejection);
                return Submission {
                    kind,
                    outcome: Outcome::Rejected(rejection),
                };
            }
        };

        let file_name = self.file_name(kind);
        let written = match kind.line_format() {
            LineFormat::Delimited => self.store.append(file_name, values.as_slice()),
            LineFormat::Labeled => self
                .store
                .append_line(file_name, &kind.render(values.as_slice())),
        };
        let outcome = match written {
            Ok(()) => Outcome::Saved,
            Err(err) => {
                warn!("{} record was not saved: {}", kind, err);
                Outcome::Failed(err)
            }
        };
        Submission { kind, outcome }
    }

    /// Validate and append a typed record.
    pub fn submit_record<R: FormRecord>(&self, record: &R) -> Submission {
        self.submit(R::KIND, record.fields().as_slice())
    }

    /// Scan the account file for an exact username and password match.
    ///
    /// # Errors
    ///
    /// Returns an error if the account file exists but cannot be read.
    pub fn check_credentials(&self, username: &str, password: &str) -> Result<bool> {
        let found = self
            .store
            .find_match(self.file_name(RecordKind::Account), |fields| {
                fields.first().map(String::as_str) == Some(username)
                    && fields.get(2).map(String::as_str) == Some(password)
            })?;
        Ok(found.is_some())
    }

    /// Attempt a login.
    pub fn login(&self, username: &str, password: &str) -> Login {
        match self.check_credentials(username, password) {
            Ok(true) => {
                info!("User {} signed in", username);
                Login::Granted {
                    username: username.to_string(),
                }
            }
            Ok(false) => {
                info!("Rejected sign-in for {}", username);
                Login::Denied
            }
            Err(err) => {
                warn!("Credential check failed: {}", err);
                Login::Failed(err)
            }
        }
    }

    /// Every stored record of `kind`, split into field values.
    ///
    /// # Errors
    ///
    /// Returns an error if the record file exists but cannot be read.
    pub fn list(&self, kind: RecordKind) -> Result<Vec<Vec<String>>> {
        Ok(self
            .store
            .read_lines(self.file_name(kind))?
            .iter()
            .map(|line| kind.parse_line(line))
            .collect())
    }

    /// Statistics for every record file.
    ///
    /// # Errors
    ///
    /// Returns an error if any record file exists but cannot be read.
    pub fn stats(&self) -> Result<Vec<(RecordKind, StoreStats)>> {
        RecordKind::ALL
            .iter()
            .map(|&kind| {
                self.store
                    .stats(self.file_name(kind))
                    .map(|stats| (kind, stats))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Account, CoachingRequest, Difficulty, GameOutcome, GameResult, PuzzleAttempt};

    fn create_test_desk() -> (tempfile::TempDir, Desk) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let desk = Desk::new(FlatRecordStore::open(dir.path()), FileNames::default());
        (dir, desk)
    }

    fn alice() -> Account {
        Account {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "pw123".to_string(),
            elo_rating: "1500".to_string(),
        }
    }

    fn read(dir: &tempfile::TempDir, name: &str) -> String {
        std::fs::read_to_string(dir.path().join(name)).unwrap_or_default()
    }

    #[test]
    fn test_register_and_login() {
        let (dir, desk) = create_test_desk();

        let submission = desk.submit_record(&alice());
        assert!(submission.is_saved());
        assert_eq!(submission.message(), "User registered successfully!");
        assert_eq!(read(&dir, "users.txt"), "alice,a@x.com,pw123,1500\n");

        let login = desk.login("alice", "pw123");
        assert!(matches!(login, Login::Granted { ref username } if username == "alice"));
        assert_eq!(login.message(), "Hey, Welcome alice!");
    }

    #[test]
    fn test_login_unknown_user_denied() {
        let (_dir, desk) = create_test_desk();
        desk.submit_record(&alice());

        let login = desk.login("bob", "anything");
        assert!(matches!(login, Login::Denied));
        assert_eq!(login.message(), INVALID_CREDENTIALS);
    }

    #[test]
    fn test_login_before_any_registration_denied() {
        let (_dir, desk) = create_test_desk();
        assert!(!desk.check_credentials("alice", "pw123").unwrap());
    }

    #[test]
    fn test_login_matches_password_not_email() {
        let (_dir, desk) = create_test_desk();
        desk.submit_record(&alice());
        assert!(!desk.check_credentials("alice", "a@x.com").unwrap());
    }

    #[test]
    fn test_elo_stored_as_number() {
        let (dir, desk) = create_test_desk();

        let submission = desk.submit(RecordKind::Account, &["alice", "a@x.com", "pw", " 01500"]);
        assert!(submission.is_saved());
        assert_eq!(read(&dir, "users.txt"), "alice,a@x.com,pw,1500\n");
        assert!(desk.check_credentials("alice", "pw").unwrap());
    }

    #[test]
    fn test_lesson_goes_through_delimited_append() {
        let (dir, desk) = create_test_desk();
        let lesson = ["2", "carol", "4100019", "Bob", "Openings, then endgames"];

        assert!(desk.submit(RecordKind::LessonApplication, &lesson).is_saved());
        assert_eq!(
            read(&dir, "lesson_credentials.txt"),
            "2,carol,4100019,Bob,Openings, then endgames\n"
        );
        assert_eq!(
            desk.store().read_all("lesson_credentials.txt").unwrap()[0].len(),
            6
        );
    }

    #[test]
    fn test_empty_elo_rejected_and_nothing_written() {
        let (dir, desk) = create_test_desk();
        let account = Account {
            elo_rating: String::new(),
            ..alice()
        };

        let submission = desk.submit_record(&account);
        assert!(matches!(submission.outcome, Outcome::Rejected(_)));
        assert_eq!(submission.message(), "Please fill in all fields.");
        assert!(!dir.path().join("users.txt").exists());
    }

    #[test]
    fn test_duplicate_registration_allowed() {
        let (dir, desk) = create_test_desk();
        assert!(desk.submit_record(&alice()).is_saved());
        assert!(desk.submit_record(&alice()).is_saved());

        assert_eq!(read(&dir, "users.txt").lines().count(), 2);
        assert!(desk.check_credentials("alice", "pw123").unwrap());
    }

    #[test]
    fn test_duplicate_lesson_ids_allowed() {
        let (dir, desk) = create_test_desk();
        let first = ["1", "alice", "4100018", "Bob", "Endgames"];
        let second = ["1", "carol", "4100019", "Bob", "Openings"];

        assert!(desk.submit(RecordKind::LessonApplication, &first).is_saved());
        assert!(desk.submit(RecordKind::LessonApplication, &second).is_saved());

        let contents = read(&dir, "lesson_credentials.txt");
        assert_eq!(
            contents,
            "1,alice,4100018,Bob,Endgames\n1,carol,4100019,Bob,Openings\n"
        );
    }

    #[test]
    fn test_puzzle_written_as_labeled_line() {
        let (dir, desk) = create_test_desk();
        let puzzle = PuzzleAttempt {
            id: "7".to_string(),
            username: "alice".to_string(),
            difficulty: Difficulty::ExtremelyHard,
        };

        let submission = desk.submit_record(&puzzle);
        assert_eq!(submission.message(), "Puzzle credentials saved successfully!");
        assert_eq!(
            read(&dir, "puzzle_credentials.txt"),
            "ID: 7, Username: alice, Difficulty: Extremely Hard\n"
        );
    }

    #[test]
    fn test_game_written_as_labeled_line() {
        let (dir, desk) = create_test_desk();
        let game = GameResult {
            your_id: "3".to_string(),
            white_player: "alice".to_string(),
            black_player: "bob".to_string(),
            result: GameOutcome::White,
        };

        assert!(desk.submit_record(&game).is_saved());
        assert_eq!(
            read(&dir, "game_credentials.txt"),
            "Your ID: 3, White Player: alice, Black Player: bob, Result: White\n"
        );
    }

    #[test]
    fn test_coaching_written_as_labeled_line() {
        let (dir, desk) = create_test_desk();
        let request = CoachingRequest {
            id: "9".to_string(),
            name: "Carol".to_string(),
            bio: "FM".to_string(),
            student: "dave".to_string(),
        };

        assert!(desk.submit_record(&request).is_saved());
        assert_eq!(
            read(&dir, "coaching_credentials.txt"),
            "ID: 9, Name: Carol, Coach Bio: FM, Student: dave\n"
        );
    }

    #[test]
    fn test_write_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let desk = Desk::new(FlatRecordStore::open(&blocker), FileNames::default());

        let submission = desk.submit(RecordKind::GameResult, &["1", "a", "b", "Draw"]);
        assert!(matches!(submission.outcome, Outcome::Failed(_)));
        assert_eq!(
            submission.message(),
            "Error occurred while saving game credentials."
        );
    }

    #[test]
    fn test_login_read_failure_reported() {
        let (dir, desk) = create_test_desk();
        std::fs::create_dir(dir.path().join("users.txt")).unwrap();

        let login = desk.login("alice", "pw123");
        assert!(matches!(login, Login::Failed(_)));
        assert_eq!(login.message(), CREDENTIAL_CHECK_FAILED);
    }

    #[test]
    fn test_custom_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let files = FileNames {
            accounts: "members.txt".to_string(),
            ..FileNames::default()
        };
        let desk = Desk::new(FlatRecordStore::open(dir.path()), files);

        desk.submit_record(&alice());
        assert!(dir.path().join("members.txt").exists());
        assert!(desk.check_credentials("alice", "pw123").unwrap());
    }

    #[test]
    fn test_list_parses_each_format() {
        let (_dir, desk) = create_test_desk();
        desk.submit_record(&alice());
        desk.submit(RecordKind::PuzzleAttempt, &["7", "alice", "Easy"]);

        assert_eq!(
            desk.list(RecordKind::Account).unwrap(),
            vec![vec!["alice", "a@x.com", "pw123", "1500"]]
        );
        assert_eq!(
            desk.list(RecordKind::PuzzleAttempt).unwrap(),
            vec![vec!["7", "alice", "Easy"]]
        );
        assert!(desk.list(RecordKind::GameResult).unwrap().is_empty());
    }

    #[test]
    fn test_stats_covers_every_kind() {
        let (_dir, desk) = create_test_desk();
        desk.submit_record(&alice());

        let stats = desk.stats().unwrap();
        assert_eq!(stats.len(), RecordKind::ALL.len());
        assert_eq!(stats[0].0, RecordKind::Account);
        assert_eq!(stats[0].1.records, 1);
        assert!(stats[1..].iter().all(|(_, s)| s.records == 0));
    }

    #[test]
    fn test_messages_are_distinct_per_kind() {
        for kind in RecordKind::ALL {
            assert_ne!(success_message(kind), failure_message(kind));
        }
    }
}
