//! Interactive desk session.
//!
//! Drives a [`Navigator`] from line input: each screen prints its menu,
//! reads a choice, collects form fields and shows the resulting dialog
//! text. Input comes through the [`Prompt`] trait so the same loop runs
//! against a terminal or a scripted test double.

use std::borrow::Cow;

use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{ColorMode, Editor, Helper};
use tracing::{debug, info};

use crate::desk::{greeting, Desk};
use crate::error::Result;
use crate::navigation::{Action, Navigator, Screen, DASHBOARD_FORMS};
use crate::record::{FieldSpec, RecordKind};

/// Line-oriented user interaction.
pub trait Prompt {
    /// Read one line after showing `prompt`.
    ///
    /// Returns `None` when input ends or the user interrupts.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Read one line without showing what is typed.
    ///
    /// # Errors
    ///
    /// Returns an error if the input source fails.
    fn read_secret(&mut self, prompt: &str) -> Result<Option<String>> {
        self.read_line(prompt)
    }

    /// Show a message to the user.
    fn show(&mut self, message: &str);
}

/// Line editor helper that draws `*` for each typed character while
/// `masking` is set.
#[derive(Debug, Default)]
struct MaskingHelper {
    masking: bool,
}

impl Highlighter for MaskingHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Cow::Owned("*".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.masking
    }
}

impl Completer for MaskingHelper {
    type Candidate = String;
}

impl Hinter for MaskingHelper {
    type Hint = String;
}

impl Validator for MaskingHelper {}

impl Helper for MaskingHelper {}

/// Terminal prompt backed by rustyline.
pub struct TerminalPrompt {
    editor: Editor<MaskingHelper, DefaultHistory>,
}

impl std::fmt::Debug for TerminalPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPrompt").finish_non_exhaustive()
    }
}

impl TerminalPrompt {
    /// Create a terminal prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be set up.
    pub fn new() -> Result<Self> {
        let mut editor: Editor<MaskingHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(MaskingHelper::default()));
        // Masking is drawn by the highlighter, which only runs with color on.
        editor.set_color_mode(ColorMode::Forced);
        Ok(Self { editor })
    }

    fn set_masking(&mut self, masking: bool) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.masking = masking;
        }
    }
}

fn end_of_input(read: std::result::Result<String, ReadlineError>) -> Result<Option<String>> {
    match read {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Prompt for TerminalPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        end_of_input(self.editor.readline(prompt))
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Option<String>> {
        self.set_masking(true);
        let read = self.editor.readline(prompt);
        self.set_masking(false);
        end_of_input(read)
    }

    fn show(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Run the desk until the user quits or input ends.
///
/// # Errors
///
/// Returns an error only if the prompt itself fails; store failures are
/// shown as dialog text and the session continues.
pub fn run(desk: &Desk, prompt: &mut dyn Prompt) -> Result<()> {
    let mut nav = Navigator::new(desk);
    info!("Session started");

    while !nav.is_finished() {
        let screen = nav.current().clone();
        show_screen(&screen, prompt);

        let action = match read_choice(&screen, prompt)? {
            Choice::Act(action) => action,
            Choice::Unknown => {
                prompt.show("Unknown choice.");
                continue;
            }
            Choice::End => Action::Quit,
        };
        debug!("Dispatching {:?}", action);

        if let Some(notice) = nav.dispatch(action).notice {
            prompt.show(&notice);
        }
    }

    info!("Session ended");
    Ok(())
}

fn show_screen(screen: &Screen, prompt: &mut dyn Prompt) {
    prompt.show("");
    prompt.show(&format!("== {} ==", screen.title()));

    let menu = match screen {
        Screen::Registration => vec!["1) Register".to_string(), "2) Login".to_string()],
        Screen::Login => vec!["1) Login".to_string(), "2) Back to Register".to_string()],
        Screen::Dashboard { username } => {
            prompt.show(&greeting(username));
            DASHBOARD_FORMS
                .iter()
                .enumerate()
                .map(|(i, kind)| format!("{}) {}", i + 1, kind.title()))
                .collect()
        }
        Screen::Form(_) => vec!["1) Submit".to_string(), "2) Back".to_string()],
    };

    for entry in menu {
        prompt.show(&entry);
    }
    prompt.show("q) Quit");
}

/// What the user entered at a menu.
enum Choice {
    /// A menu entry, with any form input it needed.
    Act(Action),
    /// Not an entry of this screen's menu.
    Unknown,
    /// Input ended.
    End,
}

/// Read the menu choice for `screen` and any form input it needs.
fn read_choice(screen: &Screen, prompt: &mut dyn Prompt) -> Result<Choice> {
    let Some(entry) = prompt.read_line("> ")? else {
        return Ok(Choice::End);
    };
    let entry = entry.trim();
    if entry.eq_ignore_ascii_case("q") {
        return Ok(Choice::Act(Action::Quit));
    }

    let action = match (screen, entry) {
        (Screen::Registration, "1") => read_fields(RecordKind::Account, prompt)?.map(Action::Register),
        (Screen::Registration, "2") => Some(Action::GoToLogin),
        (Screen::Login, "1") => {
            let Some(username) = prompt.read_line("Username: ")? else {
                return Ok(Choice::End);
            };
            let Some(password) = prompt.read_secret("Password: ")? else {
                return Ok(Choice::End);
            };
            Some(Action::Login { username, password })
        }
        (Screen::Login, "2") => Some(Action::BackToRegister),
        (Screen::Dashboard { .. }, n) => match n.parse::<usize>() {
            Ok(i) if (1..=DASHBOARD_FORMS.len()).contains(&i) => {
                Some(Action::Open(DASHBOARD_FORMS[i - 1]))
            }
            _ => return Ok(Choice::Unknown),
        },
        (Screen::Form(kind), "1") => read_fields(*kind, prompt)?.map(Action::Submit),
        (Screen::Form(_), "2") => Some(Action::Back),
        _ => return Ok(Choice::Unknown),
    };

    Ok(action.map_or(Choice::End, Choice::Act))
}

/// Prompt for every field of `kind`, in schema order.
fn read_fields(kind: RecordKind, prompt: &mut dyn Prompt) -> Result<Option<Vec<String>>> {
    let mut values = Vec::with_capacity(kind.arity());
    for spec in kind.fields() {
        let label = field_prompt(spec);
        let read = if spec.secret {
            prompt.read_secret(&label)?
        } else {
            prompt.read_line(&label)?
        };
        let Some(value) = read else {
            return Ok(None);
        };
        values.push(resolve_choice(spec, value));
    }
    Ok(Some(values))
}

fn field_prompt(spec: &FieldSpec) -> String {
    match spec.choices {
        Some(choices) => {
            let options: Vec<String> = choices
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}={c}", i + 1))
                .collect();
            format!("{} [{}]: ", spec.label, options.join(", "))
        }
        None => format!("{}: ", spec.label),
    }
}

/// Map a menu number or a case-insensitive label to the stored choice.
///
/// Anything else is passed through for validation to reject.
fn resolve_choice(spec: &FieldSpec, value: String) -> String {
    let Some(choices) = spec.choices else {
        return value;
    };
    let trimmed = value.trim();

    if let Ok(i) = trimmed.parse::<usize>() {
        if let Some(choice) = i.checked_sub(1).and_then(|i| choices.get(i)) {
            return (*choice).to_string();
        }
    }

    choices
        .iter()
        .find(|choice| choice.eq_ignore_ascii_case(trimmed))
        .map_or(value, |choice| (*choice).to_string())
}
