//! Screen-to-screen navigation.
//!
//! Screens are kept on an explicit stack: moving forward pushes, going back
//! pops. Every user action is one [`Action`] value handled by a single
//! dispatch, and the only state carried between screens is the signed-in
//! username held by [`Screen::Dashboard`].

use std::fmt;

use tracing::debug;

use crate::desk::{Desk, Login, Outcome};
use crate::record::RecordKind;

/// Record kinds reachable from the dashboard, in button order.
pub const DASHBOARD_FORMS: [RecordKind; 4] = [
    RecordKind::LessonApplication,
    RecordKind::PuzzleAttempt,
    RecordKind::GameResult,
    RecordKind::CoachingRequest,
];

/// A screen of the desk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// New-account form; the starting screen.
    Registration,
    /// Username and password prompt.
    Login,
    /// Menu of forms for a signed-in user.
    Dashboard {
        /// The signed-in user.
        username: String,
    },
    /// One of the dashboard forms.
    Form(RecordKind),
}

impl Screen {
    /// Window title for the screen.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Registration => RecordKind::Account.title(),
            Self::Login => "User Login",
            Self::Dashboard { .. } => "Dashboard",
            Self::Form(kind) => kind.title(),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Something the user can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the registration form.
    Register(Vec<String>),
    /// Go from registration straight to login.
    GoToLogin,
    /// Submit the login form.
    Login {
        /// Entered username.
        username: String,
        /// Entered password.
        password: String,
    },
    /// Return from login to registration.
    BackToRegister,
    /// Open a dashboard form.
    Open(RecordKind),
    /// Submit the open form.
    Submit(Vec<String>),
    /// Close the open form.
    Back,
    /// Leave the desk.
    Quit,
}

/// What a dispatched action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Whether the action applied to the current screen.
    pub accepted: bool,
    /// Dialog text to show, if any.
    pub notice: Option<String>,
}

impl Step {
    fn ignored() -> Self {
        Self {
            accepted: false,
            notice: None,
        }
    }

    fn silent() -> Self {
        Self {
            accepted: true,
            notice: None,
        }
    }

    fn with_notice(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            notice: Some(message.into()),
        }
    }
}

/// Navigation state over a [`Desk`].
#[derive(Debug)]
pub struct Navigator<'d> {
    desk: &'d Desk,
    stack: Vec<Screen>,
    finished: bool,
}

impl<'d> Navigator<'d> {
    /// Start at the registration screen.
    #[must_use]
    pub fn new(desk: &'d Desk) -> Self {
        Self {
            desk,
            stack: vec![Screen::Registration],
            finished: false,
        }
    }

    /// The screen on top of the stack.
    #[must_use]
    pub fn current(&self) -> &Screen {
        // The stack is never emptied: pops stop at the bottom screen.
        self.stack.last().unwrap_or(&Screen::Registration)
    }

    /// Number of screens on the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether the user has quit.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Apply `action` to the current screen.
    ///
    /// Actions that don't belong to the current screen are ignored.
    pub fn dispatch(&mut self, action: Action) -> Step {
        if self.finished {
            return Step::ignored();
        }

        let step = match (self.current().clone(), action) {
            (_, Action::Quit) => {
                self.finished = true;
                Step::silent()
            }
            (Screen::Registration, Action::Register(fields)) => self.register(&fields),
            (Screen::Registration, Action::GoToLogin) => {
                self.stack.push(Screen::Login);
                Step::silent()
            }
            (Screen::Login, Action::Login { username, password }) => {
                self.login(&username, &password)
            }
            (Screen::Login, Action::BackToRegister) => {
                self.back_to(&Screen::Registration);
                Step::silent()
            }
            (Screen::Dashboard { .. }, Action::Open(kind)) if DASHBOARD_FORMS.contains(&kind) => {
                self.stack.push(Screen::Form(kind));
                Step::silent()
            }
            (Screen::Form(kind), Action::Submit(fields)) => {
                Step::with_notice(self.desk.submit(kind, fields.as_slice()).message())
            }
            (Screen::Form(_), Action::Back) => {
                self.pop();
                Step::silent()
            }
            (screen, action) => {
                debug!("Ignoring {:?} on {}", action, screen);
                Step::ignored()
            }
        };

        debug!("Now on {} (depth {})", self.current(), self.depth());
        step
    }

    fn register(&mut self, fields: &[String]) -> Step {
        let submission = self.desk.submit(RecordKind::Account, fields);
        // Only a rejected form keeps the user here; a failed write still
        // moves on to login.
        if !matches!(submission.outcome, Outcome::Rejected(_)) {
            self.stack.push(Screen::Login);
        }
        Step::with_notice(submission.message())
    }

    fn login(&mut self, username: &str, password: &str) -> Step {
        let login = self.desk.login(username, password);
        let message = login.message();
        if let Login::Granted { username } = login {
            self.stack.clear();
            self.stack.push(Screen::Dashboard { username });
        }
        Step::with_notice(message)
    }

    fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn back_to(&mut self, screen: &Screen) {
        while self.stack.len() > 1 && self.current() != screen {
            self.stack.pop();
        }
        if self.current() != screen {
            self.stack.clear();
            self.stack.push(screen.clone());
        }
    }
}
