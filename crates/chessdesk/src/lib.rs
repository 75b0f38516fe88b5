//! `chessdesk` - Front desk for a chess club
//!
//! This library registers members, checks logins and files lesson
//! applications, puzzle attempts, game results and coaching requests as
//! one-line records appended to plain text files.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod desk;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod record;
pub mod session;
pub mod store;
pub mod validate;

pub use config::Config;
pub use desk::{Desk, Login, Outcome, Submission};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use navigation::{Action, Navigator, Screen};
pub use record::{FormRecord, RecordKind};
pub use store::{FlatRecordStore, StoreStats};
