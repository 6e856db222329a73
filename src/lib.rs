pub mod boundary;
pub mod config;
pub mod domain;
pub mod error;
pub mod event;
pub mod git;
pub mod handler;
pub mod logging;
pub mod notes;
pub mod services;
pub mod tracker;
pub mod ui;
pub mod wiki;

pub use error::{ReleaseNotesError, Result};
