//! Terminal output for the command-line front end.
//!
//! `formatter` builds the strings; this module decides where they go.
//! Everything is written to stderr so stdout carries only the response JSON.

pub mod formatter;

pub use formatter::{
    format_boundary_warning, format_error, format_response_summary, format_status,
    format_success,
};

use crate::boundary::BoundaryWarning;
use crate::handler::Response;

pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}

/// Print the outcome of a workflow run
pub fn display_response(action: &str, response: &Response) {
    eprintln!("{}", format_response_summary(action, response));
}
