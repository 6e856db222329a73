//! Wiki abstraction layer: where finished release notes are published.
//!
//! - [confluence::ConfluenceClient]: Confluence REST API
//! - [mock::MockWiki]: records published pages for testing

pub mod confluence;
pub mod mock;

pub use confluence::ConfluenceClient;
pub use mock::{MockWiki, WikiCall};

use crate::error::Result;

/// Page operations used to publish release notes
pub trait Wiki: Send + Sync {
    /// Create a new page under `parent_id` in `space`
    fn create_page(&self, parent_id: &str, title: &str, body: &str, space: &str) -> Result<()>;

    /// Replace the title and body of an existing page
    fn update_page(&self, page_id: &str, title: &str, body: &str) -> Result<()>;
}
