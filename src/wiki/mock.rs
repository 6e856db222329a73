use std::sync::Mutex;

use crate::error::{ReleaseNotesError, Result};
use crate::wiki::Wiki;

/// A page operation received by [MockWiki]
#[derive(Debug, Clone, PartialEq)]
pub enum WikiCall {
    CreatePage {
        parent_id: String,
        title: String,
        body: String,
        space: String,
    },
    UpdatePage {
        page_id: String,
        title: String,
        body: String,
    },
}

/// Mock wiki recording every publish call
#[derive(Default)]
pub struct MockWiki {
    calls: Mutex<Vec<WikiCall>>,
    unavailable: bool,
}

impl MockWiki {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail
    pub fn set_unavailable(&mut self) {
        self.unavailable = true;
    }

    /// Publish calls received, in order
    pub fn calls(&self) -> Vec<WikiCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: WikiCall) -> Result<()> {
        if self.unavailable {
            return Err(ReleaseNotesError::wiki("Wiki unavailable"));
        }
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
        Ok(())
    }
}

impl Wiki for MockWiki {
    fn create_page(&self, parent_id: &str, title: &str, body: &str, space: &str) -> Result<()> {
        self.record(WikiCall::CreatePage {
            parent_id: parent_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            space: space.to_string(),
        })
    }

    fn update_page(&self, page_id: &str, title: &str, body: &str) -> Result<()> {
        self.record(WikiCall::UpdatePage {
            page_id: page_id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        })
    }
}
