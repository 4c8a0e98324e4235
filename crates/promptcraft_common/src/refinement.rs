//! Iterative refinement: every tested prompt becomes an immutable version.

use crate::error::{PromptcraftError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefinementEntry {
    /// 1-based, in append order
    pub version: usize,
    pub prompt: String,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only version history. Entries are never edited or removed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefinementLog {
    entries: Vec<RefinementEntry>,
}

impl RefinementLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, prompt: impl Into<String>, response: impl Into<String>) -> &RefinementEntry {
        self.append_at(prompt, response, Utc::now())
    }

    pub fn append_at(
        &mut self,
        prompt: impl Into<String>,
        response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> &RefinementEntry {
        let version = self.entries.len() + 1;
        self.entries.push(RefinementEntry {
            version,
            prompt: prompt.into(),
            response: response.into(),
            timestamp,
        });
        &self.entries[version - 1]
    }

    pub fn get(&self, version: usize) -> Option<&RefinementEntry> {
        version.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[RefinementEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&RefinementEntry> {
        self.entries.last()
    }
}

/// Active draft plus its version history.
#[derive(Debug, Clone, Default)]
pub struct RefinementLab {
    pub draft: String,
    history: RefinementLog,
}

impl RefinementLab {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &RefinementLog {
        &self.history
    }

    /// Prompt to send for the next test.
    pub fn prepare(&self) -> Result<String> {
        if self.draft.trim().is_empty() {
            return Err(PromptcraftError::EmptyPrompt);
        }
        Ok(self.draft.clone())
    }

    /// Record a successful test of `prompt`. Failed tests are not recorded.
    pub fn record(&mut self, prompt: impl Into<String>, response: impl Into<String>) -> usize {
        self.history.append(prompt, response).version
    }

    /// Copy a past version back into the draft. History is left untouched.
    pub fn load(&mut self, version: usize) -> Result<&str> {
        let entry = self
            .history
            .get(version)
            .ok_or(PromptcraftError::UnknownVersion(version))?;
        self.draft = entry.prompt.clone();
        Ok(&self.draft)
    }
}
