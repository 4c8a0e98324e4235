//! Prompt chaining: the output of step N feeds step N+1.
//!
//! Each step tracks its own status and request token, so a request on one
//! step never blocks another and a response for an edited or re-run step is
//! discarded instead of overwriting newer state.

use crate::error::{PromptcraftError, Result};
use crate::token::{Generation, RequestToken};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// No prompt text yet
    Empty,
    /// Has prompt text, not running
    Editable,
    /// Request in flight
    Running,
    /// Response stored
    Completed,
}

#[derive(Debug, Clone)]
pub struct ChainStep {
    pub index: usize,
    pub prompt: String,
    pub response: String,
    completed: bool,
    in_flight: bool,
    generation: Generation,
}

impl ChainStep {
    fn new(index: usize) -> Self {
        Self {
            index,
            prompt: String::new(),
            response: String::new(),
            completed: false,
            in_flight: false,
            generation: Generation::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn status(&self) -> StepStatus {
        if self.in_flight {
            StepStatus::Running
        } else if self.completed {
            StepStatus::Completed
        } else if self.prompt.trim().is_empty() {
            StepStatus::Empty
        } else {
            StepStatus::Editable
        }
    }
}

/// Handed out by `Chain::begin`; carries the prompt to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTicket {
    pub index: usize,
    pub token: RequestToken,
    pub prompt: String,
}

/// Ordered list of chain steps. Starts with one empty step.
#[derive(Debug, Clone)]
pub struct Chain {
    steps: Vec<ChainStep>,
}

impl Default for Chain {
    fn default() -> Self {
        Self::new()
    }
}

impl Chain {
    pub fn new() -> Self {
        Self {
            steps: vec![ChainStep::new(0)],
        }
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn step(&self, index: usize) -> Result<&ChainStep> {
        self.steps
            .get(index)
            .ok_or(PromptcraftError::UnknownStep(index))
    }

    /// Append an empty step and return its index.
    pub fn add_step(&mut self) -> usize {
        let index = self.steps.len();
        self.steps.push(ChainStep::new(index));
        index
    }

    /// Step 0 is always unlocked; later steps wait for their predecessor.
    pub fn is_unlocked(&self, index: usize) -> bool {
        match index {
            0 => !self.steps.is_empty(),
            i => self.steps.get(i - 1).map(|p| p.completed).unwrap_or(false),
        }
    }

    /// Edit a step's own prompt. Editing a running step drops its request.
    pub fn set_prompt(&mut self, index: usize, prompt: impl Into<String>) -> Result<()> {
        if !self.is_unlocked(index) {
            return Err(PromptcraftError::StepLocked(index));
        }
        let step = self
            .steps
            .get_mut(index)
            .ok_or(PromptcraftError::UnknownStep(index))?;
        step.prompt = prompt.into();
        if step.in_flight {
            step.in_flight = false;
            step.generation.invalidate();
        }
        Ok(())
    }

    /// Prompt actually sent for a step: its own text, prefixed with the
    /// previous step's response as context when there is one.
    pub fn effective_prompt(&self, index: usize) -> Result<String> {
        let step = self.step(index)?;
        let previous = index
            .checked_sub(1)
            .and_then(|i| self.steps.get(i))
            .filter(|p| !p.response.is_empty());

        Ok(match previous {
            Some(prev) => format!("Kontext: {}\n\nAufgabe: {}", prev.response, step.prompt),
            None => step.prompt.clone(),
        })
    }

    /// Move a step to running and hand out the request to send.
    pub fn begin(&mut self, index: usize) -> Result<StepTicket> {
        let step = self.step(index)?;
        if !self.is_unlocked(index) {
            return Err(PromptcraftError::StepLocked(index));
        }
        if step.prompt.trim().is_empty() {
            return Err(PromptcraftError::EmptyPrompt);
        }
        if step.in_flight {
            return Err(PromptcraftError::StepBusy(index));
        }

        let prompt = self.effective_prompt(index)?;
        let step = &mut self.steps[index];
        step.in_flight = true;
        let token = step.generation.issue();

        Ok(StepTicket {
            index,
            token,
            prompt,
        })
    }

    /// Store the response for a ticket. Returns false if the ticket is stale.
    ///
    /// Later steps were built on the old response: they drop back to
    /// uncompleted and any request they have in flight goes stale.
    pub fn complete(&mut self, ticket: &StepTicket, response: impl Into<String>) -> bool {
        let Some(step) = self.current_step_mut(ticket) else {
            return false;
        };
        step.response = response.into();
        step.completed = true;
        step.in_flight = false;

        for later in self.steps.iter_mut().skip(ticket.index + 1) {
            later.completed = false;
            if later.in_flight {
                later.in_flight = false;
                later.generation.invalidate();
            }
        }
        true
    }

    /// Release a failed request. Earlier state of the step is kept.
    pub fn fail(&mut self, ticket: &StepTicket) -> bool {
        let Some(step) = self.current_step_mut(ticket) else {
            return false;
        };
        step.in_flight = false;
        true
    }

    fn current_step_mut(&mut self, ticket: &StepTicket) -> Option<&mut ChainStep> {
        self.steps
            .get_mut(ticket.index)
            .filter(|s| s.in_flight && s.generation.is_current(ticket.token))
    }
}
