//! Request tokens for discarding stale results.
//!
//! Every logical operation (a chain step, a consistency batch) owns a
//! `Generation`. Starting a request bumps it and hands out a token; when the
//! response arrives it is applied only if the token still matches.

use serde::{Deserialize, Serialize};

/// Identifies one in-flight request of a single logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic counter backing `RequestToken`s.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    current: u64,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; any token issued before is now stale.
    pub fn issue(&mut self) -> RequestToken {
        self.current += 1;
        RequestToken(self.current)
    }

    /// Invalidate outstanding tokens without starting a request.
    pub fn invalidate(&mut self) {
        self.current += 1;
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newer_token_supersedes_older() {
        let mut gen = Generation::new();
        let first = gen.issue();
        assert!(gen.is_current(first));

        let second = gen.issue();
        assert!(!gen.is_current(first));
        assert!(gen.is_current(second));
    }

    #[test]
    fn test_invalidate_drops_outstanding_token() {
        let mut gen = Generation::new();
        let token = gen.issue();
        gen.invalidate();
        assert!(!gen.is_current(token));
    }
}
