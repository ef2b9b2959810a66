//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockLoginService, MockRegistrationService, MockSessionTokens, MockTaskCommand, MockTaskQuery,
};

use super::state::HttpState;

/// Mock ports that make up an [`HttpState`].
///
/// Tests set expectations on the ports they exercise and leave the rest at
/// their defaults, which panic if called.
#[derive(Default)]
pub struct TestPorts {
    pub login: MockLoginService,
    pub registration: MockRegistrationService,
    pub tokens: MockSessionTokens,
    pub tasks: MockTaskCommand,
    pub tasks_query: MockTaskQuery,
}

impl TestPorts {
    /// Wrap the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.login),
            Arc::new(self.registration),
            Arc::new(self.tokens),
            Arc::new(self.tasks),
            Arc::new(self.tasks_query),
        )
    }
}

/// Build handler state where only token verification is configured.
pub fn state_with_tokens(tokens: MockSessionTokens) -> HttpState {
    TestPorts {
        tokens,
        ..TestPorts::default()
    }
    .into_state()
}
