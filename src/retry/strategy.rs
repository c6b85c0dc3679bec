// src/retry/strategy.rs

use super::sleeper::{Sleeper, TokioSleeper};
use crate::config::RetryConfig;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Position in a bounded retry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Attempting(u32),
    Succeeded { attempts: u32 },
    Exhausted { attempts: u32 },
}

impl AttemptState {
    /// Next state after the current attempt finished.
    ///
    /// Success is terminal regardless of the remaining budget. A failure
    /// moves on to the next attempt until `max_attempts` have been made.
    pub fn advance(self, succeeded: bool, max_attempts: u32) -> AttemptState {
        match self {
            AttemptState::Attempting(n) if succeeded => AttemptState::Succeeded { attempts: n },
            AttemptState::Attempting(n) if n < max_attempts => AttemptState::Attempting(n + 1),
            AttemptState::Attempting(n) => AttemptState::Exhausted { attempts: n },
            terminal => terminal,
        }
    }
}

/// Fixed-delay retry: the same pause between every pair of attempts and
/// no pause after the last one.
#[derive(Debug, Clone)]
pub struct RetryStrategy<S = TokioSleeper> {
    config: RetryConfig,
    sleeper: S,
}

impl RetryStrategy<TokioSleeper> {
    pub fn new(config: RetryConfig) -> Self {
        Self::with_sleeper(config, TokioSleeper)
    }
}

impl<S: Sleeper> RetryStrategy<S> {
    pub fn with_sleeper(config: RetryConfig, sleeper: S) -> Self {
        Self { config, sleeper }
    }

    pub fn max_attempts(&self) -> u32 {
        self.config.max_attempts.max(1)
    }

    pub fn delay(&self) -> Duration {
        self.config.delay()
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Runs `f` with the 1-based attempt number until it succeeds or the
    /// budget is spent, returning the last error in the latter case.
    pub async fn execute<F, Fut, T, E>(&self, mut f: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            let outcome = f(attempt).await;
            let state = AttemptState::Attempting(attempt).advance(outcome.is_ok(), max_attempts);

            match (state, outcome) {
                (AttemptState::Attempting(next), Err(error)) => {
                    debug!(
                        "Attempt {} failed: {}. Retrying in {:?}",
                        attempt,
                        error,
                        self.delay()
                    );
                    self.sleeper.sleep(self.delay()).await;
                    attempt = next;
                }
                (AttemptState::Exhausted { attempts }, Err(error)) => {
                    debug!("Giving up after {} attempts: {}", attempts, error);
                    return Err(error);
                }
                (AttemptState::Succeeded { attempts }, outcome) => {
                    debug!("Succeeded on attempt {}", attempts);
                    return outcome;
                }
                (_, outcome) => return outcome,
            }
        }
    }
}
