use crate::{
    adapter::{AppHandle, PlatformAdapter},
    enumerator::ApplicationEnumerator,
    error::AdapterError,
    node::AppInfo,
};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Budget used when the caller does not supply one.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Pause between two poll attempts.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl ResolverConfig {
    pub fn with_timeout_ms(mut self, ms: u64) -> Self {
        self.timeout = Duration::from_millis(ms);
        self
    }

    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.poll_interval = Duration::from_millis(ms);
        self
    }

    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverState {
    Unresolved,
    Polling,
    Resolved,
    TimedOut,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Found,
    NotFoundYet,
}

/// One scan of one snapshot. Only ever logged.
#[derive(Debug, Clone, Copy)]
pub struct PollAttempt {
    pub number: u32,
    pub at: Duration,
    pub outcome: AttemptOutcome,
}

/// A running application located by name.
///
/// Construction blocks while it polls the registry. A resolver that exists
/// has found its application and owns the handle until [`closedown`] (or
/// drop) releases it.
///
/// [`closedown`]: ApplicationResolver::closedown
#[derive(Debug)]
pub struct ApplicationResolver {
    target: String,
    handle: Option<AppHandle>,
    state: ResolverState,
    attempts: u32,
    elapsed: Duration,
}

impl ApplicationResolver {
    /// Resolves `target` with the default poll interval. `timeout_ms`
    /// defaults to [`DEFAULT_TIMEOUT_MS`].
    pub fn new(
        adapter: &dyn PlatformAdapter,
        target: Option<&str>,
        timeout_ms: Option<u64>,
    ) -> Result<Self, AdapterError> {
        let mut config = ResolverConfig::default();
        if let Some(ms) = timeout_ms {
            config = config.with_timeout_ms(ms);
        }
        Self::with_config(adapter, target, config)
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    pub fn with_config(
        adapter: &dyn PlatformAdapter,
        target: Option<&str>,
        config: ResolverConfig,
    ) -> Result<Self, AdapterError> {
        let target = match target {
            Some(t) if !t.trim().is_empty() => t,
            _ => {
                return Err(AdapterError::invalid_args("An application name is required")
                    .with_suggestion("Pass the application's display name, e.g. --name gedit"))
            }
        };
        if config.poll_interval.is_zero() {
            return Err(AdapterError::invalid_args("Poll interval must be greater than zero"));
        }

        let start = Instant::now();
        let mut state = ResolverState::Unresolved;
        let mut attempts = 0u32;
        tracing::debug!(
            "resolve: looking for {target:?} (timeout {}ms, poll {}ms)",
            config.timeout.as_millis(),
            config.poll_interval.as_millis()
        );

        loop {
            state = transition(state, ResolverState::Polling);
            attempts += 1;
            let found = poll_once(adapter, target)?;
            let attempt = PollAttempt {
                number: attempts,
                at: start.elapsed(),
                outcome: if found.is_some() {
                    AttemptOutcome::Found
                } else {
                    AttemptOutcome::NotFoundYet
                },
            };
            tracing::debug!("resolve: {attempt:?}");

            if let Some(handle) = found {
                state = transition(state, ResolverState::Resolved);
                return Ok(Self {
                    target: target.to_string(),
                    handle: Some(handle),
                    state,
                    attempts,
                    elapsed: attempt.at,
                });
            }

            let elapsed = start.elapsed();
            if elapsed >= config.timeout {
                transition(state, ResolverState::TimedOut);
                return Err(AdapterError::not_running(config.timeout_ms()));
            }
            std::thread::sleep(config.poll_interval.min(config.timeout - elapsed));
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    pub fn handle(&self) -> Option<&AppHandle> {
        self.handle.as_ref()
    }

    pub fn info(&self) -> Option<&AppInfo> {
        self.handle.as_ref().map(AppHandle::info)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Time from the start of construction to the successful attempt.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn closedown(&mut self) {
        if let Some(handle) = self.handle.take() {
            tracing::debug!("resolve: releasing handle for {:?}", self.target);
            handle.release();
            self.state = transition(self.state, ResolverState::Closed);
        }
    }
}

impl Drop for ApplicationResolver {
    fn drop(&mut self) {
        self.closedown();
    }
}

fn transition(from: ResolverState, to: ResolverState) -> ResolverState {
    if from != to {
        tracing::trace!("resolve: {from:?} -> {to:?}");
    }
    to
}

fn poll_once(
    adapter: &dyn PlatformAdapter,
    target: &str,
) -> Result<Option<AppHandle>, AdapterError> {
    let mut apps = ApplicationEnumerator::open(adapter)?;
    while let Some((name, handle)) = apps.next_entry() {
        if name == target {
            apps.closedown();
            return Ok(Some(handle));
        }
    }
    Ok(None)
}

#[derive(Debug, Clone, Default)]
pub struct ResolverBuilder {
    target: Option<String>,
    config: ResolverConfig,
}

impl ResolverBuilder {
    pub fn target(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    pub fn timeout_ms(mut self, ms: u64) -> Self {
        self.config = self.config.with_timeout_ms(ms);
        self
    }

    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config = self.config.with_poll_interval_ms(ms);
        self
    }

    pub fn resolve(&self, adapter: &dyn PlatformAdapter) -> Result<ApplicationResolver, AdapterError> {
        ApplicationResolver::with_config(adapter, self.target.as_deref(), self.config)
    }
}
