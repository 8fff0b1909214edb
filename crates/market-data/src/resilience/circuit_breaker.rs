//! Per-lookup circuit breaker.
//!
//! Each remote [`Lookup`] gets its own circuit with three states:
//!
//! - **Closed**: requests go to the upstream.
//! - **Open**: the upstream keeps failing, requests are skipped.
//! - **HalfOpen**: the recovery timeout elapsed, trial requests are allowed.
//!
//! State is in-memory and starts closed on every run.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::models::Lookup;

/// Default number of consecutive failures before opening the circuit.
const DEFAULT_FAILURE_THRESHOLD: u32 = 5;

/// Default time to wait before transitioning from Open to HalfOpen.
const DEFAULT_RECOVERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Number of successful requests needed to close the circuit from HalfOpen.
const HALF_OPEN_SUCCESS_THRESHOLD: u32 = 2;

/// Circuit breaker state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "Closed"),
            Self::Open => write!(f, "Open"),
            Self::HalfOpen => write!(f, "HalfOpen"),
        }
    }
}

#[derive(Debug)]
struct Circuit {
    state: CircuitState,
    /// Consecutive failures
    failure_count: u32,
    /// Consecutive successes while HalfOpen
    half_open_successes: u32,
    last_failure: Option<Instant>,
}

impl Circuit {
    fn new() -> Self {
        Self {
            state: CircuitState::Closed,
            failure_count: 0,
            half_open_successes: 0,
            last_failure: None,
        }
    }
}

/// Circuit breaker configuration.
#[derive(Clone, Debug)]
pub struct CircuitBreakerConfig {
    /// Number of failures before opening the circuit.
    pub failure_threshold: u32,
    /// Time to wait before testing recovery.
    pub recovery_timeout: Duration,
    /// Number of successes needed to close from HalfOpen.
    pub half_open_success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            recovery_timeout: DEFAULT_RECOVERY_TIMEOUT,
            half_open_success_threshold: HALF_OPEN_SUCCESS_THRESHOLD,
        }
    }
}

/// Thread-safe circuit breaker tracking failures per lookup.
pub struct CircuitBreaker {
    circuits: Mutex<HashMap<Lookup, Circuit>>,
    config: CircuitBreakerConfig,
}

impl CircuitBreaker {
    pub fn new() -> Self {
        Self::with_config(CircuitBreakerConfig::default())
    }

    pub fn with_config(config: CircuitBreakerConfig) -> Self {
        Self {
            circuits: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Lock the circuits, recovering from poison. A slightly wrong circuit
    /// state is preferable to a panic.
    fn lock_circuits(&self) -> MutexGuard<'_, HashMap<Lookup, Circuit>> {
        self.circuits.lock().unwrap_or_else(|poisoned| {
            warn!("Circuit breaker mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Whether a request for `lookup` may go to the upstream.
    ///
    /// Transitions Open -> HalfOpen once the recovery timeout has elapsed.
    pub fn is_allowed(&self, lookup: Lookup) -> bool {
        let mut circuits = self.lock_circuits();
        let circuit = circuits.entry(lookup).or_insert_with(Circuit::new);

        match circuit.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let recovered = circuit
                    .last_failure
                    .is_some_and(|at| at.elapsed() >= self.config.recovery_timeout);
                if recovered {
                    info!(
                        "Circuit breaker: transitioning '{}' from Open to HalfOpen",
                        lookup
                    );
                    circuit.state = CircuitState::HalfOpen;
                    circuit.half_open_successes = 0;
                }
                recovered
            }
        }
    }

    /// Record a successful upstream request.
    pub fn record_success(&self, lookup: Lookup) {
        let mut circuits = self.lock_circuits();
        let circuit = circuits.entry(lookup).or_insert_with(Circuit::new);

        match circuit.state {
            CircuitState::Closed => {
                circuit.failure_count = 0;
            }
            CircuitState::HalfOpen => {
                circuit.half_open_successes += 1;
                debug!(
                    "Circuit breaker: success for '{}' in HalfOpen ({}/{})",
                    lookup, circuit.half_open_successes, self.config.half_open_success_threshold
                );

                if circuit.half_open_successes >= self.config.half_open_success_threshold {
                    info!(
                        "Circuit breaker: closing circuit for '{}' after {} successes",
                        lookup, circuit.half_open_successes
                    );
                    *circuit = Circuit::new();
                }
            }
            CircuitState::Open => {
                debug!(
                    "Circuit breaker: unexpected success for '{}' in Open state",
                    lookup
                );
            }
        }
    }

    /// Record a failed upstream request. Any failure while HalfOpen reopens
    /// the circuit.
    pub fn record_failure(&self, lookup: Lookup) {
        let mut circuits = self.lock_circuits();
        let circuit = circuits.entry(lookup).or_insert_with(Circuit::new);

        circuit.failure_count += 1;
        circuit.last_failure = Some(Instant::now());

        match circuit.state {
            CircuitState::Closed => {
                if circuit.failure_count >= self.config.failure_threshold {
                    warn!(
                        "Circuit breaker: opening circuit for '{}' after {} failures",
                        lookup, circuit.failure_count
                    );
                    circuit.state = CircuitState::Open;
                } else {
                    debug!(
                        "Circuit breaker: failure for '{}' ({}/{})",
                        lookup, circuit.failure_count, self.config.failure_threshold
                    );
                }
            }
            CircuitState::HalfOpen => {
                warn!(
                    "Circuit breaker: reopening circuit for '{}' after failure in HalfOpen",
                    lookup
                );
                circuit.state = CircuitState::Open;
                circuit.half_open_successes = 0;
            }
            CircuitState::Open => {}
        }
    }

    pub fn state(&self, lookup: Lookup) -> CircuitState {
        self.lock_circuits()
            .get(&lookup)
            .map(|c| c.state)
            .unwrap_or(CircuitState::Closed)
    }

    pub fn failure_count(&self, lookup: Lookup) -> u32 {
        self.lock_circuits()
            .get(&lookup)
            .map(|c| c.failure_count)
            .unwrap_or(0)
    }

    /// Reset every circuit to Closed.
    pub fn reset_all(&self) {
        self.lock_circuits().clear();
        info!("Circuit breaker: all circuits reset");
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new()
    }
}
