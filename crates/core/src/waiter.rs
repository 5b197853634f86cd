use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::{
    cloud_provider::CloudProvider,
    error::{ComputeError, Error, Result},
    resource::AutoScalingGroup,
};

const DEFAULT_DELAY: Duration = Duration::from_secs(15);
const DEFAULT_MAX_ATTEMPTS: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    AwaitingCapacityMatch,
    AwaitingAllInService,
}

impl Display for WaitPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let value = match self {
            WaitPhase::AwaitingCapacityMatch => "capacity match",
            WaitPhase::AwaitingAllInService => "all in service",
        };
        write!(f, "{}", value)
    }
}

/// Target the group has to reach before the waiter reports convergence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesiredState {
    capacity: usize,
}

impl DesiredState {
    pub fn new(desired_capacity: i32) -> Self {
        Self {
            capacity: usize::try_from(desired_capacity).unwrap_or_default(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn capacity_matches(&self, group: &AutoScalingGroup) -> bool {
        group.instances.len() == self.capacity
    }

    fn is_converged(&self, group: &AutoScalingGroup) -> bool {
        self.capacity_matches(group) && group.in_service_count() == self.capacity
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaiterConfig {
    pub delay: Duration,
    pub capacity_attempts: u32,
    pub in_service_attempts: u32,
}

impl Default for WaiterConfig {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            capacity_attempts: DEFAULT_MAX_ATTEMPTS,
            in_service_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl WaiterConfig {
    fn max_attempts(&self, phase: WaitPhase) -> u32 {
        let attempts = match phase {
            WaitPhase::AwaitingCapacityMatch => self.capacity_attempts,
            WaitPhase::AwaitingAllInService => self.in_service_attempts,
        };
        attempts.max(1)
    }
}

#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Anything that can return a fresh snapshot of a group by name.
#[async_trait]
pub trait GroupSource: Send + Sync {
    async fn fetch_group(&self, group_name: &str) -> Result<AutoScalingGroup>;
}

#[async_trait]
impl<T: CloudProvider + ?Sized> GroupSource for T {
    async fn fetch_group(&self, group_name: &str) -> Result<AutoScalingGroup> {
        self.describe_auto_scaling_group(group_name).await
    }
}

#[derive(Debug)]
pub enum WaitOutcome {
    Converged { attempts: u32 },
    TimedOut { phase: WaitPhase, attempts: u32 },
    Failed { phase: WaitPhase, error: Error },
}

impl WaitOutcome {
    /// Total attempts on success, otherwise the matching error.
    pub fn into_result(self, group_name: &str) -> Result<u32> {
        match self {
            WaitOutcome::Converged { attempts } => Ok(attempts),
            WaitOutcome::TimedOut { phase, attempts } => Err(ComputeError::ConvergenceTimedOut {
                group_name: group_name.to_string(),
                phase,
                attempts,
            }
            .into()),
            WaitOutcome::Failed { error, .. } => Err(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Advance(WaitPhase),
    Converged,
}

/// Decides the next step from one group snapshot. Never converges while the
/// member count differs from the desired capacity.
pub fn transition(phase: WaitPhase, desired: &DesiredState, group: &AutoScalingGroup) -> Transition {
    match phase {
        WaitPhase::AwaitingCapacityMatch if desired.capacity_matches(group) => {
            Transition::Advance(WaitPhase::AwaitingAllInService)
        }
        WaitPhase::AwaitingCapacityMatch => Transition::Stay,
        WaitPhase::AwaitingAllInService if desired.is_converged(group) => Transition::Converged,
        WaitPhase::AwaitingAllInService => Transition::Stay,
    }
}

pub async fn wait_for_convergence<S: GroupSource + ?Sized>(
    source: &S,
    sleeper: &dyn Sleeper,
    group_name: &str,
    desired: &DesiredState,
    config: &WaiterConfig,
) -> WaitOutcome {
    let mut phase = WaitPhase::AwaitingCapacityMatch;
    let mut attempts = 0;
    let mut total_attempts = 0;

    loop {
        attempts += 1;
        total_attempts += 1;

        let group = match source.fetch_group(group_name).await {
            Ok(group) => group,
            Err(error) => {
                warn!(group_name, %phase, attempts, %error, "Group fetch failed while waiting");
                return WaitOutcome::Failed { phase, error };
            }
        };

        debug!(
            group_name,
            %phase,
            attempts,
            instances = group.instances.len(),
            in_service = group.in_service_count(),
            desired = desired.capacity(),
            "Polled autoscaling group"
        );

        match transition(phase, desired, &group) {
            Transition::Converged => {
                info!(group_name, attempts = total_attempts, "Autoscaling group converged");
                return WaitOutcome::Converged {
                    attempts: total_attempts,
                };
            }
            Transition::Advance(next) => {
                info!(group_name, from = %phase, to = %next, "Waiter phase changed");
                phase = next;
                attempts = 0;
            }
            Transition::Stay if attempts >= config.max_attempts(phase) => {
                warn!(group_name, %phase, attempts, "Waiter attempts exhausted");
                return WaitOutcome::TimedOut { phase, attempts };
            }
            Transition::Stay => sleeper.sleep(config.delay).await,
        }
    }
}
