use thiserror::Error;

use crate::{resource::ResourceKind, waiter::WaitPhase};

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("describe {kind} failed: {reason}")]
    DescribeFailed { kind: ResourceKind, reason: String },

    #[error("{kind} not found: {identifier}")]
    ResourceNotFound {
        kind: ResourceKind,
        identifier: String,
    },

    #[error("desired capacity update failed for {group_name}: {reason}")]
    CapacityUpdateFailed { group_name: String, reason: String },

    #[error("instance state change failed for {instance_identifiers}: {reason}")]
    InstanceStateChangeFailed {
        instance_identifiers: String,
        reason: String,
    },

    #[error("failed to wait for instances to become {target_state}: {reason}")]
    InstanceWaitFailed {
        target_state: String,
        reason: String,
    },

    #[error("{group_name} did not converge: timed out in {phase} after {attempts} attempts")]
    ConvergenceTimedOut {
        group_name: String,
        phase: WaitPhase,
        attempts: u32,
    },
}
