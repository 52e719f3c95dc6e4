//! Construction duration override

use crate::hooks::hook::{BeforeOutcome, Hook};
use crate::host::operations::{ConstructionTime, ConstructionTimeArgs};
use crate::ports::PolicyPorts;

/// Replaces the host's construction duration with the policy's value
///
/// The host computation never runs. Without a policy, or when the policy
/// fails, the duration is zero.
pub struct ConstructionDurationOverride;

impl Hook<ConstructionTime> for ConstructionDurationOverride {
    type Capture = ();

    fn name(&self) -> &'static str {
        "construction_duration_override"
    }

    fn capture(&self, _args: &ConstructionTimeArgs) {}

    fn fallback(&self) -> BeforeOutcome<u32> {
        BeforeOutcome::SkipWithResult(0)
    }

    fn before(&self, _args: &mut ConstructionTimeArgs, ports: &PolicyPorts) -> BeforeOutcome<u32> {
        let duration = ports.building().map_or(0, |policy| policy.construction_duration());
        BeforeOutcome::SkipWithResult(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::testing::RecordingPolicy;

    #[test]
    fn test_policy_duration_replaces_original() {
        let ports = PolicyPorts::new().with_building(Arc::new(RecordingPolicy::new().duration(1440)));
        let outcome = ConstructionDurationOverride.before(&mut ConstructionTimeArgs, &ports);
        assert_eq!(outcome, BeforeOutcome::SkipWithResult(1440));
    }

    #[test]
    fn test_failed_policy_falls_back_to_zero() {
        assert_eq!(
            Hook::<ConstructionTime>::fallback(&ConstructionDurationOverride),
            BeforeOutcome::SkipWithResult(0)
        );
    }

    #[test]
    fn test_no_policy_is_zero() {
        let outcome = ConstructionDurationOverride.before(&mut ConstructionTimeArgs, &PolicyPorts::new());
        assert_eq!(outcome, BeforeOutcome::SkipWithResult(0));
    }
}
