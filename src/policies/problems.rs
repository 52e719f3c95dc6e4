//! Problem timer monitors - forward timer changes to the building policy
//!
//! The host bumps or resets a building's problem timers inside its own
//! step. Only a change across the call is forwarded, with the value the
//! timer had before the call; stable buildings produce no notifications.

use crate::hooks::hook::{BeforeOutcome, Hook};
use crate::host::operations::{CommercialSimulationStep, HandleWorkers, HandleWorkersArgs, SimulationStepArgs};
use crate::ports::PolicyPorts;

/// Watches the outgoing-goods problem timer of commercial buildings
pub struct OutgoingProblemMonitor {
    /// Spoil one unit of stocked goods per step
    pub spoil_goods: bool,
}

impl Hook<CommercialSimulationStep> for OutgoingProblemMonitor {
    type Capture = u8;

    fn name(&self) -> &'static str {
        "outgoing_problem_monitor"
    }

    fn capture(&self, args: &SimulationStepArgs) -> u8 {
        args.data.outgoing_problem_timer
    }

    fn before(&self, args: &mut SimulationStepArgs, _ports: &PolicyPorts) -> BeforeOutcome<()> {
        // Keeps buildings from sitting in the "stock full" state forever.
        if self.spoil_goods && args.data.custom_buffer2 > 0 {
            args.data.custom_buffer2 -= 1;
        }
        BeforeOutcome::RunOriginal
    }

    fn after(&self, args: &mut SimulationStepArgs, _output: &mut (), prior: u8, ports: &PolicyPorts) {
        if prior == args.data.outgoing_problem_timer {
            return;
        }
        if let Some(policy) = ports.building() {
            policy.process_outgoing_problem(args.building_id, prior);
        }
    }
}

/// Watches the worker problem timer of private buildings
pub struct WorkerProblemMonitor;

impl Hook<HandleWorkers> for WorkerProblemMonitor {
    type Capture = u8;

    fn name(&self) -> &'static str {
        "worker_problem_monitor"
    }

    fn capture(&self, args: &HandleWorkersArgs) -> u8 {
        args.data.worker_problem_timer
    }

    fn after(&self, args: &mut HandleWorkersArgs, _output: &mut (), prior: u8, ports: &PolicyPorts) {
        if prior == args.data.worker_problem_timer {
            return;
        }
        if let Some(policy) = ports.building() {
            policy.process_worker_problem(args.building_id, prior);
        }
    }
}
