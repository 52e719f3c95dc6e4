//! Construction and upgrade gates
//!
//! New construction and in-place upgrades both ask the building policy
//! first. A building that is created anyway is registered with the policy,
//! but only once the host has confirmed the creation.

use std::sync::Arc;

use crate::hooks::hook::{BeforeOutcome, Hook};
use crate::host::building::{BuildingFlags, BuildingInfo};
use crate::host::operations::{CreateBuilding, CreateBuildingArgs, UpgradeInfo, UpgradeInfoArgs};
use crate::ports::PolicyPorts;

/// Withholds upgrade offers the policy does not permit
pub struct UpgradeGate;

impl Hook<UpgradeInfo> for UpgradeGate {
    type Capture = ();

    fn name(&self) -> &'static str {
        "upgrade_gate"
    }

    fn capture(&self, _args: &UpgradeInfoArgs) {}

    fn before(&self, args: &mut UpgradeInfoArgs, ports: &PolicyPorts) -> BeforeOutcome<Option<Arc<BuildingInfo>>> {
        if args.data.flags.contains(BuildingFlags::UPGRADING) {
            return BeforeOutcome::RunOriginal;
        }

        let (Some(policy), Some(service)) = (ports.building(), args.data.service()) else {
            return BeforeOutcome::RunOriginal;
        };

        if policy.can_build_or_upgrade(service, Some(args.building_id)) {
            BeforeOutcome::RunOriginal
        } else {
            BeforeOutcome::SkipWithResult(None)
        }
    }
}

/// Blocks creation the policy does not permit and registers new buildings
pub struct CreationGate;

impl Hook<CreateBuilding> for CreationGate {
    type Capture = ();

    fn name(&self) -> &'static str {
        "creation_gate"
    }

    fn capture(&self, _args: &CreateBuildingArgs) {}

    fn before(&self, args: &mut CreateBuildingArgs, ports: &PolicyPorts) -> BeforeOutcome<bool> {
        match ports.building() {
            Some(policy) if !policy.can_build_or_upgrade(args.info.service, None) => {
                BeforeOutcome::SkipWithResult(false)
            }
            _ => BeforeOutcome::RunOriginal,
        }
    }

    fn after(&self, args: &mut CreateBuildingArgs, created: &mut bool, _capture: (), ports: &PolicyPorts) {
        if !*created {
            return;
        }
        if let Some(policy) = ports.building() {
            policy.register_constructing(args.building, args.info.service);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::core::types::{BuildingId, Service};
    use crate::host::building::Building;
    use crate::testing::{create_args, PolicyCall, RecordingPolicy};

    fn upgrade_args(flags: BuildingFlags) -> UpgradeInfoArgs {
        UpgradeInfoArgs {
            building_id: BuildingId(30),
            data: Building {
                flags,
                info: Some(Arc::new(BuildingInfo::new("low_density_1", Service::Residential))),
                ..Building::default()
            },
        }
    }

    #[test]
    fn test_upgrade_denied_offers_nothing() {
        let policy = Arc::new(RecordingPolicy::new().allow_build(false));
        let ports = PolicyPorts::new().with_building(policy.clone());

        let outcome = UpgradeGate.before(&mut upgrade_args(BuildingFlags::ACTIVE), &ports);

        assert_eq!(outcome, BeforeOutcome::SkipWithResult(None));
        assert_eq!(
            policy.calls(),
            vec![PolicyCall::CanBuildOrUpgrade(Service::Residential, Some(BuildingId(30)))]
        );
    }

    #[test]
    fn test_upgrade_allowed_runs_original() {
        let ports = PolicyPorts::new().with_building(Arc::new(RecordingPolicy::new().allow_build(true)));
        let outcome = UpgradeGate.before(&mut upgrade_args(BuildingFlags::ACTIVE), &ports);
        assert_eq!(outcome, BeforeOutcome::RunOriginal);
    }

    #[test]
    fn test_upgrading_building_skips_policy() {
        let policy = Arc::new(RecordingPolicy::new().allow_build(false));
        let ports = PolicyPorts::new().with_building(policy.clone());

        let outcome = UpgradeGate.before(&mut upgrade_args(BuildingFlags::UPGRADING), &ports);

        assert_eq!(outcome, BeforeOutcome::RunOriginal);
        assert!(policy.calls().is_empty());
    }

    #[test]
    fn test_upgrade_without_info_or_policy() {
        let mut args = upgrade_args(BuildingFlags::ACTIVE);
        assert_eq!(UpgradeGate.before(&mut args, &PolicyPorts::new()), BeforeOutcome::RunOriginal);

        args.data.info = None;
        let ports = PolicyPorts::new().with_building(Arc::new(RecordingPolicy::new().allow_build(false)));
        assert_eq!(UpgradeGate.before(&mut args, &ports), BeforeOutcome::RunOriginal);
    }

    #[test]
    fn test_creation_denied_reports_failure() {
        let policy = Arc::new(RecordingPolicy::new().allow_build(false));
        let ports = PolicyPorts::new().with_building(policy.clone());
        let mut args = create_args(Service::Industrial);

        let outcome = CreationGate.before(&mut args, &ports);

        assert_eq!(outcome, BeforeOutcome::SkipWithResult(false));
        assert_eq!(policy.calls(), vec![PolicyCall::CanBuildOrUpgrade(Service::Industrial, None)]);
    }

    #[test]
    fn test_registration_only_after_success() {
        let policy = Arc::new(RecordingPolicy::new());
        let ports = PolicyPorts::new().with_building(policy.clone());
        let mut args = create_args(Service::Commercial);
        args.building = BuildingId(77);

        CreationGate.after(&mut args, &mut false, (), &ports);
        assert!(policy.calls().is_empty());

        CreationGate.after(&mut args, &mut true, (), &ports);
        assert_eq!(
            policy.calls(),
            vec![PolicyCall::RegisterConstructing(BuildingId(77), Service::Commercial)]
        );
    }
}
