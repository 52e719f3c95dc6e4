//! Weather-aware spawn router
//!
//! In bad weather an occupant leaving a building is sent out through the
//! building's entry doors (the spawn calculation) instead of the regular
//! unspawn point, and does not linger outside.

use crate::hooks::hook::Hook;
use crate::host::building::CitizenFlags;
use crate::host::descriptor::TargetDescriptor;
use crate::host::operations::{spawn_position_descriptor, UnspawnArgs, UnspawnPosition};
use crate::ports::PolicyPorts;

pub struct WeatherSpawnRouter;

impl Hook<UnspawnPosition> for WeatherSpawnRouter {
    type Capture = ();

    fn name(&self) -> &'static str {
        "weather_spawn_router"
    }

    fn requires(&self) -> Vec<TargetDescriptor> {
        vec![spawn_position_descriptor()]
    }

    fn capture(&self, _args: &UnspawnArgs) {}

    fn after(&self, args: &mut UnspawnArgs, _output: &mut (), _capture: (), ports: &PolicyPorts) {
        if !ports.is_bad_weather() {
            return;
        }

        let has_entry_door = args.data.info.as_ref().map_or(false, |info| info.has_entry_door());
        if !has_entry_door {
            return;
        }

        let (position, target) = args.spawner.calculate_spawn_position(
            args.building_id,
            &args.data,
            &mut args.randomizer,
            &args.citizen,
        );

        args.position = position;
        args.target = target;
        args.special_flags.remove(CitizenFlags::HANG_AROUND | CitizenFlags::SITTING_DOWN);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::types::{Service, Vec3};
    use crate::host::building::{Door, DoorType};
    use crate::testing::{unspawn_args, FixedWeather};

    const UNSPAWN: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 1.0 };

    fn ports(bad: bool) -> PolicyPorts {
        PolicyPorts::new().with_weather(Arc::new(FixedWeather(bad)))
    }

    #[test]
    fn test_bad_weather_with_entry_door_reroutes() {
        let mut args = unspawn_args(Service::Commercial, vec![Door::new(DoorType::Enter)], UNSPAWN);
        args.special_flags = CitizenFlags::HANG_AROUND | CitizenFlags::SITTING_DOWN | CitizenFlags::ON_TOUR;

        WeatherSpawnRouter.after(&mut args, &mut (), (), &ports(true));

        assert_ne!(args.position, UNSPAWN);
        assert_ne!(args.target, UNSPAWN);
        assert_eq!(args.special_flags, CitizenFlags::ON_TOUR);
    }

    #[test]
    fn test_good_weather_keeps_unspawn() {
        let mut args = unspawn_args(Service::Commercial, vec![Door::new(DoorType::Both)], UNSPAWN);
        args.special_flags = CitizenFlags::HANG_AROUND;

        WeatherSpawnRouter.after(&mut args, &mut (), (), &ports(false));

        assert_eq!(args.position, UNSPAWN);
        assert_eq!(args.special_flags, CitizenFlags::HANG_AROUND);
    }

    #[test]
    fn test_no_weather_port_keeps_unspawn() {
        let mut args = unspawn_args(Service::Office, vec![Door::new(DoorType::Enter)], UNSPAWN);
        WeatherSpawnRouter.after(&mut args, &mut (), (), &PolicyPorts::new());
        assert_eq!(args.position, UNSPAWN);
    }

    #[test]
    fn test_exit_only_and_unresolved_doors_keep_unspawn() {
        let mut args = unspawn_args(
            Service::Office,
            vec![Door::new(DoorType::Exit), Door::unresolved()],
            UNSPAWN,
        );
        WeatherSpawnRouter.after(&mut args, &mut (), (), &ports(true));
        assert_eq!(args.position, UNSPAWN);
        assert_eq!(args.target, UNSPAWN);
    }

    #[test]
    fn test_missing_info_keeps_unspawn() {
        let mut args = unspawn_args(Service::Office, vec![Door::new(DoorType::Enter)], UNSPAWN);
        args.data.info = None;
        WeatherSpawnRouter.after(&mut args, &mut (), (), &ports(true));
        assert_eq!(args.position, UNSPAWN);
    }
}
