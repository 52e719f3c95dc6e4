//! Info overlay color override
//!
//! In the traffic routes view the building color shows how hard the building
//! is to reach; in the normal view buildings that should be dark lose their
//! alpha. Both only transform the returned color.

use crate::core::types::Color;
use crate::hooks::hook::Hook;
use crate::host::building::InfoMode;
use crate::host::operations::{BuildingColor, ColorArgs};
use crate::ports::PolicyPorts;

pub struct ColorOverride {
    negative: Color,
    target: Color,
}

impl ColorOverride {
    /// `negative` is shown at trouble factor 0, `target` at 1
    pub fn new(negative: Color, target: Color) -> Self {
        Self { negative, target }
    }
}

impl Hook<BuildingColor> for ColorOverride {
    type Capture = ();

    fn name(&self) -> &'static str {
        "color_override"
    }

    fn capture(&self, _args: &ColorArgs) {}

    fn after(&self, args: &mut ColorArgs, color: &mut Color, _capture: (), ports: &PolicyPorts) {
        let Some(policy) = ports.building() else {
            return;
        };

        match args.mode {
            InfoMode::TrafficRoutes => {
                let trouble = policy.reaching_trouble_factor(args.building_id);
                *color = Color::lerp(self.negative, self.target, trouble);
            }
            InfoMode::None => {
                if policy.should_appear_dark(args.building_id) {
                    color.a = 0.0;
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::types::BuildingId;
    use crate::host::building::Building;
    use crate::testing::{PolicyCall, RecordingPolicy};

    const NEGATIVE: Color = Color::new(0.0, 1.0, 0.0, 1.0);
    const TARGET: Color = Color::new(1.0, 0.0, 0.0, 1.0);
    const HOST_COLOR: Color = Color::new(0.3, 0.3, 0.3, 1.0);

    fn args(mode: InfoMode) -> ColorArgs {
        ColorArgs {
            building_id: BuildingId(5),
            data: Building::default(),
            mode,
        }
    }

    fn hook() -> ColorOverride {
        ColorOverride::new(NEGATIVE, TARGET)
    }

    #[test]
    fn test_traffic_routes_interpolates() {
        let ports = PolicyPorts::new().with_building(Arc::new(RecordingPolicy::new().trouble(0.25)));
        let mut color = HOST_COLOR;

        hook().after(&mut args(InfoMode::TrafficRoutes), &mut color, (), &ports);

        assert!((color.r - 0.25).abs() < 1e-6);
        assert!((color.g - 0.75).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_trouble_factor_clamped() {
        let ports = PolicyPorts::new().with_building(Arc::new(RecordingPolicy::new().trouble(4.0)));
        let mut color = HOST_COLOR;

        hook().after(&mut args(InfoMode::TrafficRoutes), &mut color, (), &ports);

        assert_eq!(color, TARGET);
    }

    #[test]
    fn test_normal_view_dark_zeroes_alpha() {
        let policy = Arc::new(RecordingPolicy::new().dark(true));
        let ports = PolicyPorts::new().with_building(policy.clone());
        let mut color = HOST_COLOR;

        hook().after(&mut args(InfoMode::None), &mut color, (), &ports);

        assert_eq!(color, Color { a: 0.0, ..HOST_COLOR });
        assert_eq!(policy.calls(), vec![PolicyCall::ShouldAppearDark(BuildingId(5))]);
    }

    #[test]
    fn test_normal_view_lit_unchanged() {
        let ports = PolicyPorts::new().with_building(Arc::new(RecordingPolicy::new().dark(false)));
        let mut color = HOST_COLOR;
        hook().after(&mut args(InfoMode::None), &mut color, (), &ports);
        assert_eq!(color, HOST_COLOR);
    }

    #[test]
    fn test_other_modes_and_missing_policy_unchanged() {
        let policy = Arc::new(RecordingPolicy::new().dark(true).trouble(1.0));
        let ports = PolicyPorts::new().with_building(policy.clone());
        let mut color = HOST_COLOR;

        hook().after(&mut args(InfoMode::CrimeRate), &mut color, (), &ports);
        assert_eq!(color, HOST_COLOR);
        assert!(policy.calls().is_empty());

        hook().after(&mut args(InfoMode::TrafficRoutes), &mut color, (), &PolicyPorts::new());
        assert_eq!(color, HOST_COLOR);
    }
}
