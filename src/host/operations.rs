//! Host operations the layer intercepts
//!
//! Each marker type ties a target descriptor to the in/out struct the host
//! passes through the hook. By-reference host parameters are plain fields:
//! the host moves the struct in, handlers read and write it, and the host
//! copies the fields back out after the call.

use std::sync::Arc;

use crate::core::types::{BuildingId, Color, Vec2, Vec3};
use crate::host::building::{
    BehaviourData, Building, BuildingInfo, CitizenFlags, CitizenInfo, Frame, InfoMode, Randomizer,
};
use crate::host::descriptor::{ParamKind, TargetDescriptor, Visibility};

/// A host operation that can be located and redirected
pub trait HostOperation: 'static {
    /// In/out struct carrying every parameter of the call
    type Args: Clone;
    /// Value the operation returns
    type Output: Clone;

    /// Short label used in logs and slot listings
    const LABEL: &'static str;

    fn descriptor() -> TargetDescriptor;
}

/// The host's own spawn-position calculation, handed to the unspawn hook
pub trait SpawnCalculator: Send + Sync {
    /// Returns `(position, target)` for an occupant entering the world
    fn calculate_spawn_position(
        &self,
        building_id: BuildingId,
        data: &Building,
        randomizer: &mut Randomizer,
        citizen: &CitizenInfo,
    ) -> (Vec3, Vec3);
}

fn building_ref() -> ParamKind {
    ParamKind::by_ref("Building")
}

// ============================================================================
// Simulation steps
// ============================================================================

/// Commercial per-tick simulation step
pub struct CommercialSimulationStep;

#[derive(Debug, Clone, Default)]
pub struct SimulationStepArgs {
    pub building_id: BuildingId,
    pub data: Building,
    pub frame: Frame,
}

impl HostOperation for CommercialSimulationStep {
    type Args = SimulationStepArgs;
    type Output = ();
    const LABEL: &'static str = "commercial_simulation_step";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            "CommercialBuildingAI",
            "SimulationStepActive",
            Visibility::NonPublic,
            vec![ParamKind::value("u16"), building_ref(), ParamKind::by_ref("Frame")],
        )
    }
}

/// Worker handling of private buildings
pub struct HandleWorkers;

#[derive(Debug, Clone, Default)]
pub struct HandleWorkersArgs {
    pub building_id: BuildingId,
    pub data: Building,
    pub behaviour: BehaviourData,
    pub alive_workers: i32,
    pub total_workers: i32,
    pub work_places: i32,
}

impl HostOperation for HandleWorkers {
    type Args = HandleWorkersArgs;
    type Output = ();
    const LABEL: &'static str = "handle_workers";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            "PrivateBuildingAI",
            "HandleWorkers",
            Visibility::NonPublic,
            vec![
                ParamKind::value("u16"),
                building_ref(),
                ParamKind::by_ref("BehaviourData"),
                ParamKind::by_ref("i32"),
                ParamKind::by_ref("i32"),
                ParamKind::by_ref("i32"),
            ],
        )
    }
}

/// Goods production step of player buildings
pub struct ProduceGoods;

#[derive(Debug, Clone, Default)]
pub struct ProduceGoodsArgs {
    pub building_id: BuildingId,
    pub data: Building,
    pub frame: Frame,
    pub production_rate: i32,
    pub final_production_rate: i32,
    pub behaviour: BehaviourData,
    pub alive_workers: i32,
    pub total_workers: i32,
    pub work_places: i32,
    pub alive_visitors: i32,
    pub total_visitors: i32,
    pub visit_places: i32,
}

impl HostOperation for ProduceGoods {
    type Args = ProduceGoodsArgs;
    type Output = ();
    const LABEL: &'static str = "produce_goods";

    fn descriptor() -> TargetDescriptor {
        let mut params = vec![
            ParamKind::value("u16"),
            building_ref(),
            ParamKind::by_ref("Frame"),
            ParamKind::value("i32"),
            ParamKind::value("i32"),
            ParamKind::by_ref("BehaviourData"),
        ];
        params.extend((0..6).map(|_| ParamKind::value("i32")));

        TargetDescriptor::new("PlayerBuildingAI", "ProduceGoods", Visibility::NonPublic, params)
    }
}

/// Crime handling of industry buildings
pub struct HandleCrime;

#[derive(Debug, Clone, Default)]
pub struct HandleCrimeArgs {
    pub building_id: BuildingId,
    pub data: Building,
    pub crime_accumulation: i32,
    pub citizen_count: i32,
}

impl HostOperation for HandleCrime {
    type Args = HandleCrimeArgs;
    type Output = ();
    const LABEL: &'static str = "handle_crime";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            "IndustryBuildingAI",
            "HandleCrime",
            Visibility::NonPublic,
            vec![
                ParamKind::value("u16"),
                building_ref(),
                ParamKind::value("i32"),
                ParamKind::value("i32"),
            ],
        )
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Zero-argument construction duration query
pub struct ConstructionTime;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConstructionTimeArgs;

impl HostOperation for ConstructionTime {
    type Args = ConstructionTimeArgs;
    type Output = u32;
    const LABEL: &'static str = "construction_time";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new("PrivateBuildingAI", "GetConstructionTime", Visibility::NonPublic, Vec::new())
    }
}

/// Color lookup for the info overlay
pub struct BuildingColor;

#[derive(Debug, Clone)]
pub struct ColorArgs {
    pub building_id: BuildingId,
    pub data: Building,
    pub mode: InfoMode,
}

impl HostOperation for BuildingColor {
    type Args = ColorArgs;
    type Output = Color;
    const LABEL: &'static str = "building_color";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            "CommonBuildingAI",
            "GetColor",
            Visibility::Public,
            vec![ParamKind::value("u16"), building_ref(), ParamKind::value("InfoMode")],
        )
    }
}

/// Upgrade target query of private buildings
///
/// `None` means no upgrade is offered.
pub struct UpgradeInfo;

#[derive(Debug, Clone, Default)]
pub struct UpgradeInfoArgs {
    pub building_id: BuildingId,
    pub data: Building,
}

impl HostOperation for UpgradeInfo {
    type Args = UpgradeInfoArgs;
    type Output = Option<Arc<BuildingInfo>>;
    const LABEL: &'static str = "upgrade_info";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            "PrivateBuildingAI",
            "GetUpgradeInfo",
            Visibility::Public,
            vec![ParamKind::value("u16"), building_ref()],
        )
    }
}

// ============================================================================
// Occupants and construction
// ============================================================================

/// Position calculation for an occupant leaving a building
pub struct UnspawnPosition;

#[derive(Clone)]
pub struct UnspawnArgs {
    pub building_id: BuildingId,
    pub data: Building,
    pub randomizer: Randomizer,
    pub citizen: CitizenInfo,
    pub ignore_instance: u16,
    pub position: Vec3,
    pub target: Vec3,
    pub direction: Vec2,
    pub special_flags: CitizenFlags,
    /// The host's sibling spawn calculation for the same building
    pub spawner: Arc<dyn SpawnCalculator>,
}

impl std::fmt::Debug for UnspawnArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnspawnArgs")
            .field("building_id", &self.building_id)
            .field("position", &self.position)
            .field("target", &self.target)
            .field("special_flags", &self.special_flags)
            .finish_non_exhaustive()
    }
}

impl HostOperation for UnspawnPosition {
    type Args = UnspawnArgs;
    type Output = ();
    const LABEL: &'static str = "unspawn_position";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            "BuildingAI",
            "CalculateUnspawnPosition",
            Visibility::Public,
            vec![
                ParamKind::value("u16"),
                building_ref(),
                ParamKind::by_ref("Randomizer"),
                ParamKind::value("CitizenInfo"),
                ParamKind::value("u16"),
                ParamKind::by_ref("Vec3"),
                ParamKind::by_ref("Vec3"),
                ParamKind::by_ref("Vec2"),
                ParamKind::by_ref("CitizenFlags"),
            ],
        )
    }
}

/// The host's spawn-position calculation for occupants entering the world
///
/// Never redirected. The unspawn hook calls it through [`SpawnCalculator`],
/// so it must be present in the host before that hook is installed.
pub fn spawn_position_descriptor() -> TargetDescriptor {
    TargetDescriptor::new(
        "BuildingAI",
        "CalculateSpawnPosition",
        Visibility::Public,
        vec![
            ParamKind::value("u16"),
            building_ref(),
            ParamKind::by_ref("Randomizer"),
            ParamKind::value("CitizenInfo"),
            ParamKind::by_ref("Vec3"),
            ParamKind::by_ref("Vec3"),
        ],
    )
}

/// Building creation; returns success and writes the new id to `building`
pub struct CreateBuilding;

#[derive(Debug, Clone)]
pub struct CreateBuildingArgs {
    /// Out parameter: id of the created building
    pub building: BuildingId,
    pub randomizer: Randomizer,
    pub info: Arc<BuildingInfo>,
    pub position: Vec3,
    pub angle: f32,
    pub length: i32,
    pub build_index: u32,
}

impl HostOperation for CreateBuilding {
    type Args = CreateBuildingArgs;
    type Output = bool;
    const LABEL: &'static str = "create_building";

    fn descriptor() -> TargetDescriptor {
        TargetDescriptor::new(
            "BuildingManager",
            "CreateBuilding",
            Visibility::Public,
            vec![
                ParamKind::by_ref("u16"),
                ParamKind::by_ref("Randomizer"),
                ParamKind::value("BuildingInfo"),
                ParamKind::value("Vec3"),
                ParamKind::value("f32"),
                ParamKind::value("i32"),
                ParamKind::value("u32"),
            ],
        )
    }
}

/// Descriptors of every operation the layer knows how to intercept
pub fn known_descriptors() -> Vec<TargetDescriptor> {
    vec![
        CommercialSimulationStep::descriptor(),
        HandleWorkers::descriptor(),
        ProduceGoods::descriptor(),
        HandleCrime::descriptor(),
        ConstructionTime::descriptor(),
        BuildingColor::descriptor(),
        UpgradeInfo::descriptor(),
        UnspawnPosition::descriptor(),
        CreateBuilding::descriptor(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    #[test]
    fn test_known_descriptors_are_distinct() {
        let all = known_descriptors();
        let unique: AHashSet<_> = all.iter().cloned().collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn test_produce_goods_signature_length() {
        assert_eq!(ProduceGoods::descriptor().params().len(), 12);
        assert!(ConstructionTime::descriptor().params().is_empty());
    }

    #[test]
    fn test_spawn_sibling_is_not_intercepted() {
        let sibling = spawn_position_descriptor();
        assert!(!known_descriptors().contains(&sibling));
        assert_eq!(sibling.owner(), UnspawnPosition::descriptor().owner());
    }

    #[test]
    fn test_create_building_id_is_by_ref() {
        let descriptor = CreateBuilding::descriptor();
        assert!(descriptor.params()[0].by_ref);
        assert_eq!(descriptor.params()[0].type_name, "u16");
    }
}
