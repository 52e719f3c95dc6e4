//! Override policies - the concrete hooks bound to host operations
//!
//! Each policy is a small handler set for one host operation that defers its
//! decisions to the policy ports. [`standard_slots`] builds the slot set for
//! the policies a [`HookConfig`] enables.

pub mod activity;
pub mod color;
pub mod construction;
pub mod crime;
pub mod gate;
pub mod problems;
pub mod spawn;

use std::sync::Arc;

pub use activity::ActivityWindowGate;
pub use color::ColorOverride;
pub use construction::ConstructionDurationOverride;
pub use crime::CrimeCorrector;
pub use gate::{CreationGate, UpgradeGate};
pub use problems::{OutgoingProblemMonitor, WorkerProblemMonitor};
pub use spawn::WeatherSpawnRouter;

use crate::core::config::HookConfig;
use crate::hooks::registry::HookRegistry;
use crate::hooks::slot::HookSlot;
use crate::host::building::InfoMode;
use crate::host::operations::{
    BuildingColor, CommercialSimulationStep, ConstructionTime, CreateBuilding, HandleCrime, HandleWorkers,
    ProduceGoods, UnspawnPosition, UpgradeInfo,
};
use crate::host::runtime::Host;
use crate::ports::PolicyPorts;

/// Build one slot per enabled policy
///
/// The trouble-view reference colors come from the host when it exposes
/// them, otherwise from the config.
pub fn standard_slots(config: &HookConfig, ports: Arc<PolicyPorts>, host: &dyn Host) -> Vec<HookSlot> {
    let mut slots = Vec::new();

    if config.activity_gate {
        slots.push(HookSlot::new::<ProduceGoods, _>(ActivityWindowGate, ports.clone()));
    }
    if config.outgoing_problems {
        let monitor = OutgoingProblemMonitor {
            spoil_goods: config.spoil_commercial_goods,
        };
        slots.push(HookSlot::new::<CommercialSimulationStep, _>(monitor, ports.clone()));
    }
    if config.worker_problems {
        slots.push(HookSlot::new::<HandleWorkers, _>(WorkerProblemMonitor, ports.clone()));
    }
    if config.construction_duration {
        slots.push(HookSlot::new::<ConstructionTime, _>(ConstructionDurationOverride, ports.clone()));
    }
    if config.spawn_router {
        slots.push(HookSlot::new::<UnspawnPosition, _>(WeatherSpawnRouter, ports.clone()));
    }
    if config.upgrade_gate {
        slots.push(HookSlot::new::<UpgradeInfo, _>(UpgradeGate, ports.clone()));
    }
    if config.creation_gate {
        slots.push(HookSlot::new::<CreateBuilding, _>(CreationGate, ports.clone()));
    }
    if config.crime_corrector {
        slots.push(HookSlot::new::<HandleCrime, _>(CrimeCorrector, ports.clone()));
    }
    if config.color_override {
        let (negative, target) = host
            .mode_colors(InfoMode::TrafficRoutes)
            .unwrap_or((config.colors.negative, config.colors.target));
        slots.push(HookSlot::new::<BuildingColor, _>(ColorOverride::new(negative, target), ports));
    }

    slots
}

impl HookRegistry {
    /// A registry holding the standard slots for `config`
    pub fn from_config(config: &HookConfig, ports: Arc<PolicyPorts>, host: &dyn Host) -> Self {
        let mut registry = HookRegistry::new();
        for slot in standard_slots(config, ports, host) {
            registry.register(slot);
        }
        registry
    }
}
