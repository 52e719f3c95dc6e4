//! Building policy port

use crate::core::types::{BuildingId, Service};

/// Externally owned decisions about buildings
///
/// Every call runs inline on the host's per-building tick, so
/// implementations must answer with an O(1) lookup and never block.
pub trait BuildingPolicy: Send + Sync {
    /// The outgoing-goods problem timer of `building` changed this tick
    fn process_outgoing_problem(&self, building: BuildingId, prior_timer: u8);

    /// The worker problem timer of `building` changed this tick
    fn process_worker_problem(&self, building: BuildingId, prior_timer: u8);

    /// Construction duration in ticks
    fn construction_duration(&self) -> u32;

    /// Whether `service` may be built now; `building` is set for in-place upgrades
    fn can_build_or_upgrade(&self, service: Service, building: Option<BuildingId>) -> bool;

    /// A building of `service` was created and is now under construction
    fn register_constructing(&self, building: BuildingId, service: Service);

    /// Whether `building` should currently be dark (lights off, inactive)
    fn should_appear_dark(&self, building: BuildingId) -> bool;

    /// How hard the building is to reach, in [0, 1]
    fn reaching_trouble_factor(&self, building: BuildingId) -> f32;
}
