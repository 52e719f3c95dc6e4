//! Boundary model of the opaque host engine

pub mod building;
pub mod descriptor;
pub mod locator;
pub mod operations;
pub mod runtime;

pub use building::{
    BehaviourData, Building, BuildingFlags, BuildingInfo, CitizenFlags, CitizenInfo, Door, DoorType,
    Frame, InfoMode, Randomizer,
};
pub use descriptor::{ParamKind, TargetDescriptor, Visibility};
pub use locator::{locate, locate_operation, CallHandle};
pub use operations::{HostOperation, SpawnCalculator};
pub use runtime::{Host, OperationHandle, Redirect, RedirectTable};
