//! Host entity state views
//!
//! These mirror the fields of host buildings and occupants that the hooks
//! read or write. The host owns the real state; the layer only ever sees
//! these values for the duration of one intercepted call.

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Service;

/// Building flag set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BuildingFlags(pub u32);

impl BuildingFlags {
    pub const NONE: Self = Self(0);
    pub const CREATED: Self = Self(1 << 0);
    pub const COMPLETED: Self = Self(1 << 1);
    pub const ACTIVE: Self = Self(1 << 2);
    pub const UPGRADING: Self = Self(1 << 3);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for BuildingFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Behaviour flags of a citizen instance leaving a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CitizenFlags(pub u32);

impl CitizenFlags {
    pub const NONE: Self = Self(0);
    pub const HANG_AROUND: Self = Self(1 << 0);
    pub const SITTING_DOWN: Self = Self(1 << 1);
    pub const ON_TOUR: Self = Self(1 << 2);

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }
}

impl std::ops::BitOr for CitizenFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// How a door prop may be used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorType {
    Enter,
    Exit,
    Both,
}

impl DoorType {
    pub fn allows_entry(&self) -> bool {
        matches!(self, DoorType::Enter | DoorType::Both)
    }
}

/// A door prop slot on a building definition
///
/// `prop` is `None` when the host could not resolve the final prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub prop: Option<DoorType>,
}

impl Door {
    pub fn new(door_type: DoorType) -> Self {
        Self { prop: Some(door_type) }
    }

    pub fn unresolved() -> Self {
        Self { prop: None }
    }
}

/// Shared building definition (prefab)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInfo {
    pub name: String,
    pub service: Service,
    pub doors: Vec<Door>,
}

impl BuildingInfo {
    pub fn new(name: &str, service: Service) -> Self {
        Self {
            name: name.to_string(),
            service,
            doors: Vec::new(),
        }
    }

    pub fn with_doors(mut self, doors: Vec<Door>) -> Self {
        self.doors = doors;
        self
    }

    /// True if at least one resolved door lets occupants enter
    pub fn has_entry_door(&self) -> bool {
        self.doors
            .iter()
            .filter_map(|door| door.prop)
            .any(|door_type| door_type.allows_entry())
    }
}

/// Per-building simulation state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Building {
    pub flags: BuildingFlags,
    pub outgoing_problem_timer: u8,
    pub worker_problem_timer: u8,
    pub crime_buffer: u16,
    pub custom_buffer2: u16,
    pub info: Option<Arc<BuildingInfo>>,
}

impl Building {
    pub fn new(info: Arc<BuildingInfo>) -> Self {
        Self {
            flags: BuildingFlags::CREATED | BuildingFlags::COMPLETED | BuildingFlags::ACTIVE,
            info: Some(info),
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.flags.contains(BuildingFlags::ACTIVE)
    }

    pub fn service(&self) -> Option<Service> {
        self.info.as_ref().map(|info| info.service)
    }
}

/// Per-frame building data the host passes alongside the building
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Frame {
    pub fire_damage: u8,
    pub production_state: u8,
}

/// Accumulated citizen behaviour of a building's occupants
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BehaviourData {
    pub wellbeing_accumulation: i32,
    pub education_accumulation: i32,
    pub crime_accumulation: i32,
}

/// Shared citizen definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CitizenInfo {
    pub name: String,
}

/// Visualization mode of the info overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InfoMode {
    None,
    TrafficRoutes,
    Electricity,
    Water,
    CrimeRate,
    Happiness,
}

/// Host random source threaded through spawn calculations
#[derive(Debug, Clone)]
pub struct Randomizer(ChaCha8Rng);

impl Randomizer {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform value in `0..max` (0 when `max` is 0)
    pub fn uint32(&mut self, max: u32) -> u32 {
        if max == 0 {
            0
        } else {
            self.0.gen_range(0..max)
        }
    }
}
