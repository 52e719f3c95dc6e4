//! Test doubles for the host and the policy ports
//!
//! `StubHost` stands in for the opaque engine: it publishes a catalog of
//! operation signatures (including decoy overloads), keeps a redirect table
//! and can be told to drop, duplicate or refuse a target. `RecordingPolicy`
//! answers with fixed values and records every call it receives.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use ahash::AHashSet;

use crate::core::types::{BuildingId, Color, Service, Vec2, Vec3};
use crate::host::building::{Building, BuildingInfo, CitizenFlags, CitizenInfo, Door, InfoMode, Randomizer};
use crate::host::descriptor::{ParamKind, TargetDescriptor, Visibility};
use crate::host::operations::{
    known_descriptors, spawn_position_descriptor, CreateBuildingArgs, HostOperation, SpawnCalculator, UnspawnArgs,
};
use crate::host::runtime::{Host, OperationHandle, Redirect, RedirectTable};
use crate::ports::{BuildingPolicy, WeatherInfo};

// ============================================================================
// Host
// ============================================================================

/// In-memory host with a configurable operation catalog
pub struct StubHost {
    catalog: Vec<TargetDescriptor>,
    refused: AHashSet<TargetDescriptor>,
    mode_colors: Option<(Color, Color)>,
    redirects: RedirectTable,
    bind_calls: AtomicUsize,
}

impl StubHost {
    /// Every known operation, the spawn sibling and two overloads that must
    /// not match
    pub fn new() -> Self {
        let mut catalog = known_descriptors();
        catalog.push(TargetDescriptor::new(
            "PrivateBuildingAI",
            "GetUpgradeInfo",
            Visibility::Public,
            vec![ParamKind::value("u16"), ParamKind::value("Building")],
        ));
        catalog.push(TargetDescriptor::new(
            "PrivateBuildingAI",
            "GetConstructionTime",
            Visibility::Public,
            Vec::new(),
        ));
        catalog.push(spawn_position_descriptor());
        Self::with_catalog(catalog)
    }

    pub fn with_catalog(catalog: Vec<TargetDescriptor>) -> Self {
        Self {
            catalog,
            refused: AHashSet::new(),
            mode_colors: None,
            redirects: RedirectTable::new(),
            bind_calls: AtomicUsize::new(0),
        }
    }

    /// Drop every catalog entry equal to `descriptor`
    pub fn without(mut self, descriptor: &TargetDescriptor) -> Self {
        self.catalog.retain(|d| d != descriptor);
        self
    }

    /// Publish `descriptor` a second time
    pub fn with_duplicate(mut self, descriptor: &TargetDescriptor) -> Self {
        self.catalog.push(descriptor.clone());
        self
    }

    /// Refuse to bind anything at `descriptor`
    pub fn refuse_bind(mut self, descriptor: &TargetDescriptor) -> Self {
        self.refused.insert(descriptor.clone());
        self
    }

    pub fn with_mode_colors(mut self, negative: Color, target: Color) -> Self {
        self.mode_colors = Some((negative, target));
        self
    }

    /// Handle of the first catalog entry equal to `descriptor`
    pub fn handle_of(&self, descriptor: &TargetDescriptor) -> Option<OperationHandle> {
        self.catalog
            .iter()
            .position(|d| d == descriptor)
            .map(|index| OperationHandle(index as u32))
    }

    pub fn bound_count(&self) -> usize {
        self.redirects.len()
    }

    pub fn bind_calls(&self) -> usize {
        self.bind_calls.load(Ordering::SeqCst)
    }

    pub fn is_bound(&self, descriptor: &TargetDescriptor) -> bool {
        self.handle_of(descriptor)
            .map_or(false, |handle| self.redirects.contains(handle))
    }

    /// Run `Op` the way the engine would, with `original` as its own logic
    pub fn run<Op, F>(&self, args: Op::Args, original: F) -> (Op::Args, Op::Output)
    where
        Op: HostOperation,
        F: FnMut(&mut Op::Args) -> Op::Output,
    {
        let handle = self.handle_of(&Op::descriptor()).unwrap_or(OperationHandle(u32::MAX));
        self.redirects.invoke::<Op, F>(handle, args, original)
    }
}

impl Default for StubHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for StubHost {
    fn operations(&self) -> Vec<(OperationHandle, TargetDescriptor)> {
        self.catalog
            .iter()
            .enumerate()
            .map(|(index, d)| (OperationHandle(index as u32), d.clone()))
            .collect()
    }

    fn bind(&self, handle: OperationHandle, redirect: Redirect) -> Result<(), String> {
        self.bind_calls.fetch_add(1, Ordering::SeqCst);

        let descriptor = self
            .catalog
            .get(handle.0 as usize)
            .ok_or_else(|| format!("no operation at {:?}", handle))?;
        if self.refused.contains(descriptor) {
            return Err(format!("operation {} is not patchable", descriptor));
        }
        if redirect.descriptor() != descriptor {
            return Err(format!("redirect for {} does not fit {}", redirect.descriptor(), descriptor));
        }
        if self.redirects.contains(handle) {
            return Err(format!("operation {} already redirected", descriptor));
        }

        self.redirects.insert(handle, redirect);
        Ok(())
    }

    fn unbind(&self, handle: OperationHandle) -> bool {
        self.redirects.remove(handle)
    }

    fn mode_colors(&self, mode: InfoMode) -> Option<(Color, Color)> {
        match mode {
            InfoMode::TrafficRoutes => self.mode_colors,
            _ => None,
        }
    }
}

/// Spawn calculation that always answers with fixed points
pub struct FixedSpawn {
    pub position: Vec3,
    pub target: Vec3,
}

impl SpawnCalculator for FixedSpawn {
    fn calculate_spawn_position(
        &self,
        _building_id: BuildingId,
        _data: &Building,
        randomizer: &mut Randomizer,
        _citizen: &CitizenInfo,
    ) -> (Vec3, Vec3) {
        // Draw once so callers can see the randomizer was threaded through.
        randomizer.uint32(4);
        (self.position, self.target)
    }
}

/// Unspawn call for a building of `service` with the given doors
pub fn unspawn_args(service: Service, doors: Vec<Door>, unspawn_at: Vec3) -> UnspawnArgs {
    let info = Arc::new(BuildingInfo::new("stub", service).with_doors(doors));
    UnspawnArgs {
        building_id: BuildingId(21),
        data: Building::new(info),
        randomizer: Randomizer::new(7),
        citizen: CitizenInfo {
            name: "resident".into(),
        },
        ignore_instance: 0,
        position: unspawn_at,
        target: unspawn_at,
        direction: Vec2::default(),
        special_flags: CitizenFlags::NONE,
        spawner: Arc::new(FixedSpawn {
            position: Vec3::new(10.0, 0.0, 12.0),
            target: Vec3::new(11.0, 0.0, 13.0),
        }),
    }
}

/// Creation call for a building of `service`
pub fn create_args(service: Service) -> CreateBuildingArgs {
    CreateBuildingArgs {
        building: BuildingId(0),
        randomizer: Randomizer::new(11),
        info: Arc::new(BuildingInfo::new("stub", service)),
        position: Vec3::new(100.0, 0.0, 100.0),
        angle: 0.0,
        length: 0,
        build_index: 1,
    }
}

// ============================================================================
// Ports
// ============================================================================

/// One call received by [`RecordingPolicy`]
#[derive(Debug, Clone, PartialEq)]
pub enum PolicyCall {
    OutgoingProblem(BuildingId, u8),
    WorkerProblem(BuildingId, u8),
    ConstructionDuration,
    CanBuildOrUpgrade(Service, Option<BuildingId>),
    RegisterConstructing(BuildingId, Service),
    ShouldAppearDark(BuildingId),
    TroubleFactor(BuildingId),
}

/// Building policy with fixed answers that records every call
pub struct RecordingPolicy {
    calls: Mutex<Vec<PolicyCall>>,
    duration: u32,
    allow_build: bool,
    dark: bool,
    trouble: f32,
}

impl RecordingPolicy {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            duration: 0,
            allow_build: true,
            dark: false,
            trouble: 0.0,
        }
    }

    pub fn duration(mut self, ticks: u32) -> Self {
        self.duration = ticks;
        self
    }

    pub fn allow_build(mut self, allow: bool) -> Self {
        self.allow_build = allow;
        self
    }

    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    pub fn trouble(mut self, factor: f32) -> Self {
        self.trouble = factor;
        self
    }

    pub fn calls(&self) -> Vec<PolicyCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of recorded calls matching `pred`
    pub fn count(&self, pred: impl Fn(&PolicyCall) -> bool) -> usize {
        self.calls().iter().filter(|call| pred(call)).count()
    }

    fn record(&self, call: PolicyCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }
}

impl Default for RecordingPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildingPolicy for RecordingPolicy {
    fn process_outgoing_problem(&self, building: BuildingId, prior_timer: u8) {
        self.record(PolicyCall::OutgoingProblem(building, prior_timer));
    }

    fn process_worker_problem(&self, building: BuildingId, prior_timer: u8) {
        self.record(PolicyCall::WorkerProblem(building, prior_timer));
    }

    fn construction_duration(&self) -> u32 {
        self.record(PolicyCall::ConstructionDuration);
        self.duration
    }

    fn can_build_or_upgrade(&self, service: Service, building: Option<BuildingId>) -> bool {
        self.record(PolicyCall::CanBuildOrUpgrade(service, building));
        self.allow_build
    }

    fn register_constructing(&self, building: BuildingId, service: Service) {
        self.record(PolicyCall::RegisterConstructing(building, service));
    }

    fn should_appear_dark(&self, building: BuildingId) -> bool {
        self.record(PolicyCall::ShouldAppearDark(building));
        self.dark
    }

    fn reaching_trouble_factor(&self, building: BuildingId) -> f32 {
        self.record(PolicyCall::TroubleFactor(building));
        self.trouble
    }
}

/// Building policy whose every call panics
pub struct PanickingPolicy;

impl BuildingPolicy for PanickingPolicy {
    fn process_outgoing_problem(&self, _building: BuildingId, _prior_timer: u8) {
        panic!("policy failure");
    }

    fn process_worker_problem(&self, _building: BuildingId, _prior_timer: u8) {
        panic!("policy failure");
    }

    fn construction_duration(&self) -> u32 {
        panic!("policy failure");
    }

    fn can_build_or_upgrade(&self, _service: Service, _building: Option<BuildingId>) -> bool {
        panic!("policy failure");
    }

    fn register_constructing(&self, _building: BuildingId, _service: Service) {
        panic!("policy failure");
    }

    fn should_appear_dark(&self, _building: BuildingId) -> bool {
        panic!("policy failure");
    }

    fn reaching_trouble_factor(&self, _building: BuildingId) -> f32 {
        panic!("policy failure");
    }
}

/// Weather port with a fixed answer
pub struct FixedWeather(pub bool);

impl WeatherInfo for FixedWeather {
    fn is_bad_weather(&self) -> bool {
        self.0
    }
}
