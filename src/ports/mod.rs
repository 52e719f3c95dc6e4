//! Policy ports the override policies call into
//!
//! Both ports are owned outside this crate. [`PolicyPorts`] holds at most one
//! reference to each; a missing port makes every policy that needs it pass
//! through to the host's original behavior.

pub mod building;
pub mod weather;

use std::sync::{Arc, RwLock};

pub use building::BuildingPolicy;
pub use weather::WeatherInfo;

/// A replaceable reference to one port
///
/// Readers always see either the old or the new reference, never a mix.
pub struct PortCell<T: ?Sized> {
    inner: RwLock<Option<Arc<T>>>,
}

impl<T: ?Sized> PortCell<T> {
    pub fn empty() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    pub fn get(&self) -> Option<Arc<T>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Install a port, returning the previous one
    pub fn set(&self, port: Arc<T>) -> Option<Arc<T>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner()).replace(port)
    }

    pub fn clear(&self) -> Option<Arc<T>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner()).take()
    }

    pub fn is_set(&self) -> bool {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).is_some()
    }
}

impl<T: ?Sized> Default for PortCell<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// The ports available to override policies
#[derive(Default)]
pub struct PolicyPorts {
    building: PortCell<dyn BuildingPolicy>,
    weather: PortCell<dyn WeatherInfo>,
}

impl PolicyPorts {
    /// Ports with nothing set; every policy passes through
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_building(self, policy: Arc<dyn BuildingPolicy>) -> Self {
        self.building.set(policy);
        self
    }

    pub fn with_weather(self, weather: Arc<dyn WeatherInfo>) -> Self {
        self.weather.set(weather);
        self
    }

    pub fn building(&self) -> Option<Arc<dyn BuildingPolicy>> {
        self.building.get()
    }

    pub fn weather(&self) -> Option<Arc<dyn WeatherInfo>> {
        self.weather.get()
    }

    pub fn set_building(&self, policy: Arc<dyn BuildingPolicy>) {
        self.building.set(policy);
    }

    pub fn set_weather(&self, weather: Arc<dyn WeatherInfo>) {
        self.weather.set(weather);
    }

    pub fn clear_building(&self) {
        self.building.clear();
    }

    pub fn clear_weather(&self) {
        self.weather.clear();
    }

    /// True when the weather port is set and reports bad weather
    pub fn is_bad_weather(&self) -> bool {
        self.weather().map_or(false, |weather| weather.is_bad_weather())
    }
}

impl std::fmt::Debug for PolicyPorts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyPorts")
            .field("building", &self.building.is_set())
            .field("weather", &self.weather.is_set())
            .finish()
    }
}
