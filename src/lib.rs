//! Interception and override layer for building simulation steps
//!
//! Locates operations of an opaque host engine by structural signature,
//! wraps them with before/after handlers, and turns what those handlers
//! observe into calls against externally owned policy ports.

pub mod core;
pub mod hooks;
pub mod host;
pub mod policies;
pub mod ports;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use crate::core::config::HookConfig;
pub use crate::core::error::{InterceptError, Result};
pub use hooks::{BeforeOutcome, Hook, HookRegistry, HookSlot};
pub use host::{Host, HostOperation, TargetDescriptor};
pub use ports::{BuildingPolicy, PolicyPorts, WeatherInfo};
