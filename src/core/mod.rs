pub mod config;
pub mod error;
pub mod types;

pub use config::{ColorConfig, HookConfig};
pub use error::{InterceptError, Result};
pub use types::{BuildingId, Color, Service, Vec2, Vec3};
