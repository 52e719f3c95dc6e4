//! Weather port

/// Externally owned weather state
pub trait WeatherInfo: Send + Sync {
    fn is_bad_weather(&self) -> bool;
}
