use wh_core::FleetConfig;

/// Cycle timing and tolerance settings shared by every machine.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CyclePolicy {
    /// Ground-plane distance at which a vehicle counts as arrived.
    pub arrival_epsilon:    f32,
    /// Nominal seconds between seek attempts when nothing is free.
    pub retry_backoff_secs: f64,
    /// Nominal seconds a placed package is held at its drop-off.
    pub unload_wait_secs:   f64,
}

impl From<&FleetConfig> for CyclePolicy {
    fn from(c: &FleetConfig) -> Self {
        Self {
            arrival_epsilon:    c.arrival_epsilon,
            retry_backoff_secs: c.retry_backoff_secs,
            unload_wait_secs:   c.unload_wait_secs,
        }
    }
}

impl Default for CyclePolicy {
    fn default() -> Self {
        Self::from(&FleetConfig::default())
    }
}
