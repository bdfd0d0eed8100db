//! Maps a device capability descriptor to a performance tier.
//!
//! Pages use the tier to decide how much animation to run. Classification is
//! a pure function of the descriptor so it can be tested without real
//! hardware; [`detect`] only fills in what the host exposes.

use std::time::Duration;

use crate::models::device::{ConnectionType, DeviceCapabilities, PerformanceTier};
use crate::models::settings::CountdownSettings;
use crate::utils::error::Result;

const DEFAULT_CPU_CORES: u32 = 4;
const DEFAULT_MEMORY_GB: f32 = 4.0;

pub fn score(caps: &DeviceCapabilities) -> u8 {
    let cores = caps.cpu_cores.unwrap_or(DEFAULT_CPU_CORES);
    let memory = caps.memory_gb.unwrap_or(DEFAULT_MEMORY_GB);
    let connection = caps.connection.unwrap_or_default();

    let mut score = 0;

    if cores >= 8 {
        score += 2;
    } else if cores >= 4 {
        score += 1;
    }

    if memory >= 8.0 {
        score += 2;
    } else if memory >= 4.0 {
        score += 1;
    }

    if connection == ConnectionType::FourG {
        score += 1;
    }

    score
}

pub fn classify(caps: &DeviceCapabilities) -> PerformanceTier {
    match score(caps) {
        4..=u8::MAX => PerformanceTier::High,
        2..=3 => PerformanceTier::Medium,
        _ => PerformanceTier::Low,
    }
}

/// Reads what the host exposes. Memory and connection stay unknown.
pub fn detect() -> DeviceCapabilities {
    let cpu_cores = std::thread::available_parallelism()
        .ok()
        .and_then(|n| u32::try_from(n.get()).ok());

    DeviceCapabilities {
        cpu_cores,
        memory_gb: None,
        connection: None,
    }
}

/// Display refresh cadence suited to the tier.
pub fn tick_interval(tier: PerformanceTier) -> Duration {
    match tier {
        PerformanceTier::High => Duration::from_millis(10),
        PerformanceTier::Medium => Duration::from_millis(50),
        PerformanceTier::Low => Duration::from_millis(250),
    }
}

/// Polling cadence for a session. With a tier the cadence follows the
/// device, otherwise the configured interval applies.
pub fn cadence(settings: &CountdownSettings, tier: Option<PerformanceTier>) -> Result<Duration> {
    match tier {
        Some(tier) => {
            let cadence = tick_interval(tier);
            log::info!("Using {:?} tier cadence of {:?}", tier, cadence);
            Ok(cadence)
        }
        None => settings.tick_interval(),
    }
}
