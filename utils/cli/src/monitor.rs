use std::fmt::Display;

use embedded_hal::blocking::delay::DelayMs;
use nomad_blinkt_core::{BitPort, Blinkt, DriverError};
use nomad_blinkt_metrics::Resource;

/// Number of red flashes signaling a failed metrics fetch.
pub const FAILURE_FLASHES: usize = 2;
/// Color of the failure flashes.
pub const FAILURE_COLOR: &str = "FF0000";

/// Shows a single utilization reading on the strip.
///
/// A successful reading is rendered as the gauge, a failed one flashes the whole
/// strip red. The failure itself is only logged, the next reading may succeed.
pub fn display_reading<P, D, E>(
    blinkt: &mut Blinkt<P, D>,
    resource: Resource,
    reading: Result<f64, E>,
    brightness: f32,
) -> Result<(), DriverError<P::Error>>
where
    P: BitPort,
    D: DelayMs<u32>,
    E: Display,
{
    match reading {
        Ok(fraction) => {
            let lit = blinkt
                .show_gauge(fraction, brightness)
                .map_err(DriverError::Port)?;
            log::info!("{resource}: {fraction} -> {lit}");
        }
        Err(err) => {
            log::warn!("Unable to get {resource} utilization: {err}");
            blinkt.flash_all(FAILURE_FLASHES, FAILURE_COLOR)?;
        }
    }
    Ok(())
}
