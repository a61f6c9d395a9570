//! Variable-frequency drive selection

use serde::Serialize;

use crate::tables::reference_tables;

const VFD_SAFETY_FACTOR: f64 = 1.25;
const VFD_DERATING: f64 = 0.82;
const VFD_DERATING_AMBIENT_C: f64 = 40.0;

/// A drive frame: rated output current and matching motor power
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vfd {
    pub amps: f64,
    pub power_kw: f64,
}

/// Output current the drive must supply
///
/// 1.25 × load, further divided by 0.82 from 40 °C upwards.
pub fn vfd_target_current(load_current_amps: f64, ambient_temp_celsius: f64) -> f64 {
    let target = VFD_SAFETY_FACTOR * load_current_amps;
    if ambient_temp_celsius >= VFD_DERATING_AMBIENT_C {
        target / VFD_DERATING
    } else {
        target
    }
}

/// Smallest drive frame covering the target current; `None` above 88 A
pub fn select_vfd(load_current_amps: f64, ambient_temp_celsius: f64) -> Option<Vfd> {
    let target = vfd_target_current(load_current_amps, ambient_temp_celsius);
    reference_tables()
        .vfd_frames()
        .find(|&(amps, _)| amps >= target)
        .map(|(amps, power_kw)| Vfd { amps, power_kw })
}
