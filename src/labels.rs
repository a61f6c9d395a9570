//! Display labels for selection results
//!
//! These strings are what workspace records store and what the CSV export
//! writes, so their formats are fixed:
//! - Cable: `10 AWG (40A)`
//! - Contactor / MMS rating: `30A`
//! - Circuit breakers: `32A, 40A`
//! - VFD: `12.7A, 5.5kW`
//! - MMS range: `16 - 20`
//!
//! Numbers use Rust's shortest round-trip formatting, so `18.0` prints `18`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::selection::Vfd;
use crate::tables::{CableEntry, MmsRange};

/// Rendering for a component that could not be selected
pub const NOT_FOUND: &str = "N/A";

/// Selectable component classes, in export column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentClass {
    #[serde(rename = "Cable")]
    Cable,
    #[serde(rename = "Contactor")]
    Contactor,
    #[serde(rename = "Circuit Breaker")]
    CircuitBreaker,
    #[serde(rename = "VFD")]
    Vfd,
    #[serde(rename = "MMS")]
    Mms,
}

impl ComponentClass {
    pub const ALL: [ComponentClass; 5] = [
        ComponentClass::Cable,
        ComponentClass::Contactor,
        ComponentClass::CircuitBreaker,
        ComponentClass::Vfd,
        ComponentClass::Mms,
    ];

    /// Column / key name
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentClass::Cable => "Cable",
            ComponentClass::Contactor => "Contactor",
            ComponentClass::CircuitBreaker => "Circuit Breaker",
            ComponentClass::Vfd => "VFD",
            ComponentClass::Mms => "MMS",
        }
    }

    /// URL path segment
    pub fn slug(&self) -> &'static str {
        match self {
            ComponentClass::Cable => "cable",
            ComponentClass::Contactor => "contactor",
            ComponentClass::CircuitBreaker => "circuit-breaker",
            ComponentClass::Vfd => "vfd",
            ComponentClass::Mms => "mms",
        }
    }
}

impl fmt::Display for ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentClass {
    type Err = String;

    /// Accepts either the slug or the column name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentClass::ALL
            .into_iter()
            .find(|c| c.slug() == s || c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown component class: {}", s))
    }
}

pub fn cable_label(cable: &CableEntry) -> String {
    format!("{} AWG ({}A)", cable.awg, cable.ampacity)
}

/// `30A`, `6.3A`
pub fn amps_label(rating: impl fmt::Display) -> String {
    format!("{}A", rating)
}

/// Empty input gives an empty string
pub fn breakers_label(ratings: &[u32]) -> String {
    ratings
        .iter()
        .map(amps_label)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn vfd_label(vfd: &Vfd) -> String {
    format!("{}A, {}kW", vfd.amps, vfd.power_kw)
}

pub fn mms_range_label(range: &MmsRange) -> String {
    format!("{} - {}", range.lower, range.upper)
}

/// Label or `N/A`
pub fn or_not_found(label: Option<String>) -> String {
    label.unwrap_or_else(|| NOT_FOUND.to_string())
}

/// Spreadsheet cell text for a measured value: `20.0`, `12.5`
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
