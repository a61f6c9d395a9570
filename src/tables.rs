//! Component Reference Tables
//!
//! Fixed rating tables for every selectable component class. The literal data
//! lives in static slices; `reference_tables()` builds the sorted, merged view
//! once on first use and hands out a shared `&'static` reference afterwards.
//!
//! Tables:
//! - Cable: rated ampacity -> AWG label (13 gauges, 18 AWG to 3/0)
//! - Contactor: AC-3 current ratings (8 sizes, 12-96 A)
//! - Circuit breaker: MCB (6-63 A) and MCCB (70-200 A) classes
//! - VFD: rated output current paired with motor power (9 frames)
//! - MMS: fixed ratings (8 sizes) and adjustable current ranges (13 ranges)

use serde::Serialize;
use std::sync::OnceLock;

/// One cable gauge with its rated ampacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CableEntry {
    pub ampacity: u32,
    pub awg: &'static str,
}

/// Adjustable current range of a manual motor starter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MmsRange {
    pub lower: f64,
    pub upper: f64,
}

impl MmsRange {
    /// Inclusive on both ends
    pub fn contains(&self, current: f64) -> bool {
        self.lower <= current && current <= self.upper
    }
}

// ============================================================================
// EMBEDDED RATING DATA
// ============================================================================

static CABLE_DATA: &[CableEntry] = &[
    CableEntry { ampacity: 14, awg: "18" },
    CableEntry { ampacity: 25, awg: "14" },
    CableEntry { ampacity: 30, awg: "12" },
    CableEntry { ampacity: 40, awg: "10" },
    CableEntry { ampacity: 55, awg: "8" },
    CableEntry { ampacity: 75, awg: "6" },
    CableEntry { ampacity: 95, awg: "4" },
    CableEntry { ampacity: 110, awg: "3" },
    CableEntry { ampacity: 130, awg: "2" },
    CableEntry { ampacity: 150, awg: "1" },
    CableEntry { ampacity: 170, awg: "1/0" },
    CableEntry { ampacity: 195, awg: "2/0" },
    CableEntry { ampacity: 225, awg: "3/0" },
];

static CONTACTOR_DATA: &[u32] = &[12, 16, 30, 38, 52, 65, 80, 96];

/// Miniature circuit breakers
static MCB_DATA: &[u32] = &[6, 10, 16, 20, 25, 32, 40, 50, 63];

/// Molded-case circuit breakers
static MCCB_DATA: &[u32] = &[70, 90, 125, 150, 200];

static VFD_AMPS: &[f64] = &[5.7, 9.5, 12.7, 18.0, 26.0, 33.0, 46.0, 62.0, 88.0];
static VFD_POWER_KW: &[f64] = &[2.2, 4.0, 5.5, 7.5, 11.0, 15.0, 22.0, 30.0, 45.0];

static MMS_RATINGS: &[f64] = &[6.3, 10.0, 16.0, 25.0, 32.0, 40.0, 50.0, 63.0];

static MMS_RANGES: &[MmsRange] = &[
    MmsRange { lower: 0.4, upper: 0.63 },
    MmsRange { lower: 0.63, upper: 1.0 },
    MmsRange { lower: 1.0, upper: 1.6 },
    MmsRange { lower: 1.6, upper: 2.5 },
    MmsRange { lower: 2.5, upper: 4.0 },
    MmsRange { lower: 4.0, upper: 6.3 },
    MmsRange { lower: 6.3, upper: 10.0 },
    MmsRange { lower: 10.0, upper: 16.0 },
    MmsRange { lower: 16.0, upper: 20.0 },
    MmsRange { lower: 20.0, upper: 25.0 },
    MmsRange { lower: 25.0, upper: 30.0 },
    MmsRange { lower: 30.0, upper: 42.0 },
    MmsRange { lower: 42.0, upper: 54.0 },
];

// ============================================================================
// SORTED TABLE VIEW
// ============================================================================

/// All reference tables, sorted ascending by their ordering key
#[derive(Debug, Serialize)]
pub struct ReferenceTables {
    pub cables: Vec<CableEntry>,
    pub contactors: Vec<u32>,
    pub mcb: Vec<u32>,
    pub mccb: Vec<u32>,
    /// MCB and MCCB merged, ascending
    pub breakers: Vec<u32>,
    pub vfd_amps: Vec<f64>,
    pub vfd_power_kw: Vec<f64>,
    pub mms_ratings: Vec<f64>,
    pub mms_ranges: Vec<MmsRange>,
}

impl ReferenceTables {
    fn build() -> Self {
        let mut cables = CABLE_DATA.to_vec();
        cables.sort_by_key(|c| c.ampacity);

        let mut contactors = CONTACTOR_DATA.to_vec();
        contactors.sort_unstable();

        let mut mcb = MCB_DATA.to_vec();
        mcb.sort_unstable();
        let mut mccb = MCCB_DATA.to_vec();
        mccb.sort_unstable();

        let mut breakers: Vec<u32> = mcb.iter().chain(mccb.iter()).copied().collect();
        breakers.sort_unstable();

        // Amps and power are indexed together, so they are sorted as pairs
        assert_eq!(VFD_AMPS.len(), VFD_POWER_KW.len(), "VFD tables must be paired");
        let mut vfd: Vec<(f64, f64)> = VFD_AMPS
            .iter()
            .copied()
            .zip(VFD_POWER_KW.iter().copied())
            .collect();
        vfd.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (vfd_amps, vfd_power_kw): (Vec<f64>, Vec<f64>) = vfd.into_iter().unzip();

        let mut mms_ratings = MMS_RATINGS.to_vec();
        mms_ratings.sort_by(|a, b| a.total_cmp(b));

        let mut mms_ranges = MMS_RANGES.to_vec();
        mms_ranges.sort_by(|a, b| a.lower.total_cmp(&b.lower));

        tracing::debug!(
            cables = cables.len(),
            breakers = breakers.len(),
            vfd_frames = VFD_AMPS.len(),
            "Reference tables built"
        );

        Self {
            cables,
            contactors,
            mcb,
            mccb,
            breakers,
            vfd_amps,
            vfd_power_kw,
            mms_ratings,
            mms_ranges,
        }
    }

    /// Paired (amps, kW) view of the VFD frames
    pub fn vfd_frames(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.vfd_amps.iter().copied().zip(self.vfd_power_kw.iter().copied())
    }

    /// MCB and MCCB columns side by side, padded with `None` where one class is shorter
    pub fn breaker_columns(&self) -> Vec<(Option<u32>, Option<u32>)> {
        let rows = self.mcb.len().max(self.mccb.len());
        (0..rows)
            .map(|i| (self.mcb.get(i).copied(), self.mccb.get(i).copied()))
            .collect()
    }
}

static TABLES: OnceLock<ReferenceTables> = OnceLock::new();

/// Shared reference tables, built on first call
pub fn reference_tables() -> &'static ReferenceTables {
    TABLES.get_or_init(ReferenceTables::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        let t = reference_tables();
        assert_eq!(t.cables.len(), 13);
        assert_eq!(t.contactors.len(), 8);
        assert_eq!(t.breakers.len(), 14, "9 MCB + 5 MCCB");
        assert_eq!(t.vfd_amps.len(), t.vfd_power_kw.len());
        assert_eq!(t.mms_ratings.len(), 8);
        assert_eq!(t.mms_ranges.len(), 13);
    }

    #[test]
    fn test_tables_sorted_ascending() {
        let t = reference_tables();
        assert!(t.cables.windows(2).all(|w| w[0].ampacity < w[1].ampacity));
        assert!(t.contactors.windows(2).all(|w| w[0] < w[1]));
        assert!(t.breakers.windows(2).all(|w| w[0] < w[1]));
        assert!(t.vfd_amps.windows(2).all(|w| w[0] < w[1]));
        assert!(t.vfd_power_kw.windows(2).all(|w| w[0] < w[1]));
        assert!(t.mms_ratings.windows(2).all(|w| w[0] < w[1]));
        assert!(t.mms_ranges.windows(2).all(|w| w[0].lower < w[1].lower));
    }

    /// Each range starts where the previous one ends
    #[test]
    fn test_mms_ranges_contiguous() {
        let ranges = &reference_tables().mms_ranges;
        for i in 0..ranges.len() - 1 {
            assert_eq!(
                ranges[i].upper, ranges[i + 1].lower,
                "ranges {} and {} are not contiguous",
                i,
                i + 1
            );
        }
    }

    #[test]
    fn test_vfd_pairs_survive_sort() {
        let frames: Vec<(f64, f64)> = reference_tables().vfd_frames().collect();
        assert_eq!(frames[0], (5.7, 2.2));
        assert_eq!(frames[2], (12.7, 5.5));
        assert_eq!(frames[8], (88.0, 45.0));
    }

    #[test]
    fn test_breaker_columns_padded() {
        let cols = reference_tables().breaker_columns();
        assert_eq!(cols.len(), 9);
        assert_eq!(cols[0], (Some(6), Some(70)));
        assert_eq!(cols[4], (Some(25), Some(200)));
        assert_eq!(cols[5], (Some(32), None));
    }

    #[test]
    fn test_same_instance_every_call() {
        assert!(std::ptr::eq(reference_tables(), reference_tables()));
    }
}
