//! Full selection report for one load
//!
//! Runs every selector once and keeps the intermediate values (MCA, contactor
//! minimum, breaker window, VFD target, MMS adjusted current) alongside the
//! results so callers can show how a rating was reached.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{
    breaker_window, calculate_mca, contactor_min_rating, mms_adjusted_current, select_breakers,
    select_cable, select_contactor, select_mms_by_range, select_mms_by_rating, select_vfd,
    vfd_target_current, BreakerList, SelectionInput, Vfd,
};
use crate::labels::{self, ComponentClass};
use crate::tables::{CableEntry, MmsRange};

/// Every component selection for one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionReport {
    pub input: SelectionInput,
    pub mca: f64,
    pub cable: Option<CableEntry>,
    pub contactor_min_rating: f64,
    pub contactor: Option<u32>,
    /// Open interval (min, max)
    pub breaker_window: (f64, f64),
    pub breakers: BreakerList,
    pub vfd_target_current: f64,
    pub vfd: Option<Vfd>,
    pub mms_rating: Option<f64>,
    pub mms_adjusted_current: f64,
    pub mms_range: Option<MmsRange>,
}

impl SelectionReport {
    pub fn compute(input: SelectionInput) -> Self {
        let load = input.load_current_amps;
        let ambient = input.ambient_temp_celsius;
        let mca = calculate_mca(load, ambient);

        Self {
            input,
            mca,
            cable: select_cable(mca),
            contactor_min_rating: contactor_min_rating(load),
            contactor: select_contactor(load),
            breaker_window: breaker_window(load),
            breakers: select_breakers(load),
            vfd_target_current: vfd_target_current(load, ambient),
            vfd: select_vfd(load, ambient),
            mms_rating: select_mms_by_rating(load),
            mms_adjusted_current: mms_adjusted_current(load, ambient),
            mms_range: select_mms_by_range(load, ambient),
        }
    }

    /// Label for one component class, `None` when nothing was selected
    ///
    /// MMS uses the rating strategy.
    pub fn label(&self, class: ComponentClass) -> Option<String> {
        match class {
            ComponentClass::Cable => self.cable.as_ref().map(labels::cable_label),
            ComponentClass::Contactor => self.contactor.map(labels::amps_label),
            ComponentClass::CircuitBreaker => {
                if self.breakers.is_empty() {
                    None
                } else {
                    Some(labels::breakers_label(&self.breakers))
                }
            }
            ComponentClass::Vfd => self.vfd.as_ref().map(labels::vfd_label),
            ComponentClass::Mms => self.mms_rating.map(labels::amps_label),
        }
    }

    /// Labels of the selected components, keyed by class
    pub fn labels(&self) -> BTreeMap<ComponentClass, String> {
        ComponentClass::ALL
            .into_iter()
            .filter_map(|class| self.label(class).map(|label| (class, label)))
            .collect()
    }
}

/// Reports for many inputs, computed in parallel, in input order
pub fn select_batch(inputs: &[SelectionInput]) -> Vec<SelectionReport> {
    inputs.par_iter().map(|&input| SelectionReport::compute(input)).collect()
}
