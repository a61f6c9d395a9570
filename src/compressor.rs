//! Compressor records and per-user workspaces
//!
//! A workspace is the list of compressors one user is sizing plus the index of
//! the one currently selected. It is plain data, passed explicitly to whoever
//! needs it and persisted by `crate::store::WorkspaceStore`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::labels::ComponentClass;
use crate::selection::{SelectionInput, SelectionReport};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkspaceError {
    #[error("No compressor at index {index} ({len} stored)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Please select a compressor/motor from the main page first.")]
    NothingSelected,
}

/// One motor/compressor with its component selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressorRecord {
    pub name: String,
    pub load: f64,
    pub ambient: f64,
    /// Selected component labels; classes with no selection are absent
    #[serde(default)]
    pub components: BTreeMap<ComponentClass, String>,
}

impl CompressorRecord {
    /// Build a record, running the selection engine for its load
    pub fn new(name: &str, input: SelectionInput) -> Self {
        let components = SelectionReport::compute(input).labels();
        Self {
            name: name.trim().to_string(),
            load: input.load_current_amps,
            ambient: input.ambient_temp_celsius,
            components,
        }
    }

    pub fn input(&self) -> SelectionInput {
        SelectionInput::new(self.load, self.ambient)
    }

    /// Stored label, or empty when the component was not found
    pub fn component(&self, class: ComponentClass) -> &str {
        self.components.get(&class).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(default)]
    pub compressors: Vec<CompressorRecord>,
    #[serde(default)]
    pub selected_index: Option<usize>,
}

impl Workspace {
    fn check_index(&self, index: usize) -> Result<(), WorkspaceError> {
        if index < self.compressors.len() {
            Ok(())
        } else {
            Err(WorkspaceError::IndexOutOfRange { index, len: self.compressors.len() })
        }
    }

    pub fn add(&mut self, name: &str, input: SelectionInput) -> &CompressorRecord {
        self.compressors.push(CompressorRecord::new(name, input));
        tracing::debug!(count = self.compressors.len(), "Compressor added");
        &self.compressors[self.compressors.len() - 1]
    }

    /// Replace a record, recomputing its components
    pub fn edit(
        &mut self,
        index: usize,
        name: &str,
        input: SelectionInput,
    ) -> Result<&CompressorRecord, WorkspaceError> {
        self.check_index(index)?;
        self.compressors[index] = CompressorRecord::new(name, input);
        Ok(&self.compressors[index])
    }

    /// Remove a record; the selection follows the record it pointed at
    pub fn delete(&mut self, index: usize) -> Result<CompressorRecord, WorkspaceError> {
        self.check_index(index)?;
        let removed = self.compressors.remove(index);
        self.selected_index = match self.selected_index {
            Some(selected) if selected == index => None,
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };
        Ok(removed)
    }

    pub fn select(&mut self, index: usize) -> Result<&CompressorRecord, WorkspaceError> {
        self.check_index(index)?;
        self.selected_index = Some(index);
        Ok(&self.compressors[index])
    }

    pub fn selected(&self) -> Result<&CompressorRecord, WorkspaceError> {
        self.selected_index
            .and_then(|i| self.compressors.get(i))
            .ok_or(WorkspaceError::NothingSelected)
    }

    pub fn get(&self, index: usize) -> Result<&CompressorRecord, WorkspaceError> {
        self.check_index(index)?;
        Ok(&self.compressors[index])
    }

    pub fn reset(&mut self) {
        self.compressors.clear();
        self.selected_index = None;
    }
}
