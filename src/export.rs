//! CSV Export
//!
//! Two spreadsheet downloads, both written through Polars:
//! - compressor table: one row per stored compressor, one column per component
//! - selection sheet: `Parameter,Value` rows for a single selection
//!
//! Every cell is text. Components with no selection are written as empty cells,
//! and `read_compressor_csv` maps empty cells back to empty strings so an
//! export re-reads to the same labels.

use anyhow::{Context, Result};
use polars::prelude::*;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use crate::compressor::CompressorRecord;
use crate::labels::{format_number, ComponentClass};
use crate::selection::SelectionReport;

pub const COL_NAME: &str = "Compressor Name";
pub const COL_LOAD: &str = "Load (A)";
pub const COL_AMBIENT: &str = "Ambient (°C)";

/// Header row of the compressor table, in column order
pub const EXPORT_HEADER: [&str; 8] = [
    COL_NAME,
    COL_LOAD,
    COL_AMBIENT,
    "Cable",
    "Contactor",
    "Circuit Breaker",
    "VFD",
    "MMS",
];

pub const EXPORT_FILENAME: &str = "compressor_component_selection.csv";
pub const SELECTION_SHEET_FILENAME: &str = "component_selection.csv";

/// One compressor table row as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub name: String,
    pub load: String,
    pub ambient: String,
    pub components: BTreeMap<ComponentClass, String>,
}

impl ExportRow {
    pub fn from_record(record: &CompressorRecord) -> Self {
        Self {
            name: record.name.clone(),
            load: format_number(record.load),
            ambient: format_number(record.ambient),
            components: ComponentClass::ALL
                .into_iter()
                .map(|class| (class, record.component(class).to_string()))
                .collect(),
        }
    }
}

// ============================================================================
// Compressor table
// ============================================================================

pub fn compressors_to_dataframe(records: &[CompressorRecord]) -> Result<DataFrame> {
    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from_record).collect();

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let loads: Vec<&str> = rows.iter().map(|r| r.load.as_str()).collect();
    let ambients: Vec<&str> = rows.iter().map(|r| r.ambient.as_str()).collect();

    let mut columns: Vec<Column> = vec![
        Series::new(COL_NAME.into(), names).into(),
        Series::new(COL_LOAD.into(), loads).into(),
        Series::new(COL_AMBIENT.into(), ambients).into(),
    ];

    for class in ComponentClass::ALL {
        let values: Vec<&str> = rows
            .iter()
            .map(|r| r.components.get(&class).map(String::as_str).unwrap_or(""))
            .collect();
        columns.push(Series::new(class.as_str().into(), values).into());
    }

    DataFrame::new(columns).context("Failed to build export DataFrame")
}

pub fn write_compressor_csv<W: Write>(records: &[CompressorRecord], writer: W) -> Result<()> {
    let mut df = compressors_to_dataframe(records)?;
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to write compressor CSV")?;
    tracing::debug!(rows = df.height(), "Wrote compressor CSV");
    Ok(())
}

pub fn compressors_to_csv(records: &[CompressorRecord]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_compressor_csv(records, &mut buf)?;
    Ok(buf)
}

/// Parse a compressor table export back into text rows
pub fn read_compressor_csv(bytes: &[u8]) -> Result<Vec<ExportRow>> {
    let df = read_text_csv(bytes).context("Failed to parse compressor CSV")?;

    let header: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
    if header != EXPORT_HEADER {
        anyhow::bail!("Unexpected compressor CSV header: {:?}", header);
    }

    let names = text_column(&df, COL_NAME)?;
    let loads = text_column(&df, COL_LOAD)?;
    let ambients = text_column(&df, COL_AMBIENT)?;
    let mut component_columns = Vec::with_capacity(ComponentClass::ALL.len());
    for class in ComponentClass::ALL {
        component_columns.push((class, text_column(&df, class.as_str())?));
    }

    let rows = (0..df.height())
        .map(|idx| ExportRow {
            name: names[idx].clone(),
            load: loads[idx].clone(),
            ambient: ambients[idx].clone(),
            components: component_columns
                .iter()
                .map(|(class, values)| (*class, values[idx].clone()))
                .collect(),
        })
        .collect();

    Ok(rows)
}

// ============================================================================
// Selection sheet
// ============================================================================

pub const SHEET_HEADER: [&str; 2] = ["Parameter", "Value"];

/// Parameter/value pairs for one selection; empty values where nothing was found
pub fn selection_sheet(report: &SelectionReport) -> Vec<(&'static str, String)> {
    let joined_breakers = report
        .breakers
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        ("Load Current (A)", format_number(report.input.load_current_amps)),
        ("Ambient Temperature (°C)", format_number(report.input.ambient_temp_celsius)),
        ("Cable (AWG)", report.cable.map(|c| c.awg.to_string()).unwrap_or_default()),
        ("Cable Ampacity (A)", report.cable.map(|c| c.ampacity.to_string()).unwrap_or_default()),
        ("Contactor (A)", report.contactor.map(|c| c.to_string()).unwrap_or_default()),
        ("Circuit Breaker(s) (A)", joined_breakers),
        ("VFD Current (A)", report.vfd.map(|v| v.amps.to_string()).unwrap_or_default()),
        ("VFD Power (kW)", report.vfd.map(|v| v.power_kw.to_string()).unwrap_or_default()),
        (
            "MMS Range (A)",
            report
                .mms_range
                .map(|r| format!("{} - {}", r.lower, r.upper))
                .unwrap_or_default(),
        ),
    ]
}

pub fn selection_sheet_csv(report: &SelectionReport) -> Result<Vec<u8>> {
    let sheet = selection_sheet(report);
    let parameters: Vec<&str> = sheet.iter().map(|(p, _)| *p).collect();
    let values: Vec<&str> = sheet.iter().map(|(_, v)| v.as_str()).collect();

    let mut df = DataFrame::new(vec![
        Series::new(SHEET_HEADER[0].into(), parameters).into(),
        Series::new(SHEET_HEADER[1].into(), values).into(),
    ])
    .context("Failed to build selection sheet DataFrame")?;

    let mut buf = Vec::new();
    CsvWriter::new(&mut buf)
        .include_header(true)
        .finish(&mut df)
        .context("Failed to write selection sheet CSV")?;
    Ok(buf)
}

// ============================================================================
// Helpers
// ============================================================================

/// Read CSV bytes with every column kept as text
fn read_text_csv(bytes: &[u8]) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?;
    Ok(df)
}

/// Column as owned strings; nulls (empty cells) become empty strings
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' is not text", name))?;
    let values = column
        .str()
        .with_context(|| format!("Column '{}' is not string type", name))?;

    Ok(values
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect())
}
