//! Output formatting for allocation results.
//!
//! This module turns engine reports into text:
//! - [`terminal`] - Colored tables for the console
//! - [`csv`] - CSV for spreadsheets
//! - [`json`] - JSON via serde

mod csv;
mod json;
mod terminal;

pub use csv::{address_csv, escape_csv_field, subnet_csv};
pub use json::{address_json, flsm_json, vlsm_json};
pub use terminal::{address_table, flsm_table, format_field, subnet_table, vlsm_table};

use crate::processing::{AddressReport, FlsmReport, SubnetRow, VlsmReport};
use std::error::Error;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Render an FLSM report, listing at most `limit` subnets (`None` lists all).
///
/// Only the listed rows are ever generated, so a huge IPv6 split costs no
/// more than the rows shown.
pub fn render_flsm(
    mut report: FlsmReport,
    format: OutputFormat,
    limit: Option<usize>,
) -> Result<String, Box<dyn Error>> {
    let rows: Vec<SubnetRow> = match limit {
        Some(n) => report.rows.by_ref().take(n).collect(),
        None => report.rows.by_ref().collect(),
    };
    if (rows.len() as u128) < report.subnet_count {
        log::info!(
            "Listing {} of {} subnets of {}",
            rows.len(),
            report.subnet_count,
            report.base
        );
    }

    Ok(match format {
        OutputFormat::Table => flsm_table(&report, &rows),
        OutputFormat::Csv => subnet_csv(&rows, false),
        OutputFormat::Json => flsm_json(&report, &rows)?,
    })
}

pub fn render_vlsm(report: &VlsmReport, format: OutputFormat) -> Result<String, Box<dyn Error>> {
    Ok(match format {
        OutputFormat::Table => vlsm_table(report),
        OutputFormat::Csv => subnet_csv(&report.rows, true),
        OutputFormat::Json => vlsm_json(report)?,
    })
}

pub fn render_address(
    report: &AddressReport,
    format: OutputFormat,
) -> Result<String, Box<dyn Error>> {
    Ok(match format {
        OutputFormat::Table => address_table(report),
        OutputFormat::Csv => address_csv(report),
        OutputFormat::Json => address_json(report)?,
    })
}
