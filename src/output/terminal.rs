//! Terminal output with colors.
//!
//! Renders allocation results as aligned tables. Functions return the text so
//! the caller decides where it goes.

use crate::processing::{AddressReport, FlsmReport, SubnetRow, VlsmReport};
use colored::Colorize;

/// Pad a value to `width`, right-aligned.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    format!("{value_str:>width$}")
}

/// Aligned table of subnet rows.
///
/// The `Requested` column is only shown when `with_requested` is set.
pub fn subnet_table(rows: &[SubnetRow], with_requested: bool) -> String {
    let has_broadcast = rows.iter().any(|r| r.broadcast.is_some());

    let mut headers = vec!["#", "Subnet", "First usable", "Last usable"];
    if has_broadcast {
        headers.push("Broadcast");
    }
    headers.push("Usable hosts");
    if with_requested {
        headers.push("Requested");
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut line = vec![
                row.index.to_string(),
                row.network.clone(),
                row.first_usable.clone(),
                row.last_usable.clone(),
            ];
            if has_broadcast {
                line.push(row.broadcast.clone().unwrap_or_else(|| "-".to_string()));
            }
            line.push(row.usable_hosts.to_string());
            if with_requested {
                line.push(
                    row.requested_hosts
                        .map(|h| h.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            line
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|line| line[i].len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format_field(h, *w))
        .collect::<Vec<String>>()
        .join("  ");
    let mut out = format!("{}\n", header.bold());
    out.push_str(&format!("{}\n", "-".repeat(header.len())));
    for line in cells {
        let text = line
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format_field(cell, *w))
            .collect::<Vec<String>>()
            .join("  ");
        out.push_str(&text);
        out.push('\n');
    }
    out
}

/// Summary line and table for an FLSM result.
pub fn flsm_table(report: &FlsmReport, rows: &[SubnetRow]) -> String {
    let mut out = format!(
        "{} {} ({}): /{}, {} subnet(s) x {} usable host(s)\n",
        "FLSM".green().bold(),
        report.base,
        report.family,
        report.prefix,
        report.subnet_count,
        report.usable_hosts
    );
    if !report.hosts_met {
        out.push_str(&format!(
            "{} host requirement not met, subnet count was given priority\n",
            "NOTE".on_red()
        ));
    }
    if !report.subnets_met {
        out.push_str(&format!(
            "{} subnet count not met, host requirement was given priority\n",
            "NOTE".on_red()
        ));
    }
    out.push('\n');
    out.push_str(&subnet_table(rows, false));

    let hidden = report.subnet_count.saturating_sub(rows.len() as u128);
    if hidden > 0 {
        out.push_str(&format!(
            "{} {} more subnet(s) not shown, use --all to list them\n",
            "...".yellow(),
            hidden
        ));
    }
    out
}

/// Summary line and table for a VLSM result.
pub fn vlsm_table(report: &VlsmReport) -> String {
    let mut out = format!(
        "{} {} ({}): {} block(s), {} address(es) allocated, {} free\n\n",
        "VLSM".green().bold(),
        report.base,
        report.family,
        report.rows.len(),
        report.allocated_addresses,
        report.free_addresses
    );
    out.push_str(&subnet_table(&report.rows, true));
    out
}

/// Key/value listing of an address report.
pub fn address_table(report: &AddressReport) -> String {
    let mut fields: Vec<(&str, String)> = vec![
        ("Address", format!("{} ({})", report.address, report.family)),
        ("Binary", report.binary.clone()),
        ("Decimal", report.decimal.clone()),
        ("Hex", report.hex.clone()),
    ];
    if let Some(class) = &report.class {
        fields.push(("Class", class.clone()));
    }
    fields.push(("Network", report.network.clone()));
    fields.push(("Usable hosts", report.usable_hosts.to_string()));
    if let (Some(parent), Some(subnets)) = (&report.parent, report.subnets) {
        fields.push(("Subnets", format!("{subnets} x /{} in {parent}", report.prefix)));
    }

    fields
        .into_iter()
        .map(|(name, value)| format!("{:<14}{}\n", format!("{name}:").bold(), value))
        .collect()
}
