//! CSV output formatting for allocation results.

use crate::processing::{AddressReport, SubnetRow};

/// Quote a field when it holds a comma or a double quote.
///
/// Embedded quotes are doubled. Spreadsheets do not like a space after the
/// separator, so rows are joined with a bare comma.
pub fn escape_csv_field(input: &str) -> String {
    if input.contains(',') || input.contains('"') {
        let escaped = input.replace('"', "\"\"");
        format!("\"{}\"", escaped)
    } else {
        input.to_string()
    }
}

fn csv_line<S: AsRef<str>>(fields: &[S]) -> String {
    let line = fields
        .iter()
        .map(|f| escape_csv_field(f.as_ref()))
        .collect::<Vec<String>>()
        .join(",");
    line + "\n"
}

/// Header plus one line per subnet row.
///
/// # Arguments
/// * `rows` - The rows to print
/// * `with_requested` - Add the `requested_hosts` and `requirement_index` columns (VLSM)
pub fn subnet_csv(rows: &[SubnetRow], with_requested: bool) -> String {
    let mut header = vec![
        "index",
        "network",
        "prefix",
        "network_address",
        "first_usable",
        "last_usable",
        "broadcast",
        "usable_hosts",
    ];
    if with_requested {
        header.extend(["requested_hosts", "requirement_index"]);
    }

    let mut out = csv_line(&header);
    for row in rows {
        let mut fields = vec![
            row.index.to_string(),
            row.network.clone(),
            row.prefix.to_string(),
            row.network_address.clone(),
            row.first_usable.clone(),
            row.last_usable.clone(),
            row.broadcast.clone().unwrap_or_default(),
            row.usable_hosts.to_string(),
        ];
        if with_requested {
            fields.push(row.requested_hosts.map(|h| h.to_string()).unwrap_or_default());
            fields.push(
                row.requirement_index
                    .map(|i| i.to_string())
                    .unwrap_or_default(),
            );
        }
        out.push_str(&csv_line(&fields));
    }
    out
}

/// Two-column `field,value` listing of an address report.
pub fn address_csv(report: &AddressReport) -> String {
    let opt = |v: &Option<String>| v.clone().unwrap_or_default();
    let fields = [
        ("address", report.address.clone()),
        ("family", report.family.to_string()),
        ("binary", report.binary.clone()),
        ("decimal", report.decimal.clone()),
        ("hex", report.hex.clone()),
        ("class", opt(&report.class)),
        ("prefix", report.prefix.to_string()),
        ("network", report.network.clone()),
        ("usable_hosts", report.usable_hosts.to_string()),
        ("parent", opt(&report.parent)),
        (
            "subnets",
            report.subnets.map(|s| s.to_string()).unwrap_or_default(),
        ),
    ];

    let mut out = csv_line(&["field", "value"]);
    for (name, value) in fields {
        out.push_str(&csv_line(&[name, value.as_str()]));
    }
    out
}
