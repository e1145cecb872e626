//! Command-line surface.
//!
//! Defines the clap argument model and dispatches each subcommand to the
//! engine, returning the text to print.

use crate::config::Config;
use crate::convert::{
    address_to_binary, address_to_decimal, address_to_hex, from_binary, from_decimal, from_hex,
    is_valid_ipv4_address, is_valid_ipv4_network, is_valid_ipv6_address, is_valid_ipv6_network,
    parse_address,
};
use crate::error::SubnetError;
use crate::models::{AddressClass, IpNetwork, V4, V6};
use crate::output::{render_address, render_flsm, render_vlsm, OutputFormat};
use crate::processing::{inspect, AddressReport, Priority};
use clap::{Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::net::IpAddr;

/// Subnet planner - FLSM/VLSM allocation and address conversion for IPv4 and IPv6
#[derive(Parser, Debug)]
#[command(name = "subnet-planner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a network into equal subnets
    Flsm {
        /// Base network, e.g. 192.168.0.0/24
        network: String,
        /// Usable hosts needed in each subnet (0 for no requirement)
        hosts: u128,
        /// Number of subnets needed
        subnets: u128,
        /// Requirement kept when both cannot be met
        #[arg(short, long, value_enum, default_value_t = PriorityArg::Hosts)]
        priority: PriorityArg,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// List every subnet instead of stopping at the display limit
        #[arg(short, long)]
        all: bool,
    },

    /// Pack variable-size subnets into a network, largest first
    Vlsm {
        /// Base network, e.g. 10.0.0.0/22
        network: String,
        /// Usable hosts needed by each subnet, space or comma separated
        #[arg(required = true, num_args = 1.., value_delimiter = ',')]
        hosts: Vec<u128>,
        /// List subnets in the order the requirements were given
        #[arg(long)]
        input_order: bool,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show facts about a single address
    Ip {
        address: String,
        /// Prefix length for --hosts and --subnets, e.g. 26 or /26
        #[arg(short, long, value_parser = parse_prefix)]
        prefix: Option<u8>,
        #[arg(long)]
        to_binary: bool,
        #[arg(long)]
        to_decimal: bool,
        #[arg(long)]
        to_hex: bool,
        /// Classful IPv4 class
        #[arg(long)]
        class: bool,
        /// Usable hosts of address/prefix
        #[arg(long)]
        hosts: bool,
        /// Subnets of /prefix inside the classful network (IPv4) or the /48 (IPv6)
        #[arg(long)]
        subnets: bool,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Convert a binary, decimal or hex value back to an address
    #[command(name = "from")]
    Convert {
        #[arg(value_enum)]
        kind: NumberFormat,
        value: String,
        /// Read the value as an IPv6 address
        #[arg(long = "ipv6")]
        ipv6: bool,
    },

    /// Check a literal against every address and network form
    Validate { literal: String },
}

/// `--priority` values, mapped onto [`Priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Hosts,
    Subnets,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::Hosts => Priority::Hosts,
            PriorityArg::Subnets => Priority::Subnets,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NumberFormat {
    Binary,
    Decimal,
    Hex,
}

fn parse_prefix(value: &str) -> Result<u8, String> {
    let digits = value.trim().trim_start_matches('/');
    digits
        .parse::<u8>()
        .map_err(|_| format!("{value} is not a prefix length"))
}

/// Run a parsed command and return its output.
///
/// # Arguments
/// * `cli` - Parsed command line
/// * `config` - Runtime configuration (display limit)
///
/// # Returns
/// * `Ok(String)` - Text to print on stdout
/// * `Err` - Any engine or formatting error
pub fn run(cli: Cli, config: &Config) -> Result<String, Box<dyn Error>> {
    log::debug!("run({:?})", cli.command);
    match cli.command {
        Command::Flsm {
            network,
            hosts,
            subnets,
            priority,
            format,
            all,
        } => {
            let base: IpNetwork = network.parse()?;
            let report = base.subnets_flsm(hosts, subnets, priority.into())?;
            let limit = if all { None } else { Some(config.display_limit) };
            render_flsm(report, format, limit)
        }
        Command::Vlsm {
            network,
            hosts,
            input_order,
            format,
        } => {
            let base: IpNetwork = network.parse()?;
            let mut report = base.subnets_vlsm(&hosts)?;
            if input_order {
                report = report.into_input_order();
            }
            render_vlsm(&report, format)
        }
        Command::Ip {
            address,
            prefix,
            to_binary,
            to_decimal,
            to_hex,
            class,
            hosts,
            subnets,
            format,
        } => {
            let addr = parse_address(&address)?;
            let queries = [to_binary, to_decimal, to_hex, class, hosts, subnets];
            if !queries.contains(&true) {
                return render_address(&inspect(addr, prefix)?, format);
            }

            let mut lines = Vec::new();
            if to_binary {
                lines.push(address_to_binary(addr));
            }
            if to_decimal {
                lines.push(address_to_decimal(addr));
            }
            if to_hex {
                lines.push(address_to_hex(addr));
            }
            if class {
                match addr {
                    IpAddr::V4(a) => lines.push(AddressClass::of(a).to_string()),
                    IpAddr::V6(_) => {
                        return Err(SubnetError::InvalidRequirement(format!(
                            "{addr}: address classes apply to IPv4 only"
                        ))
                        .into())
                    }
                }
            }
            // Only sizing depends on the prefix
            if hosts || subnets {
                let report = inspect(addr, prefix)?;
                if hosts {
                    lines.push(report.usable_hosts.to_string());
                }
                if subnets {
                    lines.push(subnet_count(addr, &report)?.to_string());
                }
            }
            Ok(lines.join("\n") + "\n")
        }
        Command::Convert { kind, value, ipv6 } => {
            let addr: IpAddr = match (kind, ipv6) {
                (NumberFormat::Binary, false) => from_binary::<V4>(&value)?.into(),
                (NumberFormat::Binary, true) => from_binary::<V6>(&value)?.into(),
                (NumberFormat::Decimal, false) => from_decimal::<V4>(&value)?.into(),
                (NumberFormat::Decimal, true) => from_decimal::<V6>(&value)?.into(),
                (NumberFormat::Hex, false) => from_hex::<V4>(&value)?.into(),
                (NumberFormat::Hex, true) => from_hex::<V6>(&value)?.into(),
            };
            Ok(format!("{addr}\n"))
        }
        Command::Validate { literal } => Ok(validate(&literal)),
    }
}

/// Subnet count for `ip --subnets`, with the reason when there is none.
fn subnet_count(addr: IpAddr, report: &AddressReport) -> Result<u128, SubnetError> {
    match (&report.parent, report.subnets) {
        (_, Some(count)) => Ok(count),
        (Some(parent), None) => Err(SubnetError::InvalidRequirement(format!(
            "/{} is shorter than the enclosing network {parent}",
            report.prefix
        ))),
        (None, None) => Err(SubnetError::InvalidRequirement(format!(
            "{addr} has no enclosing classful network"
        ))),
    }
}

fn validate(literal: &str) -> String {
    let checks = [
        ("IPv4 address", is_valid_ipv4_address(literal)),
        ("IPv6 address", is_valid_ipv6_address(literal)),
        ("IPv4 network", is_valid_ipv4_network(literal)),
        ("IPv6 network", is_valid_ipv6_network(literal)),
    ];
    checks
        .iter()
        .map(|(name, ok)| format!("{name:<14}{}\n", if *ok { "yes" } else { "no" }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> Result<String, Box<dyn Error>> {
        let cli = Cli::try_parse_from(std::iter::once("subnet-planner").chain(args.iter().copied()))?;
        run(cli, &Config::default())
    }

    #[test]
    fn test_parse_flsm_defaults() {
        let cli = Cli::try_parse_from(["subnet-planner", "flsm", "10.0.0.0/24", "50", "4"]).unwrap();
        match cli.command {
            Command::Flsm {
                hosts,
                subnets,
                priority,
                format,
                all,
                ..
            } => {
                assert_eq!(hosts, 50);
                assert_eq!(subnets, 4);
                assert_eq!(Priority::from(priority), Priority::Hosts);
                assert_eq!(format, OutputFormat::Table);
                assert!(!all);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_vlsm_comma_list() {
        let cli = Cli::try_parse_from(["subnet-planner", "vlsm", "10.0.0.0/22", "100,50", "10"]).unwrap();
        match cli.command {
            Command::Vlsm { hosts, .. } => assert_eq!(hosts, vec![100, 50, 10]),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["subnet-planner", "vlsm", "10.0.0.0/22"]).is_err());
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_prefix("26"), Ok(26));
        assert_eq!(parse_prefix("/26"), Ok(26));
        assert!(parse_prefix("x").is_err());
    }

    #[test]
    fn test_run_flsm_csv() {
        let out = run_args(&["flsm", "192.168.0.0/24", "50", "4", "--format", "csv"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[4].starts_with("4,192.168.0.192/26,"));
    }

    #[test]
    fn test_run_flsm_priority_subnets() {
        let out = run_args(&[
            "flsm", "192.168.0.0/24", "100", "4", "-p", "subnets", "-f", "json",
        ])
        .unwrap();
        assert!(out.contains("\"prefix\": 26"));
        assert!(out.contains("\"hosts_met\": false"));
    }

    #[test]
    fn test_run_vlsm_input_order() {
        let out = run_args(&["vlsm", "10.0.0.0/24", "10", "100", "--input-order", "-f", "csv"]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].contains("10.0.0.128/28"));
        assert!(lines[2].contains("10.0.0.0/25"));
    }

    #[test]
    fn test_run_ip_queries() {
        let out = run_args(&["ip", "192.168.1.10", "--to-decimal", "--to-hex", "--class"]).unwrap();
        assert_eq!(out, "3232235786\n0xc0a8010a\nClass C\n");

        let out = run_args(&["ip", "172.16.0.1", "--hosts", "--subnets", "--prefix", "/20"]).unwrap();
        assert_eq!(out, "4094\n16\n");

        assert!(run_args(&["ip", "::1", "--class"]).is_err());
    }

    #[test]
    fn test_run_ip_conversions_ignore_prefix() {
        let out = run_args(&["ip", "10.0.0.1", "--to-binary", "--prefix", "33"]).unwrap();
        assert_eq!(out, "00001010.00000000.00000000.00000001\n");
        let out = run_args(&["ip", "10.0.0.1", "--class", "--prefix", "33"]).unwrap();
        assert_eq!(out, "Class A\n");

        let err = run_args(&["ip", "10.0.0.1", "--hosts", "--prefix", "33"]).unwrap_err();
        assert!(err.to_string().contains("/33"));
    }

    #[test]
    fn test_run_ip_subnets_errors() {
        let err = run_args(&["ip", "224.0.0.1", "--subnets"]).unwrap_err();
        assert!(err.to_string().contains("no enclosing classful network"));

        let err = run_args(&["ip", "10.1.2.3", "--subnets", "--prefix", "4"]).unwrap_err();
        assert!(err.to_string().contains("/4 is shorter than the enclosing network 10.0.0.0/8"));
    }

    #[test]
    fn test_run_from() {
        assert_eq!(run_args(&["from", "decimal", "3232235777"]).unwrap(), "192.168.1.1\n");
        assert_eq!(run_args(&["from", "hex", "0x0a000001"]).unwrap(), "10.0.0.1\n");
        assert_eq!(run_args(&["from", "hex", "--ipv6", "0x1"]).unwrap(), "::1\n");
        assert!(run_args(&["from", "binary", "0101"]).is_err());
    }

    #[test]
    fn test_run_validate() {
        let out = run_args(&["validate", "10.0.0.0/8"]).unwrap();
        assert!(out.contains("IPv4 address  no"));
        assert!(out.contains("IPv4 network  yes"));
        assert!(out.contains("IPv6 network  no"));
    }

    #[test]
    fn test_run_engine_errors() {
        let err = run_args(&["flsm", "10.0.0.1/24", "10", "2"]).unwrap_err();
        assert!(err.to_string().contains("10.0.0.1/24"));
        let err = run_args(&["vlsm", "10.0.0.0/30", "10"]).unwrap_err();
        assert!(err.to_string().contains("cannot accommodate"));
    }
}
