pub mod discover;
pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use netsweep_common::config::Config;
use netsweep_common::error::InvalidArgument;
use netsweep_common::models::{DEFAULT_CONCURRENCY, Protocol, ScanRequest};
use netsweep_common::network::ports::PortRange;
use netsweep_common::network::target::Target;

#[derive(Parser)]
#[command(name = "netsweep", version)]
#[command(about = "Neighbour discovery from the ARP cache and TCP/UDP port probing.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output: -q hides banner and headers, -qq prints results only
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// More output: -v adds per-host state counts, -vv lists probe failures
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the neighbours in the ARP cache
    #[command(alias = "d")]
    Discover,
    /// Probe ports on one or more hosts
    #[command(alias = "s")]
    Scan(ScanArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProtocolArg {
    Tcp,
    Udp,
}

impl From<ProtocolArg> for Protocol {
    fn from(arg: ProtocolArg) -> Self {
        match arg {
            ProtocolArg::Tcp => Protocol::Tcp,
            ProtocolArg::Udp => Protocol::Udp,
        }
    }
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Host, IP, range (10.0.0.1-50), CIDR (10.0.0.0/30), comma list, or `arp`
    pub target: Target,

    /// Port or inclusive port range
    #[arg(short, long, default_value = "1-1024")]
    pub ports: PortRange,

    /// Per-probe timeout in milliseconds
    #[arg(short, long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    #[arg(long, value_enum, default_value_t = ProtocolArg::Tcp)]
    pub protocol: ProtocolArg,

    /// Maximum probes in flight
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Probe in random order
    #[arg(long)]
    pub shuffle: bool,
}

impl ScanArgs {
    pub fn into_request(self) -> Result<ScanRequest, InvalidArgument> {
        let targets = self.target.into_target_set()?;
        let request = ScanRequest::new(targets, self.ports)
            .with_protocol(self.protocol.into())
            .with_timeout(Duration::from_millis(self.timeout))
            .with_concurrency(self.concurrency)
            .with_shuffle(self.shuffle);
        request.validate()?;
        Ok(request)
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            verbose: self.verbose,
            no_banner: self.no_banner,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
