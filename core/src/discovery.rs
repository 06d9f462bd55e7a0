//! # Address-Cache Reader
//!
//! Parses the text printed by the operating system's address-cache dump tool into
//! [`HostEntry`] values, one per cache row, in source order.
//!
//! Lines are handled by a small state machine:
//! * **Header or blank**: skipped.
//! * **Interface label**: becomes the label of every following entry.
//! * **Entry**: tokenized on whitespace; the first three fields are address,
//!   hardware address and entry type.
//!
//! Rows printed in the BSD/Linux style (`host (ip) at mac [ether] on eth0`) carry
//! their own interface and are recognised as such.
//!
//! A malformed line never fails the parse. It is reported to the caller's
//! [`Diagnostics`] sink and skipped.

use netsweep_common::diagnostics::{DiagnosticEvent, Diagnostics};
use netsweep_common::error::{ExternalToolError, ParseError};
use netsweep_common::models::{EntryType, HostEntry};
use netsweep_common::network::mac;
use netsweep_common::vendors::VendorRepository;

use crate::system::AddressCacheSource;

const HEADER_PHRASE: &str = "Internet Address";
const INTERFACE_MARKER: &str = "Interface";

enum Line<'a> {
    HeaderOrBlank,
    InterfaceLabel(&'a str),
    Entry(Vec<&'a str>),
}

fn classify(line: &str) -> Line<'_> {
    if line.trim().is_empty() || line.contains(HEADER_PHRASE) {
        Line::HeaderOrBlank
    } else if line.contains(INTERFACE_MARKER) {
        Line::InterfaceLabel(line.trim_end())
    } else {
        Line::Entry(line.split_whitespace().collect())
    }
}

/// Parses address-cache text into host entries.
pub fn parse_cache(text: &str, diagnostics: &dyn Diagnostics) -> Vec<HostEntry> {
    let mut interface_label: &str = "";
    let mut entries: Vec<HostEntry> = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        match classify(raw) {
            Line::HeaderOrBlank => {}
            Line::InterfaceLabel(label) => interface_label = label,
            Line::Entry(tokens) => match parse_entry(&tokens, interface_label, idx + 1) {
                Ok(entry) => {
                    diagnostics.record(DiagnosticEvent::CacheEntryParsed(entry.clone()));
                    entries.push(entry);
                }
                Err(error) => diagnostics.record(DiagnosticEvent::MalformedCacheLine {
                    error,
                    text: raw.to_string(),
                }),
            },
        }
    }

    entries
}

fn parse_entry(tokens: &[&str], interface_label: &str, line: usize) -> Result<HostEntry, ParseError> {
    if let Some(entry) = parse_bsd_entry(tokens, line)? {
        return Ok(entry);
    }

    let [address, hardware_address, entry_type, ..] = tokens else {
        return Err(ParseError::MissingFields {
            line,
            found: tokens.len(),
        });
    };

    Ok(HostEntry::new(
        interface_label,
        *address,
        *hardware_address,
        EntryType::from(*entry_type),
    ))
}

/// `? (192.168.1.1) at aa:bb:cc:dd:ee:ff [ether] PERM on eth0`
fn parse_bsd_entry(tokens: &[&str], line: usize) -> Result<Option<HostEntry>, ParseError> {
    let [_name, address, "at", hardware_address, rest @ ..] = tokens else {
        return Ok(None);
    };
    let Some(address) = address.strip_prefix('(').and_then(|a| a.strip_suffix(')')) else {
        return Ok(None);
    };

    if hardware_address.starts_with('<') || hardware_address.starts_with('(') {
        return Err(ParseError::IncompleteEntry {
            line,
            address: address.to_string(),
        });
    }

    let interface_label = rest
        .iter()
        .position(|token| *token == "on")
        .and_then(|idx| rest.get(idx + 1))
        .map(|iface| format!("on {iface}"))
        .unwrap_or_default();

    let is_permanent = rest
        .iter()
        .any(|token| token.eq_ignore_ascii_case("perm") || token.eq_ignore_ascii_case("permanent"));
    let entry_type = if is_permanent {
        EntryType::Static
    } else {
        EntryType::Dynamic
    };

    Ok(Some(HostEntry::new(
        interface_label,
        address,
        *hardware_address,
        entry_type,
    )))
}

/// Dumps the address cache through `source` and parses it.
///
/// Fails only when the dump tool itself fails; malformed lines are reported to
/// `diagnostics` and left out.
pub async fn discover_hosts(
    source: &dyn AddressCacheSource,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<HostEntry>, ExternalToolError> {
    let text = source.dump().await?;
    Ok(parse_cache(&text, diagnostics))
}

/// A cache entry together with the manufacturer of its network card, when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredHost {
    pub entry: HostEntry,
    pub vendor: Option<String>,
}

/// Application Service for Host Discovery.
///
/// Orchestrates the discovery process by:
/// 1. reading the address cache through the [`AddressCacheSource`].
/// 2. enriching the results with vendor names from the [`VendorRepository`].
pub struct DiscoveryService {
    source: Box<dyn AddressCacheSource>,
    vendor_repo: Box<dyn VendorRepository>,
}

impl DiscoveryService {
    pub fn new(
        source: Box<dyn AddressCacheSource>,
        vendor_repo: Box<dyn VendorRepository>,
    ) -> Self {
        Self {
            source,
            vendor_repo,
        }
    }

    pub async fn perform_discovery(
        &self,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Vec<DiscoveredHost>, ExternalToolError> {
        let entries = discover_hosts(self.source.as_ref(), diagnostics).await?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                let vendor = mac::parse_hardware_address(&entry.hardware_address)
                    .and_then(|mac| self.vendor_repo.get_vendor(mac));
                DiscoveredHost { entry, vendor }
            })
            .collect())
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
