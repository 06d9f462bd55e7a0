use colored::*;
use netsweep_common::models::{EntryType, PortState, ProbeOutcome};
use netsweep_core::report::StateCounts;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn state_color(state: PortState) -> Color {
    match state {
        PortState::Open => colors::OPEN,
        PortState::Closed => colors::CLOSED,
        PortState::Filtered => colors::FILTERED,
        PortState::Error => colors::ERROR,
    }
}

/// `80/tcp` on the left, the coloured state on the right.
pub fn outcome_to_detail(outcome: &ProbeOutcome) -> Detail {
    let key = format!("{}/{}", outcome.port, outcome.protocol);
    let state = outcome.state.to_string().color(state_color(outcome.state));
    (key, state)
}

/// Like [`outcome_to_detail`], with the failure cause appended.
pub fn failure_to_detail(outcome: &ProbeOutcome) -> Detail {
    let (key, state) = outcome_to_detail(outcome);
    match &outcome.cause {
        Some(cause) => {
            let value = format!("{} {}", state, format!("({cause})").color(colors::SEPARATOR));
            (key, value.normal())
        }
        None => (key, state),
    }
}

pub fn counts_to_detail(counts: &StateCounts) -> Detail {
    let dot = "·".color(colors::SEPARATOR);
    let value = format!(
        "{} {} {} {} {}",
        format!("closed {}", counts.closed).color(colors::CLOSED),
        dot,
        format!("filtered {}", counts.filtered).color(colors::FILTERED),
        dot,
        format!("error {}", counts.error).color(colors::ERROR),
    );
    ("Counts".to_string(), value.normal())
}

pub fn mac_to_detail(hardware_address: &str) -> Detail {
    (
        "MAC".to_string(),
        hardware_address.color(colors::MAC_ADDR),
    )
}

pub fn entry_type_to_detail(entry_type: EntryType) -> Detail {
    let value = match entry_type {
        EntryType::Static => "static".color(colors::SECONDARY),
        EntryType::Dynamic => "dynamic".color(colors::TEXT_DEFAULT),
        EntryType::Unknown => "unknown".color(colors::SEPARATOR),
    };
    ("Type".to_string(), value)
}

pub fn vendor_to_detail(vendor: &Option<String>) -> Option<Detail> {
    vendor
        .as_ref()
        .map(|vendor| ("Vendor".to_string(), vendor.color(colors::TEXT_DEFAULT)))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
