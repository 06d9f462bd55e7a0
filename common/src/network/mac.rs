use pnet::util::MacAddr;

/// Parses a hardware address printed either as `aa-bb-cc-dd-ee-ff` (Windows)
/// or `aa:bb:cc:dd:ee:ff` (BSD, Linux).
pub fn parse_hardware_address(s: &str) -> Option<MacAddr> {
    s.trim().replace('-', ":").parse::<MacAddr>().ok()
}

/// Whether the address is the all-ones broadcast address.
pub fn is_broadcast(s: &str) -> bool {
    parse_hardware_address(s).is_some_and(|mac| mac == MacAddr::broadcast())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
