use std::fmt;

/// How the cache entry was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Static,
    Dynamic,
    Unknown,
}

impl From<&str> for EntryType {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("static") {
            Self::Static
        } else if s.eq_ignore_ascii_case("dynamic") {
            Self::Dynamic
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A neighbour read from the address-resolution cache.
///
/// `interface_label` is the interface header line exactly as the tool printed it,
/// so entries group under whatever the operating system calls the interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub interface_label: String,
    pub address: String,
    pub hardware_address: String,
    pub entry_type: EntryType,
}

impl HostEntry {
    pub fn new(
        interface_label: impl Into<String>,
        address: impl Into<String>,
        hardware_address: impl Into<String>,
        entry_type: EntryType,
    ) -> Self {
        Self {
            interface_label: interface_label.into(),
            address: address.into(),
            hardware_address: hardware_address.into(),
            entry_type,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_type_is_case_insensitive() {
        assert_eq!(EntryType::from("dynamic"), EntryType::Dynamic);
        assert_eq!(EntryType::from("STATIC"), EntryType::Static);
        assert_eq!(EntryType::from("Dynamic"), EntryType::Dynamic);
        assert_eq!(EntryType::from("invalid"), EntryType::Unknown);
        assert_eq!(EntryType::from(""), EntryType::Unknown);
    }
}
