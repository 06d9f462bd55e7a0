use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::InvalidArgument;

/// An inclusive range of ports.
///
/// Fields are public so callers can describe any request; [`PortRange::validate`]
/// (run by [`crate::models::ScanRequest::validate`]) rejects port `0` and inverted bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRange {
    pub start: u16,
    pub end: u16,
}

impl PortRange {
    pub fn new(start: u16, end: u16) -> Result<Self, InvalidArgument> {
        let range = Self { start, end };
        range.validate()?;
        Ok(range)
    }

    pub fn single(port: u16) -> Result<Self, InvalidArgument> {
        Self::new(port, port)
    }

    pub fn validate(&self) -> Result<(), InvalidArgument> {
        if self.start == 0 {
            return Err(InvalidArgument::PortOutOfRange(0));
        }
        if self.end == 0 {
            return Err(InvalidArgument::PortOutOfRange(0));
        }
        if self.start > self.end {
            return Err(InvalidArgument::InvertedRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }

    /// Number of ports covered, `0` for an inverted range.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }
}

impl FromStr for PortRange {
    type Err = InvalidArgument;

    /// Parses `"80"` or `"1-1024"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once('-') {
            Some((start, end)) => Self::new(parse_port(start, s)?, parse_port(end, s)?),
            None => Self::single(parse_port(s, s)?),
        }
    }
}

fn parse_port(part: &str, original: &str) -> Result<u16, InvalidArgument> {
    let value: u64 = part
        .trim()
        .parse()
        .map_err(|_| InvalidArgument::MalformedPorts(original.to_string()))?;

    match u16::try_from(value) {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(InvalidArgument::PortOutOfRange(value)),
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
