/// Presentation settings resolved from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    /// `0` prints everything, `1` drops headers and banners, `2` prints results only.
    pub quiet: u8,
    /// `1` adds per-state counts to each host, `2` also lists probe failures.
    pub verbose: u8,
    pub no_banner: bool,
}

impl Config {
    pub fn shows_counts(&self) -> bool {
        self.verbose > 0
    }

    pub fn shows_failures(&self) -> bool {
        self.verbose > 1
    }
}
