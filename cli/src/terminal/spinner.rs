use indicatif::ProgressStyle;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Spinner shown while the address cache is read.
pub fn discovery_style() -> anyhow::Result<ProgressStyle> {
    Ok(ProgressStyle::with_template("{spinner:.blue} {msg}")?.tick_strings(TICKS))
}

/// Bar shown while probes run.
pub fn scan_style() -> anyhow::Result<ProgressStyle> {
    Ok(ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{bar:32.green/bright_black}] {pos}/{len} ({eta})",
    )?
    .tick_strings(TICKS)
    .progress_chars("━╸ "))
}
