use colored::Color;

pub const PRIMARY: Color = Color::TrueColor {
    r: 102,
    g: 217,
    b: 239,
};
pub const SECONDARY: Color = Color::TrueColor {
    r: 166,
    g: 226,
    b: 46,
};
pub const ACCENT: Color = Color::TrueColor {
    r: 253,
    g: 151,
    b: 31,
};
pub const TEXT_DEFAULT: Color = Color::TrueColor {
    r: 220,
    g: 220,
    b: 220,
};
pub const SEPARATOR: Color = Color::BrightBlack;

pub const MAC_ADDR: Color = Color::TrueColor {
    r: 230,
    g: 219,
    b: 116,
};

pub const OPEN: Color = Color::Green;
pub const CLOSED: Color = Color::Red;
pub const FILTERED: Color = Color::Yellow;
pub const ERROR: Color = Color::BrightRed;
