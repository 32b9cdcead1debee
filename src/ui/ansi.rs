// ANSI/VT100 styling for report titles.

/// ESC as a byte value.
pub const ESC_BYTE: u8 = 0x1B;

/// Control Sequence Introducer followed by `$suffix`.
#[macro_export]
macro_rules! csi {
    ($suffix:literal) => {
        concat!("\x1B[", $suffix)
    };
}

pub const STYLE_RESET: &str = crate::csi!("0m");
pub const FG_GREEN: &str = crate::csi!("32m");
pub const FG_RED: &str = crate::csi!("31m");

/// Wrap `s` in `style` when `enabled`.
pub fn paint(s: &str, style: &str, enabled: bool) -> String {
    if enabled {
        format!("{style}{s}{STYLE_RESET}")
    } else {
        s.to_string()
    }
}
