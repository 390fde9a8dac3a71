//! Hex color parsing.
//!
//! Colors arrive as `#RRGGBB` strings from config files, CLI flags, or the
//! host integration. The leading `#` is optional and hex digits are
//! case-insensitive. Anything else is rejected with the offending value in
//! the error message.

use image::Rgb;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color '{0}': expected a HEX value such as #FFFFFF")]
    InvalidColorFormat(String),
}

/// Parse a `#RRGGBB` (or `RRGGBB`) string into an RGB pixel.
pub fn parse_hex_color(value: &str) -> Result<Rgb<u8>, ColorError> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidColorFormat(value.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| ColorError::InvalidColorFormat(value.to_string()))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}
