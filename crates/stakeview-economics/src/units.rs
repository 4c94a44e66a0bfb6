//! # Unit Conversion
//!
//! Converts between base-unit integers (fixed-point token amounts) and
//! human decimal representations.
//!
//! Display conversion runs on pure u128 division and remainder, so the
//! integer part is never rounded through binary floating point and amounts
//! far past the 64-bit range format exactly. Fractions are truncated, never
//! rounded up.

use crate::constants::{DECIMALS, TOKEN_DISPLAY_PRECISION};
use stakeview_core::types::{AprRate, TokenAmount};
use thiserror::Error;

/// Errors when parsing a displayed amount back into base units
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// Input is not a plain decimal number
    #[error("Not a decimal number: {0:?}")]
    InvalidNumber(String),

    /// More fractional digits than the token carries
    #[error("More than {max} fractional digits")]
    TooManyFractionDigits { max: u32 },

    /// Amount does not fit in base units
    #[error("Amount exceeds the representable range")]
    Overflow,
}

/// Base-unit ↔ decimal-string converter
pub struct UnitConverter;

impl UnitConverter {
    /// Format a base-unit amount with the protocol decimals and default
    /// display precision.
    pub fn to_display(raw: TokenAmount) -> String {
        Self::to_display_with(raw, DECIMALS, TOKEN_DISPLAY_PRECISION)
    }

    /// Format a base-unit amount as a decimal string.
    ///
    /// The fraction is truncated to `precision` digits and trailing zeros
    /// are trimmed. Zero input formats as `"0"`.
    pub fn to_display_with(raw: TokenAmount, decimals: u32, precision: usize) -> String {
        if raw == 0 {
            return "0".to_string();
        }

        // u128 holds at most 38 decimal digits
        let decimals = decimals.min(38);
        let scale = 10u128.pow(decimals);
        let whole = raw / scale;
        let frac = raw % scale;

        if frac == 0 || precision == 0 {
            return whole.to_string();
        }

        let mut digits = format!("{:0width$}", frac, width = decimals as usize);
        digits.truncate(precision);
        let digits = digits.trim_end_matches('0');

        if digits.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{digits}")
        }
    }

    /// Convert a base-unit amount to a native float for further arithmetic.
    ///
    /// Lossy: f64 carries 53 mantissa bits, so amounts past ~9 * 10^15 base
    /// units lose low-order precision. Call sites that aggregate across
    /// exact and lossy values accept that trade-off.
    pub fn to_float(raw: TokenAmount) -> f64 {
        raw as f64 / 10f64.powi(DECIMALS as i32)
    }

    /// Parse a decimal string back into base units.
    pub fn from_display(text: &str, decimals: u32) -> Result<TokenAmount, ConversionError> {
        let decimals = decimals.min(38);
        let text = text.trim();

        let (whole_str, frac_str) = match text.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (text, ""),
        };
        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(ConversionError::InvalidNumber(text.to_string()));
        }
        // Digits only; u128::parse would also accept a leading '+'
        if !whole_str.bytes().all(|b| b.is_ascii_digit())
            || !frac_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ConversionError::InvalidNumber(text.to_string()));
        }

        let whole: u128 = if whole_str.is_empty() {
            0
        } else {
            whole_str
                .parse()
                .map_err(|_| ConversionError::InvalidNumber(text.to_string()))?
        };

        if frac_str.len() > decimals as usize {
            return Err(ConversionError::TooManyFractionDigits { max: decimals });
        }
        let frac: u128 = if frac_str.is_empty() {
            0
        } else {
            frac_str
                .parse()
                .map_err(|_| ConversionError::InvalidNumber(text.to_string()))?
        };

        let scale = 10u128.pow(decimals);
        let frac_scale = 10u128.pow(decimals - frac_str.len() as u32);

        whole
            .checked_mul(scale)
            .and_then(|units| units.checked_add(frac * frac_scale))
            .ok_or(ConversionError::Overflow)
    }

    /// Render a rate as `"NN%"`, truncating the fraction to `precision`
    /// digits and trimming trailing zeros.
    pub fn format_percentage(rate: AprRate, precision: usize) -> String {
        let whole = rate.bps() / 100;
        let frac = rate.bps() % 100;

        if precision == 0 || frac == 0 {
            return format!("{whole}%");
        }

        let mut digits = format!("{frac:02}");
        digits.truncate(precision);
        let digits = digits.trim_end_matches('0');

        if digits.is_empty() {
            format!("{whole}%")
        } else {
            format!("{whole}.{digits}%")
        }
    }
}
