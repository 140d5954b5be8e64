//! Ether amount display formatting (en-US grouping, bounded decimals).

use core::fmt;

/// Default maximum number of fraction digits.
pub const DEFAULT_ETH_DECIMALS: usize = 3;

/// Upper bound on fraction digits; larger requests are clamped to it.
pub const MAX_ETH_DECIMALS: usize = 100;

/// Errors from formatting an ether amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EthFormatError {
    /// The input does not start with a number, or is NaN.
    NotANumber,
}

impl fmt::Display for EthFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EthFormatError::NotANumber => write!(f, "invalid number input"),
        }
    }
}

impl std::error::Error for EthFormatError {}

/// Formats a textual amount, e.g. `"1234.56789"` -> `"1,234.568"`.
///
/// The leading numeric part of `value` is used, so `"1.5 ETH"` reads as 1.5.
///
/// # Errors
/// * `NotANumber` - No numeric prefix
pub fn format_eth(value: &str, max_decimals: usize) -> Result<String, EthFormatError> {
    let number = parse_float_prefix(value).ok_or(EthFormatError::NotANumber)?;
    format_eth_f64(number, max_decimals)
}

/// Formats a numeric amount with grouping and at most `max_decimals` fraction digits.
///
/// Rounds the shortest decimal form of `value`, ties away from zero, so
/// `2.5` at zero decimals is `3` and `1.005` at two is `1.01`. Trailing
/// fraction zeros are dropped. Infinities render as `∞` / `-∞`.
/// `max_decimals` is clamped to [`MAX_ETH_DECIMALS`].
///
/// # Errors
/// * `NotANumber` - `value` is NaN
pub fn format_eth_f64(value: f64, max_decimals: usize) -> Result<String, EthFormatError> {
    if value.is_nan() {
        return Err(EthFormatError::NotANumber);
    }
    if value.is_infinite() {
        return Ok(if value < 0.0 { "-∞" } else { "∞" }.to_string());
    }

    let shortest = value.abs().to_string();
    let (integer, fraction) = round_half_expand(&shortest, max_decimals.min(MAX_ETH_DECIMALS));
    let fraction = fraction.trim_end_matches('0');

    let is_zero = integer.bytes().all(|b| b == b'0') && fraction.is_empty();
    let mut out = String::with_capacity(integer.len() * 4 / 3 + fraction.len() + 2);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    push_grouped(&mut out, &integer);
    if !fraction.is_empty() {
        out.push('.');
        out.push_str(fraction);
    }
    Ok(out)
}

/// Cuts a plain decimal string to `max_decimals` fraction digits, rounding ties away from zero.
fn round_half_expand(decimal: &str, max_decimals: usize) -> (String, String) {
    let (integer, fraction) = decimal.split_once('.').unwrap_or((decimal, ""));
    if fraction.len() <= max_decimals {
        return (integer.to_string(), fraction.to_string());
    }

    let round_up = fraction.as_bytes()[max_decimals] >= b'5';
    let mut digits: Vec<u8> = integer
        .bytes()
        .chain(fraction[..max_decimals].bytes())
        .collect();

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - max_decimals;
    let to_string = |bytes: &[u8]| bytes.iter().map(|&b| char::from(b)).collect::<String>();
    (to_string(&digits[..split]), to_string(&digits[split..]))
}

fn push_grouped(out: &mut String, digits: &str) {
    let len = digits.len();
    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
}

/// Reads the longest numeric prefix: sign, digits, fraction, exponent, or `Infinity`.
fn parse_float_prefix(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let count_digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let integer_digits = count_digits(end);
    end += integer_digits;

    let mut fraction_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction_digits = count_digits(end + 1);
        if integer_digits > 0 || fraction_digits > 0 {
            end += 1 + fraction_digits;
        }
    }

    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}
