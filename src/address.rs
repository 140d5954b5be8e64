//! Ethereum address shortening.

/// Default number of characters kept at each end of a shortened address.
pub const DEFAULT_SHORT_ADDRESS_LENGTH: usize = 3;

/// Shortens an address to `0x` plus `length` leading characters, `...`, and
/// `length` trailing characters.
///
/// Slicing clamps to the bounds of `address`, so short inputs never panic.
///
/// # Example
/// ```
/// use time_layers::address::short_address;
///
/// let addr = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";
/// assert_eq!(short_address(addr, 3), "0xd8d...045");
/// ```
pub fn short_address(address: &str, length: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    let head_end = length.saturating_add(2).min(chars.len());
    let tail_start = chars.len().saturating_sub(length);

    let mut out = String::with_capacity(head_end + 3 + (chars.len() - tail_start));
    out.extend(&chars[..head_end]);
    out.push_str("...");
    out.extend(&chars[tail_start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045";

    #[test]
    fn keeps_prefix_and_suffix() {
        assert_eq!(short_address(ADDR, DEFAULT_SHORT_ADDRESS_LENGTH), "0xd8d...045");
        assert_eq!(short_address(ADDR, 6), "0xd8dA6B...A96045");
    }

    #[test]
    fn zero_length_keeps_only_the_0x() {
        assert_eq!(short_address(ADDR, 0), "0x...");
    }

    #[test]
    fn clamps_on_short_input() {
        assert_eq!(short_address("0x1", 3), "0x1...0x1");
        assert_eq!(short_address("", 3), "...");
    }
}
