//! # Shared Utility Functions
//!
//! Address formatting used by the swap core (wallet toasts) and the browser
//! app (wallet menu button).
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
//! assert_eq!(format_address(address, 4, 4), "8W6Q...JKAL");
//! ```

/// Show the first `prefix_len` and last `suffix_len` characters of an address.
///
/// Addresses too short to shorten are returned unchanged.
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
/// assert_eq!(format_address(addr, 6, 6), "8W6Qgi...KuJKAL");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= prefix_len + suffix_len {
        return address.to_string();
    }

    let prefix: String = chars[..prefix_len].iter().collect();
    let suffix: String = chars[chars.len() - suffix_len..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// [`format_address`] with four characters on each side.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
        assert_eq!(format_address(addr, 4, 4), "8W6Q...JKAL");
        assert_eq!(format_address(addr, 6, 6), "8W6Qgi...KuJKAL");
    }

    #[test]
    fn test_short_address_unchanged() {
        assert_eq!(format_address("short", 4, 4), "short");
        assert_eq!(format_address("12345678", 4, 4), "12345678");
    }

    #[test]
    fn test_truncate_address() {
        let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
        assert_eq!(truncate_address(addr), "8W6Q...JKAL");
    }
}
