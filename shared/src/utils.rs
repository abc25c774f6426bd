//! # Shared Utility Functions
//!
//! Common utility functions used across the engine, `agentctl`, and wallet-web.
//!
//! ## Address Formatting
//!
//! Functions for formatting EVM addresses for display:
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`short_address`] - `0x` plus four hex digits, ellipsis, last four digits
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! let address = "0xE3350Ad4E7F3f07463352b481dE575f2e76bCd21";
//! let formatted = format_address(address, 6, 4);
//! assert_eq!(formatted, "0xE335...Cd21");
//! ```

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0xE3350Ad4E7F3f07463352b481dE575f2e76bCd21";
/// assert_eq!(format_address(addr, 6, 4), "0xE335...Cd21");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    if address_len <= prefix_len + suffix_len
        || prefix_len >= address_len
        || suffix_len >= address_len
        || !address.is_ascii()
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Shorten a `0x` address to `0x1234...abcd`.
///
/// Empty input stays empty.
///
/// ```rust
/// use shared::utils::short_address;
///
/// assert_eq!(short_address(""), "");
/// assert_eq!(short_address("0x98b35B543806a1542fcF63883b2AaE224e3Bc66E"), "0x98b3...c66E");
/// ```
pub fn short_address(address: &str) -> String {
    format_address(address, 6, 4)
}
