//! Debuggee address type.

use std::fmt;
use std::ops::Add;

/// Strongly typed address in the inspected process
///
/// Hosts report pointer values as text (`"0x00006000012a4f10"`). This newtype
/// is what that text decodes to, so pointer arithmetic on element buffers and
/// null checks on parent links never mix addresses with counts or sizes.
///
/// ## Example
///
/// ```rust
/// use juceview_core::types::Address;
///
/// let base = Address::from_value_text("0x1000").unwrap();
/// assert_eq!((base + 8).value(), 0x1008);
/// assert!(!base.is_null());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(u64);

impl Address
{
    /// The null address (0x0)
    pub const NULL: Self = Address(0);

    /// Create a new address from a `u64` value
    pub const fn new(value: u64) -> Self
    {
        Address(value)
    }

    /// Get the raw `u64` value of this address
    pub const fn value(self) -> u64
    {
        self.0
    }

    /// Whether this is the null pointer
    pub const fn is_null(self) -> bool
    {
        self.0 == 0
    }

    /// Parse a pointer's raw value text as reported by the host
    ///
    /// The text is read as hexadecimal, with or without a `0x`/`0X` prefix.
    /// Surrounding whitespace is ignored. Returns `None` for anything else,
    /// including an empty string.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use juceview_core::types::Address;
    ///
    /// assert_eq!(Address::from_value_text("0x0"), Some(Address::NULL));
    /// assert_eq!(Address::from_value_text("ff"), Some(Address::new(0xff)));
    /// assert_eq!(Address::from_value_text("nullptr"), None);
    /// ```
    pub fn from_value_text(text: &str) -> Option<Self>
    {
        let trimmed = text.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.is_empty() {
            return None;
        }
        u64::from_str_radix(digits, 16).ok().map(Address)
    }

    /// Add a byte offset, checking for overflow
    ///
    /// ```rust
    /// use juceview_core::types::Address;
    ///
    /// let addr = Address::new(0x1000);
    /// assert_eq!(addr.checked_add(0x10), Some(Address::new(0x1010)));
    /// assert_eq!(addr.checked_add(u64::MAX), None);
    /// ```
    pub fn checked_add(self, offset: u64) -> Option<Self>
    {
        self.0.checked_add(offset).map(Address)
    }
}

impl From<u64> for Address
{
    fn from(value: u64) -> Self
    {
        Address(value)
    }
}

impl From<Address> for u64
{
    fn from(address: Address) -> Self
    {
        address.0
    }
}

impl fmt::Display for Address
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "0x{:016x}", self.0)
    }
}

impl Add<u64> for Address
{
    type Output = Address;

    fn add(self, rhs: u64) -> Self::Output
    {
        Address(self.0.wrapping_add(rhs))
    }
}
