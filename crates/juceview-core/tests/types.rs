//! Tests for the shared value types

use juceview_core::types::Address;

#[test]
fn test_address_from_value_text()
{
    assert_eq!(Address::from_value_text("0x0000000100004000"), Some(Address::new(0x1_0000_4000)));
    assert_eq!(Address::from_value_text("0XFF"), Some(Address::new(0xff)));
    assert_eq!(Address::from_value_text("  0x10\n"), Some(Address::new(0x10)));
    assert_eq!(Address::from_value_text("1000"), Some(Address::new(0x1000)));
}

#[test]
fn test_address_from_value_text_rejects_non_pointers()
{
    assert_eq!(Address::from_value_text(""), None);
    assert_eq!(Address::from_value_text("0x"), None);
    assert_eq!(Address::from_value_text("<optimized out>"), None);
    assert_eq!(Address::from_value_text("0x1ffffffffffffffff"), None);
}

#[test]
fn test_address_null()
{
    assert!(Address::NULL.is_null());
    assert!(Address::from_value_text("0x0").unwrap().is_null());
    assert!(!Address::new(1).is_null());
}

#[test]
fn test_address_arithmetic()
{
    let base = Address::new(0x1000);
    assert_eq!(base + 8, Address::new(0x1008));
    assert_eq!(base.checked_add(u64::MAX), None);
    assert_eq!(u64::from(base), 0x1000);
}

#[test]
fn test_address_display()
{
    assert_eq!(Address::new(0x1000).to_string(), "0x0000000000001000");
    assert_eq!(Address::NULL.to_string(), "0x0000000000000000");
}
