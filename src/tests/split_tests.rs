use crate::core::currency::format_inr;
use crate::core::errors::RoomshareError;
use crate::core::split::{format_share, per_member_share};

#[test]
fn test_even_split() {
    let share = per_member_share(300.0, 3).unwrap();
    assert_eq!(share, 100.0);
    assert_eq!(format_share(share), "100.00");
}

#[test]
fn test_uneven_split_rounds_to_cents() {
    let share = per_member_share(100.0, 3).unwrap();
    assert_eq!(format_share(share), "33.33");
    assert_eq!(format_share(per_member_share(200.0, 3).unwrap()), "66.67");
}

#[test]
fn test_zero_total() {
    assert_eq!(format_share(per_member_share(0.0, 4).unwrap()), "0.00");
}

#[test]
fn test_group_size_must_be_positive() {
    assert!(matches!(per_member_share(100.0, 0), Err(RoomshareError::DivisionDomain(0))));
    assert!(matches!(per_member_share(100.0, -2), Err(RoomshareError::DivisionDomain(-2))));
}

#[test]
fn test_format_inr_grouping() {
    assert_eq!(format_inr(Some(0.0)), "₹0");
    assert_eq!(format_inr(Some(999.0)), "₹999");
    assert_eq!(format_inr(Some(1000.0)), "₹1,000");
    assert_eq!(format_inr(Some(100000.0)), "₹1,00,000");
    assert_eq!(format_inr(Some(1234567.0)), "₹12,34,567");
    assert_eq!(format_inr(Some(8499.6)), "₹8,500");
}

#[test]
fn test_format_inr_missing_and_negative() {
    assert_eq!(format_inr(None), "₹0");
    assert_eq!(format_inr(Some(f64::NAN)), "₹0");
    assert_eq!(format_inr(Some(-25000.0)), "-₹25,000");
}
