use super::*;
use time::Month;

#[test]
fn iso_date_zero_pads() {
    let date = Date::from_calendar_date(2024, Month::March, 5).unwrap();
    assert_eq!(iso_date(date), "2024-03-05");
}

#[test]
fn now_is_utc_rfc3339() {
    let now = now_rfc3339();
    let today = iso_date(today());
    assert!(now.starts_with(&today[..4]), "{now}");
    assert_eq!(now.as_bytes().get(10), Some(&b'T'), "{now}");
    assert!(now.ends_with('Z'), "{now}");
}
