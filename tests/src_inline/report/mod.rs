use super::*;

#[test]
fn test_percent_formatting() {
    assert_eq!(round1(percent_of(1, 3)), 33.3);
    assert_eq!(round1(percent_of(2, 3)), 66.7);
    assert_eq!(format_percent(percent_of(1, 3)), "33.3%");
    assert_eq!(percent_of(0, 0), 0.0);
    assert_eq!(format_probability(0.85), "0.850000");
}

#[test]
fn test_disclaimer_mentions_specialist() {
    assert!(DISCLAIMER.contains("does not replace a professional medical diagnosis"));
}

#[test]
fn test_exact_half_percent_rounds_like_display() {
    let high = percent_of(1, 16);
    assert_eq!(high, 6.25);
    assert_eq!(round1(high), 6.2);
    assert_eq!(format_percent(high), "6.2%");
    assert_eq!(round1(percent_of(3, 16)), 18.8);
}
