use invest_utils::*;

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("20.5").unwrap(), 20.5);
    assert_eq!(parse_amount(" 12,25 ").unwrap(), 12.25);
    assert_eq!(parse_amount("1 024.75").unwrap(), 1024.75);
    assert_eq!(parse_amount("12.00 €").unwrap(), 12.0);
    assert!(parse_amount("").is_err());
    assert!(parse_amount("abc").is_err());
    assert!(parse_amount("inf").is_err());
}

#[test]
fn test_euros_to_cents() {
    assert_eq!(euros_to_cents(20.5).unwrap(), 2050);
    assert_eq!(euros_to_cents(0.29).unwrap(), 29);
    assert_eq!(euros_to_cents(500.0).unwrap(), 50_000);
    assert_eq!(euros_to_cents(0.0).unwrap(), 0);
    assert!(euros_to_cents(-1.0).is_err());
    assert!(euros_to_cents(f64::NAN).is_err());
}

#[test]
fn test_parse_euros() {
    assert_eq!(parse_euros("20.5").unwrap(), 2050);
    assert_eq!(parse_euros("33.99").unwrap(), 3399);
    assert!(parse_euros("-4").is_err());
}

#[test]
fn test_parse_ratio() {
    assert!((parse_ratio("12%").unwrap() - 0.12).abs() < 1e-12);
    assert!((parse_ratio("12").unwrap() - 0.12).abs() < 1e-12);
    assert!((parse_ratio(" 4.5 % ").unwrap() - 0.045).abs() < 1e-12);
    assert!(parse_ratio("%").is_err());
}

#[test]
fn test_format_cents() {
    assert_eq!(format_cents(0), "0.00");
    assert_eq!(format_cents(5), "0.05");
    assert_eq!(format_cents(2050), "20.50");
    assert_eq!(format_cents(49_998), "499.98");
}
