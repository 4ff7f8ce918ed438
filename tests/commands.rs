#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use hours::commands::report::default_start;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_report_range() {
        let end = date(2024, 1, 10);
        assert_eq!(default_start(end, 7).unwrap(), date(2024, 1, 4));
        assert_eq!(default_start(end, 1).unwrap(), end);
        // Zero is read as a single day.
        assert_eq!(default_start(end, 0).unwrap(), end);
    }

    #[test]
    fn test_huge_default_days_is_an_error() {
        let end = date(2024, 1, 10);
        let err = default_start(end, u32::MAX).unwrap_err();
        assert!(err.to_string().contains(&u32::MAX.to_string()));

        // Representable by chrono, but before year 0000.
        assert!(default_start(end, 1_000_000).is_err());
        // Year 0000 is a leap year, so 367 days back from 0001-01-01 is the first storable day.
        assert_eq!(default_start(date(1, 1, 1), 367).unwrap(), date(0, 1, 1));
        assert!(default_start(date(1, 1, 1), 368).is_err());
    }
}
