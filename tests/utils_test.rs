use chrono::{Duration, NaiveDate};
use lastfm_timelapse::errors::TimelapseError;
use lastfm_timelapse::types::{ChartType, RunConfig};
use lastfm_timelapse::utils::*;

// Helper function to create a run
fn create_test_run(username: &str, start: NaiveDate, end: NaiveDate) -> RunConfig {
    RunConfig {
        username: username.to_string(),
        start_date: start,
        end_date: end,
        chart_type: ChartType::Albums,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_truncate_name_keeps_short_names() {
    assert_eq!(truncate_name("Radiohead", 30), "Radiohead");

    // Exactly at the limit stays untouched
    let exact = "a".repeat(30);
    assert_eq!(truncate_name(&exact, 30), exact);
}

#[test]
fn test_truncate_name_cuts_at_word_boundary() {
    let name = "The Smashing Pumpkins Greatest Hits";
    let short = truncate_name(name, 30);

    assert_eq!(short, "The Smashing Pumpkins...");
    assert!(short.ends_with("..."));

    // Every remaining word is a whole word of the input
    let kept = short.trim_end_matches("...");
    for word in kept.split(' ') {
        assert!(name.split(' ').any(|w| w == word));
    }
}

#[test]
fn test_truncate_name_counts_characters_not_bytes() {
    let name = "Björk Guðmundsdóttir & Tríó Guðmundar Ingólfssonar";
    let short = truncate_name(name, 30);
    assert_eq!(short, "Björk Guðmundsdóttir & Tríó...");
}

#[test]
fn test_truncate_name_without_spaces() {
    let name = "x".repeat(45);
    assert_eq!(truncate_name(&name, 30), "...");
}

#[test]
fn test_parse_date() {
    assert_eq!(parse_date("2024-02-29").unwrap(), date(2024, 2, 29));
    assert_eq!(parse_date(" 2024-01-05 ").unwrap(), date(2024, 1, 5));

    match parse_date("05/01/2024") {
        Err(TimelapseError::InvalidDate { input, .. }) => assert_eq!(input, "05/01/2024"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_date_window_ends_at_midnight_of_end_date() {
    // A single day collapses to one instant
    let (from, to) = date_window(date(2024, 6, 1), date(2024, 6, 1));
    assert_eq!(from, to);

    // The end date itself is not covered: six days, allowing for a daylight saving shift
    let (from_week, to_week) = date_window(date(2024, 6, 1), date(2024, 6, 7));
    assert_eq!(from_week, from);
    assert!((to_week - from_week - 6 * 86_400).abs() <= 3_600);

    let (_, to_next) = date_window(date(2024, 6, 1), date(2024, 6, 8));
    assert!((to_next - to_week - 86_400).abs() <= 3_600);
}

#[test]
fn test_validate_run_accepts_valid_range() {
    let today = date(2024, 6, 30);
    let run = create_test_run("rj", date(2024, 6, 1), today);
    assert!(validate_run(&run, today).is_ok());

    // A single day is a valid range
    let run = create_test_run("rj", today, today);
    assert!(validate_run(&run, today).is_ok());
}

#[test]
fn test_validate_run_rejects_empty_username() {
    let today = date(2024, 6, 30);
    let run = create_test_run("   ", date(2024, 6, 1), today);
    assert!(matches!(
        validate_run(&run, today),
        Err(TimelapseError::EmptyUsername)
    ));
}

#[test]
fn test_validate_run_rejects_bad_ranges() {
    let today = date(2024, 6, 30);

    let reversed = create_test_run("rj", date(2024, 6, 10), date(2024, 6, 1));
    assert!(matches!(
        validate_run(&reversed, today),
        Err(TimelapseError::InvalidDateRange { .. })
    ));

    let too_early = create_test_run("rj", date(2001, 12, 31), date(2002, 6, 1));
    assert!(matches!(
        validate_run(&too_early, today),
        Err(TimelapseError::InvalidDateRange { .. })
    ));

    let future = create_test_run("rj", date(2024, 6, 1), today + Duration::days(1));
    assert!(matches!(
        validate_run(&future, today),
        Err(TimelapseError::InvalidDateRange { .. })
    ));
}

#[test]
fn test_default_output_name_and_title() {
    let run = create_test_run("rj", date(2024, 1, 1), date(2024, 1, 31));
    assert_eq!(default_output_name(&run), "rj_albums_2024-01-01_2024-01-31.mp4");
    assert_eq!(chart_title(&run), "rj's scrobbles by albums");
}

#[test]
fn test_default_range_is_last_week() {
    let today = date(2024, 3, 5);
    let (start, end) = default_range(today);
    assert_eq!(start, date(2024, 2, 27));
    assert_eq!(end, today);
}
