// Unit tests for business rules

use super::*;

fn candidate(id: u64, title: &str) -> CatalogCandidate {
    CatalogCandidate {
        id,
        title: title.to_string(),
        original_title: None,
        release_year: Some("2021".to_string()),
        vote_average: 5.0,
        vote_count: 10,
        runtime_minutes: None,
    }
}

#[test]
fn test_parse_parenthesized_year() {
    let hint = FilenameParser::default().parse("Dune (2021).mkv");
    assert_eq!(hint.year, Some(2021));
    assert_eq!(hint.raw_title_fragment, "Dune");
}

#[test]
fn test_parse_bare_year_with_dots() {
    let hint = FilenameParser::default().parse("The.Matrix.1999.1080p.BluRay.x264.mkv");
    assert_eq!(hint.year, Some(1999));
    assert_eq!(hint.raw_title_fragment, "The.Matrix");
    assert_eq!(hint.search_query(), "The Matrix");
}

#[test]
fn test_parenthesized_year_beats_earlier_bare_year() {
    let hint = FilenameParser::default().parse("2001 A Space Odyssey (1968).mkv");
    assert_eq!(hint.year, Some(1968));
    assert_eq!(hint.raw_title_fragment, "2001 A Space Odyssey");
}

#[test]
fn test_bare_year_in_title_is_taken_first() {
    // Known ambiguity: a year-like title run wins over a later release year.
    let hint = FilenameParser::default().parse("Blade Runner 2049 2017.mkv");
    assert_eq!(hint.year, Some(2049));
    assert_eq!(hint.raw_title_fragment, "Blade Runner");
}

#[test]
fn test_bare_year_leaving_empty_title_is_skipped() {
    let hint = FilenameParser::default().parse("2012.2009.mkv");
    assert_eq!(hint.year, Some(2009));
    assert_eq!(hint.raw_title_fragment, "2012");

    let hint = FilenameParser::default().parse("1917.mkv");
    assert_eq!(hint.year, None);
    assert_eq!(hint.raw_title_fragment, "1917");
}

#[test]
fn test_year_without_title_is_not_taken() {
    let hint = FilenameParser::default().parse("(2019).mkv");
    assert_eq!(hint.year, None);
    assert_eq!(hint.raw_title_fragment, "(2019)");
    assert_eq!(hint.search_query(), "(2019)");

    let hint = FilenameParser::default().parse("(2019) Parasite (2019).mkv");
    assert_eq!(hint.year, Some(2019));
    assert_eq!(hint.raw_title_fragment, "(2019) Parasite");

    let hint = FilenameParser::default().parse("[2019].mkv");
    assert_eq!(hint.year, None);
}

#[test]
fn test_digit_runs_adjacent_to_digits_are_not_years() {
    let hint = FilenameParser::default().parse("Movie 20211 12345.mkv");
    assert_eq!(hint.year, None);
    assert_eq!(hint.raw_title_fragment, "Movie 20211 12345");
}

#[test]
fn test_year_not_found_is_reported_without_error() {
    let hint = FilenameParser::default().parse("Some Movie.mkv");
    assert!(!hint.has_year());
    assert_eq!(hint.raw_title_fragment, "Some Movie");
}

#[test]
fn test_only_one_separator_is_trimmed() {
    let hint = FilenameParser::default().parse("Alien  (1979).avi");
    assert_eq!(hint.raw_title_fragment, "Alien ");

    let hint = FilenameParser::default().parse("Alien-1979.avi");
    assert_eq!(hint.raw_title_fragment, "Alien");
}

#[test]
fn test_runtime_matcher_classification() {
    assert_eq!(RuntimeMatcher::classify(118.4, 119), MatchVerdict::Match);
    assert_eq!(RuntimeMatcher::classify(118.4, 130), MatchVerdict::NotMatch);
    assert_eq!(RuntimeMatcher::classify(120.0, 122), MatchVerdict::NotMatch);
    assert_eq!(RuntimeMatcher::classify(120.5, 122), MatchVerdict::Match);
}

#[test]
fn test_runtime_matcher_compare() {
    let probe = ProbeResult::new(118.4, 1080, ScanType::Progressive).unwrap();
    let comparison = RuntimeMatcher::compare(&probe, 130);

    assert_eq!(comparison.catalog_minutes, 130);
    assert!((comparison.difference - 11.6).abs() < 1e-9);
    assert_eq!(comparison.verdict, MatchVerdict::NotMatch);
}

#[test]
fn test_first_result_ranking() {
    let candidates = vec![candidate(1, "First"), candidate(2, "Second")];
    let ranking = FirstResultRanking;

    assert_eq!(ranking.select(&candidates).map(|c| c.id), Some(1));
    assert!(ranking.select(&[]).is_none());
    assert_eq!(ranking.name(), "first-result");
}
