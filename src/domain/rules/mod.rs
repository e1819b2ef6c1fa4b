// Domain rules - Filename heuristics, runtime matching and candidate ranking

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::*;

static PARENTHESIZED_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9]{4})\)").expect("parenthesized year regex should compile"));
static DIGIT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+").expect("digit run regex should compile"));

/// Characters that may sit between the title and the year token
const TITLE_SEPARATORS: [char; 4] = [' ', '.', '_', '-'];

/// How a release year is picked when a filename holds several year-like tokens.
///
/// A year-like run inside the title itself cannot be told apart from the
/// release year; this heuristic only decides precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearHeuristic {
    /// Leftmost `(YYYY)` wins. Otherwise the leftmost bare run of exactly four
    /// digits that leaves a non-empty title in front of it.
    #[default]
    PreferParenthesized,
}

/// A year token located in a file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearToken {
    start: usize,
    year: u16,
}

/// Extracts a release year and title fragment from a loosely structured filename
#[derive(Debug, Clone, Default)]
pub struct FilenameParser {
    heuristic: YearHeuristic,
}

impl FilenameParser {
    pub fn new(heuristic: YearHeuristic) -> Self {
        Self { heuristic }
    }

    pub fn heuristic(&self) -> YearHeuristic {
        self.heuristic
    }

    /// Parse a file name (with or without extension).
    ///
    /// Never fails: a missing year yields `year: None` and the file stem as
    /// the title fragment.
    pub fn parse(&self, filename: &str) -> FilenameHint {
        match self.locate_year(filename) {
            Some(token) => FilenameHint::new(title_before(filename, token.start), Some(token.year)),
            None => {
                let stem = Path::new(filename)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_else(|| filename.to_string());
                FilenameHint::new(stem, None)
            }
        }
    }

    fn locate_year(&self, name: &str) -> Option<YearToken> {
        match self.heuristic {
            YearHeuristic::PreferParenthesized => {
                let parenthesized = PARENTHESIZED_YEAR
                    .captures_iter(name)
                    .filter_map(|captures| {
                        let whole = captures.get(0)?;
                        let year = captures.get(1)?.as_str().parse().ok()?;
                        Some(YearToken {
                            start: whole.start(),
                            year,
                        })
                    })
                    .find(|token| names_a_title(title_before(name, token.start)));
                if parenthesized.is_some() {
                    return parenthesized;
                }

                DIGIT_RUN
                    .find_iter(name)
                    .filter(|run| run.as_str().len() == 4)
                    .filter(|run| names_a_title(title_before(name, run.start())))
                    .find_map(|run| {
                        run.as_str().parse().ok().map(|year| YearToken {
                            start: run.start(),
                            year,
                        })
                    })
            }
        }
    }
}

/// A year token is only taken when something title-like precedes it
fn names_a_title(fragment: &str) -> bool {
    fragment.chars().any(char::is_alphanumeric)
}

/// Every character strictly before `start`, minus one trailing separator
fn title_before(name: &str, start: usize) -> &str {
    let title = &name[..start];
    match title.chars().last() {
        Some(last) if TITLE_SEPARATORS.contains(&last) => &title[..title.len() - last.len_utf8()],
        _ => title,
    }
}

/// Runtime difference below which a candidate counts as a match, in minutes
pub const RUNTIME_TOLERANCE_MINUTES: f64 = 2.0;

/// Compares probed runtime against catalog runtime.
///
/// The verdict is advisory: a `NotMatch` is reported, it never blocks renaming.
pub struct RuntimeMatcher;

impl RuntimeMatcher {
    /// `Match` when `|catalog - probed|` is strictly below the tolerance
    pub fn classify(probed_minutes: f64, catalog_minutes: u32) -> MatchVerdict {
        if runtime_difference(probed_minutes, catalog_minutes) < RUNTIME_TOLERANCE_MINUTES {
            MatchVerdict::Match
        } else {
            MatchVerdict::NotMatch
        }
    }

    pub fn compare(probe: &ProbeResult, catalog_minutes: u32) -> RuntimeComparison {
        RuntimeComparison {
            probed_minutes: probe.duration_minutes,
            catalog_minutes,
            difference: runtime_difference(probe.duration_minutes, catalog_minutes),
            verdict: Self::classify(probe.duration_minutes, catalog_minutes),
        }
    }
}

fn runtime_difference(probed_minutes: f64, catalog_minutes: u32) -> f64 {
    (catalog_minutes as f64 - probed_minutes).abs()
}

/// Picks which search result becomes the candidate.
pub trait RankingStrategy: Send + Sync {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Select one candidate, or `None` for an empty list
    fn select<'a>(&self, candidates: &'a [CatalogCandidate]) -> Option<&'a CatalogCandidate>;
}

/// Takes the catalog's first result as-is.
///
/// This is a simplifying policy, not a ranking: no vote count, vote average or
/// title similarity is considered.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstResultRanking;

impl RankingStrategy for FirstResultRanking {
    fn name(&self) -> &'static str {
        "first-result"
    }

    fn select<'a>(&self, candidates: &'a [CatalogCandidate]) -> Option<&'a CatalogCandidate> {
        candidates.first()
    }
}

#[cfg(test)]
mod tests;
