//! Free-text search and date-range filtering over in-memory collections.
//!
//! All functions are pure and order-preserving. When both filters apply,
//! search runs first and the date range second ([`filter_records`]).

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

use crate::plant::Plant;
use crate::quote::Quote;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Searchable records
// ---------------------------------------------------------------------------

/// Fields the search box and date filters look at.
pub trait Searchable {
    fn client_name(&self) -> &str;
    fn city(&self) -> &str;
    fn created_at(&self) -> Timestamp;
}

impl Searchable for Quote {
    fn client_name(&self) -> &str {
        &self.client_name
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

impl Searchable for Plant {
    fn client_name(&self) -> &str {
        &self.client_name
    }

    fn city(&self) -> &str {
        &self.city
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

// ---------------------------------------------------------------------------
// Text search
// ---------------------------------------------------------------------------

/// Combining diacritical marks block removed after decomposition.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

/// Lowercase and strip diacritics so that "São Paulo" matches "sao paulo".
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect()
}

/// True if `query` is empty or occurs in the client name or city,
/// ignoring case and accents.
pub fn matches_search<T: Searchable + ?Sized>(item: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = normalize(query);
    normalize(item.client_name()).contains(&needle) || normalize(item.city()).contains(&needle)
}

/// Keep the items matching `query`.
pub fn search<'a, T, I>(items: I, query: &str) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| matches_search(*item, query))
        .collect()
}

// ---------------------------------------------------------------------------
// Date range
// ---------------------------------------------------------------------------

/// Inclusive calendar-day range over `created_at`, either side optional.
///
/// Days are interpreted in UTC: `from` starts at 00:00:00.000 and `to` ends
/// at 23:59:59.999.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// First instant included by the range.
    pub fn start(&self) -> Option<Timestamp> {
        self.from.map(|day| day.and_time(NaiveTime::MIN).and_utc())
    }

    /// Last instant included by the range (millisecond precision).
    pub fn end(&self) -> Option<Timestamp> {
        self.to
            .and_then(|day| day.and_hms_milli_opt(23, 59, 59, 999))
            .map(|end| end.and_utc())
    }

    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start().map_or(true, |start| ts >= start) && self.end().map_or(true, |end| ts <= end)
    }
}

/// Keep the items whose `created_at` falls inside `range`.
pub fn apply_date_range<'a, T, I>(items: I, range: &DateRange) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .filter(|item| range.contains(item.created_at()))
        .collect()
}

/// Search filter followed by the date-range filter.
pub fn filter_records<'a, T, I>(items: I, query: &str, range: &DateRange) -> Vec<&'a T>
where
    T: Searchable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let matched = search(items, query);
    apply_date_range(matched, range)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};

    use super::*;

    struct Item {
        name: &'static str,
        city: &'static str,
        at: Timestamp,
    }

    impl Searchable for Item {
        fn client_name(&self) -> &str {
            self.name
        }

        fn city(&self) -> &str {
            self.city
        }

        fn created_at(&self) -> Timestamp {
            self.at
        }
    }

    fn item(name: &'static str, city: &'static str, at: Timestamp) -> Item {
        Item { name, city, at }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn normalize_is_case_and_accent_insensitive() {
        assert_eq!(normalize("São Paulo"), "sao paulo");
        assert_eq!(normalize("São Paulo"), normalize("sao paulo"));
        assert_eq!(normalize("sao paulo"), normalize("SAO PAULO"));
        assert_eq!(normalize("Conceição"), "conceicao");
        assert_eq!(normalize("JOÃO"), "joao");
    }

    #[test]
    fn normalize_handles_precomposed_and_decomposed_input() {
        assert_eq!(normalize("Jo\u{00e3}o"), normalize("Joa\u{0303}o"));
    }

    #[test]
    fn empty_query_matches_everything() {
        let blank = item("", "", Utc::now());
        assert!(matches_search(&blank, ""));
        let named = item("Ana", "Recife", Utc::now());
        assert!(matches_search(&named, ""));
    }

    #[test]
    fn query_matches_client_name_or_city() {
        let it = item("João Silva", "São José dos Campos", Utc::now());
        assert!(matches_search(&it, "joao"));
        assert!(matches_search(&it, "SILVA"));
        assert!(matches_search(&it, "jose dos"));
        assert!(!matches_search(&it, "curitiba"));
    }

    #[test]
    fn from_only_range_includes_boundary_and_excludes_earlier() {
        let items = [
            item("before", "", at(2024, 3, 9, 23, 59, 59)),
            item("boundary", "", at(2024, 3, 10, 0, 0, 0)),
            item("after", "", at(2024, 6, 1, 12, 0, 0)),
        ];
        let range = DateRange::new(Some(day(2024, 3, 10)), None);
        let kept: Vec<&str> = apply_date_range(&items, &range)
            .iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(kept, vec!["boundary", "after"]);
    }

    #[test]
    fn to_bound_covers_the_whole_day() {
        let end_of_day = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap()
            + TimeDelta::milliseconds(999);
        let items = [
            item("late", "", end_of_day),
            item("next", "", at(2024, 3, 11, 0, 0, 0)),
        ];
        let range = DateRange::new(None, Some(day(2024, 3, 10)));
        let kept: Vec<&str> = apply_date_range(&items, &range)
            .iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(kept, vec!["late"]);
    }

    #[test]
    fn ranges_at_the_last_representable_day_do_not_overflow() {
        let items = [item("now", "", Utc::now())];

        let until_max = DateRange::new(None, Some(NaiveDate::MAX));
        assert_eq!(
            until_max.end(),
            NaiveDate::MAX.and_hms_milli_opt(23, 59, 59, 999).map(|end| end.and_utc())
        );
        assert_eq!(apply_date_range(&items, &until_max).len(), 1);

        let from_max = DateRange::new(Some(NaiveDate::MAX), Some(NaiveDate::MAX));
        assert!(apply_date_range(&items, &from_max).is_empty());
    }

    #[test]
    fn unbounded_range_keeps_everything() {
        let items = [item("a", "", at(2000, 1, 1, 0, 0, 0)), item("b", "", Utc::now())];
        let range = DateRange::default();
        assert!(range.is_unbounded());
        assert_eq!(apply_date_range(&items, &range).len(), 2);
    }

    #[test]
    fn filter_records_applies_search_then_range() {
        let items = [
            item("Ana", "Natal", at(2024, 1, 5, 10, 0, 0)),
            item("Bruno", "Natal", at(2024, 2, 5, 10, 0, 0)),
            item("Ana Paula", "Salvador", at(2024, 2, 6, 10, 0, 0)),
        ];
        let range = DateRange::new(Some(day(2024, 2, 1)), Some(day(2024, 2, 28)));
        let kept: Vec<&str> = filter_records(&items, "ana", &range)
            .iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(kept, vec!["Ana Paula"]);
    }
}
