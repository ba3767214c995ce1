//! Query parameter types shared by the listing handlers.
//!
//! Dates arrive as `YYYY-MM-DD` strings; empty values mean "unbounded" so
//! that a cleared date picker does not turn into a 400.

use chrono::NaiveDate;
use serde::Deserialize;
use solar_core::search::DateRange;
use solar_core::views::DashboardFilters;

use crate::error::{AppError, AppResult};

/// `?search=&from=&to=`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl SearchParams {
    pub fn date_range(&self) -> AppResult<DateRange> {
        Ok(DateRange::new(
            parse_day("from", self.from.as_deref())?,
            parse_day("to", self.to.as_deref())?,
        ))
    }
}

/// Which partition of the plants collection to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantViewKind {
    #[default]
    Active,
    Completed,
    All,
}

/// `?view=active|completed|all&search=&from=&to=`
#[derive(Debug, Default, Deserialize)]
pub struct PlantListParams {
    #[serde(default)]
    pub view: PlantViewKind,
    #[serde(flatten)]
    pub filter: SearchParams,
}

/// `?search=&quoteFrom=&quoteTo=&completedFrom=&completedTo=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardParams {
    #[serde(default)]
    pub search: String,
    pub quote_from: Option<String>,
    pub quote_to: Option<String>,
    pub completed_from: Option<String>,
    pub completed_to: Option<String>,
}

impl DashboardParams {
    pub fn into_filters(self) -> AppResult<DashboardFilters> {
        Ok(DashboardFilters {
            quote_from: parse_day("quoteFrom", self.quote_from.as_deref())?,
            quote_to: parse_day("quoteTo", self.quote_to.as_deref())?,
            completed_from: parse_day("completedFrom", self.completed_from.as_deref())?,
            completed_to: parse_day("completedTo", self.completed_to.as_deref())?,
            search: self.search,
        })
    }
}

fn parse_day(field: &str, value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("{field} must be a date (YYYY-MM-DD)"))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn empty_dates_are_unbounded() {
        let params = SearchParams {
            from: Some(String::new()),
            to: None,
            ..Default::default()
        };
        assert!(params.date_range().unwrap().is_unbounded());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let params = SearchParams {
            from: Some("15/03/2024".to_string()),
            ..Default::default()
        };
        assert_matches!(params.date_range(), Err(AppError::BadRequest(_)));
    }

    #[test]
    fn far_future_bound_filters_without_panicking() {
        let params = SearchParams {
            to: Some("+262142-12-31".to_string()),
            ..Default::default()
        };
        let range = params.date_range().unwrap();
        assert_eq!(range.to, Some(NaiveDate::MAX));
        assert!(range.contains(chrono::Utc::now()));
    }

    #[test]
    fn dashboard_params_convert_to_filters() {
        let filters = DashboardParams {
            search: "sao".to_string(),
            quote_from: Some("2024-03-01".to_string()),
            completed_to: Some("2024-03-31".to_string()),
            ..Default::default()
        }
        .into_filters()
        .unwrap();
        assert_eq!(filters.search, "sao");
        assert_eq!(filters.quote_from, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filters.quote_to, None);
        assert_eq!(filters.completed_to, NaiveDate::from_ymd_opt(2024, 3, 31));
    }
}
