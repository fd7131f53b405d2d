//! Log filter set and its mapping onto the logs API parameters

use chrono::{Duration, NaiveDate};

use super::{ExportLogsRequest, LogsQuery};

/// User restriction of the filter set.
///
/// `All` means no user filter; any username, including one spelled
/// "ALL USERS", is a `Specific` filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserFilter {
    #[default]
    All,
    Specific(String),
}

impl UserFilter {
    /// Map a dropdown value to a filter; the empty value is the "all users" option
    pub fn from_selection(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            UserFilter::All
        } else {
            UserFilter::Specific(value.to_string())
        }
    }

    /// Dropdown value for this filter
    pub fn as_selection(&self) -> &str {
        match self {
            UserFilter::All => "",
            UserFilter::Specific(name) => name,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            UserFilter::All => None,
            UserFilter::Specific(name) => Some(name),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub user: UserFilter,
    pub search: String,
}

impl LogFilter {
    /// Window of `days` days ending at `today`, no user or text restriction
    pub fn trailing_window(today: NaiveDate, days: i64) -> Self {
        Self {
            date_from: Some(today - Duration::days(days)),
            date_to: Some(today),
            user: UserFilter::All,
            search: String::new(),
        }
    }

    /// Both ends of the date range are set
    pub fn has_date_range(&self) -> bool {
        self.date_from.is_some() && self.date_to.is_some()
    }

    /// `date_from` is after `date_to`. Not rejected, only reported.
    pub fn is_inverted(&self) -> bool {
        matches!((self.date_from, self.date_to), (Some(from), Some(to)) if from > to)
    }

    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_string())
    }

    pub fn to_query(&self) -> LogsQuery {
        LogsQuery {
            date_from: self.date_from,
            date_to: self.date_to,
            username: self.user.username().map(str::to_string),
            search: self.search_term(),
        }
    }

    pub fn to_export_request(&self) -> ExportLogsRequest {
        ExportLogsRequest {
            date_from: self.date_from,
            date_to: self.date_to,
            username: self.user.username().map(str::to_string),
            search: self.search_term(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window() {
        let filter = LogFilter::trailing_window(date(2024, 3, 31), 30);
        assert_eq!(filter.date_from, Some(date(2024, 3, 1)));
        assert_eq!(filter.date_to, Some(date(2024, 3, 31)));
        assert_eq!(filter.user, UserFilter::All);
        assert!(filter.search.is_empty());
        assert!(filter.has_date_range());
    }

    #[test]
    fn test_all_users_and_empty_search_are_omitted() {
        let mut filter = LogFilter::trailing_window(date(2024, 1, 31), 30);
        filter.search = "   ".to_string();
        let query = filter.to_query();
        assert_eq!(query.username, None);
        assert_eq!(query.search, None);

        let json = serde_json::to_value(&query).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["date_from", "date_to"]);
    }

    #[test]
    fn test_specific_user_and_search_are_sent() {
        let filter = LogFilter {
            date_from: Some(date(2024, 1, 1)),
            date_to: Some(date(2024, 1, 31)),
            user: UserFilter::Specific("jdoe".to_string()),
            search: " projector ".to_string(),
        };
        let query = filter.to_query();
        assert_eq!(query.username.as_deref(), Some("jdoe"));
        assert_eq!(query.search.as_deref(), Some("projector"));

        let export = filter.to_export_request();
        assert_eq!(export.username.as_deref(), Some("jdoe"));
        assert_eq!(export.date_to, Some(date(2024, 1, 31)));
    }

    #[test]
    fn test_user_named_all_users_is_a_real_filter() {
        let user = UserFilter::from_selection("ALL USERS");
        assert_eq!(user.username(), Some("ALL USERS"));
        assert_eq!(UserFilter::from_selection(""), UserFilter::All);
        assert_eq!(UserFilter::All.as_selection(), "");
    }

    #[test]
    fn test_inverted_range_is_reported() {
        let filter = LogFilter {
            date_from: Some(date(2024, 2, 1)),
            date_to: Some(date(2024, 1, 1)),
            ..Default::default()
        };
        assert!(filter.is_inverted());
        assert!(!LogFilter::default().is_inverted());
        assert!(!LogFilter::default().has_date_range());
    }
}
