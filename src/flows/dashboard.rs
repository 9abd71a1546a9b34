//! Dashboard data
//!
//! Weekly and monthly reports load together when the page opens. The per-day
//! log is fetched when a date is picked and kept, so picking the same date
//! again does not hit the backend.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::client::{ApiResult, FitwellApi};
use crate::models::{DailyLog, Report, ReportPeriod, UserId};

/// Both reports; each succeeds or fails on its own
#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    pub weekly: ApiResult<Report>,
    pub monthly: ApiResult<Report>,
}

impl Reports {
    pub fn get(&self, period: ReportPeriod) -> &ApiResult<Report> {
        match period {
            ReportPeriod::Weekly => &self.weekly,
            ReportPeriod::Monthly => &self.monthly,
        }
    }
}

/// Fetch the weekly and monthly reports concurrently
pub async fn load_reports<A>(api: &A, user_id: &UserId) -> Reports
where
    A: FitwellApi + ?Sized,
{
    let (weekly, monthly) = futures_util::join!(
        api.report(user_id, ReportPeriod::Weekly),
        api.report(user_id, ReportPeriod::Monthly),
    );

    for (period, result) in [(ReportPeriod::Weekly, &weekly), (ReportPeriod::Monthly, &monthly)] {
        if let Err(e) = result {
            tracing::warn!(user_id = %user_id, %period, "Report fetch failed: {}", e);
        }
    }

    Reports { weekly, monthly }
}

/// Load state of one day's log
#[derive(Debug, Clone, PartialEq)]
pub enum DayState {
    Loading,
    Loaded(DailyLog),
    Failed(String),
}

/// Per-day logs picked on the dashboard.
///
/// The browser drives it in three steps (`select`, fetch, `finish`) so the
/// state can live in a signal while the request is in flight. Everything else
/// uses [`DashboardState::select_date`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    selected: Option<NaiveDate>,
    days: HashMap<NaiveDate, DayState>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<NaiveDate> {
        self.selected
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayState> {
        self.days.get(&date)
    }

    /// State of the selected day
    pub fn current(&self) -> Option<&DayState> {
        self.selected.and_then(|date| self.days.get(&date))
    }

    /// Mark `date` selected. Returns true when the caller must fetch it.
    ///
    /// A day that is loaded or already loading is not fetched again. A failed
    /// day is retried.
    pub fn select(&mut self, date: NaiveDate) -> bool {
        self.selected = Some(date);
        match self.days.get(&date) {
            Some(DayState::Loaded(_)) | Some(DayState::Loading) => false,
            Some(DayState::Failed(_)) | None => {
                self.days.insert(date, DayState::Loading);
                true
            }
        }
    }

    /// Record the result of a fetch started by [`select`](Self::select)
    pub fn finish(&mut self, date: NaiveDate, result: ApiResult<DailyLog>) {
        let state = match result {
            Ok(log) => DayState::Loaded(log),
            Err(e) => {
                tracing::warn!(%date, "Daily log fetch failed: {}", e);
                DayState::Failed(e.to_string())
            }
        };
        self.days.insert(date, state);
    }

    /// Select a date and fetch its log if needed
    pub async fn select_date<A>(&mut self, api: &A, user_id: &UserId, date: NaiveDate) -> &DayState
    where
        A: FitwellApi + ?Sized,
    {
        if self.select(date) {
            tracing::debug!(user_id = %user_id, %date, "Fetching daily log");
            let result = api.daily_log(user_id, date).await;
            self.finish(date, result);
        }
        self.days.entry(date).or_insert(DayState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{Call, MockApi};
    use crate::client::ApiError;
    use crate::models::MealLog;

    fn report(days: usize) -> Report {
        Report {
            dates: (1..=days).map(|d| format!("2024-05-{:02}", d)).collect(),
            calories: vec![1800.0; days],
            exercise: vec![30.0; days],
        }
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[tokio::test]
    async fn test_reports_are_independent() {
        let api = MockApi {
            weekly: Some(Ok(report(7))),
            monthly: Some(Err(ApiError::status(500, "boom"))),
            ..Default::default()
        };
        let user = UserId::new("9");

        let reports = load_reports(&api, &user).await;

        assert_eq!(reports.get(ReportPeriod::Weekly).as_ref().unwrap().dates.len(), 7);
        assert!(reports.monthly.is_err());
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls.contains(&Call::Report("9".into(), ReportPeriod::Weekly)));
        assert!(calls.contains(&Call::Report("9".into(), ReportPeriod::Monthly)));
    }

    #[tokio::test]
    async fn test_selecting_a_date_fetches_exactly_once() {
        let log = DailyLog {
            meal_logs: vec![MealLog { food_name: "Kimbap".into(), calories: 420.0 }],
            exercise_logs: vec![],
        };
        let api = MockApi {
            daily: Some(Ok(log.clone())),
            ..Default::default()
        };
        let user = UserId::new("9");
        let mut state = DashboardState::new();

        let day = state.select_date(&api, &user, date(3)).await;
        assert_eq!(day, &DayState::Loaded(log));
        assert_eq!(api.calls(), vec![Call::DailyLog("9".into(), date(3))]);

        state.select_date(&api, &user, date(3)).await;
        assert_eq!(api.calls().len(), 1);

        state.select_date(&api, &user, date(4)).await;
        assert_eq!(api.calls().len(), 2);
        assert_eq!(state.selected(), Some(date(4)));
    }

    #[tokio::test]
    async fn test_failed_day_is_retried() {
        let api = MockApi {
            daily: Some(Err(ApiError::Timeout)),
            ..Default::default()
        };
        let user = UserId::new("9");
        let mut state = DashboardState::new();

        let day = state.select_date(&api, &user, date(1)).await;
        assert!(matches!(day, DayState::Failed(_)));

        state.select_date(&api, &user, date(1)).await;
        assert_eq!(api.calls().len(), 2);
    }

    #[test]
    fn test_select_while_loading_does_not_refetch() {
        let mut state = DashboardState::new();

        assert!(state.select(date(2)));
        assert!(!state.select(date(2)));
        assert_eq!(state.current(), Some(&DayState::Loading));

        state.finish(date(2), Ok(DailyLog::default()));
        assert!(!state.select(date(2)));
        assert_eq!(state.current(), Some(&DayState::Loaded(DailyLog::default())));
    }
}
