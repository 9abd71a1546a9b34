//! Recording API double for flow tests

use async_trait::async_trait;
use chrono::NaiveDate;
use std::cell::RefCell;

use super::{ApiError, ApiResult, FitwellApi};
use crate::models::{
    Credentials, DailyLog, DietEntry, ExerciseEntry, Feedback, FeedbackRequest, MetricsUpdate,
    OAuthExchange, RegistrationProfile, Report, ReportPeriod, UserId,
};

/// One recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Register(String),
    ExchangeCode(String),
    AddDiet(String, DietEntry),
    AddExercise(String, ExerciseEntry),
    UpdateMetrics(String, MetricsUpdate),
    Report(String, ReportPeriod),
    DailyLog(String, NaiveDate),
    AskFeedback(String),
    GenerateFeedback(String),
    FeedbackHistory(String),
}

/// Canned responses; `None` means the call fails with a 500
#[derive(Default)]
pub struct MockApi {
    pub calls: RefCell<Vec<Call>>,
    pub login: Option<ApiResult<serde_json::Value>>,
    pub register: Option<ApiResult<()>>,
    pub oauth: Option<ApiResult<OAuthExchange>>,
    pub diet: Option<ApiResult<()>>,
    pub exercise: Option<ApiResult<()>>,
    pub metrics: Option<ApiResult<()>>,
    pub weekly: Option<ApiResult<Report>>,
    pub monthly: Option<ApiResult<Report>>,
    pub daily: Option<ApiResult<DailyLog>>,
    pub feedback: Option<ApiResult<String>>,
    pub history: Option<ApiResult<Vec<Feedback>>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

fn canned<T: Clone>(value: &Option<ApiResult<T>>) -> ApiResult<T> {
    value
        .clone()
        .unwrap_or_else(|| Err(ApiError::status(500, "no canned response")))
}

#[async_trait(?Send)]
impl FitwellApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<serde_json::Value> {
        self.record(Call::Login(credentials.email.clone()));
        canned(&self.login)
    }

    async fn register(&self, profile: &RegistrationProfile) -> ApiResult<()> {
        self.record(Call::Register(profile.email.clone()));
        canned(&self.register)
    }

    async fn exchange_oauth_code(&self, code: &str) -> ApiResult<OAuthExchange> {
        self.record(Call::ExchangeCode(code.to_string()));
        canned(&self.oauth)
    }

    async fn add_diet(&self, user_id: &UserId, entry: &DietEntry) -> ApiResult<()> {
        self.record(Call::AddDiet(user_id.to_string(), entry.clone()));
        canned(&self.diet)
    }

    async fn add_exercise(&self, user_id: &UserId, entry: &ExerciseEntry) -> ApiResult<()> {
        self.record(Call::AddExercise(user_id.to_string(), entry.clone()));
        canned(&self.exercise)
    }

    async fn update_metrics(&self, user_id: &UserId, update: &MetricsUpdate) -> ApiResult<()> {
        self.record(Call::UpdateMetrics(user_id.to_string(), update.clone()));
        canned(&self.metrics)
    }

    async fn report(&self, user_id: &UserId, period: ReportPeriod) -> ApiResult<Report> {
        self.record(Call::Report(user_id.to_string(), period));
        match period {
            ReportPeriod::Weekly => canned(&self.weekly),
            ReportPeriod::Monthly => canned(&self.monthly),
        }
    }

    async fn daily_log(&self, user_id: &UserId, date: NaiveDate) -> ApiResult<DailyLog> {
        self.record(Call::DailyLog(user_id.to_string(), date));
        canned(&self.daily)
    }

    async fn ask_feedback(&self, request: &FeedbackRequest) -> ApiResult<String> {
        self.record(Call::AskFeedback(request.prompt.clone()));
        canned(&self.feedback)
    }

    async fn generate_feedback(&self, user_id: &UserId) -> ApiResult<String> {
        self.record(Call::GenerateFeedback(user_id.to_string()));
        canned(&self.feedback)
    }

    async fn feedback_history(&self, user_id: &UserId) -> ApiResult<Vec<Feedback>> {
        self.record(Call::FeedbackHistory(user_id.to_string()));
        canned(&self.history)
    }
}
