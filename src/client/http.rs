//! Native HTTP client for the FitWell API

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::{Duration, Instant};

use super::endpoints::{BaseUrls, Endpoint, Method};
use super::{error_message, feedback_text, ApiError, ApiResult, FitwellApi};
use crate::models::{
    Credentials, DailyLog, DietEntry, ExerciseEntry, Feedback, FeedbackRequest, MetricsUpdate,
    OAuthCodeRequest, OAuthExchange, RegistrationProfile, Report, ReportPeriod, UserId,
};

/// Header carrying a per-request id for correlating backend logs
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// reqwest-backed [`FitwellApi`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    bases: BaseUrls,
}

impl HttpClient {
    pub fn new(bases: BaseUrls, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, bases })
    }

    /// Build from the `[api]` section of the config file
    pub fn from_config(config: &crate::config::ApiConfig) -> ApiResult<Self> {
        let bases = BaseUrls::new(&config.base_url).with_oauth(config.oauth_base());
        Self::new(bases, Duration::from_secs(config.request_timeout_secs))
    }

    pub fn bases(&self) -> &BaseUrls {
        &self.bases
    }

    fn request(&self, endpoint: &Endpoint<'_>) -> RequestBuilder {
        let method = match endpoint.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };

        self.client
            .request(method, self.bases.url(endpoint))
            .header(REQUEST_ID_HEADER, uuid::Uuid::new_v4().to_string())
    }

    /// Send and log; the status is not checked here
    async fn send(&self, endpoint: &Endpoint<'_>, builder: RequestBuilder) -> ApiResult<Response> {
        let started = Instant::now();

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %endpoint.method(),
                path = %endpoint.path(),
                error = %e,
                "API request failed"
            );
            ApiError::from(e)
        })?;

        tracing::debug!(
            method = %endpoint.method(),
            path = %endpoint.path(),
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API request completed"
        );

        Ok(response)
    }

    /// Send and require a 2xx status
    async fn send_ok(&self, endpoint: &Endpoint<'_>, builder: RequestBuilder) -> ApiResult<Response> {
        let response = self.send(endpoint, builder).await?;
        ensure_success(response).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> ApiResult<T> {
        let response = self.send_ok(&endpoint, self.request(&endpoint)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::status(status.as_u16(), error_message(&body)))
}

#[async_trait(?Send)]
impl FitwellApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> ApiResult<serde_json::Value> {
        let endpoint = Endpoint::Login;
        let response = self
            .send_ok(&endpoint, self.request(&endpoint).json(credentials))
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn register(&self, profile: &RegistrationProfile) -> ApiResult<()> {
        let endpoint = Endpoint::Register;
        self.send_ok(&endpoint, self.request(&endpoint).json(profile))
            .await?;
        Ok(())
    }

    async fn exchange_oauth_code(&self, code: &str) -> ApiResult<OAuthExchange> {
        let endpoint = Endpoint::OAuthLogin;
        let body = OAuthCodeRequest {
            code: code.to_string(),
        };
        let response = self.send(&endpoint, self.request(&endpoint).json(&body)).await?;

        match response.status() {
            StatusCode::OK => {
                let text = response.text().await?;
                Ok(OAuthExchange::Existing(serde_json::from_str(&text)?))
            }
            StatusCode::CREATED => {
                let text = response.text().await?;
                Ok(OAuthExchange::NewUser(serde_json::from_str(&text)?))
            }
            status => {
                let text = response.text().await.unwrap_or_default();
                Err(ApiError::status(status.as_u16(), error_message(&text)))
            }
        }
    }

    async fn add_diet(&self, user_id: &UserId, entry: &DietEntry) -> ApiResult<()> {
        let endpoint = Endpoint::Diet { user_id };
        self.send_ok(&endpoint, self.request(&endpoint).json(entry))
            .await?;
        Ok(())
    }

    async fn add_exercise(&self, user_id: &UserId, entry: &ExerciseEntry) -> ApiResult<()> {
        let endpoint = Endpoint::Exercise { user_id };
        self.send_ok(&endpoint, self.request(&endpoint).json(entry))
            .await?;
        Ok(())
    }

    async fn update_metrics(&self, user_id: &UserId, update: &MetricsUpdate) -> ApiResult<()> {
        let endpoint = Endpoint::UpdateMetrics { user_id };
        self.send_ok(&endpoint, self.request(&endpoint).json(update))
            .await?;
        Ok(())
    }

    async fn report(&self, user_id: &UserId, period: ReportPeriod) -> ApiResult<Report> {
        self.get_json(Endpoint::Report { user_id, period }).await
    }

    async fn daily_log(&self, user_id: &UserId, date: NaiveDate) -> ApiResult<DailyLog> {
        self.get_json(Endpoint::DailyLog { user_id, date }).await
    }

    async fn ask_feedback(&self, request: &FeedbackRequest) -> ApiResult<String> {
        let endpoint = Endpoint::AskFeedback;
        let response = self
            .send_ok(&endpoint, self.request(&endpoint).json(request))
            .await?;
        Ok(feedback_text(&response.text().await?))
    }

    async fn generate_feedback(&self, user_id: &UserId) -> ApiResult<String> {
        let endpoint = Endpoint::GenerateFeedback { user_id };
        let response = self.send_ok(&endpoint, self.request(&endpoint)).await?;
        Ok(feedback_text(&response.text().await?))
    }

    async fn feedback_history(&self, user_id: &UserId) -> ApiResult<Vec<Feedback>> {
        self.get_json(Endpoint::FeedbackHistory { user_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::{get, post, put},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn login(Json(body): Json<Value>) -> impl IntoResponse {
        if body["password"] == "pw" {
            (StatusCode::OK, Json(json!({"id": 7, "name": "Kim", "email": body["email"]})))
                .into_response()
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid credentials"})))
                .into_response()
        }
    }

    async fn oauth(Json(body): Json<Value>) -> impl IntoResponse {
        match body["code"].as_str() {
            Some("known") => (StatusCode::OK, Json(json!({"id": 3, "name": "Lee"}))).into_response(),
            Some("new") => {
                (StatusCode::CREATED, Json(json!({"email": "new@kakao.com", "nickname": "newbie"})))
                    .into_response()
            }
            _ => (StatusCode::BAD_GATEWAY, "provider rejected code").into_response(),
        }
    }

    async fn diet(Query(q): Query<HashMap<String, String>>, headers: HeaderMap) -> StatusCode {
        if q.get("userId").map(String::as_str) == Some("7") && headers.contains_key(REQUEST_ID_HEADER) {
            StatusCode::CREATED
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    async fn update_metrics(Path(id): Path<String>, Json(body): Json<Value>) -> StatusCode {
        if id == "7" && body["skeletalMuscleMass"] == 30.5 {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::BAD_REQUEST
        }
    }

    async fn weekly() -> Json<Value> {
        Json(json!({"dates": ["05-01", "05-02"], "calories": [1900, 2100], "exercise": [200, 350]}))
    }

    async fn daily(Query(q): Query<HashMap<String, String>>) -> Json<Value> {
        let food = format!("meal on {}", q.get("date").cloned().unwrap_or_default());
        Json(json!({"mealLogs": [{"foodName": food, "calories": 500}], "exerciseLogs": []}))
    }

    async fn generate() -> &'static str {
        "Keep up the good work."
    }

    async fn ask(Json(body): Json<Value>) -> Json<Value> {
        Json(json!({"feedback": format!("About '{}': rest more.", body["prompt"].as_str().unwrap_or(""))}))
    }

    async fn history() -> Json<Value> {
        Json(json!([{"id": 1, "content": "Hydrate.", "createdAt": "2024-05-01T10:00:00Z"}]))
    }

    async fn spawn_backend() -> HttpClient {
        let app = Router::new()
            .route("/api/users/login", post(login))
            .route("/oauth/kakao/login", post(oauth))
            .route("/api/diet", post(diet))
            .route("/api/users/:id/updateMetrics", put(update_metrics))
            .route("/api/reports/weekly", get(weekly))
            .route("/api/diet-exercise", get(daily))
            .route("/api/feedback", get(generate).post(ask))
            .route("/api/feedback/history", get(history));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        HttpClient::new(BaseUrls::new(format!("http://{}", addr)), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_and_rejection() {
        let client = spawn_backend().await;

        let ok = client
            .login(&Credentials {
                email: "kim@example.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(ok["id"], 7);

        let err = client
            .login(&Credentials {
                email: "kim@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::status(401, "Invalid credentials"));
    }

    #[tokio::test]
    async fn test_oauth_exchange_statuses() {
        let client = spawn_backend().await;

        match client.exchange_oauth_code("known").await.unwrap() {
            OAuthExchange::Existing(user) => assert_eq!(user["name"], "Lee"),
            other => panic!("expected existing user, got {:?}", other),
        }

        match client.exchange_oauth_code("new").await.unwrap() {
            OAuthExchange::NewUser(profile) => assert_eq!(profile["nickname"], "newbie"),
            other => panic!("expected new user, got {:?}", other),
        }

        let err = client.exchange_oauth_code("bogus").await.unwrap_err();
        assert_eq!(err.status_code(), Some(502));
    }

    #[tokio::test]
    async fn test_entries_and_metrics() {
        let client = spawn_backend().await;
        let id = UserId::new("7");

        client
            .add_diet(
                &id,
                &DietEntry {
                    food_name: "Rice".into(),
                    calories: 300,
                },
            )
            .await
            .unwrap();

        client
            .update_metrics(
                &id,
                &MetricsUpdate {
                    weight: None,
                    skeletal_muscle_mass: Some(30.5),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_reports_and_daily_log() {
        let client = spawn_backend().await;
        let id = UserId::new("7");

        let report = client.report(&id, ReportPeriod::Weekly).await.unwrap();
        assert_eq!(report.summary().total_calories, 4000.0);

        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let log = client.daily_log(&id, date).await.unwrap();
        assert_eq!(log.meal_logs[0].food_name, "meal on 2024-05-02");

        // No monthly route on the mock backend
        let err = client.report(&id, ReportPeriod::Monthly).await.unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }

    #[tokio::test]
    async fn test_feedback_calls() {
        let client = spawn_backend().await;
        let id = UserId::new("7");

        assert_eq!(client.generate_feedback(&id).await.unwrap(), "Keep up the good work.");

        let answer = client
            .ask_feedback(&FeedbackRequest {
                prompt: "sleep".into(),
                user_id: Some("7".into()),
            })
            .await
            .unwrap();
        assert_eq!(answer, "About 'sleep': rest more.");

        let history = client.feedback_history(&id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "Hydrate.");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop to get a port nothing listens on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            HttpClient::new(BaseUrls::new(format!("http://{}", addr)), Duration::from_secs(2)).unwrap();
        let err = client.generate_feedback(&UserId::new("1")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "got {:?}", err);
    }
}
