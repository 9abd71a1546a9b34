//! HTTP API Client
//!
//! [`FitwellApi`] over `gloo-net`, plus the base URL settings.

use async_trait::async_trait;
use chrono::NaiveDate;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};

use fitwell::client::{error_message, feedback_text, Method};
use fitwell::models::{
    Credentials, DailyLog, DietEntry, ExerciseEntry, Feedback, FeedbackRequest, MetricsUpdate,
    OAuthCodeRequest, OAuthExchange, RegistrationProfile, Report, ReportPeriod, UserId,
};
use fitwell::{ApiError, ApiResult, BaseUrls, ClientConfig, Endpoint, FitwellApi, OAuthProvider};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

/// Local storage key overriding the API base URL
const API_URL_KEY: &str = "fitwell_api_url";

/// Settings served next to the bundle by `fitwell-serve`
pub const CLIENT_CONFIG_PATH: &str = "/client-config.json";

/// Get the API base URL override from local storage, if any
pub fn get_api_base() -> Option<String> {
    let window = web_sys::window()?;
    let storage = window.local_storage().ok()??;
    let url = storage.get_item(API_URL_KEY).ok()??;
    let url = url.trim().trim_end_matches('/').to_string();
    (!url.is_empty()).then_some(url)
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url);
        }
    }
}

/// Settings used when `client-config.json` is unavailable (e.g. `trunk serve`)
pub fn default_client_config() -> ClientConfig {
    ClientConfig {
        api_base_url: DEFAULT_API_BASE.to_string(),
        oauth_base_url: None,
        oauth: OAuthProvider::default(),
    }
}

/// Fetch the public client settings from the host
pub async fn fetch_client_config() -> Result<ClientConfig, String> {
    let response = Request::get(CLIENT_CONFIG_PATH)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(format!("client config unavailable ({})", response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

/// The FitWell backend, called from the browser
#[derive(Clone, Debug)]
pub struct BrowserApi {
    bases: BaseUrls,
}

impl BrowserApi {
    /// Client for the configured backend; a local storage override wins
    pub fn new(config: &ClientConfig) -> Self {
        let bases = match get_api_base() {
            Some(api) => {
                let config = ClientConfig {
                    api_base_url: api,
                    ..config.clone()
                };
                config.bases()
            }
            None => config.bases(),
        };
        Self { bases }
    }

    fn builder(&self, endpoint: &Endpoint<'_>) -> RequestBuilder {
        let url = self.bases.url(endpoint);
        match endpoint.method() {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
        }
    }

    async fn send<B: Serialize>(&self, endpoint: Endpoint<'_>, body: Option<&B>) -> ApiResult<Response> {
        let builder = self.builder(&endpoint);
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn send_ok<B: Serialize>(&self, endpoint: Endpoint<'_>, body: Option<&B>) -> ApiResult<Response> {
        let response = self.send(endpoint, body).await?;
        ensure_success(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> ApiResult<T> {
        let response = self.send_ok::<()>(endpoint, None).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

async fn ensure_success(response: Response) -> ApiResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::status(status, error_message(&body)))
}

async fn read_text(response: Response) -> ApiResult<String> {
    response
        .text()
        .await
        .map(|body| feedback_text(&body))
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl FitwellApi for BrowserApi {
    async fn login(&self, credentials: &Credentials) -> ApiResult<serde_json::Value> {
        let response = self.send_ok(Endpoint::Login, Some(credentials)).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn register(&self, profile: &RegistrationProfile) -> ApiResult<()> {
        self.send_ok(Endpoint::Register, Some(profile)).await?;
        Ok(())
    }

    async fn exchange_oauth_code(&self, code: &str) -> ApiResult<OAuthExchange> {
        let body = OAuthCodeRequest {
            code: code.to_string(),
        };
        let response = self.send(Endpoint::OAuthLogin, Some(&body)).await?;

        match response.status() {
            200 | 201 => {
                let status = response.status();
                let user: serde_json::Value = response
                    .json()
                    .await
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
                Ok(if status == 200 {
                    OAuthExchange::Existing(user)
                } else {
                    OAuthExchange::NewUser(user)
                })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::status(status, error_message(&body)))
            }
        }
    }

    async fn add_diet(&self, user_id: &UserId, entry: &DietEntry) -> ApiResult<()> {
        self.send_ok(Endpoint::Diet { user_id }, Some(entry)).await?;
        Ok(())
    }

    async fn add_exercise(&self, user_id: &UserId, entry: &ExerciseEntry) -> ApiResult<()> {
        self.send_ok(Endpoint::Exercise { user_id }, Some(entry)).await?;
        Ok(())
    }

    async fn update_metrics(&self, user_id: &UserId, update: &MetricsUpdate) -> ApiResult<()> {
        self.send_ok(Endpoint::UpdateMetrics { user_id }, Some(update))
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
        let response = self.send_ok(Endpoint::AskFeedback, Some(request)).await?;
        read_text(response).await
    }

    async fn generate_feedback(&self, user_id: &UserId) -> ApiResult<String> {
        let response = self
            .send_ok::<()>(Endpoint::GenerateFeedback { user_id }, None)
            .await?;
        read_text(response).await
    }

    async fn feedback_history(&self, user_id: &UserId) -> ApiResult<Vec<Feedback>> {
        self.get_json(Endpoint::FeedbackHistory { user_id }).await
    }
}
