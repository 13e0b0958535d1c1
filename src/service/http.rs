//! HTTP implementation of the plan-service port.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

use super::PlanService;
use crate::config::Config;
use crate::dto::{DailyAnalysis, PlanPayload, SlotCompletionRequest};
use crate::error::{AppError, AppResult};
use crate::models::outcome::QuestionOutcome;
use crate::models::plan::StudyPlan;
use crate::models::user::CurrentUser;

#[derive(Clone)]
pub struct HttpPlanService {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpPlanService {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> AppResult<()> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Map non-2xx responses into the error taxonomy. 404 means the plan or
/// slot vanished server-side; the caller reconciles with a refresh.
async fn check_status(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = %status, body = %body, "plan service rejected request");
    match status {
        StatusCode::NOT_FOUND => Err(AppError::NotFound(
            "plan service has no such resource".into(),
        )),
        _ => Err(AppError::Service(format!("{status}: {body}"))),
    }
}

#[async_trait]
impl PlanService for HttpPlanService {
    async fn fetch_active_plan(&self) -> AppResult<StudyPlan> {
        let payload: PlanPayload = self.get_json("/api/plans/active").await?;
        payload.into_plan()
    }

    async fn fetch_plan(&self, plan_id: Uuid) -> AppResult<StudyPlan> {
        let payload: PlanPayload = self.get_json(&format!("/api/plans/{plan_id}")).await?;
        payload.into_plan()
    }

    async fn set_slot_completion(
        &self,
        slot_id: Uuid,
        completed: bool,
        outcome: Option<QuestionOutcome>,
    ) -> AppResult<()> {
        let body = SlotCompletionRequest { completed, outcome };
        self.post_json(&format!("/api/slots/{slot_id}/completion"), &body)
            .await
    }

    async fn fetch_me(&self) -> AppResult<CurrentUser> {
        self.get_json("/api/me").await
    }

    async fn fetch_daily_analysis(&self, date: NaiveDate) -> AppResult<DailyAnalysis> {
        self.get_json(&format!(
            "/api/analysis/daily?date={}",
            date.format("%Y-%m-%d")
        ))
        .await
    }
}
