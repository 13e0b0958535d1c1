pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::dto::DailyAnalysis;
use crate::error::AppResult;
use crate::models::outcome::QuestionOutcome;
use crate::models::plan::StudyPlan;
use crate::models::user::CurrentUser;

/// Client-side port onto the remote plan/auth/AI services. The HTTP
/// implementation lives in [`http`]; tests substitute in-memory fakes.
#[async_trait]
pub trait PlanService {
    /// The user's single active plan, normalized and validated.
    async fn fetch_active_plan(&self) -> AppResult<StudyPlan>;

    async fn fetch_plan(&self, plan_id: Uuid) -> AppResult<StudyPlan>;

    /// Set a slot's completion flag. The outcome travels in the same call
    /// and must be `None` exactly when clearing a completion.
    async fn set_slot_completion(
        &self,
        slot_id: Uuid,
        completed: bool,
        outcome: Option<QuestionOutcome>,
    ) -> AppResult<()>;

    async fn fetch_me(&self) -> AppResult<CurrentUser>;

    async fn fetch_daily_analysis(&self, date: NaiveDate) -> AppResult<DailyAnalysis>;
}
