//! Local cache for AI daily-analysis results.
//!
//! Entries are keyed by `(user_id, date)` and stored as one JSON file each,
//! so an analysis is fetched at most once per user per calendar day. A
//! missing, unreadable, or corrupt entry is simply a miss; a failed write
//! never fails the surrounding fetch.

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

use crate::dto::DailyAnalysis;
use crate::error::AppResult;
use crate::models::user::CurrentUser;
use crate::service::PlanService;

pub struct AnalysisCache {
    dir: PathBuf,
}

impl AnalysisCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, user_id: Uuid, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("analysis-{}-{}.json", user_id, date.format("%Y-%m-%d")))
    }

    pub fn get(&self, user_id: Uuid, date: NaiveDate) -> Option<DailyAnalysis> {
        let raw = fs::read_to_string(self.entry_path(user_id, date)).ok()?;
        match serde_json::from_str(&raw) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                tracing::warn!(error = %e, %date, "discarding corrupt analysis cache entry");
                None
            }
        }
    }

    pub fn put(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        analysis: &DailyAnalysis,
    ) -> AppResult<()> {
        fs::create_dir_all(&self.dir)?;
        let body = serde_json::to_string_pretty(analysis)?;
        fs::write(self.entry_path(user_id, date), body)?;
        Ok(())
    }
}

/// Fetch the analysis for one date, going to the service only on a miss.
pub async fn daily_analysis_cached<S: PlanService>(
    service: &S,
    cache: &AnalysisCache,
    user: &CurrentUser,
    date: NaiveDate,
) -> AppResult<DailyAnalysis> {
    if let Some(hit) = cache.get(user.id, date) {
        tracing::debug!(user_id = %user.id, %date, "analysis cache hit");
        return Ok(hit);
    }
    let analysis = service.fetch_daily_analysis(date).await?;
    if let Err(e) = cache.put(user.id, date, &analysis) {
        tracing::warn!(error = %e, "failed to store analysis cache entry");
    }
    Ok(analysis)
}
