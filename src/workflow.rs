//! Slot completion workflow.
//!
//! One state machine instance governs one plan's slot toggles:
//!
//! ```text
//! Idle → AwaitingOutcome → Committing → Idle      (mark complete)
//! Idle → Committing → Idle                        (mark incomplete)
//! ```
//!
//! Marking a slot incomplete never opens the capture form. While a capture
//! or commit is pending, further toggle requests are rejected with
//! [`AppError::Busy`]; a single client instance has at most one slot
//! action in flight. The local plan is never flipped optimistically: the
//! only way state changes is through the refetch that runs strictly after
//! the mutation resolves, and the caller replaces its plan wholesale with
//! the returned value.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::outcome::QuestionOutcome;
use crate::models::plan::StudyPlan;
use crate::service::PlanService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    /// The capture form is open for this slot; no I/O has happened yet.
    AwaitingOutcome { slot_id: Uuid },
    Committing { slot_id: Uuid },
}

pub struct CompletionWorkflow<S> {
    service: S,
    plan_id: Uuid,
    state: WorkflowState,
}

impl<S: PlanService> CompletionWorkflow<S> {
    pub fn new(service: S, plan_id: Uuid) -> Self {
        Self {
            service,
            plan_id,
            state: WorkflowState::Idle,
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Clear a slot's completion. Commits directly, skipping outcome
    /// capture, and returns the refreshed plan.
    pub async fn mark_incomplete(&mut self, slot_id: Uuid) -> AppResult<StudyPlan> {
        self.ensure_idle()?;
        self.state = WorkflowState::Committing { slot_id };
        let result = self.commit(slot_id, false, None).await;
        self.state = WorkflowState::Idle;
        result
    }

    /// Open the outcome-capture form for a slot. No service call is made
    /// until the form is submitted or skipped.
    pub fn begin_complete(&mut self, slot_id: Uuid) -> AppResult<()> {
        self.ensure_idle()?;
        self.state = WorkflowState::AwaitingOutcome { slot_id };
        Ok(())
    }

    /// Submit the capture form. Each raw field is parsed as a non-negative
    /// integer, with empty or invalid input counting as zero. Form state is
    /// not preserved across failures.
    pub async fn submit_outcome(
        &mut self,
        correct: &str,
        wrong: &str,
        blank: &str,
    ) -> AppResult<StudyPlan> {
        let outcome = QuestionOutcome::from_form(correct, wrong, blank);
        self.finish_capture(outcome).await
    }

    /// The "didn't solve questions" path: commits a zero outcome without
    /// reading any form fields.
    pub async fn skip_outcome(&mut self) -> AppResult<StudyPlan> {
        self.finish_capture(QuestionOutcome::default()).await
    }

    /// Close the capture form without committing anything. Has no effect
    /// outside `AwaitingOutcome`; an in-flight commit cannot be cancelled.
    pub fn cancel(&mut self) {
        if let WorkflowState::AwaitingOutcome { .. } = self.state {
            self.state = WorkflowState::Idle;
        }
    }

    async fn finish_capture(&mut self, outcome: QuestionOutcome) -> AppResult<StudyPlan> {
        let slot_id = match self.state {
            WorkflowState::AwaitingOutcome { slot_id } => slot_id,
            _ => {
                return Err(AppError::Validation(
                    "no outcome capture in progress".into(),
                ))
            }
        };
        self.state = WorkflowState::Committing { slot_id };
        let result = self.commit(slot_id, true, Some(outcome)).await;
        self.state = WorkflowState::Idle;
        result
    }

    async fn commit(
        &self,
        slot_id: Uuid,
        completed: bool,
        outcome: Option<QuestionOutcome>,
    ) -> AppResult<StudyPlan> {
        self.service
            .set_slot_completion(slot_id, completed, outcome)
            .await?;
        // Refresh only once the write has resolved, so the fetched plan
        // always reflects it.
        self.service.fetch_plan(self.plan_id).await
    }

    fn ensure_idle(&self) -> AppResult<()> {
        match self.state {
            WorkflowState::Idle => Ok(()),
            _ => Err(AppError::Busy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::DailyAnalysis;
    use crate::models::plan::{PlanDay, StudyPlan};
    use crate::models::slot::{SlotKind, StudySlot, SubjectRef};
    use crate::models::user::CurrentUser;
    use async_trait::async_trait;
    use chrono::{NaiveDate, NaiveTime};
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct FakePlanService {
        inner: Arc<FakeInner>,
    }

    struct FakeInner {
        plan: Mutex<StudyPlan>,
        commits: Mutex<Vec<(Uuid, bool, Option<QuestionOutcome>)>>,
        call_log: Mutex<Vec<&'static str>>,
        fail_next_commit: AtomicBool,
    }

    impl FakePlanService {
        fn new(plan: StudyPlan) -> Self {
            Self {
                inner: Arc::new(FakeInner {
                    plan: Mutex::new(plan),
                    commits: Mutex::new(Vec::new()),
                    call_log: Mutex::new(Vec::new()),
                    fail_next_commit: AtomicBool::new(false),
                }),
            }
        }

        fn commits(&self) -> Vec<(Uuid, bool, Option<QuestionOutcome>)> {
            self.inner.commits.lock().unwrap().clone()
        }

        fn call_log(&self) -> Vec<&'static str> {
            self.inner.call_log.lock().unwrap().clone()
        }

        fn stored_plan(&self) -> StudyPlan {
            self.inner.plan.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlanService for FakePlanService {
        async fn fetch_active_plan(&self) -> AppResult<StudyPlan> {
            Ok(self.stored_plan())
        }

        async fn fetch_plan(&self, _plan_id: Uuid) -> AppResult<StudyPlan> {
            self.inner.call_log.lock().unwrap().push("fetch");
            Ok(self.stored_plan())
        }

        async fn set_slot_completion(
            &self,
            slot_id: Uuid,
            completed: bool,
            outcome: Option<QuestionOutcome>,
        ) -> AppResult<()> {
            self.inner.call_log.lock().unwrap().push("commit");
            if self.inner.fail_next_commit.swap(false, Ordering::SeqCst) {
                return Err(AppError::Service("503: unavailable".into()));
            }
            self.inner
                .commits
                .lock()
                .unwrap()
                .push((slot_id, completed, outcome));

            let mut plan = self.inner.plan.lock().unwrap();
            for day in plan.days.values_mut() {
                for slot in day.slots.iter_mut() {
                    if slot.id == slot_id {
                        slot.completed = completed;
                        slot.outcome = outcome;
                    }
                }
            }
            Ok(())
        }

        async fn fetch_me(&self) -> AppResult<CurrentUser> {
            unimplemented!("not used by the workflow")
        }

        async fn fetch_daily_analysis(&self, _date: NaiveDate) -> AppResult<DailyAnalysis> {
            unimplemented!("not used by the workflow")
        }
    }

    fn sample_plan(slot_id: Uuid, completed: bool) -> StudyPlan {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let slot = StudySlot {
            id: slot_id,
            subject: SubjectRef {
                id: Uuid::new_v4(),
                name: "Chemistry".into(),
                color: "#22c55e".into(),
            },
            topic: None,
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
            kind: SlotKind::Study,
            completed,
            note: String::new(),
            rationale: String::new(),
            outcome: None,
        };
        let mut days = BTreeMap::new();
        days.insert(
            date,
            PlanDay {
                date,
                goal_minutes: 90,
                slots: vec![slot],
            },
        );
        StudyPlan {
            id: Uuid::new_v4(),
            title: "Sprint week".into(),
            description: String::new(),
            start_date: date,
            end_date: date,
            is_active: true,
            ai_generated: false,
            days,
        }
    }

    fn workflow_for(
        slot_id: Uuid,
        completed: bool,
    ) -> (CompletionWorkflow<FakePlanService>, FakePlanService) {
        let plan = sample_plan(slot_id, completed);
        let service = FakePlanService::new(plan.clone());
        (CompletionWorkflow::new(service.clone(), plan.id), service)
    }

    #[tokio::test]
    async fn test_complete_with_outcome_round_trip() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, service) = workflow_for(slot_id, false);

        workflow.begin_complete(slot_id).unwrap();
        assert_eq!(
            workflow.state(),
            WorkflowState::AwaitingOutcome { slot_id }
        );

        let refreshed = workflow.submit_outcome("3", "1", "0").await.unwrap();
        assert_eq!(workflow.state(), WorkflowState::Idle);

        let slot = refreshed.find_slot(slot_id).unwrap();
        assert!(slot.completed);
        assert_eq!(
            slot.outcome,
            Some(QuestionOutcome {
                correct: 3,
                wrong: 1,
                blank: 0
            })
        );
        assert_eq!(
            service.commits(),
            vec![(
                slot_id,
                true,
                Some(QuestionOutcome {
                    correct: 3,
                    wrong: 1,
                    blank: 0
                })
            )]
        );
    }

    #[tokio::test]
    async fn test_refresh_runs_after_the_commit() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, service) = workflow_for(slot_id, false);

        workflow.begin_complete(slot_id).unwrap();
        workflow.submit_outcome("2", "0", "1").await.unwrap();

        assert_eq!(service.call_log(), vec!["commit", "fetch"]);
    }

    #[tokio::test]
    async fn test_skip_commits_zero_outcome() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, service) = workflow_for(slot_id, false);

        workflow.begin_complete(slot_id).unwrap();
        workflow.skip_outcome().await.unwrap();

        assert_eq!(
            service.commits(),
            vec![(slot_id, true, Some(QuestionOutcome::default()))]
        );
    }

    #[tokio::test]
    async fn test_garbage_form_input_parses_to_zero() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, service) = workflow_for(slot_id, false);

        workflow.begin_complete(slot_id).unwrap();
        workflow.submit_outcome("", "abc", "-2").await.unwrap();

        assert_eq!(
            service.commits(),
            vec![(slot_id, true, Some(QuestionOutcome::default()))]
        );
    }

    #[tokio::test]
    async fn test_mark_incomplete_skips_capture_and_sends_no_outcome() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, service) = workflow_for(slot_id, true);

        let refreshed = workflow.mark_incomplete(slot_id).await.unwrap();

        assert_eq!(service.commits(), vec![(slot_id, false, None)]);
        assert!(!refreshed.find_slot(slot_id).unwrap().completed);
        assert_eq!(workflow.state(), WorkflowState::Idle);
    }

    #[tokio::test]
    async fn test_cancel_discards_capture_without_side_effects() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, service) = workflow_for(slot_id, false);

        workflow.begin_complete(slot_id).unwrap();
        workflow.cancel();

        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(service.call_log().is_empty());
        assert!(!service.stored_plan().find_slot(slot_id).unwrap().completed);
    }

    #[tokio::test]
    async fn test_second_request_while_capture_open_is_rejected() {
        let slot_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let (mut workflow, _service) = workflow_for(slot_id, false);

        workflow.begin_complete(slot_id).unwrap();
        assert!(matches!(
            workflow.begin_complete(other),
            Err(AppError::Busy)
        ));
        assert!(matches!(
            workflow.mark_incomplete(other).await,
            Err(AppError::Busy)
        ));
        // The original capture is still open.
        assert_eq!(
            workflow.state(),
            WorkflowState::AwaitingOutcome { slot_id }
        );
    }

    #[tokio::test]
    async fn test_submit_without_open_capture_is_rejected() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, _service) = workflow_for(slot_id, false);

        let err = workflow.submit_outcome("1", "0", "0").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_failed_commit_returns_to_idle_without_flipping_state() {
        let slot_id = Uuid::new_v4();
        let (mut workflow, service) = workflow_for(slot_id, false);
        service.inner.fail_next_commit.store(true, Ordering::SeqCst);

        workflow.begin_complete(slot_id).unwrap();
        let err = workflow.submit_outcome("3", "1", "0").await.unwrap_err();
        assert!(matches!(err, AppError::Service(_)));

        // Form state is dropped, the machine is reusable, and the slot was
        // never flipped locally.
        assert_eq!(workflow.state(), WorkflowState::Idle);
        assert!(!service.stored_plan().find_slot(slot_id).unwrap().completed);
        workflow.begin_complete(slot_id).unwrap();
    }
}
