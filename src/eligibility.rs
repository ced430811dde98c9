//! Sequential supplier-eligibility verification.
//!
//! Before a supplier may submit or edit a budget for a project/category, five
//! checks run strictly in order, short-circuiting on the first failure:
//! existence, block check, status classification, access check, credit check.
//! The sequence is re-entrant: every [`EligibilityVerifier::verify`] call
//! starts from a clean all-pending run, so the caller can restart after an
//! external side effect such as a credit purchase.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::backend::{Backend, BackendBudget, BackendError};
use crate::constants::{
    CHECK_MSG_BLOCKED_BY_OTHER, CHECK_MSG_CONTINUE_DRAFT, CHECK_MSG_NOT_BLOCKED,
    CHECK_MSG_NO_PRIOR_BUDGET, CHECK_MSG_READY_TO_CREATE, CHECK_MSG_RESUBMIT,
    CHECK_MSG_SUPPLIER_MISSING, CHECK_MSG_VIEW_ONLY, CHECK_STEP_DELAY_MS,
    DEFAULT_CREDITS_PER_BUDGET, SETTING_CREDITS_PER_BUDGET, STATUS_ACCEPTED, STATUS_DRAFT,
    STATUS_REJECTED,
};

/// Identifies one of the five verification checks, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckId {
    Existence,
    Blocked,
    Status,
    Access,
    Credits,
}

impl CheckId {
    /// All checks in the order they run.
    pub const ALL: [CheckId; 5] = [
        CheckId::Existence,
        CheckId::Blocked,
        CheckId::Status,
        CheckId::Access,
        CheckId::Credits,
    ];

    /// Short label shown next to the check in the verification dialog.
    pub fn label(&self) -> &'static str {
        match self {
            CheckId::Existence => "Existing budget",
            CheckId::Blocked => "Category availability",
            CheckId::Status => "Budget status",
            CheckId::Access => "Supplier access",
            CheckId::Credits => "Credit balance",
        }
    }
}

/// Lifecycle state of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Pending,
    Checking,
    Success,
    Error,
}

/// One entry in the ordered check sequence.
#[derive(Debug, Clone)]
pub struct CheckItem {
    pub id: CheckId,
    pub state: CheckState,
    pub message: Option<String>,
}

impl CheckItem {
    fn pending(id: CheckId) -> Self {
        Self {
            id,
            state: CheckState::Pending,
            message: None,
        }
    }
}

/// Terminal result of a verification run.
#[derive(Debug, Clone, Default)]
pub struct EligibilityOutcome {
    /// True iff all five checks reached [`CheckState::Success`].
    pub can_proceed: bool,
    pub blocking_reason: Option<String>,
    pub required_credits: i64,
    pub available_credits: i64,
}

impl EligibilityOutcome {
    /// Credits still missing; zero when the balance suffices.
    pub fn credit_deficit(&self) -> i64 {
        (self.required_credits - self.available_credits).max(0)
    }
}

/// Final report: the full check sequence plus the overall outcome.
#[derive(Debug, Clone)]
pub struct EligibilityReport {
    pub checks: Vec<CheckItem>,
    pub outcome: EligibilityOutcome,
}

/// The (project, category, supplier) triple a verification runs against.
///
/// The category is matched case-insensitively as a substring against stored
/// budget categories.
#[derive(Debug, Clone)]
pub struct VerificationRequest {
    pub project_id: String,
    pub category: String,
    pub supplier_id: String,
}

/// Why a check did not pass. A lookup error halts the run and is surfaced
/// verbatim; a not-eligible outcome is terminal for this run but expected to
/// be resolved externally (credit purchase, the other supplier's acceptance).
enum CheckFailure {
    Lookup(BackendError),
    NotEligible(String),
}

impl From<BackendError> for CheckFailure {
    fn from(err: BackendError) -> Self {
        CheckFailure::Lookup(err)
    }
}

/// Runs the five checks in order against a backend.
///
/// Checks never run concurrently; each awaits the previous one. There is no
/// retry and no mid-sequence cancellation beyond dropping the future.
pub struct EligibilityVerifier {
    backend: Arc<Box<dyn Backend>>,
    step_delay: Duration,
}

impl EligibilityVerifier {
    pub fn new(backend: Arc<Box<dyn Backend>>) -> Self {
        Self {
            backend,
            step_delay: Duration::from_millis(CHECK_STEP_DELAY_MS),
        }
    }

    /// Override the per-step display delay. Tests pass zero.
    pub fn with_step_delay(backend: Arc<Box<dyn Backend>>, step_delay: Duration) -> Self {
        Self { backend, step_delay }
    }

    /// A fresh all-pending check sequence, for dialogs to render before the
    /// run produces its first snapshot and when resetting after a restart.
    pub fn pending_checks() -> Vec<CheckItem> {
        CheckId::ALL.iter().copied().map(CheckItem::pending).collect()
    }

    /// Run the full verification sequence for `request`.
    ///
    /// Progress snapshots of the check sequence are sent on `progress` after
    /// every state transition, for progressive display. The returned report
    /// is always complete: on failure at step N, steps N+1.. stay pending and
    /// the outcome carries a non-empty blocking reason.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
        progress: Option<&UnboundedSender<Vec<CheckItem>>>,
    ) -> EligibilityReport {
        let mut checks = Self::pending_checks();
        let mut outcome = EligibilityOutcome::default();
        // Carried from the existence check into the status classification.
        let mut existing: Option<BackendBudget> = None;

        info!(
            "verifying eligibility: project={} category={} supplier={}",
            request.project_id, request.category, request.supplier_id
        );

        for index in 0..checks.len() {
            checks[index].state = CheckState::Checking;
            publish(progress, &checks);

            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }

            let result = match checks[index].id {
                CheckId::Existence => self.check_existence(request, &mut existing).await,
                CheckId::Blocked => self.check_blocked(request).await,
                CheckId::Status => Ok(classify_status(existing.as_ref())),
                CheckId::Access => self.check_access(request).await,
                CheckId::Credits => self.check_credits(request, &mut outcome).await,
            };

            match result {
                Ok(message) => {
                    checks[index].state = CheckState::Success;
                    checks[index].message = Some(message);
                    publish(progress, &checks);
                }
                Err(failure) => {
                    let reason = match failure {
                        CheckFailure::Lookup(err) => err.to_string(),
                        CheckFailure::NotEligible(reason) => reason,
                    };
                    warn!(
                        "eligibility check {:?} failed: {}",
                        checks[index].id, reason
                    );
                    checks[index].state = CheckState::Error;
                    checks[index].message = Some(reason.clone());
                    outcome.blocking_reason = Some(reason);
                    publish(progress, &checks);
                    return EligibilityReport { checks, outcome };
                }
            }
        }

        outcome.can_proceed = true;
        EligibilityReport { checks, outcome }
    }

    /// Step 1: look up an existing budget for (project, supplier, category).
    /// Absence is not an error; it means a new budget will be created.
    async fn check_existence(
        &self,
        request: &VerificationRequest,
        existing: &mut Option<BackendBudget>,
    ) -> Result<String, CheckFailure> {
        let found = self
            .backend
            .find_budget(&request.project_id, &request.supplier_id, &request.category)
            .await?;
        let message = match &found {
            Some(budget) => format!("Found existing budget ({})", budget.status),
            None => CHECK_MSG_NO_PRIOR_BUDGET.to_string(),
        };
        *existing = found;
        Ok(message)
    }

    /// Step 2: a different supplier holding an accepted budget for the
    /// category blocks the run. The requesting supplier's own accepted budget
    /// does not. Advisory only; the store does not enforce this on writes.
    async fn check_blocked(&self, request: &VerificationRequest) -> Result<String, CheckFailure> {
        let accepted = self
            .backend
            .fetch_accepted_budgets(&request.project_id, &request.category)
            .await?;
        let blocked = accepted
            .iter()
            .any(|budget| budget.supplier_remote_id != request.supplier_id);
        if blocked {
            return Err(CheckFailure::NotEligible(CHECK_MSG_BLOCKED_BY_OTHER.to_string()));
        }
        Ok(CHECK_MSG_NOT_BLOCKED.to_string())
    }

    /// Step 4: the supplier id must resolve to a profile. A missing profile
    /// is a permissions failure, distinct from a missing budget.
    async fn check_access(&self, request: &VerificationRequest) -> Result<String, CheckFailure> {
        let supplier = self.backend.fetch_supplier(&request.supplier_id).await?;
        match supplier {
            Some(profile) => Ok(format!("Supplier profile verified: {}", profile.name)),
            None => Err(CheckFailure::NotEligible(CHECK_MSG_SUPPLIER_MISSING.to_string())),
        }
    }

    /// Step 5: compare the supplier's balance against the configured
    /// credits-per-budget threshold (default 20 when unset).
    async fn check_credits(
        &self,
        request: &VerificationRequest,
        outcome: &mut EligibilityOutcome,
    ) -> Result<String, CheckFailure> {
        let required = match self.backend.fetch_setting(SETTING_CREDITS_PER_BUDGET).await? {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                CheckFailure::Lookup(BackendError::InvalidData(format!(
                    "invalid {SETTING_CREDITS_PER_BUDGET} setting: {raw}"
                )))
            })?,
            None => DEFAULT_CREDITS_PER_BUDGET,
        };

        let supplier = self
            .backend
            .fetch_supplier(&request.supplier_id)
            .await?
            .ok_or_else(|| CheckFailure::NotEligible(CHECK_MSG_SUPPLIER_MISSING.to_string()))?;

        outcome.required_credits = required;
        outcome.available_credits = supplier.credits;

        if supplier.credits < required {
            return Err(CheckFailure::NotEligible(format!(
                "Insufficient credits: {}/{} available",
                supplier.credits, required
            )));
        }
        Ok(format!("Credits available: {}/{}", supplier.credits, required))
    }
}

/// Step 3: classify the status of the budget found in step 1, or report that
/// a new one can be created. Classification never blocks; unknown statuses
/// pass through raw.
fn classify_status(existing: Option<&BackendBudget>) -> String {
    match existing {
        None => CHECK_MSG_READY_TO_CREATE.to_string(),
        Some(budget) => match budget.status.as_str() {
            STATUS_ACCEPTED => CHECK_MSG_VIEW_ONLY.to_string(),
            STATUS_REJECTED => CHECK_MSG_RESUBMIT.to_string(),
            STATUS_DRAFT => CHECK_MSG_CONTINUE_DRAFT.to_string(),
            other => format!("Budget status: {other}"),
        },
    }
}

fn publish(progress: Option<&UnboundedSender<Vec<CheckItem>>>, checks: &[CheckItem]) {
    if let Some(sender) = progress {
        // The dialog may already be closed; a failed send just means nobody
        // is watching anymore.
        let _ = sender.send(checks.to_vec());
    }
}
