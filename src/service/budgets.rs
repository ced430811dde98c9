//! Budget operations: activation of budget requests and credit purchases.

use anyhow::{Context, Result};
use log::info;

use crate::backend::{BackendBudget, BackendSupplier, CreateBudgetArgs};
use crate::constants::{
    STATUS_DRAFT, STATUS_PRESENTED, STATUS_REJECTED, SUCCESS_BUDGET_ACTIVATED,
    SUCCESS_BUDGET_RESUBMITTED,
};
use crate::eligibility::VerificationRequest;
use crate::service::ProjectService;

impl ProjectService {
    /// Retrieves all budgets for a project.
    pub async fn get_budgets(&self, project_id: &str) -> Result<Vec<BackendBudget>> {
        self.backend()
            .fetch_budgets(project_id)
            .await
            .context("Failed to fetch budgets")
    }

    /// Activate a budget request for the verified (project, category,
    /// supplier) triple.
    ///
    /// Callers run eligibility verification first; this method assumes the
    /// outcome allowed proceeding. A rejected budget is re-presented, an
    /// existing draft is reused, and otherwise a fresh draft is created.
    ///
    /// # Returns
    /// The resulting budget and a user-facing success message.
    pub async fn activate_budget_request(
        &self,
        request: &VerificationRequest,
        amount: Option<f64>,
    ) -> Result<(BackendBudget, &'static str)> {
        let backend = self.backend();
        let existing = backend
            .find_budget(&request.project_id, &request.supplier_id, &request.category)
            .await
            .context("Failed to look up existing budget")?;

        match existing {
            Some(budget) if budget.status == STATUS_REJECTED => {
                info!("re-presenting rejected budget {}", budget.remote_id);
                let updated = backend
                    .update_budget_status(&budget.remote_id, STATUS_PRESENTED)
                    .await
                    .context("Failed to re-present budget")?;
                Ok((updated, SUCCESS_BUDGET_RESUBMITTED))
            }
            Some(budget) => {
                // Draft or already-presented budget: keep working on it.
                self.logger()
                    .log(format!("Reusing existing budget {}", budget.remote_id));
                Ok((budget, SUCCESS_BUDGET_ACTIVATED))
            }
            None => {
                let created = backend
                    .create_budget(CreateBudgetArgs {
                        project_remote_id: request.project_id.clone(),
                        supplier_remote_id: request.supplier_id.clone(),
                        category: request.category.clone(),
                        status: STATUS_DRAFT.to_string(),
                        amount,
                    })
                    .await
                    .context("Failed to create budget")?;
                info!("created budget {} for {}", created.remote_id, created.category);
                Ok((created, SUCCESS_BUDGET_ACTIVATED))
            }
        }
    }

    /// Top up a supplier's credit balance. The caller restarts verification
    /// afterwards; nothing here re-checks eligibility.
    pub async fn purchase_credits(&self, supplier_id: &str, amount: i64) -> Result<BackendSupplier> {
        let supplier = self
            .backend()
            .add_supplier_credits(supplier_id, amount)
            .await
            .context("Failed to purchase credits")?;
        self.logger().log(format!(
            "Purchased {amount} credits, balance now {}",
            supplier.credits
        ));
        Ok(supplier)
    }
}
