//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

// Eligibility verification
pub const SETTING_CREDITS_PER_BUDGET: &str = "credits_per_budget";
pub const DEFAULT_CREDITS_PER_BUDGET: i64 = 20;
/// Pause inserted before each verification check so the dialog can show
/// progress one step at a time.
pub const CHECK_STEP_DELAY_MS: u64 = 350;

// Budget statuses as stored by the backend
pub const STATUS_DRAFT: &str = "draft";
pub const STATUS_PRESENTED: &str = "presented";
pub const STATUS_ACCEPTED: &str = "accepted";
pub const STATUS_REJECTED: &str = "rejected";

// Verification messages
pub const CHECK_MSG_NO_PRIOR_BUDGET: &str = "No prior budget, a new one will be created";
pub const CHECK_MSG_NOT_BLOCKED: &str = "No accepted budget from another supplier";
pub const CHECK_MSG_BLOCKED_BY_OTHER: &str =
    "Category already has an accepted budget from another supplier";
pub const CHECK_MSG_READY_TO_CREATE: &str = "Ready to create a new budget";
pub const CHECK_MSG_VIEW_ONLY: &str = "Budget already accepted, opening in view-only mode";
pub const CHECK_MSG_RESUBMIT: &str = "Budget was rejected, resubmission allowed";
pub const CHECK_MSG_CONTINUE_DRAFT: &str = "Draft in progress, continue editing";
pub const CHECK_MSG_SUPPLIER_MISSING: &str = "Supplier profile not found";

// Success messages
pub const SUCCESS_BUDGET_ACTIVATED: &str = "Budget request activated";
pub const SUCCESS_BUDGET_RESUBMITTED: &str = "Budget re-presented for review";
pub const SUCCESS_CREDITS_PURCHASED: &str = "Credits purchased";
pub const SUCCESS_DOCUMENT_UPLOADED: &str = "Document uploaded";
pub const SUCCESS_DOCUMENT_DELETED: &str = "Document deleted";
pub const SUCCESS_VERSION_SELECTED: &str = "Project version selected";

// Error messages
pub const ERROR_BUDGET_ACTIVATE_FAILED: &str = "Failed to activate budget request";
pub const ERROR_DOCUMENT_UPLOAD_FAILED: &str = "Failed to upload document";
pub const ERROR_WEATHER_FAILED: &str = "Failed to fetch site weather";

// UI layout
pub const SIDEBAR_DEFAULT_WIDTH: u16 = 28;
pub const SIDEBAR_MIN_WIDTH: u16 = 20;
pub const SIDEBAR_MAX_WIDTH: u16 = 60;

// Viewer overlays
pub const OPACITY_STEP: i16 = 10;
pub const OPACITY_MAX: u8 = 100;

// Config
pub const CONFIG_GENERATED: &str = "Wrote default configuration";
