//! Modal dialog components

pub mod budget_activation_dialog;
pub mod credit_purchase_dialog;
pub mod debug_dialog;
pub mod delete_confirmation_dialog;
pub mod document_upload_dialog;
pub mod error_dialog;
pub mod file_versions_dialog;
pub mod info_dialog;
pub mod verification_dialog;
pub mod version_selector_dialog;

pub use budget_activation_dialog::BudgetActivationDialog;
pub use credit_purchase_dialog::CreditPurchaseDialog;
pub use debug_dialog::DebugDialog;
pub use delete_confirmation_dialog::DeleteConfirmationDialog;
pub use document_upload_dialog::DocumentUploadDialog;
pub use error_dialog::ErrorDialog;
pub use file_versions_dialog::FileVersionsDialog;
pub use info_dialog::InfoDialog;
pub use verification_dialog::VerificationDialog;
pub use version_selector_dialog::VersionSelectorDialog;
