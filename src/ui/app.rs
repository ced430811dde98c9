//! Application state and business logic

use ratatui::widgets::ListState;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::backend::{
    BackendBudget, BackendDocument, BackendFileVersion, BackendOverlayModel, BackendProject,
    BackendProjectVersion, WeatherReport,
};
use crate::config::Config;
use crate::eligibility::{
    CheckItem, EligibilityOutcome, EligibilityReport, EligibilityVerifier, VerificationRequest,
};
use crate::icons::{IconService, IconTheme};
use crate::service::{ProjectData, ProjectService};

/// Which panel fills the main area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainView {
    #[default]
    Budgets,
    Documents,
    Viewer,
    Weather,
}

impl MainView {
    pub fn from_config(name: &str) -> Self {
        match name {
            "documents" => MainView::Documents,
            "viewer" => MainView::Viewer,
            "weather" => MainView::Weather,
            _ => MainView::Budgets,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MainView::Budgets => "Budgets",
            MainView::Documents => "Documentation",
            MainView::Viewer => "Viewer overlays",
            MainView::Weather => "Site weather",
        }
    }
}

/// Which input field the activation dialog is editing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivationField {
    #[default]
    Category,
    Amount,
}

/// Application state
pub struct App {
    pub should_quit: bool,

    // Loaded data
    pub projects: Vec<BackendProject>,
    pub budgets: Vec<BackendBudget>,
    pub documents: Vec<BackendDocument>,
    pub overlays: Vec<BackendOverlayModel>,
    pub project_versions: Vec<BackendProjectVersion>,
    pub file_versions: Vec<BackendFileVersion>,
    pub weather: Option<WeatherReport>,

    // Selections
    pub selected_project_index: usize,
    pub selected_budget_index: usize,
    pub selected_document_index: usize,
    pub selected_overlay_index: usize,
    pub selected_version_index: usize,
    pub budget_list_state: ListState,

    pub main_view: MainView,
    pub loading: bool,
    pub refreshing: bool,
    pub error_message: Option<String>,
    pub info_message: Option<String>,
    pub show_help: bool,
    pub help_scroll_offset: usize,
    pub show_debug: bool,

    // The supplier this client acts as
    pub supplier_id: String,
    pub show_amounts: bool,
    pub show_sizes: bool,

    // Budget activation dialog
    pub activating_budget: bool,
    pub activation_field: ActivationField,
    pub activation_category: String,
    pub activation_amount: String,

    // Verification dialog
    pub verifying: bool,
    pub verification_checks: Vec<CheckItem>,
    pub verification_outcome: Option<EligibilityOutcome>,
    pub verification_request: Option<VerificationRequest>,
    pub verify_task: Option<JoinHandle<EligibilityReport>>,
    pub verify_progress: Option<mpsc::UnboundedReceiver<Vec<CheckItem>>>,

    // Credit purchase dialog: credits to buy if confirmed
    pub purchase_confirmation: Option<i64>,

    // Document dialogs
    pub uploading_document: bool,
    pub upload_path: String,
    pub delete_document_confirmation: Option<String>,
    pub showing_file_versions: bool,

    // Project version selector
    pub selecting_version: bool,

    // Background tasks polled by the render loop
    pub refresh_task: Option<JoinHandle<anyhow::Result<ProjectData>>>,
    pub weather_task: Option<JoinHandle<anyhow::Result<WeatherReport>>>,
    pub op_task: Option<JoinHandle<anyhow::Result<String>>>,

    pub icons: IconService,
}

impl App {
    /// Create a new App instance from loaded configuration
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let mut budget_list_state = ListState::default();
        budget_list_state.select(Some(0));

        Self {
            should_quit: false,
            projects: Vec::new(),
            budgets: Vec::new(),
            documents: Vec::new(),
            overlays: Vec::new(),
            project_versions: Vec::new(),
            file_versions: Vec::new(),
            weather: None,
            selected_project_index: 0,
            selected_budget_index: 0,
            selected_document_index: 0,
            selected_overlay_index: 0,
            selected_version_index: 0,
            budget_list_state,
            main_view: MainView::from_config(&config.ui.default_view),
            loading: true,
            refreshing: false,
            error_message: None,
            info_message: None,
            show_help: false,
            help_scroll_offset: 0,
            show_debug: false,
            supplier_id: config.supplier.id.clone(),
            show_amounts: config.display.show_amounts,
            show_sizes: config.display.show_sizes,
            activating_budget: false,
            activation_field: ActivationField::Category,
            activation_category: String::new(),
            activation_amount: String::new(),
            verifying: false,
            verification_checks: EligibilityVerifier::pending_checks(),
            verification_outcome: None,
            verification_request: None,
            verify_task: None,
            verify_progress: None,
            purchase_confirmation: None,
            uploading_document: false,
            upload_path: String::new(),
            delete_document_confirmation: None,
            showing_file_versions: false,
            selecting_version: false,
            refresh_task: None,
            weather_task: None,
            op_task: None,
            icons: IconService::new(match config.ui.icon_theme.as_str() {
                "emoji" => IconTheme::Emoji,
                _ => IconTheme::Ascii,
            }),
        }
    }

    pub fn selected_project(&self) -> Option<&BackendProject> {
        self.projects.get(self.selected_project_index)
    }

    pub fn selected_budget(&self) -> Option<&BackendBudget> {
        self.budgets.get(self.selected_budget_index)
    }

    pub fn selected_document(&self) -> Option<&BackendDocument> {
        self.documents.get(self.selected_document_index)
    }

    pub fn selected_overlay(&self) -> Option<&BackendOverlayModel> {
        self.overlays.get(self.selected_overlay_index)
    }

    /// Replace the per-project data after a refresh, clamping selections.
    pub fn apply_project_data(&mut self, data: ProjectData) {
        self.budgets = data.budgets;
        self.documents = data.documents;
        self.overlays = data.overlays;
        self.project_versions = data.project_versions;

        self.selected_budget_index = clamp_index(self.selected_budget_index, self.budgets.len());
        self.selected_document_index = clamp_index(self.selected_document_index, self.documents.len());
        self.selected_overlay_index = clamp_index(self.selected_overlay_index, self.overlays.len());
        self.selected_version_index =
            clamp_index(self.selected_version_index, self.project_versions.len());
        self.budget_list_state.select(Some(self.selected_budget_index));
    }

    /// Discard any in-flight verification and return the check sequence to a
    /// clean all-pending run with no residual messages.
    pub fn reset_verification(&mut self) {
        if let Some(task) = self.verify_task.take() {
            task.abort();
        }
        self.verify_progress = None;
        self.verification_checks = EligibilityVerifier::pending_checks();
        self.verification_outcome = None;
    }

    /// Close the verification dialog entirely.
    pub fn close_verification(&mut self) {
        self.reset_verification();
        self.verification_request = None;
        self.verifying = false;
    }

    /// Kick off a background refresh of the selected project's data.
    pub fn start_refresh(&mut self, service: &ProjectService) {
        if self.refresh_task.is_some() {
            return;
        }
        let Some(project) = self.selected_project() else {
            return;
        };
        let project_id = project.remote_id.clone();
        let svc = service.clone();
        self.refreshing = true;
        self.refresh_task = Some(tokio::spawn(async move { svc.load_project_data(&project_id).await }));
    }

    /// Kick off a background weather fetch for the selected project.
    pub fn start_weather_fetch(&mut self, service: &ProjectService) {
        if self.weather_task.is_some() {
            return;
        }
        let Some(project) = self.selected_project() else {
            return;
        };
        let project_id = project.remote_id.clone();
        let svc = service.clone();
        self.weather_task = Some(tokio::spawn(async move { svc.get_weather(&project_id).await }));
    }

    /// Start (or restart) the eligibility verification sequence for the
    /// category currently entered in the activation dialog.
    pub fn start_verification(&mut self, service: &ProjectService) {
        let project_id = match self.selected_project() {
            Some(project) => project.remote_id.clone(),
            None => {
                self.error_message = Some("No project selected".to_string());
                return;
            }
        };
        let request = VerificationRequest {
            project_id,
            category: self.activation_category.trim().to_string(),
            supplier_id: self.supplier_id.clone(),
        };

        self.reset_verification();
        self.verification_request = Some(request.clone());

        let (tx, rx) = mpsc::unbounded_channel();
        let verifier = service.verifier();
        self.verify_progress = Some(rx);
        self.verify_task = Some(tokio::spawn(async move {
            verifier.verify(&request, Some(&tx)).await
        }));
        self.verifying = true;
    }

    /// Parsed amount from the activation dialog, if any.
    pub fn activation_amount_value(&self) -> Option<f64> {
        self.activation_amount.trim().parse().ok()
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        index.min(len - 1)
    }
}
