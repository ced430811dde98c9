//! Event handling and key bindings

use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use super::app::{ActivationField, App, MainView};
use super::components::HelpPanel;
use crate::constants::{
    ERROR_BUDGET_ACTIVATE_FAILED, ERROR_DOCUMENT_UPLOAD_FAILED, SUCCESS_CREDITS_PURCHASED,
    SUCCESS_DOCUMENT_DELETED, SUCCESS_DOCUMENT_UPLOADED, SUCCESS_VERSION_SELECTED,
};
use crate::service::ProjectService;

/// Handle all user input events
pub async fn handle_events(event: Event, app: &mut App, service: &ProjectService) -> Result<bool> {
    if let Event::Key(key) = event {
        if key.kind == KeyEventKind::Press {
            // Help panel blocks all other shortcuts while open
            if app.show_help {
                return Ok(handle_help_panel(key, app));
            }

            if app.show_debug {
                return Ok(handle_debug_dialog(key, app, service));
            }

            // Error/info message dialogs
            if app.error_message.is_some() || app.info_message.is_some() {
                return Ok(handle_message_dialog(key, app));
            }

            // Purchase confirmation sits above the verification dialog
            if app.purchase_confirmation.is_some() {
                return handle_purchase_confirmation(key, app, service).await;
            }

            if app.verifying {
                return handle_verification_dialog(key, app, service).await;
            }

            if app.activating_budget {
                return Ok(handle_budget_activation(key, app, service));
            }

            if app.uploading_document {
                return handle_document_upload(key, app, service).await;
            }

            if app.delete_document_confirmation.is_some() {
                return handle_delete_confirmation(key, app, service).await;
            }

            if app.showing_file_versions {
                return Ok(handle_file_versions_dialog(key, app));
            }

            if app.selecting_version {
                return handle_version_selector(key, app, service).await;
            }

            return handle_normal_mode(key, app, service).await;
        }
    }
    Ok(false)
}

/// Handle events when the help panel is open
fn handle_help_panel(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.help_scroll_offset + 1 < HelpPanel::line_count() {
                app.help_scroll_offset += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    true
}

/// Handle events when the debug log dialog is open
fn handle_debug_dialog(key: KeyEvent, app: &mut App, service: &ProjectService) -> bool {
    match key.code {
        KeyCode::Char('c') => service.logger().clear(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('L') => app.show_debug = false,
        _ => {}
    }
    true
}

/// Any key dismisses an error or info message
fn handle_message_dialog(_key: KeyEvent, app: &mut App) -> bool {
    app.error_message = None;
    app.info_message = None;
    true
}

/// Handle events when the credit purchase confirmation is open
async fn handle_purchase_confirmation(
    key: KeyEvent,
    app: &mut App,
    service: &ProjectService,
) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let Some(amount) = app.purchase_confirmation.take() else {
                return Ok(true);
            };
            match service.purchase_credits(&app.supplier_id, amount).await {
                Ok(supplier) => {
                    app.info_message = Some(format!(
                        "{SUCCESS_CREDITS_PURCHASED}: balance now {}",
                        supplier.credits
                    ));
                    // Restart verification from a clean run; the spent
                    // credits only count once the checks see them.
                    app.start_verification(service);
                }
                Err(e) => {
                    app.error_message = Some(format!("Credit purchase failed: {e}"));
                }
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.purchase_confirmation = None;
        }
        _ => {}
    }
    Ok(true)
}

/// Handle events when the verification dialog is open
async fn handle_verification_dialog(
    key: KeyEvent,
    app: &mut App,
    service: &ProjectService,
) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Closing discards any in-flight results
            app.close_verification();
        }
        KeyCode::Enter => {
            let can_proceed = app
                .verification_outcome
                .as_ref()
                .map(|outcome| outcome.can_proceed)
                .unwrap_or(false);
            if can_proceed {
                if let Some(request) = app.verification_request.clone() {
                    let amount = app.activation_amount_value();
                    let svc = service.clone();
                    app.op_task = Some(tokio::spawn(async move {
                        svc.activate_budget_request(&request, amount)
                            .await
                            .context(ERROR_BUDGET_ACTIVATE_FAILED)
                            .map(|(budget, message)| format!("{message}: {}", budget.category))
                    }));
                }
                app.close_verification();
                app.activation_category.clear();
                app.activation_amount.clear();
            }
        }
        KeyCode::Char('p') => {
            let deficit = app
                .verification_outcome
                .as_ref()
                .map(|outcome| outcome.credit_deficit())
                .unwrap_or(0);
            if deficit > 0 {
                app.purchase_confirmation = Some(deficit);
            }
        }
        KeyCode::Char('R') => {
            // Retry only after the previous run settled
            if app.verification_outcome.is_some() {
                app.start_verification(service);
            }
        }
        _ => {}
    }
    Ok(true)
}

/// Handle events when the budget activation dialog is open
fn handle_budget_activation(key: KeyEvent, app: &mut App, service: &ProjectService) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.activating_budget = false;
            app.activation_category.clear();
            app.activation_amount.clear();
        }
        KeyCode::Tab => {
            app.activation_field = match app.activation_field {
                ActivationField::Category => ActivationField::Amount,
                ActivationField::Amount => ActivationField::Category,
            };
        }
        KeyCode::Enter => {
            if !app.activation_category.trim().is_empty() {
                app.activating_budget = false;
                app.start_verification(service);
            }
        }
        KeyCode::Backspace => {
            match app.activation_field {
                ActivationField::Category => app.activation_category.pop(),
                ActivationField::Amount => app.activation_amount.pop(),
            };
        }
        KeyCode::Char(c) => match app.activation_field {
            ActivationField::Category => app.activation_category.push(c),
            ActivationField::Amount => {
                if c.is_ascii_digit() || c == '.' {
                    app.activation_amount.push(c);
                }
            }
        },
        _ => {}
    }
    true
}

/// Handle events when the document upload dialog is open
async fn handle_document_upload(
    key: KeyEvent,
    app: &mut App,
    service: &ProjectService,
) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            app.uploading_document = false;
            app.upload_path.clear();
        }
        KeyCode::Enter => {
            let path = app.upload_path.trim().to_string();
            if path.is_empty() {
                return Ok(true);
            }
            let Some(project) = app.selected_project() else {
                return Ok(true);
            };
            let project_id = project.remote_id.clone();
            let svc = service.clone();
            app.op_task = Some(tokio::spawn(async move {
                svc.upload_document(&project_id, &PathBuf::from(path))
                    .await
                    .context(ERROR_DOCUMENT_UPLOAD_FAILED)
                    .map(|document| format!("{SUCCESS_DOCUMENT_UPLOADED}: {}", document.name))
            }));
            app.uploading_document = false;
            app.upload_path.clear();
        }
        KeyCode::Backspace => {
            app.upload_path.pop();
        }
        KeyCode::Char(c) => {
            app.upload_path.push(c);
        }
        _ => {}
    }
    Ok(true)
}

/// Handle events when the document delete confirmation is open
async fn handle_delete_confirmation(
    key: KeyEvent,
    app: &mut App,
    service: &ProjectService,
) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(document_id) = app.delete_document_confirmation.take() {
                let svc = service.clone();
                app.op_task = Some(tokio::spawn(async move {
                    svc.delete_document(&document_id)
                        .await
                        .map(|()| SUCCESS_DOCUMENT_DELETED.to_string())
                }));
            }
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.delete_document_confirmation = None;
        }
        _ => {}
    }
    Ok(true)
}

/// Handle events when the file versions dialog is open
fn handle_file_versions_dialog(key: KeyEvent, app: &mut App) -> bool {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('f')) {
        app.showing_file_versions = false;
        app.file_versions.clear();
    }
    true
}

/// Handle events when the project version selector is open
async fn handle_version_selector(
    key: KeyEvent,
    app: &mut App,
    service: &ProjectService,
) -> Result<bool> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.selecting_version = false;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.selected_version_index + 1 < app.project_versions.len() {
                app.selected_version_index += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.selected_version_index = app.selected_version_index.saturating_sub(1);
        }
        KeyCode::Enter => {
            let Some(project) = app.selected_project() else {
                return Ok(true);
            };
            let Some(version) = app.project_versions.get(app.selected_version_index) else {
                return Ok(true);
            };
            let project_id = project.remote_id.clone();
            let version_id = version.remote_id.clone();
            match service.select_project_version(&project_id, &version_id).await {
                Ok(()) => {
                    app.project_versions = service.get_project_versions(&project_id).await?;
                    app.info_message = Some(SUCCESS_VERSION_SELECTED.to_string());
                    app.selecting_version = false;
                }
                Err(e) => {
                    app.error_message = Some(format!("Version selection failed: {e}"));
                }
            }
        }
        _ => {}
    }
    Ok(true)
}

/// Handle normal navigation and actions
async fn handle_normal_mode(key: KeyEvent, app: &mut App, service: &ProjectService) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('L') => {
            app.show_debug = true;
        }
        KeyCode::Char('r') => {
            app.start_refresh(service);
        }
        KeyCode::Tab => {
            if !app.projects.is_empty() {
                app.selected_project_index = (app.selected_project_index + 1) % app.projects.len();
                app.weather = None;
                app.start_refresh(service);
            }
        }
        KeyCode::Char('b') => {
            app.main_view = MainView::Budgets;
        }
        KeyCode::Char('g') => {
            app.main_view = MainView::Documents;
        }
        KeyCode::Char('o') => {
            app.main_view = MainView::Viewer;
        }
        KeyCode::Char('w') => {
            app.main_view = MainView::Weather;
            app.start_weather_fetch(service);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            move_selection(app, 1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_selection(app, -1);
        }
        KeyCode::Char('a') => {
            if app.main_view == MainView::Budgets {
                if app.supplier_id.is_empty() {
                    app.error_message =
                        Some("No supplier id configured; set [supplier] id in the config".to_string());
                } else {
                    app.activating_budget = true;
                    app.activation_field = ActivationField::Category;
                }
            }
        }
        KeyCode::Char('u') => {
            if app.main_view == MainView::Documents {
                app.uploading_document = true;
            }
        }
        KeyCode::Char('x') => {
            if app.main_view == MainView::Documents {
                let document_id = app.selected_document().map(|d| d.remote_id.clone());
                if document_id.is_some() {
                    app.delete_document_confirmation = document_id;
                }
            }
        }
        KeyCode::Char('f') => {
            if app.main_view == MainView::Documents {
                if let Some(document) = app.selected_document() {
                    let document_id = document.remote_id.clone();
                    app.file_versions = service.get_file_versions(&document_id).await?;
                    app.showing_file_versions = true;
                }
            }
        }
        KeyCode::Char('V') => {
            if let Some(project) = app.selected_project() {
                let project_id = project.remote_id.clone();
                app.project_versions = service.get_project_versions(&project_id).await?;
                app.selected_version_index = 0;
                app.selecting_version = true;
            }
        }
        KeyCode::Char(' ') => {
            if app.main_view == MainView::Viewer {
                if let Some(overlay) = app.selected_overlay().cloned() {
                    match service.toggle_overlay_visibility(&overlay).await {
                        Ok(updated) => {
                            app.overlays[app.selected_overlay_index] = updated;
                        }
                        Err(e) => app.error_message = Some(e.to_string()),
                    }
                }
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            step_opacity(app, service, true).await;
        }
        KeyCode::Char('-') => {
            step_opacity(app, service, false).await;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

async fn step_opacity(app: &mut App, service: &ProjectService, increase: bool) {
    if app.main_view != MainView::Viewer {
        return;
    }
    if let Some(overlay) = app.selected_overlay().cloned() {
        match service.step_overlay_opacity(&overlay, increase).await {
            Ok(updated) => {
                app.overlays[app.selected_overlay_index] = updated;
            }
            Err(e) => app.error_message = Some(e.to_string()),
        }
    }
}

fn move_selection(app: &mut App, delta: i32) {
    let (index, len) = match app.main_view {
        MainView::Budgets => (&mut app.selected_budget_index, app.budgets.len()),
        MainView::Documents => (&mut app.selected_document_index, app.documents.len()),
        MainView::Viewer => (&mut app.selected_overlay_index, app.overlays.len()),
        MainView::Weather => return,
    };
    if len == 0 {
        return;
    }
    if delta > 0 {
        *index = (*index + 1).min(len - 1);
    } else {
        *index = index.saturating_sub(1);
    }
}
