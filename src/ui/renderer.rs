//! Main UI rendering and coordination

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::Duration;

use super::app::{App, MainView};
use super::components::{
    dialogs::{
        BudgetActivationDialog, CreditPurchaseDialog, DebugDialog, DeleteConfirmationDialog,
        DocumentUploadDialog, ErrorDialog, FileVersionsDialog, InfoDialog, VerificationDialog,
        VersionSelectorDialog,
    },
    BudgetsList, DocumentsPanel, HelpPanel, Sidebar, StatusBar, ViewerPanel, WeatherPanel,
};
use super::events::handle_events;
use super::layout::LayoutManager;
use crate::config::Config;
use crate::service::ProjectService;

/// Run the main TUI application
pub async fn run_app(config: Config, service: ProjectService) -> Result<()> {
    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    if config.ui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let sidebar_width = config.ui.sidebar_width;
    let mut app = App::new(&config);

    // Load the project list up front so the sidebar renders immediately
    match service.fetch_projects().await {
        Ok(projects) => {
            app.projects = projects;
            app.loading = false;
            app.start_refresh(&service);
            if app.main_view == MainView::Weather {
                app.start_weather_fetch(&service);
            }
        }
        Err(e) => {
            app.loading = false;
            app.error_message = Some(format!("Failed to load projects: {e}"));
        }
    }

    // Main application loop
    let res = run_ui(&mut terminal, &mut app, &service, sidebar_width).await;

    // Cleanup
    disable_raw_mode()?;
    if config.ui.mouse_enabled {
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    } else {
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    }
    terminal.show_cursor()?;

    res
}

/// Main UI loop
async fn run_ui(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    service: &ProjectService,
    sidebar_width: u16,
) -> Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app, service, sidebar_width))?;

        // Handle events with a timeout to allow for async operations
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    let _handled = handle_events(Event::Key(key), app, service).await?;
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        poll_background_tasks(app, service).await;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Drain progress channels and collect finished background tasks
async fn poll_background_tasks(app: &mut App, service: &ProjectService) {
    // Progressive verification snapshots
    if let Some(receiver) = app.verify_progress.as_mut() {
        while let Ok(checks) = receiver.try_recv() {
            app.verification_checks = checks;
        }
    }

    // Terminal verification report
    if let Some(handle) = app.verify_task.as_ref() {
        if handle.is_finished() {
            if let Some(handle) = app.verify_task.take() {
                match handle.await {
                    Ok(report) => {
                        app.verification_checks = report.checks;
                        app.verification_outcome = Some(report.outcome);
                    }
                    Err(join_err) => {
                        if !join_err.is_cancelled() {
                            app.error_message = Some(format!("Verification task error: {join_err}"));
                        }
                    }
                }
                app.verify_progress = None;
            }
        }
    }

    // Project data refresh
    if let Some(handle) = app.refresh_task.as_ref() {
        if handle.is_finished() {
            if let Some(handle) = app.refresh_task.take() {
                match handle.await {
                    Ok(Ok(data)) => app.apply_project_data(data),
                    Ok(Err(e)) => app.error_message = Some(format!("Refresh failed: {e}")),
                    Err(join_err) => {
                        app.error_message = Some(format!("Refresh task error: {join_err}"))
                    }
                }
                app.refreshing = false;
            }
        }
    }

    // Weather fetch
    if let Some(handle) = app.weather_task.as_ref() {
        if handle.is_finished() {
            if let Some(handle) = app.weather_task.take() {
                match handle.await {
                    Ok(Ok(report)) => app.weather = Some(report),
                    Ok(Err(e)) => {
                        app.error_message =
                            Some(format!("{}: {e}", crate::constants::ERROR_WEATHER_FAILED))
                    }
                    Err(join_err) => {
                        app.error_message = Some(format!("Weather task error: {join_err}"))
                    }
                }
            }
        }
    }

    // Generic backend operations (activation, upload, delete)
    if let Some(handle) = app.op_task.as_ref() {
        if handle.is_finished() {
            if let Some(handle) = app.op_task.take() {
                match handle.await {
                    Ok(Ok(message)) => {
                        app.info_message = Some(message);
                        app.start_refresh(service);
                    }
                    Ok(Err(e)) => app.error_message = Some(format!("Operation failed: {e}")),
                    Err(join_err) => {
                        app.error_message = Some(format!("Operation task error: {join_err}"))
                    }
                }
            }
        }
    }
}

/// Main UI rendering function
fn render_ui(f: &mut ratatui::Frame, app: &mut App, service: &ProjectService, sidebar_width: u16) {
    let chunks = LayoutManager::main_layout(f.area());
    let top_chunks = LayoutManager::top_pane_layout(chunks[0], sidebar_width);

    Sidebar::render(f, top_chunks[0], app);
    match app.main_view {
        MainView::Budgets => BudgetsList::render(f, top_chunks[1], app),
        MainView::Documents => DocumentsPanel::render(f, top_chunks[1], app),
        MainView::Viewer => ViewerPanel::render(f, top_chunks[1], app),
        MainView::Weather => WeatherPanel::render(f, top_chunks[1], app),
    }
    StatusBar::render(f, chunks[1], app);

    // Dialogs, innermost last so it draws on top
    BudgetActivationDialog::render(f, app);
    VerificationDialog::render(f, app);
    CreditPurchaseDialog::render(f, app);
    DocumentUploadDialog::render(f, app);
    DeleteConfirmationDialog::render(f, app);
    FileVersionsDialog::render(f, app);
    VersionSelectorDialog::render(f, app);

    // Messages have priority over other dialogs
    if app.error_message.is_some() {
        ErrorDialog::render(f, app);
    } else if app.info_message.is_some() {
        InfoDialog::render(f, app);
    }

    DebugDialog::render(f, app, service.logger());

    // Help panel last to ensure it's on top of everything
    if app.show_help {
        HelpPanel::render(f, app);
    }
}
