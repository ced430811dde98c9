use anyhow::Result;

use sitedesk::backend::factory::create_backend;
use sitedesk::config::Config;
use sitedesk::logger::{init_file_logging, Logger};
use sitedesk::service::ProjectService;
use sitedesk::ui;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_file_logging(&config.logging)?;

    let (backend_type, credentials) = match config.resolve_default_backend() {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("\nTo use this app:");
            eprintln!("1. Generate a config with a [backends] section, or keep the default demo backend");
            eprintln!("2. For the hosted backend, export SITEDESK_API_KEY and SITEDESK_ACCESS_TOKEN");
            eprintln!("3. Set [supplier] id to your supplier profile id");
            return Ok(());
        }
    };

    let backend = create_backend(&backend_type, &credentials)?;
    let service = ProjectService::new(backend, Logger::new());

    ui::run_app(config, service).await?;

    Ok(())
}
