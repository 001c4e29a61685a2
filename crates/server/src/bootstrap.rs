use laprec_core::config::{AppConfig, ConfigError, LoadOptions};
use laprec_core::{load_catalog, AppContext, CatalogError, LoadReport, SourceState};
use thiserror::Error;
use tracing::{info, warn};

pub struct Application {
    pub config: AppConfig,
    pub context: AppContext,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog load failed: {0}")]
    Catalog(#[from] CatalogError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        catalog_path = %config.catalog.path.display(),
        "starting application bootstrap"
    );

    let report = load_catalog(&config.catalog.path)?;
    log_load_report(&report);

    Ok(Application { context: AppContext::new(report.catalog), config })
}

fn log_load_report(report: &LoadReport) {
    let source = report.source.display();

    match &report.state {
        SourceState::Loaded => info!(
            event_name = "system.bootstrap.catalog_loaded",
            correlation_id = "bootstrap",
            source = %source,
            records = report.catalog.len(),
            skipped = report.skipped.len(),
            "laptop catalog loaded"
        ),
        SourceState::Missing => warn!(
            event_name = "system.bootstrap.catalog_missing",
            correlation_id = "bootstrap",
            source = %source,
            "catalog source not found, serving an empty catalog"
        ),
        SourceState::Unreadable { reason } => warn!(
            event_name = "system.bootstrap.catalog_unreadable",
            correlation_id = "bootstrap",
            source = %source,
            reason = %reason,
            "catalog source unreadable, serving an empty catalog"
        ),
    }

    for skipped in &report.skipped {
        warn!(
            event_name = "system.bootstrap.record_skipped",
            correlation_id = "bootstrap",
            source = %source,
            index = skipped.index,
            reason = %skipped.reason,
            "skipped malformed catalog record"
        );
    }
}
