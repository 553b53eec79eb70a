mod bootstrap;
mod report;

use anyhow::{Context, Result};
use chrono::Local;
use workload_core::models::PersonWorkload;
use workload_core::settings::Settings;
use workload_runtime::loader::load_people;
use workload_runtime::roster::Roster;

use crate::report::{OutputFormat, ReportContext};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Workload Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Format: {}", settings.view, settings.format);

    let data_dir = settings
        .data_dir
        .clone()
        .or_else(bootstrap::discover_data_dir)
        .context("no task directory found; pass --data-dir")?;

    let roster = Roster::resolve(&data_dir, settings.roster.as_deref())?;
    if roster.is_empty() {
        tracing::warn!("no people found in {}", data_dir.display());
    }

    let team = load_people(&roster, &data_dir).await;
    let selected: Vec<PersonWorkload> = team
        .iter()
        .filter(|p| settings.includes_person(&p.name))
        .cloned()
        .collect();
    tracing::info!("Loaded {} people, reporting on {}", team.len(), selected.len());

    let today = Local::now().date_naive();
    let (year, month) = settings.heatmap_month(today);
    let ctx = ReportContext { year, month, today };

    let output = report::render(
        &settings.view,
        OutputFormat::from_name(&settings.format),
        &team,
        &selected,
        &ctx,
    )?;
    println!("{output}");

    Ok(())
}
