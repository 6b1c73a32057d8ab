use anyhow::Context;
use dotenv::dotenv;
use finki_timetable::{
    DirectoryView, Entry, Extractor, Grid, GridPublisher, JsonFilePublisher, LoadFromEnv,
    PublishingConfig, ScrapingConfig, SheetsPublisher, extract_class_schedule,
    extract_subject_schedule,
};

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::{info, warn};

async fn dump_entries(entries: &[Entry], path: &std::path::Path) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(entries)?;
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("failed to write entries to {}", path.display()))?;
    info!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let scraping_config = ScrapingConfig::new()?;
    let publishing_config = PublishingConfig::load_from_env()?;
    let extractor = Extractor::new(scraping_config.tolerances)?;
    let mut view = DirectoryView::open(&scraping_config.snapshot_dir)?;

    let class_data = match &scraping_config.class_name {
        Some(class_name) => extract_class_schedule(
            &mut view,
            &extractor,
            class_name,
            &scraping_config.class_subjects,
        ),
        None => vec![],
    };
    let subject_data = extract_subject_schedule(
        &mut view,
        &extractor,
        &scraping_config.additional_subjects,
    );
    info!(
        "Extracted {} class entries and {} subject entries",
        class_data.len(),
        subject_data.len()
    );

    let mut all_schedule_data = class_data;
    all_schedule_data.extend(subject_data);
    if all_schedule_data.is_empty() {
        warn!("No timetable entries were extracted");
    }

    if let Some(path) = &publishing_config.entries_dump_path {
        dump_entries(&all_schedule_data, path).await?;
    }

    let grid = Grid::assemble(&all_schedule_data);
    if grid.overwritten() > 0 {
        warn!(
            "{} timetable cells were written more than once, later entries kept",
            grid.overwritten()
        );
    }
    let rows = grid.to_rows();

    match publishing_config.sheets_credentials() {
        Some((api_url, access_token)) => {
            info!("Publishing to spreadsheet {api_url}");
            SheetsPublisher::new(api_url, access_token)?
                .publish(&publishing_config.worksheet_name, &rows)
                .await?
        }
        None => {
            JsonFilePublisher::new(&publishing_config.output_path)
                .publish(&publishing_config.worksheet_name, &rows)
                .await?
        }
    }
    Ok(())
}
