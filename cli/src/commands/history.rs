use deid_core::api::{AppConfig, Endpoints, HistoryEntry, HistoryView, PreviewKind, Services};

use super::cli::HistoryArgs;
use crate::error::CliError;

fn row(entry: &HistoryEntry, endpoints: &Endpoints) -> String {
    let status = entry.status.map(|s| s.badge()).unwrap_or("Unknown");
    let time = entry
        .processing_time_seconds
        .map(|t| format!("{t:.2}s"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{:<12} {:<32} {:<20} {:>8}  {:<10} {}",
        entry.id,
        entry.file_name,
        entry.display_timestamp(),
        time,
        status,
        entry.download_url(endpoints)
    )
}

async fn activate(services: &Services) -> HistoryView {
    let mut view = HistoryView::new();
    view.activate(services.history.as_ref()).await;
    if let Some(message) = view.error() {
        eprintln!("{message}");
    }
    view
}

pub async fn run(cfg: &AppConfig, services: &Services, args: HistoryArgs) -> Result<i32, CliError> {
    let mut view = activate(services).await;
    if view.error().is_some() {
        return Ok(1);
    }
    view.set_search(args.search);
    view.set_status_filter(args.status);

    let endpoints = Endpoints::new(&cfg.service.base_url);
    let rows = view.filtered();
    if rows.is_empty() {
        println!("No redaction history found.");
    }
    for entry in rows {
        println!("{}", row(entry, &endpoints));
    }
    println!("{}", view.stats());
    Ok(0)
}

pub async fn dashboard(cfg: &AppConfig, services: &Services) -> Result<i32, CliError> {
    let view = activate(services).await;
    if view.error().is_some() {
        return Ok(1);
    }
    let endpoints = Endpoints::new(&cfg.service.base_url);
    let summary = view.dashboard(cfg.history.recent_limit);

    println!("Recent Activity");
    if summary.recent.is_empty() {
        println!("  No recent activity.");
    }
    for entry in &summary.recent {
        println!(
            "  {}  Redacted • {}  {}",
            entry.file_name,
            entry.display_timestamp(),
            entry.preview_url(&endpoints, PreviewKind::Redacted)
        );
    }
    println!("Files processed: {}", summary.total);
    println!("Avg processing:  {:.2}s", summary.average_processing_seconds);
    println!("Compliance:      {}", summary.compliance);
    Ok(0)
}
