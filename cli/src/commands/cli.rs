use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args as ClapArgs, Parser, Subcommand};
use deid_core::api::{ConsentTier, EntityCategory, IntegrationMode, RedactionScope, StatusFilter};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Submit documents for PII redaction and review past jobs")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./deid.toml, then ~/.deid/deid.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Redaction service base URL; overrides config and DEID_API_URL.
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Redact one document or image.
    #[command(after_help = redact_help())]
    Redact(RedactArgs),
    /// List past jobs.
    History(HistoryArgs),
    /// Recent activity and summary figures.
    Dashboard,
    /// Download a preview or the redacted artifact of a past job.
    Fetch(FetchArgs),
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RedactArgs {
    #[arg(long)]
    pub file: PathBuf,

    /// full-pii, partial-pii or custom
    #[arg(long, value_parser = RedactionScope::from_str)]
    pub scope: RedactionScope,

    /// Entity tag for the custom scope (PERSON, ORG, ...). Repeatable.
    #[arg(long = "entity", action = clap::ArgAction::Append, value_parser = EntityCategory::from_str)]
    pub entities: Vec<EntityCategory>,

    /// full, limited or none
    #[arg(long, value_parser = ConsentTier::from_str)]
    pub consent: ConsentTier,

    /// Confirm you are authorized to process this document.
    #[arg(long, default_value_t = false)]
    pub authorized: bool,

    /// descriptor or payload; overrides config.
    #[arg(long, value_parser = IntegrationMode::from_str)]
    pub mode: Option<IntegrationMode>,

    /// Write the protected file here; a directory gets deidentified-FILE inside it.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn redact_help() -> String {
    let mut help = String::from("Scopes:\n");
    for scope in RedactionScope::ALL {
        help.push_str(&format!("  {:<12} {}\n", scope.ui_label(), scope.display_name()));
    }
    help.push_str("\nConsent tiers:\n");
    for tier in ConsentTier::ALL {
        help.push_str(&format!(
            "  {:<12} {}. {}\n",
            tier.ui_label(),
            tier.display_name(),
            tier.description()
        ));
    }
    help
}

#[derive(ClapArgs, Debug, Clone)]
pub struct HistoryArgs {
    /// Case-insensitive filename filter.
    #[arg(long, default_value = "")]
    pub search: String,

    #[arg(long, default_value = "all", value_parser = StatusFilter::from_str)]
    pub status: StatusFilter,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    Original,
    Redacted,
    Download,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct FetchArgs {
    #[arg(long)]
    pub job_id: String,

    #[arg(long, value_enum, default_value_t = FetchKind::Download)]
    pub kind: FetchKind,

    #[arg(long)]
    pub out: PathBuf,
}
