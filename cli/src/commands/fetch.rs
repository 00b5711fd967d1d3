use deid_core::api::{ArtifactRef, PreviewKind, Services};

use super::cli::{FetchArgs, FetchKind};
use super::{resolve_out, write_out};
use crate::error::CliError;

fn target(args: &FetchArgs) -> ArtifactRef {
    let job_id = args.job_id.clone();
    match args.kind {
        FetchKind::Original => ArtifactRef::Preview {
            job_id,
            kind: PreviewKind::Original,
        },
        FetchKind::Redacted => ArtifactRef::Preview {
            job_id,
            kind: PreviewKind::Redacted,
        },
        FetchKind::Download => ArtifactRef::Download { job_id },
    }
}

pub async fn run(services: &Services, args: FetchArgs) -> Result<i32, CliError> {
    let fetched = services.fetcher.fetch(&target(&args)).await?;
    let suffix = match args.kind {
        FetchKind::Original => "original",
        FetchKind::Redacted => "redacted",
        FetchKind::Download => "download",
    };
    let path = resolve_out(&args.out, &format!("{}-{suffix}", args.job_id));
    write_out(&path, &fetched.bytes).await?;
    println!(
        "saved {} ({} bytes{})",
        path.display(),
        fetched.bytes.len(),
        fetched
            .content_type
            .map(|c| format!(", {c}"))
            .unwrap_or_default()
    );
    Ok(0)
}
