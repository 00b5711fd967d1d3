use deid_core::api::{
    AppConfig, ArtifactRef, Candidate, ControllerArgs, DownloadAction, NoticeLevel,
    RedactionController, Services, SubmitOutcome, WorkflowError, WorkflowEvent, WorkflowState,
};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use super::cli::RedactArgs;
use super::{resolve_out, write_out};
use crate::error::CliError;

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(100);
    let style = ProgressStyle::with_template("{spinner} {msg} [{bar:40}] {pos:>3}%")
        .map(|s| s.progress_chars("=> "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    bar.set_style(style);
    bar
}

fn render(bar: &ProgressBar, event: WorkflowEvent) {
    match event {
        WorkflowEvent::Progress(v) => bar.set_position(v.round() as u64),
        WorkflowEvent::StateChanged(WorkflowState::Submitting { .. }) => {
            bar.set_message("Processing your file...");
        }
        WorkflowEvent::StateChanged(WorkflowState::Succeeded(_)) => {
            bar.finish_with_message("Processing complete!");
        }
        WorkflowEvent::StateChanged(WorkflowState::Failed(_)) => {
            bar.abandon_with_message("Processing failed");
        }
        WorkflowEvent::StateChanged(WorkflowState::Idle) => {}
        WorkflowEvent::Notice(n) => {
            let mark = match n.level {
                NoticeLevel::Success => "✓",
                NoticeLevel::Error => "✗",
                NoticeLevel::Info => "•",
            };
            bar.println(format!("{mark} {}: {}", n.title, n.description));
        }
    }
}

pub async fn run(mut cfg: AppConfig, services: &Services, args: RedactArgs) -> Result<i32, CliError> {
    if let Some(mode) = args.mode {
        cfg.service.mode = mode;
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let ctrl = RedactionController::new(ControllerArgs::from_config(
        &cfg,
        services.redaction.clone(),
        Some(tx),
    ));

    let candidate = Candidate::from_path(&args.file).await?;
    let artifact = ctrl.select(candidate)?;
    println!("{} ({})", artifact.name(), artifact.size_display());

    ctrl.set_scope(args.scope);
    for entity in &args.entities {
        ctrl.add_entity_type(*entity);
    }
    ctrl.set_consent_tier(args.consent);
    ctrl.set_authorization_acknowledged(args.authorized);

    let bar = progress_bar();
    let outcome = {
        let submit = ctrl.submit();
        tokio::pin!(submit);
        loop {
            tokio::select! {
                res = &mut submit => break res,
                Some(ev) = rx.recv() => render(&bar, ev),
            }
        }
    };
    while let Ok(ev) = rx.try_recv() {
        render(&bar, ev);
    }

    match outcome {
        Ok(SubmitOutcome::Settled(_)) => {}
        Ok(SubmitOutcome::Ignored) => return Ok(1),
        Err(e @ WorkflowError::ValidationBlocked { .. }) => {
            bar.finish_and_clear();
            eprintln!("{e}");
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(panel) = ctrl.status_panel() {
        println!("{panel}");
    }
    if let Some(presentation) = ctrl.presentation() {
        println!("{presentation}");
    }

    if ctrl.state().failure().is_some() {
        return Ok(1);
    }

    match ctrl.download() {
        Some(DownloadAction::Materialize { file_name, bytes }) => match &args.out {
            Some(out) => {
                let path = resolve_out(out, &file_name);
                write_out(&path, &bytes).await?;
                println!("saved {}", path.display());
            }
            None => println!("payload held in memory ({} bytes); pass --out to save", bytes.len()),
        },
        Some(DownloadAction::OpenReference { url }) => {
            let job_id = ctrl
                .state()
                .result()
                .and_then(|r| r.job_id())
                .map(str::to_string);
            match (&args.out, job_id) {
                (Some(out), Some(job_id)) => {
                    let fetched = services
                        .fetcher
                        .fetch(&ArtifactRef::Download { job_id })
                        .await?;
                    let path = resolve_out(out, &format!("deidentified-{}", artifact.name()));
                    write_out(&path, &fetched.bytes).await?;
                    println!("saved {}", path.display());
                }
                _ => println!("download: {url}"),
            }
        }
        None => {}
    }
    Ok(0)
}
