//! Command-line surface of the host.
//!
//! Every invocation restores the session, applies one action and prints the
//! resulting wizard view as JSON.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use ju_app::{NavOutcome, WizardSession, WizardView};
use ju_core::form::{DobParts, FieldName};
use ju_core::media::{IngestOutcome, MediaFile, MediaInput};

#[derive(Debug, Parser)]
#[command(name = "joinus", version, about = "Three-step onboarding wizard")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the current view
    Show,
    /// Set a field value, e.g. `set firstName Bat`
    Set { field: String, value: String },
    /// Mark a field as touched
    Touch { field: String },
    /// Set the date of birth from its parts
    Dob {
        year: String,
        month: String,
        day: String,
    },
    /// Continue to the next step
    Next,
    /// Go back one step
    Back,
    /// Finish from the last step
    Submit,
    /// Discard everything and start over
    Reset,
    /// Use a file as the profile image
    Attach {
        path: PathBuf,
        /// Declared media type; guessed from the extension when omitted
        #[arg(long)]
        media_type: Option<String>,
        /// Deliver the file as a drop instead of a picker selection
        #[arg(long)]
        drop: bool,
    },
    /// Remove the profile image
    ClearImage,
}

fn parse_field(name: &str) -> anyhow::Result<FieldName> {
    FieldName::parse(name).with_context(|| {
        let known: Vec<&str> = FieldName::ALL.iter().map(|f| f.as_str()).collect();
        format!("unknown field `{name}`, expected one of: {}", known.join(", "))
    })
}

fn log_navigation(action: &str, outcome: &NavOutcome) {
    match outcome {
        NavOutcome::Moved { from, to } => {
            info!(action, from = from.number(), to = to.number(), "moved")
        }
        NavOutcome::Completed => info!(action, "wizard completed"),
        NavOutcome::Blocked(errors) => info!(action, errors = errors.len(), "step has errors"),
        NavOutcome::Unchanged => info!(action, "nothing to do"),
    }
}

fn outcome_label(outcome: &IngestOutcome) -> &'static str {
    match outcome {
        IngestOutcome::Accepted(_) => "accepted",
        IngestOutcome::Rejected { .. } => "rejected",
        IngestOutcome::Failed { .. } => "failed",
        IngestOutcome::Empty => "empty",
    }
}

/// Apply one command to the session and return the resulting view.
pub async fn execute(command: Command, session: &WizardSession) -> anyhow::Result<WizardView> {
    match command {
        Command::Show => {}
        Command::Set { field, value } => {
            let field = parse_field(&field)?;
            session.controller().await.set_field(field, value);
        }
        Command::Touch { field } => {
            let field = parse_field(&field)?;
            session.controller().await.mark_touched(field);
        }
        Command::Dob { year, month, day } => {
            session
                .controller()
                .await
                .set_dob_parts(DobParts::new(year, month, day));
        }
        Command::Next => log_navigation("next", &session.controller().await.go_next()),
        Command::Back => log_navigation("back", &session.controller().await.go_back()),
        Command::Submit => log_navigation("submit", &session.controller().await.submit()),
        Command::Reset => session.controller().await.reset(),
        Command::Attach {
            path,
            media_type,
            drop,
        } => {
            let file = match media_type {
                Some(media_type) => MediaFile::new(path, media_type),
                None => MediaFile::from_path(path),
            };
            let input = if drop {
                MediaInput::Dropped(vec![file])
            } else {
                MediaInput::Picked(vec![file])
            };
            let report = session.attach_profile_image(input).await;
            info!(
                applied = report.applied,
                outcome = outcome_label(&report.outcome),
                "profile image attach finished"
            );
        }
        Command::ClearImage => session.controller().await.clear_profile_image(),
    }

    Ok(session.view().await)
}
