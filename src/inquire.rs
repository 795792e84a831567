//! Terminal contact form
//!
//! A line-oriented presentation layer over [`FormStateManager`]: collects
//! field values from flags or prompts, enforces required-field presence,
//! dispatches `submit`, and renders the outcome.

use crate::catalog::SERVICES;
use crate::form::{FieldKey, FormStateManager, Outcome, SubmissionTransport};
use clap::Args;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Default, Args)]
pub struct InquireArgs {
    /// Your name
    #[arg(long)]
    pub name: Option<String>,
    /// Email address we should reply to
    #[arg(long)]
    pub email: Option<String>,
    /// Phone number (optional)
    #[arg(long)]
    pub phone: Option<String>,
    /// Service of interest, e.g. furniture or curtains (optional)
    #[arg(long)]
    pub service: Option<String>,
    /// What you would like help with
    #[arg(long)]
    pub message: Option<String>,
    /// Backend base URL; defaults to BACKEND_URL
    #[arg(long)]
    pub backend_url: Option<String>,
    /// Never prompt; fail if a required field is missing
    #[arg(long)]
    pub no_input: bool,
}

impl InquireArgs {
    fn preset(&self, key: FieldKey) -> Option<&str> {
        match key {
            FieldKey::Name => self.name.as_deref(),
            FieldKey::Email => self.email.as_deref(),
            FieldKey::Phone => self.phone.as_deref(),
            FieldKey::Service => self.service.as_deref(),
            FieldKey::Message => self.message.as_deref(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InquireError {
    #[error("Missing required field(s): {0}")]
    MissingFields(String),
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Drive one form session until the visitor stops.
///
/// Returns the outcome of the last submission.
pub async fn run_session<T, R, W>(
    manager: &FormStateManager<T>,
    args: &InquireArgs,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome, InquireError>
where
    T: SubmissionTransport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let interactive = !args.no_input;
    let mut use_presets = true;

    loop {
        for key in FieldKey::ALL {
            let preset = if use_presets { args.preset(key) } else { None };
            match preset {
                Some(value) => manager.update_field(key, value),
                None if interactive => {
                    let session = manager.snapshot();
                    write!(out, "{}: ", prompt_label(key, session.request.get(key)))?;
                    out.flush()?;
                    // End of input keeps whatever is already there
                    if let Some(line) = read_line(input).await? {
                        if !line.is_empty() {
                            manager.update_field(key, line);
                        }
                    }
                }
                None => {}
            }
        }
        use_presets = false;

        let missing = missing_required(manager);
        if !missing.is_empty() {
            if !interactive {
                return Err(InquireError::MissingFields(missing.join(", ")));
            }
            writeln!(out, "Please fill in: {}", missing.join(", "))?;
            if input_exhausted(input).await? {
                return Err(InquireError::MissingFields(missing.join(", ")));
            }
            continue;
        }

        writeln!(out, "Sending...")?;
        manager.submit().await;

        let state = manager.state();
        let (Some(outcome), Some(message)) = (state.outcome(), state.message()) else {
            // submit only returns early while another submission is running
            continue;
        };
        writeln!(out, "{}", message)?;

        let again = match outcome {
            Outcome::Success => "Send another inquiry? [y/N] ",
            Outcome::Failure => "Try again? [y/N] ",
        };
        if !interactive || !confirm(again, input, out).await? {
            return Ok(outcome);
        }

        if outcome == Outcome::Success {
            manager.reset();
        }
    }
}

fn prompt_label(key: FieldKey, current: &str) -> String {
    let mut label = match key {
        FieldKey::Name => "Name".to_string(),
        FieldKey::Email => "Email".to_string(),
        FieldKey::Phone => "Phone (optional)".to_string(),
        FieldKey::Service => {
            let ids: Vec<_> = SERVICES.iter().map(|s| s.id).collect();
            format!("Service (optional; {})", ids.join(", "))
        }
        FieldKey::Message => "Message".to_string(),
    };
    if !current.is_empty() {
        label.push_str(&format!(" [{}]", current));
    }
    label
}

fn missing_required<T: SubmissionTransport>(manager: &FormStateManager<T>) -> Vec<&'static str> {
    let request = manager.request();
    FieldKey::ALL
        .into_iter()
        .filter(|k| k.is_required() && request.get(*k).trim().is_empty())
        .map(FieldKey::as_str)
        .collect()
}

async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

async fn input_exhausted<R: AsyncBufRead + Unpin>(input: &mut R) -> std::io::Result<bool> {
    Ok(input.fill_buf().await?.is_empty())
}

async fn confirm<R, W>(question: &str, input: &mut R, out: &mut W) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", question)?;
    out.flush()?;
    let answer = read_line(input).await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
