//! comment-form - inspect and validate structured comment forms
//!
//! Reads an event type from the schema directory and either prints rendering
//! hints for its comment form or validates a submission against it.

use anyhow::{bail, Context, Result};
use comment_forms::config::FormsConfig;
use comment_forms::model::{FormInstance, InputHints, Submission};
use comment_forms::schema::EventTypeId;
use comment_forms::source::{CommentForms, FileSchemaSource};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: comment-form <event-type-id> [submission.json]";

#[tokio::main]
async fn main() -> Result<()> {
    let config = FormsConfig::load()?;

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(id) = args.next() else {
        bail!(USAGE);
    };
    let event_type_id = EventTypeId(
        id.parse()
            .with_context(|| format!("Invalid event type id {id:?}"))?,
    );
    let submission_path = args.next();

    let source = FileSchemaSource::new(config.schema_dir());
    let forms = CommentForms::new(source, config.parser());
    let loaded = forms.load(event_type_id).await?;
    tracing::info!(
        "Loaded event type {} ({}) with {} comment form fields",
        loaded.event_type.id,
        loaded.event_type.name,
        loaded.model.len()
    );

    let Some(path) = submission_path else {
        let hints = InputHints::for_model(&loaded.model);
        println!("{}", serde_json::to_string_pretty(&hints)?);
        return Ok(());
    };

    let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {path}"))?;
    let submission: Submission =
        serde_json::from_str(&content).with_context(|| format!("Invalid submission in {path}"))?;

    let instance = FormInstance::new(loaded.model, &submission);
    let failures = instance.validate();
    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("{failure}");
        }
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&instance.serialize())?);
    Ok(())
}
