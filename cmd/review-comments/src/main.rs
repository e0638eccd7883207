//! # review-comments
//!
//! Fetches a review and its comments from the portal backend, threads the
//! comments and prints the review page markup to stdout.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use configs::{LogSettings, Settings};
use domains::ReviewId;
use services::CommentService;
use storage_adapters::HttpCommentRepo;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the review page renderer.
#[derive(Debug, Parser)]
#[command(name = "review-comments", about = "Render a review and its threaded comments as HTML")]
struct Args {
    /// Backend id of the review
    review_id: i64,

    /// Settings file replacing `config/portal` (env and `.env` still apply)
    #[arg(long, short)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = Settings::load_with(args.config.as_deref()).context("loading settings")?;
    init_tracing(&settings.log);

    let review_id = ReviewId(args.review_id);
    let repo = Arc::new(HttpCommentRepo::new(
        settings.api.base_url.as_str(),
        settings.api.timeout(),
        settings.auth.access_token.take(),
    )?);
    let service = CommentService::new(repo.clone(), repo);

    let section = service
        .load_section(review_id, settings.auth.nickname.as_deref())
        .await
        .with_context(|| format!("loading review {review_id}"))?;
    info!(
        review = %section.review.title,
        comments = section.tree.len(),
        "review page loaded"
    );

    let html = ui::render_review_page(&section.review_view, &section.view)
        .context("rendering review page")?;
    println!("{html}");
    Ok(())
}

// Logs go to stderr so stdout carries only the markup.
fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
