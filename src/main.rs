use std::path::PathBuf;
use std::sync::Arc;

use bugzilla_rest_core::core::config::Config;
use bugzilla_rest_core::features::attachments::{
    AttachmentOverrides, BugzillaRestClient, CustomFlag, SubmissionBuilder,
};
use bugzilla_rest_core::modules::source::FileSource;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Attach a file to a Bugzilla bug through the REST API.
///
/// Server and credentials come from BUGZILLA_URL, BUGZILLA_API_KEY or
/// BUGZILLA_USERNAME/BUGZILLA_PASSWORD (a .env file is honored).
#[derive(Debug, Parser)]
#[command(name = "bugzilla-attach")]
#[command(version)]
struct Cli {
    /// Bug to attach the file to
    #[arg(short = 'b', long = "bug", value_name = "ID")]
    bug_id: u64,

    /// File to upload
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Attachment summary shown in the bug
    #[arg(short = 'd', long)]
    description: Option<String>,

    /// Comment added to the bug together with the attachment
    #[arg(short = 'c', long)]
    comment: Option<String>,

    /// MIME type; guessed from the file extension when omitted
    #[arg(long)]
    content_type: Option<String>,

    /// File name reported to the server; defaults to the file's own name
    #[arg(long)]
    file_name: Option<String>,

    #[arg(long)]
    patch: bool,

    #[arg(long)]
    private: bool,

    /// Flag to set, e.g. `review=?` or `review=?:dev@example.org`
    #[arg(long = "flag", value_name = "NAME=STATUS[:REQUESTEE]", value_parser = parse_flag)]
    flags: Vec<CustomFlag>,
}

fn parse_flag(raw: &str) -> Result<CustomFlag, String> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=STATUS, got '{}'", raw))?;
    if name.trim().is_empty() {
        return Err(format!("flag name missing in '{}'", raw));
    }
    let flag = match rest.split_once(':') {
        Some((status, requestee)) => CustomFlag::new(name.trim(), status).with_requestee(requestee),
        None => CustomFlag::new(name.trim(), rest),
    };
    Ok(flag)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded for {}", config.bugzilla.base_url);

    let client = BugzillaRestClient::new(config.bugzilla)?;

    let source = Arc::new(FileSource::new(&cli.file));
    let overrides = AttachmentOverrides {
        description: cli.description,
        content_type: cli.content_type,
        file_name: cli.file_name,
        is_patch: Some(cli.patch),
        is_private: Some(cli.private),
    };

    let mut builder = SubmissionBuilder::for_source(cli.bug_id, &*source)
        .apply_overrides(&overrides)
        .flags(cli.flags);
    if let Some(comment) = cli.comment {
        builder = builder.comment(comment);
    }

    let ids = client
        .submit(builder, source)
        .await
        .map_err(|e| anyhow::anyhow!("Attachment to bug {} failed: {}", cli.bug_id, e))?;

    for id in ids {
        println!("{}", id);
    }

    Ok(())
}
