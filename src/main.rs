use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use bat::PrettyPrinter;
use clap::Parser;
use cliclack::spinner;
use console::style;
use tracing_subscriber::EnvFilter;

use doclens::clipboard::SystemClipboard;
use doclens::config::backend::ORIGIN_VERIFY_VAR;
use doclens::config::{BackendConfig, ClientConfig};
use doclens::params::MAX_TOPICS;
use doclens::transport::HttpTransport;
use doclens::{Dispatcher, ToolInput, ToolKind};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tool to run: search, ask, read, recommend, list-regions or
    /// get-regional-availability (backend names such as aws___ask also work)
    tool: ToolKind,

    /// Search phrase (search, ask)
    #[arg(short, long, default_value = "")]
    phrase: String,

    /// Topic to narrow the search, repeatable up to three times (search, ask)
    #[arg(long = "topic")]
    topics: Vec<String>,

    /// Number of top hits the answer reads (ask, default 3)
    #[arg(long)]
    read_top_k: Option<String>,

    /// Characters read per page (ask, default 6000)
    #[arg(long)]
    read_max_length: Option<String>,

    /// Documentation page URL (read, recommend)
    #[arg(short, long, default_value = "")]
    url: String,

    /// Maximum characters to fetch (read)
    #[arg(long)]
    max_length: Option<String>,

    /// Character offset to start from (read)
    #[arg(long)]
    start_index: Option<String>,

    /// Region code (get-regional-availability)
    #[arg(long, default_value = "")]
    region: String,

    /// Resource type, e.g. cfn or api (get-regional-availability)
    #[arg(long, default_value = "")]
    resource_type: String,

    /// Comma-separated resource filters (get-regional-availability)
    #[arg(long, default_value = "")]
    filters: String,

    /// Pagination token (get-regional-availability)
    #[arg(long, default_value = "")]
    next_token: String,

    /// Parameters as a raw JSON object, overriding the individual flags (get-regional-availability)
    #[arg(long)]
    params_json: Option<String>,

    /// Backend base URL (can also be set via DOCLENS_BASE_URL environment variable)
    #[arg(long)]
    base_url: Option<String>,

    /// Origin verification secret (can also be set via DOCLENS_ORIGIN_VERIFY environment variable)
    #[arg(long)]
    origin_verify: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write the HTML to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print the raw response to stderr
    #[arg(long)]
    raw: bool,

    /// Show the fetched page as highlighted Markdown (read)
    #[arg(long)]
    preview: bool,

    /// Copy the fetched page's Markdown to the clipboard (read)
    #[arg(long)]
    copy: bool,
}

impl Cli {
    fn tool_input(&self) -> ToolInput {
        ToolInput {
            search_phrase: self.phrase.clone(),
            topics: self.topics.clone(),
            read_top_k: self.read_top_k.clone(),
            read_max_length: self.read_max_length.clone(),
            url: self.url.clone(),
            max_length: self.max_length.clone(),
            start_index: self.start_index.clone(),
            region: self.region.clone(),
            resource_type: self.resource_type.clone(),
            filters: self.filters.clone(),
            next_token: self.next_token.clone(),
            params_json: self.params_json.clone(),
        }
    }

    fn backend_config(&self) -> Result<BackendConfig> {
        // Flags win over environment variables
        let config = match self.base_url.as_deref() {
            Some(url) => BackendConfig::new(url).with_origin_verify(env::var(ORIGIN_VERIFY_VAR).ok()),
            None => BackendConfig::from_env().context(
                "Backend URL must be provided via --base-url or DOCLENS_BASE_URL environment variable",
            )?,
        };
        let config = match &self.origin_verify {
            Some(secret) => config.with_origin_verify(Some(secret.clone())),
            None => config,
        };
        Ok(match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        })
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.topics.len() > MAX_TOPICS {
        eprintln!(
            "{}",
            style(format!("Only the first {MAX_TOPICS} topics are sent")).yellow()
        );
    }

    let transport = HttpTransport::new(cli.backend_config()?)?;
    let mut dispatcher = Dispatcher::new(transport);
    dispatcher.select_tool(cli.tool);

    let spin = spinner();
    spin.start(format!("{} {}", cli.tool, style("running").dim()));
    let outcome = dispatcher.run(&cli.tool_input());
    match &outcome {
        Ok(()) => spin.stop(dispatcher.status().text_at(Instant::now())),
        Err(err) => spin.error(err.to_string().lines().next().unwrap_or_default()),
    }

    if cli.raw {
        if let Some(raw) = dispatcher.raw() {
            eprintln!("{}\n{}", style("Raw response").dim(), raw);
        }
    }

    match &cli.out {
        Some(path) => {
            fs::write(path, dispatcher.html())
                .with_context(|| format!("could not write {}", path.display()))?;
            eprintln!("{} {}", style("HTML written to").dim(), path.display());
        }
        None => println!("{}", dispatcher.html()),
    }

    if let Some(markdown) = dispatcher.last_read_markdown() {
        if cli.preview {
            render(markdown)?;
        }
        if cli.copy {
            let copied = SystemClipboard::new().and_then(|mut cb| dispatcher.copy_last_read(&mut cb));
            match copied {
                Ok(()) => eprintln!("{}", style("✓ Markdown copied").green()),
                Err(err) => eprintln!("{}", style(err).yellow()),
            }
        }
    } else if cli.copy && outcome.is_ok() {
        eprintln!("{}", style("Nothing to copy").dim());
    }

    Ok(if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn render(content: &str) -> Result<()> {
    PrettyPrinter::new()
        .input_from_bytes(content.as_bytes())
        .language("markdown")
        .print()
        .map_err(|e| anyhow!("could not print preview: {e}"))?;
    Ok(())
}
