use anyhow::{Context, Result};
use book_finder::app::{parse_command, Command, CommandError, Outcome, SearchTicket, HELP_TEXT};
use book_finder::config::{
    find_config_file, get_config, load_config, write_default_config, Config, LoggingConfig,
};
use book_finder::models::{Book, SearchMode};
use book_finder::sources::{CatalogAdapter, CatalogSource, GoogleBooksSource};
use book_finder::ui::{self, Status};
use book_finder::{Dispatcher, RenderSpec, UiAction};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Finder - Search a book catalog, then filter, sort and inspect the results
#[derive(Parser, Debug)]
#[command(name = "book-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search a book catalog, then filter, sort and inspect the results", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog endpoint (overrides the config file)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long)]
    timeout: Option<u64>,

    /// Write the effective configuration to this path and exit
    #[arg(long)]
    init_config: Option<PathBuf>,

    /// Run this search on startup
    #[arg(long)]
    query: Option<String>,

    /// Search mode for --query (title, author or isbn)
    #[arg(long, short, default_value = "title")]
    mode: SearchMode,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Text on a terminal, JSON otherwise
    Auto,
    /// Human-readable text
    Text,
    /// One JSON document per view change
    Json,
}

/// Everything the actor loop reacts to.
#[derive(Debug)]
enum Event {
    Line(String),
    SearchDone(SearchTicket, Vec<Book>),
    /// Stdin ended, with the read error if it did not end cleanly.
    InputClosed(Option<String>),
}

/// Where and how views and messages are written.
struct Output {
    json: bool,
    color: bool,
    interactive: bool,
}

impl Output {
    fn new(format: OutputFormat) -> Self {
        let interactive = ui::is_terminal();
        let json = match format {
            OutputFormat::Auto => !interactive,
            OutputFormat::Text => false,
            OutputFormat::Json => true,
        };

        Self {
            json,
            color: !json && ui::use_color(),
            interactive,
        }
    }

    fn render(&self, spec: &RenderSpec) {
        if self.json {
            match serde_json::to_string(spec) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!(error = %e, "Failed to serialize view"),
            }
        } else {
            print!("{}", ui::render(spec, self.color, ui::terminal_width()));
        }
    }

    /// Status lines and help go to stderr in JSON mode so stdout stays
    /// machine-readable.
    fn messages_to_stderr(&self) -> bool {
        self.json
    }

    fn message(&self, text: &str) {
        if self.messages_to_stderr() {
            eprintln!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    fn status(&self, status: Status, msg: &str) {
        self.message(&ui::status_line(status, msg, self.color));
    }

    fn help(&self) {
        self.message(HELP_TEXT);
    }

    fn prompt(&self) {
        if self.interactive && !self.json {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, config_path) = load_settings(&cli)?;
    init_tracing(&cli, &config.logging);

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    if let Some(path) = &cli.init_config {
        write_default_config(path, &config)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let source = GoogleBooksSource::new(&config.catalog).context("Failed to set up catalog source")?;
    let adapter = CatalogAdapter::new(Arc::new(source))
        .max_results(config.catalog.effective_max_results());
    tracing::debug!(
        source = adapter.source().name(),
        endpoint = %config.catalog.endpoint,
        "Catalog ready"
    );

    run(cli, adapter).await
}

/// Load config from --config, a discovered file, or the environment.
fn load_settings(cli: &Cli) -> Result<(Config, Option<PathBuf>)> {
    let path = cli.config.clone().or_else(find_config_file);

    let mut config = match &path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => get_config().context("Failed to read configuration from environment")?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.catalog.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.catalog.timeout_secs = timeout;
    }

    Ok((config, path))
}

fn init_tracing(cli: &Cli, logging: &LoggingConfig) {
    let log_level = match cli.verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let level = if cli.quiet { "error" } else { log_level };

    let env_filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_finder={}", level)),
    );

    let registry = tracing_subscriber::registry().with(env_filter);

    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// The single actor: reads commands and search completions from one
/// channel and applies them to the dispatcher in arrival order.
async fn run(cli: Cli, adapter: CatalogAdapter) -> Result<()> {
    let output = Output::new(cli.output);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut dispatcher = Dispatcher::new();
    let mut pending = 0usize;
    let mut input_closed = false;

    spawn_input_reader(tx.clone());

    if output.interactive && !output.json {
        print!("{}", ui::banner(output.color));
    }

    if let Some(query) = cli.query {
        let action = UiAction::SubmitSearch {
            query,
            mode: cli.mode,
        };
        pending += handle_action(&mut dispatcher, action, &adapter, &tx, &output);
    }
    if pending == 0 {
        output.prompt();
    }

    while let Some(event) = rx.recv().await {
        match event {
            Event::Line(line) => {
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => output.help(),
                    Ok(Command::Action(action)) => {
                        pending += handle_action(&mut dispatcher, action, &adapter, &tx, &output);
                    }
                    Err(CommandError::Empty) => {}
                    Err(e) => output.status(Status::Warning, &e.to_string()),
                }
                output.prompt();
            }
            Event::SearchDone(ticket, books) => {
                pending = pending.saturating_sub(1);
                if let Some(spec) = dispatcher.complete_search(ticket, books) {
                    output.render(&spec);
                    output.prompt();
                }
            }
            Event::InputClosed(error) => {
                if let Some(error) = error {
                    output.status(Status::Error, &format!("Failed to read input: {}", error));
                }
                input_closed = true;
            }
        }

        if input_closed && pending == 0 {
            break;
        }
    }

    Ok(())
}

/// Apply one action. Returns the number of searches started (0 or 1).
fn handle_action(
    dispatcher: &mut Dispatcher,
    action: UiAction,
    adapter: &CatalogAdapter,
    tx: &mpsc::UnboundedSender<Event>,
    output: &Output,
) -> usize {
    match dispatcher.dispatch(action) {
        Outcome::Render(spec) => {
            output.render(&spec);
            0
        }
        Outcome::Search(ticket) => {
            output.status(
                Status::Search,
                &format!("Searching by {} for \"{}\"...", ticket.mode(), ticket.query()),
            );
            spawn_search(adapter.clone(), ticket, tx.clone());
            1
        }
        Outcome::Unchanged => 0,
        Outcome::Rejected(reason) => {
            output.status(Status::Warning, &reason);
            0
        }
    }
}

fn spawn_search(adapter: CatalogAdapter, ticket: SearchTicket, tx: mpsc::UnboundedSender<Event>) {
    tokio::spawn(async move {
        let books = adapter.search(ticket.query(), ticket.mode()).await;
        // The receiver is gone only when the app is shutting down.
        let _ = tx.send(Event::SearchDone(ticket, books));
    });
}

fn spawn_input_reader(tx: mpsc::UnboundedSender<Event>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(Event::Line(line)).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    let _ = tx.send(Event::InputClosed(None));
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read input");
                    let _ = tx.send(Event::InputClosed(Some(e.to_string())));
                    break;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_output_keeps_messages_off_stdout() {
        let json = Output::new(OutputFormat::Json);
        assert!(json.json);
        assert!(!json.color);
        assert!(json.messages_to_stderr());

        let text = Output::new(OutputFormat::Text);
        assert!(!text.json);
        assert!(!text.messages_to_stderr());
    }

    #[test]
    fn test_cli_parses_mode_and_query() {
        let cli = Cli::try_parse_from(["book-finder", "--query", "dune", "-m", "ISBN", "-o", "json"])
            .unwrap();
        assert_eq!(cli.query.as_deref(), Some("dune"));
        assert_eq!(cli.mode, SearchMode::Isbn);
        assert_eq!(cli.output, OutputFormat::Json);

        assert!(Cli::try_parse_from(["book-finder", "-m", "publisher"]).is_err());
    }
}
