//! CLI command definitions, routing, and tracing setup.

use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use docfetch_fetcher::{DocsClient, FetchLibraryDocsTool};
use docfetch_shared::{AppConfig, DocumentationResult, FetchOptions, init_config, load_config};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docfetch: developer documentation lookup.
#[derive(Parser)]
#[command(
    name = "docfetch",
    version,
    about = "Look up code snippets and Q&A for a library from the command line.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Override the documentation API base URL.
    #[arg(long, env = "DOCFETCH_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Result output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// The canonical bundle text.
    Text,
}

impl OutputFormat {
    fn from_config(value: &str) -> Result<Self> {
        match value {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(eyre!(
                "invalid output format '{other}' in config: expected 'json' or 'text'"
            )),
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch documentation for a library (prompts for missing inputs).
    Fetch {
        /// Library, framework, or API name (e.g. "next.js").
        library: Option<String>,

        /// Topic within the library (e.g. "routing").
        #[arg(short, long)]
        topic: Option<String>,

        /// Output format (defaults to the config's `output.format`).
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Parse a documentation bundle from a file or stdin, without network access.
    Parse {
        /// Bundle file to read; stdin when omitted.
        file: Option<PathBuf>,

        /// Output format (defaults to the config's `output.format`).
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// Print the fetch tool's function-calling definition as JSON.
    ToolSchema,

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout carries results.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docfetch=warn",
        1 => "docfetch=info",
        2 => "docfetch=debug",
        _ => "docfetch=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let base_url = cli.base_url.as_deref();
    match cli.command {
        Command::Fetch {
            library,
            topic,
            format,
        } => cmd_fetch(base_url, library, topic, format).await,
        Command::Parse { file, format } => cmd_parse(file, format).await,
        Command::ToolSchema => cmd_tool_schema(base_url).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(base_url).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Merge config file values with the `--base-url` override.
fn resolve_options(config: &AppConfig, base_url: Option<&str>) -> Result<FetchOptions> {
    let opts = FetchOptions::from(config);
    match base_url {
        Some(url) => Ok(opts.with_base_url(url)?),
        None => Ok(opts),
    }
}

fn resolve_format(config: &AppConfig, flag: Option<OutputFormat>) -> Result<OutputFormat> {
    match flag {
        Some(format) => Ok(format),
        None => OutputFormat::from_config(&config.output.format),
    }
}

/// Ask for a value on stdin, unless one was given on the command line.
fn prompt_if_missing(value: Option<String>, question: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    let mut stderr = std::io::stderr();
    write!(stderr, "{question}\n> ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_result(result: &DocumentationResult, format: OutputFormat) -> Result<()> {
    if result.is_empty() {
        eprintln!("No code snippets or Q&A entries found.");
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Text => print!("{result}"),
    }

    Ok(())
}

fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .map(|style| style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]))
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_fetch(
    base_url: Option<&str>,
    library: Option<String>,
    topic: Option<String>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let config = load_config()?;
    let opts = resolve_options(&config, base_url)?;
    let format = resolve_format(&config, format)?;

    let library = prompt_if_missing(
        library,
        "What library, framework, or API should I look up documentation for?",
    )?;
    if library.is_empty() {
        return Err(eyre!("no library given"));
    }
    let topic = prompt_if_missing(topic, "Which topic are you interested in?")?;

    info!(%library, %topic, base_url = %opts.base_url, "fetching documentation");

    let client = DocsClient::new(&opts)?;
    let progress = spinner(&format!("Looking up {library} docs"));
    let outcome = client.fetch_library_docs(&library, &topic).await;
    progress.finish_and_clear();

    print_result(&outcome?, format)
}

async fn cmd_parse(file: Option<PathBuf>, format: Option<OutputFormat>) -> Result<()> {
    let config = load_config()?;
    let format = resolve_format(&config, format)?;

    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| eyre!("cannot read '{}': {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let result = docfetch_bundle::parse_documentation_response(&text);
    info!(
        snippets = result.snippets.len(),
        qa = result.qa.len(),
        "parsed local bundle"
    );

    print_result(&result, format)
}

async fn cmd_tool_schema(base_url: Option<&str>) -> Result<()> {
    let config = load_config()?;
    let opts = resolve_options(&config, base_url)?;
    let tool = FetchLibraryDocsTool::new(DocsClient::new(&opts)?);

    println!("{}", serde_json::to_string_pretty(&tool.definition())?);
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(base_url: Option<&str>) -> Result<()> {
    let mut config: AppConfig = load_config()?;
    if let Some(url) = base_url {
        config.api.base_url = resolve_options(&config, Some(url))?.base_url;
    }
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_fetch_with_flags() {
        let cli = Cli::try_parse_from([
            "docfetch", "fetch", "next.js", "--topic", "routing", "--format", "text",
        ])
        .expect("parse args");

        match cli.command {
            Command::Fetch {
                library,
                topic,
                format,
            } => {
                assert_eq!(library.as_deref(), Some("next.js"));
                assert_eq!(topic.as_deref(), Some("routing"));
                assert_eq!(format, Some(OutputFormat::Text));
            }
            _ => panic!("expected fetch command"),
        }
    }

    #[test]
    fn fetch_args_are_optional_for_prompting() {
        let cli = Cli::try_parse_from(["docfetch", "fetch"]).expect("parse args");
        assert!(matches!(
            cli.command,
            Command::Fetch {
                library: None,
                topic: None,
                ..
            }
        ));
    }

    #[test]
    fn format_falls_back_to_config() {
        let mut config = AppConfig::default();
        assert_eq!(resolve_format(&config, None).unwrap(), OutputFormat::Json);

        config.output.format = "text".into();
        assert_eq!(resolve_format(&config, None).unwrap(), OutputFormat::Text);
        assert_eq!(
            resolve_format(&config, Some(OutputFormat::Json)).unwrap(),
            OutputFormat::Json
        );

        config.output.format = "yaml".into();
        assert!(resolve_format(&config, None).is_err());
    }

    #[test]
    fn base_url_flag_overrides_config() {
        let config = AppConfig::default();
        let opts = resolve_options(&config, Some("http://localhost:4000/api/")).unwrap();
        assert_eq!(opts.base_url, "http://localhost:4000/api");

        let opts = resolve_options(&config, None).unwrap();
        assert_eq!(opts.base_url, docfetch_shared::DEFAULT_BASE_URL);
    }

    #[test]
    fn prompt_skipped_when_value_given() {
        let value = prompt_if_missing(Some("react".into()), "unused").unwrap();
        assert_eq!(value, "react");
    }
}
