use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use spendwise_cli::config::{self, ChatSection};
use spendwise_cli::llm::{self, Provider};
use spendwise_cli::{auth, service, LlmAnswerer, SessionStore, UploadResponse};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const CHAT_SESSION: &str = "local";

#[derive(Parser, Debug)]
#[command(name = "spendwise", version, about = "50/30/20 budget feedback for transaction exports")]
struct Cli {
    /// Verbose logging (debug level) unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print monthly and overall recommendations for an export
    Report {
        /// Path to the CSV export
        #[arg(long)]
        csv: PathBuf,

        /// Expected monthly income
        #[arg(long)]
        income: f64,

        /// Emit {"recommendations": [...]} / {"error": ...} instead of lines
        #[arg(long)]
        json: bool,
    },

    /// Ask questions about an export
    Chat {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        income: f64,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Store LLM credentials in ~/.spendwise/auth.json
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default ~/.spendwise/config.toml
    Init,
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    PasteOpenaiApiKey,
    PasteAnthropicToken,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Report { csv, income, json } => report(&csv, income, json)?,
        Command::Chat { csv, income } => run_chat(&csv, income).await?,
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
        },
        Command::Auth { command } => match command {
            AuthCommand::PasteOpenaiApiKey => auth::paste_key(Provider::OpenAI)?,
            AuthCommand::PasteAnthropicToken => auth::paste_key(Provider::Anthropic)?,
        },
    }

    Ok(())
}

fn open_export(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn report(csv: &Path, income: f64, json: bool) -> Result<()> {
    let mut store = SessionStore::new();
    let resp = match open_export(csv) {
        Ok(reader) => service::upload(&mut store, "report", reader, income),
        Err(e) if json => UploadResponse::Error(format!("{e:#}")),
        Err(e) => return Err(e),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&resp)?);
        return Ok(());
    }

    match resp {
        UploadResponse::Recommendations(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(())
        }
        UploadResponse::Error(msg) => bail!(msg),
    }
}

fn print_upload(resp: &UploadResponse) {
    match resp {
        UploadResponse::Recommendations(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        UploadResponse::Error(msg) => eprintln!("error: {msg}"),
    }
}

fn upload_path(store: &mut SessionStore, csv: &Path, income: f64) -> UploadResponse {
    match open_export(csv) {
        Ok(reader) => service::upload(store, CHAT_SESSION, reader, income),
        Err(e) => UploadResponse::Error(format!("{e:#}")),
    }
}

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{label}");
    io::stdout().flush().ok();
    let mut s = String::new();
    if io::stdin().read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s.trim().to_string()))
}

async fn run_chat(csv: &Path, income: f64) -> Result<()> {
    let cfg = config::load_config()?;
    let creds = auth::load_auth()?.with_env_fallback();
    let Some(llm_cfg) = llm::resolve_config(&cfg.llm, &creds)? else {
        let provider = Provider::parse(&cfg.llm.provider)?;
        let command = match provider {
            Provider::OpenAI => "paste-openai-api-key",
            Provider::Anthropic => "paste-anthropic-token",
        };
        bail!(
            "No API key for provider '{}'. Run: spendwise auth {command} (or set {})",
            cfg.llm.provider,
            provider.key_env()
        );
    };
    let answerer = LlmAnswerer::new(llm_cfg);

    let mut store = SessionStore::new();
    print_upload(&upload_path(&mut store, csv, income));

    println!("\nAsk about your spending. Commands: /upload <csv> <income>, /report, /quit");
    while let Some(line) = prompt("> ")? {
        match parse_repl_line(&line) {
            ReplLine::Empty => {}
            ReplLine::Quit => break,
            ReplLine::Report => reprint_report(&store),
            ReplLine::Upload(Some((path, income))) => print_upload(&upload_path(&mut store, &path, income)),
            ReplLine::Upload(None) => eprintln!("usage: /upload <csv> <income>"),
            ReplLine::Question(q) => ask(&mut store, &answerer, q, &cfg.chat).await,
        }
    }

    Ok(())
}

async fn ask(store: &mut SessionStore, answerer: &LlmAnswerer, line: &str, settings: &ChatSection) {
    match service::chat(store, CHAT_SESSION, answerer, line, settings).await {
        Ok(resp) => println!("{}\n", resp.response),
        Err(e) => {
            tracing::warn!(error = %e, "question failed");
            eprintln!("LLM error: {e:#}");
        }
    }
}

fn reprint_report(store: &SessionStore) {
    match service::session_report(store, CHAT_SESSION) {
        Some(lines) => {
            for line in lines {
                println!("{line}");
            }
        }
        None => println!("{}", service::NO_DATASET_MSG),
    }
}

#[derive(Debug, PartialEq)]
enum ReplLine<'a> {
    Empty,
    Quit,
    Report,
    /// `None` when the arguments are missing or malformed
    Upload(Option<(PathBuf, f64)>),
    Question(&'a str),
}

fn parse_repl_line(line: &str) -> ReplLine<'_> {
    let line = line.trim();
    let (cmd, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match cmd {
        "" => ReplLine::Empty,
        "/quit" | "/exit" => ReplLine::Quit,
        "/report" => ReplLine::Report,
        "/upload" => ReplLine::Upload(parse_upload_args(args)),
        _ => ReplLine::Question(line),
    }
}

fn parse_upload_args(args: &str) -> Option<(PathBuf, f64)> {
    let (path, income) = args.trim().rsplit_once(char::is_whitespace)?;
    let income = income.parse().ok()?;
    Some((PathBuf::from(path.trim()), income))
}
