//! CLI for GenEdit - prompt-driven image editing.

use clap::{Args, Parser, Subcommand, ValueEnum};
use genedit::{EditProvider, EditSession, GeminiModel, GeminiProvider, RequestState};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "genedit")]
#[command(about = "Edit an image with a text prompt via Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gemini model to use
    #[arg(long, value_enum, global = true, default_value = "nano-banana")]
    model: ModelArg,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Edit one image and save the result
    Edit(EditArgs),

    /// Interactive session: open images, write prompts, submit, save
    Session,

    /// Check that the API key and model are usable
    Check,
}

#[derive(Args)]
struct EditArgs {
    /// Image to edit (PNG, JPEG or WebP)
    #[arg(short, long)]
    input: PathBuf,

    /// Description of the desired edit
    #[arg(short, long)]
    prompt: String,

    /// Where to write the edited image
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    NanoBanana,
    NanoBananaPro,
}

impl From<ModelArg> for GeminiModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::NanoBanana => GeminiModel::NanoBanana,
            ModelArg::NanoBananaPro => GeminiModel::NanoBananaPro,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut builder = GeminiProvider::builder().model(cli.model.into());
    if let Some(secs) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    let provider = builder.build()?;

    match cli.command {
        Commands::Edit(args) => edit_once(provider, args, cli.json).await,
        Commands::Session => run_session(provider).await,
        Commands::Check => check(provider, cli.json).await,
    }
}

async fn edit_once(
    provider: GeminiProvider,
    args: EditArgs,
    json_output: bool,
) -> anyhow::Result<()> {
    let model = provider.model().as_str();
    let mut session = EditSession::new(provider);

    session.upload(&args.input).await;
    if session.error().is_none() {
        session.set_prompt(args.prompt);
        session.submit().await;
    }
    let succeeded = session.state() == &RequestState::Succeeded;

    let saved = match session.result() {
        Some(edited) if succeeded => Some(edited.save(&args.output)?),
        _ => None,
    };

    if json_output {
        let result = serde_json::json!({
            "success": saved.is_some(),
            "input": args.input.display().to_string(),
            "output": saved.map(|_| args.output.display().to_string()),
            "size_bytes": saved,
            "model": model,
            "error": session.error(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(bytes) = saved {
        println!(
            "Edited image: {} ({} bytes) via {}",
            args.output.display(),
            bytes,
            model
        );
    }

    match session.error() {
        Some(message) => anyhow::bail!("{message}"),
        None => Ok(()),
    }
}

const SESSION_HELP: &str = "\
Commands:
  open <path>     load an image to edit
  prompt <text>   set the edit prompt
  submit          send the image and prompt to the model
  save <path>     write the edited image
  show            print the current state
  help            print this help
  quit            leave the session";

async fn run_session(provider: GeminiProvider) -> anyhow::Result<()> {
    let mut session = EditSession::new(provider);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Loading indicator, driven by view updates
    let mut views = session.subscribe();
    tokio::spawn(async move {
        while views.changed().await.is_ok() {
            if views.borrow_and_update().loading {
                println!("Generating...");
            }
        }
    });

    println!("{SESSION_HELP}\n");
    println!("{}", session.view());

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        match command {
            "" => continue,
            "open" if !rest.is_empty() => {
                session.upload(rest).await;
            }
            "prompt" => session.set_prompt(rest),
            "submit" => {
                if !session.can_submit() {
                    println!("Upload an image first.");
                    continue;
                }
                session.submit().await;
            }
            "save" if !rest.is_empty() => match session.result() {
                Some(edited) => match edited.save(rest) {
                    Ok(bytes) => println!("Saved {rest} ({bytes} bytes)"),
                    Err(e) => println!("Could not save {rest}: {e}"),
                },
                None => println!("Nothing to save yet."),
            },
            "show" => {}
            "help" => {
                println!("{SESSION_HELP}");
                continue;
            }
            "quit" | "exit" => break,
            _ => {
                println!("Unrecognized command. Type `help` for the list.");
                continue;
            }
        }

        if !session.prompt().is_empty() {
            println!("Prompt:   {}", session.prompt().as_str());
        }
        println!("{}", session.view());
    }

    Ok(())
}

async fn check(provider: GeminiProvider, json_output: bool) -> anyhow::Result<()> {
    let outcome = provider.health_check().await;

    if json_output {
        let result = serde_json::json!({
            "provider": provider.kind().to_string(),
            "model": provider.model().as_str(),
            "ok": outcome.is_ok(),
            "error": outcome.as_ref().err().map(|e| e.to_string()),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if outcome.is_ok() {
        println!("{} ready ({})", provider.name(), provider.model().as_str());
    }

    outcome.map_err(Into::into)
}
