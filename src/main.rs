use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use medimind::{chat, constants, logging, tui, web_server, AskClient, ClientConfig, Panel};

// Define the command-line interface structure using clap
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// URL of the answering service's ask endpoint.
    #[arg(long, global = true, env = "MEDIMIND_ENDPOINT", default_value = constants::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Give up on a request after this many seconds (default: wait indefinitely).
    #[arg(long, global = true, env = "MEDIMIND_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

// Define the available subcommands
#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Open the full-screen question/answer panel.
    Tui,
    /// Ask a single question and print the answer.
    Ask {
        #[arg(help = "The question to send.")]
        question: String,
    },
    /// Ask questions line by line from standard input.
    Chat,
    /// Serve the question/answer panel as a web page.
    Web {
        #[arg(long, default_value_t = 9900, help = "Port for the web server.")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (MEDIMIND_ENDPOINT, RUST_LOG, ...)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // The terminal UI owns the screen, so it logs to a file instead.
    let _log_guard = match cli.command {
        Commands::Tui => Some(logging::init_file(&PathBuf::from(constants::LOG_DIR.as_str()))?),
        _ => {
            logging::init_stderr();
            None
        }
    };

    info!("medimind starting with command: {:?}", cli.command);

    let config = ClientConfig::new(cli.endpoint)
        .with_timeout(cli.timeout_secs.map(Duration::from_secs));
    let client = AskClient::new(&config).context("Failed to create answering service client")?;

    match cli.command {
        Commands::Tui => {
            tui::run(client).await.context("Terminal UI failed")?;
        }
        Commands::Ask { question } => {
            let mut panel = Panel::new();
            panel.set_question(question);
            panel.ask(&client).await;
            let output = chat::render_plain(&panel);
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Commands::Chat => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            chat::run_chat(&client, stdin, tokio::io::stdout())
                .await
                .context("Chat session failed")?;
        }
        Commands::Web { port } => {
            info!("Starting web front-end on port {}...", port);
            web_server::start_web_server(port, client).await?;
        }
    }

    Ok(())
}
