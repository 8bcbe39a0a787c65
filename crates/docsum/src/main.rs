use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use docsum_common::{logger, AppConfig};
use docsum_llm::{OllamaClient, OllamaConfig, Summarizer, SummarizerOptions};
use std::path::PathBuf;
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        // Fallback to default dotenv behavior
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "docsum")]
#[command(about = "docsum - summarize text, PDF, DOCX and TXT documents with a local LLM", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Summarize a single document and print the summary
    Summarize {
        /// PDF, DOCX or TXT file
        path: PathBuf,

        /// Override the generation model
        #[arg(long)]
        model: Option<String>,
    },
}

async fn serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    // CLI arguments override the environment
    if let Some(host) = host {
        config.server_host = host;
    }
    if let Some(port) = port {
        config.server_port = port;
    }
    config.validate()?;
    config.ensure_directories()?;

    logger::setup_logging(&config.log_dir, &config.log_level)?;

    tracing::info!("docsum starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Ollama: {}", config.ollama_base_url);
    tracing::info!("  Model: {}", config.llm_model);

    println!("Server listening on http://{}", config.server_bind_address());

    docsum_server::start_server(config).await?;
    Ok(())
}

async fn summarize_file(mut config: AppConfig, path: PathBuf, model: Option<String>) -> Result<()> {
    if let Some(model) = model {
        config.llm_model = model;
    }
    config.validate()?;

    logger::setup_console_logging(&config.log_level)?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let kind = docsum_extract::detect_kind(&filename)?;
    let bytes = tokio::fs::read(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let text = docsum_extract::extract_text_blocking(kind, bytes).await?;

    let client = OllamaClient::new(OllamaConfig::from_app_config(&config))?;
    let options = SummarizerOptions {
        max_chunk_chars: config.max_chunk_chars,
        ..Default::default()
    };
    let summarizer = Summarizer::with_options(Arc::new(client), options);

    let summary = summarizer.summarize(&text).await?;
    println!("{}", summary);

    Ok(())
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env at project root
    load_dotenv_from_project_root();

    let config = AppConfig::from_env()?;

    match cli.command {
        Some(Commands::Serve { host, port }) => serve(config, host, port).await,
        Some(Commands::Summarize { path, model }) => summarize_file(config, path, model).await,
        None => serve(config, None, None).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_summarize() {
        let cli = Cli::try_parse_from(["docsum", "summarize", "report.pdf", "--model", "llama3.2"]).unwrap();
        match cli.command {
            Some(Commands::Summarize { path, model }) => {
                assert_eq!(path, PathBuf::from("report.pdf"));
                assert_eq!(model.as_deref(), Some("llama3.2"));
            }
            _ => panic!("expected summarize command"),
        }
    }

    #[test]
    fn test_cli_defaults_to_serve() {
        let cli = Cli::try_parse_from(["docsum"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["docsum", "serve", "--port", "9000"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve { port: Some(9000), host: None })));
    }
}
