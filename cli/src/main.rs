//! CLI entrypoint for Nova Chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use nova_application::{
    AdminAccount, AssistantSessionDriver, ChatUseCase, ConversationLog, IdentityLookupUseCase,
    NoConversationLog,
};
use nova_domain::Email;
use nova_infrastructure::{
    ConfigLoader, CsvConversationLog, FileConfig, OpenAiAssistantBackend, SheetIdentitySource,
};
use nova_presentation::{ChatRepl, Cli, ReplConfig};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    info!("Starting Nova Chat");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    if cli.show_config {
        ConfigLoader::print_config_sources();
        println!();
        println!("{}", ConfigLoader::render(&config));
        return Ok(());
    }

    if !config.ui.color {
        colored::control::set_override(false);
    }

    let secrets = config.secrets()?;

    // === Dependency Injection ===
    let backend = Arc::new(
        OpenAiAssistantBackend::new(
            &config.assistant.base_url,
            &secrets.api_key,
            config.assistant.request_timeout(),
        )
        .context("Failed to build the assistant client")?,
    );

    let http = reqwest::Client::builder()
        .timeout(config.assistant.request_timeout())
        .build()
        .context("Failed to build the directory client")?;
    let source = Arc::new(
        SheetIdentitySource::new(http, config.identity.export_url_for(&secrets.sheet_id))
            .with_columns(&config.identity.email_column, &config.identity.name_column),
    );

    let admin = secrets
        .admin_email
        .as_deref()
        .and_then(|raw| match Email::parse(raw) {
            Ok(email) => Some(AdminAccount::new(
                email,
                config.identity.admin_display_name.clone(),
            )),
            Err(e) => {
                warn!("Ignoring administrator email: {}", e);
                None
            }
        });

    // Ctrl-C cancels the wait in progress, or the next question, and ends the shell
    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, stopping");
            signal_token.cancel();
        }
    });

    let driver = AssistantSessionDriver::new(backend, secrets.assistant_id.clone())
        .with_polling(config.assistant.polling_params())
        .with_cancellation(shutdown);

    let chat = ChatUseCase::new(driver).with_conversation_log(conversation_log(&cli, &config));
    let lookup = IdentityLookupUseCase::new(source).with_admin(admin);

    let repl = ChatRepl::new(chat, lookup)
        .with_config(ReplConfig {
            title: config.ui.title.clone(),
            show_progress: config.ui.show_progress,
            history_file: config.ui.history_file.clone(),
        })
        .with_progress(config.ui.show_progress && !cli.quiet)
        .with_initial_email(cli.email.clone());

    repl.run().await?;
    Ok(())
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn conversation_log(cli: &Cli, config: &FileConfig) -> Arc<dyn ConversationLog> {
    if cli.no_log || !config.log.enabled {
        info!("Conversation log disabled");
        return Arc::new(NoConversationLog);
    }
    let log = CsvConversationLog::new(&config.log.path);
    info!("Appending conversations to {}", log.path().display());
    Arc::new(log)
}
