use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{ArgAction, Parser, Subcommand};

use weatherdesk_core::{
    Config, HttpBackend, LookupController, LookupPhase, SubmissionController, WeatherBackend,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdesk", version, about = "Submit weather requests and retrieve stored results")]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a new weather data request.
    Submit {
        /// Request date, e.g. "August 07, 2026" or "2026-08-07"; prompted for when absent.
        #[arg(long)]
        date: Option<String>,

        /// Location name; prompted for when absent.
        #[arg(long)]
        location: Option<String>,

        /// Optional free-text notes.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Look up a stored request by its identifier.
    Lookup {
        /// Identifier returned by a previous submission; prompted for when absent.
        id: Option<String>,

        /// Show the full record instead of the summary.
        #[arg(long)]
        advanced: bool,
    },

    /// Configure the backend service URL.
    Configure {
        /// Backend origin, e.g. "http://localhost:8000".
        #[arg(long)]
        url: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        setup_logging(self.verbose);

        match self.command {
            Command::Submit { date, location, notes } => run_submit(date, location, notes).await,
            Command::Lookup { id, advanced } => run_lookup(id, advanced).await,
            Command::Configure { url } => run_configure(url),
        }
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false).with_thread_names(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn backend_from_config() -> Result<Arc<dyn WeatherBackend>> {
    let config = Config::load()?;
    let backend = HttpBackend::new(config.backend_url())?;
    Ok(Arc::new(backend))
}

async fn run_submit(
    date: Option<String>,
    location: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let backend = backend_from_config()?;
    let mut controller = SubmissionController::new(backend.clone());

    fill_date(&mut controller, date)?;
    fill_location(&mut controller, location)?;
    fill_notes(&mut controller, notes)?;

    controller.submit().await;

    let (success, message) = match controller.result() {
        Some(result) => (result.is_success(), result.message.clone()),
        None => bail!("Nothing was submitted; fix the fields and try again."),
    };
    if !success {
        bail!("{message}");
    }
    println!("{message}");

    if let Some(id) = controller.copy_id().map(str::to_string) {
        println!("Your weather request ID: {id}");
        match copy_to_clipboard(&id) {
            Ok(()) if controller.copied() => println!("Copied to clipboard!"),
            Ok(()) => {}
            Err(err) => tracing::debug!("clipboard unavailable: {err}"),
        }
    }

    if let Some(id) = controller.take_handoff() {
        let follow_up = inquire::Confirm::new("Look up the stored record now?")
            .with_default(false)
            .prompt()
            .unwrap_or(false);

        if follow_up {
            let mut lookup = LookupController::new(backend);
            lookup.receive_id(id);
            lookup.lookup().await;
            if let Err(err) = print_lookup(&lookup) {
                eprintln!("{err}");
            }
        }
    }

    Ok(())
}

fn fill_date(controller: &mut SubmissionController, date: Option<String>) -> Result<()> {
    if let Some(text) = date {
        controller.on_date_text_changed(&text);
        if let Some(message) = controller.date_field().validation().message() {
            bail!("Invalid --date {text:?}: {message}");
        }
        return Ok(());
    }

    loop {
        let text = inquire::Text::new("Date:")
            .with_default(controller.date_field().raw())
            .with_help_message("e.g. \"August 07, 2026\" or \"2026-08-07\"")
            .prompt()?;

        controller.on_date_text_changed(&text);
        match controller.date_field().validation().message() {
            None => return Ok(()),
            Some(message) => eprintln!("{message}"),
        }
    }
}

fn fill_location(controller: &mut SubmissionController, location: Option<String>) -> Result<()> {
    if let Some(text) = location {
        controller.on_location_changed(&text);
        if let Some(message) = controller.location_field().message() {
            bail!("Invalid --location {text:?}: {message}");
        }
        return Ok(());
    }

    loop {
        let text = inquire::Text::new("Location:")
            .with_help_message("e.g. New York, London, Tokyo")
            .prompt()?;

        controller.on_location_changed(&text);
        match controller.location_field().message() {
            None => return Ok(()),
            Some(message) => eprintln!("{message}"),
        }
    }
}

fn fill_notes(controller: &mut SubmissionController, notes: Option<String>) -> Result<()> {
    let text = match notes {
        Some(text) => text,
        None => inquire::Text::new("Notes (optional):").prompt()?,
    };

    controller.on_notes_changed(&text);
    Ok(())
}

async fn run_lookup(id: Option<String>, advanced: bool) -> Result<()> {
    let backend = backend_from_config()?;
    let mut controller = LookupController::new(backend);

    let id = match id {
        Some(id) => id,
        None => inquire::Text::new("Weather request ID:").prompt()?,
    };
    controller.on_input_changed(&id);

    controller.lookup().await;

    if controller.phase() == LookupPhase::Idle {
        bail!("No identifier given.");
    }

    if advanced {
        controller.toggle_advanced();
    }

    print_lookup(&controller)
}

fn print_lookup(controller: &LookupController) -> Result<()> {
    if let Some(message) = controller.error_message() {
        bail!("{message}");
    }

    if let Some(record) = controller.record() {
        println!("{}", render::render_record(record, controller.show_advanced()));
    }

    Ok(())
}

fn run_configure(url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let url = match url {
        Some(url) => url,
        None => inquire::Text::new("Backend URL:").with_default(config.backend_url()).prompt()?,
    };

    // Reject URLs the client could not use before persisting them.
    HttpBackend::new(&url)?;

    config.set_backend_url(url);
    config.save()?;

    println!("Saved backend URL to {}", Config::config_file_path()?.display());
    Ok(())
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new()?;
    clipboard.set_text(text.to_string())?;
    Ok(())
}
