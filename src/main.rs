use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use dynform::app::{load_script, CommandOutput, FormBuilder};
use dynform::config::Config;
use dynform::services::activity_log;
use dynform::view::{self, ViewServices};

/// Run a form-building session from a command script
#[derive(Parser, Debug)]
#[command(name = "dynform", version, about)]
struct Args {
    /// Command script: a JSON array of commands or one command per line
    script: PathBuf,

    /// Configuration file (defaults to <config dir>/dynform/config.json)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write diagnostics here instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Record user actions to this file (defaults to <data dir>/dynform/activity.log)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    activity_log: Option<Option<PathBuf>>,

    /// Print the rendered form after the script has run
    #[arg(long)]
    render: bool,

    /// Print the final field schema as JSON after the script has run
    #[arg(long)]
    schema: bool,
}

fn init_tracing(args: &Args) -> Result<Option<activity_log::ActivityLogHandle>> {
    let writer = match &args.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_filter(filter);

    let (activity_layer, activity_handle) = match &args.activity_log {
        Some(path) => {
            let path = path.clone().unwrap_or_else(activity_log::default_path);
            let (layer, handle) = activity_log::create_with_path(path.clone())
                .with_context(|| format!("failed to create activity log {}", path.display()))?;
            (Some(layer), Some(handle))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(activity_layer)
        .init();

    Ok(activity_handle)
}

fn load_config(args: &Args) -> Result<Config> {
    match &args.config {
        Some(path) => Ok(Config::load_from_file(path)?),
        None => match dirs::config_dir() {
            Some(dir) => Ok(Config::load_or_default(&dir.join("dynform").join("config.json"))?),
            None => Ok(Config::default()),
        },
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let activity = init_tracing(&args)?;

    let config = load_config(&args).context("failed to load configuration")?;
    let commands = load_script(&args.script)?;
    tracing::debug!("Loaded {} commands from {}", commands.len(), args.script.display());

    let mut form = FormBuilder::new(config);
    tracing::debug!("Session config: {:?}", form.config());
    for command in commands {
        if let CommandOutput::Submitted(snapshot) = command.apply(&mut form) {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
    }

    if args.schema {
        println!("{}", serde_json::to_string_pretty(form.fields())?);
    }
    if args.render {
        print!("{}", view::render_text(&view::build(&form, &ViewServices::default())));
    }
    if let Some(handle) = activity {
        eprintln!("Activity log written to {}", handle.path.display());
    }

    Ok(())
}
