//! LearnLens CLI
//!
//! Interactive terminal viewer for generated learning paths.

mod command;

use std::future::Future;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::process::ExitCode;

use clap::Parser;
use learnlens_render::json::JsonRenderer;
use learnlens_render::MarkdownRenderer;
use learnlens_viewer::{
    Config, FilePathSource, HttpPathSource, PathSource, ProficiencyLevel, SessionView, Transition,
    Viewer,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP};

/// LearnLens - Learning Path Viewer
///
/// Generates a video-based learning path for a topic and lets you walk
/// through it module by module, answering a quiz at each step.
#[derive(Parser, Debug)]
#[command(name = "learnlens")]
#[command(version, about, long_about = None)]
struct Args {
    /// Topic to generate a learning path for on startup
    #[arg(value_name = "TOPIC")]
    topic: Vec<String>,

    /// Proficiency level: beginner, intermediate or expert (or low, medium, high)
    #[arg(short, long, value_name = "LEVEL")]
    level: Option<ProficiencyLevel>,

    /// Path to configuration file (default: learnlens.json in current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the generation backend (overrides apiUrl)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Read learning paths from a saved JSON response instead of the backend
    #[arg(long, value_name = "FILE")]
    path_file: Option<PathBuf>,

    /// Print every screen as a line of JSON instead of Markdown
    #[arg(long)]
    json: bool,

    /// Write the final screen as JSON to this file on exit
    #[arg(long, value_name = "FILE")]
    export: Option<PathBuf>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

/// What the command loop should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(config = ?args.config, path_file = ?args.path_file, "Starting LearnLens");

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ref api_url) = args.api_url {
        config.api_url.clone_from(api_url);
    }
    config.validate()?;

    let source: Box<dyn PathSource> = match args.path_file {
        Some(ref path) => {
            tracing::info!(file = %path.display(), "Using saved learning path");
            Box::new(FilePathSource::new(path))
        }
        None => {
            let source = HttpPathSource::from_config(&config);
            tracing::info!(endpoint = %source.endpoint(), "Using generation backend");
            Box::new(source)
        }
    };

    let default_level = args.level.unwrap_or(config.default_level);
    let mut viewer = Viewer::new(config, source);
    let output = Output { json: args.json };

    let initial = (!args.topic.is_empty()).then(|| Command::Generate {
        level: None,
        topic: args.topic.join(" "),
    });

    run_command_loop(&mut viewer, output, default_level, initial).await?;

    if let Some(ref path) = args.export {
        JsonRenderer::new(&viewer.view()).write_to_file(path, true)?;
        eprintln!("Exported view to {}", path.display());
    }

    Ok(())
}

/// Loads configuration from `--config` or the current directory.
fn load_config(config_path: Option<&Path>) -> anyhow::Result<Config> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!(
                    "Config file not found: '{}'\n\nSuggestion: Check the path or remove the --config flag to use defaults",
                    path.display()
                );
            }
            Config::load_from_file(path).map_err(|e| anyhow::anyhow!("{e}"))
        }
        None => Config::load().map_err(|e| anyhow::anyhow!("{e}")),
    }
}

/// Reads commands from stdin until `quit`, EOF or Ctrl+C.
async fn run_command_loop(
    viewer: &mut Viewer,
    output: Output,
    default_level: ProficiencyLevel,
    initial: Option<Command>,
) -> anyhow::Result<()> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    match initial {
        Some(command) => {
            if execute(viewer, output, default_level, command, &mut ctrl_c).await? == Flow::Quit {
                return Ok(());
            }
        }
        None => output.show(&viewer.view())?,
    }

    loop {
        output.prompt()?;

        let line = tokio::select! {
            _ = ctrl_c.as_mut() => {
                tracing::info!("Received Ctrl+C, exiting");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::debug!("End of input");
            break;
        };

        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                if execute(viewer, output, default_level, command, &mut ctrl_c).await?
                    == Flow::Quit
                {
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    Ok(())
}

/// Runs one command and prints the resulting screen.
async fn execute<F>(
    viewer: &mut Viewer,
    output: Output,
    default_level: ProficiencyLevel,
    command: Command,
    ctrl_c: &mut Pin<&mut F>,
) -> anyhow::Result<Flow>
where
    F: Future<Output = std::io::Result<()>>,
{
    tracing::debug!(?command, "Executing command");

    let transition = match command {
        Command::Generate { level, topic } => {
            let pending = match viewer.submit(&topic, level.unwrap_or(default_level)) {
                Ok(pending) => pending,
                Err(e) if e.is_recoverable() => {
                    eprintln!("{e}");
                    return Ok(Flow::Continue);
                }
                Err(e) => return Err(e.into()),
            };
            output.show(&viewer.view())?;

            tokio::select! {
                _ = ctrl_c.as_mut() => {
                    tracing::info!("Received Ctrl+C while generating, exiting");
                    return Ok(Flow::Quit);
                }
                transition = viewer.resolve(pending) => transition,
            }
        }
        Command::Open(index) => viewer.jump_to(index),
        Command::Next => viewer.advance(),
        Command::Answer(index) => viewer.select_option(index),
        Command::Restart => viewer.restart(),
        Command::Show => {
            output.show(&viewer.view())?;
            return Ok(Flow::Continue);
        }
        Command::Json => {
            println!("{}", JsonRenderer::new(&viewer.view()).generate_pretty()?);
            return Ok(Flow::Continue);
        }
        Command::Help => {
            println!("{HELP}");
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    };

    if transition == Transition::Ignored {
        eprintln!("Nothing changed.");
        return Ok(Flow::Continue);
    }

    output.show(&viewer.view())?;
    Ok(Flow::Continue)
}

/// How screens are printed.
#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn show(self, view: &SessionView) -> anyhow::Result<()> {
        if self.json {
            println!("{}", JsonRenderer::new(view).generate()?);
        } else {
            println!("{}", MarkdownRenderer::new(view).generate());
            println!("{}", hint_for(view));
        }
        Ok(())
    }

    fn prompt(self) -> std::io::Result<()> {
        if !self.json {
            print!("> ");
            std::io::stdout().flush()?;
        }
        Ok(())
    }
}

/// One-line reminder of the commands that make sense on `view`.
fn hint_for(view: &SessionView) -> &'static str {
    match view {
        SessionView::TopicEntry(_) => "Type `generate [LEVEL] TOPIC` to start, or `help`.",
        SessionView::Loading(_) => "Generating... press Ctrl+C to quit.",
        SessionView::Module(module) if module.mastered => {
            "Type `open N` to revisit a module, `restart` for a new topic, or `quit`."
        }
        SessionView::Module(_) => {
            "Type `answer N`, `next`, `open N`, `restart` or `help`."
        }
    }
}
