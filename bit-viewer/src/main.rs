use anyhow::{Context, Result};
use bit_common::{BitConfig, OutputFormat, RunRecord, ViewerConfig};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use env_logger::Builder;
use log::{error, info, warn, LevelFilter};
use std::io::{self, Write};
use std::path::PathBuf;

mod render;
mod viewer;

use viewer::{Command, Viewer};

/// Command-line arguments for the viewer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run record written by the engine (.json, .bin or .msgpack)
    #[arg(short, long)]
    input: PathBuf,

    /// Record format (json, bincode, messagepack); guessed from the extension if omitted
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Optional path to the config.toml whose [viewer] section should be used
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keys to apply instead of reading the keyboard, e.g. "fnnns"; prints the final frame
    #[arg(long)]
    commands: Option<String>,

    /// Draw squares as plain characters instead of ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    run_with_args(args)
}

fn run_with_args(args: Args) -> Result<()> {
    // Initialize logger
    Builder::from_default_env()
        .filter(None, LevelFilter::Info)
        .init();

    info!("Starting Bit World viewer...");
    info!("Input file: {}", args.input.display());

    // --- Viewer settings ---
    let settings = match &args.config {
        Some(config_path) => match BitConfig::load(config_path) {
            Ok(config) => {
                info!("Loaded viewer settings from {}", config_path.display());
                config.viewer
            }
            Err(e) => {
                warn!(
                    "Failed to load config file '{}': {:#}. Using default viewer settings.",
                    config_path.display(),
                    e
                );
                ViewerConfig::default()
            }
        },
        None => ViewerConfig::default(),
    };

    // --- Open the run record ---
    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_path(&args.input).with_context(|| {
            format!(
                "Cannot tell the format of '{}'; pass --format",
                args.input.display()
            )
        })?,
    };
    let record = RunRecord::load(&args.input, format)?;
    info!(
        "Loaded {} history entries and {} checkpoints",
        record.history.len(),
        record.checkpoints.len()
    );
    for checkpoint in &record.checkpoints {
        info!("Checkpoint '{}' after {} steps", checkpoint.name, checkpoint.step_count);
    }

    let color = settings.color && !args.no_color;
    let mut viewer = Viewer::new(record, settings.start_at, settings.show_goal, color);

    if let Some(keys) = &args.commands {
        apply_keys(&mut viewer, keys);
        let mut out = io::stdout().lock();
        out.write_all(viewer.frame().as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    run_interactive(&mut viewer)
}

/// Applies each key in order; returns `false` once a quit key is seen.
fn apply_keys(viewer: &mut Viewer, keys: &str) -> bool {
    for key in keys.chars().filter(|c| !c.is_whitespace()) {
        match Command::from_key(key) {
            Some(command) => {
                if !viewer.handle(command) {
                    return false;
                }
            }
            None => warn!("Unknown key '{}'", key),
        }
    }
    true
}

// Raw mode and the alternate screen, restored on drop even if drawing fails
struct TerminalGuard;

impl TerminalGuard {
    fn enter(stdout: &mut io::Stdout) -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        let guard = TerminalGuard;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen) {
            error!("Failed to leave alternate screen: {}", e);
        }
        if let Err(e) = terminal::disable_raw_mode() {
            error!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Redraws after every key press until a quit key.
fn run_interactive(viewer: &mut Viewer) -> Result<()> {
    let mut stdout = io::stdout();
    let _guard = TerminalGuard::enter(&mut stdout)?;

    draw(&mut stdout, viewer)?;
    loop {
        let Event::Key(key) = event::read().context("Failed to read key event")? else {
            continue;
        };
        if let Some(command) = command_for(key) {
            if !viewer.handle(command) {
                break;
            }
            draw(&mut stdout, viewer)?;
        }
    }
    Ok(())
}

fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Char(c), _) => Command::from_key(c.to_ascii_lowercase()),
        (KeyCode::Right, _) => Some(Command::Next),
        (KeyCode::Left, _) => Some(Command::Previous),
        (KeyCode::Home, _) => Some(Command::First),
        (KeyCode::End, _) => Some(Command::Last),
        _ => None,
    }
}

// Raw mode does not return the carriage on '\n'
fn draw(out: &mut impl Write, viewer: &Viewer) -> Result<()> {
    execute!(out, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    out.write_all(viewer.frame().replace('\n', "\r\n").as_bytes())?;
    out.flush()?;
    Ok(())
}
