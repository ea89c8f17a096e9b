mod ui;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use directories::ProjectDirs;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use ui::input::{command_for_key, Command};
use ui::{draw_ui, View};
use warpath::build_info;
use warpath::core::Game;

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging() -> Result<Option<WorkerGuard>> {
    let Some(project_dirs) = ProjectDirs::from("", "", "warpath") else {
        return Ok(None);
    };
    let log_dir = project_dirs.data_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, "warpath.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Log file: {}/warpath.log", log_dir.display());
    Ok(Some(guard))
}

fn parse_seed(args: &[String]) -> Result<Option<u64>> {
    let mut seed = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().context("--seed requires a number")?;
                seed = Some(value.parse().context("--seed requires a number")?);
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Warpath - turn-based combat campaign\n");
                println!("Usage: warpath [--seed N]\n");
                println!("Options:");
                println!("  --seed N   Deterministic session");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other} (run 'warpath --help' for usage)"),
        }
    }
    Ok(seed)
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    game: &mut Game<ChaCha8Rng>,
) -> Result<()> {
    loop {
        let snapshot = game.snapshot();
        let summary = game.summary(Utc::now().timestamp());
        terminal.draw(|frame| {
            draw_ui(
                frame,
                &View {
                    snapshot: &snapshot,
                    log: game.log().entries(),
                    summary: summary.as_ref(),
                },
            )
        })?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match command_for_key(&snapshot, key.code) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::NewRun) => game.start_new_run(Utc::now().timestamp()),
            Some(Command::Hover(index)) => game.set_hover(index),
            // rejections are already in the narration log
            Some(Command::Intent(intent)) => {
                let _ = game.apply(intent);
            }
            None => {}
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let seed = parse_seed(&args)?;
    let _guard = init_logging()?;

    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    tracing::info!(?seed, version = %build_info::version_line(), "starting");
    let mut game = Game::new(rng);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game);

    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
