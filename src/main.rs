use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use vocab_trainer::{
    export_csv, import_csv, logger, spawn_store_worker, ui, App, AppError, Cli, Commands, Config,
    HttpStore,
};

// Upper bound on how long the loop sleeps when no timer is pending.
const IDLE_WAIT: std::time::Duration = std::time::Duration::from_secs(60);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();
    logger::init(&config.log_file);
    logger::log(&format!("Starting with store at {}", config.base_url));

    let result = match &cli.command {
        Commands::Start { .. } => run_tui(&config).await,
        Commands::Export { file } => {
            let store = HttpStore::new(&config.base_url);
            export_csv(&store, file).await.map(|count| {
                println!("exported {} vocab to {}", count, file.display());
            })
        }
        Commands::Import { file } => {
            let store = HttpStore::new(&config.base_url);
            import_csv(&store, file).await.map(|count| {
                println!("imported {} vocab from {}", count, file.display());
            })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::error("vocab", &e);
            eprintln!("vocab error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_tui(config: &Config) -> Result<(), AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
) -> Result<(), AppError> {
    let store = Arc::new(HttpStore::new(&config.base_url));
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (response_tx, mut response_rx) = mpsc::unbounded_channel();
    let worker = spawn_store_worker(store, request_rx, response_tx);

    let mut app = App::new(config.submit_failure_policy(), Instant::now());
    let mut events = EventStream::new();

    loop {
        for request in app.take_outbox() {
            if request_tx.send(request).is_err() {
                logger::log("Store worker stopped, request dropped");
            }
        }
        terminal.draw(|f| ui::draw(f, &app))?;

        let wake_at = app
            .next_deadline()
            .unwrap_or_else(|| Instant::now() + IDLE_WAIT);

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key, Instant::now());
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(response) = response_rx.recv() => {
                app.on_response(response, Instant::now());
            }
            _ = tokio::time::sleep_until(wake_at.into()) => {}
        }

        app.tick(Instant::now());
        if app.should_quit() {
            break;
        }
    }

    logger::log("Shutting down");
    worker.abort();
    Ok(())
}
