use std::fs::File;
use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};
use structopt::StructOpt;

use borrowdesk::tui::App;
use borrowdesk::{LibraryClient, Settings};

const LOG_FILE: &str = "borrowdesk.log";

#[derive(StructOpt)]
#[structopt(about = "Terminal client for a library book-borrowing service")]
struct Cli {
    #[structopt(
        short,
        long,
        help = "Base URL of the library server (overrides the config file)"
    )]
    server: Option<String>,
    #[structopt(
        short,
        parse(from_occurrences),
        help = "Log diagnostics to borrowdesk.log (-v debug, -vv trace)"
    )]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    if cli.verbose > 0 {
        let level = match cli.verbose {
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        // The terminal is in raw mode while we run, so diagnostics go to a
        // file instead of stderr.
        let file = File::create(LOG_FILE)?;
        env_logger::Builder::new()
            .filter_level(level)
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }

    let server = match cli.server {
        Some(server) => server,
        None => Settings::load().await?.server,
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, App::new(LibraryClient::new(server))).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> Result<()> {
    let mut normal_mode = true;

    loop {
        app.prerender().await?;
        terminal.draw(|frame| app.render(frame))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if normal_mode && key.code == KeyCode::Char('q') {
                return Ok(());
            }
            app.new_event(&mut normal_mode, key);
        }
    }
}
