//! Swap-Ticker: live perpetual swap prices in the terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Track BTC, ETH and BNB perpetual swaps (default)
//! swap-ticker
//!
//! # Other instruments, slower refresh
//! swap-ticker --instruments SOL-USDT-SWAP,DOGE-USDT-SWAP --refresh-ms 2000
//!
//! # Offline, synthetic prices
//! swap-ticker --demo
//! ```

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use swap_ticker::demo::DemoSource;
use swap_ticker::{
    telemetry, ui, Args, Config, Dashboard, MarketClient, Poller, PollerHandle, SharedDashboard,
    TickerSource,
};

/// Input poll timeout; also bounds the redraw interval.
const INPUT_POLL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::try_from(Args::parse()).context("Invalid configuration")?;

    telemetry::init(&config.log_file, &config.log_level).context("Failed to set up logging")?;

    let source: Arc<dyn TickerSource> = if config.demo {
        Arc::new(DemoSource::new(&config.instruments))
    } else {
        Arc::new(
            MarketClient::new(&config.base_url, &config.inst_type, config.request_timeout)
                .context("Failed to create HTTP client")?,
        )
    };
    let source_label = source.describe();

    info!(
        source = %source_label,
        instruments = ?config.instruments.iter().map(|i| i.id()).collect::<Vec<_>>(),
        history = config.history,
        "Starting swap-ticker"
    );

    // Restore the terminal if anything panics while the UI owns it
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let dashboard = Dashboard::new(config.instruments.iter().cloned(), config.history).into_shared();
    let poller = Poller::new(source, dashboard.clone(), config.refresh).spawn();

    let result = run_app(&mut terminal, &dashboard, &poller, &source_label).await;

    // Stop polling before the state goes away
    poller.shutdown().await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "UI loop failed");
    }
    info!("Exiting");

    result
}

/// Main draw/input loop. Returns when the user quits.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    dashboard: &SharedDashboard,
    poller: &PollerHandle,
    source_label: &str,
) -> Result<()> {
    loop {
        {
            let state = dashboard.lock().await;
            terminal.draw(|frame| ui::render(frame, &state, source_label))?;
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };

        // Only handle key press events (not release)
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('r') | KeyCode::Char('R') => poller.refresh().await,
            _ => {}
        }
    }
}
