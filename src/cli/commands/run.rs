use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::time::{Duration, Instant};

use crate::context::PortalContext;
use crate::tui::PortalShell;

pub async fn run_command(ctx: PortalContext) -> Result<()> {
    let tick_rate = ctx.config().tick_rate();
    let mut shell = PortalShell::new(ctx)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut shell, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    shell: &mut PortalShell,
    tick_rate: Duration,
) -> Result<()> {
    log::info!("Portal loop started");
    loop {
        let frame_start = Instant::now();

        // Drain pending input before drawing
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                shell.handle_key(key)?;
            }
            if shell.should_quit() {
                break;
            }
        }

        if shell.should_quit() {
            break;
        }

        shell.tick(Instant::now())?;

        terminal.draw(|frame| shell.render(frame))?;

        if let Some(remaining) = tick_rate.checked_sub(frame_start.elapsed()) {
            tokio::time::sleep(remaining).await;
        }
    }
    log::info!("Portal loop finished");
    Ok(())
}
