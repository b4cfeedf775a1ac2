use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Instant;

use super::schedule::{Schedule, Wake};
use crate::game::{GameEngine, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive terminal session around one engine
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    dirty: bool,
}

impl HumanMode {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            dirty: true,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut schedule = Schedule::new(self.engine.config(), EventStream::new());
        tracing::info!(
            width = self.engine.grid().width(),
            height = self.engine.grid().height(),
            "session started"
        );

        loop {
            tokio::select! {
                wake = schedule.next() => {
                    let round = self.engine.round();
                    self.handle_wake(wake);
                    if self.engine.round() != round {
                        schedule.restart_food_timers();
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            if self.dirty {
                let snapshot = self.engine.snapshot();
                terminal
                    .draw(|frame| self.renderer.render(frame, &snapshot, &self.metrics))
                    .context("Failed to draw frame")?;
                self.dirty = false;
            }
        }

        tracing::info!(rounds = self.metrics.rounds_played, "session ended");
        Ok(())
    }

    fn handle_wake(&mut self, wake: Wake) {
        match wake {
            Wake::Tick(now) => {
                if let TickOutcome::RoundOver { final_score, .. } = self.engine.apply_tick(now) {
                    tracing::debug!(final_score, "new round after collision");
                    self.metrics.on_round_over();
                }
                self.dirty = true;
            }
            Wake::Spawn(now) => {
                if self.engine.spawn_tick(now).is_some() {
                    self.dirty = true;
                }
            }
            Wake::Expire(now) => {
                self.engine.expire_tick(now);
                // also refreshes the clock in the header
                self.metrics.update();
                self.dirty = true;
            }
            Wake::Input(event) => self.handle_event(event),
            Wake::InputClosed => {
                tracing::warn!("terminal input closed");
                self.should_quit = true;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.engine.request_turn(direction);
                }
                KeyAction::Restart => {
                    self.engine.reset(Instant::now());
                    self.metrics.on_round_over();
                    self.dirty = true;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            },
            Event::Resize(..) => self.dirty = true,
            _ => {}
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
