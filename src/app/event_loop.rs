use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, update};

impl App {
    /// Run the composer until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the review file cannot be read or the terminal
    /// fails during initialization or the event loop.
    pub fn run(&mut self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let read_scope = crate::perf::scope("app.read_file");
        let text = if self.file_path.exists() {
            std::fs::read_to_string(&self.file_path)
                .with_context(|| format!("Failed to read {}", self.file_path.display()))?
        } else {
            String::new()
        };
        drop(read_scope);

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - halfnote edit requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let mut model = Model::new(self.file_path.clone(), &text, (size.width, size.height))
            .with_read_only(self.read_only)
            .with_preview(self.preview_visible)
            .with_theme(self.theme);

        let result = Self::event_loop(&mut terminal, &mut model);

        ratatui::restore();
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            if needs_render {
                frame_idx += 1;
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
                // The new text is on screen; now the caret may follow.
                if model.after_render() {
                    crate::perf::log_event(
                        "caret.commit",
                        format!("frame={frame_idx} caret={}", model.buffer.caret()),
                    );
                    needs_render = true;
                    continue;
                }
            }

            if model.should_quit {
                return Ok(());
            }

            let poll_ms = if model.active_toast().is_some() { 100 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                let mut handled = 0_u32;
                loop {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        handled += 1;
                        crate::perf::log_event(
                            "event.message",
                            format!("frame={frame_idx} msg={msg:?}"),
                        );
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                    // Coalesce key repeat bursts into a single render.
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
                if handled > 1 {
                    crate::perf::log_event(
                        "event.drain",
                        format!("frame={frame_idx} handled={handled}"),
                    );
                }
            }
        }
    }
}
