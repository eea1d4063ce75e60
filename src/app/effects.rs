use crate::app::{App, Message, Model, ToastLevel};

impl App {
    /// Effects that touch the outside world; [`super::update`] stays pure.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if let Message::Save = msg {
            if model.is_read_only() {
                model.show_toast(ToastLevel::Warning, "Read-only: nothing to save");
                return;
            }
            match model.save_to_disk() {
                Ok(()) => {
                    crate::perf::log_event(
                        "save.ok",
                        format!("path={}", model.file_path.display()),
                    );
                    if model.quit_confirmed {
                        model.should_quit = true;
                    } else {
                        model.show_toast(
                            ToastLevel::Info,
                            format!("Saved {}", model.file_path.display()),
                        );
                    }
                }
                Err(err) => {
                    model.show_toast(ToastLevel::Error, format!("Save failed: {err:#}"));
                    crate::perf::log_event(
                        "save.error",
                        format!("path={} err={err:#}", model.file_path.display()),
                    );
                }
            }
            // A toast takes a row from the editor.
            model.ensure_caret_visible();
        }
    }
}
