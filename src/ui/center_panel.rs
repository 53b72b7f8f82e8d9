use eframe::egui;

use text2nodeseq::engine::protocol::EngineCommand;

use super::app::NodeSeqApp;

pub fn draw_center_panel(ctx: &egui::Context, app: &mut NodeSeqApp) {
    let input_id = egui::Id::new("prompt_input_box");

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.heading("Text to Sequence of Nodes");
        ui.label("Enter a text prompt to generate a sequence of nodes based on your input.");
        ui.add_space(8.0);

        // ---------- Input ----------
        ui.label("Text Prompt");
        // Enter submits, Shift+Enter adds a line
        let mut submit = take_submit_key(ctx, input_id);

        ui.add(
            egui::TextEdit::multiline(&mut app.ui.input_text)
                .id(input_id)
                .hint_text("Enter your prompt here (e.g., Fetch user data and display it)...")
                .desired_rows(3)
                .desired_width(f32::INFINITY)
                .lock_focus(true),
        );

        if ui
            .add_enabled(!app.ui.busy, egui::Button::new("Generate"))
            .clicked()
        {
            submit = true;
        }

        if submit && !app.ui.busy {
            let text = app.ui.input_text.clone();

            if !text.trim().is_empty() {
                app.send_command(EngineCommand::Generate { text });
            }

            ui.memory_mut(|m| m.request_focus(input_id));
        }

        ui.add_space(12.0);

        // ---------- Output ----------
        ui.label("Generated Sequence");
        ui.add(
            egui::TextEdit::multiline(&mut app.ui.output_text.as_str())
                .desired_rows(2)
                .desired_width(f32::INFINITY),
        );
    });
}

/// Takes a plain Enter press away from the focused prompt box, so the
/// multiline edit never inserts a line break for a submit.
fn take_submit_key(ctx: &egui::Context, input_id: egui::Id) -> bool {
    ctx.memory(|m| m.has_focus(input_id))
        && ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: egui::Key, modifiers: egui::Modifiers) -> egui::RawInput {
        egui::RawInput {
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        }
    }

    /// Runs one frame with a focused prompt box and returns whether Enter submitted.
    fn frame(ctx: &egui::Context, text: &mut String, input: egui::RawInput) -> bool {
        let id = egui::Id::new("prompt_input_box");
        let mut submitted = false;

        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                submitted = take_submit_key(ctx, id);
                let response = ui.add(egui::TextEdit::multiline(text).id(id));
                response.request_focus();
            });
        });
        submitted
    }

    #[test]
    fn enter_submits_without_inserting_a_line_break() {
        let ctx = egui::Context::default();
        let mut text = String::from("Fetch user data and display it");

        frame(&ctx, &mut text, egui::RawInput::default());
        frame(&ctx, &mut text, egui::RawInput::default());
        let submitted = frame(&ctx, &mut text, key(egui::Key::Enter, egui::Modifiers::NONE));

        assert!(submitted);
        assert_eq!(text, "Fetch user data and display it");
    }

    #[test]
    fn shift_enter_is_left_to_the_text_box() {
        let ctx = egui::Context::default();
        let mut text = String::from("first line");

        frame(&ctx, &mut text, egui::RawInput::default());
        frame(&ctx, &mut text, egui::RawInput::default());
        let submitted = frame(&ctx, &mut text, key(egui::Key::Enter, egui::Modifiers::SHIFT));

        assert!(!submitted);
    }

    #[test]
    fn enter_is_ignored_without_focus() {
        let ctx = egui::Context::default();
        let id = egui::Id::new("prompt_input_box");
        let mut submitted = true;

        let _ = ctx.run(key(egui::Key::Enter, egui::Modifiers::NONE), |ctx| {
            submitted = take_submit_key(ctx, id);
        });

        assert!(!submitted);
    }
}
