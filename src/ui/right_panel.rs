use eframe::egui;

use text2nodeseq::engine::evaluator::{Evaluation, ScoredExample};
use text2nodeseq::engine::protocol::EngineCommand;
use text2nodeseq::format_node_seq;

use super::app::NodeSeqApp;

pub fn draw_right_panel(ctx: &egui::Context, app: &mut NodeSeqApp) {
    egui::SidePanel::right("right")
        .resizable(true)
        .default_width(340.0)
        .min_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Evaluation");

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!app.ui.busy, egui::Button::new("Choose examples…"))
                    .clicked()
                {
                    let picked = rfd::FileDialog::new()
                        .add_filter("YAML", &["yml", "yaml"])
                        .pick_file();
                    if picked.is_some() {
                        app.ui.examples_path = picked;
                    }
                }

                let can_run = !app.ui.busy && app.ui.examples_path.is_some();
                if ui.add_enabled(can_run, egui::Button::new("Evaluate")).clicked() {
                    if let Some(path) = app.ui.examples_path.clone() {
                        app.send_command(EngineCommand::Evaluate {
                            examples_path: path,
                        });
                    }
                }
            });

            match &app.ui.examples_path {
                Some(path) => ui.small(path.display().to_string()),
                None => ui.small("No examples file selected"),
            };

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| match &app.ui.evaluation {
                Some(evaluation) => draw_evaluation(ui, evaluation),
                None => {
                    ui.label("No evaluation yet.");
                }
            });
        });
}

fn draw_evaluation(ui: &mut egui::Ui, evaluation: &Evaluation) {
    egui::Grid::new("metrics")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for (name, value) in evaluation.metrics.iter() {
                ui.label(name);
                ui.monospace(format!("{value:.3}"));
                ui.end_row();
            }
        });

    ui.separator();

    ui.collapsing(format!("Examples ({})", evaluation.examples.len()), |ui| {
        for scored in &evaluation.examples {
            draw_scored_example(ui, scored);
        }
    });
}

fn draw_scored_example(ui: &mut egui::Ui, scored: &ScoredExample) {
    let verdict = if scored.score.exact {
        "✔ exact"
    } else if scored.score.near {
        "≈ near"
    } else {
        "✘ miss"
    };
    let generated = scored.example.generated.as_deref().unwrap_or_default();

    ui.group(|ui| {
        ui.label(egui::RichText::new(&scored.example.prompt).strong());
        ui.label(format!("Expected: {}", format_node_seq(&scored.example.nodes)));
        ui.label(format!("Generated: {}", format_node_seq(generated)));
        ui.small(verdict);
    });
}
