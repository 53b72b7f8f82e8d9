use eframe::egui;

use text2nodeseq::engine::protocol::EngineCommand;

use super::app::{NodeSeqApp, Status};

pub fn draw_left_panel(ctx: &egui::Context, app: &mut NodeSeqApp) {
    egui::SidePanel::left("left")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Model");

            egui::Grid::new("model_info").num_columns(2).show(ui, |ui| {
                ui.label("Server");
                ui.label(&app.info.base_url);
                ui.end_row();

                ui.label("Model");
                ui.label(&app.info.model);
                ui.end_row();

                ui.label("API");
                ui.label(format!("{:?}", app.info.api));
                ui.end_row();

                ui.label("Max new tokens");
                ui.label(app.info.max_new_tokens.to_string());
                ui.end_row();
            });

            if ui.button("Test connection").clicked() {
                app.ui.status = Status::Info("Checking connection…".into());
                app.send_command(EngineCommand::CheckConnection);
            }

            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(300.0)
                .show(ui, |ui| {
                    ui.collapsing(format!("Nodes ({})", app.info.nodes.len()), |ui| {
                        if app.info.nodes.is_empty() {
                            ui.label("None");
                        }
                        for node in &app.info.nodes {
                            ui.label(format!("• {} - {}", node.name, node.description));
                        }
                    });
                });

            ui.separator();

            ui.label("UI Scale");
            ui.add(egui::Slider::new(&mut app.ui.ui_scale, 0.75..=2.0));
        });
}
