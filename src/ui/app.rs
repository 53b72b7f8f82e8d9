use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc;

use text2nodeseq::engine::engine::spawn_engine;
use text2nodeseq::engine::evaluator::Evaluation;
use text2nodeseq::engine::protocol::{EngineCommand, EngineResponse};
use text2nodeseq::{format_node_seq, CompletionApi, NodeEntry, Text2NodeSeq, TextCompleter};

use super::center_panel::draw_center_panel;
use super::left_panel::draw_left_panel;
use super::right_panel::draw_right_panel;

/* =========================
   Model Info
   ========================= */

/// Read-only description of the loaded model, shown in the side panel.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub base_url: String,
    pub model: String,
    pub api: CompletionApi,
    pub max_new_tokens: u32,
    pub nodes: Vec<NodeEntry>,
}

/* =========================
   UI State
   ========================= */

#[derive(Debug, Clone, Default)]
pub enum Status {
    #[default]
    Idle,
    Info(String),
    Error(String),
}

#[derive(Default)]
pub struct UiState {
    pub input_text: String,
    pub output_text: String,
    pub status: Status,

    /// A generate or evaluate command is in flight
    pub busy: bool,

    pub examples_path: Option<PathBuf>,
    pub evaluation: Option<Evaluation>,

    pub ui_scale: f32,
}

/* =========================
   App
   ========================= */

pub struct NodeSeqApp {
    pub ui: UiState,
    pub info: ModelInfo,

    cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl NodeSeqApp {
    pub fn new<C>(
        cc: &eframe::CreationContext<'_>,
        model: Text2NodeSeq<C>,
        info: ModelInfo,
        examples_path: Option<PathBuf>,
    ) -> Self
    where
        C: TextCompleter + Send + 'static,
    {
        let ctx = cc.egui_ctx.clone();
        let engine = spawn_engine(model, move || ctx.request_repaint());

        Self {
            ui: UiState {
                ui_scale: 1.0,
                examples_path,
                ..Default::default()
            },
            info,
            cmd_tx: engine.cmd_tx,
            resp_rx: engine.resp_rx,
        }
    }

    pub fn send_command(&mut self, cmd: EngineCommand) {
        let tracks_busy = !matches!(cmd, EngineCommand::CheckConnection);

        if self.cmd_tx.send(cmd).is_err() {
            self.ui.status = Status::Error("The inference engine has stopped.".into());
            return;
        }
        if tracks_busy {
            self.ui.busy = true;
        }
    }

    fn apply_response(&mut self, resp: EngineResponse) {
        match resp {
            EngineResponse::NodeSequence { nodes, .. } => {
                self.ui.output_text = format_node_seq(&nodes);
                self.ui.status = Status::Info(format!("Generated {} nodes", nodes.len()));
                self.ui.busy = false;
            }
            EngineResponse::Evaluated(evaluation) => {
                self.ui.status = Status::Info(format!(
                    "Evaluated {} examples",
                    evaluation.examples.len()
                ));
                self.ui.evaluation = Some(evaluation);
                self.ui.busy = false;
            }
            EngineResponse::Connection(status) => {
                self.ui.status = Status::Info(status);
            }
            EngineResponse::Failed { command, reason } => {
                self.ui.status = Status::Error(format!("{command} failed: {reason}"));
                self.ui.busy = false;
            }
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for NodeSeqApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.ui.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            self.apply_response(resp);
        }

        draw_left_panel(ctx, self);
        draw_right_panel(ctx, self);

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.ui.busy {
                    ui.spinner();
                }
                match &self.ui.status {
                    Status::Idle => ui.label("Ready"),
                    Status::Info(text) => ui.label(text),
                    Status::Error(text) => ui.colored_label(egui::Color32::LIGHT_RED, text),
                };
            });
        });

        draw_center_panel(ctx, self);
    }
}
