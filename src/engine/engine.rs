use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::config::documents::load_examples;
use crate::engine::evaluator::evaluate_detailed;
use crate::engine::llm_client::TextCompleter;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::text2nodeseq::Text2NodeSeq;

/// Owns the model on a background thread and runs one command at a time,
/// so the window stays responsive while inference blocks.
pub struct Engine<C> {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    model: Text2NodeSeq<C>,
    notify: Box<dyn Fn() + Send>,
}

impl<C: TextCompleter> Engine<C> {
    /// `notify` runs after every response is sent (e.g. to request a repaint).
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        model: Text2NodeSeq<C>,
        notify: impl Fn() + Send + 'static,
    ) -> Self {
        Self {
            rx,
            tx,
            model,
            notify: Box::new(notify),
        }
    }

    /// Runs until the command channel closes or nobody listens for responses.
    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            let response = self.handle(cmd);

            if self.tx.send(response).is_err() {
                break;
            }
            (self.notify)();
        }
        tracing::debug!("engine stopped");
    }

    fn handle(&self, cmd: EngineCommand) -> EngineResponse {
        match cmd {
            EngineCommand::Generate { text } => match self.model.get_node_seq(&text) {
                Ok(nodes) => EngineResponse::NodeSequence {
                    prompt: text,
                    nodes,
                },
                Err(e) => failed("generate", e),
            },

            EngineCommand::Evaluate { examples_path } => {
                let examples = match load_examples(&examples_path) {
                    Ok(examples) => examples,
                    Err(e) => return failed("evaluate", e),
                };

                match evaluate_detailed(&self.model, &examples) {
                    Ok(evaluation) => EngineResponse::Evaluated(evaluation),
                    Err(e) => failed("evaluate", e),
                }
            }

            EngineCommand::CheckConnection => match self.model.completer().check_connection() {
                Ok(status) => EngineResponse::Connection(status),
                Err(e) => failed("check connection", e),
            },
        }
    }
}

fn failed(command: &'static str, error: impl std::fmt::Display) -> EngineResponse {
    tracing::warn!(command, error = %error, "engine command failed");
    EngineResponse::Failed {
        command,
        reason: error.to_string(),
    }
}

/// Channels to talk to an engine running on its own thread.
pub struct EngineHandle {
    pub cmd_tx: Sender<EngineCommand>,
    pub resp_rx: Receiver<EngineResponse>,
    pub thread: JoinHandle<()>,
}

pub fn spawn_engine<C>(model: Text2NodeSeq<C>, notify: impl Fn() + Send + 'static) -> EngineHandle
where
    C: TextCompleter + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();

    let thread = std::thread::spawn(move || {
        let mut engine = Engine::new(cmd_rx, resp_tx, model, notify);
        engine.run();
    });

    EngineHandle {
        cmd_tx,
        resp_rx,
        thread,
    }
}
