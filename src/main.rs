//! `text2nodeseq` binary: the node-sequence window plus command-line runs.
//!
//! Subcommands: `ui` (default), `run`, `prompt`, `eval`, `compare`, `ping`.

mod logging;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use eframe::egui;

use text2nodeseq::config::{load_examples, load_prompt_template, load_settings, load_vocabulary};
use text2nodeseq::{
    evaluate, format_node_seq, CompletionApi, HttpCompleter, Settings, SettingsOverrides,
    TemplateFields, Text2NodeSeq, TextCompleter,
};

use ui::app::{ModelInfo, NodeSeqApp};

#[derive(Parser, Debug)]
#[command(name = "text2nodeseq")]
#[command(about = "Turn a task description into a sequence of workflow nodes")]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,

    #[command(flatten)]
    overrides: Overrides,

    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Settings overrides; each takes precedence over the settings file.
#[derive(Args, Debug, Default)]
struct Overrides {
    /// Settings file (default: <config dir>/text2nodeseq/settings.json)
    #[arg(long, value_name = "PATH", env = "TEXT2NODES_SETTINGS", global = true)]
    settings: Option<PathBuf>,

    /// OpenAI-compatible base URL, e.g. http://localhost:1234/v1
    #[arg(long, value_name = "URL", env = "TEXT2NODES_BASE_URL", global = true)]
    base_url: Option<String>,

    #[arg(long, value_name = "NAME", env = "TEXT2NODES_MODEL", global = true)]
    model: Option<String>,

    #[arg(long, value_enum, env = "TEXT2NODES_API", global = true)]
    api: Option<CompletionApi>,

    #[arg(long, value_name = "KEY", env = "TEXT2NODES_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Tokens the model may generate beyond the prompt
    #[arg(long, value_name = "N", env = "TEXT2NODES_MAX_NEW_TOKENS", global = true)]
    max_new_tokens: Option<u32>,

    /// Prompt template document (YAML)
    #[arg(long, value_name = "PATH", env = "TEXT2NODES_PROMPT_CONF", global = true)]
    prompt_conf: Option<PathBuf>,

    /// Node vocabulary document (YAML)
    #[arg(long, value_name = "PATH", env = "TEXT2NODES_NODES", global = true)]
    nodes: Option<PathBuf>,

    #[arg(long, value_enum, env = "TEXT2NODES_TEMPLATE_FIELDS", global = true)]
    template_fields: Option<TemplateFields>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the window (default)
    Ui,
    /// Print the node sequence for a task description
    Run {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Print a JSON array instead of a literal list
        #[arg(long)]
        json: bool,
    },
    /// Print the full prompt that would be sent to the model
    Prompt {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Compute precision, recall, F1, exact and near match over an examples document
    Eval {
        #[arg(long, value_name = "PATH")]
        examples: Option<PathBuf>,
        /// Print the metrics as a JSON object
        #[arg(long)]
        json: bool,
    },
    /// Print expected and generated sequences for every example
    Compare {
        #[arg(long, value_name = "PATH")]
        examples: Option<PathBuf>,
    },
    /// Check that the model server answers
    Ping,
}

fn resolve_settings(overrides: Overrides) -> Result<Settings> {
    let settings = load_settings(overrides.settings.as_deref())?;
    Ok(settings.apply_overrides(overrides.into()))
}

impl From<Overrides> for SettingsOverrides {
    fn from(o: Overrides) -> Self {
        Self {
            base_url: o.base_url,
            model: o.model,
            api: o.api,
            api_key: o.api_key,
            max_new_tokens: o.max_new_tokens,
            prompt_conf: o.prompt_conf,
            nodes: o.nodes,
            template_fields: o.template_fields,
        }
    }
}

/// Loads the template and vocabulary and wires them to the HTTP completer.
fn build_model(settings: &Settings) -> Result<Text2NodeSeq<HttpCompleter>> {
    let template = load_prompt_template(&settings.prompt_conf, settings.template_fields)?;
    let vocabulary = load_vocabulary(&settings.nodes)?;
    let completer =
        HttpCompleter::from_settings(settings).context("failed to build HTTP client")?;

    tracing::info!(
        base_url = %settings.base_url,
        model = %settings.model,
        nodes = vocabulary.len(),
        "model ready"
    );

    Ok(Text2NodeSeq::new(template, vocabulary, completer).with_max_new_tokens(settings.max_new_tokens))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = resolve_settings(cli.overrides)?;
    let model = build_model(&settings)?;

    match cli.cmd.unwrap_or(Command::Ui) {
        Command::Ui => run_window(model, &settings),

        Command::Run { text, json } => {
            let nodes = model.get_node_seq(&text.join(" "))?;
            if json {
                println!("{}", serde_json::to_string(&nodes)?);
            } else {
                println!("{}", format_node_seq(&nodes));
            }
            Ok(())
        }

        Command::Prompt { text } => {
            println!("{}", model.prompt_for(&text.join(" ")));
            Ok(())
        }

        Command::Eval { examples, json } => {
            let path = examples.unwrap_or_else(|| settings.examples.clone());
            let examples = load_examples(&path)?;
            let metrics = evaluate(&model, &examples)
                .with_context(|| format!("evaluation of {} failed", path.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                for (name, value) in metrics.iter() {
                    println!("{name} {value:.3}");
                }
            }
            Ok(())
        }

        Command::Compare { examples } => {
            let path = examples.unwrap_or_else(|| settings.examples.clone());
            for example in load_examples(&path)? {
                let generated = model.get_node_seq(&example.prompt)?;

                println!("{}", example.prompt);
                println!("Expected: {}", format_node_seq(&example.nodes));
                println!("Generated: {}", format_node_seq(&generated));
                println!("\n");
            }
            Ok(())
        }

        Command::Ping => {
            println!("{}", model.completer().check_connection()?);
            Ok(())
        }
    }
}

fn run_window(model: Text2NodeSeq<HttpCompleter>, settings: &Settings) -> Result<()> {
    let info = ModelInfo {
        base_url: settings.base_url.clone(),
        model: settings.model.clone(),
        api: settings.api,
        max_new_tokens: model.max_new_tokens(),
        nodes: model.vocabulary().entries().to_vec(),
    };
    let examples_path = Some(settings.examples.clone()).filter(|p| p.exists());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Text to Sequence of Nodes")
            .with_inner_size([1100.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Text to Sequence of Nodes",
        options,
        Box::new(move |cc| Ok(Box::new(NodeSeqApp::new(cc, model, info, examples_path)))),
    )
    .map_err(|e| anyhow::anyhow!("window failed: {e}"))
}
