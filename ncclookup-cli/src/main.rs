use clap::Parser;
use ncclookup::io::load_image;
use ncclookup::{ChannelPolicy, GPoint, Lookup, Rect};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ncclookup CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    Gray,
    Color,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FindConfig {
    #[default]
    All,
    One,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ChannelPolicyConfig {
    #[default]
    IgnoreExtra,
    Exact,
}

impl From<ChannelPolicyConfig> for ChannelPolicy {
    fn from(value: ChannelPolicyConfig) -> Self {
        match value {
            ChannelPolicyConfig::IgnoreExtra => ChannelPolicy::IgnoreExtra,
            ChannelPolicyConfig::Exact => ChannelPolicy::Exact,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RectConfig {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl From<RectConfig> for Rect {
    fn from(value: RectConfig) -> Self {
        Rect::new(value.x0, value.y0, value.x1, value.y1)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    mode: ModeConfig,
    threshold: f64,
    find: FindConfig,
    rect: Option<RectConfig>,
    channel_policy: ChannelPolicyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            mode: ModeConfig::default(),
            threshold: 0.95,
            find: FindConfig::default(),
            rect: None,
            channel_policy: ChannelPolicyConfig::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: usize,
    y: usize,
    score: f64,
}

impl From<GPoint> for MatchRecord {
    fn from(value: GPoint) -> Self {
        Self {
            x: value.x,
            y: value.y,
            score: value.g,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("ncclookup=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }
    if !config.threshold.is_finite() {
        return Err("threshold must be a finite number".into());
    }

    let image = load_image(&config.image_path)?;
    let template = load_image(&config.template_path)?;

    let lookup = match config.mode {
        ModeConfig::Gray => Lookup::new(image.view()),
        ModeConfig::Color => Lookup::new_color(image.view()),
    }
    .with_channel_policy(config.channel_policy.into());

    let rect = config
        .rect
        .map(Rect::from)
        .unwrap_or_else(|| Rect::full(lookup.width(), lookup.height()));
    let all = matches!(config.find, FindConfig::All);
    let matches = lookup.find_in_rect(template.view(), rect, config.threshold, all)?;

    let output = Output {
        matches: matches.into_iter().map(MatchRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
