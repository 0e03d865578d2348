use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AgriScout - field boundary tools for the command line
#[derive(Parser, Debug)]
#[command(name = "agriscout")]
#[command(about = "Field boundary checks, drawing replays and farm assistant", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML configuration file (defaults to $AGRISCOUT_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether one ring lies inside another
    Check(CheckArgs),

    /// Replay a drawing script through a fresh session
    Replay(ReplayArgs),

    /// Reverse geocode a coordinate
    Geocode(GeocodeArgs),

    /// Ask the farm assistant a question
    Chat(ChatArgs),

    /// Show the effective configuration and where each value comes from
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Outer ring file (JSON array of [lat, lng] pairs)
    #[arg(long)]
    pub outer: PathBuf,

    /// Inner ring file (JSON array of [lat, lng] pairs)
    #[arg(long)]
    pub inner: PathBuf,

    /// Require full polygon containment instead of vertex sampling
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Script file (JSON array of drawing events)
    pub script: PathBuf,

    /// Require full polygon containment for partitions
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct GeocodeArgs {
    /// Latitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude in degrees
    #[arg(allow_negative_numbers = true)]
    pub lng: f64,

    /// Reverse geocoding endpoint
    #[arg(long)]
    pub geocoder_url: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Question for the assistant
    pub message: String,

    /// Conversation session id
    #[arg(long)]
    pub session: Option<String>,

    /// Assistant webhook URL
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Local chat endpoint used when the webhook fails
    #[arg(long)]
    pub fallback_chat_url: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Assistant webhook URL
    #[arg(long)]
    pub webhook_url: Option<String>,

    /// Local chat endpoint
    #[arg(long)]
    pub fallback_chat_url: Option<String>,

    /// Reverse geocoding endpoint
    #[arg(long)]
    pub geocoder_url: Option<String>,

    /// Containment mode (vertex-sampling or strict)
    #[arg(long)]
    pub containment_mode: Option<String>,
}
