//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::enums::{Aspect, Model, OutputFormat, Quality};

/// Build Veo video prompts and generate videos from them
#[derive(Parser, Debug)]
#[command(name = "veo-studio")]
#[command(version, about = "Structured prompt builder and Veo video generator", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a video from a prompt or a structured prompt document
    Generate(GenerateArgs),
    /// Render a prompt document as narrative text or JSON
    Build {
        /// Prompt document (TOML)
        doc: PathBuf,
        /// Output format (default: all three)
        #[arg(long, short)]
        format: Option<OutputFormat>,
    },
    /// Write a starter prompt document
    BuildInit {
        /// Where to write the document
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the prompt text that would be submitted for a file ('-' for stdin)
    Decompile {
        file: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Prompt text, or '-' to read from stdin. Structured JSON is decompiled.
    pub prompt: Option<String>,

    /// Read the prompt from a file
    #[arg(long, short = 'f', conflicts_with = "prompt")]
    pub prompt_file: Option<PathBuf>,

    /// Reference image for image-to-video
    #[arg(long, short)]
    pub image: Option<PathBuf>,

    /// Video model
    #[arg(long, short)]
    pub model: Option<Model>,

    /// Aspect ratio
    #[arg(long)]
    pub aspect_ratio: Option<Aspect>,

    /// Output resolution
    #[arg(long)]
    pub resolution: Option<Quality>,

    /// Ask for a sound track
    #[arg(long)]
    pub sound: bool,

    /// Where to save the video
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Enter the API key on the terminal instead of using the configured one
    #[arg(long)]
    pub interactive_key: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
