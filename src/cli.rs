use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "yt2article", about = "Turn a YouTube video into a formatted article", version)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// Run the HTTP API server instead of one-shot generation
    #[arg(long)]
    pub serve: bool,

    /// Bind address for --serve
    #[arg(long)]
    pub bind: Option<String>,

    /// Style preset for the article (e.g. "casual", "technical deep-dive")
    #[arg(short, long, default_value = "")]
    pub style: String,

    /// Free-form style details
    #[arg(long, default_value = "")]
    pub style_detail: String,

    /// Target article length: short, medium, long
    #[arg(short = 'L', long, default_value = "medium")]
    pub length: String,

    /// Article language ("auto" follows the video)
    #[arg(long, default_value = "auto")]
    pub language: String,

    /// Preferred caption language
    #[arg(short, long)]
    pub lang: Option<String>,

    /// LLM model for external generation
    #[arg(long)]
    pub model: Option<String>,

    /// Write the article to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show extraction metadata
    #[arg(short, long)]
    pub verbose: bool,
}
