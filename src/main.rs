use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use eyre::{Result, bail};
use log::info;

use yt2article::article::ArticleGenerator;
use yt2article::server::AppState;
use yt2article::{ArticleLength, GenerationRequest, extract_video_id, server, transcript, youtube};

mod cli;

use cli::Cli;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("yt2article.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("yt2article")
        .join("logs")
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = yt2article::config::Config::load().unwrap_or_default();

    if cli.verbose {
        let config_path = yt2article::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let caption_lang = cli
        .lang
        .clone()
        .or_else(|| config.default_lang.clone())
        .unwrap_or_else(|| "en".to_string());

    let client = reqwest::Client::new();
    let generator = ArticleGenerator::new(client.clone(), config.generator_config(cli.model.as_deref()));

    if cli.serve {
        let bind = cli
            .bind
            .clone()
            .or_else(|| config.bind.clone())
            .unwrap_or_else(|| "127.0.0.1:8080".to_string());
        let state = AppState::new(client, generator, caption_lang);
        return server::serve(&bind, state).await;
    }

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.is_empty() {
        bail!("no URL or video ID provided\n\nUsage: yt2article <URL>\n       echo <URL> | yt2article");
    }

    for url_input in &urls {
        let url_input = url_input.trim();
        if url_input.is_empty() {
            continue;
        }

        let video_id = extract_video_id(url_input)
            .ok_or_else(|| eyre::eyre!("could not extract video ID from: {url_input}\n\nSupported formats:\n  https://www.youtube.com/watch?v=ID\n  https://youtu.be/ID\n  https://www.youtube.com/embed/ID\n  https://www.youtube.com/shorts/ID\n  https://www.youtube.com/live/ID\n  <11-character video ID>"))?;

        let segments = youtube::fetch_captions(&client, &video_id, &caption_lang).await?;
        let normalized = transcript::normalize(&segments);
        if normalized.text.is_empty() {
            bail!("transcript for {video_id} is empty");
        }

        let request = GenerationRequest {
            transcript: normalized.text,
            segments,
            style_preset: cli.style.clone(),
            style_detail: cli.style_detail.clone(),
            length: ArticleLength::from_choice(&cli.length),
            language: cli.language.clone(),
            truncated: normalized.truncated,
        };

        let outcome = generator.generate(&request).await;

        if cli.verbose {
            eprintln!(
                "Video: {video_id}\nSegments: {}\nTruncated: {}\nMode: {}",
                request.segments.len(),
                request.truncated,
                outcome.mode(),
            );
        }

        let article = outcome.into_text();
        if let Some(ref path) = cli.output {
            std::fs::write(path, &article)?;
            if cli.verbose {
                eprintln!("Article written to: {}", path.display());
            }
        } else {
            println!("{article}");
        }
    }

    Ok(())
}
