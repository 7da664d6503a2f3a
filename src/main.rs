use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use std::path::Path;
use viva::api::{AnalysisClient, HttpTokenClient};
use viva::cli::{Cli, Commands};
use viva::config::Config;
use viva::session::{InterviewSession, open_channel};
use viva::transcript::{PrintSink, Transcript};

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    match cli.command.take() {
        None => {
            run_interview(cli).await?;
        }
        Some(Commands::Devices) => {
            list_audio_devices()?;
        }
        Some(Commands::Analyze { file, topic }) => {
            analyze_saved(cli.config.as_deref(), &file, topic).await?;
        }
    }

    Ok(())
}

/// Load config from the given path, or the default location, with
/// environment overrides applied.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load(p)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    Ok(config.with_env_overrides())
}

async fn run_interview(cli: Cli) -> Result<()> {
    #[cfg(feature = "cpal-audio")]
    viva::audio::suppress_audio_warnings();

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(topic) = cli.topic {
        config.interview.topic = topic;
    }
    if let Some(server) = cli.server {
        config.server.url = server;
    }
    if let Some(device) = cli.device {
        config.audio.device = Some(device);
    }

    let audio = make_audio_source(config.audio.device.as_deref())?;

    if !cli.quiet {
        eprintln!("Topic: {}", config.interview.topic.bold());
        eprintln!("{}", "Connecting...".dimmed());
    }

    let tokens = HttpTokenClient::new(&config.server.url);
    let channel = open_channel(&config.server, &config.interview, &tokens).await?;

    let mut session =
        InterviewSession::new(config.interview.clone()).with_sink(Box::new(PrintSink));
    session.start(Box::new(channel), audio).await?;

    if !cli.quiet {
        eprintln!(
            "{}",
            "Interview started. Speak your answers; press Ctrl-C to finish.".dimmed()
        );
    }

    tokio::select! {
        result = session.run() => {
            if let Err(e) = result {
                eprintln!("viva: session error: {}", e);
            } else if !cli.quiet {
                eprintln!("{}", "The interviewer ended the session.".dimmed());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            if !cli.quiet {
                eprintln!("\n{}", "Ending interview...".dimmed());
            }
        }
    }
    session.end().await;

    let transcript = session.transcript();
    if cli.verbose >= 1 {
        eprintln!(
            "{}",
            format!(
                "{} question(s), {} answer(s) recorded",
                transcript.interviewer.len(),
                transcript.candidate.len()
            )
            .dimmed()
        );
    }

    if let Some(path) = cli.save.as_deref() {
        transcript.save(path)?;
        if !cli.quiet {
            eprintln!("Transcript saved to {}", path.display());
        }
    }

    if transcript.is_empty() {
        if !cli.quiet {
            eprintln!("{}", "Nothing was recorded; skipping analysis.".dimmed());
        }
        return Ok(());
    }

    if !cli.quiet {
        eprintln!("{}", "Scoring...".dimmed());
    }
    match AnalysisClient::new(&config.server.url)
        .analyze(&transcript)
        .await
    {
        Ok(result) => viva::report::render(&result),
        Err(e) => {
            // The transcript survives an analysis failure; with --save it
            // can be rescored later via `viva analyze`.
            eprintln!("viva: analysis failed: {}", e);
        }
    }

    Ok(())
}

async fn analyze_saved(
    config_path: Option<&Path>,
    file: &Path,
    topic: Option<String>,
) -> Result<()> {
    let config = load_config(config_path)?;

    let mut transcript = Transcript::load(file)?;
    if let Some(topic) = topic {
        transcript.topic = topic;
    }
    if transcript.topic.is_empty() {
        transcript.topic = config.interview.topic.clone();
    }
    if transcript.is_empty() {
        anyhow::bail!("transcript {} has no recorded turns", file.display());
    }

    let result = AnalysisClient::new(&config.server.url)
        .analyze(&transcript)
        .await?;
    viva::report::render(&result);
    Ok(())
}

#[cfg(feature = "cpal-audio")]
fn make_audio_source(device: Option<&str>) -> Result<Box<dyn viva::AudioSource>> {
    Ok(Box::new(viva::audio::CpalAudioSource::new(device)?))
}

#[cfg(not(feature = "cpal-audio"))]
fn make_audio_source(_device: Option<&str>) -> Result<Box<dyn viva::AudioSource>> {
    anyhow::bail!("built without audio capture support (enable the cpal-audio feature)")
}

#[cfg(feature = "cpal-audio")]
fn list_audio_devices() -> Result<()> {
    viva::audio::suppress_audio_warnings();
    let devices = viva::audio::list_devices()?;
    if devices.is_empty() {
        println!("No audio input devices found.");
    } else {
        println!("Available audio input devices:");
        for device in devices {
            println!("  {}", device);
        }
    }
    Ok(())
}

#[cfg(not(feature = "cpal-audio"))]
fn list_audio_devices() -> Result<()> {
    anyhow::bail!("built without audio capture support (enable the cpal-audio feature)")
}
