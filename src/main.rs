//! Audioloader - audio downloader built on yt-dlp
//!
//! A small desktop front-end that downloads a video or playlist and
//! converts it to audio, reporting progress as it goes.

use anyhow::{Context, Result};
use audioloader::gui::{AppFlags, AudioloaderApp};
use audioloader::utils::{platform, AppSettings, ToolStatus};
use clap::Parser;
use iced::Application;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Log debug output, including every yt-dlp invocation
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .init();

    let settings = AppSettings::load();
    info!("Settings file: {:?}", platform::settings_path());

    let tools = ToolStatus::detect();
    info!("yt-dlp: {:?}, ffmpeg: {:?}", tools.ytdlp, tools.ffmpeg);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("audioloader-worker")
        .build()
        .context("Failed to create tokio runtime")?;

    let flags = AppFlags {
        runtime: Arc::new(runtime),
        settings,
        tools,
    };

    AudioloaderApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(760.0, 760.0),
            min_size: Some(iced::Size::new(620.0, 560.0)),
            exit_on_close_request: false,
            ..Default::default()
        },
        antialiasing: true,
        ..iced::Settings::with_flags(flags)
    })?;

    Ok(())
}
