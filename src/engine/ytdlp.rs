//! yt-dlp backed download engine
//!
//! Every job spawns a fresh yt-dlp process. Progress is requested as JSON
//! through `--progress-template` and final file paths through
//! `--print after_move:`, both behind line markers so they can be told
//! apart from anything else yt-dlp prints.

use crate::downloader::EngineOptions;
use crate::engine::error::EngineError;
use crate::engine::models::{DownloadOutcome, MediaInfo};
use crate::engine::progress::{ProgressUpdate, RawProgress};
use crate::engine::traits::{DownloadEngine, EngineFactory};
use crate::utils::tools;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

const PROGRESS_MARKER: &str = "[audioloader:progress]";
const SAVED_MARKER: &str = "[audioloader:saved]";

/// A line of yt-dlp stdout that carries structured data
#[derive(Debug, Clone, PartialEq)]
pub enum OutputLine {
    Progress(ProgressUpdate),
    Saved(PathBuf),
}

/// Recognise marker lines; everything else is `None`
pub fn parse_output_line(line: &str) -> Option<OutputLine> {
    let line = line.trim();
    if let Some(json) = line.strip_prefix(PROGRESS_MARKER) {
        return match serde_json::from_str::<RawProgress>(json.trim()) {
            Ok(raw) => raw.into_update().map(OutputLine::Progress),
            Err(e) => {
                debug!("Unparseable progress line {:?}: {}", line, e);
                None
            }
        };
    }
    line.strip_prefix(SAVED_MARKER)
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(|path| OutputLine::Saved(PathBuf::from(path)))
}

/// Strip the `ERROR: ` prefix yt-dlp puts on failure lines
fn error_text(line: &str) -> Option<String> {
    line.trim()
        .strip_prefix("ERROR:")
        .map(|rest| rest.trim().to_string())
        .filter(|rest| !rest.is_empty())
}

async fn collect_errors<R>(stream: R) -> Vec<String>
where
    R: AsyncRead + Unpin,
{
    let mut errors = Vec::new();
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        match error_text(&line) {
            Some(err) => {
                warn!("yt-dlp: {}", err);
                errors.push(err);
            }
            None => debug!("yt-dlp stderr: {}", line),
        }
    }
    errors
}

/// Engine session driving one yt-dlp binary
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    ytdlp_path: PathBuf,
    ffmpeg_location: Option<PathBuf>,
}

impl YtDlpEngine {
    pub fn new(ytdlp_path: PathBuf, ffmpeg_location: Option<PathBuf>) -> Self {
        Self {
            ytdlp_path,
            ffmpeg_location,
        }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &PathBuf {
        &self.ytdlp_path
    }

    /// Arguments for the metadata-only pre-fetch
    pub fn metadata_args(&self, url: &str, options: &EngineOptions) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "--dump-single-json".into(),
            "--flat-playlist".into(),
            "--no-warnings".into(),
        ];
        if options.no_playlist {
            args.push("--no-playlist".into());
        }
        args.push("--".into());
        args.push(url.into());
        args
    }

    /// Arguments for the real download
    pub fn download_args(&self, url: &str, options: &EngineOptions) -> Vec<String> {
        let mut args = options.to_args();
        if let Some(ffmpeg) = &self.ffmpeg_location {
            args.push("--ffmpeg-location".into());
            args.push(ffmpeg.to_string_lossy().into_owned());
        }
        args.extend([
            "--progress".to_string(),
            "--newline".to_string(),
            "--progress-template".to_string(),
            format!("download:{} %(progress)j", PROGRESS_MARKER),
            "--print".to_string(),
            format!("after_move:{} %(filepath)s", SAVED_MARKER),
            "--no-simulate".to_string(),
            "--".to_string(),
            url.to_string(),
        ]);
        args
    }
}

#[async_trait]
impl DownloadEngine for YtDlpEngine {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract_info(&self, url: &str, options: &EngineOptions) -> Result<MediaInfo, EngineError> {
        debug!("Extracting metadata for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(self.metadata_args(url, options))
            .kill_on_drop(true)
            .output()
            .await
            .map_err(EngineError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr
                .lines()
                .filter_map(error_text)
                .last()
                .unwrap_or_else(|| format!("yt-dlp exited with {}", output.status));
            return Err(EngineError::Failed(message));
        }

        Ok(serde_json::from_slice(&output.stdout)?)
    }

    async fn download(&self, url: &str, options: &EngineOptions) -> Result<DownloadOutcome, EngineError> {
        let args = self.download_args(url, options);
        debug!("Spawning yt-dlp with args: {:?}", args);

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(EngineError::Spawn)?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Failed("yt-dlp stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| EngineError::Failed("yt-dlp stderr unavailable".into()))?;
        let stderr_task = tokio::spawn(collect_errors(stderr));

        let mut outcome = DownloadOutcome::default();
        let mut lines = BufReader::new(stdout).lines();

        while let Some(line) = lines.next_line().await? {
            match parse_output_line(&line) {
                Some(OutputLine::Progress(update)) => {
                    if let Err(e) = options.report_progress(&update) {
                        info!("Stopping yt-dlp: {}", e);
                        if let Err(kill_err) = child.kill().await {
                            error!("Failed to kill yt-dlp: {}", kill_err);
                        }
                        stderr_task.abort();
                        return Err(e);
                    }
                }
                Some(OutputLine::Saved(path)) => {
                    info!("Saved {:?}", path);
                    outcome.saved_files.push(path);
                }
                None => debug!("yt-dlp: {}", line),
            }
        }

        let status = child.wait().await?;
        let errors = stderr_task.await.unwrap_or_default();

        if status.success() || !outcome.saved_files.is_empty() {
            outcome.skipped = errors;
            return Ok(outcome);
        }

        Err(EngineError::Failed(
            errors
                .last()
                .cloned()
                .unwrap_or_else(|| format!("yt-dlp exited with {}", status)),
        ))
    }
}

/// Creates a [`YtDlpEngine`] per job from the tools found on this machine
#[derive(Debug, Clone, Default)]
pub struct YtDlpFactory {
    ytdlp_path: Option<PathBuf>,
    ffmpeg_location: Option<PathBuf>,
}

impl YtDlpFactory {
    pub fn new(ytdlp_path: Option<PathBuf>, ffmpeg_location: Option<PathBuf>) -> Self {
        Self {
            ytdlp_path,
            ffmpeg_location,
        }
    }

    pub fn from_tools(tools: &tools::ToolStatus) -> Self {
        Self::new(tools.ytdlp.clone(), tools.ffmpeg.clone())
    }
}

impl EngineFactory for YtDlpFactory {
    fn open(&self) -> Result<Box<dyn DownloadEngine>, EngineError> {
        // Installed after startup? Look again before giving up.
        let ytdlp_path = match &self.ytdlp_path {
            Some(path) => path.clone(),
            None => tools::find_ytdlp().ok_or(EngineError::NotFound)?,
        };
        Ok(Box::new(YtDlpEngine::new(
            ytdlp_path,
            self.ffmpeg_location.clone(),
        )))
    }
}
