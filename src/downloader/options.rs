//! Mapping from a [`DownloadRequest`] to the engine configuration
//!
//! `build` is pure: the same request always yields equal options. The only
//! part that is not compared is the progress hook closure.

use crate::downloader::cancel::CancellationToken;
use crate::downloader::request::{AudioCodec, AudioQuality, DownloadRequest, SleepIntervals};
use crate::engine::{EngineError, ProgressUpdate};
use std::fmt;
use std::sync::Arc;

/// Format selector used for every job: the engine picks the best audio-only stream
pub const AUDIO_FORMAT_SELECTOR: &str = "bestaudio/best";

/// Fragments are fetched one at a time to keep the request pattern unremarkable
pub const CONCURRENT_FRAGMENTS: u32 = 1;

/// Callback the engine invokes for every progress tick.
///
/// Returning an error aborts the engine operation.
pub type ProgressHook = Arc<dyn Fn(&ProgressUpdate) -> Result<(), EngineError> + Send + Sync>;

/// Post-processing step run by the engine after each item's raw download
#[derive(Debug, Clone, PartialEq)]
pub enum PostProcessor {
    ExtractAudio {
        codec: AudioCodec,
        quality: AudioQuality,
    },
    EmbedMetadata,
    EmbedThumbnail,
}

/// Complete engine configuration for one job
#[derive(Clone)]
pub struct EngineOptions {
    pub format: String,
    pub output_template: String,
    pub no_playlist: bool,
    /// Skip broken playlist entries instead of aborting the job
    pub ignore_errors: bool,
    pub retries: u32,
    pub fragment_retries: u32,
    pub concurrent_fragments: u32,
    pub restrict_filenames: bool,
    pub no_overwrites: bool,
    pub quiet: bool,
    pub no_warnings: bool,
    pub write_thumbnail: bool,
    pub postprocessors: Vec<PostProcessor>,
    /// `None` outside safe mode: no artificial delay at all
    pub sleep: Option<SleepIntervals>,
    pub progress_hook: Option<ProgressHook>,
}

impl EngineOptions {
    /// Hand a progress tick to the hook, if any
    pub fn report_progress(&self, update: &ProgressUpdate) -> Result<(), EngineError> {
        match &self.progress_hook {
            Some(hook) => hook(update),
            None => Ok(()),
        }
    }

    pub fn has_postprocessor(&self, pp: &PostProcessor) -> bool {
        self.postprocessors.iter().any(|p| p == pp)
    }

    /// Render the options as yt-dlp command line flags (without the URL)
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-f".into(),
            self.format.clone(),
            "-o".into(),
            self.output_template.clone(),
        ];

        args.push(if self.no_playlist { "--no-playlist" } else { "--yes-playlist" }.into());
        if self.ignore_errors {
            args.push("--ignore-errors".into());
        }

        args.push("--retries".into());
        args.push(self.retries.to_string());
        args.push("--fragment-retries".into());
        args.push(self.fragment_retries.to_string());
        args.push("--concurrent-fragments".into());
        args.push(self.concurrent_fragments.to_string());

        if self.restrict_filenames {
            args.push("--restrict-filenames".into());
        }
        if self.no_overwrites {
            args.push("--no-overwrites".into());
        }
        if self.quiet {
            args.push("--quiet".into());
        }
        if self.no_warnings {
            args.push("--no-warnings".into());
        }
        if self.write_thumbnail && !self.has_postprocessor(&PostProcessor::EmbedThumbnail) {
            args.push("--write-thumbnail".into());
        }

        for pp in &self.postprocessors {
            match pp {
                PostProcessor::ExtractAudio { codec, quality } => {
                    args.push("--extract-audio".into());
                    args.push("--audio-format".into());
                    args.push(codec.as_str().into());
                    args.push("--audio-quality".into());
                    args.push(quality.as_arg().into());
                }
                PostProcessor::EmbedMetadata => args.push("--embed-metadata".into()),
                PostProcessor::EmbedThumbnail => args.push("--embed-thumbnail".into()),
            }
        }

        if let Some(sleep) = &self.sleep {
            args.push("--sleep-interval".into());
            args.push(sleep.min.to_string());
            args.push("--max-sleep-interval".into());
            args.push(sleep.max.to_string());
            args.push("--sleep-requests".into());
            args.push(sleep.requests.to_string());
        }

        args
    }
}

impl PartialEq for EngineOptions {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format
            && self.output_template == other.output_template
            && self.no_playlist == other.no_playlist
            && self.ignore_errors == other.ignore_errors
            && self.retries == other.retries
            && self.fragment_retries == other.fragment_retries
            && self.concurrent_fragments == other.concurrent_fragments
            && self.restrict_filenames == other.restrict_filenames
            && self.no_overwrites == other.no_overwrites
            && self.quiet == other.quiet
            && self.no_warnings == other.no_warnings
            && self.write_thumbnail == other.write_thumbnail
            && self.postprocessors == other.postprocessors
            && self.sleep == other.sleep
            && self.progress_hook.is_some() == other.progress_hook.is_some()
    }
}

impl fmt::Debug for EngineOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineOptions")
            .field("format", &self.format)
            .field("output_template", &self.output_template)
            .field("no_playlist", &self.no_playlist)
            .field("ignore_errors", &self.ignore_errors)
            .field("retries", &self.retries)
            .field("fragment_retries", &self.fragment_retries)
            .field("concurrent_fragments", &self.concurrent_fragments)
            .field("postprocessors", &self.postprocessors)
            .field("sleep", &self.sleep)
            .field("progress_hook", &self.progress_hook.is_some())
            .finish_non_exhaustive()
    }
}

/// Wrap `callback` so that a set token turns the next tick into an abort.
///
/// Once the token is set no further ticks reach `callback`.
pub fn guard_progress<F>(callback: F, token: CancellationToken) -> ProgressHook
where
    F: Fn(&ProgressUpdate) + Send + Sync + 'static,
{
    Arc::new(move |update: &ProgressUpdate| {
        if token.is_set() {
            return Err(EngineError::Cancelled);
        }
        callback(update);
        Ok(())
    })
}

/// Build the engine options for `request`
pub fn build<F>(request: &DownloadRequest, progress: F, token: &CancellationToken) -> EngineOptions
where
    F: Fn(&ProgressUpdate) + Send + Sync + 'static,
{
    let mut postprocessors = Vec::new();
    if request.convert_to_audio {
        postprocessors.push(PostProcessor::ExtractAudio {
            codec: request.audio_codec,
            quality: request.audio_quality,
        });
    }
    if request.embed_metadata {
        postprocessors.push(PostProcessor::EmbedMetadata);
    }
    if request.embed_thumbnail {
        postprocessors.push(PostProcessor::EmbedThumbnail);
    }

    let tuning = &request.tuning;

    EngineOptions {
        format: AUDIO_FORMAT_SELECTOR.to_string(),
        output_template: request.output_template(),
        no_playlist: !request.allow_playlist,
        ignore_errors: true,
        retries: tuning.retries.max(1),
        fragment_retries: tuning.fragment_retries.max(1),
        concurrent_fragments: CONCURRENT_FRAGMENTS,
        restrict_filenames: true,
        no_overwrites: true,
        quiet: true,
        no_warnings: true,
        write_thumbnail: request.embed_thumbnail,
        postprocessors,
        sleep: request
            .safe_mode
            .then(|| tuning.safe_mode_sleep.normalized()),
        progress_hook: Some(guard_progress(progress, token.clone())),
    }
}
