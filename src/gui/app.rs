//! Main GUI application

use crate::backend::{DownloadSession, JobPhase};
use crate::downloader::{AudioCodec, AudioQuality};
use crate::engine::YtDlpFactory;
use crate::gui::clipboard;
use crate::gui::components::log_scroll_id;
use crate::gui::integration::{EventBridge, Notification, UiState};
use crate::gui::theme;
use crate::gui::views::main_view::{main_view, FormState};
use crate::utils::{AppSettings, LoaderError, ToolStatus};
use iced::widget::{container, scrollable};
use iced::{event, window, Application, Command, Element, Event, Length, Subscription, Theme};
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

/// How long a running job gets to stop when the window closes
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Everything the application needs from `main`
pub struct AppFlags {
    pub runtime: Arc<Runtime>,
    pub settings: AppSettings,
    pub tools: ToolStatus,
}

/// Main application state
pub struct AudioloaderApp {
    // Keep the runtime alive for as long as jobs may run on it
    _runtime: Arc<Runtime>,
    session: DownloadSession,
    bridge: EventBridge,
    ui: UiState,

    settings: AppSettings,
    tools: ToolStatus,

    url_input: String,
    output_dir_input: String,
    url_error: Option<String>,

    last_output_dir: Option<PathBuf>,
    closing: bool,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Inputs
    UrlInputChanged(String),
    PasteFromClipboard,
    ClearUrlInput,
    OutputDirChanged(String),
    BrowseOutputDir,

    // Options
    PlaylistToggled(bool),
    ConvertToggled(bool),
    MetadataToggled(bool),
    ThumbnailToggled(bool),
    SafeModeToggled(bool),
    CodecSelected(AudioCodec),
    QualitySelected(AudioQuality),

    // Job control
    StartPressed,
    CancelPressed,
    OpenOutputFolder,

    // System
    Tick,
    NotificationClosed,
    CloseRequested,
    ShutdownComplete,
}

impl Application for AudioloaderApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = AppFlags;

    fn new(flags: AppFlags) -> (Self, Command<Message>) {
        let AppFlags {
            runtime,
            mut settings,
            tools,
        } = flags;

        if !tools.can_convert_audio() {
            settings.without_ffmpeg();
        }

        let factory = Arc::new(YtDlpFactory::from_tools(&tools));
        let (session, receiver) = DownloadSession::new(runtime.handle().clone(), factory);

        let mut ui = UiState::default();
        let warnings = tools.warnings();
        for warning in &warnings {
            warn!("{}", warning);
            ui.log(format!("Warning: {}", warning));
        }

        let app = Self {
            _runtime: runtime,
            session,
            bridge: EventBridge::new(receiver),
            ui,
            output_dir_input: settings.download_location.display().to_string(),
            settings,
            tools,
            url_input: String::new(),
            url_error: None,
            last_output_dir: None,
            closing: false,
        };

        let commands = warnings
            .into_iter()
            .map(|w| notify(&Notification::Warning(w)))
            .collect::<Vec<_>>();
        (app, Command::batch(commands))
    }

    fn title(&self) -> String {
        String::from("Audioloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::UrlInputChanged(url) => {
                self.url_input = url;
                self.url_error = None;
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::get_clipboard_text() {
                    Ok(text) if !text.is_empty() => {
                        self.url_input = text;
                        self.url_error = None;
                    }
                    Ok(_) => debug!("Clipboard is empty"),
                    Err(e) => warn!("{:#}", e),
                }
                Command::none()
            }

            Message::ClearUrlInput => {
                self.url_input.clear();
                self.url_error = None;
                Command::none()
            }

            Message::OutputDirChanged(dir) => {
                self.output_dir_input = dir;
                Command::none()
            }

            Message::BrowseOutputDir => {
                if let Some(path) = rfd::FileDialog::new()
                    .set_directory(&self.settings.download_location)
                    .pick_folder()
                {
                    self.output_dir_input = path.display().to_string();
                }
                Command::none()
            }

            Message::PlaylistToggled(value) => self.set_option(|s| s.allow_playlist = value),
            Message::ConvertToggled(value) => self.set_option(|s| s.convert_to_audio = value),
            Message::MetadataToggled(value) => self.set_option(|s| s.embed_metadata = value),
            Message::ThumbnailToggled(value) => self.set_option(|s| s.embed_thumbnail = value),
            Message::SafeModeToggled(value) => self.set_option(|s| s.safe_mode = value),
            Message::CodecSelected(codec) => self.set_option(|s| s.audio_codec = codec),
            Message::QualitySelected(quality) => self.set_option(|s| s.audio_quality = quality),

            Message::StartPressed => self.start_job(),

            Message::CancelPressed => {
                if self.session.cancel() {
                    self.ui.cancel_requested();
                    self.ui.log("Cancelling download...");
                }
                Command::none()
            }

            Message::OpenOutputFolder => {
                let folder = self
                    .last_output_dir
                    .clone()
                    .unwrap_or_else(|| self.settings.download_location.clone());
                if let Err(e) = open::that(&folder) {
                    warn!("Failed to open folder {:?}: {}", folder, e);
                }
                Command::none()
            }

            Message::Tick => {
                let before = self.ui.transcript.len();
                let notifications = self.bridge.poll(&mut self.ui);

                if self.ui.phase == JobPhase::Done {
                    self.last_output_dir = Some(self.settings.download_location.clone());
                }

                let mut commands: Vec<_> = notifications.iter().map(notify).collect();
                if self.ui.transcript.len() != before {
                    commands.push(scroll_log_to_end());
                }
                Command::batch(commands)
            }

            Message::NotificationClosed => Command::none(),

            Message::CloseRequested => {
                if self.closing {
                    return Command::none();
                }
                self.closing = true;
                info!("Window close requested, shutting down");
                if let Err(e) = self.settings.save() {
                    warn!("Failed to save settings: {:#}", e);
                }
                Command::perform(self.session.shutdown(SHUTDOWN_GRACE), |_| {
                    Message::ShutdownComplete
                })
            }

            Message::ShutdownComplete => window::close(window::Id::MAIN),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let form = FormState {
            url: &self.url_input,
            url_error: self.url_error.as_deref(),
            output_dir: &self.output_dir_input,
            settings: &self.settings,
            can_convert: self.tools.can_convert_audio(),
            has_finished_job: self.last_output_dir.is_some() && self.ui.inputs_enabled,
        };

        container(main_view(form, &self.ui))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(
                theme::WindowBackground,
            )))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let poll = Duration::from_millis(self.settings.poll_interval_ms);
        Subscription::batch([
            iced::time::every(poll).map(|_| Message::Tick),
            event::listen_with(|event, _status| match event {
                Event::Window(_, window::Event::CloseRequested) => Some(Message::CloseRequested),
                _ => None,
            }),
        ])
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl AudioloaderApp {
    /// Option changes only apply between jobs
    fn set_option(&mut self, apply: impl FnOnce(&mut AppSettings)) -> Command<Message> {
        if self.ui.inputs_enabled {
            apply(&mut self.settings);
        }
        Command::none()
    }

    fn start_job(&mut self) -> Command<Message> {
        if !self.ui.inputs_enabled {
            return Command::none();
        }

        self.settings.download_location = PathBuf::from(self.output_dir_input.trim());
        let request = self
            .settings
            .request_for(&self.url_input, self.tools.can_convert_audio());

        match self.session.start(request) {
            Ok(()) => {
                self.url_error = None;
                self.last_output_dir = None;
                self.ui.begin_job(self.url_input.trim());
                if let Err(e) = self.settings.save() {
                    warn!("Failed to save settings: {:#}", e);
                }
                scroll_log_to_end()
            }
            Err(e) => {
                warn!("Start rejected: {}", e);
                if matches!(e, LoaderError::EmptyUrl) {
                    self.url_error = Some(e.to_string());
                }
                // Input errors block until acknowledged
                MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title(e.title())
                    .set_description(e.to_string())
                    .set_buttons(MessageButtons::Ok)
                    .show();
                Command::none()
            }
        }
    }
}

fn scroll_log_to_end() -> Command<Message> {
    scrollable::snap_to(log_scroll_id(), scrollable::RelativeOffset::END)
}

fn notify(notification: &Notification) -> Command<Message> {
    match notification {
        Notification::Success(text) => {
            show_dialog(MessageLevel::Info, "Download complete", text.clone())
        }
        Notification::Failure(text) => {
            show_dialog(MessageLevel::Error, "Download failed", text.clone())
        }
        Notification::Warning(text) => show_dialog(MessageLevel::Warning, "Audioloader", text.clone()),
    }
}

/// Non-blocking message box; the UI keeps polling while it is open
fn show_dialog(level: MessageLevel, title: &str, description: String) -> Command<Message> {
    let dialog = AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok);
    Command::perform(dialog.show(), |_| Message::NotificationClosed)
}
