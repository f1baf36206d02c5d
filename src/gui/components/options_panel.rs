//! Download option toggles and audio format pickers

use crate::downloader::{AudioCodec, AudioQuality};
use crate::gui::app::Message;
use crate::gui::theme;
use crate::utils::AppSettings;
use iced::widget::{checkbox, column, container, pick_list, row, text, Checkbox};
use iced::{Element, Length};

fn toggle(
    label: &str,
    checked: bool,
    enabled: bool,
    on_toggle: fn(bool) -> Message,
) -> Checkbox<'static, Message> {
    let cb = checkbox(label, checked).size(16).text_size(14);
    if enabled {
        cb.on_toggle(on_toggle)
    } else {
        cb
    }
}

fn tagged<'a>(label: &str, content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(
        column![
            text(label)
                .size(11)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
            content.into(),
        ]
        .spacing(4),
    )
    .padding([8, 12])
    .style(iced::theme::Container::Custom(Box::new(theme::OptionTag)))
    .into()
}

/// Checked and enabled state of a toggle that needs ffmpeg
pub fn ffmpeg_toggle_state(checked: bool, enabled: bool, can_convert: bool) -> (bool, bool) {
    (checked && can_convert, enabled && can_convert)
}

/// Codec and quality only matter while a conversion can actually run
pub fn format_pickers_enabled(enabled: bool, can_convert: bool, convert_to_audio: bool) -> bool {
    enabled && can_convert && convert_to_audio
}

fn ffmpeg_toggle(
    label: &str,
    checked: bool,
    enabled: bool,
    can_convert: bool,
    on_toggle: fn(bool) -> Message,
) -> Checkbox<'static, Message> {
    let (checked, enabled) = ffmpeg_toggle_state(checked, enabled, can_convert);
    toggle(label, checked, enabled, on_toggle)
}

fn picker<T>(
    selected: T,
    options: &[T],
    live: bool,
    on_select: fn(T) -> Message,
) -> Element<'static, Message>
where
    T: ToString + PartialEq + Clone + 'static,
{
    if live {
        pick_list(options.to_vec(), Some(selected), on_select)
            .text_size(12)
            .padding([6, 10])
            .width(Length::Fixed(110.0))
            .into()
    } else {
        container(
            text(selected.to_string())
                .size(12)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
        )
        .padding([6, 10])
        .width(Length::Fixed(110.0))
        .into()
    }
}

/// Option checkboxes plus codec/quality pickers.
///
/// Options that need ffmpeg stay unchecked and disabled when it is
/// unavailable. The pickers turn into plain labels whenever they would
/// have no effect or a job is running.
pub fn options_panel(
    settings: &AppSettings,
    enabled: bool,
    can_convert: bool,
) -> Element<'static, Message> {
    let toggles = column![
        toggle(
            "Download whole playlist",
            settings.allow_playlist,
            enabled,
            Message::PlaylistToggled,
        ),
        ffmpeg_toggle(
            "Convert to audio",
            settings.convert_to_audio,
            enabled,
            can_convert,
            Message::ConvertToggled,
        ),
        ffmpeg_toggle(
            "Embed metadata",
            settings.embed_metadata,
            enabled,
            can_convert,
            Message::MetadataToggled,
        ),
        ffmpeg_toggle(
            "Embed thumbnail",
            settings.embed_thumbnail,
            enabled,
            can_convert,
            Message::ThumbnailToggled,
        ),
        toggle(
            "Safe mode (slower, avoids throttling)",
            settings.safe_mode,
            enabled,
            Message::SafeModeToggled,
        ),
    ]
    .spacing(8)
    .width(Length::Fill);

    let live = format_pickers_enabled(enabled, can_convert, settings.convert_to_audio);
    let codec = picker(settings.audio_codec, &AudioCodec::ALL, live, Message::CodecSelected);
    let quality = picker(
        settings.audio_quality,
        &AudioQuality::ALL,
        live,
        Message::QualitySelected,
    );

    row![
        toggles,
        column![tagged("Format", codec), tagged("Quality", quality)].spacing(10),
    ]
    .spacing(16)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ffmpeg_toggles_forced_off_without_ffmpeg() {
        assert_eq!(ffmpeg_toggle_state(true, true, false), (false, false));
        assert_eq!(ffmpeg_toggle_state(true, true, true), (true, true));
        assert_eq!(ffmpeg_toggle_state(true, false, true), (true, false));
    }

    #[test]
    fn test_pickers_follow_toggle_gating() {
        assert!(format_pickers_enabled(true, true, true));
        // Job running
        assert!(!format_pickers_enabled(false, true, true));
        // No ffmpeg
        assert!(!format_pickers_enabled(true, false, true));
        // Conversion off
        assert!(!format_pickers_enabled(true, true, false));
    }
}
