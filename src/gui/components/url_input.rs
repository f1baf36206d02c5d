//! URL and output folder inputs

use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, row, text, text_input, tooltip};
use iced::{Alignment, Element, Length};

fn small_button(label: &str, on_press: Message, enabled: bool) -> iced::widget::Button<'static, Message> {
    button(text(label).size(14))
        .on_press_maybe(enabled.then_some(on_press))
        .padding([8, 12])
        .style(iced::theme::Button::Custom(Box::new(theme::IconButton)))
}

/// URL field with paste/clear buttons and an optional error line
pub fn url_input(value: &str, enabled: bool, error_message: Option<&str>) -> Element<'static, Message> {
    let mut input = text_input("Paste a video or playlist URL...", value)
        .padding(14)
        .width(Length::Fill)
        .style(iced::theme::TextInput::Custom(Box::new(theme::Input {
            invalid: error_message.is_some(),
        })));
    if enabled {
        input = input
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::StartPressed);
    }

    let input_row = row![
        input,
        tooltip(
            small_button("Paste", Message::PasteFromClipboard, enabled),
            "Paste from clipboard",
            tooltip::Position::Bottom,
        ),
        small_button("Clear", Message::ClearUrlInput, enabled),
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    match error_message {
        Some(error) => column![
            input_row,
            text(error)
                .size(13)
                .style(iced::theme::Text::Color(theme::RED_500)),
        ]
        .spacing(6)
        .into(),
        None => input_row.into(),
    }
}

/// Output folder field with a Browse button
pub fn output_dir_input(value: &str, enabled: bool) -> Element<'static, Message> {
    let mut input = text_input("Output folder", value)
        .padding(10)
        .width(Length::Fill)
        .style(iced::theme::TextInput::Custom(Box::new(theme::Input {
            invalid: false,
        })));
    if enabled {
        input = input.on_input(Message::OutputDirChanged);
    }

    row![
        text("Save to")
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
        input,
        button(text("Browse...").size(14))
            .on_press_maybe(enabled.then_some(Message::BrowseOutputDir))
            .padding([8, 14])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
    ]
    .spacing(12)
    .align_items(Alignment::Center)
    .into()
}
