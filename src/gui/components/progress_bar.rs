//! Progress bar component

use crate::gui::app::Message;
use crate::gui::integration::UiState;
use crate::gui::theme;
use iced::widget::{column, progress_bar as iced_progress_bar, row, text, Space};
use iced::{Element, Length};

/// Progress bar with the status line on the left and the percentage on the right
pub fn progress_bar(ui: &UiState) -> Element<'static, Message> {
    let bar = iced_progress_bar(0.0..=1.0, ui.progress)
        .height(Length::Fixed(10.0))
        .style(iced::theme::ProgressBar::Custom(Box::new(theme::Progress {
            complete: ui.progress >= 1.0,
        })));

    column![
        bar,
        row![
            text(&ui.status)
                .size(13)
                .style(iced::theme::Text::Color(theme::status_color(ui.phase))),
            Space::with_width(Length::Fill),
            text(&ui.percent_text)
                .size(13)
                .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        ],
    ]
    .spacing(6)
    .into()
}
