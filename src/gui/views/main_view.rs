//! Main window layout

use crate::gui::app::Message;
use crate::gui::components::{log_view, options_panel, output_dir_input, progress_bar, url_input};
use crate::gui::integration::UiState;
use crate::gui::theme;
use crate::utils::AppSettings;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length};

/// Inputs the main view needs besides the job state
pub struct FormState<'a> {
    pub url: &'a str,
    pub url_error: Option<&'a str>,
    pub output_dir: &'a str,
    pub settings: &'a AppSettings,
    pub can_convert: bool,
    pub has_finished_job: bool,
}

pub fn main_view(form: FormState<'_>, ui: &UiState) -> Element<'static, Message> {
    let enabled = ui.inputs_enabled;

    let actions = row![
        button(text("Open folder").size(14))
            .on_press_maybe(form.has_finished_job.then_some(Message::OpenOutputFolder))
            .padding([12, 18])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton))),
        Space::with_width(Length::Fill),
        button(text("Cancel").size(16))
            .on_press_maybe(ui.cancel_enabled.then_some(Message::CancelPressed))
            .padding([14, 24])
            .style(iced::theme::Button::Custom(Box::new(theme::CancelButton))),
        button(text("Download").size(16))
            .on_press_maybe(enabled.then_some(Message::StartPressed))
            .padding([14, 32])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    let form_card = container(
        column![
            text("Download Audio")
                .size(28)
                .style(iced::theme::Text::Color(theme::TEXT_PRIMARY)),
            url_input(form.url, enabled, form.url_error),
            output_dir_input(form.output_dir, enabled),
            options_panel(form.settings, enabled, form.can_convert),
            actions,
            progress_bar(ui),
        ]
        .spacing(18),
    )
    .padding(28)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::Card)));

    column![
        form_card,
        text("Activity")
            .size(16)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        log_view(&ui.transcript),
    ]
    .spacing(14)
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(24)
    .into()
}
