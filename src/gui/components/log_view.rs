//! Scrolling job transcript

use crate::gui::app::Message;
use crate::gui::integration::LogLine;
use crate::gui::theme;
use iced::widget::{container, scrollable, text, Column};
use iced::{Element, Font, Length};

/// Id used to keep the transcript scrolled to the newest line
pub fn log_scroll_id() -> scrollable::Id {
    scrollable::Id::new("transcript")
}

/// Rendered form of a transcript line
pub fn format_line(line: &LogLine) -> String {
    format!("[{}] {}", line.at.format("%H:%M:%S"), line.text)
}

pub fn log_view(lines: &[LogLine]) -> Element<'static, Message> {
    let body: Element<'static, Message> = if lines.is_empty() {
        text("Download activity will appear here")
            .size(13)
            .style(iced::theme::Text::Color(theme::GRAY_400))
            .into()
    } else {
        let rows: Vec<Element<'static, Message>> = lines
            .iter()
            .map(|line| text(format_line(line)).size(12).font(Font::MONOSPACE).into())
            .collect();
        Column::with_children(rows).spacing(2).into()
    };

    container(
        scrollable(container(body).padding([8, 12]).width(Length::Fill))
            .id(log_scroll_id())
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Scrollable::Custom(Box::new(theme::LogScrollable))),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(theme::LogPanel)))
    .into()
}
