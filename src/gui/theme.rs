#![allow(clippy::approx_constant)]

//! Light theme styles for the single-window layout

use iced::widget::{button, container, progress_bar, scrollable, text_input};
use iced::{Background, Border, Color, Gradient, Shadow, Theme, Vector};

// --- Palette ---

pub const BACKGROUND_START: Color = Color::from_rgb(0.941, 0.976, 1.0);
pub const BACKGROUND_END: Color = Color::from_rgb(0.953, 0.910, 1.0);

pub const INDIGO_500: Color = Color::from_rgb(0.388, 0.400, 0.945);
pub const INDIGO_400: Color = Color::from_rgb(0.506, 0.549, 0.973);
pub const INDIGO_100: Color = Color::from_rgb(0.878, 0.906, 1.0);
pub const PURPLE_500: Color = Color::from_rgb(0.545, 0.361, 0.965);

pub const EMERALD_500: Color = Color::from_rgb(0.063, 0.725, 0.506);
pub const EMERALD_400: Color = Color::from_rgb(0.204, 0.827, 0.600);

pub const RED_500: Color = Color::from_rgb(0.937, 0.267, 0.267);
pub const RED_100: Color = Color::from_rgb(0.996, 0.886, 0.886);
pub const AMBER_500: Color = Color::from_rgb(0.961, 0.620, 0.094);

pub const GRAY_800: Color = Color::from_rgb(0.122, 0.161, 0.216);
pub const GRAY_700: Color = Color::from_rgb(0.216, 0.255, 0.318);
pub const GRAY_600: Color = Color::from_rgb(0.294, 0.333, 0.388);
pub const GRAY_500: Color = Color::from_rgb(0.420, 0.447, 0.502);
pub const GRAY_400: Color = Color::from_rgb(0.616, 0.639, 0.667);
pub const GRAY_200: Color = Color::from_rgb(0.898, 0.906, 0.922);
pub const GRAY_100: Color = Color::from_rgb(0.953, 0.957, 0.965);
pub const GRAY_50: Color = Color::from_rgb(0.976, 0.980, 0.984);

pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const WHITE_85: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.85);

pub const TEXT_PRIMARY: Color = GRAY_800;
pub const TEXT_SECONDARY: Color = GRAY_600;
pub const TEXT_MUTED: Color = GRAY_500;

/// Colour for the status line in a given job phase
pub fn status_color(phase: crate::backend::JobPhase) -> Color {
    use crate::backend::JobPhase;
    match phase {
        JobPhase::Done => EMERALD_500,
        JobPhase::Error => RED_500,
        JobPhase::Cancelled => AMBER_500,
        JobPhase::Idle => TEXT_SECONDARY,
        _ => INDIGO_500,
    }
}

// --- Containers ---

pub struct WindowBackground;

impl container::StyleSheet for WindowBackground {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(GRAY_800),
            background: Some(Background::Gradient(Gradient::Linear(
                iced::gradient::Linear::new(iced::Radians(2.356))
                    .add_stop(0.0, BACKGROUND_START)
                    .add_stop(1.0, BACKGROUND_END),
            ))),
            ..Default::default()
        }
    }
}

/// Rounded panel holding the form
pub struct Card;

impl container::StyleSheet for Card {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(GRAY_800),
            background: Some(Background::Color(WHITE_85)),
            border: Border {
                color: GRAY_200,
                width: 2.0,
                radius: 20.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.388, 0.400, 0.945, 0.12),
                offset: Vector::new(0.0, 6.0),
                blur_radius: 20.0,
            },
        }
    }
}

/// Small grey box around a single option
pub struct OptionTag;

impl container::StyleSheet for OptionTag {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(GRAY_100)),
            border: Border {
                color: GRAY_200,
                width: 1.0,
                radius: 10.0.into(),
            },
            ..Default::default()
        }
    }
}

pub struct LogPanel;

impl container::StyleSheet for LogPanel {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(GRAY_700),
            background: Some(Background::Color(GRAY_50)),
            border: Border {
                color: GRAY_200,
                width: 1.0,
                radius: 12.0.into(),
            },
            ..Default::default()
        }
    }
}

// --- Buttons ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Gradient(Gradient::Linear(
                iced::gradient::Linear::new(iced::Radians(0.0))
                    .add_stop(0.0, INDIGO_500)
                    .add_stop(1.0, PURPLE_500),
            ))),
            text_color: WHITE,
            border: Border {
                radius: 14.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.388, 0.400, 0.945, 0.3),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);
        button::Appearance {
            shadow: Shadow {
                color: Color::from_rgba(0.388, 0.400, 0.945, 0.4),
                offset: Vector::new(0.0, 6.0),
                blur_radius: 18.0,
            },
            ..active
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GRAY_200)),
            text_color: GRAY_500,
            shadow: Shadow::default(),
            ..self.active(style)
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(WHITE)),
            text_color: GRAY_700,
            border: Border {
                radius: 12.0.into(),
                color: GRAY_200,
                width: 1.0,
            },
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.05),
                offset: Vector::new(0.0, 1.0),
                blur_radius: 4.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(GRAY_50)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            text_color: GRAY_400,
            background: Some(Background::Color(GRAY_100)),
            ..self.active(style)
        }
    }
}

pub struct CancelButton;

impl button::StyleSheet for CancelButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(WHITE)),
            text_color: RED_500,
            border: Border {
                radius: 14.0.into(),
                color: RED_500,
                width: 1.0,
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(RED_100)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            text_color: GRAY_400,
            border: Border {
                color: GRAY_200,
                ..self.active(style).border
            },
            ..self.active(style)
        }
    }
}

pub struct IconButton;

impl button::StyleSheet for IconButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: None,
            text_color: GRAY_600,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            text_color: GRAY_800,
            background: Some(Background::Color(GRAY_200)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            text_color: GRAY_400,
            ..self.active(style)
        }
    }
}

// --- Inputs ---

/// Text input with a red border when `invalid`
pub struct Input {
    pub invalid: bool,
}

impl text_input::StyleSheet for Input {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> text_input::Appearance {
        let accent = if self.invalid { RED_500 } else { GRAY_200 };
        text_input::Appearance {
            background: Background::Color(WHITE),
            border: Border {
                radius: 14.0.into(),
                width: 2.0,
                color: accent,
            },
            icon_color: GRAY_500,
        }
    }

    fn focused(&self, style: &Self::Style) -> text_input::Appearance {
        let active = self.active(style);
        if self.invalid {
            return active;
        }
        text_input::Appearance {
            border: Border {
                color: INDIGO_400,
                ..active.border
            },
            ..active
        }
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        GRAY_400
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        GRAY_800
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        Color::from_rgba(0.388, 0.400, 0.945, 0.3)
    }

    fn disabled(&self, style: &Self::Style) -> text_input::Appearance {
        text_input::Appearance {
            background: Background::Color(GRAY_100),
            ..self.active(style)
        }
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        GRAY_500
    }
}

// --- Scrollable ---

pub struct LogScrollable;

impl scrollable::StyleSheet for LogScrollable {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> scrollable::Appearance {
        scrollable::Appearance {
            container: container::Appearance::default(),
            scrollbar: scrollable::Scrollbar {
                background: Some(Background::Color(Color::TRANSPARENT)),
                border: Border::default(),
                scroller: scrollable::Scroller {
                    color: Color::from_rgba(0.388, 0.400, 0.945, 0.3),
                    border: Border {
                        radius: 4.0.into(),
                        ..Default::default()
                    },
                },
            },
            gap: None,
        }
    }

    fn hovered(&self, style: &Self::Style, is_mouse_over_scrollbar: bool) -> scrollable::Appearance {
        let active = self.active(style);
        if !is_mouse_over_scrollbar {
            return active;
        }
        scrollable::Appearance {
            scrollbar: scrollable::Scrollbar {
                scroller: scrollable::Scroller {
                    color: Color::from_rgba(0.388, 0.400, 0.945, 0.5),
                    ..active.scrollbar.scroller
                },
                ..active.scrollbar
            },
            ..active
        }
    }
}

// --- Progress bar ---

/// Indigo while running, green once the bar is full
pub struct Progress {
    pub complete: bool,
}

impl progress_bar::StyleSheet for Progress {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> progress_bar::Appearance {
        let (background, start, end) = if self.complete {
            (GRAY_200, EMERALD_400, EMERALD_500)
        } else {
            (INDIGO_100, INDIGO_500, PURPLE_500)
        };
        progress_bar::Appearance {
            background: Background::Color(background),
            bar: Background::Gradient(Gradient::Linear(
                iced::gradient::Linear::new(iced::Radians(0.0))
                    .add_stop(0.0, start)
                    .add_stop(1.0, end),
            )),
            border_radius: 4.0.into(),
        }
    }
}
