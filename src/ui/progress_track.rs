// SPDX-License-Identifier: MPL-2.0
//! Clickable progress track.
//!
//! Draws a white track with a rose fill proportional to playback progress.
//! A left click anywhere on it reports the click position and the track
//! width; turning that into a seek target is the player's job.

use crate::player::Message;
use crate::ui::design_tokens::palette;
use iced::widget::canvas::{self, Frame, Geometry};
use iced::widget::Action;
use iced::{mouse, Point, Rectangle, Renderer, Size, Theme};

/// Canvas program for the progress track.
#[derive(Debug, Clone, Copy)]
pub struct ProgressTrack {
    /// Fill ratio in `[0, 1]`.
    pub ratio: f32,
}

impl ProgressTrack {
    #[must_use]
    pub fn new(ratio: f32) -> Self {
        Self {
            ratio: if ratio.is_finite() {
                ratio.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    fn fill_width(&self, width: f32) -> f32 {
        width * self.ratio
    }
}

impl canvas::Program<Message> for ProgressTrack {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        if let iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) = event {
            if let Some(position) = cursor.position_in(bounds) {
                return Some(
                    Action::publish(Message::ProgressClicked {
                        click_x: position.x,
                        width: bounds.width,
                    })
                    .and_capture(),
                );
            }
        }
        None
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), palette::WHITE);

        let fill = self.fill_width(bounds.width);
        if fill > 0.0 {
            frame.fill_rectangle(
                Point::ORIGIN,
                Size::new(fill, bounds.height),
                palette::ROSE_400,
            );
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}
