// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::Message;
use crate::app::i18n::fluent::I18n;
use crate::media::NativeVideo;
use crate::player::Player;
use iced::{
    widget::Container,
    Element, Length,
};

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub player: &'a Player<NativeVideo>,
    pub fullscreen: bool,
}

/// Renders the player filling the whole window.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let player = ctx.player.view(ctx.i18n, ctx.fullscreen).map(Message::Player);

    Container::new(player)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
