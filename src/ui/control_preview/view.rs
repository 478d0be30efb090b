// SPDX-License-Identifier: MPL-2.0
//! Layered rendering of the preview.
//!
//! Renders the fixed layer order derived by the visibility policy. The
//! processed layer is pushed whenever its image is resolved and hidden via
//! opacity, so toggling visibility animates as a crossfade instead of
//! remounting the widget; the pending placeholder is pushed only while the
//! unit is pending.

use crate::ui::control_preview::component::Message;
use crate::ui::control_preview::visibility::LayerStack;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{button, container, image, mouse_area, text, Stack};
use iced::{ContentFit, Element, Length};

/// Renders the preview's layer stack.
#[must_use]
pub fn view(layers: &LayerStack) -> Element<'static, Message> {
    let mut stacked = Stack::new().width(Length::Fill).height(Length::Fill);

    stacked = match &layers.base {
        Some(base) => stacked.push(
            image(base.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain),
        ),
        None => stacked.push(
            container(text("Drop or upload a control image"))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
        ),
    };

    if let Some(processed) = &layers.processed {
        stacked = stacked.push(
            image(processed.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Contain)
                .opacity(if layers.overlay_visible { 1.0 } else { 0.0 }),
        );
    }

    if layers.placeholder_visible {
        stacked = stacked.push(
            container(text("Processing control image..."))
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(Horizontal::Center)
                .align_y(Vertical::Center),
        );
    }

    if layers.show_reset {
        stacked = stacked.push(
            container(button(text("Reset")).on_press(Message::ResetPressed))
                .width(Length::Fill)
                .align_x(Horizontal::Right)
                .align_y(Vertical::Top),
        );
    }

    mouse_area(stacked)
        .on_enter(Message::CursorEntered)
        .on_exit(Message::CursorExited)
        .into()
}
