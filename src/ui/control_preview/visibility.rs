// SPDX-License-Identifier: MPL-2.0
//! Overlay visibility policy for the dual-image preview.
//!
//! A pure decision over current inputs, re-derived on every evaluation.
//! The layer order is fixed, bottom to top: base image, processed overlay,
//! pending placeholder. The processed overlay is *opacity*-toggled and
//! stays in the widget tree whenever its image is resolved, so flipping
//! visibility never drops (and refetches) the underlying handle; the
//! placeholder is *presence*-toggled by the pending flag alone.

use crate::domain::{ImageResource, ProcessorKind};

/// Current inputs to the visibility decision.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityInputs<'a> {
    /// Resolved base control image, if any.
    pub base: Option<&'a ImageResource>,
    /// Resolved processed image, if any.
    pub processed: Option<&'a ImageResource>,
    /// Whether the pointer is over the preview.
    pub hovering: bool,
    /// Whether this unit has an in-flight processing job.
    pub pending: bool,
    /// Processor configured on the unit.
    pub processor: ProcessorKind,
}

/// Decides whether the processed overlay is shown.
///
/// The overlay is only meaningful once both images exist; hovering reveals
/// the untouched original for comparison; an in-flight job invalidates the
/// cached processed image; the `None` processor never produced one.
#[must_use]
pub fn show_processed_overlay(inputs: &VisibilityInputs<'_>) -> bool {
    inputs.base.is_some()
        && inputs.processed.is_some()
        && !inputs.hovering
        && !inputs.pending
        && !inputs.processor.is_none()
}

/// The three visual layers plus derived affordances, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    /// Bottom layer: the base control image.
    pub base: Option<ImageResource>,
    /// Middle layer: the processed image. Present whenever resolved; its
    /// visibility is carried separately in `overlay_visible`.
    pub processed: Option<ImageResource>,
    /// Opacity toggle for the processed layer.
    pub overlay_visible: bool,
    /// Top layer: processing placeholder, present iff the unit is pending.
    pub placeholder_visible: bool,
    /// Whether the reset affordance is shown (base image resolved).
    pub show_reset: bool,
    /// Dropping is rejected while the crossfaded overlay is showing.
    pub drop_disabled: bool,
}

impl LayerStack {
    /// Derives the full stack from current inputs.
    #[must_use]
    pub fn derive(inputs: VisibilityInputs<'_>) -> Self {
        let overlay_visible = show_processed_overlay(&inputs);
        Self {
            base: inputs.base.cloned(),
            processed: inputs.processed.cloned(),
            overlay_visible,
            placeholder_visible: inputs.pending,
            show_reset: inputs.base.is_some(),
            drop_disabled: overlay_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageName;

    fn resource(name: &str) -> ImageResource {
        ImageResource::from_rgba(ImageName::new(name), 2, 2, vec![0u8; 16])
    }

    fn inputs<'a>(
        base: Option<&'a ImageResource>,
        processed: Option<&'a ImageResource>,
        hovering: bool,
        pending: bool,
        processor: ProcessorKind,
    ) -> VisibilityInputs<'a> {
        VisibilityInputs {
            base,
            processed,
            hovering,
            pending,
            processor,
        }
    }

    #[test]
    fn overlay_formula_matches_full_truth_table() {
        let base = resource("img-1");
        let processed = resource("img-2");

        for base_present in [false, true] {
            for processed_present in [false, true] {
                for hovering in [false, true] {
                    for pending in [false, true] {
                        for processor in [ProcessorKind::None, ProcessorKind::Canny] {
                            let got = show_processed_overlay(&inputs(
                                base_present.then_some(&base),
                                processed_present.then_some(&processed),
                                hovering,
                                pending,
                                processor,
                            ));
                            let expected = base_present
                                && processed_present
                                && !hovering
                                && !pending
                                && processor != ProcessorKind::None;
                            assert_eq!(
                                got, expected,
                                "base={base_present} processed={processed_present} \
                                 hovering={hovering} pending={pending} processor={processor:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn placeholder_follows_pending_independently_of_overlay() {
        let base = resource("img-1");
        let processed = resource("img-2");

        let stack = LayerStack::derive(inputs(
            Some(&base),
            Some(&processed),
            false,
            true,
            ProcessorKind::Canny,
        ));
        assert!(stack.placeholder_visible);
        assert!(!stack.overlay_visible);

        let stack = LayerStack::derive(inputs(None, None, false, true, ProcessorKind::None));
        assert!(stack.placeholder_visible);
    }

    #[test]
    fn processed_layer_is_carried_even_when_hidden() {
        let base = resource("img-1");
        let processed = resource("img-2");

        // Hover hides the overlay but must not drop the processed layer.
        let stack = LayerStack::derive(inputs(
            Some(&base),
            Some(&processed),
            true,
            false,
            ProcessorKind::Canny,
        ));
        assert!(!stack.overlay_visible);
        assert!(stack.processed.is_some());
    }

    #[test]
    fn reset_affordance_tracks_base_image() {
        let base = resource("img-1");
        let with_base =
            LayerStack::derive(inputs(Some(&base), None, false, false, ProcessorKind::Canny));
        assert!(with_base.show_reset);

        let without_base = LayerStack::derive(inputs(None, None, false, false, ProcessorKind::Canny));
        assert!(!without_base.show_reset);
    }

    #[test]
    fn drop_is_disabled_exactly_while_overlay_shows() {
        let base = resource("img-1");
        let processed = resource("img-2");

        let showing = LayerStack::derive(inputs(
            Some(&base),
            Some(&processed),
            false,
            false,
            ProcessorKind::Canny,
        ));
        assert!(showing.overlay_visible);
        assert!(showing.drop_disabled);

        let hidden = LayerStack::derive(inputs(
            Some(&base),
            Some(&processed),
            true,
            false,
            ProcessorKind::Canny,
        ));
        assert!(!hidden.overlay_visible);
        assert!(!hidden.drop_disabled);
    }
}
