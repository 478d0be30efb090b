// SPDX-License-Identifier: MPL-2.0
//! Preview sub-component: state, messages and effects.
//!
//! One instance per control unit. The instance leases the unit's two image
//! identifiers from the shared cache, owns the hover flag, and derives the
//! layer stack and drag/drop descriptors from current inputs on demand.
//! Nothing here retains derived state across evaluations; correctness comes
//! from re-derivation, not from cached intermediates.

use crate::domain::{ControlUnit, ImageName, ImageResource, UnitId};
use crate::services::control_store::ControlEvent;
use crate::services::image_cache::{FetchOutcome, FetchTicket, ImageCache};
use crate::services::pending::PendingUnits;
use crate::ui::control_preview::bindings::Bindings;
use crate::ui::control_preview::visibility::{LayerStack, VisibilityInputs};

/// Resolution progress of the unit's two images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePhase {
    /// No resolved image.
    NoImages,
    /// Only the base control image resolved.
    BaseOnly,
    /// Both the base and the processed image resolved.
    BaseAndProcessed,
}

/// Messages for the preview sub-component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Pointer entered the preview bounds.
    CursorEntered,
    /// Pointer left the preview bounds.
    CursorExited,
    /// The reset affordance was pressed.
    ResetPressed,
}

/// Effects produced by the preview.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// No effect.
    None,
    /// Dispatch a control event to the store.
    Dispatch(ControlEvent),
}

/// Preview state for one control unit.
#[derive(Debug)]
pub struct State {
    unit: ControlUnit,
    hovering: bool,
    bindings: Bindings,
    base_lease: Option<ImageName>,
    processed_lease: Option<ImageName>,
}

impl State {
    /// Creates the preview and takes leases for the unit's identifiers.
    ///
    /// Returned tickets must each be handed to exactly one fetch task.
    #[must_use]
    pub fn new(unit: ControlUnit, cache: &mut ImageCache) -> (Self, Vec<FetchTicket>) {
        let mut state = Self {
            unit: ControlUnit::new(unit.id.clone()),
            hovering: false,
            bindings: Bindings::new(),
            base_lease: None,
            processed_lease: None,
        };
        let tickets = state.sync_unit(unit, cache);
        (state, tickets)
    }

    /// The unit id this preview renders.
    #[must_use]
    pub fn unit_id(&self) -> &UnitId {
        &self.unit.id
    }

    /// Current snapshot of the unit's configuration.
    #[must_use]
    pub fn unit(&self) -> &ControlUnit {
        &self.unit
    }

    /// Whether the pointer is currently over the preview.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Descriptor memos for the drag-and-drop subsystem.
    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Handles a preview message.
    ///
    /// Hover flips are immediate and synchronous. Reset dispatches an
    /// `ImageChanged` event with no image (detach the control image) and
    /// never references the processed identifier.
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::CursorEntered => {
                self.hovering = true;
                Effect::None
            }
            Message::CursorExited => {
                self.hovering = false;
                Effect::None
            }
            Message::ResetPressed => Effect::Dispatch(ControlEvent::ImageChanged {
                unit_id: self.unit.id.clone(),
                image: None,
            }),
        }
    }

    /// Reconciles leases against a fresh unit snapshot from the store.
    ///
    /// Identifiers that changed release their old lease (cancelling an
    /// in-flight fetch if no other consumer remains) and acquire the new
    /// one. An absent identifier holds no lease and reads as `Idle`.
    pub fn sync_unit(&mut self, unit: ControlUnit, cache: &mut ImageCache) -> Vec<FetchTicket> {
        let mut tickets = Vec::new();
        reconcile_lease(
            &mut self.base_lease,
            unit.control_image.as_ref(),
            cache,
            &mut tickets,
        );
        reconcile_lease(
            &mut self.processed_lease,
            unit.processed_image.as_ref(),
            cache,
            &mut tickets,
        );
        self.unit = unit;
        self.refresh_bindings(cache);
        tickets
    }

    /// Outcome of the base control image fetch.
    #[must_use]
    pub fn base_outcome(&self, cache: &ImageCache) -> FetchOutcome<ImageResource> {
        match &self.base_lease {
            Some(name) => cache.outcome(name),
            None => FetchOutcome::Idle,
        }
    }

    /// Outcome of the processed image fetch.
    #[must_use]
    pub fn processed_outcome(&self, cache: &ImageCache) -> FetchOutcome<ImageResource> {
        match &self.processed_lease {
            Some(name) => cache.outcome(name),
            None => FetchOutcome::Idle,
        }
    }

    /// Which of the unit's images have resolved.
    #[must_use]
    pub fn image_phase(&self, cache: &ImageCache) -> ImagePhase {
        let base = self.base_outcome(cache);
        let processed = self.processed_outcome(cache);
        match (base.value().is_some(), processed.value().is_some()) {
            (true, true) => ImagePhase::BaseAndProcessed,
            (true, false) => ImagePhase::BaseOnly,
            _ => ImagePhase::NoImages,
        }
    }

    /// Derives the layer stack from current inputs.
    ///
    /// Both fetch outcomes are read within this single call, so one
    /// evaluation never mixes stale and fresh outcomes.
    #[must_use]
    pub fn evaluate(&self, cache: &ImageCache, pending: &PendingUnits) -> LayerStack {
        let base = self.base_outcome(cache);
        let processed = self.processed_outcome(cache);
        LayerStack::derive(VisibilityInputs {
            base: base.value(),
            processed: processed.value(),
            hovering: self.hovering,
            pending: pending.contains(&self.unit.id),
            processor: self.unit.processor,
        })
    }

    /// Recomputes descriptor memos from the current base outcome.
    pub fn refresh_bindings(&mut self, cache: &ImageCache) {
        let base = self.base_outcome(cache);
        self.bindings.refresh(&self.unit.id, base.value());
    }

    /// Releases both leases. In-flight fetches whose slot drops to zero
    /// consumers are cancelled through the ticket generation check.
    pub fn teardown(&mut self, cache: &mut ImageCache) {
        if let Some(name) = self.base_lease.take() {
            cache.release(&name);
        }
        if let Some(name) = self.processed_lease.take() {
            cache.release(&name);
        }
    }
}

/// Moves one lease from its current identifier to `target`.
fn reconcile_lease(
    lease: &mut Option<ImageName>,
    target: Option<&ImageName>,
    cache: &mut ImageCache,
    tickets: &mut Vec<FetchTicket>,
) {
    if lease.as_ref() == target {
        return;
    }
    if let Some(old) = lease.take() {
        cache.release(&old);
    }
    if let Some(new) = target {
        let (_, ticket) = cache.acquire(new);
        tickets.extend(ticket);
        *lease = Some(new.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProcessorKind;

    fn resolve(cache: &mut ImageCache, ticket: &FetchTicket, width: u32, height: u32) {
        let name = ticket.name().clone();
        let pixels = vec![0u8; (width * height * 4) as usize];
        let image = ImageResource::from_rgba(name, width, height, pixels);
        assert!(cache.apply(ticket, Ok(image)));
    }

    fn unit_with_both() -> ControlUnit {
        ControlUnit::new(UnitId::new("u1"))
            .with_processor(ProcessorKind::Canny)
            .with_control_image(ImageName::new("img-1"))
            .with_processed_image(ImageName::new("img-2"))
    }

    #[test]
    fn new_preview_issues_one_ticket_per_identifier() {
        let mut cache = ImageCache::with_defaults();
        let (state, tickets) = State::new(unit_with_both(), &mut cache);

        assert_eq!(tickets.len(), 2);
        assert!(state.base_outcome(&cache).is_loading());
        assert!(state.processed_outcome(&cache).is_loading());
    }

    #[test]
    fn absent_identifiers_read_idle_without_requests() {
        let mut cache = ImageCache::with_defaults();
        let (state, tickets) = State::new(ControlUnit::new(UnitId::new("u1")), &mut cache);

        assert!(tickets.is_empty());
        assert!(cache.is_empty());
        assert!(state.base_outcome(&cache).is_idle());
        assert!(state.processed_outcome(&cache).is_idle());
    }

    #[test]
    fn hover_flips_are_immediate() {
        let mut cache = ImageCache::with_defaults();
        let (mut state, _) = State::new(unit_with_both(), &mut cache);

        assert!(!state.is_hovering());
        assert_eq!(state.handle(Message::CursorEntered), Effect::None);
        assert!(state.is_hovering());
        assert_eq!(state.handle(Message::CursorExited), Effect::None);
        assert!(!state.is_hovering());
    }

    #[test]
    fn reset_dispatches_detach_event_without_processed_reference() {
        let mut cache = ImageCache::with_defaults();
        let (mut state, _) = State::new(unit_with_both(), &mut cache);

        let effect = state.handle(Message::ResetPressed);
        assert_eq!(
            effect,
            Effect::Dispatch(ControlEvent::ImageChanged {
                unit_id: UnitId::new("u1"),
                image: None,
            })
        );
    }

    #[test]
    fn identifier_change_swaps_leases() {
        let mut cache = ImageCache::with_defaults();
        let (mut state, tickets) = State::new(unit_with_both(), &mut cache);
        for ticket in &tickets {
            resolve(&mut cache, ticket, 2, 2);
        }

        let mut updated = unit_with_both();
        updated.control_image = Some(ImageName::new("img-9"));
        let tickets = state.sync_unit(updated, &mut cache);

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].name(), &ImageName::new("img-9"));
        assert!(state.base_outcome(&cache).is_loading());
        // The processed lease was untouched.
        assert!(state.processed_outcome(&cache).value().is_some());
    }

    #[test]
    fn teardown_discards_in_flight_results() {
        let mut cache = ImageCache::with_defaults();
        let (mut state, tickets) = State::new(unit_with_both(), &mut cache);

        state.teardown(&mut cache);

        // Both fetches resolve after teardown; neither lands.
        for ticket in &tickets {
            let name = ticket.name().clone();
            let image = ImageResource::from_rgba(name, 2, 2, vec![0u8; 16]);
            assert!(!cache.apply(ticket, Ok(image)));
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn evaluate_reflects_resolution_and_pending() {
        let mut cache = ImageCache::with_defaults();
        let pending = PendingUnits::new();
        let (mut state, tickets) = State::new(unit_with_both(), &mut cache);

        // Nothing resolved yet: no layers, no overlay.
        let stack = state.evaluate(&cache, &pending);
        assert!(stack.base.is_none());
        assert!(!stack.overlay_visible);
        assert!(!stack.placeholder_visible);

        for ticket in &tickets {
            resolve(&mut cache, ticket, 2, 2);
        }
        state.refresh_bindings(&cache);

        let stack = state.evaluate(&cache, &pending);
        assert!(stack.base.is_some());
        assert!(stack.overlay_visible);
        assert_eq!(state.image_phase(&cache), ImagePhase::BaseAndProcessed);

        let mut pending = pending;
        pending.mark(UnitId::new("u1"));
        let stack = state.evaluate(&cache, &pending);
        assert!(!stack.overlay_visible);
        assert!(stack.placeholder_visible);
    }

    #[test]
    fn fetch_error_reads_as_no_image() {
        let mut cache = ImageCache::with_defaults();
        let pending = PendingUnits::new();
        let (state, tickets) = State::new(unit_with_both(), &mut cache);

        for ticket in &tickets {
            assert!(cache.apply(ticket, Err(crate::error::Error::Http("410 Gone".into()))));
        }

        let stack = state.evaluate(&cache, &pending);
        assert!(stack.base.is_none());
        assert!(stack.processed.is_none());
        assert!(!stack.overlay_visible);
        assert!(!stack.show_reset);
        assert_eq!(state.image_phase(&cache), ImagePhase::NoImages);
    }

    #[test]
    fn shared_identifier_is_fetched_once_across_previews() {
        let mut cache = ImageCache::with_defaults();
        let first = ControlUnit::new(UnitId::new("u1")).with_control_image(ImageName::new("img-1"));
        let second = ControlUnit::new(UnitId::new("u2")).with_control_image(ImageName::new("img-1"));

        let (_a, tickets_a) = State::new(first, &mut cache);
        let (_b, tickets_b) = State::new(second, &mut cache);

        assert_eq!(tickets_a.len(), 1);
        assert!(tickets_b.is_empty());
    }
}
