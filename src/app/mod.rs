// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the panel's collaborators.
//!
//! The `App` struct wires the shared image cache, the pending set, the
//! control-unit store and the preview components together, and translates
//! component effects into store events and fetch tasks. Fetch results flow
//! back in as messages and are applied through the cache's ticket check, so
//! a torn-down preview can never see a late result.

mod message;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::config;
use crate::domain::{ControlUnit, ImageName, ProcessorKind, UnitId};
use crate::services::boards::{Board, BoardStore};
use crate::services::control_store::{ControlEvent, ControlStore};
use crate::services::image_cache::{
    fetch_image, CacheConfig, FetchTicket, ImageCache, ImageSource,
};
use crate::services::pending::PendingUnits;
use crate::ui::board_dialog;
use crate::ui::control_preview;
use iced::Task;
use std::path::PathBuf;

/// Root application state.
pub struct App {
    source: ImageSource,
    cache: ImageCache,
    pending: PendingUnits,
    store: ControlStore,
    boards: BoardStore,
    previews: Vec<control_preview::State>,
    board_dialog: Option<board_dialog::State>,
}

impl App {
    /// Initializes application state and kicks off the fetches for any
    /// identifiers already attached to the seeded unit.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let settings = config::load().unwrap_or_default();

        let source = resolve_source(&flags, &settings);
        let budget_mib = config::clamp_cache_budget_mib(
            settings
                .cache_budget_mib
                .unwrap_or(config::DEFAULT_CACHE_BUDGET_MIB),
        );
        let mut cache = ImageCache::new(CacheConfig::new((budget_mib as usize) * 1024 * 1024));

        let mut store = ControlStore::new();
        let mut unit =
            ControlUnit::new(UnitId::new("control-net-1")).with_processor(ProcessorKind::Canny);
        if let Some(name) = flags.image {
            unit = unit.with_control_image(ImageName::new(name));
        }
        store.add(unit.clone());

        let mut boards = BoardStore::new();
        boards.add(Board::new("uncategorized", "Uncategorized"));

        let (preview, tickets) = control_preview::State::new(unit, &mut cache);

        let app = App {
            source,
            cache,
            pending: PendingUnits::new(),
            store,
            boards,
            previews: vec![preview],
            board_dialog: None,
        };
        let task = app.spawn_fetches(tickets);
        (app, task)
    }

    /// Window title.
    fn title(&self) -> String {
        String::from("Iced Atelier")
    }

    /// Turns fetch tickets into runtime tasks delivering `ImageFetched`.
    fn spawn_fetches(&self, tickets: Vec<FetchTicket>) -> Task<Message> {
        Task::batch(tickets.into_iter().map(|ticket| {
            let source = self.source.clone();
            Task::perform(fetch_image(source, ticket), |(ticket, result)| {
                Message::ImageFetched { ticket, result }
            })
        }))
    }

    /// Applies a control event to the store and re-syncs the affected
    /// preview's leases against the updated unit.
    fn apply_event(&mut self, event: ControlEvent) -> Task<Message> {
        let unit_id = match &event {
            ControlEvent::ImageChanged { unit_id, .. }
            | ControlEvent::ProcessedImageChanged { unit_id, .. }
            | ControlEvent::ProcessorChanged { unit_id, .. } => unit_id.clone(),
        };
        self.store.apply(event);

        let Some(unit) = self.store.get(&unit_id).cloned() else {
            return Task::none();
        };
        let tickets = match self
            .previews
            .iter_mut()
            .find(|p| p.unit_id() == &unit_id)
        {
            Some(preview) => preview.sync_unit(unit, &mut self.cache),
            None => Vec::new(),
        };
        self.spawn_fetches(tickets)
    }
}

/// Picks the image source from flags and persisted settings; flags win.
fn resolve_source(flags: &Flags, settings: &config::Config) -> ImageSource {
    if let Some(url) = flags.backend.clone().or_else(|| settings.backend_url.clone()) {
        return ImageSource::Backend { base_url: url };
    }
    let dir = flags
        .gallery
        .clone()
        .or_else(|| settings.gallery_dir.clone())
        .map_or_else(|| PathBuf::from("gallery"), PathBuf::from);
    ImageSource::Gallery(dir)
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .run()
}
