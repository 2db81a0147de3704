use super::requests::RequestSlot;
use crate::{
    core::place::{Place, PlaceId, PreviewScene},
    services::Dispatcher,
};

/// Whether the detail popover is up, and for which place.
///
/// Visibility and selection are one value, so the popover can never be shown
/// without a place or hold a place while hidden.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopoverState {
    #[default]
    Hidden,
    Showing(Place),
}

/// Street-level preview for the selected place
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreviewState {
    /// Nothing selected
    #[default]
    Idle,
    Loading,
    Ready(PreviewScene),
    /// The lookup failed or found nothing; show a placeholder
    Unavailable,
}

/// Detail card for the selected place, with its look-around preview
#[derive(Default)]
pub struct DetailPopover {
    state: PopoverState,
    preview: PreviewState,
    preview_request: RequestSlot,
}

impl DetailPopover {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PopoverState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, PopoverState::Showing(_))
    }

    pub fn selection(&self) -> Option<&Place> {
        match &self.state {
            PopoverState::Showing(place) => Some(place),
            PopoverState::Hidden => None,
        }
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Shows the popover for `place`. A different place than the one showing
    /// drops the old preview and requests a new one.
    pub fn show(&mut self, place: Place, dispatcher: &Dispatcher) {
        if self.selection() == Some(&place) {
            return;
        }

        log::debug!("popover: showing '{}'", place.name);
        let seq = self.preview_request.next_seq();
        self.preview = PreviewState::Loading;
        self.state = PopoverState::Showing(place.clone());
        let handle = dispatcher.preview(seq, place);
        self.preview_request.track(handle);
    }

    /// Hides the popover and forgets the selection; returns what was selected
    pub fn dismiss(&mut self) -> Option<Place> {
        self.preview_request.cancel();
        self.preview = PreviewState::Idle;
        match std::mem::take(&mut self.state) {
            PopoverState::Showing(place) => Some(place),
            PopoverState::Hidden => None,
        }
    }

    /// "Get directions": hides the popover and hands back the place to route to.
    /// Routing itself is up to the caller.
    pub fn request_directions(&mut self) -> Option<Place> {
        let place = self.dismiss();
        if let Some(place) = &place {
            log::debug!("popover: directions requested to '{}'", place.name);
        }
        place
    }

    /// "Open in Maps": hands the selection to the external map application
    pub fn open_in_external_maps(&self, dispatcher: &Dispatcher) -> bool {
        match self.selection() {
            Some(place) => {
                dispatcher.open_external(place);
                true
            }
            None => false,
        }
    }

    /// Applies a preview response; stale or mismatched responses are dropped
    pub fn apply_preview(
        &mut self,
        seq: u64,
        place_id: &PlaceId,
        scene: Option<PreviewScene>,
    ) -> bool {
        let for_selection = self.selection().map(|place| &place.id) == Some(place_id);
        if !for_selection || !self.preview_request.complete(seq) {
            log::debug!("popover: dropping stale preview #{} for {}", seq, place_id);
            return false;
        }

        self.preview = match scene {
            Some(scene) => PreviewState::Ready(scene),
            None => PreviewState::Unavailable,
        };
        true
    }

    pub fn is_preview_pending(&self) -> bool {
        self.preview_request.is_pending()
    }
}
