//! The map screen and its detail popover.

pub mod map_screen;
pub mod popover;
pub mod requests;

pub use map_screen::{MapScreen, MapScreenBuilder, RouteState};
pub use popover::{DetailPopover, PopoverState, PreviewState};
pub use requests::RequestSlot;
