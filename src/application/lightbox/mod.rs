// SPDX-License-Identifier: MPL-2.0
//! Lightbox coordination across independently fetched pages.
//!
//! The grid opens the viewer at a page-local index; the controller turns it
//! into a global index and keeps that index valid while the user steps past
//! page edges, fetches complete, fail or get superseded, and the host swaps
//! pages underneath.
//!
//! ```
//! use paged_lightbox::application::lightbox::{LightboxController, Transition};
//! use paged_lightbox::domain::paging::{PageBounds, PageSize};
//!
//! let mut controller = LightboxController::new(PageSize::new(24), PageBounds::new(0, 24, 100));
//! controller.open_lightbox(23);
//!
//! let Transition::BoundaryCrossing(request) = controller.next() else {
//!     panic!("index 24 is on the next page");
//! };
//! assert_eq!(request.offset, 24);
//! assert!(controller.is_page_transitioning());
//!
//! controller.resolve_fetch(request.ticket, PageBounds::new(24, 24, 100));
//! assert_eq!(controller.snapshot().local_index, Some(0));
//! ```

mod controller;
mod state;

#[cfg(test)]
mod tests;

pub use controller::LightboxController;
pub use state::{
    FetchRequest, FetchResolution, FetchTicket, IgnoreReason, LightboxSnapshot, LightboxState,
    Transition,
};
