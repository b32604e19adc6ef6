// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types and business rules.
//!
//! This module contains pure domain types and value objects. Nothing in here
//! performs I/O or knows about fetching.
//!
//! # Modules
//!
//! - [`paging`]: Pages, bounds and index translation ([`Page`](paging::Page),
//!   [`PageSize`](paging::PageSize), [`Direction`](paging::Direction))
//! - [`library`]: Library items and edits ([`LibraryItem`](library::LibraryItem),
//!   [`MediaItem`](library::MediaItem), [`MediaPatch`](library::MediaPatch))
//! - [`filter`]: Toolbar filter configuration ([`FilterConfig`](filter::FilterConfig),
//!   [`FilterSet`](filter::FilterSet))

pub mod filter;
pub mod library;
pub mod paging;
