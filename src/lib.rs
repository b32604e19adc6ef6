// SPDX-License-Identifier: MPL-2.0
//! `paged_lightbox` coordinates a full-screen media viewer with a
//! paginated library grid.
//!
//! The grid only ever holds one page of a large dataset. The lightbox lets
//! the user step through the whole dataset anyway: it tracks a global index,
//! asks for the neighbouring page when a step leaves the loaded one, and
//! keeps edits made in the viewer visible in the grid after it closes.
//!
//! # Layout
//!
//! - [`domain`]: pages, items, filters
//! - [`application`]: the lightbox state machine and the paged library host
//! - [`infrastructure`]: page source adapters
//! - [`config`], [`diagnostics`], [`error`]: settings, event log, errors

#![doc(html_root_url = "https://docs.rs/paged_lightbox/0.1.0")]

pub mod application;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod infrastructure;
