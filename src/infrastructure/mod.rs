// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`memory_source`]: In-memory page source with filtering, latency and
//!   failure injection (implements [`PageSource`])
//!
//! [`PageSource`]: crate::application::port::PageSource

pub mod memory_source;

pub use memory_source::InMemorySource;
