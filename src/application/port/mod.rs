// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete backends.
//!
//! # Available Ports
//!
//! - [`page_source`]: Fetching one page of the library
//!
//! # Design Notes
//!
//! - Fetches return boxed `'static` futures so hosts can hand them to any
//!   executor (or an iced `Task`) without borrowing the source
//! - Methods return `Result` with crate error types

pub mod page_source;

// Re-export main types for convenience
pub use page_source::{PageFuture, PageSource};
