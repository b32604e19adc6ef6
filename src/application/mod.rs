// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`lightbox`]: The lightbox coordinator state machine
//! - [`library`]: The paged grid host that drives the coordinator
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Hosts feed [`library::Message`]s in and run the returned fetch tasks
//!
//! # Example
//!
//! ```ignore
//! use paged_lightbox::application::library::{Message, PagedLibrary};
//! use paged_lightbox::infrastructure::InMemorySource;
//!
//! let mut library = PagedLibrary::new(InMemorySource::generate(100), &config);
//! let task = library.update(Message::GoToPage(0));
//! ```

pub mod library;
pub mod lightbox;
pub mod port;
