// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for lightbox navigation.
//!
//! Measures the performance of:
//! - In-page stepping (pure controller work)
//! - Page-boundary crossing resolved from the page cache
//! - Edit propagation into the loaded page

use criterion::{criterion_group, criterion_main, Criterion};
use paged_lightbox::application::library::{Message, PagedLibrary};
use paged_lightbox::application::lightbox::{LightboxController, Transition};
use paged_lightbox::config::Config;
use paged_lightbox::domain::library::{MediaId, MediaItem, MediaPatch, Rating};
use paged_lightbox::domain::paging::{PageBounds, PageSize};
use paged_lightbox::infrastructure::InMemorySource;
use std::hint::black_box;

fn config() -> Config {
    Config {
        page_size: Some(24),
        page_cache_pages: Some(8),
        event_log_capacity: None,
    }
}

/// Runs every fetch a message triggers to completion.
fn drive(
    runtime: &tokio::runtime::Runtime,
    library: &mut PagedLibrary<InMemorySource>,
    message: Message<MediaItem>,
) {
    let mut task = library.update(message);
    while let Some(fetch) = task {
        let message = runtime.block_on(fetch.run());
        task = library.update(message);
    }
}

/// Benchmark stepping forward and back inside one page.
fn bench_in_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox_navigation");

    group.bench_function("next_prev_in_page", |b| {
        let mut controller =
            LightboxController::new(PageSize::new(24), PageBounds::new(0, 24, 1000));
        controller.open_lightbox(10);
        b.iter(|| {
            black_box(controller.next());
            black_box(controller.prev());
        });
    });

    group.bench_function("boundary_crossing_resolve", |b| {
        b.iter(|| {
            let mut controller =
                LightboxController::new(PageSize::new(24), PageBounds::new(0, 24, 1000));
            controller.open_lightbox(23);
            if let Transition::BoundaryCrossing(request) = controller.next() {
                black_box(controller.resolve_fetch(request.ticket, PageBounds::new(24, 24, 1000)));
            }
        });
    });

    group.finish();
}

/// Benchmark crossing a page edge when both pages are cached.
fn bench_cached_crossing(c: &mut Criterion) {
    let mut group = c.benchmark_group("lightbox_navigation");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let mut library = PagedLibrary::new(InMemorySource::generate(1000), &config());
    drive(&runtime, &mut library, Message::GoToPage(0));
    drive(&runtime, &mut library, Message::OpenAt(23));
    // Warm the cache with both sides of the edge.
    drive(&runtime, &mut library, Message::Next);
    drive(&runtime, &mut library, Message::Prev);

    group.bench_function("cached_page_crossing", |b| {
        b.iter(|| {
            drive(&runtime, &mut library, Message::Next);
            drive(&runtime, &mut library, Message::Prev);
            black_box(library.snapshot());
        });
    });

    group.bench_function("item_updated", |b| {
        let patch = MediaPatch::rating(Rating::new(4));
        b.iter(|| {
            black_box(library.on_item_updated(&MediaId(20), &patch));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_in_page, bench_cached_crossing);
criterion_main!(benches);
