// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for navigation: locale guard plus route matching.

use criterion::{criterion_group, criterion_main, Criterion};
use portal_front::app::storage::ClientStorage;
use portal_front::diagnostics::Diagnostics;
use portal_front::i18n::{I18n, Locale, LocaleGuard, LocaleResolver};
use portal_front::router::{Location, Router, View};
use std::hint::black_box;

fn make_router(base_path: &str) -> Router {
    let guard = LocaleGuard::new(
        LocaleResolver::new(Locale::En),
        ClientStorage::in_memory(),
        Diagnostics::default(),
    );
    Router::new(base_path, guard)
}

fn bench_match_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");

    group.bench_function("match_path", |b| {
        b.iter(|| {
            for path in ["/", "/login", "/FAQ/", "/articles/extra", "/unknown"] {
                black_box(View::match_path(black_box(path)));
            }
        });
    });

    group.bench_function("parse_location", |b| {
        b.iter(|| black_box(Location::parse(black_box("/portal/ru/faq?page=2#payments"))));
    });

    group.finish();
}

/// Accepted navigations persist the locale only when it changes, so the
/// steady state here does no storage writes.
fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    let mut i18n = I18n::new(Locale::En, Locale::En).unwrap();

    let router = make_router("/");
    group.bench_function("resolve_accepted", |b| {
        b.iter(|| black_box(router.resolve(&mut i18n, black_box("/ru/articles#top")).unwrap()));
    });

    let router = make_router("/portal/");
    group.bench_function("resolve_with_redirect", |b| {
        b.iter(|| black_box(router.resolve(&mut i18n, black_box("/portal/quiz")).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_match_path, bench_resolve);
criterion_main!(benches);
