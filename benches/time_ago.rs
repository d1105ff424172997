// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for relative-time formatting.
//!
//! Measures the performance of:
//! - Bucketing an elapsed duration into its largest unit
//! - Full phrase formatting through the Fluent catalogs (English and Russian)

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use portal_front::i18n::time_ago::{self, RelativeTime};
use portal_front::i18n::{I18n, Locale};
use std::hint::black_box;

const NOW_MS: i64 = 1_700_000_000_000;

/// Elapsed seconds covering every unit.
const ELAPSED: [i64; 6] = [42, 5 * 60, 3 * 3_600, 21 * 86_400, 4 * 2_592_000, 2 * 31_536_000];

fn bench_bucket(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_ago");

    group.bench_function("bucket", |b| {
        b.iter(|| {
            for elapsed in ELAPSED {
                black_box(RelativeTime::from_elapsed_secs(black_box(elapsed)));
            }
        });
    });

    group.finish();
}

/// Formatting includes the plural selection and two catalog lookups.
fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_ago");

    for locale in Locale::ALL {
        let i18n = I18n::new(locale, Locale::En).unwrap();
        group.bench_with_input(BenchmarkId::new("format", locale), &i18n, |b, i18n| {
            b.iter(|| {
                for elapsed in ELAPSED {
                    let ts = NOW_MS - elapsed * 1000;
                    black_box(time_ago::time_since_at(i18n, black_box(ts), NOW_MS));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bucket, bench_format);
criterion_main!(benches);
