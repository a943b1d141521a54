use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion
use vitrine::feed::{BrowseFilter, Feed, FeedOptions, FnPageSource, PageSource};
use vitrine::format::{escape_html, format_number};
use vitrine::images::{FetchedImage, ImageFetcher, ImageLoader};
use vitrine::model::Condition;
use vitrine::wishlist::{MemoryBackend, WishlistStore};
use vitrine::{Product, StoreError, WishlistEntry};

// --- Common Benchmark Fixtures ---

fn bench_product(id: i64) -> Product {
  Product {
    id,
    name: format!("Listing {}", id),
    description: Some("A benchmark listing with a description of plausible length".to_string()),
    price: 1000.0 + id as f64,
    category_id: 1 + (id % 10),
    condition: Condition::BrandNew,
    location: "Lagos".to_string(),
    img_path: Some(format!("listing-{}.jpg", id)),
    seller_id: None,
    seller_name: None,
    created_at: None,
  }
}

/// A page source answering straight out of memory, so the numbers measure
/// the controller rather than any backend.
fn instant_source(row_count: usize) -> Arc<dyn PageSource> {
  let rows: Arc<Vec<Product>> = Arc::new((1..=row_count as i64).map(bench_product).collect());
  Arc::new(FnPageSource::new(move |_filter, offset, limit| {
    let rows = Arc::clone(&rows);
    async move {
      Ok::<Vec<Product>, StoreError>(rows.iter().skip(offset).take(limit).cloned().collect())
    }
  }))
}

struct InstantFetcher;

#[async_trait::async_trait]
impl ImageFetcher for InstantFetcher {
  async fn fetch(&self, _url: &str) -> vitrine::Result<FetchedImage> {
    Ok(FetchedImage {
      bytes: vec![0u8; 4096],
      content_type: Some("image/jpeg".to_string()),
    })
  }
}

// --- Benchmark Functions ---

fn bench_query_rendering(c: &mut Criterion) {
  let mut group = c.benchmark_group("QueryRendering");

  group.bench_function("browse_all", |b| {
    b.iter(|| criterion::black_box(BrowseFilter::all().to_query(0, 12).into_params()))
  });

  group.bench_function("browse_search_and_category", |b| {
    let filter = BrowseFilter {
      category_id: Some(3),
      search: Some("blue ceramic kettle".to_string()),
      exclude_id: None,
    };
    b.iter(|| criterion::black_box(filter.to_query(24, 12).into_params()))
  });

  group.finish();
}

fn bench_feed_paging(c: &mut Criterion) {
  let mut group = c.benchmark_group("FeedPaging");
  let rt = Runtime::new().unwrap();

  for page_size in [12usize, 24, 48].iter() {
    let source = instant_source(1_000);

    group.throughput(Throughput::Elements(*page_size as u64));
    group.bench_with_input(BenchmarkId::new("load_one_page", page_size), page_size, |b, &page_size| {
      b.to_async(&rt).iter_batched(
        || {
          Feed::with_options(
            Arc::clone(&source),
            BrowseFilter::all(),
            FeedOptions {
              page_size,
              enabled: true,
            },
          )
        },
        |feed| async move { criterion::black_box(feed.load_more().await) },
        criterion::BatchSize::SmallInput,
      );
    });
  }

  // Paging a whole catalog to exhaustion, resets included.
  for row_count in [120usize, 480].iter() {
    let source = instant_source(*row_count);

    group.throughput(Throughput::Elements(*row_count as u64));
    group.bench_with_input(BenchmarkId::new("drain_catalog", row_count), row_count, |b, _| {
      b.to_async(&rt).iter_batched(
        || Feed::new(Arc::clone(&source)),
        |feed| async move {
          while !feed.exhausted() {
            feed.load_more().await;
          }
          criterion::black_box(feed.len())
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }

  group.finish();
}

fn bench_wishlist_toggle(c: &mut Criterion) {
  let mut group = c.benchmark_group("WishlistToggle");

  for existing in [0usize, 100, 1_000].iter() {
    group.throughput(Throughput::Elements(1));
    group.bench_with_input(BenchmarkId::from_parameter(existing), existing, |b, &existing| {
      b.iter_batched(
        || {
          let store = WishlistStore::open(Arc::new(MemoryBackend::new()));
          for id in 1..=existing as i64 {
            store.add(&bench_product(id));
          }
          (store, bench_product(50_000))
        },
        |(store, product)| {
          criterion::black_box(store.toggle(&product));
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }

  group.bench_function("entry_from_product", |b| {
    let product = bench_product(1);
    b.iter(|| criterion::black_box(WishlistEntry::from(&product)))
  });

  group.finish();
}

fn bench_image_resolve(c: &mut Criterion) {
  let mut group = c.benchmark_group("ImageResolve");
  let rt = Runtime::new().unwrap();

  // Hot path: every product card after the first render hits the memo.
  let warm_loader = Arc::new(ImageLoader::new(Arc::new(InstantFetcher)));
  rt.block_on(warm_loader.resolve("bench://warm"));
  group.bench_function("memo_hit", |b| {
    b.to_async(&rt).iter(|| {
      let loader = Arc::clone(&warm_loader);
      async move { criterion::black_box(loader.resolve("bench://warm").await) }
    })
  });

  group.bench_function("cold_resolve", |b| {
    b.to_async(&rt).iter_batched(
      || ImageLoader::new(Arc::new(InstantFetcher)),
      |loader| async move { criterion::black_box(loader.resolve("bench://cold").await) },
      criterion::BatchSize::SmallInput,
    );
  });

  group.finish();
}

fn bench_format_helpers(c: &mut Criterion) {
  let mut group = c.benchmark_group("FormatHelpers");

  group.bench_function("format_number", |b| {
    b.iter(|| criterion::black_box(format_number(criterion::black_box(1_234_567.891))))
  });

  let listing_blurb = "A <really> lovely kettle & teapot set, \"as new\", from Ada's kitchen".repeat(4);
  group.bench_function("escape_html", |b| {
    b.iter(|| criterion::black_box(escape_html(&listing_blurb)))
  });

  group.finish();
}

criterion_group!(
  benches,
  bench_query_rendering,
  bench_feed_paging,
  bench_wishlist_toggle,
  bench_image_resolve,
  bench_format_helpers
);
criterion_main!(benches);
