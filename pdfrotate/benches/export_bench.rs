//! Performance benchmarks for pdfrotate.
//!
//! Run with: cargo bench
//!
//! Fixtures are generated in memory, so no files are needed.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lopdf::{Document, Object, dictionary};
use pdfrotate::Session;
use pdfrotate::export::{ExportOptions, Exporter, MemorySaver, SystemClock, apply_rotations};
use pdfrotate::io::PdfReader;
use pdfrotate::state::{Action, RotationStore};

fn pdf_bytes(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => pages as i64,
        }
        .into(),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// Benchmark: rewrite /Rotate on documents of increasing size
fn bench_apply_rotations(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_rotations");

    for pages in [10, 100, 500] {
        let input = pdf_bytes(pages);
        let mut store = RotationStore::new();
        store.dispatch_all((0..pages).map(Action::InitPage));
        store.dispatch_all((0..pages).step_by(2).map(Action::Rotate));
        let snapshot = store.snapshot();
        let options = ExportOptions::default();

        group.bench_with_input(BenchmarkId::from_parameter(pages), &input, |b, input| {
            b.iter(|| apply_rotations(black_box(input), &snapshot, &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: dispatch a long burst of actions
fn bench_dispatch(c: &mut Criterion) {
    c.bench_function("dispatch_rotate_all_x100_on_500_pages", |b| {
        b.iter(|| {
            let mut store = RotationStore::new();
            store.dispatch_all((0..500).map(Action::InitPage));
            for _ in 0..100 {
                store.dispatch(black_box(Action::RotateAll));
            }
            store
        });
    });
}

/// Benchmark: full export into memory
fn bench_export(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let document = rt
        .block_on(PdfReader::new().load_bytes("bench.pdf", pdf_bytes(100)))
        .unwrap();
    let exporter = Exporter::new();

    c.bench_function("export_100_pages", |b| {
        b.to_async(&rt).iter(|| async {
            let mut session = Session::new();
            session.open(document.clone());
            session.apply(Action::RotateAll);
            let saver = MemorySaver::new();
            session
                .export(&exporter, &saver, &SystemClock)
                .await
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_apply_rotations, bench_dispatch, bench_export);
criterion_main!(benches);
