#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfrotate::export::{ExportOptions, RotationMode, apply_rotations};
use pdfrotate::io::PdfReader;
use pdfrotate::state::{Action, RotationStore};
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| Builder::new_current_thread().enable_all().build().unwrap())
}

fuzz_target!(|data: &[u8]| {
    let loaded = runtime().block_on(PdfReader::new().load_bytes("fuzz.pdf", data.to_vec()));

    // Whatever loads must also export.
    if let Ok(document) = loaded {
        let mut store = RotationStore::new();
        store.dispatch_all((0..document.page_count).map(Action::InitPage));
        store.dispatch(Action::RotateAll);

        for mode in [RotationMode::Replace, RotationMode::Relative] {
            let options = ExportOptions {
                mode,
                compress: false,
            };
            let _ = apply_rotations(&document.bytes, &store.snapshot(), &options);
        }
    }
});
