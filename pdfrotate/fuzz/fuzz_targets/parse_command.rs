#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfrotate::command::Command;

fuzz_target!(|data: &[u8]| {
    let line = std::str::from_utf8(data).unwrap_or("");

    if let Ok(Some(command)) = Command::parse(line) {
        // Rendering a parsed command never panics and stays parseable.
        let rendered = command.to_string();
        assert!(Command::parse(&rendered).is_ok());
    }
});
