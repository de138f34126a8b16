//! Small helpers shared by the reader, writer and export pipeline.

use lopdf::{Document, Object, ObjectId};

/// Guard against cyclic `Parent` chains in malformed page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Look up a page attribute, following `Parent` links for inheritable keys
/// such as `MediaBox` and `Rotate`.
///
/// Indirect values are resolved. Returns `None` when no node in the chain
/// defines the key.
pub fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return doc.dereference(value).ok().map(|(_, object)| object);
        }

        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

/// Read a rectangle array as `(width, height)` in points.
pub fn rect_dimensions(doc: &Document, object: &Object) -> Option<(f32, f32)> {
    let values = object.as_array().ok()?;
    if values.len() < 4 {
        return None;
    }

    let mut coords = [0.0f32; 4];
    for (slot, value) in coords.iter_mut().zip(values) {
        let (_, value) = doc.dereference(value).ok()?;
        *slot = value.as_float().ok()?;
    }

    let [llx, lly, urx, ury] = coords;
    Some(((urx - llx).abs(), (ury - lly).abs()))
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
