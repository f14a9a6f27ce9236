//! Case-insensitive key matching for hand-edited documents.

use serde_json::{Map, Value};

/// Rewrites object keys in a record array to their canonical spelling.
///
/// Keys that match no canonical name are kept as-is. Non-object elements
/// are left untouched so decoding reports them.
pub(crate) fn canonicalize_keys(document: &mut Value, field_names: &[&str]) {
    let Value::Array(items) = document else {
        return;
    };

    for item in items.iter_mut() {
        let Value::Object(object) = item else {
            continue;
        };
        let original = std::mem::take(object);
        let mut rewritten = Map::with_capacity(original.len());
        for (key, value) in original {
            let canonical = field_names
                .iter()
                .find(|name| name.eq_ignore_ascii_case(&key))
                .map(|name| (*name).to_string())
                .unwrap_or(key);
            rewritten.insert(canonical, value);
        }
        *object = rewritten;
    }
}
