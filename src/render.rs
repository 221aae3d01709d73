// Rendering helper for selectable lists. Pure: it builds the lines and
// leaves writing them to the caller.

use std::fmt::Display;

/// Notice emitted when a list has nothing to show.
pub const EMPTY_NOTICE: &str = "There is nothing in this list";

/// Render a collection for human selection: one entry per element, prefixed
/// by its 1-based ordinal, in input order. An empty collection renders as the
/// single empty notice line.
pub fn indexed_lines<T: Display>(items: &[T]) -> Vec<String> {
    if items.is_empty() {
        return vec![EMPTY_NOTICE.to_string()];
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect()
}
