//! Utility functions shared by the resource and markup parsers.

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1, // Exact match at line start
        Err(line) => line,    // Falls within this line
    }
}

/// 1-based (line, column) for a byte offset. The column counts characters.
pub fn offset_to_line_col(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let offset = offset.min(content.len());
    let line = offset_to_line(line_index, offset);
    let line_start = line_index[line - 1];
    let col = content
        .get(line_start..offset)
        .map_or(1, |prefix| prefix.chars().count() + 1);
    (line, col)
}

/// The text of a 1-based line, without its line terminator.
pub fn line_text(content: &str, line: usize) -> &str {
    content
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or_default()
}
