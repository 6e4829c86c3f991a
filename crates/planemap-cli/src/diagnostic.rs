//! Caret-style rendering of parse errors

use planemap_core::ParseError;

/// Render `err` against the formula it came from:
///
/// ```text
/// error: missing ')'
///   | (1+2
///   |     ^
///   = hint: the '(' at offset 0 is never closed
/// ```
pub fn render(source: &str, err: &ParseError) -> String {
    let offset = err.offset().min(source.len());
    // Offsets are byte positions; the caret goes under the character
    let column = source
        .char_indices()
        .take_while(|(i, _)| *i < offset)
        .count();
    let width = source
        .get(err.span.as_range())
        .map_or(0, |text| text.chars().count())
        .max(1);

    let mut out = format!("error: {}\n", err.kind);
    out.push_str(&format!("  | {source}\n"));
    out.push_str(&format!("  | {}{}", " ".repeat(column), "^".repeat(width)));
    if let Some(hint) = &err.hint {
        out.push_str(&format!("\n  = hint: {hint}"));
    }
    out
}
