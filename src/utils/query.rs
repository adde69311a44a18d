/// Escapes a user-provided value for use inside a quoted Lucene phrase.
///
/// Only the characters that can terminate the phrase are escaped; everything
/// else inside the quotes is already literal.
pub(crate) fn escape_phrase_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

/// Builds a `field:"value"` phrase clause.
pub(crate) fn phrase_clause(field: &str, value: &str) -> String {
    format!("{field}:\"{}\"", escape_phrase_value(value))
}
