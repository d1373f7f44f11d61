//! SQL script statement splitting.
//!
//! Migration and seed scripts arrive as one string holding many statements.
//! Statements are split on top-level semicolons; semicolons inside quoted
//! strings, quoted identifiers, dollar-quoted bodies and comments do not
//! count. Comment-only segments are dropped.

/// Splits a script into individual statements.
pub(crate) fn split_statements(script: &str) -> Vec<String> {
    let bytes = script.as_bytes();
    let mut statements = Vec::new();
    let mut start = 0;
    let mut has_content = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' => {
                has_content = true;
                i = skip_quoted(bytes, i, b'\'');
            }
            b'"' => {
                has_content = true;
                i = skip_quoted(bytes, i, b'"');
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                if !has_content {
                    start = i;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i);
                if !has_content {
                    start = i;
                }
            }
            b'$' => {
                has_content = true;
                if let Some(delimiter) = dollar_delimiter(script, i) {
                    let body_start = i + delimiter.len();
                    i = match script[body_start..].find(delimiter) {
                        Some(pos) => body_start + pos + delimiter.len(),
                        // Unterminated body runs to the end of the script.
                        None => bytes.len(),
                    };
                } else {
                    i += 1;
                }
            }
            b';' => {
                if has_content {
                    statements.push(script[start..i].trim().to_string());
                }
                start = i + 1;
                has_content = false;
                i += 1;
            }
            c if c.is_ascii_whitespace() => i += 1,
            _ => {
                has_content = true;
                i += 1;
            }
        }
    }

    if has_content {
        statements.push(script[start..].trim().to_string());
    }

    statements
}

/// Advances past a quoted region, honoring the doubled-quote escape.
///
/// `i` must point at the opening quote; the returned index is one past the
/// closing quote, or the end of input for an unterminated region.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
    i += 1;
    while i < bytes.len() {
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    i
}

/// Advances past a block comment. Block comments nest in PostgreSQL.
fn skip_block_comment(bytes: &[u8], mut i: usize) -> usize {
    let mut depth = 1;
    i += 2;
    while i < bytes.len() && depth > 0 {
        if bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/') {
            depth -= 1;
            i += 2;
        } else if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'*') {
            depth += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    i
}

/// Reads a dollar-quote delimiter (`$$` or `$tag$`) starting at `from`.
fn dollar_delimiter(script: &str, from: usize) -> Option<&str> {
    let bytes = script.as_bytes();
    let mut j = from + 1;
    while j < bytes.len() && (bytes[j].is_ascii_alphanumeric() || bytes[j] == b'_') {
        j += 1;
    }
    if j < bytes.len() && bytes[j] == b'$' {
        Some(&script[from..=j])
    } else {
        None
    }
}
