/// Locates the first balanced JSON array of objects inside free-form text
///
/// Model output frequently wraps the payload in prose or a fenced code block.
/// This scans for a `[` whose first non-whitespace content is `{` and returns
/// the slice up to its matching `]`. Brackets inside string literals are
/// ignored. Candidates that never balance (e.g. truncated output) are skipped.
pub fn extract_json_array(text: &str) -> Option<&str> {
    let mut from = 0;

    while let Some(offset) = text[from..].find('[') {
        let open = from + offset;

        if text[open + 1..].trim_start().starts_with('{') {
            if let Some(close) = matching_close(text.as_bytes(), open) {
                return Some(&text[open..=close]);
            }
        }

        from = open + 1;
    }

    None
}

/// Index of the bracket closing the one at `open`, or None if the brackets
/// are mismatched or never close.
fn matching_close(bytes: &[u8], open: usize) -> Option<usize> {
    let mut expected: Vec<u8> = Vec::new();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }

        match b {
            b'"' => in_string = true,
            b'[' => expected.push(b']'),
            b'{' => expected.push(b'}'),
            b']' | b'}' => {
                if expected.pop()? != b {
                    return None;
                }
                if expected.is_empty() {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}
