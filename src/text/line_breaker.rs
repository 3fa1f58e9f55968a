/// Greedily wraps a single paragraph into lines no wider than `width`.
///
/// Tokens are separated by single space characters and each line is a
/// contiguous slice of `text` with its trailing spaces removed. A token that
/// is wider than `width` on its own still gets a line of its own, so no text
/// is ever dropped. A run of spaces that overflows on its own becomes an
/// empty line. At least one line is always returned.
///
/// `text` is expected not to contain newlines; see [`wrap_text`].
pub fn break_lines<'t>(
    text: &'t str,
    width: i32,
    mut measure: impl FnMut(&str) -> i32,
) -> Vec<&'t str> {
    let mut lines = Vec::new();

    let mut line_start = 0usize;
    // End of the text known to fit on the current line.
    let mut accepted_end: Option<usize> = None;

    let mut token_start = 0usize;
    for token in text.split(' ') {
        let token_end = token_start + token.len();
        let candidate = &text[line_start..token_end];

        if measure(candidate) > width {
            if let Some(end) = accepted_end {
                let line = text[line_start..end].trim_end_matches(' ');
                log::trace!("wrap: `{}` | `{}`", line, token);
                lines.push(line);
            }
            line_start = token_start;
        }
        accepted_end = Some(token_end);

        token_start = token_end + 1;
    }

    lines.push(text[line_start..].trim_end_matches(' '));
    lines
}

/// Splits `text` at newlines, then wraps every paragraph with [`break_lines`].
///
/// Newline breaks always take precedence over width based wrapping, so text
/// with `k` newlines produces at least `k + 1` lines.
pub fn wrap_text<'t>(
    text: &'t str,
    width: i32,
    mut measure: impl FnMut(&str) -> i32,
) -> Vec<&'t str> {
    text.split('\n')
        .flat_map(|paragraph| break_lines(paragraph, width, &mut measure))
        .collect()
}
