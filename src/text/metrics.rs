use crate::backend::Size;

use super::line_breaker::wrap_text;

/// Computes the bounding box of `text` wrapped to `width`.
///
/// The block is as wide as its widest line and one `line_height` tall per
/// line. Lines come from [`wrap_text`], the same routine the renderer uses,
/// so the reported size always matches what gets drawn. A token that is
/// wider than `width` contributes its true width.
pub fn measure_block(
    text: &str,
    width: i32,
    line_height: i32,
    mut measure: impl FnMut(&str) -> i32,
) -> Size {
    let lines = wrap_text(text, width, &mut measure);

    let max_width = lines.iter().map(|&line| measure(line)).max().unwrap_or(0);
    let height = line_height * lines.len() as i32;

    Size::new(max_width, height)
}
