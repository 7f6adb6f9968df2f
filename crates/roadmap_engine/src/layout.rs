//! Page geometry helpers shared by the PDF writer and the client export.

/// Points per millimetre.
pub(crate) const PT_PER_MM: f32 = 72.0 / 25.4;

/// Average Helvetica glyph advance as a fraction of the font size. Good
/// enough for centring and wrapping; exact metrics are not needed.
const AVERAGE_GLYPH_WIDTH_EM: f32 = 0.5;

/// Estimated rendered width of `text` in millimetres at `font_size_pt`.
pub(crate) fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    text.chars().count() as f32 * font_size_pt * AVERAGE_GLYPH_WIDTH_EM / PT_PER_MM
}

/// Scale (page units per image pixel) that fits an image inside the page
/// width and the page height minus `margin`, preserving aspect ratio.
pub fn fit_ratio(
    page_width: f32,
    page_height: f32,
    margin: f32,
    image_width: u32,
    image_height: u32,
) -> f32 {
    let by_width = page_width / image_width.max(1) as f32;
    let by_height = (page_height - margin).max(0.0) / image_height.max(1) as f32;
    by_width.min(by_height)
}

/// Greedy word wrap so that no line exceeds `max_width_mm` at `font_size_pt`.
/// Words longer than a line are split by characters.
pub fn wrap_text(text: &str, max_width_mm: f32, font_size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width_mm(&candidate, font_size_pt) <= max_width_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = split_long_word(word, max_width_mm, font_size_pt, &mut lines);
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn split_long_word(
    word: &str,
    max_width_mm: f32,
    font_size_pt: f32,
    lines: &mut Vec<String>,
) -> String {
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if text_width_mm(&current, font_size_pt) > max_width_mm && current.chars().count() > 1 {
            current.pop();
            lines.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_ratio_never_exceeds_either_dimension() {
        // Wide image: width bound.
        let ratio = fit_ratio(210.0, 297.0, 90.0, 2000, 500);
        assert!((ratio - 0.105).abs() < 1e-6);
        assert!(2000.0 * ratio <= 210.0 + 1e-3);
        assert!(500.0 * ratio <= 207.0);

        // Tall image: height bound.
        let ratio = fit_ratio(210.0, 297.0, 90.0, 500, 2070);
        assert!((ratio - 0.1).abs() < 1e-6);
        assert!(2070.0 * ratio <= 207.0 + 1e-3);
    }

    #[test]
    fn wrap_respects_width() {
        let text = "Become a data scientist by learning statistics, programming and machine learning";
        let lines = wrap_text(text, 60.0, 14.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 14.0) <= 60.0, "line too wide: {line}");
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn wrap_splits_overlong_words() {
        let lines = wrap_text(&"x".repeat(100), 20.0, 12.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "x".repeat(100));
    }

    #[test]
    fn wrap_of_empty_text_is_empty() {
        assert!(wrap_text("   ", 100.0, 12.0).is_empty());
    }
}
