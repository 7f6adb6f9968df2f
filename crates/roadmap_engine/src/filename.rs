const MAX_STEM_CHARS: usize = 80;

/// Filename for a locally saved roadmap document:
/// `{title with whitespace runs as '_'}_Roadmap.pdf`.
pub fn roadmap_filename(title: &str) -> String {
    format!("{}_Roadmap.pdf", sanitize_title(title))
}

fn sanitize_title(input: &str) -> String {
    let mut cleaned = String::with_capacity(input.len());
    let mut in_whitespace = false;
    for c in input.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                cleaned.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        cleaned.push(if is_forbidden(c) { '_' } else { c });
    }

    if cleaned.trim_matches(&['_', '.'][..]).is_empty() {
        return "untitled".to_string();
    }
    if cleaned.chars().count() > MAX_STEM_CHARS {
        cleaned = cleaned.chars().take(MAX_STEM_CHARS).collect();
    }
    cleaned
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}
