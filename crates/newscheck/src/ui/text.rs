pub(crate) fn wrap_text_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut buffer = String::new();
        let mut count = 0usize;
        for ch in raw.chars() {
            buffer.push(ch);
            count += 1;
            if count >= width {
                lines.push(std::mem::take(&mut buffer));
                count = 0;
            }
        }
        if !buffer.is_empty() {
            lines.push(buffer);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

const TAB_WIDTH: usize = 4;

/// Server-provided strings may carry tabs, CRs or escape sequences.
pub(crate) fn sanitize_text_for_tui(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\u{1b}' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for seq_ch in chars.by_ref() {
                        if ('@'..='~').contains(&seq_ch) {
                            break;
                        }
                    }
                }
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                out.push('\n');
                col = 0;
            }
            '\t' => {
                let spaces = TAB_WIDTH - col % TAB_WIDTH;
                out.extend(std::iter::repeat(' ').take(spaces));
                col += spaces;
            }
            _ if ch.is_control() => {
                out.push(' ');
                col += 1;
            }
            _ => {
                out.push(ch);
                col += 1;
            }
        }
    }
    out
}

pub(crate) fn display_width(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let chars = text.chars();
    let count = chars.clone().count();
    if count <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return chars.take(max_len).collect();
    }
    let keep = max_len - 3;
    let mut out: String = chars.take(keep).collect();
    out.push_str("...");
    out
}

/// Horizontal bar of `cells` characters filled to `percent`.
pub(crate) fn bar_cells(percent: f64, cells: usize) -> (String, String) {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * cells as f64).round() as usize;
    let filled = filled.min(cells);
    ("█".repeat(filled), "░".repeat(cells - filled))
}
