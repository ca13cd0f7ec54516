// Literal formatting for generated JavaScript / TypeScript

/// Double-quoted, escaped string literal.
pub fn string_literal(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}

/// Text safe to place after `//`: line breaks become spaces.
pub fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{2028}' | '\u{2029}' => ' ',
            c => c,
        })
        .collect()
}

/// Number with exactly two decimals. Unlike `toFixed(2)`, a result that rounds
/// to zero is always printed unsigned (`0.00`, never `-0.00`).
pub fn fixed2(value: f32) -> String {
    if let Some(special) = non_finite(value) {
        return special.to_string();
    }
    let text = format!("{value:.2}");
    if text == "-0.00" { "0.00".to_string() } else { text }
}

/// Shortest number literal: `0.8`, `1`, `0`.
pub fn number(value: f32) -> String {
    if let Some(special) = non_finite(value) {
        return special.to_string();
    }
    if value == 0.0 {
        // Covers -0.0
        return "0".to_string();
    }
    value.to_string()
}

/// Three numbers with two decimals: `[0.00, 1.50, 0.00]`.
pub fn fixed2_tuple(values: [f32; 3]) -> String {
    let [x, y, z] = values.map(fixed2);
    format!("[{x}, {y}, {z}]")
}

fn non_finite(value: f32) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f32::INFINITY {
        Some("Infinity")
    } else if value == f32::NEG_INFINITY {
        Some("-Infinity")
    } else {
        None
    }
}
