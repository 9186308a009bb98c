//! Display helpers shared by chart labels and report tables.

/// Turn a raw column name into a header: split camelCase, underscores to
/// spaces, capitalise each word (`"unitPrice_usd"` → `"Unit Price Usd"`).
pub fn humanize_column(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for ch in name.chars() {
        if ch == '_' {
            spaced.push(' ');
        } else {
            if ch.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase()) {
                spaced.push(' ');
            }
            spaced.push(ch);
        }
        prev = Some(ch);
    }

    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

/// Cap `text` at `max` characters, appending `"..."` when cut.
pub fn truncate_label(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}

/// Cap `text` at `max` characters, no marker.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Round to two decimals for display. Values too large to scale are
/// already integral and pass through.
pub fn round2(v: f64) -> f64 {
    let scaled = v * 100.0;
    if scaled.is_finite() { scaled.round() / 100.0 } else { v }
}

/// Fixed-point rendering with `digits` decimals.
pub fn fixed(v: f64, digits: usize) -> String {
    format!("{v:.digits$}")
}

/// Integer with comma thousands separators (`12345` → `"12,345"`).
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize() {
        assert_eq!(humanize_column("unitPrice"), "Unit Price");
        assert_eq!(humanize_column("order_date"), "Order Date");
        assert_eq!(humanize_column("unitPrice_usd"), "Unit Price Usd");
        assert_eq!(humanize_column("ID"), "ID");
        assert_eq!(humanize_column("x"), "X");
        assert_eq!(humanize_column(""), "");
    }

    #[test]
    fn truncation_counts_chars() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("abcdefghijkl", 10), "abcdefghij...");
        assert_eq!(truncate_chars("ñandú-ñandú", 5), "ñandú");
    }

    #[test]
    fn rounding_and_fixed() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(2.0), 2.0);
        assert_eq!(round2(1e308), 1e308);
        assert_eq!(fixed(2.0, 2), "2.00");
        assert_eq!(fixed(1.0 / 3.0, 3), "0.333");
    }

    #[test]
    fn thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
