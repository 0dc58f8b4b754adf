/// Ease-out cubic, used for viewport recentering. Input and output in [0, 1].
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    1.0 - (inv * inv * inv)
}

pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }

    let kept = label
        .chars()
        .take(max_chars.saturating_sub(1))
        .collect::<String>();
    format!("{}\u{2026}", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::{ease_out_cubic, truncate_label};

    #[test]
    fn ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn ease_out_cubic_clamps_input() {
        assert_eq!(ease_out_cubic(-2.0), 0.0);
        assert_eq!(ease_out_cubic(3.0), 1.0);
    }

    #[test]
    fn truncate_label_short_strings_unchanged() {
        assert_eq!(truncate_label("Mitigation", 24), "Mitigation");
    }

    #[test]
    fn truncate_label_long_strings_get_ellipsis() {
        let truncated = truncate_label("Greenhouse gas emission reduction targets", 16);
        assert!(truncated.ends_with('\u{2026}'));
        assert!(truncated.chars().count() <= 16);
    }
}
