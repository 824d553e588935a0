//! Portable filename sanitization for artifact names.

/// Characters never allowed in an artifact file name.
pub const DENYLIST: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

const NAME_MAX: usize = 200;

/// Sanitizes a display label for use as a file name stem.
///
/// - Replaces denylisted, control and whitespace characters with `_`
/// - Collapses consecutive underscores
/// - Trims leading/trailing dots and underscores
/// - Limits length to 200 bytes (leaves room for the extension)
pub fn sanitize_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut prev_underscore = false;

    for c in label.chars() {
        let replacement = if DENYLIST.contains(&c) || c.is_control() || c.is_whitespace() {
            '_'
        } else {
            c
        };

        if replacement == '_' {
            if !prev_underscore {
                out.push('_');
            }
            prev_underscore = true;
        } else {
            out.push(replacement);
            prev_underscore = false;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');

    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}

/// `<sanitized label>.txt`, falling back to the key (then `source`) when the label sanitizes to nothing.
pub fn artifact_file_name(label: &str, key: &str) -> String {
    let stem = [label, key]
        .iter()
        .map(|s| sanitize_label(s))
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| "source".to_string());
    format!("{}.txt", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_denylisted_characters() {
        let out = sanitize_label(r#"a<b>c:d"e/f\g|h?i*j"#);
        assert_eq!(out, "a_b_c_d_e_f_g_h_i_j");
        assert!(!out.contains(DENYLIST));
    }

    #[test]
    fn spaces_become_underscores_and_collapse() {
        assert_eq!(sanitize_label("United  States"), "United_States");
        assert_eq!(sanitize_label("Hong Kong / SAR"), "Hong_Kong_SAR");
    }

    #[test]
    fn trims_dots_and_underscores() {
        assert_eq!(sanitize_label("  ..Germany..  "), "Germany");
    }

    #[test]
    fn keeps_unicode_labels() {
        assert_eq!(sanitize_label("Türkiye 🇹🇷"), "Türkiye_🇹🇷");
    }

    #[test]
    fn control_chars() {
        assert_eq!(sanitize_label("a\x00b\tc"), "a_b_c");
    }

    #[test]
    fn is_deterministic() {
        let label = "Netherlands: fast | reality";
        assert_eq!(sanitize_label(label), sanitize_label(label));
        assert_eq!(artifact_file_name(label, "nl"), "Netherlands_fast_reality.txt");
    }

    #[test]
    fn long_labels_are_capped_on_char_boundary() {
        let label = "é".repeat(150);
        let out = sanitize_label(&label);
        assert!(out.len() <= NAME_MAX);
        assert!(out.chars().all(|c| c == 'é'));
    }

    #[test]
    fn empty_label_falls_back_to_key() {
        assert_eq!(artifact_file_name("???", "de"), "de.txt");
        assert_eq!(artifact_file_name("", "*"), "source.txt");
    }
}
