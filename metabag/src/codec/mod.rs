//! Codecs for tags whose stored value packs several things together.
//!
//! Each codec is a pair of pure functions over the stored scalar. Nothing
//! here touches a bag.

pub mod flash;
pub mod subject_area;
pub mod version;

pub use flash::Flash;
pub use subject_area::SubjectArea;

/// Renders a one-bit field.
pub fn format_flag(flag: bool) -> &'static str {
    if flag { "True" } else { "False" }
}

/// Reads a one-bit field: `true`/`false` in any case, or `1`/`0`.
pub fn parse_flag(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") || text == "1" {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") || text == "0" {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{format_flag, parse_flag};

    #[test]
    fn flags() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" false "), Some(false));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(format_flag(true)), Some(true));
    }
}
