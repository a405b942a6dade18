use crate::utils::error::{DocGenError, Result};

/// Placeholder used when a name sanitizes down to nothing.
pub const FALLBACK_FILE_STEM: &str = "unknown";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(DocGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DocGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DocGenError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

fn is_unsafe_filename_char(c: char) -> bool {
    matches!(
        c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\r' | '\n' | '\t'
    )
}

/// Replaces characters that are not allowed in file names with `_`.
///
/// The result is trimmed. Input with nothing but whitespace and disallowed
/// characters becomes [`FALLBACK_FILE_STEM`].
pub fn sanitize_filename(text: &str) -> String {
    if text
        .chars()
        .all(|c| is_unsafe_filename_char(c) || c.is_whitespace())
    {
        return FALLBACK_FILE_STEM.to_string();
    }

    let replaced: String = text
        .chars()
        .map(|c| if is_unsafe_filename_char(c) { '_' } else { c })
        .collect();

    replaced.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_replaces_separators() {
        assert_eq!(sanitize_filename("a/b:c"), "a_b_c");
        assert_eq!(sanitize_filename("x\\y*z?\"<>|"), "x_y_z_____");
        assert_eq!(sanitize_filename("tab\there\r\n"), "tab_here__");
    }

    #[test]
    fn test_sanitize_filename_keeps_unicode() {
        assert_eq!(sanitize_filename("张三"), "张三");
        assert_eq!(sanitize_filename("  李 四  "), "李 四");
    }

    #[test]
    fn test_sanitize_filename_never_returns_empty() {
        assert_eq!(sanitize_filename(""), FALLBACK_FILE_STEM);
        assert_eq!(sanitize_filename("   "), FALLBACK_FILE_STEM);
    }

    #[test]
    fn test_sanitize_filename_only_disallowed_characters() {
        assert_eq!(sanitize_filename("/:*"), FALLBACK_FILE_STEM);
        assert_eq!(sanitize_filename("\r\n\t"), FALLBACK_FILE_STEM);
        assert_eq!(sanitize_filename(" | "), FALLBACK_FILE_STEM);
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output", ".").is_ok());
        assert!(validate_path("output", "").is_err());
        assert!(validate_path("output", "a\0b").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("user", "张三").is_ok());
        assert!(validate_non_empty_string("user", " \t ").is_err());
    }
}
