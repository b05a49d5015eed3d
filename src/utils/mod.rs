// Utility functions for request handling

/// Reduce an uploaded file name to a safe, flat ASCII name.
///
/// Path separators become spaces, whitespace runs become `_`, anything other
/// than ASCII alphanumerics, `_`, `.` and `-` is dropped, and leading or
/// trailing `.`/`_` are stripped. Returns `None` when nothing usable remains.
pub fn secure_filename(filename: &str) -> Option<String> {
    let flattened: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");

    let cleaned: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();

    let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Accept only same-site relative paths as post-login targets.
pub fn safe_next_url(next: Option<&str>) -> Option<String> {
    let next = next?.trim();
    let same_site = next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains('\\')
        && !next.chars().any(char::is_control);

    same_site.then(|| next.to_string())
}

/// Login page URL that returns to `path` afterwards.
pub fn login_url(path: &str) -> String {
    format!("/login?next={}", urlencoding::encode(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_filename() {
        assert_eq!(secure_filename("My cool movie.mov").as_deref(), Some("My_cool_movie.mov"));
        assert_eq!(secure_filename("../../../etc/passwd").as_deref(), Some("etc_passwd"));
        assert_eq!(secure_filename("C:\\Users\\me\\photo.JPG").as_deref(), Some("C_Users_me_photo.JPG"));
        assert_eq!(secure_filename("café.png").as_deref(), Some("caf.png"));
        assert_eq!(secure_filename("..."), None);
        assert_eq!(secure_filename(""), None);
    }

    #[test]
    fn test_safe_next_url() {
        assert_eq!(safe_next_url(Some("/posts?page=2")).as_deref(), Some("/posts?page=2"));
        assert_eq!(safe_next_url(Some("https://evil.example")), None);
        assert_eq!(safe_next_url(Some("//evil.example")), None);
        assert_eq!(safe_next_url(Some("/\\evil.example")), None);
        assert_eq!(safe_next_url(Some("")), None);
        assert_eq!(safe_next_url(None), None);
    }

    #[test]
    fn test_login_url() {
        assert_eq!(login_url("/posts?page=2"), "/login?next=%2Fposts%3Fpage%3D2");
    }
}
