//! Ignore-pattern matching on whole path segments.
//!
//! Paths and patterns are `/`-prefixed. A pattern only ever matches a
//! whole file or folder name: `/foo` matches `/foo` and `/foo/x` but
//! never `/foobar/x`.

/// Returns true if `path` is excluded by any pattern.
///
/// Absolute patterns must match at the start of `path`; relative patterns
/// may match anywhere. Absolute patterns are checked first.
pub fn is_file_ignored(
    path: &str,
    absolute_patterns: &[String],
    relative_patterns: &[String],
) -> bool {
    absolute_patterns
        .iter()
        .any(|p| path.starts_with(p.as_str()) && ends_at_boundary(path, p.len()))
        || relative_patterns
            .iter()
            .any(|p| matches_anywhere(path, p))
}

/// True if the match ending at byte `end` is a whole file or folder.
fn ends_at_boundary(path: &str, end: usize) -> bool {
    end == path.len() || path.as_bytes()[end] == b'/'
}

fn starts_at_boundary(path: &str, pattern: &str, pos: usize) -> bool {
    pos == 0 || pattern.starts_with('/') || path.as_bytes()[pos - 1] == b'/'
}

fn matches_anywhere(path: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(offset) = path[from..].find(pattern) {
        let pos = from + offset;
        if starts_at_boundary(path, pattern, pos) && ends_at_boundary(path, pos + pattern.len()) {
            return true;
        }
        // Step one character so overlapping occurrences are tried too.
        from = pos + path[pos..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Absolute and relative ignore patterns, normalized to `/`-prefixed form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnorePatterns {
    absolute: Vec<String>,
    relative: Vec<String>,
}

impl IgnorePatterns {
    /// Normalizes raw patterns: adds a leading `/`, trims trailing `/`,
    /// and drops patterns that end up empty.
    pub fn new<A, R>(absolute: A, relative: R) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self {
            absolute: absolute.into_iter().filter_map(normalize).collect(),
            relative: relative.into_iter().filter_map(normalize).collect(),
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn absolute(&self) -> &[String] {
        &self.absolute
    }

    pub fn relative(&self) -> &[String] {
        &self.relative
    }

    pub fn is_empty(&self) -> bool {
        self.absolute.is_empty() && self.relative.is_empty()
    }

    /// Checks a `/`-prefixed path.
    pub fn is_ignored(&self, path: &str) -> bool {
        is_file_ignored(path, &self.absolute, &self.relative)
    }
}

fn normalize(pattern: impl AsRef<str>) -> Option<String> {
    let trimmed = pattern.as_ref().trim().trim_end_matches('/');
    let trimmed = trimmed.trim_start_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}
