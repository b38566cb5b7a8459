use regex::Regex;

// Base used when a title contains no sluggable characters at all, so the
// generated slug is never empty and never starts with a separator.
const FALLBACK_BASE: &str = "post";

/// Normalize a post title into a URL-safe base slug: lowercase, runs of
/// anything outside `[a-z0-9]` collapsed to a single `-`, leading and
/// trailing separators trimmed. Titles that normalize to nothing (symbols
/// only) fall back to a fixed base so the result is always non-empty.
pub fn slugify(title: &str) -> String {
    let separators = Regex::new(r"[^a-z0-9]+").unwrap();
    let lowered = title.to_lowercase();
    let collapsed = separators.replace_all(&lowered, "-");
    let trimmed = collapsed.trim_matches('-');

    if trimmed.is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Candidate slugs for a base: the base itself, then `base-2`, `base-3`, …
/// The caller walks the sequence until it finds one not already taken, so
/// uniqueness holds without relying on wall-clock suffixes.
pub fn candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    (1u32..).map(move |attempt| {
        if attempt == 1 {
            base.to_string()
        } else {
            format!("{}-{}", base, attempt)
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_separates() {
        assert_eq!(slugify("Getting Started with React"), "getting-started-with-react");
    }

    #[test]
    fn test_slugify_collapses_symbol_runs() {
        assert_eq!(slugify("Rust & Go -- a comparison!"), "rust-go-a-comparison");
    }

    #[test]
    fn test_slugify_trims_edge_separators() {
        assert_eq!(slugify("  ...Hello World?  "), "hello-world");
    }

    #[test]
    fn test_slugify_safe_charset_only() {
        let slug = slugify("C'est déjà l'été: 100%射");

        assert!(!slug.is_empty());
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn test_slugify_symbol_only_title_falls_back_to_fixed_base() {
        assert_eq!(slugify("!!! ???"), "post");
        assert_eq!(slugify("¿¡"), "post");
    }

    #[test]
    fn test_symbol_only_titles_disambiguate_without_leading_separator() {
        // Arrange
        let taken = ["post".to_string()];

        // Act
        let free = candidates(&slugify("!!!")).find(|c| !taken.contains(c));

        // Assert
        assert_eq!(free, Some("post-2".to_string()));
    }

    #[test]
    fn test_candidates_start_with_base() {
        let first: Vec<_> = candidates("hello-world").take(3).collect();

        assert_eq!(first, vec!["hello-world", "hello-world-2", "hello-world-3"]);
    }

    #[test]
    fn test_candidates_disambiguate_against_taken_set() {
        // Arrange
        let taken = ["my-post".to_string(), "my-post-2".to_string()];

        // Act
        let free = candidates("my-post").find(|c| !taken.contains(c));

        // Assert
        assert_eq!(free, Some("my-post-3".to_string()));
    }
}
