//! Small helpers shared across handlers.

/// Lowercases, strips punctuation, and joins words with hyphens to build
/// URL slugs from titles. Collapses runs of separators.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_dash = true;
    for c in input.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Breaking News: Markets Rally"), "breaking-news-markets-rally");
    }

    #[test]
    fn slugify_collapses_separators_and_trims() {
        assert_eq!(slugify("  -- Hello,   World! --  "), "hello-world");
        assert_eq!(slugify(""), "");
    }
}
