//! URL slugs for categories and products.
//!
//! Slugs are generated once from the name and never rewritten, so links stay
//! stable when a product is renamed.

use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

const FALLBACK: &str = "item";

/// Transliterate to ASCII (NFKD, then drop what is left over), lower-case,
/// drop anything that is not a letter, digit, `_` or `-`, and join words with
/// single hyphens. Leading and trailing `-`/`_` are trimmed.
///
/// ```
/// use domain_catalog::slug::slugify;
///
/// assert_eq!(slugify("  Running Shoes (2024)! "), "running-shoes-2024");
/// assert_eq!(slugify("Café Crème"), "cafe-creme");
/// assert_eq!(slugify("***"), "item");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    let ascii = name.nfkd().filter(char::is_ascii);
    for c in ascii.map(|c| c.to_ascii_lowercase()) {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c.is_whitespace() || c == '-' {
            pending_hyphen = true;
        }
    }

    let slug = slug.trim_matches(&['-', '_'][..]);
    if slug.is_empty() {
        FALLBACK.to_string()
    } else {
        slug.to_string()
    }
}

/// `base` if nobody has it yet, otherwise the first free `base-2`, `base-3`, ...
pub fn unique_slug<'a, I>(base: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = taken.into_iter().collect();
    if !taken.contains(base) {
        return base.to_string();
    }

    (2u32..)
        .map(|n| format!("{}-{}", base, n))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}
