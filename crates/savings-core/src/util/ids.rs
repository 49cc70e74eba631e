//! Project id derivation.
//!
//! New projects created without an explicit id get one derived from their
//! name with [`slugify`]; [`unique_id`] then appends a numeric suffix until
//! the id no longer collides with an existing one.

/// Convert a project name to a URL-safe id.
///
/// Performs the following transformations:
/// 1. Trims leading/trailing whitespace
/// 2. Converts to lowercase
/// 3. Replaces each whitespace run with a single hyphen
/// 4. Drops characters outside `[A-Za-z0-9_-]`
/// 5. Collapses repeated hyphens and trims hyphens from both ends
///
/// # Examples
///
/// ```
/// use savings_core::util::ids::slugify;
///
/// assert_eq!(slugify("My New Project!"), "my-new-project");
/// assert_eq!(slugify("  Power   BI  "), "power-bi");
/// assert_eq!(slugify("a - b"), "a-b");
/// assert_eq!(slugify("snake_case"), "snake_case");
/// ```
pub fn slugify(text: &str) -> String {
    let hyphenated = text
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-");

    let kept: String = hyphenated
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    kept.split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join("-")
}

/// Make `candidate` unique by appending `-1`, `-2`, ... while `is_taken`
/// reports a collision.
///
/// # Examples
///
/// ```
/// use savings_core::util::ids::unique_id;
///
/// let existing = ["report", "report-1"];
/// let id = unique_id("report", |id| existing.contains(&id));
/// assert_eq!(id, "report-2");
/// ```
pub fn unique_id<F>(candidate: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let mut id = candidate.to_string();
    let mut n: u64 = 1;
    while is_taken(&id) {
        id = format!("{candidate}-{n}");
        n += 1;
    }
    id
}
