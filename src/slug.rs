// src/slug.rs

/// Used when a doctor name slugs to nothing (e.g. only punctuation).
pub const FALLBACK_DOCTOR_ID: &str = "doctor";

/// Lowercase, hyphen-separated, URL-safe form of a display name.
/// Runs of anything outside `[a-z0-9]` collapse into a single `-`.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.trim().to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}

pub fn doctor_id(name: &str) -> String {
    let slug = slugify(name);
    if slug.is_empty() {
        FALLBACK_DOCTOR_ID.to_string()
    } else {
        slug
    }
}

/// Reverse of the slug for headings: `dr-jane-doe` -> `dr jane doe`.
pub fn unslug(slug: &str) -> String {
    slug.replace('-', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Dr Jane Doe"), "dr-jane-doe");
        assert_eq!(slugify("  Tracey   Didinger "), "tracey-didinger");
        assert_eq!(slugify("--O'Brien, Pat--"), "o-brien-pat");
        assert_eq!(slugify("Zoë Ng"), "zo-ng");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_doctor_id_fallback() {
        assert_eq!(doctor_id(""), "doctor");
        assert_eq!(doctor_id("   "), "doctor");
        assert_eq!(doctor_id("Jane"), "jane");
    }

    #[test]
    fn test_unslug() {
        assert_eq!(unslug("jane-doe"), "jane doe");
    }
}
