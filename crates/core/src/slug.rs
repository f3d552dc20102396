//! URL slug sanitization.

/// Turn an arbitrary string (typically a part number) into a URL-safe slug.
///
/// Lowercases, maps `/`, `\` and whitespace to `-`, drops anything outside
/// `[a-z0-9-]`, collapses hyphen runs and trims hyphens at both ends.
/// Idempotent: a sanitized slug sanitizes to itself.
pub fn sanitize_slug(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());

    for ch in lowered.chars() {
        let mapped = match ch {
            '/' | '\\' => '-',
            c if c.is_whitespace() => '-',
            c if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' => c,
            _ => continue,
        };

        if mapped == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(mapped);
    }

    while out.ends_with('-') {
        out.pop();
    }

    out
}
