//! Message formatting helpers shared by the rules.

/// Quote and join items for an error message.
///
/// `[]` → `""`, `[a]` → `"a"`, `[a, b]` → `"a" and "b"`,
/// `[a, b, c]` → `"a", "b", or "c"`.
pub fn or_list<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => format!("\"{}\"", only.as_ref()),
        [first, second] => format!("\"{}\" and \"{}\"", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(|s| s.as_ref()).collect();
            format!("\"{}\", or \"{}\"", head.join("\", \""), last.as_ref())
        }
    }
}

/// `name` with a leading `prefix` and the whitespace after it removed.
pub fn strip_prefix_trimmed<'a>(name: &'a str, prefix: &str) -> &'a str {
    match name.strip_prefix(prefix) {
        Some(rest) => rest.trim_start(),
        None => name,
    }
}
