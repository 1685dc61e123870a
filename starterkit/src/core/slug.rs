//! App name normalization.

/// Separator placed between slug words.
pub const SEPARATOR: char = '-';

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_'
}

/// Lowercase `input` and collapse every run of non-identifier characters into a
/// single [`SEPARATOR`], trimming separators from both ends.
///
/// Identifier characters are ASCII letters, digits and `_`. Total over all input;
/// the empty string maps to the empty string.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for ch in input.chars().map(|ch| ch.to_ascii_lowercase()) {
        if is_identifier_char(ch) {
            if pending_separator && !slug.is_empty() {
                slug.push(SEPARATOR);
            }
            pending_separator = false;
            slug.push(ch);
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Turn a slug back into a display title: `my-cool_app` becomes `My Cool App`.
pub fn humanize(slug: &str) -> String {
    slug.split([SEPARATOR, '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_punctuation_and_spaces() {
        assert_eq!(slugify("My Cool App!"), "my-cool-app");
        assert_eq!(slugify("  --Hello,   World--  "), "hello-world");
        assert_eq!(slugify("snake_case name"), "snake_case-name");
    }

    #[test]
    fn slugify_treats_non_ascii_as_separator() {
        assert_eq!(slugify("Café Bar"), "caf-bar");
        assert_eq!(slugify("日本"), "");
    }

    #[test]
    fn slugify_empty_is_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn humanize_capitalizes_each_word() {
        assert_eq!(humanize("my-cool-app"), "My Cool App");
        assert_eq!(humanize("snake_case-name"), "Snake Case Name");
        assert_eq!(humanize("app2"), "App2");
        assert_eq!(humanize(""), "");
    }
}
