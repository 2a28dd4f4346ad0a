//! Text helper functions

/// Title-case a string: the first letter of every run of letters is
/// upper-cased and the rest of the run lower-cased
///
/// # Examples
/// ```ignore
/// title_case("hello wORLD") // -> "Hello World"
/// title_case("they're")     // -> "They'Re"
/// ```
pub fn title_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_word = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(c);
            in_word = false;
        }
    }

    result
}

/// Display title derived from a file stem: underscores become spaces, then
/// title-cased
pub fn title_from_stem(stem: &str) -> String {
    title_case(&stem.replace('_', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("my_post"), "My Post");
        assert_eq!(title_from_stem("README"), "Readme");
        assert_eq!(title_from_stem("2024_year_in_review"), "2024 Year In Review");
    }

    #[test]
    fn test_title_case_word_boundaries() {
        assert_eq!(title_case("hello-world"), "Hello-World");
        assert_eq!(title_case("x86asm"), "X86Asm");
        assert_eq!(title_case("they're"), "They'Re");
    }
}
