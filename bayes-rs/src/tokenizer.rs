//! Line tokenizer
//!
//! Tokens are maximal runs of ASCII letters, lower-cased. Everything else is a
//! delimiter.

/// Split a line into lowercase alphabetic tokens
pub fn tokenize(line: &str) -> Vec<String> {
    line.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_ascii_lowercase())
        .collect()
}

/// Tokenize every line and flatten the result, preserving order
pub fn tokenize_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .flat_map(|line| tokenize(line.as_ref()))
        .collect()
}
