/// Lowercase `text` one character at a time so positions stay aligned with
/// the original string.
pub(crate) fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_keeps_length() {
        let original = "İstanbul ÅRHUS";
        assert_eq!(fold(original).len(), original.chars().count());
        assert_eq!(fold("ÅRHUS").into_iter().collect::<String>(), "århus");
    }
}
