use deunicode::deunicode;

/// Canonicalize a string for name comparison
///
/// Folds accented letters to their base letter, lower-cases, drops anything
/// that is not an ASCII letter, digit or space (so "O'Neill" and "ONeill"
/// come out identical), and collapses whitespace runs to single spaces.
/// Pure and total over any input.
pub fn normalize(s: &str) -> String {
    deunicode(s)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_on_plain_ascii() {
        assert_eq!(normalize("mbappe"), "mbappe");
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(normalize("Erling HAALAND"), "erling haaland");
    }

    #[test]
    fn test_diacritics_fold_to_base_letters() {
        assert_eq!(normalize("Mbappé"), "mbappe");
        assert_eq!(normalize("Müller"), "muller");
        assert_eq!(normalize("Kovačić"), "kovacic");
    }

    #[test]
    fn test_punctuation_collapses_to_nothing() {
        assert_eq!(normalize("O'Neill"), normalize("ONeill"));
        assert_eq!(normalize("Saint-Maximin"), "saintmaximin");
    }

    #[test]
    fn test_whitespace_collapse() {
        assert_eq!(normalize("  van   Dijk "), "van dijk");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!..."), "");
        assert_eq!(normalize("   "), "");
    }
}
