use deunicode::deunicode_with_tofu;

/// Generate the URL-safe dedup slug for an article title.
///
/// Transliterates the title to ASCII (accents fold, other scripts are
/// romanised), lowercases it and collapses every run of non-alphanumeric
/// characters, apostrophes included, into a single `-`. Characters with no
/// transliteration act as separators.
#[must_use]
pub fn slugify(title: &str) -> String {
    let ascii = deunicode_with_tofu(title, " ");
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_simple_title() {
        assert_eq!(slugify("Bitcoin Hits New High"), "bitcoin-hits-new-high");
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(slugify("Markets -- up: 5% (again)!"), "markets-up-5-again");
    }

    #[test]
    fn slug_trims_leading_and_trailing_separators() {
        assert_eq!(
            slugify("  ...Breaking: storm hits coast...  "),
            "breaking-storm-hits-coast"
        );
    }

    #[test]
    fn slug_splits_on_apostrophes() {
        assert_eq!(slugify("Uncle Arnie's"), "uncle-arnie-s");
        assert_eq!(slugify("Europe\u{2019}s Future"), "europe-s-future");
        assert_eq!(slugify("C'est déjà l'été."), "c-est-deja-l-ete");
    }

    #[test]
    fn slug_folds_accented_characters() {
        assert_eq!(slugify("Señorita Café"), "senorita-cafe");
        assert_eq!(slugify("Straße in München"), "strasse-in-munchen");
        assert_eq!(slugify("BRĒZ"), "brez");
    }

    #[test]
    fn slug_romanises_non_latin_titles() {
        assert_eq!(slugify("Ελλάδα"), "ellada");
        assert_eq!(slugify("Москва"), "moskva");

        let mixed = slugify("Tokyo 東京 Olympics");
        assert!(mixed.starts_with("tokyo-"), "{mixed}");
        assert!(mixed.ends_with("-olympics"), "{mixed}");
        assert!(mixed.len() > "tokyo-olympics".len(), "{mixed}");
    }

    #[test]
    fn slug_of_symbols_only_is_empty() {
        assert_eq!(slugify("!!! ???"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn slug_is_deterministic_across_case() {
        assert_eq!(slugify("U.S. Stocks Rally"), slugify("u.s. stocks rally"));
        assert_eq!(slugify("U.S. Stocks Rally"), "u-s-stocks-rally");
    }
}
