//! OCR confusable cleanup applied before field extraction.
//!
//! Every replacement maps to plain ASCII that is never itself a key, so both
//! passes are fixed points after a single application.

const GLOBAL_REPLACEMENTS: &[(char, &str)] = &[
    ('Ɵ', "t"),
    ('ƫ', "t"),
    ('ť', "t"),
    ('ţ', "t"),
    ('ṭ', "t"),
    ('†', "t"),
    ('ı', "i"),
    ('ﬀ', "ff"),
    ('ﬁ', "fi"),
    ('ﬂ', "fl"),
    ('ﬃ', "ffi"),
    ('ﬄ', "ffl"),
    ('ﬅ', "st"),
    ('ﬆ', "st"),
    ('\u{00A0}', " "),
    ('\u{202F}', " "),
    ('\u{2007}', " "),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
];

// Only safe near a nationality label: digits and accented vowels are legitimate elsewhere.
const NATIONALITY_REPLACEMENTS: &[(char, &str)] = &[
    ('í', "i"),
    ('ì', "i"),
    ('1', "l"),
    ('0', "o"),
    ('ö', "o"),
    ('ó', "o"),
    ('ò', "o"),
    ('ø', "o"),
];

pub fn normalize(text: &str) -> String {
    replace_with(text, &[GLOBAL_REPLACEMENTS])
}

/// Global cleanup plus the aggressive digit/diacritic folding used to recover
/// corrupted "nationality" labels.
pub fn normalize_for_nationality(text: &str) -> String {
    replace_with(text, &[GLOBAL_REPLACEMENTS, NATIONALITY_REPLACEMENTS])
}

fn replace_with(text: &str, tables: &[&[(char, &str)]]) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match tables
            .iter()
            .flat_map(|table| table.iter())
            .find(|(from, _)| *from == c)
        {
            Some((_, to)) => out.push_str(to),
            None => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_theta_like_t_and_ligatures() {
        assert_eq!(normalize("NaƟonaliƟy"), "Natonality");
        assert_eq!(normalize("ﬁnance oﬃcer"), "finance officer");
        assert_eq!(normalize("Cairo\u{00A0}Egypt"), "Cairo Egypt");
    }

    #[test]
    fn global_pass_keeps_digits_and_accents() {
        assert_eq!(normalize("José 0100 123"), "José 0100 123");
    }

    #[test]
    fn nationality_pass_folds_digits_and_vowels() {
        assert_eq!(normalize_for_nationality("Nati0na1ity"), "Nationality");
        assert_eq!(normalize_for_nationality("nacionalidad: Españól"), "nacionalidad: Español");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "NaƟonaliƟy: Egypƫian ﬁ",
            "plain ascii text 12/05/1985",
            "Nati0na1ity: Egypt\u{2019}s ı",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);

            let once = normalize_for_nationality(sample);
            assert_eq!(normalize_for_nationality(&once), once);
        }
    }

    #[test]
    fn output_never_shrinks_in_characters() {
        let sample = "ﬃ Ɵ ı 0 1";
        assert!(normalize(sample).chars().count() >= sample.chars().count());
        assert!(normalize_for_nationality(sample).chars().count() >= sample.chars().count());
    }
}
