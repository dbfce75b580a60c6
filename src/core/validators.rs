//! Predicates that reject syntactically plausible but semantically wrong
//! candidates. Each extractor pairs its pattern rules with one of these.

use once_cell::sync::Lazy;
use regex::Regex;

use super::lexicon::{
    self, ALL_CAPS_NAME_STOPWORDS, CV_SECTIONS, EDUCATION_EXCLUSION_WORDS, EDUCATION_KEYWORDS,
    FALSE_POSITIVE_NAMES, LOCATION_TECHNICAL_INDICATORS, NATIONALITY_SUFFIXES,
    NON_LOCATION_WORDS, NON_NAME_VALIDATION_WORDS, NON_NAME_WORDS, ROLE_EXCLUSION_WORDS,
};
use super::text::{is_alpha_allowing_joiners, is_alpha_word};

static CANONICAL_EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static PHONE_SHAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\d+\s\-().]{6,20}$").unwrap());
static NUMERIC_ONLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[\d\s/.\-]*$").unwrap());

const WORD_TRAILING_PUNCT: &[char] = &['.', ',', ';', ':', '-'];

pub fn is_valid_name(name: &str) -> bool {
    if name.chars().count() < 3 {
        return false;
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    if !(2..=6).contains(&words.len()) {
        return false;
    }

    if !words.iter().all(|w| is_valid_name_word(w)) {
        return false;
    }

    let lower = name.to_lowercase();
    if FALSE_POSITIVE_NAMES.contains(lower.as_str()) {
        return false;
    }

    if words.iter().any(|w| {
        let cleaned = w.to_lowercase();
        NON_NAME_VALIDATION_WORDS.contains(cleaned.trim_end_matches(WORD_TRAILING_PUNCT))
    }) {
        return false;
    }

    !CV_SECTIONS.iter().any(|section| lower.contains(section))
}

pub fn is_valid_name_word(word: &str) -> bool {
    let clean = word.trim_end_matches(WORD_TRAILING_PUNCT);
    // Non-ASCII words (Arabic, accented Latin) skip the alphabetic check.
    if !(is_alpha_allowing_joiners(clean) || clean.chars().any(|c| !c.is_ascii())) {
        return false;
    }
    !NON_NAME_WORDS.contains(clean.to_lowercase().as_str())
}

/// Token check for the all-caps heading rule.
pub fn is_likely_caps_name_word(word: &str) -> bool {
    let clean: String = word.chars().filter(|c| *c != '-' && *c != '\'').collect();
    let len = clean.chars().count();
    is_alpha_word(&clean)
        && (2..=25).contains(&len)
        && !ALL_CAPS_NAME_STOPWORDS.contains(&word.to_lowercase().as_str())
}

pub fn is_valid_age(age: i64) -> bool {
    (0..=100).contains(&age)
}

pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && CANONICAL_EMAIL_RE.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    if phone.is_empty() {
        return false;
    }

    let digits = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .count();
    if !(6..=15).contains(&digits) {
        return false;
    }

    PHONE_SHAPE_RE.is_match(phone)
}

/// Keyword is required unless the phrase is at least ten characters long.
/// An exact bare keyword ("science") is never an education entry.
pub fn is_valid_education(education: &str) -> bool {
    let trimmed = education.trim();
    let len = trimmed.chars().count();
    if len < 3 || education.chars().count() > 250 {
        return false;
    }

    let lower = trimmed.to_lowercase();
    if EDUCATION_EXCLUSION_WORDS.iter().any(|w| lower.contains(w)) {
        return false;
    }

    let has_keyword = EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k));
    if !has_keyword && len < 10 {
        return false;
    }

    if EDUCATION_KEYWORDS.iter().any(|k| lower == *k) {
        return false;
    }

    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return false;
    }

    trimmed.chars().any(char::is_alphabetic)
}

pub fn is_valid_role(role: &str) -> bool {
    let role = role.trim();
    let len = role.chars().count();
    if len <= 2 || len > 100 {
        return false;
    }

    if !role.chars().any(char::is_alphabetic) {
        return false;
    }

    let lower = role.to_lowercase();
    if ROLE_EXCLUSION_WORDS.iter().any(|w| lower.contains(w)) {
        return false;
    }

    !NUMERIC_ONLY_RE.is_match(role)
}

pub fn is_valid_location(location: &str) -> bool {
    let location = location.trim();
    let len = location.chars().count();
    if len < 2 || len > 50 {
        return false;
    }

    let words: Vec<&str> = location.split_whitespace().collect();
    if words
        .iter()
        .any(|w| NON_LOCATION_WORDS.contains(w.to_lowercase().as_str()))
    {
        return false;
    }

    let lower = location.to_lowercase();
    if LOCATION_TECHNICAL_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
    {
        return false;
    }

    if words.len() == 1 {
        return is_alpha_allowing_joiners(location) && (2..=25).contains(&len);
    }

    // Also covers "City, Country" and "City - Country": the country part is a whole word.
    if lexicon::country_within(location).is_some() {
        return true;
    }

    words
        .iter()
        .all(|w| is_alpha_allowing_joiners(w.trim_matches(WORD_TRAILING_PUNCT)))
}

/// Suffix rule is deliberately loose; see DESIGN.md for the precision gap.
pub fn is_valid_nationality(nationality: &str) -> bool {
    let nationality = nationality.trim();
    if nationality.chars().count() < 3 {
        return false;
    }

    let lower = nationality.to_lowercase();
    if NATIONALITY_SUFFIXES
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        return true;
    }

    lexicon::is_country(nationality)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_validator_accepts_plain_names() {
        assert!(is_valid_name("John Allan Smith"));
        assert!(is_valid_name("Mohamed Al-Sayed"));
        assert!(is_valid_name("José Pérez"));
    }

    #[test]
    fn name_validator_rejects_labels_and_headers() {
        assert!(!is_valid_name("Mobile Number"));
        assert!(!is_valid_name("Education Background"));
        assert!(!is_valid_name("Ahmed"));
        assert!(!is_valid_name("Jo"));
        assert!(!is_valid_name("One Two Three Four Five Six Seven"));
        assert!(!is_valid_name("Saudi Arabia"));
        assert!(!is_valid_name("John Smith 2020"));
    }

    #[test]
    fn caps_name_words_must_be_plausible() {
        assert!(is_likely_caps_name_word("SMITH"));
        assert!(is_likely_caps_name_word("O'NEIL"));
        assert!(!is_likely_caps_name_word("A"));
        assert!(!is_likely_caps_name_word("PAGE"));
        assert!(!is_likely_caps_name_word("CV2024"));
    }

    #[test]
    fn age_bounds_are_inclusive() {
        assert!(is_valid_age(0));
        assert!(is_valid_age(100));
        assert!(!is_valid_age(101));
        assert!(!is_valid_age(-1));
    }

    #[test]
    fn email_validator_requires_canonical_shape() {
        assert!(is_valid_email("jane.doe@example.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("jane@localhost"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn phone_validator_counts_digits_and_shape() {
        assert!(is_valid_phone("+201001234567"));
        assert!(is_valid_phone("(02) 2345-6789"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("1234567890123456"));
        assert!(!is_valid_phone("call 0100123456"));
    }

    #[test]
    fn education_validator_applies_keyword_and_length_rules() {
        assert!(is_valid_education("Bachelor of Computer Science"));
        assert!(is_valid_education("Cairo University"));
        assert!(!is_valid_education("science"));
        assert!(!is_valid_education("2010 bachelor of arts"));
        assert!(!is_valid_education("email: a@b.com university"));
        assert!(!is_valid_education("xyz abc"));
        // No keyword but long enough: accepted by the length override.
        assert!(is_valid_education("Fine Art Studio Diplome"));
        // Nine characters, no keyword: too short for the override.
        assert!(!is_valid_education("abcde fgh"));
    }

    #[test]
    fn role_validator_rejects_noise() {
        assert!(is_valid_role("Senior Software Engineer"));
        assert!(!is_valid_role("QA"));
        assert!(!is_valid_role("12/2019 - 03/2021"));
        assert!(!is_valid_role("Mobile: +20 100"));
        assert!(!is_valid_role(&"x".repeat(101)));
    }

    #[test]
    fn location_validator_handles_single_and_multi_word() {
        assert!(is_valid_location("Cairo"));
        assert!(is_valid_location("Cairo, Egypt"));
        assert!(is_valid_location("Riyadh - Saudi Arabia"));
        assert!(is_valid_location("New Cairo City"));
        assert!(!is_valid_location("Software Engineer"));
        assert!(!is_valid_location("5 years"));
        assert!(!is_valid_location("Cairo2"));
        assert!(!is_valid_location(&"Cairo ".repeat(11)));
    }

    #[test]
    fn location_with_country_segment_is_accepted_despite_digits() {
        assert!(is_valid_location("Riyadh 2 - Saudi Arabia"));
        assert!(is_valid_location("Al-Khobar 31952, KSA"));
        assert!(!is_valid_location("Block 7, Nowhere"));
    }

    #[test]
    fn nationality_validator_uses_suffixes_and_countries() {
        assert!(is_valid_nationality("Egyptian"));
        assert!(is_valid_nationality("Japanese"));
        assert!(is_valid_nationality("Saudi"));
        assert!(is_valid_nationality("Egypt"));
        assert!(!is_valid_nationality("Xyz"));
        assert!(!is_valid_nationality("Dutch"));
    }
}
