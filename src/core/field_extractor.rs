use std::sync::Arc;

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use super::confusables::normalize_for_nationality;
use super::dates::resolve_age_on;
use super::lexicon::{self, FIRST_LINE_CONTACT_HINTS, LANGUAGES, NON_LOCATION_WORDS};
use super::models::ExtractionSettings;
use super::ner::{EntityLabel, EntityRecognizer};
use super::patterns::{
    self, PatternRule, BIRTH_DATE_RULES, DIRECT_AGE_RULES, EDUCATION_RULES, EMAIL_RULES,
    LOCATION_HEADING_PAIR_RE, LOCATION_HEADING_WORD_RE, LOCATION_RULES, NAME_RULES,
    NATIONALITY_RULES, PHONE_RULES, ROLE_RULES,
};
use super::text::{char_prefix, strip_page_heading, strip_page_marker, title_case};
use super::validators::{
    is_likely_caps_name_word, is_valid_location, is_valid_name, is_valid_name_word,
};

static LANGUAGES_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^[ \t]*languages?\b[ \t]*[:\-]?(.*)$").unwrap());
static CERTIFICATIONS_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:certifications?|certificates?|courses|licenses?(?:[ \t]*&[ \t]*certifications?)?)[ \t]*:?[ \t]*$")
        .unwrap()
});
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s•\-\*·▪●◦>]+").unwrap());
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+").unwrap());

const SECTION_HEADINGS: &[&str] = &[
    "experience", "education", "skills", "languages", "projects", "references", "summary",
    "interests", "hobbies", "personal", "employment", "objective", "profile",
];

const MAX_CERTIFICATIONS: usize = 10;
const LANGUAGE_SECTION_LINES: usize = 6;
const MIN_LOCATION_TEXT: usize = 10;

fn cascade(field: &'static str, rules: &[PatternRule], text: &str) -> Option<String> {
    let (rule, value) = patterns::first_valid(rules, text)?;
    tracing::debug!(field, rule, value = %value, "field extracted by pattern");
    Some(value)
}

pub fn extract_email(text: &str) -> String {
    cascade("email", &EMAIL_RULES, text).unwrap_or_default()
}

pub fn extract_phone(text: &str) -> String {
    cascade("phone", &PHONE_RULES, text).unwrap_or_default()
}

pub fn extract_age(text: &str) -> u32 {
    extract_age_on(text, Local::now().date_naive())
}

/// Direct mentions first, then birth dates resolved against `today`. A birth
/// date that resolves to 0 (unparseable or out of range) does not stop the search.
pub fn extract_age_on(text: &str, today: NaiveDate) -> u32 {
    if let Some(age) = cascade("age", &DIRECT_AGE_RULES, text).and_then(|v| v.parse().ok()) {
        return age;
    }

    for rule in BIRTH_DATE_RULES.iter() {
        for fragment in rule.candidates(text) {
            let age = resolve_age_on(&fragment, today);
            if age > 0 {
                tracing::debug!(
                    field = "age",
                    rule = rule.name,
                    fragment = %fragment,
                    age,
                    "age from birth date"
                );
                return age;
            }
        }
    }

    0
}

pub fn extract_education(text: &str) -> String {
    let lower = text.to_lowercase();
    cascade("education", &EDUCATION_RULES, &lower)
        .map(|value| title_case(&value))
        .unwrap_or_default()
}

pub fn extract_current_role(text: &str) -> String {
    cascade("current_role", &ROLE_RULES, text).unwrap_or_default()
}

fn is_section_heading(line: &str) -> bool {
    let lower = line.trim().trim_end_matches(':').to_lowercase();
    SECTION_HEADINGS
        .iter()
        .any(|heading| lower == *heading || lower.starts_with(&format!("{heading} ")))
}

/// Known language names under a `Languages` heading or label, first-seen order.
pub fn extract_languages(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for heading in LANGUAGES_HEADING_RE.captures_iter(text) {
        let Some(whole) = heading.get(0) else {
            continue;
        };
        let mut section = vec![heading.get(1).map(|m| m.as_str()).unwrap_or_default()];
        section.extend(
            text[whole.end()..]
                .lines()
                .skip(1)
                .take(LANGUAGE_SECTION_LINES)
                .take_while(|line| !line.trim().is_empty() && !is_section_heading(line)),
        );

        for line in section {
            for word in WORD_RE.find_iter(line) {
                let lower = word.as_str().to_lowercase();
                if LANGUAGES.contains(&lower.as_str()) {
                    let language = title_case(&lower);
                    if !found.contains(&language) {
                        found.push(language);
                    }
                }
            }
        }
    }

    found
}

/// Lines under the first certifications heading, up to a blank line or the next section.
pub fn extract_certifications(text: &str) -> Vec<String> {
    let Some(heading) = CERTIFICATIONS_HEADING_RE.find(text) else {
        return Vec::new();
    };

    text[heading.end()..]
        .lines()
        .skip(1)
        .skip_while(|line| line.trim().is_empty())
        .take_while(|line| !line.trim().is_empty() && !is_section_heading(line))
        .map(|line| BULLET_RE.replace(line, "").trim().to_string())
        .filter(|line| (3..=120).contains(&line.chars().count()))
        .take(MAX_CERTIFICATIONS)
        .collect()
}

fn is_all_caps(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

/// Extractors that can fall back to the injected entity recognizer.
pub struct FieldExtractor {
    recognizer: Arc<dyn EntityRecognizer>,
    settings: ExtractionSettings,
}

impl FieldExtractor {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>, settings: ExtractionSettings) -> Self {
        Self {
            recognizer,
            settings: settings.sanitized(),
        }
    }

    pub fn settings(&self) -> &ExtractionSettings {
        &self.settings
    }

    pub fn extract_name(&self, text: &str) -> String {
        if let Some(name) = cascade("name", &NAME_RULES, text) {
            return name;
        }

        if let Some(name) = first_line_name(text) {
            tracing::debug!(field = "name", rule = "first_line", value = %name, "field extracted by heuristic");
            return name;
        }

        let window = char_prefix(strip_page_marker(text), self.settings.name_ner_window);
        let name = self
            .recognizer
            .find_entities(window, &[EntityLabel::Person])
            .into_iter()
            .filter(|entity| entity.start < self.settings.name_ner_max_start)
            .map(|entity| entity.text.trim().to_string())
            .find(|candidate| is_valid_name(candidate));

        if let Some(name) = &name {
            tracing::debug!(field = "name", rule = "ner", value = %name, "field extracted by recognizer");
        }
        name.unwrap_or_default()
    }

    pub fn extract_location(&self, text: &str) -> String {
        if text.trim().chars().count() < MIN_LOCATION_TEXT {
            return String::new();
        }

        if let Some(location) = cascade("location", &LOCATION_RULES, text) {
            return location;
        }

        if let Some(location) = self.heading_location(text) {
            tracing::debug!(field = "location", rule = "heading", value = %location, "field extracted by heuristic");
            return location;
        }

        let window = char_prefix(text, self.settings.location_ner_window);
        let location = self
            .recognizer
            .find_entities(window, &[EntityLabel::Gpe, EntityLabel::Loc])
            .into_iter()
            .map(|entity| entity.text.trim().to_string())
            .filter(|candidate| {
                candidate.split_whitespace().count() <= self.settings.max_location_tokens
            })
            .find(|candidate| is_valid_location(candidate));

        if let Some(location) = &location {
            tracing::debug!(field = "location", rule = "ner", value = %location, "field extracted by recognizer");
        }
        location.unwrap_or_default()
    }

    fn heading_location(&self, text: &str) -> Option<String> {
        text.trim()
            .lines()
            .take(self.settings.location_header_lines)
            .map(str::trim)
            .filter(|line| {
                let lower = line.to_lowercase();
                !NON_LOCATION_WORDS.iter().any(|word| lower.contains(word))
            })
            .find(|line| {
                (LOCATION_HEADING_WORD_RE.is_match(line) || LOCATION_HEADING_PAIR_RE.is_match(line))
                    && is_valid_location(line)
            })
            .map(str::to_string)
    }

    /// Label patterns over confusable-cleaned text, then the country named in
    /// the residence, then the residence itself.
    pub fn extract_nationality(&self, text: &str) -> String {
        let cleaned = normalize_for_nationality(text);
        if let Some(nationality) = cascade("nationality", &NATIONALITY_RULES, &cleaned) {
            return nationality;
        }

        let residence = self.extract_location(text);
        if residence.is_empty() {
            return String::new();
        }

        let nationality = lexicon::country_within(&residence)
            .map(str::to_string)
            .unwrap_or(residence);
        tracing::debug!(field = "nationality", rule = "residence", value = %nationality, "field inferred from location");
        nationality
    }
}

fn first_line_name(text: &str) -> Option<String> {
    let first_line = strip_page_heading(text.trim().lines().next()?);
    if first_line.is_empty() {
        return None;
    }

    let words: Vec<&str> = first_line.split_whitespace().collect();
    if is_all_caps(&first_line) {
        if words.len() >= 2 && words.iter().all(|w| is_likely_caps_name_word(w)) {
            let name = title_case(&first_line);
            return is_valid_name(&name).then_some(name);
        }
        return None;
    }

    let lower = first_line.to_lowercase();
    let plausible = (2..=6).contains(&words.len())
        && words.iter().all(|w| is_valid_name_word(w))
        && !FIRST_LINE_CONTACT_HINTS.iter().any(|hint| lower.contains(hint));
    (plausible && is_valid_name(&first_line)).then_some(first_line)
}
