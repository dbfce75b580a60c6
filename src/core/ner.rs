//! Named-entity recognition as an injected capability.
//!
//! Extractors only ever ask "which entities of these labels occur in this
//! window", so any recognizer (a statistical model behind FFI, a remote
//! service, a test stub) can sit behind [`EntityRecognizer`].

use serde::{Deserialize, Serialize};

use super::lexicon::{self, KNOWN_CITIES, PERSON_TITLES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Gpe,
    Loc,
    Org,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
    /// Character offsets into the analysed window.
    pub start: usize,
    pub end: usize,
}

pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<Entity>;

    fn find_entities(&self, window: &str, labels: &[EntityLabel]) -> Vec<Entity> {
        self.recognize(window)
            .into_iter()
            .filter(|entity| labels.contains(&entity.label))
            .collect()
    }
}

/// Recognizer that never finds anything; extraction then relies on patterns alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn recognize(&self, _text: &str) -> Vec<Entity> {
        Vec::new()
    }
}

const ORG_SUFFIXES: &[&str] = &[
    "inc", "corp", "ltd", "llc", "co", "plc", "company", "corporation", "group",
    "bank", "university", "college", "institute", "school", "faculty", "s.a",
];

// "at" is left out: "Engineer at Vodafone" names an employer far more often than a place.
const LOCATION_PREPOSITIONS: &[&str] = &["in", "from", "near"];

const SENTENCE_STARTERS: &[&str] = &[
    "the", "a", "an", "this", "that", "i", "my", "we", "our", "in", "on", "at", "to",
    "for", "from", "by", "with", "and", "but", "or", "if", "contact", "email", "phone",
    "mobile", "name", "address", "page", "curriculum", "resume", "summary", "profile",
];

/// Capitalisation and gazetteer driven recognizer.
///
/// Spans of consecutive capitalised words on a single line become
/// candidates. A span is a location when it names a known country or city
/// or follows "in", "from" or "near"; an organisation when it ends in a company or
/// institution suffix; a person when it follows an honorific or is two to
/// four alphabetic words.
#[derive(Debug, Clone, Default)]
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn classify(previous: Option<&str>, words: &[&str]) -> Option<EntityLabel> {
        let joined = words.join(" ");
        let lower = joined.to_lowercase();
        let last = words
            .last()
            .map(|w| w.to_lowercase().trim_end_matches('.').to_string())
            .unwrap_or_default();

        if lexicon::is_country(&joined) {
            return Some(EntityLabel::Gpe);
        }
        if KNOWN_CITIES.contains(&lower.as_str()) {
            return Some(EntityLabel::Gpe);
        }
        if ORG_SUFFIXES.contains(&last.as_str()) {
            return Some(EntityLabel::Org);
        }

        let previous = previous.map(|p| p.to_lowercase());
        let previous = previous
            .as_deref()
            .map(|p| p.trim_matches(|c: char| !c.is_alphanumeric()));

        if previous.is_some_and(|p| LOCATION_PREPOSITIONS.contains(&p)) {
            return Some(EntityLabel::Loc);
        }
        if previous.is_some_and(|p| PERSON_TITLES.contains(&p)) {
            return Some(EntityLabel::Person);
        }

        let plausible_person = (2..=4).contains(&words.len())
            && words.iter().all(|w| {
                w.chars().count() >= 2 && w.chars().all(|c| c.is_alphabetic() || c == '-' || c == '\'')
            });
        plausible_person.then_some(EntityLabel::Person)
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut line_offset = 0;

        for line in text.split('\n') {
            let words = words_with_offsets(line);
            let mut i = 0;
            while i < words.len() {
                let bare = words[i]
                    .0
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_lowercase();
                if !starts_capitalized(words[i].0)
                    || SENTENCE_STARTERS.contains(&bare.as_str())
                    || PERSON_TITLES.contains(&bare.as_str())
                {
                    i += 1;
                    continue;
                }

                let start_idx = i;
                while i < words.len() && starts_capitalized(words[i].0) {
                    let ends_clause = words[i].0.ends_with([',', ';', ':', '|', ')']);
                    i += 1;
                    if ends_clause {
                        break;
                    }
                }

                let span: Vec<&str> = words[start_idx..i]
                    .iter()
                    .map(|(w, _, _)| w.trim_matches(|c: char| !c.is_alphanumeric() && c != '.'))
                    .filter(|w| !w.is_empty())
                    .collect();
                if span.is_empty() {
                    continue;
                }

                let previous = start_idx.checked_sub(1).map(|p| words[p].0);
                if let Some(label) = Self::classify(previous, &span) {
                    entities.push(Entity {
                        text: span.join(" ").trim_end_matches('.').to_string(),
                        label,
                        start: line_offset + words[start_idx].1,
                        end: line_offset + words[i - 1].2,
                    });
                }
            }
            line_offset += line.chars().count() + 1;
        }

        entities
    }
}

fn starts_capitalized(word: &str) -> bool {
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
        .chars()
        .next()
        .is_some_and(char::is_uppercase)
}

/// Whitespace-separated words with their char start/end offsets in `line`.
fn words_with_offsets(line: &str) -> Vec<(&str, usize, usize)> {
    let mut words = Vec::new();
    let mut start: Option<(usize, usize)> = None;
    let mut char_pos = 0;

    for (byte_idx, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some((byte_start, char_start)) = start.take() {
                words.push((&line[byte_start..byte_idx], char_start, char_pos));
            }
        } else if start.is_none() {
            start = Some((byte_idx, char_pos));
        }
        char_pos += 1;
    }
    if let Some((byte_start, char_start)) = start {
        words.push((&line[byte_start..], char_start, char_pos));
    }

    words
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Returns canned entities, located by substring search in the window.
    pub struct StubRecognizer {
        pub entities: Vec<(&'static str, EntityLabel)>,
    }

    impl EntityRecognizer for StubRecognizer {
        fn recognize(&self, text: &str) -> Vec<Entity> {
            let mut found: Vec<Entity> = self
                .entities
                .iter()
                .filter_map(|(needle, label)| {
                    let byte_idx = text.find(needle)?;
                    let start = text[..byte_idx].chars().count();
                    Some(Entity {
                        text: needle.to_string(),
                        label: *label,
                        start,
                        end: start + needle.chars().count(),
                    })
                })
                .collect();
            found.sort_by_key(|entity| entity.start);
            found
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(entities: &[Entity]) -> Vec<(&str, EntityLabel)> {
        entities.iter().map(|e| (e.text.as_str(), e.label)).collect()
    }

    #[test]
    fn noop_recognizer_finds_nothing() {
        assert!(NoopRecognizer.recognize("John Smith lives in Cairo").is_empty());
    }

    #[test]
    fn heuristic_finds_people_and_places() {
        let entities = HeuristicRecognizer::new().recognize("John Smith lives in Cairo, Egypt");
        let found = labelled(&entities);
        assert!(found.contains(&("John Smith", EntityLabel::Person)));
        assert!(found.contains(&("Cairo", EntityLabel::Gpe)));
        assert!(found.contains(&("Egypt", EntityLabel::Gpe)));
    }

    #[test]
    fn heuristic_uses_prepositions_titles_and_suffixes() {
        let entities =
            HeuristicRecognizer::new().recognize("Dr. Layla Hassan\nBased in Springfield\nAcme Ltd");
        let found = labelled(&entities);
        assert!(found.contains(&("Layla Hassan", EntityLabel::Person)));
        assert!(found.contains(&("Springfield", EntityLabel::Loc)));
        assert!(found.contains(&("Acme Ltd", EntityLabel::Org)));
    }

    #[test]
    fn employer_after_at_is_not_a_place() {
        let recognizer = HeuristicRecognizer::new();
        for text in [
            "Software Engineer at Vodafone since 2019",
            "Senior accountant working at Deloitte",
        ] {
            let places = recognizer.find_entities(text, &[EntityLabel::Gpe, EntityLabel::Loc]);
            assert!(places.is_empty(), "{text}: {places:?}");
        }

        let places =
            recognizer.find_entities("Consultant at Dubai", &[EntityLabel::Gpe, EntityLabel::Loc]);
        assert_eq!(labelled(&places), vec![("Dubai", EntityLabel::Gpe)]);
    }

    #[test]
    fn offsets_are_character_positions_across_lines() {
        let text = "Résumé\nMaria Lopez";
        let entities = HeuristicRecognizer::new().find_entities(text, &[EntityLabel::Person]);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "Maria Lopez");
        assert_eq!(entities[0].start, 7);
        assert_eq!(entities[0].end, 18);
    }

    #[test]
    fn find_entities_filters_labels() {
        let recognizer = HeuristicRecognizer::new();
        let places = recognizer.find_entities(
            "John Smith lives in Cairo",
            &[EntityLabel::Gpe, EntityLabel::Loc],
        );
        assert_eq!(labelled(&places), vec![("Cairo", EntityLabel::Gpe)]);
    }
}
