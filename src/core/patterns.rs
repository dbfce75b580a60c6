//! Ordered pattern rules for every extracted field.
//!
//! A [`PatternRule`] pairs a matcher with the normalisation applied to each
//! raw capture and the validator that must accept it. Tables are evaluated in
//! declaration order and, inside a rule, in match order; the first candidate
//! that survives normalisation and validation wins.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::lexicon::INSTITUTION_WORDS;
use super::text::{collapse_whitespace, strip_page_marker};
use super::validators::{
    is_valid_age, is_valid_education, is_valid_email, is_valid_location, is_valid_name,
    is_valid_nationality, is_valid_phone, is_valid_role,
};

/// How a regex match turns into a candidate string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// A single group; matches where it did not participate are skipped.
    Group(usize),
    /// Every participating group whose trimmed text has at least `min_len`
    /// characters, joined with `separator`.
    Joined {
        separator: &'static str,
        min_len: usize,
    },
}

pub type ScanFn = fn(&str) -> Vec<String>;

pub enum Matcher {
    Regex { regex: Regex, capture: Capture },
    /// Layouts a finite-automaton regex cannot express on its own.
    Scan(ScanFn),
}

pub struct PatternRule {
    pub name: &'static str,
    matcher: Matcher,
    normalize: fn(&str) -> String,
    validate: fn(&str) -> bool,
}

impl PatternRule {
    /// Panics if `pattern` does not compile; tables are built from literals.
    pub fn regex(name: &'static str, pattern: &str, capture: Capture) -> Self {
        Self {
            name,
            matcher: Matcher::Regex {
                regex: Regex::new(pattern).unwrap(),
                capture,
            },
            normalize: collapse_whitespace,
            validate: |value| !value.is_empty(),
        }
    }

    pub fn scan(name: &'static str, scan: ScanFn) -> Self {
        Self {
            name,
            matcher: Matcher::Scan(scan),
            normalize: collapse_whitespace,
            validate: |value| !value.is_empty(),
        }
    }

    pub fn normalized_with(mut self, normalize: fn(&str) -> String) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn validated_by(mut self, validate: fn(&str) -> bool) -> Self {
        self.validate = validate;
        self
    }

    /// Raw captures in match order, before normalisation.
    pub fn candidates(&self, text: &str) -> Vec<String> {
        match &self.matcher {
            Matcher::Regex { regex, capture } => regex
                .captures_iter(text)
                .filter_map(|captures| capture_value(&captures, *capture))
                .collect(),
            Matcher::Scan(scan) => scan(text),
        }
    }

    pub fn first_valid(&self, text: &str) -> Option<String> {
        self.candidates(text)
            .iter()
            .map(|raw| (self.normalize)(raw))
            .find(|value| !value.is_empty() && (self.validate)(value))
    }
}

fn capture_value(captures: &Captures<'_>, capture: Capture) -> Option<String> {
    match capture {
        Capture::Group(index) => captures.get(index).map(|m| m.as_str().to_string()),
        Capture::Joined { separator, min_len } => {
            let parts: Vec<&str> = captures
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().trim())
                .filter(|part| part.chars().count() >= min_len)
                .collect();
            (!parts.is_empty()).then(|| parts.join(separator))
        }
    }
}

/// Runs `rules` in order and returns the winning rule's name with its value.
pub fn first_valid(rules: &[PatternRule], text: &str) -> Option<(&'static str, String)> {
    rules
        .iter()
        .find_map(|rule| rule.first_valid(text).map(|value| (rule.name, value)))
}

const GROUP_1: Capture = Capture::Group(1);

const JOINED_COMMA: Capture = Capture::Joined {
    separator: ", ",
    min_len: 3,
};

const JOINED_SPACE: Capture = Capture::Joined {
    separator: " ",
    min_len: 1,
};

const JOINED_DATE: Capture = Capture::Joined {
    separator: "/",
    min_len: 1,
};

const TRAILING_PUNCT: &[char] = &['.', ',', ';', ':', '-', '|'];

pub fn clean_name(value: &str) -> String {
    collapse_whitespace(strip_page_marker(value.trim()))
}

pub fn clean_location(value: &str) -> String {
    collapse_whitespace(value)
        .trim_end_matches(TRAILING_PUNCT)
        .trim_end()
        .to_string()
}

/// Cuts the capture at a column gap so table layouts do not bleed the next cell in.
pub fn clean_nationality(value: &str) -> String {
    let trimmed = value.trim_start();
    let end = [trimmed.find("  "), trimmed.find('\t')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(trimmed.len());
    collapse_whitespace(&trimmed[..end])
}

/// `title, institution (university)` becomes `title, institution`.
pub fn clean_education(value: &str) -> String {
    let mut education = value.trim().to_string();
    let lower = education.to_lowercase();
    if education.contains('(') && INSTITUTION_WORDS.iter().any(|w| lower.contains(w)) {
        let parts: Vec<&str> = education.split(',').collect();
        if let [first, .., last] = parts.as_slice() {
            if let Some((institution, _)) = last.trim().split_once('(') {
                education = format!("{}, {}", first.trim(), institution.trim());
            }
        }
    }

    collapse_whitespace(&education)
        .trim_matches(|c: char| TRAILING_PUNCT.contains(&c))
        .trim()
        .to_string()
}

fn clean_degree_subject(value: &str) -> String {
    clean_education(&format!("degree {}", value.trim()))
}

pub fn clean_role(value: &str) -> String {
    collapse_whitespace(value)
        .trim_matches(|c: char| TRAILING_PUNCT.contains(&c) || c == '•' || c == '*')
        .trim()
        .to_string()
}

fn is_age_literal(value: &str) -> bool {
    value
        .trim()
        .parse::<i64>()
        .map(is_valid_age)
        .unwrap_or(false)
}

pub static NAME_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let rules = vec![
        PatternRule::regex(
            "name_of_person",
            r"(?m)(?i:name\s+of\s+person)\s*[:\-]?\s*([A-Z][A-Za-z]+(?:[ \t]+[A-Z][A-Za-z]+)*)[ \t]*$",
            GROUP_1,
        ),
        PatternRule::regex(
            "labeled_name",
            r"(?m)^[ \t]*(?i:full[ \t]*name|name[ \t]+of[ \t]+person|complete[ \t]*name|name)[ \t:\-]*([A-Z][A-Za-z]+(?:[ \t]+[A-Z][A-Za-z]+)*)[ \t]*(?:\.|$)",
            GROUP_1,
        ),
        PatternRule::regex(
            "label_block",
            r"(?:(?:الا|اال)س\x{0640}*م|(?i:name))[ \t]*\r?\n(?:[^\n]*\n){1,3}?[ \t]*([A-ZÀ-Þ][a-zß-ÿ]+(?:[ \t]+[A-ZÀ-Þ][a-zß-ÿ]+){1,5})",
            GROUP_1,
        ),
        PatternRule::regex(
            "bilingual_label",
            r"(?:الا|اال)س\x{0640}*م\s*[\r\n]+\s*(?i:name)\s*[\r\n]+\s*[^\r\n]*[\x{0600}-\x{06FF}][^\r\n]*[\r\n]+\s*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)+)",
            GROUP_1,
        ),
        PatternRule::regex(
            "table_label_line",
            r"(?i:name)\s*[\r\n]+(?:[^\r\n]*[\x{0600}-\x{06FF}][^\r\n]*[\r\n]+)?\s*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,4})",
            GROUP_1,
        ),
        PatternRule::regex(
            "table_colon",
            r"(?i:full\s+name|name)\s*[:|]\s*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,4})",
            GROUP_1,
        ),
        PatternRule::regex(
            "table_pipe",
            r"\|\s*(?i:full\s+name|name)\s*\|\s*([A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+){1,4})\s*\|",
            GROUP_1,
        ),
    ];

    rules
        .into_iter()
        .map(|rule| rule.normalized_with(clean_name).validated_by(is_valid_name))
        .collect()
});

pub static EMAIL_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let rules = vec![
        PatternRule::regex(
            "mailto",
            r"mailto:\s*([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})",
            GROUP_1,
        ),
        PatternRule::regex(
            "href_mailto",
            r#"href=["']mailto:([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})["']"#,
            GROUP_1,
        ),
        PatternRule::regex(
            "email_keyword",
            r#"(?i:email|e-mail|mail)[\s:]*.*?(?:href=["'])?(?:mailto:)?([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})"#,
            GROUP_1,
        ),
        PatternRule::regex(
            "address_shape",
            r"\b([A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,})\b",
            GROUP_1,
        ),
    ];

    rules
        .into_iter()
        .map(|rule| rule.validated_by(is_valid_email))
        .collect()
});

pub static PHONE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let rules = vec![
        PatternRule::regex(
            "phone_keyword",
            r"(?i:phone|mobile|tel|cell|whatsapp)[^\d+\n]{0,20}(\+?\d[\d \-().]{4,17}\d)",
            GROUP_1,
        ),
        PatternRule::regex("digit_run", r"(\+?[1-9]?[0-9]{7,14})", GROUP_1),
    ];

    rules
        .into_iter()
        .map(|rule| rule.normalized_with(|v| v.trim().to_string()).validated_by(is_valid_phone))
        .collect()
});

pub static DIRECT_AGE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::regex(
            "age_label",
            r"(?i)\b(?:age|years old|yr old)\s*:?\s*(\d{1,2})\b",
            GROUP_1,
        )
        .validated_by(is_age_literal),
        PatternRule::regex(
            "years_old",
            r"(?i)\b(\d{1,2})\s*(?:years?|yrs?)\s+old\b",
            GROUP_1,
        )
        .validated_by(is_age_literal),
    ]
});

const BIRTH_LABEL: &str = r"(?:born|birth|dob|d\.\s*o\.\s*b|d\.\s*of\s*birth|date\s*of\s*birth|birth\s*date)";

/// Date fragments joined with `/`; resolution happens in the date module.
pub static BIRTH_DATE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    vec![
        PatternRule::regex(
            "birth_day_month_year",
            &format!(r"(?i)\b{BIRTH_LABEL}\s*:?\s*(\d{{1,2}})\s*[/\-.]\s*(\d{{1,2}})\s*[/\-.]\s*(\d{{4}}|\d{{2}})\b"),
            JOINED_DATE,
        ),
        PatternRule::regex(
            "birth_iso",
            &format!(r"(?i)\b{BIRTH_LABEL}\s*:?\s*(\d{{4}})-(\d{{1,2}})-(\d{{1,2}})\b"),
            JOINED_DATE,
        ),
        PatternRule::regex(
            "birth_worded_day_first",
            &format!(r"(?i)\b{BIRTH_LABEL}\s*:?\s*(\d{{1,2}})(?:st|nd|rd|th)?[\s\-]+([a-z]{{3,9}})\.?,?[\s\-]+(\d{{4}})\b"),
            JOINED_DATE,
        ),
        PatternRule::regex(
            "birth_worded_month_first",
            &format!(r"(?i)\b{BIRTH_LABEL}\s*:?\s*([a-z]{{3,9}})\.?\s+(\d{{1,2}}),?\s+(\d{{4}})\b"),
            JOINED_DATE,
        ),
        PatternRule::regex(
            "birth_year",
            &format!(r"(?i)\b{BIRTH_LABEL}\s*:?\s*(\d{{4}})\b"),
            JOINED_DATE,
        ),
        PatternRule::regex(
            "birth_month_year",
            &format!(r"(?i)\b{BIRTH_LABEL}\s*:?\s*(\d{{1,2}})\s*[/\-]\s*(\d{{4}}|\d{{2}})\b"),
            JOINED_DATE,
        ),
        PatternRule::regex(
            "bare_day_month_year",
            r"\b(\d{1,2})\s*[/\-]\s*(\d{1,2})\s*[/\-]\s*(\d{4})\b",
            JOINED_DATE,
        ),
        PatternRule::regex("bare_iso", r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b", JOINED_DATE),
        PatternRule::regex("bare_month_year", r"\b(\d{1,2})[/\-](\d{2})\b", JOINED_DATE),
    ]
});

pub static LOCATION_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let rules = vec![
        PatternRule::regex(
            "location_label",
            r"(?i)(?:location|address|city|residence):[ \t]*([^,\n]+(?:,[ \t]*[^,\n]+){0,2})",
            GROUP_1,
        ),
        PatternRule::regex(
            "current_location_label",
            r"(?i)current[ \t]+(?:location|address|residence):[ \t]*([^,\n]+(?:,[ \t]*[^,\n]+){0,2})",
            GROUP_1,
        ),
        PatternRule::regex(
            "loose_location_label",
            r"(?i)(?:location|address|current[ \t]+address|residence)[ \t]*:?[ \t]*([A-Za-z][A-Za-z \t,]*)",
            GROUP_1,
        ),
        PatternRule::regex(
            "based_in",
            r"(?i)(?:based|located)[ \t]+in[ \t]*:?[ \t]*([A-Za-z][A-Za-z \t,]*)",
            GROUP_1,
        ),
        PatternRule::regex(
            "from_place",
            r"(?im)\bfrom[ \t]+([A-Za-z][A-Za-z \t]*(?:,[ \t]*[A-Za-z][A-Za-z \t]*)?)(?:[ \t]*[,.]|[ \t]*$)",
            GROUP_1,
        ),
        PatternRule::regex(
            "city_dash_country",
            r"(?m)\b([A-Z][a-zA-Z]+[ \t]*[-–][ \t]*[A-Z][a-zA-Z]+)\b(?:[ \t]*\||[ \t]*$)",
            GROUP_1,
        ),
    ];

    rules
        .into_iter()
        .map(|rule| rule.normalized_with(clean_location).validated_by(is_valid_location))
        .collect()
});

pub static LOCATION_HEADING_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z]{3,14}$").unwrap());
pub static LOCATION_HEADING_PAIR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z \t]+[,\-][ \t]*[A-Z][a-zA-Z \t]+$").unwrap());

const NATIONALITY_VALUE: &str = r"[:\s]+([A-Za-z][A-Za-z \t]*)";

/// Applied to text that already went through the nationality confusable pass,
/// so corrupted label spellings collapse to a handful of shapes.
pub static NATIONALITY_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let labels = [
        ("nationality", r"nationality"),
        ("citizenship", r"citizen(?:ship)?"),
        ("national", r"national"),
        ("country_of_citizenship", r"country of citizenship"),
        ("passport", r"passport"),
        ("spaced_nationality", r"nat[ \t]?ionality"),
        ("swapped_i_l", r"nat[il]onal[il]ty"),
        ("dropped_i", r"nat.{0,2}onalit.{0,2}"),
        ("dropped_t", r"na.{0,2}ionalit.{0,2}"),
        ("skeleton", r"n[a-z]{1,3}t[a-z]{0,2}onal[a-z]{0,2}t[a-z]{0,2}y"),
        ("loose_skeleton", r"\bn[a-z]{8,12}y"),
    ];

    labels
        .into_iter()
        .map(|(name, label)| {
            PatternRule::regex(name, &format!("(?i){label}{NATIONALITY_VALUE}"), GROUP_1)
                .normalized_with(clean_nationality)
                .validated_by(is_valid_nationality)
        })
        .collect()
});

const SUBJECTS: &str =
    "administration|engineering|science|arts|business|management|technology|studies|medicine|law";

const PROFESSIONS: &str = "translator|teacher|analyst|specialist|consultant|coordinator|administrator|manager|secretary|assistant|technician|engineer|scientist|researcher|professor|instructor|designer|developer|programmer|architect|planner|advisor|auditor|inspector|supervisor|director|officer|representative|accountant|economist|lawyer|attorney|therapist|counselor|physician|doctor|nurse|pharmacist|veterinarian";

const EDUCATION_SECTION_STOPS: &[&str] = &[
    "experience", "work", "employment", "skills", "certifications", "years of", "date of",
    "designation",
];

static EDUCATION_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*e[ \t]*d[ \t]*u[ \t]*c[ \t]*a[ \t]*t[ \t]*i[ \t]*o[ \t]*n\b[ \t]*:?[ \t]*(.*)$")
        .unwrap()
});

static DEGREE_FIELD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[ \t]*(degree|grade|university|year)[ \t]*:?[ \t]*([^\n:]+)$").unwrap()
});

/// Lines of an `Education` (or spaced `E D U C A T I O N`) section, up to the
/// next blank line or a line opening another section.
fn education_section_lines(text: &str) -> Vec<String> {
    let Some(heading) = EDUCATION_HEADING_RE.captures(text) else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    if let Some(rest) = heading.get(1).map(|m| m.as_str().trim()) {
        if !rest.is_empty() {
            lines.push(rest.to_string());
        }
    }

    let after = heading.get(0).map(|m| m.end()).unwrap_or(text.len());
    for line in text[after..].lines().skip(1) {
        let trimmed = line.trim();
        if trimmed.is_empty() && !lines.is_empty() {
            break;
        }
        let lower = trimmed.to_lowercase();
        if EDUCATION_SECTION_STOPS.iter().any(|stop| lower.starts_with(stop)) {
            break;
        }
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines
}

/// `degree:` / `grade:` / `university:` / `year:` lines in a run of at least
/// four; yields `degree, university`.
fn labelled_degree_block(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut run: Vec<(String, String)> = Vec::new();

    let mut flush = |run: &mut Vec<(String, String)>| {
        if run.len() >= 4 {
            let field = |key: &str| {
                run.iter()
                    .find(|(label, _)| label == key)
                    .map(|(_, value)| value.trim().to_string())
            };
            let parts: Vec<String> = [field("degree"), field("university")]
                .into_iter()
                .flatten()
                .filter(|value| !value.is_empty())
                .collect();
            if !parts.is_empty() {
                found.push(parts.join(", "));
            }
        }
        run.clear();
    };

    for line in text.lines() {
        match DEGREE_FIELD_RE.captures(line) {
            Some(captures) => {
                let label = captures[1].to_lowercase();
                run.push((label, captures[2].to_string()));
            }
            None => flush(&mut run),
        }
    }
    flush(&mut run);

    found
}

/// Evaluated over lower-cased text; winners are title-cased by the extractor.
pub static EDUCATION_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let edu = |name: &'static str, pattern: &str, capture: Capture| {
        PatternRule::regex(name, pattern, capture).normalized_with(clean_education)
    };
    let edu_scan =
        |name: &'static str, scan: ScanFn| PatternRule::scan(name, scan).normalized_with(clean_education);

    let rules = vec![
        edu_scan("education_section", education_section_lines),
        edu(
            "academic_qualifications",
            &format!(r"(?i)academic\s+qualifications?\s*[:\n]\s*([a-z][a-z \t&]+(?:{SUBJECTS}|diploma|certificate|degree))"),
            GROUP_1,
        ),
        edu(
            "bs_in_with_year",
            r"(?i)\bbs\s+in\s+([^(\n]+)\s*\([^)]*\d{4}[^)]*\)\s*,?\s*([^,\n]+)",
            JOINED_COMMA,
        ),
        edu(
            "degree_then_institution",
            r"(?i)\b(?:bachelor|master|bs|ms|ba|ma|phd)\s+(?:in|of)\s+([^,\n]+(?:science|technology|engineering|arts|administration|studies))[^,\n]*,?\s*([^,\n]+(?:university|college|institute))",
            JOINED_COMMA,
        ),
        edu(
            "subject_then_institution",
            r"(?i)([a-z]+\s+(?:in|of)\s+[^,\n]+(?:science|technology|engineering|arts|studies))[^,\n]*,?\s*([^,\n]+(?:university|college|institute))",
            JOINED_COMMA,
        ),
        edu(
            "institution_then_degree",
            r"(?i)([^,\n]+(?:university|college|institute))[^,\n]*\b(?:bs|ms|bachelor|master|degree)\s+(?:in|of)\s+([^,\n]+)",
            JOINED_COMMA,
        ),
        edu(
            "qualifications_table",
            r"(?i)(?:academic\s+qualifications?|المؤهالت\s+العلمية)[^:\n]*:?\s*([^,\n]+(?:bs|ms|bachelor|master|degree|science|technology|engineering))[^,\n]*([^,\n]+(?:university|college|institute))?",
            JOINED_COMMA,
        ),
        edu(
            "education_with_year",
            r"(?is)education\s*[:\n]\s*(.*?(?:university|college|institute).*?\d{4}[^\n]*)",
            GROUP_1,
        ),
        edu(
            "specialization",
            r"(?i)\b(bs|ms|bachelor|master|degree)\s+(?:in|of)?\s*([^,\n]+(?:science|technology|engineering|arts))[^,\n]*(?:تخصص|specialization)",
            JOINED_COMMA,
        ),
        edu(
            "degree_abbreviation",
            r"(?im)\b(bs|ms|ba|ma|phd|bachelor|master)\s+(?:in\s+|of\s+)?([^\n.]+?)(?:\.\s|[ ]{2,}|\.?[ \t]*$)",
            JOINED_COMMA,
        ),
        edu(
            "profession_at_institution",
            &format!(r"(?i)([a-z][a-z \t&,]+(?:{PROFESSIONS})(?:[, \t]+[a-z][a-z \t&,]*)?[, \t]+(?:[a-z]{{2,}}|[a-z \t]+)[ \t]*\((?:university|college|institute|school)\))"),
            GROUP_1,
        ),
        edu(
            "degree_subject",
            &format!(r"(?i)\bdegree\s+([a-z][a-z \t&]+(?:{SUBJECTS}))"),
            GROUP_1,
        )
        .normalized_with(clean_degree_subject),
        edu_scan("labelled_degree_block", labelled_degree_block),
        edu(
            "profession",
            &format!(r"(?i)([a-z][a-z \t&,]+(?:{PROFESSIONS})(?:[, \t]+[a-z \t&,]+)?(?:[, \t]+[a-z][a-z \t&]*)?)"),
            GROUP_1,
        ),
        edu(
            "degree_colon",
            &format!(r"(?i)\bdegree[ \t]*[:\-][ \t]*([a-z][a-z \t&]+(?:{SUBJECTS}))"),
            GROUP_1,
        ),
        edu(
            "degree_word",
            &format!(r"(?i)\b(?:bachelor|master|phd|diploma|certificate)s?\s+(?:of\s+|in\s+)?([a-z][a-z \t&]+(?:{SUBJECTS}))"),
            GROUP_1,
        ),
        edu(
            "degree_abbreviation_subject",
            &format!(r"(?i)\b(?:b\.?sc|m\.?sc|b\.?eng|m\.?eng|b\.?a|m\.?a|phd|dvm|d\.?v\.?m)\.?\s+(?:in\s+)?([a-z][a-z \t&]+(?:{SUBJECTS}))"),
            GROUP_1,
        ),
        edu(
            "faculty_of",
            &format!(r"(?i)\b(?:university|college|institute|faculty)\s+of\s+([a-z][a-z \t&]+(?:{SUBJECTS}))"),
            GROUP_1,
        ),
        edu(
            "qualifications_label",
            &format!(r"(?i)qualifications?\s*[:\n]\s*([a-z][a-z \t&]+(?:{SUBJECTS}|diploma|certificate|degree))"),
            GROUP_1,
        ),
        edu(
            "subject_with_year",
            &format!(r"(?i)([a-z][a-z \t&]+(?:{SUBJECTS}))\s+[-–]\s*\d{{4}}"),
            GROUP_1,
        ),
        edu(
            "degree_two_words",
            &format!(r"(?i)\bdegree\s+(?:in\s+)?([a-z]+[ \t]+[a-z]+(?:[ \t]+(?:{SUBJECTS}))?)"),
            GROUP_1,
        )
        .normalized_with(clean_degree_subject),
        edu("generic_degree", r"(?i)([a-z][a-z \t&]+[ \t]+degree)\b", GROUP_1),
    ];

    rules
        .into_iter()
        .map(|rule| rule.validated_by(is_valid_education))
        .collect()
});

const ROLE_TITLES: &str = "Engineer|Developer|Manager|Analyst|Designer|Consultant|Director|Specialist|Coordinator|Administrator|Executive|Officer|Representative|Supervisor|Chief|Chemist|Quality|Auditor|Translator|Secretary";

const LEADING_ROLE_TITLES: &str = "Engineer|Developer|Manager|Analyst|Designer|Consultant|Director|Coordinator|Administrator|Executive|Officer|Representative|Supervisor|Chief|Chemist";

static LEADING_ROLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?im)^[ \t]*([A-Z][A-Za-z \t&]+(?:{LEADING_ROLE_TITLES}))[ \t]*,"
    ))
    .unwrap()
});

/// `Title, Employer` lines whose employer is not an academic institution.
fn role_before_employer(text: &str) -> Vec<String> {
    LEADING_ROLE_RE
        .captures_iter(text)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let employer = text[whole.end()..].split(',').next().unwrap_or_default();
            let employer = employer.to_lowercase();
            let academic = ["university", "college", "institute", "school", "faculty"]
                .iter()
                .any(|word| employer.contains(word));
            (!academic).then(|| captures[1].to_string())
        })
        .collect()
}

pub static ROLE_RULES: Lazy<Vec<PatternRule>> = Lazy::new(|| {
    let rules = vec![
        PatternRule::regex(
            "current_position_until_now",
            r"(?im)(?:الوظيفة الحالية|current\s+position)\s+(.*?)(?:في الفترة من|from\s+\d).*?(?:حتى االن|until now|present)",
            GROUP_1,
        ),
        PatternRule::regex(
            "current_position_period",
            r"(?im)(?:الوظيفة الحالية|current\s+position)\s+(.*?)(?:في الفترة من|period from)\s*(?:(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+)?\d{1,2}[/\-]?\d{1,2}[/\-]?\d{4}\s*(?:to|until|حتى|-|–)\s*(?:present|now|currently|until now|االن|الآن|current|ongoing)",
            GROUP_1,
        ),
        PatternRule::regex(
            "current_position_block",
            r"(?im)(?:\ncurrent\s*\nposition|الوظيفة الحالية)\s*(.*?)(?:until now|حتى االن)",
            GROUP_1,
        ),
        PatternRule::regex(
            "current_role_label",
            r"(?im)current\s+(?:position|role|job|title)\s*:?\s*([^\n\r]+)",
            GROUP_1,
        ),
        PatternRule::regex(
            "currently_working_as",
            r"(?im)(?:currently|presently)\s+(?:working\s+as|employed\s+as|serving\s+as)\s+(?:a\s+|an\s+)?([^\n\r]+)",
            GROUP_1,
        ),
        PatternRule::regex(
            "company_then_role",
            r"(?im)[\s:,]{2,}([^,\n:]+)[\s:,]+from[\s:,]+[^,\n:]+[\s:,]+to[\s:,]+(?:present|now|current)[ \t:,]*\n[ \t:,]*([A-Za-z][A-Za-z \t&:,]+)",
            JOINED_SPACE,
        ),
        PatternRule::regex(
            "role_after_company_suffix",
            r"(?im)(?:[A-Z][a-zA-Z \t&]+(?:S\.A\.|Inc\.|Ltd\.|LLC|Corp)\.?)[ \t]*\n([A-Z][a-zA-Z \t/&-]+(?:Manager|Director|Coordinator|Specialist|Analyst|Assistant|Quality|Responsible|Lead)[^\n]*)",
            GROUP_1,
        ),
        PatternRule::regex(
            "experience_section_current",
            &format!(r"(?im)(?:work\s+experience|experience|الخبرة)[ \t]*\n\s*(?:[•\-\*][ \t]*)?([A-Z][A-Za-z \t&]+(?:{ROLE_TITLES}|Technician))[ \t]*\n[^(]*\(.*?(?:present|now|current|ongoing)"),
            GROUP_1,
        ),
        PatternRule::regex(
            "experience_section",
            &format!(r"(?im)(?:work\s+experience|experience)[ \t]*\n\s*(?:[•\-\*][ \t]*)?([A-Z][A-Za-z \t&]+(?:{ROLE_TITLES}|Technician))"),
            GROUP_1,
        ),
        PatternRule::regex(
            "experience_second_line",
            r"(?im)experience[ \t]*\n[^\n]*\n(?:[•\-\*][ \t]*)?([A-Z][a-zA-Z \t/&-]+(?:Quality\s+Assurance|Responsible|Manager|Director|Coordinator)[^\n]*)",
            GROUP_1,
        ),
        PatternRule::regex(
            "paragraph_from_month_to_present",
            r"(?im)\n\s*\n\s*(.*?)from\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4}\s+to\s+(?:present|now|currently working here)",
            GROUP_1,
        ),
        PatternRule::regex(
            "title_until_present",
            &format!(r"(?im)([A-Z][A-Za-z \t&]+(?:{ROLE_TITLES})).*?(?:to\s+)?\b(?:present|now|current)\b"),
            GROUP_1,
        ),
        PatternRule::regex(
            "title_before_responsibilities",
            r"(?im)([A-Z][A-Za-z \t&]+(?:Quality|Management|Coordinator|Auditor|Translator|Secretary))\s*\n\s*responsibilit",
            GROUP_1,
        ),
        PatternRule::regex(
            "designation_manager",
            r"(?im)(?:designation|position|title)\s*:?\s*(general\s+manager|manager)",
            GROUP_1,
        ),
        PatternRule::regex(
            "named_manager",
            r"(?i)(general\s+manager|operations\s+manager|business\s+manager)",
            GROUP_1,
        ),
        PatternRule::scan("role_before_employer", role_before_employer),
        PatternRule::regex(
            "dash_role_at_organisation",
            r"(?i)-\s*([A-Za-z \t]{3,30})\s*,\s*[A-Za-z \t]+(?:School|Company|Corporation|Ltd|Inc|University|Institute)",
            GROUP_1,
        ),
    ];

    rules
        .into_iter()
        .map(|rule| rule.normalized_with(clean_role).validated_by(is_valid_role))
        .collect()
});
