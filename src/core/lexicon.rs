//! Read-only word tables shared by the extractors and validators.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Canonical names plus common short forms; see [`country_within`] for matching.
pub const COUNTRIES: &[&str] = &[
    "Afghanistan", "Albania", "Algeria", "Andorra", "Angola", "Argentina",
    "Armenia", "Australia", "Austria", "Azerbaijan", "Bahamas", "Bahrain",
    "Bangladesh", "Barbados", "Belarus", "Belgium", "Belize", "Benin",
    "Bhutan", "Bolivia", "Bosnia and Herzegovina", "Botswana", "Brazil",
    "Brunei", "Bulgaria", "Burkina Faso", "Burundi", "Cambodia", "Cameroon",
    "Canada", "Cape Verde", "Central African Republic", "Chad", "Chile",
    "China", "Colombia", "Comoros", "Congo", "Costa Rica", "Croatia",
    "Cuba", "Cyprus", "Czech Republic", "Denmark", "Djibouti", "Dominica",
    "Dominican Republic", "Ecuador", "Egypt", "El Salvador", "Equatorial Guinea",
    "Eritrea", "Estonia", "Ethiopia", "Fiji", "Finland", "France", "Gabon",
    "Gambia", "Georgia", "Germany", "Ghana", "Greece", "Grenada", "Guatemala",
    "Guinea", "Guinea-Bissau", "Guyana", "Haiti", "Honduras", "Hungary",
    "Iceland", "India", "Indonesia", "Iran", "Iraq", "Ireland", "Israel",
    "Italy", "Jamaica", "Japan", "Jordan", "Kazakhstan", "Kenya", "Kiribati",
    "Kuwait", "Kyrgyzstan", "Laos", "Latvia", "Lebanon", "Lesotho", "Liberia",
    "Libya", "Liechtenstein", "Lithuania", "Luxembourg", "Madagascar",
    "Malawi", "Malaysia", "Maldives", "Mali", "Malta", "Marshall Islands",
    "Mauritania", "Mauritius", "Mexico", "Micronesia", "Moldova", "Monaco",
    "Mongolia", "Montenegro", "Morocco", "Mozambique", "Myanmar", "Namibia",
    "Nauru", "Nepal", "Netherlands", "New Zealand", "Nicaragua", "Niger",
    "Nigeria", "North Korea", "North Macedonia", "Norway", "Oman", "Pakistan",
    "Palau", "Panama", "Papua New Guinea", "Paraguay", "Peru", "Philippines",
    "Poland", "Portugal", "Qatar", "Romania", "Russia", "Rwanda",
    "Saint Kitts and Nevis", "Saint Lucia", "Saint Vincent and the Grenadines",
    "Samoa", "San Marino", "Sao Tome and Principe", "Saudi Arabia", "Senegal",
    "Serbia", "Seychelles", "Sierra Leone", "Singapore", "Slovakia", "Slovenia",
    "Solomon Islands", "Somalia", "South Africa", "South Korea", "South Sudan",
    "Spain", "Sri Lanka", "Sudan", "Suriname", "Sweden", "Switzerland",
    "Syria", "Taiwan", "Tajikistan", "Tanzania", "Thailand", "Timor-Leste",
    "Togo", "Tonga", "Trinidad and Tobago", "Tunisia", "Turkey", "Turkmenistan",
    "Tuvalu", "Uganda", "Ukraine", "United Arab Emirates", "United Kingdom",
    "United States", "Uruguay", "Uzbekistan", "Vanuatu", "Vatican City",
    "Venezuela", "Vietnam", "Yemen", "Zambia", "Zimbabwe",
    "USA", "US", "United States of America", "UK", "Britain", "Great Britain", "ENG", "EGY",
    "UAE", "KSA", "USSR", "Soviet Union", "Czechia", "Macedonia", "Bosnia", "Herzegovina",
    "Trinidad", "Tobago", "ARG", "BRA",
];

static COUNTRY_SET: Lazy<HashSet<String>> =
    Lazy::new(|| COUNTRIES.iter().map(|c| c.to_lowercase()).collect());

static COUNTRIES_LOWER: Lazy<Vec<(&'static str, String)>> =
    Lazy::new(|| COUNTRIES.iter().map(|c| (*c, c.to_lowercase())).collect());

pub fn is_country(value: &str) -> bool {
    COUNTRY_SET.contains(&value.trim().to_lowercase())
}

/// Longest country named inside `value` as whole words, case-insensitively.
/// Equal lengths resolve to the earlier list entry.
pub fn country_within(value: &str) -> Option<&'static str> {
    let lower = value.to_lowercase();
    let mut best: Option<(&'static str, usize)> = None;
    for (original, country) in COUNTRIES_LOWER.iter() {
        let len = country.chars().count();
        if best.is_some_and(|(_, best_len)| best_len >= len) {
            continue;
        }
        if contains_word(&lower, country) {
            best = Some((*original, len));
        }
    }
    best.map(|(original, _)| original)
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn word_set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

/// Tokens that disqualify a name candidate during word-level checks.
pub static NON_NAME_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "page", "date", "birth", "phone", "email", "address", "location",
        "nationality", "experience", "qualification", "education", "mobile",
        "number", "status", "academic", "graduation", "project", "estimate",
        "skills", "technical", "current", "position", "contact", "information",
        "english", "spanish", "french", "german", "italian", "portuguese",
        "arabic", "saudi", "egypt", "giza",
    ])
});

pub static NON_NAME_VALIDATION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "number", "mobile", "phone", "email", "address", "birth", "date",
        "graduation", "project", "estimate", "qualifications", "academic",
        "experience", "skills", "technical", "current", "position", "status",
    ])
});

pub static FALSE_POSITIVE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "mobile number", "phone number", "email address", "date birth",
        "social status", "academic qualifications", "graduation project",
        "graduation year", "graduation estimate", "work experience",
        "current position", "technical skills", "saudi arabia",
        "address line", "contact information",
    ])
});

pub const CV_SECTIONS: &[&str] = &["qualification", "education", "experience", "contact"];

pub const FIRST_LINE_CONTACT_HINTS: &[&str] = &[
    "address", "phone", "email", "mobile", "@", "street", "city", "location",
];

pub const ALL_CAPS_NAME_STOPWORDS: &[&str] = &["page", "date", "phone", "email"];

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "degree", "bachelor", "master", "phd", "diploma", "certificate",
    "administration", "engineering", "science", "arts", "business",
    "management", "technology", "studies", "medicine", "law",
    "university", "college", "institute", "school", "education",
    "qualification", "academic", "graduation", "mba", "bba",
    "translator", "secretary", "analyst", "specialist", "consultant",
    "coordinator", "administrator", "manager", "assistant", "technician",
    "literary", "scientific", "public",
];

pub const EDUCATION_EXCLUSION_WORDS: &[&str] = &[
    "phone", "email", "address", "contact", "mobile", "tel", "fax",
    "years of experience", "work experience", "employment", "salary",
    "date of birth", "nationality", "marital status", "gender",
    "responsibilities", "duties", "skills", "languages", "hobbies",
    "references", "objective", "summary", "profile", "career",
    "designation", "position", "title", "role", "company", "organization",
    "years of", "date of", "joining", "intertek",
];

pub const INSTITUTION_WORDS: &[&str] = &["university", "college", "institute"];

pub const ROLE_EXCLUSION_WORDS: &[&str] = &[
    "phone", "email", "address", "contact", "mobile", "tel", "fax",
    "date of birth", "nationality", "marital status", "gender",
    "years of experience", "salary", "references", "hobbies",
];

pub static NON_LOCATION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    word_set(&[
        "engineer", "developer", "manager", "experience", "years", "switchboard",
        "design", "phone", "email", "mobile", "rtl", "coding", "verilog", "vhdl",
        "synthesis", "implementation", "verification", "testing", "simulation",
        "programming", "development", "analyst", "specialist", "coordinator",
        "skills", "languages", "tools", "education", "project", "diploma",
        "training", "course", "workshop", "internship", "system", "processor",
        "architecture", "digital", "embedded", "software", "hardware",
        "technical", "objective", "github", "linkedin", "summary", "profile",
        "contact", "references", "certifications", "certificates", "hobbies",
        "interests", "about", "curriculum", "vitae", "resume", "personal",
        "work", "employment", "qualifications", "courses", "achievements",
        "projects",
    ])
});

pub const LOCATION_TECHNICAL_INDICATORS: &[&str] = &[
    "experience", "years", "engineer", "developer", "manager",
    "phone", "email", "mobile", "address", "qualification",
    "education", "university", "college", "degree", "skills",
];

pub const NATIONALITY_SUFFIXES: &[&str] = &["ian", "an", "ese", "ish", "i", "e"];

pub static MONTHS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("jan", 1), ("january", 1), ("feb", 2), ("february", 2),
        ("mar", 3), ("march", 3), ("apr", 4), ("april", 4), ("may", 5),
        ("jun", 6), ("june", 6), ("jul", 7), ("july", 7), ("aug", 8),
        ("august", 8), ("sep", 9), ("sept", 9), ("september", 9),
        ("oct", 10), ("october", 10), ("nov", 11), ("november", 11),
        ("dec", 12), ("december", 12),
    ])
});

pub const LANGUAGES: &[&str] = &[
    "arabic", "english", "french", "german", "spanish", "italian", "portuguese",
    "russian", "turkish", "chinese", "mandarin", "japanese", "korean", "hindi",
    "urdu", "persian", "farsi", "dutch", "swedish", "greek", "hebrew",
    "bengali", "malay", "indonesian", "polish", "romanian", "ukrainian",
];

pub const PERSON_TITLES: &[&str] = &["sir", "mr", "mrs", "ms", "dr", "prof", "ing", "eng"];

/// Cities the heuristic recognizer accepts as locations without a country.
pub const KNOWN_CITIES: &[&str] = &[
    "cairo", "giza", "alexandria", "riyadh", "jeddah", "dammam", "dubai",
    "abu dhabi", "doha", "kuwait city", "manama", "muscat", "amman", "beirut",
    "casablanca", "tunis", "algiers", "london", "paris", "berlin", "madrid",
    "rome", "new york", "toronto", "istanbul", "karachi", "lahore", "mumbai",
    "delhi", "bangalore", "singapore",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_lookup_is_case_insensitive() {
        assert!(is_country("egypt"));
        assert!(is_country("  Saudi Arabia "));
        assert!(!is_country("Cairo"));
    }

    #[test]
    fn country_within_finds_named_country() {
        assert_eq!(country_within("Cairo, Egypt"), Some("Egypt"));
        assert_eq!(country_within("Riyadh - Saudi Arabia"), Some("Saudi Arabia"));
        assert_eq!(country_within("Springfield"), None);
    }

    #[test]
    fn country_within_ignores_names_inside_other_words() {
        assert_eq!(country_within("Bucharest, Romania"), Some("Romania"));
        assert_eq!(country_within("Lagos, Nigeria"), Some("Nigeria"));
        assert_eq!(country_within("Mogadishu, Somalia"), Some("Somalia"));
        assert_eq!(country_within("Houston, Texas"), None);
    }

    #[test]
    fn country_within_prefers_the_longest_name() {
        assert_eq!(
            country_within("Boston, United States of America"),
            Some("United States of America")
        );
        assert_eq!(country_within("Bissau, Guinea-Bissau"), Some("Guinea-Bissau"));
        assert_eq!(country_within("Austin, US"), Some("US"));
    }

    #[test]
    fn month_table_covers_abbreviations() {
        assert_eq!(MONTHS.get("sept"), Some(&9));
        assert_eq!(MONTHS.get("may"), Some(&5));
    }
}
