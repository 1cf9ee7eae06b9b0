//! Declarative pattern rules for free-text fact mining.
//!
//! Each rule names the field it feeds, a regex whose first capture group is
//! the value, and a post-filter applied to the trimmed capture. Rules run in
//! table order; every match from every rule of a field contributes.

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;

/// Which fact a rule produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Artist,
    Title,
    Location,
}

/// Filter applied to a trimmed capture before it is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Keep any non-empty capture
    NonEmpty,
    /// Keep when `min < chars < max`
    Length { min: usize, max: usize },
}

impl PostFilter {
    pub fn accepts(&self, value: &str) -> bool {
        let len = value.chars().count();
        match *self {
            PostFilter::NonEmpty => len > 0,
            PostFilter::Length { min, max } => len > min && len < max,
        }
    }
}

/// Two capitalized words, the "First Last" shape.
const NAME: &str = r"([A-Z][a-z]+\s+[A-Z][a-z]+)\b";

const TITLE_LENGTH: PostFilter = PostFilter::Length { min: 3, max: 100 };
const LOCATION_LENGTH: PostFilter = PostFilter::Length { min: 0, max: 150 };

/// The standard rule table: (name, field, pattern, filter).
///
/// `{NAME}` is substituted with the name-shape capture. Keywords are wrapped
/// in `(?i:...)` so they match any case while captures keep their shape.
const STANDARD_TABLE: &[(&str, Field, &str, PostFilter)] = &[
    ("artist_keyword", Field::Artist, r"(?i:\bartist)\s+{NAME}", PostFilter::NonEmpty),
    ("by", Field::Artist, r"(?i:\bby)\s+{NAME}", PostFilter::NonEmpty),
    ("created_by", Field::Artist, r"(?i:\bcreated\s+by)\s+{NAME}", PostFilter::NonEmpty),
    ("painted_by", Field::Artist, r"(?i:\bpainted\s+by)\s+{NAME}", PostFilter::NonEmpty),
    ("quoted", Field::Title, r#"["“]([^"“”]+)["”]"#, TITLE_LENGTH),
    ("titled", Field::Title, r"(?i:\btitled)\s+([A-Z][^.!?]+)", TITLE_LENGTH),
    (
        "called_quoted",
        Field::Title,
        r#"(?i:\b(?:mural|work)\s+called)\s+["“]([^"“”]+)["”]"#,
        TITLE_LENGTH,
    ),
    (
        "called",
        Field::Title,
        r"(?i:\b(?:mural|work)\s+called)\s+([A-Z][^.!?]+)",
        TITLE_LENGTH,
    ),
    (
        "at_place",
        Field::Location,
        r"(?i)\b(?:located\s+at|at|on)\s+([^.]+(?:building|downtown|street|avenue|broadway|riversdale|20th))\b",
        LOCATION_LENGTH,
    ),
    (
        "place_in_city",
        Field::Location,
        r"\b((?:[A-Z0-9][\w'’&.-]*\s+){1,5}(?i:building|downtown|street|avenue|broadway|riversdale))\s+(?i:in|at)\s+(?i:saskatoon)\b",
        LOCATION_LENGTH,
    ),
];

lazy_static! {
    static ref STANDARD_RULES: Arc<RuleSet> = Arc::new(RuleSet::from_table(STANDARD_TABLE).unwrap());
}

/// One compiled extraction rule.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub field: Field,
    pub pattern: Regex,
    pub filter: PostFilter,
}

impl Rule {
    /// Compile a rule. The pattern must have at least one capture group.
    pub fn new(
        name: impl Into<String>,
        field: Field,
        pattern: &str,
        filter: PostFilter,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            name: name.into(),
            field,
            pattern: Regex::new(pattern)?,
            filter,
        })
    }

    /// Trimmed, whitespace-collapsed captures that pass the post-filter.
    pub fn matches(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|value| self.filter.accepts(value))
            .collect()
    }
}

/// An ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The shared, compiled standard rule set.
    pub fn standard() -> Arc<RuleSet> {
        Arc::clone(&STANDARD_RULES)
    }

    /// Compile a `(name, field, pattern, filter)` table.
    pub fn from_table(table: &[(&str, Field, &str, PostFilter)]) -> Result<Self, regex::Error> {
        let rules = table
            .iter()
            .map(|(name, field, pattern, filter)| {
                Rule::new(*name, *field, &pattern.replace("{NAME}", NAME), *filter)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(rules))
    }

    /// Append a rule at the end of the table.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Rules feeding `field`, in table order.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |r| r.field == field)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> Rule {
        RuleSet::standard()
            .rules
            .iter()
            .find(|r| r.name == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_standard_table_compiles() {
        let rules = RuleSet::standard();
        assert_eq!(rules.len(), STANDARD_TABLE.len());
        assert_eq!(rules.for_field(Field::Artist).count(), 4);
        assert_eq!(rules.for_field(Field::Title).count(), 4);
        assert_eq!(rules.for_field(Field::Location).count(), 2);
    }

    #[test]
    fn test_keyword_is_case_insensitive_name_is_not() {
        let by = rule("by");
        assert_eq!(by.matches("BY Jane Smith"), vec!["Jane Smith"]);
        assert!(by.matches("by jane smith").is_empty());
        assert!(by.matches("by JANE SMITH").is_empty());
    }

    #[test]
    fn test_name_must_be_two_words() {
        let by = rule("painted_by");
        assert_eq!(by.matches("painted by Kent Ness and friends"), vec!["Kent Ness"]);
        assert!(by.matches("painted by Kent").is_empty());
    }

    #[test]
    fn test_title_length_filter() {
        let quoted = rule("quoted");
        assert!(quoted.matches(r#"a "Hi" b"#).is_empty());
        assert_eq!(quoted.matches(r#"a "Hello" b"#), vec!["Hello"]);
        let long = format!("\"{}\"", "x".repeat(120));
        assert!(quoted.matches(&long).is_empty());
    }

    #[test]
    fn test_titled_stops_at_sentence_end() {
        let titled = rule("titled");
        assert_eq!(
            titled.matches("A mural titled Northern Lights. It glows!"),
            vec!["Northern Lights"]
        );
    }

    #[test]
    fn test_called_variants() {
        assert_eq!(
            rule("called_quoted").matches(r#"the mural called "Bloom" sits"#),
            vec!["Bloom"]
        );
        assert_eq!(
            rule("called").matches("a work called Prairie Sky."),
            vec!["Prairie Sky"]
        );
    }

    #[test]
    fn test_location_rules() {
        assert_eq!(
            rule("at_place").matches("It was unveiled on 3rd Avenue building in Saskatoon in 2021."),
            vec!["3rd Avenue building"]
        );
        assert_eq!(
            rule("at_place").matches("Located at the corner of 20th"),
            vec!["the corner of 20th"]
        );
        assert_eq!(
            rule("place_in_city").matches("The Broadway Avenue in Saskatoon."),
            vec!["The Broadway Avenue"]
        );
    }

    #[test]
    fn test_custom_rule_set() {
        let mut rules = RuleSet::default();
        rules.push(
            Rule::new("sculptor", Field::Artist, r"(?i:sculptor)\s+(\w+)", PostFilter::NonEmpty)
                .unwrap(),
        );
        assert_eq!(rules.for_field(Field::Artist).count(), 1);
        assert!(Rule::new("bad", Field::Title, "(", PostFilter::NonEmpty).is_err());
    }
}
