//! Curriculum axes: proficiency levels and grammar topics.
//!
//! A learner's position is a point in the `LEVEL_ORDER × TOPIC_ORDER` lattice.
//! Every level walks the same topic sequence.

use serde::{Deserialize, Serialize};

/// Levels in curriculum order. Lower index = earlier.
pub const LEVEL_ORDER: [Level; 5] = [Level::A1, Level::A2, Level::B1, Level::B2, Level::C1];

/// Topics in the order they are worked through within every level.
pub const TOPIC_ORDER: [Topic; 6] = [
    Topic::Satzbau,
    Topic::Verben,
    Topic::Nomen,
    Topic::Adjektive,
    Topic::Praepositionen,
    Topic::Artikel,
];

/// CEFR-style proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Level {
    /// Beginner
    A1,
    /// Elementary
    A2,
    /// Intermediate
    B1,
    /// Upper intermediate
    B2,
    /// Advanced
    C1,
}

/// Error returned when a string is not a known level tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level: {0:?}")]
pub struct ParseLevelError(pub String);

impl Level {
    /// Parse a level tag, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a1" => Some(Level::A1),
            "a2" => Some(Level::A2),
            "b1" => Some(Level::B1),
            "b2" => Some(Level::B2),
            "c1" => Some(Level::C1),
            _ => None,
        }
    }

    /// Lower-case tag, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A1 => "a1",
            Level::A2 => "a2",
            Level::B1 => "b1",
            Level::B2 => "b2",
            Level::C1 => "c1",
        }
    }

    /// Position in [`LEVEL_ORDER`].
    pub fn index(self) -> usize {
        LEVEL_ORDER
            .iter()
            .position(|l| *l == self)
            .unwrap_or_default()
    }

    /// The following level, or `None` at the end of the curriculum.
    pub fn next(self) -> Option<Self> {
        LEVEL_ORDER.get(self.index() + 1).copied()
    }

    /// Final level of the curriculum.
    pub fn last() -> Self {
        LEVEL_ORDER[LEVEL_ORDER.len() - 1]
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(s).ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

impl TryFrom<String> for Level {
    type Error = ParseLevelError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Level> for &'static str {
    fn from(level: Level) -> Self {
        level.as_str()
    }
}

/// Grammar category used to group exercises within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Topic {
    /// Sentence structure
    Satzbau,
    /// Verbs
    Verben,
    /// Nouns
    Nomen,
    /// Adjectives
    Adjektive,
    /// Prepositions
    Praepositionen,
    /// Articles
    Artikel,
}

/// Error returned when a string is not a known topic tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown topic: {0:?}")]
pub struct ParseTopicError(pub String);

impl Topic {
    /// Parse a topic tag, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "satzbau" => Some(Topic::Satzbau),
            "verben" => Some(Topic::Verben),
            "nomen" => Some(Topic::Nomen),
            "adjektive" => Some(Topic::Adjektive),
            "praepositionen" | "präpositionen" => Some(Topic::Praepositionen),
            "artikel" => Some(Topic::Artikel),
            _ => None,
        }
    }

    /// Lower-case tag, as persisted.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Satzbau => "satzbau",
            Topic::Verben => "verben",
            Topic::Nomen => "nomen",
            Topic::Adjektive => "adjektive",
            Topic::Praepositionen => "praepositionen",
            Topic::Artikel => "artikel",
        }
    }

    /// Display label for breadcrumbs and listings.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Satzbau => "Satzbau",
            Topic::Verben => "Verben",
            Topic::Nomen => "Nomen",
            Topic::Adjektive => "Adjektive",
            Topic::Praepositionen => "Präpositionen",
            Topic::Artikel => "Artikel",
        }
    }

    /// Position in [`TOPIC_ORDER`].
    pub fn index(self) -> usize {
        TOPIC_ORDER
            .iter()
            .position(|t| *t == self)
            .unwrap_or_default()
    }

    /// Topics strictly after this one.
    pub fn following(self) -> &'static [Topic] {
        const ORDER: &[Topic] = &TOPIC_ORDER;
        &ORDER[self.index() + 1..]
    }

    /// Final topic of every level.
    pub fn last() -> Self {
        TOPIC_ORDER[TOPIC_ORDER.len() - 1]
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Topic {
    type Err = ParseTopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::parse(s).ok_or_else(|| ParseTopicError(s.to_string()))
    }
}

impl TryFrom<String> for Topic {
    type Error = ParseTopicError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Topic> for &'static str {
    fn from(topic: Topic) -> Self {
        topic.as_str()
    }
}

/// Comma-separated topic tags, `-` when empty.
#[derive(Debug, Clone, Copy)]
pub struct TopicList<'a>(pub &'a [Topic]);

impl std::fmt::Display for TopicList<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Some((first, rest)) = self.0.split_first() else {
            return f.write_str("-");
        };
        f.write_str(first.as_str())?;
        for topic in rest {
            write!(f, ", {}", topic)?;
        }
        Ok(())
    }
}
