//! Span-level annotations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use super::Attribute;
use crate::error::PerspectiveError;

/// Score for one attribute over the character range `[begin, end)` of the
/// analyzed message.
///
/// Equality is exact: two spans are equal only if their offsets, attribute
/// name and the bit pattern of their score all match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct SpanAnnotation {
    begin: usize,
    end: usize,
    attribute: String,
    score: f64,
}

impl SpanAnnotation {
    /// Create a span, rejecting `begin < 0` and `end < begin`.
    pub fn new(
        begin: i64,
        end: i64,
        attribute: impl Into<String>,
        score: f64,
    ) -> Result<Self, PerspectiveError> {
        if begin < 0 || end < begin {
            return Err(PerspectiveError::InvalidInput(format!(
                "invalid span range [{begin}, {end})"
            )));
        }
        let begin = usize::try_from(begin)
            .map_err(|_| PerspectiveError::InvalidInput(format!("span begin {begin} out of range")))?;
        let end = usize::try_from(end)
            .map_err(|_| PerspectiveError::InvalidInput(format!("span end {end} out of range")))?;
        Ok(Self {
            begin,
            end,
            attribute: attribute.into(),
            score,
        })
    }

    pub const fn begin(&self) -> usize {
        self.begin
    }

    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered.
    pub const fn len(&self) -> usize {
        self.end - self.begin
    }

    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Attribute name as reported by the service.
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Typed view of [`attribute`](Self::attribute), `None` for names outside the catalog.
    pub fn attribute_enum(&self) -> Option<Attribute> {
        Attribute::lookup(&self.attribute)
    }

    pub const fn score(&self) -> f64 {
        self.score
    }

    /// The covered fragment of `message`. Offsets count characters, not
    /// bytes. `None` if the span reaches past the end of `message`.
    pub fn fragment(&self, message: &str) -> Option<String> {
        if message.chars().count() < self.end {
            return None;
        }
        Some(message.chars().skip(self.begin).take(self.len()).collect())
    }
}

impl PartialEq for SpanAnnotation {
    fn eq(&self, other: &Self) -> bool {
        self.begin == other.begin
            && self.end == other.end
            && self.score.to_bits() == other.score.to_bits()
            && self.attribute == other.attribute
    }
}

impl Eq for SpanAnnotation {}

impl Hash for SpanAnnotation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.begin.hash(state);
        self.end.hash(state);
        self.attribute.hash(state);
        self.score.to_bits().hash(state);
    }
}

impl fmt::Display for SpanAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Span[{},{}) {}={}",
            self.begin, self.end, self.attribute, self.score
        )
    }
}

/// Unvalidated wire shape; deserialization goes through [`SpanAnnotation::new`].
#[derive(Deserialize)]
struct RawSpan {
    begin: i64,
    end: i64,
    attribute: String,
    score: f64,
}

impl TryFrom<RawSpan> for SpanAnnotation {
    type Error = PerspectiveError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        Self::new(raw.begin, raw.end, raw.attribute, raw.score)
    }
}
