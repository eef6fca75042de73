//! Analysis result
//!
//! [`ScoreResult`] is the immutable value returned by an analysis. It is
//! assembled through [`ScoreResultBuilder`] and offers no mutation API once
//! built.
//!
//! Scores are keyed by the attribute name the service used, so names outside
//! the [`Attribute`] catalog stay reachable through [`ScoreResult::score_of`].
//! A requested attribute the service did not score is recorded as `f64::NAN`;
//! `score_of` returns `Some(NAN)` for it and `None` only for names that were
//! never recorded.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Attribute, SpanAnnotation};

/// Immutable result of one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    message: String,
    languages: Vec<String>,
    #[serde(with = "ordered_scores_serde")]
    scores: Vec<(String, f64)>,
    span_annotations: Vec<SpanAnnotation>,
    computed_at_epoch_millis: i64,
}

impl ScoreResult {
    /// Start assembling a result for `message`.
    pub fn builder(message: impl Into<String>) -> ScoreResultBuilder {
        ScoreResultBuilder::new(message)
    }

    /// The analyzed text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Languages the text was analyzed in.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Recorded scores in insertion order.
    pub fn scores(&self) -> impl ExactSizeIterator<Item = (&str, f64)> + '_ {
        self.scores.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn span_annotations(&self) -> &[SpanAnnotation] {
        &self.span_annotations
    }

    pub const fn computed_at_epoch_millis(&self) -> i64 {
        self.computed_at_epoch_millis
    }

    /// Construction time as a UTC timestamp.
    ///
    /// Falls back to the Unix epoch if the stored millis are out of range.
    pub fn computed_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.computed_at_epoch_millis)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Score recorded under `name` (a string or an [`Attribute`]).
    ///
    /// `None` means the name was never recorded. `Some(NAN)` means it was
    /// requested but the service produced no usable score.
    pub fn score_of(&self, name: impl AsRef<str>) -> Option<f64> {
        let name = name.as_ref();
        self.scores
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    pub fn toxicity(&self) -> Option<f64> {
        self.score_of(Attribute::Toxicity)
    }

    pub fn severe_toxicity(&self) -> Option<f64> {
        self.score_of(Attribute::SevereToxicity)
    }

    pub fn identity_attack(&self) -> Option<f64> {
        self.score_of(Attribute::IdentityAttack)
    }

    pub fn insult(&self) -> Option<f64> {
        self.score_of(Attribute::Insult)
    }

    pub fn profanity(&self) -> Option<f64> {
        self.score_of(Attribute::Profanity)
    }

    pub fn threat(&self) -> Option<f64> {
        self.score_of(Attribute::Threat)
    }

    pub fn sexually_explicit(&self) -> Option<f64> {
        self.score_of(Attribute::SexuallyExplicit)
    }

    pub fn flirtation(&self) -> Option<f64> {
        self.score_of(Attribute::Flirtation)
    }

    /// Whether toxicity was recorded at or above `threshold`.
    ///
    /// Unrecorded and sentinel scores are never toxic.
    pub fn is_toxic(&self, threshold: f64) -> bool {
        self.toxicity().is_some_and(|value| value >= threshold)
    }

    /// Names recorded with the not-a-number sentinel.
    pub fn unavailable_attributes(&self) -> impl Iterator<Item = &str> + '_ {
        self.scores
            .iter()
            .filter(|(_, value)| value.is_nan())
            .map(|(name, _)| name.as_str())
    }
}

/// `message.len` counts characters, the same unit as span offsets.
impl fmt::Display for ScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ScoreResult{{message.len={}, languages={:?}, scores={{",
            self.message.chars().count(),
            self.languages
        )?;
        for (i, (name, value)) in self.scores.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        write!(
            f,
            "}}, spans={}, computedAt={}}}",
            self.span_annotations.len(),
            self.computed_at_epoch_millis
        )
    }
}

/// Single-use assembly stage for [`ScoreResult`].
///
/// Inputs are taken by value or cloned from borrowed iterators, so nothing
/// the caller keeps can reach into the built result.
#[derive(Debug, Clone)]
pub struct ScoreResultBuilder {
    message: String,
    languages: Vec<String>,
    scores: Vec<(String, f64)>,
    span_annotations: Vec<SpanAnnotation>,
    computed_at_epoch_millis: Option<i64>,
}

impl ScoreResultBuilder {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            languages: Vec::new(),
            scores: Vec::new(),
            span_annotations: Vec::new(),
            computed_at_epoch_millis: None,
        }
    }

    /// Record a score under `name` (a string or an [`Attribute`]); last write wins.
    pub fn put_score(mut self, name: impl AsRef<str>, value: f64) -> Self {
        self.insert_score(name.as_ref(), value);
        self
    }

    /// Record every `(name, value)` pair in iteration order; last write wins.
    pub fn put_all_scores<I, K>(mut self, scores: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        for (name, value) in scores {
            self.insert_score(name.as_ref(), value);
        }
        self
    }

    /// Replace the language list.
    pub fn languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Append a span; `None` is ignored.
    pub fn add_span(mut self, span: impl Into<Option<SpanAnnotation>>) -> Self {
        if let Some(span) = span.into() {
            self.span_annotations.push(span);
        }
        self
    }

    /// Append every span.
    pub fn add_all_spans<I>(mut self, spans: I) -> Self
    where
        I: IntoIterator<Item = SpanAnnotation>,
    {
        self.span_annotations.extend(spans);
        self
    }

    /// Override the construction timestamp (defaults to now).
    pub fn computed_at_epoch_millis(mut self, epoch_millis: i64) -> Self {
        self.computed_at_epoch_millis = Some(epoch_millis);
        self
    }

    pub fn build(self) -> ScoreResult {
        ScoreResult {
            message: self.message,
            languages: self.languages,
            scores: self.scores,
            span_annotations: self.span_annotations,
            computed_at_epoch_millis: self
                .computed_at_epoch_millis
                .unwrap_or_else(|| Utc::now().timestamp_millis()),
        }
    }

    fn insert_score(&mut self, name: &str, value: f64) {
        match self.scores.iter_mut().find(|(key, _)| key == name) {
            Some(slot) => slot.1 = value,
            None => self.scores.push((name.to_string(), value)),
        }
    }
}

// Scores serialize as an ordered JSON object. NaN has no JSON form, so the
// sentinel is written as `null` and read back as NaN.
mod ordered_scores_serde {
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S>(scores: &[(String, f64)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(scores.len()))?;
        for (name, value) in scores {
            let value = if value.is_nan() { None } else { Some(*value) };
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, f64)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = Vec<(String, f64)>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of attribute names to scores or null")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scores: Vec<(String, f64)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, Option<f64>>()? {
                    let value = value.unwrap_or(f64::NAN);
                    match scores.iter_mut().find(|(key, _)| *key == name) {
                        Some(slot) => slot.1 = value,
                        None => scores.push((name, value)),
                    }
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(begin: i64, end: i64, score: f64) -> SpanAnnotation {
        SpanAnnotation::new(begin, end, "TOXICITY", score).unwrap()
    }

    #[test]
    fn put_then_read() {
        let result = ScoreResult::builder("hello").put_score("TOXICITY", 0.9).build();
        assert_eq!(result.score_of("TOXICITY"), Some(0.9));
        assert_eq!(result.score_of(Attribute::Toxicity), Some(0.9));
        assert_eq!(result.score_of("INSULT"), None);
        assert_eq!(result.insult(), None);
    }

    #[test]
    fn attribute_overload_uses_canonical_name() {
        let result = ScoreResult::builder("hi")
            .put_score(Attribute::SevereToxicity, 0.3)
            .build();
        assert_eq!(result.score_of("SEVERE_TOXICITY"), Some(0.3));
        assert_eq!(result.severe_toxicity(), Some(0.3));
    }

    #[test]
    fn put_score_overwrites() {
        let result = ScoreResult::builder("hi")
            .put_score("TOXICITY", 0.1)
            .put_score("INSULT", 0.2)
            .put_score("TOXICITY", 0.7)
            .build();
        let scores: Vec<_> = result.scores().collect();
        assert_eq!(scores, vec![("TOXICITY", 0.7), ("INSULT", 0.2)]);
    }

    #[test]
    fn put_all_scores_keeps_iteration_order() {
        let result = ScoreResult::builder("hi")
            .put_score("THREAT", 0.05)
            .put_all_scores([("PROFANITY", 0.4), ("THREAT", 0.6), ("FLIRTATION", 0.1)])
            .build();
        let names: Vec<_> = result.scores().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["THREAT", "PROFANITY", "FLIRTATION"]);
        assert_eq!(result.threat(), Some(0.6));
    }

    #[test]
    fn sentinel_is_present_but_nan() {
        let result = ScoreResult::builder("hi")
            .put_score("INSULT", f64::NAN)
            .build();
        let insult = result.insult().expect("recorded");
        assert!(insult.is_nan());
        assert_eq!(result.unavailable_attributes().collect::<Vec<_>>(), vec!["INSULT"]);
    }

    #[test]
    fn unknown_names_are_kept() {
        let result = ScoreResult::builder("hi")
            .put_score("ATTACK_ON_COMMENTER", 0.33)
            .build();
        assert_eq!(result.score_of("ATTACK_ON_COMMENTER"), Some(0.33));
    }

    #[test]
    fn out_of_range_scores_pass_through() {
        let result = ScoreResult::builder("hi").put_score("TOXICITY", 1.5).build();
        assert_eq!(result.toxicity(), Some(1.5));
    }

    #[test]
    fn is_toxic_threshold() {
        let never = ScoreResult::builder("hi").build();
        assert!(!never.is_toxic(0.0));

        let exact = ScoreResult::builder("hi").put_score("TOXICITY", 0.8).build();
        assert!(exact.is_toxic(0.8));
        assert!(exact.is_toxic(0.5));
        assert!(!exact.is_toxic(0.81));

        let sentinel = ScoreResult::builder("hi")
            .put_score("TOXICITY", f64::NAN)
            .build();
        assert!(!sentinel.is_toxic(0.0));
    }

    #[test]
    fn languages_and_spans_are_copied() {
        let mut languages = vec!["en".to_string()];
        let mut spans = vec![span(0, 5, 0.4)];

        let result = ScoreResult::builder("hello world")
            .languages(&languages)
            .add_all_spans(spans.iter().cloned())
            .build();

        languages.push("fr".to_string());
        languages[0] = "de".to_string();
        spans.push(span(6, 11, 0.2));
        spans.clear();

        assert_eq!(result.languages(), ["en".to_string()]);
        assert_eq!(result.span_annotations(), [span(0, 5, 0.4)]);
    }

    #[test]
    fn languages_replace_previous_list() {
        let result = ScoreResult::builder("hi")
            .languages(["en", "es"])
            .languages(Vec::<String>::new())
            .build();
        assert!(result.languages().is_empty());
    }

    #[test]
    fn add_span_ignores_none() {
        let result = ScoreResult::builder("hello")
            .add_span(None)
            .add_span(span(0, 2, 0.9))
            .add_span(Some(span(2, 4, 0.1)))
            .build();
        assert_eq!(result.span_annotations().len(), 2);
        assert_eq!(result.span_annotations()[0], span(0, 2, 0.9));
    }

    #[test]
    fn computed_at_defaults_to_now_and_can_be_overridden() {
        let before = Utc::now().timestamp_millis();
        let result = ScoreResult::builder("hi").build();
        let after = Utc::now().timestamp_millis();
        assert!(result.computed_at_epoch_millis() >= before);
        assert!(result.computed_at_epoch_millis() <= after);

        let fixed = ScoreResult::builder("hi")
            .computed_at_epoch_millis(1_700_000_000_000)
            .build();
        assert_eq!(fixed.computed_at_epoch_millis(), 1_700_000_000_000);
        assert_eq!(fixed.computed_at().timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn display_summarizes() {
        let result = ScoreResult::builder("hello")
            .languages(["en"])
            .put_score("TOXICITY", 0.5)
            .add_span(span(0, 5, 0.5))
            .computed_at_epoch_millis(42)
            .build();
        assert_eq!(
            result.to_string(),
            "ScoreResult{message.len=5, languages=[\"en\"], scores={TOXICITY=0.5}, spans=1, computedAt=42}"
        );
    }

    #[test]
    fn display_counts_message_characters() {
        let result = ScoreResult::builder("café 😀")
            .computed_at_epoch_millis(0)
            .build();
        assert!(result.to_string().starts_with("ScoreResult{message.len=6,"));
    }

    #[test]
    fn serde_round_trip_keeps_order_and_sentinel() {
        let result = ScoreResult::builder("hello")
            .languages(["en"])
            .put_score("TOXICITY", 0.75)
            .put_score("INSULT", f64::NAN)
            .put_score("ATTACK_ON_AUTHOR", 0.1)
            .add_span(span(0, 5, 0.4))
            .computed_at_epoch_millis(1_000)
            .build();

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["scores"]["INSULT"], serde_json::Value::Null);
        assert_eq!(json["computedAtEpochMillis"], 1_000);

        let text = serde_json::to_string(&result).unwrap();
        let back: ScoreResult = serde_json::from_str(&text).unwrap();
        let names: Vec<_> = back.scores().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["TOXICITY", "INSULT", "ATTACK_ON_AUTHOR"]);
        assert!(back.insult().unwrap().is_nan());
        assert_eq!(back.toxicity(), Some(0.75));
        assert_eq!(back.span_annotations(), result.span_annotations());
        assert_eq!(back.message(), "hello");
    }
}
