//! Outbound request body
//!
//! Builds the `comments:analyze` JSON document from the call arguments.
//! Optional fields are omitted when unset.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::PerspectiveError;
use crate::types::{AnalyzeOptions, Attribute};

/// `comments:analyze` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeCommentRequest {
    pub comment: TextEntry,
    pub languages: Vec<String>,
    pub requested_attributes: RequestedAttributes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_not_store: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_annotations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}

/// `{ "text": ... }` wrapper used for the comment and context entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEntry {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    pub entries: Vec<TextEntry>,
}

/// Requested attributes, serialized as `{ "<NAME>": {}, ... }` in request order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedAttributes(pub Vec<Attribute>);

/// Per-attribute request parameters; the client sends none.
#[derive(Serialize)]
struct AttributeParameters {}

impl Serialize for RequestedAttributes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for attr in &self.0 {
            map.serialize_entry(attr.as_str(), &AttributeParameters {})?;
        }
        map.end()
    }
}

impl AnalyzeCommentRequest {
    /// Assemble the body for `text` scored on `attributes`.
    pub fn new(text: &str, attributes: &[Attribute], options: &AnalyzeOptions) -> Self {
        let context = if options.context.is_empty() {
            None
        } else {
            Some(Context {
                entries: options
                    .context
                    .iter()
                    .map(|text| TextEntry { text: text.clone() })
                    .collect(),
            })
        };

        Self {
            comment: TextEntry {
                text: text.to_string(),
            },
            languages: vec![options.resolved_language().to_string()],
            requested_attributes: RequestedAttributes(attributes.to_vec()),
            do_not_store: options.do_not_store,
            client_token: options.client_token.clone(),
            community_id: options.community_id.clone(),
            span_annotations: options.span_annotations,
            session_id: options.session_id.clone(),
            context,
        }
    }

    /// Serialize to the JSON value handed to the transport.
    pub fn to_json(&self) -> Result<serde_json::Value, PerspectiveError> {
        serde_json::to_value(self).map_err(PerspectiveError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_options_body() {
        let body = AnalyzeCommentRequest::new(
            "you are great",
            &[Attribute::Toxicity, Attribute::Insult],
            &AnalyzeOptions::default(),
        )
        .to_json()
        .unwrap();

        assert_eq!(
            body,
            json!({
                "comment": { "text": "you are great" },
                "languages": ["en"],
                "requestedAttributes": { "TOXICITY": {}, "INSULT": {} },
                "doNotStore": true
            })
        );
    }

    #[test]
    fn every_option_is_forwarded() {
        let options = AnalyzeOptions::new()
            .language("es")
            .do_not_store(false)
            .client_token("tok-1")
            .community_id("forum")
            .span_annotations(true)
            .session_id("sess")
            .context(["earlier", "reply"]);
        let body = AnalyzeCommentRequest::new("hola", &[Attribute::Threat], &options)
            .to_json()
            .unwrap();

        assert_eq!(
            body,
            json!({
                "comment": { "text": "hola" },
                "languages": ["es"],
                "requestedAttributes": { "THREAT": {} },
                "doNotStore": false,
                "clientToken": "tok-1",
                "communityId": "forum",
                "spanAnnotations": true,
                "sessionId": "sess",
                "context": { "entries": [ { "text": "earlier" }, { "text": "reply" } ] }
            })
        );
    }

    #[test]
    fn unset_do_not_store_is_omitted() {
        let options = AnalyzeOptions {
            do_not_store: None,
            ..AnalyzeOptions::default()
        };
        let body = AnalyzeCommentRequest::new("x", &[Attribute::Toxicity], &options)
            .to_json()
            .unwrap();
        assert!(body.get("doNotStore").is_none());
        assert!(body.get("context").is_none());
    }

    #[test]
    fn requested_attributes_keep_request_order_on_the_wire() {
        let body = serde_json::to_string(&RequestedAttributes(vec![
            Attribute::Threat,
            Attribute::Insult,
            Attribute::Toxicity,
        ]))
        .unwrap();
        assert_eq!(body, r#"{"THREAT":{},"INSULT":{},"TOXICITY":{}}"#);
    }
}
