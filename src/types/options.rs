//! Per-call analysis options.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Options for one analyze call.
///
/// The default asks the service not to store the text and leaves every other
/// field unset; unset fields are omitted from the request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeOptions {
    /// Single language to analyze in; unset or empty means `"en"`.
    pub language: Option<String>,
    pub do_not_store: Option<bool>,
    pub client_token: Option<String>,
    pub community_id: Option<String>,
    /// Ask for per-span scores in addition to summary scores.
    pub span_annotations: Option<bool>,
    pub session_id: Option<String>,
    /// Preceding conversation, oldest first.
    pub context: Vec<String>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            language: None,
            do_not_store: Some(defaults::DO_NOT_STORE),
            client_token: None,
            community_id: None,
            span_annotations: None,
            session_id: None,
            context: Vec::new(),
        }
    }
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn do_not_store(mut self, do_not_store: bool) -> Self {
        self.do_not_store = Some(do_not_store);
        self
    }

    pub fn client_token(mut self, token: impl Into<String>) -> Self {
        self.client_token = Some(token.into());
        self
    }

    pub fn community_id(mut self, id: impl Into<String>) -> Self {
        self.community_id = Some(id.into());
        self
    }

    pub fn span_annotations(mut self, enabled: bool) -> Self {
        self.span_annotations = Some(enabled);
        self
    }

    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Replace the context entries.
    pub fn context<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.context = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Language sent to the service and recorded on the result.
    pub fn resolved_language(&self) -> &str {
        match self.language.as_deref() {
            Some(lang) if !lang.is_empty() => lang,
            _ => defaults::LANGUAGE,
        }
    }
}
