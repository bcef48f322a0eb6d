//! Parsing and canonical encoding entry points.
//!
//! A [`SubscriptionCodec`] is built once by the caller from a [`CodecConfig`]
//! and handed to whatever needs to read or write documents; there is no
//! process-wide instance.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use subrules_core::{Error, Result};

use crate::builder::build_subscription;
use crate::document::Subscription;

/// Turns relaxed-syntax source text into strict JSON text.
pub trait Transcoder {
    fn transcode(&self, source: &str) -> Result<String>;
}

/// The identity transcoder, for input that is already strict JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictJson;

impl Transcoder for StrictJson {
    fn transcode(&self, source: &str) -> Result<String> {
        Ok(source.to_owned())
    }
}

/// Encoding options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Indent the canonical output.
    #[serde(default)]
    pub pretty: bool,
}

/// Decoder and encoder for subscription documents.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionCodec {
    config: CodecConfig,
}

impl SubscriptionCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Parse strict JSON text into a [`Subscription`].
    pub fn parse(&self, text: &str) -> Result<Subscription> {
        let value: Value = serde_json::from_str(text)?;
        self.parse_value(&value)
    }

    /// Parse relaxed-syntax text by transcoding it to strict JSON first.
    pub fn parse_relaxed(&self, text: &str, transcoder: &dyn Transcoder) -> Result<Subscription> {
        let strict = transcoder.transcode(text)?;
        self.parse(&strict)
    }

    /// Build a [`Subscription`] from an already-decoded JSON value.
    pub fn parse_value(&self, value: &Value) -> Result<Subscription> {
        let Value::Object(root) = value else {
            return Err(Error::malformed(format!(
                "document root must be an object, found {}",
                kind_name(value)
            )));
        };

        let doc = build_subscription(root)?;
        tracing::debug!(
            id = doc.id,
            version = doc.version,
            apps = doc.apps.len(),
            groups = doc.group_count(),
            rules = doc.rule_count(),
            "parsed subscription"
        );
        Ok(doc)
    }

    /// Encode a document as canonical strict JSON.
    ///
    /// Shorthand shapes are not reproduced and defaulted group keys are
    /// written explicitly, so `parse(stringify(doc)) == doc` holds while the
    /// original source text is generally not recovered.
    pub fn stringify(&self, doc: &Subscription) -> Result<String> {
        let encoded = if self.config.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        };
        encoded.map_err(|e| Error::Encode(e.to_string()))
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
