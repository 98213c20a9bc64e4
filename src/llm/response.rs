//! Decoding of the response bodies returned by the inference endpoints.
//!
//! A success body comes in one of three shapes. They are checked in a fixed
//! order: a JSON array of text-generation outputs, a single text-generation
//! output object, then a chat-completion envelope.

use serde_json::{Map, Value};

use crate::llm::tokens::TokenUsage;

/// Output object of the text-generation API. Either field may be absent.
#[derive(Debug, Clone, Default)]
pub struct InferenceOutput {
    /// Non-string values are treated as absent.
    pub generated_text: Option<String>,
    pub error: Option<Value>,
}

/// The parts of a chat-completion envelope this crate reads.
#[derive(Debug, Clone, Default)]
pub struct ChatCompletion {
    /// `choices[0].message.content`, untrimmed.
    pub content: Option<String>,
    /// `None` when absent or not a valid usage object.
    pub usage: Option<TokenUsage>,
}

/// A response body sorted into one of the known shapes.
#[derive(Debug, Clone)]
pub enum ResponseShape {
    Sequence(Vec<InferenceOutput>),
    Object(InferenceOutput),
    ChatEnvelope(ChatCompletion),
}

/// Why a body did not yield text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeFailure {
    /// The body carried an explicit `error` field.
    Reported(String),
    /// No recognizable text field in any known shape.
    Unrecognized(String),
}

impl ResponseShape {
    /// Sort a JSON body into a shape.
    ///
    /// An object only counts as [`ResponseShape::Object`] when it carries a
    /// usable `error` or `generated_text`; any other object is read as a chat
    /// envelope. Fields are read one at a time, so a malformed neighbour never
    /// hides a usable one.
    pub fn classify(value: Value) -> Result<Self, ShapeFailure> {
        match value {
            Value::Array(items) => Ok(ResponseShape::Sequence(
                items.iter().map(InferenceOutput::from_value).collect(),
            )),
            Value::Object(map) => {
                let output = InferenceOutput::from_map(&map);
                if output.error_message().is_some() || output.text().is_some() {
                    return Ok(ResponseShape::Object(output));
                }
                Ok(ResponseShape::ChatEnvelope(ChatCompletion::from_map(&map)))
            }
            other => Err(ShapeFailure::Unrecognized(format!(
                "expected a JSON array or object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Extract the generated text, trimmed.
    pub fn into_text(self) -> Result<String, ShapeFailure> {
        match self {
            ResponseShape::Sequence(outputs) => match outputs.into_iter().next() {
                Some(first) => first.into_text(),
                None => Err(ShapeFailure::Unrecognized("empty response array".into())),
            },
            ResponseShape::Object(output) => output.into_text(),
            ResponseShape::ChatEnvelope(completion) => completion
                .text()
                .map(str::to_string)
                .ok_or_else(|| ShapeFailure::Unrecognized("no message content found in response".into())),
        }
    }

    /// Token usage, only reported by chat envelopes.
    pub fn usage(&self) -> Option<TokenUsage> {
        match self {
            ResponseShape::ChatEnvelope(completion) => completion.usage,
            _ => None,
        }
    }
}

impl InferenceOutput {
    /// Read an array element; anything but an object yields an empty output.
    pub fn from_value(value: &Value) -> Self {
        value.as_object().map(Self::from_map).unwrap_or_default()
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            generated_text: map.get("generated_text").and_then(Value::as_str).map(str::to_string),
            error: map.get("error").cloned(),
        }
    }

    /// The `error` field, if it holds anything meaningful.
    pub fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => match map.get("message") {
                Some(Value::String(s)) => Some(s.clone()),
                _ => Some(Value::Object(map.clone()).to_string()),
            },
            other => Some(other.to_string()),
        }
    }

    pub fn text(&self) -> Option<&str> {
        non_empty_trimmed(self.generated_text.as_deref())
    }

    fn into_text(self) -> Result<String, ShapeFailure> {
        if let Some(message) = self.error_message() {
            return Err(ShapeFailure::Reported(message));
        }
        self.text()
            .map(str::to_string)
            .ok_or_else(|| ShapeFailure::Unrecognized("no generated_text in response".into()))
    }
}

impl ChatCompletion {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let content = map
            .get("choices")
            .and_then(|choices| choices.pointer("/0/message/content"))
            .and_then(Value::as_str)
            .map(str::to_string);
        // usage is optional extra; a bad value must not reject the content
        let usage = map
            .get("usage")
            .and_then(|usage| serde_json::from_value::<TokenUsage>(usage.clone()).ok());
        Self { content, usage }
    }

    pub fn text(&self) -> Option<&str> {
        non_empty_trimmed(self.content.as_deref())
    }
}

fn non_empty_trimmed(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text_of(value: Value) -> Result<String, ShapeFailure> {
        ResponseShape::classify(value)?.into_text()
    }

    #[test]
    fn all_shapes_normalize_to_the_same_text() {
        let bodies = [
            json!([{ "generated_text": "A" }]),
            json!({ "generated_text": "A" }),
            json!({ "choices": [{ "message": { "content": "A" } }] }),
        ];
        for body in bodies {
            assert_eq!(text_of(body).unwrap(), "A");
        }
    }

    #[test]
    fn classify_picks_the_expected_variant() {
        assert!(matches!(
            ResponseShape::classify(json!([{ "generated_text": "x" }])),
            Ok(ResponseShape::Sequence(_))
        ));
        assert!(matches!(
            ResponseShape::classify(json!({ "error": "loading" })),
            Ok(ResponseShape::Object(_))
        ));
        assert!(matches!(
            ResponseShape::classify(json!({ "id": "chatcmpl-1", "choices": [] })),
            Ok(ResponseShape::ChatEnvelope(_))
        ));
    }

    #[test]
    fn error_field_wins_over_generated_text() {
        let body = json!([{ "error": "Model is currently loading", "generated_text": "ignored" }]);
        assert_eq!(
            text_of(body),
            Err(ShapeFailure::Reported("Model is currently loading".into()))
        );

        let body = json!({ "error": { "message": "rate limited" } });
        assert_eq!(text_of(body), Err(ShapeFailure::Reported("rate limited".into())));
    }

    #[test]
    fn chat_content_is_trimmed() {
        let body = json!({
            "choices": [{ "index": 0, "message": { "role": "assistant", "content": "  hello there \n" } }],
            "usage": { "prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5 }
        });
        let shape = ResponseShape::classify(body).unwrap();
        assert_eq!(shape.usage().map(|u| u.total_tokens), Some(5));
        assert_eq!(shape.into_text().unwrap(), "hello there");
    }

    #[test]
    fn empty_or_missing_text_is_unrecognized() {
        let cases = [
            json!({ "choices": [{ "message": { "content": "   " } }] }),
            json!({ "choices": [] }),
            json!({ "generated_text": "" }),
            json!([]),
            json!([{}]),
            json!("just a string"),
            json!(null),
        ];
        for body in cases {
            assert!(
                matches!(text_of(body.clone()), Err(ShapeFailure::Unrecognized(_))),
                "expected unrecognized for {body}"
            );
        }
    }

    #[test]
    fn bad_usage_does_not_reject_good_content() {
        let body = json!({
            "choices": [{ "message": { "content": "A" } }],
            "usage": { "prompt_tokens": 5, "completion_tokens": null, "total_tokens": 5 }
        });
        let shape = ResponseShape::classify(body).unwrap();
        assert!(shape.usage().is_none());
        assert_eq!(shape.into_text().unwrap(), "A");

        let body = json!({ "choices": [{ "message": { "content": "B" } }], "usage": "n/a" });
        assert_eq!(text_of(body).unwrap(), "B");
    }

    #[test]
    fn error_field_is_read_even_when_generated_text_has_wrong_type() {
        let body = json!({ "error": "Model is overloaded", "generated_text": 7 });
        assert_eq!(text_of(body), Err(ShapeFailure::Reported("Model is overloaded".into())));

        let body = json!({ "generated_text": "kept", "error": null, "details": [1, 2] });
        assert_eq!(text_of(body).unwrap(), "kept");
    }

    #[test]
    fn only_first_array_element_matters() {
        let body = json!([{ "generated_text": "first" }, "stray", 42]);
        assert_eq!(text_of(body).unwrap(), "first");

        let body = json!([{ "error": "busy", "generated_text": false }, { "generated_text": "second" }]);
        assert_eq!(text_of(body), Err(ShapeFailure::Reported("busy".into())));

        let body = json!(["not an object", { "generated_text": "second" }]);
        assert!(matches!(text_of(body), Err(ShapeFailure::Unrecognized(_))));
    }

    #[test]
    fn chat_content_of_wrong_type_is_unrecognized() {
        let body = json!({ "choices": [{ "message": { "content": 12 } }] });
        assert!(matches!(text_of(body), Err(ShapeFailure::Unrecognized(_))));
    }

    #[test]
    fn empty_generated_text_falls_through_to_chat_envelope() {
        let body = json!({
            "generated_text": "",
            "choices": [{ "message": { "content": "from chat" } }]
        });
        assert_eq!(text_of(body).unwrap(), "from chat");
    }
}
