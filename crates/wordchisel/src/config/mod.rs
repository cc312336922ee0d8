//! # Tokenizer Configuration
//!
//! Two documents drive a tokenizer:
//! * [`TokenizerConfig`] - the tokenizer definition (`tokenizer.json`):
//!   the component pipeline, the model and the added tokens.
//! * [`TokenizerSettings`] - the tokenizer settings (`tokenizer_config.json`):
//!   named special tokens and orchestration defaults.
//!
//! Each component family parses its own sub-config from a [`serde_json::Value`];
//! the helpers here read the `type` discriminator and decode typed variant configs.

pub mod pattern_config;
pub mod tokenizer_config;
pub mod tokenizer_settings;

#[doc(inline)]
pub use pattern_config::PatternConfig;
#[doc(inline)]
pub use tokenizer_config::TokenizerConfig;
#[doc(inline)]
pub use tokenizer_settings::{TokenSetting, TokenizerSettings};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{WCResult, WordchiselError};

/// Read the `type` discriminator of a component config.
///
/// ## Arguments
/// * `config` - the component config object.
/// * `component` - the component family name, for error messages.
///
/// ## Returns
/// The type name, or `None` when the config has no string `type` field.
pub fn component_type<'a>(
    config: &'a Value,
    component: &'static str,
) -> WCResult<Option<&'a str>> {
    match config.get("type") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(name)) => Ok(Some(name.as_str())),
        Some(other) => Err(WordchiselError::InvalidConfig(format!(
            "{component} \"type\" must be a string, got {other}"
        ))),
    }
}

/// Read the `type` discriminator of a component config, requiring it.
pub fn required_component_type<'a>(
    config: &'a Value,
    component: &'static str,
) -> WCResult<&'a str> {
    component_type(config, component)?
        .ok_or(WordchiselError::MissingComponentType { component })
}

/// Decode a typed variant config from a component config object.
///
/// Unknown fields (including `type`) are ignored.
pub fn parse_component<C: DeserializeOwned>(config: &Value) -> WCResult<C> {
    Ok(C::deserialize(config)?)
}

/// Build the error for an unrecognized `type` discriminator.
pub fn unknown_type(
    component: &'static str,
    type_name: &str,
) -> WordchiselError {
    WordchiselError::UnknownComponentType {
        component,
        type_name: type_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_component_type() {
        assert_eq!(
            component_type(&json!({"type": "NFC"}), "normalizer").unwrap(),
            Some("NFC")
        );
        assert_eq!(component_type(&json!({}), "normalizer").unwrap(), None);
        assert!(component_type(&json!({"type": 3}), "normalizer").is_err());

        assert!(matches!(
            required_component_type(&json!({}), "decoder"),
            Err(WordchiselError::MissingComponentType {
                component: "decoder"
            })
        ));
    }

    #[test]
    fn test_unknown_type_message() {
        let err = unknown_type("decoder", "Mystery");
        assert_eq!(err.to_string(), "unknown decoder type: Mystery");
    }
}
