// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Natural-language transfer intent extraction.
//!
//! The model is asked for a strict JSON object, but nothing guarantees it
//! complies, so [`parse_intent`] checks the shape key by key before anything
//! reaches the caller.

use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// System instruction for intent extraction (used with JSON response mode).
pub const INTENT_INSTRUCTION: &str = r#"You are a Solana transaction parser. Extract transaction details from user messages.

Return ONLY a JSON object with these fields:
- action: "transfer" or "unknown"
- to_address: The recipient Solana address (if found)
- amount: The amount in SOL as a number (if found)
- confidence: "high", "medium", or "low"

If you cannot parse the intent, set action to "unknown".

Examples:
"Send 0.5 SOL to ABC123..." -> {"action": "transfer", "to_address": "ABC123...", "amount": 0.5, "confidence": "high"}
"Transfer 1 SOL to my friend at XYZ789..." -> {"action": "transfer", "to_address": "XYZ789...", "amount": 1, "confidence": "high"}"#;

/// Guidance returned when no usable intent could be extracted.
pub const UNRECOGNIZED_GUIDANCE: &str =
    "Could not understand transaction intent. Please specify: 'Send X SOL to <address>'";

/// Number of address characters shown in the confirmation message.
const ADDRESS_PREVIEW_CHARS: usize = 8;

/// Action tag of an accepted intent. Replies tagged `unknown` never get this far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IntentAction {
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// A validated transfer intent.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParsedIntent {
    /// Action tag, absent when the model left it out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<IntentAction>,
    /// Recipient address as extracted by the model
    pub to_address: String,
    /// Amount in SOL
    pub amount: f64,
    /// Model's self-reported confidence, absent when not given or unrecognised
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}

impl ParsedIntent {
    /// Human-readable confirmation, e.g. `Ready to send 1 SOL to XYZ789AB...`.
    pub fn confirmation_message(&self) -> String {
        let preview: String = self.to_address.chars().take(ADDRESS_PREVIEW_CHARS).collect();
        format!("Ready to send {} SOL to {preview}...", self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntentError {
    /// The model reply is not a JSON object of the expected shape.
    #[error("{0}")]
    Malformed(String),

    #[error("{}", UNRECOGNIZED_GUIDANCE)]
    Unrecognized,

    #[error("No recipient address found in your message")]
    MissingRecipient,

    #[error("Invalid or missing amount")]
    InvalidAmount,
}

/// Validate the model's raw reply.
///
/// Checks run in order: action, recipient, amount. Only an explicit `unknown`
/// action is unrecognised; a missing action is judged on recipient and amount.
pub fn parse_intent(raw: &str) -> Result<ParsedIntent, IntentError> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| IntentError::Malformed(format!("model reply is not valid JSON: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(IntentError::Malformed(
            "model reply is not a JSON object".to_string(),
        ));
    };

    let action = match optional_str(&fields, "action")?.map(str::trim) {
        None => None,
        Some(tag) if tag.eq_ignore_ascii_case("unknown") => {
            return Err(IntentError::Unrecognized)
        }
        Some(tag) if tag.eq_ignore_ascii_case("transfer") => Some(IntentAction::Transfer),
        Some(tag) => {
            return Err(IntentError::Malformed(format!(
                "`action` must be \"transfer\" or \"unknown\", got \"{tag}\""
            )))
        }
    };

    let to_address = optional_str(&fields, "to_address")?
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .ok_or(IntentError::MissingRecipient)?
        .to_string();

    let amount = match fields.get("amount") {
        None | Some(Value::Null) => return Err(IntentError::InvalidAmount),
        Some(Value::Number(n)) => n.as_f64().ok_or(IntentError::InvalidAmount)?,
        Some(other) => {
            return Err(IntentError::Malformed(format!(
                "`amount` must be a number, got {other}"
            )))
        }
    };
    if amount <= 0.0 {
        return Err(IntentError::InvalidAmount);
    }

    let confidence = optional_str(&fields, "confidence")?.and_then(Confidence::from_label);

    Ok(ParsedIntent {
        action,
        to_address,
        amount,
        confidence,
    })
}

/// Read an optional string field; `null` counts as absent, other types are
/// a shape error.
fn optional_str<'a>(
    fields: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, IntentError> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(IntentError::Malformed(format!(
            "`{key}` must be a string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_transfer() {
        let intent = parse_intent(
            r#"{"action":"transfer","to_address":"XYZ789ABCDEFG","amount":1,"confidence":"high"}"#,
        )
        .unwrap();
        assert_eq!(intent.action, Some(IntentAction::Transfer));
        assert_eq!(intent.to_address, "XYZ789ABCDEFG");
        assert_eq!(intent.amount, 1.0);
        assert_eq!(intent.confidence, Some(Confidence::High));
        assert_eq!(
            intent.confirmation_message(),
            "Ready to send 1 SOL to XYZ789AB..."
        );
    }

    #[test]
    fn fractional_amount_in_message() {
        let intent =
            parse_intent(r#"{"action":"transfer","to_address":"ABC","amount":0.5}"#).unwrap();
        // Short addresses are shown whole
        assert_eq!(intent.confirmation_message(), "Ready to send 0.5 SOL to ABC...");
        assert_eq!(intent.confidence, None);
    }

    #[test]
    fn unknown_action_is_unrecognized() {
        let err = parse_intent(r#"{"action":"unknown","confidence":"low"}"#).unwrap_err();
        assert_eq!(err, IntentError::Unrecognized);
        assert_eq!(err.to_string(), UNRECOGNIZED_GUIDANCE);

        assert_eq!(
            parse_intent(r#"{"action":" UNKNOWN ","to_address":"ABC","amount":1}"#),
            Err(IntentError::Unrecognized)
        );
    }

    #[test]
    fn missing_action_falls_through_to_recipient_and_amount() {
        let intent = parse_intent(r#"{"to_address":"ABC","amount":1}"#).unwrap();
        assert_eq!(intent.action, None);
        assert_eq!(intent.to_address, "ABC");

        let intent = parse_intent(r#"{"action":null,"to_address":"ABC","amount":2}"#).unwrap();
        assert_eq!(intent.action, None);

        assert_eq!(
            parse_intent(r#"{"amount":1}"#),
            Err(IntentError::MissingRecipient)
        );
    }

    #[test]
    fn confidence_is_only_reported_when_recognised() {
        let intent =
            parse_intent(r#"{"action":"transfer","to_address":"ABC","amount":1,"confidence":"Medium"}"#)
                .unwrap();
        assert_eq!(intent.confidence, Some(Confidence::Medium));

        let intent =
            parse_intent(r#"{"action":"transfer","to_address":"ABC","amount":1,"confidence":"sure"}"#)
                .unwrap();
        assert_eq!(intent.confidence, None);
        let json = serde_json::to_value(&intent).unwrap();
        assert!(json.get("confidence").is_none());
    }

    #[test]
    fn action_is_checked_before_recipient_and_amount() {
        assert_eq!(
            parse_intent(r#"{"action":"unknown","amount":-1}"#),
            Err(IntentError::Unrecognized)
        );
        assert_eq!(
            parse_intent(r#"{"action":"transfer","amount":-1}"#),
            Err(IntentError::MissingRecipient)
        );
    }

    #[test]
    fn rejects_missing_recipient_and_bad_amounts() {
        assert_eq!(
            parse_intent(r#"{"action":"transfer","to_address":"  ","amount":1}"#),
            Err(IntentError::MissingRecipient)
        );
        assert_eq!(
            parse_intent(r#"{"action":"transfer","to_address":"ABC"}"#),
            Err(IntentError::InvalidAmount)
        );
        assert_eq!(
            parse_intent(r#"{"action":"transfer","to_address":"ABC","amount":0}"#),
            Err(IntentError::InvalidAmount)
        );
        assert_eq!(
            parse_intent(r#"{"action":"transfer","to_address":"ABC","amount":null}"#),
            Err(IntentError::InvalidAmount)
        );
    }

    #[test]
    fn shape_violations_are_malformed() {
        assert!(matches!(parse_intent("not json"), Err(IntentError::Malformed(_))));
        assert!(matches!(parse_intent("[1,2]"), Err(IntentError::Malformed(_))));
        assert!(matches!(
            parse_intent(r#"{"action":"transfer","to_address":42,"amount":1}"#),
            Err(IntentError::Malformed(_))
        ));
        assert!(matches!(
            parse_intent(r#"{"action":"transfer","to_address":"ABC","amount":"1"}"#),
            Err(IntentError::Malformed(_))
        ));
        assert!(matches!(
            parse_intent(r#"{"action":"swap","to_address":"ABC","amount":1}"#),
            Err(IntentError::Malformed(_))
        ));
    }

    #[test]
    fn preview_is_char_safe() {
        let intent = ParsedIntent {
            action: Some(IntentAction::Transfer),
            to_address: "ÄÖÜäöüßéèê".to_string(),
            amount: 2.0,
            confidence: Some(Confidence::Medium),
        };
        assert_eq!(intent.confirmation_message(), "Ready to send 2 SOL to ÄÖÜäöüßé...");
    }
}
