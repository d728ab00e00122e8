//! Identity codec
//!
//! Maps trigger fields to the creation payload sent to the remote service,
//! and the remote-assigned identity back to fields. The identity itself is
//! produced by the service (it appends a uniquifying suffix), so there is no
//! local `identity -> string` direction.
//!
//! Decoding is positional: segment 2 is the expression and segment 3 the
//! message. A message containing `:` (which the message validator admits) is
//! truncated at its first colon.

use crate::error::DecodeError;
use crate::trigger::{CreateTriggerEvent, TriggerValues};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

/// Trigger type sent on creation
pub const TRIGGER_TYPE: &str = "cron";

/// Trigger provider kind sent on creation
pub const TRIGGER_KIND: &str = "codefresh";

/// Asks the remote service to generate the trigger secret
pub const GENERATE_SECRET: &str = "!generate";

/// Shape every identity is expected to follow
pub const IDENTITY_TEMPLATE: &str = "cron:codefresh:[expression]:[message]:[uid]";

/// Keys of the `values` map in the creation payload
pub const VALUE_EXPRESSION: &str = "expression";
pub const VALUE_MESSAGE: &str = "message";

const DELIMITER: char = ':';
const EXPRESSION_SEGMENT: usize = 2;
const MESSAGE_SEGMENT: usize = 3;

lazy_static! {
    // Unanchored: the remote format is checked for four colon-delimited
    // segments anywhere in the string.
    static ref IDENTITY_SHAPE: Regex =
        Regex::new("[^:]+:[^:]+:[^:]+:[^:]+").expect("identity shape pattern is valid");
}

/// Build the creation payload for a trigger
pub fn encode(expression: &str, message: &str) -> CreateTriggerEvent {
    let mut values = BTreeMap::new();
    values.insert(VALUE_EXPRESSION.to_string(), expression.to_string());
    values.insert(VALUE_MESSAGE.to_string(), message.to_string());

    CreateTriggerEvent {
        event_type: TRIGGER_TYPE.to_string(),
        kind: TRIGGER_KIND.to_string(),
        secret: GENERATE_SECRET.to_string(),
        values,
    }
}

/// Extract expression and message from an identity string
pub fn decode(identity: &str) -> Result<TriggerValues, DecodeError> {
    if !IDENTITY_SHAPE.is_match(identity) {
        return Err(malformed(identity));
    }

    let segments: Vec<&str> = identity.split(DELIMITER).collect();
    match (segments.get(EXPRESSION_SEGMENT), segments.get(MESSAGE_SEGMENT)) {
        (Some(expression), Some(message)) => Ok(TriggerValues {
            expression: (*expression).to_string(),
            message: (*message).to_string(),
        }),
        _ => Err(malformed(identity)),
    }
}

fn malformed(identity: &str) -> DecodeError {
    DecodeError::MalformedIdentity {
        identity: identity.to_string(),
        expected: IDENTITY_TEMPLATE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_payload() {
        let event = encode("0 0 12 * * ?", "noon build");
        assert_eq!(event.event_type, "cron");
        assert_eq!(event.kind, "codefresh");
        assert_eq!(event.secret, "!generate");
        assert_eq!(event.values.get("expression").unwrap(), "0 0 12 * * ?");
        assert_eq!(event.values.get("message").unwrap(), "noon build");
        assert_eq!(event.values.len(), 2);
    }

    #[test]
    fn test_decode_well_formed() {
        let values = decode("cron:codefresh:0 0 * * * *:hi:abc123").unwrap();
        assert_eq!(values.expression, "0 0 * * * *");
        assert_eq!(values.message, "hi");
    }

    #[test]
    fn test_decode_not_enough_segments() {
        let err = decode("not-enough-segments").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MalformedIdentity {
                identity: "not-enough-segments".into(),
                expected: IDENTITY_TEMPLATE,
            }
        );
    }

    #[test]
    fn test_decode_rejects_empty_segments() {
        assert!(decode("cron:codefresh::msg:uid").is_err());
        assert!(decode("a:b:c").is_err());
        assert!(decode("").is_err());
    }

    #[test]
    fn test_decode_exactly_four_segments() {
        let values = decode("cron:codefresh:@hourly:ping").unwrap();
        assert_eq!(values.expression, "@hourly");
        assert_eq!(values.message, "ping");
    }

    #[test]
    fn test_decode_colon_in_message_is_positional() {
        // "Build #42: rc" contains the delimiter, so only "Build #42" survives.
        let values = decode("cron:codefresh:@daily:Build #42: rc:uid").unwrap();
        assert_eq!(values.message, "Build #42");
    }

    #[test]
    fn test_payload_json_shape() {
        let json = serde_json::to_value(encode("@daily", "nightly")).unwrap();
        assert_eq!(json["type"], "cron");
        assert_eq!(json["kind"], "codefresh");
        assert_eq!(json["secret"], "!generate");
        assert_eq!(json["values"]["expression"], "@daily");
        assert_eq!(json["values"]["message"], "nightly");
    }
}
