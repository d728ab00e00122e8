//! Import keys for adopting existing remote triggers

use crate::error::ImportError;
use crate::ids::{PipelineId, TriggerIdentity};
use std::str::FromStr;

const SEPARATOR: char = ',';

/// Parsed `EVENT,PIPELINE_ID` import key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportKey {
    pub event: TriggerIdentity,
    pub pipeline_id: PipelineId,
}

impl FromStr for ImportKey {
    type Err = ImportError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = raw.split(SEPARATOR).collect();
        match parts.as_slice() {
            [event, pipeline_id] if !event.is_empty() && !pipeline_id.is_empty() => Ok(Self {
                event: TriggerIdentity::new(*event),
                pipeline_id: PipelineId::new(*pipeline_id),
            }),
            _ => Err(ImportError::BadFormat {
                raw: raw.to_string(),
            }),
        }
    }
}

/// Split an import key into its event and pipeline parts
pub fn parse_import_key(raw: &str) -> Result<ImportKey, ImportError> {
    raw.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_key() {
        let key = parse_import_key("cron:codefresh:0 0 * * * *:hi:abc123,pipeline-xyz").unwrap();
        assert_eq!(key.event.as_str(), "cron:codefresh:0 0 * * * *:hi:abc123");
        assert_eq!(key.pipeline_id.as_str(), "pipeline-xyz");
    }

    #[test]
    fn test_single_part_is_rejected() {
        let err = parse_import_key("onlyonepart").unwrap_err();
        assert_eq!(
            err,
            ImportError::BadFormat {
                raw: "onlyonepart".into()
            }
        );
    }

    #[test]
    fn test_empty_parts_are_rejected() {
        assert!(parse_import_key(",pipeline").is_err());
        assert!(parse_import_key("event,").is_err());
        assert!(parse_import_key(",").is_err());
        assert!(parse_import_key("").is_err());
    }

    #[test]
    fn test_extra_parts_are_rejected() {
        assert!(parse_import_key("a,b,c").is_err());
    }

    #[test]
    fn test_error_message_names_expected_format() {
        let err = parse_import_key("nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected format of ID (\"nope\"), expected EVENT,PIPELINE_ID"
        );
    }
}
