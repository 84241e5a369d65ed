use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::chain::Chain;
use crate::error::{MiniError, Result};
use crate::metadata::Metadata;

pub const MAX_ACTIONS: usize = 4;

static PARAM_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn is_valid_param_name(name: &str) -> bool {
    PARAM_NAME_RE
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap())
        .is_match(name)
}

/// Metadata that passed a [`MetadataValidator`]. Serializes exactly like the
/// wrapped [`Metadata`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedMetadata(Metadata);

impl ValidatedMetadata {
    /// Wrap metadata without checks. Intended for validator implementations.
    pub fn new_unchecked(metadata: Metadata) -> Self {
        Self(metadata)
    }

    pub fn inner(&self) -> &Metadata {
        &self.0
    }

    pub fn into_inner(self) -> Metadata {
        self.0
    }
}

pub trait MetadataValidator: Send + Sync {
    fn validate(&self, metadata: Metadata) -> Result<ValidatedMetadata>;
}

/// Structural checks mirroring the rules mini-app clients enforce before
/// rendering an action.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl MetadataValidator for SchemaValidator {
    fn validate(&self, mut metadata: Metadata) -> Result<ValidatedMetadata> {
        require_url("url", &metadata.url)?;
        require_url("icon", &metadata.icon)?;
        require_url("baseUrl", &metadata.base_url)?;
        require_text("title", &metadata.title)?;
        require_text("description", &metadata.description)?;

        if metadata.actions.is_empty() {
            return Err(invalid("at least one action is required"));
        }
        if metadata.actions.len() > MAX_ACTIONS {
            return Err(invalid(format!(
                "at most {MAX_ACTIONS} actions are allowed, got {}",
                metadata.actions.len()
            )));
        }

        for (i, action) in metadata.actions.iter().enumerate() {
            require_text(&format!("actions[{i}].label"), &action.label)?;
            if !action.path.starts_with('/') {
                return Err(invalid(format!(
                    "actions[{i}].path must start with '/': {:?}",
                    action.path
                )));
            }
            if !Chain::is_known(&action.chains.source) {
                return Err(invalid(format!(
                    "actions[{i}].chains.source is not a supported chain: {:?}",
                    action.chains.source
                )));
            }

            let mut seen = HashSet::new();
            for param in &action.params {
                if !is_valid_param_name(&param.name) {
                    return Err(invalid(format!(
                        "actions[{i}] has invalid param name {:?}",
                        param.name
                    )));
                }
                if !seen.insert(param.name.as_str()) {
                    return Err(invalid(format!(
                        "actions[{i}] has duplicate param name {:?}",
                        param.name
                    )));
                }
                require_text(&format!("actions[{i}].params.{}.label", param.name), &param.label)?;
            }
        }

        let trimmed = metadata.base_url.trim_end_matches('/').len();
        metadata.base_url.truncate(trimmed);

        Ok(ValidatedMetadata(metadata))
    }
}

fn invalid(reason: impl Into<String>) -> MiniError {
    MiniError::MetadataInvalid(reason.into())
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{field} is required")));
    }
    Ok(())
}

fn require_url(field: &str, value: &str) -> Result<()> {
    require_text(field, value)?;
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    match rest {
        Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
        _ => Err(invalid(format!("{field} must be an http(s) URL: {value:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MetadataConfig;
    use crate::metadata::{ActionParam, ParamType};

    fn sample() -> Metadata {
        Metadata::build(&MetadataConfig::default(), "fuji", "http://localhost:3000")
    }

    fn reason(err: MiniError) -> String {
        match err {
            MiniError::MetadataInvalid(r) => r,
            other => panic!("expected MetadataInvalid, got {other:?}"),
        }
    }

    #[test]
    fn default_metadata_is_valid() {
        let validated = SchemaValidator.validate(sample()).unwrap();
        assert_eq!(validated.inner().title, "Mensaje con Timestamp");
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let mut meta = sample();
        meta.base_url = "https://example.com//".into();
        let validated = SchemaValidator.validate(meta).unwrap();
        assert_eq!(validated.inner().base_url, "https://example.com");
    }

    #[test]
    fn rejects_empty_title() {
        let mut meta = sample();
        meta.title = "  ".into();
        let r = reason(SchemaValidator.validate(meta).unwrap_err());
        assert!(r.contains("title"), "{r}");
    }

    #[test]
    fn rejects_non_http_icon() {
        let mut meta = sample();
        meta.icon = "ftp://example.com/icon.png".into();
        let r = reason(SchemaValidator.validate(meta).unwrap_err());
        assert!(r.contains("icon"), "{r}");
    }

    #[test]
    fn rejects_no_actions() {
        let mut meta = sample();
        meta.actions.clear();
        assert!(SchemaValidator.validate(meta).is_err());
    }

    #[test]
    fn rejects_too_many_actions() {
        let mut meta = sample();
        let action = meta.actions[0].clone();
        meta.actions = vec![action; MAX_ACTIONS + 1];
        let r = reason(SchemaValidator.validate(meta).unwrap_err());
        assert!(r.contains("at most"), "{r}");
    }

    #[test]
    fn rejects_relative_action_path() {
        let mut meta = sample();
        meta.actions[0].path = "api/mi-app".into();
        assert!(SchemaValidator.validate(meta).is_err());
    }

    #[test]
    fn rejects_unknown_chain() {
        let mut meta = sample();
        meta.actions[0].chains.source = "dogechain".into();
        let r = reason(SchemaValidator.validate(meta).unwrap_err());
        assert!(r.contains("dogechain"), "{r}");
    }

    #[test]
    fn rejects_duplicate_param_names() {
        let mut meta = sample();
        let dup = ActionParam {
            name: "mensaje".into(),
            label: "Again".into(),
            kind: ParamType::Text,
            required: false,
            description: None,
        };
        meta.actions[0].params.push(dup);
        let r = reason(SchemaValidator.validate(meta).unwrap_err());
        assert!(r.contains("duplicate"), "{r}");
    }

    #[test]
    fn rejects_bad_param_name() {
        let mut meta = sample();
        meta.actions[0].params[0].name = "my message".into();
        assert!(SchemaValidator.validate(meta).is_err());
    }

    #[test]
    fn validated_serializes_transparently() {
        let validated = SchemaValidator.validate(sample()).unwrap();
        let a = serde_json::to_value(&validated).unwrap();
        let b = serde_json::to_value(validated.inner()).unwrap();
        assert_eq!(a, b);
    }
}
