use serde::{Deserialize, Serialize};

use crate::config::MetadataConfig;

/// Mini-app metadata as consumed by clients rendering the action widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub url: String,
    pub icon: String,
    pub title: String,
    pub base_url: String,
    pub description: String,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub label: String,
    pub description: String,
    pub chains: ChainContext,
    pub path: String,
    #[serde(default)]
    pub params: Vec<ActionParam>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// The server computes the transaction when the action is submitted.
    Dynamic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainContext {
    pub source: String,
}

/// One input field of an action form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParam {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: ParamType,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Text,
    Textarea,
    Number,
    Email,
    Url,
    Address,
    Boolean,
}

impl Metadata {
    /// Build the single-action metadata document from config.
    ///
    /// `base_url` is the scheme and host the request arrived on; the action's
    /// `path` is resolved against it by clients.
    pub fn build(config: &MetadataConfig, network: &str, base_url: impl Into<String>) -> Self {
        let param = ActionParam {
            name: config.param.name.clone(),
            label: config.param.label.clone(),
            kind: ParamType::Text,
            required: true,
            description: config.param.description.clone(),
        };

        Self {
            url: config.url.clone(),
            icon: config.icon.clone(),
            title: config.title.clone(),
            base_url: base_url.into(),
            description: config.description.clone(),
            actions: vec![Action {
                kind: ActionKind::Dynamic,
                label: config.action.label.clone(),
                description: config.action.description.clone(),
                chains: ChainContext {
                    source: network.to_string(),
                },
                path: config.action.path.clone(),
                params: vec![param],
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_has_one_required_text_param() {
        let meta = Metadata::build(&MetadataConfig::default(), "fuji", "http://localhost:3000");
        assert_eq!(meta.actions.len(), 1);
        let action = &meta.actions[0];
        assert_eq!(action.path, "/api/mi-app");
        assert_eq!(action.chains.source, "fuji");
        assert_eq!(action.params.len(), 1);
        assert_eq!(action.params[0].name, "mensaje");
        assert_eq!(action.params[0].kind, ParamType::Text);
        assert!(action.params[0].required);
    }

    #[test]
    fn serializes_with_client_field_names() {
        let meta = Metadata::build(&MetadataConfig::default(), "fuji", "https://example.com");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["baseUrl"], "https://example.com");
        assert_eq!(json["actions"][0]["type"], "dynamic");
        assert_eq!(json["actions"][0]["chains"]["source"], "fuji");
        assert_eq!(json["actions"][0]["params"][0]["type"], "text");
        assert_eq!(json["actions"][0]["params"][0]["required"], true);
    }
}
