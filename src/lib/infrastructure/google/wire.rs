//! Gmail and People API wire types

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::mail::{ContactList, SendAsAlias};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email_address: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAsList {
    #[serde(default)]
    pub send_as: Vec<SendAs>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAs {
    pub send_as_email: String,
    pub display_name: Option<String>,
    pub signature: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_primary: bool,
}

impl From<SendAs> for SendAsAlias {
    fn from(send_as: SendAs) -> Self {
        Self {
            send_as_email: send_as.send_as_email,
            display_name: send_as.display_name,
            signature: send_as.signature,
            is_default: send_as.is_default,
            is_primary: send_as.is_primary,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub names: Vec<Name>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Name {
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connections {
    #[serde(default)]
    pub connections: Vec<Value>,
    #[serde(default)]
    pub total_items: u64,
}

impl From<Connections> for ContactList {
    fn from(connections: Connections) -> Self {
        Self {
            contacts: connections.connections,
            total_results: connections.total_items,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendMessage<'a> {
    pub raw: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyMessage {
    pub add_label_ids: Vec<&'static str>,
    pub remove_label_ids: Vec<&'static str>,
}

/// Google's standard error envelope
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn test_send_as_list_defaults() -> TestResult {
        let list: SendAsList = serde_json::from_value(json!({
            "sendAs": [
                {
                    "sendAsEmail": "me@x.com",
                    "displayName": "Jane Doe",
                    "signature": "<b>Jane</b>",
                    "isPrimary": true,
                    "isDefault": true
                },
                { "sendAsEmail": "alias@x.com" }
            ]
        }))?;

        let aliases: Vec<SendAsAlias> = list.send_as.into_iter().map(Into::into).collect();

        assert_eq!(aliases[0].display_name.as_deref(), Some("Jane Doe"));
        assert!(aliases[0].is_primary);
        assert_eq!(aliases[1].display_name, None);
        assert!(!aliases[1].is_default);

        Ok(())
    }

    #[test]
    fn test_empty_send_as_list() -> TestResult {
        let list: SendAsList = serde_json::from_value(json!({}))?;

        assert!(list.send_as.is_empty());

        Ok(())
    }

    #[test]
    fn test_connections_without_results() -> TestResult {
        let connections: Connections = serde_json::from_value(json!({}))?;
        let contacts = ContactList::from(connections);

        assert!(contacts.contacts.is_empty());
        assert_eq!(contacts.total_results, 0);

        Ok(())
    }

    #[test]
    fn test_modify_message_serialization() -> TestResult {
        let body = serde_json::to_value(ModifyMessage {
            add_label_ids: vec![],
            remove_label_ids: vec!["INBOX"],
        })?;

        assert_eq!(body, json!({ "addLabelIds": [], "removeLabelIds": ["INBOX"] }));

        Ok(())
    }
}
