use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// The six Aligo operations a node can be configured with.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::AsRefStr, strum::EnumString, strum::EnumIter)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    #[default]
    Send,
    SendMass,
    List,
    SmsList,
    Remain,
    Cancel,
}

impl Operation {
    /// The host-facing operation tag, e.g. `sendMass`.
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    /// Endpoint path relative to the API base url.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Operation::Send => "/send/",
            Operation::SendMass => "/send_mass/",
            Operation::List => "/list/",
            Operation::SmsList => "/sms_list/",
            Operation::Remain => "/remain/",
            Operation::Cancel => "/cancel/",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Operation::Send => "Send SMS",
            Operation::SendMass => "Send Bulk SMS",
            Operation::List => "Get Send History",
            Operation::SmsList => "Get Send Detail",
            Operation::Remain => "Get Remaining Count",
            Operation::Cancel => "Cancel Reservation",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::Send => "Send a message to one or more comma-separated receivers",
            Operation::SendMass => "Send individual messages to up to 500 receivers",
            Operation::List => "List recent send requests",
            Operation::SmsList => "List per-receiver results of one send request",
            Operation::Remain => "Get the number of messages the account can still send",
            Operation::Cancel => "Cancel a reserved send",
        }
    }

    /// Name of the additional-fields collection for this operation, if it has one.
    pub fn additional_fields_key(&self) -> Option<&'static str> {
        match self {
            Operation::Send => Some("additionalFields"),
            Operation::SendMass => Some("additionalFieldsMass"),
            Operation::List => Some("additionalFieldsList"),
            Operation::SmsList => Some("additionalFieldsSmsList"),
            Operation::Remain | Operation::Cancel => None,
        }
    }

    /// JSON schema for the item parameters this operation reads.
    ///
    /// Only presence and coarse types are checked here; the recipient list
    /// of a bulk send is validated when the request is built.
    pub fn schema(&self) -> Value {
        match self {
            Operation::Send => json!({
                "type": "object",
                "required": ["sender", "receiver", "msg"],
                "properties": {
                    "sender": { "type": "string", "minLength": 1 },
                    "receiver": { "type": "string", "minLength": 1 },
                    "msg": { "type": "string", "minLength": 1 },
                    "additionalFields": { "type": ["object", "null"] }
                }
            }),
            Operation::SendMass => json!({
                "type": "object",
                "required": ["sender", "msgType", "recipients"],
                "properties": {
                    "sender": { "type": "string", "minLength": 1 },
                    "msgType": { "type": "string", "enum": ["SMS", "LMS", "MMS"] },
                    "recipients": {},
                    "additionalFieldsMass": { "type": ["object", "null"] }
                }
            }),
            Operation::List => json!({
                "type": "object",
                "properties": {
                    "additionalFieldsList": { "type": ["object", "null"] }
                }
            }),
            Operation::SmsList => json!({
                "type": "object",
                "required": ["mid"],
                "properties": {
                    "mid": { "type": ["string", "integer"], "minLength": 1 },
                    "additionalFieldsSmsList": { "type": ["object", "null"] }
                }
            }),
            Operation::Remain => json!({ "type": "object" }),
            Operation::Cancel => json!({
                "type": "object",
                "required": ["mid"],
                "properties": {
                    "mid": { "type": ["string", "integer"], "minLength": 1 }
                }
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::Operation;

    #[test]
    fn test_operation_tags() {
        let tags: Vec<String> = Operation::iter().map(|op| op.as_str().to_string()).collect();
        assert_eq!(tags, ["send", "sendMass", "list", "smsList", "remain", "cancel"]);
        assert_eq!(Operation::from_str("smsList").unwrap(), Operation::SmsList);
        assert!(Operation::from_str("sms_list").is_err());
    }

    #[test]
    fn test_operation_endpoints() {
        assert_eq!(Operation::SendMass.endpoint(), "/send_mass/");
        assert_eq!(Operation::SmsList.endpoint(), "/sms_list/");
        assert_eq!(Operation::Remain.endpoint(), "/remain/");
    }

    #[test]
    fn test_operation_serde_matches_tag() {
        assert_eq!(serde_json::to_value(Operation::SendMass).unwrap(), "sendMass");
        let op: Operation = serde_json::from_value("cancel".into()).unwrap();
        assert_eq!(op, Operation::Cancel);
    }
}
