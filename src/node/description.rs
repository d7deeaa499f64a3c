use serde_json::{Value, json};
use strum::IntoEnumIterator;

use crate::credentials::CREDENTIAL_NAME;

use super::Operation;

pub const NODE_NAME: &str = "aligo";
pub const NODE_DISPLAY_NAME: &str = "Aligo SMS";
pub const NODE_VERSION: u32 = 1;

/// Host-facing description of the node: metadata, operations and the
/// parameters shown for each operation.
pub fn describe() -> Value {
    json!({
        "displayName": NODE_DISPLAY_NAME,
        "name": NODE_NAME,
        "group": ["output"],
        "version": NODE_VERSION,
        "subtitle": "={{$parameter[\"operation\"]}}",
        "description": "Send SMS via Aligo API",
        "defaults": { "name": NODE_DISPLAY_NAME },
        "inputs": ["main"],
        "outputs": ["main"],
        "usableAsTool": true,
        "credentials": [{ "name": CREDENTIAL_NAME, "required": true }],
        "properties": properties(),
    })
}

fn operation_options() -> Vec<Value> {
    let mut options: Vec<Value> = Operation::iter()
        .map(|op| {
            json!({
                "name": op.display_name(),
                "value": op.as_str(),
                "description": op.description(),
                "action": op.display_name(),
            })
        })
        .collect();
    options.sort_by(|a, b| a["name"].as_str().cmp(&b["name"].as_str()));
    options
}

fn show_for(ops: &[Operation]) -> Value {
    let tags: Vec<&str> = ops.iter().map(|op| op.as_str()).collect();
    json!({ "show": { "operation": tags } })
}

fn msg_type_options() -> Value {
    json!([
        { "name": "SMS", "value": "SMS" },
        { "name": "LMS", "value": "LMS" },
        { "name": "MMS", "value": "MMS" }
    ])
}

fn delivery_fields() -> Vec<Value> {
    vec![
        json!({ "displayName": "Title", "name": "title", "type": "string", "default": "", "description": "Message title, LMS/MMS only (max 44 bytes)" }),
        json!({ "displayName": "Reservation Date", "name": "rdate", "type": "string", "default": "", "placeholder": "YYYYMMDD" }),
        json!({ "displayName": "Reservation Time", "name": "rtime", "type": "string", "default": "", "placeholder": "HHMM" }),
        json!({ "displayName": "Test Mode", "name": "testmode_yn", "type": "boolean", "default": false, "description": "Whether to accept the request without delivering it" }),
    ]
}

fn page_fields() -> Vec<Value> {
    vec![
        json!({ "displayName": "Page", "name": "page", "type": "number", "default": 1 }),
        json!({ "displayName": "Page Size", "name": "page_size", "type": "number", "default": 30, "description": "Results per page (30 to 500)" }),
    ]
}

fn properties() -> Value {
    let mut send_fields = vec![json!({
        "displayName": "Message Type",
        "name": "msg_type",
        "type": "options",
        "options": msg_type_options(),
        "default": "SMS",
        "description": "Messages over 90 bytes are sent as LMS"
    })];
    send_fields.extend(delivery_fields());

    let mut list_fields = page_fields();
    list_fields.push(json!({ "displayName": "Start Date", "name": "start_date", "type": "string", "default": "", "placeholder": "YYYYMMDD" }));
    list_fields.push(json!({ "displayName": "Limit Day", "name": "limit_day", "type": "string", "default": "", "placeholder": "YYYYMMDD" }));

    json!([
        {
            "displayName": "Operation",
            "name": "operation",
            "type": "options",
            "noDataExpression": true,
            "options": operation_options(),
            "default": Operation::default().as_str(),
        },
        {
            "displayName": "Sender",
            "name": "sender",
            "type": "string",
            "required": true,
            "displayOptions": show_for(&[Operation::Send, Operation::SendMass]),
            "default": "",
            "placeholder": "01012345678",
            "description": "Registered sender number"
        },
        {
            "displayName": "Receiver",
            "name": "receiver",
            "type": "string",
            "required": true,
            "displayOptions": show_for(&[Operation::Send]),
            "default": "",
            "placeholder": "01098765432,01011112222",
            "description": "Comma-separated receiver numbers (up to 1,000)"
        },
        {
            "displayName": "Message",
            "name": "msg",
            "type": "string",
            "typeOptions": { "rows": 4 },
            "required": true,
            "displayOptions": show_for(&[Operation::Send]),
            "default": "",
            "description": "Message body (up to 2,000 bytes)"
        },
        {
            "displayName": "Message Type",
            "name": "msgType",
            "type": "options",
            "required": true,
            "displayOptions": show_for(&[Operation::SendMass]),
            "options": msg_type_options(),
            "default": "SMS"
        },
        {
            "displayName": "Recipients",
            "name": "recipients",
            "type": "json",
            "required": true,
            "displayOptions": show_for(&[Operation::SendMass]),
            "default": "[\n  {\"receiver\": \"01012345678\", \"msg\": \"message 1\"},\n  {\"receiver\": \"01087654321\", \"msg\": \"message 2\"}\n]",
            "description": "JSON array of {receiver, msg}, at most 500 entries"
        },
        {
            "displayName": "Message ID",
            "name": "mid",
            "type": "string",
            "required": true,
            "displayOptions": show_for(&[Operation::SmsList, Operation::Cancel]),
            "default": ""
        },
        collection(Operation::Send, send_fields),
        collection(Operation::SendMass, delivery_fields()),
        collection(Operation::List, list_fields),
        collection(Operation::SmsList, page_fields()),
    ])
}

fn collection(
    operation: Operation,
    options: Vec<Value>,
) -> Value {
    json!({
        "displayName": "Additional Fields",
        "name": operation.additional_fields_key(),
        "type": "collection",
        "placeholder": "Add Field",
        "default": {},
        "displayOptions": show_for(&[operation]),
        "options": options,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_describe_lists_all_operations() {
        let desc = describe();
        assert_eq!(desc["name"], "aligo");
        assert_eq!(desc["credentials"][0]["name"], "aligoApi");

        let operation = &desc["properties"][0];
        assert_eq!(operation["default"], "send");
        let mut values: Vec<&str> = operation["options"].as_array().unwrap().iter().map(|o| o["value"].as_str().unwrap()).collect();
        values.sort();
        assert_eq!(values, ["cancel", "list", "remain", "send", "sendMass", "smsList"]);
    }

    #[test]
    fn test_describe_collections_match_parameter_keys() {
        let desc = describe();
        let names: Vec<&str> = desc["properties"].as_array().unwrap().iter().filter(|p| p["type"] == "collection").map(|p| p["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["additionalFields", "additionalFieldsMass", "additionalFieldsList", "additionalFieldsSmsList"]);
    }

    #[test]
    fn test_mid_shown_for_detail_and_cancel() {
        let desc = describe();
        let mid = desc["properties"].as_array().unwrap().iter().find(|p| p["name"] == "mid").unwrap();
        assert_eq!(mid["displayOptions"]["show"]["operation"], json!(["smsList", "cancel"]));
    }
}
