//! Typed Aligo requests, one shape per operation, and their form-encoded
//! wire representation.

use serde::Deserialize;
use serde_json::Value;

use crate::{AligoError, Result, common::Vars, credentials::Credentials};

use super::{
    Operation,
    models::{ListOptions, MassOptions, MsgType, PageOptions, Recipient, SendOptions, truthy},
};

/// Upper bound the provider accepts for a single bulk send.
pub const MAX_RECIPIENTS: usize = 500;

/// Endpoint path plus ordered form fields, ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestEnvelope {
    endpoint: &'static str,
    form: Vec<(String, String)>,
}

impl RequestEnvelope {
    pub(crate) fn new(
        endpoint: &'static str,
        form: Vec<(String, String)>,
    ) -> Self {
        Self {
            endpoint,
            form,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        self.endpoint
    }

    pub fn form(&self) -> &[(String, String)] {
        &self.form
    }

    /// Full request url for the given API base.
    pub fn url(
        &self,
        base_url: &str,
    ) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.endpoint)
    }

    /// Looks up a form field by name.
    pub fn field(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.form.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    fn push(
        &mut self,
        key: impl Into<String>,
        value: impl ToString,
    ) {
        self.form.push((key.into(), value.to_string()));
    }

    fn push_opt<V: ToString>(
        &mut self,
        key: &str,
        value: Option<V>,
    ) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    fn push_delivery(
        &mut self,
        title: Option<&String>,
        rdate: Option<&String>,
        rtime: Option<&String>,
        testmode: bool,
    ) {
        self.push_opt("title", title);
        self.push_opt("rdate", rdate);
        self.push_opt("rtime", rtime);
        // Only a set flag is sent; there is no negative marker.
        if testmode {
            self.push("testmode_yn", "Y");
        }
    }
}

/// `/send/`: one message to one or more comma-separated receivers.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub sender: String,
    pub receiver: String,
    pub msg: String,
    #[serde(default, rename = "additionalFields", deserialize_with = "object_or_default")]
    pub options: SendOptions,
}

impl SendRequest {
    pub fn new(
        sender: impl Into<String>,
        receiver: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            msg: msg.into(),
            options: SendOptions::default(),
        }
    }

    pub fn options(
        mut self,
        options: SendOptions,
    ) -> Self {
        self.options = options;
        self
    }
}

/// `/send_mass/`: an individual message per receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMassRequest {
    pub sender: String,
    pub msg_type: MsgType,
    pub recipients: Vec<Recipient>,
    pub options: MassOptions,
}

impl SendMassRequest {
    /// Creates a bulk send, enforcing the 1..=500 recipient bound.
    pub fn new(
        sender: impl Into<String>,
        msg_type: MsgType,
        recipients: Vec<Recipient>,
    ) -> Result<Self> {
        check_recipient_count(recipients.len())?;
        Ok(Self {
            sender: sender.into(),
            msg_type,
            recipients,
            options: MassOptions::default(),
        })
    }

    pub fn options(
        mut self,
        options: MassOptions,
    ) -> Self {
        self.options = options;
        self
    }
}

#[derive(Deserialize)]
struct SendMassParams {
    sender: String,
    #[serde(rename = "msgType")]
    msg_type: MsgType,
    recipients: Value,
    #[serde(default, rename = "additionalFieldsMass", deserialize_with = "object_or_default")]
    options: MassOptions,
}

/// `/list/`: recent send history.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRequest {
    #[serde(default, rename = "additionalFieldsList", deserialize_with = "object_or_default")]
    pub options: ListOptions,
}

/// `/sms_list/`: per-receiver results of one send.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SmsListRequest {
    #[serde(deserialize_with = "truthy::id")]
    pub mid: String,
    #[serde(default, rename = "additionalFieldsSmsList", deserialize_with = "object_or_default")]
    pub options: PageOptions,
}

/// `/cancel/`: cancel a reserved send.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CancelRequest {
    #[serde(deserialize_with = "truthy::id")]
    pub mid: String,
}

/// A request for exactly one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AligoRequest {
    Send(SendRequest),
    SendMass(SendMassRequest),
    List(ListRequest),
    SmsList(SmsListRequest),
    Remain,
    Cancel(CancelRequest),
}

impl AligoRequest {
    /// Builds the request for `operation` from one item's parameters.
    ///
    /// Fails with [`AligoError::Parameter`] when a required parameter is
    /// missing or the recipient list of a bulk send is malformed.
    pub fn from_params(
        operation: Operation,
        params: &Vars,
    ) -> Result<Self> {
        let params: Value = params.clone().into();
        jsonschema::validate(&operation.schema(), &params)?;

        let request = match operation {
            Operation::Send => AligoRequest::Send(from_value(params)?),
            Operation::SendMass => {
                let mass: SendMassParams = from_value(params)?;
                AligoRequest::SendMass(SendMassRequest {
                    sender: mass.sender,
                    msg_type: mass.msg_type,
                    recipients: parse_recipients(&mass.recipients)?,
                    options: mass.options,
                })
            }
            Operation::List => AligoRequest::List(from_value(params)?),
            Operation::SmsList => AligoRequest::SmsList(from_value(params)?),
            Operation::Remain => AligoRequest::Remain,
            Operation::Cancel => AligoRequest::Cancel(from_value(params)?),
        };

        Ok(request)
    }

    pub fn operation(&self) -> Operation {
        match self {
            AligoRequest::Send(_) => Operation::Send,
            AligoRequest::SendMass(_) => Operation::SendMass,
            AligoRequest::List(_) => Operation::List,
            AligoRequest::SmsList(_) => Operation::SmsList,
            AligoRequest::Remain => Operation::Remain,
            AligoRequest::Cancel(_) => Operation::Cancel,
        }
    }

    /// Serializes the request into form fields, credentials first.
    pub fn to_envelope(
        &self,
        credentials: &Credentials,
    ) -> RequestEnvelope {
        let mut envelope = RequestEnvelope::new(self.operation().endpoint(), credentials.auth_fields());

        match self {
            AligoRequest::Send(req) => {
                envelope.push("sender", &req.sender);
                envelope.push("receiver", &req.receiver);
                envelope.push("msg", &req.msg);
                let opts = &req.options;
                envelope.push_opt("msg_type", opts.msg_type);
                envelope.push_delivery(opts.title.as_ref(), opts.rdate.as_ref(), opts.rtime.as_ref(), opts.testmode_yn);
            }
            AligoRequest::SendMass(req) => {
                envelope.push("sender", &req.sender);
                envelope.push("msg_type", req.msg_type);
                envelope.push("cnt", req.recipients.len());
                for (i, recipient) in req.recipients.iter().enumerate() {
                    envelope.push(format!("rec_{}", i + 1), &recipient.receiver);
                    envelope.push(format!("msg_{}", i + 1), &recipient.msg);
                }
                let opts = &req.options;
                envelope.push_delivery(opts.title.as_ref(), opts.rdate.as_ref(), opts.rtime.as_ref(), opts.testmode_yn);
            }
            AligoRequest::List(req) => {
                envelope.push_opt("page", req.options.page);
                envelope.push_opt("page_size", req.options.page_size);
                envelope.push_opt("start_date", req.options.start_date.as_ref());
                envelope.push_opt("limit_day", req.options.limit_day.as_ref());
            }
            AligoRequest::SmsList(req) => {
                envelope.push("mid", &req.mid);
                envelope.push_opt("page", req.options.page);
                envelope.push_opt("page_size", req.options.page_size);
            }
            AligoRequest::Remain => {}
            AligoRequest::Cancel(req) => {
                envelope.push("mid", &req.mid);
            }
        }

        envelope
    }
}

/// Parses the recipient list of a bulk send.
///
/// Accepts JSON text or an already structured array.
pub fn parse_recipients(value: &Value) -> Result<Vec<Recipient>> {
    let parsed = match value {
        Value::String(text) => serde_json::from_str::<Value>(text).map_err(|_| AligoError::Parameter("Recipients must be a valid JSON array".to_string()))?,
        other => other.clone(),
    };

    let Value::Array(entries) = parsed else {
        return Err(AligoError::Parameter("Recipients must be a non-empty array".to_string()));
    };
    check_recipient_count(entries.len())?;

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| serde_json::from_value::<Recipient>(entry).map_err(|err| AligoError::Parameter(format!("Recipient {} is invalid: {}", i + 1, err))))
        .collect()
}

fn check_recipient_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(AligoError::Parameter("Recipients must be a non-empty array".to_string()));
    }
    if count > MAX_RECIPIENTS {
        return Err(AligoError::Parameter(format!("Maximum {} recipients allowed", MAX_RECIPIENTS)));
    }
    Ok(())
}

fn from_value<T: serde::de::DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|err| AligoError::Parameter(err.to_string()))
}

/// An unset additional-fields collection may arrive as `null`.
fn object_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
