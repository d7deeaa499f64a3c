use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::time;

/// Message type accepted by the send endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum MsgType {
    #[default]
    SMS,
    LMS,
    MMS,
}

/// One entry of a bulk send.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    #[serde(deserialize_with = "truthy::id")]
    pub receiver: String,
    #[serde(deserialize_with = "truthy::id")]
    pub msg: String,
}

impl Recipient {
    pub fn new(
        receiver: impl Into<String>,
        msg: impl Into<String>,
    ) -> Self {
        Self {
            receiver: receiver.into(),
            msg: msg.into(),
        }
    }
}

/// `additionalFields` of a single send.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    #[serde(default, deserialize_with = "truthy::parsed")]
    pub msg_type: Option<MsgType>,
    #[serde(default, deserialize_with = "truthy::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "truthy::text")]
    pub rdate: Option<String>,
    #[serde(default, deserialize_with = "truthy::text")]
    pub rtime: Option<String>,
    #[serde(default, deserialize_with = "truthy::flag")]
    pub testmode_yn: bool,
}

impl SendOptions {
    /// Reserve the send for `at` (provider local time).
    pub fn reserve_at(
        mut self,
        at: NaiveDateTime,
    ) -> Self {
        let (rdate, rtime) = time::reservation_parts(&at);
        self.rdate = Some(rdate);
        self.rtime = Some(rtime);
        self
    }
}

/// `additionalFieldsMass` of a bulk send.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MassOptions {
    #[serde(default, deserialize_with = "truthy::text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "truthy::text")]
    pub rdate: Option<String>,
    #[serde(default, deserialize_with = "truthy::text")]
    pub rtime: Option<String>,
    #[serde(default, deserialize_with = "truthy::flag")]
    pub testmode_yn: bool,
}

impl MassOptions {
    /// Reserve the send for `at` (provider local time).
    pub fn reserve_at(
        mut self,
        at: NaiveDateTime,
    ) -> Self {
        let (rdate, rtime) = time::reservation_parts(&at);
        self.rdate = Some(rdate);
        self.rtime = Some(rtime);
        self
    }
}

/// `additionalFieldsList` of a history query.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    #[serde(default, deserialize_with = "truthy::parsed")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "truthy::parsed")]
    pub page_size: Option<u32>,
    #[serde(default, deserialize_with = "truthy::text")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "truthy::text")]
    pub limit_day: Option<String>,
}

/// `additionalFieldsSmsList` of a detail query.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    #[serde(default, deserialize_with = "truthy::parsed")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "truthy::parsed")]
    pub page_size: Option<u32>,
}

/// Deserializers for optional host fields.
///
/// A host sends unset optional fields as empty strings, zeros or `false`;
/// all of those mean "leave the field out of the request".
pub(crate) mod truthy {
    use serde::de::Error as _;

    use super::*;

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Value>::deserialize(deserializer)?.and_then(scalar))
    }

    pub fn parsed<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match Option::<Value>::deserialize(deserializer)?.and_then(scalar) {
            Some(s) => s.parse::<T>().map(Some).map_err(|err| D::Error::custom(format!("invalid value '{}': {}", s, err))),
            None => Ok(None),
        }
    }

    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(b)) => b,
            Some(other) => scalar(other).is_some(),
            None => false,
        })
    }

    /// A required value that may arrive as a string or a number.
    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!("expected a string or number, got {}", other))),
        }
    }
}
