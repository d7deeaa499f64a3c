use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{AligoError, common::Vars};

/// One input item handed to the node by the host.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct InputItem {
    /// upstream item data, carried through untouched
    #[serde(default)]
    pub json: Vars,
    /// parameter values resolved for this item
    #[serde(default)]
    pub parameters: Vars,
}

impl InputItem {
    pub fn new(parameters: Vars) -> Self {
        Self {
            json: Vars::new(),
            parameters,
        }
    }

    pub fn with_json(
        mut self,
        json: Vars,
    ) -> Self {
        self.json = json;
        self
    }
}

/// One output entry, paired with the input item at the same position.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputEntry {
    pub json: Value,
    pub paired_item: usize,
}

impl OutputEntry {
    pub fn success(
        json: Value,
        paired_item: usize,
    ) -> Self {
        Self {
            json,
            paired_item,
        }
    }

    /// The `{ "error": message }` entry recorded under continue-on-fail.
    pub fn failure(
        error: &AligoError,
        paired_item: usize,
    ) -> Self {
        Self {
            json: json!({ "error": error.to_string() }),
            paired_item,
        }
    }

    pub fn is_error(&self) -> bool {
        self.json.get("error").is_some()
    }
}
