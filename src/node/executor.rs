//! Per-item execution of an Aligo node.
//!
//! Items are processed strictly in input order, one outbound call at a
//! time. Each item yields one [`ItemResult`]; the run policy decides
//! whether a failed item aborts the run or is recorded as an error entry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::{
    AligoError, Result,
    credentials::Credentials,
    model::{InputItem, OutputEntry},
    transport::Transport,
};

use super::{AligoRequest, Operation};

/// What happens to the run when one item fails.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunPolicy {
    /// Stop at the first failed item and surface its error.
    #[default]
    Abort,
    /// Record `{ "error": message }` for the failed item and keep going.
    ContinueOnFail,
}

impl RunPolicy {
    pub fn from_continue_on_fail(continue_on_fail: bool) -> Self {
        if continue_on_fail { RunPolicy::ContinueOnFail } else { RunPolicy::Abort }
    }
}

/// Outcome of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemResult {
    pub index: usize,
    pub outcome: std::result::Result<Value, AligoError>,
}

impl ItemResult {
    pub fn into_entry(self) -> OutputEntry {
        match self.outcome {
            Ok(json) => OutputEntry::success(json, self.index),
            Err(err) => OutputEntry::failure(&err, self.index),
        }
    }
}

/// An Aligo node configured for one operation.
///
/// Built with [`crate::AligoNodeBuilder`].
pub struct AligoNode {
    operation: Operation,
    credentials: Credentials,
    base_url: String,
    policy: RunPolicy,
    transport: Arc<dyn Transport>,
}

impl AligoNode {
    pub(crate) fn new(
        operation: Operation,
        credentials: Credentials,
        base_url: String,
        policy: RunPolicy,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            operation,
            credentials,
            base_url,
            policy,
            transport,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn policy(&self) -> RunPolicy {
        self.policy
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs every item and returns one entry per item, in input order.
    ///
    /// Under [`RunPolicy::Abort`] the first failure ends the run with an
    /// [`AligoError::Item`] carrying the failing index.
    pub async fn execute(
        &self,
        items: &[InputItem],
    ) -> Result<Vec<OutputEntry>> {
        info!(operation = self.operation.as_str(), items = items.len(), policy = ?self.policy, "aligo run started");

        let mut entries = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let result = ItemResult {
                index,
                outcome: self.execute_item(index, item).await,
            };

            if let Err(err) = &result.outcome {
                match self.policy {
                    RunPolicy::ContinueOnFail => {
                        warn!(item = index, error = %err, "aligo item failed, continuing");
                    }
                    RunPolicy::Abort => {
                        error!(item = index, error = %err, "aligo run aborted");
                        return Err(err.clone().at_item(index));
                    }
                }
            }

            entries.push(result.into_entry());
        }

        info!(operation = self.operation.as_str(), entries = entries.len(), "aligo run finished");
        Ok(entries)
    }

    /// Builds, sends and returns the response of a single item.
    pub async fn execute_item(
        &self,
        index: usize,
        item: &InputItem,
    ) -> Result<Value> {
        let request = AligoRequest::from_params(self.operation, &item.parameters)?;
        self.send(index, &request).await
    }

    /// Sends an already typed request.
    pub async fn send(
        &self,
        index: usize,
        request: &AligoRequest,
    ) -> Result<Value> {
        let envelope = request.to_envelope(&self.credentials);
        let url = envelope.url(&self.base_url);
        debug!(item = index, operation = request.operation().as_str(), endpoint = envelope.endpoint(), fields = envelope.form().len(), "dispatching aligo request");

        self.transport.post_form(&url, envelope.form()).await
    }
}
