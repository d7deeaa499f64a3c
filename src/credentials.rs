//! The `aligoApi` credential: an API key and a user id, plus the
//! request a host issues to check that they are accepted.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::{
    AligoError, Result,
    node::{Operation, RequestEnvelope},
    transport::Transport,
};

/// Credential type name referenced by the node description.
pub const CREDENTIAL_NAME: &str = "aligoApi";
const CREDENTIAL_DISPLAY_NAME: &str = "Aligo API";
const DOCUMENTATION_URL: &str = "https://smartsms.aligo.in/admin/api/info.html";

/// Aligo account credentials. Immutable for the duration of a run.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(alias = "apiKey")]
    api_key: String,
    #[serde(alias = "userId")]
    user_id: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            user_id: user_id.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Checks that both fields were supplied. The format is left to the provider.
    pub fn ensure_present(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(AligoError::Credential("apiKey is required".to_string()));
        }
        if self.user_id.is_empty() {
            return Err(AligoError::Credential("userId is required".to_string()));
        }
        Ok(())
    }

    /// The `key` and `user_id` form fields every request starts with.
    pub(crate) fn auth_fields(&self) -> Vec<(String, String)> {
        vec![("key".to_string(), self.api_key.clone()), ("user_id".to_string(), self.user_id.clone())]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Credentials").field("api_key", &"<redacted>").field("user_id", &self.user_id).finish()
    }
}

/// Host-facing description of the `aligoApi` credential type.
pub struct CredentialDescriptor;

impl CredentialDescriptor {
    /// Returns the credential definition the host renders and stores.
    pub fn describe() -> serde_json::Value {
        json!({
            "name": CREDENTIAL_NAME,
            "displayName": CREDENTIAL_DISPLAY_NAME,
            "documentationUrl": DOCUMENTATION_URL,
            "properties": [
                {
                    "displayName": "API Key",
                    "name": "apiKey",
                    "type": "string",
                    "typeOptions": { "password": true },
                    "default": "",
                    "required": true,
                    "description": "Aligo SMS API Key"
                },
                {
                    "displayName": "User ID",
                    "name": "userId",
                    "type": "string",
                    "default": "",
                    "required": true,
                    "description": "Aligo User ID"
                }
            ]
        })
    }

    /// The verification request: a balance query carrying only the credentials.
    pub fn test_request(credentials: &Credentials) -> RequestEnvelope {
        RequestEnvelope::new(Operation::Remain.endpoint(), credentials.auth_fields())
    }

    /// Issues the verification request. Credentials are valid iff the transport succeeds.
    pub async fn verify(
        credentials: &Credentials,
        base_url: &str,
        transport: &dyn Transport,
    ) -> Result<()> {
        credentials.ensure_present()?;
        let envelope = Self::test_request(credentials);
        transport.post_form(&envelope.url(base_url), envelope.form()).await.map_err(|err| AligoError::Credential(err.to_string()))?;
        info!(user_id = credentials.user_id(), "aligo credentials verified");
        Ok(())
    }
}
