use std::{sync::Arc, time::Duration};

use crate::{
    AligoError, Config, Result,
    config::DEFAULT_BASE_URL,
    credentials::Credentials,
    node::{AligoNode, Operation, RunPolicy},
    transport::{HttpTransport, Transport},
};

pub struct AligoNodeBuilder {
    operation: Operation,
    credentials: Option<Credentials>,
    base_url: String,
    continue_on_fail: bool,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for AligoNodeBuilder {
    fn default() -> Self {
        Self {
            operation: Operation::default(),
            credentials: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            continue_on_fail: false,
            timeout: None,
            transport: None,
        }
    }
}

impl AligoNodeBuilder {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            ..Self::default()
        }
    }

    /// Starts from a loaded [`Config`]; setters called afterwards override it.
    pub fn from_config(
        operation: Operation,
        config: &Config,
    ) -> Self {
        Self {
            operation,
            credentials: config.credentials.clone(),
            base_url: config.base_url.clone(),
            continue_on_fail: config.continue_on_fail,
            timeout: config.timeout(),
            transport: None,
        }
    }

    pub fn credentials(
        mut self,
        credentials: Credentials,
    ) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn base_url(
        mut self,
        base_url: impl Into<String>,
    ) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn continue_on_fail(
        mut self,
        continue_on_fail: bool,
    ) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }

    /// Request timeout for the default transport. Ignored when a transport is supplied.
    pub fn timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport(
        mut self,
        transport: Arc<dyn Transport>,
    ) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<AligoNode> {
        let credentials = self.credentials.ok_or_else(|| AligoError::Credential(format!("credentials are required for operation '{}'", self.operation.as_str())))?;
        credentials.ensure_present()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.timeout)?),
        };

        Ok(AligoNode::new(self.operation, credentials, self.base_url, RunPolicy::from_continue_on_fail(self.continue_on_fail), transport))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_build_requires_credentials() {
        let err = AligoNodeBuilder::new(Operation::Remain).build().err().unwrap();
        assert!(matches!(err, AligoError::Credential(_)));

        let err = AligoNodeBuilder::new(Operation::Remain).credentials(Credentials::new("k", "")).build().err().unwrap();
        assert_eq!(err, AligoError::Credential("userId is required".to_string()));
    }

    #[test]
    fn test_build_from_config() {
        let config = Config::load_from_str(
            r#"
            base_url = "http://localhost:8080"
            continue_on_fail = true
            [credentials]
            api_key = "k"
            user_id = "u"
            "#,
        )
        .unwrap();
        let node = AligoNodeBuilder::from_config(Operation::List, &config).build().unwrap();
        assert_eq!(node.operation(), Operation::List);
        assert_eq!(node.base_url(), "http://localhost:8080");
        assert_eq!(node.policy(), RunPolicy::ContinueOnFail);
    }

    #[test]
    fn test_setters_override_config() {
        let node = AligoNodeBuilder::from_config(Operation::Send, &Config::default())
            .credentials(Credentials::new("k", "u"))
            .continue_on_fail(false)
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap();
        assert_eq!(node.policy(), RunPolicy::Abort);
        assert_eq!(node.base_url(), "https://apis.aligo.in");
    }
}
