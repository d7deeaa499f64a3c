//! # Aligo SMS
//!
//! A workflow node for the Aligo SMS HTTP API. It sends single and bulk
//! messages, queries send history and remaining balance, and cancels
//! reserved sends.
//!
//! ## Core Features
//!
//! - **Typed Requests**: One request shape per operation, serialized to the form-encoded wire format at the edge
//! - **Ordered Item Processing**: One output entry per input item, paired by position
//! - **Run Policy**: Abort on the first failed item, or record it and continue
//! - **Pluggable Transport**: `reqwest` by default, replaceable through the [`Transport`] trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use aligo_sms::{AligoNodeBuilder, Config, InputItem, Operation};
//!
//! let config = Config::create("aligo.toml")?;
//! let node = AligoNodeBuilder::from_config(Operation::Remain, &config).build()?;
//!
//! let entries = node.execute(&[InputItem::default()]).await?;
//! println!("{}", entries[0].json);
//! ```

mod builder;
mod common;
mod config;
mod credentials;
mod error;
mod model;
mod node;
mod transport;
mod utils;

pub use builder::AligoNodeBuilder;
pub use common::Vars;
pub use config::{Config, DEFAULT_BASE_URL};
pub use credentials::{CREDENTIAL_NAME, CredentialDescriptor, Credentials};
pub use error::AligoError;
pub use model::*;
pub use node::*;
pub use transport::{HttpTransport, Transport};

/// Result type alias for Aligo node operations.
pub type Result<T> = std::result::Result<T, AligoError>;
