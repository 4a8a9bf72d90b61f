//! Core components for signing Alibaba Cloud RPC requests.
//!
//! This crate provides the foundational types shared by the ramsign crates.
//!
//! ## Overview
//!
//! - [`canonical`]: deterministic, percent-encoded canonical query strings
//! - [`hash`]: the keyed hash used by the signature
//! - [`Context`]: holds the pluggable [`HttpSend`] transport and [`Env`]
//! - [`Error`]: the error taxonomy, including the decoded [`ServiceError`]
//!
//! ## Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use ramsign_core::canonical::canonical_query_string;
//!
//! let mut params = BTreeMap::new();
//! params.insert("RoleName".to_string(), "demo role".to_string());
//! params.insert("Action".to_string(), "GetRole".to_string());
//!
//! assert_eq!(
//!     canonical_query_string(&params),
//!     "Action=GetRole&RoleName=demo%20role"
//! );
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: For sending HTTP requests
//! - [`Env`]: For environment variable access
//!
//! ## Utilities
//!
//! - [`time`]: Time formatting used by the protocol
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod canonical;
pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result, ServiceError};
