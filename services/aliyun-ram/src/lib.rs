//! Aliyun RAM client with RPC style request signing.
//!
//! This crate signs requests to the [RAM API](https://help.aliyun.com/document_detail/28672.html)
//! with HMAC-SHA1 (signature version 1.0), sends them through the
//! [`HttpSend`](ramsign_core::HttpSend) of a [`Context`](ramsign_core::Context),
//! and retries transport failures and `500`/`503` responses with bounded
//! exponential backoff.
//!
//! ## Quick Start
//!
//! ```no_run
//! use ramsign_aliyun_ram::{Client, Config};
//! use ramsign_core::{Context, OsEnv, Result};
//! use ramsign_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Reads ALIBABA_CLOUD_ACCESS_KEY_ID and ALIBABA_CLOUD_ACCESS_KEY_SECRET.
//!     let config = Config::default().from_env(&ctx);
//!     let client = Client::new(ctx, &config)?.with_max_retries(3);
//!
//!     if !client.role_exists("fc-invoker").await? {
//!         let trust = ramsign_aliyun_ram::PolicyDocument::trust_service("fc.aliyuncs.com");
//!         client
//!             .create_role("fc-invoker", &trust.to_json()?, "invoke functions")
//!             .await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Raw actions
//!
//! Actions without a typed method can be called with [`Client::invoke`]:
//!
//! ```no_run
//! # use ramsign_aliyun_ram::Client;
//! # use ramsign_core::Result;
//! # use std::collections::BTreeMap;
//! # async fn example(client: Client) -> Result<()> {
//! let params = BTreeMap::from([("UserName".to_string(), "alice".to_string())]);
//! let user: serde_json::Value = client.invoke("GetUser", params).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Failed calls return [`ramsign_core::Error`]. Service rejections carry the
//! decoded [`ServiceError`](ramsign_core::ServiceError), so callers can
//! branch on the code:
//!
//! ```no_run
//! # use ramsign_aliyun_ram::Client;
//! # use ramsign_core::Result;
//! # async fn example(client: Client) -> Result<()> {
//! match client.get_role("demo").await {
//!     Ok(resp) => println!("{}", resp.role.arn),
//!     Err(err) if err.code() == Some("EntityNotExist.Role") => println!("missing"),
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::{signature, string_to_sign, RequestSigner};

mod retry;
pub use retry::RetryPolicy;

mod decode;
pub use decode::{decode_response, parse_service_error};

mod client;
pub use client::Client;

pub mod model;
pub use model::PolicyType;

pub mod policy;
pub use policy::PolicyDocument;
