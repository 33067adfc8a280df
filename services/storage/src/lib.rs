// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Shared Key signing for the blob, queue and table storage services.
//!
//! This crate builds, signs and sends REST requests with the Shared Key
//! authorization scheme. Both the legacy string-to-sign and the one introduced
//! with `x-ms-version: 2009-09-19` are supported; the version is picked per
//! request from its `x-ms-version` header.
//!
//! ## Example
//!
//! ```no_run
//! use sharedkey_core::{Context, OsEnv, Result};
//! use sharedkey_http_send_reqwest::ReqwestHttpSend;
//! use sharedkey_storage::{Config, StorageService, Verb};
//!
//! fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Reads AZURE_STORAGE_ACCOUNT_NAME, AZURE_STORAGE_ACCOUNT_KEY, ...
//!     let cred = Config::default().from_env(&ctx)?.build()?;
//!     let service = StorageService::new(ctx, cred);
//!
//!     let resp = service.execute(
//!         Verb::Get,
//!         "/",
//!         &[("comp", "list")],
//!         &[("x_ms_version", "2009-09-19")],
//!         None,
//!     )?;
//!     println!("Response: {}", resp.status());
//!
//!     Ok(())
//! }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod constants;

mod canonical;
pub use canonical::{
    canonicalize_headers, canonicalize_message, canonicalize_message_versioned, canonicalize_url,
    CanonicalForm,
};

mod config;
pub use config::Config;

mod connection_string;

mod credential;
pub use credential::ServiceCredentials;

mod service;
pub use service::StorageService;

mod service_type;
pub use service_type::ServiceType;

mod sign_request;
pub use sign_request::RequestSigner;

mod verb;
pub use verb::Verb;

mod version;
pub use version::ProtocolVersion;

pub mod validation;
