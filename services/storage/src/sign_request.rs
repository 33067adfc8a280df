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

use std::fmt::Write;
use std::sync::Arc;

use http::header::{self, HeaderName, HeaderValue};
use http::request::Parts;
use log::debug;
use sharedkey_core::hash::base64_hmac_sha256;
use sharedkey_core::{Error, Result, SigningRequest};

use crate::canonical::CanonicalForm;
use crate::constants::CONTENT_MD5;
use crate::{ProtocolVersion, ServiceCredentials, ServiceType};

/// RequestSigner implements Shared Key authorization for the storage services.
///
/// - [Authorize with Shared Key](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    cred: Arc<ServiceCredentials>,
}

impl RequestSigner {
    /// Create a new signer for the given credentials.
    pub fn new(cred: Arc<ServiceCredentials>) -> Self {
        Self { cred }
    }

    /// Compute the Base64 signature of the request.
    ///
    /// The protocol version is resolved once from the request's `x-ms-version`.
    pub fn generate_signature(&self, parts: &Parts) -> Result<String> {
        let req = SigningRequest::build(parts);
        let version = ProtocolVersion::from_headers(&req.headers);

        let Some(key) = self.cred.account_key() else {
            return Err(Error::config_invalid(
                "account key is required for shared key signing",
            ));
        };

        let string_to_sign = self.string_to_sign(&req, version)?;
        Ok(base64_hmac_sha256(key, string_to_sign.as_bytes()))
    }

    /// Sign the request by inserting `Authorization: SharedKey {account}:{signature}`.
    ///
    /// Must be the last mutation of the request: any header changed afterwards
    /// invalidates the signature.
    pub fn sign(&self, parts: &mut Parts) -> Result<()> {
        let signature = self.generate_signature(parts)?;

        let mut value: HeaderValue = format!(
            "SharedKey {}:{}",
            self.cred.account_name(),
            signature
        )
        .parse()?;
        value.set_sensitive(true);
        parts.headers.insert(header::AUTHORIZATION, value);

        Ok(())
    }

    /// Construct string to sign
    ///
    /// ## Legacy format
    ///
    /// ```text
    /// VERB + "\n" +
    /// Content-MD5 + "\n" +
    /// Content-Type + "\n" +
    /// Date + "\n" +
    /// CanonicalizedHeaders + "\n" +   (omitted by the table service)
    /// CanonicalizedResource;
    /// ```
    ///
    /// ## 2009-09-19 format
    ///
    /// ```text
    /// VERB + "\n" +
    /// Content-Encoding + "\n" +
    /// Content-Language + "\n" +
    /// Content-Length + "\n" +
    /// Content-MD5 + "\n" +
    /// Content-Type + "\n" +
    /// Date + "\n" +
    /// If-Modified-Since + "\n" +
    /// If-Match + "\n" +
    /// If-None-Match + "\n" +
    /// If-Unmodified-Since + "\n" +
    /// Range + "\n" +
    /// CanonicalizedHeaders + "\n" +
    /// CanonicalizedResource;
    /// ```
    ///
    /// Absent headers are written as empty strings. From 2015-02-21 on, a
    /// `Content-Length` of `0` is written as an empty string too.
    pub fn string_to_sign(&self, req: &SigningRequest, version: ProtocolVersion) -> Result<String> {
        let canonical = CanonicalForm::build(req, self.cred.account_name(), version)?;
        let content_md5 = HeaderName::from_static(CONTENT_MD5);

        let mut s = String::with_capacity(256);
        writeln!(&mut s, "{}", req.method.as_str())?;

        match version {
            ProtocolVersion::Legacy => {
                writeln!(&mut s, "{}", req.header_get_or_default(&content_md5)?)?;
                writeln!(&mut s, "{}", req.header_get_or_default(&header::CONTENT_TYPE)?)?;
                writeln!(&mut s, "{}", req.header_get_or_default(&header::DATE)?)?;
                if self.cred.service_type() != ServiceType::Table {
                    writeln!(&mut s, "{}", canonical.headers)?;
                }
            }
            ProtocolVersion::Versioned(_) => {
                writeln!(
                    &mut s,
                    "{}",
                    req.header_get_or_default(&header::CONTENT_ENCODING)?
                )?;
                writeln!(
                    &mut s,
                    "{}",
                    req.header_get_or_default(&header::CONTENT_LANGUAGE)?
                )?;
                let content_length = req.header_get_or_default(&header::CONTENT_LENGTH)?;
                if content_length == "0" && version.omits_zero_content_length() {
                    writeln!(&mut s)?;
                } else {
                    writeln!(&mut s, "{}", content_length)?;
                }
                for name in [
                    &content_md5,
                    &header::CONTENT_TYPE,
                    &header::DATE,
                    &header::IF_MODIFIED_SINCE,
                    &header::IF_MATCH,
                    &header::IF_NONE_MATCH,
                    &header::IF_UNMODIFIED_SINCE,
                    &header::RANGE,
                ] {
                    writeln!(&mut s, "{}", req.header_get_or_default(name)?)?;
                }
                writeln!(&mut s, "{}", canonical.headers)?;
            }
        }
        write!(&mut s, "{}", canonical.resource)?;

        debug!("string to sign: {}", &s);

        Ok(s)
    }
}
