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

//! Canonical forms of a request, as fed into the Shared Key string-to-sign.
//!
//! ## Reference
//!
//! - [Constructing the canonicalized headers string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-headers-string)
//! - [Constructing the canonicalized resource string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-resource-string)

use http::{HeaderMap, Method, Uri};
use sharedkey_core::{Result, SigningRequest};

use crate::ProtocolVersion;

/// Canonicalized headers and resource of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalForm {
    /// Output of [`canonicalize_headers`].
    pub headers: String,
    /// Output of [`canonicalize_message`] or [`canonicalize_message_versioned`].
    pub resource: String,
}

impl CanonicalForm {
    /// Compute both canonical strings for the given protocol version.
    pub fn build(
        req: &SigningRequest,
        account_name: &str,
        version: ProtocolVersion,
    ) -> Result<Self> {
        let resource = match version {
            ProtocolVersion::Legacy => canonicalize_message(req, account_name),
            ProtocolVersion::Versioned(_) => canonicalize_message_versioned(req, account_name),
        };

        Ok(CanonicalForm {
            headers: canonicalize_headers(req)?,
            resource,
        })
    }
}

/// Render every `x-ms*` header as `name:value`, sorted, one per line.
///
/// Returns an empty string if the request carries no such header.
pub fn canonicalize_headers(req: &SigningRequest) -> Result<String> {
    Ok(SigningRequest::header_to_string(
        req.header_to_vec_with_prefix("x-ms")?,
        ":",
        "\n",
    ))
}

/// Legacy canonical resource: `/{account}{path}` plus `?comp=` if present.
///
/// Every other query parameter is dropped.
pub fn canonicalize_message(req: &SigningRequest, account_name: &str) -> String {
    let comp = req
        .query_to_raw_pairs()
        .into_iter()
        .find(|(k, v)| k.eq_ignore_ascii_case("comp") && !v.is_empty());

    match comp {
        Some((_, v)) => format!("/{}{}?comp={}", account_name, req.path, v),
        None => format!("/{}{}", account_name, req.path),
    }
}

/// Canonical resource for 2009-09-19 and later.
///
/// Query parameters are decoded, rendered as `name:value` with lowercased
/// names, sorted and appended one per line.
pub fn canonicalize_message_versioned(req: &SigningRequest, account_name: &str) -> String {
    let query = req
        .query_to_decoded_pairs()
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect::<Vec<_>>();

    if query.is_empty() {
        return format!("/{}{}", account_name, req.path);
    }

    format!(
        "/{}{}\n{}",
        account_name,
        req.path,
        SigningRequest::query_to_string(query, ":", "\n")
    )
}

/// Canonical resource of a bare URL, such as a copy source path.
///
/// Only the path and query take part in the resource, so no request is needed.
pub fn canonicalize_url(url: &str, account_name: &str, version: ProtocolVersion) -> Result<String> {
    let uri: Uri = url.parse()?;
    let req = SigningRequest::from_uri(Method::GET, &uri, HeaderMap::new());

    Ok(match version {
        ProtocolVersion::Legacy => canonicalize_message(&req, account_name),
        ProtocolVersion::Versioned(_) => canonicalize_message_versioned(&req, account_name),
    })
}
