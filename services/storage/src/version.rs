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

use chrono::NaiveDate;
use http::HeaderMap;
use log::warn;

use crate::constants::{VERSION_2009_09_19, VERSION_2015_02_21, X_MS_VERSION};

/// Shared Key protocol generation a request is signed with.
///
/// Resolved once per request from its `x-ms-version` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolVersion {
    /// Requests without `x-ms-version`, or with a version before 2009-09-19.
    Legacy,
    /// Requests with `x-ms-version` 2009-09-19 or later.
    Versioned(NaiveDate),
}

impl ProtocolVersion {
    /// Resolve the version from request headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let Some(value) = headers.get(X_MS_VERSION) else {
            return ProtocolVersion::Legacy;
        };

        match value.to_str() {
            Ok(v) => Self::parse(v),
            Err(_) => {
                warn!("x-ms-version is not visible ascii, signing as legacy");
                ProtocolVersion::Legacy
            }
        }
    }

    /// Resolve the version from an `x-ms-version` value like `2009-09-19`.
    ///
    /// Unparseable values fall back to [`ProtocolVersion::Legacy`].
    pub fn parse(value: &str) -> Self {
        let date = match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                warn!("x-ms-version {value:?} is not a valid version ({e}), signing as legacy");
                return ProtocolVersion::Legacy;
            }
        };

        if date >= version_date(VERSION_2009_09_19) {
            ProtocolVersion::Versioned(date)
        } else {
            ProtocolVersion::Legacy
        }
    }

    /// Whether the full 2009-09-19 string-to-sign applies.
    pub fn is_versioned(&self) -> bool {
        matches!(self, ProtocolVersion::Versioned(_))
    }

    /// Whether a `Content-Length` of `0` is signed as an empty field.
    ///
    /// Applies from 2015-02-21 on. Older versions sign the literal `0`.
    pub fn omits_zero_content_length(&self) -> bool {
        match self {
            ProtocolVersion::Legacy => false,
            ProtocolVersion::Versioned(date) => *date >= version_date(VERSION_2015_02_21),
        }
    }
}

fn version_date(version: &str) -> NaiveDate {
    NaiveDate::parse_from_str(version, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}
