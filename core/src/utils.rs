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

//! Utility functions and types.

use std::fmt::Debug;

/// Redacts secrets for `Debug` output.
///
/// - Text shorter than 12 characters is replaced entirely.
/// - Longer text keeps its first and last three characters so different values can be told apart.
/// - Binary secrets (decoded keys) only reveal their length.
pub enum Redact<'a> {
    /// A textual secret such as a SAS token.
    Text(&'a str),
    /// A binary secret such as a decoded account key.
    Bytes(&'a [u8]),
}

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact::Text(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact::Text(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact::Text(value.as_deref().unwrap_or_default())
    }
}

impl<'a> From<&'a [u8]> for Redact<'a> {
    fn from(value: &'a [u8]) -> Self {
        Redact::Bytes(value)
    }
}

impl<'a> From<&'a Vec<u8>> for Redact<'a> {
    fn from(value: &'a Vec<u8>) -> Self {
        Redact::Bytes(value.as_slice())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Redact::Text(v) if v.is_empty() => f.write_str("EMPTY"),
            Redact::Text(v) if v.len() < 12 || !v.is_ascii() => f.write_str("***"),
            Redact::Text(v) => {
                let length = v.len();
                write!(f, "{}***{}", &v[..3], &v[length - 3..])
            }
            Redact::Bytes(v) if v.is_empty() => f.write_str("EMPTY"),
            Redact::Bytes(v) => write!(f, "<{} bytes>", v.len()),
        }
    }
}
