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

use std::fmt::{Debug, Formatter};

use sharedkey_core::utils::Redact;

use crate::ServiceType;

/// Immutable credentials and addressing for one storage service.
///
/// Built through [`Config::build`](crate::Config::build), which validates the
/// fields and decodes the account key. The key is only kept as raw bytes.
#[derive(Clone)]
pub struct ServiceCredentials {
    pub(crate) account_name: String,
    pub(crate) account_key: Option<Vec<u8>>,
    pub(crate) service_type: ServiceType,
    pub(crate) use_ssl: bool,
    pub(crate) base_domain: String,
    pub(crate) sas_token: Option<String>,
    pub(crate) sas_only: bool,
    pub(crate) use_emulator: bool,
}

impl ServiceCredentials {
    /// Storage account name.
    pub fn account_name(&self) -> &str {
        &self.account_name
    }

    /// Decoded account key, absent for SAS-only credentials built without one.
    pub fn account_key(&self) -> Option<&[u8]> {
        self.account_key.as_deref()
    }

    /// Service family these credentials address.
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Whether requests go over `https`.
    pub fn use_ssl(&self) -> bool {
        self.use_ssl
    }

    /// Base domain, or `host:port` of the emulator.
    pub fn base_domain(&self) -> &str {
        &self.base_domain
    }

    /// Pre-computed shared access signature.
    pub fn sas_token(&self) -> Option<&str> {
        self.sas_token.as_deref()
    }

    /// Whether requests are authorized by the SAS string alone.
    pub fn is_sas_only(&self) -> bool {
        self.sas_only
    }

    /// Whether requests address the local development emulator.
    pub fn use_emulator(&self) -> bool {
        self.use_emulator
    }
}

impl Debug for ServiceCredentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceCredentials")
            .field("account_name", &self.account_name)
            .field(
                "account_key",
                &Redact::from(self.account_key.as_deref().unwrap_or_default()),
            )
            .field("service_type", &self.service_type)
            .field("use_ssl", &self.use_ssl)
            .field("base_domain", &self.base_domain)
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("sas_only", &self.sas_only)
            .field("use_emulator", &self.use_emulator)
            .finish()
    }
}
