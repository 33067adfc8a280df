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

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use sharedkey_core::Error;

/// Storage service family a set of credentials talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServiceType {
    /// Blob storage.
    #[default]
    Blob,
    /// Message queues.
    Queue,
    /// Structured tables.
    Table,
}

impl ServiceType {
    /// Tag used as the second host label, e.g. `account.blob.core.windows.net`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Blob => "blob",
            ServiceType::Queue => "queue",
            ServiceType::Table => "table",
        }
    }

    /// Port the local development emulator serves this service on.
    pub fn emulator_port(&self) -> u16 {
        match self {
            ServiceType::Blob => 10000,
            ServiceType::Queue => 10001,
            ServiceType::Table => 10002,
        }
    }
}

impl Display for ServiceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blob" | "blobs" => Ok(ServiceType::Blob),
            "queue" | "queues" => Ok(ServiceType::Queue),
            "table" | "tables" => Ok(ServiceType::Table),
            _ => Err(Error::config_invalid(format!("unknown service type: {s}"))),
        }
    }
}
