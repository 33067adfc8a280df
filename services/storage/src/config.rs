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

use log::debug;
use sharedkey_core::hash::base64_decode;
use sharedkey_core::utils::Redact;
use sharedkey_core::{Context, Error, Result};

use crate::connection_string;
use crate::constants::*;
use crate::{ServiceCredentials, ServiceType};

/// Config carries the settings a storage service is built from.
///
/// Every field is optional so that values can be collected from several
/// sources (code, environment, connection string) before [`Config::build`]
/// validates them.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_ACCOUNT_NAME`, then `AZBLOB_ACCOUNT_NAME`
    pub account_name: Option<String>,
    /// Base64 encoded account key, loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_ACCOUNT_KEY`, then `AZBLOB_ACCOUNT_KEY`
    pub account_key: Option<String>,
    /// `sas_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: `AZURE_STORAGE_SAS_TOKEN`
    pub sas_token: Option<String>,
    /// Authorize requests with `sas_token` only, never with Shared Key.
    ///
    /// Defaults to `true` when a `sas_token` is set without an `account_key`.
    pub use_sas_only: Option<bool>,
    /// Use `https`. Defaults to `false`.
    ///
    /// - env value: `AZURE_STORAGE_USE_SSL`
    pub use_ssl: Option<bool>,
    /// Domain appended to `{account}.{service_type}`. Defaults to `core.windows.net`.
    ///
    /// In emulator mode this is the `host:port` of the emulator.
    ///
    /// - env value: `AZURE_STORAGE_BASE_DOMAIN`
    pub base_domain: Option<String>,
    /// Service family. Defaults to [`ServiceType::Blob`].
    ///
    /// - env value: `AZURE_STORAGE_SERVICE_TYPE`
    pub service_type: Option<ServiceType>,
    /// Address the local development emulator: the account goes into the
    /// path instead of the host.
    pub use_emulator: Option<bool>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("account_name", &self.account_name)
            .field("account_key", &Redact::from(&self.account_key))
            .field("sas_token", &Redact::from(&self.sas_token))
            .field("use_sas_only", &self.use_sas_only)
            .field("use_ssl", &self.use_ssl)
            .field("base_domain", &self.base_domain)
            .field("service_type", &self.service_type)
            .field("use_emulator", &self.use_emulator)
            .finish()
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Fields that are already set are kept.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if self.account_name.is_none() {
            self.account_name = ctx
                .env_var(AZURE_STORAGE_ACCOUNT_NAME)
                .or_else(|| ctx.env_var(AZBLOB_ACCOUNT_NAME));
        }

        if self.account_key.is_none() {
            self.account_key = ctx
                .env_var(AZURE_STORAGE_ACCOUNT_KEY)
                .or_else(|| ctx.env_var(AZBLOB_ACCOUNT_KEY));
        }

        if self.sas_token.is_none() {
            self.sas_token = ctx.env_var(AZURE_STORAGE_SAS_TOKEN);
        }

        if self.use_ssl.is_none() {
            if let Some(v) = ctx.env_var(AZURE_STORAGE_USE_SSL) {
                self.use_ssl = Some(parse_bool(AZURE_STORAGE_USE_SSL, &v)?);
            }
        }

        if self.base_domain.is_none() {
            self.base_domain = ctx.env_var(AZURE_STORAGE_BASE_DOMAIN);
        }

        if self.service_type.is_none() {
            if let Some(v) = ctx.env_var(AZURE_STORAGE_SERVICE_TYPE) {
                self.service_type = Some(v.parse()?);
            }
        }

        Ok(self)
    }

    /// Parses a storage connection string into a configuration object.
    ///
    /// The connection string doesn't have to specify all required parameters
    /// because the user is still allowed to set them later directly on the object.
    ///
    /// An example of a connection string looks like:
    ///
    /// ```txt
    /// DefaultEndpointsProtocol=https;
    /// AccountName=mystorageaccount;
    /// AccountKey=Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==;
    /// EndpointSuffix=core.windows.net
    /// ```
    pub fn try_from_connection_string(conn_str: &str, service_type: ServiceType) -> Result<Self> {
        connection_string::parse(conn_str, service_type)
    }

    /// Validate the config and build immutable [`ServiceCredentials`].
    ///
    /// Fails with [`ErrorKind::ConfigInvalid`](sharedkey_core::ErrorKind::ConfigInvalid) when
    ///
    /// - the account name is missing or empty
    /// - the account key is missing and requests are not SAS-only
    /// - requests are SAS-only but no SAS string is set
    /// - the account key is not valid Base64
    pub fn build(self) -> Result<ServiceCredentials> {
        let account_name = match self.account_name {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Error::config_invalid("account name is required")),
        };

        let sas_token = self.sas_token.filter(|v| !v.is_empty());
        let sas_only = self
            .use_sas_only
            .unwrap_or(self.account_key.is_none() && sas_token.is_some());

        if sas_only && sas_token.is_none() {
            return Err(Error::config_invalid(
                "sas token is required when requests are sas only",
            ));
        }

        let account_key = match self.account_key {
            Some(key) => Some(base64_decode(&key).map_err(|e| {
                Error::config_invalid("account key is not valid base64").with_source(e)
            })?),
            None if sas_only => None,
            None => return Err(Error::config_invalid("account key is required")),
        };

        let use_emulator = self.use_emulator.unwrap_or(false);
        let service_type = self.service_type.unwrap_or_default();
        let base_domain = match self.base_domain {
            Some(v) => v,
            None if use_emulator => format!("{DEVSTORE_HOST}:{}", service_type.emulator_port()),
            None => DEFAULT_BASE_DOMAIN.to_string(),
        };

        let cred = ServiceCredentials {
            account_name,
            account_key,
            service_type,
            use_ssl: self.use_ssl.unwrap_or(false),
            base_domain,
            sas_token,
            sas_only,
            use_emulator,
        };
        debug!("built storage credentials: {cred:?}");

        Ok(cred)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Ok(true),
        "false" | "0" | "off" | "no" => Ok(false),
        _ => Err(Error::config_invalid(format!(
            "invalid boolean for {key}: {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharedkey_core::{ErrorKind, StaticEnv};
    use std::collections::HashMap;

    fn ctx_with_envs(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() {
        let ctx = ctx_with_envs(&[
            (AZURE_STORAGE_ACCOUNT_NAME, "mock-account"),
            (AZURE_STORAGE_ACCOUNT_KEY, "bW9jay1rZXk="),
            (AZURE_STORAGE_USE_SSL, "true"),
            (AZURE_STORAGE_BASE_DOMAIN, "localhost"),
            (AZURE_STORAGE_SERVICE_TYPE, "queue"),
        ]);

        let config = Config::default().from_env(&ctx).unwrap();
        assert_eq!(
            config,
            Config {
                account_name: Some("mock-account".to_string()),
                account_key: Some("bW9jay1rZXk=".to_string()),
                use_ssl: Some(true),
                base_domain: Some("localhost".to_string()),
                service_type: Some(ServiceType::Queue),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_from_env_aliases_and_precedence() {
        let ctx = ctx_with_envs(&[
            (AZBLOB_ACCOUNT_NAME, "alias-account"),
            (AZBLOB_ACCOUNT_KEY, "bW9jay1rZXk="),
        ]);
        let config = Config::default().from_env(&ctx).unwrap();
        assert_eq!(config.account_name.as_deref(), Some("alias-account"));

        let config = Config {
            account_name: Some("explicit".to_string()),
            ..Default::default()
        }
        .from_env(&ctx)
        .unwrap();
        assert_eq!(config.account_name.as_deref(), Some("explicit"));
        assert_eq!(config.account_key.as_deref(), Some("bW9jay1rZXk="));
    }

    #[test]
    fn test_from_env_invalid_values() {
        let ctx = ctx_with_envs(&[(AZURE_STORAGE_USE_SSL, "maybe")]);
        let err = Config::default().from_env(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let ctx = ctx_with_envs(&[(AZURE_STORAGE_SERVICE_TYPE, "file")]);
        let err = Config::default().from_env(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_build_defaults() {
        let cred = Config {
            account_name: Some("mock-account".to_string()),
            account_key: Some("bW9jay1rZXk=".to_string()),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(cred.account_name(), "mock-account");
        assert_eq!(cred.account_key(), Some(&b"mock-key"[..]));
        assert_eq!(cred.service_type(), ServiceType::Blob);
        assert!(!cred.use_ssl());
        assert_eq!(cred.base_domain(), "core.windows.net");
        assert!(!cred.is_sas_only());
        assert!(!cred.use_emulator());
    }

    #[test]
    fn test_build_emulator_defaults_base_domain() {
        let cred = Config {
            account_name: Some(DEVSTORE_ACCOUNT_NAME.to_string()),
            account_key: Some(DEVSTORE_ACCOUNT_KEY.to_string()),
            service_type: Some(ServiceType::Table),
            use_emulator: Some(true),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert_eq!(cred.base_domain(), "127.0.0.1:10002");
        assert_eq!(cred.account_key().map(|k| k.len()), Some(64));
    }

    #[test]
    fn test_build_sas_only() {
        let cred = Config {
            account_name: Some("mock-account".to_string()),
            sas_token: Some("?sv=2019-12-12&sig=abc".to_string()),
            ..Default::default()
        }
        .build()
        .unwrap();

        assert!(cred.is_sas_only());
        assert_eq!(cred.account_key(), None);
        assert_eq!(cred.sas_token(), Some("?sv=2019-12-12&sig=abc"));
    }

    #[test]
    fn test_build_failures() {
        let cases = vec![
            ("missing account name", Config {
                account_key: Some("bW9jay1rZXk=".to_string()),
                ..Default::default()
            }),
            ("empty account name", Config {
                account_name: Some(String::new()),
                account_key: Some("bW9jay1rZXk=".to_string()),
                ..Default::default()
            }),
            ("missing account key", Config {
                account_name: Some("mock-account".to_string()),
                ..Default::default()
            }),
            ("sas only without sas token", Config {
                account_name: Some("mock-account".to_string()),
                use_sas_only: Some(true),
                ..Default::default()
            }),
            ("undecodable account key", Config {
                account_name: Some("mock-account".to_string()),
                account_key: Some("mock-key".to_string()),
                ..Default::default()
            }),
        ];

        for (name, config) in cases {
            let err = config.build().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid, "Failed for case: {name}");
        }
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config {
            account_name: Some("mock-account".to_string()),
            account_key: Some(DEVSTORE_ACCOUNT_KEY.to_string()),
            ..Default::default()
        };

        let output = format!("{config:?}");
        assert!(output.contains("mock-account"));
        assert!(!output.contains(DEVSTORE_ACCOUNT_KEY));
    }
}
