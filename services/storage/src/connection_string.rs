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

use std::collections::HashMap;

use http::Uri;
use sharedkey_core::{Error, Result};

use crate::constants::*;
use crate::{Config, ServiceType};

pub(crate) fn parse(conn_str: &str, service_type: ServiceType) -> Result<Config> {
    let key_values = parse_into_key_values(conn_str)?;

    if let Some(config) = collect_development_config(&key_values, service_type)? {
        return Ok(config);
    }

    let protocol = key_values
        .get("DefaultEndpointsProtocol")
        .map(String::as_str)
        .unwrap_or("https"); // Default to HTTPS if not specified
    if protocol != "http" && protocol != "https" {
        return Err(Error::config_invalid(format!(
            "invalid DefaultEndpointsProtocol: {protocol}"
        )));
    }

    let mut config = Config {
        account_name: key_values.get("AccountName").cloned(),
        use_ssl: Some(protocol == "https"),
        base_domain: key_values.get("EndpointSuffix").cloned(),
        service_type: Some(service_type),
        ..Default::default()
    };

    // A SAS takes precedence over the account key.
    if let Some(token) = key_values.get("SharedAccessSignature") {
        config.sas_token = Some(token.clone());
        config.use_sas_only = Some(true);
    } else if let Some(key) = key_values.get("AccountKey") {
        config.account_key = Some(key.clone());
    }

    collect_endpoint(&key_values, service_type, &mut config)?;

    Ok(config)
}

fn endpoint_key(service_type: ServiceType) -> &'static str {
    match service_type {
        ServiceType::Blob => "BlobEndpoint",
        ServiceType::Queue => "QueueEndpoint",
        ServiceType::Table => "TableEndpoint",
    }
}

/// Apply the service's explicit endpoint, if any.
///
/// Two shapes are addressable: `{scheme}://{account}.{service}.{suffix}/` and
/// the path-style `{scheme}://{host}/{account}` used by emulators. Anything
/// else is rejected.
fn collect_endpoint(
    key_values: &HashMap<String, String>,
    service_type: ServiceType,
    config: &mut Config,
) -> Result<()> {
    let key = endpoint_key(service_type);
    let Some(endpoint) = key_values.get(key) else {
        return Ok(());
    };

    let uri: Uri = endpoint.parse().map_err(|e| {
        Error::config_invalid(format!("invalid {key}: {endpoint}")).with_source(e)
    })?;
    let use_ssl = match uri.scheme_str() {
        Some("https") => true,
        Some("http") => false,
        _ => {
            return Err(Error::config_invalid(format!(
                "{key} must be an http or https url: {endpoint}"
            )))
        }
    };
    let Some(authority) = uri.authority().map(|v| v.as_str()) else {
        return Err(Error::config_invalid(format!("{key} has no host: {endpoint}")));
    };

    let path = uri.path().trim_matches('/');
    let (account_name, base_domain, use_emulator) = if path.is_empty() {
        let suffix = authority
            .split_once('.')
            .and_then(|(account, rest)| {
                let suffix = rest.strip_prefix(service_type.as_str())?.strip_prefix('.')?;
                Some((account, suffix))
            })
            .filter(|(account, suffix)| !account.is_empty() && !suffix.is_empty());
        let Some((account, suffix)) = suffix else {
            return Err(Error::config_invalid(format!(
                "{key} host must look like {{account}}.{}.{{suffix}}: {endpoint}",
                service_type.as_str()
            )));
        };
        (account, suffix, false)
    } else if !path.contains('/') {
        (path, authority, true)
    } else {
        return Err(Error::config_invalid(format!(
            "{key} path must be empty or the account name: {endpoint}"
        )));
    };

    let name = config
        .account_name
        .get_or_insert_with(|| account_name.to_string());
    if name.as_str() != account_name {
        return Err(Error::config_invalid(format!(
            "{key} addresses account {account_name} but AccountName is {name}"
        )));
    }
    config.use_ssl = Some(use_ssl);
    config.base_domain = Some(base_domain.to_string());
    config.use_emulator = Some(use_emulator);

    Ok(())
}

fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .trim()
        .replace('\n', "")
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                Error::config_invalid(format!(
                    "invalid connection string, expected '=' in field: {field}"
                ))
            })?;
            Ok((key.to_string(), value.to_string()))
        })
        .collect()
}

fn collect_development_config(
    key_values: &HashMap<String, String>,
    service_type: ServiceType,
) -> Result<Option<Config>> {
    if key_values.get("UseDevelopmentStorage").map(String::as_str) != Some("true") {
        return Ok(None); // Not using development storage
    }

    let account_name = key_values
        .get("AccountName")
        .cloned()
        .unwrap_or(DEVSTORE_ACCOUNT_NAME.to_string());
    let account_key = key_values
        .get("AccountKey")
        .cloned()
        .unwrap_or(DEVSTORE_ACCOUNT_KEY.to_string());

    let (use_ssl, base_domain) = match key_values.get("DevelopmentStorageProxyUri") {
        Some(proxy) => {
            let uri: Uri = proxy.parse().map_err(|e| {
                Error::config_invalid(format!("invalid DevelopmentStorageProxyUri: {proxy}"))
                    .with_source(e)
            })?;
            let authority = uri.authority().ok_or_else(|| {
                Error::config_invalid(format!("DevelopmentStorageProxyUri has no host: {proxy}"))
            })?;
            (uri.scheme_str() == Some("https"), authority.to_string())
        }
        None => (
            false,
            format!("{DEVSTORE_HOST}:{}", service_type.emulator_port()),
        ),
    };

    Ok(Some(Config {
        account_name: Some(account_name),
        account_key: Some(account_key),
        use_ssl: Some(use_ssl),
        base_domain: Some(base_domain),
        service_type: Some(service_type),
        use_emulator: Some(true),
        ..Default::default()
    }))
}
