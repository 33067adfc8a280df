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

use std::sync::Arc;

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue};
use http::{Request, Response, Uri};
use log::debug;
use sharedkey_core::time::{format_http_date, now, DateTime};
use sharedkey_core::{Context, Result};

use crate::constants::X_MS_DATE;
use crate::{RequestSigner, ServiceCredentials, Verb};

/// StorageService builds, signs and executes requests against one storage service.
///
/// Cloning is cheap: credentials are shared read-only.
#[derive(Debug, Clone)]
pub struct StorageService {
    ctx: Context,
    cred: Arc<ServiceCredentials>,
    signer: RequestSigner,
    time: Option<DateTime>,
}

impl StorageService {
    /// Create a new service using `ctx` to send requests.
    pub fn new(ctx: Context, cred: ServiceCredentials) -> Self {
        let cred = Arc::new(cred);
        Self {
            ctx,
            signer: RequestSigner::new(cred.clone()),
            cred,
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Credentials of this service.
    pub fn credentials(&self) -> &ServiceCredentials {
        &self.cred
    }

    /// Signer used by [`StorageService::generate_request`].
    pub fn signer(&self) -> &RequestSigner {
        &self.signer
    }

    /// Build the URL of a resource.
    ///
    /// - host is `{account}.{service_type}.{base_domain}`, or `base_domain` with the
    ///   account as first path segment when addressing the emulator
    /// - option names lose their underscores, values are form-urlencoded, pairs are
    ///   sorted by name
    /// - SAS-only services append the SAS string instead of the options
    pub fn generate_request_uri(&self, path: &str, query: &[(&str, &str)]) -> String {
        let cred = &self.cred;
        let scheme = if cred.use_ssl() { "https" } else { "http" };
        let path = path.trim_start_matches('/');
        let account = cred.account_name();

        let mut uri = if cred.use_emulator() {
            let in_account = path == account
                || path
                    .strip_prefix(account)
                    .is_some_and(|rest| rest.starts_with('/'));
            match path {
                _ if in_account => format!("{scheme}://{}/{path}", cred.base_domain()),
                "" => format!("{scheme}://{}/{account}", cred.base_domain()),
                _ => format!("{scheme}://{}/{account}/{path}", cred.base_domain()),
            }
        } else {
            format!(
                "{scheme}://{account}.{}.{}/{path}",
                cred.service_type(),
                cred.base_domain()
            )
        };

        if cred.is_sas_only() {
            let sas = cred.sas_token().unwrap_or_default().trim_start_matches('?');
            if !sas.is_empty() {
                uri.push('?');
                uri.push_str(sas);
            }
            return uri;
        }

        let mut pairs = query
            .iter()
            .map(|(k, v)| {
                (
                    k.replace('_', ""),
                    form_urlencoded::byte_serialize(v.as_bytes()).collect::<String>(),
                )
            })
            .collect::<Vec<_>>();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));

        for (idx, (k, v)) in pairs.iter().enumerate() {
            uri.push(if idx == 0 { '?' } else { '&' });
            uri.push_str(k);
            uri.push('=');
            uri.push_str(v);
        }

        uri
    }

    /// Build a request ready to be sent.
    ///
    /// Header option names have `_` replaced by `-`. `x-ms-date` and
    /// `Content-Length` are set, then, unless the service is SAS-only, the
    /// request is signed.
    pub fn generate_request(
        &self,
        verb: Verb,
        url: &str,
        headers: &[(&str, &str)],
        payload: Option<Bytes>,
    ) -> Result<Request<Bytes>> {
        let uri: Uri = url.parse()?;
        let body = payload.unwrap_or_default();

        let (mut parts, body) = Request::builder()
            .method(verb.to_method()?)
            .uri(uri)
            .body(body)?
            .into_parts();

        for (k, v) in headers {
            let name = HeaderName::from_bytes(k.replace('_', "-").as_bytes())?;
            parts.headers.insert(name, HeaderValue::from_str(v)?);
        }

        let now_time = self.time.unwrap_or_else(now);
        parts
            .headers
            .insert(X_MS_DATE, HeaderValue::from_str(&format_http_date(now_time))?);
        parts
            .headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));

        if !self.cred.is_sas_only() {
            self.signer.sign(&mut parts)?;
        }

        Ok(Request::from_parts(parts, body))
    }

    /// Build, sign and send a request, returning the raw response.
    ///
    /// A `404` surfaces as [`ErrorKind::NotFound`](sharedkey_core::ErrorKind::NotFound),
    /// any other non-2xx status as
    /// [`ErrorKind::RequestFailed`](sharedkey_core::ErrorKind::RequestFailed).
    pub fn execute(
        &self,
        verb: Verb,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, &str)],
        payload: Option<Bytes>,
    ) -> Result<Response<Bytes>> {
        let url = self.generate_request_uri(path, query);
        let req = self.generate_request(verb, &url, headers, payload)?;

        debug!("sending {verb} request to {}", req.uri().path());
        self.ctx.http_send(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, ServiceType};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use sharedkey_core::ErrorKind;

    fn queue_config() -> Config {
        Config {
            account_name: Some("mock-account".to_string()),
            account_key: Some("bW9jay1rZXk=".to_string()),
            service_type: Some(ServiceType::Queue),
            use_ssl: Some(true),
            base_domain: Some("localhost".to_string()),
            ..Default::default()
        }
    }

    fn service(config: Config) -> StorageService {
        StorageService::new(Context::new(), config.build().unwrap())
    }

    fn test_time() -> DateTime {
        Utc.with_ymd_and_hms(2022, 3, 1, 8, 12, 34).unwrap()
    }

    #[test]
    fn test_generate_request_uri() {
        let service = service(queue_config());

        let cases = vec![
            ("", vec![("comp", "list")], "https://mock-account.queue.localhost/?comp=list"),
            ("queue", vec![], "https://mock-account.queue.localhost/queue"),
            ("/queue", vec![], "https://mock-account.queue.localhost/queue"),
            ("//queue", vec![], "https://mock-account.queue.localhost/queue"),
            (
                "/queue",
                vec![("comp", "list"), ("prefix", "p")],
                "https://mock-account.queue.localhost/queue?comp=list&prefix=p",
            ),
            (
                "/queue",
                vec![("prefix", "p"), ("other", "other")],
                "https://mock-account.queue.localhost/queue?other=other&prefix=p",
            ),
            (
                "/queue",
                vec![("comp", "metadata"), ("message_ttl", "650")],
                "https://mock-account.queue.localhost/queue?comp=metadata&messagettl=650",
            ),
            (
                "/queue",
                vec![("item", "%")],
                "https://mock-account.queue.localhost/queue?item=%25",
            ),
        ];

        for (path, query, expected) in cases {
            assert_eq!(
                service.generate_request_uri(path, &query),
                expected,
                "Failed for path {path:?} and query {query:?}"
            );
        }
    }

    #[test]
    fn test_generate_request_uri_emulator() {
        let service = service(Config {
            account_name: Some("devstoreaccount1".to_string()),
            account_key: Some("bW9jay1rZXk=".to_string()),
            use_emulator: Some(true),
            ..Default::default()
        });

        assert_eq!(
            service.generate_request_uri("/container/blob", &[]),
            "http://127.0.0.1:10000/devstoreaccount1/container/blob"
        );
        assert_eq!(
            service.generate_request_uri("/devstoreaccount1/container", &[]),
            "http://127.0.0.1:10000/devstoreaccount1/container"
        );
        assert_eq!(
            service.generate_request_uri("", &[("comp", "list")]),
            "http://127.0.0.1:10000/devstoreaccount1?comp=list"
        );
        assert_eq!(
            service.generate_request_uri("/devstoreaccount1x", &[]),
            "http://127.0.0.1:10000/devstoreaccount1/devstoreaccount1x"
        );
    }

    #[test]
    fn test_generate_request_uri_sas_only() {
        let service = service(Config {
            account_name: Some("mock-account".to_string()),
            sas_token: Some("?sv=2019-12-12&sig=abc%3D".to_string()),
            use_ssl: Some(true),
            ..Default::default()
        });

        assert_eq!(
            service.generate_request_uri("/container/blob", &[("comp", "list")]),
            "https://mock-account.blob.core.windows.net/container/blob?sv=2019-12-12&sig=abc%3D"
        );
    }

    #[test]
    fn test_generate_request_put_scenario() {
        let service = service(queue_config()).with_time(test_time());

        let req = service
            .generate_request(
                Verb::Put,
                "http://localhost/johnny",
                &[("Content_Type", "plain/xml")],
                None,
            )
            .unwrap();

        assert_eq!(req.method().as_str(), "PUT");
        assert_eq!(req.headers()["content-type"], "plain/xml");
        assert_eq!(req.headers()["content-length"], "0");
        assert_eq!(req.headers()["x-ms-date"], "Tue, 01 Mar 2022 08:12:34 GMT");
        assert_eq!(
            req.headers()["authorization"],
            "SharedKey mock-account:wNAAEuZaoJYrNlLim3aNZpSC4Q7bLEC23xMUTcouPF8="
        );
        assert!(req.body().is_empty());
    }

    #[test]
    fn test_generate_request_sets_payload_length() {
        let service = service(queue_config()).with_time(test_time());

        let req = service
            .generate_request(
                Verb::Put,
                "http://localhost/johnny",
                &[("Content-Length", "999")],
                Some(Bytes::from_static(b"payload")),
            )
            .unwrap();

        assert_eq!(req.headers()["content-length"], "7");
        assert_eq!(req.body().as_ref(), b"payload");
    }

    #[test]
    fn test_generate_request_signature_covers_final_headers() {
        let service = service(queue_config()).with_time(test_time());

        let req = service
            .generate_request(
                Verb::Get,
                "https://mock-account.queue.localhost/queue?comp=list",
                &[("x_ms_version", "2009-09-19"), ("x_ms_meta_name", "a")],
                None,
            )
            .unwrap();

        let (parts, _) = req.into_parts();
        let expected = format!(
            "SharedKey mock-account:{}",
            service.signer().generate_signature(&parts).unwrap()
        );
        assert_eq!(parts.headers["authorization"], expected.as_str());
        assert_eq!(parts.headers["x-ms-version"], "2009-09-19");
        assert_eq!(parts.headers["x-ms-meta-name"], "a");
    }

    #[test]
    fn test_generate_request_merge() {
        let service = service(Config {
            service_type: Some(ServiceType::Table),
            ..queue_config()
        });

        let req = service
            .generate_request(
                Verb::Merge,
                "https://mock-account.table.localhost/mytable(PartitionKey='p',RowKey='r')",
                &[],
                None,
            )
            .unwrap();
        assert_eq!(req.method().as_str(), "MERGE");
        assert!(req.headers().contains_key("authorization"));
    }

    #[test]
    fn test_generate_request_sas_only_is_unsigned() {
        let service = service(Config {
            account_name: Some("mock-account".to_string()),
            sas_token: Some("sv=2019-12-12&sig=abc".to_string()),
            ..Default::default()
        });

        let url = service.generate_request_uri("/container", &[]);
        let req = service
            .generate_request(Verb::Get, &url, &[], None)
            .unwrap();

        assert!(req.headers().get("authorization").is_none());
        assert!(req.headers().contains_key("x-ms-date"));
        assert_eq!(req.uri().query(), Some("sv=2019-12-12&sig=abc"));
    }

    #[test]
    fn test_generate_request_invalid_input() {
        let service = service(queue_config());

        let err = service
            .generate_request(Verb::Get, "http://local host/", &[], None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = service
            .generate_request(Verb::Get, "http://localhost/", &[("bad header", "v")], None)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }
}
