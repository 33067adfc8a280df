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

use http::header::HeaderName;
use http::HeaderMap;
use http::Method;
use http::Uri;

use crate::Result;

/// Read-only view of the parts of a request that take part in signing.
///
/// The view borrows nothing from the request so that the request can be
/// mutated (for example to insert `Authorization`) after the view was taken.
#[derive(Debug, Clone)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP path, always starting with `/`.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing view from http::request::Parts.
    pub fn build(parts: &http::request::Parts) -> Self {
        Self::from_uri(parts.method.clone(), &parts.uri, parts.headers.clone())
    }

    /// Build a signing view from its components.
    pub fn from_uri(method: Method, uri: &Uri, headers: HeaderMap) -> Self {
        let path = match uri.path() {
            "" => "/".to_string(),
            v => v.to_string(),
        };

        SigningRequest {
            method,
            path,
            query: uri.query().filter(|q| !q.is_empty()).map(str::to_string),
            headers,
        }
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// Get headers whose name starts with given prefix.
    ///
    /// Names are lowercased, values are trimmed and multiple values of the same
    /// header are joined with `,`.
    pub fn header_to_vec_with_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let prefix = prefix.to_lowercase();

        let mut headers = Vec::new();
        for name in self.headers.keys() {
            let name = name.as_str().to_lowercase();
            if !name.starts_with(&prefix) {
                continue;
            }

            let mut values = Vec::new();
            for v in self.headers.get_all(name.as_str()) {
                values.push(v.to_str()?.trim());
            }
            headers.push((name, values.join(",")));
        }

        Ok(headers)
    }

    /// Convert headers to string, sorted by the rendered line.
    ///
    /// ```shell
    /// [(c, d), (a, b)] => "a:b\nc:d"
    /// ```
    pub fn header_to_string(headers: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut lines = headers
            .into_iter()
            .map(|(k, v)| format!("{k}{sep}{v}"))
            .collect::<Vec<_>>();
        lines.sort();

        lines.join(join)
    }

    /// Split the raw query into `(name, value)` pairs without decoding.
    ///
    /// Parameters without `=` yield an empty value.
    pub fn query_to_raw_pairs(&self) -> Vec<(&str, &str)> {
        let Some(query) = self.query.as_deref() else {
            return Vec::new();
        };

        query
            .split('&')
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .collect()
    }

    /// Split the raw query into `(name, value)` pairs, percent decoded.
    ///
    /// Decoding follows `application/x-www-form-urlencoded`, so `+` becomes a space.
    pub fn query_to_decoded_pairs(&self) -> Vec<(String, String)> {
        let Some(query) = self.query.as_deref() else {
            return Vec::new();
        };

        form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Convert sorted query to string.
    ///
    /// ```shell
    /// [(c, d), (a, b)] => "a:b\nc:d"
    /// ```
    pub fn query_to_string(mut query: Vec<(String, String)>, sep: &str, join: &str) -> String {
        let mut s = String::with_capacity(16);

        // Sort via query name, then value.
        query.sort();

        for (idx, (k, v)) in query.into_iter().enumerate() {
            if idx != 0 {
                s.push_str(join);
            }

            s.push_str(&k);
            s.push_str(sep);
            s.push_str(&v);
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use pretty_assertions::assert_eq;

    fn request(uri: &str, headers: &[(&'static str, &'static str)]) -> SigningRequest {
        let mut map = HeaderMap::new();
        for (k, v) in headers {
            map.append(
                HeaderName::from_bytes(k.as_bytes()).unwrap(),
                HeaderValue::from_static(v),
            );
        }
        SigningRequest::from_uri(Method::GET, &uri.parse().unwrap(), map)
    }

    #[test]
    fn test_path_and_query() {
        let req = request("http://localhost", &[]);
        assert_eq!(req.path, "/");
        assert_eq!(req.query, None);

        let req = request("http://localhost/queue?comp=list", &[]);
        assert_eq!(req.path, "/queue");
        assert_eq!(req.query.as_deref(), Some("comp=list"));
    }

    #[test]
    fn test_header_with_prefix() {
        let req = request(
            "http://localhost/",
            &[
                ("Content-Type", "application/xml"),
                ("x-ms-meta-a", " 1 "),
                ("x-ms-meta-a", "2"),
                ("X-MS-Version", "2009-09-19"),
            ],
        );

        let mut headers = req.header_to_vec_with_prefix("x-ms").unwrap();
        headers.sort();
        assert_eq!(
            headers,
            vec![
                ("x-ms-meta-a".to_string(), "1,2".to_string()),
                ("x-ms-version".to_string(), "2009-09-19".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_to_string_sorts_lines() {
        let s = SigningRequest::header_to_string(
            vec![
                ("x-ms-b".to_string(), "2".to_string()),
                ("x-ms-a".to_string(), "1".to_string()),
            ],
            ":",
            "\n",
        );
        assert_eq!(s, "x-ms-a:1\nx-ms-b:2");
    }

    #[test]
    fn test_header_get_or_default() {
        let req = request("http://localhost/", &[("Content-MD5", "abc")]);
        assert_eq!(
            req.header_get_or_default(&HeaderName::from_static("content-md5"))
                .unwrap(),
            "abc"
        );
        assert_eq!(
            req.header_get_or_default(&http::header::RANGE).unwrap(),
            ""
        );
    }

    #[test]
    fn test_query_pairs() {
        let req = request("http://localhost/c?prefix=a%2Fb&flag&name=x+y", &[]);

        assert_eq!(
            req.query_to_raw_pairs(),
            vec![("prefix", "a%2Fb"), ("flag", ""), ("name", "x+y")]
        );
        assert_eq!(
            req.query_to_decoded_pairs(),
            vec![
                ("prefix".to_string(), "a/b".to_string()),
                ("flag".to_string(), "".to_string()),
                ("name".to_string(), "x y".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_to_string() {
        let s = SigningRequest::query_to_string(
            vec![
                ("restype".to_string(), "container".to_string()),
                ("comp".to_string(), "metadata".to_string()),
            ],
            ":",
            "\n",
        );
        assert_eq!(s, "comp:metadata\nrestype:container");
    }
}
