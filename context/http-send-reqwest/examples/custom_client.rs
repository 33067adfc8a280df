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

use anyhow::Result;
use bytes::Bytes;
use sharedkey_core::Context;
use sharedkey_http_send_reqwest::ReqwestHttpSend;
use std::time::Duration;

fn main() -> Result<()> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("sharedkey-example/0.1")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    // Anonymous listing against the local emulator, expected to be rejected.
    let url = "http://127.0.0.1:10000/devstoreaccount1?comp=list";
    println!("GET {url}");

    let req = http::Request::builder()
        .method("GET")
        .uri(url)
        .header("x-ms-version", "2009-09-19")
        .body(Bytes::new())?;

    match ctx.http_send(req) {
        Ok(resp) => {
            println!("Response status: {}", resp.status());
            for (name, value) in resp.headers() {
                println!("  {name}: {value:?}");
            }
        }
        Err(e) => {
            eprintln!("Request failed ({}): {e}", e.kind());
            if let Some(status) = e.status() {
                eprintln!("  status: {status}");
            }
        }
    }

    Ok(())
}
