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

// Headers
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const CONTENT_MD5: &str = "content-md5";

/// First protocol version signed with the full header list.
pub const VERSION_2009_09_19: &str = "2009-09-19";
/// First protocol version that signs a zero Content-Length as an empty field.
pub const VERSION_2015_02_21: &str = "2015-02-21";

pub const DEFAULT_BASE_DOMAIN: &str = "core.windows.net";

// Env values used by Config::from_env
pub const AZURE_STORAGE_ACCOUNT_NAME: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const AZURE_STORAGE_ACCOUNT_KEY: &str = "AZURE_STORAGE_ACCOUNT_KEY";
pub const AZURE_STORAGE_SAS_TOKEN: &str = "AZURE_STORAGE_SAS_TOKEN";
pub const AZURE_STORAGE_USE_SSL: &str = "AZURE_STORAGE_USE_SSL";
pub const AZURE_STORAGE_BASE_DOMAIN: &str = "AZURE_STORAGE_BASE_DOMAIN";
pub const AZURE_STORAGE_SERVICE_TYPE: &str = "AZURE_STORAGE_SERVICE_TYPE";
pub const AZBLOB_ACCOUNT_NAME: &str = "AZBLOB_ACCOUNT_NAME";
pub const AZBLOB_ACCOUNT_KEY: &str = "AZBLOB_ACCOUNT_KEY";

// Local development emulator defaults.
pub const DEVSTORE_ACCOUNT_NAME: &str = "devstoreaccount1";
pub const DEVSTORE_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
pub const DEVSTORE_HOST: &str = "127.0.0.1";
