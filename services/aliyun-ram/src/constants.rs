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

use std::time::Duration;

// Env values used in aliyun services.
pub const ALIBABA_CLOUD_ACCESS_KEY_ID: &str = "ALIBABA_CLOUD_ACCESS_KEY_ID";
pub const ALIBABA_CLOUD_ACCESS_KEY_SECRET: &str = "ALIBABA_CLOUD_ACCESS_KEY_SECRET";
pub const ALIBABA_CLOUD_RAM_ENDPOINT: &str = "ALIBABA_CLOUD_RAM_ENDPOINT";
pub const ALIBABA_CLOUD_RAM_MAX_RETRIES: &str = "ALIBABA_CLOUD_RAM_MAX_RETRIES";

pub const DEFAULT_ENDPOINT: &str = "https://ram.aliyuncs.com";
pub const DEFAULT_MAX_RETRIES: usize = 5;
pub const DEFAULT_MAX_BACKOFF: Duration = Duration::from_secs(120);

// Protocol constants sent with every request.
pub const FORMAT: &str = "JSON";
pub const API_VERSION: &str = "2015-05-01";
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION: &str = "1.0";

// Parameter names.
pub const PARAM_ACTION: &str = "Action";
pub const PARAM_FORMAT: &str = "Format";
pub const PARAM_VERSION: &str = "Version";
pub const PARAM_SIGNATURE_METHOD: &str = "SignatureMethod";
pub const PARAM_SIGNATURE_VERSION: &str = "SignatureVersion";
pub const PARAM_SIGNATURE_NONCE: &str = "SignatureNonce";
pub const PARAM_ACCESS_KEY_ID: &str = "AccessKeyId";
pub const PARAM_TIMESTAMP: &str = "Timestamp";
pub const PARAM_SIGNATURE: &str = "Signature";

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
