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

//! Canonical query string used by RPC style signing.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;
use std::collections::BTreeMap;

/// AsciiSet for [Aliyun RPC signature](https://help.aliyun.com/document_detail/315526.html)
///
/// - Percent encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
/// - Space is encoded as `%20` instead of `+`, `*` is encoded as `%2A`.
pub static RPC_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent encode input with [`RPC_ENCODE_SET`].
///
/// ```
/// use ramsign_core::canonical::percent_encode;
///
/// assert_eq!(percent_encode("a b*c~"), "a%20b%2Ac~");
/// ```
pub fn percent_encode(s: &str) -> String {
    utf8_percent_encode(s, &RPC_ENCODE_SET).to_string()
}

/// Build the canonical query string of the given params.
///
/// Pairs are sorted by the raw key, byte-wise, then joined as
/// `encode(k)=encode(v)` with `&`.
///
/// ```shell
/// {b: "2", a: "1 1"} => "a=1%201&b=2"
/// ```
pub fn canonical_query_string(params: &BTreeMap<String, String>) -> String {
    let mut s = String::with_capacity(params.iter().map(|(k, v)| k.len() + v.len() + 2).sum());

    // BTreeMap<String, _> iterates in byte-wise key order already.
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&percent_encode(k));
        s.push('=');
        s.push_str(&percent_encode(v));
    }

    s
}
