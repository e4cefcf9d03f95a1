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

//! http_util contains the util types and functions that used across FileIO.
//!
//! # NOTE
//!
//! This mod is not a part of FileIO's public API. We expose them out to make
//! sure services developers can benefit from them.

mod client;
pub use client::HttpClient;

mod body;
pub use body::HttpBody;

mod header;
pub use header::*;

mod uri;
pub use uri::*;

mod bytes_range;
pub use bytes_range::BytesRange;

mod error;
pub use error::*;
