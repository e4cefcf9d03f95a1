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

use http::response::Parts;

use crate::Error;

/// Create a new error happened during building request.
pub fn new_request_build_error(err: http::Error) -> Error {
    Error::new(
        crate::ErrorKind::Unexpected,
        "building http request failed",
    )
    .with_operation("http::Request::build")
    .set_source(err)
}

/// Create a new error happened during loading credential.
pub fn new_request_credential_error(err: anyhow::Error) -> Error {
    Error::new(
        crate::ErrorKind::Unexpected,
        "loading credential failed",
    )
    .with_operation("reqsign::LoadCredential")
    .set_source(err)
}

/// Create a new error happened during signing request.
pub fn new_request_sign_error(err: anyhow::Error) -> Error {
    Error::new(crate::ErrorKind::Unexpected, "signing http request failed")
        .with_operation("reqsign::Sign")
        .set_source(err)
}

/// Create a new error converted from `std::io::Error`.
pub fn new_std_io_error(err: std::io::Error) -> Error {
    use std::io::ErrorKind::*;

    let kind = match err.kind() {
        NotFound => crate::ErrorKind::NotFound,
        PermissionDenied => crate::ErrorKind::PermissionDenied,
        AlreadyExists => crate::ErrorKind::AlreadyExists,
        _ => crate::ErrorKind::Unexpected,
    };

    Error::new(kind, "io error happened").set_source(err)
}

/// Create a new error happened during deserializing xml body.
pub fn new_xml_deserialize_error(err: quick_xml::DeError) -> Error {
    Error::new(crate::ErrorKind::Unexpected, "deserialize xml failed").set_source(err)
}

/// Create a new error happened during serializing xml body.
pub fn new_xml_serialize_error(err: quick_xml::DeError) -> Error {
    Error::new(crate::ErrorKind::Unexpected, "serialize xml failed").set_source(err)
}

/// Create a new error happened during deserializing json body.
pub fn new_json_deserialize_error(err: serde_json::Error) -> Error {
    Error::new(crate::ErrorKind::Unexpected, "deserialize json failed").set_source(err)
}

/// Create a new error happened during serializing json body.
pub fn new_json_serialize_error(err: serde_json::Error) -> Error {
    Error::new(crate::ErrorKind::Unexpected, "serialize json failed").set_source(err)
}

/// Add http response parts context onto the error.
pub fn with_error_response_context(mut err: Error, parts: Parts) -> Error {
    err = err.with_context("response_status", parts.status.as_str());

    if let Some(v) = parts.headers.get("x-amz-request-id") {
        if let Ok(v) = v.to_str() {
            err = err.with_context("request_id", v);
        }
    }
    if let Some(v) = parts.headers.get("x-ms-request-id") {
        if let Ok(v) = v.to_str() {
            err = err.with_context("request_id", v);
        }
    }

    err
}
