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

//! Format codecs keyed by file extension.
//!
//! The codecs are free functions around serde so that callers can decode
//! whatever [`crate::Operator::read`] returned, or encode a value before
//! [`crate::Operator::write`], purely driven by the filename suffix.
//!
//! ```
//! # use anyhow::Result;
//! use fileio::codec;
//! use fileio::Operator;
//! use serde_json::Value;
//!
//! # async fn test(op: Operator) -> Result<()> {
//! let bs = op.read("config/app.json").await?;
//! let value: Value = codec::from_json_slice(&bs.to_bytes())?;
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::*;

/// Format of a file, decided purely by its filename suffix.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum Format {
    /// `.json`: one JSON document.
    Json,
    /// `.jsonl` or `.ndjson`: newline delimited JSON documents.
    JsonLines,
    /// `.yaml` or `.yml`: one YAML document.
    Yaml,
    /// `.txt`: plain utf-8 text.
    Text,
    /// Everything else: raw bytes.
    Bytes,
}

impl Format {
    /// Detect the format of the given path by its extension.
    ///
    /// Unknown or missing extensions fall back to [`Format::Bytes`]. The
    /// python-only formats of the original surface (`.pkl`, `.pt`,
    /// `.tfrecords`) land here too.
    pub fn from_path(path: &str) -> Format {
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Format::Json,
            "jsonl" | "ndjson" => Format::JsonLines,
            "yaml" | "yml" => Format::Yaml,
            "txt" | "text" | "log" => Format::Text,
            _ => Format::Bytes,
        }
    }
}

/// Decode a JSON document.
pub fn from_json_slice<T: DeserializeOwned>(bs: &[u8]) -> Result<T> {
    serde_json::from_slice(bs).map_err(|e| {
        Error::new(ErrorKind::Unexpected, "deserialize json failed").set_source(e)
    })
}

/// Encode a value into a JSON document.
pub fn to_json_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| Error::new(ErrorKind::Unexpected, "serialize json failed").set_source(e))
}

/// Decode newline delimited JSON documents.
///
/// Empty lines are skipped, which matches how most jsonl writers behave.
pub fn from_json_lines_slice<T: DeserializeOwned>(bs: &[u8]) -> Result<Vec<T>> {
    let content = std::str::from_utf8(bs).map_err(|e| {
        Error::new(ErrorKind::Unexpected, "jsonl content is not valid utf-8").set_source(e)
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                Error::new(ErrorKind::Unexpected, "deserialize json line failed")
                    .with_context("line", line)
                    .set_source(e)
            })
        })
        .collect()
}

/// Encode values into newline delimited JSON documents.
pub fn to_json_lines_vec<T: Serialize>(values: &[T]) -> Result<Vec<u8>> {
    let mut bs = Vec::new();
    for value in values {
        serde_json::to_writer(&mut bs, value)
            .map_err(|e| Error::new(ErrorKind::Unexpected, "serialize json failed").set_source(e))?;
        bs.push(b'\n');
    }
    Ok(bs)
}

/// Decode a YAML document.
pub fn from_yaml_slice<T: DeserializeOwned>(bs: &[u8]) -> Result<T> {
    serde_yaml::from_slice(bs).map_err(|e| {
        Error::new(ErrorKind::Unexpected, "deserialize yaml failed").set_source(e)
    })
}

/// Encode a value into a YAML document.
pub fn to_yaml_vec<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let content = serde_yaml::to_string(value)
        .map_err(|e| Error::new(ErrorKind::Unexpected, "serialize yaml failed").set_source(e))?;
    Ok(content.into_bytes())
}

/// Decode plain utf-8 text.
pub fn from_text_slice(bs: &[u8]) -> Result<String> {
    String::from_utf8(bs.to_vec()).map_err(|e| {
        Error::new(ErrorKind::Unexpected, "content is not valid utf-8").set_source(e)
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde::Serialize;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u64,
    }

    #[test]
    fn test_format_from_path() {
        let cases = vec![
            ("data/config.json", Format::Json),
            ("data/events.jsonl", Format::JsonLines),
            ("data/events.ndjson", Format::JsonLines),
            ("conf/app.yaml", Format::Yaml),
            ("conf/app.YML", Format::Yaml),
            ("notes.txt", Format::Text),
            ("model.pkl", Format::Bytes),
            ("weights.pt", Format::Bytes),
            ("dataset.tfrecords", Format::Bytes),
            ("no_extension", Format::Bytes),
        ];

        for (path, expect) in cases {
            assert_eq!(Format::from_path(path), expect, "{path}")
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let value = Sample {
            name: "fileio".to_string(),
            count: 42,
        };

        let bs = to_json_vec(&value).unwrap();
        let parsed: Sample = from_json_slice(&bs).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_json_lines() {
        let values = vec![
            Sample {
                name: "a".to_string(),
                count: 1,
            },
            Sample {
                name: "b".to_string(),
                count: 2,
            },
        ];

        let bs = to_json_lines_vec(&values).unwrap();
        assert_eq!(bs.iter().filter(|b| **b == b'\n').count(), 2);

        let parsed: Vec<Sample> = from_json_lines_slice(&bs).unwrap();
        assert_eq!(parsed, values);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let value = Sample {
            name: "fileio".to_string(),
            count: 42,
        };

        let bs = to_yaml_vec(&value).unwrap();
        let parsed: Sample = from_yaml_slice(&bs).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_text() {
        assert_eq!(from_text_slice(b"hello").unwrap(), "hello");
        assert!(from_text_slice(&[0xff, 0xfe]).is_err());
    }
}
