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

use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use crate::Error;

/// Services that FileIO supports
///
/// # Notes
///
/// - Scheme is `non_exhaustive`, new variant COULD be added at any time.
/// - New variant SHOULD be added in alphabet orders,
/// - Users MUST NOT rely on its order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Scheme {
    /// [azblob][crate::services::Azblob]: Azure Storage Blob services.
    Azblob,
    /// [fs][crate::services::Fs]: POSIX alike file system.
    Fs,
    /// [gcs][crate::services::Gcs]: Google Cloud Storage backend.
    Gcs,
    /// [memory][crate::services::Memory]: In memory backend support.
    Memory,
    /// [s3][crate::services::S3]: AWS S3 alike services.
    S3,
    /// Custom that allow users to implement services outside of FileIO.
    ///
    /// # NOTE
    ///
    /// - Custom must not overwrite any existing services name.
    /// - Custom must be in lower case.
    Custom(&'static str),
}

impl Scheme {
    /// Convert self into static str.
    pub fn into_static(self) -> &'static str {
        self.into()
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Self::Memory
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.to_lowercase();
        match s.as_str() {
            // Notes:
            //
            // The original project shipped one path hierarchy per provider.
            // All s3-compatible providers collapse into the s3 service here,
            // we keep their prefixes as aliases for easy migration.
            "s3" | "s3a" | "minio" | "r2" | "wasabi" | "s3c" => Ok(Scheme::S3),
            "gcs" | "gs" => Ok(Scheme::Gcs),
            "azblob" | "az" | "azure" | "abfs" => Ok(Scheme::Azblob),
            "fs" | "file" => Ok(Scheme::Fs),
            "memory" | "mem" => Ok(Scheme::Memory),
            _ => Ok(Scheme::Custom(Box::leak(s.into_boxed_str()))),
        }
    }
}

impl From<Scheme> for &'static str {
    fn from(v: Scheme) -> Self {
        match v {
            Scheme::Azblob => "azblob",
            Scheme::Fs => "fs",
            Scheme::Gcs => "gcs",
            Scheme::Memory => "memory",
            Scheme::S3 => "s3",
            Scheme::Custom(v) => v,
        }
    }
}

impl From<Scheme> for String {
    fn from(v: Scheme) -> Self {
        v.into_static().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        let cases = vec![
            ("s3", Scheme::S3),
            ("minio", Scheme::S3),
            ("r2", Scheme::S3),
            ("wasabi", Scheme::S3),
            ("gs", Scheme::Gcs),
            ("az", Scheme::Azblob),
            ("file", Scheme::Fs),
            ("mem", Scheme::Memory),
        ];

        for (input, expect) in cases {
            assert_eq!(Scheme::from_str(input).unwrap(), expect, "{input}")
        }
    }
}
