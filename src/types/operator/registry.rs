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

use std::collections::HashMap;

use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;

use crate::*;

/// The global registry that `Operator::from_uri` consults.
static GLOBAL_OPERATOR_REGISTRY: Lazy<OperatorRegistry> = Lazy::new(OperatorRegistry::initialized);

/// OperatorFactory builds an operator from a parsed URI.
pub type OperatorFactory = fn(&OperatorUri) -> Result<Operator>;

/// OperatorRegistry maps URI schemes to operator factories.
///
/// The registry is how one path string like `s3://bucket/dir/file` gets
/// dispatched to the right service backend. Provider aliases used by the
/// original per-provider hierarchies (`minio`, `r2`, `wasabi`, `gs`, `az`)
/// are registered onto the same factories.
#[derive(Clone, Debug, Default)]
pub struct OperatorRegistry {
    registry: HashMap<String, OperatorFactory>,
}

impl OperatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            registry: HashMap::new(),
        }
    }

    /// Create a registry with all enabled services registered.
    pub fn initialized() -> Self {
        let mut registry = Self::new();

        #[cfg(feature = "services-azblob")]
        registry.register_aliases(&["azblob", "az", "azure"], factories::azblob);
        #[cfg(feature = "services-fs")]
        registry.register_aliases(&["fs", "file"], factories::fs);
        #[cfg(feature = "services-gcs")]
        registry.register_aliases(&["gcs", "gs"], factories::gcs);
        #[cfg(feature = "services-memory")]
        registry.register_aliases(&["memory", "mem"], factories::memory);
        #[cfg(feature = "services-s3")]
        registry.register_aliases(&["s3", "s3a", "minio", "r2", "wasabi"], factories::s3);

        registry
    }

    /// Register a factory for the given scheme.
    pub fn register<T: Into<String>>(&mut self, scheme: T, factory: OperatorFactory) {
        self.registry.insert(scheme.into(), factory);
    }

    #[allow(dead_code)]
    fn register_aliases(&mut self, schemes: &[&str], factory: OperatorFactory) {
        for scheme in schemes {
            self.register(*scheme, factory);
        }
    }

    /// Parse the given uri and options into an operator.
    pub fn parse(
        &self,
        uri: &str,
        options: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Operator> {
        let uri = OperatorUri::new(uri, options)?;

        let factory = self.registry.get(uri.scheme()).ok_or_else(|| {
            Error::new(
                ErrorKind::ConfigInvalid,
                "could not find any operator factory for the given scheme",
            )
            .with_context("scheme", uri.scheme())
        })?;

        factory(&uri)
    }
}

/// Parsed representation of an operator URI with normalized components.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorUri {
    scheme: String,
    name: Option<String>,
    root: Option<String>,
    options: HashMap<String, String>,
}

impl OperatorUri {
    /// Parse the given uri together with extra options.
    ///
    /// Options from the query string are merged with `extra_options`, the
    /// latter taking precedence.
    pub fn new(
        uri: &str,
        extra_options: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let (scheme, rest) = uri.split_once("://").ok_or_else(|| {
            Error::new(ErrorKind::ConfigInvalid, "uri is missing scheme")
                .with_context("uri", uri)
        })?;

        let scheme = scheme.to_ascii_lowercase();
        if scheme.is_empty() {
            return Err(
                Error::new(ErrorKind::ConfigInvalid, "uri scheme is empty").with_context("uri", uri)
            );
        }

        let (rest, query) = match rest.split_once('?') {
            Some((rest, query)) => (rest, Some(query)),
            None => (rest, None),
        };

        let (name, path) = match rest.split_once('/') {
            Some((name, path)) => (name, path),
            None => (rest, ""),
        };

        let name = if name.is_empty() {
            None
        } else {
            Some(percent_decode_str(name).decode_utf8_lossy().to_string())
        };

        let decoded_path = percent_decode_str(path).decode_utf8_lossy();
        let trimmed = decoded_path.trim_matches('/');
        let root = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };

        let mut options = HashMap::new();
        if let Some(query) = query {
            for pair in query.split('&') {
                if pair.is_empty() {
                    continue;
                }
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                options.insert(
                    percent_decode_str(key)
                        .decode_utf8_lossy()
                        .to_ascii_lowercase(),
                    percent_decode_str(value).decode_utf8_lossy().to_string(),
                );
            }
        }
        for (key, value) in extra_options {
            options.insert(key.to_ascii_lowercase(), value);
        }

        Ok(Self {
            scheme,
            name,
            root,
            options,
        })
    }

    /// Normalized scheme in lowercase.
    pub fn scheme(&self) -> &str {
        self.scheme.as_str()
    }

    /// Name extracted from the URI authority, if present.
    ///
    /// For object stores this is the bucket or container name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Root path (without surrounding slashes) extracted from the URI path,
    /// if present.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Option map merged from the query string and extra options.
    pub fn options(&self) -> &HashMap<String, String> {
        &self.options
    }
}

impl Operator {
    /// Create a new operator from the given uri.
    ///
    /// The scheme of the uri decides the service, the authority carries the
    /// bucket or container name, and the path becomes the root. Additional
    /// config lands in the query string or `options`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fileio::Operator;
    /// use fileio::Result;
    ///
    /// fn main() -> Result<()> {
    ///     let op = Operator::from_uri(
    ///         "s3://my-bucket/path/to/root?region=us-east-1",
    ///         vec![],
    ///     )?;
    ///     Ok(())
    /// }
    /// ```
    pub fn from_uri(
        uri: &str,
        options: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Operator> {
        GLOBAL_OPERATOR_REGISTRY.parse(uri, options)
    }
}

#[allow(dead_code)]
mod factories {
    use super::*;

    fn build_map(
        uri: &OperatorUri,
        name_key: Option<&'static str>,
        root_is_absolute: bool,
    ) -> HashMap<String, String> {
        let mut map = uri.options().clone();

        if let (Some(key), Some(name)) = (name_key, uri.name()) {
            map.insert(key.to_string(), name.to_string());
        }

        if let Some(root) = uri.root() {
            let root = if root_is_absolute {
                format!("/{root}")
            } else {
                root.to_string()
            };
            map.insert("root".to_string(), root);
        }

        map
    }

    #[cfg(feature = "services-azblob")]
    pub(super) fn azblob(uri: &OperatorUri) -> Result<Operator> {
        Ok(Operator::from_map::<services::Azblob>(build_map(uri, Some("container"), true))?.finish())
    }

    #[cfg(feature = "services-fs")]
    pub(super) fn fs(uri: &OperatorUri) -> Result<Operator> {
        Ok(Operator::from_map::<services::Fs>(build_map(uri, None, true))?.finish())
    }

    #[cfg(feature = "services-gcs")]
    pub(super) fn gcs(uri: &OperatorUri) -> Result<Operator> {
        Ok(Operator::from_map::<services::Gcs>(build_map(uri, Some("bucket"), true))?.finish())
    }

    #[cfg(feature = "services-memory")]
    pub(super) fn memory(uri: &OperatorUri) -> Result<Operator> {
        Ok(Operator::from_map::<services::Memory>(build_map(uri, None, true))?.finish())
    }

    #[cfg(feature = "services-s3")]
    pub(super) fn s3(uri: &OperatorUri) -> Result<Operator> {
        Ok(Operator::from_map::<services::S3>(build_map(uri, Some("bucket"), true))?.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_uri_parse() {
        let uri =
            OperatorUri::new("s3://my-bucket/path/to/root?region=us-east-1", vec![]).unwrap();
        assert_eq!(uri.scheme(), "s3");
        assert_eq!(uri.name(), Some("my-bucket"));
        assert_eq!(uri.root(), Some("path/to/root"));
        assert_eq!(uri.options().get("region").map(String::as_str), Some("us-east-1"));
    }

    #[test]
    fn test_operator_uri_without_authority() {
        let uri = OperatorUri::new("fs:///tmp/dir", vec![]).unwrap();
        assert_eq!(uri.scheme(), "fs");
        assert_eq!(uri.name(), None);
        assert_eq!(uri.root(), Some("tmp/dir"));
    }

    #[test]
    fn test_operator_uri_extra_options_override() {
        let uri = OperatorUri::new(
            "s3://bucket?region=us-east-1",
            vec![("region".to_string(), "eu-west-1".to_string())],
        )
        .unwrap();
        assert_eq!(uri.options().get("region").map(String::as_str), Some("eu-west-1"));
    }

    #[test]
    fn test_operator_uri_missing_scheme() {
        assert!(OperatorUri::new("not-a-uri", vec![]).is_err());
    }

    #[cfg(feature = "services-memory")]
    #[test]
    fn test_from_uri_memory() {
        let op = Operator::from_uri("memory:///", vec![]).unwrap();
        assert_eq!(op.info().scheme(), Scheme::Memory);
    }
}
