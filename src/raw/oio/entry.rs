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

use crate::*;

/// Entry is returned by `Lister` or `BlockingLister` to present a path and
/// its corresponding metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    path: String,
    metadata: Metadata,
}

impl Entry {
    /// Create a new entry by its corresponding relative path.
    pub fn new(path: &str, metadata: Metadata) -> Entry {
        Self::with(path.to_string(), metadata)
    }

    /// Create a new entry with given path.
    pub fn with(path: String, metadata: Metadata) -> Entry {
        debug_assert!(
            metadata.mode().is_dir() == path.ends_with('/'),
            "mode {:?} not match with path {}",
            metadata.mode(),
            path
        );

        Entry { path, metadata }
    }

    /// Get the path of entry.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Set path for entry.
    pub fn set_path(&mut self, path: &str) -> &mut Self {
        self.path = path.to_string();
        self
    }

    /// Get the metadata of entry.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Consume self to convert into its path and metadata.
    pub fn into_parts(self) -> (String, Metadata) {
        (self.path, self.metadata)
    }
}
