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

use crate::raw::oio;
use crate::*;

/// Entry is the file/dir entry returned by `Lister`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Path of the entry, relative to the operator's root.
    path: String,
    /// Metadata of the entry.
    metadata: Metadata,
}

impl Entry {
    /// Create an entry with the given path and metadata.
    ///
    /// # Notes
    ///
    /// This function is crate internal only. Users don't have public
    /// methods to construct an entry with arbitrary metadata.
    pub(crate) fn new(path: String, metadata: Metadata) -> Self {
        Self { path, metadata }
    }

    /// Path of entry. Path is relative to operator's root.
    ///
    /// Only valid in current operator.
    ///
    /// If this entry is a dir, `path` MUST end with `/`.
    /// Otherwise, `path` MUST NOT end with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of entry. Name is the last segment of path.
    ///
    /// If this entry is a dir, `name` MUST end with `/`.
    /// Otherwise, `name` MUST NOT end with `/`.
    pub fn name(&self) -> &str {
        raw::get_basename(&self.path)
    }

    /// Fetch metadata of this entry.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Consume this entry to get its path and metadata.
    pub fn into_parts(self) -> (String, Metadata) {
        (self.path, self.metadata)
    }
}

impl From<oio::Entry> for Entry {
    fn from(v: oio::Entry) -> Self {
        let (path, metadata) = v.into_parts();
        Self { path, metadata }
    }
}
