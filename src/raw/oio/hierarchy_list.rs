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

use std::collections::HashSet;

use crate::raw::*;
use crate::*;

/// HierarchyLister is used to make a flat list look like a hierarchy.
///
/// Some services like kv based ones can only scan all keys with a prefix.
/// HierarchyLister converts that flat stream into the immediate children of
/// the listed path, emitting synthetic dir entries for deeper keys.
///
/// For example, a flat scan of `x/` returning:
///
/// ```txt
/// x/a
/// x/y/b
/// x/y/z/c
/// ```
///
/// will be converted into:
///
/// ```txt
/// x/a
/// x/y/
/// ```
pub struct HierarchyLister<L> {
    lister: L,
    path: String,
    visited: HashSet<String>,
    recursive: bool,
}

impl<L> HierarchyLister<L> {
    /// Create a new hierarchy lister over the entries under `path`.
    ///
    /// When `recursive` is true the lister is a pass through: the flat
    /// stream is already what the caller asked for.
    pub fn new(lister: L, path: &str, recursive: bool) -> HierarchyLister<L> {
        let path = if path == "/" {
            "".to_string()
        } else {
            path.to_string()
        };

        HierarchyLister {
            lister,
            path,
            visited: HashSet::default(),
            recursive,
        }
    }

    /// Convert an entry into the immediate child of the listed path.
    ///
    /// Returns `false` if this entry should be ignored: either it's the
    /// listed path itself, or a dir that has been emitted before.
    fn keep_entry(&mut self, e: &mut oio::Entry) -> bool {
        if self.recursive {
            return e.path() != self.path.as_str();
        }

        // If path is not started with prefix, drop it.
        //
        // Ideally, it should never happen. But we just tolerate this in
        // case underlying services behave differently.
        if !e.path().starts_with(&self.path) {
            return false;
        }

        // Dir itself should not be returned in hierarchy page.
        if e.path() == self.path.as_str() {
            return false;
        }

        let prefix_len = self.path.len();

        let idx = if let Some(idx) = e.path()[prefix_len..].find('/') {
            idx + prefix_len + 1
        } else {
            // If there is no `/` in path, it's a normal file, we
            // can return it directly.
            return true;
        };

        // idx == path.len() means it contains only one `/` at the end of
        // path: the entry is an immediate child dir. Only emit it the first
        // time we see it.
        if idx == e.path().len() {
            return self.visited.insert(e.path().to_string());
        }

        // idx < path.len() means there are deeper levels: collapse the
        // entry into its first level dir and emit it once.
        let path = e.path()[..idx].to_string();
        if self.visited.contains(&path) {
            return false;
        }

        *e = oio::Entry::new(&path, Metadata::new(EntryMode::DIR));
        self.visited.insert(path);
        true
    }
}

impl<L: oio::List> oio::List for HierarchyLister<L> {
    async fn next(&mut self) -> Result<Option<oio::Entry>> {
        loop {
            let mut entry = match self.lister.next().await? {
                Some(entry) => entry,
                None => return Ok(None),
            };

            if self.keep_entry(&mut entry) {
                return Ok(Some(entry));
            }
        }
    }
}

impl<L: oio::BlockingList> oio::BlockingList for HierarchyLister<L> {
    fn next(&mut self) -> Result<Option<oio::Entry>> {
        loop {
            let mut entry = match self.lister.next()? {
                Some(entry) => entry,
                None => return Ok(None),
            };

            if self.keep_entry(&mut entry) {
                return Ok(Some(entry));
            }
        }
    }
}
