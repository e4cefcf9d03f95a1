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

use crate::raw::*;
use crate::*;

/// FlatLister will walk dir in bottom up way:
///
/// - List nested dir first
/// - Go back into parent dirs one by one
///
/// Given the following file tree:
///
/// ```txt
/// .
/// ├── dir_x/
/// │   ├── dir_y/
/// │   │   ├── dir_z/
/// │   │   └── file_c
/// │   └── file_b
/// └── file_a
/// ```
///
/// FlatLister will output entries like:
///
/// ```txt
/// dir_x/dir_y/dir_z/file_c
/// dir_x/dir_y/dir_z/
/// dir_x/dir_y/file_b
/// dir_x/dir_y/
/// dir_x/file_a
/// dir_x/
/// ```
///
/// # Note
///
/// There is no guarantee about the order between files and dirs at the same
/// level. We only make sure the nested dirs will show up before parent dirs.
///
/// Especially, for storage services that can't return dirs first, FlatLister
/// may output parent dirs' files before nested dirs, this is expected
/// because files always output directly while listing.
pub struct FlatLister<A: Accessor, L> {
    acc: A,
    root: String,

    next_dir: Option<oio::Entry>,
    active_lister: Vec<(Option<oio::Entry>, L)>,
}

impl<A, L> FlatLister<A, L>
where
    A: Accessor,
{
    /// Create a new flat lister
    pub fn new(acc: A, path: &str) -> FlatLister<A, L> {
        FlatLister {
            acc,
            root: path.to_string(),

            next_dir: Some(oio::Entry::new(path, Metadata::new(EntryMode::DIR))),
            active_lister: vec![],
        }
    }
}

impl<A, L> oio::List for FlatLister<A, L>
where
    A: Accessor<Lister = L>,
    L: oio::List,
{
    async fn next(&mut self) -> Result<Option<oio::Entry>> {
        loop {
            if let Some(de) = self.next_dir.take() {
                let (_, l) = self.acc.list(de.path(), OpList::new()).await?;
                self.active_lister.push((Some(de), l))
            }

            let (de, lister) = match self.active_lister.last_mut() {
                Some((de, lister)) => (de, lister),
                None => return Ok(None),
            };

            match lister.next().await? {
                Some(v) if v.metadata().mode().is_dir() => {
                    self.next_dir = Some(v);
                    continue;
                }
                Some(v) => return Ok(Some(v)),
                None => {
                    match de.take() {
                        Some(de) => {
                            // Only output the dir itself if it's not the
                            // listed root.
                            if de.path() != self.root {
                                return Ok(Some(de));
                            }
                            self.active_lister.pop();
                        }
                        None => {
                            self.active_lister.pop();
                        }
                    }
                    continue;
                }
            }
        }
    }
}

impl<A, L> oio::BlockingList for FlatLister<A, L>
where
    A: Accessor<BlockingLister = L>,
    L: oio::BlockingList,
{
    fn next(&mut self) -> Result<Option<oio::Entry>> {
        loop {
            if let Some(de) = self.next_dir.take() {
                let (_, l) = self.acc.blocking_list(de.path(), OpList::new())?;
                self.active_lister.push((Some(de), l))
            }

            let (de, lister) = match self.active_lister.last_mut() {
                Some((de, lister)) => (de, lister),
                None => return Ok(None),
            };

            match lister.next()? {
                Some(v) if v.metadata().mode().is_dir() => {
                    self.next_dir = Some(v);
                    continue;
                }
                Some(v) => return Ok(Some(v)),
                None => {
                    match de.take() {
                        Some(de) => {
                            if de.path() != self.root {
                                return Ok(Some(de));
                            }
                            self.active_lister.pop();
                        }
                        None => {
                            self.active_lister.pop();
                        }
                    }
                    continue;
                }
            }
        }
    }
}
