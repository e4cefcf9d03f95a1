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
use std::sync::Arc;
use std::vec::IntoIter;

use async_trait::async_trait;
use bytes::Buf;
use bytes::Bytes;

use super::core::MemoryCore;
use super::core::MemoryValue;
use crate::raw::*;
use crate::*;

/// In memory service support. (BTreeMap Based)
///
/// All data will be stored in memory and gone once the process exits. It's
/// mainly used for testing and caching.
#[derive(Default, Debug)]
pub struct MemoryBuilder {
    root: Option<String>,
}

impl MemoryBuilder {
    /// Set the root for BTreeMap.
    pub fn root(&mut self, path: &str) -> &mut Self {
        self.root = if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        };

        self
    }
}

impl Builder for MemoryBuilder {
    const SCHEME: Scheme = Scheme::Memory;
    type Accessor = MemoryBackend;

    fn from_map(map: HashMap<String, String>) -> Self {
        let mut builder = MemoryBuilder::default();

        map.get("root").map(|v| builder.root(v));

        builder
    }

    fn build(&mut self) -> Result<Self::Accessor> {
        let root = normalize_root(self.root.as_deref().unwrap_or("/"));

        Ok(MemoryBackend {
            core: Arc::new(MemoryCore::new()),
            root,
        })
    }
}

/// Backend is used to serve `Accessor` support in memory.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    core: Arc<MemoryCore>,
    root: String,
}

impl MemoryBackend {
    fn key(&self, path: &str) -> String {
        build_abs_path(&self.root, path)
    }

    fn blocking_stat_inner(&self, path: &str) -> Result<RpStat> {
        if path == "/" {
            return Ok(RpStat::new(Metadata::new(EntryMode::DIR)));
        }

        let key = self.key(path);

        if let Some(value) = self.core.get(&key)? {
            return Ok(RpStat::new(value.metadata));
        }

        // A dir exists as long as something lives under it.
        if path.ends_with('/') && !self.core.scan(&key)?.is_empty() {
            return Ok(RpStat::new(Metadata::new(EntryMode::DIR)));
        }

        Err(Error::new(ErrorKind::NotFound, "path not found"))
    }

    fn blocking_read_inner(&self, path: &str, args: &OpRead) -> Result<Buffer> {
        let key = self.key(path);

        let Some(value) = self.core.get(&key)? else {
            return Err(Error::new(ErrorKind::NotFound, "path not found"));
        };

        let bs = value.content.to_bytes();
        let range = args.range();

        let bs = match (range.offset(), range.size()) {
            (None, None) => bs,
            // Suffix range, read the last `size` bytes.
            (None, Some(size)) => {
                let start = bs.len().saturating_sub(size as usize);
                bs.slice(start..)
            }
            (Some(offset), size) => {
                let offset = (offset as usize).min(bs.len());
                let end = match size {
                    Some(size) => (offset + size as usize).min(bs.len()),
                    None => bs.len(),
                };
                bs.slice(offset..end)
            }
        };

        Ok(Buffer::from(bs))
    }

    fn blocking_list_inner(&self, path: &str) -> Result<MemoryLister> {
        let prefix = self.key(path);

        let keys = self.core.scan(&prefix)?;

        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let mut rel = key[self.root.len() - 1..].to_string();
            if rel.is_empty() {
                rel = "/".to_string();
            }

            let metadata = match self.core.get(&key)? {
                Some(value) => value.metadata,
                None => continue,
            };

            entries.push(oio::Entry::with(rel, metadata));
        }

        Ok(MemoryLister {
            entries: entries.into_iter(),
        })
    }
}

#[async_trait]
impl Accessor for MemoryBackend {
    type Reader = Buffer;
    type Writer = MemoryWriter;
    type Lister = oio::HierarchyLister<MemoryLister>;
    type BlockingReader = Buffer;
    type BlockingWriter = MemoryWriter;
    type BlockingLister = oio::HierarchyLister<MemoryLister>;

    fn info(&self) -> AccessorInfo {
        let mut info = AccessorInfo::default();
        info.set_scheme(Scheme::Memory)
            .set_root(&self.root)
            .set_name(&format!("{:p}", Arc::as_ptr(&self.core)))
            .set_native_capability(Capability {
                stat: true,

                read: true,
                read_with_range: true,

                write: true,
                write_can_empty: true,
                write_can_multi: true,
                write_with_content_type: true,
                write_with_cache_control: true,

                create_dir: true,
                delete: true,

                list: true,
                list_with_recursive: true,

                copy: true,
                rename: true,

                blocking: true,

                ..Default::default()
            });

        info
    }

    async fn create_dir(&self, path: &str, args: OpCreateDir) -> Result<RpCreateDir> {
        self.blocking_create_dir(path, args)
    }

    async fn stat(&self, path: &str, args: OpStat) -> Result<RpStat> {
        self.blocking_stat(path, args)
    }

    async fn read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::Reader)> {
        self.blocking_read(path, args)
    }

    async fn write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::Writer)> {
        self.blocking_write(path, args)
    }

    async fn delete(&self, path: &str, args: OpDelete) -> Result<RpDelete> {
        self.blocking_delete(path, args)
    }

    async fn list(&self, path: &str, args: OpList) -> Result<(RpList, Self::Lister)> {
        self.blocking_list(path, args)
    }

    async fn copy(&self, from: &str, to: &str, args: OpCopy) -> Result<RpCopy> {
        self.blocking_copy(from, to, args)
    }

    async fn rename(&self, from: &str, to: &str, args: OpRename) -> Result<RpRename> {
        self.blocking_rename(from, to, args)
    }

    fn blocking_create_dir(&self, path: &str, _: OpCreateDir) -> Result<RpCreateDir> {
        let key = self.key(path);

        self.core.set(
            &key,
            MemoryValue {
                metadata: Metadata::new(EntryMode::DIR),
                content: Buffer::new(),
            },
        )?;

        Ok(RpCreateDir::default())
    }

    fn blocking_stat(&self, path: &str, _: OpStat) -> Result<RpStat> {
        self.blocking_stat_inner(path)
    }

    fn blocking_read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::BlockingReader)> {
        let bs = self.blocking_read_inner(path, &args)?;
        let size = bs.len() as u64;

        Ok((RpRead::new().with_size(Some(size)), bs))
    }

    fn blocking_write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::BlockingWriter)> {
        let w = MemoryWriter {
            core: self.core.clone(),
            key: self.key(path),
            args,
            buf: Vec::new(),
        };

        Ok((RpWrite::new(), w))
    }

    fn blocking_delete(&self, path: &str, _: OpDelete) -> Result<RpDelete> {
        let key = self.key(path);

        self.core.delete(&key)?;

        Ok(RpDelete::default())
    }

    fn blocking_list(&self, path: &str, args: OpList) -> Result<(RpList, Self::BlockingLister)> {
        let lister = self.blocking_list_inner(path)?;
        let lister = oio::HierarchyLister::new(lister, path, args.recursive());

        Ok((RpList::default(), lister))
    }

    fn blocking_copy(&self, from: &str, to: &str, _: OpCopy) -> Result<RpCopy> {
        let from = self.key(from);
        let to = self.key(to);

        let Some(value) = self.core.get(&from)? else {
            return Err(Error::new(ErrorKind::NotFound, "path not found"));
        };

        self.core.set(&to, value)?;

        Ok(RpCopy::default())
    }

    fn blocking_rename(&self, from: &str, to: &str, _: OpRename) -> Result<RpRename> {
        let from = self.key(from);
        let to = self.key(to);

        let Some(value) = self.core.get(&from)? else {
            return Err(Error::new(ErrorKind::NotFound, "path not found"));
        };

        self.core.set(&to, value)?;
        self.core.delete(&from)?;

        Ok(RpRename::default())
    }
}

/// MemoryWriter buffers all chunks and commits them on close.
pub struct MemoryWriter {
    core: Arc<MemoryCore>,
    key: String,
    args: OpWrite,

    buf: Vec<Bytes>,
}

impl MemoryWriter {
    fn commit(&mut self) -> Result<()> {
        let content: Buffer = std::mem::take(&mut self.buf).into();

        let mut metadata = Metadata::new(EntryMode::FILE);
        metadata.set_content_length(content.len() as u64);
        if let Some(v) = self.args.content_type() {
            metadata.set_content_type(v);
        }
        if let Some(v) = self.args.cache_control() {
            metadata.set_cache_control(v);
        }

        self.core.set(&self.key, MemoryValue { metadata, content })
    }
}

impl oio::Write for MemoryWriter {
    async fn write(&mut self, mut bs: Buffer) -> Result<()> {
        self.buf.push(bs.copy_to_bytes(bs.remaining()));
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.commit()
    }

    async fn abort(&mut self) -> Result<()> {
        self.buf.clear();
        Ok(())
    }
}

impl oio::BlockingWrite for MemoryWriter {
    fn write(&mut self, mut bs: Buffer) -> Result<()> {
        self.buf.push(bs.copy_to_bytes(bs.remaining()));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.commit()
    }
}

/// MemoryLister iterates a snapshot of scanned entries.
pub struct MemoryLister {
    entries: IntoIter<oio::Entry>,
}

impl oio::List for MemoryLister {
    async fn next(&mut self) -> Result<Option<oio::Entry>> {
        Ok(self.entries.next())
    }
}

impl oio::BlockingList for MemoryLister {
    fn next(&mut self) -> Result<Option<oio::Entry>> {
        Ok(self.entries.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessor_metadata_name() {
        let b1 = MemoryBuilder::default().build().unwrap();
        assert_eq!(b1.info().name(), b1.info().name());

        let b2 = MemoryBuilder::default().build().unwrap();
        assert_ne!(b1.info().name(), b2.info().name())
    }
}
