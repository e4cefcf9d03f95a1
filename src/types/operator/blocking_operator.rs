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

use crate::raw::oio::BlockingWrite;
use crate::raw::*;
use crate::*;

/// BlockingOperator is the entry for all public blocking APIs.
///
/// Read [`concepts`][crate] for more about [`BlockingOperator`].
///
/// # Examples
///
/// ## Init backends that support blocking natively
///
/// ```
/// # use anyhow::Result;
/// use fileio::services::Memory;
/// use fileio::BlockingOperator;
/// use fileio::Operator;
///
/// fn main() -> Result<()> {
///     // Create memory backend builder.
///     let builder = Memory::default();
///
///     // Build an `BlockingOperator` to start operating the storage.
///     let op: BlockingOperator = Operator::new(builder)?.finish().blocking();
///
///     // Write data into object test.
///     op.write("test", "Hello, World!")?;
///
///     // Read data from object.
///     let bs = op.read("test")?;
///
///     // Fetch metadata.
///     let meta = op.stat("test")?;
///     let mode = meta.mode();
///     let length = meta.content_length();
///
///     // Delete object.
///     op.delete("test")?;
///
///     Ok(())
/// }
/// ```
///
/// ## Init backends that don't support blocking natively
///
/// Services like s3, gcs and azblob are async only. To use them in a
/// blocking context, add a [`BlockingLayer`][crate::layers::BlockingLayer]
/// from within a tokio runtime first.
#[derive(Clone, Debug)]
pub struct BlockingOperator {
    accessor: FusedAccessor,

    limit: usize,
}

impl BlockingOperator {
    pub(super) fn inner(&self) -> &FusedAccessor {
        &self.accessor
    }

    pub(crate) fn from_operator(op: Operator) -> Self {
        let limit = op.limit();
        Self {
            accessor: op.into_inner(),
            limit,
        }
    }

    /// Get current operator's limit
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Specify the batch limit.
    ///
    /// Default: 1000
    pub fn with_limit(&self, limit: usize) -> Self {
        let mut op = self.clone();
        op.limit = limit;
        op
    }

    /// Get information of underlying accessor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use anyhow::Result;
    /// use fileio::BlockingOperator;
    ///
    /// # fn test(op: BlockingOperator) -> Result<()> {
    /// let info = op.info();
    /// # Ok(())
    /// # }
    /// ```
    pub fn info(&self) -> OperatorInfo {
        OperatorInfo::new(self.accessor.info())
    }
}

/// # BlockingOperator blocking API.
impl BlockingOperator {
    /// Get given path's metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::BlockingOperator;
    /// use fileio::ErrorKind;
    /// #
    /// # fn test(op: BlockingOperator) -> Result<()> {
    /// if let Err(e) = op.stat("test") {
    ///     if e.kind() == ErrorKind::NotFound {
    ///         println!("file not exist")
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn stat(&self, path: &str) -> Result<Metadata> {
        self.stat_with(path, OpStat::new())
    }

    /// Get given path's metadata with extra options.
    pub fn stat_with(&self, path: &str, args: OpStat) -> Result<Metadata> {
        let path = normalize_path(path);

        let rp = self.inner().blocking_stat(&path, args)?;
        Ok(rp.into_metadata())
    }

    /// Check if given path exists.
    pub fn exists(&self, path: &str) -> Result<bool> {
        let r = self.stat(path);
        match r {
            Ok(_) => Ok(true),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(false),
                _ => Err(err),
            },
        }
    }

    /// Create a dir at given path.
    ///
    /// # Behavior
    ///
    /// - Create on existing dir will succeed.
    /// - Create dir is always recursive, works like `mkdir -p`
    pub fn create_dir(&self, path: &str) -> Result<()> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::DIR) {
            return Err(Error::new(
                ErrorKind::NotADirectory,
                "the path trying to create should end with `/`",
            )
            .with_operation("create_dir")
            .with_context("service", self.info().scheme())
            .with_context("path", &path));
        }

        self.inner().blocking_create_dir(&path, OpCreateDir::new())?;

        Ok(())
    }

    /// Read the whole path into a buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::BlockingOperator;
    /// #
    /// # fn test(op: BlockingOperator) -> Result<()> {
    /// let bs = op.read("path/to/file")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn read(&self, path: &str) -> Result<Buffer> {
        self.read_with(path, OpRead::new())
    }

    /// Read the whole path into a buffer with extra options.
    pub fn read_with(&self, path: &str, args: OpRead) -> Result<Buffer> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "read path is a directory")
                    .with_operation("read")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let (_, r) = self.inner().blocking_read(&path, args)?;
        let mut r = BlockingReader::new(r);
        r.read_to_end()
    }

    /// Create a new reader which can read the whole path.
    pub fn reader(&self, path: &str) -> Result<BlockingReader> {
        self.reader_with(path, OpRead::new())
    }

    /// Create a new reader with extra options.
    pub fn reader_with(&self, path: &str, args: OpRead) -> Result<BlockingReader> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "read path is a directory")
                    .with_operation("BlockingOperator::reader")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let (_, r) = self.inner().blocking_read(&path, args)?;
        Ok(BlockingReader::new(r))
    }

    /// Write bytes into given path.
    ///
    /// # Notes
    ///
    /// - Write will make sure all bytes has been written, or an error will
    ///   be returned.
    /// - Write will overwrite the content on the same path if any.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// use bytes::Bytes;
    ///
    /// # use fileio::BlockingOperator;
    /// # fn test(op: BlockingOperator) -> Result<()> {
    /// op.write("path/to/file", vec![0; 4096])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn write(&self, path: &str, bs: impl Into<Buffer>) -> Result<()> {
        self.write_with(path, OpWrite::new(), bs)
    }

    /// Write data with extra options.
    pub fn write_with(&self, path: &str, args: OpWrite, bs: impl Into<Buffer>) -> Result<()> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "write path is a directory")
                    .with_operation("write")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let (_, mut w) = self.inner().blocking_write(&path, args)?;
        w.write(bs.into())?;
        w.close()?;

        Ok(())
    }

    /// Create a new writer which can write data into the path in chunks.
    pub fn writer(&self, path: &str) -> Result<BlockingWriter> {
        self.writer_with(path, OpWrite::new())
    }

    /// Create a new writer with extra options.
    pub fn writer_with(&self, path: &str, args: OpWrite) -> Result<BlockingWriter> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "write path is a directory")
                    .with_operation("BlockingOperator::writer")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let chunk_size = args
            .chunk()
            .or(self.info().full_capability().write_multi_min_size);

        let (_, w) = self.inner().blocking_write(&path, args)?;
        Ok(BlockingWriter::new(w, chunk_size))
    }

    /// Copy a file from `from` to `to`.
    ///
    /// # Notes
    ///
    /// - `from` and `to` must be a file.
    /// - `to` will be overwritten if it exists.
    /// - If `from` and `to` are the same, an `IsSameFile` error will occur.
    pub fn copy(&self, from: &str, to: &str) -> Result<()> {
        let from = normalize_path(from);

        if !validate_path(&from, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "from path is a directory")
                    .with_operation("BlockingOperator::copy")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from),
            );
        }

        let to = normalize_path(to);

        if !validate_path(&to, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "to path is a directory")
                    .with_operation("BlockingOperator::copy")
                    .with_context("service", self.info().scheme())
                    .with_context("to", &to),
            );
        }

        if from == to {
            return Err(
                Error::new(ErrorKind::IsSameFile, "from and to paths are same")
                    .with_operation("BlockingOperator::copy")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from)
                    .with_context("to", &to),
            );
        }

        self.inner().blocking_copy(&from, &to, OpCopy::new())?;

        Ok(())
    }

    /// Rename a file from `from` to `to`.
    ///
    /// # Notes
    ///
    /// - `from` and `to` must be a file.
    /// - `to` will be overwritten if it exists.
    /// - If `from` and `to` are the same, an `IsSameFile` error will occur.
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        let from = normalize_path(from);

        if !validate_path(&from, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "from path is a directory")
                    .with_operation("BlockingOperator::rename")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from),
            );
        }

        let to = normalize_path(to);

        if !validate_path(&to, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "to path is a directory")
                    .with_operation("BlockingOperator::rename")
                    .with_context("service", self.info().scheme())
                    .with_context("to", &to),
            );
        }

        if from == to {
            return Err(
                Error::new(ErrorKind::IsSameFile, "from and to paths are same")
                    .with_operation("BlockingOperator::rename")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from)
                    .with_context("to", &to),
            );
        }

        self.inner().blocking_rename(&from, &to, OpRename::new())?;

        Ok(())
    }

    /// Delete given path.
    ///
    /// # Notes
    ///
    /// - Deleting a file that does not exist won't return errors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::BlockingOperator;
    /// # fn test(op: BlockingOperator) -> Result<()> {
    /// op.delete("path/to/file")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn delete(&self, path: &str) -> Result<()> {
        let path = normalize_path(path);

        self.inner().blocking_delete(&path, OpDelete::new())?;

        Ok(())
    }

    /// Remove the path and all nested dirs and files recursively.
    pub fn remove_all(&self, path: &str) -> Result<()> {
        let meta = match self.stat(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e),
        };

        if meta.mode() != EntryMode::DIR {
            return self.delete(path);
        }

        let lister = self.lister_with(path, OpList::new().with_recursive(true))?;

        for entry in lister {
            let entry = entry?;
            self.inner().blocking_delete(entry.path(), OpDelete::new())?;
        }

        // Remove the directory itself.
        self.delete(path)?;

        Ok(())
    }

    /// List entries that starts with given `path` in parent dir.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// use fileio::BlockingOperator;
    /// use fileio::EntryMode;
    /// # fn test(op: BlockingOperator) -> Result<()> {
    /// let entries = op.list("path/to/dir/")?;
    /// for entry in entries {
    ///     match entry.metadata().mode() {
    ///         EntryMode::FILE => {
    ///             println!("Handling file")
    ///         }
    ///         EntryMode::DIR => {
    ///             println!("Handling dir {}", entry.path())
    ///         }
    ///         EntryMode::Unknown => continue,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list(&self, path: &str) -> Result<Vec<Entry>> {
        self.list_with(path, OpList::new())
    }

    /// List entries that starts with given `path` in parent dir with extra
    /// options.
    pub fn list_with(&self, path: &str, args: OpList) -> Result<Vec<Entry>> {
        let lister = self.lister_with(path, args)?;

        lister.collect()
    }

    /// List entries within a given directory as an iterator.
    pub fn lister(&self, path: &str) -> Result<BlockingLister> {
        self.lister_with(path, OpList::new())
    }

    /// List entries within a given directory as an iterator with extra
    /// options.
    pub fn lister_with(&self, path: &str, args: OpList) -> Result<BlockingLister> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::DIR) {
            return Err(Error::new(
                ErrorKind::NotADirectory,
                "the path trying to list should end with `/`",
            )
            .with_operation("BlockingOperator::lister")
            .with_context("service", self.info().scheme())
            .with_context("path", &path));
        }

        let (_, lister) = self.inner().blocking_list(&path, args)?;
        Ok(BlockingLister::new(lister))
    }

    /// Glob entries that match the given pattern.
    ///
    /// See [`Operator::glob`][crate::Operator::glob] for the supported
    /// pattern syntax.
    pub fn glob(&self, pattern: &str) -> Result<Vec<Entry>> {
        let pattern = GlobPattern::new(pattern)?;

        let lister = self.lister_with(
            &format!("{}/", pattern.prefix().trim_end_matches('/')),
            OpList::new().with_recursive(true),
        )?;

        let mut entries = Vec::new();
        for entry in lister {
            let entry = entry?;
            if pattern.matches(entry.path()) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }
}
