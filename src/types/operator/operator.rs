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

use futures::TryStreamExt;

use crate::raw::oio::Write;
use crate::raw::*;
use crate::*;

/// Operator is the entry for all public async APIs.
///
/// Developer should manipulate the data from storage service through
/// Operator only by right.
///
/// We will usually do some general checks and data transformations in this
/// layer, like normalizing path from input, checking whether the path refers
/// to one file or one directory.
///
/// Read [`concepts`][crate] for more about [`Operator`].
///
/// # Examples
///
/// Read more backend init examples in [`services`]
///
/// ```
/// # use anyhow::Result;
/// use fileio::services::Fs;
/// use fileio::Operator;
/// async fn test() -> Result<()> {
///     // Create fs backend builder.
///     let mut builder = Fs::default();
///     // Set the root for fs, all operations will happen under this root.
///     //
///     // NOTE: the root must be absolute path.
///     builder.root("/tmp");
///
///     // Build an `Operator` to start operating the storage.
///     let op: Operator = Operator::new(builder)?.finish();
///
///     // Create a file handle to start operating on it.
///     let _ = op.write("test_file", "Hello, World!").await?;
///
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Operator {
    accessor: FusedAccessor,

    limit: usize,
}

/// # Operator basic API.
impl Operator {
    pub(super) fn inner(&self) -> &FusedAccessor {
        &self.accessor
    }

    pub(crate) fn from_inner(accessor: FusedAccessor) -> Self {
        Self {
            accessor,
            limit: 1000,
        }
    }

    pub(crate) fn into_inner(self) -> FusedAccessor {
        self.accessor
    }

    /// Get current operator's limit.
    ///
    /// Limit is usually the maximum size of data that operator will handle
    /// in one operation.
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
    /// use fileio::Operator;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// let info = op.info();
    /// # Ok(())
    /// # }
    /// ```
    pub fn info(&self) -> OperatorInfo {
        OperatorInfo::new(self.accessor.info())
    }

    /// Create a new blocking operator.
    ///
    /// This operation is nearly no cost.
    pub fn blocking(&self) -> BlockingOperator {
        BlockingOperator::from_operator(self.clone())
    }
}

/// # Operator async API.
impl Operator {
    /// Check if this operator can work correctly.
    ///
    /// We will send a `list` request to path and return any errors we met.
    ///
    /// ```
    /// # use std::sync::Arc;
    /// # use anyhow::Result;
    /// use fileio::Operator;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// op.check().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn check(&self) -> Result<()> {
        let mut ds = self.lister("/").await?;

        match ds.try_next().await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Get given path's metadata.
    ///
    /// # Notes
    ///
    /// ## Extra Options
    ///
    /// [`Operator::stat`] is a wrapper of [`Operator::stat_with`] without
    /// any options. To use extra options like `if_match`, please use
    /// [`Operator::stat_with`] instead.
    ///
    /// # Examples
    ///
    /// ## Check if file exists
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use futures::io;
    /// # use fileio::Operator;
    /// use fileio::ErrorKind;
    /// #
    /// # async fn test(op: Operator) -> Result<()> {
    /// if let Err(e) = op.stat("test").await {
    ///     if e.kind() == ErrorKind::NotFound {
    ///         println!("file not exist")
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn stat(&self, path: &str) -> Result<Metadata> {
        self.stat_with(path, OpStat::new()).await
    }

    /// Get given path's metadata with extra options.
    pub async fn stat_with(&self, path: &str, args: OpStat) -> Result<Metadata> {
        let path = normalize_path(path);

        let rp = self.inner().stat(&path, args).await?;
        Ok(rp.into_metadata())
    }

    /// Check if given path exists.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use futures::io;
    /// use fileio::Operator;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// let _ = op.exists("test").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn exists(&self, path: &str) -> Result<bool> {
        let r = self.stat(path).await;
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
    /// # Notes
    ///
    /// To indicate that a path is a directory, it is compulsory to include
    /// a trailing / in the path. Failure to do so may result in
    /// `NotADirectory` error being returned by FileIO.
    ///
    /// # Behavior
    ///
    /// - Create on existing dir will succeed.
    /// - Create dir is always recursive, works like `mkdir -p`
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::io::Result;
    /// # use fileio::Operator;
    /// # use futures::TryStreamExt;
    /// # async fn test(op: Operator) -> Result<()> {
    /// op.create_dir("path/to/dir/").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_dir(&self, path: &str) -> Result<()> {
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

        self.inner().create_dir(&path, OpCreateDir::new()).await?;

        Ok(())
    }

    /// Read the whole path into a buffer.
    ///
    /// # Notes
    ///
    /// ## Streaming Read
    ///
    /// This function will allocate a new buffer to store all data. For
    /// streaming output, use [`Operator::reader`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    /// #
    /// # async fn test(op: Operator) -> Result<()> {
    /// let bs = op.read("path/to/file").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read(&self, path: &str) -> Result<Buffer> {
        self.read_with(path, OpRead::new()).await
    }

    /// Read the whole path into a buffer with extra options.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    /// use fileio::raw::BytesRange;
    /// use fileio::raw::OpRead;
    /// #
    /// # async fn test(op: Operator) -> Result<()> {
    /// let bs = op
    ///     .read_with("path/to/file", OpRead::new().with_range(BytesRange::from(0..10)))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read_with(&self, path: &str, args: OpRead) -> Result<Buffer> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "read path is a directory")
                    .with_operation("read")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let (_, r) = self.inner().read(&path, args).await?;
        let mut r = Reader::new(r);
        r.read_to_end().await
    }

    /// Create a new reader which can read the whole path.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// let r = op.reader("path/to/file").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn reader(&self, path: &str) -> Result<Reader> {
        self.reader_with(path, OpRead::new()).await
    }

    /// Create a new reader with extra options.
    pub async fn reader_with(&self, path: &str, args: OpRead) -> Result<Reader> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "read path is a directory")
                    .with_operation("Operator::reader")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let (_, r) = self.inner().read(&path, args).await?;
        Ok(Reader::new(r))
    }

    /// Write bytes into path.
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
    /// # use futures::StreamExt;
    /// # use futures::SinkExt;
    /// use bytes::Bytes;
    ///
    /// # use fileio::Operator;
    /// # async fn test(op: Operator) -> Result<()> {
    /// op.write("path/to/file", vec![0; 4096]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn write(&self, path: &str, bs: impl Into<Buffer>) -> Result<()> {
        self.write_with(path, OpWrite::new(), bs).await
    }

    /// Write data with extra options.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// use fileio::raw::OpWrite;
    /// # use fileio::Operator;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// let args = OpWrite::new().with_content_type("application/json");
    /// op.write_with("path/to/file", args, vec![0; 4096]).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn write_with(&self, path: &str, args: OpWrite, bs: impl Into<Buffer>) -> Result<()> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "write path is a directory")
                    .with_operation("write")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let (_, mut w) = self.inner().write(&path, args).await?;
        w.write(bs.into()).await?;
        w.close().await?;

        Ok(())
    }

    /// Create a new writer which can write data into the path in chunks.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    /// use bytes::Bytes;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// let mut w = op.writer("path/to/file").await?;
    /// w.write(vec![0; 4096]).await?;
    /// w.write(vec![1; 4096]).await?;
    /// w.close().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn writer(&self, path: &str) -> Result<Writer> {
        self.writer_with(path, OpWrite::new()).await
    }

    /// Create a new writer with extra options.
    pub async fn writer_with(&self, path: &str, args: OpWrite) -> Result<Writer> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "write path is a directory")
                    .with_operation("Operator::writer")
                    .with_context("service", self.info().scheme())
                    .with_context("path", &path),
            );
        }

        let chunk_size = args
            .chunk()
            .or(self.info().full_capability().write_multi_min_size);

        let (_, w) = self.inner().write(&path, args).await?;
        Ok(Writer::new(w, chunk_size))
    }

    /// Copy a file from `from` to `to`.
    ///
    /// # Notes
    ///
    /// - `from` and `to` must be a file.
    /// - `to` will be overwritten if it exists.
    /// - If `from` and `to` are the same, an `IsSameFile` error will occur.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// op.copy("path/to/file", "path/to/file2").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn copy(&self, from: &str, to: &str) -> Result<()> {
        let from = normalize_path(from);

        if !validate_path(&from, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "from path is a directory")
                    .with_operation("Operator::copy")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from),
            );
        }

        let to = normalize_path(to);

        if !validate_path(&to, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "to path is a directory")
                    .with_operation("Operator::copy")
                    .with_context("service", self.info().scheme())
                    .with_context("to", &to),
            );
        }

        if from == to {
            return Err(
                Error::new(ErrorKind::IsSameFile, "from and to paths are same")
                    .with_operation("Operator::copy")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from)
                    .with_context("to", &to),
            );
        }

        self.inner().copy(&from, &to, OpCopy::new()).await?;

        Ok(())
    }

    /// Rename a file from `from` to `to`.
    ///
    /// # Notes
    ///
    /// - `from` and `to` must be a file.
    /// - `to` will be overwritten if it exists.
    /// - If `from` and `to` are the same, an `IsSameFile` error will occur.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    ///
    /// # async fn test(op: Operator) -> Result<()> {
    /// op.rename("path/to/file", "path/to/file2").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn rename(&self, from: &str, to: &str) -> Result<()> {
        let from = normalize_path(from);

        if !validate_path(&from, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "from path is a directory")
                    .with_operation("Operator::rename")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from),
            );
        }

        let to = normalize_path(to);

        if !validate_path(&to, EntryMode::FILE) {
            return Err(
                Error::new(ErrorKind::IsADirectory, "to path is a directory")
                    .with_operation("Operator::rename")
                    .with_context("service", self.info().scheme())
                    .with_context("to", &to),
            );
        }

        if from == to {
            return Err(
                Error::new(ErrorKind::IsSameFile, "from and to paths are same")
                    .with_operation("Operator::rename")
                    .with_context("service", self.info().scheme())
                    .with_context("from", &from)
                    .with_context("to", &to),
            );
        }

        self.inner().rename(&from, &to, OpRename::new()).await?;

        Ok(())
    }

    /// Delete the given path.
    ///
    /// # Notes
    ///
    /// - Deleting a file that does not exist won't return errors.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    /// # async fn test(op: Operator) -> Result<()> {
    /// op.delete("test").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn delete(&self, path: &str) -> Result<()> {
        let path = normalize_path(path);

        self.inner().delete(&path, OpDelete::new()).await?;

        Ok(())
    }

    /// Remove the path and all nested dirs and files recursively.
    ///
    /// # Notes
    ///
    /// We don't support batch delete now, so this operation is sequential.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    /// # async fn test(op: Operator) -> Result<()> {
    /// op.remove_all("path/to/dir/").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn remove_all(&self, path: &str) -> Result<()> {
        let meta = match self.stat(path).await {
            // If object exists.
            Ok(metadata) => metadata,

            // If object not found, return success.
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),

            // Pass on any other error.
            Err(e) => return Err(e),
        };

        if meta.mode() != EntryMode::DIR {
            return self.delete(path).await;
        }

        let mut lister = self
            .lister_with(path, OpList::new().with_recursive(true))
            .await?;

        while let Some(entry) = lister.try_next().await? {
            self.inner()
                .delete(entry.path(), OpDelete::new())
                .await?;
        }

        // Remove the directory itself.
        self.delete(path).await?;

        Ok(())
    }

    /// List entries that starts with given `path` in parent dir.
    ///
    /// # Notes
    ///
    /// ## Recursively list
    ///
    /// This function only read the children of the given directory. To read
    /// all entries recursively, use `Operator::list_with("path", OpList::new().with_recursive(true))`
    /// instead.
    ///
    /// ## Streaming list
    ///
    /// This function will read all entries in the given directory. It could
    /// take very long time and consume a lot of memory if the directory
    /// contains a lot of entries.
    ///
    /// In order to avoid this, you can use [`Operator::lister`] to list
    /// entries in a streaming way.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// use fileio::EntryMode;
    /// # use fileio::Operator;
    /// # async fn test(op: Operator) -> Result<()> {
    /// let mut entries = op.list("path/to/dir/").await?;
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
    pub async fn list(&self, path: &str) -> Result<Vec<Entry>> {
        self.list_with(path, OpList::new()).await
    }

    /// List entries that starts with given `path` in parent dir with extra
    /// options.
    pub async fn list_with(&self, path: &str, args: OpList) -> Result<Vec<Entry>> {
        let lister = self.lister_with(path, args).await?;

        lister.try_collect().await
    }

    /// List entries within a given directory as a stream.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use futures::io;
    /// use futures::TryStreamExt;
    /// use fileio::EntryMode;
    /// # use fileio::Operator;
    /// # async fn test(op: Operator) -> Result<()> {
    /// let mut ds = op.lister("path/to/dir/").await?;
    /// while let Some(entry) = ds.try_next().await? {
    ///     match entry.metadata().mode() {
    ///         EntryMode::FILE => {
    ///             println!("Handling file")
    ///         }
    ///         EntryMode::DIR => {
    ///             println!("Handling dir like start a new list via meta.path()")
    ///         }
    ///         EntryMode::Unknown => continue,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lister(&self, path: &str) -> Result<Lister> {
        self.lister_with(path, OpList::new()).await
    }

    /// List entries within a given directory as a stream with extra options.
    pub async fn lister_with(&self, path: &str, args: OpList) -> Result<Lister> {
        let path = normalize_path(path);

        if !validate_path(&path, EntryMode::DIR) {
            return Err(Error::new(
                ErrorKind::NotADirectory,
                "the path trying to list should end with `/`",
            )
            .with_operation("Operator::lister")
            .with_context("service", self.info().scheme())
            .with_context("path", &path));
        }

        let (_, lister) = self.inner().list(&path, args).await?;
        Ok(Lister::new(lister))
    }

    /// Glob entries that match the given pattern.
    ///
    /// The pattern is matched against paths relative to the operator root
    /// and supports `*`, `?`, `**`, character classes and `{a,b}`
    /// alternation. Only the literal prefix of the pattern is listed, so
    /// `logs/2023/**` will never touch entries outside `logs/2023/`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// # use fileio::Operator;
    /// # async fn test(op: Operator) -> Result<()> {
    /// let entries = op.glob("logs/**/*.json").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn glob(&self, pattern: &str) -> Result<Vec<Entry>> {
        let pattern = GlobPattern::new(pattern)?;

        let mut lister = self
            .lister_with(
                &format!("{}/", pattern.prefix().trim_end_matches('/')),
                OpList::new().with_recursive(true),
            )
            .await?;

        let mut entries = Vec::new();
        while let Some(entry) = lister.try_next().await? {
            if pattern.matches(entry.path()) {
                entries.push(entry);
            }
        }

        Ok(entries)
    }
}
