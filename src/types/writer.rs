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

use bytes::Bytes;
use bytes::BytesMut;

use crate::raw::oio::BlockingWrite;
use crate::raw::oio::Write;
use crate::raw::*;
use crate::*;

/// Writer is designed to write data into given path in an asynchronous
/// manner.
///
/// # Notes
///
/// Writer can be used in two ways:
///
/// - Sized: write data with a known total size, the classic `op.write()`.
/// - Unsized: write data without knowing its total size, a.k.a streaming.
///
/// Writer buffers incoming chunks until the configured chunk size is
/// reached, so the underlying service receives well sized parts. The chunk
/// size defaults to the service's multipart minimum if the service has one.
///
/// ## Abort
///
/// If a writer is dropped without `close`, the upload is aborted on a best
/// effort basis: multipart services will purge staged parts only when
/// `abort` is called explicitly.
pub struct Writer {
    inner: oio::Writer,

    chunk_size: Option<usize>,
    buf: BytesMut,
    closed: bool,
}

impl Writer {
    /// Create a new writer.
    ///
    /// Create will use internal information to decide the most suitable
    /// implementation for users.
    ///
    /// We don't want to expose those details to users so keep this function
    /// in crate only.
    pub(crate) fn new(w: oio::Writer, chunk_size: Option<usize>) -> Self {
        Writer {
            inner: w,
            chunk_size,
            buf: BytesMut::new(),
            closed: false,
        }
    }

    /// Write [`Buffer`] into writer.
    ///
    /// This operation will write all data in given buffer into writer.
    ///
    /// # Examples
    ///
    /// ```
    /// use bytes::Bytes;
    /// use fileio::Operator;
    /// use fileio::Result;
    ///
    /// async fn test(op: Operator) -> Result<()> {
    ///     let mut w = op.writer("path/to/file").await?;
    ///     w.write(vec![1; 1024]).await?;
    ///     w.write(vec![2; 1024]).await?;
    ///     w.close().await?;
    ///
    ///     Ok(())
    /// }
    /// ```
    pub async fn write(&mut self, bs: impl Into<Buffer>) -> Result<()> {
        if self.closed {
            return Err(Error::new(
                ErrorKind::Unexpected,
                "writer has been closed",
            ));
        }

        let bs = bs.into();

        let Some(chunk_size) = self.chunk_size else {
            return self.inner.write(bs).await;
        };

        self.buf.extend_from_slice(&bs.to_bytes());
        while self.buf.len() >= chunk_size {
            let chunk = self.buf.split_to(chunk_size).freeze();
            self.inner.write(Buffer::from(chunk)).await?;
        }

        Ok(())
    }

    /// Close the writer and make sure all data have been committed.
    ///
    /// # Notes
    ///
    /// Close should only be called when the writer is not closed, otherwise
    /// an unexpected error could be returned.
    pub async fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::new(
                ErrorKind::Unexpected,
                "writer has been closed",
            ));
        }

        if !self.buf.is_empty() {
            let chunk: Bytes = std::mem::take(&mut self.buf).freeze();
            self.inner.write(Buffer::from(chunk)).await?;
        }

        self.inner.close().await?;
        self.closed = true;
        Ok(())
    }

    /// Abort the writer and clean up all staged data.
    pub async fn abort(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::new(
                ErrorKind::Unexpected,
                "writer has been closed",
            ));
        }

        self.buf.clear();
        self.inner.abort().await
    }
}

/// BlockingWriter is designed to write data into given path in a blocking
/// manner.
pub struct BlockingWriter {
    inner: oio::BlockingWriter,

    chunk_size: Option<usize>,
    buf: BytesMut,
    closed: bool,
}

impl BlockingWriter {
    pub(crate) fn new(w: oio::BlockingWriter, chunk_size: Option<usize>) -> Self {
        BlockingWriter {
            inner: w,
            chunk_size,
            buf: BytesMut::new(),
            closed: false,
        }
    }

    /// Write [`Buffer`] into writer.
    ///
    /// This operation will write all data in given buffer into writer.
    pub fn write(&mut self, bs: impl Into<Buffer>) -> Result<()> {
        if self.closed {
            return Err(Error::new(
                ErrorKind::Unexpected,
                "writer has been closed",
            ));
        }

        let bs = bs.into();

        let Some(chunk_size) = self.chunk_size else {
            return self.inner.write(bs);
        };

        self.buf.extend_from_slice(&bs.to_bytes());
        while self.buf.len() >= chunk_size {
            let chunk = self.buf.split_to(chunk_size).freeze();
            self.inner.write(Buffer::from(chunk))?;
        }

        Ok(())
    }

    /// Close the writer and make sure all data have been committed.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::new(
                ErrorKind::Unexpected,
                "writer has been closed",
            ));
        }

        if !self.buf.is_empty() {
            let chunk: Bytes = std::mem::take(&mut self.buf).freeze();
            self.inner.write(Buffer::from(chunk))?;
        }

        self.inner.close()?;
        self.closed = true;
        Ok(())
    }
}
