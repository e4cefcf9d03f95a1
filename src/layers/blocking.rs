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

use async_trait::async_trait;
use tokio::runtime::Handle;

use crate::raw::*;
use crate::*;

/// Add blocking API support for every operation.
///
/// # Notes
///
/// - Please only enable this layer when the service you're using doesn't
///   have native blocking support, like `s3`, `gcs` or `azblob`.
/// - This layer will spawn the async call onto the captured tokio runtime
///   and block on it, so it must be created from within a tokio runtime
///   context.
///
/// # Examples
///
/// ```no_run
/// # use anyhow::Result;
/// use fileio::layers::BlockingLayer;
/// use fileio::services;
/// use fileio::BlockingOperator;
/// use fileio::Operator;
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     let mut builder = services::S3::default();
///     builder.bucket("test");
///     builder.region("us-east-1");
///
///     // Create fileio Operator.
///     let runtime_op = Operator::new(builder)?
///         .layer(BlockingLayer::create()?)
///         .finish();
///
///     // Use the blocking API even though s3 is async only.
///     let _: BlockingOperator = runtime_op.blocking();
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BlockingLayer {
    handle: Handle,
}

impl BlockingLayer {
    /// Create a new `BlockingLayer` with the current tokio runtime's handle.
    ///
    /// This function will return an error if called outside of a tokio
    /// runtime.
    pub fn create() -> Result<Self> {
        Ok(Self {
            handle: Handle::try_current().map_err(|_| {
                Error::new(
                    ErrorKind::Unexpected,
                    "BlockingLayer must be created in a tokio runtime context",
                )
            })?,
        })
    }
}

impl<A: Accessor> Layer<A> for BlockingLayer {
    type LayeredAccessor = BlockingAccessor<A>;

    fn layer(&self, inner: A) -> Self::LayeredAccessor {
        BlockingAccessor {
            inner,
            handle: self.handle.clone(),
        }
    }
}

/// The accessor built by [`BlockingLayer`].
#[derive(Debug)]
pub struct BlockingAccessor<A: Accessor> {
    inner: A,

    handle: Handle,
}

#[async_trait]
impl<A: Accessor> LayeredAccessor for BlockingAccessor<A> {
    type Inner = A;
    type Reader = A::Reader;
    type Writer = A::Writer;
    type Lister = A::Lister;
    type BlockingReader = BlockingWrapper<A::Reader>;
    type BlockingWriter = BlockingWrapper<A::Writer>;
    type BlockingLister = BlockingWrapper<A::Lister>;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    fn info(&self) -> AccessorInfo {
        let mut info = self.inner.info();
        info.full_capability_mut().blocking = true;
        info
    }

    async fn read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::Reader)> {
        self.inner.read(path, args).await
    }

    async fn write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::Writer)> {
        self.inner.write(path, args).await
    }

    async fn list(&self, path: &str, args: OpList) -> Result<(RpList, Self::Lister)> {
        self.inner.list(path, args).await
    }

    fn blocking_create_dir(&self, path: &str, args: OpCreateDir) -> Result<RpCreateDir> {
        self.handle.block_on(self.inner.create_dir(path, args))
    }

    fn blocking_read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::BlockingReader)> {
        self.handle.block_on(async {
            let (rp, reader) = self.inner.read(path, args).await?;
            let blocking_reader = BlockingWrapper::new(self.handle.clone(), reader);
            Ok((rp, blocking_reader))
        })
    }

    fn blocking_write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::BlockingWriter)> {
        self.handle.block_on(async {
            let (rp, writer) = self.inner.write(path, args).await?;
            let blocking_writer = BlockingWrapper::new(self.handle.clone(), writer);
            Ok((rp, blocking_writer))
        })
    }

    fn blocking_copy(&self, from: &str, to: &str, args: OpCopy) -> Result<RpCopy> {
        self.handle.block_on(self.inner.copy(from, to, args))
    }

    fn blocking_rename(&self, from: &str, to: &str, args: OpRename) -> Result<RpRename> {
        self.handle.block_on(self.inner.rename(from, to, args))
    }

    fn blocking_stat(&self, path: &str, args: OpStat) -> Result<RpStat> {
        self.handle.block_on(self.inner.stat(path, args))
    }

    fn blocking_delete(&self, path: &str, args: OpDelete) -> Result<RpDelete> {
        self.handle.block_on(self.inner.delete(path, args))
    }

    fn blocking_list(&self, path: &str, args: OpList) -> Result<(RpList, Self::BlockingLister)> {
        self.handle.block_on(async {
            let (rp, lister) = self.inner.list(path, args).await?;
            let blocking_lister = BlockingWrapper::new(self.handle.clone(), lister);
            Ok((rp, blocking_lister))
        })
    }
}

/// BlockingWrapper makes an async reader/writer/lister blocking by blocking
/// on the captured runtime handle.
pub struct BlockingWrapper<I> {
    handle: Handle,
    inner: I,
}

impl<I> BlockingWrapper<I> {
    fn new(handle: Handle, inner: I) -> Self {
        Self { handle, inner }
    }
}

impl<I: oio::Read> oio::BlockingRead for BlockingWrapper<I> {
    fn read(&mut self) -> Result<Buffer> {
        self.handle.block_on(self.inner.read())
    }
}

impl<I: oio::Write> oio::BlockingWrite for BlockingWrapper<I> {
    fn write(&mut self, bs: Buffer) -> Result<()> {
        self.handle.block_on(self.inner.write(bs))
    }

    fn close(&mut self) -> Result<()> {
        self.handle.block_on(self.inner.close())
    }
}

impl<I: oio::List> oio::BlockingList for BlockingWrapper<I> {
    fn next(&mut self) -> Result<Option<oio::Entry>> {
        self.handle.block_on(self.inner.next())
    }
}
