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

use std::future::Future;

use uuid::Uuid;

use crate::raw::*;
use crate::*;

/// BlockWrite is used to implement [`oio::Write`] based on block uploads.
/// By implementing BlockWrite, services don't need to care about the details
/// of uploading blocks.
///
/// # Architecture
///
/// - Services impl `BlockWrite`
/// - `BlockWriter` impl `Write`
/// - Expose `BlockWriter` as `Accessor::Writer`
///
/// # Requirements
///
/// Services that implement `BlockWrite` must fulfill the following
/// requirements:
///
/// - Must be a http service that could accept `AsyncBody`.
/// - Block ids are generated by caller and must be valid for the service.
/// - Complete works like put block list: the blob is built from the block
///   ids in order.
pub trait BlockWrite: Send + Sync + Unpin + 'static {
    /// write_once is used to write the data to underlying storage at once.
    ///
    /// BlockWriter will call this API when:
    ///
    /// - All the data has been written to the buffer and we can perform the
    ///   upload at once.
    fn write_once(&self, size: u64, body: Buffer) -> impl Future<Output = Result<()>> + MaybeSend;

    /// write_block will write a block of the data.
    ///
    /// BlockWriter will call this API and stores the block id in order.
    fn write_block(
        &self,
        block_id: Uuid,
        size: u64,
        body: Buffer,
    ) -> impl Future<Output = Result<()>> + MaybeSend;

    /// complete_block will combine all uploaded blocks into the final blob.
    fn complete_block(&self, block_ids: Vec<Uuid>)
        -> impl Future<Output = Result<()>> + MaybeSend;

    /// abort_block will drop all uploaded blocks.
    ///
    /// Uncommitted blocks are garbage collected by the services, so abort
    /// is mostly a no-op for them.
    fn abort_block(&self, block_ids: Vec<Uuid>) -> impl Future<Output = Result<()>> + MaybeSend;
}

/// BlockWriter will implement [`oio::Write`] based on block uploads.
///
/// The writer keeps the latest chunk in cache and only switches into block
/// mode on the second chunk, so a single-chunk write stays an oneshot put.
pub struct BlockWriter<W: BlockWrite> {
    w: W,

    started: bool,
    block_ids: Vec<Uuid>,
    cache: Option<Buffer>,
}

impl<W: BlockWrite> BlockWriter<W> {
    /// Create a new BlockWriter.
    pub fn new(inner: W) -> Self {
        Self {
            w: inner,

            started: false,
            block_ids: Vec::new(),
            cache: None,
        }
    }

    async fn upload_cache(&mut self) -> Result<()> {
        let body = self.cache.take().expect("cache must be valid");
        let block_id = Uuid::new_v4();

        self.w
            .write_block(block_id, body.len() as u64, body)
            .await?;

        self.block_ids.push(block_id);
        Ok(())
    }
}

impl<W: BlockWrite> oio::Write for BlockWriter<W> {
    async fn write(&mut self, bs: Buffer) -> Result<()> {
        if !self.started && self.cache.is_none() {
            self.cache = Some(bs);
            return Ok(());
        }

        self.started = true;
        self.upload_cache().await?;
        self.cache = Some(bs);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if !self.started {
            let body = self.cache.take().unwrap_or_default();
            return self.w.write_once(body.len() as u64, body).await;
        }

        if self.cache.is_some() {
            self.upload_cache().await?;
        }

        self.w.complete_block(self.block_ids.clone()).await
    }

    async fn abort(&mut self) -> Result<()> {
        if !self.started {
            self.cache = None;
            return Ok(());
        }

        self.w.abort_block(self.block_ids.clone()).await?;
        self.cache = None;
        Ok(())
    }
}
