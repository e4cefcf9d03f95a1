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

use crate::raw::*;
use crate::*;

/// MultipartWrite is used to implement [`oio::Write`] based on multipart
/// uploads. By implementing MultipartWrite, services don't need to care
/// about the details of buffering and uploading parts.
///
/// # Architecture
///
/// - Services impl `MultipartWrite`
/// - `MultipartWriter` impl `Write`
/// - Expose `MultipartWriter` as `Accessor::Writer`
///
/// # Notes
///
/// `MultipartWrite` has an oneshot optimization when `write` has been called
/// only once:
///
/// ```no_build
/// w.write(bs).await?;
/// w.close().await?;
/// ```
///
/// We will use `write_once` instead of starting a new multipart upload.
pub trait MultipartWrite: Send + Sync + Unpin + 'static {
    /// write_once is used to write the data to underlying storage at once.
    ///
    /// MultipartWriter will call this API when:
    ///
    /// - All the data has been written to the buffer and we can perform the
    ///   upload at once.
    fn write_once(&self, size: u64, body: Buffer) -> impl Future<Output = Result<()>> + MaybeSend;

    /// initiate_part will call start a multipart upload and return the
    /// upload id.
    ///
    /// MultipartWriter will call this when the size of the data is larger
    /// than one chunk.
    fn initiate_part(&self) -> impl Future<Output = Result<String>> + MaybeSend;

    /// write_part will write a part of the data and returns the result
    /// [`MultipartPart`].
    ///
    /// MultipartWriter will call this API and stores the result in order.
    ///
    /// - part_number is the index of the part, starting from 0.
    fn write_part(
        &self,
        upload_id: &str,
        part_number: usize,
        size: u64,
        body: Buffer,
    ) -> impl Future<Output = Result<MultipartPart>> + MaybeSend;

    /// complete_part will complete the multipart upload to build the final
    /// file.
    fn complete_part(
        &self,
        upload_id: &str,
        parts: &[MultipartPart],
    ) -> impl Future<Output = Result<()>> + MaybeSend;

    /// abort_part will cancel the multipart upload and purge all data.
    fn abort_part(&self, upload_id: &str) -> impl Future<Output = Result<()>> + MaybeSend;
}

/// The result of [`MultipartWrite::write_part`].
///
/// - `part_number` is the index of the part, starting from 0.
/// - `etag` is the `ETag` of the part.
#[derive(Clone)]
pub struct MultipartPart {
    /// The number of the part, starting from 0.
    pub part_number: usize,
    /// The etag of the part.
    pub etag: String,
}

/// MultipartWriter will implement [`oio::Write`] based on multipart uploads.
///
/// The writer keeps the latest chunk in cache and only starts a multipart
/// upload on the second chunk, so a single-chunk write stays an oneshot put.
pub struct MultipartWriter<W: MultipartWrite> {
    w: W,

    upload_id: Option<String>,
    parts: Vec<MultipartPart>,
    cache: Option<Buffer>,
    next_part_number: usize,
}

impl<W: MultipartWrite> MultipartWriter<W> {
    /// Create a new MultipartWriter.
    pub fn new(inner: W) -> Self {
        Self {
            w: inner,

            upload_id: None,
            parts: Vec::new(),
            cache: None,
            next_part_number: 0,
        }
    }

    async fn upload_cache(&mut self, upload_id: &str) -> Result<()> {
        let body = self.cache.take().expect("cache must be valid");
        let part_number = self.next_part_number;

        let part = self
            .w
            .write_part(upload_id, part_number, body.len() as u64, body)
            .await?;

        self.parts.push(part);
        self.next_part_number += 1;
        Ok(())
    }
}

impl<W: MultipartWrite> oio::Write for MultipartWriter<W> {
    async fn write(&mut self, bs: Buffer) -> Result<()> {
        if self.cache.is_none() {
            self.cache = Some(bs);
            return Ok(());
        }

        let upload_id = match self.upload_id.clone() {
            Some(v) => v,
            None => {
                let upload_id = self.w.initiate_part().await?;
                self.upload_id = Some(upload_id.clone());
                upload_id
            }
        };

        self.upload_cache(&upload_id).await?;
        self.cache = Some(bs);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        let upload_id = match self.upload_id.clone() {
            Some(v) => v,
            None => {
                // No part has been uploaded, we can send the cache as a
                // whole object instead.
                let body = self.cache.take().unwrap_or_default();
                return self.w.write_once(body.len() as u64, body).await;
            }
        };

        if self.cache.is_some() {
            self.upload_cache(&upload_id).await?;
        }

        self.w.complete_part(&upload_id, &self.parts).await
    }

    async fn abort(&mut self) -> Result<()> {
        let Some(upload_id) = self.upload_id.clone() else {
            self.cache = None;
            return Ok(());
        };

        self.w.abort_part(&upload_id).await?;
        self.cache = None;
        Ok(())
    }
}
