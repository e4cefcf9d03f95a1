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

use std::io::Read;

use bytes::BytesMut;
use tokio::io::AsyncReadExt;

use crate::raw::*;
use crate::*;

/// Use 2 MiB as default read chunk.
const DEFAULT_BUF_SIZE: usize = 2 * 1024 * 1024;

pub struct FsReader<F> {
    f: F,
    read: u64,
    size: u64,
    buf_size: usize,
}

impl<F> FsReader<F> {
    pub fn new(f: F, size: u64) -> Self {
        Self {
            f,
            read: 0,
            size,
            buf_size: DEFAULT_BUF_SIZE,
        }
    }

    fn chunk_size(&self) -> usize {
        ((self.size - self.read) as usize).min(self.buf_size)
    }
}

impl oio::Read for FsReader<tokio::fs::File> {
    async fn read(&mut self) -> Result<Buffer> {
        if self.read >= self.size {
            return Ok(Buffer::new());
        }

        let mut bs = BytesMut::with_capacity(self.chunk_size());

        let n = self
            .f
            .read_buf(&mut bs)
            .await
            .map_err(new_std_io_error)?;
        if n == 0 {
            // Reached the end of file earlier than expected.
            self.size = self.read;
            return Ok(Buffer::new());
        }

        self.read += n as u64;
        Ok(Buffer::from(bs.freeze()))
    }
}

impl oio::BlockingRead for FsReader<std::fs::File> {
    fn read(&mut self) -> Result<Buffer> {
        if self.read >= self.size {
            return Ok(Buffer::new());
        }

        let mut bs = vec![0; self.chunk_size()];

        let n = Read::read(&mut self.f, &mut bs).map_err(new_std_io_error)?;
        if n == 0 {
            self.size = self.read;
            return Ok(Buffer::new());
        }

        bs.truncate(n);
        self.read += n as u64;
        Ok(Buffer::from(bs))
    }
}
