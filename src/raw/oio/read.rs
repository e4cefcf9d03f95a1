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
use std::ops::DerefMut;

use crate::raw::*;
use crate::*;

/// Reader is a type erased [`Read`].
pub type Reader = Box<dyn ReadDyn>;

/// Read is the internal trait used by FileIO to read data from storage.
///
/// Users should not use or import this trait unless they are implementing an
/// [`Accessor`].
///
/// # Notes
///
/// ## Object Safety
///
/// `Read` uses `async in trait`, making it not object safe, preventing the
/// use of `Box<dyn Read>`. To address this, we've introduced [`ReadDyn`] and
/// its compatible type `Box<dyn ReadDyn>`.
pub trait Read: Unpin + Send + Sync + 'static {
    /// Fetch more bytes from underlying reader.
    ///
    /// Returning an empty buffer means the reader has reached its
    /// "end of file" and will no longer be able to produce bytes.
    fn read(&mut self) -> impl Future<Output = Result<Buffer>> + MaybeSend;
}

impl Read for () {
    async fn read(&mut self) -> Result<Buffer> {
        Err(Error::new(
            ErrorKind::Unsupported,
            "output reader doesn't support read",
        ))
    }
}

impl Read for Buffer {
    async fn read(&mut self) -> Result<Buffer> {
        Ok(std::mem::take(self))
    }
}

/// ReadDyn is the dyn version of [`Read`] which makes it possible to box.
pub trait ReadDyn: Unpin + Send + Sync + 'static {
    /// The dyn version of [`Read::read`].
    fn read_dyn(&mut self) -> BoxedFuture<Result<Buffer>>;
}

impl<T: Read + ?Sized> ReadDyn for T {
    fn read_dyn(&mut self) -> BoxedFuture<Result<Buffer>> {
        Box::pin(self.read())
    }
}

/// # NOTE
///
/// Take care about the `deref_mut()` here. This makes sure that we are
/// calling functions upon `&mut T` instead of `&mut Box<T>`. The later one
/// will result in infinite recursion.
impl<T: ReadDyn + ?Sized> Read for Box<T> {
    async fn read(&mut self) -> Result<Buffer> {
        self.deref_mut().read_dyn().await
    }
}

/// Extension trait of [`Read`] that carries the whole-content helpers.
pub trait ReadExt: Read {
    /// Read all remaining chunks into one buffer.
    fn read_all(&mut self) -> impl Future<Output = Result<Buffer>> + MaybeSend;
}

impl<T: Read> ReadExt for T {
    async fn read_all(&mut self) -> Result<Buffer> {
        let mut bufs = Vec::new();
        loop {
            let buf = self.read().await?;
            if buf.is_empty() {
                return Ok(bufs.into_iter().flatten().collect());
            }
            bufs.push(buf)
        }
    }
}

/// BlockingReader is a boxed dyn [`BlockingRead`].
pub type BlockingReader = Box<dyn BlockingRead>;

/// BlockingRead is the blocking version of [`Read`].
pub trait BlockingRead: Send + Sync + 'static {
    /// Fetch more bytes from the underlying reader.
    ///
    /// An empty buffer means "end of file".
    fn read(&mut self) -> Result<Buffer>;

    /// Read all remaining chunks into one buffer.
    fn read_all(&mut self) -> Result<Buffer> {
        let mut bufs = Vec::new();
        loop {
            let buf = self.read()?;
            if buf.is_empty() {
                return Ok(bufs.into_iter().flatten().collect());
            }
            bufs.push(buf)
        }
    }
}

impl BlockingRead for () {
    fn read(&mut self) -> Result<Buffer> {
        Err(Error::new(
            ErrorKind::Unsupported,
            "output blocking reader doesn't support read",
        ))
    }
}

impl BlockingRead for Buffer {
    fn read(&mut self) -> Result<Buffer> {
        Ok(std::mem::take(self))
    }
}

/// `Box<dyn BlockingRead>` won't implement `BlockingRead` automatically.
/// To make BlockingReader work as expected, we must add this impl.
impl<T: BlockingRead + ?Sized> BlockingRead for Box<T> {
    fn read(&mut self) -> Result<Buffer> {
        (**self).read()
    }
}
