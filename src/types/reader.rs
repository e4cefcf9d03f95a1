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
use std::io;
use std::pin::Pin;
use std::task::ready;
use std::task::Context;
use std::task::Poll;

use bytes::Buf;
use futures::Stream;

use crate::raw::oio::BlockingRead;
use crate::raw::oio::Read;
use crate::raw::oio::ReadDyn;
use crate::raw::oio::ReadExt;
use crate::raw::*;
use crate::*;

/// Reader is designed to read data from given path in an asynchronous
/// manner.
///
/// # Usage
///
/// [`Reader`] provides two ways to read data:
///
/// - `read`: fetch the next chunk of data, an empty buffer means the end of
///   the stream.
/// - `read_to_end`: read all remaining data into one buffer.
///
/// [`Reader`] can also be converted into a [`futures::Stream`] of buffers
/// via [`Reader::into_stream`].
pub struct Reader {
    inner: oio::Reader,
}

impl Reader {
    /// Create a new reader.
    ///
    /// Create will use internal information to decide the most suitable
    /// implementation for users.
    ///
    /// We don't want to expose those details to users so keep this function
    /// in crate only.
    pub(crate) fn new(r: oio::Reader) -> Self {
        Reader { inner: r }
    }

    /// Fetch the next chunk of data.
    ///
    /// An empty buffer means the underlying reader has reached the end of
    /// the stream.
    pub async fn read(&mut self) -> Result<Buffer> {
        self.inner.read().await
    }

    /// Read all remaining data into one buffer.
    pub async fn read_to_end(&mut self) -> Result<Buffer> {
        self.inner.read_all().await
    }

    /// Convert the reader into a [`futures::Stream`] of [`Buffer`].
    pub fn into_stream(self) -> BufferStream {
        BufferStream::new(self.inner)
    }
}

/// BufferStream is a [`futures::Stream`] of [`Buffer`] built upon a
/// [`Reader`].
pub struct BufferStream {
    state: State,
}

enum State {
    Idle(Option<oio::Reader>),
    Reading(BoxedFuture<'static, (oio::Reader, Result<Buffer>)>),
}

/// # Safety
///
/// BufferStream will only be accessed with `&mut self`.
unsafe impl Sync for BufferStream {}

impl BufferStream {
    fn new(r: oio::Reader) -> Self {
        BufferStream {
            state: State::Idle(Some(r)),
        }
    }
}

impl Stream for BufferStream {
    type Item = Result<Buffer>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match &mut this.state {
                State::Idle(r) => {
                    let mut r = r.take().expect("reader must be valid");
                    let fut = Box::pin(async move {
                        let ret = r.read_dyn().await;
                        (r, ret)
                    });
                    this.state = State::Reading(fut);
                }
                State::Reading(fut) => {
                    let (r, ret) = ready!(fut.as_mut().poll(cx));
                    this.state = State::Idle(Some(r));

                    return match ret {
                        Ok(buf) if buf.is_empty() => Poll::Ready(None),
                        Ok(buf) => Poll::Ready(Some(Ok(buf))),
                        Err(err) => Poll::Ready(Some(Err(err))),
                    };
                }
            }
        }
    }
}

/// BlockingReader is designed to read data from given path in a blocking
/// manner.
pub struct BlockingReader {
    inner: oio::BlockingReader,

    /// Remaining bytes of the last chunk, served by the `std::io::Read`
    /// implementation.
    buf: Buffer,
}

impl BlockingReader {
    pub(crate) fn new(r: oio::BlockingReader) -> Self {
        BlockingReader {
            inner: r,
            buf: Buffer::new(),
        }
    }

    /// Fetch the next chunk of data.
    ///
    /// An empty buffer means the underlying reader has reached the end of
    /// the stream.
    pub fn read(&mut self) -> Result<Buffer> {
        if !self.buf.is_empty() {
            return Ok(std::mem::take(&mut self.buf));
        }
        self.inner.read()
    }

    /// Read all remaining data into one buffer.
    pub fn read_to_end(&mut self) -> Result<Buffer> {
        let pending = std::mem::take(&mut self.buf);
        let rest = self.inner.read_all()?;

        if pending.is_empty() {
            return Ok(rest);
        }

        Ok(Iterator::chain(pending.into_iter(), rest).collect())
    }
}

impl Iterator for BlockingReader {
    type Item = Result<Buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read() {
            Ok(buf) if buf.is_empty() => None,
            Ok(buf) => Some(Ok(buf)),
            Err(err) => Some(Err(err)),
        }
    }
}

impl io::Read for BlockingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.buf.is_empty() {
            self.buf = self.inner.read().map_err(io::Error::from)?;
            if self.buf.is_empty() {
                return Ok(0);
            }
        }

        let n = self.buf.remaining().min(buf.len());
        self.buf.copy_to_slice(&mut buf[..n]);
        Ok(n)
    }
}
