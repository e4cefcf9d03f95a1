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

use std::collections::VecDeque;
use std::convert::Infallible;
use std::mem;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

use bytes::Buf;
use bytes::Bytes;
use bytes::BytesMut;
use futures::Stream;

/// Buffer is a wrapper of contiguous `Bytes` and non contiguous `[Bytes]`.
///
/// We designed buffer to allow underlying storage to return non-contiguous
/// bytes. For example, http based storage like s3 could generate
/// non-contiguous bytes by stream.
#[derive(Clone)]
pub struct Buffer(Inner);

#[derive(Clone)]
enum Inner {
    Contiguous(Bytes),
    NonContiguous { parts: VecDeque<Bytes>, size: usize },
}

impl Buffer {
    /// Create a new empty buffer.
    ///
    /// This operation is const and no allocation will be performed.
    #[inline]
    pub const fn new() -> Self {
        Self(Inner::Contiguous(Bytes::new()))
    }

    /// Get the length of the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        match &self.0 {
            Inner::Contiguous(b) => b.remaining(),
            Inner::NonContiguous { size, .. } => *size,
        }
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone internal bytes to a new `Bytes`.
    ///
    /// # Notes
    ///
    /// This operation copies the non-contiguous parts into one contiguous
    /// allocation and should be used with caution on hot paths.
    pub fn to_bytes(&self) -> Bytes {
        match &self.0 {
            Inner::Contiguous(b) => b.clone(),
            Inner::NonContiguous { parts, size } => {
                if parts.len() == 1 {
                    return parts[0].clone();
                }

                let mut bs = BytesMut::with_capacity(*size);
                for b in parts {
                    bs.extend_from_slice(b);
                }
                bs.freeze()
            }
        }
    }

    /// Convert the buffer into a `Vec<u8>`.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut b = f.debug_struct("Buffer");

        match &self.0 {
            Inner::Contiguous(bs) => {
                b.field("type", &"contiguous");
                b.field("size", &bs.len());
            }
            Inner::NonContiguous { parts, size } => {
                b.field("type", &"non_contiguous");
                b.field("parts", &parts.len());
                b.field("size", size);
            }
        }
        b.finish_non_exhaustive()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bs: Vec<u8>) -> Self {
        Self(Inner::Contiguous(bs.into()))
    }
}

impl From<Bytes> for Buffer {
    fn from(bs: Bytes) -> Self {
        Self(Inner::Contiguous(bs))
    }
}

impl From<String> for Buffer {
    fn from(s: String) -> Self {
        Self(Inner::Contiguous(Bytes::from(s)))
    }
}

impl From<&'static [u8]> for Buffer {
    fn from(s: &'static [u8]) -> Self {
        Self(Inner::Contiguous(Bytes::from_static(s)))
    }
}

impl From<&'static str> for Buffer {
    fn from(s: &'static str) -> Self {
        Self(Inner::Contiguous(Bytes::from_static(s.as_bytes())))
    }
}

impl From<VecDeque<Bytes>> for Buffer {
    fn from(bs: VecDeque<Bytes>) -> Self {
        let size = bs.iter().map(Bytes::len).sum();
        Self(Inner::NonContiguous { parts: bs, size })
    }
}

impl From<Vec<Bytes>> for Buffer {
    fn from(bs: Vec<Bytes>) -> Self {
        let size = bs.iter().map(Bytes::len).sum();
        Self(Inner::NonContiguous {
            parts: bs.into(),
            size,
        })
    }
}

impl FromIterator<Bytes> for Buffer {
    fn from_iter<T: IntoIterator<Item = Bytes>>(iter: T) -> Self {
        let parts: VecDeque<Bytes> = iter.into_iter().collect();
        let size = parts.iter().map(Bytes::len).sum();
        Self(Inner::NonContiguous { parts, size })
    }
}

impl Buf for Buffer {
    #[inline]
    fn remaining(&self) -> usize {
        self.len()
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        match &self.0 {
            Inner::Contiguous(b) => b.chunk(),
            Inner::NonContiguous { parts, .. } => parts.front().map_or(&[], |b| b.chunk()),
        }
    }

    fn advance(&mut self, mut cnt: usize) {
        match &mut self.0 {
            Inner::Contiguous(b) => b.advance(cnt),
            Inner::NonContiguous { parts, size } => {
                assert!(cnt <= *size, "cannot advance past {size} bytes");

                *size -= cnt;
                while cnt > 0 {
                    let front = parts.front_mut().expect("missing parts while advancing");
                    if front.remaining() > cnt {
                        front.advance(cnt);
                        break;
                    }

                    cnt -= front.remaining();
                    parts.pop_front();
                }
            }
        }
    }
}

/// Iterate over the buffer in `Bytes` chunks without copying.
impl Iterator for Buffer {
    type Item = Bytes;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            Inner::Contiguous(bs) => {
                if bs.is_empty() {
                    None
                } else {
                    Some(mem::take(bs))
                }
            }
            Inner::NonContiguous { parts, size } => {
                let part = parts.pop_front()?;
                *size -= part.len();
                Some(part)
            }
        }
    }
}

/// Buffer streams its chunks so it can be handed to http clients as a
/// request body without copying.
impl Stream for Buffer {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().next().map(Ok))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            Inner::Contiguous(bs) => {
                let n = usize::from(!bs.is_empty());
                (n, Some(n))
            }
            Inner::NonContiguous { parts, .. } => (parts.len(), Some(parts.len())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_contiguous_buffer() {
        let mut buf = Buffer::from("hello world");
        assert_eq!(buf.len(), 11);
        assert_eq!(buf.chunk(), b"hello world");

        buf.advance(6);
        assert_eq!(buf.to_bytes(), Bytes::from_static(b"world"));
    }

    #[test]
    fn test_non_contiguous_buffer() {
        let mut buf = Buffer::from(vec![
            Bytes::from_static(b"hello"),
            Bytes::from_static(b" "),
            Bytes::from_static(b"world"),
        ]);
        assert_eq!(buf.len(), 11);
        assert_eq!(buf.to_bytes(), Bytes::from_static(b"hello world"));

        buf.advance(6);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.to_bytes(), Bytes::from_static(b"world"));
    }

    #[test]
    fn test_buffer_iter() {
        let buf = Buffer::from(vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")]);
        let parts: Vec<Bytes> = buf.collect();
        assert_eq!(
            parts,
            vec![Bytes::from_static(b"ab"), Bytes::from_static(b"cd")]
        );
    }

    #[test]
    fn test_empty_buffer() {
        let buf = Buffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.to_bytes(), Bytes::new());
    }
}
