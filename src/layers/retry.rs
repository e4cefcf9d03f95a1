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

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use backon::BlockingRetryable;
use backon::ExponentialBuilder;
use backon::Retryable;
use log::warn;

use crate::raw::*;
use crate::*;

/// Add retry for temporary failed operations.
///
/// # Notes
///
/// This layer will retry failed operations when [`Error::is_temporary`]
/// returns true. If the operation still failed, this layer will set error to
/// `Persistent` which means error has been retried.
///
/// `write` and `read` on the returned reader/writer are not retried: the
/// caller owns the stream position and only they can decide how to resume.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// use fileio::layers::RetryLayer;
/// use fileio::services;
/// use fileio::Operator;
///
/// let _ = Operator::new(services::Memory::default())
///     .expect("must init")
///     .layer(RetryLayer::new())
///     .finish();
/// ```
#[derive(Default)]
pub struct RetryLayer {
    builder: ExponentialBuilder,
}

impl RetryLayer {
    /// Create a new retry layer.
    ///
    /// # Examples
    ///
    /// ```
    /// # use anyhow::Result;
    /// use fileio::layers::RetryLayer;
    /// use fileio::services;
    /// use fileio::Operator;
    ///
    /// let _ = Operator::new(services::Memory::default())
    ///     .expect("must init")
    ///     .layer(RetryLayer::new())
    ///     .finish();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Set jitter of current backoff.
    ///
    /// If jitter is enabled, ExponentialBackoff will add a random jitter in
    /// `[0, min_delay)` to current delay.
    pub fn with_jitter(mut self) -> Self {
        self.builder = self.builder.with_jitter();
        self
    }

    /// Set factor of current backoff.
    ///
    /// # Panics
    ///
    /// This function will panic if input factor smaller than `1.0`.
    pub fn with_factor(mut self, factor: f32) -> Self {
        self.builder = self.builder.with_factor(factor);
        self
    }

    /// Set min_delay of current backoff.
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.builder = self.builder.with_min_delay(min_delay);
        self
    }

    /// Set max_delay of current backoff.
    ///
    /// Delay will not increase if current delay is larger than max_delay.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.builder = self.builder.with_max_delay(max_delay);
        self
    }

    /// Set max_times of current backoff.
    ///
    /// Backoff will return `None` if max times is reaching.
    pub fn with_max_times(mut self, max_times: usize) -> Self {
        self.builder = self.builder.with_max_times(max_times);
        self
    }
}

impl<A: Accessor> Layer<A> for RetryLayer {
    type LayeredAccessor = RetryAccessor<A>;

    fn layer(&self, inner: A) -> Self::LayeredAccessor {
        RetryAccessor {
            inner,
            builder: self.builder.clone(),
        }
    }
}

/// The accessor built by [`RetryLayer`].
pub struct RetryAccessor<A: Accessor> {
    inner: A,
    builder: ExponentialBuilder,
}

impl<A: Accessor> Debug for RetryAccessor<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryAccessor")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

fn notify(err: &Error, dur: Duration) {
    warn!(
        target: "fileio::layers::retry",
        "will retry after {}s because: {}",
        dur.as_secs_f64(),
        err,
    )
}

#[async_trait]
impl<A: Accessor> LayeredAccessor for RetryAccessor<A> {
    type Inner = A;
    type Reader = A::Reader;
    type Writer = A::Writer;
    type Lister = A::Lister;
    type BlockingReader = A::BlockingReader;
    type BlockingWriter = A::BlockingWriter;
    type BlockingLister = A::BlockingLister;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn create_dir(&self, path: &str, args: OpCreateDir) -> Result<RpCreateDir> {
        {
            || self.inner.create_dir(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    async fn read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::Reader)> {
        {
            || self.inner.read(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    async fn write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::Writer)> {
        {
            || self.inner.write(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    async fn copy(&self, from: &str, to: &str, args: OpCopy) -> Result<RpCopy> {
        {
            || self.inner.copy(from, to, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    async fn rename(&self, from: &str, to: &str, args: OpRename) -> Result<RpRename> {
        {
            || self.inner.rename(from, to, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    async fn stat(&self, path: &str, args: OpStat) -> Result<RpStat> {
        {
            || self.inner.stat(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    async fn delete(&self, path: &str, args: OpDelete) -> Result<RpDelete> {
        {
            || self.inner.delete(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    async fn list(&self, path: &str, args: OpList) -> Result<(RpList, Self::Lister)> {
        {
            || self.inner.list(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .await
        .map_err(|e| e.set_persistent())
    }

    fn blocking_create_dir(&self, path: &str, args: OpCreateDir) -> Result<RpCreateDir> {
        {
            || self.inner.blocking_create_dir(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }

    fn blocking_read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::BlockingReader)> {
        {
            || self.inner.blocking_read(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }

    fn blocking_write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::BlockingWriter)> {
        {
            || self.inner.blocking_write(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }

    fn blocking_copy(&self, from: &str, to: &str, args: OpCopy) -> Result<RpCopy> {
        {
            || self.inner.blocking_copy(from, to, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }

    fn blocking_rename(&self, from: &str, to: &str, args: OpRename) -> Result<RpRename> {
        {
            || self.inner.blocking_rename(from, to, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }

    fn blocking_stat(&self, path: &str, args: OpStat) -> Result<RpStat> {
        {
            || self.inner.blocking_stat(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }

    fn blocking_delete(&self, path: &str, args: OpDelete) -> Result<RpDelete> {
        {
            || self.inner.blocking_delete(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }

    fn blocking_list(&self, path: &str, args: OpList) -> Result<(RpList, Self::BlockingLister)> {
        {
            || self.inner.blocking_list(path, args.clone())
        }
        .retry(&self.builder)
        .when(|e| e.is_temporary())
        .notify(notify)
        .call()
        .map_err(|e| e.set_persistent())
    }
}
