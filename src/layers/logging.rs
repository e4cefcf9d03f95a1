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

use async_trait::async_trait;
use log::debug;
use log::log;
use log::Level;

use crate::raw::*;
use crate::*;

/// Add [log](https://docs.rs/log/) for every operation.
///
/// # Logging
///
/// - FileIO will log in structural way.
/// - Every operation will start with a `started` log entry.
/// - Every operation will finish with the following status:
///   - `finished`: the operation is finished.
///   - `failed`: the operation returns an error.
/// - The default log level while expected error happened is `Warn`.
/// - The default log level while unexpected failure happened is `Error`.
///
/// # Examples
///
/// ```no_run
/// # use fileio::layers::LoggingLayer;
/// # use fileio::services;
/// # use fileio::Operator;
/// # use fileio::Result;
///
/// # fn main() -> Result<()> {
/// let _ = Operator::new(services::Memory::default())?
///     .layer(LoggingLayer::default())
///     .finish();
/// # Ok(())
/// # }
/// ```
///
/// # Output
///
/// FileIO is using [`log`](https://docs.rs/log/latest/log/) for logging
/// internally.
///
/// To enable logging output, please set `RUST_LOG`:
///
/// ```shell
/// RUST_LOG=debug ./app
/// ```
///
/// To config logging output, please refer to [Configure Logging](https://rust-lang-nursery.github.io/rust-cookbook/development_tools/debugging/config_log.html):
///
/// ```shell
/// RUST_LOG="info,fileio::services=debug" ./app
/// ```
#[derive(Debug, Copy, Clone, Default)]
pub struct LoggingLayer;

impl<A: Accessor> Layer<A> for LoggingLayer {
    type LayeredAccessor = LoggingAccessor<A>;

    fn layer(&self, inner: A) -> Self::LayeredAccessor {
        let info = inner.info();
        LoggingAccessor { inner, info }
    }
}

/// The accessor built by [`LoggingLayer`].
pub struct LoggingAccessor<A: Accessor> {
    inner: A,

    info: AccessorInfo,
}

impl<A: Accessor> Debug for LoggingAccessor<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

impl<A: Accessor> LoggingAccessor<A> {
    fn log_started(&self, op: Operation, context: &str) {
        debug!(
            target: "fileio::services",
            "service={} name={} {}: {} started",
            self.info.scheme(),
            self.info.name(),
            op,
            context,
        );
    }

    fn log_finished(&self, op: Operation, context: &str) {
        debug!(
            target: "fileio::services",
            "service={} name={} {}: {} finished",
            self.info.scheme(),
            self.info.name(),
            op,
            context,
        );
    }

    fn log_failed(&self, op: Operation, context: &str, err: &Error) {
        // Expected errors are business as usual, don't shout about them.
        let level = if err.kind() == ErrorKind::Unexpected {
            Level::Error
        } else {
            Level::Warn
        };

        log!(
            target: "fileio::services",
            level,
            "service={} name={} {}: {} failed {}",
            self.info.scheme(),
            self.info.name(),
            op,
            context,
            err,
        );
    }

    fn observe<T>(&self, op: Operation, context: &str, res: Result<T>) -> Result<T> {
        match res {
            Ok(v) => {
                self.log_finished(op, context);
                Ok(v)
            }
            Err(err) => {
                self.log_failed(op, context, &err);
                Err(err)
            }
        }
    }
}

#[async_trait]
impl<A: Accessor> LayeredAccessor for LoggingAccessor<A> {
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

    fn info(&self) -> AccessorInfo {
        self.info.clone()
    }

    async fn create_dir(&self, path: &str, args: OpCreateDir) -> Result<RpCreateDir> {
        let context = format!("path={path}");
        self.log_started(Operation::CreateDir, &context);
        let res = self.inner.create_dir(path, args).await;
        self.observe(Operation::CreateDir, &context, res)
    }

    async fn read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::Reader)> {
        let context = format!("path={path} range={}", args.range());
        self.log_started(Operation::Read, &context);
        let res = self.inner.read(path, args).await;
        self.observe(Operation::Read, &context, res)
    }

    async fn write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::Writer)> {
        let context = format!("path={path}");
        self.log_started(Operation::Write, &context);
        let res = self.inner.write(path, args).await;
        self.observe(Operation::Write, &context, res)
    }

    async fn copy(&self, from: &str, to: &str, args: OpCopy) -> Result<RpCopy> {
        let context = format!("from={from} to={to}");
        self.log_started(Operation::Copy, &context);
        let res = self.inner.copy(from, to, args).await;
        self.observe(Operation::Copy, &context, res)
    }

    async fn rename(&self, from: &str, to: &str, args: OpRename) -> Result<RpRename> {
        let context = format!("from={from} to={to}");
        self.log_started(Operation::Rename, &context);
        let res = self.inner.rename(from, to, args).await;
        self.observe(Operation::Rename, &context, res)
    }

    async fn stat(&self, path: &str, args: OpStat) -> Result<RpStat> {
        let context = format!("path={path}");
        self.log_started(Operation::Stat, &context);
        let res = self.inner.stat(path, args).await;
        self.observe(Operation::Stat, &context, res)
    }

    async fn delete(&self, path: &str, args: OpDelete) -> Result<RpDelete> {
        let context = format!("path={path}");
        self.log_started(Operation::Delete, &context);
        let res = self.inner.delete(path, args).await;
        self.observe(Operation::Delete, &context, res)
    }

    async fn list(&self, path: &str, args: OpList) -> Result<(RpList, Self::Lister)> {
        let context = format!("path={path} recursive={}", args.recursive());
        self.log_started(Operation::List, &context);
        let res = self.inner.list(path, args).await;
        self.observe(Operation::List, &context, res)
    }

    fn blocking_create_dir(&self, path: &str, args: OpCreateDir) -> Result<RpCreateDir> {
        let context = format!("path={path}");
        self.log_started(Operation::BlockingCreateDir, &context);
        let res = self.inner.blocking_create_dir(path, args);
        self.observe(Operation::BlockingCreateDir, &context, res)
    }

    fn blocking_read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::BlockingReader)> {
        let context = format!("path={path} range={}", args.range());
        self.log_started(Operation::BlockingRead, &context);
        let res = self.inner.blocking_read(path, args);
        self.observe(Operation::BlockingRead, &context, res)
    }

    fn blocking_write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::BlockingWriter)> {
        let context = format!("path={path}");
        self.log_started(Operation::BlockingWrite, &context);
        let res = self.inner.blocking_write(path, args);
        self.observe(Operation::BlockingWrite, &context, res)
    }

    fn blocking_copy(&self, from: &str, to: &str, args: OpCopy) -> Result<RpCopy> {
        let context = format!("from={from} to={to}");
        self.log_started(Operation::BlockingCopy, &context);
        let res = self.inner.blocking_copy(from, to, args);
        self.observe(Operation::BlockingCopy, &context, res)
    }

    fn blocking_rename(&self, from: &str, to: &str, args: OpRename) -> Result<RpRename> {
        let context = format!("from={from} to={to}");
        self.log_started(Operation::BlockingRename, &context);
        let res = self.inner.blocking_rename(from, to, args);
        self.observe(Operation::BlockingRename, &context, res)
    }

    fn blocking_stat(&self, path: &str, args: OpStat) -> Result<RpStat> {
        let context = format!("path={path}");
        self.log_started(Operation::BlockingStat, &context);
        let res = self.inner.blocking_stat(path, args);
        self.observe(Operation::BlockingStat, &context, res)
    }

    fn blocking_delete(&self, path: &str, args: OpDelete) -> Result<RpDelete> {
        let context = format!("path={path}");
        self.log_started(Operation::BlockingDelete, &context);
        let res = self.inner.blocking_delete(path, args);
        self.observe(Operation::BlockingDelete, &context, res)
    }

    fn blocking_list(&self, path: &str, args: OpList) -> Result<(RpList, Self::BlockingLister)> {
        let context = format!("path={path} recursive={}", args.recursive());
        self.log_started(Operation::BlockingList, &context);
        let res = self.inner.blocking_list(path, args);
        self.observe(Operation::BlockingList, &context, res)
    }
}
