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
use std::fmt::Formatter;
use std::sync::Arc;

use async_trait::async_trait;

use crate::raw::*;
use crate::*;

/// Complete underlying services features so that users will not bother about
/// service native capabilities.
///
/// For example, services like `fs` can only list one dir at a time, but
/// users expect `recursive` listing to work everywhere. CompleteLayer fills
/// the gap with a flat walk over the native lister.
///
/// CompleteLayer is applied internally by
/// [`OperatorBuilder`][crate::OperatorBuilder], services and users should
/// never need to apply it themselves.
pub struct CompleteLayer;

impl<A: Accessor> Layer<A> for CompleteLayer {
    type LayeredAccessor = CompleteAccessor<A>;

    fn layer(&self, inner: A) -> Self::LayeredAccessor {
        CompleteAccessor {
            inner: Arc::new(inner),
        }
    }
}

/// Provide complete wrapper for backend.
pub struct CompleteAccessor<A: Accessor> {
    inner: Arc<A>,
}

impl<A: Accessor> Debug for CompleteAccessor<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt(f)
    }
}

#[async_trait]
impl<A: Accessor> LayeredAccessor for CompleteAccessor<A> {
    type Inner = A;
    type Reader = A::Reader;
    type Writer = A::Writer;
    type Lister = TwoWays<A::Lister, oio::FlatLister<Arc<A>, A::Lister>>;
    type BlockingReader = A::BlockingReader;
    type BlockingWriter = A::BlockingWriter;
    type BlockingLister = TwoWays<A::BlockingLister, oio::FlatLister<Arc<A>, A::BlockingLister>>;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::Reader)> {
        self.inner.read(path, args).await
    }

    async fn write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::Writer)> {
        self.inner.write(path, args).await
    }

    async fn list(&self, path: &str, args: OpList) -> Result<(RpList, Self::Lister)> {
        let cap = self.inner.info().full_capability();

        if args.recursive() && !cap.list_with_recursive {
            let lister = oio::FlatLister::new(self.inner.clone(), path);
            return Ok((RpList::default(), TwoWays::Two(lister)));
        }

        let (rp, lister) = self.inner.list(path, args).await?;
        Ok((rp, TwoWays::One(lister)))
    }

    fn blocking_read(&self, path: &str, args: OpRead) -> Result<(RpRead, Self::BlockingReader)> {
        self.inner.blocking_read(path, args)
    }

    fn blocking_write(&self, path: &str, args: OpWrite) -> Result<(RpWrite, Self::BlockingWriter)> {
        self.inner.blocking_write(path, args)
    }

    fn blocking_list(&self, path: &str, args: OpList) -> Result<(RpList, Self::BlockingLister)> {
        let cap = self.inner.info().full_capability();

        if args.recursive() && !cap.list_with_recursive {
            let lister = oio::FlatLister::new(self.inner.clone(), path);
            return Ok((RpList::default(), TwoWays::Two(lister)));
        }

        let (rp, lister) = self.inner.blocking_list(path, args)?;
        Ok((rp, TwoWays::One(lister)))
    }
}
