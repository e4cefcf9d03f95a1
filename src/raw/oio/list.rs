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

/// Lister is a type erased [`List`].
pub type Lister = Box<dyn ListDyn>;

/// List is the internal trait used by FileIO to list entries.
///
/// Users should not use or import this trait unless they are implementing an
/// [`Accessor`].
pub trait List: Unpin + Send + Sync + 'static {
    /// Fetch a new page of [`Entry`].
    ///
    /// `Ok(None)` means all pages have been returned. Any following call
    /// to `next` will always get the same result.
    fn next(&mut self) -> impl Future<Output = Result<Option<oio::Entry>>> + MaybeSend;
}

impl List for () {
    async fn next(&mut self) -> Result<Option<oio::Entry>> {
        Ok(None)
    }
}

impl<T: List> List for Option<T> {
    async fn next(&mut self) -> Result<Option<oio::Entry>> {
        match self {
            Some(lister) => lister.next().await,
            None => Ok(None),
        }
    }
}

/// ListDyn is the dyn version of [`List`] which makes it possible to box.
pub trait ListDyn: Unpin + Send + Sync + 'static {
    /// The dyn version of [`List::next`].
    fn next_dyn(&mut self) -> BoxedFuture<Result<Option<oio::Entry>>>;
}

impl<T: List + ?Sized> ListDyn for T {
    fn next_dyn(&mut self) -> BoxedFuture<Result<Option<oio::Entry>>> {
        Box::pin(self.next())
    }
}

impl<T: ListDyn + ?Sized> List for Box<T> {
    async fn next(&mut self) -> Result<Option<oio::Entry>> {
        self.deref_mut().next_dyn().await
    }
}

/// BlockingLister is a boxed dyn [`BlockingList`].
pub type BlockingLister = Box<dyn BlockingList>;

/// BlockingList is the blocking version of [`List`].
pub trait BlockingList: Send + Sync + 'static {
    /// Fetch a new page of [`Entry`].
    ///
    /// `Ok(None)` means all pages have been returned.
    fn next(&mut self) -> Result<Option<oio::Entry>>;
}

impl BlockingList for () {
    fn next(&mut self) -> Result<Option<oio::Entry>> {
        Ok(None)
    }
}

impl<T: BlockingList> BlockingList for Option<T> {
    fn next(&mut self) -> Result<Option<oio::Entry>> {
        match self {
            Some(lister) => lister.next(),
            None => Ok(None),
        }
    }
}

/// `Box<dyn BlockingList>` won't implement `BlockingList` automatically.
/// To make BlockingLister work as expected, we must add this impl.
impl<T: BlockingList + ?Sized> BlockingList for Box<T> {
    fn next(&mut self) -> Result<Option<oio::Entry>> {
        (**self).next()
    }
}
