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
use std::pin::Pin;
use std::task::ready;
use std::task::Context;
use std::task::Poll;

use futures::Stream;

use crate::raw::oio::BlockingList;
use crate::raw::oio::ListDyn;
use crate::raw::*;
use crate::*;

/// Lister is designed to list entries at given path in an asynchronous
/// manner.
///
/// Users can construct Lister by [`Operator::lister`].
///
/// - Lister implements `Stream<Item = Result<Entry>>`.
/// - Returning `Some(Err(err))` means an error happened during listing,
///   the lister should not be used anymore.
/// - Returning `None` means the lister has been exhausted.
pub struct Lister {
    state: State,
}

enum State {
    Idle(Option<oio::Lister>),
    Listing(BoxedFuture<'static, (oio::Lister, Result<Option<oio::Entry>>)>),
    Done,
}

/// # Safety
///
/// Lister will only be accessed with `&mut self`.
unsafe impl Sync for Lister {}

impl Lister {
    /// Create a new lister.
    pub(crate) fn new(l: oio::Lister) -> Self {
        Self {
            state: State::Idle(Some(l)),
        }
    }
}

impl Stream for Lister {
    type Item = Result<Entry>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            match &mut this.state {
                State::Idle(l) => {
                    let mut l = l.take().expect("lister must be valid");
                    let fut = Box::pin(async move {
                        let ret = l.next_dyn().await;
                        (l, ret)
                    });
                    this.state = State::Listing(fut);
                }
                State::Listing(fut) => {
                    let (l, ret) = ready!(fut.as_mut().poll(cx));

                    return match ret {
                        Ok(Some(entry)) => {
                            this.state = State::Idle(Some(l));
                            Poll::Ready(Some(Ok(entry.into())))
                        }
                        Ok(None) => {
                            this.state = State::Done;
                            Poll::Ready(None)
                        }
                        Err(err) => {
                            this.state = State::Done;
                            Poll::Ready(Some(Err(err)))
                        }
                    };
                }
                State::Done => return Poll::Ready(None),
            }
        }
    }
}

/// BlockingLister is designed to list entries at given path in a blocking
/// manner.
///
/// Users can construct BlockingLister by
/// [`BlockingOperator::lister`][crate::BlockingOperator::lister].
///
/// - BlockingLister implements `Iterator<Item = Result<Entry>>`.
/// - Returning `Some(Err(err))` means an error happened during listing,
///   the lister should not be used anymore.
/// - Returning `None` means the lister has been exhausted.
pub struct BlockingLister {
    inner: oio::BlockingLister,
    errored: bool,
}

impl BlockingLister {
    /// Create a new blocking lister.
    pub(crate) fn new(l: oio::BlockingLister) -> Self {
        Self {
            inner: l,
            errored: false,
        }
    }
}

impl Iterator for BlockingLister {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored {
            return None;
        }

        match self.inner.next() {
            Ok(Some(entry)) => Some(Ok(entry.into())),
            Ok(None) => None,
            Err(err) => {
                self.errored = true;
                Some(Err(err))
            }
        }
    }
}
