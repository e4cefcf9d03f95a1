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

//! The raw I/O traits that services implement and the composers that turn
//! them into full readers, writers and listers.
//!
//! The `oio` module is only useful for services and layers developers; users
//! should use the types on [`crate::Operator`] instead.

mod read;
pub use read::*;

mod write;
pub use write::*;

mod list;
pub use list::*;

mod entry;
pub use entry::Entry;

mod multipart_write;
pub use multipart_write::MultipartPart;
pub use multipart_write::MultipartWrite;
pub use multipart_write::MultipartWriter;

mod block_write;
pub use block_write::BlockWrite;
pub use block_write::BlockWriter;

mod page_list;
pub use page_list::PageContext;
pub use page_list::PageList;
pub use page_list::PageLister;

mod flat_list;
pub use flat_list::FlatLister;

mod hierarchy_list;
pub use hierarchy_list::HierarchyLister;
