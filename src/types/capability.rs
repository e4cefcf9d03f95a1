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

/// Capability is used to describe what operations are supported
/// by current Operator.
///
/// Via capability, we can know:
///
/// - Whether current Operator supports read or not.
/// - Whether current Operator supports write with append or not.
///
/// All fields of Capability are public and can be accessed directly.
///
/// # Naming Style
///
/// - Operation itself should be in lower case, like `read`, `write`.
/// - Operation with variants should be named like `write_can_append`.
/// - Operation with arguments should be named like `read_with_range`.
#[derive(Copy, Clone, Default)]
pub struct Capability {
    /// If operator supports stat, it will be true.
    pub stat: bool,

    /// If operator supports read, it will be true.
    pub read: bool,
    /// If operator supports read with range, it will be true.
    pub read_with_range: bool,

    /// If operator supports write, it will be true.
    pub write: bool,
    /// If operator supports write with empty content, it will be true.
    pub write_can_empty: bool,
    /// If operator supports write by append, it will be true.
    pub write_can_append: bool,
    /// If operator supports write with multiple chunks, it will be true.
    pub write_can_multi: bool,
    /// If operator supports write with content type, it will be true.
    pub write_with_content_type: bool,
    /// If operator supports write with cache control, it will be true.
    pub write_with_cache_control: bool,
    /// The minimum chunk that the services accept for multi part uploads,
    /// except for the last one.
    pub write_multi_min_size: Option<usize>,

    /// If operator supports create dir, it will be true.
    pub create_dir: bool,

    /// If operator supports delete, it will be true.
    pub delete: bool,

    /// If operator supports copy, it will be true.
    pub copy: bool,

    /// If operator supports rename, it will be true.
    pub rename: bool,

    /// If operator supports list, it will be true.
    pub list: bool,
    /// If backend supports list with limit, it will be true.
    pub list_with_limit: bool,
    /// If backend supports list with start after, it will be true.
    pub list_with_start_after: bool,
    /// If backend supports listing recursively, it will be true.
    pub list_with_recursive: bool,

    /// If operator supports blocking, it will be true.
    pub blocking: bool,
}

impl Debug for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = vec![];

        if self.stat {
            s.push("Stat");
        }
        if self.read {
            s.push("Read");
        }
        if self.write {
            s.push("Write");
        }
        if self.create_dir {
            s.push("CreateDir");
        }
        if self.delete {
            s.push("Delete");
        }
        if self.copy {
            s.push("Copy");
        }
        if self.rename {
            s.push("Rename");
        }
        if self.list {
            s.push("List");
        }
        if self.blocking {
            s.push("Blocking");
        }

        write!(f, "{{ {} }}", s.join(" | "))
    }
}
