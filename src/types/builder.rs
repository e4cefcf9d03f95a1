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

use std::collections::HashMap;

use crate::raw::*;
use crate::*;

/// Builder is used to set up a real underlying service, i.e. storage accessor.
///
/// One builder is usually a group of configuration items, and the service
/// builds the accessor from them. Builder is designed to be used with
/// [`Operator::new`][crate::Operator::new].
pub trait Builder: Default {
    /// Associated scheme for this builder. It indicates what underlying
    /// service is.
    const SCHEME: Scheme;
    /// The accessor that built by this builder.
    type Accessor: Accessor;

    /// Construct a builder from given map which contains several parameters
    /// needed by underlying service.
    fn from_map(map: HashMap<String, String>) -> Self;

    /// Construct a builder from given iterator which contains several
    /// parameters needed by underlying service.
    fn from_iter(iter: impl Iterator<Item = (String, String)>) -> Self {
        Self::from_map(iter.collect())
    }

    /// Consume the accessor builder to build a service.
    fn build(&mut self) -> Result<Self::Accessor>;
}
