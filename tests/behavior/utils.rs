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

use fileio::layers::LoggingLayer;
use fileio::services;
use fileio::Operator;
use rand::prelude::*;
use tempfile::TempDir;
use uuid::Uuid;

/// An operator together with whatever guards keep it alive.
pub struct TestOperator {
    pub op: Operator,

    // Keep the temp dir alive as long as the fs operator.
    _guard: Option<TempDir>,
}

/// Build all operators that can be tested without external services.
pub fn operators() -> Vec<TestOperator> {
    let _ = env_logger::builder().is_test(true).try_init();

    let memory = Operator::new(services::Memory::default())
        .expect("memory operator must build")
        .layer(LoggingLayer::default())
        .finish();

    let dir = TempDir::new().expect("create temp dir must succeed");
    let mut fs = services::Fs::default();
    fs.root(&dir.path().to_string_lossy());
    let fs = Operator::new(fs)
        .expect("fs operator must build")
        .layer(LoggingLayer::default())
        .finish();

    vec![
        TestOperator {
            op: memory,
            _guard: None,
        },
        TestOperator {
            op: fs,
            _guard: Some(dir),
        },
    ]
}

/// Generate a random file path.
pub fn gen_file_path() -> String {
    format!("test_{}", Uuid::new_v4())
}

/// Generate random bytes between 4KiB and 16KiB.
pub fn gen_bytes() -> (Vec<u8>, usize) {
    let mut rng = thread_rng();

    let size = rng.gen_range(4 * 1024..16 * 1024);
    let mut content = vec![0; size];
    rng.fill_bytes(&mut content);

    (content, size)
}
