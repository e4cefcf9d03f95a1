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

use anyhow::Result;

use super::*;

/// remove_all on a nested tree must delete everything under the path.
#[tokio::test]
async fn test_remove_all_basic() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();

        let expected = [
            "x/", "x/y", "x/x/", "x/x/y", "x/x/x/", "x/x/x/y", "x/x/x/x/",
        ];

        for path in expected.iter() {
            if path.ends_with('/') {
                t.op.create_dir(&format!("{parent}/{path}")).await?;
            } else {
                t.op.write(&format!("{parent}/{path}"), "demo").await?;
            }
        }

        t.op.remove_all(&format!("{parent}/x/")).await?;

        for path in expected.iter() {
            if path.ends_with('/') {
                // A dir deletion is best effort, ignore the remains.
                continue;
            }

            assert!(
                !t.op.exists(&format!("{parent}/{path}")).await?,
                "{parent}/{path} must be removed"
            )
        }
    }

    Ok(())
}

/// remove_all on a single file works like delete.
#[tokio::test]
async fn test_remove_all_file() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        t.op.write(&path, "data").await?;

        t.op.remove_all(&path).await?;

        assert!(!t.op.exists(&path).await?);
    }

    Ok(())
}

/// remove_all on a path that doesn't exist is fine.
#[tokio::test]
async fn test_remove_all_not_exist() -> Result<()> {
    for t in operators() {
        t.op.remove_all(&format!("{}/", gen_file_path())).await?;
    }

    Ok(())
}
