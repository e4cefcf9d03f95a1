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
use fileio::ErrorKind;

use super::*;

/// Copy a file and read it back.
#[tokio::test]
async fn test_copy_file_with_content() -> Result<()> {
    for t in operators() {
        let source = gen_file_path();
        let target = gen_file_path();
        let (content, _) = gen_bytes();

        t.op.write(&source, content.clone()).await?;

        t.op.copy(&source, &target).await?;

        let bs = t.op.read(&target).await?.to_bytes();
        assert_eq!(bs.as_ref(), content.as_slice());

        // Source must stay intact.
        assert!(t.op.exists(&source).await?);
    }

    Ok(())
}

/// Copy a file that doesn't exist must return NotFound.
#[tokio::test]
async fn test_copy_non_existing_source() -> Result<()> {
    for t in operators() {
        let result = t.op.copy(&gen_file_path(), &gen_file_path()).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    Ok(())
}

/// Copy must overwrite an existing target.
#[tokio::test]
async fn test_copy_with_existing_target() -> Result<()> {
    for t in operators() {
        let source = gen_file_path();
        let target = gen_file_path();
        let (content_source, _) = gen_bytes();
        let (content_target, _) = gen_bytes();

        t.op.write(&source, content_source.clone()).await?;
        t.op.write(&target, content_target).await?;

        t.op.copy(&source, &target).await?;

        let bs = t.op.read(&target).await?.to_bytes();
        assert_eq!(bs.as_ref(), content_source.as_slice());
    }

    Ok(())
}

/// Copying onto itself must be rejected.
#[tokio::test]
async fn test_copy_self() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        t.op.write(&path, "data").await?;

        let result = t.op.copy(&path, &path).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::IsSameFile);
    }

    Ok(())
}

/// Copy to a nested path must create intermediate dirs.
#[tokio::test]
async fn test_copy_nested_target() -> Result<()> {
    for t in operators() {
        let source = gen_file_path();
        let target = format!("nested/copy/target/{}", gen_file_path());
        let (content, _) = gen_bytes();

        t.op.write(&source, content.clone()).await?;
        t.op.copy(&source, &target).await?;

        let bs = t.op.read(&target).await?.to_bytes();
        assert_eq!(bs.as_ref(), content.as_slice());
    }

    Ok(())
}
