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
use sha2::Digest;
use sha2::Sha256;

use super::*;

/// Write a single file and test with stat.
#[tokio::test]
async fn test_write_only() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        let (content, size) = gen_bytes();

        t.op.write(&path, content).await?;

        let meta = t.op.stat(&path).await.expect("stat must succeed");
        assert_eq!(meta.content_length(), size as u64);
    }

    Ok(())
}

/// Write a file with empty content.
#[tokio::test]
async fn test_write_with_empty_content() -> Result<()> {
    for t in operators() {
        if !t.op.info().full_capability().write_can_empty {
            continue;
        }

        let path = gen_file_path();

        t.op.write(&path, Vec::<u8>::new()).await?;

        let meta = t.op.stat(&path).await.expect("stat must succeed");
        assert_eq!(meta.content_length(), 0);
    }

    Ok(())
}

/// Write to a path that contains not existing intermediate dirs.
#[tokio::test]
async fn test_write_with_nested_dirs() -> Result<()> {
    for t in operators() {
        let path = format!("nested/dirs/{}", gen_file_path());
        let (content, size) = gen_bytes();

        t.op.write(&path, content).await?;

        let meta = t.op.stat(&path).await.expect("stat must succeed");
        assert_eq!(meta.content_length(), size as u64);
    }

    Ok(())
}

/// Write a file with a dir path should return an error.
#[tokio::test]
async fn test_write_with_dir_path() -> Result<()> {
    for t in operators() {
        let result = t.op.write("path/to/dir/", vec![1]).await;

        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            fileio::ErrorKind::IsADirectory
        );
    }

    Ok(())
}

/// Streaming write via writer, content must match chunk by chunk.
#[tokio::test]
async fn test_writer_write() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        let (content_a, size_a) = gen_bytes();
        let (content_b, size_b) = gen_bytes();

        let mut w = t.op.writer(&path).await?;
        w.write(content_a.clone()).await?;
        w.write(content_b.clone()).await?;
        w.close().await?;

        let meta = t.op.stat(&path).await.expect("stat must succeed");
        assert_eq!(meta.content_length(), (size_a + size_b) as u64);

        let bs = t.op.read(&path).await?.to_bytes();
        assert_eq!(
            format!("{:x}", Sha256::digest(&bs)),
            format!(
                "{:x}",
                Sha256::digest([content_a.as_slice(), content_b.as_slice()].concat())
            ),
            "read content must match the written chunks"
        );
    }

    Ok(())
}

/// Overwriting an existing file must truncate the previous content.
#[tokio::test]
async fn test_write_with_overwrite() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        let (content_one, _) = gen_bytes();
        let (content_two, _) = gen_bytes();

        t.op.write(&path, content_one.clone()).await?;
        t.op.write(&path, content_two.clone()).await?;

        let bs = t.op.read(&path).await?.to_bytes();
        assert_ne!(
            format!("{:x}", Sha256::digest(&bs)),
            format!("{:x}", Sha256::digest(&content_one)),
            "content must be overwritten"
        );
        assert_eq!(
            format!("{:x}", Sha256::digest(&bs)),
            format!("{:x}", Sha256::digest(&content_two)),
            "content must match the new content"
        );
    }

    Ok(())
}

/// Create dir and stat it back.
#[tokio::test]
async fn test_create_dir() -> Result<()> {
    for t in operators() {
        let path = format!("{}/", gen_file_path());

        t.op.create_dir(&path).await?;

        let meta = t.op.stat(&path).await?;
        assert!(meta.is_dir());
    }

    Ok(())
}

/// Deleting a file must make it gone; deleting twice is fine.
#[tokio::test]
async fn test_delete() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        let (content, _) = gen_bytes();

        t.op.write(&path, content).await?;
        assert!(t.op.exists(&path).await?);

        t.op.delete(&path).await?;
        assert!(!t.op.exists(&path).await?);

        // delete is idempotent.
        t.op.delete(&path).await?;
    }

    Ok(())
}

/// `check` must work on a fresh operator.
#[tokio::test]
async fn test_check() -> Result<()> {
    for t in operators() {
        t.op.check().await?;
    }

    Ok(())
}
