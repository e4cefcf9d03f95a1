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
use futures::TryStreamExt;
use fileio::raw::OpList;
use fileio::EntryMode;

use super::*;

/// List a dir must show the files written under it.
#[tokio::test]
async fn test_list_dir() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();
        let path = format!("{parent}/file");
        let (content, size) = gen_bytes();

        t.op.write(&path, content).await?;

        let entries = t.op.list(&format!("{parent}/")).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path(), path);
        assert_eq!(entries[0].metadata().mode(), EntryMode::FILE);
        // Some services carry the size in list responses.
        if entries[0].metadata().content_length() > 0 {
            assert_eq!(entries[0].metadata().content_length(), size as u64);
        }
    }

    Ok(())
}

/// Listing one level must collapse deeper entries into dirs.
#[tokio::test]
async fn test_list_dir_with_subdir() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();

        t.op.write(&format!("{parent}/a"), "a").await?;
        t.op.write(&format!("{parent}/sub/b"), "b").await?;

        let mut entries: Vec<_> = t
            .op
            .list(&format!("{parent}/"))
            .await?
            .into_iter()
            .map(|e| e.path().to_string())
            .collect();
        entries.sort();

        assert_eq!(
            entries,
            vec![format!("{parent}/a"), format!("{parent}/sub/")]
        );
    }

    Ok(())
}

/// Listing recursively must walk into nested dirs.
#[tokio::test]
async fn test_list_recursive() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();

        t.op.write(&format!("{parent}/a"), "a").await?;
        t.op.write(&format!("{parent}/sub/b"), "b").await?;
        t.op.write(&format!("{parent}/sub/deep/c"), "c").await?;

        let entries: Vec<_> = t
            .op
            .list_with(&format!("{parent}/"), OpList::new().with_recursive(true))
            .await?
            .into_iter()
            .filter(|e| e.metadata().mode() == EntryMode::FILE)
            .map(|e| e.path().to_string())
            .collect();

        let mut entries = entries;
        entries.sort();

        assert_eq!(
            entries,
            vec![
                format!("{parent}/a"),
                format!("{parent}/sub/b"),
                format!("{parent}/sub/deep/c"),
            ]
        );
    }

    Ok(())
}

/// Listing a dir that doesn't exist must return empty, not an error.
#[tokio::test]
async fn test_list_not_exist_dir() -> Result<()> {
    for t in operators() {
        let entries = t.op.list(&format!("{}/", gen_file_path())).await?;
        assert!(entries.is_empty());
    }

    Ok(())
}

/// Lister must work as a stream.
#[tokio::test]
async fn test_lister_stream() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();
        for i in 0..5 {
            t.op.write(&format!("{parent}/file_{i}"), "data").await?;
        }

        let mut lister = t.op.lister(&format!("{parent}/")).await?;

        let mut count = 0;
        while let Some(entry) = lister.try_next().await? {
            assert!(entry.path().starts_with(&parent));
            count += 1;
        }
        assert_eq!(count, 5);
    }

    Ok(())
}

/// Listing a file path must be rejected.
#[tokio::test]
async fn test_list_file_path() -> Result<()> {
    for t in operators() {
        let result = t.op.list("path/to/file").await;
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            fileio::ErrorKind::NotADirectory
        );
    }

    Ok(())
}
