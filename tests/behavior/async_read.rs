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
use futures::StreamExt;
use fileio::raw::BytesRange;
use fileio::raw::OpRead;
use fileio::ErrorKind;

use super::*;

/// Read the whole file and compare the content.
#[tokio::test]
async fn test_read_full() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        let (content, size) = gen_bytes();

        t.op.write(&path, content.clone()).await?;

        let bs = t.op.read(&path).await?.to_bytes();
        assert_eq!(bs.len(), size);
        assert_eq!(bs.as_ref(), content.as_slice());
    }

    Ok(())
}

/// Read with range must return the requested slice.
#[tokio::test]
async fn test_read_range() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        let (content, size) = gen_bytes();

        t.op.write(&path, content.clone()).await?;

        let bs = t
            .op
            .read_with(&path, OpRead::new().with_range(BytesRange::from(1024..2048)))
            .await?
            .to_bytes();
        assert_eq!(bs.len(), 1024);
        assert_eq!(bs.as_ref(), &content[1024..2048]);

        // Read from offset to the end.
        let bs = t
            .op
            .read_with(&path, OpRead::new().with_range(BytesRange::from(1024..)))
            .await?
            .to_bytes();
        assert_eq!(bs.len(), size - 1024);
        assert_eq!(bs.as_ref(), &content[1024..]);

        // Suffix read: last 1024 bytes.
        let bs = t
            .op
            .read_with(
                &path,
                OpRead::new().with_range(BytesRange::new(None, Some(1024))),
            )
            .await?
            .to_bytes();
        assert_eq!(bs.len(), 1024);
        assert_eq!(bs.as_ref(), &content[size - 1024..]);
    }

    Ok(())
}

/// Reading a file that doesn't exist must return NotFound.
#[tokio::test]
async fn test_read_not_exist() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();

        let result = t.op.read(&path).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    Ok(())
}

/// Reading with a dir path must be rejected.
#[tokio::test]
async fn test_read_with_dir_path() -> Result<()> {
    for t in operators() {
        let result = t.op.read("path/to/dir/").await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::IsADirectory);
    }

    Ok(())
}

/// Streaming reader must return the same content chunk by chunk.
#[tokio::test]
async fn test_reader_stream() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();
        let (content, _) = gen_bytes();

        t.op.write(&path, content.clone()).await?;

        let r = t.op.reader(&path).await?;
        let mut stream = r.into_stream();

        let mut read = Vec::new();
        while let Some(bs) = stream.next().await {
            read.extend_from_slice(&bs?.to_bytes());
        }

        assert_eq!(read, content);
    }

    Ok(())
}

/// stat a file that doesn't exist must return NotFound, while `exists`
/// returns false.
#[tokio::test]
async fn test_stat_not_exist() -> Result<()> {
    for t in operators() {
        let path = gen_file_path();

        let result = t.op.stat(&path).await;
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);

        assert!(!t.op.exists(&path).await?);
    }

    Ok(())
}

/// stat the root dir must return a DIR entry.
#[tokio::test]
async fn test_stat_root() -> Result<()> {
    for t in operators() {
        let meta = t.op.stat("/").await?;
        assert!(meta.is_dir());
    }

    Ok(())
}
