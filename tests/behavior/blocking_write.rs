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

/// Write a single file via the blocking operator and stat it back.
#[test]
fn test_blocking_write_only() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let path = gen_file_path();
        let (content, size) = gen_bytes();

        op.write(&path, content)?;

        let meta = op.stat(&path).expect("stat must succeed");
        assert_eq!(meta.content_length(), size as u64);
    }

    Ok(())
}

/// Streaming blocking writer.
#[test]
fn test_blocking_writer_write() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let path = gen_file_path();
        let (content_a, size_a) = gen_bytes();
        let (content_b, size_b) = gen_bytes();

        let mut w = op.writer(&path)?;
        w.write(content_a)?;
        w.write(content_b)?;
        w.close()?;

        let meta = op.stat(&path).expect("stat must succeed");
        assert_eq!(meta.content_length(), (size_a + size_b) as u64);
    }

    Ok(())
}

/// Blocking create_dir, delete and exists.
#[test]
fn test_blocking_create_dir_and_delete() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let dir = format!("{}/", gen_file_path());
        op.create_dir(&dir)?;
        assert!(op.stat(&dir)?.is_dir());

        let path = gen_file_path();
        op.write(&path, "data")?;
        assert!(op.exists(&path)?);
        op.delete(&path)?;
        assert!(!op.exists(&path)?);
    }

    Ok(())
}

/// Blocking copy and rename.
#[test]
fn test_blocking_copy_and_rename() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let source = gen_file_path();
        let copy_target = gen_file_path();
        let rename_target = gen_file_path();
        let (content, _) = gen_bytes();

        op.write(&source, content.clone())?;

        op.copy(&source, &copy_target)?;
        assert_eq!(op.read(&copy_target)?.to_bytes().as_ref(), content.as_slice());

        op.rename(&source, &rename_target)?;
        assert!(!op.exists(&source)?);
        assert_eq!(
            op.read(&rename_target)?.to_bytes().as_ref(),
            content.as_slice()
        );
    }

    Ok(())
}

/// Blocking remove_all.
#[test]
fn test_blocking_remove_all() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let parent = gen_file_path();
        op.write(&format!("{parent}/a"), "a")?;
        op.write(&format!("{parent}/sub/b"), "b")?;

        op.remove_all(&format!("{parent}/"))?;

        assert!(!op.exists(&format!("{parent}/a"))?);
        assert!(!op.exists(&format!("{parent}/sub/b"))?);
    }

    Ok(())
}
