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

use std::io::Read;

use anyhow::Result;
use fileio::raw::BytesRange;
use fileio::raw::OpRead;
use fileio::ErrorKind;

use super::*;

/// Blocking read the whole file.
#[test]
fn test_blocking_read_full() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let path = gen_file_path();
        let (content, size) = gen_bytes();

        op.write(&path, content.clone())?;

        let bs = op.read(&path)?.to_bytes();
        assert_eq!(bs.len(), size);
        assert_eq!(bs.as_ref(), content.as_slice());
    }

    Ok(())
}

/// Blocking read with range.
#[test]
fn test_blocking_read_range() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let path = gen_file_path();
        let (content, _) = gen_bytes();

        op.write(&path, content.clone())?;

        let bs = op
            .read_with(&path, OpRead::new().with_range(BytesRange::from(1024..2048)))?
            .to_bytes();
        assert_eq!(bs.len(), 1024);
        assert_eq!(bs.as_ref(), &content[1024..2048]);
    }

    Ok(())
}

/// Blocking read of a missing file must return NotFound.
#[test]
fn test_blocking_read_not_exist() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let result = op.read(&gen_file_path());
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), ErrorKind::NotFound);
    }

    Ok(())
}

/// The blocking reader implements `std::io::Read`.
#[test]
fn test_blocking_reader_std_read() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let path = gen_file_path();
        let (content, _) = gen_bytes();

        op.write(&path, content.clone())?;

        let mut r = op.reader(&path)?;
        let mut read = Vec::new();
        Read::read_to_end(&mut r, &mut read)?;

        assert_eq!(read, content);
    }

    Ok(())
}

/// Blocking list and glob.
#[test]
fn test_blocking_list_and_glob() -> Result<()> {
    for t in operators() {
        let op = t.op.blocking();

        let parent = gen_file_path();
        op.write(&format!("{parent}/a.json"), "{}")?;
        op.write(&format!("{parent}/b.txt"), "b")?;

        let mut paths: Vec<_> = op
            .list(&format!("{parent}/"))?
            .into_iter()
            .map(|e| e.path().to_string())
            .collect();
        paths.sort();
        assert_eq!(
            paths,
            vec![format!("{parent}/a.json"), format!("{parent}/b.txt")]
        );

        let globbed: Vec<_> = op
            .glob(&format!("{parent}/*.json"))?
            .into_iter()
            .map(|e| e.path().to_string())
            .collect();
        assert_eq!(globbed, vec![format!("{parent}/a.json")]);
    }

    Ok(())
}
