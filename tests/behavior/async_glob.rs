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

/// Glob with a one level wildcard must not cross dirs.
#[tokio::test]
async fn test_glob_one_level() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();

        t.op.write(&format!("{parent}/a.json"), "{}").await?;
        t.op.write(&format!("{parent}/b.json"), "{}").await?;
        t.op.write(&format!("{parent}/c.yaml"), "c: 1").await?;
        t.op.write(&format!("{parent}/sub/d.json"), "{}").await?;

        let mut paths: Vec<_> = t
            .op
            .glob(&format!("{parent}/*.json"))
            .await?
            .into_iter()
            .map(|e| e.path().to_string())
            .collect();
        paths.sort();

        assert_eq!(
            paths,
            vec![format!("{parent}/a.json"), format!("{parent}/b.json")]
        );
    }

    Ok(())
}

/// Glob with `**` must walk into nested dirs.
#[tokio::test]
async fn test_glob_recursive() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();

        t.op.write(&format!("{parent}/a.json"), "{}").await?;
        t.op.write(&format!("{parent}/sub/b.json"), "{}").await?;
        t.op.write(&format!("{parent}/sub/deep/c.json"), "{}").await?;
        t.op.write(&format!("{parent}/sub/deep/d.txt"), "d").await?;

        let mut paths: Vec<_> = t
            .op
            .glob(&format!("{parent}/**/*.json"))
            .await?
            .into_iter()
            .map(|e| e.path().to_string())
            .collect();
        paths.sort();

        // `**` matches zero or more path components, so the top level
        // json is included as well.
        assert_eq!(
            paths,
            vec![
                format!("{parent}/a.json"),
                format!("{parent}/sub/b.json"),
                format!("{parent}/sub/deep/c.json"),
            ]
        );
    }

    Ok(())
}

/// Glob with brace alternation.
#[tokio::test]
async fn test_glob_alternation() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();

        t.op.write(&format!("{parent}/a.png"), "png").await?;
        t.op.write(&format!("{parent}/b.jpg"), "jpg").await?;
        t.op.write(&format!("{parent}/c.gif"), "gif").await?;

        let mut paths: Vec<_> = t
            .op
            .glob(&format!("{parent}/*.{{png,jpg}}"))
            .await?
            .into_iter()
            .map(|e| e.path().to_string())
            .collect();
        paths.sort();

        assert_eq!(
            paths,
            vec![format!("{parent}/a.png"), format!("{parent}/b.jpg")]
        );
    }

    Ok(())
}

/// Glob that matches nothing returns an empty vec.
#[tokio::test]
async fn test_glob_no_match() -> Result<()> {
    for t in operators() {
        let parent = gen_file_path();
        t.op.write(&format!("{parent}/a.json"), "{}").await?;

        let entries = t.op.glob(&format!("{parent}/*.parquet")).await?;
        assert!(entries.is_empty());
    }

    Ok(())
}
