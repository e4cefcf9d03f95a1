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

use globset::GlobBuilder;
use globset::GlobMatcher;

use crate::*;

/// GlobPattern is a compiled glob pattern together with the longest literal
/// prefix that entries must live under.
///
/// Listing only needs to walk the literal prefix; every returned path is then
/// matched against the compiled pattern. Supports `*`, `?`, `**`, character
/// classes and `{a,b}` alternation.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    matcher: GlobMatcher,
    prefix: String,
}

impl GlobPattern {
    /// Compile the given glob pattern.
    ///
    /// The pattern is matched against paths relative to the operator root,
    /// like `logs/2023/*.json`.
    pub fn new(pattern: &str) -> Result<Self> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                Error::new(ErrorKind::ConfigInvalid, "glob pattern is invalid")
                    .with_context("pattern", pattern)
                    .set_source(e)
            })?;

        Ok(Self {
            matcher: glob.compile_matcher(),
            prefix: literal_prefix(pattern),
        })
    }

    /// The directory to start listing from: the longest `/` terminated
    /// literal prefix of the pattern. Empty means the operator root.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Check if the given path matches this pattern.
    ///
    /// Dir entries are matched without their trailing `/` so that `logs/*`
    /// also matches `logs/2023/`.
    pub fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path.trim_end_matches('/'))
    }
}

/// Return the longest `/` terminated prefix that contains no glob
/// metacharacter.
fn literal_prefix(pattern: &str) -> String {
    let meta = pattern
        .find(['*', '?', '[', ']', '{', '}'])
        .unwrap_or(pattern.len());

    match pattern[..meta].rfind('/') {
        Some(idx) => pattern[..=idx].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_prefix() {
        let cases = vec![
            ("*.json", ""),
            ("logs/*.json", "logs/"),
            ("logs/2023/**/*.json", "logs/2023/"),
            ("logs/a?c/x", "logs/"),
            ("plain/path/file.txt", "plain/path/"),
        ];

        for (pattern, expect) in cases {
            assert_eq!(literal_prefix(pattern), expect, "{pattern}")
        }
    }

    #[test]
    fn test_matches() {
        let p = GlobPattern::new("logs/**/*.json").unwrap();
        assert!(p.matches("logs/2023/01/a.json"));
        assert!(!p.matches("logs/2023/01/a.yaml"));
        assert!(!p.matches("data/a.json"));

        let p = GlobPattern::new("data/*").unwrap();
        assert!(p.matches("data/a.json"));
        // `*` must not cross path separators.
        assert!(!p.matches("data/sub/a.json"));
        // but it matches a dir entry right under the prefix.
        assert!(p.matches("data/sub/"));

        let p = GlobPattern::new("*.{png,jpg}").unwrap();
        assert!(p.matches("a.png"));
        assert!(p.matches("b.jpg"));
        assert!(!p.matches("c.gif"));
    }
}
