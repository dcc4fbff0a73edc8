//! Regex-based import extraction.
//!
//! Deliberately not a parser. Two surface forms are recognized:
//!
//! ```text
//! import x from '…'   /  import '…'
//! require('…')
//! ```
//!
//! Comments and string literals that happen to match are extracted too; false
//! positives are filtered out downstream when resolution fails, and false
//! negatives are an accepted cost of staying fast.

use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:import\s+(?:[^'";]+\s+from\s+)?|require\()\s*['"]([^'"]+)['"]"#)
        .expect("import regex is valid")
});

/// Extract raw import specifiers from one file's text, in occurrence order.
pub fn extract_imports(source: &str) -> Vec<String> {
    IMPORT_RE
        .captures_iter(source)
        .map(|cap| cap[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_default_and_named_imports() {
        let src = r#"
import React from 'react';
import { useState, useEffect } from 'react';
import * as path from './util/paths';
"#;
        assert_eq!(extract_imports(src), vec!["react", "react", "./util/paths"]);
    }

    #[test]
    fn extracts_bare_and_require_imports() {
        let src = r#"
import './styles.css';
const fs = require('node:fs');
const local = require("./local");
"#;
        assert_eq!(
            extract_imports(src),
            vec!["./styles.css", "node:fs", "./local"]
        );
    }

    #[test]
    fn no_imports_yields_empty() {
        assert!(extract_imports("export const x = 1;\n").is_empty());
    }
}
