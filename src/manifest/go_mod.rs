//! go.mod parser
//!
//! Parses go.mod files to extract the module path, the `go` and `toolchain`
//! directives and module requirements.
//! Supports both single-line require directives and require blocks.
//!
//! Format examples:
//! - Single: `require golang.org/x/text v0.14.0`
//! - Block:
//!   ```text
//!   require (
//!       golang.org/x/text v0.14.0
//!       golang.org/x/net v0.20.0 // indirect
//!   )
//!   ```

use std::path::Path;

use regex::Regex;

use crate::manifest::error::ManifestError;
use crate::manifest::types::{DependencyRecord, GoModFile};

/// Parser for go.mod files
pub struct GoModParser {
    /// Regex for single-value directives: `module x`, `go 1.21`, `toolchain go1.22.0`
    directive_re: Regex,
    /// Regex for single-line require: `require module/path v1.2.3`
    single_require_re: Regex,
    /// Regex for block start: `require (`, `replace (`, ...
    block_start_re: Regex,
    /// Regex for require spec inside block: `module/path v1.2.3`
    require_spec_re: Regex,
    /// Regex for the indirect marker comment
    indirect_re: Regex,
}

impl GoModParser {
    pub fn new() -> Self {
        Self {
            // Match: module|go|toolchain value [// comment]
            directive_re: Regex::new(r#"^(module|go|toolchain)\s+"?([^\s"]+)"?(?:\s*//.*)?$"#)
                .unwrap(),
            // Match: require module/path v1.2.3 [// comment]
            single_require_re: Regex::new(r"^require\s+(\S+)\s+(v[^\s]+)(\s*//.*)?$").unwrap(),
            // Match: require ( | replace ( | exclude ( | retract (
            block_start_re: Regex::new(r"^(require|replace|exclude|retract|godebug|tool)\s*\(\s*$")
                .unwrap(),
            // Match: module/path v1.2.3 [// comment]
            require_spec_re: Regex::new(r"^\s*(\S+)\s+(v[^\s]+)(\s*//.*)?$").unwrap(),
            // Match: // indirect, // indirect; reason
            indirect_re: Regex::new(r"^\s*//\s*indirect\b").unwrap(),
        }
    }

    /// Reads and parses a go.mod file
    pub fn parse_file(&self, path: &Path) -> Result<GoModFile, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<GoModFile, ManifestError> {
        let mut file = GoModFile::default();
        // Directive of the block being read, with its opening line
        let mut open_block: Option<(String, usize)> = None;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            // Skip empty lines and comments
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if let Some((directive, _)) = &open_block {
                // Check for block end
                if trimmed == ")" {
                    open_block = None;
                    continue;
                }
                // Only require blocks carry dependencies
                if directive == "require" {
                    let caps = self.require_spec_re.captures(trimmed).ok_or_else(|| {
                        ManifestError::InvalidSyntax {
                            line: line_num + 1,
                            message: format!("malformed requirement: {}", trimmed),
                        }
                    })?;
                    file.requires.push(self.record(&caps[1], &caps[2], caps.get(3)));
                }
                continue;
            }

            // Check for block start
            if let Some(caps) = self.block_start_re.captures(trimmed) {
                open_block = Some((caps[1].to_string(), line_num + 1));
                continue;
            }

            if let Some(caps) = self.single_require_re.captures(trimmed) {
                file.requires.push(self.record(&caps[1], &caps[2], caps.get(3)));
            } else if let Some(caps) = self.directive_re.captures(trimmed) {
                let value = Some(caps[2].to_string());
                match &caps[1] {
                    "module" => file.module = value,
                    "go" => file.go_version = value,
                    _ => file.toolchain = value,
                }
            }
        }

        if let Some((directive, line)) = open_block {
            return Err(ManifestError::InvalidSyntax {
                line,
                message: format!("unterminated {} block", directive),
            });
        }

        Ok(file)
    }

    fn record(
        &self,
        path: &str,
        version: &str,
        comment: Option<regex::Match<'_>>,
    ) -> DependencyRecord {
        let indirect = comment.is_some_and(|c| self.indirect_re.is_match(c.as_str()));
        DependencyRecord::new(path, version, indirect)
    }
}

impl Default for GoModParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_extracts_single_require() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.21

require golang.org/x/text v0.14.0
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(result.module.as_deref(), Some("example.com/myapp"));
        assert_eq!(result.go_version.as_deref(), Some("1.21"));
        assert_eq!(result.requires.len(), 1);
        assert_eq!(result.requires[0].path, "golang.org/x/text");
        assert_eq!(result.requires[0].version, "v0.14.0");
        assert!(!result.requires[0].indirect);
    }

    #[test]
    fn parse_extracts_require_block() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.21

require (
	golang.org/x/text v0.14.0
	golang.org/x/net v0.20.0
)
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(result.requires.len(), 2);
        assert_eq!(result.requires[0].path, "golang.org/x/text");
        assert_eq!(result.requires[0].version, "v0.14.0");
        assert_eq!(result.requires[1].path, "golang.org/x/net");
        assert_eq!(result.requires[1].version, "v0.20.0");
    }

    #[test]
    fn parse_marks_indirect_dependencies() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

require github.com/single/dep v1.0.0 // indirect

require (
	golang.org/x/text v0.14.0 // indirect
	golang.org/x/net v0.20.0
	golang.org/x/sys v0.15.0 // pinned for ci
)
"#;
        let result = parser.parse(content).unwrap();
        let indirect: Vec<bool> = result.requires.iter().map(|r| r.indirect).collect();
        assert_eq!(indirect, vec![true, true, false, false]);
    }

    #[test]
    fn parse_reads_toolchain_directive() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.22.0

toolchain go1.22.3
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(result.go_version.as_deref(), Some("1.22.0"));
        assert_eq!(result.toolchain.as_deref(), Some("go1.22.3"));
    }

    #[test]
    fn parse_handles_pseudo_and_incompatible_versions() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

require (
	github.com/some/repo v0.0.0-20210101000000-abcdef123456
	github.com/other/repo v2.0.0+incompatible
)
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(
            result.requires[0].version,
            "v0.0.0-20210101000000-abcdef123456"
        );
        assert_eq!(result.requires[1].version, "v2.0.0+incompatible");
    }

    #[test]
    fn parse_returns_empty_for_no_requires() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.21
"#;
        let result = parser.parse(content).unwrap();
        assert!(result.requires.is_empty());
        assert_eq!(result.toolchain, None);
    }

    #[test]
    fn parse_skips_replace_exclude_and_retract_directives() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

go 1.21

require (
	golang.org/x/text v0.14.0
	golang.org/x/net v0.20.0
)

replace golang.org/x/text v0.14.0 => ./local/text

replace (
	golang.org/x/net => ../fork/net
	example.com/old => example.com/new v1.0.0
)

exclude golang.org/x/crypto v1.0.0

exclude (
	golang.org/x/crypto v1.4.5
)

retract v0.0.1

retract (
	v1.0.1
	[v1.0.0, v1.9.9]
)
"#;
        let result = parser.parse(content).unwrap();
        assert_eq!(result.requires.len(), 2);
        assert_eq!(result.requires[0].path, "golang.org/x/text");
        assert_eq!(result.requires[1].path, "golang.org/x/net");
    }

    #[test]
    fn parse_rejects_unterminated_block() {
        let parser = GoModParser::new();
        let content = r#"module example.com/myapp

require (
	golang.org/x/text v0.14.0
"#;
        let result = parser.parse(content);
        assert!(matches!(
            result,
            Err(ManifestError::InvalidSyntax { line: 3, .. })
        ));
    }

    #[test]
    fn parse_rejects_malformed_requirement() {
        let parser = GoModParser::new();
        let content = "module example.com/myapp\n\nrequire (\n\tgolang.org/x/text\n)\n";
        let result = parser.parse(content);
        assert!(matches!(
            result,
            Err(ManifestError::InvalidSyntax { line: 4, .. })
        ));
    }

    #[test]
    fn parse_file_reports_missing_file() {
        let parser = GoModParser::new();
        let result = parser.parse_file(Path::new("/nonexistent/go.mod"));
        assert!(matches!(result, Err(ManifestError::Read { .. })));
    }
}
