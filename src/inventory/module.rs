//! Module records as printed by `go list -m -json`

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One module of the build list
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct InstalledModuleInfo {
    /// Module path
    pub path: String,
    /// Version query corresponding to this version
    pub query: String,
    /// Module version
    pub version: String,
    /// Available module versions
    pub versions: Vec<String>,
    /// Replaced by this module
    pub replace: Option<Box<InstalledModuleInfo>>,
    /// Time the version was created
    pub time: Option<DateTime<Utc>>,
    /// Available update (with -u)
    pub update: Option<Box<InstalledModuleInfo>>,
    /// Is this the main module?
    pub main: bool,
    /// Module is only indirectly needed by the main module
    pub indirect: bool,
    /// Directory holding the local copy of files, if any
    pub dir: Option<PathBuf>,
    /// Path to the go.mod file describing the module, if any
    pub go_mod: Option<PathBuf>,
    /// Go version used in the module
    pub go_version: String,
    /// Retraction information, if any
    pub retracted: Vec<String>,
    /// Deprecation message, if any
    pub deprecated: String,
    /// Error loading the module
    pub error: Option<ModuleError>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "PascalCase")]
pub struct ModuleError {
    pub err: String,
}

/// How a module relates to the main module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Main,
    Indirect,
    Direct,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Main => "main",
            Relation::Indirect => "indirect",
            Relation::Direct => "direct",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InstalledModuleInfo {
    pub fn relation(&self) -> Relation {
        if self.main {
            Relation::Main
        } else if self.indirect {
            Relation::Indirect
        } else {
            Relation::Direct
        }
    }

    /// go.mod describing this module: `GoMod`, else `Dir/go.mod`
    pub fn manifest_path(&self) -> Option<PathBuf> {
        self.go_mod
            .clone()
            .or_else(|| self.dir.as_ref().map(|dir| dir.join("go.mod")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    #[test]
    fn deserialize_reads_go_list_fields() {
        let json = r#"{
	"Path": "golang.org/x/text",
	"Version": "v0.13.0",
	"Versions": ["v0.12.0", "v0.13.0"],
	"Time": "2023-07-28T15:07:40Z",
	"Update": {
		"Path": "golang.org/x/text",
		"Version": "v0.14.0",
		"Time": "2023-10-11T21:47:18Z"
	},
	"Indirect": true,
	"Dir": "/go/pkg/mod/golang.org/x/text@v0.13.0",
	"GoMod": "/go/pkg/mod/cache/download/golang.org/x/text/@v/v0.13.0.mod",
	"GoVersion": "1.17"
}"#;

        let module: InstalledModuleInfo = serde_json::from_str(json).unwrap();

        assert_eq!(module.path, "golang.org/x/text");
        assert_eq!(module.version, "v0.13.0");
        assert_eq!(module.versions, vec!["v0.12.0", "v0.13.0"]);
        assert_eq!(
            module.time,
            Some(Utc.with_ymd_and_hms(2023, 7, 28, 15, 7, 40).unwrap())
        );
        assert_eq!(
            module.update.as_ref().map(|u| u.version.as_str()),
            Some("v0.14.0")
        );
        assert!(module.indirect);
        assert_eq!(module.go_version, "1.17");
        assert_eq!(module.relation(), Relation::Indirect);
    }

    #[test]
    fn deserialize_reads_module_error() {
        let json = r#"{"Path":"example.com/broken","Error":{"Err":"module not found"}}"#;

        let module: InstalledModuleInfo = serde_json::from_str(json).unwrap();

        assert_eq!(
            module.error,
            Some(ModuleError {
                err: "module not found".to_string()
            })
        );
    }

    #[rstest]
    #[case(true, false, Relation::Main)]
    #[case(true, true, Relation::Main)]
    #[case(false, true, Relation::Indirect)]
    #[case(false, false, Relation::Direct)]
    fn relation_returns_expected(
        #[case] main: bool,
        #[case] indirect: bool,
        #[case] expected: Relation,
    ) {
        let module = InstalledModuleInfo {
            main,
            indirect,
            ..Default::default()
        };
        assert_eq!(module.relation(), expected);
    }

    #[test]
    fn manifest_path_prefers_go_mod_over_dir() {
        let module = InstalledModuleInfo {
            dir: Some(PathBuf::from("/src/mod")),
            go_mod: Some(PathBuf::from("/cache/mod.mod")),
            ..Default::default()
        };
        assert_eq!(
            module.manifest_path(),
            Some(PathBuf::from("/cache/mod.mod"))
        );

        let module = InstalledModuleInfo {
            dir: Some(PathBuf::from("/src/mod")),
            ..Default::default()
        };
        assert_eq!(
            module.manifest_path(),
            Some(PathBuf::from("/src/mod/go.mod"))
        );

        assert_eq!(InstalledModuleInfo::default().manifest_path(), None);
    }
}
