//! Common types for the go.mod manifest

/// One requirement of the manifest, or the root module itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Module import path (e.g., "golang.org/x/text")
    pub path: String,
    /// Version currently required (empty for the root module)
    pub version: String,
    /// Marked `// indirect`
    pub indirect: bool,
    /// The module declared by the `module` directive
    pub root: bool,
}

impl DependencyRecord {
    pub fn new(path: &str, version: &str, indirect: bool) -> Self {
        Self {
            path: path.to_string(),
            version: version.to_string(),
            indirect,
            root: false,
        }
    }

    pub fn root(path: &str) -> Self {
        Self {
            path: path.to_string(),
            version: String::new(),
            indirect: false,
            root: true,
        }
    }
}

/// Parsed contents of a go.mod file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoModFile {
    /// Path from the `module` directive
    pub module: Option<String>,
    /// Version from the `go` directive
    pub go_version: Option<String>,
    /// Name from the `toolchain` directive
    pub toolchain: Option<String>,
    /// `require` entries in file order
    pub requires: Vec<DependencyRecord>,
}

impl GoModFile {
    /// Root record (if any) followed by the requirements
    pub fn records(&self) -> Vec<DependencyRecord> {
        self.module
            .iter()
            .map(|module| DependencyRecord::root(module))
            .chain(self.requires.iter().cloned())
            .collect()
    }
}
