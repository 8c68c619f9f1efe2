//! Tabular reports over the module inventory

use tracing::debug;

use crate::inventory::module::InstalledModuleInfo;
use crate::manifest::go_mod::GoModParser;
use crate::manifest::types::GoModFile;

pub const INVENTORY_HEADERS: [&str; 5] = [
    "Package",
    "Relation",
    "Version",
    "GoVersion",
    "ToolChains",
];
pub const UPDATE_HEADERS: [&str; 4] = ["Package", "Relation", "Current", "Latest"];

/// Builds the `analyzed` rows: one per module
pub fn inventory_rows(modules: &[InstalledModuleInfo], parser: &GoModParser) -> Vec<Vec<String>> {
    modules
        .iter()
        .map(|module| {
            let manifest = read_manifest(module, parser);
            let go_version = if module.go_version.is_empty() {
                manifest
                    .as_ref()
                    .and_then(|m| m.go_version.clone())
                    .unwrap_or_default()
            } else {
                module.go_version.clone()
            };
            let toolchain = manifest.and_then(|m| m.toolchain).unwrap_or_default();

            vec![
                module.path.clone(),
                module.relation().to_string(),
                module.version.clone(),
                go_version,
                toolchain,
            ]
        })
        .collect()
}

/// Builds the `updates` rows: modules with an available update only
pub fn update_rows(modules: &[InstalledModuleInfo]) -> Vec<Vec<String>> {
    modules
        .iter()
        .filter_map(|module| {
            let update = module.update.as_ref()?;
            Some(vec![
                module.path.clone(),
                module.relation().to_string(),
                module.version.clone(),
                update.version.clone(),
            ])
        })
        .collect()
}

/// Side lookup of a module's own go.mod; unreadable files yield None
fn read_manifest(module: &InstalledModuleInfo, parser: &GoModParser) -> Option<GoModFile> {
    let path = module.manifest_path()?;
    parser
        .parse_file(&path)
        .inspect_err(|e| debug!("Skipping go.mod of {}: {}", module.path, e))
        .ok()
}

/// Renders rows as a bordered plain-text table
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = format!(
        "+{}+",
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+")
    );
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = widths
            .iter()
            .zip(cells)
            .map(|(w, cell)| format!(" {:<width$} ", cell, width = *w))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut out = vec![border.clone(), line(headers.to_vec()), border.clone()];
    for row in rows {
        out.push(line(row.iter().map(String::as_str).collect()));
    }
    out.push(border);
    out.join("\n") + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn module(path: &str, version: &str) -> InstalledModuleInfo {
        InstalledModuleInfo {
            path: path.to_string(),
            version: version.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn inventory_rows_read_go_version_and_toolchain_from_module_go_mod() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("go.mod"),
            "module example.com/dep\n\ngo 1.22.0\n\ntoolchain go1.22.3\n",
        )
        .unwrap();

        let dep = InstalledModuleInfo {
            dir: Some(temp_dir.path().to_path_buf()),
            ..module("example.com/dep", "v1.0.0")
        };
        let main = InstalledModuleInfo {
            main: true,
            go_version: "1.21".to_string(),
            go_mod: Some(PathBuf::from("/nonexistent/go.mod")),
            ..module("example.com/myapp", "")
        };

        let rows = inventory_rows(&[main, dep], &GoModParser::new());

        assert_eq!(
            rows,
            vec![
                vec!["example.com/myapp", "main", "", "1.21", ""],
                vec!["example.com/dep", "direct", "v1.0.0", "1.22.0", "go1.22.3"],
            ]
        );
    }

    #[test]
    fn update_rows_only_lists_modules_with_updates() {
        let outdated = InstalledModuleInfo {
            indirect: true,
            update: Some(Box::new(module("golang.org/x/text", "v0.14.0"))),
            ..module("golang.org/x/text", "v0.13.0")
        };
        let current = module("golang.org/x/net", "v0.20.0");

        let rows = update_rows(&[outdated, current]);

        assert_eq!(
            rows,
            vec![vec!["golang.org/x/text", "indirect", "v0.13.0", "v0.14.0"]]
        );
    }

    #[test]
    fn render_table_pads_columns_to_widest_cell() {
        let rows = vec![vec!["golang.org/x/text".to_string(), "v1".to_string()]];

        let table = render_table(&["Package", "Version"], &rows);

        assert_eq!(
            table,
            "+-------------------+---------+\n\
             | Package           | Version |\n\
             +-------------------+---------+\n\
             | golang.org/x/text | v1      |\n\
             +-------------------+---------+\n"
        );
    }
}
