//! `${variable}` substitution in configured paths.

use std::path::Path;

/// Expand `${name}` references in `input`.
///
/// Known variables: `workspaceRoot`, `workspaceRootFolderName`, `file`,
/// `relativeFile`, `fileBasename`, `fileBasenameNoExtension`, `fileDirname`,
/// `fileExtname`. A variable that is unknown, or whose context is missing, is
/// kept verbatim. An unterminated `${` copies the rest of the input.
pub fn resolve_path_variables(
    input: &str,
    workspace_root: Option<&Path>,
    file: Option<&Path>,
) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after[..end].trim();
        match substitute(name, workspace_root, file) {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

fn substitute(name: &str, workspace_root: Option<&Path>, file: Option<&Path>) -> Option<String> {
    let display = |p: &Path| p.to_string_lossy().into_owned();
    match name {
        "workspaceRoot" => workspace_root.map(display),
        "workspaceRootFolderName" => workspace_root?.file_name().map(|n| display(Path::new(n))),
        "file" => file.map(display),
        "relativeFile" => file?.strip_prefix(workspace_root?).ok().map(display),
        "fileBasename" => file?.file_name().map(|n| display(Path::new(n))),
        "fileBasenameNoExtension" => file?.file_stem().map(|n| display(Path::new(n))),
        "fileDirname" => file?.parent().map(display),
        "fileExtname" => {
            let file = file?;
            Some(
                file.extension()
                    .map(|ext| format!(".{}", ext.to_string_lossy()))
                    .unwrap_or_default(),
            )
        }
        _ => None,
    }
}
