use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Script body of a well-behaved symbolizer: one record per PC read from
/// stdin, derived from the PC and the `-e <dso>` argument.
pub const ECHO_BODY: &str = r#"dso=$(basename "$3")
line=0
while read -r pc; do
    line=$((line + 1))
    printf 'func_%s_%s\n/src/%s.c:%s:2\n\n' "$dso" "$pc" "$dso" "$line"
done
"#;

/// Writes an executable shell script standing in for `llvm-symbolizer`.
///
/// Like the real tool, the script is invoked with `--no-inlines -e <dso>`
/// and receives the PC list on stdin.
pub fn fake_symbolizer(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);

    std::fs::write(&path, format!("#!/bin/sh\n{body}")).expect("write script");

    let mut permissions = std::fs::metadata(&path).expect("metadata").permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("chmod");

    path
}
