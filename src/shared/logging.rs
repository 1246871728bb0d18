use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn wizard_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/wizard.log")
}

pub fn append_wizard_log_line(state_root: &Path, line: &str) -> std::io::Result<()> {
    let path = wizard_log_path(state_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    let stamp = chrono::Utc::now().to_rfc3339();
    writeln!(file, "{stamp} {line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn appends_timestamped_lines_under_state_root() {
        let temp = tempdir().expect("temp dir");
        append_wizard_log_line(temp.path(), "sandbox provisioning failed").expect("append");
        append_wizard_log_line(temp.path(), "agent created").expect("append");

        let body = fs::read_to_string(wizard_log_path(temp.path())).expect("read log");
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("sandbox provisioning failed"));
        assert!(lines[1].ends_with("agent created"));
    }
}
