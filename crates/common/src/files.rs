use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{de::DeserializeOwned, Serialize};
use xshell::Shell;

pub fn read_yaml_file<T>(shell: &Shell, file_path: impl AsRef<Path>) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let content = shell.read_file(&file_path)?;
    let yaml = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse YAML file {:?}", file_path.as_ref()))?;
    Ok(yaml)
}

pub fn read_json_file<T>(shell: &Shell, file_path: impl AsRef<Path>) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let content = shell.read_file(&file_path)?;
    let json = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON file {:?}", file_path.as_ref()))?;
    Ok(json)
}

pub fn save_yaml_file(
    shell: &Shell,
    file_path: impl AsRef<Path>,
    content: impl Serialize,
    comment: impl ToString,
) -> anyhow::Result<()> {
    let data = format!(
        "{}{}",
        comment.to_string(),
        serde_yaml::to_string(&content)?
    );
    shell
        .write_file(&file_path, data)
        .with_context(|| format!("Failed to write YAML file {:?}", file_path.as_ref()))?;
    Ok(())
}

pub fn save_json_file(
    shell: &Shell,
    file_path: impl AsRef<Path>,
    content: impl Serialize,
) -> anyhow::Result<()> {
    let data = serde_json::to_string_pretty(&content)?;
    shell
        .write_file(&file_path, data)
        .with_context(|| format!("Failed to write JSON file {:?}", file_path.as_ref()))?;
    Ok(())
}

/// Walks up from `start` looking for a file with the given name, returning
/// the directory that contains it.
pub fn find_file(shell: &Shell, start: &Path, file_name: &str) -> anyhow::Result<PathBuf> {
    let _dir = shell.push_dir(start);
    let mut current = shell.current_dir();
    loop {
        if current.join(file_name).exists() {
            return Ok(current);
        }
        if !current.pop() {
            anyhow::bail!("File {file_name} not found in {start:?} or any parent directory");
        }
    }
}
