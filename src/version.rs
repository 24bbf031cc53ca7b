//! Version introspection of existing projects

use log::{debug, warn};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{Error, Result};

/// Environment variable naming the python interpreter used to run `setup.py`.
pub const PYTHON_ENV: &str = "PYTHON";

fn python_command() -> String {
    std::env::var(PYTHON_ENV).unwrap_or_else(|_| "python3".to_string())
}

/// Reports the version of an existing project.
///
/// A `setup.py` is asked first. Without one, the static `[project].version` of
/// `pyproject.toml` is used.
///
/// # Returns
/// * `Result<Option<String>>` - The version, or `None` if the project does not tell
///
/// # Errors
/// * `Error::BuildIntrospectionError` - `setup.py` crashed, or `pyproject.toml` is malformed
pub fn introspect(project_dir: &Path) -> Result<Option<String>> {
    introspect_with(project_dir, &python_command())
}

pub fn introspect_with(project_dir: &Path, python: &str) -> Result<Option<String>> {
    if project_dir.join("setup.py").is_file() {
        return setup_py_version(project_dir, python);
    }
    pyproject_version(project_dir)
}

fn run_setup_py(project_dir: &Path, python: &str, arg: &str) -> Option<Output> {
    debug!("Running '{python} setup.py {arg}' in '{}'", project_dir.display());
    match Command::new(python)
        .arg("setup.py")
        .arg(arg)
        .current_dir(project_dir)
        .stdin(Stdio::null())
        .output()
    {
        Ok(output) => Some(output),
        Err(e) => {
            warn!("Unable to run '{python}': {e}");
            None
        }
    }
}

fn setup_py_version(project_dir: &Path, python: &str) -> Result<Option<String>> {
    let Some(egg_info) = run_setup_py(project_dir, python, "egg_info") else {
        return Ok(None);
    };
    if !egg_info.status.success() {
        let stderr = String::from_utf8_lossy(&egg_info.stderr);
        if stderr.contains("Traceback") {
            return Err(Error::BuildIntrospectionError(stderr.to_string()));
        }
        return Ok(None);
    }

    let Some(version) = run_setup_py(project_dir, python, "--version") else {
        return Ok(None);
    };
    if !version.status.success() {
        warn!("'setup.py --version' failed: {}", String::from_utf8_lossy(&version.stderr));
        return Ok(None);
    }
    Ok(String::from_utf8_lossy(&version.stdout)
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string))
}

fn pyproject_version(project_dir: &Path) -> Result<Option<String>> {
    let pyproject = project_dir.join("pyproject.toml");
    if !pyproject.is_file() {
        return Ok(None);
    }

    let text = std::fs::read_to_string(&pyproject)?;
    let document: toml::Value = toml::from_str(&text)
        .map_err(|e| Error::BuildIntrospectionError(format!("pyproject.toml: {e}")))?;
    Ok(document
        .get("project")
        .and_then(|project| project.get("version"))
        .and_then(toml::Value::as_str)
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn nothing_to_ask_means_no_version() {
        let dir = TempDir::new().unwrap();
        assert_eq!(introspect(dir.path()).unwrap(), None);
    }

    #[test]
    fn static_pyproject_version() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pyproject.toml"),
            "[project]\nname = \"heat_model\"\nversion = \"1.4.2\"\n",
        )
        .unwrap();
        assert_eq!(introspect(dir.path()).unwrap(), Some("1.4.2".to_string()));
    }

    #[test]
    fn dynamic_pyproject_version_is_unknown() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("pyproject.toml"),
            "[project]\nname = \"heat_model\"\ndynamic = [\"version\"]\n",
        )
        .unwrap();
        assert_eq!(introspect(dir.path()).unwrap(), None);
    }

    #[test]
    fn malformed_pyproject_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "[project\n").unwrap();
        let err = introspect(dir.path()).unwrap_err();
        assert!(matches!(err, Error::BuildIntrospectionError(_)));
    }

    /// Runs `setup.py` itself as a shell script, standing in for the interpreter.
    #[cfg(unix)]
    fn shell_setup_py(dir: &Path, script: &str) -> &'static str {
        std::fs::write(dir.join("setup.py"), script).unwrap();
        "sh"
    }

    #[cfg(unix)]
    #[test]
    fn setup_py_version_is_reported() {
        let dir = TempDir::new().unwrap();
        let python = shell_setup_py(
            dir.path(),
            "if [ \"$1\" = \"--version\" ]; then echo 2.0.1; fi\nexit 0\n",
        );
        assert_eq!(introspect_with(dir.path(), python).unwrap(), Some("2.0.1".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn setup_py_traceback_is_an_error() {
        let dir = TempDir::new().unwrap();
        let python =
            shell_setup_py(dir.path(), "echo 'Traceback (most recent call last):' >&2\nexit 1\n");
        let err = introspect_with(dir.path(), python).unwrap_err();
        assert!(
            matches!(err, Error::BuildIntrospectionError(message) if message.contains("Traceback"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn setup_py_quiet_failure_is_no_version() {
        let dir = TempDir::new().unwrap();
        let python = shell_setup_py(dir.path(), "echo 'error: no commands' >&2\nexit 1\n");
        assert_eq!(introspect_with(dir.path(), python).unwrap(), None);
    }
}
