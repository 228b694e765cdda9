//! Tracing setup.
//!
//! The terminal is owned by the background, so logs go to a file in the
//! platform data directory, and only when `RUST_LOG` is set.

use std::{
    fs::{self, File},
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "ooze.log";

/// Install the file subscriber. Returns the log path when logging is on, and
/// an error when `RUST_LOG` asks for logs but the file cannot be created.
pub fn init() -> io::Result<Option<PathBuf>> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(None);
    }
    let Some(dirs) = ooze_config::project_dirs() else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no home directory for the log file",
        ));
    };
    let (path, file) = create_log_file(dirs.data_local_dir())?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok();
    Ok(installed.then_some(path))
}

fn create_log_file(dir: &Path) -> io::Result<(PathBuf, File)> {
    fs::create_dir_all(dir)?;
    let path = dir.join(LOG_FILE);
    let file = File::create(&path)?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_log_file_makes_directory() {
        let dir = std::env::temp_dir().join(format!("ooze-log-{}", std::process::id()));
        let (path, _file) = create_log_file(&dir).expect("log file");
        assert_eq!(path, dir.join(LOG_FILE));
        assert!(path.is_file());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_create_log_file_reports_blocked_directory() {
        let blocker =
            std::env::temp_dir().join(format!("ooze-log-blocker-{}", std::process::id()));
        fs::write(&blocker, "not a directory").expect("write blocker");
        let result = create_log_file(&blocker.join("logs"));
        assert!(result.is_err());
        fs::remove_file(&blocker).ok();
    }
}
