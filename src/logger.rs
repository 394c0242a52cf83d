use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Open the log file once. Later calls keep the first file.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_none()
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(path)
    {
        *logger = Some(file);
    }
}

pub fn is_enabled() -> bool {
    LOGGER.lock().map(|l| l.is_some()).unwrap_or(false)
}

pub fn log(message: &str) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if let Some(file) = logger.as_mut() {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(file, "[{}] {}", timestamp, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_before_init_is_noop() {
        // Must not panic whether or not another test opened the file.
        log("nobody listening");
    }

    #[test]
    fn test_logger_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz_debug.log");
        init(&path);
        assert!(is_enabled());

        log("Loaded 3 vocabulary questions");
        if path.exists() {
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.contains("] Loaded 3 vocabulary questions"));
        }
    }
}
