use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

lazy_static::lazy_static! {
    static ref LOGGER: Mutex<Option<File>> = Mutex::new(None);
}

/// Opens (or creates) the log file. Calling it again once a file is open does nothing.
pub fn init(path: &Path) {
    let Ok(mut logger) = LOGGER.lock() else {
        return;
    };
    if logger.is_some() {
        return;
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    if let Ok(file) = OpenOptions::new().create(true).append(true).open(path) {
        *logger = Some(file);
    }
}

fn write_line(level: &str, message: &str) {
    let Ok(mut guard) = LOGGER.lock() else {
        return;
    };
    if let Some(logger) = guard.as_mut() {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let _ = writeln!(logger, "[{}] {} {}", timestamp, level, message);
    }
}

pub fn log(message: &str) {
    write_line("INFO", message);
}

pub fn debug(message: &str) {
    write_line("DEBUG", message);
}

/// Records a failure that is deliberately not surfaced to the user.
pub fn error(context: &str, err: &dyn std::fmt::Display) {
    write_line("ERROR", &format!("{}: {}", context, err));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_init() {
        let dir = tempfile::tempdir().unwrap();
        init(&dir.path().join("logs").join("vocab.log"));
    }

    #[test]
    fn test_logger_log() {
        let dir = tempfile::tempdir().unwrap();
        init(&dir.path().join("vocab.log"));
        log("Test log message");
        debug("Test debug message");
        error("fetch vocab", &"connection refused");
    }
}
