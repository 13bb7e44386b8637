use std::{
    env,
    fmt::Write as _,
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::PathBuf,
    thread,
};

use chrono::{format::DelayedFormat, Local};
use once_cell::sync::Lazy;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

/// 記錄檔目錄，預設為 `log`
const LOG_DIR: &str = "LOG_DIR";

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("default"));

/// 每個等級各自一個檔案，寫檔在背景線程進行，呼叫端不會被 I/O 卡住
pub struct Logger {
    info_writer: UnboundedSender<String>,
    warn_writer: UnboundedSender<String>,
    error_writer: UnboundedSender<String>,
    debug_writer: UnboundedSender<String>,
}

impl Logger {
    pub fn new(log_name: &str) -> Self {
        Logger {
            info_writer: Self::create_writer(format!("{}_info", log_name)),
            warn_writer: Self::create_writer(format!("{}_warn", log_name)),
            error_writer: Self::create_writer(format!("{}_error", log_name)),
            debug_writer: Self::create_writer(format!("{}_debug", log_name)),
        }
    }

    pub fn info(&self, log: String) {
        self.send(log, &self.info_writer);
    }

    pub fn warn(&self, log: String) {
        self.send(log, &self.warn_writer);
    }

    pub fn error(&self, log: String) {
        self.send(log, &self.error_writer);
    }

    pub fn debug(&self, log: String) {
        self.send(log, &self.debug_writer);
    }

    fn send(&self, msg: String, writer: &UnboundedSender<String>) {
        if let Err(why) = writer.send(msg) {
            error_console(format!("{} ({})", why, why.0));
        }
    }

    fn create_writer(log_name: String) -> UnboundedSender<String> {
        let (tx, mut rx) = unbounded_channel::<String>();

        // 寫入檔案的操作使用另一個線程處理
        thread::spawn(move || {
            let file = Self::get_log_path(&log_name).and_then(|log_path| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(log_path)
                    .ok()
            });

            let Some(file) = file else {
                error_console(format!("Failed to open log file {}, fall back to console", log_name));
                while let Some(received) = rx.blocking_recv() {
                    info_console(received);
                }
                return;
            };

            let mut writer = BufWriter::new(file);
            let mut line = String::with_capacity(2048);

            while let Some(received) = rx.blocking_recv() {
                if writeln!(
                    &mut line,
                    "{} {}",
                    Local::now().format("%F %X%.6f"),
                    received
                )
                .is_err()
                {
                    continue;
                }

                if rx.is_empty() || line.len() >= 2048 {
                    if writer.write_all(line.as_bytes()).is_err() || writer.flush().is_err() {
                        info_console(line.clone());
                    }

                    line.clear();
                }
            }
        });

        tx
    }

    fn get_log_path(name: &str) -> Option<PathBuf> {
        let dir = PathBuf::from(env::var(LOG_DIR).unwrap_or_else(|_| "log".to_string()));

        if !dir.exists() {
            fs::create_dir_all(&dir).ok()?;
        }

        Some(dir.join(format!("{}_{}.log", name, Local::now().format("%Y-%m-%d"))))
    }
}

pub fn info_file_async(log: String) {
    LOGGER.info(log);
}

pub fn warn_file_async(log: String) {
    LOGGER.warn(log);
}

pub fn error_file_async(log: String) {
    LOGGER.error(log);
}

pub fn debug_file_async(log: String) {
    LOGGER.debug(log);
}

pub fn info_console(log: String) {
    println!(
        "{} Info {}",
        Local::now().format("%Y-%m-%d %H:%M:%S.%3f"),
        log
    );
}

pub fn error_console(log: String) {
    println!(
        "{} Error {}",
        DelayedFormat::to_string(&Local::now().format("%Y-%m-%d %H:%M:%S.%3f")),
        log
    );
}

#[cfg(test)]
mod tests {
    use std::time;

    use super::*;

    #[tokio::test]
    async fn test_log() {
        dotenv::dotenv().ok();
        info_file_async("info".to_string());
        warn_file_async("warn".to_string());
        error_file_async("error".to_string());
        debug_file_async("debug".to_string());
        info_console("console".to_string());
        tokio::time::sleep(time::Duration::from_millis(200)).await;

        let path = Logger::get_log_path("default_info").unwrap();
        assert!(path.exists());
    }
}
