use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file, Source};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct App {
    pub crawler: Crawler,
    pub system: System,
}

const YAHOO_HOST: &str = "YAHOO_HOST";
const ZACKS_HOST: &str = "ZACKS_HOST";
const ZACKS_USER_AGENT: &str = "ZACKS_USER_AGENT";
const HTTP_CONNECT_TIMEOUT_SECS: &str = "HTTP_CONNECT_TIMEOUT_SECS";
const HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Crawler {
    pub yahoo_host: String,
    pub zacks_host: String,
    /// Zacks 會擋掉預設的 user agent
    pub zacks_user_agent: String,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for Crawler {
    fn default() -> Self {
        Crawler {
            yahoo_host: "finance.yahoo.com".to_string(),
            zacks_host: "www.zacks.com".to_string(),
            zacks_user_agent: "Mozilla/5.0".to_string(),
            connect_timeout_secs: 8,
            timeout_secs: 15,
        }
    }
}

const STOCK_SYMBOLS: &str = "STOCK_SYMBOLS";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct System {
    /// 未指定股票代碼時的預設清單
    pub symbols: Vec<String>,
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| {
    App::get().unwrap_or_else(|why| {
        logging::error_file_async(format!(
            "I can't read the config context because {:?}",
            why
        ));
        App::default().override_with_env()
    })
});

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            return App::from_source(config_file::from(config_path));
        }

        Ok(App::default().override_with_env())
    }

    /// 從指定的設定來源讀取，再以 env 覆蓋
    fn from_source<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let config: App = config_config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        Ok(config.override_with_env())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(host) = env::var(YAHOO_HOST) {
            self.crawler.yahoo_host = host;
        }

        if let Ok(host) = env::var(ZACKS_HOST) {
            self.crawler.zacks_host = host;
        }

        if let Ok(ua) = env::var(ZACKS_USER_AGENT) {
            self.crawler.zacks_user_agent = ua;
        }

        if let Ok(secs) = env::var(HTTP_CONNECT_TIMEOUT_SECS) {
            self.crawler.connect_timeout_secs =
                u64::from_str(&secs).unwrap_or(self.crawler.connect_timeout_secs);
        }

        if let Ok(secs) = env::var(HTTP_TIMEOUT_SECS) {
            self.crawler.timeout_secs = u64::from_str(&secs).unwrap_or(self.crawler.timeout_secs);
        }

        if let Ok(symbols) = env::var(STOCK_SYMBOLS) {
            self.system.symbols = parse_symbols(&symbols);
        }

        self
    }
}

/// 以逗號分隔的股票代碼，例如 "AAPL, MSFT,TSLA"
pub fn parse_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}
