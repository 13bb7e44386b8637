use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{header, Client, Response};
use scraper::Html;

use crate::{config::SETTINGS, logging::Logger};

pub mod element;

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// 抓回來的頁面。非 200 的狀態碼仍保留內容，連線失敗時內容為空、狀態碼為 `None`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub url: String,
    pub status: Option<u16>,
    pub body: String,
}

impl Page {
    pub fn new(url: &str, status: Option<u16>, body: String) -> Self {
        Page {
            url: url.to_string(),
            status,
            body,
        }
    }

    /// 連線失敗時的空頁面
    pub fn unreachable(url: &str) -> Self {
        Page::new(url, None, String::new())
    }

    /// 解析成可供選擇器查詢的文件樹，空內容也會得到一份沒有任何資料節點的文件
    pub fn document(&self) -> Html {
        Html::parse_document(&self.body)
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(200)
    }

    /// 給 console 顯示用的狀態碼
    pub fn status_text(&self) -> String {
        match self.status {
            Some(code) => code.to_string(),
            None => "unreachable".to_string(),
        }
    }
}

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
///
/// # Returns
///
/// * Result<&'static Client>: A reference to the reqwest client instance,
///   or an error if the client cannot be created.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        // reqwest 使用 rustls-no-provider，需先安裝加密實作；已安裝過時回傳 Err 可忽略
        let _ = rustls::crypto::ring::default_provider().install_default();

        Client::builder()
            // ===== 壓縮 =====
            .brotli(true)
            .gzip(true)
            .zstd(true)
            // ===== 超時設置 =====
            .connect_timeout(Duration::from_secs(SETTINGS.crawler.connect_timeout_secs))
            .timeout(Duration::from_secs(SETTINGS.crawler.timeout_secs))
            // ===== TCP 優化 =====
            .tcp_nodelay(true)
            // ===== 連接池 =====
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            // ===== Cookie 和重定向 =====
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .referer(true)
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Performs an HTTP GET request and returns the page whatever the status code is.
///
/// Transport failures are logged and collapse into [`Page::unreachable`],
/// so the caller always has a document to run selectors against.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to.
/// * `headers`: An optional set of headers overriding the client defaults.
pub async fn get_page(url: &str, headers: Option<header::HeaderMap>) -> Page {
    match fetch(url, headers).await {
        Ok((status, body)) => Page::new(url, Some(status), body),
        Err(why) => {
            LOGGER.error(format!("Failed to get {} because {:?}", url, why));
            Page::unreachable(url)
        }
    }
}

async fn fetch(url: &str, headers: Option<header::HeaderMap>) -> Result<(u16, String)> {
    let response = send(url, headers).await?;
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text: {:?}", e))?;

    Ok((status, body))
}

/// Sends a single HTTP GET request. No retry: a failed attempt is reported to the caller.
async fn send(url: &str, headers: Option<header::HeaderMap>) -> Result<Response> {
    let client = get_client()?;
    let mut rb = client.get(url);

    if let Some(h) = headers {
        rb = rb.headers(h);
    }

    let start = Instant::now();
    let res = rb.send().await;
    let elapsed = start.elapsed().as_millis();

    match res {
        Ok(response) => {
            LOGGER.info(format!(
                "GET:{} {} {} ms",
                url,
                response.status().as_u16(),
                elapsed
            ));
            Ok(response)
        }
        Err(why) => Err(anyhow!(
            "Failed to send request to {} because {:?}. {} ms",
            url,
            why,
            elapsed
        )),
    }
}
