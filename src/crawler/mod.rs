use async_trait::async_trait;
use concat_string::concat_string;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use scraper::Html;

use crate::{
    config::{self, SETTINGS},
    declare::{Metric, PageKind},
    logging,
    util::{self, http::Page},
};

pub use share::{Extraction, Probe};

/// 測試用的頁面來源與 HTML
#[cfg(test)]
pub(crate) mod fixture;
/// 片段正規化
pub mod normalize;
/// 共用的欄位讀取與診斷
pub(crate) mod share;
/// 雅虎財經
pub mod yahoo;
/// Zacks 投資研究
pub mod zacks;

/// 依股票代碼與頁面種類取得頁面
#[async_trait]
pub trait PageSource: Sync {
    async fn fetch(&self, stock_symbol: &str, kind: PageKind) -> Page;
}

/// 透過 HTTP 向各網站取得頁面
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpSource;

impl HttpSource {
    /// 各頁面的網址，股票代碼不做任何跳脫
    pub fn url(kind: PageKind, stock_symbol: &str, crawler: &config::Crawler) -> String {
        match kind {
            PageKind::YahooStatistics => concat_string!(
                "https://",
                crawler.yahoo_host,
                "/quote/",
                stock_symbol,
                "/key-statistics"
            ),
            PageKind::YahooFinancials => concat_string!(
                "https://",
                crawler.yahoo_host,
                "/quote/",
                stock_symbol,
                "/financials"
            ),
            PageKind::ZacksIncomeStatement => concat_string!(
                "https://",
                crawler.zacks_host,
                "/stock/quote/",
                stock_symbol,
                "/income-statement"
            ),
            PageKind::ZacksBalanceSheet => concat_string!(
                "https://",
                crawler.zacks_host,
                "/stock/quote/",
                stock_symbol,
                "/balance-sheet"
            ),
        }
    }

    /// Zacks 會擋掉預設的 user agent，Yahoo 使用預設的 headers 即可
    pub fn headers(kind: PageKind, crawler: &config::Crawler) -> Option<HeaderMap> {
        match kind {
            PageKind::YahooStatistics | PageKind::YahooFinancials => None,
            PageKind::ZacksIncomeStatement | PageKind::ZacksBalanceSheet => {
                match HeaderValue::from_str(&crawler.zacks_user_agent) {
                    Ok(ua) => {
                        let mut headers = HeaderMap::new();
                        headers.insert(USER_AGENT, ua);
                        Some(headers)
                    }
                    Err(why) => {
                        logging::error_file_async(format!(
                            "Invalid user agent '{}' because {:?}",
                            crawler.zacks_user_agent, why
                        ));
                        None
                    }
                }
            }
        }
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, stock_symbol: &str, kind: PageKind) -> Page {
        let url = Self::url(kind, stock_symbol, &SETTINGS.crawler);
        let headers = Self::headers(kind, &SETTINGS.crawler);
        let page = util::http::get_page(&url, headers).await;
        let msg = format!(
            "Symbol: {} | Request status: {}",
            stock_symbol,
            page.status_text()
        );

        logging::info_console(msg.clone());
        logging::info_file_async(msg);

        page
    }
}

/// 依指標從文件中萃取資料
pub fn extract(metric: Metric, document: &Html) -> Extraction {
    match metric {
        Metric::TrailingPe => yahoo::statistics::extract(document),
        Metric::AnnualRevenue => yahoo::financials::extract(document),
        Metric::AnnualNetIncome => zacks::income_statement::extract(document),
        Metric::CurrentRatio => zacks::balance_sheet::extract(document),
    }
}

/// 取得頁面並萃取指標，每次呼叫都會重新抓取頁面
pub async fn visit<S>(source: &S, stock_symbol: &str, metric: Metric) -> Extraction
where
    S: PageSource + ?Sized,
{
    let page = source.fetch(stock_symbol, metric.page_kind()).await;
    let extraction = extract(metric, &page.document());

    if extraction.all_missed() {
        logging::warn_file_async(format!(
            "{} of {}: none of the declared paths matched {} (status {}), the page layout may have changed",
            metric,
            stock_symbol,
            page.url,
            page.status_text()
        ));
    } else {
        for probe in extraction.misses() {
            logging::debug_file_async(format!(
                "{} of {}: {} missed at {} because {}",
                metric,
                stock_symbol,
                probe.field,
                probe.path.as_deref().unwrap_or("-"),
                probe.miss.as_ref().map(ToString::to_string).unwrap_or_default()
            ));
        }
    }

    extraction
}
