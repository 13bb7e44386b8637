//! # Yahoo 財經採集模組
//!
//! 從 Yahoo 財經 (美股站) 抓取個股的財務資料。
//!
//! ## 支援的功能
//!
//! - **統計頁 (`statistics`)**：近五季的本益比 (trailing P/E) 與各季的日期。
//! - **損益表 (`financials`)**：近兩個年度的營收，單位為千。
//!
//! ## 站點資訊
//!
//! - 來源域名：`finance.yahoo.com` (可由設定檔覆蓋)
//! - 抓取技術：HTTP GET 搭配位置路徑解析，路徑集中在 `layout`。

/// 損益表的年營收
pub mod financials;
/// 各頁面的欄位位置
pub mod layout;
/// 統計頁的本益比
pub mod statistics;
