//! 從公開財經網站抓取個股的本益比、年營收、年度淨利與流動比率。

/// 批次採集
pub mod batch;
pub mod config;
/// 各網站的採集器
pub mod crawler;
pub mod declare;
pub mod logging;
pub mod util;
