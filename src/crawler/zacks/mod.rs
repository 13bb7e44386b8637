//! # Zacks 採集模組
//!
//! 從 Zacks 抓取年度財報。Zacks 會擋掉預設的 user agent，請求時需帶上瀏覽器的 user agent。
//!
//! - **損益表 (`income_statement`)**：近兩個年度的淨利。
//! - **資產負債表 (`balance_sheet`)**：近兩個年度的流動比率。
//!
//! Zacks 的金額以百萬為單位，萃取時會換算成與 Yahoo 相同的千。

/// 年度資產負債表的流動比率
pub mod balance_sheet;
/// 年度損益表的淨利
pub mod income_statement;
/// 各頁面的欄位位置
pub mod layout;
