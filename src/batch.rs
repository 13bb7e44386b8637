//! # 批次採集
//!
//! 依序對每個股票代碼執行一次指標萃取，組成 [`SymbolResultMap`]。
//! 一檔股票取不到資料只會得到缺值，不會中斷後面的股票。

use crate::{
    crawler::{self, HttpSource, PageSource},
    declare::{Metric, SymbolResultMap},
    logging,
};

/// 依輸入順序逐一採集指標
pub async fn aggregate<S, T>(source: &S, metric: Metric, stock_symbols: &[T]) -> SymbolResultMap
where
    S: PageSource + ?Sized,
    T: AsRef<str>,
{
    let mut map = SymbolResultMap::with_capacity(stock_symbols.len());
    let mut missed = 0;

    for stock_symbol in stock_symbols {
        let stock_symbol: &str = stock_symbol.as_ref();
        let extraction = crawler::visit(source, stock_symbol, metric).await;
        if extraction.result.is_all_missing() {
            missed += 1;
        }
        map.insert(stock_symbol, extraction.result);
    }

    logging::info_file_async(format!(
        "{} collected for {} symbols, {} without any data",
        metric,
        map.len(),
        missed
    ));

    map
}

/// `{symbol: [(最新, P/E), (上一季, P/E), (半年前, P/E), (九個月前, P/E), (一年前, P/E)]}`
pub async fn pull_pe_list<T: AsRef<str>>(stock_symbols: &[T]) -> SymbolResultMap {
    aggregate(&HttpSource, Metric::TrailingPe, stock_symbols).await
}

/// `{symbol: [最近年度營收, 前一年度營收]}`
pub async fn pull_rev_list<T: AsRef<str>>(stock_symbols: &[T]) -> SymbolResultMap {
    aggregate(&HttpSource, Metric::AnnualRevenue, stock_symbols).await
}

/// `{symbol: [(最近年度, 淨利), (前一年度, 淨利)]}`
pub async fn pull_ni_list<T: AsRef<str>>(stock_symbols: &[T]) -> SymbolResultMap {
    aggregate(&HttpSource, Metric::AnnualNetIncome, stock_symbols).await
}

/// `{symbol: [(最近年度, 流動比率), (前一年度, 流動比率)]}`
pub async fn pull_curr_ratio_list<T: AsRef<str>>(stock_symbols: &[T]) -> SymbolResultMap {
    aggregate(&HttpSource, Metric::CurrentRatio, stock_symbols).await
}
