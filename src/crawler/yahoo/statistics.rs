//! # Yahoo 統計頁本益比
//!
//! 統計頁的估值表列出最新與過去四季的 trailing P/E。
//! 欄位為空代表該季 EPS 小於等於 0，以 [`UNPROFITABLE_PE`](crate::declare::UNPROFITABLE_PE) 表示。

use scraper::Html;

use crate::{
    crawler::{
        self,
        normalize::Fact,
        share::{field_names, Reader},
        Extraction, PageSource,
    },
    declare::{Metric, MetricResult, PeriodValue},
};

use super::layout;

/// 從統計頁萃取近五季的本益比
pub fn extract(document: &Html) -> Extraction {
    let mut reader = Reader::new(document);
    let mut periods = Vec::with_capacity(layout::PE_COLUMNS.len());

    for (i, &column) in layout::PE_COLUMNS.iter().enumerate() {
        let (period_field, value_field) = field_names("pe", i);
        let period = reader.label(period_field, &layout::statistics_period(column));
        let value = reader.value(value_field, &layout::trailing_pe(column), Fact::PeRatio);
        periods.push(PeriodValue::new(period, value));
    }

    reader.finish(Metric::TrailingPe, periods)
}

/// 抓取指定股票近五季的本益比
pub async fn visit<S>(source: &S, stock_symbol: &str) -> MetricResult
where
    S: PageSource + ?Sized,
{
    crawler::visit(source, stock_symbol, Metric::TrailingPe)
        .await
        .result
}
