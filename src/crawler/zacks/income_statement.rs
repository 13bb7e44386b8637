//! Zacks 年度損益表的淨利。Zacks 以百萬為單位，換算成千以便與 Yahoo 的數字比較。

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

/// 從年度損益表萃取最近兩個年度的淨利
pub fn extract(document: &Html) -> Extraction {
    let mut reader = Reader::new(document);
    let mut periods = Vec::with_capacity(layout::ANNUAL_COLUMNS.len());

    for (i, &column) in layout::ANNUAL_COLUMNS.iter().enumerate() {
        let (period_field, value_field) = field_names("net_income", i);
        let period = reader.label(period_field, &layout::period(column));
        let value = reader.value(value_field, &layout::net_income(column), Fact::MillionsAmount);
        periods.push(PeriodValue::new(period, value));
    }

    reader.finish(Metric::AnnualNetIncome, periods)
}

/// 抓取指定股票最近兩個年度的淨利
pub async fn visit<S>(source: &S, stock_symbol: &str) -> MetricResult
where
    S: PageSource + ?Sized,
{
    crawler::visit(source, stock_symbol, Metric::AnnualNetIncome)
        .await
        .result
}
