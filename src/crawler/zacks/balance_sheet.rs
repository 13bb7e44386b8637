//! Zacks 年度資產負債表的流動比率 (流動資產 ÷ 流動負債)，取到小數第二位。

use scraper::Html;

use crate::{
    crawler::{
        self,
        normalize::{self, Miss},
        share::{field_names, Reader},
        Extraction, PageSource,
    },
    declare::{FieldValue, Metric, MetricResult, PeriodValue},
};

use super::layout;

/// 從年度資產負債表計算最近兩個年度的流動比率
pub fn extract(document: &Html) -> Extraction {
    let mut reader = Reader::new(document);
    let mut periods = Vec::with_capacity(layout::ANNUAL_COLUMNS.len());

    for (i, &column) in layout::ANNUAL_COLUMNS.iter().enumerate() {
        let (period_field, value_field) = field_names("current_ratio", i);
        let period = reader.label(period_field, &layout::period(column));
        let assets = reader.text(
            format!("current_ratio[{}].assets", i),
            &layout::total_current_assets(column),
        );
        let liabilities = reader.text(
            format!("current_ratio[{}].liabilities", i),
            &layout::total_current_liabilities(column),
        );

        let value = reader.derived(value_field, ratio(assets, liabilities));
        periods.push(PeriodValue::new(period, value));
    }

    reader.finish(Metric::CurrentRatio, periods)
}

fn ratio(
    assets: Result<String, Miss>,
    liabilities: Result<String, Miss>,
) -> Result<FieldValue, Miss> {
    let assets = assets?;
    let liabilities = liabilities?;
    normalize::compute_ratio(&assets, &liabilities).map(FieldValue::Ratio)
}

/// 抓取指定股票最近兩個年度的流動比率
pub async fn visit<S>(source: &S, stock_symbol: &str) -> MetricResult
where
    S: PageSource + ?Sized,
{
    crawler::visit(source, stock_symbol, Metric::CurrentRatio)
        .await
        .result
}
