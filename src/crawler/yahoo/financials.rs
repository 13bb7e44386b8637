//! # Yahoo 損益表年營收
//!
//! Yahoo 的損益表以千為單位，取最近兩個年度的 Total Revenue。
//! 取不到的年度以 0 表示，診斷資訊仍會記錄缺值原因，可藉此分辨「營收為 0」與「取不到」。

use rust_decimal::Decimal;
use scraper::Html;

use crate::{
    crawler::{
        self,
        normalize::Fact,
        share::{field_names, Reader},
        Extraction, PageSource,
    },
    declare::{FieldValue, Metric, MetricResult, PeriodValue},
};

use super::layout;

/// 從損益表萃取最近兩個年度的營收，只有數值沒有期別
pub fn extract(document: &Html) -> Extraction {
    let mut reader = Reader::new(document);
    let mut periods = Vec::with_capacity(layout::REVENUE_COLUMNS.len());

    for (i, &column) in layout::REVENUE_COLUMNS.iter().enumerate() {
        let (_, value_field) = field_names("revenue", i);
        let value = match reader.value(value_field, &layout::revenue(column), Fact::Amount) {
            FieldValue::Missing => FieldValue::Amount(Decimal::ZERO),
            value => value,
        };
        periods.push(PeriodValue::new(None, value));
    }

    reader.finish(Metric::AnnualRevenue, periods)
}

/// 抓取指定股票最近兩個年度的營收
pub async fn visit<S>(source: &S, stock_symbol: &str) -> MetricResult
where
    S: PageSource + ?Sized,
{
    crawler::visit(source, stock_symbol, Metric::AnnualRevenue)
        .await
        .result
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{
        crawler::{
            fixture::{FINANCIALS_HTML, NOT_FOUND_HTML},
            HttpSource,
        },
        logging,
    };

    #[test]
    fn test_extract() {
        let extraction = extract(&Html::parse_document(FINANCIALS_HTML));
        let periods = extraction.result.periods();

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0], PeriodValue::new(None, FieldValue::Amount(dec!(232887000))));
        assert_eq!(periods[1], PeriodValue::new(None, FieldValue::Amount(dec!(177866000))));
        assert_eq!(extraction.misses().count(), 0);
    }

    #[test]
    fn test_missing_revenue_is_zero() {
        let extraction = extract(&Html::parse_document(NOT_FOUND_HTML));

        for pv in extraction.result.periods() {
            assert_eq!(pv.value, FieldValue::Amount(Decimal::ZERO));
            assert_eq!(pv.period, None);
        }
        assert!(extraction.all_missed());
    }

    #[tokio::test]
    #[ignore]
    async fn test_visit() {
        dotenv::dotenv().ok();
        logging::debug_file_async("開始 visit".to_string());

        let e = visit(&HttpSource, "AMZN").await;
        dbg!(&e);
        logging::debug_file_async(format!("{:#?}", e));

        logging::debug_file_async("結束 visit".to_string());
    }
}
