use scraper::Html;

use crate::{
    crawler::normalize::{self, Fact, Miss},
    declare::{FieldValue, Metric, MetricResult, PeriodValue},
    util::http::element::{self, SelectorPath},
};

/// 單一欄位的定位結果，用於判斷是網站改版還是資料本來就沒有
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    /// 欄位名稱，例如 `pe[0].value`
    pub field: String,
    /// 使用的路徑，由其他欄位計算出來的值為 `None`
    pub path: Option<String>,
    pub miss: Option<Miss>,
}

/// 一次萃取的結果與診斷資訊
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub result: MetricResult,
    pub probes: Vec<Probe>,
}

impl Extraction {
    pub fn misses(&self) -> impl Iterator<Item = &Probe> {
        self.probes.iter().filter(|p| p.miss.is_some())
    }

    /// 所有宣告的路徑都比對不到，通常代表頁面結構變了或是抓到錯誤頁
    pub fn all_missed(&self) -> bool {
        let mut located = self.probes.iter().filter(|p| p.path.is_some()).peekable();
        located.peek().is_some() && located.all(|p| p.miss == Some(Miss::NoMatch))
    }
}

/// 第 `i` 期的期別與數值欄位名稱，例如 `pe[0].period`、`pe[0].value`
pub(crate) fn field_names(prefix: &str, i: usize) -> (String, String) {
    (
        format!("{}[{}].period", prefix, i),
        format!("{}[{}].value", prefix, i),
    )
}

/// 在一份文件上依序讀取欄位，並記錄每個欄位的結果
pub(crate) struct Reader<'a> {
    document: &'a Html,
    probes: Vec<Probe>,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(document: &'a Html) -> Self {
        Reader {
            document,
            probes: Vec::with_capacity(16),
        }
    }

    fn serialized(&self, path: &SelectorPath) -> String {
        element::serialize(&element::locate(self.document, path))
    }

    /// 定位並正規化一個欄位，失敗時為缺值
    pub(crate) fn value(&mut self, field: String, path: &SelectorPath, fact: Fact) -> FieldValue {
        let outcome = normalize::normalize(&self.serialized(path), fact);
        self.record(field, Some(path), outcome)
    }

    /// 期別標籤
    pub(crate) fn label(&mut self, field: String, path: &SelectorPath) -> Option<String> {
        match self.value(field, path, Fact::Label) {
            FieldValue::Text(label) => Some(label),
            _ => None,
        }
    }

    /// 只取最內層文字，留給呼叫端自行計算
    pub(crate) fn text(&mut self, field: String, path: &SelectorPath) -> Result<String, Miss> {
        let outcome = normalize::innermost_text(&self.serialized(path)).and_then(|text| {
            if text.is_empty() {
                Err(Miss::EmptyText)
            } else {
                Ok(text)
            }
        });

        self.probes.push(Probe {
            field,
            path: Some(path.to_string()),
            miss: outcome.as_ref().err().cloned(),
        });

        outcome
    }

    /// 記錄由其他欄位計算出來的值
    pub(crate) fn derived(&mut self, field: String, outcome: Result<FieldValue, Miss>) -> FieldValue {
        self.record(field, None, outcome)
    }

    fn record(
        &mut self,
        field: String,
        path: Option<&SelectorPath>,
        outcome: Result<FieldValue, Miss>,
    ) -> FieldValue {
        self.probes.push(Probe {
            field,
            path: path.map(ToString::to_string),
            miss: outcome.as_ref().err().cloned(),
        });

        normalize::or_missing(outcome)
    }

    pub(crate) fn finish(self, metric: Metric, periods: Vec<PeriodValue>) -> Extraction {
        Extraction {
            result: MetricResult::new(metric, periods),
            probes: self.probes,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::util::http::element::Step;

    #[test]
    fn test_reader() {
        let document =
            Html::parse_document("<html><body><p><b>9/30/2019</b><i>1,500</i><i></i></p></body></html>");
        let mut reader = Reader::new(&document);

        let label = reader.label(
            "period".to_string(),
            &SelectorPath::root(Step::nth("p", 1)).child(Step::nth("b", 1)),
        );
        let amount = reader.value(
            "amount".to_string(),
            &SelectorPath::root(Step::nth("p", 1)).child(Step::nth("i", 1)),
            Fact::MillionsAmount,
        );
        let empty = reader.text(
            "empty".to_string(),
            &SelectorPath::root(Step::nth("p", 1)).child(Step::nth("i", 2)),
        );
        let gone = reader.value(
            "gone".to_string(),
            &SelectorPath::root(Step::nth("table", 1)),
            Fact::Amount,
        );

        assert_eq!(label.as_deref(), Some("9/30/2019"));
        assert_eq!(amount, FieldValue::Amount(dec!(1500000)));
        assert_eq!(empty, Err(Miss::EmptyText));
        assert_eq!(gone, FieldValue::Missing);

        let extraction = reader.finish(
            Metric::AnnualNetIncome,
            vec![PeriodValue::new(label, amount)],
        );
        assert_eq!(extraction.result.len(), 2);
        assert_eq!(extraction.misses().count(), 2);
        assert!(!extraction.all_missed());
    }

    #[test]
    fn test_all_missed() {
        let document = Html::parse_document("<html><body><h1>404</h1></body></html>");
        let mut reader = Reader::new(&document);
        reader.value(
            "a".to_string(),
            &SelectorPath::root(Step::id("annual_income_statement")),
            Fact::Amount,
        );
        reader.derived("b".to_string(), Err(Miss::NoMatch));

        assert!(reader.finish(Metric::CurrentRatio, Vec::new()).all_missed());
    }
}
