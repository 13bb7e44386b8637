use std::fmt;

use hashbrown::HashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{ser::SerializeMap, Serialize, Serializer};
use strum::{Display, EnumIter};

/// 無獲利公司的本益比以此極大值代替
pub const UNPROFITABLE_PE: Decimal = dec!(1999);

/// 財報頁面種類，每種對應一個固定的網址樣板
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum PageKind {
    /// Yahoo 統計頁 (key-statistics)
    YahooStatistics,
    /// Yahoo 損益表 (financials)
    YahooFinancials,
    /// Zacks 年度損益表
    ZacksIncomeStatement,
    /// Zacks 年度資產負債表
    ZacksBalanceSheet,
}

/// 可採集的財務指標
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Metric {
    /// 近五季的本益比 (trailing P/E)
    TrailingPe,
    /// 近兩年的年營收
    AnnualRevenue,
    /// 近兩年的年度淨利
    AnnualNetIncome,
    /// 近兩年的流動比率
    CurrentRatio,
}

impl Metric {
    /// 每個指標固定的期數
    pub const fn arity(&self) -> usize {
        match self {
            Metric::TrailingPe => 5,
            Metric::AnnualRevenue | Metric::AnnualNetIncome | Metric::CurrentRatio => 2,
        }
    }

    pub const fn page_kind(&self) -> PageKind {
        match self {
            Metric::TrailingPe => PageKind::YahooStatistics,
            Metric::AnnualRevenue => PageKind::YahooFinancials,
            Metric::AnnualNetIncome => PageKind::ZacksIncomeStatement,
            Metric::CurrentRatio => PageKind::ZacksBalanceSheet,
        }
    }
}

/// 單一欄位正規化後的值
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Missing,
    Text(String),
    Amount(Decimal),
    Ratio(Decimal),
    /// 公司虧損，本益比無意義
    Unprofitable,
}

impl FieldValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// 數值型的欄位轉成 `Decimal`，虧損的本益比視為 `UNPROFITABLE_PE`
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(d) | FieldValue::Ratio(d) => Some(*d),
            FieldValue::Unprofitable => Some(UNPROFITABLE_PE),
            FieldValue::Missing | FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => write!(f, "None"),
            FieldValue::Text(t) => write!(f, "{}", t),
            FieldValue::Amount(d) | FieldValue::Ratio(d) => write!(f, "{}", d),
            FieldValue::Unprofitable => write!(f, "{}", UNPROFITABLE_PE),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Missing => serializer.serialize_none(),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

/// 一期的資料：期別標籤與數值
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PeriodValue {
    /// 期別 (例如 "9/30/2019")，取不到時為 `None`
    pub period: Option<String>,
    pub value: FieldValue,
}

impl PeriodValue {
    pub fn new(period: Option<String>, value: FieldValue) -> Self {
        PeriodValue { period, value }
    }

    pub fn missing() -> Self {
        Default::default()
    }
}

/// 單一股票某個指標的結果，期數固定且由近到遠排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricResult {
    pub metric: Metric,
    periods: Vec<PeriodValue>,
}

impl MetricResult {
    /// 建立結果並補齊或截斷到指標規定的期數，呼叫端永遠不會看到較短的序列
    pub fn new(metric: Metric, mut periods: Vec<PeriodValue>) -> Self {
        periods.resize_with(metric.arity(), PeriodValue::missing);
        MetricResult { metric, periods }
    }

    /// 全部期數皆為缺值
    pub fn missing(metric: Metric) -> Self {
        MetricResult::new(metric, Vec::new())
    }

    pub fn periods(&self) -> &[PeriodValue] {
        &self.periods
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn is_all_missing(&self) -> bool {
        self.periods
            .iter()
            .all(|pv| pv.period.is_none() && pv.value.is_missing())
    }
}

impl Serialize for MetricResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.periods.serialize(serializer)
    }
}

/// 股票代碼對應指標結果，保留輸入的順序
#[derive(Debug, Clone, Default)]
pub struct SymbolResultMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, MetricResult)>,
}

impl SymbolResultMap {
    pub fn with_capacity(capacity: usize) -> Self {
        SymbolResultMap {
            index: HashMap::with_capacity(capacity),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// 重複的代碼保留第一次出現的位置，值以最後一次為準
    pub fn insert(&mut self, symbol: &str, result: MetricResult) {
        match self.index.get(symbol) {
            Some(&at) => self.entries[at].1 = result,
            None => {
                self.index.insert(symbol.to_string(), self.entries.len());
                self.entries.push((symbol.to_string(), result));
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&MetricResult> {
        self.index.get(symbol).map(|&at| &self.entries[at].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(symbol, _)| symbol.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricResult)> {
        self.entries
            .iter()
            .map(|(symbol, result)| (symbol.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SymbolResultMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (symbol, result) in &self.entries {
            map.serialize_entry(symbol, result)?;
        }
        map.end()
    }
}
