//! # 片段正規化
//!
//! 把定位到的節點序列化文字轉成型別化的值。任何失敗都在這裡就地轉成 [`Miss`]，
//! 不會往外拋：
//!
//! 1. 沒有比對到節點 (`[]`) 視為缺值。
//! 2. 取最內層、最後一對標籤之間的文字。
//! 3. 文字為空時，本益比代表公司虧損 ([`FieldValue::Unprofitable`])，其餘欄位為缺值。
//! 4. 文字非空時依欄位種類轉換：期別原樣保留、金額移除千分位、
//!    Zacks 以百萬為單位的金額乘以 1000、流動比率相除後取到小數第二位。

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{declare::FieldValue, util::text};

/// 正規化失敗的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// 路徑沒有比對到任何節點，通常表示網站改版
    NoMatch,
    /// 節點存在但沒有文字
    EmptyText,
    /// 文字無法轉成預期的格式
    Malformed(String),
    /// 分母為 0
    DivideByZero,
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Miss::NoMatch => write!(f, "no node matched"),
            Miss::EmptyText => write!(f, "matched node has no text"),
            Miss::Malformed(why) => write!(f, "malformed fragment: {}", why),
            Miss::DivideByZero => write!(f, "denominator is zero"),
        }
    }
}

/// 欄位種類，決定文字要轉成什麼值
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Fact {
    /// 期別標籤，原樣保留
    Label,
    /// 本益比，空白代表虧損
    PeRatio,
    /// 金額 (以千為單位)
    Amount,
    /// 以百萬為單位的金額，換算成千
    MillionsAmount,
}

/// 取出序列化文字最內層的文字內容。
///
/// 以 `>` 切開取倒數第二段，再以 `<` 切開取倒數第二段，
/// 也就是最後一對標籤之間的文字；外層的 `[...]` 不影響結果。
pub fn innermost_text(serialized: &str) -> Result<String, Miss> {
    let serialized = serialized.trim();
    if serialized.is_empty() || serialized == "[]" {
        return Err(Miss::NoMatch);
    }

    let closing = second_to_last(serialized.split('>'))
        .ok_or_else(|| Miss::Malformed(format!("no enclosing tag in '{}'", serialized)))?;
    let text = second_to_last(closing.split('<'))
        .ok_or_else(|| Miss::Malformed(format!("no text segment in '{}'", closing)))?;

    Ok(text.trim().to_string())
}

fn second_to_last<'a>(parts: impl DoubleEndedIterator<Item = &'a str>) -> Option<&'a str> {
    parts.rev().nth(1)
}

/// 依欄位種類正規化一個序列化片段
pub fn normalize(serialized: &str, fact: Fact) -> Result<FieldValue, Miss> {
    let text = innermost_text(serialized)?;

    if text.is_empty() {
        return match fact {
            Fact::PeRatio => Ok(FieldValue::Unprofitable),
            Fact::Label | Fact::Amount | Fact::MillionsAmount => Err(Miss::EmptyText),
        };
    }

    match fact {
        Fact::Label => Ok(FieldValue::Text(text)),
        Fact::PeRatio => parse(&text).map(FieldValue::Ratio),
        Fact::Amount => parse(&text).map(FieldValue::Amount),
        Fact::MillionsAmount => scale_millions(&text).map(FieldValue::Amount),
    }
}

/// 把以百萬為單位的金額換算成以千為單位，例如 `"1,234"` 變成 `1234000`
pub fn scale_millions(text: &str) -> Result<Decimal, Miss> {
    let millions = parse(text)?;
    millions
        .checked_mul(dec!(1000))
        .map(|thousands| thousands.normalize())
        .ok_or_else(|| Miss::Malformed(format!("'{}' overflows when scaled", text)))
}

/// 計算 `numerator ÷ denominator` 並四捨五入到小數第二位，兩邊都會先移除千分位
pub fn compute_ratio(numerator: &str, denominator: &str) -> Result<Decimal, Miss> {
    let numerator = parse(numerator)?;
    let denominator = parse(denominator)?;

    if denominator.is_zero() {
        return Err(Miss::DivideByZero);
    }

    numerator
        .checked_div(denominator)
        .map(|ratio| ratio.round_dp(2).normalize())
        .ok_or_else(|| Miss::Malformed(format!("{} / {} overflows", numerator, denominator)))
}

fn parse(text: &str) -> Result<Decimal, Miss> {
    text::parse_decimal(text, None).map_err(|why| Miss::Malformed(why.to_string()))
}

/// 失敗一律轉成缺值
pub fn or_missing(outcome: Result<FieldValue, Miss>) -> FieldValue {
    outcome.unwrap_or(FieldValue::Missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_innermost_text() {
        assert_eq!(
            innermost_text(r#"[<td class="Fw(500) Ta(end)">25.31</td>]"#).unwrap(),
            "25.31"
        );
        assert_eq!(
            innermost_text("[<span><a href=\"/x\">55,256</a></span>]").unwrap(),
            ""
        );
        assert_eq!(innermost_text("<th>9/30/2019</th>").unwrap(), "9/30/2019");
        assert_eq!(
            innermost_text("[<td>1</td>, <td>2</td>]").unwrap(),
            "2"
        );
        assert_eq!(innermost_text("[]"), Err(Miss::NoMatch));
        assert_eq!(innermost_text(""), Err(Miss::NoMatch));
        assert!(matches!(innermost_text("plain text"), Err(Miss::Malformed(_))));
    }

    #[test]
    fn test_empty_match_is_missing_for_every_fact() {
        for fact in [Fact::Label, Fact::PeRatio, Fact::Amount, Fact::MillionsAmount] {
            assert_eq!(normalize("[]", fact), Err(Miss::NoMatch));
            assert_eq!(or_missing(normalize("[]", fact)), FieldValue::Missing);
        }
    }

    #[test]
    fn test_empty_text_sentinel_only_for_pe() {
        let empty = r#"[<td class="Fw(500)"></td>]"#;
        assert_eq!(normalize(empty, Fact::PeRatio), Ok(FieldValue::Unprofitable));
        assert_eq!(normalize(empty, Fact::Label), Err(Miss::EmptyText));
        assert_eq!(normalize(empty, Fact::Amount), Err(Miss::EmptyText));
        assert_eq!(normalize(empty, Fact::MillionsAmount), Err(Miss::EmptyText));
        assert_eq!(
            or_missing(normalize(empty, Fact::PeRatio)).as_decimal(),
            Some(dec!(1999))
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize("[<td>25.31</td>]", Fact::PeRatio),
            Ok(FieldValue::Ratio(dec!(25.31)))
        );
        assert!(matches!(
            normalize("[<td>N/A</td>]", Fact::PeRatio),
            Err(Miss::Malformed(_))
        ));
        assert_eq!(
            normalize("[<th>12/31/2019</th>]", Fact::Label),
            Ok(FieldValue::Text("12/31/2019".to_string()))
        );
        assert_eq!(
            normalize("[<span>280,522,000</span>]", Fact::Amount),
            Ok(FieldValue::Amount(dec!(280522000)))
        );
        assert_eq!(
            normalize("[<a>-1,234</a>]", Fact::MillionsAmount),
            Ok(FieldValue::Amount(dec!(-1234000)))
        );
    }

    #[test]
    fn test_scale_millions() {
        let scaled = scale_millions("1,234").unwrap();
        assert_eq!(scaled, dec!(1234000));
        assert_eq!(scaled.to_string(), "1234000");
        assert_eq!(scale_millions("12.5").unwrap().to_string(), "12500");
        assert!(scale_millions("--").is_err());
    }

    #[test]
    fn test_compute_ratio() {
        assert_eq!(compute_ratio("10,000", "4,000"), Ok(dec!(2.5)));
        assert_eq!(compute_ratio("10,000", "3,000"), Ok(dec!(3.33)));
        assert_eq!(compute_ratio("10,000", "0"), Err(Miss::DivideByZero));
        assert!(matches!(compute_ratio("abc", "4,000"), Err(Miss::Malformed(_))));
        assert!(matches!(compute_ratio("10,000", ""), Err(Miss::Malformed(_))));
    }
}
