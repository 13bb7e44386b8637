//! Yahoo 頁面的欄位位置表。網站改版時只需調整這裡。

use crate::util::http::element::{SelectorPath, Step};

/// 統計頁本益比所在的欄，由近到遠：最新、上一季、半年前、九個月前、一年前
pub const PE_COLUMNS: [usize; 5] = [3, 4, 5, 6, 7];

/// 損益表年營收所在的欄，由近到遠
pub const REVENUE_COLUMNS: [usize; 2] = [3, 4];

/// 統計頁表頭中各季的日期
/// `th.Fw(b):nth-child({column}) > span:nth-child(1)`
pub fn statistics_period(column: usize) -> SelectorPath {
    SelectorPath::root(Step::nth_child("th", column).with_class("Fw(b)"))
        .child(Step::nth_child("span", 1))
}

/// 本益比位於估值表的第三列
/// `tr.fi-row:nth-child(3) > td:nth-child({column})`
pub fn trailing_pe(column: usize) -> SelectorPath {
    SelectorPath::root(Step::nth_child("tr", 3).with_class("fi-row"))
        .child(Step::nth_child("td", column))
}

/// 損益表第一列 (Total Revenue)
/// `.D(tbrg) > div:nth-child(1) > div:nth-child(1) > div:nth-child({column}) > span:nth-child(1)`
pub fn revenue(column: usize) -> SelectorPath {
    SelectorPath::root(Step::class("D(tbrg)"))
        .child(Step::nth_child("div", 1))
        .child(Step::nth_child("div", 1))
        .child(Step::nth_child("div", column))
        .child(Step::nth_child("span", 1))
}
