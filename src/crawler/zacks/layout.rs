//! Zacks 年度報表的欄位位置表。
//!
//! 兩種報表共用同一個容器 `#annual_income_statement`，第三個子元素是第一張表，
//! 資產負債表的負債部分在第四個子元素。表頭第二欄起為各年度，由近到遠。

use crate::util::http::element::{SelectorPath, Step};

const CONTAINER_ID: &str = "annual_income_statement";

/// 年度所在的欄，由近到遠
pub const ANNUAL_COLUMNS: [usize; 2] = [2, 3];

/// 損益表中 Net Income 的列
pub const NET_INCOME_ROW: usize = 15;
/// 資產負債表中 Total Current Assets 的列 (第一張表)
pub const CURRENT_ASSETS_ROW: usize = 7;
/// 資產負債表中 Total Current Liabilities 的列 (第二張表)
pub const CURRENT_LIABILITIES_ROW: usize = 8;

fn table(position: usize) -> SelectorPath {
    SelectorPath::root(Step::id(CONTAINER_ID)).child(Step::nth_child("table", position))
}

fn cell(table_position: usize, row: usize, column: usize) -> SelectorPath {
    table(table_position)
        .child(Step::nth_child("tbody", 2))
        .child(Step::nth_child("tr", row))
        .child(Step::nth_child("td", column))
        .child(Step::nth_child("span", 1))
}

/// 表頭的年度，例如 `9/30/2019`
pub fn period(column: usize) -> SelectorPath {
    table(3)
        .child(Step::nth_child("thead", 1))
        .child(Step::nth_child("tr", 1))
        .child(Step::nth_child("th", column))
}

/// 淨利的數字包在連結裡
pub fn net_income(column: usize) -> SelectorPath {
    cell(3, NET_INCOME_ROW, column).child(Step::nth_child("a", 1))
}

pub fn total_current_assets(column: usize) -> SelectorPath {
    cell(3, CURRENT_ASSETS_ROW, column)
}

pub fn total_current_liabilities(column: usize) -> SelectorPath {
    cell(4, CURRENT_LIABILITIES_ROW, column)
}
