//! 測試用：以記憶體中的 HTML 代替網站

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use hashbrown::HashMap;

use crate::{
    crawler::{zacks::layout, PageSource},
    declare::PageKind,
    util::http::Page,
};

#[derive(Default)]
pub(crate) struct StaticSource {
    pages: HashMap<(String, PageKind), (u16, String)>,
    fetched: AtomicUsize,
}

impl StaticSource {
    pub(crate) fn with(mut self, stock_symbol: &str, kind: PageKind, status: u16, html: &str) -> Self {
        self.pages
            .insert((stock_symbol.to_string(), kind), (status, html.to_string()));
        self
    }

    pub(crate) fn fetched(&self) -> usize {
        self.fetched.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for StaticSource {
    async fn fetch(&self, stock_symbol: &str, kind: PageKind) -> Page {
        self.fetched.fetch_add(1, Ordering::SeqCst);
        let url = format!("memory://{}/{}", stock_symbol, kind);
        match self.pages.get(&(stock_symbol.to_string(), kind)) {
            Some((status, html)) => Page::new(&url, Some(*status), html.clone()),
            None => Page::unreachable(&url),
        }
    }
}

pub(crate) const NOT_FOUND_HTML: &str =
    "<html><body><h1>Page not found</h1><p>The symbol could not be found.</p></body></html>";

/// Yahoo 統計頁：最新 25.31、上一季虧損 (空白)、半年前 N/A、九個月前 19.02、一年前沒有欄位
pub(crate) const STATISTICS_HTML: &str = r#"<html><body><section>
<table><thead><tr><th class="Fw(b)"><span></span></th><th class="Fw(b)"><span>As of Date: 10/18/2019</span></th><th class="Fw(b)"><span>Current</span></th><th class="Fw(b)"><span>6/30/2019</span></th><th class="Fw(b)"><span>3/31/2019</span></th><th class="Fw(b)"><span>12/31/2018</span></th><th class="Fw(b)"><span>9/30/2018</span></th></tr></thead>
<tbody><tr class="fi-row"><td><span>Market Cap (intraday)</span></td><td></td><td>1.1T</td><td>1.04T</td><td>1T</td><td>781B</td><td>1.05T</td></tr><tr class="fi-row"><td><span>Enterprise Value</span></td><td></td><td>1.1T</td><td>1.03T</td><td>990B</td><td>784B</td><td>1.06T</td></tr><tr class="fi-row"><td><span>Trailing P/E</span></td><td></td><td>25.31</td><td></td><td>N/A</td><td>19.02</td></tr></tbody>
</table></section></body></html>"#;

/// Yahoo 損益表：ttm 之後兩個年度為 232,887,000 與 177,866,000
pub(crate) const FINANCIALS_HTML: &str = r#"<html><body>
<div class="D(tbhg)"><div><div><span>Breakdown</span></div><div><span>ttm</span></div><div><span>12/31/2018</span></div><div><span>12/31/2017</span></div></div></div>
<div class="D(tbrg)"><div><div><div><span>Total Revenue</span></div><div><span>257,510,000</span></div><div><span>232,887,000</span></div><div><span>177,866,000</span></div></div></div><div><div><div><span>Cost of Revenue</span></div></div></div></div>
</body></html>"#;

fn zacks_page(tables: &str) -> String {
    format!(
        r#"<html><body><div id="annual_income_statement"><h2>Annual Statements</h2><p>All figures in millions of U.S. Dollars</p>{}</div></body></html>"#,
        tables
    )
}

fn zacks_table(periods: [&str; 2], rows: usize, mut cell: impl FnMut(usize, usize) -> String) -> String {
    let mut body = String::new();
    for row in 1..=rows {
        body.push_str(&format!(
            "<tr><td>Row {}</td><td>{}</td><td>{}</td></tr>",
            row,
            cell(row, 0),
            cell(row, 1)
        ));
    }

    format!(
        "<table><thead><tr><th>Fiscal Year End</th><th>{}</th><th>{}</th></tr></thead><tbody>{}</tbody></table>",
        periods[0], periods[1], body
    )
}

/// Zacks 年度損益表，淨利以百萬為單位
pub(crate) fn zacks_income_statement(periods: [&str; 2], net_income: [&str; 2]) -> String {
    zacks_page(&zacks_table(periods, 20, |row, i| {
        if row == layout::NET_INCOME_ROW {
            format!(r##"<span><a href="#">{}</a></span>"##, net_income[i])
        } else {
            "<span>1,000</span>".to_string()
        }
    }))
}

/// Zacks 年度資產負債表，流動資產在第一張表、流動負債在第二張表
pub(crate) fn zacks_balance_sheet(
    periods: [&str; 2],
    assets: [&str; 2],
    liabilities: [&str; 2],
) -> String {
    let asset_table = zacks_table(periods, 12, |row, i| {
        if row == layout::CURRENT_ASSETS_ROW {
            format!("<span>{}</span>", assets[i])
        } else {
            "<span>500</span>".to_string()
        }
    });
    let liability_table = zacks_table(periods, 12, |row, i| {
        if row == layout::CURRENT_LIABILITIES_ROW {
            format!("<span>{}</span>", liabilities[i])
        } else {
            "<span>300</span>".to_string()
        }
    });

    zacks_page(&format!("{}{}", asset_table, liability_table))
}
