//! 以位置路徑定位 HTML 節點
//!
//! 目標網站的數據都包在層層巢狀、class 名稱混淆過的容器裡，沒有穩定的 id，
//! 只能用「標籤 + 第幾個」一路往下定位。網站改版時路徑就會失效，定位不到時一律回傳空結果。

use std::fmt::{self, Write as _};

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

/// 同層兄弟節點中的序位 (從 1 開始)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ordinal {
    /// 同標籤的兄弟節點中第 n 個 (`:nth-of-type`)
    OfType(usize),
    /// 所有兄弟元素中第 n 個 (`:nth-child`)
    Child(usize),
}

/// 路徑中的一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    tag: Option<&'static str>,
    id: Option<&'static str>,
    class: Option<&'static str>,
    ordinal: Option<Ordinal>,
}

impl Step {
    /// 第 n 個 `tag` 標籤
    pub const fn nth(tag: &'static str, n: usize) -> Self {
        Step {
            tag: Some(tag),
            id: None,
            class: None,
            ordinal: Some(Ordinal::OfType(n)),
        }
    }

    /// 父節點的第 n 個子元素，且標籤為 `tag`
    pub const fn nth_child(tag: &'static str, n: usize) -> Self {
        Step {
            tag: Some(tag),
            id: None,
            class: None,
            ordinal: Some(Ordinal::Child(n)),
        }
    }

    /// 以 id 錨定，例如 `#annual_income_statement`
    pub const fn id(id: &'static str) -> Self {
        Step {
            tag: None,
            id: Some(id),
            class: None,
            ordinal: None,
        }
    }

    /// 以 class 錨定，例如 `.D(tbrg)`
    pub const fn class(class: &'static str) -> Self {
        Step {
            tag: None,
            id: None,
            class: Some(class),
            ordinal: None,
        }
    }

    /// 加上 class 條件，例如 `tr.fi-row`
    pub const fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag {
            f.write_str(tag)?;
        }

        if let Some(id) = self.id {
            f.write_char('#')?;
            write_escaped(f, id)?;
        }

        if let Some(class) = self.class {
            f.write_char('.')?;
            write_escaped(f, class)?;
        }

        match self.ordinal {
            Some(Ordinal::OfType(n)) => write!(f, ":nth-of-type({})", n),
            Some(Ordinal::Child(n)) => write!(f, ":nth-child({})", n),
            None => Ok(()),
        }
    }
}

/// 混淆過的 class 名稱常含有 `(`、`)` 等字元，需跳脫才能當 CSS 識別字
fn write_escaped(f: &mut fmt::Formatter<'_>, ident: &str) -> fmt::Result {
    for c in ident.chars() {
        if !(c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }

    Ok(())
}

/// 由根節點往下的位置路徑。第一步可在文件任意位置比對，之後每一步都是上一步的直接子節點。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorPath {
    steps: Vec<Step>,
}

impl SelectorPath {
    pub fn root(step: Step) -> Self {
        SelectorPath { steps: vec![step] }
    }

    pub fn child(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// 轉成 `scraper::Selector`
    pub fn compile(&self) -> Result<Selector> {
        let css = self.to_string();
        Selector::parse(&css)
            .map_err(|why| anyhow!("Failed to Selector::parse({}) because: {:?}", css, why))
    }
}

impl fmt::Display for SelectorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" > ")?;
            }
            write!(f, "{}", step)?;
        }

        Ok(())
    }
}

/// 依路徑找出所有符合的節點，路徑無法解析或比對不到時回傳空的 `Vec`
pub fn locate<'a>(document: &'a Html, path: &SelectorPath) -> Vec<ElementRef<'a>> {
    match path.compile() {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

/// 將比對結果序列化成 `[<td>..</td>, ..]` 的文字，沒有結果時為 `[]`
pub fn serialize(matches: &[ElementRef<'_>]) -> String {
    let mut out = String::from("[");
    for (i, element) in matches.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&element.html());
    }
    out.push(']');
    out
}

/// 第一個符合節點的文字內容 (已去除前後空白)
pub fn first_text(document: &Html, path: &SelectorPath) -> Option<String> {
    locate(document, path)
        .first()
        .map(|element| element.text().collect::<String>().trim().to_string())
}
