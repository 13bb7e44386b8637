use std::{env, time::Duration};

use anyhow::Result;
use strum::IntoEnumIterator;

use stock_fundamentals::{
    batch,
    config::{self, SETTINGS},
    crawler::HttpSource,
    declare::Metric,
    logging,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let args = env::args().skip(1).collect::<Vec<_>>().join(",");
    let mut stock_symbols = config::parse_symbols(&args);
    if stock_symbols.is_empty() {
        stock_symbols = SETTINGS.system.symbols.clone();
    }

    if stock_symbols.is_empty() {
        logging::error_console(
            "No stock symbols given. Pass them as arguments or set STOCK_SYMBOLS.".to_string(),
        );
        return Ok(());
    }

    logging::info_file_async(format!("Start collecting {:?}", stock_symbols));

    for metric in Metric::iter() {
        let map = batch::aggregate(&HttpSource, metric, stock_symbols.as_slice()).await;
        println!("{}: {}", metric, serde_json::to_string_pretty(&map)?);
    }

    logging::info_file_async("Finished".to_string());
    // 讓背景寫檔線程把記錄寫完
    tokio::time::sleep(Duration::from_millis(200)).await;

    Ok(())
}
