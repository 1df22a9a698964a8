//! 埋め込み辞書を用いた基本的な使用例
//!
//! デフォルト設定(置換)と前方挿入の2つの戦略で同じ文を変換します。
//!
//! ```text
//! cargo run -p emojify --example basic_usage
//! ```

use emojify::{Emojifier, Strategy};
use env_logger::Env;

const MIN_WORD_LENGTH: isize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let input = "Music puts a smile on my face.";

    let emojifier = Emojifier::try_default()?;
    log::info!("{}", emojifier.transform(input));

    let emojifier = Emojifier::new(Strategy::InsertBefore, MIN_WORD_LENGTH)?;
    log::info!("{}", emojifier.transform(input));

    Ok(())
}
