//! テキストに絵文字を付けるユーティリティ
//!
//! このバイナリは、標準入力から読み込んだテキストを1行ずつ処理し、
//! 指定された出力形式(text、extract、contains)で結果を出力します。

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use emojify::{EmojifierBuilder, Strategy, DEFAULT_MIN_WORD_LENGTH, MAX_WINDOW_LEN};

use clap::Parser;
use env_logger::Env;

/// 出力モード
#[derive(Clone, Debug)]
enum OutputMode {
    Text,
    Extract,
    Contains,
}

/// `OutputMode` の `FromStr` 実装
impl FromStr for OutputMode {
    type Err = &'static str;

    /// 文字列から出力モードをパースする
    ///
    /// # 引数
    ///
    /// * `mode` - パース対象の文字列("text"、"extract"、"contains"のいずれか)
    ///
    /// # 戻り値
    ///
    /// パースに成功した場合は対応する `OutputMode`、失敗した場合はエラーメッセージ
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "text" => Ok(Self::Text),
            "extract" => Ok(Self::Extract),
            "contains" => Ok(Self::Contains),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// コマンドライン引数
#[derive(Parser, Debug)]
#[clap(name = "transform", about = "Annotates text with emoji")]
struct Args {
    /// Dictionary file (JSON, binary, or binary in zstd). Uses the embedded one if omitted.
    #[clap(short = 'i', long)]
    dict: Option<PathBuf>,

    /// Strategy. Choices are replace, insert-before, and insert-after.
    #[clap(short = 's', long, default_value = "replace")]
    strategy: Strategy,

    /// Minimum number of characters of a phrase to be replaced.
    #[clap(short = 'm', long, default_value_t = DEFAULT_MIN_WORD_LENGTH as isize, allow_negative_numbers = true)]
    min_word_length: isize,

    /// Maximum number of words of a phrase to be matched.
    #[clap(short = 'w', long, default_value_t = MAX_WINDOW_LEN)]
    max_window_len: usize,

    /// Output mode. Choices are text, extract, and contains.
    #[clap(short = 'O', long, default_value = "text")]
    output_mode: OutputMode,
}

/// メイン関数
///
/// 辞書をロードし、標準入力から読み込んだテキストを変換して、
/// 指定された形式で結果を標準出力に出力します。
///
/// # 戻り値
///
/// 実行が成功した場合は `Ok(())`、エラーが発生した場合はエラー情報
fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    let mut builder = EmojifierBuilder::new()
        .strategy(args.strategy)
        .minimum_word_length(args.min_word_length)
        .max_window_len(args.max_window_len);
    if let Some(dict) = args.dict {
        log::info!("Loading the dictionary from {}", dict.display());
        builder = builder.dictionary_path(dict);
    }
    let emojifier = builder.build()?;

    log::info!(
        "Ready to transform (strategy={}, entries={})",
        emojifier.strategy(),
        emojifier.dictionary().len()
    );

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        match args.output_mode {
            OutputMode::Text => {
                out.write_all(emojifier.transform(&line).as_bytes())?;
                out.write_all(b"\n")?;
            }
            OutputMode::Extract => {
                out.write_all(emojifier.extract_emojis(&line).concat().as_bytes())?;
                out.write_all(b"\n")?;
            }
            OutputMode::Contains => {
                writeln!(&mut out, "{}", emojifier.contains_emoji(&line))?;
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
