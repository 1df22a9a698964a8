//! バイナリ辞書のビルドモジュール
//!
//! このモジュールは、JSON形式の絵文字マップから
//! バイナリ形式(rkyv)の辞書を構築する機能を提供します。
//! デフォルトではzstdで圧縮して出力します。

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use emojify::errors::{DictionaryLoadError, EmojifyError};
use emojify::Dictionary;

use clap::Parser;

/// ビルドコマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "build",
    about = "A program to build the binary dictionary from an emoji map."
)]
pub struct Args {
    /// Emoji map file (in JSON).
    #[clap(short = 'i', long)]
    dict_in: PathBuf,

    /// File to which the binary dictionary is output (in zstd unless --no-compress).
    #[clap(short = 'o', long)]
    dict_out: PathBuf,

    /// Writes the binary dictionary without compression.
    #[clap(long)]
    no_compress: bool,
}

/// ビルド処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 絵文字マップの読み込みエラー
    #[error("Loading the emoji map failed: {0}")]
    DictionaryLoad(#[from] DictionaryLoadError),

    /// 辞書の書き出しエラー
    #[error("Dictionary building failed: {0}")]
    Emojify(#[from] EmojifyError),
}

/// ビルドコマンドを実行する
///
/// 指定された絵文字マップを読み込み、バイナリ形式で出力します。
///
/// # 引数
///
/// * `args` - ビルドコマンドの引数
///
/// # エラー
///
/// ファイルの読み書きや辞書の検証に失敗した場合、`BuildError`を返します。
pub fn run(args: Args) -> Result<(), BuildError> {
    log::info!("Loading the emoji map...");
    let dict = Dictionary::from_path(&args.dict_in)?;
    log::info!(
        "{} entries, {} distinct glyphs",
        dict.len(),
        dict.num_glyphs()
    );

    log::info!("Writing the binary dictionary...");
    let file = File::create(&args.dict_out)?;
    if args.no_compress {
        let mut wtr = BufWriter::new(file);
        dict.write(&mut wtr)?;
        wtr.flush()?;
    } else {
        let mut encoder = zstd::Encoder::new(file, 19)?;
        dict.write(&mut encoder)?;
        encoder.finish()?;
    }

    log::info!(
        "Successfully built the dictionary to {}",
        args.dict_out.display()
    );
    Ok(())
}
