//! 絵文字マップの生成モジュール
//!
//! このモジュールは、gemoji形式の絵文字メタデータフィードを取得(またはローカルファイルから読み込み)し、
//! キーワードから絵文字グリフ候補へのJSONマップを生成する機能を提供します。

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use emojify::dictionary::fetch::{self, DEFAULT_FEED_URL, MAX_RESPONSE_SIZE};
use emojify::errors::{DictionaryLoadError, DownloadError, EmojifyError};
use emojify::{Dictionary, DictionaryBuilder};

use clap::Parser;
use tempfile::NamedTempFile;

/// 生成コマンドの引数
#[derive(Parser, Debug)]
#[clap(
    name = "generate",
    about = "A program to generate the emoji map from the gemoji feed."
)]
pub struct Args {
    /// File to which the emoji map is output (in JSON).
    #[clap(short = 'o', long)]
    output_path: PathBuf,

    /// URL of the feed. Defaults to the gemoji database on GitHub.
    #[clap(short = 'u', long)]
    url: Option<String>,

    /// Local copy of the feed. When given, nothing is downloaded.
    #[clap(short = 'f', long, conflicts_with = "url")]
    feed_in: Option<PathBuf>,

    /// Expected SHA256 of the feed (in hex).
    #[clap(long)]
    sha256: Option<String>,

    /// Maximum size of the downloaded feed in bytes.
    #[clap(long, default_value_t = MAX_RESPONSE_SIZE)]
    max_response_size: u64,
}

/// 生成処理中に発生する可能性のあるエラー
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// 入出力エラー
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// フィードのダウンロードエラー
    #[error("Feed download failed: {0}")]
    Download(#[from] DownloadError),

    /// フィードのパースまたは辞書の検証エラー
    #[error("Emoji map generation failed: {0}")]
    DictionaryLoad(#[from] DictionaryLoadError),

    /// 辞書の書き出しエラー
    #[error("Writing the emoji map failed: {0}")]
    Emojify(#[from] EmojifyError),

    /// 一時ファイルの移動に失敗
    #[error("Failed to persist the emoji map: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// ローカルフィードのチェックサム不一致
    #[error("Feed checksum mismatch: expected {expected}, got {actual}.")]
    HashMismatch {
        /// 期待されたSHA256
        expected: String,
        /// 実際のSHA256
        actual: String,
    },
}

/// 生成コマンドを実行する
///
/// フィードから辞書を構築し、整形されたJSONとして出力します。
/// 最後に、単語数が最も多いキーをログに出力します。
///
/// # 引数
///
/// * `args` - 生成コマンドの引数
///
/// # エラー
///
/// フィードの取得、パース、書き出しに失敗した場合、`GenerateError`を返します。
pub fn run(args: Args) -> Result<(), GenerateError> {
    let feed = match &args.feed_in {
        Some(path) => {
            log::info!("Reading the feed from {}", path.display());
            let data = fs::read(path)?;
            verify_checksum(&data, args.sha256.as_deref())?;
            data
        }
        None => fetch::fetch_feed(
            args.url.as_deref().unwrap_or(DEFAULT_FEED_URL),
            args.max_response_size,
            args.sha256.as_deref(),
        )?,
    };

    log::info!("Generating the emoji map...");
    let dict = generate_dictionary(&feed)?;

    write_json_atomically(&dict, &args.output_path)?;
    log::info!(
        "emoji map generated and stored at: {}",
        args.output_path.display()
    );

    if let Some((num_words, key)) = dict.longest_key() {
        log::info!("longest key '{key}' was '{num_words}' words long");
    }
    Ok(())
}

/// gemoji形式のフィードから辞書を構築する
///
/// # エラー
///
/// フィードがパースできない場合、または構築された辞書が不正な場合にエラーを返します。
pub fn generate_dictionary(feed: &[u8]) -> Result<Dictionary, GenerateError> {
    let builder = DictionaryBuilder::from_gemoji_slice(feed)?;
    log::info!("{} keys collected", builder.len());
    Ok(builder.build()?)
}

fn verify_checksum(data: &[u8], expected: Option<&str>) -> Result<(), GenerateError> {
    if let Some(expected) = expected {
        let actual = fetch::sha256_hex(data);
        if !expected.eq_ignore_ascii_case(&actual) {
            return Err(GenerateError::HashMismatch {
                expected: expected.to_string(),
                actual,
            });
        }
    }
    Ok(())
}

/// 同じディレクトリの一時ファイルに書き出してから移動する
fn write_json_atomically(dict: &Dictionary, output_path: &Path) -> Result<(), GenerateError> {
    let output_dir = match output_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(output_dir)?;

    let mut temp_file = NamedTempFile::new_in(output_dir)?;
    {
        let mut wtr = BufWriter::new(temp_file.as_file_mut());
        dict.write_json(&mut wtr)?;
        wtr.write_all(b"\n")?;
        wtr.flush()?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        temp_file
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    temp_file.persist(output_path)?;
    Ok(())
}
