//! 絵文字メタデータフィードのダウンロード機能
//!
//! このモジュールは、公開されている絵文字メタデータフィードを取得して検証する機能を提供します。

use std::io::Read;

use sha2::{Digest, Sha256};

use crate::errors::DownloadError;

/// デフォルトのフィードURL(GitHubのgemojiデータベース)
pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/github/gemoji/master/db/emoji.json";

/// レスポンスボディの最大サイズ(10 MiB)
pub const MAX_RESPONSE_SIZE: u64 = 10 << 20;

/// フィードをダウンロードし、そのボディを返します。
///
/// # 引数
///
/// * `url` - フィードのURL
/// * `max_bytes` - 受け入れるボディの最大バイト数
/// * `expected_sha256` - 指定された場合、ボディのSHA256(16進数)と照合します
///
/// # エラー
///
/// この関数は以下の場合にエラーを返します:
/// - リクエストが失敗した場合、またはステータスが成功でない場合。
/// - ボディが`max_bytes`を超える場合。
/// - チェックサムが一致しない場合。
pub fn fetch_feed(
    url: &str,
    max_bytes: u64,
    expected_sha256: Option<&str>,
) -> Result<Vec<u8>, DownloadError> {
    log::info!("fetching {url}");
    let response = reqwest::blocking::get(url)?;
    if !response.status().is_success() {
        return Err(DownloadError::HttpStatus(response.status()));
    }

    let data = read_limited(response, max_bytes)?;

    let actual = sha256_hex(&data);
    log::info!("fetched {} bytes (sha256: {actual})", data.len());

    if let Some(expected) = expected_sha256
        && !expected.eq_ignore_ascii_case(&actual)
    {
        return Err(DownloadError::HashMismatch {
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(data)
}

/// リーダーから最大`max_bytes`バイトを読み込みます。
///
/// # エラー
///
/// 読み込みに失敗した場合、またはデータが`max_bytes`を超える場合にエラーを返します。
fn read_limited<R: Read>(rdr: R, max_bytes: u64) -> Result<Vec<u8>, DownloadError> {
    // Reads one byte past the limit to tell a full body from a truncated one.
    let mut data = vec![];
    rdr.take(max_bytes.saturating_add(1)).read_to_end(&mut data)?;
    if data.len() as u64 > max_bytes {
        return Err(DownloadError::ResponseTooLarge(max_bytes));
    }
    Ok(data)
}

/// バイト列のSHA256を16進数文字列で返します。
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
