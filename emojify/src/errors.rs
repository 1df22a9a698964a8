//! エラー型の定義
//!
//! このモジュールは、Emojifyライブラリで使用されるすべてのエラー型を定義します。

use std::error::Error;
use std::fmt;

/// Emojify専用のResult型
///
/// エラー型としてデフォルトで[`EmojifyError`]を使用します。
pub type Result<T, E = EmojifyError> = std::result::Result<T, E>;

/// Emojifyのエラー型
///
/// このライブラリで発生する可能性のあるすべてのエラーを表現します。
/// 変換処理そのもの(`transform`など)は失敗しないため、
/// これらのエラーは構築時と辞書の読み書き時にのみ発生します。
#[derive(Debug, thiserror::Error)]
pub enum EmojifyError {
    /// 無効な設定エラー
    ///
    /// 戦略が指定されていない場合や、最小語長が負の場合に発生します。
    #[error(transparent)]
    InvalidConfiguration(InvalidConfigurationError),

    /// 辞書の読み込みエラー
    ///
    /// [`DictionaryLoadError`]のエラーバリアント。
    #[error(transparent)]
    DictionaryLoad(#[from] DictionaryLoadError),

    /// 無効な状態エラー
    ///
    /// [`InvalidStateError`]のエラーバリアント。
    #[error(transparent)]
    InvalidState(InvalidStateError),

    /// ダウンロードエラー
    ///
    /// [`DownloadError`]のエラーバリアント。
    /// `download`フィーチャーが有効な場合のみ利用可能です。
    #[cfg(feature = "download")]
    #[error(transparent)]
    Download(#[from] DownloadError),

    /// I/Oエラー
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EmojifyError {
    /// 無効な設定エラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - 設定項目の名前
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_configuration<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidConfiguration(InvalidConfigurationError {
            arg,
            msg: msg.into(),
        })
    }

    /// 無効な状態エラーを生成します
    ///
    /// # 引数
    ///
    /// * `msg` - エラーメッセージ
    /// * `cause` - エラーの原因
    pub(crate) fn invalid_state<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::InvalidState(InvalidStateError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }
}

/// 設定が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidConfigurationError {
    /// 設定項目の名前
    pub(crate) arg: &'static str,

    /// エラーメッセージ
    pub(crate) msg: String,
}

impl InvalidConfigurationError {
    /// 問題のある設定項目の名前を返します。
    pub fn arg(&self) -> &'static str {
        self.arg
    }
}

impl fmt::Display for InvalidConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidConfigurationError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidConfigurationError {}

/// 状態が無効な場合に使用されるエラー
#[derive(Debug)]
pub struct InvalidStateError {
    /// エラーメッセージ
    pub(crate) msg: String,

    /// エラーの根本原因
    pub(crate) cause: String,
}

impl fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidStateError: {}: {}", self.msg, self.cause)
    }
}

impl Error for InvalidStateError {}

/// 辞書の読み込みに関するエラー
///
/// 辞書ソースが読めない、またはパースできない場合に発生します。
#[derive(Debug, thiserror::Error)]
pub enum DictionaryLoadError {
    /// 辞書ソースの読み込みに失敗
    #[error("failed to read the dictionary source: {0}")]
    Io(#[from] std::io::Error),

    /// JSON形式の辞書のパースに失敗
    #[error("failed to parse the dictionary as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// 辞書の内容が不正
    ///
    /// 空のキー、空のグリフリスト、マジックナンバーの不一致などで発生します。
    #[error("InvalidFormatError: {arg}: {msg}")]
    InvalidFormat {
        /// フォーマット名
        arg: &'static str,
        /// エラーメッセージ
        msg: String,
    },

    /// rkyvアーカイブの検証またはシリアライゼーションに失敗
    #[error("rkyv archive error: {0}")]
    Rkyv(#[from] rkyv::rancor::Error),
}

impl DictionaryLoadError {
    /// 無効なフォーマットエラーを生成します
    ///
    /// # 引数
    ///
    /// * `arg` - フォーマット名
    /// * `msg` - エラーメッセージ
    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat {
            arg,
            msg: msg.into(),
        }
    }
}

/// ダウンロード関連のエラー
///
/// `download`フィーチャーが有効な場合のみ利用可能です。
/// 絵文字メタデータフィードの取得中に発生する可能性のあるエラーを表現します。
#[cfg(feature = "download")]
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// ネットワークリクエストの失敗
    #[error("Network request failed")]
    Request(#[from] reqwest::Error),

    /// I/Oエラー
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTPステータスエラー
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// レスポンスが上限サイズを超えた
    #[error("Response body exceeds the limit of {0} bytes.")]
    ResponseTooLarge(u64),

    /// ダウンロードしたフィードのチェックサム不一致
    #[error("Downloaded feed checksum mismatch: expected {expected}, got {actual}.")]
    HashMismatch {
        /// 期待されたSHA256
        expected: String,
        /// 実際のSHA256
        actual: String,
    },
}
