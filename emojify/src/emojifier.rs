//! テキストに絵文字を付けるためのファサード。
//!
//! [`Emojifier`]は戦略、最小語長、辞書をまとめて保持し、
//! 変換・絵文字の検出・抽出の3つの操作を提供します。

use std::path::PathBuf;

use crate::dictionary::Dictionary;
use crate::errors::{EmojifyError, Result};
use crate::strategy::Strategy;
use crate::tokenizer::{self, Tokenizer, DEFAULT_MIN_WORD_LENGTH, MAX_WINDOW_LEN};

/// 辞書の取得元
#[derive(Debug)]
enum DictionarySource {
    Embedded,
    Loaded(Dictionary),
    Path(PathBuf),
}

/// 戦略に従ってテキストに絵文字を付ける構造体。
///
/// 構築後は変更されないため、複数スレッドから同時に使用できます。
///
/// # 例
///
/// ```
/// use emojify::{Dictionary, Emojifier, Strategy};
///
/// let dict = Dictionary::from_json_slice(
///     r#"{"apple": ["🍎", "🍏"], "pineapple": ["🍍"]}"#.as_bytes(),
/// )?;
/// let emojifier = Emojifier::with_dictionary(Strategy::InsertAfter, 1, dict)?;
///
/// assert_eq!(
///     emojifier.transform("an apple and a pineapple"),
///     "an apple and a pineapple 🍎🍍",
/// );
/// assert!(emojifier.contains_emoji("a 🍍"));
/// assert_eq!(emojifier.extract_emojis("🍎 and 🍎"), vec!["🍎", "🍎"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug)]
pub struct Emojifier {
    strategy: Strategy,
    tokenizer: Tokenizer,
}

impl Emojifier {
    /// 埋め込み辞書を使用する新しいインスタンスを作成します。
    ///
    /// # 引数
    ///
    /// * `strategy` - 使用する戦略
    /// * `minimum_word_length` - 置換対象とするトークンの最小文字数
    ///
    /// # エラー
    ///
    /// `minimum_word_length`が負の場合は[`EmojifyError::InvalidConfiguration`]、
    /// 辞書を読み込めない場合は[`EmojifyError::DictionaryLoad`]を返します。
    pub fn new(strategy: Strategy, minimum_word_length: isize) -> Result<Self> {
        EmojifierBuilder::new()
            .strategy(strategy)
            .minimum_word_length(minimum_word_length)
            .build()
    }

    /// 指定された辞書を使用する新しいインスタンスを作成します。
    ///
    /// # エラー
    ///
    /// `minimum_word_length`が負の場合に[`EmojifyError::InvalidConfiguration`]を返します。
    pub fn with_dictionary(
        strategy: Strategy,
        minimum_word_length: isize,
        dict: Dictionary,
    ) -> Result<Self> {
        EmojifierBuilder::new()
            .strategy(strategy)
            .minimum_word_length(minimum_word_length)
            .dictionary(dict)
            .build()
    }

    /// デフォルト設定のインスタンスを作成します。
    ///
    /// 戦略は[`Strategy::Replace`]、最小語長は[`DEFAULT_MIN_WORD_LENGTH`]、
    /// 辞書は埋め込み辞書です。
    ///
    /// # エラー
    ///
    /// 埋め込み辞書を読み込めない場合にエラーを返します。
    pub fn try_default() -> Result<Self> {
        Self::new(Strategy::Replace, DEFAULT_MIN_WORD_LENGTH as isize)
    }

    /// 設定された戦略をテキストに適用します。
    pub fn transform(&self, text: &str) -> String {
        self.strategy.apply(text, &self.tokenizer)
    }

    /// テキストに辞書の絵文字が含まれている場合に`true`を返します。
    pub fn contains_emoji(&self, text: &str) -> bool {
        !self.extract_emojis(text).is_empty()
    }

    /// テキストに含まれる辞書の絵文字を出現順に返します。
    ///
    /// テキストは置換されずにそのまま走査され、重複も保持されます。
    pub fn extract_emojis<'a>(&self, text: &'a str) -> Vec<&'a str> {
        tokenizer::extract_glyphs(text, self.tokenizer.dictionary())
    }

    /// 設定されている戦略を返します。
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// 内部のトークナイザーを返します。
    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    /// 使用している辞書を返します。
    pub fn dictionary(&self) -> &Dictionary {
        self.tokenizer.dictionary()
    }
}

/// [`Emojifier`]を構築するビルダー。
///
/// 戦略は必須です。最小語長のデフォルトは[`DEFAULT_MIN_WORD_LENGTH`]、
/// 最大ウィンドウ幅のデフォルトは[`MAX_WINDOW_LEN`]、辞書のデフォルトは埋め込み辞書です。
#[derive(Debug)]
pub struct EmojifierBuilder {
    strategy: Option<Strategy>,
    minimum_word_length: isize,
    max_window_len: usize,
    source: DictionarySource,
}

impl Default for EmojifierBuilder {
    fn default() -> Self {
        Self {
            strategy: None,
            minimum_word_length: DEFAULT_MIN_WORD_LENGTH as isize,
            max_window_len: MAX_WINDOW_LEN,
            source: DictionarySource::Embedded,
        }
    }
}

impl EmojifierBuilder {
    /// 新しいビルダーを作成します。
    pub fn new() -> Self {
        Self::default()
    }

    /// 戦略を指定します。
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// 最小語長(文字数)を指定します。負の値は[`build`](Self::build)で拒否されます。
    pub fn minimum_word_length(mut self, minimum_word_length: isize) -> Self {
        self.minimum_word_length = minimum_word_length;
        self
    }

    /// マッチングを試みる最大のフレーズ長(単語数)を指定します。
    pub fn max_window_len(mut self, max_window_len: usize) -> Self {
        self.max_window_len = max_window_len;
        self
    }

    /// 読み込み済みの辞書を使用します。
    pub fn dictionary(mut self, dict: Dictionary) -> Self {
        self.source = DictionarySource::Loaded(dict);
        self
    }

    /// [`build`](Self::build)の際に指定されたパスから辞書を読み込みます。
    ///
    /// 形式は[`Dictionary::from_path`]と同様に自動判別されます。
    pub fn dictionary_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.source = DictionarySource::Path(path.into());
        self
    }

    /// 設定を検証し、[`Emojifier`]を構築します。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - 戦略が指定されていない場合([`EmojifyError::InvalidConfiguration`])。
    /// - 最小語長が負の場合([`EmojifyError::InvalidConfiguration`])。
    /// - 最大ウィンドウ幅が`0`の場合([`EmojifyError::InvalidConfiguration`])。
    /// - 辞書を読み込めない、またはパースできない場合([`EmojifyError::DictionaryLoad`])。
    pub fn build(self) -> Result<Emojifier> {
        let strategy = self.strategy.ok_or_else(|| {
            EmojifyError::invalid_configuration("strategy", "strategy cannot be unset")
        })?;
        let minimum_word_length = usize::try_from(self.minimum_word_length).map_err(|_| {
            EmojifyError::invalid_configuration(
                "minimum_word_length",
                format!(
                    "minimum_word_length cannot be negative, got: {}",
                    self.minimum_word_length
                ),
            )
        })?;
        if self.max_window_len == 0 {
            return Err(EmojifyError::invalid_configuration(
                "max_window_len",
                "max_window_len must be at least 1",
            ));
        }

        let dict = match self.source {
            DictionarySource::Embedded => Dictionary::embedded()?,
            DictionarySource::Loaded(dict) => dict,
            DictionarySource::Path(path) => Dictionary::from_path(path)?,
        };

        let tokenizer = Tokenizer::new(dict)
            .minimum_word_length(minimum_word_length)
            .max_window_len(self.max_window_len);

        Ok(Emojifier {
            strategy,
            tokenizer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::DictionaryLoadError;

    fn fruits() -> Dictionary {
        Dictionary::from_json_slice(
            r#"{
                "apple": ["🍎", "🍏"],
                "green apple": ["🍏"],
                "pineapple": ["🍍"]
            }"#
            .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_unset_strategy() {
        let result = EmojifierBuilder::new().dictionary(fruits()).build();
        match result {
            Err(EmojifyError::InvalidConfiguration(e)) => assert_eq!(e.arg(), "strategy"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_negative_minimum_word_length() {
        let result = Emojifier::with_dictionary(Strategy::Replace, -1, fruits());
        match result {
            Err(EmojifyError::InvalidConfiguration(e)) => {
                assert_eq!(e.arg(), "minimum_word_length")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_zero_window() {
        let result = EmojifierBuilder::new()
            .strategy(Strategy::Replace)
            .max_window_len(0)
            .dictionary(fruits())
            .build();
        assert!(matches!(result, Err(EmojifyError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_huge_window() {
        let e = EmojifierBuilder::new()
            .strategy(Strategy::InsertAfter)
            .minimum_word_length(1)
            .max_window_len(20_000_000)
            .dictionary(fruits())
            .build()
            .unwrap();
        assert_eq!(e.transform("an apple"), "an apple 🍎");
    }

    #[test]
    fn test_missing_dictionary_file() {
        let result = EmojifierBuilder::new()
            .strategy(Strategy::Replace)
            .dictionary_path("/nonexistent/emoji_map.json")
            .build();
        assert!(matches!(
            result,
            Err(EmojifyError::DictionaryLoad(DictionaryLoadError::Io(_)))
        ));
    }

    #[test]
    fn test_configuration_checked_before_loading() {
        let result = EmojifierBuilder::new()
            .minimum_word_length(-4)
            .dictionary_path("/nonexistent/emoji_map.json")
            .build();
        assert!(matches!(result, Err(EmojifyError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_transform() {
        let e = Emojifier::with_dictionary(Strategy::Replace, 1, fruits()).unwrap();
        assert_eq!(e.transform("a green apple"), "a 🍏");
        assert_eq!(e.strategy(), Strategy::Replace);

        let e = Emojifier::with_dictionary(Strategy::InsertBefore, 1, fruits()).unwrap();
        assert_eq!(
            e.transform("an apple and a pineapple"),
            "🍎🍍 an apple and a pineapple"
        );
    }

    #[test]
    fn test_contains_emoji() {
        let e = Emojifier::with_dictionary(Strategy::Replace, 4, fruits()).unwrap();
        assert!(e.contains_emoji("what a delicious 🍎"));
        assert!(!e.contains_emoji("what a delicious apple"));
        assert!(!e.contains_emoji(""));
    }

    #[test]
    fn test_extract_emojis() {
        let e = Emojifier::with_dictionary(Strategy::Replace, 4, fruits()).unwrap();
        assert_eq!(e.extract_emojis("🍎 and 🍏, then 🍎"), vec!["🍎", "🍏", "🍎"]);
        assert!(e.extract_emojis("apple").is_empty());
    }

    #[test]
    fn test_default() {
        let e = Emojifier::try_default().unwrap();
        assert_eq!(e.strategy(), Strategy::Replace);
        assert!(!e.dictionary().is_empty());
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Emojifier>();
        assert_send_sync::<Dictionary>();
    }
}
