//! 最長フレーズ優先の貪欲マッチングに基づくトークナイザー。
//!
//! このモジュールは、入力テキスト中のフレーズを辞書の正準グリフに置き換える
//! マッチング処理を提供します。
//!
//! # アルゴリズム
//!
//! 入力は小文字化された後、ウィンドウ幅 `w` を [`MAX_WINDOW_LEN`] から `1` まで
//! 減らしながら次の処理を繰り返します。
//!
//! 1. 現在の文字列を単一の空白で単語に分割します。
//! 2. 連続する `w` 個の単語を空白で連結したトークンを左から順に作ります。
//! 3. 各トークンについて、文字数が最小語長未満であれば読み飛ばし、
//!    辞書に存在すれば現在の文字列中の最初の出現を正準グリフで置き換えます。
//!
//! 長いウィンドウが先に処理されるため、長いフレーズが短いフレーズより優先されます。
//!
//! # 例
//!
//! ```
//! use emojify::{Dictionary, Tokenizer};
//!
//! let dict = Dictionary::from_json_slice(
//!     r#"{"apple": ["🍎"], "green apple": ["🍏"]}"#.as_bytes(),
//! )?;
//! let tokenizer = Tokenizer::new(dict).minimum_word_length(1);
//!
//! assert_eq!(tokenizer.replace("a green apple"), "a 🍏");
//! assert_eq!(tokenizer.glyphs("a green apple and an apple"), vec!["🍏", "🍎"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
use crate::Dictionary;

/// マッチングを試みる最大のフレーズ長(単語数)
pub const MAX_WINDOW_LEN: usize = 8;

/// 最小語長のデフォルト値(文字数)
pub const DEFAULT_MIN_WORD_LENGTH: usize = 4;

/// フレーズを辞書の絵文字グリフに置き換えるトークナイザー。
///
/// 辞書への参照は共有されるため、クローンは軽量です。
/// 構築後に状態が変わることはなく、複数スレッドから同時に使用できます。
#[derive(Clone, Debug)]
pub struct Tokenizer {
    dict: Dictionary,
    minimum_word_length: usize,
    max_window_len: usize,
}

impl Tokenizer {
    /// 新しいトークナイザーを作成します。
    ///
    /// 最小語長は [`DEFAULT_MIN_WORD_LENGTH`]、最大ウィンドウ幅は [`MAX_WINDOW_LEN`] です。
    ///
    /// # 引数
    ///
    /// * `dict` - マッチングに使用する辞書
    pub fn new(dict: Dictionary) -> Self {
        Self {
            dict,
            minimum_word_length: DEFAULT_MIN_WORD_LENGTH,
            max_window_len: MAX_WINDOW_LEN,
        }
    }

    /// 最小語長(文字数)を指定します。
    ///
    /// これより短いトークンは、辞書に存在しても置き換えられません。
    /// 長さは単語数ではなく文字数で数えます。
    pub const fn minimum_word_length(mut self, minimum_word_length: usize) -> Self {
        self.minimum_word_length = minimum_word_length;
        self
    }

    /// マッチングを試みる最大のフレーズ長(単語数)を指定します。
    ///
    /// `0` を指定するとデフォルト値 [`MAX_WINDOW_LEN`] に戻ります。
    pub const fn max_window_len(mut self, max_window_len: usize) -> Self {
        if max_window_len != 0 {
            self.max_window_len = max_window_len;
        } else {
            self.max_window_len = MAX_WINDOW_LEN;
        }
        self
    }

    /// 辞書への参照を取得します。
    #[inline(always)]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dict
    }

    /// 入力中のフレーズを正準グリフに置き換えた文字列を返します。
    ///
    /// 出力は全体が小文字化されます。同じウィンドウ幅の中では、トークンは左から順に処理され、
    /// 各トークンは現在の文字列中の最初の出現だけを置き換えます。
    pub fn replace(&self, input: &str) -> String {
        let mut current = input.to_lowercase();
        // Windows longer than the input yield no tokens.
        let num_words = current.split(' ').count();
        for window_len in (1..=self.max_window_len.min(num_words)).rev() {
            let tokens = combine_tokens(&current, window_len);
            for token in tokens {
                if token.chars().count() < self.minimum_word_length {
                    continue;
                }
                if let Some(glyph) = self.dict.canonical(&token) {
                    current = current.replacen(token.as_str(), glyph, 1);
                }
            }
        }
        current
    }

    /// 置換後の文字列に現れるグリフを出現順に返します。
    ///
    /// 重複は取り除かれません。
    pub fn glyphs(&self, input: &str) -> Vec<String> {
        extract_glyphs(&self.replace(input), &self.dict)
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// 文字列を単一の空白で分割し、連続する`num_words`個の単語を連結したトークンを返します。
///
/// トークンはウィンドウ全体の処理を始める前に作られるため、
/// 途中で文字列が置き換えられても同じウィンドウ内のトークンは変わりません。
fn combine_tokens(input: &str, num_words: usize) -> Vec<String> {
    if num_words == 0 {
        return vec![];
    }
    let words: Vec<&str> = input.split(' ').collect();
    words.windows(num_words).map(|w| w.join(" ")).collect()
}

/// 文字列中の辞書グリフを1文字ずつ走査して、出現順に返します。
pub(crate) fn extract_glyphs<'a>(input: &'a str, dict: &Dictionary) -> Vec<&'a str> {
    if input.is_empty() || dict.num_glyphs() == 0 {
        return vec![];
    }
    input
        .char_indices()
        .filter(|&(_, c)| dict.is_glyph_char(c))
        .map(|(i, c)| &input[i..i + c.len_utf8()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_combine_tokens() {
        assert_eq!(
            combine_tokens("a green apple", 2),
            vec!["a green", "green apple"]
        );
        assert_eq!(combine_tokens("a green apple", 3), vec!["a green apple"]);
        assert!(combine_tokens("a green apple", 4).is_empty());
        assert!(combine_tokens("a green apple", 0).is_empty());
    }

    #[test]
    fn test_combine_tokens_keeps_empty_words() {
        assert_eq!(combine_tokens("a  b", 1), vec!["a", "", "b"]);
        assert_eq!(combine_tokens("a  b", 3), vec!["a  b"]);
    }

    #[test]
    fn test_replace_single_word() {
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(1);
        assert_eq!(tokenizer.replace("they ate an apple"), "they ate an 🍎");
    }

    #[test]
    fn test_replace_longest_first() {
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(1);
        assert_eq!(tokenizer.replace("a green apple"), "a 🍏");
    }

    #[test]
    fn test_replace_multi() {
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(1);
        assert_eq!(
            tokenizer.replace("an apple and a pineapple"),
            "an 🍎 and a 🍍"
        );
        assert_eq!(
            tokenizer.replace("they ate an apple and a green apple and a pineapple"),
            "they ate an 🍎 and a 🍏 and a 🍍"
        );
    }

    #[test]
    fn test_replace_first_occurrence_only() {
        // The first token "apple" replaces the first occurrence, and the second
        // token "apple" then replaces the next one.
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(1);
        assert_eq!(tokenizer.replace("apple apple"), "🍎 🍎");
    }

    #[test]
    fn test_replace_substring_of_longer_word() {
        // Replacement targets the first textual occurrence, which may sit
        // inside another word.
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(1);
        assert_eq!(tokenizer.replace("pineapples apple"), "pine🍎s apple");
        assert_eq!(tokenizer.replace("pineapple apple"), "🍍 🍎");
    }

    #[test]
    fn test_replace_lowercases() {
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(1);
        assert_eq!(tokenizer.replace("An APPLE"), "an 🍎");
        assert_eq!(tokenizer.replace("Nothing Here"), "nothing here");
    }

    #[test]
    fn test_minimum_word_length() {
        let dict = Dictionary::from_json_slice(r#"{"ok": ["👌"]}"#.as_bytes()).unwrap();
        let tokenizer = Tokenizer::new(dict.clone()).minimum_word_length(10);
        assert_eq!(tokenizer.replace("this is ok"), "this is ok");

        let tokenizer = Tokenizer::new(dict).minimum_word_length(2);
        assert_eq!(tokenizer.replace("this is ok"), "this is 👌");
    }

    #[test]
    fn test_minimum_word_length_counts_chars() {
        // "café" is 4 characters but 5 bytes.
        let dict = Dictionary::from_json_slice(r#"{"café": ["☕"]}"#.as_bytes()).unwrap();
        let tokenizer = Tokenizer::new(dict.clone()).minimum_word_length(4);
        assert_eq!(tokenizer.replace("le café"), "le ☕");

        let tokenizer = Tokenizer::new(dict).minimum_word_length(5);
        assert_eq!(tokenizer.replace("le café"), "le café");
    }

    #[test]
    fn test_max_window_len() {
        let tokenizer = Tokenizer::new(fruits())
            .minimum_word_length(1)
            .max_window_len(1);
        assert_eq!(tokenizer.replace("a green apple"), "a green 🍎");

        let tokenizer = tokenizer.max_window_len(0);
        assert_eq!(tokenizer.replace("a green apple"), "a 🍏");
    }

    #[test]
    fn test_huge_window_is_bounded_by_input() {
        let tokenizer = Tokenizer::new(fruits())
            .minimum_word_length(1)
            .max_window_len(usize::MAX);
        assert_eq!(tokenizer.replace("an apple"), "an 🍎");
        assert_eq!(tokenizer.replace("a green apple"), "a 🍏");
        assert_eq!(tokenizer.replace(""), "");
    }

    #[test]
    fn test_glyphs() {
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(1);
        assert_eq!(
            tokenizer.glyphs("an apple and a pineapple"),
            vec!["🍎", "🍍"]
        );
        assert_eq!(tokenizer.glyphs("apple apple"), vec!["🍎", "🍎"]);
        assert!(tokenizer.glyphs("nothing here").is_empty());
    }

    #[test]
    fn test_extract_glyphs() {
        let dict = fruits();
        assert_eq!(extract_glyphs("x🍎y🍏🍎", &dict), vec!["🍎", "🍏", "🍎"]);
        assert!(extract_glyphs("", &dict).is_empty());
        assert!(extract_glyphs("😀", &dict).is_empty());
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::new(fruits()).minimum_word_length(0);
        assert_eq!(tokenizer.replace(""), "");
    }
}
