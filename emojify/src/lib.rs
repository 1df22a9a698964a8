//! # Emojify
//!
//! Emojifyは、英語テキスト中の単語やフレーズを絵文字で注釈するためのライブラリです。
//!
//! ## 概要
//!
//! キーワードから絵文字グリフの候補リストへの辞書を使い、最長フレーズ優先の貪欲マッチングで
//! テキスト中のフレーズを見つけます。見つかったフレーズの扱いは[`Strategy`]で選択します。
//!
//! ## 主な機能
//!
//! - **3つの戦略**: その場での置換、テキストの前への挿入、テキストの後への挿入
//! - **絵文字の検出と抽出**: 辞書に含まれる絵文字の有無の判定と出現順の抽出
//! - **複数の辞書形式**: JSON、rkyv、zstd圧縮されたrkyv
//! - **辞書の生成**: gemoji形式のメタデータフィードからの辞書構築(`download`フィーチャーでフィードの取得も可能)
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use emojify::{Dictionary, EmojifierBuilder, Strategy};
//!
//! let dict = Dictionary::from_json_slice(
//!     r#"{"apple": ["🍎", "🍏"], "green apple": ["🍏"], "pineapple": ["🍍"]}"#.as_bytes(),
//! )?;
//!
//! let emojifier = EmojifierBuilder::new()
//!     .strategy(Strategy::Replace)
//!     .minimum_word_length(1)
//!     .dictionary(dict)
//!     .build()?;
//!
//! assert_eq!(emojifier.transform("they ate a green apple"), "they ate a 🍏");
//! assert_eq!(emojifier.transform("an apple and a pineapple"), "an 🍎 and a 🍍");
//! assert_eq!(emojifier.extract_emojis("I like 🍍!"), vec!["🍍"]);
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

/// 絵文字辞書とビルダー
pub mod dictionary;

/// 変換のファサード
pub mod emojifier;

/// エラー型の定義
pub mod errors;

/// 出力の戦略
pub mod strategy;

/// フレーズのマッチング
pub mod tokenizer;

#[cfg(test)]
mod tests;

// Re-exports
pub use dictionary::{Dictionary, DictionaryBuilder};
pub use emojifier::{Emojifier, EmojifierBuilder};
pub use strategy::Strategy;
pub use tokenizer::{Tokenizer, DEFAULT_MIN_WORD_LENGTH, MAX_WINDOW_LEN};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
