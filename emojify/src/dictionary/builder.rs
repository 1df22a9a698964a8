//! 辞書構築のためのビルダー
//!
//! このモジュールは、絵文字メタデータフィード(gemoji形式)から [`Dictionary`] を構築するための
//! ビルダーを提供します。

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::dictionary::Dictionary;
use crate::errors::DictionaryLoadError;

/// 絵文字メタデータフィードの1レコード。
///
/// フィードはこのレコードのJSON配列です。未知のフィールドは無視されます。
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct GemojiRecord {
    /// 絵文字グリフ
    #[serde(default)]
    pub emoji: String,
    /// 説明文
    #[serde(default)]
    pub description: String,
    /// 別名(ショートコード)
    #[serde(default)]
    pub aliases: Vec<String>,
    /// タグ
    #[serde(default)]
    pub tags: Vec<String>,
}

/// キーにグリフを追加する際の優先度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// 候補リストの先頭に挿入します(説明文と別名)。
    Canonical,
    /// 候補リストの末尾に追加します(タグ)。
    Fallback,
}

/// フィードのレコードから [`Dictionary`] を構築するビルダー
#[derive(Default, Debug)]
pub struct DictionaryBuilder {
    map: BTreeMap<String, Vec<String>>,
    skipped: usize,
}

impl DictionaryBuilder {
    /// 空のビルダーを作成します。
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }

    /// キーにグリフを追加します。
    ///
    /// キーは小文字化され、`_`は空白に置き換えられます。正規化後に空になるキーは無視されます。
    /// 同じキーに同じグリフが既に登録されている場合は何もしません。
    ///
    /// # 引数
    ///
    /// * `key` - 説明文、別名、またはタグ
    /// * `glyph` - 絵文字グリフ
    /// * `priority` - 候補リスト内での挿入位置
    pub fn add(&mut self, key: &str, glyph: &str, priority: Priority) {
        let key = normalize_key(key);
        if key.is_empty() || glyph.is_empty() {
            self.skipped += 1;
            return;
        }

        let glyphs = self.map.entry(key).or_default();
        if glyphs.iter().any(|g| g == glyph) {
            return;
        }
        match priority {
            Priority::Canonical => glyphs.insert(0, glyph.to_string()),
            Priority::Fallback => glyphs.push(glyph.to_string()),
        }
    }

    /// フィードの1レコードを追加します。
    ///
    /// 説明文と別名は [`Priority::Canonical`]、タグは [`Priority::Fallback`] として追加されます。
    pub fn add_record(&mut self, record: &GemojiRecord) {
        self.add(&record.description, &record.emoji, Priority::Canonical);
        for alias in &record.aliases {
            self.add(alias, &record.emoji, Priority::Canonical);
        }
        for tag in &record.tags {
            self.add(tag, &record.emoji, Priority::Fallback);
        }
    }

    /// JSON配列形式のフィードをリーダーから読み込みます。
    ///
    /// # エラー
    ///
    /// 読み込みやパースに失敗した場合にエラーを返します。
    pub fn from_gemoji_reader<R: Read>(rdr: R) -> Result<Self, DictionaryLoadError> {
        let records: Vec<GemojiRecord> = serde_json::from_reader(rdr)?;
        Ok(Self::from_records(&records))
    }

    /// JSON配列形式のフィードをバイト列から読み込みます。
    ///
    /// # エラー
    ///
    /// パースに失敗した場合にエラーを返します。
    pub fn from_gemoji_slice(bytes: &[u8]) -> Result<Self, DictionaryLoadError> {
        let records: Vec<GemojiRecord> = serde_json::from_slice(bytes)?;
        Ok(Self::from_records(&records))
    }

    /// レコードのスライスからビルダーを作成します。
    pub fn from_records(records: &[GemojiRecord]) -> Self {
        let mut b = Self::new();
        for record in records {
            b.add_record(record);
        }
        log::debug!(
            "{} records added, {} keys, {} empty keys skipped",
            records.len(),
            b.map.len(),
            b.skipped
        );
        b
    }

    /// 登録されているキーの数を返します。
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// キーが1つも登録されていない場合に`true`を返します。
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// 辞書を構築します。
    ///
    /// # エラー
    ///
    /// 辞書の検証に失敗した場合にエラーを返します。
    pub fn build(self) -> Result<Dictionary, DictionaryLoadError> {
        Dictionary::from_entries(self.map)
    }
}

fn normalize_key(key: &str) -> String {
    key.to_lowercase().replace('_', " ")
}
