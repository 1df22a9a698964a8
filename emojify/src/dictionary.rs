//! 絵文字辞書モジュール。
//!
//! このモジュールは、小文字のフレーズから絵文字グリフの候補リストへの
//! 不変なマッピングと、そこから導出されるグリフ集合を提供します。
//! 主な機能として以下を提供します:
//!
//! - JSON形式(`{ "phrase": ["glyph", ...] }`)の辞書の読み込み
//! - rkyvによるバイナリ形式での辞書の書き出しと読み込み
//! - Zstandard圧縮辞書の展開
//! - ビルド時に埋め込まれたデフォルト辞書
//!
//! # 辞書の読み込み方法
//!
//! - [`Dictionary::embedded`]: バイナリに埋め込まれたデフォルト辞書
//! - [`Dictionary::from_path`]: ファイルパスから辞書を読み込む(形式は自動判別)
//! - [`Dictionary::from_json_reader`]: リーダーからJSON辞書を読み込む
//! - [`Dictionary::read`]: リーダーからバイナリ辞書を読み込む
//! - [`Dictionary::from_zstd`]: Zstandard圧縮されたバイナリ辞書を読み込む
//!
//! # 辞書のビルド
//!
//! [`DictionaryBuilder`]を使用して、絵文字メタデータフィードから辞書を構築できます。
pub mod builder;
#[cfg(feature = "download")]
#[cfg_attr(docsrs, doc(cfg(feature = "download")))]
pub mod fetch;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};

use hashbrown::{HashMap, HashSet};
use rkyv::rancor::Error;
use rkyv::util::AlignedVec;
use rkyv::{
    access, api::serialize_using, deserialize, ser::allocator::Arena, ser::sharing::Share,
    ser::writer::IoWriter, ser::Serializer, util::with_arena, Archive, Deserialize, Serialize,
};

use crate::errors::{DictionaryLoadError, EmojifyError, Result};

pub use crate::dictionary::builder::{DictionaryBuilder, GemojiRecord, Priority};

/// Emojify辞書を識別するマジックバイト。
///
/// この定数のバージョンは辞書フォーマットのバージョンを示しており、
/// クレートのセマンティックバージョンからは切り離されています。
pub const MODEL_MAGIC: &[u8] = b"EmojifyDictionaryRkyv 0.1\n";

const MODEL_MAGIC_LEN: usize = MODEL_MAGIC.len();
const RKYV_ALIGNMENT: usize = 16;
const PADDING_LEN: usize = (RKYV_ALIGNMENT - (MODEL_MAGIC_LEN % RKYV_ALIGNMENT)) % RKYV_ALIGNMENT;

/// ビルド時に埋め込まれるデフォルト辞書(JSON形式)。
static EMBEDDED_DICTIONARY: &[u8] = include_bytes!("../resources/emoji_map.json");

static EMBEDDED: OnceLock<Dictionary> = OnceLock::new();

/// 辞書の1エントリ。
///
/// `glyphs`の順序は意味を持ち、先頭が正準グリフ(置換に使われるグリフ)です。
#[derive(Archive, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// 小文字のフレーズ
    pub key: String,
    /// 優先度順の絵文字グリフ
    pub glyphs: Vec<String>,
}

/// バイナリ形式で永続化される辞書データ。
///
/// エントリはキー順に並べて保存されるため、同じ辞書からは常に同じバイト列が得られます。
#[derive(Archive, Serialize, Deserialize)]
struct RawDictionary {
    entries: Vec<RawEntry>,
}

/// [`Dictionary`]の内部データ。
struct DictionaryInner {
    entries: HashMap<String, Vec<String>>,
    glyphs: HashSet<String>,
}

/// 変換処理のための読み取り専用辞書。
///
/// フレーズから絵文字グリフの候補リストへのマッピングと、
/// すべてのグリフを含む集合を保持します。構築後は変更されないため、
/// クローンは内部データを共有し、複数スレッドから同時に参照できます。
#[derive(Clone)]
pub struct Dictionary {
    inner: Arc<DictionaryInner>,
}

impl Dictionary {
    /// エントリのイテレータから辞書を作成します。
    ///
    /// グリフ集合はここで一度だけ導出されます。
    ///
    /// # 引数
    ///
    /// * `entries` - `(フレーズ, グリフリスト)`のイテレータ
    ///
    /// # エラー
    ///
    /// 以下の場合に[`DictionaryLoadError::InvalidFormat`]を返します:
    /// - 空のキーが含まれる場合
    /// - 大文字を含むキーがある場合(入力は小文字化されてから照合されるため、一致しません)
    /// - 空のグリフリスト、または空のグリフが含まれる場合
    /// - 同じキーが複数回現れる場合(JSONからの読み込みでは最後の値が採用されるため発生しません)
    pub fn from_entries<I, K>(entries: I) -> Result<Self, DictionaryLoadError>
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        let iter = entries.into_iter();
        let mut map = HashMap::with_capacity(iter.size_hint().0);
        for (key, glyphs) in iter {
            let key = key.into();
            if key.is_empty() {
                return Err(DictionaryLoadError::invalid_format(
                    "entries",
                    "the dictionary includes an empty key.",
                ));
            }
            if key != key.to_lowercase() {
                return Err(DictionaryLoadError::invalid_format(
                    "entries",
                    format!("the key '{key}' is not lowercase."),
                ));
            }
            if glyphs.is_empty() || glyphs.iter().any(String::is_empty) {
                return Err(DictionaryLoadError::invalid_format(
                    "entries",
                    format!("the glyph list of '{key}' is empty or includes an empty glyph."),
                ));
            }
            if map.contains_key(&key) {
                return Err(DictionaryLoadError::invalid_format(
                    "entries",
                    format!("the key '{key}' appears more than once."),
                ));
            }
            map.insert(key, glyphs);
        }

        let glyphs = create_glyph_set(&map);
        log::debug!(
            "dictionary created with {} entries and {} distinct glyphs",
            map.len(),
            glyphs.len()
        );

        Ok(Self {
            inner: Arc::new(DictionaryInner {
                entries: map,
                glyphs,
            }),
        })
    }

    /// バイナリに埋め込まれたデフォルト辞書を返します。
    ///
    /// 辞書はプロセス内で最初の呼び出し時に一度だけパースされ、
    /// 以降の呼び出しでは同じデータが共有されます。
    ///
    /// # エラー
    ///
    /// 埋め込まれたデータがパースできない場合にエラーを返します。
    /// この場合は結果がキャッシュされません。
    pub fn embedded() -> Result<Self, DictionaryLoadError> {
        if let Some(dict) = EMBEDDED.get() {
            return Ok(dict.clone());
        }
        let dict = Self::from_json_slice(EMBEDDED_DICTIONARY)?;
        log::debug!("embedded dictionary loaded: {} entries", dict.len());
        Ok(EMBEDDED.get_or_init(|| dict).clone())
    }

    /// JSON形式の辞書をリーダーから読み込みます。
    ///
    /// # 引数
    ///
    /// * `rdr` - `{ "phrase": ["glyph", ...] }`形式のJSONを返すリーダー
    ///
    /// JSONオブジェクト内で同じキーが重複している場合は、最後の値が採用されます。
    ///
    /// # エラー
    ///
    /// 読み込みやパースに失敗した場合、または内容が不正な場合にエラーを返します。
    pub fn from_json_reader<R: Read>(rdr: R) -> Result<Self, DictionaryLoadError> {
        let map: BTreeMap<String, Vec<String>> = serde_json::from_reader(rdr)?;
        Self::from_entries(map)
    }

    /// JSON形式の辞書をバイト列から読み込みます。
    ///
    /// 重複したキーの扱いは[`Dictionary::from_json_reader`]と同じです。
    ///
    /// # エラー
    ///
    /// パースに失敗した場合、または内容が不正な場合にエラーを返します。
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, DictionaryLoadError> {
        let map: BTreeMap<String, Vec<String>> = serde_json::from_slice(bytes)?;
        Self::from_entries(map)
    }

    /// バイナリ形式の辞書をリーダーから読み込みます。
    ///
    /// 入力は[`Dictionary::write`]が出力した形式である必要があります。
    /// rkyvのアーカイブは読み込み時に検証されます。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - データを読み込めない場合。
    /// - マジックナンバーが一致しない場合。
    /// - アーカイブの検証に失敗した場合。
    pub fn read<R: Read>(mut rdr: R) -> Result<Self, DictionaryLoadError> {
        let mut magic = [0; MODEL_MAGIC_LEN];
        rdr.read_exact(&mut magic)?;
        if magic != MODEL_MAGIC {
            return Err(DictionaryLoadError::invalid_format(
                "rdr",
                "The magic number of the input dictionary mismatches.",
            ));
        }

        let mut padding_buf = vec![0; PADDING_LEN];
        rdr.read_exact(&mut padding_buf)?;

        let mut buffer = Vec::new();
        rdr.read_to_end(&mut buffer)?;

        let mut aligned_bytes = AlignedVec::<RKYV_ALIGNMENT>::with_capacity(buffer.len());
        aligned_bytes.extend_from_slice(&buffer);

        let archived = access::<ArchivedRawDictionary, Error>(&aligned_bytes)?;
        let raw: RawDictionary = deserialize::<RawDictionary, Error>(archived)?;

        Self::from_entries(raw.entries.into_iter().map(|e| (e.key, e.glyphs)))
    }

    /// Zstandard圧縮されたバイナリ辞書を読み込みます。
    ///
    /// # 引数
    ///
    /// * `path` - Zstandard圧縮辞書ファイルへのパス
    ///
    /// # エラー
    ///
    /// ファイルを開けない場合、有効なZstandardアーカイブでない場合、
    /// または展開されたデータが有効な辞書でない場合にエラーを返します。
    pub fn from_zstd<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryLoadError> {
        let decoder = zstd::Decoder::new(File::open(path.as_ref())?)?;
        Self::read(decoder)
    }

    /// ファイルパスから辞書を読み込みます。
    ///
    /// 形式は次の順で判別されます:
    ///
    /// | 条件 | 形式 |
    /// |------|------|
    /// | 拡張子が`zst` | Zstandard圧縮されたバイナリ辞書 |
    /// | 先頭が[`MODEL_MAGIC`] | バイナリ辞書 |
    /// | それ以外 | JSON辞書 |
    ///
    /// # エラー
    ///
    /// ファイルを読み込めない場合、または内容が不正な場合にエラーを返します。
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DictionaryLoadError> {
        let path = path.as_ref();
        if path.extension().is_some_and(|ext| ext == "zst") {
            log::debug!("loading zstd dictionary from {}", path.display());
            return Self::from_zstd(path);
        }

        let bytes = std::fs::read(path)?;
        if bytes.starts_with(MODEL_MAGIC) {
            log::debug!("loading binary dictionary from {}", path.display());
            Self::read(bytes.as_slice())
        } else {
            log::debug!("loading JSON dictionary from {}", path.display());
            Self::from_json_slice(&bytes)
        }
    }

    /// 辞書をrkyvフォーマットでライターにシリアライズします。
    ///
    /// 出力は[`Dictionary::read`]や[`Dictionary::from_path`]で読み込める形式です。
    ///
    /// # エラー
    ///
    /// この関数は以下の場合にエラーを返します:
    /// - 基礎となる`writer`への書き込みに失敗した場合(例: I/Oエラー)。
    /// - `rkyv`シリアライゼーションプロセスでエラーが発生した場合。
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        let raw = RawDictionary {
            entries: self
                .sorted_entries()
                .into_iter()
                .map(|(key, glyphs)| RawEntry {
                    key: key.to_string(),
                    glyphs: glyphs.to_vec(),
                })
                .collect(),
        };

        wtr.write_all(MODEL_MAGIC)?;

        let padding_bytes = vec![0xFF; PADDING_LEN];
        wtr.write_all(&padding_bytes)?;

        with_arena(|arena: &mut Arena| {
            let writer = IoWriter::new(&mut wtr);
            let mut serializer = Serializer::new(writer, arena.acquire(), Share::new());
            serialize_using::<_, Error>(&raw, &mut serializer)
        })
        .map_err(|e| EmojifyError::invalid_state("rkyv serialization failed", e.to_string()))?;

        Ok(())
    }

    /// 辞書を整形されたJSON(2スペースインデント、キー順)としてライターに書き出します。
    ///
    /// # エラー
    ///
    /// 書き込みに失敗した場合にエラーを返します。
    pub fn write_json<W>(&self, wtr: W) -> Result<()>
    where
        W: Write,
    {
        let map: BTreeMap<&str, &[String]> = self.sorted_entries().into_iter().collect();
        serde_json::to_writer_pretty(wtr, &map)
            .map_err(|e| EmojifyError::invalid_state("JSON serialization failed", e.to_string()))
    }

    /// フレーズに対応するグリフの候補リストを返します。
    #[inline(always)]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.inner.entries.get(key).map(Vec::as_slice)
    }

    /// フレーズに対応する正準グリフ(候補リストの先頭)を返します。
    #[inline(always)]
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.get(key)
            .and_then(|glyphs| glyphs.first())
            .map(String::as_str)
    }

    /// 文字列が辞書内のいずれかのグリフと一致するかを返します。
    #[inline(always)]
    pub fn is_glyph(&self, s: &str) -> bool {
        self.inner.glyphs.contains(s)
    }

    /// 1文字が辞書内のいずれかのグリフと一致するかを返します。
    #[inline(always)]
    pub fn is_glyph_char(&self, c: char) -> bool {
        let mut buf = [0; 4];
        self.is_glyph(c.encode_utf8(&mut buf))
    }

    /// エントリ数を返します。
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    /// エントリが1つもない場合に`true`を返します。
    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// 異なるグリフの数を返します。
    pub fn num_glyphs(&self) -> usize {
        self.inner.glyphs.len()
    }

    /// 単語数が最も多いキーを`(単語数, キー)`として返します。
    ///
    /// 単語数が同じキーが複数ある場合は、辞書順で最小のものを返します。
    pub fn longest_key(&self) -> Option<(usize, &str)> {
        self.inner
            .entries
            .keys()
            .map(|key| (key.split(' ').count(), key.as_str()))
            .max_by(|(n1, k1), (n2, k2)| n1.cmp(n2).then_with(|| k2.cmp(k1)))
    }

    /// すべてのエントリを順不同で返すイテレータ。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.inner
            .entries
            .iter()
            .map(|(key, glyphs)| (key.as_str(), glyphs.as_slice()))
    }

    fn sorted_entries(&self) -> Vec<(&str, &[String])> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("entries", &self.len())
            .field("glyphs", &self.num_glyphs())
            .finish()
    }
}

fn create_glyph_set(entries: &HashMap<String, Vec<String>>) -> HashSet<String> {
    let capacity = entries.values().map(Vec::len).sum();
    let mut result = HashSet::with_capacity(capacity);
    for glyphs in entries.values() {
        for glyph in glyphs {
            result.insert(glyph.clone());
        }
    }
    result
}
