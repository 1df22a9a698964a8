//! 辞書の読み込み機能に関するテスト
//!
//! JSON、rkyv、zstd圧縮されたrkyvの各形式の辞書ファイルを書き出し、
//! [`Dictionary::from_path`]による形式の判別と読み込みを検証します。

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::{tempdir, NamedTempFile};

use crate::dictionary::Dictionary;
use crate::emojifier::EmojifierBuilder;
use crate::errors::{DictionaryLoadError, EmojifyError};
use crate::strategy::Strategy;

const FRUITS_JSON: &str = include_str!("./resources/fruits.json");

fn fruits() -> Dictionary {
    Dictionary::from_json_slice(FRUITS_JSON.as_bytes()).unwrap()
}

fn assert_fruits(dict: &Dictionary) {
    assert_eq!(dict.len(), 3);
    assert_eq!(dict.get("apple").unwrap(), &["🍎", "🍏"]);
    assert_eq!(dict.get("green apple").unwrap(), &["🍏"]);
    assert_eq!(dict.get("pineapple").unwrap(), &["🍍"]);
    assert_eq!(dict.num_glyphs(), 3);
}

fn write_zstd(dict: &Dictionary, path: &Path) {
    let file = File::create(path).unwrap();
    let mut encoder = zstd::Encoder::new(file, 19).unwrap();
    dict.write(&mut encoder).unwrap();
    encoder.finish().unwrap();
}

#[test]
fn test_from_path_json() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FRUITS_JSON.as_bytes()).unwrap();
    let dict = Dictionary::from_path(file.path()).unwrap();
    assert_fruits(&dict);
}

#[test]
fn test_from_path_binary() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("emoji.dic");
    fruits().write(File::create(&path).unwrap()).unwrap();

    let dict = Dictionary::from_path(&path).unwrap();
    assert_fruits(&dict);
}

#[test]
fn test_from_path_zstd() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("emoji.dic.zst");
    write_zstd(&fruits(), &path);

    assert_fruits(&Dictionary::from_path(&path).unwrap());
    assert_fruits(&Dictionary::from_zstd(&path).unwrap());
}

#[test]
fn test_write_json_roundtrip_is_stable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("emoji_map.json");
    fruits().write_json(File::create(&path).unwrap()).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written.trim_end(), FRUITS_JSON.trim_end());
    assert_fruits(&Dictionary::from_path(&path).unwrap());
}

#[test]
fn test_from_path_missing() {
    let dir = tempdir().unwrap();
    let result = Dictionary::from_path(dir.path().join("missing.json"));
    assert!(matches!(result, Err(DictionaryLoadError::Io(_))));
}

#[test]
fn test_from_path_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"apple": ["#).unwrap();
    let result = Dictionary::from_path(file.path());
    assert!(matches!(result, Err(DictionaryLoadError::Json(_))));
}

#[test]
fn test_from_path_corrupted_zstd() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("emoji.dic.zst");
    fs::write(&path, b"not a zstd stream").unwrap();
    assert!(Dictionary::from_path(&path).is_err());
}

#[test]
fn test_builder_with_dictionary_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("emoji.dic.zst");
    write_zstd(&fruits(), &path);

    let emojifier = EmojifierBuilder::new()
        .strategy(Strategy::Replace)
        .minimum_word_length(1)
        .dictionary_path(&path)
        .build()
        .unwrap();
    assert_eq!(emojifier.transform("a green apple"), "a 🍏");
}

#[test]
fn test_builder_with_broken_dictionary() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"apple": []}"#).unwrap();
    let result = EmojifierBuilder::new()
        .strategy(Strategy::Replace)
        .dictionary_path(file.path())
        .build();
    assert!(matches!(
        result,
        Err(EmojifyError::DictionaryLoad(
            DictionaryLoadError::InvalidFormat { .. }
        ))
    ));
}
