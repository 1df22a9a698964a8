//! Emojifyのテストモジュール群
//!
//! 変換の各戦略、辞書の読み込みと生成の動作を検証するテストを含みます。

mod loading;
