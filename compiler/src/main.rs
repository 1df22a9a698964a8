//! 絵文字辞書コンパイラのメインエントリーポイント
//!
//! このモジュールは、絵文字辞書を生成・ビルドするためのサブコマンドを提供します。
//! メタデータフィードからのJSONマップの生成と、JSONマップからのバイナリ辞書の構築を
//! 統合したCLIツールです。

mod build;
mod generate;

use clap::Parser;
use env_logger::Env;
use thiserror::Error;

use crate::{build::BuildError, generate::GenerateError};

/// コマンドライン引数の構造体
///
/// `clap`を使用してコマンドライン引数をパースします。
#[derive(Parser, Debug)]
#[clap(name = "compile", version)]
struct Cli {
    /// 実行するサブコマンド
    #[clap(subcommand)]
    command: Command,
}

/// 利用可能なサブコマンド
#[derive(Parser, Debug)]
enum Command {
    /// メタデータフィードから絵文字マップを生成します
    ///
    /// gemoji形式のフィードを取得し、キーワードからグリフ候補へのJSONマップを出力します。
    Generate(generate::Args),

    /// 絵文字マップからバイナリ辞書を構築します
    Build(build::Args),
}

/// コンパイラの実行中に発生する可能性のあるエラー
///
/// 各サブコマンドで発生したエラーをラップします。
#[derive(Debug, Error)]
pub enum CompileError {
    /// 絵文字マップ生成中のエラー
    #[error(transparent)]
    GenerateError(#[from] GenerateError),
    /// 辞書ビルド中のエラー
    #[error(transparent)]
    BuildError(#[from] BuildError),
}

/// メイン関数
///
/// コマンドライン引数をパースし、指定されたサブコマンドを実行します。
///
/// # エラー
///
/// 各サブコマンドの実行中にエラーが発生した場合、そのエラーが返されます。
fn main() -> Result<(), CompileError> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => Ok(generate::run(args)?),
        Command::Build(args) => Ok(build::run(args)?),
    }
}
