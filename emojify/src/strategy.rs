//! 出力の形を決める戦略。
//!
//! すべての戦略は同じ置換パス([`Tokenizer::replace`])を利用し、
//! その結果をどのように出力へ反映するかだけが異なります。

use std::fmt;
use std::str::FromStr;

use crate::tokenizer::Tokenizer;

/// 絵文字の付け方を表す戦略
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// 一致したフレーズをその場で正準グリフに置き換えます。
    #[default]
    Replace,
    /// 元のテキストの前に、見つかったグリフを付けます。
    InsertBefore,
    /// 元のテキストの後に、見つかったグリフを付けます。
    InsertAfter,
}

impl Strategy {
    /// 戦略を入力に適用します。
    ///
    /// `InsertBefore`と`InsertAfter`は元のテキストを変更せず、グリフとの間に空白を1つだけ挟みます。
    /// グリフが1つも見つからない場合も空白は残ります。
    pub fn apply(self, input: &str, tokenizer: &Tokenizer) -> String {
        match self {
            Self::Replace => tokenizer.replace(input),
            Self::InsertBefore => format!("{} {}", tokenizer.glyphs(input).concat(), input),
            Self::InsertAfter => format!("{} {}", input, tokenizer.glyphs(input).concat()),
        }
    }

    /// 戦略の名前を返します。
    pub const fn name(self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::InsertBefore => "insert-before",
            Self::InsertAfter => "insert-after",
        }
    }
}

impl FromStr for Strategy {
    type Err = &'static str;

    /// 文字列から戦略をパースする
    ///
    /// `replace`、`insert-before`、`insert-after`のいずれかを受け付けます。
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "replace" => Ok(Self::Replace),
            "insert-before" => Ok(Self::InsertBefore),
            "insert-after" => Ok(Self::InsertAfter),
            _ => Err("Could not parse a strategy"),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
