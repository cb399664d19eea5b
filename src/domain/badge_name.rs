use std::fmt; // エラーメッセージのフォーマットのために fmt モジュールを利用

/// バッジに描画される名前。
///
/// `new` コンストラクタを通じてのみインスタンス化でき、その際に以下の点が保証されます。
/// - 前後の空白が取り除かれていること
/// - 空文字列ではないこと
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeName(String);

/// `BadgeName` のインスタンス化時に発生する可能性のある検証エラー。
#[derive(Debug, PartialEq, Eq)]
pub enum BadgeNameError {
    /// トリム後の名前が空だった場合に返されるエラー。
    Empty,
}

impl BadgeName {
    /// 入力文字列をトリムし、空でなければ `BadgeName` を返します。
    pub fn new(raw: &str) -> Result<Self, BadgeNameError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(BadgeNameError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BadgeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BadgeNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadgeNameError::Empty => write!(f, "名前が空です。1文字以上入力してください。"),
        }
    }
}

impl std::error::Error for BadgeNameError {}
