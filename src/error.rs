use crate::domain::compositor::FontError;
use thiserror::Error;

/// 起動時に発生し、バッジ生成を始められなくなるエラー。
///
/// 写真の検証や書き出しの失敗はユーザーへの通知で完結するため、ここには含まれません。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/Oエラーが発生しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("フォントの読み込みに失敗しました: {0}")]
    Font(#[from] FontError),
}
