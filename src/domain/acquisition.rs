//! テンプレート画像とユーザー写真の取得を行うモジュール。
//!
//! ファイルの読み込みとデコードはすべて非同期タスクとして表現され、
//! 呼び出し側は `.await` で順番に合成します。

use crate::presenter::UserNotice;
use image::{ImageFormat, RgbaImage};
use log::debug;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::task::JoinError;

/// アップロードできる写真の最大サイズ (5MB)。
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const UNKNOWN_MIME_TYPE: &str = "application/octet-stream";

/// ユーザーが選択したファイルのメタデータ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// 選択ファイルの検証で拒否された理由。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("画像ではないファイルです (MIMEタイプ: {0})")]
    NotAnImage(String),

    #[error("ファイルサイズ {size} バイトが上限 {limit} バイトを超えています")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error(transparent)]
    Rejected(#[from] UploadRejection),

    #[error("ファイルの読み込みに失敗しました: {0}")]
    Read(#[from] std::io::Error),

    #[error("画像のデコードに失敗しました: {0}")]
    Decode(#[from] image::ImageError),

    #[error("デコードタスクが異常終了しました: {0}")]
    Task(#[from] JoinError),
}

impl AcquisitionError {
    /// ユーザーに表示する通知に変換します。
    pub fn notice(&self) -> UserNotice {
        match self {
            AcquisitionError::Rejected(UploadRejection::NotAnImage(_)) => {
                UserNotice::InvalidImageType
            }
            AcquisitionError::Rejected(UploadRejection::TooLarge { .. }) => {
                UserNotice::ImageTooLarge
            }
            AcquisitionError::Read(_) => UserNotice::FileReadFailed,
            AcquisitionError::Decode(_) | AcquisitionError::Task(_) => {
                UserNotice::ImageDecodeFailed
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("テンプレート '{path}' を読み込めません: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("テンプレート '{path}' のデコードに失敗しました: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: AcquisitionError,
    },
}

/// 拡張子から画像のMIMEタイプを推定します。判別できない場合は `application/octet-stream`。
pub fn mime_type_for(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME_TYPE)
}

impl SelectedFile {
    /// ファイルのメタデータを取得して `SelectedFile` を作成します。
    pub async fn from_path(path: &Path) -> Result<Self, AcquisitionError> {
        let metadata = tokio::fs::metadata(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            mime_type: mime_type_for(path).to_string(),
            size: metadata.len(),
        })
    }
}

/// MIMEタイプとサイズを検証します。ちょうど5MBのファイルは受け付けます。
pub fn validate_selection(file: &SelectedFile) -> Result<(), UploadRejection> {
    if !file.mime_type.starts_with("image/") {
        return Err(UploadRejection::NotAnImage(file.mime_type.clone()));
    }
    if file.size > MAX_UPLOAD_BYTES {
        return Err(UploadRejection::TooLarge {
            size: file.size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// 選択されたファイルの内容を読み込みます。
pub async fn read_selection(file: &SelectedFile) -> Result<Vec<u8>, AcquisitionError> {
    Ok(tokio::fs::read(&file.path).await?)
}

/// 画像のバイト列をブロッキングタスク上でRGBAにデコードします。
pub async fn decode_image(bytes: Vec<u8>) -> Result<RgbaImage, AcquisitionError> {
    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    Ok(decoded.to_rgba8())
}

/// バッジのテンプレート画像を読み込みます。
pub async fn load_template(path: &Path) -> Result<RgbaImage, TemplateError> {
    debug!("テンプレートを読み込み中: {}", path.display());
    let bytes = tokio::fs::read(path).await.map_err(|source| TemplateError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_image(bytes)
        .await
        .map_err(|source| TemplateError::Decode {
            path: path.to_path_buf(),
            source,
        })
}
