// --- 依存モジュール ---

use crate::presenter::UserNotice;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use log::{debug, warn};
use std::io::Write;
use std::path::PathBuf;
use tempfile::Builder;
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// 書き出しに使える経路。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMethod {
    /// メモリ上のPNG（blob）を優先し、失敗時は data URL に切り替える
    Auto,
    /// blob エンコードを使わず、最初から data URL 経路を使う
    DataUrlOnly,
}

/// 実際に書き出しに成功した経路。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportPath {
    Blob,
    DataUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub via: ExportPath,
    pub bytes_written: usize,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNGのエンコードに失敗しました: {0}")]
    Encode(#[from] image::ImageError),

    #[error("ファイルの書き込みに失敗しました: {0}")]
    Io(#[from] std::io::Error),

    #[error("data URL のデコードに失敗しました: {0}")]
    DataUrl(#[from] base64::DecodeError),

    #[error("data URL の形式が不正です")]
    MalformedDataUrl,

    #[error("代替経路での書き出しに失敗しました: {0}")]
    Fallback(#[source] Box<ExportError>),
}

impl ExportError {
    /// ユーザーに表示する通知に変換します。
    pub fn notice(&self) -> UserNotice {
        match self {
            ExportError::Fallback(_) => UserNotice::DownloadBlocked,
            _ => UserNotice::DownloadFailed,
        }
    }
}

/// blob 経路でキャンバスをバイト列に変換する関数。
pub type BlobEncoder = fn(&RgbaImage) -> Result<Vec<u8>, ExportError>;

/// キャンバスをPNGファイルとして出力ディレクトリに書き出す。
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    method: ExportMethod,
    encode_blob: BlobEncoder,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, method: ExportMethod) -> Self {
        Self {
            output_dir: output_dir.into(),
            method,
            encode_blob: encode_png,
        }
    }

    /// blob 経路のエンコーダーを差し替えます。デフォルトは [`encode_png`]。
    pub fn with_blob_encoder(mut self, encoder: BlobEncoder) -> Self {
        self.encode_blob = encoder;
        self
    }

    /// キャンバスを `file_name` で書き出します。
    ///
    /// blob 経路が使えない、または空のデータしか得られなかった場合は data URL 経路に切り替えます。
    /// どちらの経路でも、一時ファイルに書き込んでから最終的な名前へ移動するため、
    /// 書きかけのファイルが `file_name` として残ることはありません。
    pub fn export(&self, canvas: &RgbaImage, file_name: &str) -> Result<ExportReport, ExportError> {
        if self.method == ExportMethod::Auto {
            let blob = (self.encode_blob)(canvas)?;
            if !blob.is_empty() {
                let path = self.deliver(file_name, &blob)?;
                return Ok(ExportReport {
                    path,
                    via: ExportPath::Blob,
                    bytes_written: blob.len(),
                });
            }
            warn!("blob の作成に失敗したため data URL で書き出します");
        }
        self.export_via_data_url(canvas, file_name)
            .map_err(|e| ExportError::Fallback(Box::new(e)))
    }

    fn export_via_data_url(
        &self,
        canvas: &RgbaImage,
        file_name: &str,
    ) -> Result<ExportReport, ExportError> {
        let url = encode_data_url(canvas)?;
        let bytes = decode_data_url(&url)?;
        let path = self.deliver(file_name, &bytes)?;
        Ok(ExportReport {
            path,
            via: ExportPath::DataUrl,
            bytes_written: bytes.len(),
        })
    }

    /// 一時ファイル経由でアトミックに書き込みます。
    ///
    /// 失敗した場合、一時ファイルは `NamedTempFile` のドロップ時に削除されます。
    fn deliver(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        let mut temp = Builder::new()
            .prefix(".badge-")
            .suffix(".part")
            .tempfile_in(&self.output_dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;

        let target = self.output_dir.join(file_name);
        temp.persist(&target).map_err(|e| e.error)?;
        debug!("{} バイトを書き込みました: {}", bytes.len(), target.display());
        Ok(target)
    }
}

/// キャンバスをロスレスPNGとしてメモリ上にエンコードします。
pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, ExportError> {
    let (w, h) = canvas.dimensions();
    let mut blob = Vec::new();
    PngEncoder::new(&mut blob).write_image(canvas.as_raw(), w, h, ExtendedColorType::Rgba8)?;
    Ok(blob)
}

/// キャンバスを `data:image/png;base64,...` 形式の文字列にエンコードします。
pub fn encode_data_url(canvas: &RgbaImage) -> Result<String, ExportError> {
    let png = encode_png(canvas)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(png)))
}

/// PNGの data URL からバイト列を取り出します。
pub fn decode_data_url(url: &str) -> Result<Vec<u8>, ExportError> {
    let payload = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or(ExportError::MalformedDataUrl)?;
    Ok(STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::path::Path;
    use tempfile::tempdir;

    fn canvas() -> RgbaImage {
        RgbaImage::from_pixel(4, 3, Rgba([12, 34, 56, 255]))
    }

    fn leftover_temp_files(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".part"))
            .count()
    }

    #[test]
    fn blob_export_writes_a_decodable_png() {
        let dir = tempdir().expect("Failed to create temp directory");
        let exporter = Exporter::new(dir.path(), ExportMethod::Auto);

        let report = exporter.export(&canvas(), "AWS-Badge-Ada.png").unwrap();

        assert_eq!(report.via, ExportPath::Blob);
        assert_eq!(report.path, dir.path().join("AWS-Badge-Ada.png"));
        let written = image::open(&report.path).unwrap().to_rgba8();
        assert_eq!(written, canvas());
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    /// blob 経路が使えない場合でも、同じファイル名で書き出せることを確認します。
    #[test]
    fn data_url_export_produces_the_same_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let exporter = Exporter::new(dir.path(), ExportMethod::DataUrlOnly);

        let report = exporter.export(&canvas(), "AWS-Badge-Guest.png").unwrap();

        assert_eq!(report.via, ExportPath::DataUrl);
        assert_eq!(report.path, dir.path().join("AWS-Badge-Guest.png"));
        let written = image::open(&report.path).unwrap().to_rgba8();
        assert_eq!(written, canvas());
    }

    /// blob が空だった場合は data URL 経路に切り替わり、同じファイル名で書き出されます。
    #[test]
    fn empty_blob_falls_back_to_data_url() {
        let dir = tempdir().expect("Failed to create temp directory");
        let exporter =
            Exporter::new(dir.path(), ExportMethod::Auto).with_blob_encoder(|_| Ok(Vec::new()));

        let report = exporter.export(&canvas(), "AWS-Badge-Ada.png").unwrap();

        assert_eq!(report.via, ExportPath::DataUrl);
        assert_eq!(report.path, dir.path().join("AWS-Badge-Ada.png"));
        assert!(report.bytes_written > 0);
        let written = image::open(&report.path).unwrap().to_rgba8();
        assert_eq!(written, canvas());
        assert_eq!(leftover_temp_files(dir.path()), 0);
    }

    #[test]
    fn export_overwrites_an_existing_badge() {
        let dir = tempdir().expect("Failed to create temp directory");
        let target = dir.path().join("AWS-Badge-Ada.png");
        std::fs::write(&target, b"old").unwrap();

        let exporter = Exporter::new(dir.path(), ExportMethod::Auto);
        exporter.export(&canvas(), "AWS-Badge-Ada.png").unwrap();

        assert_ne!(std::fs::read(&target).unwrap(), b"old");
    }

    #[test]
    fn missing_output_directory_is_reported() {
        let dir = tempdir().expect("Failed to create temp directory");
        let exporter = Exporter::new(dir.path().join("missing"), ExportMethod::Auto);

        let err = exporter.export(&canvas(), "AWS-Badge-Ada.png").unwrap_err();
        // blob 経路の書き込みで失敗した場合は代替経路に進まない
        assert!(matches!(err, ExportError::Io(_)));
        assert_eq!(err.notice(), UserNotice::DownloadFailed);
    }

    #[test]
    fn fallback_failures_are_reported_as_blocked() {
        let dir = tempdir().expect("Failed to create temp directory");
        let exporter = Exporter::new(dir.path().join("missing"), ExportMethod::DataUrlOnly);

        let err = exporter.export(&canvas(), "AWS-Badge-Ada.png").unwrap_err();
        assert!(matches!(err, ExportError::Fallback(_)));
        assert_eq!(err.notice(), UserNotice::DownloadBlocked);
    }

    #[test]
    fn data_url_has_png_prefix_and_round_trips() {
        let url = encode_data_url(&canvas()).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let bytes = decode_data_url(&url).unwrap();
        assert_eq!(bytes, encode_png(&canvas()).unwrap());
    }

    #[test]
    fn decode_data_url_rejects_other_formats() {
        assert!(matches!(
            decode_data_url("data:image/jpeg;base64,AAAA"),
            Err(ExportError::MalformedDataUrl)
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,***"),
            Err(ExportError::DataUrl(_))
        ));
    }
}
