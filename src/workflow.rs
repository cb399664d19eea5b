//! アプリケーションのメインワークフローを定義するモジュール。
//!
//! このモジュールは、UI層（`cli`）とドメイン層（`domain`）を仲介し、
//! 「アップロード → 検証 → プレビュー → 合成 → 書き出し」の流れを実装します。

use crate::cli::Args;
use badge_maker::domain::compositor::{BadgeFont, BadgeLayout};
use badge_maker::domain::exporter::{ExportMethod, Exporter};
use badge_maker::domain::BadgeComposer;
use badge_maker::error::AppError;
use badge_maker::presenter::{ConsolePresenter, Page, Presenter};
use log::info;
use std::fs;

/// アプリケーションのメインロジックを実行します。
///
/// # 戻り値
/// * `Ok(true)`: バッジが書き出された場合。
/// * `Ok(false)`: 入力の検証や書き出しに失敗した場合（理由はすでにユーザーに通知済み）。
/// * `Err(AppError)`: フォントや出力先が用意できず、処理を始められなかった場合。
pub async fn run(args: Args) -> Result<bool, AppError> {
    // 1. フォントと出力先の準備
    let font = BadgeFont::load(args.font.as_deref())?;
    if !args.output_dir.exists() {
        fs::create_dir_all(&args.output_dir)?;
    }
    let method = if args.data_url_export {
        ExportMethod::DataUrlOnly
    } else {
        ExportMethod::Auto
    };
    let exporter = Exporter::new(&args.output_dir, method);

    let mut presenter = ConsolePresenter::new();
    presenter.show_page(Page::Form);
    let mut composer = BadgeComposer::new(BadgeLayout::default(), font, presenter, exporter);

    // 2. テンプレートの読み込み（失敗しても続行する）
    composer.load_template(&args.template).await;

    // 3. 写真の選択
    if let Some(photo) = args.photo.as_deref() {
        info!("[写真の読み込み開始] {}", photo.display());
        composer.select_file(photo).await;
    }

    // 4. 合成とプレビュー
    if composer.generate_and_preview(&args.name).is_none() {
        return Ok(false);
    }

    // 5. 書き出し
    Ok(composer.download().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    fn args(dir: &Path, name: &str, photo: Option<PathBuf>, font: Option<PathBuf>) -> Args {
        Args {
            photo,
            name: name.to_string(),
            template: dir.join("badge.png"),
            font,
            output_dir: dir.join("out"),
            data_url_export: false,
        }
    }

    /// フォントが用意できない場合は、出力先を作る前にエラーで終了することを確認します。
    #[tokio::test]
    async fn missing_font_stops_before_any_output() {
        let dir = tempdir().expect("Failed to create temp directory");
        let font = dir.path().join("no_such_font.ttf");

        let result = run(args(dir.path(), "Ada", None, Some(font))).await;

        assert!(matches!(result, Err(AppError::Font(_))));
        assert!(!dir.path().join("out").exists());
    }

    #[tokio::test]
    async fn empty_name_exits_without_writing_a_badge() {
        if BadgeFont::load(None).is_err() {
            // システムフォントがない環境ではスキップ
            return;
        }
        let dir = tempdir().expect("Failed to create temp directory");

        let result = run(args(dir.path(), "  ", None, None)).await;

        assert!(matches!(result, Ok(false)));
        let written = fs::read_dir(dir.path().join("out")).unwrap().count();
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn photo_and_name_produce_the_badge_file() {
        if BadgeFont::load(None).is_err() {
            return;
        }
        let dir = tempdir().expect("Failed to create temp directory");
        let photo = dir.path().join("me.png");
        RgbaImage::from_pixel(40, 30, Rgba([200, 0, 0, 255]))
            .save(&photo)
            .unwrap();

        let result = run(args(dir.path(), "Ada Lovelace", Some(photo), None)).await;

        assert!(matches!(result, Ok(true)));
        let badge = dir.path().join("out").join("AWS-Badge-Ada-Lovelace.png");
        let written = image::open(&badge).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (800, 800));
        // テンプレートがないため背景は白
        assert_eq!(*written.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }
}
