//! 写真の取得からバッジの合成・書き出しまでの一連の流れを管理するモジュール。
//!
//! `BadgeComposer` はセッション状態を一つにまとめて保持し、
//! ユーザーへの通知はすべて `Presenter` を経由して行います。
//! どの失敗もパニックやエラーの伝播にはならず、通知を出したうえで直前の状態を保ちます。

use super::acquisition::{self, SelectedFile};
use super::badge_name::BadgeName;
use super::compositor::{compose, BadgeLayout, Canvas, CompositionReport, TextPainter};
use super::exporter::{badge_file_name, ExportReport, Exporter};
use super::session::{Photo, Session, TemplateState};
use crate::presenter::{Field, Page, Presenter, UserNotice};
use image::RgbaImage;
use log::{error, info, warn};
use std::path::Path;

pub struct BadgeComposer<T: TextPainter, P: Presenter> {
    layout: BadgeLayout,
    template: TemplateState,
    session: Session,
    canvas: Option<Canvas>,
    painter: T,
    presenter: P,
    exporter: Exporter,
}

impl<T: TextPainter, P: Presenter> BadgeComposer<T, P> {
    pub fn new(layout: BadgeLayout, painter: T, presenter: P, exporter: Exporter) -> Self {
        Self {
            layout,
            template: TemplateState::Loading,
            session: Session::new(),
            canvas: None,
            painter,
            presenter,
            exporter,
        }
    }

    // --- ゲッターメソッド ---

    pub fn session(&self) -> &Session {
        &self.session
    }
    pub fn template(&self) -> &TemplateState {
        &self.template
    }
    pub fn canvas(&self) -> Option<&RgbaImage> {
        self.canvas.as_ref().map(Canvas::image)
    }
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn set_template(&mut self, state: TemplateState) {
        self.template = state;
    }

    /// テンプレート画像を読み込みます。
    ///
    /// 失敗してもセッションは継続し、合成時は背景色で代用されます。
    pub async fn load_template(&mut self, path: &Path) -> bool {
        match acquisition::load_template(path).await {
            Ok(image) => {
                info!("テンプレートを読み込みました: {}", path.display());
                self.template = TemplateState::Ready(image);
                true
            }
            Err(e) => {
                error!("テンプレートの読み込みに失敗しました: {}", e);
                self.template = TemplateState::Failed;
                false
            }
        }
    }

    /// ユーザーが選択したファイルを検証・デコードし、次の合成に使う写真にします。
    ///
    /// # 戻り値
    /// * `true`: 写真が差し替えられた場合。
    /// * `false`: 拒否・読み込み失敗・デコード失敗の場合。以前の写真はそのまま残ります。
    pub async fn select_file(&mut self, path: &Path) -> bool {
        match self.acquire_photo(path).await {
            Ok(photo) => {
                info!(
                    "写真を読み込みました: {} ({}x{})",
                    photo.file_name,
                    photo.image.width(),
                    photo.image.height()
                );
                let (w, h) = photo.image.dimensions();
                self.session.replace_photo(photo);
                self.presenter.show_photo_preview(w, h);
                true
            }
            Err(e) => {
                warn!("'{}' を写真として使用できません: {}", path.display(), e);
                self.presenter.notify_error(e.notice().message());
                false
            }
        }
    }

    async fn acquire_photo(&mut self, path: &Path) -> Result<Photo, acquisition::AcquisitionError> {
        let file = SelectedFile::from_path(path).await?;
        acquisition::validate_selection(&file)?;
        self.presenter.show_selected_file(&file.file_name);

        let bytes = acquisition::read_selection(&file).await?;
        let image = acquisition::decode_image(bytes).await?;
        Ok(Photo {
            file_name: file.file_name,
            image,
        })
    }

    /// 入力を検証してバッジを合成し、プレビュー画面に切り替えます。
    ///
    /// 名前・写真・テンプレートの順に検証し、最初に見つかった問題だけを通知します。
    pub fn generate_and_preview(&mut self, raw_name: &str) -> Option<CompositionReport> {
        let name = match BadgeName::new(raw_name) {
            Ok(name) => name,
            Err(_) => {
                self.presenter.notify_error(UserNotice::NameMissing.message());
                self.presenter.focus_field(Field::Name);
                return None;
            }
        };
        if self.session.photo().is_none() {
            self.presenter.notify_error(UserNotice::PhotoMissing.message());
            return None;
        }
        if self.template.is_loading() {
            self.presenter.notify_error(UserNotice::TemplateLoading.message());
            return None;
        }

        self.session.set_name(name);
        let (Some(name), Some(photo)) = (self.session.name(), self.session.photo()) else {
            return None;
        };
        let canvas = self
            .canvas
            .get_or_insert_with(|| Canvas::for_layout(&self.layout));
        let report = compose(
            &self.layout,
            canvas,
            self.template.image(),
            &photo.image,
            name,
            &self.painter,
        );
        info!(
            "バッジを生成しました: 名前 '{}', フォントサイズ {}px",
            name, report.font_size
        );

        self.presenter.show_page(Page::Preview);
        Some(report)
    }

    /// 現在のキャンバスをPNGファイルとして書き出します。
    pub fn download(&mut self) -> Option<ExportReport> {
        // キャンバスは合成時に名前の確定と同時に作られる
        let (Some(canvas), Some(name)) = (self.canvas.as_ref(), self.session.name()) else {
            self.presenter.notify_error(UserNotice::CanvasMissing.message());
            return None;
        };

        let file_name = badge_file_name(name.as_str());
        match self.exporter.export(canvas.image(), &file_name) {
            Ok(report) => {
                info!(
                    "バッジを書き出しました: {} ({:?}, {} バイト)",
                    report.path.display(),
                    report.via,
                    report.bytes_written
                );
                self.presenter
                    .notify_success(UserNotice::DownloadSucceeded.message());
                Some(report)
            }
            Err(e) => {
                error!("バッジの書き出しに失敗しました: {}", e);
                self.presenter.notify_error(e.notice().message());
                None
            }
        }
    }
}
