//! ユーザーへの通知と画面遷移を抽象化するモジュール。
//!
//! バッジ生成のコアロジックは具体的なUIに依存せず、
//! このモジュールの `Presenter` トレイトを通じてのみユーザーとやり取りします。

use log::{error, info};
use std::fmt;

/// 画面（ページ）の識別子。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// 名前と写真を入力するフォーム画面。
    Form,
    /// 生成したバッジを確認・ダウンロードする画面。
    Preview,
}

impl Page {
    pub fn id(&self) -> &'static str {
        match self {
            Page::Form => "formPage",
            Page::Preview => "previewPage",
        }
    }
}

/// 入力フィールドの識別子。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
}

/// ユーザーに表示するメッセージの一覧。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserNotice {
    InvalidImageType,
    ImageTooLarge,
    ImageDecodeFailed,
    FileReadFailed,
    NameMissing,
    PhotoMissing,
    TemplateLoading,
    CanvasMissing,
    DownloadFailed,
    DownloadBlocked,
    DownloadSucceeded,
}

impl UserNotice {
    /// 表示用の文言を返します。
    pub fn message(&self) -> &'static str {
        match self {
            UserNotice::InvalidImageType => "⚠️ Please upload a valid image file",
            UserNotice::ImageTooLarge => "⚠️ Image size should be less than 5MB",
            UserNotice::ImageDecodeFailed => "⚠️ Failed to load image. Please try another image.",
            UserNotice::FileReadFailed => "⚠️ Failed to read file. Please try again.",
            UserNotice::NameMissing => "⚠️ Please enter your name",
            UserNotice::PhotoMissing => "⚠️ Please upload your photo",
            UserNotice::TemplateLoading => {
                "⚠️ Badge template is still loading. Please wait a moment and try again."
            }
            UserNotice::CanvasMissing => "⚠️ Badge canvas not found. Please try again.",
            UserNotice::DownloadFailed => {
                "⚠️ Download failed. Please try again or use a different browser."
            }
            UserNotice::DownloadBlocked => {
                "⚠️ Download failed. The output location may be blocking the download."
            }
            UserNotice::DownloadSucceeded => "✅ Badge downloaded successfully!",
        }
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// コアロジックから呼び出されるUI側の能力。
///
/// すべてのメソッドは失敗しません。表示に失敗してもセッションは継続します。
pub trait Presenter {
    /// エラーメッセージを表示します。
    fn notify_error(&mut self, message: &str);

    /// 成功メッセージを表示します。
    fn notify_success(&mut self, message: &str);

    /// 指定したページに切り替えます。
    fn show_page(&mut self, page: Page);

    /// 入力フィールドにフォーカスを戻します。
    fn focus_field(&mut self, _field: Field) {}

    /// 選択されたファイル名を表示します（デコード前）。
    fn show_selected_file(&mut self, _file_name: &str) {}

    /// デコード済み写真のプレビューを表示します。
    fn show_photo_preview(&mut self, _width: u32, _height: u32) {}
}

/// 端末向けの `Presenter` 実装。
///
/// エラーは標準エラー出力、成功は標準出力に書き出し、同時にログにも残します。
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for ConsolePresenter {
    fn notify_error(&mut self, message: &str) {
        error!("{}", message);
        eprintln!("{}", message);
    }

    fn notify_success(&mut self, message: &str) {
        info!("{}", message);
        println!("{}", message);
    }

    fn show_page(&mut self, page: Page) {
        info!("[画面遷移] {}", page.id());
    }

    fn focus_field(&mut self, field: Field) {
        info!("入力欄にフォーカスを戻します: {:?}", field);
    }

    fn show_selected_file(&mut self, file_name: &str) {
        println!("選択されたファイル: {}", file_name);
    }

    fn show_photo_preview(&mut self, width: u32, height: u32) {
        println!("写真を読み込みました ({}x{})", width, height);
    }
}
