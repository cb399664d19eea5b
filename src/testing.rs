//! テスト専用のヘルパー。システムフォントや端末に依存せずにテストするために使います。

use crate::domain::compositor::TextPainter;
use crate::presenter::{Field, Page, Presenter};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};
use std::cell::Cell;

/// 1文字あたり `advance × サイズ` の幅を持つとみなす計測器。
///
/// 描画時は文字列の外接矩形を塗りつぶします。
pub struct FixedAdvancePainter {
    advance: f32,
    last_size: Cell<Option<f32>>,
}

impl FixedAdvancePainter {
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            last_size: Cell::new(None),
        }
    }

    /// 最後に描画したフォントサイズ。
    pub fn last_size(&self) -> Option<f32> {
        self.last_size.get()
    }
}

impl TextPainter for FixedAdvancePainter {
    fn measure(&self, text: &str, size_px: f32) -> f32 {
        text.chars().count() as f32 * size_px * self.advance
    }

    fn paint_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size_px: f32,
        center_x: f32,
        center_y: f32,
        color: Rgba<u8>,
    ) {
        self.last_size.set(Some(size_px));
        let width = self.measure(text, size_px);
        let (canvas_w, canvas_h) = canvas.dimensions();
        let x0 = (center_x - width / 2.0).max(0.0) as u32;
        let x1 = ((center_x + width / 2.0).max(0.0) as u32).min(canvas_w);
        let y0 = (center_y - size_px / 2.0).max(0.0) as u32;
        let y1 = ((center_y + size_px / 2.0).max(0.0) as u32).min(canvas_h);
        for y in y0..y1 {
            for x in x0..x1 {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}

/// 呼び出された内容をすべて記録する `Presenter`。
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub errors: Vec<String>,
    pub successes: Vec<String>,
    pub pages: Vec<Page>,
    pub focused: Vec<Field>,
    pub selected_files: Vec<String>,
    pub previews: Vec<(u32, u32)>,
}

impl Presenter for RecordingPresenter {
    fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn notify_success(&mut self, message: &str) {
        self.successes.push(message.to_string());
    }

    fn show_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    fn focus_field(&mut self, field: Field) {
        self.focused.push(field);
    }

    fn show_selected_file(&mut self, file_name: &str) {
        self.selected_files.push(file_name.to_string());
    }

    fn show_photo_preview(&mut self, width: u32, height: u32) {
        self.previews.push((width, height));
    }
}

/// 単色のPNGをメモリ上に作成します。
pub fn solid_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, color);
    let mut result = Vec::new();
    PngEncoder::new(&mut result)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgba8)
        .expect("PNGのエンコードに失敗");
    result
}
