use super::geometry::{circle_coverage, cover_placement, CoverPlacement};
use super::layout::{BadgeLayout, PhotoSlot, ShadowStyle};
use super::text::{fit_font_size, TextPainter};
use crate::domain::badge_name::BadgeName;
use image::imageops::{self, FilterType};
use image::{Pixel, Rgba, RgbaImage};

/// 合成結果を書き込む固定サイズのキャンバス。
///
/// 合成のたびに全体が上書きされ、履歴は持ちません。
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn for_layout(layout: &BadgeLayout) -> Self {
        Self::new(layout.canvas_width, layout.canvas_height)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// すべてのピクセルを透明にします。
    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }
}

/// 1回の合成で決まった値。ログやテストで利用します。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionReport {
    pub font_size: u32,
    pub placement: CoverPlacement,
    pub used_template: bool,
}

/// テンプレート・写真・名前からバッジを合成します。
///
/// 処理の順序:
/// 1. キャンバスを消去し、テンプレートをキャンバスサイズに拡大縮小して描画（なければ背景色で塗りつぶし）
/// 2. 写真の円の周囲にドロップシャドウを描画
/// 3. scale-to-cover で拡大縮小した写真を円でクリップして描画
/// 4. 収まる最大のフォントサイズで名前を中央揃えで描画
pub fn compose<P: TextPainter + ?Sized>(
    layout: &BadgeLayout,
    canvas: &mut Canvas,
    template: Option<&RgbaImage>,
    photo: &RgbaImage,
    name: &BadgeName,
    painter: &P,
) -> CompositionReport {
    canvas.clear();
    draw_background(layout, canvas, template);

    draw_shadow(&mut canvas.image, &layout.photo, &layout.shadow);
    let placement = draw_clipped_photo(&mut canvas.image, &layout.photo, photo);

    let label = &layout.label;
    let font_size = fit_font_size(
        painter,
        name.as_str(),
        label.max_width,
        label.max_font_size,
        label.min_font_size,
    );
    painter.paint_centered(
        &mut canvas.image,
        name.as_str(),
        font_size as f32,
        label.anchor_x,
        label.anchor_y,
        label.color,
    );

    CompositionReport {
        font_size,
        placement,
        used_template: template.is_some(),
    }
}

fn draw_background(layout: &BadgeLayout, canvas: &mut Canvas, template: Option<&RgbaImage>) {
    let (w, h) = canvas.dimensions();
    match template {
        Some(template) if template.dimensions() == (w, h) => {
            imageops::overlay(&mut canvas.image, template, 0, 0);
        }
        Some(template) => {
            let scaled = imageops::resize(template, w, h, FilterType::Triangle);
            imageops::overlay(&mut canvas.image, &scaled, 0, 0);
        }
        None => {
            for pixel in canvas.image.pixels_mut() {
                *pixel = layout.background;
            }
        }
    }
}

/// 円形の影をぼかして描画します。
fn draw_shadow(canvas: &mut RgbaImage, slot: &PhotoSlot, shadow: &ShadowStyle) {
    let sigma = shadow.blur / 2.0;
    let pad = (sigma * 3.0).ceil() as u32 + 1;
    let side = (slot.diameter().ceil() as u32) + pad * 2;
    let local_center = side as f32 / 2.0;

    // 透明部分も影の色を持たせ、ぼかしでアルファだけが変化するようにする
    let base = Rgba([shadow.color[0], shadow.color[1], shadow.color[2], 0]);
    let mut layer = RgbaImage::from_pixel(side, side, base);
    for (x, y, pixel) in layer.enumerate_pixels_mut() {
        let coverage = circle_coverage(x, y, local_center, local_center, slot.radius);
        pixel[3] = (shadow.color[3] as f32 * coverage).round() as u8;
    }
    let layer = if sigma > 0.0 {
        imageops::blur(&layer, sigma)
    } else {
        layer
    };

    let left = (slot.center_x + shadow.offset_x - local_center).round() as i64;
    let top = (slot.center_y + shadow.offset_y - local_center).round() as i64;
    imageops::overlay(canvas, &layer, left, top);
}

/// 写真を円でクリップして描画し、使用した配置を返します。
fn draw_clipped_photo(canvas: &mut RgbaImage, slot: &PhotoSlot, photo: &RgbaImage) -> CoverPlacement {
    let (photo_w, photo_h) = photo.dimensions();
    let placement = cover_placement(
        slot.center_x,
        slot.center_y,
        slot.diameter(),
        photo_w,
        photo_h,
    );

    let (canvas_w, canvas_h) = canvas.dimensions();
    let x0 = (slot.center_x - slot.radius - 1.0).floor().max(0.0) as u32;
    let y0 = (slot.center_y - slot.radius - 1.0).floor().max(0.0) as u32;
    let x1 = ((slot.center_x + slot.radius + 1.0).ceil() as u32).min(canvas_w);
    let y1 = ((slot.center_y + slot.radius + 1.0).ceil() as u32).min(canvas_h);
    if x0 >= x1 || y0 >= y1 {
        return placement;
    }

    // 円の外接矩形に写る範囲だけを切り出して拡大縮小する。
    // 極端な縦横比の写真でも、確保する画像は外接矩形と同程度の大きさに収まる。
    let scale_x = placement.width as f32 / photo_w as f32;
    let scale_y = placement.height as f32 / photo_h as f32;
    let (src_x, src_w) = source_window(x0, x1, placement.left, scale_x, photo_w);
    let (src_y, src_h) = source_window(y0, y1, placement.top, scale_y, photo_h);
    let window = imageops::crop_imm(photo, src_x, src_y, src_w, src_h).to_image();
    let window_w = ((src_w as f32 * scale_x).ceil() as u32).max(1);
    let window_h = ((src_h as f32 * scale_y).ceil() as u32).max(1);
    let scaled = imageops::resize(&window, window_w, window_h, FilterType::CatmullRom);
    let origin_x = placement.left + src_x as f32 * scale_x;
    let origin_y = placement.top + src_y as f32 * scale_y;

    for y in y0..y1 {
        for x in x0..x1 {
            let coverage = circle_coverage(x, y, slot.center_x, slot.center_y, slot.radius);
            if coverage <= 0.0 {
                continue;
            }
            let sx = sample_index(x, origin_x, window_w);
            let sy = sample_index(y, origin_y, window_h);
            let mut src = *scaled.get_pixel(sx, sy);
            src[3] = (src[3] as f32 * coverage).round() as u8;
            let dst = canvas.get_pixel_mut(x, y);
            if src[3] == 255 {
                *dst = src;
            } else {
                dst.blend(&src);
            }
        }
    }
    placement
}

/// キャンバス上の区間 `[start, end)` に写る元画像の範囲を `(開始位置, 幅)` で返します。
///
/// 幅は常に1以上で、元画像の大きさ `len` を超えません。
fn source_window(start: u32, end: u32, origin: f32, scale: f32, len: u32) -> (u32, u32) {
    let first = ((start as f32 - origin) / scale).floor().max(0.0) as u32;
    let first = first.min(len - 1);
    let last = ((end as f32 - origin) / scale).ceil().max(0.0) as u32;
    let last = last.clamp(first + 1, len);
    (first, last - first)
}

/// キャンバス座標 `pos` に対応する拡大後の写真のピクセル位置。
fn sample_index(pos: u32, origin: f32, len: u32) -> u32 {
    let i = (pos as f32 + 0.5 - origin).floor();
    (i.max(0.0) as u32).min(len - 1)
}
