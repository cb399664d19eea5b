use image::{Rgba, RgbaImage};

/// 文字列の計測と描画を行う能力。
///
/// フォントサイズはすべて Canvas の `px` と同じく em の高さ（ピクセル）で指定します。
pub trait TextPainter {
    /// `size_px` で描いたときの文字列の横幅を返します。
    fn measure(&self, text: &str, size_px: f32) -> f32;

    /// `(center_x, center_y)` を中心として文字列を描画します。
    fn paint_centered(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        size_px: f32,
        center_x: f32,
        center_y: f32,
        color: Rgba<u8>,
    );
}

/// 最大サイズから1ずつ小さくし、横幅が `max_width` 以下に収まるサイズを返します。
///
/// 横幅がちょうど `max_width` の場合はそこで止まります。
/// 最小サイズでも収まらない場合は最小サイズを返します。
pub fn fit_font_size<P: TextPainter + ?Sized>(
    painter: &P,
    text: &str,
    max_width: f32,
    max_size: u32,
    min_size: u32,
) -> u32 {
    let mut size = max_size;
    let mut width = painter.measure(text, size as f32);
    while width > max_width && size > min_size {
        size -= 1;
        width = painter.measure(text, size as f32);
    }
    size
}
