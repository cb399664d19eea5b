/// 写真を円に敷き詰めるための配置情報。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverPlacement {
    pub scale: f32,
    /// 拡大縮小後の幅と高さ（切り上げ済み）
    pub width: u32,
    pub height: u32,
    /// 拡大縮小後の写真の左上座標（キャンバス座標）
    pub left: f32,
    pub top: f32,
}

/// scale-to-cover の倍率を計算します。
///
/// 縦横比を保ったまま、幅・高さの両方が `diameter` 以上になる最小の倍率です。
pub fn cover_scale(diameter: f32, photo_width: u32, photo_height: u32) -> f32 {
    (diameter / photo_width as f32).max(diameter / photo_height as f32)
}

/// 中心 `(center_x, center_y)`、直径 `diameter` の円を隙間なく覆う配置を計算します。
pub fn cover_placement(
    center_x: f32,
    center_y: f32,
    diameter: f32,
    photo_width: u32,
    photo_height: u32,
) -> CoverPlacement {
    let scale = cover_scale(diameter, photo_width, photo_height);
    let scaled_w = photo_width as f32 * scale;
    let scaled_h = photo_height as f32 * scale;
    // 浮動小数点誤差で直径を下回らないよう切り上げる
    let width = (scaled_w.ceil() as u32).max(diameter.ceil() as u32).max(1);
    let height = (scaled_h.ceil() as u32).max(diameter.ceil() as u32).max(1);

    CoverPlacement {
        scale,
        width,
        height,
        left: center_x - width as f32 / 2.0,
        top: center_y - height as f32 / 2.0,
    }
}

/// ピクセル `(x, y)` が円にどれだけ覆われているか（0.0〜1.0）を返します。
///
/// ピクセル中心からの距離で境界1ピクセル分を線形に補間し、縁をアンチエイリアスします。
pub fn circle_coverage(x: u32, y: u32, center_x: f32, center_y: f32, radius: f32) -> f32 {
    let dx = x as f32 + 0.5 - center_x;
    let dy = y as f32 + 0.5 - center_y;
    let distance = (dx * dx + dy * dy).sqrt();
    (radius + 0.5 - distance).clamp(0.0, 1.0)
}
