use image::Rgba;

/// バッジのレイアウト定数をまとめた構造体。
///
/// 座標はすべてキャンバス座標系（左上原点、ピクセル単位）です。
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// テンプレートが使えない場合の背景色
    pub background: Rgba<u8>,
    pub photo: PhotoSlot,
    pub shadow: ShadowStyle,
    pub label: LabelSlot,
}

/// 写真を切り抜く円の位置と半径。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSlot {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
}

impl PhotoSlot {
    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }
}

/// 写真の円の周囲に描くドロップシャドウ。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    pub color: Rgba<u8>,
    /// Canvas の `shadowBlur` と同じ単位（ガウス分布の標準偏差の2倍）
    pub blur: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// 名前を描く位置と、フォントサイズ探索の範囲。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSlot {
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub max_width: f32,
    pub max_font_size: u32,
    pub min_font_size: u32,
    pub color: Rgba<u8>,
}

impl Default for BadgeLayout {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 800,
            background: Rgba([255, 255, 255, 255]),
            photo: PhotoSlot {
                center_x: 400.0,
                center_y: 438.0,
                radius: 145.0,
            },
            shadow: ShadowStyle {
                color: Rgba([149, 4, 135, 255]),
                blur: 20.0,
                offset_x: 0.0,
                offset_y: 5.0,
            },
            label: LabelSlot {
                anchor_x: 400.0,
                anchor_y: 612.0,
                max_width: 520.0,
                max_font_size: 34,
                min_font_size: 16,
                color: Rgba([255, 255, 255, 255]),
            },
        }
    }
}
