// rusttype を利用してTTF/OTFフォントのグリフ計測とラスタライズを行います。
use super::text::TextPainter;
use image::{Pixel, Rgba, RgbaImage};
use log::debug;
use rusttype::{point, Font, Scale};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// `--font` が指定されなかった場合に順番に探すフォントファイル。
///
/// 太字のサンセリフ体（Arial Bold 相当）を優先します。
pub const DEFAULT_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

#[derive(Debug, Error)]
pub enum FontError {
    #[error("フォントファイル '{path}' を読み込めません: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{0}' は有効なTTF/OTFフォントではありません")]
    Invalid(String),

    #[error("利用可能なフォントが見つかりませんでした。--font でフォントファイルを指定してください")]
    NotFound,
}

/// 名前の描画に使うフォント。
pub struct BadgeFont {
    font: Font<'static>,
    /// em の高さに対する (ascent - descent) の比率
    height_per_em: f32,
}

impl BadgeFont {
    /// フォントのバイト列から `BadgeFont` を作成します。
    ///
    /// # 引数
    /// * `data`: TTF/OTFファイルの内容。
    /// * `label`: エラーメッセージに使う識別名（通常はファイルパス）。
    pub fn from_bytes(data: Vec<u8>, label: &str) -> Result<Self, FontError> {
        let font = Font::try_from_vec(data).ok_or_else(|| FontError::Invalid(label.to_string()))?;
        let units_per_em = font.units_per_em();
        if units_per_em == 0 {
            return Err(FontError::Invalid(label.to_string()));
        }
        let v = font.v_metrics_unscaled();
        let height_per_em = (v.ascent - v.descent) / units_per_em as f32;
        Ok(Self {
            font,
            height_per_em,
        })
    }

    /// フォントを読み込みます。
    ///
    /// * `Some(path)`: 指定されたファイルを読み込みます。
    /// * `None`: `DEFAULT_FONT_CANDIDATES` から最初に見つかったファイルを使います。
    pub fn load(font_path: Option<&Path>) -> Result<Self, FontError> {
        match font_path {
            Some(path) => Self::load_file(path),
            None => {
                let found = DEFAULT_FONT_CANDIDATES
                    .iter()
                    .map(Path::new)
                    .find(|p| p.is_file())
                    .ok_or(FontError::NotFound)?;
                debug!("既定のフォントを使用します: {}", found.display());
                Self::load_file(found)
            }
        }
    }

    fn load_file(path: &Path) -> Result<Self, FontError> {
        let data = fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, &path.display().to_string())
    }

    /// Canvas の `px`（em の高さ）を rusttype の `Scale` に変換します。
    fn scale_for(&self, size_px: f32) -> Scale {
        Scale::uniform(size_px * self.height_per_em)
    }
}

impl TextPainter for BadgeFont {
    fn measure(&self, text: &str, size_px: f32) -> f32 {
        let scale = self.scale_for(size_px);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
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
        let scale = self.scale_for(size_px);
        let width = self.measure(text, size_px);
        let v = self.font.v_metrics(scale);
        // textBaseline = "middle" 相当: ascent と descent の中間を中心に合わせる
        let baseline = center_y + (v.ascent + v.descent) / 2.0;
        let origin = point(center_x - width / 2.0, baseline);

        let (canvas_w, canvas_h) = canvas.dimensions();
        for glyph in self.font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let x = bb.min.x + gx as i32;
                let y = bb.min.y + gy as i32;
                if x < 0 || y < 0 || x as u32 >= canvas_w || y as u32 >= canvas_h {
                    return;
                }
                let alpha = (color[3] as f32 * coverage).round() as u8;
                if alpha == 0 {
                    return;
                }
                let src = Rgba([color[0], color[1], color[2], alpha]);
                canvas.get_pixel_mut(x as u32, y as u32).blend(&src);
            });
        }
    }
}
