use super::badge_name::BadgeName;
use image::RgbaImage;

/// テンプレート画像の読み込み状態。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TemplateState {
    #[default]
    Loading,
    Ready(RgbaImage),
    /// 読み込みに失敗した。合成時は背景色で代用される
    Failed,
}

impl TemplateState {
    pub fn is_loading(&self) -> bool {
        matches!(self, TemplateState::Loading)
    }

    /// 描画に使えるテンプレート画像。
    pub fn image(&self) -> Option<&RgbaImage> {
        match self {
            TemplateState::Ready(image) => Some(image),
            _ => None,
        }
    }
}

/// デコード済みのユーザー写真。
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    pub file_name: String,
    pub image: RgbaImage,
}

/// 1セッション分の入力状態。
///
/// 写真と名前は上書きされるだけで、履歴は持ちません。
#[derive(Debug, Default)]
pub struct Session {
    photo: Option<Photo>,
    name: Option<BadgeName>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn name(&self) -> Option<&BadgeName> {
        self.name.as_ref()
    }

    /// 写真を差し替えます。以前の写真は破棄されます。
    pub fn replace_photo(&mut self, photo: Photo) -> Option<Photo> {
        self.photo.replace(photo)
    }

    pub fn set_name(&mut self, name: BadgeName) {
        self.name = Some(name);
    }
}
