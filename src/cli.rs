use clap::Parser;
use std::path::PathBuf;

/// 顔写真をバッジのテンプレートに重ね、名前入りのPNG画像を作成するツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// バッジに使う写真のパス (5MB以下の画像ファイル)
    #[arg(short, long)]
    pub photo: Option<PathBuf>,

    /// バッジに表示する名前
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// バッジのテンプレート画像のパス
    #[arg(short, long, default_value = "badge.png")]
    pub template: PathBuf,

    /// 名前の描画に使うTTF/OTFフォントファイルのパス (オプション: デフォルトはシステムの太字フォント)
    #[arg(short, long)]
    pub font: Option<PathBuf>,

    /// PNGの出力先フォルダのパス (オプション: デフォルトはカレントディレクトリ)
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// メモリ上のPNGを使わず、data URL 経由で書き出す
    #[arg(long)]
    pub data_url_export: bool,
}
