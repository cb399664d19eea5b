/// 出力ファイル名の接頭辞。
pub const FILE_PREFIX: &str = "AWS-Badge";
/// サニタイズ後に何も残らなかった場合の名前。
pub const FALLBACK_STEM: &str = "Guest";
/// サニタイズ後の名前の最大文字数。
pub const MAX_STEM_CHARS: usize = 50;

/// 名前をファイル名に使える文字列へ変換します。
///
/// 1. 前後の空白を除去
/// 2. 連続する空白を `-` 1文字に置換
/// 3. `[A-Za-z0-9-_]` 以外の文字を削除
/// 4. 先頭から50文字に切り詰め
pub fn sanitize_file_stem(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_STEM_CHARS)
        .collect()
}

/// バッジのファイル名 (`AWS-Badge-<名前>.png`) を作ります。
pub fn badge_file_name(name: &str) -> String {
    let stem = sanitize_file_stem(name);
    let stem = if stem.is_empty() {
        FALLBACK_STEM
    } else {
        stem.as_str()
    };
    format!("{}-{}.png", FILE_PREFIX, stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ada_lovelace_file_name() {
        assert_eq!(badge_file_name("Ada Lovelace"), "AWS-Badge-Ada-Lovelace.png");
    }

    #[test]
    fn empty_or_invalid_names_fall_back_to_guest() {
        assert_eq!(badge_file_name(""), "AWS-Badge-Guest.png");
        assert_eq!(badge_file_name("   "), "AWS-Badge-Guest.png");
        assert_eq!(badge_file_name("山田太郎!?"), "AWS-Badge-Guest.png");
    }

    #[test]
    fn whitespace_runs_collapse_to_a_single_hyphen() {
        assert_eq!(sanitize_file_stem("  Grace \t\n Hopper  "), "Grace-Hopper");
        // 空白の置換は不正文字の削除より先に行われる
        assert_eq!(sanitize_file_stem("José  María"), "Jos-Mara");
        assert_eq!(sanitize_file_stem("a @ b"), "a--b");
    }

    #[test]
    fn stem_is_truncated_to_fifty_characters() {
        let long = "x".repeat(80);
        assert_eq!(sanitize_file_stem(&long).len(), MAX_STEM_CHARS);
        let name = badge_file_name(&long);
        assert_eq!(name.len(), "AWS-Badge-".len() + 50 + ".png".len());
    }

    /// 様々な入力について、サニタイズが冪等で許可文字のみを含むことを確認します。
    #[test]
    fn sanitize_is_idempotent_and_restricted() {
        let long = "long name ".repeat(10);
        let inputs: [&str; 6] = [
            "Ada Lovelace",
            "  multiple   spaces here ",
            "émoji 🎉 party_time-2024",
            "tabs\tand\nnewlines",
            "",
            long.as_str(),
        ];
        for input in inputs {
            let once = sanitize_file_stem(input);
            assert_eq!(sanitize_file_stem(&once), once, "input: {:?}", input);
            assert!(once.chars().count() <= MAX_STEM_CHARS);
            assert!(once
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }
}
