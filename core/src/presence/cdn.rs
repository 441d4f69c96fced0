//! CDN URL resolution for avatars, banners and emoji.
//!
//! Asset hashes prefixed `a_` are animated and resolve to `.gif`; everything
//! else resolves to `.png`.

fn asset_ext(hash: &str) -> &'static str {
    if hash.starts_with("a_") { "gif" } else { "png" }
}

/// Avatar image for a user. Always `.png` at size 128, matching the card.
pub fn avatar_url(base: &str, user_id: &str, hash: &str) -> String {
    format!("{base}/avatars/{user_id}/{hash}.png?size=128")
}

/// Profile banner at size 480; animated banners resolve to `.gif`.
pub fn banner_url(base: &str, user_id: &str, hash: &str) -> String {
    format!("{base}/banners/{user_id}/{hash}.{}?size=480", asset_ext(hash))
}

/// Custom-status emoji at size 20.
pub fn emoji_url(base: &str, emoji_id: &str, animated: bool) -> String {
    let ext = if animated { "gif" } else { "png" };
    format!("{base}/emojis/{emoji_id}.{ext}?size=20")
}
