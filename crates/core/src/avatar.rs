//! Stage avatars: each question position gets a generated portrait.

/// Number of distinct avatars before positions wrap around.
pub const AVATAR_POOL_SIZE: usize = 100;

const AVATAR_STYLE: &str = "adventurer";
const AVATAR_BACKGROUND: &str = "f5f1e8";

/// Seed used for the avatar at `index`.
#[must_use]
pub fn avatar_seed(index: usize) -> usize {
    index % AVATAR_POOL_SIZE
}

/// Image URL for the question at `index` (zero based).
#[must_use]
pub fn avatar_url(index: usize) -> String {
    format!(
        "https://api.dicebear.com/7.x/{AVATAR_STYLE}/svg?seed={seed}&backgroundColor={AVATAR_BACKGROUND}",
        seed = avatar_seed(index),
    )
}

/// The whole pool, in seed order. Handy for preloading.
#[must_use]
pub fn avatar_urls() -> Vec<String> {
    (0..AVATAR_POOL_SIZE).map(avatar_url).collect()
}
