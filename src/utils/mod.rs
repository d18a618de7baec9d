/// 短码字符集：A-Z a-z 0-9，共 62 个符号
pub const CODE_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 固定路由占用的首段路径，生成的短码不能与之重名
pub const RESERVED_CODES: [&str; 5] = ["api", "encurtar", "health", "metrics", "shorten"];

pub fn generate_random_code(length: usize) -> String {
    use std::iter;

    // 每个字符独立、均匀地从字符集中选取
    iter::repeat_with(|| CODE_ALPHABET[rand::random_range(0..CODE_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// 短码只允许字母和数字
#[inline]
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty() && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// 是否与固定路由冲突
#[inline]
pub fn is_reserved_short_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
