//! 密码摘要与校验
//!
//! 库中已有的账号密码以 32 位小写十六进制 MD5 摘要存储（无盐），
//! 这里保持同样的算法和编码，以便旧数据可以直接登录。

use md5::{Digest, Md5};

/// 计算密码摘要
pub fn hash_password(password: &str) -> String {
    hex::encode(Md5::digest(password.as_bytes()))
}

/// 校验密码是否与存储的摘要一致
pub fn verify_password(password: &str, digest: &str) -> bool {
    hash_password(password) == digest
}
