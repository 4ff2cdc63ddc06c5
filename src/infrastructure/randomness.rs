//! 随机源
//!
//! 金额、延迟、时间戳抖动统一走 `Randomness` 接口，测试中注入确定性实现

use rand::Rng;

/// 随机源契约
pub trait Randomness: Send + Sync {
    /// [min, max] 内的随机金额，保留 2 位小数
    fn transfer_amount(&self, min: f64, max: f64) -> f64;

    /// [min, max) 内的随机整数毫秒延迟
    fn delay_ms(&self, min: u64, max: u64) -> u64;

    /// [0, 0.01) 秒的时间戳抖动，用于降低相近时间戳的碰撞概率
    fn timestamp_jitter(&self) -> f64;
}

/// 生产实现：thread_rng
pub struct ThreadRandomness;

impl Randomness for ThreadRandomness {
    fn transfer_amount(&self, min: f64, max: f64) -> f64 {
        let raw = if min < max {
            rand::thread_rng().gen_range(min..max)
        } else {
            min
        };
        (raw * 100.0).round() / 100.0
    }

    fn delay_ms(&self, min: u64, max: u64) -> u64 {
        if min < max {
            rand::thread_rng().gen_range(min..max)
        } else {
            min
        }
    }

    fn timestamp_jitter(&self) -> f64 {
        rand::thread_rng().gen_range(0.0..0.01)
    }
}
