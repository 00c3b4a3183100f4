//! 调度时钟
//!
//! 整数 tick 计数，与墙上时间无关。

use serde::{Deserialize, Serialize};

/// 调度时钟值（tick）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    pub fn next(self) -> Tick {
        Tick(self.0.saturating_add(1))
    }

    /// 单调前进：目标早于当前时刻时保持不变。返回前进的 tick 数。
    pub fn advance_to(&mut self, target: Tick) -> u64 {
        if target <= *self {
            return 0;
        }
        let skipped = target.0 - self.0;
        *self = target;
        skipped
    }

    pub fn saturating_add(self, ticks: u64) -> Tick {
        Tick(self.0.saturating_add(ticks))
    }
}

impl std::fmt::Display for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
