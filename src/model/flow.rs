//! 流
//!
//! 一条待调度的传输请求：带宽需求、最早开始时刻和发送时长。

use super::id::FlowId;
use super::time::Tick;

#[derive(Debug, Clone, PartialEq)]
pub struct Flow {
    pub id: FlowId,
    pub bandwidth: u64,
    /// 最早可被接纳的时刻
    pub start_time: Tick,
    /// 发送所需的 tick 数
    pub send_time: u64,
    /// bandwidth / send_time，仅用于报告
    pub speed: f64,
    begin_time: Option<Tick>,
    end_time: Option<Tick>,
}

impl Flow {
    /// `send_time` 必须为正；加载阶段已校验。
    pub fn new(id: FlowId, bandwidth: u64, start_time: Tick, send_time: u64) -> Self {
        debug_assert!(send_time > 0, "send_time must be positive");
        Self {
            id,
            bandwidth,
            start_time,
            send_time,
            speed: bandwidth as f64 / send_time as f64,
            begin_time: None,
            end_time: None,
        }
    }

    pub fn begin_time(&self) -> Option<Tick> {
        self.begin_time
    }

    pub fn end_time(&self) -> Option<Tick> {
        self.end_time
    }

    pub fn is_admitted(&self) -> bool {
        self.begin_time.is_some()
    }

    /// 记录接纳时刻。每条流只能被接纳一次，重复调用返回 false 且不修改状态。
    pub fn admit(&mut self, at: Tick) -> bool {
        if self.is_admitted() {
            return false;
        }
        self.begin_time = Some(at);
        self.end_time = Some(at.saturating_add(self.send_time));
        true
    }
}
