//! 端口
//!
//! 一个容量固定的出口队列。

use super::id::PortId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    pub id: PortId,
    pub bandwidth: u64,
    remain_bandwidth: u64,
}

impl Port {
    pub fn new(id: PortId, bandwidth: u64) -> Self {
        Self {
            id,
            bandwidth,
            remain_bandwidth: bandwidth,
        }
    }

    pub fn remain_bandwidth(&self) -> u64 {
        self.remain_bandwidth
    }

    /// 占用带宽：剩余不足时返回 false 且不修改。
    pub fn reserve(&mut self, bw: u64) -> bool {
        if bw > self.remain_bandwidth {
            return false;
        }
        self.remain_bandwidth -= bw;
        true
    }

    /// 归还带宽，上限为端口总带宽。
    pub fn release(&mut self, bw: u64) {
        self.remain_bandwidth = self.remain_bandwidth.saturating_add(bw).min(self.bandwidth);
    }
}
