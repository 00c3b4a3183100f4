//! 分配结果
//!
//! 每个端口的已接纳队列、按接纳顺序排列的放置记录以及统计信息。

use serde::{Deserialize, Serialize};

use crate::model::{Flow, FlowId, Port, PortId, Tick};

/// 一条放置记录：流在何时被放到哪个端口。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub flow_id: FlowId,
    pub port_id: PortId,
    pub start_send_time: Tick,
}

/// 单个端口的接纳队列。
#[derive(Debug, Clone)]
pub struct PortQueue {
    pub port: Port,
    pub weight: u64,
    /// 已接纳流的带宽之和
    pub committed: u64,
    /// 按接纳顺序
    pub flows: Vec<Flow>,
    /// 其中通过兜底路径强制接纳的数量
    pub forced: usize,
}

impl PortQueue {
    pub fn new(port: Port, weight: u64) -> Self {
        Self {
            port,
            weight,
            committed: 0,
            flows: Vec::new(),
            forced: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    pub fn has_headroom(&self) -> bool {
        self.committed < self.weight
    }
}

/// 调度统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocStats {
    pub admitted: usize,
    pub forced: usize,
    /// 时钟空转（无可接纳流）的 tick 数
    pub idle_ticks: u64,
    /// 最后一次接纳的时刻
    pub final_time: Tick,
    /// 所有已接纳流中最晚的结束时刻
    pub makespan: Tick,
}

#[derive(Debug, Clone)]
pub struct Allocation {
    pub queues: Vec<PortQueue>,
    pub placements: Vec<Placement>,
    pub stats: AllocStats,
}

impl Allocation {
    /// 没有流时的退化结果：每个端口一个空队列，配额为 0。
    pub fn empty(ports: Vec<Port>) -> Self {
        Self {
            queues: ports.into_iter().map(|p| PortQueue::new(p, 0)).collect(),
            placements: Vec::new(),
            stats: AllocStats::default(),
        }
    }

    pub fn queue_for(&self, port: PortId) -> Option<&PortQueue> {
        self.queues.iter().find(|q| q.port.id == port)
    }

    pub fn placement_of(&self, flow: FlowId) -> Option<&Placement> {
        self.placements.iter().find(|p| p.flow_id == flow)
    }

    /// 所有已接纳流的 id，按端口顺序再按接纳顺序。
    pub fn flow_ids(&self) -> Vec<FlowId> {
        self.queues
            .iter()
            .flat_map(|q| q.flows.iter().map(|f| f.id))
            .collect()
    }
}
