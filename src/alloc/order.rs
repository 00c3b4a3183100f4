//! 流的接纳顺序
//!
//! 待调度流按 (start_time 升序, bandwidth 按 tie-break, send_time 降序, id 升序)
//! 排列。最后一个键保证全序，同一输入的多次运行结果一致。

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::model::Flow;

/// start_time 相同时按带宽排序的方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandwidthTieBreak {
    /// 小带宽优先
    #[default]
    Ascending,
    /// 大带宽优先
    Descending,
}

impl BandwidthTieBreak {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(format!("unknown bandwidth tie-break: {raw}")),
        }
    }
}

/// 流比较器，是待调度流排序的唯一依据。
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowOrder {
    pub tie_break: BandwidthTieBreak,
}

impl FlowOrder {
    pub fn new(tie_break: BandwidthTieBreak) -> Self {
        Self { tie_break }
    }

    pub fn compare(&self, a: &Flow, b: &Flow) -> Ordering {
        let by_bandwidth = match self.tie_break {
            BandwidthTieBreak::Ascending => a.bandwidth.cmp(&b.bandwidth),
            BandwidthTieBreak::Descending => b.bandwidth.cmp(&a.bandwidth),
        };
        a.start_time
            .cmp(&b.start_time)
            .then(by_bandwidth)
            .then_with(|| b.send_time.cmp(&a.send_time))
            .then_with(|| a.id.cmp(&b.id))
    }
}

struct HeapEntry {
    flow: Flow,
    order: FlowOrder,
}

// BinaryHeap 是 max-heap；我们需要比较器最小者优先，因此反向比较。
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order.compare(&self.flow, &other.flow).reverse()
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

/// 待调度流集合，`peek`/`pop` 总是返回比较器意义下最小的流。
pub struct PendingFlows {
    order: FlowOrder,
    q: BinaryHeap<HeapEntry>,
}

impl PendingFlows {
    pub fn new(order: FlowOrder) -> Self {
        Self {
            order,
            q: BinaryHeap::new(),
        }
    }

    pub fn from_flows(flows: impl IntoIterator<Item = Flow>, order: FlowOrder) -> Self {
        let q = flows
            .into_iter()
            .map(|flow| HeapEntry { flow, order })
            .collect();
        Self { order, q }
    }

    pub fn push(&mut self, flow: Flow) {
        self.q.push(HeapEntry {
            flow,
            order: self.order,
        });
    }

    pub fn peek(&self) -> Option<&Flow> {
        self.q.peek().map(|e| &e.flow)
    }

    pub fn pop(&mut self) -> Option<Flow> {
        self.q.pop().map(|e| e.flow)
    }

    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    /// 按比较器顺序取出全部流。
    pub fn into_sorted_vec(mut self) -> Vec<Flow> {
        let mut out = Vec::with_capacity(self.q.len());
        while let Some(flow) = self.pop() {
            out.push(flow);
        }
        out
    }
}
