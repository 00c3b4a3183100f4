//! 接纳调度器
//!
//! 按流的接纳顺序与离散时钟，把流加权轮询地绑定到端口队列上。
//!
//! - 当前游标端口的已接纳带宽低于配额时接纳，游标循环前进一格；
//! - 否则游标前进（不回绕）；越过最后一个端口时强制放入最后一个端口，
//!   游标停在最后一个下标；
//! - 下一条流尚未到达时推进时钟。

use tracing::{debug, info, trace};

use super::allocation::{AllocStats, Allocation, Placement, PortQueue};
use super::order::{BandwidthTieBreak, PendingFlows};
use super::weight::PortWeights;
use crate::error::{AllocError, Result};
use crate::model::{Flow, Port, Tick};

/// 调度参数
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerConfig {
    pub tie_break: BandwidthTieBreak,
}

/// 单次调度的全部状态。每次运行独占一个实例。
#[derive(Debug)]
pub struct AdmissionScheduler {
    queues: Vec<PortQueue>,
    cursor: usize,
    now: Tick,
    placements: Vec<Placement>,
    stats: AllocStats,
}

impl AdmissionScheduler {
    pub fn new(ports: Vec<Port>, weights: PortWeights) -> Result<Self> {
        if ports.len() != weights.len() {
            return Err(AllocError::PortWeightMismatch {
                ports: ports.len(),
                weights: weights.len(),
            });
        }
        if ports.is_empty() {
            return Err(AllocError::ZeroPortBandwidth);
        }
        // 每个端口独立分配自己的队列
        let queues = ports
            .into_iter()
            .zip(weights.iter())
            .map(|(port, weight)| PortQueue::new(port, weight))
            .collect();
        Ok(Self {
            queues,
            cursor: 0,
            now: Tick::ZERO,
            placements: Vec::new(),
            stats: AllocStats::default(),
        })
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// 处理全部待调度流直到集合为空。
    #[tracing::instrument(skip_all, fields(pending = pending.len()))]
    pub fn run(mut self, mut pending: PendingFlows) -> Allocation {
        let port_count = self.queues.len();
        let last = port_count - 1;

        loop {
            let Some(start) = pending.peek().map(|f| f.start_time) else {
                break;
            };

            // 下一条流尚未到达，时钟直接走到它的开始时刻
            if start > self.now {
                let from = self.now;
                self.stats.idle_ticks += self.now.advance_to(start);
                trace!(%from, to = %self.now, "推进时钟");
                continue;
            }

            let idx = self.cursor;
            if self.queues[idx].has_headroom() {
                let Some(flow) = pending.pop() else { break };
                self.admit(idx, flow, false);
                self.cursor = (idx + 1) % port_count;
                continue;
            }

            trace!(
                port = %self.queues[idx].port.id,
                committed = self.queues[idx].committed,
                weight = self.queues[idx].weight,
                "端口配额已满，尝试下一个端口"
            );
            self.cursor = idx + 1;
            if self.cursor == port_count {
                self.cursor = last;
                let Some(flow) = pending.pop() else { break };
                self.admit(last, flow, true);
            }
        }

        self.stats.final_time = self.now;
        info!(
            admitted = self.stats.admitted,
            forced = self.stats.forced,
            idle_ticks = self.stats.idle_ticks,
            final_time = %self.now,
            makespan = %self.stats.makespan,
            "调度完成"
        );

        Allocation {
            queues: self.queues,
            placements: self.placements,
            stats: self.stats,
        }
    }

    fn admit(&mut self, idx: usize, mut flow: Flow, forced: bool) {
        let now = self.now;
        flow.admit(now);
        if let Some(end) = flow.end_time() {
            self.stats.makespan = self.stats.makespan.max(end);
        }
        let queue = &mut self.queues[idx];
        queue.committed = queue.committed.saturating_add(flow.bandwidth);
        if forced {
            queue.forced += 1;
            self.stats.forced += 1;
        }
        debug!(
            flow = %flow.id,
            port = %queue.port.id,
            bandwidth = flow.bandwidth,
            committed = queue.committed,
            weight = queue.weight,
            forced,
            now = %now,
            "接纳流"
        );
        self.placements.push(Placement {
            flow_id: flow.id,
            port_id: queue.port.id,
            start_send_time: now,
        });
        queue.flows.push(flow);
        self.stats.admitted += 1;
    }
}
