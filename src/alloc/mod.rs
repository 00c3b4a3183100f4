//! 分配核心
//!
//! 端口权重计算、流排序与接纳调度。`allocate` 串起整个流程。

// 子模块声明
mod allocation;
mod order;
mod scheduler;
mod weight;

// 重新导出公共接口
pub use allocation::{AllocStats, Allocation, Placement, PortQueue};
pub use order::{BandwidthTieBreak, FlowOrder, PendingFlows};
pub use scheduler::{AdmissionScheduler, SchedulerConfig};
pub use weight::{PortWeights, flows_total_bandwidth, port_weights, sort_ports, total_bandwidth};

use tracing::info;

use crate::error::Result;
use crate::model::{Flow, Port};

/// 一次完整的分配：端口排序、计算配额、调度。
///
/// 没有流时直接返回空结果，不计算配额；有流但端口总带宽为 0 时报错。
#[tracing::instrument(skip_all, fields(flows = flows.len(), ports = ports.len()))]
pub fn allocate(flows: Vec<Flow>, mut ports: Vec<Port>, cfg: &SchedulerConfig) -> Result<Allocation> {
    sort_ports(&mut ports);
    if flows.is_empty() {
        info!("没有待调度的流");
        return Ok(Allocation::empty(ports));
    }

    let flows_total = flows_total_bandwidth(&flows)?;
    let weights = port_weights(flows_total, &ports)?;
    let pending = PendingFlows::from_flows(flows, FlowOrder::new(cfg.tie_break));
    let scheduler = AdmissionScheduler::new(ports, weights)?;
    Ok(scheduler.run(pending))
}
