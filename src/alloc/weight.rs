//! 端口权重
//!
//! 每个端口的配额 = floor(流总带宽 * 端口带宽 / 端口总带宽)。
//! 向下取整保证配额之和不超过流总带宽。

use tracing::debug;

use crate::error::{AllocError, InputKind, Result};
use crate::model::{Flow, Port};

/// 端口配额，与端口列表按下标一一对应。构造成功时至少包含一个端口。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortWeights {
    weights: Vec<u64>,
}

impl PortWeights {
    /// 直接给定配额，空列表返回 None。
    pub fn from_weights(weights: Vec<u64>) -> Option<Self> {
        if weights.is_empty() {
            return None;
        }
        Some(Self { weights })
    }

    pub fn get(&self, idx: usize) -> Option<u64> {
        self.weights.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.weights.iter().fold(0_u64, |acc, w| acc.saturating_add(*w))
    }

    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.weights.iter().copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.weights
    }
}

/// 端口按带宽升序稳定排序，带宽相同的端口保持输入顺序。
pub fn sort_ports(ports: &mut [Port]) {
    ports.sort_by_key(|p| p.bandwidth);
}

/// 端口总带宽；超出 u64 时报错而不是截断。
pub fn total_bandwidth(ports: &[Port]) -> Result<u64> {
    checked_sum(ports.iter().map(|p| p.bandwidth), InputKind::Ports)
}

/// 流总带宽；超出 u64 时报错而不是截断。
pub fn flows_total_bandwidth(flows: &[Flow]) -> Result<u64> {
    checked_sum(flows.iter().map(|f| f.bandwidth), InputKind::Flows)
}

fn checked_sum(mut values: impl Iterator<Item = u64>, kind: InputKind) -> Result<u64> {
    values
        .try_fold(0_u64, |acc, v| acc.checked_add(v))
        .ok_or(AllocError::BandwidthOverflow { kind })
}

/// 计算各端口配额。端口总带宽或流总带宽为 0 时返回错误。
#[tracing::instrument(skip(ports), fields(ports = ports.len()))]
pub fn port_weights(flows_total: u64, ports: &[Port]) -> Result<PortWeights> {
    let ports_total = total_bandwidth(ports)?;
    if ports_total == 0 {
        return Err(AllocError::ZeroPortBandwidth);
    }
    if flows_total == 0 {
        return Err(AllocError::ZeroFlowBandwidth);
    }

    let weights: Vec<u64> = ports
        .iter()
        .map(|p| {
            let w = u128::from(flows_total) * u128::from(p.bandwidth) / u128::from(ports_total);
            // w <= flows_total，不会溢出 u64
            w as u64
        })
        .collect();

    debug!(ports_total, ?weights, "端口配额");
    Ok(PortWeights { weights })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PortId;

    #[test]
    fn sort_ports_is_stable_on_equal_bandwidth() {
        let mut ports = vec![
            Port::new(PortId(7), 20),
            Port::new(PortId(3), 10),
            Port::new(PortId(1), 20),
        ];
        sort_ports(&mut ports);
        let ids: Vec<u64> = ports.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 7, 1]);
    }

    #[test]
    fn weights_use_exact_integer_floor() {
        // 10 * 1 / 3 = 3.33.. -> 3
        let ports = vec![Port::new(PortId(0), 1), Port::new(PortId(1), 2)];
        let w = port_weights(10, &ports).unwrap();
        assert_eq!(w.as_slice(), &[3, 6]);
        assert_eq!(w.total(), 9);
    }
}
