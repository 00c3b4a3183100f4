//! 随机数据集生成
//!
//! 生成 `port.txt` 与 `flow.txt`，格式与加载器一致。默认取值范围：
//! 端口 5~14 个、带宽 3000~12000（步长 1000）；流 5000~14000 条、带宽 1~1000；
//! 开始时刻小于 50~99 中随机取的上界，发送时长 1~(50~99)。

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use rand::Rng;

use crate::error::{AllocError, Result};
use crate::model::{Flow, FlowId, Port, PortId, Tick};

#[derive(Debug, Clone)]
pub struct GeneratorOpts {
    pub port_count: RangeInclusive<usize>,
    /// 以 `capacity_unit` 为单位
    pub port_capacity: RangeInclusive<u64>,
    pub capacity_unit: u64,
    /// 以 `flow_count_unit` 为单位
    pub flow_count: RangeInclusive<usize>,
    pub flow_count_unit: usize,
    pub flow_bandwidth: RangeInclusive<u64>,
    pub start_bound: RangeInclusive<u64>,
    pub send_bound: RangeInclusive<u64>,
}

impl Default for GeneratorOpts {
    fn default() -> Self {
        Self {
            port_count: 5..=14,
            port_capacity: 3..=12,
            capacity_unit: 1000,
            flow_count: 5..=14,
            flow_count_unit: 1000,
            flow_bandwidth: 1..=1000,
            start_bound: 50..=99,
            send_bound: 50..=99,
        }
    }
}

pub fn generate_dataset<R: Rng>(rng: &mut R, opts: &GeneratorOpts) -> (Vec<Port>, Vec<Flow>) {
    let port_count = rng.random_range(opts.port_count.clone());
    let ports: Vec<Port> = (0..port_count)
        .map(|i| {
            let bw = rng.random_range(opts.port_capacity.clone()) * opts.capacity_unit;
            Port::new(PortId(i as u64), bw.max(1))
        })
        .collect();

    let flow_count = rng.random_range(opts.flow_count.clone()) * opts.flow_count_unit;
    let start_bound = rng.random_range(opts.start_bound.clone()).max(1);
    let send_bound = rng.random_range(opts.send_bound.clone()).max(1);
    let flows: Vec<Flow> = (0..flow_count)
        .map(|i| {
            let bw = rng.random_range(opts.flow_bandwidth.clone()).max(1);
            let start = rng.random_range(0..start_bound);
            let send = rng.random_range(1..=send_bound);
            Flow::new(FlowId(i as u64), bw, Tick(start), send)
        })
        .collect();

    (ports, flows)
}

/// 写入 `dir/port_file` 与 `dir/flow_file`，目录不存在时创建。
pub fn write_dataset(
    dir: &Path,
    port_file: &str,
    flow_file: &str,
    ports: &[Port],
    flows: &[Flow],
) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| AllocError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let port_rows = ports
        .iter()
        .map(|p| vec![p.id.0.to_string(), p.bandwidth.to_string()]);
    write_rows(&dir.join(port_file), &["id", "bandwidth"], port_rows)?;

    let flow_rows = flows.iter().map(|f| {
        vec![
            f.id.0.to_string(),
            f.bandwidth.to_string(),
            f.start_time.0.to_string(),
            f.send_time.to_string(),
        ]
    });
    write_rows(
        &dir.join(flow_file),
        &["id", "bandwidth", "start_time", "send_time"],
        flow_rows,
    )
}

fn write_rows(
    path: &Path,
    header: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<()> {
    let write_err = |source: std::io::Error| AllocError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut wtr = csv::Writer::from_path(path).map_err(|e| write_err(e.into()))?;
    wtr.write_record(header).map_err(|e| write_err(e.into()))?;
    for row in rows {
        wtr.write_record(&row).map_err(|e| write_err(e.into()))?;
    }
    wtr.flush().map_err(write_err)
}
