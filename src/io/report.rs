//! 结果输出
//!
//! 放置记录写成 `flowId,portId,startSendTime`，每行一条，无表头，按接纳顺序。
//! 运行摘要可另存为 JSON。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::alloc::{AllocStats, Allocation, Placement};
use crate::error::{AllocError, Result};
use crate::model::PortId;

pub fn write_placements<W: Write>(writer: W, placements: &[Placement]) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for p in placements {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_placements(path: &Path, placements: &[Placement]) -> Result<()> {
    let write_err = |source: std::io::Error| AllocError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(write_err)?;
    write_placements(BufWriter::new(file), placements).map_err(|e| write_err(e.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSummary {
    pub port_id: PortId,
    pub bandwidth: u64,
    pub weight: u64,
    pub committed: u64,
    pub admitted: usize,
    pub forced: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub dataset: String,
    pub flows: usize,
    pub ports: usize,
    pub flows_total_bandwidth: u64,
    pub ports_total_bandwidth: u64,
    pub port_stats: Vec<PortSummary>,
    pub stats: AllocStats,
}

impl RunSummary {
    pub fn new(
        dataset: impl Into<String>,
        flows_total_bandwidth: u64,
        ports_total_bandwidth: u64,
        alloc: &Allocation,
    ) -> Self {
        let port_stats = alloc
            .queues
            .iter()
            .map(|q| PortSummary {
                port_id: q.port.id,
                bandwidth: q.port.bandwidth,
                weight: q.weight,
                committed: q.committed,
                admitted: q.len(),
                forced: q.forced,
            })
            .collect();
        Self {
            dataset: dataset.into(),
            flows: alloc.placements.len(),
            ports: alloc.queues.len(),
            flows_total_bandwidth,
            ports_total_bandwidth,
            port_stats,
            stats: alloc.stats,
        }
    }

    /// 单行摘要，供命令行输出。
    pub fn line(&self) -> String {
        format!(
            "dataset={} flows={} ports={} admitted={} forced={} final_time={} makespan={}",
            self.dataset,
            self.flows,
            self.ports,
            self.stats.admitted,
            self.stats.forced,
            self.stats.final_time,
            self.stats.makespan
        )
    }
}

pub fn save_summaries(path: &Path, summaries: &[RunSummary]) -> Result<()> {
    let raw = serde_json::to_string_pretty(summaries)?;
    std::fs::write(path, raw).map_err(|source| AllocError::Write {
        path: path.to_path_buf(),
        source,
    })
}
