//! 流/端口文件加载
//!
//! 第一行为表头（内容任意，跳过），其余每行是逗号分隔的整数。
//! 任何一行不合法都立即返回带行号的错误，不跳过也不修正。

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::error::{AllocError, InputKind, Result};
use crate::model::{Flow, FlowId, Port, PortId, Tick};

const FLOW_FIELDS: [&str; 4] = ["id", "bandwidth", "start_time", "send_time"];
const PORT_FIELDS: [&str; 2] = ["id", "bandwidth"];

#[derive(Debug, Clone, Default)]
pub struct FlowSet {
    pub flows: Vec<Flow>,
    pub total_bandwidth: u64,
}

#[derive(Debug, Clone, Default)]
pub struct PortSet {
    pub ports: Vec<Port>,
    pub total_bandwidth: u64,
}

/// 当前记录的位置，用于构造错误。
struct RowCtx<'a> {
    kind: InputKind,
    source: &'a str,
    line: u64,
}

impl RowCtx<'_> {
    fn check_len(&self, record: &csv::StringRecord, expected: usize) -> Result<()> {
        if record.len() != expected {
            return Err(AllocError::FieldCount {
                kind: self.kind,
                source_name: self.source.to_string(),
                line: self.line,
                expected,
                found: record.len(),
            });
        }
        Ok(())
    }

    fn int(&self, record: &csv::StringRecord, idx: usize, field: &'static str) -> Result<i64> {
        let raw = record.get(idx).unwrap_or_default();
        raw.parse::<i64>().map_err(|_| AllocError::NotInteger {
            kind: self.kind,
            source_name: self.source.to_string(),
            line: self.line,
            field,
            value: raw.to_string(),
        })
    }

    fn positive(&self, record: &csv::StringRecord, idx: usize, field: &'static str) -> Result<u64> {
        let value = self.int(record, idx, field)?;
        if value <= 0 {
            return Err(AllocError::NonPositive {
                kind: self.kind,
                source_name: self.source.to_string(),
                line: self.line,
                field,
                value,
            });
        }
        Ok(value as u64)
    }

    fn non_negative(
        &self,
        record: &csv::StringRecord,
        idx: usize,
        field: &'static str,
    ) -> Result<u64> {
        let value = self.int(record, idx, field)?;
        if value < 0 {
            return Err(AllocError::Negative {
                kind: self.kind,
                source_name: self.source.to_string(),
                line: self.line,
                field,
                value,
            });
        }
        Ok(value as u64)
    }

    fn duplicate(&self, id: u64) -> AllocError {
        AllocError::DuplicateId {
            kind: self.kind,
            source_name: self.source.to_string(),
            line: self.line,
            id,
        }
    }
}

fn csv_reader<R: Read>(rdr: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr)
}

/// 遍历数据行，附带 1 起始的行号。
fn for_each_row<R: Read>(
    rdr: R,
    kind: InputKind,
    source: &str,
    mut f: impl FnMut(&RowCtx<'_>, &csv::StringRecord) -> Result<()>,
) -> Result<()> {
    let mut reader = csv_reader(rdr);
    for record in reader.records() {
        let record = record.map_err(|source_err| AllocError::Csv {
            kind,
            source_name: source.to_string(),
            source: source_err,
        })?;
        let ctx = RowCtx {
            kind,
            source,
            line: record.position().map(|p| p.line()).unwrap_or_default(),
        };
        f(&ctx, &record)?;
    }
    Ok(())
}

pub fn read_flows<R: Read>(rdr: R, source: &str) -> Result<FlowSet> {
    let mut set = FlowSet::default();
    let mut seen = HashSet::new();
    for_each_row(rdr, InputKind::Flows, source, |ctx, record| {
        ctx.check_len(record, FLOW_FIELDS.len())?;
        let id = ctx.non_negative(record, 0, FLOW_FIELDS[0])?;
        let bandwidth = ctx.positive(record, 1, FLOW_FIELDS[1])?;
        let start_time = ctx.non_negative(record, 2, FLOW_FIELDS[2])?;
        let send_time = ctx.positive(record, 3, FLOW_FIELDS[3])?;
        if !seen.insert(id) {
            return Err(ctx.duplicate(id));
        }
        set.total_bandwidth = set
            .total_bandwidth
            .checked_add(bandwidth)
            .ok_or(AllocError::BandwidthOverflow {
                kind: InputKind::Flows,
            })?;
        set.flows
            .push(Flow::new(FlowId(id), bandwidth, Tick(start_time), send_time));
        Ok(())
    })?;
    debug!(source, flows = set.flows.len(), total_bandwidth = set.total_bandwidth, "加载流");
    Ok(set)
}

pub fn read_ports<R: Read>(rdr: R, source: &str) -> Result<PortSet> {
    let mut set = PortSet::default();
    let mut seen = HashSet::new();
    for_each_row(rdr, InputKind::Ports, source, |ctx, record| {
        ctx.check_len(record, PORT_FIELDS.len())?;
        let id = ctx.non_negative(record, 0, PORT_FIELDS[0])?;
        let bandwidth = ctx.positive(record, 1, PORT_FIELDS[1])?;
        if !seen.insert(id) {
            return Err(ctx.duplicate(id));
        }
        set.total_bandwidth = set
            .total_bandwidth
            .checked_add(bandwidth)
            .ok_or(AllocError::BandwidthOverflow {
                kind: InputKind::Ports,
            })?;
        set.ports.push(Port::new(PortId(id), bandwidth));
        Ok(())
    })?;
    debug!(source, ports = set.ports.len(), total_bandwidth = set.total_bandwidth, "加载端口");
    Ok(set)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| AllocError::Read {
            path: path.to_path_buf(),
            source,
        })
}

pub fn load_flows(path: &Path) -> Result<FlowSet> {
    read_flows(open(path)?, &path.display().to_string())
}

pub fn load_ports(path: &Path) -> Result<PortSet> {
    read_ports(open(path)?, &path.display().to_string())
}
