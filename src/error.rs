//! 错误类型
//!
//! 加载、权重计算与结果输出阶段的统一错误。调度循环本身不会失败。

use std::path::PathBuf;

use thiserror::Error;

/// 输入记录所属的数据集类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Flows,
    Ports,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Flows => f.write_str("flows"),
            InputKind::Ports => f.write_str("ports"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AllocError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} input {source_name}: malformed csv: {source}")]
    Csv {
        kind: InputKind,
        source_name: String,
        #[source]
        source: csv::Error,
    },

    #[error("{kind} input {source_name}, line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        kind: InputKind,
        source_name: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("{kind} input {source_name}, line {line}: field `{field}` is not an integer: {value:?}")]
    NotInteger {
        kind: InputKind,
        source_name: String,
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("{kind} input {source_name}, line {line}: `{field}` must be > 0, got {value}")]
    NonPositive {
        kind: InputKind,
        source_name: String,
        line: u64,
        field: &'static str,
        value: i64,
    },

    #[error("{kind} input {source_name}, line {line}: `{field}` must be >= 0, got {value}")]
    Negative {
        kind: InputKind,
        source_name: String,
        line: u64,
        field: &'static str,
        value: i64,
    },

    #[error("{kind} input {source_name}, line {line}: duplicate id {id}")]
    DuplicateId {
        kind: InputKind,
        source_name: String,
        line: u64,
        id: u64,
    },

    #[error("total port bandwidth is zero, cannot compute port weights")]
    ZeroPortBandwidth,

    #[error("total flow bandwidth is zero, cannot compute port weights")]
    ZeroFlowBandwidth,

    #[error("total {kind} bandwidth does not fit in 64 bits")]
    BandwidthOverflow { kind: InputKind },

    #[error("{ports} ports but {weights} port weights")]
    PortWeightMismatch { ports: usize, weights: usize },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode summary: {0}")]
    Summary(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AllocError>;
