//! 运行配置
//!
//! 数据目录与文件名。可从 JSON 文件读取，再由命令行覆盖。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::alloc::{BandwidthTieBreak, SchedulerConfig};
use crate::error::{AllocError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub flow_file: String,
    pub port_file: String,
    pub result_file: String,
    pub tie_break: BandwidthTieBreak,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            flow_file: "flow.txt".to_string(),
            port_file: "port.txt".to_string(),
            result_file: "result.txt".to_string(),
            tie_break: BandwidthTieBreak::default(),
        }
    }
}

/// 一个数据集的三个文件路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub label: String,
    pub flows: PathBuf,
    pub ports: PathBuf,
    pub results: PathBuf,
}

impl DatasetPaths {
    /// 以端口文件是否存在判断数据集是否存在。
    pub fn exists(&self) -> bool {
        self.ports.is_file()
    }
}

impl RunConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| AllocError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| AllocError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn scheduler(&self) -> SchedulerConfig {
        SchedulerConfig {
            tie_break: self.tie_break,
        }
    }

    /// 直接位于 `data_dir` 下的文件。
    pub fn flat(&self) -> DatasetPaths {
        self.paths_in(&self.data_dir, self.data_dir.display().to_string())
    }

    /// 编号数据集 `data_dir/<n>/`。
    pub fn dataset(&self, n: usize) -> DatasetPaths {
        self.paths_in(&self.data_dir.join(n.to_string()), n.to_string())
    }

    fn paths_in(&self, dir: &Path, label: String) -> DatasetPaths {
        DatasetPaths {
            label,
            flows: dir.join(&self.flow_file),
            ports: dir.join(&self.port_file),
            results: dir.join(&self.result_file),
        }
    }
}
