//! 输入输出
//!
//! 运行配置、流/端口文件加载、结果输出与测试数据生成。核心调度不依赖此模块。

// 子模块声明
mod config;
mod generate;
mod loader;
mod report;

// 重新导出公共接口
pub use config::{DatasetPaths, RunConfig};
pub use generate::{GeneratorOpts, generate_dataset, write_dataset};
pub use loader::{FlowSet, PortSet, load_flows, load_ports, read_flows, read_ports};
pub use report::{PortSummary, RunSummary, save_placements, save_summaries, write_placements};
