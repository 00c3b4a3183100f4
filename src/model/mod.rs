//! 数据模型
//!
//! 此模块包含流（Flow）、端口（Port）、标识符与调度时钟等基础类型。

// 子模块声明
mod flow;
mod id;
mod port;
mod time;

// 重新导出公共接口
pub use flow::Flow;
pub use id::{FlowId, PortId};
pub use port::Port;
pub use time::Tick;
