//! 端口分配
//!
//! 读取流与端口文件，按端口带宽比例计算配额并调度，写出放置结果。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use portsched_rs::alloc::{BandwidthTieBreak, allocate};
use portsched_rs::io::{
    DatasetPaths, RunConfig, RunSummary, load_flows, load_ports, save_placements, save_summaries,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(
    name = "port-alloc",
    about = "按带宽比例把流分配到出口端口，输出 flowId,portId,startSendTime"
)]
struct Args {
    /// JSON 配置文件；命令行参数覆盖其中的字段
    #[arg(long)]
    config: Option<PathBuf>,

    /// 数据目录
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[arg(long)]
    flow_file: Option<String>,

    #[arg(long)]
    port_file: Option<String>,

    #[arg(long)]
    result_file: Option<String>,

    /// 只处理编号数据集 data_dir/<N>/
    #[arg(long, conflicts_with = "all_datasets")]
    dataset: Option<usize>,

    /// 依次处理 data_dir/0, data_dir/1, ... 直到端口文件不存在
    #[arg(long)]
    all_datasets: bool,

    /// start_time 相同时的带宽排序：ascending 或 descending
    #[arg(long)]
    tie_break: Option<String>,

    /// 把各数据集的摘要写成 JSON
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// 不在 stdout 打印摘要行
    #[arg(long)]
    quiet: bool,
}

fn build_config(args: &Args) -> Result<RunConfig, String> {
    let mut cfg = match &args.config {
        Some(path) => RunConfig::from_json_file(path).map_err(|e| e.to_string())?,
        None => RunConfig::default(),
    };
    if let Some(dir) = &args.data_dir {
        cfg.data_dir = dir.clone();
    }
    if let Some(name) = &args.flow_file {
        cfg.flow_file = name.clone();
    }
    if let Some(name) = &args.port_file {
        cfg.port_file = name.clone();
    }
    if let Some(name) = &args.result_file {
        cfg.result_file = name.clone();
    }
    if let Some(raw) = &args.tie_break {
        cfg.tie_break = BandwidthTieBreak::parse(raw)?;
    }
    Ok(cfg)
}

fn datasets(args: &Args, cfg: &RunConfig) -> Vec<DatasetPaths> {
    if let Some(n) = args.dataset {
        return vec![cfg.dataset(n)];
    }
    if !args.all_datasets {
        return vec![cfg.flat()];
    }
    (0..)
        .map(|n| cfg.dataset(n))
        .take_while(DatasetPaths::exists)
        .collect()
}

#[tracing::instrument(skip(cfg), fields(dataset = %paths.label))]
fn run_dataset(cfg: &RunConfig, paths: &DatasetPaths) -> portsched_rs::Result<RunSummary> {
    let flows = load_flows(&paths.flows)?;
    let ports = load_ports(&paths.ports)?;
    let (flows_total, ports_total) = (flows.total_bandwidth, ports.total_bandwidth);

    let alloc = allocate(flows.flows, ports.ports, &cfg.scheduler())?;
    save_placements(&paths.results, &alloc.placements)?;
    info!(results = %paths.results.display(), placements = alloc.placements.len(), "结果已写入");

    Ok(RunSummary::new(
        paths.label.clone(),
        flows_total,
        ports_total,
        &alloc,
    ))
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let cfg = match build_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sets = datasets(&args, &cfg);
    if sets.is_empty() {
        warn!(data_dir = %cfg.data_dir.display(), "没有找到数据集");
    }

    let mut summaries = Vec::with_capacity(sets.len());
    for paths in &sets {
        match run_dataset(&cfg, paths) {
            Ok(summary) => {
                if !args.quiet {
                    println!("{}", summary.line());
                }
                summaries.push(summary);
            }
            Err(e) => {
                eprintln!("error: dataset {}: {e}", paths.label);
                return ExitCode::FAILURE;
            }
        }
    }

    if let Some(path) = &args.summary_json {
        if let Err(e) = save_summaries(path, &summaries) {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        eprintln!("wrote summary to {}", path.display());
    }

    ExitCode::SUCCESS
}
