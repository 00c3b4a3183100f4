//! 生成随机的流/端口数据集 out_dir/0, out_dir/1, ...

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use portsched_rs::io::{GeneratorOpts, RunConfig, generate_dataset, write_dataset};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "gen-dataset", about = "生成随机的 port.txt / flow.txt 数据集")]
struct Args {
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// 数据集数量
    #[arg(long, default_value_t = 10)]
    datasets: usize,

    /// 随机种子；不指定时取系统熵
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let names = RunConfig::default();
    let opts = GeneratorOpts::default();
    for n in 0..args.datasets {
        let (ports, flows) = generate_dataset(&mut rng, &opts);
        let dir = args.out_dir.join(n.to_string());
        if let Err(e) = write_dataset(&dir, &names.port_file, &names.flow_file, &ports, &flows) {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
        info!(dataset = n, ports = ports.len(), flows = flows.len(), dir = %dir.display(), "数据集已生成");
    }
    ExitCode::SUCCESS
}
