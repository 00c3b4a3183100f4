use crate::alloc::{SchedulerConfig, allocate};
use crate::io::{RunSummary, write_placements};
use crate::model::{Flow, FlowId, Port, PortId, Tick};

fn sample_allocation() -> crate::alloc::Allocation {
    let flows = vec![
        Flow::new(FlowId(1), 10, Tick(0), 2),
        Flow::new(FlowId(2), 5, Tick(0), 1),
        Flow::new(FlowId(3), 5, Tick(4), 1),
    ];
    let ports = vec![Port::new(PortId(1), 10), Port::new(PortId(2), 5)];
    allocate(flows, ports, &SchedulerConfig::default()).expect("allocate")
}

#[test]
fn placements_are_written_one_per_line_without_header() {
    let alloc = sample_allocation();
    let mut out = Vec::new();
    write_placements(&mut out, &alloc.placements).expect("write");
    let text = String::from_utf8(out).expect("utf8");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), alloc.placements.len());
    assert_eq!(lines[0], "2,2,0");
    assert_eq!(lines[1], "1,1,0");
    assert!(lines[2].ends_with(",4"));
}

#[test]
fn empty_placements_write_nothing() {
    let mut out = Vec::new();
    write_placements(&mut out, &[]).expect("write");
    assert!(out.is_empty());
}

#[test]
fn summary_reports_per_port_counts() {
    let alloc = sample_allocation();
    let summary = RunSummary::new("0", 20, 15, &alloc);
    assert_eq!(summary.flows, 3);
    assert_eq!(summary.ports, 2);
    assert_eq!(summary.port_stats.len(), 2);
    let admitted: usize = summary.port_stats.iter().map(|p| p.admitted).sum();
    assert_eq!(admitted, 3);
    assert_eq!(summary.port_stats[0].port_id, PortId(2));

    let line = summary.line();
    assert!(line.starts_with("dataset=0 flows=3 ports=2"), "{line}");
    assert!(line.ends_with("final_time=4 makespan=5"), "{line}");

    let v = serde_json::to_value(&summary).expect("json");
    assert_eq!(v["port_stats"][0]["port_id"], 2);
    assert_eq!(v["stats"]["admitted"], 3);
    assert_eq!(v["stats"]["makespan"], 5);
}
