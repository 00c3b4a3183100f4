use crate::alloc::{
    AdmissionScheduler, Allocation, FlowOrder, PendingFlows, PortWeights,
};
use crate::error::AllocError;
use crate::model::{Flow, FlowId, Port, PortId, Tick};

fn flow(id: u64, bandwidth: u64, start: u64, send: u64) -> Flow {
    Flow::new(FlowId(id), bandwidth, Tick(start), send)
}

fn run(weights: &[u64], flows: Vec<Flow>) -> Allocation {
    let ports = (0..weights.len())
        .map(|i| Port::new(PortId(i as u64), 100))
        .collect();
    let weights = PortWeights::from_weights(weights.to_vec()).expect("weights");
    let scheduler = AdmissionScheduler::new(ports, weights).expect("scheduler");
    scheduler.run(PendingFlows::from_flows(flows, FlowOrder::default()))
}

fn queue_ids(alloc: &Allocation, port: u64) -> Vec<u64> {
    alloc
        .queue_for(PortId(port))
        .expect("queue")
        .flows
        .iter()
        .map(|f| f.id.0)
        .collect()
}

#[test]
fn round_robin_over_ports_with_headroom() {
    let flows = (0..6).map(|i| flow(i, 10, 0, 1)).collect();
    let alloc = run(&[100, 100, 100], flows);
    assert_eq!(queue_ids(&alloc, 0), vec![0, 3]);
    assert_eq!(queue_ids(&alloc, 1), vec![1, 4]);
    assert_eq!(queue_ids(&alloc, 2), vec![2, 5]);
    assert_eq!(alloc.stats.admitted, 6);
    assert_eq!(alloc.stats.forced, 0);
}

#[test]
fn each_port_owns_an_independent_queue() {
    let flows = vec![flow(0, 1, 0, 1), flow(1, 1, 0, 1)];
    let alloc = run(&[10, 10], flows);
    assert_eq!(alloc.queues.len(), 2);
    assert_eq!(queue_ids(&alloc, 0), vec![0]);
    assert_eq!(queue_ids(&alloc, 1), vec![1]);
}

#[test]
fn admission_stops_once_quota_is_reached() {
    // port 0 quota 15: 10 -> 20 crosses it, the third offer moves on
    let flows = (0..6).map(|i| flow(i, 10, 0, 1)).collect();
    let alloc = run(&[15, 1_000], flows);
    let q0 = alloc.queue_for(PortId(0)).expect("queue");
    assert_eq!(queue_ids(&alloc, 0), vec![0, 2]);
    assert_eq!(q0.committed, 20);
    assert!(q0.committed - q0.weight < 10);
    assert_eq!(queue_ids(&alloc, 1), vec![1, 3, 4, 5]);
    assert_eq!(alloc.stats.forced, 0);
}

#[test]
fn forced_admission_lands_on_last_port_when_all_full() {
    let flows = (0..4).map(|i| flow(i, 10, 0, 1)).collect();
    let alloc = run(&[10, 10, 10], flows);
    assert_eq!(queue_ids(&alloc, 0), vec![0]);
    assert_eq!(queue_ids(&alloc, 1), vec![1]);
    assert_eq!(queue_ids(&alloc, 2), vec![2, 3]);
    let last = alloc.queue_for(PortId(2)).expect("queue");
    assert_eq!(last.forced, 1);
    assert_eq!(last.committed, 20);
    assert_eq!(alloc.stats.forced, 1);
}

#[test]
fn cursor_stays_on_last_port_after_forced_admission() {
    // After the first forced admission the last port is over quota, so every
    // later flow is forced there too, including flows at later ticks.
    let mut flows: Vec<Flow> = (0..6).map(|i| flow(i, 10, 0, 1)).collect();
    flows.push(flow(6, 10, 5, 1));
    let alloc = run(&[10, 10, 10], flows);
    assert_eq!(queue_ids(&alloc, 0), vec![0]);
    assert_eq!(queue_ids(&alloc, 1), vec![1]);
    assert_eq!(queue_ids(&alloc, 2), vec![2, 3, 4, 5, 6]);
    assert_eq!(alloc.stats.forced, 4);
    assert_eq!(alloc.queue_for(PortId(2)).expect("queue").forced, 4);
}

#[test]
fn rejection_scan_does_not_wrap_to_earlier_ports() {
    // port 0 still has headroom, but the scan starting at port 1 never goes back
    let flows = (0..5).map(|i| flow(i, 10, 0, 1)).collect();
    let alloc = run(&[100, 10, 10], flows);
    assert_eq!(queue_ids(&alloc, 0), vec![0, 3]);
    assert_eq!(queue_ids(&alloc, 1), vec![1]);
    assert_eq!(queue_ids(&alloc, 2), vec![2, 4]);
    assert_eq!(alloc.queue_for(PortId(0)).expect("queue").committed, 20);
    assert_eq!(alloc.stats.forced, 1);
}

#[test]
fn single_port_with_zero_quota_forces_every_flow() {
    let flows = vec![flow(0, 5, 0, 1), flow(1, 5, 2, 1)];
    let alloc = run(&[0], flows);
    assert_eq!(queue_ids(&alloc, 0), vec![0, 1]);
    assert_eq!(alloc.stats.forced, 2);
}

#[test]
fn clock_jumps_to_next_start_time_and_sets_flow_times() {
    let flows = vec![
        flow(0, 1, 0, 4),
        flow(1, 1, 3, 2),
        flow(2, 1, 3, 1),
        flow(3, 1, 7, 5),
    ];
    let alloc = run(&[100], flows);
    assert_eq!(alloc.stats.idle_ticks, 7);
    assert_eq!(alloc.stats.final_time, Tick(7));
    // flow 3 admitted at 7 runs for 5 ticks
    assert_eq!(alloc.stats.makespan, Tick(12));

    let times: Vec<(u64, u64)> = alloc
        .placements
        .iter()
        .map(|p| (p.flow_id.0, p.start_send_time.0))
        .collect();
    assert_eq!(times, vec![(0, 0), (1, 3), (2, 3), (3, 7)]);
    let p2 = alloc.placement_of(FlowId(2)).expect("placement");
    assert_eq!(p2.port_id, PortId(0));
    assert_eq!(p2.start_send_time, Tick(3));
    assert!(alloc.placement_of(FlowId(99)).is_none());

    for f in &alloc.queues[0].flows {
        assert_eq!(f.begin_time(), Some(f.start_time));
        assert_eq!(f.end_time(), Some(f.start_time.saturating_add(f.send_time)));
    }
}

#[test]
fn first_flow_can_start_after_time_zero() {
    let alloc = run(&[10], vec![flow(9, 3, 42, 1)]);
    assert_eq!(alloc.placements.len(), 1);
    assert_eq!(alloc.placements[0].start_send_time, Tick(42));
    assert_eq!(alloc.stats.idle_ticks, 42);
    assert_eq!(alloc.stats.makespan, Tick(43));
}

#[test]
fn scheduler_rejects_mismatched_weights() {
    let ports = vec![Port::new(PortId(0), 10), Port::new(PortId(1), 10)];
    let weights = PortWeights::from_weights(vec![5]).expect("weights");
    let err = AdmissionScheduler::new(ports, weights).expect_err("mismatch");
    assert!(matches!(
        err,
        AllocError::PortWeightMismatch {
            ports: 2,
            weights: 1
        }
    ));
}

#[test]
fn fresh_scheduler_starts_at_cursor_zero_and_time_zero() {
    let ports = vec![Port::new(PortId(0), 10)];
    let weights = PortWeights::from_weights(vec![5]).expect("weights");
    let scheduler = AdmissionScheduler::new(ports, weights).expect("scheduler");
    assert_eq!(scheduler.cursor(), 0);
    assert_eq!(scheduler.now(), Tick::ZERO);
}
