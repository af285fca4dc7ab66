//! The per-node control loop (§4.4, C3).

use std::thread::sleep;
use std::time::Duration;

use crate::id::NodeId;
use crate::mediator::{NodeSignals, Queue};
use crate::message::Message;
use crate::rendezvous::Latch;

/// Drives one node through `stall -> request -> enter CS -> exit` for every precomputed
/// `(inter_arrival, execution)` pair, then reports `Done` and waits for the mediator to
/// release it during termination (§4.4, §4.6).
///
/// `times` is owned by this call: per §5, a node's `times` sequence is mutated only by
/// its own driver thread.
pub fn run_driver(id: NodeId, times: Vec<(Duration, Duration)>, queue: &Queue, signals: &NodeSignals, start: &Latch) {
    start.wait();

    let k = times.len();
    for (iat, et) in times {
        sleep(iat);

        queue.push(Message::request_cs(id));
        signals.token_signal.wait();

        sleep(et);

        queue.push(Message::exit_cs(id));
    }

    log::debug!("node {} completed {} critical sections, signalling done", id, k);
    queue.push(Message::done(id));
    signals.done_signal.wait();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::NodeMap;
    use crate::mediator::Mediator;
    use crate::node::NodeState;
    use crate::topology;
    use std::time::Instant;

    #[test]
    fn a_single_node_completes_its_full_cycle_count() {
        let mut nodes = NodeMap::default();
        let mut signals = NodeMap::default();
        for (id, holder) in topology::initial_holders(1) {
            nodes.insert(id, NodeState::new(id, holder));
            signals.insert(id, NodeSignals::new());
        }

        let start = Latch::new();
        let times = vec![(Duration::from_millis(1), Duration::from_millis(1)); 5];
        let mut mediator = Mediator::new();
        let queue = Queue::new();
        let id = NodeId::new(1);

        let deadline = Instant::now();
        crossbeam_utils::thread::scope(|scope| {
            let node_signals = &signals;
            scope.spawn(|_| run_driver(id, times, &queue, node_signals.get(&id).unwrap(), &start));
            start.open();
            let stats = mediator.run(1, &queue, &mut nodes, &signals).unwrap();
            assert_eq!(stats.requests, 5);
            assert_eq!(stats.serviced, 5);
        })
        .unwrap();
        assert!(deadline.elapsed() < Duration::from_secs(5));
    }
}
