//! Wires the pieces together and runs one simulation end to end (§4.6, C6).

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::SimError;
use crate::id::{NodeId, NodeMap};
use crate::mediator::{Mediator, NodeSignals, Queue, Stats};
use crate::node::NodeState;
use crate::rendezvous::Latch;
use crate::time_gen::{SimLoad, generate_times};
use crate::topology;
use crate::driver::run_driver;

/// The inputs a single run needs, independent of how they were obtained (flags or the
/// interactive prompt).
#[derive(Clone, Copy, Debug)]
#[derive(serde::Serialize)]
pub struct RunConfig {
    pub nodes: u32,
    pub load: SimLoad,
    pub seed: u64,
    pub requests: usize,
}

/// Everything the summary block (§6) needs about a completed run.
#[derive(Clone, Copy, Debug)]
#[derive(serde::Serialize)]
pub struct RunReport {
    pub config: RunConfig,
    pub stats: Stats,
    /// The `(node, holder)` pointers as they stood at the quiescent instant the mediator
    /// declared termination. Lets callers (notably P2/P6 tests) check that exactly one
    /// node ends up pointing at itself and that the edge set still matches the tree the
    /// run started with.
    pub final_holders: Vec<(NodeId, NodeId)>,
}

impl RunReport {
    pub fn messages_per_request(&self) -> f64 {
        if self.stats.requests == 0 {
            0.0
        } else {
            self.stats.messages as f64 / self.stats.requests as f64
        }
    }

    pub fn token_passes_per_request(&self) -> f64 {
        if self.stats.requests == 0 {
            0.0
        } else {
            self.stats.token_passes as f64 / self.stats.requests as f64
        }
    }
}

/// Builds the tree, spawns the mediator and every node driver as scoped threads, and
/// blocks until the run has fully terminated (§4.6, §5).
pub fn run(config: RunConfig) -> Result<RunReport, SimError> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mu = config.load.mu(config.nodes);

    let mut nodes: NodeMap<NodeState> = NodeMap::default();
    let mut signals: NodeMap<NodeSignals> = NodeMap::default();
    let mut all_times = Vec::with_capacity(config.nodes as usize);

    for (id, holder) in topology::initial_holders(config.nodes) {
        nodes.insert(id, NodeState::new(id, holder));
        signals.insert(id, NodeSignals::new());
        all_times.push((id, generate_times(&mut rng, mu, config.requests)));
    }

    let queue = Queue::new();
    let start = Latch::new();
    let mut mediator = Mediator::new();

    let stats = crossbeam_utils::thread::scope(|scope| {
        let queue = &queue;
        let signals = &signals;
        let start = &start;

        for (id, times) in all_times {
            let node_signals = signals.get(&id).expect("every node has signals");
            scope.spawn(move |_| run_driver(id, times, queue, node_signals, start));
        }

        start.open();
        mediator.run(config.nodes, queue, &mut nodes, signals)
    })
    .expect("driver threads never panic under normal operation")?;

    let mut final_holders: Vec<(NodeId, NodeId)> =
        nodes.iter().map(|(id, node)| (*id, node.holder())).collect();
    final_holders.sort_by_key(|(id, _)| id.get());

    Ok(RunReport { config, stats, final_holders })
}
