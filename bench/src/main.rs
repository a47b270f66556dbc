use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use stream_core::{
    paths_to_edges, propagate, sample_all, Direction, EdgeRecord, Graph, NodeId, TwoHopIndex,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: stream-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  lsystem     Fractal branching tree (deep paths)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts (many cycles)");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 200000");
        return;
    }

    println!("stream-bench");
    println!("============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Vec<EdgeRecord>)> = match mode {
        "lsystem" => vec![("L-system tree", gen_lsystem)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("L-system tree", gen_lsystem as fn(u64) -> Vec<EdgeRecord>),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Vec<EdgeRecord>, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let records = generator(node_count);
    let gen_time = t.elapsed();

    let t = Instant::now();
    let graph = match Graph::from_records(records) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("Generator produced an invalid network: {}", e);
            return;
        }
    };
    let build_time = t.elapsed();
    if graph.is_empty() {
        println!("Empty network, nothing to traverse");
        println!();
        return;
    }
    println!(
        "Generated in {:.2}s, built in {:.2}s: {} nodes, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        build_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Exact closure from node 0 and from the last node, both directions
    let far_node = (graph.node_count() - 1) as NodeId;
    println!();
    println!(
        "{:>6} {:>8} {:>12} {:>12} {:>10} {:>10}",
        "dir", "root", "index", "edges", "index", "closure"
    );
    println!("{:->6} {:->8} {:->12} {:->12} {:->10} {:->10}", "", "", "", "", "", "");

    for direction in [Direction::Down, Direction::Up] {
        let t = Instant::now();
        let index = TwoHopIndex::build(&graph, direction);
        let index_time = t.elapsed();

        for root in [0, far_node] {
            let t = Instant::now();
            let closure = propagate(&graph, &index, &[root]);
            let elapsed = t.elapsed();
            println!(
                "{:>6} {:>8} {:>12} {:>12} {:>8.1}ms {:>8.1}ms",
                direction.as_str(),
                root,
                index.entry_count(),
                closure.edges.len(),
                index_time.as_secs_f64() * 1000.0,
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }

    // Random-walk sampling upstream of the last node (typically a leaf)
    println!();
    println!("{:>8} {:>8} {:>10} {:>10} {:>10}", "maxStep", "maxWalk", "paths", "edges", "time");
    println!("{:->8} {:->8} {:->10} {:->10} {:->10}", "", "", "", "", "");

    let mut rng = StdRng::seed_from_u64(42);
    for (max_step, max_walk) in [(5, 100), (10, 1_000), (20, 10_000), (50, 10_000)] {
        let t = Instant::now();
        let paths = sample_all(&graph, &[far_node], max_step, max_walk, &mut rng);
        let edges = paths_to_edges(&graph, &paths);
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>8} {:>10} {:>10} {:>8.1}ms",
            max_step,
            max_walk,
            paths.len(),
            edges.len(),
            elapsed.as_secs_f64() * 1000.0
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: O(n) or O(n + edges), single-threaded, deterministic. Every
// generator emits each ordered pair at most once (no multi-edges).
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const LABELS: [&str; 4] = ["activation", "inhibition", "binding", "phosphorylation"];

/// Collects records while dropping repeated ordered pairs.
struct Network {
    records: Vec<EdgeRecord>,
    pairs: HashSet<(u64, u64)>,
}

impl Network {
    fn with_capacity(edges: usize) -> Self {
        Self {
            records: Vec::with_capacity(edges),
            pairs: HashSet::with_capacity(edges),
        }
    }

    fn add(&mut self, from: u64, to: u64, rng: &mut FastRng) {
        if self.pairs.insert((from, to)) {
            let label = LABELS[rng.next(LABELS.len() as u64) as usize];
            self.records
                .push(EdgeRecord::new(format!("n{}", from), label, format!("n{}", to)));
        }
    }
}

/// L-system fractal tree: deep branching with self-similar structure.
///
/// Each node spawns 3 children. Upstream walks from a leaf are a single
/// deterministic path back to the root.
fn gen_lsystem(node_count: u64) -> Vec<EdgeRecord> {
    let mut net = Network::with_capacity(node_count as usize);
    let mut rng = FastRng::new(42);

    let branching = 3u64;
    let mut next_id: u64 = 1;
    let mut frontier: Vec<u64> = vec![0];

    while next_id < node_count && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching as usize);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= node_count {
                    break;
                }
                let child = next_id;
                next_id += 1;
                net.add(parent, child, &mut rng);
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
    }

    net.records
}

/// Small-world (Watts-Strogatz): ring lattice + random rewiring.
///
/// Every node sits on many cycles, which stresses the walk's cycle check
/// and the closure's visited-edge guard.
fn gen_small_world(node_count: u64) -> Vec<EdgeRecord> {
    let k = 5u64;
    let p = 0.05f64;
    let mut net = Network::with_capacity((node_count * k) as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                net.add(i, if rewired != i { rewired } else { neighbor }, &mut rng);
            } else {
                net.add(i, neighbor, &mut rng);
            }
        }
    }

    net.records
}

/// Erdos-Renyi: uniform random edges, ~5 per node. No structure.
fn gen_random(node_count: u64) -> Vec<EdgeRecord> {
    let target_edges = node_count * 5;
    let mut net = Network::with_capacity(target_edges as usize);
    let mut rng = FastRng::new(54321);

    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            net.add(from, to, &mut rng);
        }
    }

    net.records
}

/// DLA (Diffusion-Limited Aggregation): organic branching growth.
///
/// Each new node attaches to a recent "surface" node, with occasional
/// long-range second edges that create shortcuts.
fn gen_dla(node_count: u64) -> Vec<EdgeRecord> {
    let mut net = Network::with_capacity((node_count * 2) as usize);
    let mut rng = FastRng::new(77777);

    let mut surface: VecDeque<u64> = VecDeque::with_capacity(10001);
    surface.push_back(0);
    let surface_max = 10000usize;

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        net.add(attach_to, new_node, &mut rng);

        // 10% chance of a second upstream connection
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                net.add(other, new_node, &mut rng);
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    net.records
}
