//! Solve a jittered grid and report residual, anchor drift and timing.
//!
//! Every horizontal edge asks for roughly (1, 0) and every vertical edge for
//! roughly (0, 1), so the layout should stay close to the unit grid while the
//! residual grows with the jitter.
//!
//! Run: `cargo run -p linca --release --example perturbed_grid -- 40 0.1`

use std::time::Instant;

use linca::solve::solve;
use linca::system::assemble;
use linca::{extract::coordinates, relabel, RawEdge, SolveCfg, VertexId};

fn main() {
    let mut args = std::env::args().skip(1);
    let side: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(30).max(2);
    let jitter: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(0.1);

    let raw = grid(side, jitter);
    let r = relabel(&raw);
    let start = Instant::now();
    let sys = assemble(&r.edges, 10.0, r.index.len()).expect("grid assembles");
    let sol = solve(&sys, &r.edges, SolveCfg::default()).expect("grid is connected");
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    let pts = coordinates(&sol, 1.0);
    let far = pts[r.index.index_of(&(side * side - 1)).unwrap_or(VertexId(0)).0];
    println!(
        "side={side} vertices={} edges={} nnz={}",
        r.index.len(),
        r.edges.len(),
        sys.nnz()
    );
    println!(
        "residual={:.6} far_corner=({:.4}, {:.4})",
        sys.residual_norm(&sol.values),
        far.x,
        far.y
    );
    println!("solve_time_ms={elapsed:.3}");
}

/// Grid with deterministic jitter.
fn grid(side: usize, jitter: f64) -> Vec<RawEdge<usize>> {
    let wobble = |k: usize| jitter * ((k as f64) * 0.618).sin();
    let mut edges = Vec::new();
    for i in 0..side {
        for j in 0..side {
            let v = i * side + j;
            if j + 1 < side {
                edges.push(RawEdge::new(v, v + 1, 1.0 + wobble(2 * v), wobble(2 * v + 1)));
            }
            if i + 1 < side {
                edges.push(RawEdge::new(v, v + side, wobble(3 * v), 1.0 + wobble(3 * v + 1)));
            }
        }
    }
    edges
}
