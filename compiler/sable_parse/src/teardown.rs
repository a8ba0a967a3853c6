//! Releasing a parse result.

use sable_ir::{traverse, Node, NodeId, Pool, Token, Visit, VisitFlow, Visitor};
use tracing::{debug, warn};

/// Accounting from [`ParseResponse::free`](crate::ParseResponse::free).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct TeardownReport {
    /// Nodes reached from the root and released.
    pub released: usize,
    /// Nodes still live after the walk: fragments of a failed parse.
    pub leaked: usize,
    /// Node pool capacity just before it was destroyed.
    pub capacity: usize,
    /// Free node slots just before the pool was destroyed.
    pub free_slots: usize,
}

/// Collects handles in post-order, so children come before their parent.
#[derive(Default)]
struct Collector {
    ids: Vec<NodeId>,
}

impl Visitor for Collector {
    fn exit(&mut self, visit: Visit<'_>) -> VisitFlow {
        self.ids.push(visit.id);
        VisitFlow::Continue
    }
}

pub(crate) fn free(
    root: Option<NodeId>,
    mut nodes: Pool<Node>,
    tokens: Pool<Token>,
) -> TeardownReport {
    let mut collector = Collector::default();
    if let Some(root) = root {
        if let Err(err) = traverse(&nodes, root, &mut collector) {
            warn!(%err, "tree walk stopped early");
        }
    }

    let mut released = 0;
    for id in collector.ids {
        if nodes.release(id).is_ok() {
            released += 1;
        }
    }

    let capacity = nodes.capacity();
    let free_slots = nodes.free_slots();
    let leaked = nodes.destroy();
    let stale_tokens = tokens.destroy();
    debug!(released, leaked, stale_tokens, "parse result freed");

    TeardownReport {
        released,
        leaked,
        capacity,
        free_slots,
    }
}
