//! Graph facade composing coordinate and edge storage.

use tracing::info;

use crate::coords::CoordStore;
use crate::distance::{haversine_distance, Point};
use crate::edges::{EdgeExplorer, EdgeStore, EdgeView, NO_EDGE};
use crate::error::{GraphError, Result};
use crate::{EdgeId, NodeId};

/// Array-backed directed multigraph of road junctions and segments.
///
/// Construction is single-writer: the import layer calls [`add_node`],
/// [`create_edge`] and the setters, then [`freeze`]s the graph and hands it
/// to concurrent readers. Readers traverse through per-thread
/// [`EdgeExplorer`]s; nothing here blocks or performs I/O.
///
/// [`add_node`]: Self::add_node
/// [`create_edge`]: Self::create_edge
/// [`freeze`]: Self::freeze
#[derive(Debug, Default)]
pub struct RoutingGraph {
    coords: CoordStore,
    edges: EdgeStore,
    frozen: bool,
}

impl RoutingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph that also stores per-node elevation.
    pub fn with_elevation() -> Self {
        Self {
            coords: CoordStore::with_elevation(),
            ..Self::default()
        }
    }

    /// Number of allocated nodes.
    pub fn node_count(&self) -> u32 {
        self.coords.len()
    }

    /// Number of stored edges. Each stored edge is traversable in both
    /// directions.
    pub fn edge_count(&self) -> u32 {
        self.edges.len()
    }

    /// Read access to the per-node coordinates.
    pub fn node_access(&self) -> &CoordStore {
        &self.coords
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Ends the single-writer construction phase. After this every mutating
    /// call fails with [`GraphError::Frozen`]; the graph itself is safe to
    /// share across reader threads.
    pub fn freeze(&mut self) {
        self.frozen = true;
        info!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            "graph frozen"
        );
    }

    /// Allocates the next node id with the given coordinate. Values are
    /// stored unvalidated; run [`crate::diagnostics::find_problems`] before
    /// expensive preprocessing to catch corrupt input.
    pub fn add_node(&mut self, lat: f64, lon: f64) -> Result<NodeId> {
        self.check_writable()?;
        let id = self.coords.push(lat, lon, 0.0);
        self.edges.ensure_nodes(self.coords.len());
        Ok(id)
    }

    /// [`add_node`](Self::add_node) with elevation; requires a graph built
    /// via [`with_elevation`](Self::with_elevation).
    pub fn add_node_with_ele(&mut self, lat: f64, lon: f64, ele: f64) -> Result<NodeId> {
        self.check_writable()?;
        if !self.coords.has_elevation() {
            return Err(GraphError::InvalidArgument(
                "elevation is not enabled for this graph".into(),
            ));
        }
        let id = self.coords.push(lat, lon, ele);
        self.edges.ensure_nodes(self.coords.len());
        Ok(id)
    }

    /// Updates the coordinate of an existing node. Meant for fixing up a
    /// node before its first use; the node id must already be allocated.
    pub fn set_coordinate(&mut self, node: NodeId, lat: f64, lon: f64) -> Result<()> {
        self.check_writable()?;
        self.coords.set(node, lat, lon)
    }

    pub fn set_coordinate_with_ele(
        &mut self,
        node: NodeId,
        lat: f64,
        lon: f64,
        ele: f64,
    ) -> Result<()> {
        self.check_writable()?;
        self.coords.set_with_ele(node, lat, lon, ele)
    }

    /// Creates an edge between two existing nodes and prepends it onto both
    /// adjacency chains in O(1). The stored length is initialized to the
    /// great-circle distance between the endpoints; attach shape points via
    /// [`set_edge_geometry`](Self::set_edge_geometry) to refine it.
    ///
    /// Both endpoints must already be allocated: edges never create nodes.
    pub fn create_edge(&mut self, base: NodeId, adj: NodeId) -> Result<EdgeId> {
        self.check_writable()?;
        self.check_node(base)?;
        self.check_node(adj)?;
        let length_m = haversine_distance(
            self.coords.lat(base)?,
            self.coords.lon(base)?,
            self.coords.lat(adj)?,
            self.coords.lon(adj)?,
        );
        let edge = self.edges.create(base, adj);
        self.edges.set_length(edge, length_m)?;
        Ok(edge)
    }

    /// Overrides the stored length of an edge in meters.
    pub fn set_edge_length(&mut self, edge: EdgeId, length_m: f64) -> Result<()> {
        self.check_writable()?;
        self.edges.set_length(edge, length_m)
    }

    /// Stores the opaque flag word of an edge. The core never interprets
    /// it; access and turn layers own its encoding.
    pub fn set_edge_flags(&mut self, edge: EdgeId, flags: u32) -> Result<()> {
        self.check_writable()?;
        self.edges.set_flags(edge, flags)
    }

    /// Attaches intermediate shape points (base→adj order) to an edge and
    /// re-derives its stored length over the full polyline
    /// base → points… → adj.
    pub fn set_edge_geometry(&mut self, edge: EdgeId, points: Vec<Point>) -> Result<()> {
        self.check_writable()?;
        let (base, adj) = self.edges.endpoints(edge)?;
        let mut length_m = 0.0;
        let mut prev = Point::new(self.coords.lat(base)?, self.coords.lon(base)?);
        let end = Point::new(self.coords.lat(adj)?, self.coords.lon(adj)?);
        for p in points.iter().copied().chain(std::iter::once(end)) {
            length_m += haversine_distance(prev.lat, prev.lon, p.lat, p.lon);
            prev = p;
        }
        self.edges.set_geometry(edge, points)?;
        self.edges.set_length(edge, length_m)
    }

    /// Intermediate shape points of an edge in stored base→adj order;
    /// empty for plain straight segments.
    pub fn edge_geometry(&self, edge: EdgeId) -> Result<&[Point]> {
        self.edges.geometry(edge)
    }

    /// Resolves an edge relative to the caller-supplied far node, viewing
    /// the same stored record from either side.
    pub fn edge_state(&self, edge: EdgeId, adj_node: NodeId) -> Result<EdgeView> {
        self.edges.view(edge, adj_node)
    }

    /// The edge in its stored base→adj orientation.
    pub fn edge(&self, edge: EdgeId) -> Result<EdgeView> {
        self.edges.storage_view(edge)
    }

    /// A fresh traversal cursor. Create one per thread; explorers are
    /// reusable across nodes but never shareable between threads.
    pub fn create_edge_explorer(&self) -> EdgeExplorer<'_> {
        EdgeExplorer::new(&self.edges)
    }

    /// A traversal cursor that only yields edges accepted by `filter`.
    pub fn create_edge_explorer_with<'g>(
        &'g self,
        filter: impl Fn(&EdgeView) -> bool + Send + Sync + 'g,
    ) -> EdgeExplorer<'g> {
        EdgeExplorer::with_filter(&self.edges, filter)
    }

    /// The endpoint shared by two edges.
    ///
    /// Loop edges are rejected: a loop shares its single node ambiguously
    /// with every edge touching it, so the query refuses to guess. Two
    /// edges without any shared endpoint are likewise an error.
    pub fn common_node(&self, edge1: EdgeId, edge2: EdgeId) -> Result<NodeId> {
        let (base1, adj1) = self.edges.endpoints(edge1)?;
        let (base2, adj2) = self.edges.endpoints(edge2)?;
        if base1 == adj1 {
            return Err(GraphError::InvalidArgument(format!(
                "edge {edge1} is a loop edge, common node is ambiguous"
            )));
        }
        if base2 == adj2 {
            return Err(GraphError::InvalidArgument(format!(
                "edge {edge2} is a loop edge, common node is ambiguous"
            )));
        }
        if base1 == base2 || base1 == adj2 {
            Ok(base1)
        } else if adj1 == base2 || adj1 == adj2 {
            Ok(adj1)
        } else {
            Err(GraphError::InvalidArgument(format!(
                "edges {edge1} and {edge2} share no endpoint"
            )))
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.frozen {
            Err(GraphError::Frozen)
        } else {
            Ok(())
        }
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                nodes: self.node_count(),
            })
        }
    }
}

/// Far endpoint of `edge` relative to `node`.
///
/// When `edge` is the [`NO_EDGE`] sentinel, `node` is returned unchanged
/// instead of dereferencing anything: callers routinely thread "no edge
/// yet" state through the same path as a real edge id.
pub fn adj_node(graph: &RoutingGraph, edge: EdgeId, node: NodeId) -> Result<NodeId> {
    if edge == NO_EDGE {
        return Ok(node);
    }
    let (base, adj) = graph.edges.endpoints(edge)?;
    if base == node {
        Ok(adj)
    } else if adj == node {
        Ok(base)
    } else {
        Err(GraphError::InvalidArgument(format!(
            "node {node} is not an endpoint of edge {edge}"
        )))
    }
}
