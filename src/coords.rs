//! Flat per-node coordinate storage.

use crate::error::{GraphError, Result};
use crate::NodeId;

/// Parallel-array store of per-node latitude/longitude and optional
/// elevation.
///
/// Writes store values as-is, without range validation: corrupt import data
/// is cataloged later by [`crate::diagnostics::find_problems`] instead of
/// aborting the build. Reads are bounds-checked and never grow the arrays.
#[derive(Debug, Default)]
pub struct CoordStore {
    lats: Vec<f64>,
    lons: Vec<f64>,
    eles: Option<Vec<f64>>,
}

impl CoordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that also keeps per-node elevation.
    pub fn with_elevation() -> Self {
        Self {
            eles: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> u32 {
        self.lats.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.lats.is_empty()
    }

    pub fn has_elevation(&self) -> bool {
        self.eles.is_some()
    }

    /// Allocates the next node id. Ids are handed out in monotonically
    /// increasing order and never reused.
    pub(crate) fn push(&mut self, lat: f64, lon: f64, ele: f64) -> NodeId {
        let id = self.lats.len() as NodeId;
        self.lats.push(lat);
        self.lons.push(lon);
        if let Some(eles) = &mut self.eles {
            eles.push(ele);
        }
        id
    }

    /// Updates the coordinate of an already-allocated node.
    pub fn set(&mut self, node: NodeId, lat: f64, lon: f64) -> Result<()> {
        let i = self.check(node)?;
        self.lats[i] = lat;
        self.lons[i] = lon;
        Ok(())
    }

    /// Updates coordinate and elevation of an already-allocated node.
    pub fn set_with_ele(&mut self, node: NodeId, lat: f64, lon: f64, ele: f64) -> Result<()> {
        let i = self.check(node)?;
        let eles = self.eles.as_mut().ok_or_else(|| {
            GraphError::InvalidArgument("elevation is not enabled for this graph".into())
        })?;
        self.lats[i] = lat;
        self.lons[i] = lon;
        eles[i] = ele;
        Ok(())
    }

    pub fn lat(&self, node: NodeId) -> Result<f64> {
        self.check(node).map(|i| self.lats[i])
    }

    pub fn lon(&self, node: NodeId) -> Result<f64> {
        self.check(node).map(|i| self.lons[i])
    }

    pub fn ele(&self, node: NodeId) -> Result<f64> {
        let i = self.check(node)?;
        let eles = self.eles.as_ref().ok_or_else(|| {
            GraphError::InvalidArgument("elevation is not enabled for this graph".into())
        })?;
        Ok(eles[i])
    }

    fn check(&self, node: NodeId) -> Result<usize> {
        if (node as usize) < self.lats.len() {
            Ok(node as usize)
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                nodes: self.len(),
            })
        }
    }
}
