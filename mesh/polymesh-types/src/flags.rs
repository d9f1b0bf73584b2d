//! Per-element bit flags.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// State bits carried by every [`PolyVertex`](crate::PolyVertex).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct VertexFlags: u32 {
        /// Vertex lies on a boundary edge. Set by the adjacency rebuild.
        const BORDER = 0b0000_0001;
    }
}

bitflags::bitflags! {
    /// State bits carried by every [`PolyFace`](crate::PolyFace).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct FaceFlags: u32 {
        /// Face has at least one boundary edge. Set by the adjacency rebuild.
        const BORDER = 0b0000_0001;
        /// The last plane fit over this face was degenerate.
        const DEGENERATE = 0b0000_0010;
    }
}
