//! Dirty flag tracking for widget nodes.

use bitflags::bitflags;

bitflags! {
    /// What changed on a widget since the last render pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE       = 0;

        /// Position or size changed.
        const LAYOUT     = 1 << 0;

        /// A child was added, removed, moved or hidden.
        const CHILDREN   = 1 << 1;

        /// A color slot was overridden.
        const COLOR      = 1 << 2;

        /// Visible/hidden toggle changed.
        const VISIBILITY = 1 << 3;
    }
}

impl DirtyFlags {
    /// Returns true if only paint data changed (no geometry or structure).
    #[inline]
    pub fn is_paint_only(&self) -> bool {
        !self.is_empty() && !self.intersects(Self::LAYOUT | Self::CHILDREN | Self::VISIBILITY)
    }

    /// Returns true if the parent must be repainted as well.
    ///
    /// Moving, resizing or hiding a widget uncovers part of its parent.
    #[inline]
    pub fn exposes_parent(&self) -> bool {
        self.intersects(Self::LAYOUT | Self::VISIBILITY)
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        Self::NONE
    }
}
