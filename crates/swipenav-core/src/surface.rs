//! Owner-held mapping from position to surface handle.
//!
//! The navigator never stores surfaces itself. It only knows which positions
//! are occupied and which one is in view; the owner resolves that position to
//! whatever handle it uses for its content (a view id, a widget, a window).

use crate::geometry::Position;
use crate::navigator::SurfaceQuery;

/// Surface handles for the five slots. The center is always occupied.
#[derive(Debug, Clone)]
pub struct SurfaceSlots<S> {
    center: S,
    auxiliary: [Option<S>; 4],
}

impl<S> SurfaceSlots<S> {
    /// Create slots with only a center surface.
    pub fn new(center: S) -> Self {
        Self {
            center,
            auxiliary: [None, None, None, None],
        }
    }

    fn aux_index(position: Position) -> Option<usize> {
        position.index().checked_sub(1)
    }

    /// The center surface.
    pub fn center(&self) -> &S {
        &self.center
    }

    /// Surface at `position`, if one is registered.
    pub fn get(&self, position: Position) -> Option<&S> {
        match Self::aux_index(position) {
            None => Some(&self.center),
            Some(i) => self.auxiliary[i].as_ref(),
        }
    }

    /// Whether a surface is registered at `position`.
    pub fn is_occupied(&self, position: Position) -> bool {
        self.get(position).is_some()
    }

    /// Put `surface` into an auxiliary slot, returning the previous one.
    ///
    /// The center slot is fixed; for `Position::Center` the given surface is
    /// handed straight back and nothing changes.
    pub fn replace(&mut self, position: Position, surface: Option<S>) -> Option<S> {
        match Self::aux_index(position) {
            None => surface,
            Some(i) => std::mem::replace(&mut self.auxiliary[i], surface),
        }
    }

    /// Swap the center surface, returning the old one.
    pub fn replace_center(&mut self, surface: S) -> S {
        std::mem::replace(&mut self.center, surface)
    }

    /// The surface currently at rest in view, resolved through `query`.
    pub fn active(&self, query: &impl SurfaceQuery) -> Option<&S> {
        Position::ALL
            .into_iter()
            .find(|&p| query.is_active(p))
            .and_then(|p| self.get(p))
    }

    /// Every registered surface with its position.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &S)> {
        Position::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|s| (p, s)))
    }
}
