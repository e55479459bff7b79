//! A snapshot of one accessibility node.

use std::fmt::Debug;

use tracing::trace;

use crate::{
    geom::Rect,
    provider::AxProvider,
    role::{Action, Role},
};

/// A node handle plus the attributes read from it.
///
/// Attributes are read once, when the node is first reached, and never
/// refreshed. The clipped frame is imposed by whoever discovered the node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<H> {
    /// Provider handle.
    handle: H,
    /// Role at read time.
    role: Role,
    /// Unclipped frame.
    frame: Rect,
    /// Actions at read time.
    actions: Vec<Action>,
    /// Frame after intersecting with the inherited clip rect.
    clipped_frame: Option<Rect>,
}

impl<H> Node<H> {
    /// Build a node from already known attributes.
    pub fn new(handle: H, role: Role, frame: Rect, actions: Vec<Action>) -> Self {
        Self {
            handle,
            role,
            frame,
            actions,
            clipped_frame: None,
        }
    }

    /// Read a node's attributes through `provider`. Returns `None` if any of
    /// role, frame or actions cannot be read.
    pub fn fetch<P>(provider: &P, handle: H) -> Option<Self>
    where
        P: AxProvider<Handle = H> + ?Sized,
        H: Clone + Debug,
    {
        let role = provider.role(&handle);
        let frame = provider.frame(&handle);
        let actions = provider.actions(&handle);
        match (role, frame, actions) {
            (Some(role), Some(frame), Some(actions)) => {
                Some(Self::new(handle, role, frame, actions))
            }
            _ => {
                trace!(node = ?handle, "node_unreadable");
                None
            }
        }
    }

    /// Provider handle.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Role.
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Unclipped frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Actions.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Clipped frame, if a clip was imposed.
    pub fn clipped_frame(&self) -> Option<Rect> {
        self.clipped_frame
    }

    /// The frame to draw against: the clipped frame when present.
    pub fn effective_frame(&self) -> Rect {
        self.clipped_frame.unwrap_or(self.frame)
    }

    /// Impose a clipped frame. Only the first call has an effect; returns
    /// whether this call set it.
    pub fn set_clipped_frame(&mut self, rect: Rect) -> bool {
        if self.clipped_frame.is_some() {
            return false;
        }
        self.clipped_frame = Some(rect);
        true
    }

    /// True when the node exposes an action that warrants a hint.
    pub fn has_meaningful_action(&self) -> bool {
        self.actions.iter().any(|a| !a.is_incidental())
    }
}
