// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The session controller.

use alloc::{string::String, vec::Vec};
use core::fmt;

use hashbrown::HashMap;
use kurbo::Point;
use outline_placement::{
    DropIndicator, LayoutRow, Placement, RowLayout, compute_placement, indentation,
};
use outline_tree::{Node, NodeId, Tree, TreeError};

use crate::config::Config;
use crate::drag::{DragSession, DropOutcome};
use crate::error::{InitError, OutlineError};
use crate::event::OutlineEvent;

/// An outline table controller.
///
/// An `Outliner` starts detached. [`Outliner::attach`] hands it the rows; from then on it
/// owns the tree, the row layout, and at most one drag session, and queues an
/// [`OutlineEvent`] for every change the host should know about. Every operation other than
/// [`Outliner::attach`] and [`Outliner::take_events`] fails with
/// [`InitError::NotAnInstance`] while detached.
pub struct Outliner<T> {
    config: Config,
    state: Option<Attached<T>>,
    events: Vec<OutlineEvent>,
}

struct Attached<T> {
    tree: Tree<T>,
    layout: RowLayout,
    heights: HashMap<NodeId, f64>,
    drag: Option<DragSession>,
}

impl<T> fmt::Debug for Outliner<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Outliner");
        s.field("config", &self.config);
        match &self.state {
            Some(state) => s
                .field("tree", &state.tree)
                .field("visible_rows", &state.layout.len())
                .field("drag", &state.drag),
            None => s.field("tree", &"<detached>"),
        };
        s.field("pending_events", &self.events.len())
            .finish_non_exhaustive()
    }
}

impl<T> Attached<T> {
    fn relayout(&mut self, config: &Config) {
        let Self {
            tree,
            layout,
            heights,
            drag,
        } = self;
        let default = config.default_row_height;
        layout.rebuild(tree, &|node| {
            heights.get(&node.id()).copied().unwrap_or(default)
        });
        if let Some(drag) = drag {
            drag.invalidate(config.poll_interval_ms);
        }
    }
}

impl<T> Outliner<T> {
    /// Create a detached outliner.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
            events: Vec::new(),
        }
    }

    /// Current settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the outliner is attached.
    pub fn is_attached(&self) -> bool {
        self.state.is_some()
    }

    fn attached(&self) -> Result<&Attached<T>, InitError> {
        self.state.as_ref().ok_or(InitError::NotAnInstance)
    }

    fn attached_mut(&mut self) -> Result<&mut Attached<T>, InitError> {
        self.state.as_mut().ok_or(InitError::NotAnInstance)
    }

    /// The tree.
    pub fn tree(&self) -> Result<&Tree<T>, InitError> {
        Ok(&self.attached()?.tree)
    }

    /// Visible rows in display order.
    pub fn visible_rows(&self) -> Result<&[LayoutRow], InitError> {
        Ok(self.attached()?.layout.rows())
    }

    /// Attach to rows given in display order.
    ///
    /// Builds the tree, collapses or expands every parent according to
    /// [`Config::initially_hidden`], lays the rows out, and queues [`OutlineEvent::Init`].
    pub fn attach(&mut self, rows: impl IntoIterator<Item = Node<T>>) -> Result<(), OutlineError> {
        if self.state.is_some() {
            return Err(InitError::AlreadyAttached.into());
        }
        let mut tree = Tree::from_nodes(rows)?;
        if tree.is_empty() {
            return Err(InitError::Empty.into());
        }
        tree.apply_initial_state(self.config.initially_hidden);

        let mut state = Attached {
            tree,
            layout: RowLayout::new(),
            heights: HashMap::new(),
            drag: None,
        };
        state.relayout(&self.config);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            rows = state.tree.len(),
            visible = state.layout.len(),
            "outliner attached"
        );
        self.state = Some(state);
        self.events.push(OutlineEvent::Init);
        Ok(())
    }

    /// Attach to rows described by their id attribute, class string, and payload.
    ///
    /// Markers are decoded with [`Config::markers`].
    pub fn attach_markup<'a>(
        &mut self,
        rows: impl IntoIterator<Item = (&'a str, &'a str, T)>,
    ) -> Result<(), OutlineError> {
        if self.state.is_some() {
            return Err(InitError::AlreadyAttached.into());
        }
        let markers = &self.config.markers;
        let nodes = rows
            .into_iter()
            .map(|(id_attr, class, payload)| {
                markers
                    .decode(id_attr, class)
                    .map(|row| row.into_node(payload))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.attach(nodes)
    }

    /// Detach, discarding the tree, layout, and any drag. Queues [`OutlineEvent::Destroy`].
    ///
    /// Returns the tree so the host can keep the final structure.
    pub fn destroy(&mut self) -> Result<Tree<T>, InitError> {
        let state = self.state.take().ok_or(InitError::NotAnInstance)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(rows = state.tree.len(), "outliner destroyed");
        self.events.push(OutlineEvent::Destroy);
        Ok(state.tree)
    }

    /// Change settings in place.
    ///
    /// Rows are laid out again, so changes to [`Config::default_row_height`] apply at once.
    pub fn update_settings(&mut self, update: impl FnOnce(&mut Config)) -> Result<(), InitError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        update(&mut self.config);
        state.relayout(&self.config);
        Ok(())
    }

    /// Set the distance from the table's left edge to the level-0 column.
    pub fn set_base_indent(&mut self, px: f64) -> Result<(), InitError> {
        self.update_settings(|config| config.base_indent = px)
    }

    /// Place the table: top-left corner and width. A drag in progress loses its target.
    pub fn set_table_frame(&mut self, origin: Point, width: f64) -> Result<(), InitError> {
        let interval = self.config.poll_interval_ms;
        let state = self.attached_mut()?;
        state.layout.set_frame(origin, width);
        if let Some(drag) = &mut state.drag {
            drag.invalidate(interval);
        }
        Ok(())
    }

    /// Record the measured height of a row.
    ///
    /// The height is kept while the row is hidden and reused when it shows again. Negative
    /// heights count as zero; NaN and infinities are refused. A drag in progress loses its
    /// target.
    pub fn set_row_height(&mut self, id: NodeId, height: f64) -> Result<(), OutlineError> {
        let interval = self.config.poll_interval_ms;
        let state = self.attached_mut()?;
        state.tree.index_of(id)?;
        if !height.is_finite() {
            return Err(OutlineError::NonFiniteHeight(id));
        }
        state.heights.insert(id, height);
        if let Some(slot) = state.layout.slot_of(id) {
            state.layout.set_height(slot, height);
        }
        if let Some(drag) = &mut state.drag {
            drag.invalidate(interval);
        }
        Ok(())
    }

    /// Flip a parent between expanded and collapsed. Returns whether anything changed.
    pub fn toggle_node(&mut self, id: NodeId) -> Result<bool, OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        let changed = state.tree.toggle(id)?;
        if changed {
            state.relayout(&self.config);
        }
        Ok(changed)
    }

    /// Expand a parent. Returns whether anything changed.
    pub fn expand_node(&mut self, id: NodeId) -> Result<bool, OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        let changed = state.tree.expand(id)?;
        if changed {
            state.relayout(&self.config);
        }
        Ok(changed)
    }

    /// Collapse a parent. Returns whether anything changed.
    pub fn collapse_node(&mut self, id: NodeId) -> Result<bool, OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        let changed = state.tree.collapse(id)?;
        if changed {
            state.relayout(&self.config);
        }
        Ok(changed)
    }

    /// Create a node under `parent` (or a new root). Queues [`OutlineEvent::NodeAdded`].
    ///
    /// New children go first under their parent; new roots go first or last according to
    /// [`Config::insert_at_front`].
    pub fn add_node(&mut self, parent: Option<NodeId>, payload: T) -> Result<NodeId, OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        let id = state
            .tree
            .add_node(parent, payload, self.config.insert_at_front)?;
        state.relayout(&self.config);
        self.events.push(OutlineEvent::NodeAdded { id, parent });
        Ok(id)
    }

    /// Remove a node with its family. Queues [`OutlineEvent::NodeRemoved`].
    ///
    /// A drag of any removed node is cancelled. Returns the removed nodes.
    pub fn remove_node(&mut self, id: NodeId) -> Result<Vec<Node<T>>, OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        let removed = state.tree.remove_node(id)?;
        let ids: Vec<NodeId> = removed.iter().map(Node::id).collect();
        for gone in &ids {
            state.heights.remove(gone);
        }
        if state
            .drag
            .as_ref()
            .is_some_and(|drag| ids.contains(&drag.node()))
        {
            state.drag = None;
        }
        state.relayout(&self.config);
        self.events.push(OutlineEvent::NodeRemoved { id, removed: ids });
        Ok(removed)
    }

    /// Start dragging `node`'s family, replacing any drag in progress.
    pub fn drag_start(&mut self, node: NodeId, pointer: Point, now_ms: u64) -> Result<(), OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        state.tree.index_of(node)?;
        state.drag = Some(DragSession::new(
            node,
            pointer,
            now_ms,
            self.config.poll_interval_ms,
        ));

        #[cfg(feature = "tracing")]
        tracing::debug!(node = node.get(), x = pointer.x, y = pointer.y, "drag started");
        Ok(())
    }

    /// Feed a pointer sample to the drag in progress.
    ///
    /// Samples the throttle drops leave the previous placement in place. Returns the current
    /// placement, or `None` when there is no drag or no valid target under the pointer.
    pub fn drag_move(&mut self, pointer: Point, now_ms: u64) -> Result<Option<Placement>, OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        let Attached {
            tree, layout, drag, ..
        } = state;
        let Some(drag) = drag else {
            return Ok(None);
        };
        if !drag.sample(pointer, now_ms) {
            return Ok(drag.placement());
        }

        let params = self.config.placement_params();
        let placement = compute_placement(tree, layout, pointer, drag.node(), &params)?;
        let indicator = placement.and_then(|placement| {
            DropIndicator::for_placement(layout, &placement, &params, self.config.indicator_height)
        });
        drag.set_target(placement, indicator);
        Ok(placement)
    }

    /// Release the drag.
    ///
    /// Commits the current placement, if any, and queues [`OutlineEvent::Appended`],
    /// [`OutlineEvent::InsertedBefore`] or [`OutlineEvent::InsertedAfter`]. A placement that
    /// would move the family into itself is refused with [`OutlineEvent::DropRejected`] and
    /// leaves the tree unchanged. The drag session ends either way.
    pub fn drag_end(&mut self) -> Result<DropOutcome, OutlineError> {
        let state = self.state.as_mut().ok_or(InitError::NotAnInstance)?;
        let Some(drag) = state.drag.take() else {
            return Ok(DropOutcome::NoTarget);
        };
        let node = drag.node();
        let Some(placement) = drag.placement() else {
            #[cfg(feature = "tracing")]
            tracing::debug!(node = node.get(), "drag ended without a target");
            return Ok(DropOutcome::NoTarget);
        };

        match state.tree.move_family(node, placement.action) {
            Ok(()) => {
                state.relayout(&self.config);
                self.events
                    .push(OutlineEvent::committed(node, placement.action));

                #[cfg(feature = "tracing")]
                tracing::debug!(node = node.get(), action = ?placement.action, "drop committed");
                Ok(DropOutcome::Committed(placement.action))
            }
            Err(TreeError::InvalidDrop { node, target }) => {
                self.events.push(OutlineEvent::DropRejected { node, target });

                #[cfg(feature = "tracing")]
                tracing::debug!(node = node.get(), target = target.get(), "drop rejected");
                Ok(DropOutcome::Rejected { node, target })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Abandon the drag in progress. Returns whether there was one.
    pub fn drag_cancel(&mut self) -> Result<bool, InitError> {
        let cancelled = self.attached_mut()?.drag.take().is_some();

        #[cfg(feature = "tracing")]
        {
            if cancelled {
                tracing::debug!("drag cancelled");
            }
        }
        Ok(cancelled)
    }

    /// The drag in progress.
    pub fn drag_session(&self) -> Option<&DragSession> {
        self.state.as_ref()?.drag.as_ref()
    }

    /// Placement of the drag in progress.
    pub fn placement(&self) -> Option<Placement> {
        self.drag_session()?.placement()
    }

    /// Drop indicator of the drag in progress.
    pub fn drop_indicator(&self) -> Option<DropIndicator> {
        self.drag_session()?.indicator()
    }

    /// Left margin of `id`'s expand/collapse icon.
    pub fn indentation_of(&self, id: NodeId) -> Result<f64, OutlineError> {
        let level = self.attached()?.tree.level(id)?;
        Ok(indentation(level, self.config.indent_unit))
    }

    fn node(&self, id: NodeId) -> Result<&Node<T>, OutlineError> {
        let tree = &self.attached()?.tree;
        Ok(tree.get(id).ok_or(TreeError::NotAMember(id))?)
    }

    /// Row id attribute for `id`.
    pub fn row_id(&self, id: NodeId) -> Result<String, OutlineError> {
        self.node(id)?;
        Ok(self.config.markers.format_id(id))
    }

    /// Canonical marker classes for `id`'s row.
    pub fn row_class(&self, id: NodeId) -> Result<String, OutlineError> {
        Ok(self.config.markers.encode(self.node(id)?))
    }

    /// Bring a host class string for `id`'s row up to date, keeping foreign classes.
    pub fn reconcile_class(&self, id: NodeId, class: &str) -> Result<String, OutlineError> {
        Ok(self.config.markers.reconcile(class, self.node(id)?))
    }

    /// Markup for `id`'s row from the configured template.
    pub fn render_row(&self, id: NodeId) -> Result<String, OutlineError> {
        let node = self.node(id)?;
        let markers = &self.config.markers;
        Ok(self
            .config
            .template
            .render_row(&markers.format_id(id), &markers.encode(node)))
    }

    /// Drain queued events.
    pub fn take_events(&mut self) -> Vec<OutlineEvent> {
        core::mem::take(&mut self.events)
    }
}
