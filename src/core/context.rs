//! Per-Container Query Context
//!
//! Aggregates everything the pipeline needs to know about one switch
//! container: its switch group, the group's switches, the container's
//! children, and the assignments already recorded on the authoring side.
//! Rebuilt from scratch for every container and discarded afterwards.

use crate::waapi::{SwitchContainerOps, WwiseObject};
use tracing::{debug, error};

/// Snapshot of one switch container, as fetched from the authoring tool.
#[derive(Debug, Clone)]
pub struct ContainerContext {
    /// The switch container being processed
    pub container: WwiseObject,
    /// The group the container routes on; `None` is a terminal failure for
    /// this container
    pub switch_group: Option<WwiseObject>,
    /// Switches of the group, in authoring order
    pub switches: Vec<WwiseObject>,
    /// Children of the container, in authoring order
    pub children: Vec<WwiseObject>,
    /// Existing assignments, resolved to `(child, switch)` object pairs
    pub assigned: Vec<(WwiseObject, WwiseObject)>,
}

impl ContainerContext {
    /// Query the authoring tool for the container's context.
    ///
    /// When the switch group cannot be resolved, the remaining queries are
    /// skipped and the context comes back empty apart from the container
    /// itself. Recorded assignments referencing an id outside the fetched
    /// switch or child lists are dropped with a diagnostic.
    pub fn query<C: SwitchContainerOps>(client: &mut C, container: WwiseObject) -> Self {
        let switch_group = client.resolve_switch_group(&container);
        let Some(group) = switch_group.as_ref() else {
            error!(container = %container.name, "Cannot get switch group");
            return Self {
                container,
                switch_group: None,
                switches: Vec::new(),
                children: Vec::new(),
                assigned: Vec::new(),
            };
        };

        let switches = client.list_switches(group);
        let children = client.list_children(&container);

        let mut assigned = Vec::new();
        for entry in client.existing_assignments(&container) {
            let Some(switch) = switches.iter().find(|s| s.id == entry.state_or_switch) else {
                error!(switch_id = %entry.state_or_switch, "Cannot find assigned switch object");
                continue;
            };
            let Some(child) = children.iter().find(|c| c.id == entry.child) else {
                error!(child_id = %entry.child, "Cannot find assigned child object");
                continue;
            };
            assigned.push((child.clone(), switch.clone()));
        }
        debug!(
            container = %container.name,
            switches = switches.len(),
            children = children.len(),
            assigned = assigned.len(),
            "Container context queried"
        );

        Self {
            container,
            switch_group,
            switches,
            children,
            assigned,
        }
    }

    /// Switches followed by children, the order naming and word mapping use.
    pub fn all_objects(&self) -> impl Iterator<Item = &WwiseObject> {
        self.switches.iter().chain(self.children.iter())
    }
}
