//! Scaffold service: realizes hierarchy descriptions in a scene host.
//!
//! Every public operation runs inside a single undo chunk; a host failure
//! partway through rolls the whole chunk back, so no half-built scaffold
//! ever survives in the scene.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::blueprints::{control_color, node_type};
use crate::domain::description::{Description, NodeDesc};
use crate::domain::HierarchyBuilder;
use crate::infrastructure::host::{
    with_undo_chunk, AttrSpec, AttrValue, HostError, NodeHandle, SceneHost,
};

/// Handles of the two master controls created by the simple rig setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RigControls {
    pub global_ctl: NodeHandle,
    pub local_ctl: NodeHandle,
}

/// Drives a scene host to build scaffold hierarchies.
pub struct ScaffoldService {
    builder: HierarchyBuilder,
}

impl Default for ScaffoldService {
    fn default() -> Self {
        Self::new()
    }
}

impl ScaffoldService {
    pub fn new() -> Self {
        Self {
            builder: HierarchyBuilder::new(),
        }
    }

    pub fn with_builder(builder: HierarchyBuilder) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &HierarchyBuilder {
        &self.builder
    }

    /// Realizes a description as group nodes in the host, parented under
    /// `parent` when given. Returns the root handles in input order.
    #[instrument(level = "debug", skip(self, host))]
    pub fn build_in_host(
        &self,
        description: &Description,
        host: &mut dyn SceneHost,
        parent: Option<NodeHandle>,
    ) -> ApplicationResult<Vec<NodeHandle>> {
        let roots = self.root_descs(description);

        with_undo_chunk(host, |host| {
            let mut registry = HashMap::new();
            let mut handles = Vec::with_capacity(roots.len());
            for root in &roots {
                handles.push(realize_into(root, host, parent, &mut registry)?);
            }
            Ok(handles)
        })
    }

    /// Builds the complete stock rig scaffold for `rig_name`: the default
    /// hierarchy with `_GRP` group suffixes, the master/local control pair,
    /// the global decompose-matrix wiring, geometry display overrides, and
    /// the control scale/visibility attributes.
    #[instrument(level = "debug", skip(self, host))]
    pub fn simple_rig_setup(
        &self,
        host: &mut dyn SceneHost,
        rig_name: &str,
    ) -> ApplicationResult<RigControls> {
        let rig_name = rig_name.trim();
        let valid = !rig_name.is_empty()
            && rig_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            return Err(ApplicationError::InvalidRigName(rig_name.to_string()));
        }

        let mut root = self.builder.template().clone();
        root.name = rig_name.to_string();
        let root = suffix_groups(root);
        debug!(rig = rig_name, nodes = root.node_count(), "building simple rig scaffold");

        with_undo_chunk(host, |host| {
            let mut registry = HashMap::new();
            realize_into(&root, host, None, &mut registry)?;

            let global = required(&registry, "Global_CTL_GRP")?;
            let local = required(&registry, "Local_CTL_GRP")?;
            let global_move = required(&registry, "GLOBAL_MOVE_GRP")?;
            let geo = required(&registry, "GEO_GRP")?;
            let render = required(&registry, "RENDER_GRP")?;
            let anim_proxy = required(&registry, "ANIM_PROXY_GRP")?;

            // The placement controls are controls, not groups
            host.rename(global, "Global_CTL")?;
            host.rename(local, "Local_CTL")?;

            // Global move follows the local control's world matrix
            let dcpm = create_utility(host, "DCPM", "GLOBAL_DCPM")?;
            host.connect_attr(local, "worldMatrix", dcpm, "inputMatrix")?;
            host.connect_attr(dcpm, "outputTranslate", global_move, "translate")?;
            host.connect_attr(dcpm, "outputRotate", global_move, "rotate")?;
            host.connect_attr(dcpm, "outputScale", global_move, "scale")?;

            // Geometry group displays as referenced by default
            host.set_attr(geo, "overrideEnabled", AttrValue::Int(1))?;
            host.set_attr(geo, "overrideDisplayType", AttrValue::Int(2))?;

            host.add_attr(local, &AttrSpec::double("localScale", 1.0, Some(0.01)))?;
            host.add_attr(global, &AttrSpec::double("globalScale", 1.0, Some(0.01)))?;
            host.add_attr(global, &AttrSpec::enumeration("GEO", &["-------"]))?;
            host.add_attr(
                global,
                &AttrSpec::enumeration("geoSelectable", &["Normal", "Template", "Reference"]),
            )?;
            host.add_attr(global, &AttrSpec::enumeration("geoVis", &["Proxy", "Render"]))?;

            host.connect_attr(global, "geoSelectable", geo, "overrideDisplayType")?;

            // Proxy/render visibility switch through a reverse node
            let reverse = create_utility(host, "REV", "Global_geoVis_REV")?;
            host.connect_attr(global, "geoVis", render, "visibility")?;
            host.connect_attr(global, "geoVis", reverse, "inputX")?;
            host.connect_attr(reverse, "outputX", anim_proxy, "visibility")?;

            for axis in ["X", "Y", "Z"] {
                host.connect_attr(local, "localScale", local, &format!("scale{axis}"))?;
                host.connect_attr(global, "globalScale", global, &format!("scale{axis}"))?;
            }

            // localScale/globalScale drive scaling, so the raw channels stay hidden
            for ctl in [local, global] {
                for attr in ["sx", "sy", "sz", "v"] {
                    host.lock_attr(ctl, attr, true)?;
                }
            }

            for (handle, color_name) in [(local, "orange"), (global, "yellow")] {
                if let Some(color) = control_color(color_name) {
                    host.set_color(handle, color)?;
                }
            }

            Ok(RigControls {
                global_ctl: global,
                local_ctl: local,
            })
        })
    }

    fn root_descs(&self, description: &Description) -> Vec<NodeDesc> {
        match description {
            Description::TemplateRoot(name) => {
                let mut root = self.builder.template().clone();
                root.name = name.clone();
                vec![root]
            }
            Description::Nodes(nodes) => nodes.clone(),
        }
    }
}

/// Creates the node tree in the host, recording every handle by name.
fn realize_into(
    desc: &NodeDesc,
    host: &mut dyn SceneHost,
    parent: Option<NodeHandle>,
    registry: &mut HashMap<String, NodeHandle>,
) -> Result<NodeHandle, HostError> {
    let handle = host.create_group(&desc.name)?;
    registry.insert(desc.name.clone(), handle);
    if let Some(parent) = parent {
        host.set_parent(handle, parent)?;
    }
    for child in &desc.children {
        realize_into(child, host, Some(handle), registry)?;
    }
    Ok(handle)
}

fn create_utility(
    host: &mut dyn SceneHost,
    alias: &str,
    name: &str,
) -> Result<NodeHandle, HostError> {
    let node_type =
        node_type(alias).ok_or_else(|| HostError::UnknownNodeType(alias.to_string()))?;
    host.create_node(node_type, name)
}

fn required(
    registry: &HashMap<String, NodeHandle>,
    name: &str,
) -> ApplicationResult<NodeHandle> {
    registry
        .get(name)
        .copied()
        .ok_or_else(|| ApplicationError::MissingTemplateNode(name.to_string()))
}

/// Appends the group suffix to every node below the root.
fn suffix_groups(mut root: NodeDesc) -> NodeDesc {
    fn walk(node: &mut NodeDesc) {
        for child in &mut node.children {
            child.name = format!("{}_GRP", child.name);
            walk(child);
        }
    }
    walk(&mut root);
    root
}
