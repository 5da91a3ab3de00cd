//! # Snapshot Host
//!
//! An in-memory implementation of the reflection boundary.
//!
//! A snapshot is a frozen picture of some debuggee values: a table of type
//! sizes, a map of addressed memory cells, and a list of root values. Pointer
//! values are hex value texts resolved through the memory map, so
//! dereferencing and offset-based child construction behave the way they do
//! against a live process, including failing for unmapped addresses.
//!
//! Snapshots load from JSON (the CLI `render` command) or are assembled with
//! [`SnapshotBuilder`] (tests and doc examples).
//!
//! ## JSON layout
//!
//! ```json
//! {
//!   "types": { "int": 4 },
//!   "memory": [ { "address": "0x1000", "type": "int", "value": "7" } ],
//!   "roots": [ { "name": "x", "type": "int", "value": "7" } ]
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::error::{JuceViewError, JuceViewResult};
use crate::reflect::{TypeHandle, ValueHandle};
use crate::types::Address;

/// Byte size reported for every pointer type
pub const POINTER_SIZE: u64 = 8;

fn default_valid() -> bool
{
    true
}

/// One value in a snapshot: a typed node with optional text and members.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotNode
{
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub children: Vec<SnapshotNode>,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

impl SnapshotNode
{
    /// Create a node with no value, summary, or members
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self
    {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            value: None,
            summary: None,
            children: Vec::new(),
            valid: true,
        }
    }

    /// Set the raw value text
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self
    {
        self.value = Some(value.into());
        self
    }

    /// Set the host summary text
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self
    {
        self.summary = Some(summary.into());
        self
    }

    /// Append a member
    #[must_use]
    pub fn with_child(mut self, child: SnapshotNode) -> Self
    {
        self.children.push(child);
        self
    }

    /// Place `node` at a dotted member path, creating intermediate members
    ///
    /// The node is renamed to the last path segment. An existing member with
    /// that name is replaced.
    #[must_use]
    pub fn with_path(mut self, path: &str, node: SnapshotNode) -> Self
    {
        let mut segments: Vec<&str> = path.split('.').collect();
        let Some(last) = segments.pop() else {
            return self;
        };

        let mut parent = &mut self;
        for segment in segments {
            let position = match parent.children.iter().position(|child| child.name == segment) {
                Some(position) => position,
                None => {
                    parent.children.push(SnapshotNode::new(segment, "struct"));
                    parent.children.len() - 1
                }
            };
            parent = &mut parent.children[position];
        }

        let node = SnapshotNode { name: last.to_owned(), ..node };
        parent.children.retain(|child| child.name != last);
        parent.children.push(node);
        self
    }

    /// Mark the node as unreadable
    #[must_use]
    pub fn invalid(mut self) -> Self
    {
        self.valid = false;
        self
    }

    fn member(&self, name: &str) -> Option<&SnapshotNode>
    {
        self.children.iter().find(|child| child.name == name)
    }

    fn renamed(&self, name: impl Into<String>, type_name: Option<&str>) -> Self
    {
        SnapshotNode {
            name: name.into(),
            type_name: type_name.map_or_else(|| self.type_name.clone(), str::to_owned),
            ..self.clone()
        }
    }
}

#[derive(Debug, Deserialize)]
struct MemoryCell
{
    address: String,
    #[serde(flatten)]
    node: SnapshotNode,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotDocument
{
    #[serde(default)]
    types: BTreeMap<String, u64>,
    #[serde(default)]
    memory: Vec<MemoryCell>,
    #[serde(default)]
    roots: Vec<SnapshotNode>,
}

/// A loaded snapshot
#[derive(Debug, Default)]
pub struct Snapshot
{
    types: BTreeMap<String, u64>,
    memory: BTreeMap<Address, SnapshotNode>,
    roots: Vec<SnapshotNode>,
}

impl Snapshot
{
    /// Start assembling a snapshot in code
    pub fn builder() -> SnapshotBuilder
    {
        SnapshotBuilder::default()
    }

    /// Parse a snapshot from JSON text
    ///
    /// ## Errors
    ///
    /// - `Json`: the text is not a valid snapshot document
    /// - `Snapshot`: a memory cell address is not hex, or is listed twice
    pub fn from_json(text: &str) -> JuceViewResult<Arc<Self>>
    {
        let document: SnapshotDocument = serde_json::from_str(text)?;

        let mut memory = BTreeMap::new();
        for cell in document.memory {
            let address = Address::from_value_text(&cell.address)
                .ok_or_else(|| JuceViewError::Snapshot(format!("memory address {:?} is not hexadecimal", cell.address)))?;
            if memory.insert(address, cell.node).is_some() {
                return Err(JuceViewError::Snapshot(format!("memory address {address} listed twice")));
            }
        }

        debug!(types = document.types.len(), cells = memory.len(), roots = document.roots.len(), "snapshot parsed");
        Ok(Arc::new(Self { types: document.types, memory, roots: document.roots }))
    }

    /// Read and parse a snapshot file
    ///
    /// ## Errors
    ///
    /// `Io` if the file cannot be read, otherwise as [`Snapshot::from_json`].
    pub fn load(path: impl AsRef<Path>) -> JuceViewResult<Arc<Self>>
    {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Root values in document order
    pub fn roots(self: &Arc<Self>) -> Vec<SnapshotValue>
    {
        self.roots
            .iter()
            .map(|node| SnapshotValue { snapshot: Arc::clone(self), node: node.clone(), address: None })
            .collect()
    }

    /// Root value by name
    pub fn root(self: &Arc<Self>, name: &str) -> Option<SnapshotValue>
    {
        self.roots().into_iter().find(|value| value.node.name == name)
    }

    fn byte_size(&self, type_name: &str) -> u64
    {
        if type_name.trim_end().ends_with('*') {
            return POINTER_SIZE;
        }
        self.types.get(type_name).copied().unwrap_or(0)
    }
}

/// Assembles a [`Snapshot`] in code.
#[derive(Debug, Default)]
pub struct SnapshotBuilder
{
    snapshot: Snapshot,
}

impl SnapshotBuilder
{
    /// Declare the byte size of a type
    #[must_use]
    pub fn type_size(mut self, type_name: impl Into<String>, size: u64) -> Self
    {
        self.snapshot.types.insert(type_name.into(), size);
        self
    }

    /// Map a node at `address`
    #[must_use]
    pub fn memory(mut self, address: u64, node: SnapshotNode) -> Self
    {
        self.snapshot.memory.insert(Address::new(address), node);
        self
    }

    /// Add a root value
    #[must_use]
    pub fn root(mut self, node: SnapshotNode) -> Self
    {
        self.snapshot.roots.push(node);
        self
    }

    /// Finish the snapshot
    pub fn build(self) -> Arc<Snapshot>
    {
        Arc::new(self.snapshot)
    }
}

/// Type handle into a snapshot's type table
#[derive(Clone)]
pub struct SnapshotType
{
    snapshot: Arc<Snapshot>,
    name: String,
}

impl fmt::Debug for SnapshotType
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_tuple("SnapshotType").field(&self.name).finish()
    }
}

impl TypeHandle for SnapshotType
{
    fn name(&self) -> String
    {
        self.name.clone()
    }

    fn pointee_type(&self) -> Option<Self>
    {
        let pointee = self.name.trim_end().strip_suffix('*')?.trim_end();
        Some(SnapshotType { snapshot: Arc::clone(&self.snapshot), name: pointee.to_owned() })
    }

    fn pointer_type(&self) -> Self
    {
        SnapshotType { snapshot: Arc::clone(&self.snapshot), name: format!("{} *", self.name) }
    }

    fn byte_size(&self) -> u64
    {
        self.snapshot.byte_size(&self.name)
    }
}

/// Value handle into a snapshot
#[derive(Clone)]
pub struct SnapshotValue
{
    snapshot: Arc<Snapshot>,
    node: SnapshotNode,
    address: Option<Address>,
}

impl fmt::Debug for SnapshotValue
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("SnapshotValue")
            .field("name", &self.node.name)
            .field("type", &self.node.type_name)
            .field("address", &self.address)
            .finish()
    }
}

impl SnapshotValue
{
    /// Address this value was read from, if it came from the memory map
    pub fn address(&self) -> Option<Address>
    {
        self.address
    }

    fn pointer_target(&self) -> Option<Address>
    {
        self.node.value.as_deref().and_then(Address::from_value_text)
    }

    fn at(&self, node: SnapshotNode, address: Option<Address>) -> Self
    {
        SnapshotValue { snapshot: Arc::clone(&self.snapshot), node, address }
    }
}

impl ValueHandle for SnapshotValue
{
    type Type = SnapshotType;

    fn name(&self) -> String
    {
        self.node.name.clone()
    }

    fn is_valid(&self) -> bool
    {
        self.node.valid
    }

    fn child_member(&self, name: &str) -> Option<Self>
    {
        self.node.member(name).map(|child| self.at(child.clone(), None))
    }

    fn value_text(&self) -> Option<String>
    {
        self.node.value.clone()
    }

    fn summary(&self) -> Option<String>
    {
        self.node.summary.clone()
    }

    fn value_type(&self) -> Self::Type
    {
        SnapshotType { snapshot: Arc::clone(&self.snapshot), name: self.node.type_name.clone() }
    }

    fn cast(&self, ty: &Self::Type) -> Option<Self>
    {
        let mut node = self.node.renamed(self.node.name.clone(), Some(ty.name.as_str()));
        // Storage without value text reinterprets as the address it lives at.
        if node.value.is_none() {
            node.value = self.address.map(|address| format!("0x{:x}", address.value()));
        }
        Some(self.at(node, self.address))
    }

    fn dereference(&self) -> Option<Self>
    {
        let target = self.pointer_target().filter(|address| !address.is_null())?;
        let node = self.snapshot.memory.get(&target)?;
        Some(self.at(node.renamed(format!("*{}", self.node.name), None), Some(target)))
    }

    fn create_child_at_offset(&self, name: &str, offset: u64, ty: &Self::Type) -> JuceViewResult<Self>
    {
        let base = self
            .pointer_target()
            .ok_or_else(|| JuceViewError::Snapshot(format!("{} does not hold a pointer", self.node.name)))?;
        let target = base.checked_add(offset).ok_or(JuceViewError::AddressOverflow { base, offset })?;
        let node = self.snapshot.memory.get(&target).ok_or(JuceViewError::MemoryUnavailable(target))?;

        Ok(self.at(node.renamed(name, Some(ty.name.as_str())), Some(target)))
    }

    fn find_type(&self, name: &str) -> Option<Self::Type>
    {
        self.snapshot
            .types
            .contains_key(name)
            .then(|| SnapshotType { snapshot: Arc::clone(&self.snapshot), name: name.to_owned() })
    }
}
