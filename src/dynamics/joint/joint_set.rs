use super::Joint;
use crate::data::{Arena, Index};

/// The unique identifier of a joint added to a world.
///
/// The handle records the world that minted it, the slot of the joint in the
/// joint arena, and the generation of that slot. It is only valid while the
/// generation matches the slot's current generation; removing the joint (and
/// any later reuse of its slot) invalidates the handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct JointHandle {
    pub(crate) world: u32,
    pub(crate) index: Index,
}

impl JointHandle {
    /// Converts this handle into its (world, index, generation) components.
    pub fn into_raw_parts(self) -> (u32, u32, u32) {
        let (index, generation) = self.index.into_raw_parts();
        (self.world, index, generation)
    }

    /// Reconstructs a handle from its (world, index, generation) components.
    pub fn from_raw_parts(world: u32, index: u32, generation: u32) -> Self {
        Self {
            world,
            index: Index::from_raw_parts(index, generation),
        }
    }

    /// An always-invalid joint handle.
    pub fn invalid() -> Self {
        Self {
            world: crate::INVALID_U32,
            index: Index::from_raw_parts(crate::INVALID_U32, crate::INVALID_U32),
        }
    }
}

pub(crate) type JointIndex = Index;

/// A set of joints that can be handled by a [`crate::world::World`].
///
/// Lookups validate the slot generation of the handle; checking that the
/// handle was minted by the owning world is done by the world itself.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct JointSet {
    joints: Arena<Joint>,
}

impl JointSet {
    /// Creates a new empty set of joints.
    pub fn new() -> Self {
        Self {
            joints: Arena::new(),
        }
    }

    /// The number of joints in this set.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Is this set empty?
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Is the given handle valid in this set?
    pub fn contains(&self, handle: JointHandle) -> bool {
        self.joints.contains(handle.index)
    }

    /// Gets the joint with the given handle.
    pub fn get(&self, handle: JointHandle) -> Option<&Joint> {
        self.joints.get(handle.index)
    }

    /// Iterates over the joints of this set.
    pub fn iter(&self) -> impl Iterator<Item = (JointIndex, &Joint)> {
        self.joints.iter()
    }

    pub(crate) fn insert(&mut self, joint: Joint) -> JointIndex {
        self.joints.insert(joint)
    }

    pub(crate) fn remove(&mut self, index: JointIndex) -> Option<Joint> {
        self.joints.remove(index)
    }

    pub(crate) fn get_mut(&mut self, index: JointIndex) -> Option<&mut Joint> {
        self.joints.get_mut(index)
    }
}
