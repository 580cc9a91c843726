//! Read visibility of file nodes.

use depot_core::types::UserId;
use depot_entity::file::FileNode;

/// Whether `requester` may read `node`: public nodes are readable by
/// anyone, private ones only by their owner.
pub fn can_read(node: &FileNode, requester: Option<UserId>) -> bool {
    node.is_public || requester.is_some_and(|user| node.is_owned_by(user))
}
