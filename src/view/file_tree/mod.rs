// File tree module for a lazily loaded, filtered and sorted directory hierarchy
//
// The model lists a directory only when it is opened or expanded, keeps a
// name filter and sort order applied across every loaded node, and reports
// host interactions as typed file/folder events. `FileTreeView` is a headless
// host that owns expansion, selection and column layout.

pub mod entry;
pub mod events;
pub mod filter;
pub mod format;
pub mod node;
pub mod sort;
pub mod tree;
pub mod view;

pub use entry::{Entry, EntryKind, EntryStyle, FileInfo};
pub use events::{EventTarget, FileTreeEvent, Interaction};
pub use filter::NameFilter;
pub use node::{LoadState, NodeId, TreeNode};
pub use sort::{SortColumn, SortKey, SortOrder, SortValue};
pub use tree::DirectoryTreeModel;
pub use view::FileTreeView;
