//! Interaction events emitted by the file tree
//!
//! Hosts subscribe and receive events over a `std::sync::mpsc` channel.
//! Receivers that have been dropped are pruned on the next emit.

use super::node::NodeId;
use std::path::PathBuf;
use std::sync::mpsc;

/// The node an event refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTarget {
    pub node: NodeId,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTreeEvent {
    FileClicked(EventTarget),
    FolderClicked(EventTarget),
    FileDoubleClicked(EventTarget),
    FolderDoubleClicked(EventTarget),
    FileActivated(EventTarget),
    FolderActivated(EventTarget),
}

impl FileTreeEvent {
    pub fn target(&self) -> &EventTarget {
        match self {
            FileTreeEvent::FileClicked(t)
            | FileTreeEvent::FolderClicked(t)
            | FileTreeEvent::FileDoubleClicked(t)
            | FileTreeEvent::FolderDoubleClicked(t)
            | FileTreeEvent::FileActivated(t)
            | FileTreeEvent::FolderActivated(t) => t,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(
            self,
            FileTreeEvent::FolderClicked(_)
                | FileTreeEvent::FolderDoubleClicked(_)
                | FileTreeEvent::FolderActivated(_)
        )
    }
}

/// Host-side interaction that is split into file and folder variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Click,
    DoubleClick,
    Activate,
}

impl Interaction {
    pub(crate) fn folder_event(self, target: EventTarget) -> FileTreeEvent {
        match self {
            Interaction::Click => FileTreeEvent::FolderClicked(target),
            Interaction::DoubleClick => FileTreeEvent::FolderDoubleClicked(target),
            Interaction::Activate => FileTreeEvent::FolderActivated(target),
        }
    }

    pub(crate) fn file_event(self, target: EventTarget) -> FileTreeEvent {
        match self {
            Interaction::Click => FileTreeEvent::FileClicked(target),
            Interaction::DoubleClick => FileTreeEvent::FileDoubleClicked(target),
            Interaction::Activate => FileTreeEvent::FileActivated(target),
        }
    }
}

/// Set of subscribers receiving tree events
#[derive(Debug, Default)]
pub struct EventSubscribers {
    senders: Vec<mpsc::Sender<FileTreeEvent>>,
}

impl EventSubscribers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::Receiver<FileTreeEvent> {
        let (tx, rx) = mpsc::channel();
        self.senders.push(tx);
        rx
    }

    pub fn emit(&mut self, event: FileTreeEvent) {
        tracing::debug!("Emitting {:?}", event);
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}
