use super::ids::{self, ChunkID};
use std::fmt;

/// A tagged, sized region of a container. `offset` is the absolute position
/// of the payload's first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chunk {
    pub tag: ChunkID,
    pub offset: u64,
    pub size: u32,
}

impl Chunk {
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.size)
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' at {} ({} bytes)",
            ids::display(&self.tag),
            self.offset,
            self.size
        )
    }
}

/// A `LIST` chunk and the chunks nested in it.
///
/// `tag` is the nested list type (`INFO`, ...), `offset` points just past that
/// type tag and `size` excludes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChunk {
    pub tag: ChunkID,
    pub offset: u64,
    pub size: u32,
    pub chunks: Vec<ChunkNode>,
}

impl ListChunk {
    pub fn header(&self) -> Chunk {
        Chunk {
            tag: self.tag,
            offset: self.offset,
            size: self.size,
        }
    }

    /// First child tagged `tag`.
    pub fn chunk(&self, tag: &ChunkID) -> Option<&ChunkNode> {
        find(&self.chunks, tag)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkNode {
    Chunk(Chunk),
    List(ListChunk),
}

impl ChunkNode {
    pub fn tag(&self) -> &ChunkID {
        match self {
            ChunkNode::Chunk(c) => &c.tag,
            ChunkNode::List(l) => &l.tag,
        }
    }

    pub fn offset(&self) -> u64 {
        match self {
            ChunkNode::Chunk(c) => c.offset,
            ChunkNode::List(l) => l.offset,
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            ChunkNode::Chunk(c) => c.size,
            ChunkNode::List(l) => l.size,
        }
    }

    pub fn header(&self) -> Chunk {
        match self {
            ChunkNode::Chunk(c) => *c,
            ChunkNode::List(l) => l.header(),
        }
    }

    pub fn as_list(&self) -> Option<&ListChunk> {
        match self {
            ChunkNode::List(l) => Some(l),
            ChunkNode::Chunk(_) => None,
        }
    }

    pub fn is_list(&self) -> bool {
        self.as_list().is_some()
    }
}

pub(crate) fn find<'a>(nodes: &'a [ChunkNode], tag: &ChunkID) -> Option<&'a ChunkNode> {
    nodes.iter().find(|node| node.tag() == tag)
}
