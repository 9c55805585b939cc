use crate::error::{Error, Result};
use crate::heading::{Fragment, HeadingNode, Level};
use crate::surface::Surface;

/// In-memory surface: headings are plain fragment lists, and chosen indices refuse writes.
pub struct FakeSurface {
    pub nodes: Vec<HeadingNode>,
    pub read_only: Vec<usize>,
    pub writes: usize,
}

impl FakeSurface {
    pub fn from_levels(levels: &[i64]) -> Self {
        let nodes = levels
            .iter()
            .enumerate()
            .map(|(i, &raw)| HeadingNode::new(i, Level::clamped(raw), format!("Heading {i}")))
            .collect();
        Self {
            nodes,
            read_only: Vec::new(),
            writes: 0,
        }
    }

    pub fn from_texts(entries: &[(i64, &str)]) -> Self {
        let nodes = entries
            .iter()
            .enumerate()
            .map(|(i, &(raw, text))| HeadingNode::new(i, Level::clamped(raw), text))
            .collect();
        Self {
            nodes,
            read_only: Vec::new(),
            writes: 0,
        }
    }

    pub fn labels(&self) -> Vec<Option<String>> {
        self.nodes
            .iter()
            .map(|n| n.label().map(str::to_string))
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.nodes
            .iter()
            .map(|n| {
                n.fragments
                    .iter()
                    .filter_map(|f| match f {
                        Fragment::Text(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }
}

impl Surface for FakeSurface {
    fn headings(&self) -> Vec<HeadingNode> {
        self.nodes.clone()
    }

    fn overwrite(&mut self, index: usize, content: &[Fragment]) -> Result<()> {
        if self.read_only.contains(&index) {
            return Err(Error::Io(std::io::Error::other("read only")));
        }
        let len = self.nodes.len();
        let node = self
            .nodes
            .get_mut(index)
            .ok_or(Error::NoSuchHeading { index, len })?;
        node.fragments = content.to_vec();
        self.writes += 1;
        Ok(())
    }
}
