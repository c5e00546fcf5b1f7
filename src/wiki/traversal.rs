// src/wiki/traversal.rs
//! Depth-bounded wiki expansion over an explicit work stack.

use crate::api::responses::WikiNode;
use crate::api::types::PaginationRequest;
use crate::api::{drain_pages, FeishuRepository};
use crate::constants::WIKI_NODES_PAGE_SIZE;
use crate::error::AppError;
use crate::model::{Content, NodeChildren, NodeContent, TraversedNode, WikiNodeContent, WikiSpaceContent};
use crate::readers::ContentReader;
use crate::types::{ResourceKind, SpaceId, Token};

/// Expansion state of one node while the traversal runs.
struct ArenaEntry {
    node: WikiNode,
    content: Option<NodeContent>,
    children: Option<ChildSlots>,
}

enum ChildSlots {
    Listed(Vec<usize>),
    Failed(String),
}

/// Walks wiki nodes, resolving their content and children.
///
/// Depth 0 is the nodes handed in. Nodes at depth `<= max_depth` are
/// resolved and, when they have children, expanded; deeper nodes are
/// returned exactly as the platform listed them. There is no visited set:
/// the depth bound alone ends cycles.
pub struct WikiTraversal<'a> {
    reader: &'a ContentReader<'a>,
    max_depth: u8,
}

impl<'a> WikiTraversal<'a> {
    pub fn new(reader: &'a ContentReader<'a>) -> Self {
        Self {
            reader,
            max_depth: reader.limits().max_wiki_depth,
        }
    }

    fn repo(&self) -> &'a dyn FeishuRepository {
        self.reader.repository()
    }

    /// Reads one node by its node token.
    ///
    /// The node's own content is always resolved. Its children are listed;
    /// with `recursive` they are traversed from depth 1, otherwise they come
    /// back unexpanded.
    pub async fn read_node(&self, token: &Token, recursive: bool) -> Result<WikiNodeContent, AppError> {
        let node = self.repo().wiki_node(token).await?;
        log::info!(
            "Wiki node '{}': obj_type={}, obj_token={}",
            node.title,
            node.obj_type,
            node.obj_token
        );

        let content = self.resolve_content(&node).await;
        let children = if !node.has_child {
            NodeChildren::Expanded {
                children: Vec::new(),
            }
        } else {
            let parent = if node.node_token.is_empty() {
                token.as_str()
            } else {
                node.node_token.as_str()
            };
            match self.list_children(&node.space_id, parent).await {
                Ok(listed) if recursive => NodeChildren::Expanded {
                    children: self.traverse(listed, 1).await,
                },
                Ok(listed) => NodeChildren::Expanded {
                    children: listed.into_iter().map(TraversedNode::unexpanded).collect(),
                },
                Err(e) => {
                    log::warn!("Listing children of wiki node {} failed: {}", parent, e);
                    NodeChildren::Failed {
                        children_error: e.to_string(),
                    }
                }
            }
        };

        Ok(WikiNodeContent {
            node,
            content,
            children,
        })
    }

    /// Reads a whole space: its description and root nodes, traversed from
    /// depth 0 when `recursive`.
    pub async fn read_space(
        &self,
        space_id: &SpaceId,
        recursive: bool,
    ) -> Result<WikiSpaceContent, AppError> {
        let repo = self.repo();
        let space = repo.wiki_space(space_id).await?;
        let roots = drain_pages(
            move |page| async move { repo.wiki_nodes(space_id, None, &page).await },
            PaginationRequest::complete(WIKI_NODES_PAGE_SIZE),
        )
        .await?
        .items;
        log::info!("Wiki space {}: {} root node(s)", space_id, roots.len());

        let nodes = if recursive {
            self.traverse(roots, 0).await
        } else {
            roots.into_iter().map(TraversedNode::unexpanded).collect()
        };

        Ok(WikiSpaceContent {
            space,
            node_count: nodes.len(),
            nodes,
        })
    }

    /// Expands `roots`, which sit at `start_depth`, and returns them as a
    /// nested tree in listing order.
    pub async fn traverse(&self, roots: Vec<WikiNode>, start_depth: u8) -> Vec<TraversedNode> {
        let mut arena: Vec<ArenaEntry> = Vec::with_capacity(roots.len());
        let root_indices = push_entries(&mut arena, roots);

        // Depth-first, siblings in listing order
        let mut stack: Vec<(usize, u8)> = root_indices
            .iter()
            .rev()
            .map(|&index| (index, start_depth))
            .collect();

        while let Some((index, depth)) = stack.pop() {
            if depth > self.max_depth {
                log::debug!(
                    "Depth bound {} reached at wiki node {}",
                    self.max_depth,
                    arena[index].node.node_token
                );
                continue;
            }

            let content = self.resolve_content(&arena[index].node).await;
            arena[index].content = Some(content);

            if !arena[index].node.has_child {
                continue;
            }
            // An empty parent filter would list the space's roots again
            if arena[index].node.node_token.is_empty() {
                log::warn!(
                    "Wiki node '{}' claims children but has no node_token",
                    arena[index].node.title
                );
                arena[index].children = Some(ChildSlots::Failed(
                    "node has children but no node_token to list them by".to_string(),
                ));
                continue;
            }
            let listing = {
                let node = &arena[index].node;
                self.list_children(&node.space_id, &node.node_token).await
            };
            match listing {
                Ok(children) => {
                    let child_indices = push_entries(&mut arena, children);
                    let child_depth = depth.saturating_add(1);
                    stack.extend(child_indices.iter().rev().map(|&child| (child, child_depth)));
                    arena[index].children = Some(ChildSlots::Listed(child_indices));
                }
                Err(e) => {
                    log::warn!(
                        "Listing children of wiki node {} failed: {}",
                        arena[index].node.node_token,
                        e
                    );
                    arena[index].children = Some(ChildSlots::Failed(e.to_string()));
                }
            }
        }

        assemble(arena, &root_indices)
    }

    /// Reads the resource a node wraps; failures become `content_error`.
    async fn resolve_content(&self, node: &WikiNode) -> NodeContent {
        let Some(kind) = ResourceKind::from_obj_type(&node.obj_type) else {
            return NodeContent::Resolved {
                content: Box::new(Content::unsupported(&node.obj_type)),
            };
        };

        let outcome = match Token::parse(&node.obj_token) {
            Ok(obj_token) => self.reader.read(kind, &obj_token).await,
            Err(e) => Err(AppError::from(e)),
        };
        match outcome {
            Ok(content) => NodeContent::Resolved {
                content: Box::new(content),
            },
            Err(e) => {
                log::warn!(
                    "Reading content of wiki node '{}' ({} {}) failed: {}",
                    node.title,
                    node.obj_type,
                    node.obj_token,
                    e
                );
                NodeContent::Failed {
                    content_error: e.to_string(),
                }
            }
        }
    }

    async fn list_children(&self, space_id: &str, parent: &str) -> Result<Vec<WikiNode>, AppError> {
        let space = SpaceId::parse(space_id)?;
        let repo = self.repo();
        let space = &space;
        let listing = drain_pages(
            move |page| async move { repo.wiki_nodes(space, Some(parent), &page).await },
            PaginationRequest::complete(WIKI_NODES_PAGE_SIZE),
        )
        .await?;
        Ok(listing.items)
    }
}

fn push_entries(arena: &mut Vec<ArenaEntry>, nodes: Vec<WikiNode>) -> Vec<usize> {
    nodes
        .into_iter()
        .map(|node| {
            arena.push(ArenaEntry {
                node,
                content: None,
                children: None,
            });
            arena.len() - 1
        })
        .collect()
}

/// Builds the nested tree. Children are always pushed after their parent,
/// so walking the arena backwards finds every child already built.
fn assemble(arena: Vec<ArenaEntry>, roots: &[usize]) -> Vec<TraversedNode> {
    let mut built: Vec<Option<TraversedNode>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (index, entry) in arena.into_iter().enumerate().rev() {
        let children = entry.children.map(|slots| match slots {
            ChildSlots::Listed(indices) => NodeChildren::Expanded {
                children: indices
                    .iter()
                    .filter_map(|&child| built[child].take())
                    .collect(),
            },
            ChildSlots::Failed(children_error) => NodeChildren::Failed { children_error },
        });
        built[index] = Some(TraversedNode {
            node: entry.node,
            content: entry.content,
            children,
        });
    }

    roots.iter().filter_map(|&index| built[index].take()).collect()
}
