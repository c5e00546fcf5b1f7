// tests/wiki_traversal.rs
//! Depth-bounded wiki expansion and per-node failure annotation.

mod common;

use common::*;
use feishu_reader::*;
use pretty_assertions::assert_eq;
use serde_json::json;

const SPACE: &str = "7001";

/// A chain n0 -> n1 -> ... -> n8, every node claiming children.
fn chain_of_depth_eight() -> InMemoryFeishu {
    let mut repo = InMemoryFeishu::new();
    for depth in 0..=8 {
        repo = repo.with_document(
            &format!("dx{}", depth),
            &format!("Page {}", depth),
            vec![text_block("b", 2, "text", &format!("depth {}", depth))],
        );
        if depth > 0 {
            repo = repo.with_children(
                SPACE,
                &format!("wikcn{}", depth - 1),
                vec![wiki_node(SPACE, &format!("wikcn{}", depth), "docx", &format!("dx{}", depth), true)],
            );
        }
    }
    repo.with_space(
        SPACE,
        "Handbook",
        vec![wiki_node(SPACE, "wikcn0", "docx", "dx0", true)],
    )
}

fn walk_chain(root: &TraversedNode) -> Vec<&TraversedNode> {
    let mut chain = vec![root];
    while let Some(next) = chain.last().and_then(|n| n.children()).and_then(|c| c.first()) {
        chain.push(next);
    }
    chain
}

#[tokio::test]
async fn depth_bound_stops_expansion_after_depth_five() {
    let (repo, reader) = reader_for(chain_of_depth_eight());
    let space = SpaceId::parse(SPACE).unwrap();

    let result = reader.read_wiki_space(&space, true).await.unwrap();

    let Content::WikiSpace(content) = &result.content else {
        panic!("expected a wiki space");
    };
    assert_eq!(content.node_count, 1);
    let chain = walk_chain(&content.nodes[0]);
    assert_eq!(chain.len(), 7);

    for (depth, node) in chain.iter().enumerate().take(6) {
        assert_eq!(node.node.node_token, format!("wikcn{}", depth));
        assert!(node.content().is_some(), "depth {} should be resolved", depth);
        assert!(node.children().is_some(), "depth {} should be expanded", depth);
    }
    let edge = chain[6];
    assert_eq!(edge.node.node_token, "wikcn6");
    assert!(edge.content.is_none());
    assert!(edge.children.is_none());
    assert!(edge.content_error().is_none());

    // Listed children: once per expanded node, never for depth 6
    assert_eq!(repo.count_calls(&format!("wiki/nodes/{}/", SPACE)), 6);
    assert_eq!(repo.count_calls("docx/dx6"), 0);

    let value = serde_json::to_value(&result).unwrap();
    let depth_six = &value["nodes"][0]["children"][0]["children"][0]["children"][0]["children"][0]
        ["children"][0]["children"][0];
    assert_eq!(depth_six["node_token"], json!("wikcn6"));
    assert!(depth_six.get("content").is_none());
    assert!(depth_six.get("children").is_none());
    assert_eq!(value["_meta"]["type"], json!("wiki"));
    assert_eq!(value["_meta"]["token"], json!(SPACE));
}

#[tokio::test]
async fn smaller_depth_bound_is_honored() {
    let limits = ReadLimits::new(1, DEFAULT_BITABLE_RECORD_CAP).unwrap();
    let (_, reader) = reader_with_limits(chain_of_depth_eight(), limits);
    let space = SpaceId::parse(SPACE).unwrap();

    let result = reader.read_wiki_space(&space, true).await.unwrap();

    let Content::WikiSpace(content) = &result.content else {
        panic!("expected a wiki space");
    };
    let chain = walk_chain(&content.nodes[0]);
    assert_eq!(chain.len(), 3);
    assert!(chain[1].content().is_some());
    assert!(chain[2].content.is_none());
}

#[tokio::test]
async fn failing_root_content_is_annotated_in_place() {
    let repo = InMemoryFeishu::new()
        .with_document("dxA", "A", vec![text_block("b", 2, "text", "alpha")])
        .with_document("dxB", "B", vec![])
        .with_document("dxC", "C", vec![text_block("b", 2, "text", "gamma")])
        .with_space(
            SPACE,
            "Team",
            vec![
                wiki_node(SPACE, "wikcnA", "docx", "dxA", false),
                wiki_node(SPACE, "wikcnB", "docx", "dxB", false),
                wiki_node(SPACE, "wikcnC", "docx", "dxC", false),
            ],
        );
    let mut repo = repo;
    repo.fail("docx/dxB");
    let (_, reader) = reader_for(repo);

    let result = reader
        .read_wiki_space(&SpaceId::parse(SPACE).unwrap(), true)
        .await
        .unwrap();

    let Content::WikiSpace(content) = &result.content else {
        panic!("expected a wiki space");
    };
    assert_eq!(content.node_count, 3);
    let tokens: Vec<&str> = content
        .nodes
        .iter()
        .map(|n| n.node.node_token.as_str())
        .collect();
    assert_eq!(tokens, vec!["wikcnA", "wikcnB", "wikcnC"]);

    assert!(content.nodes[0].content().is_some());
    assert!(content.nodes[1].content().is_none());
    assert!(content.nodes[1].content_error().unwrap().contains("forbidden"));
    assert!(content.nodes[2].content().is_some());
    assert_eq!(
        content.nodes[2].content().and_then(|c| c.text_content()),
        Some("gamma")
    );

    let value = serde_json::to_value(&result).unwrap();
    assert!(value["nodes"][1]["content_error"].is_string());
    assert!(value["nodes"][1].get("content").is_none());
}

#[tokio::test]
async fn children_listing_failure_stops_that_branch_only() {
    let mut repo = InMemoryFeishu::new()
        .with_document("dxA", "A", vec![])
        .with_document("dxB", "B", vec![])
        .with_document("dxB1", "B1", vec![])
        .with_space(
            SPACE,
            "Team",
            vec![
                wiki_node(SPACE, "wikcnA", "docx", "dxA", true),
                wiki_node(SPACE, "wikcnB", "docx", "dxB", true),
            ],
        )
        .with_children(
            SPACE,
            "wikcnB",
            vec![wiki_node(SPACE, "wikcnB1", "docx", "dxB1", false)],
        );
    repo.fail(format!("wiki/nodes/{}/wikcnA", SPACE));
    let (_, reader) = reader_for(repo);

    let result = reader
        .read_wiki_space(&SpaceId::parse(SPACE).unwrap(), true)
        .await
        .unwrap();

    let Content::WikiSpace(content) = &result.content else {
        panic!("expected a wiki space");
    };
    let a = &content.nodes[0];
    assert!(a.content().is_some());
    assert!(a.children().is_none());
    assert!(a.children_error().is_some());

    let b = &content.nodes[1];
    let b_children = b.children().unwrap();
    assert_eq!(b_children.len(), 1);
    assert_eq!(b_children[0].node.node_token, "wikcnB1");
    assert!(b_children[0].content().is_some());
}

#[tokio::test]
async fn node_without_token_is_not_expanded() {
    let repo = InMemoryFeishu::new()
        .with_document("dxA", "A", vec![text_block("b", 2, "text", "alpha")])
        .with_space(SPACE, "Team", vec![wiki_node(SPACE, "", "docx", "dxA", true)]);
    let (repo, reader) = reader_for(repo);

    let result = reader
        .read_wiki_space(&SpaceId::parse(SPACE).unwrap(), true)
        .await
        .unwrap();

    let Content::WikiSpace(content) = &result.content else {
        panic!("expected a wiki space");
    };
    let root = &content.nodes[0];
    assert!(root.content().is_some());
    assert!(root.children().is_none());
    assert!(root.children_error().unwrap().contains("node_token"));
    assert_eq!(repo.count_calls(&format!("wiki/nodes/{}/", SPACE)), 0);
    assert_eq!(repo.count_calls(&format!("wiki/nodes/{}", SPACE)), 1);
}

#[tokio::test]
async fn non_recursive_space_read_returns_roots_as_listed() {
    let (repo, reader) = reader_for(chain_of_depth_eight());

    let result = reader
        .read_wiki_space(&SpaceId::parse(SPACE).unwrap(), false)
        .await
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["space"]["name"], json!("Handbook"));
    assert_eq!(value["node_count"], json!(1));
    assert_eq!(
        value["nodes"][0],
        serde_json::to_value(wiki_node(SPACE, "wikcn0", "docx", "dx0", true)).unwrap()
    );
    assert_eq!(repo.count_calls("docx/"), 0);
}

#[tokio::test]
async fn single_node_read_resolves_content_and_lists_children() {
    let repo = chain_of_depth_eight()
        .with_wiki_node(wiki_node(SPACE, "wikcn0", "docx", "dx0", true));
    let (repo, reader) = reader_for(repo);

    let result = reader
        .read("https://x.feishu.cn/wiki/wikcn0?from=from_copylink", None, false)
        .await
        .unwrap();

    assert_eq!(result.meta.kind, ResourceKind::Wiki);
    let Content::WikiNode(node) = &result.content else {
        panic!("expected a wiki node");
    };
    assert_eq!(node.node.obj_token, "dx0");
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["content"]["text_content"], json!("depth 0"));
    assert_eq!(value["children"][0]["node_token"], json!("wikcn1"));
    assert!(value["children"][0].get("content").is_none());
    assert_eq!(repo.count_calls("docx/dx1"), 0);
}

#[tokio::test]
async fn recursive_node_read_traverses_children_from_depth_one() {
    let repo = chain_of_depth_eight()
        .with_wiki_node(wiki_node(SPACE, "wikcn0", "docx", "dx0", true));
    let (repo, reader) = reader_for(repo);

    let result = reader.read("wikcn0", None, true).await.unwrap();

    let Content::WikiNode(node) = &result.content else {
        panic!("expected a wiki node");
    };
    let NodeChildren::Expanded { children } = &node.children else {
        panic!("children should be listed");
    };
    let chain = walk_chain(&children[0]);
    // depths 1..=5 expanded, depth 6 unexpanded
    assert_eq!(chain.len(), 6);
    assert!(chain[4].content().is_some());
    assert!(chain[5].content.is_none());
    assert_eq!(repo.count_calls("docx/dx6"), 0);
}

#[tokio::test]
async fn unknown_and_nested_kinds_get_a_note() {
    let repo = InMemoryFeishu::new().with_space(
        SPACE,
        "Mixed",
        vec![
            wiki_node(SPACE, "wikcnM", "mindnote", "bmncnX", false),
            wiki_node(SPACE, "wikcnW", "wiki", "wikcnInner", false),
        ],
    );
    let (repo, reader) = reader_for(repo);

    let result = reader
        .read_wiki_space(&SpaceId::parse(SPACE).unwrap(), true)
        .await
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value["nodes"][0]["content"]["note"],
        json!("Reading content of type 'mindnote' is not implemented")
    );
    assert_eq!(
        value["nodes"][1]["content"]["note"],
        json!("Reading content of type 'wiki' is not implemented")
    );
    assert_eq!(repo.calls().len(), 2);
}

#[tokio::test]
async fn legacy_doc_inside_wiki_uses_the_fallback() {
    let repo = InMemoryFeishu::new()
        .with_document("doccnLegacy", "Legacy", vec![text_block("b", 2, "text", "old")])
        .with_space(
            SPACE,
            "Archive",
            vec![wiki_node(SPACE, "wikcnL", "doc", "doccnLegacy", false)],
        );
    let (_, reader) = reader_for(repo);

    let result = reader
        .read_wiki_space(&SpaceId::parse(SPACE).unwrap(), true)
        .await
        .unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["nodes"][0]["content"]["fallback"], json!("docx"));
    assert_eq!(value["nodes"][0]["content"]["text_content"], json!("old"));
}
