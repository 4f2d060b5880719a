//! Integration tests for file saves.
//!
//! Covers the XML declaration and its formatting-dependent separator,
//! empty-path argument errors on every save variant, save-option
//! resolution through annotations on the ancestor chain, duplicate
//! namespace removal bounded by the save root, and streaming saves.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use xylo::error::SaveError;
use xylo::parser::ParseOptions;
use xylo::serial::{
    save_to_file, save_to_file_with_options, SaveOptions, StreamingElement, StreamingNode,
};
use xylo::tree::{Annotation, AnnotationKind};
use xylo::{Document, NodeId};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("xylo_save_{}_{name}.xml", std::process::id()))
}

fn parse_preserving(input: &str) -> Document {
    let opts = ParseOptions::default().preserve_whitespace(true);
    Document::parse_str_with_options(input, &opts).unwrap()
}

/// Saves a node to a temp file and returns the content with the XML
/// declaration (and its following line break, if any) stripped.
fn save_via_file(doc: &Document, node: NodeId, name: &str) -> String {
    let path = temp_path(name);
    save_to_file(doc, node, &path).unwrap();
    assert!(path.exists());
    let content = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    strip_declaration(&content)
}

fn strip_declaration(s: &str) -> String {
    let Some(rest) = s.strip_prefix("<?xml ") else {
        return s.to_string();
    };
    let after = &rest[rest.find('>').unwrap() + 1..];
    after.strip_prefix("\r\n").unwrap_or(after).to_string()
}

// --- document saves ---

#[test]
fn test_document_save() {
    let markup = "<e> <e2 /> </e>";
    let doc = parse_preserving(markup);
    let path = temp_path("document_save");

    save_to_file(&doc, doc.root(), &path).unwrap();

    assert!(path.exists());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n{markup}")
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_document_save_options() {
    let markup = "<e> <e2 /> </e>";
    let doc = parse_preserving(markup);
    let path = temp_path("document_save_options");

    let opts = SaveOptions::default().disable_formatting(true);
    save_to_file_with_options(&doc, doc.root(), &path, opts).unwrap();

    assert!(path.exists());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>{markup}")
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_document_save_empty_path() {
    let doc = Document::new();
    assert!(matches!(
        save_to_file(&doc, doc.root(), ""),
        Err(SaveError::EmptyPath)
    ));
    assert!(matches!(
        save_to_file_with_options(
            &doc,
            doc.root(),
            "",
            SaveOptions::default().disable_formatting(true)
        ),
        Err(SaveError::EmptyPath)
    ));
    assert!(matches!(
        save_to_file_with_options(&doc, doc.root(), "", SaveOptions::default()),
        Err(SaveError::EmptyPath)
    ));
}

// --- element saves ---

#[test]
fn test_element_save() {
    let markup = "<e a=\"value\"> <e2 /> </e>";
    let doc = parse_preserving(markup);
    let e = doc.root_element().unwrap();
    let path = temp_path("element_save");

    save_to_file(&doc, e, &path).unwrap();

    assert!(path.exists());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n{markup}")
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_element_save_options() {
    let markup = "<e a=\"value\"> <e2 /> </e>";
    let doc = parse_preserving(markup);
    let e = doc.root_element().unwrap();
    let path = temp_path("element_save_options");

    let opts = SaveOptions::default().disable_formatting(true);
    save_to_file_with_options(&doc, e, &path, opts).unwrap();

    assert!(path.exists());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>{markup}")
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_element_save_empty_path() {
    let mut doc = Document::new();
    let root = doc.root();
    let e = doc.create_element("e");
    doc.append_child(root, e);

    assert!(matches!(
        save_to_file(&doc, e, ""),
        Err(SaveError::EmptyPath)
    ));
    assert!(matches!(
        save_to_file_with_options(&doc, e, "", SaveOptions::default().disable_formatting(true)),
        Err(SaveError::EmptyPath)
    ));
    assert!(matches!(
        save_to_file_with_options(&doc, e, "", SaveOptions::default()),
        Err(SaveError::EmptyPath)
    ));
}

// --- streaming element saves ---

#[test]
fn test_streaming_element_save() {
    let markup = "<e a=\"value\"> <!--comment--> <e2> <![CDATA[cdata]]> </e2> <?pi target?> </e>";
    let doc = parse_preserving(markup);
    let e = doc.root_element().unwrap();
    let path = temp_path("streaming_save");

    let streamed = StreamingElement::new("e")
        .attributes_with(|| doc.attributes(e).to_vec())
        .children_with(|| {
            doc.children(e)
                .map(|c| StreamingNode::Tree(&doc, c))
                .collect::<Vec<_>>()
        });
    streamed.save_to_file(&path).unwrap();

    assert!(path.exists());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>\r\n{markup}")
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_streaming_element_save_options() {
    let markup = "<e a=\"value\"> <!--comment--> <e2> <![CDATA[cdata]]> </e2> <?pi target?> </e>";
    let doc = parse_preserving(markup);
    let e = doc.root_element().unwrap();
    let path = temp_path("streaming_save_options");

    let streamed = StreamingElement::new("e")
        .attributes_with(|| doc.attributes(e).to_vec())
        .children_with(|| {
            doc.children(e)
                .map(|c| StreamingNode::Tree(&doc, c))
                .collect::<Vec<_>>()
        });
    let opts = SaveOptions::default().disable_formatting(true);
    streamed.save_to_file_with_options(&path, opts).unwrap();

    assert!(path.exists());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("<?xml version=\"1.0\" encoding=\"utf-8\"?>{markup}")
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_streaming_element_save_empty_path() {
    let e = StreamingElement::new("e");
    assert!(matches!(e.save_to_file(""), Err(SaveError::EmptyPath)));
    assert!(matches!(
        e.save_to_file_with_options("", SaveOptions::default().disable_formatting(true)),
        Err(SaveError::EmptyPath)
    ));
    assert!(matches!(
        e.save_to_file_with_options("", SaveOptions::default()),
        Err(SaveError::EmptyPath)
    ));
}

// --- save-option resolution through annotations ---

/// Walks the annotation-resolution scenarios: the resolved options come
/// from the saved node's own chain only, the nearest annotation wins, and
/// removal falls through to an ancestor.
#[test]
fn test_save_options_resolve_upward_from_save_root() {
    let mut doc =
        Document::parse_str("<root xmlns:a='uri'><child xmlns:a='uri'><baby xmlns:a='uri'>text</baby></child></root>")
            .unwrap();
    let root = doc.root_element().unwrap();
    let child = doc.child_element(root, "child").unwrap();
    let baby = doc.child_element(child, "baby").unwrap();

    let so = SaveOptions::default()
        .disable_formatting(true)
        .omit_duplicate_namespaces(true);

    // Without any annotation the output is indented and duplicate
    // namespace declarations are kept.
    assert_eq!(
        save_via_file(&doc, child, "resolve_1"),
        "<child xmlns:a=\"uri\">\r\n  <baby xmlns:a=\"uri\">text</baby>\r\n</child>"
    );

    // Annotating the leaf changes nothing observable there: one
    // declaration at the save root, mixed content.
    doc.add_annotation(baby, Annotation::Save(so));
    assert_eq!(
        save_via_file(&doc, baby, "resolve_2"),
        "<baby xmlns:a=\"uri\">text</baby>"
    );

    // Annotating the middle node applies to saves starting there...
    doc.add_annotation(child, Annotation::Save(so));
    assert_eq!(
        save_via_file(&doc, child, "resolve_3"),
        "<child xmlns:a=\"uri\"><baby>text</baby></child>"
    );
    // ...but not to the root: annotations are never looked up among
    // descendants.
    assert_eq!(
        save_via_file(&doc, root, "resolve_4"),
        "<root xmlns:a=\"uri\">\r\n  <child xmlns:a=\"uri\">\r\n    <baby xmlns:a=\"uri\">text</baby>\r\n  </child>\r\n</root>"
    );

    // Annotate the root and remove from child: resolution skips over the
    // un-annotated child to the root's annotation.
    doc.add_annotation(root, Annotation::Save(so));
    doc.remove_annotations(child, AnnotationKind::Save);
    assert_eq!(
        save_via_file(&doc, child, "resolve_5"),
        "<child xmlns:a=\"uri\"><baby>text</baby></child>"
    );
    assert_eq!(
        save_via_file(&doc, root, "resolve_6"),
        "<root xmlns:a=\"uri\"><child><baby>text</baby></child></root>"
    );

    // Move the annotation up to the document node: still inherited by
    // every save below it.
    let doc_node = doc.root();
    doc.add_annotation(doc_node, Annotation::Save(so));
    doc.remove_annotations(root, AnnotationKind::Save);
    assert_eq!(
        save_via_file(&doc, root, "resolve_7"),
        "<root xmlns:a=\"uri\"><child><baby>text</baby></child></root>"
    );
    assert_eq!(
        save_via_file(&doc, doc_node, "resolve_8"),
        "<root xmlns:a=\"uri\"><child><baby>text</baby></child></root>"
    );
}

#[test]
fn test_rebound_prefix_survives_duplicate_removal() {
    let doc = Document::parse_str(
        "<root xmlns:a='urn:one'><mid xmlns:a='urn:two'><leaf xmlns:a='urn:two'/></mid></root>",
    )
    .unwrap();
    let root = doc.root_element().unwrap();
    let path = temp_path("rebound");

    let opts = SaveOptions::default()
        .disable_formatting(true)
        .omit_duplicate_namespaces(true);
    save_to_file_with_options(&doc, root, &path, opts).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    // mid rebinds the prefix, so its declaration stays; leaf duplicates
    // mid's and is dropped.
    assert_eq!(
        strip_declaration(&content),
        "<root xmlns:a=\"urn:one\"><mid xmlns:a=\"urn:two\"><leaf /></mid></root>"
    );
}
