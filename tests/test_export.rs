use serde_json::{Value, json};
use std::fs;
use tolsplit::Error;
use tolsplit::config::ExportConfig;
use tolsplit::decompose::DecompositionConfig;
use tolsplit::export::{DocumentStore, Exporter, MemoryStore};
use tolsplit::parser::{ByteParser, ParsingErrorType};

// ids: R 1, AB 2, A 3, B 4, CD 5, C 6, D 7
const SMALL_TREE: &str = "((A_ott1,B_ott2)AB_ott3,(C_ott4,D_ott5)CD_ott6)R_ott7;";

fn small_config(sizes: Vec<usize>, min: usize) -> ExportConfig {
    ExportConfig::default().with_decomposition(
        DecompositionConfig::default()
            .with_max_subtree_sizes(sizes)
            .with_min_subtree_size(min)
            .with_max_overlap_depth(1),
    )
}

fn parse_document(store: &MemoryStore, name: &str) -> Value {
    serde_json::from_str(store.get(name).unwrap()).unwrap()
}

fn read_document(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// --- TESTS MEMORY STORE ---
#[test]
fn test_full_run_documents() {
    let mut store = MemoryStore::new();
    let mut input = ByteParser::for_str(SMALL_TREE);
    let summary = Exporter::new(small_config(vec![3], 3))
        .run(&mut input, &mut store)
        .unwrap();

    assert_eq!(
        parse_document(&store, "subtree-1.json"),
        json!({"i": 2, "n": "AB", "s": 2, "c": [{"i": 3, "n": "A"}, {"i": 4, "n": "B"}]})
    );
    assert_eq!(
        parse_document(&store, "subtree-2.json"),
        json!({"i": 5, "n": "CD", "s": 2, "c": [{"i": 6, "n": "C"}, {"i": 7, "n": "D"}]})
    );
    assert_eq!(
        parse_document(&store, "root.json"),
        json!({"i": 1, "n": "R", "s": 4, "c": [
            {"i": 2, "n": "AB", "s": 2, "subtree_index": 1, "c": [{"i": 3, "n": "A"}, {"i": 4, "n": "B"}]},
            {"i": 5, "n": "CD", "s": 2, "subtree_index": 2, "c": [{"i": 6, "n": "C"}, {"i": 7, "n": "D"}]}
        ]})
    );
    assert_eq!(
        parse_document(&store, "subtree-index.json"),
        json!({"0": {}, "1": {"parent": 0}, "2": {"parent": 0}})
    );
    assert_eq!(
        parse_document(&store, "search-0.json"),
        json!({"c": {
            "A": {"c": {"B": {"v": [2, 1]}}, "v": [3, 1]},
            "B": {"v": [4, 1]},
            "C": {"c": {"D": {"v": [5, 2]}}, "v": [6, 2]},
            "D": {"v": [7, 2]},
            "R": {"v": [1, 0]}
        }})
    );

    assert_eq!(
        parse_document(&store, "parents-0.json"),
        json!({"2": 1, "3": 2, "4": 2, "5": 1, "6": 5, "7": 5})
    );
    assert_eq!(parse_document(&store, "parents-1.json"), json!({"3": 2, "4": 2}));
    assert_eq!(parse_document(&store, "parents-2.json"), json!({"6": 5, "7": 5}));

    assert_eq!(summary.num_nodes, 7);
    assert_eq!(summary.num_leaves, 4);
    assert_eq!(summary.max_depth, Some(2));
    assert_eq!(summary.num_subtrees, 2);
    assert_eq!(summary.num_search_entries, 7);
    assert_eq!(summary.num_search_documents, 1);

    let names: Vec<&str> = summary.documents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "subtree-1.json",
            "parents-1.json",
            "subtree-2.json",
            "parents-2.json",
            "root.json",
            "parents-0.json",
            "subtree-index.json",
            "search-0.json"
        ]
    );
    let stored_bytes: usize = store.names().map(|name| store.get(name).unwrap().len()).sum();
    assert_eq!(summary.total_bytes(), stored_bytes);
}

#[test]
fn test_whole_tree_leaves_stub_root() {
    let mut store = MemoryStore::new();
    let mut input = ByteParser::for_str(SMALL_TREE);
    let summary = Exporter::new(small_config(vec![100], 1))
        .run(&mut input, &mut store)
        .unwrap();

    assert_eq!(summary.num_subtrees, 1);
    assert_eq!(
        parse_document(&store, "root.json"),
        json!({"i": 1, "n": "R", "subtree_index": 1})
    );
    assert_eq!(parse_document(&store, "subtree-1.json")["c"].as_array().unwrap().len(), 2);
    assert_eq!(parse_document(&store, "search-0.json")["c"]["R"]["v"], json!([1, 1]));
    assert_eq!(parse_document(&store, "parents-0.json"), json!({}));
    assert_eq!(parse_document(&store, "parents-1.json")["7"], 5);
}

#[test]
fn test_pruned_nodes_have_no_size() {
    // ids: R 1, Y 2, X 3, a 4, b 5, c 6, d 7; Y (5 nodes) is extracted
    let mut store = MemoryStore::new();
    let mut input =
        ByteParser::for_str("(((a_ott1,b_ott2)X_ott3,c_ott4)Y_ott5,d_ott6)R_ott7;");
    Exporter::new(small_config(vec![5], 3))
        .run(&mut input, &mut store)
        .unwrap();

    assert_eq!(
        parse_document(&store, "root.json"),
        json!({"i": 1, "n": "R", "s": 4, "c": [
            {"i": 2, "n": "Y", "s": 3, "subtree_index": 1, "c": [{"i": 3, "n": "X"}, {"i": 6, "n": "c"}]},
            {"i": 7, "n": "d"}
        ]})
    );
    assert_eq!(
        parse_document(&store, "parents-0.json"),
        json!({"2": 1, "3": 2, "6": 2, "7": 1})
    );
    assert_eq!(parse_document(&store, "subtree-1.json")["c"][0]["s"], 2);
}

#[test]
fn test_small_tree_is_not_split() {
    let mut store = MemoryStore::new();
    let mut input = ByteParser::for_str(SMALL_TREE);
    let summary = Exporter::default().run(&mut input, &mut store).unwrap();

    assert_eq!(summary.num_subtrees, 0);
    assert_eq!(store.len(), 4);
    assert_eq!(parse_document(&store, "parents-0.json")["7"], 5);
    assert_eq!(parse_document(&store, "subtree-index.json"), json!({"0": {}}));
    assert_eq!(parse_document(&store, "root.json")["c"][1]["c"][0]["n"], "C");
}

#[test]
fn test_parse_error_writes_nothing() {
    let mut store = MemoryStore::new();
    let mut input = ByteParser::for_str("((A_ott1,B_ott2)AB_ott3");
    let err = Exporter::default().run(&mut input, &mut store).unwrap_err();

    match err {
        Error::Parsing(e) => assert_eq!(e.kind(), &ParsingErrorType::UnexpectedEOF),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.is_empty());
}

#[test]
fn test_custom_prefix_run() {
    let mut store = MemoryStore::new();
    let mut input = ByteParser::for_str("(A_gbif1,B_gbif2)C_gbif3;");
    let config = ExportConfig::default().with_ext_id_prefix("gbif");
    Exporter::new(config).run(&mut input, &mut store).unwrap();
    assert_eq!(parse_document(&store, "root.json")["n"], "C");

    let mut store = MemoryStore::new();
    let mut input = ByteParser::for_str("(A_gbif1,B_gbif2)C_gbif3;");
    let err = Exporter::default().run(&mut input, &mut store).unwrap_err();
    assert!(matches!(err, Error::Parsing(_)));
    assert!(store.is_empty());
}

#[test]
fn test_memory_store_open_close() {
    let mut store = MemoryStore::new();
    let mut sink = store.open("a.json").unwrap();
    sink.extend_from_slice(b"[]");
    assert!(store.get("a.json").is_none());
    store.close("a.json", sink).unwrap();
    assert_eq!(store.get("a.json"), Some("[]"));
}

// --- TESTS DIRECTORY STORE ---
#[test]
fn test_run_file_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tree.tre");
    fs::write(&input, SMALL_TREE).unwrap();
    let out_dir = dir.path().join("data").join("nested");

    let summary = Exporter::new(small_config(vec![3], 3))
        .run_file(&input, &out_dir)
        .unwrap();

    for document in &summary.documents {
        let path = out_dir.join(&document.name);
        assert_eq!(fs::metadata(&path).unwrap().len() as usize, document.bytes);
    }
    assert_eq!(read_document(&out_dir.join("subtree-2.json"))["n"], "CD");
    assert_eq!(read_document(&out_dir.join("root.json"))["c"][0]["subtree_index"], 1);
}

#[test]
fn test_convert_file_quick_api() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tree.tre");
    fs::write(&input, "(Homo_sapiens_ott770315,Pan_troglodytes_ott417950)Homininae_ott312031;\n")
        .unwrap();

    let summary = tolsplit::convert_file(&input, dir.path()).unwrap();
    assert_eq!(summary.num_subtrees, 0);

    let root = read_document(&dir.path().join("root.json"));
    assert_eq!(root["c"][0]["n"], "Homo sapiens");
    let search = read_document(&dir.path().join("search-0.json"));
    assert!(search["c"].as_object().unwrap().keys().any(|edge| edge.starts_with('H')));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = tolsplit::convert_file(dir.path().join("missing.tre"), dir.path()).unwrap_err();
    assert!(matches!(err, Error::Parsing(_) | Error::Io(_)));
}
