use serde_json::{Value, json};
use tolsplit::decompose::{Decomposer, DecompositionConfig};
use tolsplit::export::MemoryStore;
use tolsplit::newick::parse_str;
use tolsplit::search::writer::search_document_name;
use tolsplit::search::{NodePointer, SearchIndex, SearchIndexWriter, SearchSplitConfig, normalize_name};
use tolsplit::trie::TrieError;

fn parse_document(store: &MemoryStore, name: &str) -> Value {
    serde_json::from_str(store.get(name).unwrap()).unwrap()
}

// --- TESTS NAMES ---
#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("aves"), "Aves");
    assert_eq!(normalize_name("Aves"), "Aves");
    assert_eq!(normalize_name("x"), "X");
    assert_eq!(normalize_name("1st"), "1st");
    assert_eq!(normalize_name("ñandu"), "ñandu");
    assert_eq!(normalize_name(""), "");
}

#[test]
fn test_lookup_is_normalized() {
    let mut index = SearchIndex::new();
    index.insert_taxon("passer", "ott1", NodePointer::new(1, 0)).unwrap();
    assert_eq!(index.lookup("Passer"), Some(&NodePointer::new(1, 0)));
    assert_eq!(index.lookup("passer"), Some(&NodePointer::new(1, 0)));
    assert_eq!(index.lookup("Pass"), None);
}

// --- TESTS COLLISIONS ---
#[test]
fn test_same_node_twice_is_noop() {
    let mut index = SearchIndex::new();
    index.insert_taxon("Aves", "ott1", NodePointer::new(5, 0)).unwrap();
    index.insert_taxon("Aves", "ott1", NodePointer::new(5, 2)).unwrap();

    assert_eq!(index.len(), 1);
    assert_eq!(index.lookup("Aves"), Some(&NodePointer::new(5, 0)));
    assert_eq!(index.lookup("Aves (ott1)"), None);
}

#[test]
fn test_collision_is_rekeyed() {
    let mut index = SearchIndex::new();
    index.insert_taxon("Morus", "ott1", NodePointer::new(1, 0)).unwrap();
    index.insert_taxon("morus", "ott2", NodePointer::new(2, 0)).unwrap();

    assert_eq!(index.len(), 2);
    assert_eq!(index.lookup("Morus"), Some(&NodePointer::new(1, 0)));
    assert_eq!(index.lookup("Morus (ott2)"), Some(&NodePointer::new(2, 0)));

    // Re-inserting the re-keyed node changes nothing
    index.insert_taxon("Morus", "ott2", NodePointer::new(2, 0)).unwrap();
    assert_eq!(index.len(), 2);
}

#[test]
fn test_composite_collision_fails() {
    let mut index = SearchIndex::new();
    index.insert_taxon("A", "ott1", NodePointer::new(1, 0)).unwrap();
    index.insert_taxon("A", "ott1", NodePointer::new(2, 0)).unwrap();

    let err = index.insert_taxon("A", "ott1", NodePointer::new(3, 0)).unwrap_err();
    assert_eq!(err, TrieError::DuplicateKey("A (ott1)".to_string()));
}

// --- TESTS INDEX FROM DECOMPOSITION ---
#[test]
fn test_pointers_target_home_documents() {
    // ids: R 1, AB 2, A 3, B 4, CD 5, C 6, D 7
    let tree = parse_str("((A_ott1,B_ott2)AB_ott3,(C_ott4,D_ott5)CD_ott6)R_ott7;").unwrap();
    let config = DecompositionConfig::default()
        .with_max_subtree_sizes(vec![3])
        .with_min_subtree_size(3)
        .with_max_overlap_depth(1);
    let decomposition = Decomposer::new(config).decompose(tree);
    assert_eq!(decomposition.num_subtrees(), 2);

    let index = SearchIndex::from_decomposition(&decomposition).unwrap();
    assert_eq!(index.len(), 7);
    assert_eq!(index.lookup("R"), Some(&NodePointer::new(1, 0)));
    assert_eq!(index.lookup("AB"), Some(&NodePointer::new(2, 1)));
    assert_eq!(index.lookup("A"), Some(&NodePointer::new(3, 1)));
    assert_eq!(index.lookup("CD"), Some(&NodePointer::new(5, 2)));
    assert_eq!(index.lookup("D"), Some(&NodePointer::new(7, 2)));
}

#[test]
fn test_unnamed_nodes_are_not_indexed() {
    let tree = parse_str("((A_ott1,B_ott2)mrcaott1ott2,C_ott3);").unwrap();
    let decomposition = Decomposer::default().decompose(tree);
    let index = SearchIndex::from_decomposition(&decomposition).unwrap();

    assert_eq!(index.len(), 3);
    assert_eq!(index.lookup("mrcaott1ott2"), None);
}

#[test]
fn test_homonyms_in_tree() {
    // ids: Y 1, Morus 2, X 3, morus 4
    let tree = parse_str("(Morus_ott1,(morus_ott2)X_ott3)Y_ott4;").unwrap();
    let decomposition = Decomposer::default().decompose(tree);
    let index = SearchIndex::from_decomposition(&decomposition).unwrap();

    assert_eq!(index.len(), 4);
    assert_eq!(index.lookup("Morus"), Some(&NodePointer::new(2, 0)));
    assert_eq!(index.lookup("Morus (ott2)"), Some(&NodePointer::new(4, 0)));
}

// --- TESTS SEARCH DOCUMENTS ---
fn two_family_index() -> SearchIndex {
    let mut index = SearchIndex::new();
    for (i, name) in ["Aa", "Ab", "Ac", "Ba", "Bb", "Bc"].iter().enumerate() {
        index.insert_taxon(name, "ott0", NodePointer::new(i + 1, 0)).unwrap();
    }
    index
}

#[test]
fn test_single_search_document() {
    let mut store = MemoryStore::new();
    let trie = two_family_index().compact();
    let reports = SearchIndexWriter::new(&mut store, SearchSplitConfig::default())
        .write(&trie)
        .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].name, "search-0.json");
    assert_eq!(reports[0].bytes, store.get("search-0.json").unwrap().len());
    assert_eq!(
        parse_document(&store, "search-0.json"),
        json!({"c": {
            "A": {"c": {"a": {"v": [1, 0]}, "b": {"v": [2, 0]}, "c": {"v": [3, 0]}}},
            "B": {"c": {"a": {"v": [4, 0]}, "b": {"v": [5, 0]}, "c": {"v": [6, 0]}}}
        }})
    );
}

#[test]
fn test_split_search_documents() {
    let mut store = MemoryStore::new();
    let trie = two_family_index().compact();
    assert_eq!(trie.node_count(), 9);

    let reports = SearchIndexWriter::new(&mut store, SearchSplitConfig::new(4, 2))
        .write(&trie)
        .unwrap();

    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["search-1.json", "search-2.json", "search-0.json"]);
    assert_eq!(store.len(), 3);

    assert_eq!(
        parse_document(&store, "search-0.json"),
        json!({"c": {"A": {"subtree_index": 1}, "B": {"subtree_index": 2}}})
    );
    assert_eq!(
        parse_document(&store, &search_document_name(2)),
        json!({"c": {"a": {"v": [4, 0]}, "b": {"v": [5, 0]}, "c": {"v": [6, 0]}}})
    );
}

#[test]
fn test_empty_search_index() {
    let mut store = MemoryStore::new();
    let trie = SearchIndex::new().compact();
    SearchIndexWriter::new(&mut store, SearchSplitConfig::default())
        .write(&trie)
        .unwrap();
    assert_eq!(store.get("search-0.json"), Some("{}"));
}
