//! Key normalization - canonical slugs for collection keys

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::application::errors::StorageError;
use crate::domain::entities::{ApplicationState, Collection};
use crate::domain::traits::StateStore;

/// Separator placed between the words of a slug
pub const SEPARATOR: &str = "_";

// regex-lite classes are ASCII only, so the Unicode spaces and the common
// punctuation blocks are listed explicitly. Joiners (U+200C..U+200F) are left
// alone so emoji sequences survive.
static SEPARATOR_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"[\s[:punct:]",
        r"\x{85}\x{A0}\x{A1}\x{A7}\x{AB}\x{B6}\x{B7}\x{BB}\x{BF}\x{1680}",
        r"\x{2000}-\x{200B}\x{2010}-\x{205F}",
        r"\x{3000}-\x{3003}\x{3008}-\x{3011}\x{3014}-\x{301F}",
        r"\x{FF01}-\x{FF0F}\x{FF1A}-\x{FF20}\x{FF3B}-\x{FF40}\x{FF5B}-\x{FF65}",
        r"]+"
    ))
    .expect("separator pattern is valid")
});

/// Convert a raw key into its slug.
///
/// Lowercases the input, collapses every run of whitespace or punctuation into
/// a single `_`, then strips separators from both ends. Unicode spaces and
/// punctuation (curly quotes, dashes, full-width marks) separate like their
/// ASCII forms; letters, digits and symbols such as emoji are kept. `_` is
/// punctuation, so a slug normalizes to itself.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let collapsed = SEPARATOR_RUN.replace_all(&lowered, SEPARATOR);
    collapsed.trim_matches('_').to_string()
}

/// Rebuild `map` with every key normalized.
///
/// Keys that collapse to the same slug collide silently: the value of the key
/// met later in the source order wins.
pub fn normalize_map(map: Collection) -> Collection {
    let mut out = Collection::new();
    for (raw, value) in map {
        let slug = normalize(&raw);
        if out.insert(slug.clone(), value).is_some() {
            tracing::debug!("Key '{}' collides on slug '{}', keeping the later value", raw, slug);
        }
    }
    out
}

/// Normalize the slug-indexed collections of the state in place
pub fn normalize_state(state: &mut ApplicationState) {
    state.puzzles = normalize_map(std::mem::take(&mut state.puzzles));
    state.pieces = normalize_map(std::mem::take(&mut state.pieces));
}

/// Load the stored state, normalize it and write it back.
///
/// Offline maintenance for state files written before keys were normalized;
/// the running bot only normalizes in memory.
pub async fn normalize_stored(store: &dyn StateStore) -> Result<ApplicationState, StorageError> {
    let mut state = store.load().await?;
    normalize_state(&mut state);
    store.save(&state).await?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::MemoryStore;
    use serde_json::json;

    const AWKWARD: &[&str] = &[
        "",
        "   ",
        "Alice Test",
        "alice-test",
        "alice_test",
        "  --Hello,, World!! ",
        "__already__slugged__",
        "Tab\tand\nnewline",
        "MiXeD.Case/Path",
        "émoji 🧩 piece",
        "Alice\u{a0}Test",
        "Alice’s Puzzle",
        "Alice — Test",
        "全角，テスト",
        "a",
        "!!!",
    ];

    #[test]
    fn normalize_examples() {
        assert_eq!(normalize("Alice Test"), "alice_test");
        assert_eq!(normalize("alice-test"), "alice_test");
        assert_eq!(normalize("  --Hello,, World!! "), "hello_world");
        assert_eq!(normalize("__already__slugged__"), "already_slugged");
        assert_eq!(normalize("Tab\tand\nnewline"), "tab_and_newline");
        assert_eq!(normalize("MiXeD.Case/Path"), "mixed_case_path");
        assert_eq!(normalize("!!!"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn unicode_spaces_and_punctuation_separate_like_ascii() {
        assert_eq!(normalize("Alice\u{a0}Test"), normalize("Alice Test"));
        assert_eq!(normalize("Alice\u{3000}Test"), "alice_test");
        assert_eq!(normalize("Alice\u{202f}Test"), "alice_test");
        assert_eq!(normalize("Alice’s Puzzle"), normalize("Alice's Puzzle"));
        assert_eq!(normalize("Alice—Test"), "alice_test");
        assert_eq!(normalize("«Alice» ¿Test?"), "alice_test");
        assert_eq!(normalize("全角，テスト"), "全角_テスト");
    }

    #[test]
    fn letters_and_symbols_are_kept() {
        assert_eq!(normalize("Émoji 🧩 Piece"), "émoji_🧩_piece");
        assert_eq!(normalize("Team 👨‍👩‍👧"), "team_👨‍👩‍👧");
        assert_eq!(normalize("Level 2"), "level_2");
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in AWKWARD {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn normalize_is_deterministic() {
        for raw in AWKWARD {
            assert_eq!(normalize(raw), normalize(raw));
        }
    }

    #[test]
    fn later_key_wins_on_collision() {
        let mut map = Collection::new();
        map.insert("Alice Test".into(), json!("first"));
        map.insert("bob".into(), json!("bob"));
        map.insert("alice-test".into(), json!("second"));

        let out = normalize_map(map);

        assert_eq!(out.len(), 2);
        assert_eq!(out.get("alice_test"), Some(&json!("second")));
        assert_eq!(out.get("bob"), Some(&json!("bob")));
    }

    #[tokio::test]
    async fn normalize_stored_writes_canonical_keys_back() {
        let raw: ApplicationState = serde_json::from_value(json!({
            "puzzles": { "Alice Test": 1 },
            "pieces": { "Bob’s Puzzle": {} },
        }))
        .unwrap();
        let store = MemoryStore::new(raw);

        normalize_stored(&store).await.unwrap();

        let saved = store.load().await.unwrap();
        assert_eq!(saved.puzzle_slugs(), vec!["alice_test"]);
        assert_eq!(saved.piece_slugs(), vec!["bob_s_puzzle"]);
    }

    #[test]
    fn normalize_state_leaves_other_collections_alone() {
        let mut state: ApplicationState = serde_json::from_value(json!({
            "puzzles": { "Alice Test": 1 },
            "pieces": { "Alice Test": { "p1": "x" } },
            "render_flags": { "Raw Key": true },
        }))
        .unwrap();

        normalize_state(&mut state);

        assert_eq!(state.puzzle_slugs(), vec!["alice_test"]);
        assert_eq!(state.piece_slugs(), vec!["alice_test"]);
        assert!(state.render_flags.contains_key("Raw Key"));
    }
}
