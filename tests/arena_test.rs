/*!
 * Instruction Arena Tests
 * Bump allocation, tail-only rewind and line clipping
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sched_shell::limits::{ARENA_CAPACITY, MAX_LINE_WIDTH};
use sched_shell::InstructionArena;

#[test]
fn test_default_capacity() {
    let arena = InstructionArena::new();
    assert_eq!(arena.capacity(), ARENA_CAPACITY);
    assert_eq!(arena.available(), ARENA_CAPACITY);

    arena.allocate(ARENA_CAPACITY / 4).unwrap();
    assert_eq!(arena.stats().usage_percentage(), 25.0);
}

#[test]
fn test_reset() {
    let arena = InstructionArena::with_capacity(4);
    arena.allocate(4).unwrap();
    arena.write(2, "quit").unwrap();
    arena.reset();
    assert_eq!(arena.next_free(), 0);
    assert_eq!(arena.fetch(2).as_deref(), Some(""));
}

proptest! {
    #[test]
    fn prop_lifo_release_rewinds_to_zero(sizes in prop::collection::vec(0usize..20, 1..20)) {
        let arena = InstructionArena::with_capacity(ARENA_CAPACITY);
        let mut blocks = Vec::new();
        for &n in &sizes {
            blocks.push((arena.allocate(n).unwrap(), n));
        }
        prop_assert_eq!(arena.next_free(), sizes.iter().sum::<usize>());

        for (start, n) in blocks.into_iter().rev() {
            arena.release(start, n).unwrap();
        }
        prop_assert_eq!(arena.next_free(), 0);
    }

    #[test]
    fn prop_stored_text_is_prefix(text in "[ -~]{0,150}") {
        let arena = InstructionArena::with_capacity(1);
        arena.write(0, &text).unwrap();
        let stored = arena.fetch(0).unwrap();
        prop_assert!(stored.len() <= MAX_LINE_WIDTH);
        prop_assert!(text.starts_with(&stored));
    }
}
