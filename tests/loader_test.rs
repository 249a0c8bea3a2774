/*!
 * Loader Tests
 * Script reading, pid assignment and all-or-nothing batch loads
 */

use pretty_assertions::assert_eq;
use sched_shell::limits::FIRST_PID;
use sched_shell::process::read_program;
use sched_shell::{InstructionArena, Loader, ProcessError};
use std::io::Cursor;

fn lines(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("echo {}", i)).collect()
}

#[test]
fn test_read_program_strips_line_endings() {
    let program = read_program(Cursor::new("set x 1\r\nprint x\n\nlast")).unwrap();
    assert_eq!(program, vec!["set x 1", "print x", "", "last"]);
}

#[test]
fn test_pids_are_shared_across_load_paths() {
    let loader = Loader::new(InstructionArena::with_capacity(20));

    let first = loader.spawn(&lines(1)).unwrap();
    let batch = loader.spawn_batch(&[lines(2), lines(3)]).unwrap();
    let background = loader.spawn_priority(&lines(1)).unwrap().unwrap();

    assert_eq!(first.pid(), FIRST_PID);
    assert_eq!(
        batch.iter().map(|pcb| pcb.pid()).collect::<Vec<_>>(),
        vec![FIRST_PID + 1, FIRST_PID + 2]
    );
    assert_eq!(background.pid(), FIRST_PID + 3);
    assert!(background.is_priority());
    assert!(!first.is_priority());
}

#[test]
fn test_batch_failure_rolls_back_everything() {
    let arena = InstructionArena::with_capacity(10);
    let loader = Loader::new(arena.clone());

    let err = loader
        .spawn_batch(&[lines(4), lines(4), lines(4)])
        .unwrap_err();
    assert!(matches!(err, ProcessError::OutOfMemory { requested: 4, available: 2 }));
    assert_eq!(arena.next_free(), 0);
    assert_eq!(arena.fetch(0).as_deref(), Some(""));

    // No pid was consumed by the failed batch
    assert_eq!(loader.spawn(&lines(1)).unwrap().pid(), FIRST_PID);
}

#[test]
fn test_out_of_memory_message() {
    let loader = Loader::new(InstructionArena::with_capacity(2));
    let err = loader.spawn(&lines(3)).unwrap_err();
    assert_eq!(err.to_string(), "error: not enough memory for script");
}
