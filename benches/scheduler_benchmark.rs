/*!
 * Scheduler Benchmarks
 *
 * Compare policy overhead on identical workloads with a no-op executor
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sched_shell::process::read_program;
use sched_shell::{
    ExecStatus, InstructionArena, InstructionExecutor, Loader, ReadyQueue, Scheduler,
    SchedulingPolicy,
};
use std::io::Cursor;

struct Noop(u64);

impl InstructionExecutor for Noop {
    fn execute_line(&mut self, line: &str) -> ExecStatus {
        self.0 += line.len() as u64;
        ExecStatus::Completed
    }
}

fn workload(lengths: &[usize]) -> Vec<Vec<String>> {
    lengths
        .iter()
        .map(|&len| (0..len).map(|i| format!("set v{} {}", i, len)).collect())
        .collect()
}

fn bench_policies(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy");
    let programs = workload(&[300, 30, 150]);

    for policy in SchedulingPolicy::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(policy), &policy, |b, &policy| {
            let arena = InstructionArena::new();
            let loader = Loader::new(arena.clone());
            let scheduler = Scheduler::new(arena.clone());

            b.iter(|| {
                let mut queue: ReadyQueue = loader
                    .spawn_batch(&programs)
                    .expect("workload fits the arena")
                    .into_iter()
                    .collect();
                let mut executor = Noop(0);
                let report = scheduler
                    .run(policy, &mut queue, &mut executor)
                    .expect("valid queue");
                arena.reset();
                black_box((report, executor.0))
            });
        });
    }

    group.finish();
}

fn bench_queue_by_score(c: &mut Criterion) {
    c.bench_function("enqueue_by_score_100", |b| {
        b.iter(|| {
            let mut queue = ReadyQueue::new();
            for pid in 0..100u32 {
                let length = ((pid * 37) % 50) as usize;
                queue.enqueue_by_score(sched_shell::ProcessControlBlock::new(pid, 0, length));
            }
            black_box(queue.len())
        });
    });
}

fn bench_read_program(c: &mut Criterion) {
    let text = "echo some moderately long instruction line\n".repeat(1000);
    c.bench_function("read_program_1000_lines", |b| {
        b.iter(|| read_program(Cursor::new(black_box(text.as_bytes()))).expect("in-memory read"));
    });
}

criterion_group!(benches, bench_policies, bench_queue_by_score, bench_read_program);
criterion_main!(benches);
