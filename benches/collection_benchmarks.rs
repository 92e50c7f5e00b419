use std::collections::{BTreeMap, BinaryHeap, HashMap, HashSet};
use std::cmp::Reverse;
use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use tally_collections::{CaselessSet, ChainedHashMap, DynArray, LinkedList, OrderedMap, PriorityQueue, Stack};

const N: usize = 10_000;
const SORT_N: usize = 1_000;
const UPDATES: usize = 5_000;
const PERIODS: usize = 100;

// ─── Helper functions to generate inputs ────────────────────────────────────

fn random_ints(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key{i}")).collect()
}

fn periods() -> Vec<String> {
    (0..PERIODS).map(|i| format!("{}-{:02}", 2000 + i / 12, i % 12 + 1)).collect()
}

/// Caller-side sort through the checked accessors only.
fn bubble_sort<T: Ord>(array: &mut DynArray<T>) -> tally_collections::Result<()> {
    let len = array.len();
    for i in 0..len {
        for j in 0..len - 1 - i {
            if array.get(j)? > array.get(j + 1)? {
                array.swap(j, j + 1)?;
            }
        }
    }
    Ok(())
}

// ─── Dynamic Array ──────────────────────────────────────────────────────────

fn bench_array_bubble_sort(c: &mut Criterion) {
    let values = random_ints(SORT_N);

    let mut group = c.benchmark_group("array_bubble_sort");

    group.bench_function(BenchmarkId::new("DynArray", SORT_N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<DynArray<i64>>(),
            |mut array| {
                bubble_sort(&mut array).unwrap();
                array
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("Vec", SORT_N), |b| {
        b.iter_batched(
            || values.clone(),
            |mut vec| {
                let len = vec.len();
                for i in 0..len {
                    for j in 0..len - 1 - i {
                        if vec[j] > vec[j + 1] {
                            vec.swap(j, j + 1);
                        }
                    }
                }
                vec
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Linked List ────────────────────────────────────────────────────────────

fn bench_list_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_push_back");

    group.bench_function(BenchmarkId::new("LinkedList", N), |b| {
        b.iter(|| {
            let mut list = LinkedList::new();
            for i in 0..N {
                list.push_back(i);
            }
            list
        });
    });

    group.bench_function(BenchmarkId::new("std::LinkedList", N), |b| {
        b.iter(|| {
            let mut list = std::collections::LinkedList::new();
            for i in 0..N {
                list.push_back(i);
            }
            list
        });
    });

    group.finish();
}

// ─── Hash Map ───────────────────────────────────────────────────────────────

fn bench_map_insert_get(c: &mut Criterion) {
    let keys = keys(N);

    let mut group = c.benchmark_group("map_insert_get");

    group.bench_function(BenchmarkId::new("ChainedHashMap", N), |b| {
        b.iter(|| {
            let mut map = ChainedHashMap::new();
            for (i, key) in keys.iter().enumerate() {
                map.insert(key.as_str(), i);
            }
            for key in &keys {
                black_box(map.get(key.as_str()));
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("ChainedHashMap/1024 buckets", N), |b| {
        b.iter(|| {
            let mut map = ChainedHashMap::with_buckets(1024);
            for (i, key) in keys.iter().enumerate() {
                map.insert(key.as_str(), i);
            }
            for key in &keys {
                black_box(map.get(key.as_str()));
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("HashMap", N), |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for (i, key) in keys.iter().enumerate() {
                map.insert(key.as_str(), i);
            }
            for key in &keys {
                black_box(map.get(key.as_str()));
            }
            map
        });
    });

    group.finish();
}

// ─── Caseless Set ───────────────────────────────────────────────────────────

fn bench_set_add(c: &mut Criterion) {
    let keys = keys(N);

    let mut group = c.benchmark_group("set_add");

    group.bench_function(BenchmarkId::new("CaselessSet", N), |b| {
        b.iter(|| {
            let mut set = CaselessSet::new();
            for key in &keys {
                set.insert(key.as_str());
            }
            set
        });
    });

    group.bench_function(BenchmarkId::new("HashSet/lowercased", N), |b| {
        b.iter(|| {
            let mut set = HashSet::new();
            for key in &keys {
                set.insert(key.to_lowercase());
            }
            set
        });
    });

    group.finish();
}

// ─── Stack ──────────────────────────────────────────────────────────────────

fn bench_stack_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_push_pop");

    group.bench_function(BenchmarkId::new("Stack", N), |b| {
        b.iter(|| {
            let mut stack = Stack::new();
            for i in 0..N {
                stack.push(i);
            }
            while let Ok(top) = stack.pop() {
                black_box(top);
            }
        });
    });

    group.bench_function(BenchmarkId::new("Vec", N), |b| {
        b.iter(|| {
            let mut stack = Vec::new();
            for i in 0..N {
                stack.push(i);
            }
            while let Some(top) = stack.pop() {
                black_box(top);
            }
        });
    });

    group.finish();
}

// ─── Priority Queue ─────────────────────────────────────────────────────────

fn bench_queue_add_poll(c: &mut Criterion) {
    let values = random_ints(N);

    let mut group = c.benchmark_group("queue_add_poll");

    group.bench_function(BenchmarkId::new("PriorityQueue", N), |b| {
        b.iter(|| {
            let mut queue = PriorityQueue::new();
            for &v in &values {
                queue.push(v);
            }
            while let Ok(min) = queue.pop() {
                black_box(min);
            }
        });
    });

    group.bench_function(BenchmarkId::new("BinaryHeap", N), |b| {
        b.iter(|| {
            let mut queue = BinaryHeap::new();
            for &v in &values {
                queue.push(Reverse(v));
            }
            while let Some(min) = queue.pop() {
                black_box(min);
            }
        });
    });

    group.finish();
}

// ─── Ordered Map ────────────────────────────────────────────────────────────

fn bench_ordered_map_accumulate(c: &mut Criterion) {
    let periods = periods();

    let mut group = c.benchmark_group("ordered_map_accumulate");

    group.bench_function(BenchmarkId::new("OrderedMap", UPDATES), |b| {
        b.iter(|| {
            let mut burn: OrderedMap<&str, f64> = OrderedMap::new();
            for i in 0..UPDATES {
                let period = periods[i % PERIODS].as_str();
                match burn.get_mut(period) {
                    Some(total) => *total += 1.5,
                    None => {
                        burn.insert(period, 1.5);
                    }
                }
            }
            burn
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", UPDATES), |b| {
        b.iter(|| {
            let mut burn = BTreeMap::new();
            for i in 0..UPDATES {
                *burn.entry(periods[i % PERIODS].as_str()).or_insert(0.0) += 1.5;
            }
            burn
        });
    });

    group.finish();
}

fn bench_ordered_map_iterate(c: &mut Criterion) {
    let values = random_ints(N);
    let ordered: OrderedMap<i64, i64> = values.iter().map(|&v| (v, v)).collect();
    let btree: BTreeMap<i64, i64> = values.iter().map(|&v| (v, v)).collect();

    let mut group = c.benchmark_group("ordered_map_iterate");

    group.bench_function(BenchmarkId::new("OrderedMap", N), |b| {
        b.iter(|| ordered.iter().map(|(_, v)| *v).sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| btree.iter().map(|(_, v)| *v).sum::<i64>());
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(sequence_benches, bench_array_bubble_sort, bench_list_push_back, bench_stack_push_pop,);

criterion_group!(hashed_benches, bench_map_insert_get, bench_set_add,);

criterion_group!(ordered_benches, bench_queue_add_poll, bench_ordered_map_accumulate, bench_ordered_map_iterate,);

criterion_main!(sequence_benches, hashed_benches, ordered_benches);
