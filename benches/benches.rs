use managed_vec::ManagedVec;

trait Pusher<T>: Default {
    fn push_back(&mut self, value: T);
    fn insert(&mut self, index: usize, value: T);
    fn push_back_bulk(&mut self, values: &[T]);
    fn len(&self) -> usize;
}

impl<T: Copy> Pusher<T> for ManagedVec<T> {
    fn push_back(&mut self, value: T) {
        let _ = ManagedVec::push_back(self, value);
    }

    fn insert(&mut self, index: usize, value: T) {
        let _ = ManagedVec::insert(self, index, value);
    }

    fn push_back_bulk(&mut self, values: &[T]) {
        let _ = ManagedVec::push_back_bulk(self, values);
    }

    fn len(&self) -> usize {
        ManagedVec::len(self)
    }
}

impl<T: Copy> Pusher<T> for Vec<T> {
    fn push_back(&mut self, value: T) {
        Vec::push(self, value);
    }

    fn insert(&mut self, index: usize, value: T) {
        Vec::insert(self, index, value);
    }

    fn push_back_bulk(&mut self, values: &[T]) {
        Vec::extend_from_slice(self, values);
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}

use criterion::*;
use std::hint::black_box;

const PUSHES: usize = 1_000_000;
const INSERTS: usize = 10_000;
const CHUNK: usize = 64;

fn push_back<P: Pusher<i32>>(n: usize) {
    let mut vec = P::default();

    for i in 0..n {
        vec.push_back(black_box(i as i32));
    }

    black_box(vec);
}

fn insert_middle<P: Pusher<i32>>(n: usize) {
    let mut vec = P::default();

    for i in 0..n {
        let index = vec.len() / 2;
        vec.insert(index, black_box(i as i32));
    }

    black_box(vec);
}

fn push_back_bulk<P: Pusher<i32>>(n: usize) {
    let chunk = [7; CHUNK];
    let mut vec = P::default();

    for _ in 0..n / CHUNK {
        vec.push_back_bulk(black_box(&chunk));
    }

    black_box(vec);
}

fn func(n: usize, f: impl Fn(usize)) -> impl Fn(&mut Bencher) {
    move |b| b.iter(|| f(n))
}

#[rustfmt::skip]
fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    group.throughput(Throughput::Elements(PUSHES as u64));
    group.bench_function("managed_vec", func(PUSHES, push_back::<ManagedVec<i32>>));
    group.bench_function("std", func(PUSHES, push_back::<Vec<i32>>));
}

#[rustfmt::skip]
fn bench_insert_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_middle");
    group.throughput(Throughput::Elements(INSERTS as u64));
    group.bench_function("managed_vec", func(INSERTS, insert_middle::<ManagedVec<i32>>));
    group.bench_function("std", func(INSERTS, insert_middle::<Vec<i32>>));
}

#[rustfmt::skip]
fn bench_push_back_bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back_bulk");
    group.throughput(Throughput::Elements(PUSHES as u64));
    group.bench_function("managed_vec", func(PUSHES, push_back_bulk::<ManagedVec<i32>>));
    group.bench_function("std", func(PUSHES, push_back_bulk::<Vec<i32>>));
}

criterion_group!(benches, bench_push_back, bench_insert_middle, bench_push_back_bulk);

criterion_main!(benches);
