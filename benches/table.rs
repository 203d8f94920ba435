use criterion::{criterion_group, criterion_main, Criterion};
use hash_collisions::{Config, HashKind};
use nanoid::nanoid;

const ITEM_COUNT: usize = 100_000;

fn table_add(c: &mut Criterion) {
    for kind in HashKind::ALL {
        let mut table = Config::new(ITEM_COUNT).hash_kind(kind).build().unwrap();

        c.bench_function(&format!("table add ({kind})"), |b| {
            b.iter(|| table.add(nanoid!()));
        });
    }
}

fn table_contains(c: &mut Criterion) {
    for kind in HashKind::ALL {
        let mut table = Config::new(ITEM_COUNT).hash_kind(kind).build().unwrap();

        for _ in 0..ITEM_COUNT {
            table.add(nanoid!());
        }
        table.add(String::from("abc_w5wa35aw35naw"));

        c.bench_function(&format!("table contains hit ({kind})"), |b| {
            b.iter(|| assert!(table.contains("abc_w5wa35aw35naw")));
        });

        c.bench_function(&format!("table contains miss ({kind})"), |b| {
            b.iter(|| assert!(!table.contains("abc_not_in_table")));
        });
    }
}

fn table_add_remove(c: &mut Criterion) {
    for kind in HashKind::ALL {
        let mut table = Config::new(ITEM_COUNT).hash_kind(kind).build().unwrap();

        for _ in 0..ITEM_COUNT {
            table.add(nanoid!());
        }

        c.bench_function(&format!("table add + remove ({kind})"), |b| {
            b.iter(|| {
                table.add(String::from("abc_w5wa35aw35naw"));
                table.remove("abc_w5wa35aw35naw").unwrap();
            });
        });
    }
}

criterion_group!(benches, table_add, table_contains, table_add_remove);
criterion_main!(benches);
