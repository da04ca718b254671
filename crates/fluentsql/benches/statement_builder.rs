use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fluentsql::prelude::*;

#[derive(Debug, Clone, Copy, Table)]
enum Users {
    Id,
    Name,
    Age,
    Active,
}

#[derive(Debug, Clone, Copy, Table)]
enum Orders {
    Id,
    UserId,
    Amount,
}

/// SELECT Id, Name FROM Users WHERE Users.Id=0 OR Users.Id=1 ...
fn build_select(n: usize) -> Select<(Users,)> {
    let mut w = select::<Users>()
        .columns([Users::Id, Users::Name])
        .from()
        .start_where()
        .where_(Users::Id, Operator::Equal, 0);
    for i in 1..n {
        w = w.or(Users::Id, Operator::Equal, i);
    }
    w.end_where()
}

fn bench_select_where(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/select_where");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).to_sql()));
        });
    }

    group.finish();
}

fn bench_insert_rows(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/insert_rows");

    for n in [1, 10, 100, 500] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut q = insert_into::<Users>()
                    .columns([Users::Id, Users::Name, Users::Active]);
                for i in 0..n {
                    if i > 0 {
                        q = q.next_row();
                    }
                    q = q.values(i).values(format!("user{i}")).values(i % 2 == 0);
                }
                black_box(q.build())
            });
        });
    }

    group.finish();
}

fn bench_escape_literal(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_builder/escape_literal");

    for len in [8, 64, 512] {
        let raw: String = "it's ".chars().cycle().take(len).collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &raw, |b, raw| {
            b.iter(|| black_box(fluentsql::safe_literal(raw, ValueKind::NonNumeric)));
        });
    }

    group.finish();
}

fn bench_joined_report(c: &mut Criterion) {
    c.bench_function("statement_builder/joined_report", |b| {
        b.iter(|| {
            let sql = Select::<(Users, Orders)>::new()
                .column(Users::Name)
                .sum(Orders::Amount)
                .from()
                .join(JoinKind::Inner, Users::Id, Orders::UserId)
                .start_where()
                .where_(Users::Active, Operator::Equal, true)
                .and_between(Users::Age, 18, 65)
                .end_where()
                .group_by(Users::Name)
                .having(Aggregate::count(Orders::Id), Operator::GreaterThan, 3)
                .order_by(Users::Name, Direction::Asc)
                .to_sql();
            black_box(sql)
        });
    });
}

criterion_group!(
    benches,
    bench_select_where,
    bench_insert_rows,
    bench_escape_literal,
    bench_joined_report
);
criterion_main!(benches);
