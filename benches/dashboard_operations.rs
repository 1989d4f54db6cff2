use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use coachdesk::dashboard::{DashboardData, DashboardProvider, DashboardTab, StateUpdate};
use coachdesk::routines::{filter_exercises, Equipment, Exercise, ExerciseFilterState, MuscleGroup};
use coachdesk::trainer::{compute_stats, recent_clients, Client, ClientStatus};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use uuid::Uuid;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
}

/// Create N clients spread over statuses and the last few weeks
fn create_clients(count: usize) -> Vec<Client> {
    (0..count)
        .map(|i| Client {
            id: Uuid::new_v4(),
            name: format!("Client {}", i),
            email: format!("client{}@example.com", i),
            goal: "Strength".to_string(),
            status: match i % 3 {
                0 => ClientStatus::Active,
                1 => ClientStatus::Paused,
                _ => ClientStatus::Prospect,
            },
            sessions_completed: (i % 40) as u32,
            last_session: (i % 5 != 0).then(|| today() - Duration::days((i % 21) as i64)),
        })
        .collect()
}

/// Create N exercises cycling through muscle groups and equipment
fn create_exercises(count: usize) -> Vec<Exercise> {
    (0..count)
        .map(|i| {
            Exercise::new(
                &format!("Exercise {}", i),
                MuscleGroup::ALL[i % MuscleGroup::ALL.len()],
                Equipment::ALL[i % Equipment::ALL.len()],
            )
        })
        .collect()
}

/// Benchmark filtering the exercise library
fn bench_filter_exercises(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_exercises");
    let filter = ExerciseFilterState {
        query: "1".into(),
        muscle_group: Some(MuscleGroup::Legs),
        equipment: None,
    };

    for count in [10, 100, 1000].iter() {
        let exercises = create_exercises(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| filter_exercises(black_box(&exercises), black_box(&filter)).len());
        });
    }
    group.finish();
}

/// Benchmark recomputing overview stats and recent clients
fn bench_client_summaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("client_summaries");

    for count in [10, 100, 1000].iter() {
        let clients = create_clients(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| {
                let stats = compute_stats(black_box(&clients), today());
                let recent = recent_clients(black_box(&clients), 5);
                (stats, recent)
            });
        });
    }
    group.finish();
}

/// Benchmark functional setter round trips through the container
fn bench_setters(c: &mut Criterion) {
    let provider = DashboardProvider::mount(DashboardData {
        clients: create_clients(100),
        ..Default::default()
    });
    let dashboard = provider.handle();

    c.bench_function("set_active_tab_fn", |b| {
        b.iter(|| {
            dashboard.set_active_tab(StateUpdate::with(|tab: &DashboardTab| tab.next()));
            black_box(dashboard.take_changes());
        });
    });

    c.bench_function("set_clients_modify", |b| {
        b.iter(|| {
            dashboard.set_clients(StateUpdate::modify(|clients: &mut Vec<Client>| {
                clients[0].status = clients[0].status.next();
            }));
            black_box(dashboard.take_changes());
        });
    });
}

criterion_group!(benches, bench_filter_exercises, bench_client_summaries, bench_setters);

criterion_main!(benches);
