use anesle_booking::{
    quote, AvailabilityIndex, Contact, Extra, Reservation, ReservationStatus, Room, Selection,
};
use chrono::{Days, NaiveDate, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{thread_rng, Rng};

fn random_reservations(count: usize) -> Vec<Reservation> {
    let mut rng = thread_rng();
    let rooms = ["eva", "sohan", "eden"];
    let season_start: NaiveDate = "2025-05-01".parse().unwrap();

    (0..count)
        .map(|i| {
            let start = season_start + Days::new(rng.gen_range(0..150));
            let nights = rng.gen_range(1..7);
            Reservation {
                id: format!("booking_{i}"),
                room_slug: rooms[i % rooms.len()].to_string(),
                start_date: start,
                end_date: start + Days::new(nights),
                guests: rng.gen_range(1..=4),
                extras: Vec::new(),
                contact: Contact::default(),
                status: ReservationStatus::Pending,
                reservation_number: format!("AN-{}-{i}", start.format("%y%m%d")),
                created_at: Utc::now(),
                paid_at: None,
            }
        })
        .collect()
}

pub fn engine_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("availability_rebuild");

    // Rebuild-from-scratch cost at realistic reservation volumes
    for count in [10, 100, 500].iter() {
        let reservations = random_reservations(*count);
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &reservations,
            |b, reservations| {
                b.iter(|| black_box(AvailabilityIndex::build(black_box(reservations))));
            },
        );
    }
    group.finish();

    let room = Room {
        id: 1,
        slug: "eva".into(),
        name: "Eva".into(),
        nightly_rate: 120.0,
        description: String::new(),
        features: Vec::new(),
        image: String::new(),
        highlight: String::new(),
    };
    let extras = vec![
        Extra {
            id: "breakfast".into(),
            label: "Petit déjeuner".into(),
            price: 20.0,
        },
        Extra {
            id: "spa".into(),
            label: "Accès spa".into(),
            price: 35.0,
        },
    ];
    let selection = Selection::Complete(
        "2025-07-15".parse().unwrap(),
        "2025-07-18".parse().unwrap(),
    );

    c.bench_function("quote", |b| {
        b.iter(|| {
            black_box(quote(
                black_box(Some(&room)),
                black_box(&selection),
                black_box(2),
                black_box(&extras),
            ))
        });
    });
}

criterion_group!(benches, engine_benchmark);
criterion_main!(benches);
