//! Unit tests for the counter mapping and the points record.

use crate::points::domain::{Counter, PointsRecord};
use crate::task::domain::{Category, UserId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[fixture]
fn record(clock: DefaultClock) -> PointsRecord {
    PointsRecord::new(UserId::new(), &clock)
}

#[rstest]
#[case(Category::Spirituality, Counter::Meditation)]
#[case(Category::Intelligence, Counter::Brain)]
#[case(Category::Skills, Counter::Skills)]
#[case(Category::Health, Counter::Diet)]
#[case(Category::BodyKinesthetic, Counter::Training)]
#[case(Category::Awareness, Counter::Analyse)]
fn category_maps_to_expected_counter(#[case] category: Category, #[case] expected: Counter) {
    assert_eq!(Counter::for_category(category), expected);
}

#[rstest]
fn fresh_record_starts_at_zero(record: PointsRecord) {
    for counter in Counter::ALL {
        assert_eq!(record.counter(counter), 0);
    }
    assert_eq!(record.total(), 0);
}

#[rstest]
#[case(Category::Spirituality)]
#[case(Category::Intelligence)]
#[case(Category::Skills)]
#[case(Category::Health)]
#[case(Category::BodyKinesthetic)]
#[case(Category::Awareness)]
fn completion_bumps_only_the_mapped_counter(
    clock: DefaultClock,
    mut record: PointsRecord,
    #[case] category: Category,
) {
    record.record_completion(category, &clock);

    let awarded = Counter::for_category(category);
    for counter in Counter::ALL {
        let expected = u64::from(counter == awarded);
        assert_eq!(record.counter(counter), expected);
    }
    assert_eq!(record.counter_for(category), 1);
    assert_eq!(record.total(), 1);
}

#[rstest]
fn completions_accumulate(clock: DefaultClock, mut record: PointsRecord) {
    record.record_completion(Category::Health, &clock);
    record.record_completion(Category::Health, &clock);
    record.record_completion(Category::Skills, &clock);

    assert_eq!(record.counter(Counter::Diet), 2);
    assert_eq!(record.counter(Counter::Skills), 1);
    assert_eq!(record.total(), 3);
}
