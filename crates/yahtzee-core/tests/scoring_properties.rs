//! Property tests for scoring rules and score sheet totals.

use proptest::prelude::*;
use proptest::sample::subsequence;
use yahtzee_core::*;

fn any_hand() -> impl Strategy<Value = Hand> {
    prop::array::uniform5(1u8..=6).prop_map(|dice| Hand::new(dice).unwrap())
}

fn any_category() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_scores_are_bounded(hand in any_hand(), category in any_category()) {
        let score = score_for_category(category, &hand);
        prop_assert!(score <= 50);
    }

    #[test]
    fn prop_chance_is_the_sum(hand in any_hand()) {
        let sum: u32 = hand.values().iter().map(|&d| u32::from(d)).sum();
        prop_assert_eq!(score_for_category(Category::Chance, &hand), sum);
    }

    #[test]
    fn prop_upper_sections_count_faces(hand in any_hand()) {
        for category in Category::UPPER {
            let face = category.upper_face().unwrap();
            let count = hand.values().iter().filter(|&&d| d == face).count() as u32;
            prop_assert_eq!(score_for_category(category, &hand), count * u32::from(face));
        }
    }

    #[test]
    fn prop_full_house_is_exactly_three_and_two(hand in any_hand()) {
        let mut counts: Vec<u8> = hand.face_counts()[1..].iter().copied().filter(|&c| c > 0).collect();
        counts.sort_unstable();
        let expected = if counts == vec![2, 3] { 25 } else { 0 };
        prop_assert_eq!(score_for_category(Category::FullHouse, &hand), expected);
    }

    #[test]
    fn prop_large_straight_implies_small(hand in any_hand()) {
        if score_for_category(Category::LargeStraight, &hand) == 40 {
            prop_assert_eq!(score_for_category(Category::SmallStraight, &hand), 30);
        }
    }

    #[test]
    fn prop_of_a_kind_scores_nest(hand in any_hand()) {
        let yahtzee = score_for_category(Category::Yahtzee, &hand);
        let four = score_for_category(Category::FourOfAKind, &hand);
        let three = score_for_category(Category::ThreeOfAKind, &hand);
        if yahtzee > 0 {
            prop_assert!(four > 0);
            prop_assert_eq!(score_for_category(Category::FullHouse, &hand), 0);
        }
        if four > 0 {
            prop_assert_eq!(three, four);
        }
    }

    #[test]
    fn prop_totals_ignore_lock_order(
        points in prop::array::uniform13(0u32..=50),
        order in Just(Category::ALL.to_vec()).prop_shuffle(),
    ) {
        let mut in_order = ScoreSheet::new();
        for (category, &p) in Category::ALL.iter().zip(points.iter()) {
            in_order.lock(*category, p);
        }

        let mut shuffled = ScoreSheet::new();
        for category in &order {
            let index = Category::ALL.iter().position(|c| c == category).unwrap();
            shuffled.lock(*category, points[index]);
        }

        prop_assert_eq!(in_order.totals(), shuffled.totals());
        prop_assert!(shuffled.is_complete());
    }

    #[test]
    fn prop_relock_changes_nothing(
        category in any_category(),
        first in 0u32..=50,
        second in 0u32..=50,
    ) {
        let mut sheet = ScoreSheet::new();
        prop_assert!(sheet.lock(category, first));
        let before = sheet.clone();
        prop_assert!(!sheet.lock(category, second));
        prop_assert_eq!(sheet, before);
    }

    #[test]
    fn prop_grand_total_identity(
        locked in subsequence(Category::ALL.to_vec(), 0..=13),
        points in prop::array::uniform13(0u32..=30),
    ) {
        let mut sheet = ScoreSheet::new();
        for (i, category) in locked.iter().enumerate() {
            sheet.lock(*category, points[i]);
        }
        let totals = sheet.totals();
        prop_assert_eq!(totals.grand_total, totals.upper_total + totals.bonus + totals.lower_total);
        prop_assert_eq!(totals.bonus == UPPER_BONUS, totals.upper_total >= UPPER_BONUS_THRESHOLD);
    }

    #[test]
    fn prop_snapshot_round_trip(seed in any::<u64>(), steps in 0usize..60) {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut game = GameState::with_players(vec!["A".into(), "B".into()]).unwrap();
        let mut roller = RandomRoller::new(StdRng::seed_from_u64(seed));
        let mut choices = StdRng::seed_from_u64(seed ^ 0x5EED);

        for _ in 0..steps {
            let actions = game.valid_actions();
            if actions.is_empty() {
                break;
            }
            let action = actions[choices.gen_range(0..actions.len())];
            game.apply_action(action, &mut roller).unwrap();
        }

        let restored = GameState::from_snapshot(game.export_snapshot()).unwrap();
        prop_assert_eq!(restored, game);
    }
}

#[test]
fn test_bonus_edge() {
    let mut sheet = ScoreSheet::new();
    sheet.lock(Category::Sixes, 24);
    sheet.lock(Category::Fives, 20);
    sheet.lock(Category::Fours, 16);
    sheet.lock(Category::Twos, 2);
    assert_eq!(sheet.upper_total(), 62);
    assert_eq!(sheet.bonus(), 0);

    sheet.lock(Category::Ones, 1);
    assert_eq!(sheet.upper_total(), 63);
    assert_eq!(sheet.bonus(), 35);
    assert_eq!(sheet.grand_total(), 98);
}
