use std::collections::BTreeMap;

use crate::types::{Draw, Number};

pub const RANKING_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedNumber {
    pub number: Number,
    pub count: u32,
}

/// The most frequently drawn numbers, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyRanking(Vec<RankedNumber>);

impl FrequencyRanking {
    pub fn entries(&self) -> &[RankedNumber] {
        &self.0
    }

    pub fn numbers(&self) -> impl Iterator<Item = Number> + '_ {
        self.0.iter().map(|r| r.number)
    }

    pub fn contains(&self, number: Number) -> bool {
        self.0.iter().any(|r| r.number == number)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Counts every drawn number and keeps the top ten. Equal counts are ordered
/// by ascending number so the result does not depend on input order.
pub fn rank_frequency(draws: &[Draw]) -> FrequencyRanking {
    let mut counts: BTreeMap<Number, u32> = BTreeMap::new();
    for draw in draws {
        for &number in &draw.numbers {
            *counts.entry(number).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<RankedNumber> = counts
        .into_iter()
        .map(|(number, count)| RankedNumber { number, count })
        .collect();
    // stable sort keeps the ascending key order among ties
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(RANKING_SIZE);

    FrequencyRanking(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn draw(id: u32, values: [u8; 6]) -> Draw {
        Draw::new(
            id,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            values.map(|v| Number::new(v).unwrap()),
        )
        .unwrap()
    }

    fn n(v: u8) -> Number {
        Number::new(v).unwrap()
    }

    #[test]
    fn test_empty_history() {
        assert!(rank_frequency(&[]).is_empty());
    }

    #[test]
    fn test_most_frequent_first() {
        let draws = vec![
            draw(1, [10, 20, 30, 40, 50, 60]),
            draw(2, [10, 20, 30, 1, 2, 3]),
            draw(3, [10, 20, 4, 5, 6, 7]),
            draw(4, [10, 8, 9, 11, 12, 13]),
        ];
        let ranking = rank_frequency(&draws);
        let top: Vec<_> = ranking.entries().iter().take(3).collect();
        assert_eq!(top[0], &RankedNumber { number: n(10), count: 4 });
        assert_eq!(top[1], &RankedNumber { number: n(20), count: 3 });
        assert_eq!(top[2], &RankedNumber { number: n(30), count: 2 });
    }

    #[test]
    fn test_ties_broken_by_ascending_number() {
        let draws = vec![draw(1, [60, 59, 58, 3, 2, 1]), draw(2, [7, 8, 9, 10, 11, 12])];
        let ranking = rank_frequency(&draws);
        let values: Vec<u8> = ranking.numbers().map(Number::value).collect();
        assert_eq!(values, vec![1, 2, 3, 7, 8, 9, 10, 11, 12, 58]);
    }

    #[test]
    fn test_at_most_ten_unique_non_increasing() {
        let draws: Vec<Draw> = (0..50u32)
            .map(|i| {
                let base = (i % 9) as u8 * 6;
                draw(i, [base + 1, base + 2, base + 3, base + 4, base + 5, base + 6])
            })
            .collect();
        let ranking = rank_frequency(&draws);
        assert_eq!(ranking.len(), RANKING_SIZE);

        let unique: HashSet<_> = ranking.numbers().collect();
        assert_eq!(unique.len(), ranking.len());
        assert!(ranking.entries().windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_contains() {
        let ranking = rank_frequency(&[draw(1, [1, 2, 3, 4, 5, 6])]);
        assert!(ranking.contains(n(4)));
        assert!(!ranking.contains(n(44)));
    }
}
