use std::fmt::Write;

use crate::stats::FrequencyRanking;
use crate::types::{Draw, GeneratedSet, Ticket};

pub fn observation(set: &GeneratedSet) -> String {
    match set.matched_contest {
        Some(contest) => format!("drawn in contest {}", contest),
        None => "not drawn yet".to_string(),
    }
}

/// Numbers that belong to the top ten are wrapped in brackets.
pub fn highlight_ticket(ticket: &Ticket, ranking: &FrequencyRanking) -> String {
    ticket
        .numbers()
        .iter()
        .map(|&n| {
            if ranking.contains(n) {
                format!("[{}]", n)
            } else {
                format!(" {} ", n)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_ranking(ranking: &FrequencyRanking) -> String {
    if ranking.is_empty() {
        return "No results loaded. Run `megasena fetch` first.\n".to_string();
    }

    let mut out = String::from("Most drawn numbers\n");
    for (pos, entry) in ranking.entries().iter().enumerate() {
        let _ = writeln!(out, "{:>3}. {}  ({} draws)", pos + 1, entry.number, entry.count);
    }
    out
}

pub fn format_draws(draws: &[Draw]) -> String {
    if draws.is_empty() {
        return "No results loaded. Run `megasena fetch` first.\n".to_string();
    }

    let mut out = String::new();
    for draw in draws {
        let numbers = draw
            .numbers
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "Contest {} - {} - {}",
            draw.contest_id,
            draw.date.format("%d/%m/%Y"),
            numbers
        );
    }
    out
}

pub fn format_sets(sets: &[GeneratedSet], ranking: &FrequencyRanking) -> String {
    if sets.is_empty() {
        return "No generated sets.\n".to_string();
    }

    let mut out = String::new();
    for (pos, set) in sets.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {}  {}",
            pos + 1,
            highlight_ticket(&set.ticket, ranking),
            observation(set)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::rank_frequency;
    use crate::types::Number;
    use chrono::NaiveDate;

    fn draw(id: u32, values: [u8; 6]) -> Draw {
        Draw::new(
            id,
            NaiveDate::from_ymd_opt(2022, 6, 29).unwrap(),
            values.map(|v| Number::new(v).unwrap()),
        )
        .unwrap()
    }

    fn set(text: &str, matched_contest: Option<u32>) -> GeneratedSet {
        GeneratedSet {
            id: 1,
            ticket: text.parse().unwrap(),
            matched_contest,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_observation() {
        assert_eq!(observation(&set("1,2,3,4,5,6", Some(2500))), "drawn in contest 2500");
        assert_eq!(observation(&set("1,2,3,4,5,6", None)), "not drawn yet");
    }

    #[test]
    fn test_highlight_marks_top_ten() {
        let ranking = rank_frequency(&[draw(1, [1, 2, 3, 4, 5, 6])]);
        let line = highlight_ticket(&"1,2,40,41,42,43".parse().unwrap(), &ranking);
        assert_eq!(line, "[01] [02]  40   41   42   43 ");
    }

    #[test]
    fn test_format_draws() {
        let out = format_draws(&[draw(2500, [1, 2, 3, 4, 5, 6])]);
        assert_eq!(out, "Contest 2500 - 29/06/2022 - 01, 02, 03, 04, 05, 06\n");
    }

    #[test]
    fn test_empty_outputs() {
        assert!(format_ranking(&FrequencyRanking::default()).contains("fetch"));
        assert_eq!(format_sets(&[], &FrequencyRanking::default()), "No generated sets.\n");
    }
}
