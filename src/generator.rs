use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::database::SetLog;
use crate::error::{Error, Result};
use crate::stats::FrequencyRanking;
use crate::types::{Draw, GeneratedSet, Number, Ticket};

/// At most this many ranking numbers are injected into a set.
pub const MAX_FROM_RANKING: usize = 3;

/// Upper bound on random draws while filling a set.
pub const MAX_RANDOM_DRAWS: usize = 10_000;

/// Source of randomness for set generation.
pub trait RandomSource {
    /// Uniform permutation of `pool` in place.
    fn shuffle(&mut self, pool: &mut [Number]);

    /// Uniform integer in `low..=high`.
    fn pick(&mut self, low: u8, high: u8) -> u8;
}

/// Adapts any `rand` generator.
#[derive(Debug)]
pub struct RandSource<R>(pub R);

impl<R: Rng> RandomSource for RandSource<R> {
    fn shuffle(&mut self, pool: &mut [Number]) {
        pool.shuffle(&mut self.0);
    }

    fn pick(&mut self, low: u8, high: u8) -> u8 {
        self.0.gen_range(low..=high)
    }
}

/// Splits comma-separated seeds. Tokens outside `1..=60` are rejected and
/// repeated seeds collapse to their first occurrence.
pub fn parse_seeds(seed_text: &str) -> Result<Vec<Number>> {
    let mut seeds: Vec<Number> = Vec::new();
    for token in seed_text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        let number = Number::parse(token).ok_or_else(|| Error::InvalidSeed(token.to_string()))?;
        if !seeds.contains(&number) {
            seeds.push(number);
        }
    }
    Ok(seeds)
}

/// Completes `seeds` into a ticket: up to three shuffled ranking numbers,
/// then uniform random numbers until six are collected.
pub fn fill_ticket(
    seeds: &[Number],
    ranking: &FrequencyRanking,
    rng: &mut dyn RandomSource,
) -> Result<Ticket> {
    let mut numbers: Vec<Number> = Vec::with_capacity(Ticket::SIZE);
    for &seed in seeds {
        if !numbers.contains(&seed) {
            numbers.push(seed);
        }
    }
    if numbers.len() > Ticket::SIZE {
        warn!(
            "{} seeds supplied, keeping the first {}",
            numbers.len(),
            Ticket::SIZE
        );
        numbers.truncate(Ticket::SIZE);
    }

    let remaining = Ticket::SIZE - numbers.len();
    if remaining > 0 {
        let mut pool: Vec<Number> = ranking.numbers().filter(|n| !numbers.contains(n)).collect();
        rng.shuffle(&mut pool);
        numbers.extend(pool.into_iter().take(remaining.min(MAX_FROM_RANKING)));
    }

    let mut attempts = 0;
    while numbers.len() < Ticket::SIZE {
        if attempts == MAX_RANDOM_DRAWS {
            return Err(Error::Exhausted(attempts));
        }
        attempts += 1;
        match Number::new(rng.pick(Number::MIN, Number::MAX)) {
            Some(candidate) if !numbers.contains(&candidate) => numbers.push(candidate),
            _ => {}
        }
    }
    debug!("filled ticket after {} random draws", attempts);

    Ticket::new(&numbers).ok_or(Error::Exhausted(attempts))
}

/// Contest id of the first draw whose numbers equal `ticket`.
pub fn find_match(ticket: &Ticket, history: &[Draw]) -> Option<u32> {
    history
        .iter()
        .find(|draw| draw.ticket() == *ticket)
        .map(|draw| draw.contest_id)
}

/// Parses `seed_text`, completes the set, checks it against `history` and
/// appends it to `log`.
pub fn generate_set<L: SetLog + ?Sized>(
    seed_text: &str,
    ranking: &FrequencyRanking,
    history: &[Draw],
    rng: &mut dyn RandomSource,
    log: &mut L,
) -> Result<GeneratedSet> {
    let seeds = parse_seeds(seed_text)?;
    let ticket = fill_ticket(&seeds, ranking, rng)?;
    let matched_contest = find_match(&ticket, history);
    let set = log.append(&ticket, matched_contest)?;

    info!(
        "generated set #{}: {} ({})",
        set.id,
        set.ticket,
        match set.matched_contest {
            Some(contest) => format!("drawn in contest {}", contest),
            None => "not drawn yet".to_string(),
        }
    );
    Ok(set)
}
