use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A Mega-Sena number, always within `1..=60`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number(u8);

impl Number {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 60;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Accepts both `"7"` and `"07"`.
    pub fn parse(token: &str) -> Option<Self> {
        token.trim().parse::<u8>().ok().and_then(Self::new)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

/// One record as delivered by the results API. Only the fields we use are
/// declared; everything else in the payload is ignored.
#[derive(Deserialize, Debug)]
pub struct ApiDraw {
    pub concurso: Option<u32>,
    pub data: Option<String>,
    pub dezenas: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draw {
    pub contest_id: u32,
    pub date: NaiveDate,
    pub numbers: [Number; 6],
}

impl Draw {
    pub fn new(contest_id: u32, date: NaiveDate, numbers: [Number; 6]) -> Result<Self> {
        let unique: HashSet<_> = numbers.iter().collect();
        if unique.len() != numbers.len() {
            return Err(Error::DataFormat(format!(
                "contest {} has repeated numbers",
                contest_id
            )));
        }
        Ok(Self {
            contest_id,
            date,
            numbers,
        })
    }

    pub fn ticket(&self) -> Ticket {
        Ticket::sorted(self.numbers)
    }
}

impl TryFrom<ApiDraw> for Draw {
    type Error = Error;

    fn try_from(raw: ApiDraw) -> Result<Self> {
        let contest_id = raw
            .concurso
            .ok_or_else(|| Error::DataFormat("missing field `concurso`".to_string()))?;
        let date = raw
            .data
            .as_deref()
            .ok_or_else(|| {
                Error::DataFormat(format!("contest {}: missing field `data`", contest_id))
            })
            .and_then(|d| parse_draw_date(d, contest_id))?;
        let dezenas = raw.dezenas.ok_or_else(|| {
            Error::DataFormat(format!("contest {}: missing field `dezenas`", contest_id))
        })?;

        let numbers = dezenas
            .iter()
            .map(|d| {
                Number::parse(d).ok_or_else(|| {
                    Error::DataFormat(format!("contest {}: bad number `{}`", contest_id, d))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let numbers: [Number; 6] = numbers.try_into().map_err(|v: Vec<Number>| {
            Error::DataFormat(format!(
                "contest {}: expected 6 numbers, got {}",
                contest_id,
                v.len()
            ))
        })?;

        Draw::new(contest_id, date, numbers)
    }
}

fn parse_draw_date(raw: &str, contest_id: u32) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .map_err(|_| Error::DataFormat(format!("contest {}: bad date `{}`", contest_id, raw)))
}

/// Decodes a results payload. A single malformed record fails the whole batch.
pub fn parse_draws(body: &str) -> Result<Vec<Draw>> {
    let raw: Vec<ApiDraw> =
        serde_json::from_str(body).map_err(|e| Error::DataFormat(e.to_string()))?;
    raw.into_iter().map(Draw::try_from).collect()
}

/// Six distinct numbers, kept in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket([Number; 6]);

impl Ticket {
    pub const SIZE: usize = 6;

    /// Returns `None` unless `numbers` holds exactly six distinct values.
    pub fn new(numbers: &[Number]) -> Option<Self> {
        let arr: [Number; 6] = numbers.try_into().ok()?;
        let unique: HashSet<_> = arr.iter().collect();
        (unique.len() == Self::SIZE).then(|| Self::sorted(arr))
    }

    fn sorted(mut numbers: [Number; 6]) -> Self {
        numbers.sort_unstable();
        Self(numbers)
    }

    pub fn numbers(&self) -> &[Number; 6] {
        &self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

impl FromStr for Ticket {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let numbers = s
            .split(',')
            .map(|t| Number::parse(t).ok_or_else(|| Error::DataFormat(format!("bad ticket `{}`", s))))
            .collect::<Result<Vec<_>>>()?;
        Ticket::new(&numbers).ok_or_else(|| Error::DataFormat(format!("bad ticket `{}`", s)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSet {
    pub id: i64,
    pub ticket: Ticket,
    pub matched_contest: Option<u32>,
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[u8]) -> Vec<Number> {
        values.iter().map(|&v| Number::new(v).unwrap()).collect()
    }

    #[test]
    fn test_number_range() {
        assert!(Number::new(0).is_none());
        assert!(Number::new(61).is_none());
        assert_eq!(Number::new(60).unwrap().value(), 60);
        assert_eq!(Number::parse(" 07 ").unwrap(), Number::parse("7").unwrap());
        assert!(Number::parse("abc").is_none());
        assert!(Number::parse("-3").is_none());
    }

    #[test]
    fn test_number_display_is_zero_padded() {
        assert_eq!(Number::new(3).unwrap().to_string(), "03");
        assert_eq!(Number::new(42).unwrap().to_string(), "42");
    }

    #[test]
    fn test_ticket_sorts_and_rejects_duplicates() {
        let ticket = Ticket::new(&nums(&[33, 4, 59, 1, 10, 2])).unwrap();
        assert_eq!(ticket.to_string(), "01, 02, 04, 10, 33, 59");
        assert!(Ticket::new(&nums(&[1, 1, 2, 3, 4, 5])).is_none());
        assert!(Ticket::new(&nums(&[1, 2, 3, 4, 5])).is_none());
    }

    #[test]
    fn test_ticket_from_stored_form() {
        let ticket: Ticket = "01, 02, 04, 10, 33, 59".parse().unwrap();
        assert_eq!(ticket.numbers()[5].value(), 59);
        assert!("01, 02".parse::<Ticket>().is_err());
    }

    #[test]
    fn test_parse_draws() {
        let body = r#"[
            {"loteria": "megasena", "concurso": 2500, "data": "29/06/2022",
             "local": "ESPAÇO DA SORTE", "dezenas": ["05", "01", "02", "03", "04", "06"]}
        ]"#;
        let draws = parse_draws(body).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].contest_id, 2500);
        assert_eq!(draws[0].date, NaiveDate::from_ymd_opt(2022, 6, 29).unwrap());
        assert_eq!(draws[0].ticket().to_string(), "01, 02, 03, 04, 05, 06");
    }

    #[test]
    fn test_parse_draws_missing_numbers() {
        let body = r#"[{"concurso": 1, "data": "11/03/1996"}]"#;
        assert!(matches!(parse_draws(body), Err(Error::DataFormat(_))));
    }

    #[test]
    fn test_parse_draws_bad_records() {
        let short = r#"[{"concurso": 1, "data": "11/03/1996", "dezenas": ["01","02"]}]"#;
        assert!(matches!(parse_draws(short), Err(Error::DataFormat(_))));

        let repeated =
            r#"[{"concurso": 1, "data": "11/03/1996", "dezenas": ["01","01","02","03","04","05"]}]"#;
        assert!(matches!(parse_draws(repeated), Err(Error::DataFormat(_))));

        let out_of_range =
            r#"[{"concurso": 1, "data": "11/03/1996", "dezenas": ["61","01","02","03","04","05"]}]"#;
        assert!(matches!(parse_draws(out_of_range), Err(Error::DataFormat(_))));

        assert!(matches!(parse_draws("{}"), Err(Error::DataFormat(_))));
    }

    #[test]
    fn test_parse_draws_empty() {
        assert!(parse_draws("[]").unwrap().is_empty());
    }
}
