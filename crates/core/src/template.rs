use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Separator {
    Slash,
    Dash,
    Dot,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Slash => '/',
            Separator::Dash => '-',
            Separator::Dot => '.',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '/' => Some(Separator::Slash),
            '-' => Some(Separator::Dash),
            '.' => Some(Separator::Dot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YearWidth {
    /// Exactly four digits.
    Four,
    /// Exactly two digits, pivoting at 69: `00..=68` is 20xx, `69..=99` is 19xx.
    Two,
}

impl YearWidth {
    fn digits(self) -> usize {
        match self {
            YearWidth::Four => 4,
            YearWidth::Two => 2,
        }
    }

    fn parse(self, s: &str) -> Option<i32> {
        if s.len() != self.digits() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let y: i32 = s.parse().ok()?;
        Some(match self {
            YearWidth::Four => y,
            YearWidth::Two if y < 69 => 2000 + y,
            YearWidth::Two => 1900 + y,
        })
    }

    fn format(self, year: i32) -> String {
        match self {
            YearWidth::Four => format!("{year:04}"),
            YearWidth::Two => format!("{:02}", year.rem_euclid(100)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonthStyle {
    /// Three-letter English abbreviation (`Jan`).
    Abbreviated,
    /// Full English month name (`January`).
    Full,
}

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

impl MonthStyle {
    fn parse(self, name: &str) -> Option<u32> {
        let lower = name.to_ascii_lowercase();
        let idx = match self {
            MonthStyle::Abbreviated => MONTHS.iter().position(|m| m[..3] == lower),
            MonthStyle::Full => MONTHS.iter().position(|m| *m == lower),
        }?;
        Some(idx as u32 + 1)
    }

    fn format(self, month: u32) -> String {
        let full = MONTHS[(month - 1) as usize];
        let name = match self {
            MonthStyle::Abbreviated => &full[..3],
            MonthStyle::Full => full,
        };
        let mut out = name[..1].to_ascii_uppercase();
        out.push_str(&name[1..]);
        out
    }
}

/// One entry of the fixed normalization try-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateTemplate {
    DayMonthYear { sep: Separator, year: YearWidth },
    MonthDayYear { sep: Separator, year: YearWidth },
    /// Month name and year; the day resolves to the 1st.
    MonthNameYear { month: MonthStyle, year: YearWidth },
    DayMonthNameYear { month: MonthStyle, year: YearWidth },
}

use DateTemplate::{DayMonthNameYear, DayMonthYear, MonthDayYear, MonthNameYear};
use MonthStyle::{Abbreviated, Full};
use YearWidth::{Four, Two};

/// Normalization try-order. Day-first numeric orderings precede month-first
/// ones for every separator, so `03-04-2024` resolves to 3 April.
pub const TEMPLATES: [DateTemplate; 20] = [
    DayMonthYear { sep: Separator::Slash, year: Four },
    DayMonthYear { sep: Separator::Slash, year: Two },
    MonthDayYear { sep: Separator::Slash, year: Four },
    MonthDayYear { sep: Separator::Slash, year: Two },
    DayMonthYear { sep: Separator::Dash, year: Four },
    DayMonthYear { sep: Separator::Dash, year: Two },
    MonthDayYear { sep: Separator::Dash, year: Four },
    MonthDayYear { sep: Separator::Dash, year: Two },
    DayMonthYear { sep: Separator::Dot, year: Four },
    DayMonthYear { sep: Separator::Dot, year: Two },
    MonthDayYear { sep: Separator::Dot, year: Four },
    MonthDayYear { sep: Separator::Dot, year: Two },
    MonthNameYear { month: Abbreviated, year: Four },
    MonthNameYear { month: Abbreviated, year: Two },
    MonthNameYear { month: Full, year: Four },
    MonthNameYear { month: Full, year: Two },
    DayMonthNameYear { month: Abbreviated, year: Four },
    DayMonthNameYear { month: Abbreviated, year: Two },
    DayMonthNameYear { month: Full, year: Four },
    DayMonthNameYear { month: Full, year: Two },
];

impl DateTemplate {
    /// Parse a whitespace-free token against this template alone.
    pub fn parse(self, token: &str) -> Option<NaiveDate> {
        match self {
            DayMonthYear { sep, year } => {
                let [d, m, y] = split_numeric(token, sep)?;
                NaiveDate::from_ymd_opt(year.parse(y)?, parse_field(m)?, parse_field(d)?)
            }
            MonthDayYear { sep, year } => {
                let [m, d, y] = split_numeric(token, sep)?;
                NaiveDate::from_ymd_opt(year.parse(y)?, parse_field(m)?, parse_field(d)?)
            }
            MonthNameYear { month, year } => {
                let mut cur = Cursor::new(token);
                let name = cur.letters();
                cur.separator();
                let y = cur.digits();
                if !cur.is_done() {
                    return None;
                }
                NaiveDate::from_ymd_opt(year.parse(y)?, month.parse(name)?, 1)
            }
            DayMonthNameYear { month, year } => {
                let mut cur = Cursor::new(token);
                let d = cur.digits();
                cur.separator();
                let name = cur.letters();
                cur.separator();
                let y = cur.digits();
                if !cur.is_done() {
                    return None;
                }
                NaiveDate::from_ymd_opt(year.parse(y)?, month.parse(name)?, parse_field(d)?)
            }
        }
    }

    /// Render `date` in this template's shape. Month-name templates are
    /// written without separators (`15Jan2024`).
    pub fn format(self, date: NaiveDate) -> String {
        match self {
            DayMonthYear { sep, year } => {
                let s = sep.as_char();
                format!("{:02}{s}{:02}{s}{}", date.day(), date.month(), year.format(date.year()))
            }
            MonthDayYear { sep, year } => {
                let s = sep.as_char();
                format!("{:02}{s}{:02}{s}{}", date.month(), date.day(), year.format(date.year()))
            }
            MonthNameYear { month, year } => {
                format!("{}{}", month.format(date.month()), year.format(date.year()))
            }
            DayMonthNameYear { month, year } => format!(
                "{:02}{}{}",
                date.day(),
                month.format(date.month()),
                year.format(date.year())
            ),
        }
    }

    pub fn has_day(self) -> bool {
        !matches!(self, MonthNameYear { .. })
    }
}

impl fmt::Display for DateTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = |y: &YearWidth| match y {
            Four => "YYYY",
            Two => "YY",
        };
        let month = |m: &MonthStyle| match m {
            Abbreviated => "Mon",
            Full => "Month",
        };
        match self {
            DayMonthYear { sep, year: y } => {
                let s = sep.as_char();
                write!(f, "DD{s}MM{s}{}", year(y))
            }
            MonthDayYear { sep, year: y } => {
                let s = sep.as_char();
                write!(f, "MM{s}DD{s}{}", year(y))
            }
            MonthNameYear { month: m, year: y } => write!(f, "{}{}", month(m), year(y)),
            DayMonthNameYear { month: m, year: y } => write!(f, "DD{}{}", month(m), year(y)),
        }
    }
}

/// Day and month fields: one or two ASCII digits.
fn parse_field(s: &str) -> Option<u32> {
    if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn split_numeric(token: &str, sep: Separator) -> Option<[&str; 3]> {
    let mut parts = token.split(sep.as_char());
    let out = [parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// Left-to-right scanner over a month-name token. Components may run
/// together or be joined by a single `-`, `/` or `.`.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Self { rest: s }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self.rest.find(|c: char| !pred(c)).unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        head
    }

    fn digits(&mut self) -> &'a str {
        self.take_while(|c| c.is_ascii_digit())
    }

    fn letters(&mut self) -> &'a str {
        self.take_while(|c| c.is_ascii_alphabetic())
    }

    fn separator(&mut self) {
        if let Some(c) = self.rest.chars().next() {
            if Separator::from_char(c).is_some() {
                self.rest = &self.rest[1..];
            }
        }
    }

    fn is_done(&self) -> bool {
        self.rest.is_empty()
    }
}
