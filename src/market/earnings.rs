use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::types::{CompanyProfile, EarningsEntry};

pub const TRADING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

/// When in the trading day a company reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    BeforeOpen,
    AfterClose,
}

impl Session {
    /// `"bmo"` is before the open; everything else (amc, dmh, unknown) is filed after the close.
    pub fn from_hour(hour: Option<&str>) -> Self {
        match hour {
            Some(h) if h.trim().eq_ignore_ascii_case("bmo") => Session::BeforeOpen,
            _ => Session::AfterClose,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Session::BeforeOpen => "Before Open",
            Session::AfterClose => "After Close",
        }
    }
}

/// One company on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsRow {
    pub symbol: CompactString,
    pub company_name: String,
    pub logo: Option<String>,
    pub market_cap: Option<f64>,
    pub date: NaiveDate,
    pub hour: Option<String>,
    pub eps_actual: Option<f64>,
    pub eps_estimate: Option<f64>,
    pub revenue_actual: Option<f64>,
    pub revenue_estimate: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub before_open: Vec<EarningsRow>,
    pub after_close: Vec<EarningsRow>,
}

impl DaySchedule {
    pub fn session(&self, session: Session) -> &[EarningsRow] {
        match session {
            Session::BeforeOpen => &self.before_open,
            Session::AfterClose => &self.after_close,
        }
    }

    fn push(&mut self, session: Session, row: EarningsRow) {
        match session {
            Session::BeforeOpen => self.before_open.push(row),
            Session::AfterClose => self.after_close.push(row),
        }
    }
}

/// Earnings for one Monday..Friday week, split by day and session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeekCalendar {
    /// Monday first
    pub days: [DaySchedule; 5],
}

impl WeekCalendar {
    pub fn day(&self, weekday: Weekday) -> Option<&DaySchedule> {
        trading_day_index(weekday).map(|i| &self.days[i])
    }

    pub fn total(&self) -> usize {
        self.days
            .iter()
            .map(|d| d.before_open.len() + d.after_close.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

fn trading_day_index(weekday: Weekday) -> Option<usize> {
    TRADING_DAYS.iter().position(|&d| d == weekday)
}

/// Pick the `limit` largest reporters and group them by weekday and session.
///
/// Only entries whose profile has a known market cap are ranked; if none has
/// one, every entry is kept in provider order. Weekend dates are dropped.
pub fn build_calendar(
    entries: &[EarningsEntry],
    profiles: &HashMap<CompactString, CompanyProfile>,
    limit: usize,
) -> WeekCalendar {
    let decorated: Vec<(&EarningsEntry, Option<&CompanyProfile>)> = entries
        .iter()
        .map(|entry| (entry, profiles.get(&entry.symbol)))
        .collect();

    let cap_of = |profile: Option<&CompanyProfile>| profile.and_then(|p| p.market_cap);

    let mut ranked: Vec<_> = decorated
        .iter()
        .filter(|(_, profile)| cap_of(*profile).is_some_and(f64::is_finite))
        .cloned()
        .collect();
    if ranked.is_empty() {
        tracing::debug!(
            "No market caps among {} earnings entries, keeping provider order",
            entries.len()
        );
        ranked = decorated;
    }

    ranked.sort_by(|(_, a), (_, b)| {
        cap_of(*b)
            .unwrap_or(0.0)
            .total_cmp(&cap_of(*a).unwrap_or(0.0))
    });
    ranked.truncate(limit);

    let mut calendar = WeekCalendar::default();
    for (entry, profile) in ranked {
        let Some(index) = trading_day_index(entry.date.weekday()) else {
            continue;
        };
        let row = EarningsRow {
            symbol: entry.symbol.clone(),
            company_name: profile
                .map(|p| p.name.clone())
                .unwrap_or_else(|| entry.symbol.to_string()),
            logo: profile.and_then(|p| p.logo.clone()),
            market_cap: cap_of(profile),
            date: entry.date,
            hour: entry.hour.clone(),
            eps_actual: entry.eps_actual,
            eps_estimate: entry.eps_estimate,
            revenue_actual: entry.revenue_actual,
            revenue_estimate: entry.revenue_estimate,
        };
        calendar.days[index].push(Session::from_hour(entry.hour.as_deref()), row);
    }
    calendar
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn entry(symbol: &str, date: &str, hour: Option<&str>) -> EarningsEntry {
        EarningsEntry {
            symbol: symbol.into(),
            date: date.parse().unwrap(),
            hour: hour.map(str::to_string),
            eps_actual: None,
            eps_estimate: None,
            revenue_actual: None,
            revenue_estimate: None,
        }
    }

    fn profile(symbol: &str, cap: Option<f64>) -> (CompactString, CompanyProfile) {
        let at = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        let mut p = CompanyProfile::unknown(symbol, at);
        p.name = format!("{symbol} Inc");
        p.market_cap = cap;
        (symbol.into(), p)
    }

    #[test]
    fn session_from_hour() {
        assert_eq!(Session::from_hour(Some("bmo")), Session::BeforeOpen);
        assert_eq!(Session::from_hour(Some("BMO")), Session::BeforeOpen);
        assert_eq!(Session::from_hour(Some("amc")), Session::AfterClose);
        assert_eq!(Session::from_hour(Some("dmh")), Session::AfterClose);
        assert_eq!(Session::from_hour(None), Session::AfterClose);
    }

    #[test]
    fn groups_by_day_and_session() {
        // 2025-11-17 is a Monday.
        let entries = vec![
            entry("AAA", "2025-11-17", Some("bmo")),
            entry("BBB", "2025-11-17", Some("amc")),
            entry("CCC", "2025-11-20", None),
        ];
        let profiles: HashMap<_, _> = [
            profile("AAA", Some(3.0)),
            profile("BBB", Some(2.0)),
            profile("CCC", Some(1.0)),
        ]
        .into_iter()
        .collect();

        let cal = build_calendar(&entries, &profiles, 80);
        let monday = cal.day(Weekday::Mon).unwrap();
        assert_eq!(monday.session(Session::BeforeOpen)[0].symbol, "AAA");
        assert_eq!(monday.session(Session::AfterClose)[0].company_name, "BBB Inc");
        assert_eq!(cal.day(Weekday::Thu).unwrap().after_close[0].symbol, "CCC");
        assert_eq!(cal.total(), 3);
    }

    #[test]
    fn keeps_only_largest_with_known_caps() {
        let entries = vec![
            entry("SMALL", "2025-11-18", Some("bmo")),
            entry("NOCAP", "2025-11-18", Some("bmo")),
            entry("BIG", "2025-11-18", Some("bmo")),
            entry("MID", "2025-11-18", Some("bmo")),
        ];
        let profiles: HashMap<_, _> = [
            profile("SMALL", Some(1.0)),
            profile("NOCAP", None),
            profile("BIG", Some(100.0)),
            profile("MID", Some(10.0)),
        ]
        .into_iter()
        .collect();

        let cal = build_calendar(&entries, &profiles, 2);
        let symbols: Vec<_> = cal.day(Weekday::Tue).unwrap().before_open.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["BIG", "MID"]);
    }

    #[test]
    fn falls_back_to_all_entries_without_caps() {
        let entries = vec![
            entry("XXX", "2025-11-19", Some("amc")),
            entry("YYY", "2025-11-19", Some("amc")),
        ];
        let cal = build_calendar(&entries, &HashMap::new(), 80);
        let wednesday = cal.day(Weekday::Wed).unwrap();
        let symbols: Vec<_> = wednesday.after_close.iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["XXX", "YYY"]);
        assert_eq!(wednesday.after_close[0].company_name, "XXX");
        assert_eq!(wednesday.after_close[0].logo, None);
    }

    #[test]
    fn weekend_dates_are_dropped() {
        let entries = vec![entry("SAT", "2025-11-22", Some("bmo"))];
        let cal = build_calendar(&entries, &HashMap::new(), 80);
        assert!(cal.is_empty());
        assert!(cal.day(Weekday::Sat).is_none());
    }
}
