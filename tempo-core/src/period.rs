use time::macros::time;
use time::{Date, Duration, Month, PrimitiveDateTime};

/// The three selectable viewing periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMode {
    Day,
    Week,
    Month,
}

/// A selected viewing period: a mode plus an anchor date.
///
/// The anchor is normalized to the period's first day (Monday, or calendar
/// day 1) at construction, so stepping behaves the same no matter which day
/// inside the period was originally picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    mode: PeriodMode,
    anchor: Date,
}

/// The Monday of the week containing `date`. Sunday belongs to the
/// previous Monday's week.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

/// The Sunday ending the week that starts at `week_start`.
pub fn week_end(week_start: Date) -> Date {
    week_start + Duration::days(6)
}

/// The first calendar day of `date`'s month.
pub fn month_start(date: Date) -> Date {
    // day 1 exists in every month
    date.replace_day(1).unwrap()
}

/// The last calendar day of the month beginning at `month_start`.
pub fn month_end(month_start: Date) -> Date {
    month_start
        .replace_day(month_start.month().length(month_start.year()))
        .unwrap()
}

/// ISO week number of `date` (the Thursday of a week decides which year,
/// and which week of it, the week belongs to). Display labeling only.
pub fn week_number(date: Date) -> u8 {
    date.iso_week()
}

fn step_months(anchor: Date, steps: i32) -> Date {
    let months = anchor.year() * 12 + (anchor.month() as i32 - 1) + steps;
    // rem_euclid keeps the month index in 0..12 across year boundaries
    let month = Month::try_from((months.rem_euclid(12) + 1) as u8).unwrap();
    Date::from_calendar_date(months.div_euclid(12), month, 1).unwrap()
}

impl Period {
    /// The period of the given mode containing `date`.
    pub fn containing(mode: PeriodMode, date: Date) -> Self {
        let anchor = match mode {
            PeriodMode::Day => date,
            PeriodMode::Week => week_start(date),
            PeriodMode::Month => month_start(date),
        };
        Self { mode, anchor }
    }

    pub fn mode(&self) -> PeriodMode {
        self.mode
    }

    /// First day of the period (the normalized anchor).
    pub fn start(&self) -> Date {
        self.anchor
    }

    /// Last day of the period, inclusive.
    pub fn end(&self) -> Date {
        match self.mode {
            PeriodMode::Day => self.anchor,
            PeriodMode::Week => week_end(self.anchor),
            PeriodMode::Month => month_end(self.anchor),
        }
    }

    /// Shift by whole periods; month stepping rolls year boundaries.
    pub fn step(&self, steps: i32) -> Self {
        let anchor = match self.mode {
            PeriodMode::Day => self.anchor + Duration::days(i64::from(steps)),
            PeriodMode::Week => self.anchor + Duration::days(7 * i64::from(steps)),
            PeriodMode::Month => step_months(self.anchor, steps),
        };
        Self {
            mode: self.mode,
            anchor,
        }
    }

    /// The period immediately after this one.
    pub fn next(&self) -> Self {
        self.step(1)
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        self.step(-1)
    }

    /// Inclusive day-level containment; time of day plays no part.
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start() && date <= self.end()
    }

    /// True iff `today` normalizes into this period.
    pub fn is_current(&self, today: Date) -> bool {
        *self == Self::containing(self.mode, today)
    }

    /// Datetime window for the backend list query: period start at local
    /// midnight through the last second of the final day.
    pub fn window(&self) -> (PrimitiveDateTime, PrimitiveDateTime) {
        (
            self.start().midnight(),
            self.end().with_time(time!(23:59:59)),
        )
    }

    /// Human label for the period, matching the navigation headers:
    /// `Today, Wednesday, August 6, 2025`, `This Week, Aug 4 to Aug 10,
    /// 2025`, `Week 32, Aug 4 to Aug 10, 2025`, `This Month, August 2025`.
    pub fn label(&self, today: Date) -> String {
        match self.mode {
            PeriodMode::Day => {
                let d = self.anchor;
                let base = format!("{}, {} {}, {}", d.weekday(), d.month(), d.day(), d.year());
                if self.is_current(today) {
                    format!("Today, {}", base)
                } else {
                    base
                }
            }
            PeriodMode::Week => {
                let (start, end) = (self.start(), self.end());
                let prefix = if self.is_current(today) {
                    "This Week".to_string()
                } else {
                    format!("Week {}", week_number(self.anchor))
                };
                format!(
                    "{}, {} {} to {} {}, {}",
                    prefix,
                    short_month(start.month()),
                    start.day(),
                    short_month(end.month()),
                    end.day(),
                    end.year()
                )
            }
            PeriodMode::Month => {
                let base = format!("{} {}", self.anchor.month(), self.anchor.year());
                if self.is_current(today) {
                    format!("This Month, {}", base)
                } else {
                    base
                }
            }
        }
    }
}

fn short_month(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}
