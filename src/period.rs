use chrono::{Datelike as _, Days, Months, NaiveDate};
use clap::ValueEnum;

/// A named billing period, relative to the current date
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Period {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dates {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl Dates {
    /// `YYYY-MM-DD - YYYY-MM-DD`
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.since.format("%Y-%m-%d"),
            self.until.format("%Y-%m-%d")
        )
    }
}

impl Period {
    /// Weeks start on monday. `this-year` ends today, all other periods are complete.
    pub fn dates(self, today: NaiveDate) -> Dates {
        match self {
            Self::Today => Dates {
                since: today,
                until: today,
            },
            Self::Yesterday => {
                let yesterday = today - Days::new(1);
                Dates {
                    since: yesterday,
                    until: yesterday,
                }
            }
            Self::ThisWeek => week_of(today),
            Self::LastWeek => week_of(today - Days::new(7)),
            Self::ThisMonth => month_of(today),
            Self::LastMonth => month_of(first_of_month(today) - Days::new(1)),
            Self::ThisYear => Dates {
                since: first_of_year(today),
                until: today,
            },
            Self::LastYear => {
                let until = first_of_year(today) - Days::new(1);
                Dates {
                    since: first_of_year(until),
                    until,
                }
            }
        }
    }
}

fn week_of(date: NaiveDate) -> Dates {
    let since = date - Days::new(date.weekday().num_days_from_monday().into());
    Dates {
        since,
        until: since + Days::new(6),
    }
}

fn month_of(date: NaiveDate) -> Dates {
    let since = first_of_month(date);
    Dates {
        since,
        until: since + Months::new(1) - Days::new(1),
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.day0().into())
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.ordinal0().into())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[rstest]
    #[case(Period::Today, date(2020, 8, 12), date(2020, 8, 12))]
    #[case(Period::Yesterday, date(2020, 8, 11), date(2020, 8, 11))]
    #[case(Period::ThisWeek, date(2020, 8, 10), date(2020, 8, 16))]
    #[case(Period::LastWeek, date(2020, 8, 3), date(2020, 8, 9))]
    #[case(Period::ThisMonth, date(2020, 8, 1), date(2020, 8, 31))]
    #[case(Period::LastMonth, date(2020, 7, 1), date(2020, 7, 31))]
    #[case(Period::ThisYear, date(2020, 1, 1), date(2020, 8, 12))]
    #[case(Period::LastYear, date(2019, 1, 1), date(2019, 12, 31))]
    fn on_a_wednesday(
        #[case] period: Period,
        #[case] since: NaiveDate,
        #[case] until: NaiveDate,
    ) {
        assert_eq!(Dates { since, until }, period.dates(date(2020, 8, 12)));
    }

    #[rstest]
    #[case(Period::Yesterday, date(2020, 2, 29), date(2020, 2, 29))]
    #[case(Period::ThisWeek, date(2020, 2, 24), date(2020, 3, 1))]
    #[case(Period::LastWeek, date(2020, 2, 17), date(2020, 2, 23))]
    #[case(Period::ThisMonth, date(2020, 3, 1), date(2020, 3, 31))]
    #[case(Period::LastMonth, date(2020, 2, 1), date(2020, 2, 29))]
    fn on_first_of_month(
        #[case] period: Period,
        #[case] since: NaiveDate,
        #[case] until: NaiveDate,
    ) {
        // 2020-03-01 is a sunday
        assert_eq!(Dates { since, until }, period.dates(date(2020, 3, 1)));
    }

    #[rstest]
    #[case(Period::Yesterday, date(2020, 12, 31), date(2020, 12, 31))]
    #[case(Period::LastMonth, date(2020, 12, 1), date(2020, 12, 31))]
    #[case(Period::ThisMonth, date(2021, 1, 1), date(2021, 1, 31))]
    #[case(Period::ThisYear, date(2021, 1, 1), date(2021, 1, 1))]
    #[case(Period::LastYear, date(2020, 1, 1), date(2020, 12, 31))]
    fn on_new_years_day(
        #[case] period: Period,
        #[case] since: NaiveDate,
        #[case] until: NaiveDate,
    ) {
        assert_eq!(Dates { since, until }, period.dates(date(2021, 1, 1)));
    }

    #[test]
    fn week_starting_on_monday() {
        // 2020-08-10 is a monday
        assert_eq!(
            Dates {
                since: date(2020, 8, 10),
                until: date(2020, 8, 16)
            },
            Period::ThisWeek.dates(date(2020, 8, 10))
        );
    }

    #[test]
    fn february_in_non_leap_year() {
        assert_eq!(
            Dates {
                since: date(2021, 2, 1),
                until: date(2021, 2, 28)
            },
            Period::ThisMonth.dates(date(2021, 2, 15))
        );
    }

    #[test]
    fn label() {
        let dates = Dates {
            since: date(2020, 8, 1),
            until: date(2020, 8, 31),
        };
        assert_eq!("2020-08-01 - 2020-08-31", dates.label());
    }
}
