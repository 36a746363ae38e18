use clap::ValueEnum;

use crate::period::Dates;

/// Language of the invoice and of the generated header and footer lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    /// Danish
    Da,
    /// English
    En,
}

impl Language {
    /// Language code as expected by the Dinero invoices API
    pub fn dinero_code(self) -> &'static str {
        match self {
            Self::Da => "da-DK",
            Self::En => "en-GB",
        }
    }

    pub fn header(self, dates: &Dates) -> String {
        match self {
            Self::Da => format!("Konsulent ydelser: {}", dates.label()),
            Self::En => format!("Consultancy services: {}", dates.label()),
        }
    }

    pub fn footer(self, total_hours: &str) -> String {
        match self {
            Self::Da => format!("I alt: {total_hours} timer"),
            Self::En => format!("Total: {total_hours} hours"),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::invoice::{FOOTER_PREFIXES, HEADER_PREFIXES};

    fn dates() -> Dates {
        Dates {
            since: NaiveDate::from_ymd_opt(2020, 8, 1).unwrap(),
            until: NaiveDate::from_ymd_opt(2020, 8, 31).unwrap(),
        }
    }

    #[test]
    fn danish() {
        assert_eq!(
            "Konsulent ydelser: 2020-08-01 - 2020-08-31",
            Language::Da.header(&dates())
        );
        assert_eq!("I alt: 5.6 timer", Language::Da.footer("5.6"));
        assert_eq!("da-DK", Language::Da.dinero_code());
    }

    #[test]
    fn english() {
        assert_eq!(
            "Consultancy services: 2020-08-01 - 2020-08-31",
            Language::En.header(&dates())
        );
        assert_eq!("Total: 5.6 hours", Language::En.footer("5.6"));
        assert_eq!("en-GB", Language::En.dinero_code());
    }

    #[test]
    fn generated_markers_are_recognized() {
        for language in [Language::Da, Language::En] {
            let header = language.header(&dates());
            let footer = language.footer("1.0");
            assert!(HEADER_PREFIXES.iter().any(|p| header.starts_with(p)));
            assert!(FOOTER_PREFIXES.iter().any(|p| footer.starts_with(p)));
        }
    }
}
