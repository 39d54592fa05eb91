use crate::utils::error::{AutofillError, Result};
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePickerOptions {
    pub format: String,
    pub autohide: bool,
}

impl Default for DatePickerOptions {
    fn default() -> Self {
        Self {
            format: "yyyy-mm-dd".to_string(),
            autohide: true,
        }
    }
}

impl DatePickerOptions {
    /// The picker's format string in chrono syntax.
    pub fn chrono_format(&self) -> String {
        self.format
            .replace("yyyy", "%Y")
            .replace("mm", "%m")
            .replace("dd", "%d")
    }

    pub fn parse(&self, value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), &self.chrono_format()).map_err(|e| {
            AutofillError::FormError {
                message: format!("'{}' is not a {} date: {}", value, self.format, e),
            }
        })
    }
}

/// Third-party datepicker attached to `.datepicker` inputs.
pub trait DatePicker: Send + Sync {
    fn attach(&self, element_id: &str, options: &DatePickerOptions);
}

pub fn attach_datepickers<P: DatePicker + ?Sized>(picker: &P, element_ids: &[String]) -> usize {
    let options = DatePickerOptions::default();
    for id in element_ids {
        picker.attach(id, &options);
    }
    element_ids.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Picker {
        attached: Mutex<Vec<(String, DatePickerOptions)>>,
    }

    impl DatePicker for Picker {
        fn attach(&self, element_id: &str, options: &DatePickerOptions) {
            self.attached
                .lock()
                .unwrap()
                .push((element_id.to_string(), options.clone()));
        }
    }

    #[test]
    fn test_attach_with_iso_format() {
        let picker = Picker::default();
        let ids = vec!["start_date".to_string(), "end_date".to_string()];

        assert_eq!(attach_datepickers(&picker, &ids), 2);

        let attached = picker.attached.lock().unwrap();
        assert_eq!(attached[1].0, "end_date");
        assert_eq!(attached[0].1.format, "yyyy-mm-dd");
        assert!(attached[0].1.autohide);
    }

    #[test]
    fn test_parse_picked_date() {
        let options = DatePickerOptions::default();
        assert_eq!(options.chrono_format(), "%Y-%m-%d");
        assert_eq!(
            options.parse("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(options.parse("29/02/2024").is_err());
        assert!(options.parse("2023-02-29").is_err());
    }
}
