//! Static data for pre-existing named holiday calendars.
//!

pub mod all;
pub mod bus;

use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::error::{ScheduleError, ScheduleResult};

fn unknown(name: &str) -> ScheduleError {
    ScheduleError::UnknownCalendar {
        name: name.to_string(),
    }
}

pub(crate) fn get_weekmask_by_name(name: &str) -> ScheduleResult<Vec<u8>> {
    let hmap: HashMap<&str, &[u8]> =
        HashMap::from([("all", all::WEEKMASK), ("bus", bus::WEEKMASK)]);
    match hmap.get(name) {
        None => Err(unknown(name)),
        Some(value) => Ok(value.to_vec()),
    }
}

pub(crate) fn get_holidays_by_name(name: &str) -> ScheduleResult<Vec<NaiveDateTime>> {
    let hmap: HashMap<&str, &[&str]> =
        HashMap::from([("all", all::HOLIDAYS), ("bus", bus::HOLIDAYS)]);
    match hmap.get(name) {
        None => Err(unknown(name)),
        Some(value) => value
            .iter()
            .map(|x| {
                NaiveDateTime::parse_from_str(x, "%Y-%m-%d %H:%M:%S")
                    .map_err(|_| ScheduleError::parse(x, "holiday date"))
            })
            .collect(),
    }
}

// UNIT TESTS
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_weekmask() {
        let result = get_weekmask_by_name("bus").unwrap();
        assert_eq!(result, vec![5, 6]);
        let result = get_weekmask_by_name("all").unwrap();
        assert_eq!(result, Vec::<u8>::new());
    }

    #[test]
    fn test_get_holidays() {
        let result = get_holidays_by_name("bus").unwrap();
        assert_eq!(result, vec![]);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            get_holidays_by_name("ldn"),
            Err(ScheduleError::UnknownCalendar {
                name: "ldn".to_string()
            })
        );
    }
}
